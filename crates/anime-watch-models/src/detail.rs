use crate::catalog_entry::CatalogEntry;
use serde::{Deserialize, Serialize};

/// Full record for one title, as shown in the detail overlay.
///
/// Superset of [`CatalogEntry`]; the extra fields are optional because the catalog
/// omits them freely.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogEntryDetail {
    #[serde(flatten)]
    pub entry: CatalogEntry,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub members: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default)]
    pub studios: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl CatalogEntryDetail {
    pub fn from_entry(entry: CatalogEntry) -> Self {
        Self {
            entry,
            members: None,
            duration: None,
            studios: Vec::new(),
            source: None,
        }
    }

    pub fn id(&self) -> u64 {
        self.entry.id
    }

    pub fn aired_span_label(&self) -> Option<String> {
        self.entry.aired.as_ref().and_then(|aired| aired.span_label())
    }

    /// Studio names joined for display, None when the catalog lists none
    pub fn studios_label(&self) -> Option<String> {
        if self.studios.is_empty() {
            None
        } else {
            Some(self.studios.join(", "))
        }
    }
}

impl From<CatalogEntryDetail> for CatalogEntry {
    fn from(detail: CatalogEntryDetail) -> Self {
        detail.entry
    }
}
