use crate::error::CatalogError;

/// Result of a single catalog request.
///
/// `Empty` covers both "the catalog had nothing" and "the payload lacked the expected data";
/// `Failed` is a transport or decoding failure that has already been logged.
#[derive(Debug)]
pub enum FetchOutcome<T> {
    Loaded(T),
    Empty,
    Failed(CatalogError),
}

impl<T> FetchOutcome<T> {
    pub fn is_loaded(&self) -> bool {
        matches!(self, FetchOutcome::Loaded(_))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, FetchOutcome::Empty)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, FetchOutcome::Failed(_))
    }

    pub fn error(&self) -> Option<&CatalogError> {
        match self {
            FetchOutcome::Failed(e) => Some(e),
            _ => None,
        }
    }

    /// Absent on both `Empty` and `Failed`
    pub fn into_option(self) -> Option<T> {
        match self {
            FetchOutcome::Loaded(value) => Some(value),
            FetchOutcome::Empty | FetchOutcome::Failed(_) => None,
        }
    }
}

impl<T> FetchOutcome<Vec<T>> {
    /// Wrap a list, treating an empty list as `Empty`
    pub fn from_list(items: Vec<T>) -> Self {
        if items.is_empty() {
            FetchOutcome::Empty
        } else {
            FetchOutcome::Loaded(items)
        }
    }

    /// Empty sequence on `Empty` and `Failed`
    pub fn into_entries(self) -> Vec<T> {
        self.into_option().unwrap_or_default()
    }
}
