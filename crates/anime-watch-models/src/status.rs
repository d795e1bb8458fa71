use serde::{Deserialize, Serialize};
use std::fmt;

/// Personal viewing status of a tracked title
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum WatchStatus {
    /// Currently watching
    #[serde(rename = "watching")]
    Watching,
    /// Finished watching
    #[serde(rename = "completed")]
    Completed,
    /// Want to watch later
    #[serde(rename = "plan-to-watch")]
    PlanToWatch,
}

impl WatchStatus {
    pub const ALL: [WatchStatus; 3] = [
        WatchStatus::Watching,
        WatchStatus::Completed,
        WatchStatus::PlanToWatch,
    ];

    /// Stable key used in persisted snapshots and on the command line
    pub fn as_key(&self) -> &'static str {
        match self {
            WatchStatus::Watching => "watching",
            WatchStatus::Completed => "completed",
            WatchStatus::PlanToWatch => "plan-to-watch",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WatchStatus::Watching => "Watching",
            WatchStatus::Completed => "Completed",
            WatchStatus::PlanToWatch => "Plan to Watch",
        }
    }
}

impl fmt::Display for WatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_to_kebab_keys() {
        assert_eq!(serde_json::to_string(&WatchStatus::PlanToWatch).unwrap(), "\"plan-to-watch\"");
        assert_eq!(serde_json::to_string(&WatchStatus::Watching).unwrap(), "\"watching\"");
    }
}
