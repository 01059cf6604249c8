use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Summary written next to a session recording.
///
/// Every field is optional: a document reloaded from disk only fills the
/// fields it actually contains.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TraceSessionMetadata {
    /// UTC
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    /// UTC
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    /// Size of the recording file in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size_in_bytes: Option<u64>,
    /// Same size, formatted for humans (e.g. "1.2 KB").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size_on_disk: Option<String>,
    /// Files that produced at least one traced occurrence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files_in_session: Option<Vec<String>>,
    /// Files rejected by the file filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excluded_files: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events_in_session: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_directory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl TraceSessionMetadata {
    pub fn duration_seconds(&self) -> Option<i64> {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => Some((end - start).num_seconds()),
            _ => None,
        }
    }
}
