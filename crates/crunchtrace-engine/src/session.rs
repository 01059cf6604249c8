use chrono::{DateTime, Utc};
use std::collections::BTreeSet;

/// Bookkeeping for one trace run: which files were traced, which were
/// skipped by the filter, and when the run started and finished.
#[derive(Debug, Clone)]
pub struct TraceSession {
    pub name: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    files_in_session: BTreeSet<String>,
    excluded_files: BTreeSet<String>,
}

impl TraceSession {
    pub fn new(name: impl Into<String>) -> Self {
        Self::started_at(name, Utc::now())
    }

    pub fn started_at(name: impl Into<String>, started_at: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            started_at,
            finished_at: None,
            files_in_session: BTreeSet::new(),
            excluded_files: BTreeSet::new(),
        }
    }

    pub fn will_skip_file(&mut self, file_path: &str) {
        if !self.excluded_files.contains(file_path) {
            self.excluded_files.insert(file_path.to_string());
        }
    }

    pub fn did_enter_traceable_file(&mut self, file_path: &str) {
        if !self.files_in_session.contains(file_path) {
            self.files_in_session.insert(file_path.to_string());
        }
    }

    pub fn finish(&mut self) {
        self.finish_at(Utc::now());
    }

    pub fn finish_at(&mut self, finished_at: DateTime<Utc>) {
        self.finished_at = Some(finished_at);
    }

    pub fn files_in_session(&self) -> impl Iterator<Item = &str> {
        self.files_in_session.iter().map(String::as_str)
    }

    pub fn excluded_files(&self) -> impl Iterator<Item = &str> {
        self.excluded_files.iter().map(String::as_str)
    }

    /// Folds the bookkeeping of another thread's run into this one.
    ///
    /// The merged run spans from the earliest start to the latest finish.
    pub fn merge(&mut self, other: TraceSession) {
        self.started_at = self.started_at.min(other.started_at);
        self.finished_at = match (self.finished_at, other.finished_at) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };
        self.files_in_session.extend(other.files_in_session);
        self.excluded_files.extend(other.excluded_files);
    }
}
