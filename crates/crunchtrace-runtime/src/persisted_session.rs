use chrono::{DateTime, Utc};
use crunchtrace_engine::TraceSession;
use crunchtrace_types::{TraceEvent, TraceSessionMetadata};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::lazy::LazyLoadedSession;
use crate::recording::encode_events;
use crate::size::HumanReadableByteSize;
use crate::{Error, Result};

pub const METADATA_FILENAME: &str = "pycrunch-trace.meta.json";
pub const RECORDING_FILENAME: &str = "session.pycrunch-trace";

/// A session directory holding one recording and its metadata.
///
/// The directory itself is owned by the caller: it must already exist and is
/// never created or removed here. Both artifacts are written whole, once.
#[derive(Debug, Clone)]
pub struct PersistedSession {
    session_directory: PathBuf,
}

impl PersistedSession {
    pub fn new(session_directory: impl Into<PathBuf>) -> Self {
        Self {
            session_directory: session_directory.into(),
        }
    }

    pub fn session_directory(&self) -> &Path {
        &self.session_directory
    }

    pub fn recording_path(&self) -> PathBuf {
        self.session_directory.join(RECORDING_FILENAME)
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.session_directory.join(METADATA_FILENAME)
    }

    pub fn save_with_metadata<F, E>(
        &self,
        event_buffer: &[TraceEvent],
        files_in_session: F,
        excluded_files: E,
    ) -> Result<TraceSessionMetadata>
    where
        F: IntoIterator,
        F::Item: Into<String>,
        E: IntoIterator,
        E::Item: Into<String>,
    {
        let meta = self.write_recording(
            event_buffer,
            files_in_session.into_iter().map(Into::into).collect(),
            excluded_files.into_iter().map(Into::into).collect(),
            None,
        )?;
        self.save_metadata(&meta)?;
        Ok(meta)
    }

    /// Saves a finished run, taking file lists and timestamps from its
    /// session bookkeeping.
    pub fn save_trace(
        &self,
        event_buffer: &[TraceEvent],
        session: &TraceSession,
    ) -> Result<TraceSessionMetadata> {
        let mut meta = self.write_recording(
            event_buffer,
            session.files_in_session().map(str::to_string).collect(),
            session.excluded_files().map(str::to_string).collect(),
            Some((session.started_at, session.finished_at)),
        )?;
        meta.working_directory = std::env::current_dir()
            .ok()
            .map(|dir| dir.display().to_string());
        self.save_metadata(&meta)?;
        Ok(meta)
    }

    fn write_recording(
        &self,
        event_buffer: &[TraceEvent],
        files_in_session: Vec<String>,
        excluded_files: Vec<String>,
        times: Option<(DateTime<Utc>, Option<DateTime<Utc>>)>,
    ) -> Result<TraceSessionMetadata> {
        let file_to_save = self.recording_path();
        let bytes = encode_events(event_buffer)?;

        let mut file = File::create(&file_to_save)?;
        file.write_all(&bytes)?;
        let bytes_written = bytes.len() as u64;

        debug!(
            path = %file_to_save.display(),
            events = event_buffer.len(),
            bytes = bytes_written,
            "wrote session recording"
        );

        Ok(TraceSessionMetadata {
            start_time: times.map(|(start, _)| start),
            end_time: times.and_then(|(_, end)| end),
            file_size_in_bytes: Some(bytes_written),
            file_size_on_disk: Some(HumanReadableByteSize(bytes_written).to_string()),
            files_in_session: Some(files_in_session),
            excluded_files: Some(excluded_files),
            events_in_session: Some(event_buffer.len()),
            working_directory: None,
            name: Some(self.session_directory.display().to_string()),
        })
    }

    pub fn save_metadata(&self, meta: &TraceSessionMetadata) -> Result<()> {
        let metadata_file_path = self.metadata_path();
        let json = serde_json::to_string_pretty(meta).map_err(|e| Error::Encode(e.to_string()))?;

        let mut file = File::create(&metadata_file_path)?;
        file.write_all(json.as_bytes())?;

        debug!(path = %metadata_file_path.display(), "wrote session metadata");
        Ok(())
    }

    /// Points at the two artifacts of `directory` without reading them.
    pub fn load_from_directory(directory: impl AsRef<Path>) -> LazyLoadedSession {
        let directory = directory.as_ref();
        LazyLoadedSession::new(
            directory.join(RECORDING_FILENAME),
            directory.join(METADATA_FILENAME),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_empty_buffer_writes_both_files() -> Result<()> {
        let dir = TempDir::new()?;
        let session = PersistedSession::new(dir.path());

        let meta = session.save_with_metadata(&[], Vec::<String>::new(), Vec::<String>::new())?;

        assert!(session.recording_path().exists());
        assert!(session.metadata_path().exists());
        assert_eq!(meta.events_in_session, Some(0));
        assert_eq!(
            meta.file_size_in_bytes,
            Some(std::fs::metadata(session.recording_path())?.len())
        );
        Ok(())
    }

    #[test]
    fn test_missing_directory_is_not_created() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("not-there");
        let session = PersistedSession::new(&missing);

        let err = session
            .save_with_metadata(&[], ["a.py"], Vec::<String>::new())
            .unwrap_err();

        assert!(matches!(err, Error::Io(_)));
        assert!(!missing.exists());
    }

    #[test]
    fn test_name_is_session_directory() -> Result<()> {
        let dir = TempDir::new()?;
        let session = PersistedSession::new(dir.path());
        let meta = session.save_with_metadata(&[], ["a.py"], ["os.py"])?;

        assert_eq!(meta.name, Some(dir.path().display().to_string()));
        assert_eq!(meta.files_in_session, Some(vec!["a.py".to_string()]));
        assert_eq!(meta.excluded_files, Some(vec!["os.py".to_string()]));
        Ok(())
    }
}
