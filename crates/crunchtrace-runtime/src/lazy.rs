use crunchtrace_types::{TraceEvent, TraceSessionMetadata};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::recording::decode_events;
use crate::{Error, Result};

/// Handle to a persisted session that has not been read yet.
///
/// Every `load_*` call reads and parses the file again; nothing is cached.
#[derive(Debug, Clone)]
pub struct LazyLoadedSession {
    buffer_file: PathBuf,
    metadata_file: PathBuf,
}

impl LazyLoadedSession {
    pub fn new(buffer_file: PathBuf, metadata_file: PathBuf) -> Self {
        Self {
            buffer_file,
            metadata_file,
        }
    }

    pub fn buffer_file(&self) -> &Path {
        &self.buffer_file
    }

    pub fn metadata_file(&self) -> &Path {
        &self.metadata_file
    }

    pub fn load_buffer(&self) -> Result<Vec<TraceEvent>> {
        let bytes = std::fs::read(&self.buffer_file)?;
        let events = decode_events(&bytes)?;
        debug!(
            path = %self.buffer_file.display(),
            events = events.len(),
            "loaded session recording"
        );
        Ok(events)
    }

    /// The metadata document as stored, before mapping onto
    /// [`TraceSessionMetadata`].
    pub fn load_raw_metadata(&self) -> Result<serde_json::Value> {
        let bytes = std::fs::read(&self.metadata_file)?;
        let text = String::from_utf8(bytes)
            .map_err(|e| Error::Decode(format!("metadata is not valid UTF-8: {}", e)))?;
        serde_json::from_str(&text).map_err(|e| Error::Decode(e.to_string()))
    }

    /// Populates each field on its own. Missing fields stay unset, and so do
    /// fields whose value does not parse; the rest of the document still loads.
    pub fn load_metadata(&self) -> Result<TraceSessionMetadata> {
        let Value::Object(fields) = self.load_raw_metadata()? else {
            return Err(Error::Decode(
                "metadata document must be a JSON object".to_string(),
            ));
        };
        let reader = MetadataFields {
            fields: &fields,
            path: &self.metadata_file,
        };

        Ok(TraceSessionMetadata {
            start_time: reader.get("start_time"),
            end_time: reader.get("end_time"),
            file_size_in_bytes: reader.get("file_size_in_bytes"),
            file_size_on_disk: reader.get("file_size_on_disk"),
            files_in_session: reader.get("files_in_session"),
            excluded_files: reader.get("excluded_files"),
            events_in_session: reader.get("events_in_session"),
            working_directory: reader.get("working_directory"),
            name: reader.get("name"),
        })
    }
}

struct MetadataFields<'a> {
    fields: &'a Map<String, Value>,
    path: &'a Path,
}

impl MetadataFields<'_> {
    fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.fields.get(key).filter(|v| !v.is_null())?;
        match T::deserialize(value) {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    field = key,
                    error = %err,
                    "ignoring malformed metadata field"
                );
                None
            }
        }
    }
}
