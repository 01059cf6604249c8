use crunchtrace_types::TraceEvent;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Leading bytes of every recording file.
pub const RECORDING_MAGIC: &[u8; 4] = b"CRTR";

/// Bumped whenever the event model changes shape.
pub const RECORDING_FORMAT_VERSION: u16 = 1;

#[derive(Serialize)]
struct RecordingRef<'a> {
    format_version: u16,
    events: &'a [TraceEvent],
}

#[derive(Deserialize)]
struct Recording {
    format_version: u16,
    events: Vec<TraceEvent>,
}

/// Encodes the whole event buffer: magic, then a postcard envelope.
pub fn encode_events(events: &[TraceEvent]) -> Result<Vec<u8>> {
    let envelope = RecordingRef {
        format_version: RECORDING_FORMAT_VERSION,
        events,
    };
    let mut bytes = RECORDING_MAGIC.to_vec();
    let body = postcard::to_stdvec(&envelope).map_err(|e| Error::Encode(e.to_string()))?;
    bytes.extend_from_slice(&body);
    Ok(bytes)
}

pub fn decode_events(bytes: &[u8]) -> Result<Vec<TraceEvent>> {
    let body = bytes
        .strip_prefix(RECORDING_MAGIC.as_slice())
        .ok_or_else(|| Error::Decode("not a crunchtrace recording (bad magic)".to_string()))?;

    let recording: Recording =
        postcard::from_bytes(body).map_err(|e| Error::Decode(e.to_string()))?;

    if recording.format_version != RECORDING_FORMAT_VERSION {
        return Err(Error::Decode(format!(
            "unsupported recording format version {} (expected {})",
            recording.format_version, RECORDING_FORMAT_VERSION
        )));
    }

    Ok(recording.events)
}
