use std::fmt;

/// Result type for crunchtrace-runtime operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the runtime layer
#[derive(Debug)]
pub enum Error {
    /// IO operation failed
    Io(std::io::Error),

    /// Recording or metadata artifact could not be parsed
    Decode(String),

    /// Event buffer or metadata could not be serialized
    Encode(String),

    /// Call-stack reconstruction failed while replaying occurrences
    Trace(crunchtrace_engine::Error),

    /// Configuration error
    Config(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Decode(msg) => write!(f, "Decode error: {}", msg),
            Error::Encode(msg) => write!(f, "Encode error: {}", msg),
            Error::Trace(err) => write!(f, "Trace error: {}", err),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Trace(err) => Some(err),
            Error::Decode(_) | Error::Encode(_) | Error::Config(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<crunchtrace_engine::Error> for Error {
    fn from(err: crunchtrace_engine::Error) -> Self {
        Error::Trace(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}
