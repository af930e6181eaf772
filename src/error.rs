//! Error types for logger construction and record handling

use std::io;

/// Result type for logger operations
pub type Result<T> = std::result::Result<T, Error>;

/// A level name that does not match any known [`Level`](crate::Level)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown log level: {0}")]
pub struct ParseLevelError(pub String);

/// Error types that can occur while building loggers or handling records
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The configured level name is not recognized
    #[error("invalid log level: {0}")]
    InvalidLevel(#[from] ParseLevelError),

    /// A record could not be serialized to JSON
    #[error("failed to serialize log record: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The underlying writer failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Building the logger during global initialization failed
    #[error("failed to create logger: {0}")]
    Init(#[source] Box<Error>),
}
