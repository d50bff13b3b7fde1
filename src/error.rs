//! Error types for drishti-replay

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Drishti error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A raw sample could not be decoded into pixels
    #[error("Decode error: {0}")]
    Decode(String),

    /// A textual record (pose, laser scan) could not be parsed
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    /// Invalid frame store format
    #[error("Invalid store format: {0}")]
    InvalidFormat(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<postcard::Error> for Error {
    fn from(e: postcard::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
