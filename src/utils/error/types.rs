//! Error types for the loader

use thiserror::Error;

/// Result type alias for the loader
pub type Result<T> = std::result::Result<T, LoaderError>;

/// Main error type for the loader
#[derive(Error, Debug)]
pub enum LoaderError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP client errors (connect failures, timeouts, body decoding)
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// The agent answered with something other than 200
    #[error("Agent returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The agent answered 200 with a body that is neither an object nor an array
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// A credential line that cannot be submitted
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    /// Checkpoint file holds something other than an offset inside its range
    #[error("Checkpoint error: {0}")]
    Checkpoint(String),

    /// Input file has nothing to partition
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// Split count below one
    #[error("Invalid split count: {0}")]
    InvalidSplitCount(usize),

    /// A background task panicked or was cancelled
    #[error("Task failed: {0}")]
    TaskFailed(String),
}
