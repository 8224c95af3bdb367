//! Error types for the linearization engine.
//!
//! Only invalid arguments and invalid configuration fail a call. Malformed
//! input data (unknown tags, unparseable spans) and structural anomalies are
//! logged and recovered locally, so they have no variant here.

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while building, wrapping or linearizing content.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Wrap or view width below the minimum of one column
    #[error("Invalid width: {0} (must be at least 1)")]
    InvalidWidth(usize),

    /// Configuration value out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Argument that does not refer to anything usable
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Malformed JSON configuration or snapshot
    #[error("JSON error: {0}")]
    Config(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
