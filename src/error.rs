use thiserror::Error;

/// Library error type for sharesaver operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration is missing a required value or holds an invalid one.
    #[error("invalid configuration: {0}")]
    BadConfig(String),

    /// Underlying IO error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON/serde configuration error.
    #[error(transparent)]
    Config(#[from] serde_json::Error),
}
