use thiserror::Error;

/// Library error type for album-frame operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration was parsed but failed validation.
    #[error("invalid configuration: {0}")]
    BadConfig(String),

    /// Underlying IO error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// YAML/serde configuration error.
    #[error(transparent)]
    Config(#[from] serde_yaml::Error),
}
