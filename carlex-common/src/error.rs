//! Common error types for carlex

use thiserror::Error;

/// Common result type for carlex operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across carlex crates
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parse error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Reference dictionary could not be loaded
    #[error("Dictionary error: {0}")]
    Dictionary(String),
}
