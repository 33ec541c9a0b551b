//! Error types for promptdock

use thiserror::Error;

/// Result type for promptdock operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for promptdock
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Plugin error
    #[error("Plugin error: {0}")]
    Plugin(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Clipboard access error
    #[error("Clipboard error: {0}")]
    Clipboard(String),

    /// Foreign window automation error
    #[error("Window automation error: {0}")]
    Automation(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
