//! Core error types for Riff Player

use thiserror::Error;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for Riff Player
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage base URL could not be parsed
    #[error("Invalid storage URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Catalog payload could not be decoded
    #[error("Invalid catalog payload: {0}")]
    Json(#[from] serde_json::Error),
}
