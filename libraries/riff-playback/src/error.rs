//! Error types for playback management

use riff_core::TrackId;
use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// No playable URL could be resolved for the track
    #[error("No playable URL for track {0}")]
    Unresolved(TrackId),

    /// Track is not known to the catalog
    #[error("Unknown track: {0}")]
    UnknownTrack(TrackId),

    /// Sound engine refused or failed an operation
    #[error("Sound engine error: {0}")]
    Engine(String),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
