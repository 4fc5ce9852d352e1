//! Playback Events
//!
//! Event-based communication for UI synchronization during playback.
//! Events are emitted at key points:
//! - Session changes (new sound acquired or released)
//! - State changes (loading/playing/paused/stopped)
//! - Position updates (every poll tick)
//! - Natural end of a track

use crate::types::PlaybackState;
use riff_core::TrackId;
use serde::{Deserialize, Serialize};

/// Events emitted by the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PlaybackEvent {
    /// Playback state changed
    StateChanged {
        /// The new playback state
        state: PlaybackState,
    },

    /// A new session started for `track_id`, or the session was released
    TrackChanged {
        /// ID of the new track, `None` when the player was torn down
        track_id: Option<TrackId>,
        /// ID of the previous track (if any)
        previous_track_id: Option<TrackId>,
    },

    /// Track finished playing naturally (reached end)
    TrackFinished {
        /// ID of the finished track
        track_id: TrackId,
    },

    /// Position sample from the polling timer
    PositionUpdate {
        /// Elapsed seconds
        current_time: f64,
        /// Total seconds, 0 while unknown
        duration: f64,
    },

    /// Volume changed
    VolumeChanged {
        /// New volume level (0.0-1.0)
        volume: f32,
    },

    /// Queue replaced or cleared
    QueueChanged {
        /// New queue length
        length: usize,
    },

    /// Error occurred while acquiring a sound
    Error {
        /// Error message
        message: String,
    },
}
