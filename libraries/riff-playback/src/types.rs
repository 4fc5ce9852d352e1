//! Core types for playback management

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Initial volume (0.0-1.0, default: 1.0)
    pub volume: f32,

    /// Position polling period in milliseconds (default: 1000)
    pub poll_interval_ms: u64,

    /// Container formats hinted to the sound engine (default: `["mp3"]`)
    pub formats: Vec<String>,

    /// Cover shown when a song has no resolvable image
    pub fallback_image: String,
}

impl PlaybackConfig {
    /// Position polling period
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            volume: 1.0,
            poll_interval_ms: 1000,
            formats: vec!["mp3".to_string()],
            fallback_image: "/images/liked.png".to_string(),
        }
    }
}

/// Transport state as seen by the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    /// No sound acquired
    Stopped,

    /// Sound requested, engine has not started it yet
    Loading,

    /// Currently playing
    Playing,

    /// Loaded but not producing audio
    Paused,
}
