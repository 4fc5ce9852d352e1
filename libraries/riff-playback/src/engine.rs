//! Sound engine abstraction
//!
//! The controller never decodes audio itself. A platform [`SoundEngine`]
//! (a Web Audio wrapper in the browser, a mock in tests) loads sounds from
//! URLs and reports back through [`EngineEvent`]s. Every sound gets a fresh
//! [`SoundId`], which is how late callbacks from an unloaded sound are told
//! apart from the live one.
//!
//! Position polling goes through an [`IntervalScheduler`] so the host decides
//! how ticks are delivered (`setInterval` in a browser, manual calls in tests).

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Engine handle for one loaded sound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SoundId(pub u64);

/// Host handle for one repeating timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimerId(pub u64);

/// Everything the engine needs to create a sound
#[derive(Debug, Clone, PartialEq)]
pub struct LoadRequest {
    /// Playable URL
    pub url: String,

    /// Initial volume (0.0-1.0)
    pub volume: f32,

    /// Container format hints, e.g. `["mp3"]`
    pub formats: Vec<String>,
}

/// Callback kinds reported by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineEventKind {
    /// Sound started producing audio
    Played,

    /// Sound paused
    Paused,

    /// Sound reached its natural end
    Ended,
}

/// Callback from the engine, tagged with the sound it belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineEvent {
    /// Sound that raised the callback
    pub sound: SoundId,

    /// What happened
    pub kind: EngineEventKind,
}

impl EngineEvent {
    /// `Played` callback for `sound`
    pub fn played(sound: SoundId) -> Self {
        Self {
            sound,
            kind: EngineEventKind::Played,
        }
    }

    /// `Paused` callback for `sound`
    pub fn paused(sound: SoundId) -> Self {
        Self {
            sound,
            kind: EngineEventKind::Paused,
        }
    }

    /// `Ended` callback for `sound`
    pub fn ended(sound: SoundId) -> Self {
        Self {
            sound,
            kind: EngineEventKind::Ended,
        }
    }
}

/// Platform sound engine
///
/// Transport calls are requests: the engine confirms them later through
/// `Played`/`Paused`/`Ended` events. After [`unload`](SoundEngine::unload)
/// the id is dead and any event still carrying it is dropped by the caller.
pub trait SoundEngine {
    /// Create a sound for `request.url`
    ///
    /// Loading is asynchronous; the sound is usable once it reports `Played`.
    /// The returned id must not repeat one handed out earlier: callbacks are
    /// matched to the live sound by id alone. The controller refuses a sound
    /// whose id equals the one it just released.
    fn load(&mut self, request: &LoadRequest) -> Result<SoundId>;

    /// Request playback start or resume
    fn play(&mut self, sound: SoundId);

    /// Request pause
    fn pause(&mut self, sound: SoundId);

    /// Stop playback and rewind
    fn stop(&mut self, sound: SoundId);

    /// Free the sound and its decode buffers
    fn unload(&mut self, sound: SoundId);

    /// Current playback position in seconds, if known
    fn position(&self, sound: SoundId) -> Option<f64>;

    /// Total duration in seconds, if known yet
    fn duration(&self, sound: SoundId) -> Option<f64>;

    /// Apply a volume (0.0-1.0) to a live sound
    fn set_volume(&mut self, sound: SoundId, volume: f32);
}

/// Repeating timer provider
pub trait IntervalScheduler {
    /// Start a timer that fires every `period` until cancelled
    fn schedule(&mut self, period: Duration) -> TimerId;

    /// Cancel a timer; ticks already queued for it must be ignored by the caller
    fn cancel(&mut self, timer: TimerId);
}
