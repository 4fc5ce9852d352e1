//! Riff Player - Playback Management
//!
//! Queue state and playback session control for Riff Player.
//!
//! This crate provides:
//! - Queue state store (queued ids + active id, with change subscription)
//! - Next/previous sequencing with wraparound
//! - Playback session controller (one live sound per active track)
//! - Position polling, progress and `m:ss` formatting
//! - Volume control with binary mute
//! - WASM bindings for the browser (`wasm` feature)
//!
//! # Architecture
//!
//! `riff-playback` never decodes audio. A platform [`SoundEngine`] loads
//! sounds from URLs and reports `Played`/`Paused`/`Ended` callbacks, and an
//! [`IntervalScheduler`] drives the position poll. Song metadata and URL
//! resolution come from a [`riff_core::TrackCatalog`].
//!
//! Everything runs on a single thread: engine callbacks and timer ticks are
//! fed back in by the host.
//!
//! # Example: Queue Navigation
//!
//! ```rust
//! use riff_playback::{navigation, QueueStore};
//! use riff_core::TrackId;
//!
//! let store = QueueStore::new();
//! store.set_ids(vec![TrackId::new("a"), TrackId::new("b"), TrackId::new("c")]);
//! store.set_id("c");
//!
//! let state = store.state();
//! let next = navigation::next_id(&state.ids, state.active_id.as_ref());
//! assert_eq!(next, Some(&TrackId::new("a")));
//! ```
//!
//! # Example: Formatting
//!
//! ```rust
//! use riff_playback::{format_time, progress_percent};
//!
//! assert_eq!(format_time(65.0), "1:05");
//! assert_eq!(progress_percent(10.0, 0.0), 0.0);
//! ```

pub mod engine;
mod error;
mod events;
mod format;
pub mod navigation;
mod player;
mod session;
mod store;
pub mod types;
mod volume;

#[cfg(feature = "wasm")]
pub mod wasm;

// Public exports
pub use engine::{
    EngineEvent, EngineEventKind, IntervalScheduler, LoadRequest, SoundEngine, SoundId, TimerId,
};
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use format::{format_time, progress_percent, time_label};
pub use navigation::Direction;
pub use player::{Player, PlayerSnapshot};
pub use session::PlaybackController;
pub use store::{QueueChange, QueueState, QueueStore, SubscriptionId};
pub use types::{PlaybackConfig, PlaybackState};
pub use volume::{Volume, VolumeIcon};
