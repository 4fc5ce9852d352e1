//! WASM bindings for riff-playback
//!
//! This module lets the player run inside a web page. The page supplies a
//! host object wrapping its audio library and timers, and reports engine
//! callbacks and timer ticks back into [`WasmPlayer`].

mod host;
mod player;

pub use host::{JsIntervalScheduler, JsSoundEngine};
pub use player::WasmPlayer;
