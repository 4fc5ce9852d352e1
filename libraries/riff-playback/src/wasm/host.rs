//! JS-backed sound engine and scheduler
//!
//! The host object must provide:
//!
//! ```text
//! load(url, volume, formats) -> soundId
//! play(soundId) / pause(soundId) / stop(soundId) / unload(soundId)
//! seek(soundId) -> seconds        duration(soundId) -> seconds
//! volume(soundId, level)
//! setInterval(periodMs) -> timerId   clearInterval(timerId)
//! ```

use crate::engine::{IntervalScheduler, LoadRequest, SoundEngine, SoundId, TimerId};
use crate::error::{PlaybackError, Result};
use js_sys::{Array, Function, Reflect};
use std::time::Duration;
use wasm_bindgen::{JsCast, JsValue};

fn call(host: &JsValue, method: &str, args: &[JsValue]) -> std::result::Result<JsValue, JsValue> {
    let func: Function = Reflect::get(host, &JsValue::from_str(method))?.dyn_into()?;
    let args: Array = args.iter().collect();
    func.apply(host, &args)
}

fn call_logged(host: &JsValue, method: &str, args: &[JsValue]) -> Option<JsValue> {
    match call(host, method, args) {
        Ok(value) => Some(value),
        Err(e) => {
            web_sys::console::warn_2(&JsValue::from_str(&format!("host.{method}() failed:")), &e);
            None
        }
    }
}

fn sound_arg(sound: SoundId) -> JsValue {
    JsValue::from_f64(sound.0 as f64)
}

/// Sound engine delegating to a JS host object
#[derive(Debug, Clone)]
pub struct JsSoundEngine {
    host: JsValue,
}

impl JsSoundEngine {
    /// Wrap a host object
    pub fn new(host: JsValue) -> Self {
        Self { host }
    }
}

impl SoundEngine for JsSoundEngine {
    fn load(&mut self, request: &LoadRequest) -> Result<SoundId> {
        let formats: Array = request
            .formats
            .iter()
            .map(|f| JsValue::from_str(f))
            .collect();
        let id = call(
            &self.host,
            "load",
            &[
                JsValue::from_str(&request.url),
                JsValue::from_f64(f64::from(request.volume)),
                formats.into(),
            ],
        )
        .map_err(|e| PlaybackError::Engine(format!("{:?}", e)))?;

        id.as_f64()
            .filter(|id| id.is_finite() && *id >= 0.0)
            .map(|id| SoundId(id as u64))
            .ok_or_else(|| PlaybackError::Engine("load() did not return a sound id".to_string()))
    }

    fn play(&mut self, sound: SoundId) {
        call_logged(&self.host, "play", &[sound_arg(sound)]);
    }

    fn pause(&mut self, sound: SoundId) {
        call_logged(&self.host, "pause", &[sound_arg(sound)]);
    }

    fn stop(&mut self, sound: SoundId) {
        call_logged(&self.host, "stop", &[sound_arg(sound)]);
    }

    fn unload(&mut self, sound: SoundId) {
        call_logged(&self.host, "unload", &[sound_arg(sound)]);
    }

    fn position(&self, sound: SoundId) -> Option<f64> {
        call_logged(&self.host, "seek", &[sound_arg(sound)])?.as_f64()
    }

    fn duration(&self, sound: SoundId) -> Option<f64> {
        call_logged(&self.host, "duration", &[sound_arg(sound)])?.as_f64()
    }

    fn set_volume(&mut self, sound: SoundId, volume: f32) {
        call_logged(
            &self.host,
            "volume",
            &[sound_arg(sound), JsValue::from_f64(f64::from(volume))],
        );
    }
}

/// Interval scheduler delegating to a JS host object
#[derive(Debug, Clone)]
pub struct JsIntervalScheduler {
    host: JsValue,
}

impl JsIntervalScheduler {
    /// Wrap a host object
    pub fn new(host: JsValue) -> Self {
        Self { host }
    }
}

impl IntervalScheduler for JsIntervalScheduler {
    fn schedule(&mut self, period: Duration) -> TimerId {
        let id = call_logged(
            &self.host,
            "setInterval",
            &[JsValue::from_f64(period.as_millis() as f64)],
        )
        .and_then(|id| id.as_f64())
        .unwrap_or(0.0);

        TimerId(id as u64)
    }

    fn cancel(&mut self, timer: TimerId) {
        call_logged(
            &self.host,
            "clearInterval",
            &[JsValue::from_f64(timer.0 as f64)],
        );
    }
}
