//! WASM-compatible Player wrapper

use super::host::{JsIntervalScheduler, JsSoundEngine};
use crate::{EngineEvent, PlaybackConfig, Player, QueueStore, SoundId, TimerId};
use js_sys::Function;
use riff_core::{InMemoryCatalog, PublicStorage, Song, TrackCatalog, TrackId};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

/// Catalog shared between the player and the page
#[derive(Clone)]
struct SharedCatalog(Rc<RefCell<InMemoryCatalog>>);

impl TrackCatalog for SharedCatalog {
    fn song(&self, id: &TrackId) -> Option<Song> {
        self.0.borrow().song(id)
    }

    fn audio_url(&self, song: &Song) -> Option<String> {
        self.0.borrow().audio_url(song)
    }

    fn image_url(&self, song: &Song) -> Option<String> {
        self.0.borrow().image_url(song)
    }
}

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// WASM-compatible player
///
/// This wraps the core Player with a JavaScript-friendly API.
#[wasm_bindgen]
pub struct WasmPlayer {
    inner: Player,
    catalog: SharedCatalog,

    // Event callback
    on_event: Option<Function>,
}

#[wasm_bindgen]
impl WasmPlayer {
    /// Create a new player
    ///
    /// `config` may be `undefined` to use the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(host: JsValue, storage_url: &str, config: JsValue) -> Result<WasmPlayer, JsValue> {
        // Enable panic hooks for better error messages in console
        console_error_panic_hook::set_once();

        let config: PlaybackConfig = if config.is_undefined() || config.is_null() {
            PlaybackConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        let storage = PublicStorage::new(storage_url).map_err(to_js_error)?;
        let catalog = SharedCatalog(Rc::new(RefCell::new(InMemoryCatalog::new(storage))));

        let inner = Player::new(
            config,
            QueueStore::new(),
            Box::new(catalog.clone()),
            Box::new(JsSoundEngine::new(host.clone())),
            Box::new(JsIntervalScheduler::new(host)),
        );

        Ok(Self {
            inner,
            catalog,
            on_event: None,
        })
    }

    // ===== Catalog =====

    /// Add songs from a JSON array of `{id, title, author, song_path, image_path}`
    ///
    /// An active track that was waiting for its metadata starts right away.
    #[wasm_bindgen(js_name = registerSongs)]
    pub fn register_songs(&mut self, json: &str) -> Result<usize, JsValue> {
        let count = self
            .catalog
            .0
            .borrow_mut()
            .load_json(json)
            .map_err(to_js_error)?;

        self.inner.refresh();
        self.flush();
        Ok(count)
    }

    // ===== Queue =====

    /// Make a track active
    #[wasm_bindgen(js_name = setId)]
    pub fn set_id(&mut self, id: String) {
        self.inner.select(id);
        self.flush();
    }

    /// Replace the queue
    #[wasm_bindgen(js_name = setIds)]
    pub fn set_ids(&mut self, ids: Vec<String>) {
        self.inner.set_ids(ids.into_iter().map(TrackId::from).collect());
        self.flush();
    }

    /// Replace the queue and make `id` active
    #[wasm_bindgen(js_name = playFrom)]
    pub fn play_from(&mut self, ids: Vec<String>, id: String) {
        self.inner
            .play_from(ids.into_iter().map(TrackId::from).collect(), id);
        self.flush();
    }

    /// Clear queue and active track
    pub fn reset(&mut self) {
        self.inner.reset();
        self.flush();
    }

    /// Active track id
    #[wasm_bindgen(js_name = activeId)]
    pub fn active_id(&self) -> Option<String> {
        self.inner.store().active_id().map(|id| id.to_string())
    }

    /// Queued track ids
    pub fn ids(&self) -> Vec<String> {
        self.inner
            .store()
            .ids()
            .into_iter()
            .map(|id| id.to_string())
            .collect()
    }

    // ===== Playback Control =====

    /// Start or resume playback
    pub fn play(&mut self) {
        self.inner.play();
        self.flush();
    }

    /// Pause playback
    pub fn pause(&mut self) {
        self.inner.pause();
        self.flush();
    }

    /// Play/pause button
    #[wasm_bindgen(js_name = togglePlay)]
    pub fn toggle_play(&mut self) {
        self.inner.toggle_play();
        self.flush();
    }

    /// Skip to next track
    pub fn next(&mut self) {
        self.inner.next();
        self.flush();
    }

    /// Go to previous track
    pub fn previous(&mut self) {
        self.inner.previous();
        self.flush();
    }

    // ===== Volume Control =====

    /// Toggle mute
    #[wasm_bindgen(js_name = toggleMute)]
    pub fn toggle_mute(&mut self) {
        self.inner.toggle_mute();
        self.flush();
    }

    /// Set volume (0.0-1.0)
    #[wasm_bindgen(js_name = setVolume)]
    pub fn set_volume(&mut self, volume: f32) {
        self.inner.set_volume(volume);
        self.flush();
    }

    // ===== Host Callbacks =====

    /// Engine started producing audio for `sound`
    #[wasm_bindgen(js_name = soundPlayed)]
    pub fn sound_played(&mut self, sound: f64) {
        self.engine_event(EngineEvent::played(SoundId(sound as u64)));
    }

    /// Engine paused `sound`
    #[wasm_bindgen(js_name = soundPaused)]
    pub fn sound_paused(&mut self, sound: f64) {
        self.engine_event(EngineEvent::paused(SoundId(sound as u64)));
    }

    /// `sound` reached its end
    #[wasm_bindgen(js_name = soundEnded)]
    pub fn sound_ended(&mut self, sound: f64) {
        self.engine_event(EngineEvent::ended(SoundId(sound as u64)));
    }

    /// Polling timer fired
    #[wasm_bindgen(js_name = timerFired)]
    pub fn timer_fired(&mut self, timer: f64) {
        self.inner.timer_fired(TimerId(timer as u64));
        self.flush();
    }

    // ===== State Queries =====

    /// Transport bar contents, `null` while hidden
    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        match self.inner.snapshot() {
            Some(snapshot) => Ok(serde_wasm_bindgen::to_value(&snapshot)?),
            None => Ok(JsValue::NULL),
        }
    }

    /// Drain pending events as an array
    #[wasm_bindgen(js_name = drainEvents)]
    pub fn drain_events(&mut self) -> Result<JsValue, JsValue> {
        let events = self.inner.drain_events();
        Ok(serde_wasm_bindgen::to_value(&events)?)
    }

    // ===== Event Listeners =====

    /// Register event callback, called once per playback event
    #[wasm_bindgen(js_name = onEvent)]
    pub fn on_event(&mut self, callback: Function) {
        self.on_event = Some(callback);
        self.flush();
    }

    // ===== Internal =====

    fn engine_event(&mut self, event: EngineEvent) {
        self.inner.engine_event(event);
        self.flush();
    }

    fn flush(&mut self) {
        let Some(cb) = self.on_event.as_ref() else {
            return;
        };

        for event in self.inner.drain_events() {
            if let Ok(js_event) = serde_wasm_bindgen::to_value(&event) {
                cb.call1(&JsValue::NULL, &js_event).ok();
            }
        }
    }
}
