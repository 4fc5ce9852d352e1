//! Player - glue between UI intents, the queue store and the controller
//!
//! The player subscribes to the [`QueueStore`] and turns every change of the
//! active id into a catalog lookup, URL resolution and a new controller
//! session. Store notifications land in an inbox that is drained before and
//! after each intent, so a track end that advances the queue never re-enters
//! the controller while it is still handling the engine callback, and writes
//! other store holders made in between are applied before the intent acts.

use crate::{
    engine::{EngineEvent, IntervalScheduler, SoundEngine, TimerId},
    error::{PlaybackError, Result},
    events::PlaybackEvent,
    session::PlaybackController,
    store::{QueueChange, QueueStore, SubscriptionId},
    types::{PlaybackConfig, PlaybackState},
    volume::VolumeIcon,
};
use riff_core::{Song, TrackCatalog, TrackId};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use tracing::debug;

/// Everything the transport bar renders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSnapshot {
    /// Active track
    pub track_id: TrackId,
    /// Song title
    pub title: String,
    /// Song author
    pub author: String,
    /// Cover URL, or the configured fallback
    pub image_url: String,
    /// Engine has started the sound at least once
    pub is_loaded: bool,
    /// Transport is running
    pub is_playing: bool,
    /// Spinner replaces the play button until the sound is loaded
    pub show_spinner: bool,
    /// Transport state
    pub state: PlaybackState,
    /// Elapsed seconds
    pub current_time: f64,
    /// Total seconds, 0 while unknown
    pub duration: f64,
    /// Elapsed share in percent
    pub progress: f64,
    /// `m:ss / m:ss`
    pub time_label: String,
    /// Volume (0.0-1.0)
    pub volume: f32,
    /// Volume button icon
    pub volume_icon: VolumeIcon,
}

#[derive(Debug, Clone)]
struct NowPlaying {
    song: Song,
    image_url: String,
}

/// Media player
pub struct Player {
    controller: PlaybackController,
    catalog: Box<dyn TrackCatalog>,
    inbox: Rc<RefCell<VecDeque<QueueChange>>>,
    subscription: SubscriptionId,
    now_playing: Option<NowPlaying>,
    fallback_image: String,
}

impl Player {
    /// Create a player observing `store`
    ///
    /// If the store already has an active track, a session for it is started.
    pub fn new(
        config: PlaybackConfig,
        store: QueueStore,
        catalog: Box<dyn TrackCatalog>,
        engine: Box<dyn SoundEngine>,
        scheduler: Box<dyn IntervalScheduler>,
    ) -> Self {
        let inbox = Rc::new(RefCell::new(VecDeque::new()));
        let sink = Rc::clone(&inbox);
        let subscription = store.subscribe(move |change: &QueueChange| {
            sink.borrow_mut().push_back(change.clone());
        });

        if let Some(active) = store.active_id() {
            inbox.borrow_mut().push_back(QueueChange::ActiveChanged {
                previous: None,
                active: Some(active),
            });
        }

        let controller = PlaybackController::new(&config, store, engine, scheduler);
        let mut player = Self {
            controller,
            catalog,
            inbox,
            subscription,
            now_playing: None,
            fallback_image: config.fallback_image,
        };
        player.pump();
        player
    }

    // ===== Selection =====

    /// Make `id` the active track (click on a song)
    ///
    /// Selecting the id that is already active retries it when no sound is
    /// bound yet, e.g. because its metadata was missing.
    pub fn select(&mut self, id: impl Into<TrackId>) {
        let id = id.into();
        self.pump();

        if self.store().active_id().as_ref() == Some(&id) {
            self.refresh();
        } else {
            self.store().set_id(id);
            self.pump();
        }
    }

    /// Queue `ids` and make `id` active (click on a song inside a list)
    pub fn play_from(&mut self, ids: Vec<TrackId>, id: impl Into<TrackId>) {
        self.pump();
        self.store().set_ids(ids);
        self.store().set_id(id);
        self.pump();
    }

    /// Replace the queue without touching the active track
    pub fn set_ids(&mut self, ids: Vec<TrackId>) {
        self.pump();
        self.store().set_ids(ids);
        self.pump();
    }

    /// Clear queue and active track, hiding the player
    pub fn reset(&mut self) {
        self.pump();
        self.store().reset();
        self.pump();
    }

    // ===== Transport =====

    /// Start or resume playback
    pub fn play(&mut self) {
        self.pump();
        self.controller.play();
    }

    /// Pause playback
    pub fn pause(&mut self) {
        self.pump();
        self.controller.pause();
    }

    /// Play/pause button
    pub fn toggle_play(&mut self) {
        self.pump();
        self.controller.toggle_play();
    }

    /// Skip forward
    pub fn next(&mut self) {
        self.pump();
        self.controller.play_next();
        self.pump();
    }

    /// Skip backward
    pub fn previous(&mut self) {
        self.pump();
        self.controller.play_previous();
        self.pump();
    }

    /// Volume button
    pub fn toggle_mute(&mut self) {
        self.pump();
        self.controller.toggle_mute();
    }

    /// Volume slider
    pub fn set_volume(&mut self, volume: f32) {
        self.pump();
        self.controller.set_volume(volume);
    }

    // ===== Host Callbacks =====

    /// Forward a sound engine callback
    pub fn engine_event(&mut self, event: EngineEvent) {
        self.pump();
        self.controller.handle_engine_event(event);
        self.pump();
    }

    /// Forward a polling timer tick
    ///
    /// Store writes made behind the player's back are picked up here at the
    /// latest.
    pub fn timer_fired(&mut self, timer: TimerId) {
        self.pump();
        self.controller.on_timer(timer);
    }

    /// Resolve the active track again if no sound is bound to it
    ///
    /// Call after the catalog learned new songs.
    pub fn refresh(&mut self) {
        self.pump();

        let Some(active) = self.store().active_id() else {
            return;
        };
        if self.controller.active_track() == Some(&active) {
            return;
        }

        debug!("Retrying unbound track {}", active);
        if let Err(e) = self.activate(active) {
            debug!("Player hidden: {}", e);
        }
    }

    // ===== State Queries =====

    /// Shared queue store
    pub fn store(&self) -> &QueueStore {
        self.controller.store()
    }

    /// Playback controller
    pub fn controller(&self) -> &PlaybackController {
        &self.controller
    }

    /// Metadata of the active song, if the catalog knows it
    pub fn song(&self) -> Option<&Song> {
        self.now_playing.as_ref().map(|n| &n.song)
    }

    /// Transport bar contents, `None` while the player is hidden
    ///
    /// The player is hidden when there is no active track, the catalog does
    /// not know it, or no sound could be acquired for it.
    pub fn snapshot(&self) -> Option<PlayerSnapshot> {
        let now = self.now_playing.as_ref()?;
        let track_id = self.controller.active_track()?.clone();
        let controller = &self.controller;

        Some(PlayerSnapshot {
            track_id,
            title: now.song.title.clone(),
            author: now.song.author.clone(),
            image_url: now.image_url.clone(),
            is_loaded: controller.is_loaded(),
            is_playing: controller.is_playing(),
            show_spinner: !controller.is_loaded(),
            state: controller.state(),
            current_time: controller.current_time(),
            duration: controller.duration(),
            progress: controller.progress(),
            time_label: controller.time_label(),
            volume: controller.volume(),
            volume_icon: controller.volume_icon(),
        })
    }

    /// Drain all pending events
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        self.pump();
        self.controller.drain_events()
    }

    // ===== Internal =====

    /// Apply queued store changes until the inbox is empty
    fn pump(&mut self) {
        loop {
            let next = self.inbox.borrow_mut().pop_front();
            let Some(change) = next else {
                break;
            };

            match change {
                QueueChange::ActiveChanged {
                    active: Some(id), ..
                } => {
                    if let Err(e) = self.activate(id) {
                        debug!("Player hidden: {}", e);
                    }
                }
                QueueChange::ActiveChanged { active: None, .. } => {
                    self.now_playing = None;
                    self.controller.release();
                }
                QueueChange::IdsChanged { length } => {
                    self.controller.emit(PlaybackEvent::QueueChanged { length });
                }
            }
        }
    }

    fn activate(&mut self, id: TrackId) -> Result<()> {
        let Some(song) = self.catalog.song(&id) else {
            self.now_playing = None;
            self.controller.release();
            return Err(PlaybackError::UnknownTrack(id));
        };

        let url = self.catalog.audio_url(&song);
        let image_url = self
            .catalog
            .image_url(&song)
            .unwrap_or_else(|| self.fallback_image.clone());
        self.now_playing = Some(NowPlaying { song, image_url });

        self.controller.on_active_track_changed(id, url.as_deref())
    }
}

impl Drop for Player {
    fn drop(&mut self) {
        self.controller.store().unsubscribe(self.subscription);
    }
}

impl std::fmt::Debug for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Player")
            .field("controller", &self.controller)
            .field("now_playing", &self.now_playing)
            .finish_non_exhaustive()
    }
}
