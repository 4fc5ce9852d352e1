//! Playback session controller
//!
//! Binds the active track to exactly one live sound. On every track change
//! the previous sound is stopped and unloaded, and its polling timer
//! cancelled, before the next sound is requested. Engine callbacks and timer
//! ticks are matched against the live session by id, so anything arriving
//! from a released sound is dropped.
//!
//! The controller also owns queue sequencing: skips and natural track ends
//! pick the next id from the shared [`QueueStore`] and write it back with
//! `set_id`. Whoever observes the store (normally the
//! [`Player`](crate::Player)) then calls
//! [`on_active_track_changed`](PlaybackController::on_active_track_changed).

use crate::{
    engine::{
        EngineEvent, EngineEventKind, IntervalScheduler, LoadRequest, SoundEngine, SoundId,
        TimerId,
    },
    error::{PlaybackError, Result},
    events::PlaybackEvent,
    format::{progress_percent, time_label},
    navigation::{self, Direction},
    store::QueueStore,
    types::{PlaybackConfig, PlaybackState},
    volume::{Volume, VolumeIcon},
};
use riff_core::TrackId;
use std::time::Duration;
use tracing::{debug, warn};

/// One active track bound to one live sound
#[derive(Debug)]
struct Session {
    track_id: TrackId,
    sound: SoundId,
    timer: TimerId,
    is_loaded: bool,
    is_playing: bool,
    current_time: f64,
    duration: f64,
    // Latched on the first `Ended`, cleared on the next `Played`
    finished: bool,
}

/// Playback session controller
pub struct PlaybackController {
    store: QueueStore,
    engine: Box<dyn SoundEngine>,
    scheduler: Box<dyn IntervalScheduler>,
    session: Option<Session>,
    // Sound of the last released session
    retired: Option<SoundId>,
    volume: Volume,
    poll_interval: Duration,
    formats: Vec<String>,
    pending_events: Vec<PlaybackEvent>,
}

impl PlaybackController {
    /// Create a controller with no session
    pub fn new(
        config: &PlaybackConfig,
        store: QueueStore,
        engine: Box<dyn SoundEngine>,
        scheduler: Box<dyn IntervalScheduler>,
    ) -> Self {
        Self {
            store,
            engine,
            scheduler,
            session: None,
            retired: None,
            volume: Volume::new(config.volume),
            poll_interval: config.poll_interval(),
            formats: config.formats.clone(),
            pending_events: Vec::new(),
        }
    }

    /// Queue store this controller sequences
    pub fn store(&self) -> &QueueStore {
        &self.store
    }

    // ===== Session Lifecycle =====

    /// Replace the session with one for `track`
    ///
    /// The previous sound is released first. A missing `url` leaves the
    /// controller without a session and returns [`PlaybackError::Unresolved`].
    /// On success playback is requested right away; the session counts as
    /// loaded once the engine reports `Played`.
    pub fn on_active_track_changed(&mut self, track: TrackId, url: Option<&str>) -> Result<()> {
        let previous = self.teardown();

        let Some(url) = url else {
            warn!("No playable URL for track {}, not acquiring a sound", track);
            self.emit_released(previous);
            return Err(PlaybackError::Unresolved(track));
        };

        let request = LoadRequest {
            url: url.to_string(),
            volume: self.volume.level(),
            formats: self.formats.clone(),
        };

        let sound = match self.engine.load(&request) {
            Ok(sound) => sound,
            Err(e) => {
                warn!("Sound engine failed to load {}: {}", url, e);
                self.emit_released(previous);
                self.pending_events.push(PlaybackEvent::Error {
                    message: e.to_string(),
                });
                return Err(e);
            }
        };

        if self.retired == Some(sound) {
            warn!("Sound engine reused released sound id {:?}", sound);
            self.engine.unload(sound);
            let e = PlaybackError::Engine(format!("sound id {} reused", sound.0));
            self.emit_released(previous);
            self.pending_events.push(PlaybackEvent::Error {
                message: e.to_string(),
            });
            return Err(e);
        }

        let timer = self.scheduler.schedule(self.poll_interval);
        let duration = known_duration(self.engine.duration(sound)).unwrap_or(0.0);
        debug!("Session started: track={} sound={:?} timer={:?}", track, sound, timer);

        self.session = Some(Session {
            track_id: track.clone(),
            sound,
            timer,
            is_loaded: false,
            is_playing: false,
            current_time: 0.0,
            duration,
            finished: false,
        });

        self.pending_events.push(PlaybackEvent::TrackChanged {
            track_id: Some(track),
            previous_track_id: previous,
        });
        self.emit_state_changed();

        self.engine.play(sound);
        Ok(())
    }

    /// Tear down the current session, if any
    pub fn release(&mut self) {
        let previous = self.teardown();
        self.emit_released(previous);
    }

    /// Stop and free the live sound and cancel its timer
    fn teardown(&mut self) -> Option<TrackId> {
        let session = self.session.take()?;

        self.scheduler.cancel(session.timer);
        self.engine.stop(session.sound);
        self.engine.unload(session.sound);
        self.retired = Some(session.sound);
        debug!("Session released: track={} sound={:?}", session.track_id, session.sound);

        Some(session.track_id)
    }

    // ===== Transport =====

    /// Start or resume playback
    ///
    /// Ignored until the engine has started the sound once.
    pub fn play(&mut self) {
        if let Some(session) = &self.session {
            if session.is_loaded && !session.is_playing {
                self.engine.play(session.sound);
            }
        }
    }

    /// Pause playback
    pub fn pause(&mut self) {
        if let Some(session) = &self.session {
            if session.is_playing {
                self.engine.pause(session.sound);
            }
        }
    }

    /// Pause if playing, play otherwise
    pub fn toggle_play(&mut self) {
        if !self.is_loaded() {
            return;
        }

        if self.is_playing() {
            self.pause();
        } else {
            self.play();
        }
    }

    // ===== Volume Control =====

    /// Set volume (0.0-1.0)
    pub fn set_volume(&mut self, volume: f32) {
        self.volume.set_level(volume);
        self.apply_volume();
    }

    /// Switch between silent and full volume
    pub fn toggle_mute(&mut self) {
        self.volume.toggle_mute();
        self.apply_volume();
    }

    fn apply_volume(&mut self) {
        let level = self.volume.level();
        if let Some(session) = &self.session {
            self.engine.set_volume(session.sound, level);
        }
        self.pending_events.push(PlaybackEvent::VolumeChanged { volume: level });
    }

    // ===== Queue Sequencing =====

    /// Select the track after the active one
    ///
    /// Returns the newly selected id, or `None` when the queue is empty.
    pub fn play_next(&mut self) -> Option<TrackId> {
        self.skip(Direction::Next)
    }

    /// Select the track before the active one
    pub fn play_previous(&mut self) -> Option<TrackId> {
        self.skip(Direction::Previous)
    }

    fn skip(&mut self, direction: Direction) -> Option<TrackId> {
        let target = self.store.with_state(|state| {
            navigation::step(&state.ids, state.active_id.as_ref(), direction).cloned()
        })?;

        debug!("Skipping {:?} to {}", direction, target);
        self.store.set_id(target.clone());
        Some(target)
    }

    // ===== Engine Callbacks =====

    /// Handle a callback from the sound engine
    pub fn handle_engine_event(&mut self, event: EngineEvent) {
        let Some(session) = self.session.as_mut().filter(|s| s.sound == event.sound) else {
            debug!("Dropping {:?} from released sound {:?}", event.kind, event.sound);
            return;
        };

        match event.kind {
            EngineEventKind::Played => {
                session.is_loaded = true;
                session.is_playing = true;
                session.finished = false;
                if let Some(duration) = known_duration(self.engine.duration(session.sound)) {
                    session.duration = duration;
                }
                self.emit_state_changed();
            }
            EngineEventKind::Paused => {
                session.is_playing = false;
                self.emit_state_changed();
            }
            EngineEventKind::Ended => {
                if session.finished {
                    debug!("Ignoring repeated end of sound {:?}", session.sound);
                    return;
                }
                session.finished = true;
                session.is_playing = false;
                let track_id = session.track_id.clone();

                self.emit_state_changed();
                self.pending_events.push(PlaybackEvent::TrackFinished { track_id });
                self.play_next();
            }
        }
    }

    /// Handle a tick of the polling timer
    pub fn on_timer(&mut self, timer: TimerId) {
        let Some(session) = self.session.as_mut().filter(|s| s.timer == timer) else {
            debug!("Dropping tick from cancelled timer {:?}", timer);
            return;
        };

        if let Some(position) = sanitize(self.engine.position(session.sound)) {
            session.current_time = if session.is_playing {
                session.current_time.max(position)
            } else {
                position
            };
        }
        if let Some(duration) = known_duration(self.engine.duration(session.sound)) {
            session.duration = duration;
        }

        let update = PlaybackEvent::PositionUpdate {
            current_time: session.current_time,
            duration: session.duration,
        };
        self.pending_events.push(update);
    }

    // ===== State Queries =====

    /// Track bound to the live session
    pub fn active_track(&self) -> Option<&TrackId> {
        self.session.as_ref().map(|s| &s.track_id)
    }

    /// Live sound handle
    pub fn sound(&self) -> Option<SoundId> {
        self.session.as_ref().map(|s| s.sound)
    }

    /// Live polling timer
    pub fn timer(&self) -> Option<TimerId> {
        self.session.as_ref().map(|s| s.timer)
    }

    /// Whether the engine has started the sound at least once
    pub fn is_loaded(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.is_loaded)
    }

    /// Current transport state
    pub fn is_playing(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.is_playing)
    }

    /// Elapsed seconds, sampled once per poll
    pub fn current_time(&self) -> f64 {
        self.session.as_ref().map_or(0.0, |s| s.current_time)
    }

    /// Total seconds, 0 until the engine knows it
    pub fn duration(&self) -> f64 {
        self.session.as_ref().map_or(0.0, |s| s.duration)
    }

    /// Elapsed share of the track in percent
    pub fn progress(&self) -> f64 {
        progress_percent(self.current_time(), self.duration())
    }

    /// `m:ss / m:ss` label
    pub fn time_label(&self) -> String {
        time_label(self.current_time(), self.duration())
    }

    /// Current volume (0.0-1.0)
    pub fn volume(&self) -> f32 {
        self.volume.level()
    }

    /// Icon for the volume button
    pub fn volume_icon(&self) -> VolumeIcon {
        self.volume.icon()
    }

    /// Transport state derived from the session
    pub fn state(&self) -> PlaybackState {
        match &self.session {
            None => PlaybackState::Stopped,
            Some(s) if !s.is_loaded => PlaybackState::Loading,
            Some(s) if s.is_playing => PlaybackState::Playing,
            Some(_) => PlaybackState::Paused,
        }
    }

    // ===== Events =====

    /// Drain all pending events
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    pub(crate) fn emit(&mut self, event: PlaybackEvent) {
        self.pending_events.push(event);
    }

    fn emit_state_changed(&mut self) {
        let state = self.state();
        self.pending_events.push(PlaybackEvent::StateChanged { state });
    }

    fn emit_released(&mut self, previous: Option<TrackId>) {
        if previous.is_some() {
            self.pending_events.push(PlaybackEvent::TrackChanged {
                track_id: None,
                previous_track_id: previous,
            });
            self.emit_state_changed();
        }
    }
}

impl Drop for PlaybackController {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl std::fmt::Debug for PlaybackController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackController")
            .field("session", &self.session)
            .field("volume", &self.volume)
            .field("poll_interval", &self.poll_interval)
            .finish_non_exhaustive()
    }
}

/// Engine times are only trusted when finite and non-negative
fn sanitize(secs: Option<f64>) -> Option<f64> {
    secs.filter(|s| s.is_finite() && *s >= 0.0)
}

/// Engines report 0 until the stream header is decoded
fn known_duration(secs: Option<f64>) -> Option<f64> {
    sanitize(secs).filter(|s| *s > 0.0)
}
