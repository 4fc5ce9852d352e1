//! Shared test doubles for the integration tests

#![allow(dead_code)]

use riff_core::{InMemoryCatalog, PublicStorage, Song, TrackCatalog, TrackId};
use riff_playback::{
    IntervalScheduler, LoadRequest, PlaybackConfig, PlaybackController, PlaybackError, Player,
    QueueStore, SoundEngine, SoundId, TimerId,
};
use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;
use std::time::Duration;

pub const STORAGE: &str = "https://cdn.test";

/// Everything the mock host has been asked to do
#[derive(Default)]
pub struct Host {
    pub loads: Vec<LoadRequest>,
    pub plays: Vec<SoundId>,
    pub pauses: Vec<SoundId>,
    pub stops: Vec<SoundId>,
    pub unloads: Vec<SoundId>,
    pub volumes: Vec<(SoundId, f32)>,
    pub live_sounds: BTreeSet<SoundId>,
    pub live_timers: BTreeSet<TimerId>,
    pub cancelled_timers: Vec<TimerId>,
    pub positions: HashMap<SoundId, f64>,
    pub durations: HashMap<SoundId, f64>,
    pub fail_loads: bool,
    next_id: u64,
}

impl Host {
    pub fn last_sound(&self) -> Option<SoundId> {
        self.live_sounds.iter().next_back().copied()
    }
}

pub type SharedHost = Rc<RefCell<Host>>;

/// Mock sound engine recording every request
pub struct MockEngine(pub SharedHost);

impl SoundEngine for MockEngine {
    fn load(&mut self, request: &LoadRequest) -> riff_playback::Result<SoundId> {
        let mut host = self.0.borrow_mut();
        if host.fail_loads {
            return Err(PlaybackError::Engine("unsupported codec".to_string()));
        }

        host.next_id += 1;
        let sound = SoundId(host.next_id);
        host.loads.push(request.clone());
        host.live_sounds.insert(sound);
        Ok(sound)
    }

    fn play(&mut self, sound: SoundId) {
        self.0.borrow_mut().plays.push(sound);
    }

    fn pause(&mut self, sound: SoundId) {
        self.0.borrow_mut().pauses.push(sound);
    }

    fn stop(&mut self, sound: SoundId) {
        self.0.borrow_mut().stops.push(sound);
    }

    fn unload(&mut self, sound: SoundId) {
        let mut host = self.0.borrow_mut();
        host.unloads.push(sound);
        host.live_sounds.remove(&sound);
    }

    fn position(&self, sound: SoundId) -> Option<f64> {
        self.0.borrow().positions.get(&sound).copied()
    }

    fn duration(&self, sound: SoundId) -> Option<f64> {
        self.0.borrow().durations.get(&sound).copied()
    }

    fn set_volume(&mut self, sound: SoundId, volume: f32) {
        self.0.borrow_mut().volumes.push((sound, volume));
    }
}

/// Mock interval scheduler tracking live timers
pub struct MockScheduler(pub SharedHost);

impl IntervalScheduler for MockScheduler {
    fn schedule(&mut self, _period: Duration) -> TimerId {
        let mut host = self.0.borrow_mut();
        host.next_id += 1;
        let timer = TimerId(host.next_id);
        host.live_timers.insert(timer);
        timer
    }

    fn cancel(&mut self, timer: TimerId) {
        let mut host = self.0.borrow_mut();
        host.live_timers.remove(&timer);
        host.cancelled_timers.push(timer);
    }
}

pub fn ids(raw: &[&str]) -> Vec<TrackId> {
    raw.iter().map(|id| TrackId::new(*id)).collect()
}

/// Catalog with songs `a`..`e`, `bare` (no cover) and `broken` (no audio)
pub fn catalog() -> InMemoryCatalog {
    let mut catalog = InMemoryCatalog::new(PublicStorage::new(STORAGE).unwrap());
    for id in ["a", "b", "c", "d", "e"] {
        catalog.insert(Song::new(
            id,
            format!("Song {}", id.to_uppercase()),
            "Test Artist",
            format!("song-{id}"),
            format!("image-{id}"),
        ));
    }
    catalog.insert(Song::new("bare", "Bare", "Test Artist", "song-bare", ""));
    catalog.insert(Song::new("broken", "Broken", "Test Artist", "", "image-broken"));
    catalog
}

pub fn audio_url(id: &str) -> String {
    format!("{STORAGE}/storage/v1/object/public/songs/song-{id}")
}

/// Catalog a test keeps filling after the player was built
#[derive(Clone)]
pub struct SharedCatalog(pub Rc<RefCell<InMemoryCatalog>>);

impl SharedCatalog {
    pub fn empty() -> Self {
        let storage = PublicStorage::new(STORAGE).unwrap();
        Self(Rc::new(RefCell::new(InMemoryCatalog::new(storage))))
    }

    pub fn insert(&self, song: Song) {
        self.0.borrow_mut().insert(song);
    }
}

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

pub fn create_player(store: QueueStore) -> (Player, SharedHost) {
    create_player_with(store, Box::new(catalog()))
}

pub fn create_player_with(
    store: QueueStore,
    catalog: Box<dyn TrackCatalog>,
) -> (Player, SharedHost) {
    let host = SharedHost::default();
    let player = Player::new(
        PlaybackConfig::default(),
        store,
        catalog,
        Box::new(MockEngine(Rc::clone(&host))),
        Box::new(MockScheduler(Rc::clone(&host))),
    );
    (player, host)
}

pub fn create_controller(store: QueueStore) -> (PlaybackController, SharedHost) {
    let host = SharedHost::default();
    let controller = PlaybackController::new(
        &PlaybackConfig::default(),
        store,
        Box::new(MockEngine(Rc::clone(&host))),
        Box::new(MockScheduler(Rc::clone(&host))),
    );
    (controller, host)
}
