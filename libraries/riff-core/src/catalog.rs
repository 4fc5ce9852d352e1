//! Song catalog and storage URL resolution
//!
//! The player never talks to a database or object store directly. It asks a
//! [`TrackCatalog`] for song metadata and for the URLs of a song's audio and
//! cover image. A catalog that cannot produce an audio URL for a song makes
//! that song unplayable.

use crate::error::{CoreError, Result};
use crate::types::{Song, TrackId};
use std::collections::HashMap;
use tracing::debug;
use url::Url;

/// Catalog lookup used by the player
pub trait TrackCatalog {
    /// Look up song metadata by id
    fn song(&self, id: &TrackId) -> Option<Song>;

    /// Resolve the playable audio URL of a song
    ///
    /// `None` means the song cannot be played.
    fn audio_url(&self, song: &Song) -> Option<String>;

    /// Resolve the cover image URL of a song
    fn image_url(&self, song: &Song) -> Option<String>;
}

/// Public object storage layout
///
/// Objects are served from `<base>/storage/v1/object/public/<bucket>/<path>`.
#[derive(Debug, Clone)]
pub struct PublicStorage {
    base: Url,
    audio_bucket: String,
    image_bucket: String,
}

impl PublicStorage {
    /// Default bucket holding audio files
    pub const AUDIO_BUCKET: &'static str = "songs";

    /// Default bucket holding cover images
    pub const IMAGE_BUCKET: &'static str = "images";

    /// Create a storage resolver rooted at `base_url`
    pub fn new(base_url: &str) -> Result<Self> {
        let base = Url::parse(base_url)?;
        if base.cannot_be_a_base() {
            return Err(CoreError::InvalidUrl(
                url::ParseError::RelativeUrlWithCannotBeABaseBase,
            ));
        }

        Ok(Self {
            base,
            audio_bucket: Self::AUDIO_BUCKET.to_string(),
            image_bucket: Self::IMAGE_BUCKET.to_string(),
        })
    }

    /// Override bucket names
    #[must_use]
    pub fn with_buckets(mut self, audio: impl Into<String>, image: impl Into<String>) -> Self {
        self.audio_bucket = audio.into();
        self.image_bucket = image.into();
        self
    }

    /// Public URL of an object, or `None` for an empty reference
    pub fn public_url(&self, bucket: &str, path: &str) -> Option<String> {
        let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        if parts.is_empty() {
            return None;
        }

        let mut url = self.base.clone();
        url.path_segments_mut()
            .ok()?
            .pop_if_empty()
            .extend(["storage", "v1", "object", "public", bucket])
            .extend(parts);

        Some(url.into())
    }

    /// Public URL of an audio file
    pub fn audio_url(&self, path: &str) -> Option<String> {
        self.public_url(&self.audio_bucket, path)
    }

    /// Public URL of a cover image
    pub fn image_url(&self, path: &str) -> Option<String> {
        self.public_url(&self.image_bucket, path)
    }
}

/// Catalog held entirely in memory
///
/// Fed by the host page with the songs it has already fetched.
#[derive(Debug, Clone)]
pub struct InMemoryCatalog {
    songs: HashMap<TrackId, Song>,
    storage: PublicStorage,
}

impl InMemoryCatalog {
    /// Create an empty catalog
    pub fn new(storage: PublicStorage) -> Self {
        Self {
            songs: HashMap::new(),
            storage,
        }
    }

    /// Add or replace a song
    pub fn insert(&mut self, song: Song) {
        self.songs.insert(song.id.clone(), song);
    }

    /// Add or replace many songs
    pub fn extend(&mut self, songs: impl IntoIterator<Item = Song>) {
        for song in songs {
            self.insert(song);
        }
    }

    /// Add songs from a JSON array of catalog rows
    ///
    /// Returns the number of rows loaded.
    pub fn load_json(&mut self, json: &str) -> Result<usize> {
        let songs: Vec<Song> = serde_json::from_str(json)?;
        let count = songs.len();
        self.extend(songs);
        debug!("Loaded {} songs into catalog", count);
        Ok(count)
    }

    /// Number of songs in the catalog
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }
}

impl TrackCatalog for InMemoryCatalog {
    fn song(&self, id: &TrackId) -> Option<Song> {
        self.songs.get(id).cloned()
    }

    fn audio_url(&self, song: &Song) -> Option<String> {
        self.storage.audio_url(&song.song_path)
    }

    fn image_url(&self, song: &Song) -> Option<String> {
        self.storage.image_url(&song.image_path)
    }
}
