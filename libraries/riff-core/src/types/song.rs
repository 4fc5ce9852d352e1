//! Song metadata as supplied by the catalog

use super::TrackId;
use serde::{Deserialize, Serialize};

/// A playable song
///
/// `song_path` and `image_path` are storage references, not URLs. They are
/// turned into URLs by a [`TrackCatalog`](crate::TrackCatalog).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    /// Unique track identifier
    pub id: TrackId,

    /// Song title
    pub title: String,

    /// Performing artist
    pub author: String,

    /// Storage reference of the audio file
    pub song_path: String,

    /// Storage reference of the cover image
    pub image_path: String,
}

impl Song {
    /// Create a new song
    pub fn new(
        id: impl Into<TrackId>,
        title: impl Into<String>,
        author: impl Into<String>,
        song_path: impl Into<String>,
        image_path: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            song_path: song_path.into(),
            image_path: image_path.into(),
        }
    }
}
