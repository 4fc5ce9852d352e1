//! Riff Player Core
//!
//! Platform-agnostic domain types and catalog traits for Riff Player.
//!
//! The core crate defines:
//! - **Domain Types**: `TrackId`, `Song`
//! - **Catalog**: the `TrackCatalog` trait used by the player to look up song
//!   metadata and resolve storage references into playable URLs
//! - **Error Handling**: `CoreError` and `Result`
//!
//! # Example
//!
//! ```rust
//! use riff_core::{InMemoryCatalog, PublicStorage, Song, TrackCatalog, TrackId};
//!
//! let storage = PublicStorage::new("https://cdn.example.com").unwrap();
//! let mut catalog = InMemoryCatalog::new(storage);
//! catalog.insert(Song::new("a", "Intro", "Band", "intro.mp3", "intro.png"));
//!
//! let song = catalog.song(&TrackId::new("a")).unwrap();
//! assert_eq!(
//!     catalog.audio_url(&song).as_deref(),
//!     Some("https://cdn.example.com/storage/v1/object/public/songs/intro.mp3")
//! );
//! ```

#![forbid(unsafe_code)]

pub mod catalog;
pub mod error;
pub mod types;

pub use catalog::{InMemoryCatalog, PublicStorage, TrackCatalog};
pub use error::{CoreError, Result};
pub use types::{Song, TrackId};
