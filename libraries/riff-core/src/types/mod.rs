//! Domain types

mod ids;
mod song;

pub use ids::TrackId;
pub use song::Song;
