//! Next/previous sequencing over a queue of track ids
//!
//! The position of the active track is looked up by value. When the active
//! track is not in the queue its position is treated as one before the first
//! entry, so "next" lands on the first track and "previous" wraps to the last.

use riff_core::TrackId;

/// Direction of a skip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Forward, wrapping from the last track to the first
    Next,

    /// Backward, wrapping from the first track to the last
    Previous,
}

/// Track that follows `active` in `ids`
///
/// Returns `None` only for an empty queue.
pub fn next_id<'a>(ids: &'a [TrackId], active: Option<&TrackId>) -> Option<&'a TrackId> {
    let after = match position(ids, active) {
        Some(index) => index + 1,
        None => 0,
    };

    ids.get(after).or_else(|| ids.first())
}

/// Track that precedes `active` in `ids`
///
/// Returns `None` only for an empty queue.
pub fn previous_id<'a>(ids: &'a [TrackId], active: Option<&TrackId>) -> Option<&'a TrackId> {
    position(ids, active)
        .and_then(|index| index.checked_sub(1))
        .and_then(|before| ids.get(before))
        .or_else(|| ids.last())
}

/// Track reached by skipping once in `direction`
pub fn step<'a>(
    ids: &'a [TrackId],
    active: Option<&TrackId>,
    direction: Direction,
) -> Option<&'a TrackId> {
    match direction {
        Direction::Next => next_id(ids, active),
        Direction::Previous => previous_id(ids, active),
    }
}

/// First position of `active` in `ids`
fn position(ids: &[TrackId], active: Option<&TrackId>) -> Option<usize> {
    let active = active?;
    ids.iter().position(|id| id == active)
}
