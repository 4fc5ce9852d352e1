//! Integration tests for queue sequencing
//!
//! Exercise the store and the session controller together, without the
//! player glue, the way a host that wires them up by hand would.

mod common;

use common::{create_controller, ids};
use riff_core::TrackId;
use riff_playback::{EngineEvent, QueueChange, QueueStore};
use std::cell::RefCell;
use std::rc::Rc;

fn record_selections(store: &QueueStore) -> Rc<RefCell<Vec<TrackId>>> {
    let selections = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&selections);
    store.subscribe(move |change| {
        if let QueueChange::ActiveChanged {
            active: Some(id), ..
        } = change
        {
            sink.borrow_mut().push(id.clone());
        }
    });
    selections
}

#[test]
fn skip_sequence_from_middle_of_queue() {
    let store = QueueStore::new();
    store.set_ids(ids(&["a", "b", "c"]));
    store.set_id("b");
    let (mut controller, _host) = create_controller(store.clone());

    assert_eq!(controller.play_next(), Some(TrackId::new("c")));
    assert_eq!(controller.play_next(), Some(TrackId::new("a")));
    assert_eq!(controller.play_previous(), Some(TrackId::new("c")));
    assert_eq!(store.active_id(), Some(TrackId::new("c")));
}

#[test]
fn skip_on_empty_queue_is_a_no_op() {
    let store = QueueStore::new();
    store.set_id("a");
    let selections = record_selections(&store);
    let (mut controller, _host) = create_controller(store.clone());

    assert_eq!(controller.play_next(), None);
    assert_eq!(controller.play_previous(), None);
    assert_eq!(store.active_id(), Some(TrackId::new("a")));
    assert!(selections.borrow().is_empty());
}

#[test]
fn natural_end_while_playing_calls_next_once() {
    let store = QueueStore::new();
    store.set_ids(ids(&["a", "b", "c"]));
    store.set_id("a");
    let (mut controller, host) = create_controller(store.clone());
    controller
        .on_active_track_changed(TrackId::new("a"), Some("https://cdn.test/a.mp3"))
        .unwrap();
    let sound = host.borrow().last_sound().unwrap();
    controller.handle_engine_event(EngineEvent::played(sound));
    assert!(controller.is_playing());

    let selections = record_selections(&store);
    controller.handle_engine_event(EngineEvent::ended(sound));
    controller.handle_engine_event(EngineEvent::ended(sound));

    assert!(!controller.is_playing());
    assert_eq!(*selections.borrow(), vec![TrackId::new("b")]);
}

#[test]
fn replay_after_end_can_finish_again() {
    let store = QueueStore::new();
    store.set_ids(ids(&["a", "b", "c"]));
    store.set_id("a");
    let (mut controller, host) = create_controller(store.clone());
    controller
        .on_active_track_changed(TrackId::new("a"), Some("https://cdn.test/a.mp3"))
        .unwrap();
    let sound = host.borrow().last_sound().unwrap();

    let selections = record_selections(&store);
    controller.handle_engine_event(EngineEvent::played(sound));
    controller.handle_engine_event(EngineEvent::ended(sound));
    controller.handle_engine_event(EngineEvent::played(sound));
    controller.handle_engine_event(EngineEvent::ended(sound));

    assert_eq!(
        *selections.borrow(),
        vec![TrackId::new("b"), TrackId::new("c")]
    );
}

#[test]
fn duplicates_in_queue_follow_first_occurrence() {
    let store = QueueStore::new();
    store.set_ids(ids(&["a", "b", "a", "c"]));
    store.set_id("a");
    let (mut controller, _host) = create_controller(store.clone());

    assert_eq!(controller.play_next(), Some(TrackId::new("b")));
    assert_eq!(controller.play_next(), Some(TrackId::new("a")));
    assert_eq!(controller.play_next(), Some(TrackId::new("b")));
}

#[test]
fn many_observers_see_the_same_state() {
    let store = QueueStore::new();
    let first = record_selections(&store);
    let second = record_selections(&store);
    let (mut controller, _host) = create_controller(store.clone());

    store.set_ids(ids(&["x", "y"]));
    store.set_id("x");
    controller.play_next();

    assert_eq!(*first.borrow(), ids(&["x", "y"]));
    assert_eq!(*first.borrow(), *second.borrow());
}
