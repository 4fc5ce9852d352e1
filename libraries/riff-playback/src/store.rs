//! Queue state store
//!
//! Holds the ordered list of queued track ids and the active id. The store
//! knows nothing about audio; sequencing lives in the session controller.
//!
//! A [`QueueStore`] is a cheap handle: clones share the same state, so the UI,
//! the controller and any other observer can all hold one. Everything runs on
//! one thread, so mutations are applied in call order and the last write wins.

use riff_core::TrackId;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;

/// Snapshot of the queue
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueueState {
    /// Queued tracks in playback order (duplicates allowed)
    pub ids: Vec<TrackId>,

    /// Selected track, not necessarily a member of `ids`
    pub active_id: Option<TrackId>,
}

/// Notification delivered to subscribers after a mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueChange {
    /// The active track changed
    ActiveChanged {
        /// Previously active track
        previous: Option<TrackId>,
        /// Newly active track
        active: Option<TrackId>,
    },

    /// The queue was replaced or cleared
    IdsChanged {
        /// New queue length
        length: usize,
    },
}

/// Handle returned by [`QueueStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Rc<dyn Fn(&QueueChange)>;

#[derive(Default)]
struct Inner {
    state: QueueState,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

/// Shared queue state with explicit change subscription
#[derive(Clone, Default)]
pub struct QueueStore {
    inner: Rc<RefCell<Inner>>,
}

impl QueueStore {
    /// Create an empty store (no queue, no active track)
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the active track
    ///
    /// The id is not checked against the queue.
    pub fn set_id(&self, id: impl Into<TrackId>) {
        let id = id.into();
        let previous = {
            let mut inner = self.inner.borrow_mut();
            if inner.state.active_id.as_ref() == Some(&id) {
                return;
            }
            inner.state.active_id.replace(id.clone())
        };

        debug!("Active track changed: {:?} -> {}", previous, id);
        self.notify(&QueueChange::ActiveChanged {
            previous,
            active: Some(id),
        });
    }

    /// Replace the whole queue, keeping order and duplicates
    pub fn set_ids(&self, ids: Vec<TrackId>) {
        let length = ids.len();
        self.inner.borrow_mut().state.ids = ids;

        self.notify(&QueueChange::IdsChanged { length });
    }

    /// Clear the queue and the active track
    pub fn reset(&self) {
        let (had_ids, previous) = {
            let mut inner = self.inner.borrow_mut();
            let had_ids = !inner.state.ids.is_empty();
            inner.state.ids.clear();
            (had_ids, inner.state.active_id.take())
        };

        if had_ids {
            self.notify(&QueueChange::IdsChanged { length: 0 });
        }
        if previous.is_some() {
            self.notify(&QueueChange::ActiveChanged {
                previous,
                active: None,
            });
        }
    }

    /// Currently active track
    pub fn active_id(&self) -> Option<TrackId> {
        self.inner.borrow().state.active_id.clone()
    }

    /// Queued track ids
    pub fn ids(&self) -> Vec<TrackId> {
        self.inner.borrow().state.ids.clone()
    }

    /// Number of queued tracks
    pub fn len(&self) -> usize {
        self.inner.borrow().state.ids.len()
    }

    /// Check if the queue is empty
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().state.ids.is_empty()
    }

    /// Copy of the whole state
    pub fn state(&self) -> QueueState {
        self.inner.borrow().state.clone()
    }

    /// Run `f` against the state without cloning it
    pub fn with_state<R>(&self, f: impl FnOnce(&QueueState) -> R) -> R {
        f(&self.inner.borrow().state)
    }

    /// Register a listener for queue changes
    ///
    /// Listeners run after the mutation is applied and may read or mutate
    /// the store themselves.
    pub fn subscribe(&self, listener: impl Fn(&QueueChange) + 'static) -> SubscriptionId {
        let mut inner = self.inner.borrow_mut();
        let id = SubscriptionId(inner.next_subscription);
        inner.next_subscription += 1;
        inner.listeners.push((id, Rc::new(listener)));
        id
    }

    /// Remove a listener
    ///
    /// Returns false if the subscription was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut inner = self.inner.borrow_mut();
        let before = inner.listeners.len();
        inner.listeners.retain(|(sub, _)| *sub != id);
        inner.listeners.len() != before
    }

    fn notify(&self, change: &QueueChange) {
        // Listeners are cloned out so they can call back into the store.
        let listeners: Vec<Listener> = self
            .inner
            .borrow()
            .listeners
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();

        for listener in listeners {
            listener(change);
        }
    }
}

impl std::fmt::Debug for QueueStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("QueueStore")
            .field("state", &inner.state)
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}
