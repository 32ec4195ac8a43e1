//! Event subscription between a camera control and its listeners.
//!
//! The view controller reacts to control gestures only through
//! [`ControlEvents`], so any control that can publish a gesture start can
//! drive it.

use std::cell::Cell;
use std::rc::Rc;

use rustc_hash::FxHashMap;

/// Gesture lifecycle events published by a camera control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlEvent {
    /// The user began a drag, scroll or pan gesture.
    Start,
    /// The control moved the camera.
    Change,
    /// The gesture ended.
    End,
}

/// Handle returned by [`ControlEvents::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionToken(u64);

/// Event handler invoked synchronously on the main thread.
pub type Handler = Box<dyn FnMut(ControlEvent)>;

/// Narrow subscription capability exposed by camera controls.
pub trait ControlEvents {
    /// Register `handler` for `event`.
    fn subscribe(&mut self, event: ControlEvent, handler: Handler) -> SubscriptionToken;

    /// Remove a handler. Returns `false` if the token was unknown.
    fn unsubscribe(&mut self, token: SubscriptionToken) -> bool;
}

/// Handler registry that controls embed to implement [`ControlEvents`].
#[derive(Default)]
pub struct Subscribers {
    next: u64,
    handlers: FxHashMap<SubscriptionToken, (ControlEvent, Handler)>,
}

impl Subscribers {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether no handler is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Invoke every handler registered for `event`.
    pub fn emit(&mut self, event: ControlEvent) {
        for (registered, handler) in self.handlers.values_mut() {
            if *registered == event {
                handler(event);
            }
        }
    }
}

impl ControlEvents for Subscribers {
    fn subscribe(&mut self, event: ControlEvent, handler: Handler) -> SubscriptionToken {
        let token = SubscriptionToken(self.next);
        self.next += 1;
        let _ = self.handlers.insert(token, (event, handler));
        token
    }

    fn unsubscribe(&mut self, token: SubscriptionToken) -> bool {
        self.handlers.remove(&token).is_some()
    }
}

impl std::fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscribers")
            .field("count", &self.handlers.len())
            .finish_non_exhaustive()
    }
}

/// Shared flag a handler raises and its owner later takes.
#[derive(Debug, Clone, Default)]
pub struct EventLatch(Rc<Cell<bool>>);

impl EventLatch {
    /// Handler that raises this latch.
    #[must_use]
    pub fn handler(&self) -> Handler {
        let flag = Rc::clone(&self.0);
        Box::new(move |_| flag.set(true))
    }

    /// Read and clear the flag.
    pub fn take(&self) -> bool {
        self.0.replace(false)
    }
}
