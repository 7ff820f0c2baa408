//! Change notification
//!
//! A small single-threaded observer list. Domain objects own one notifier and
//! commands call [`ChangeNotifier::notify`] once per actual state transition.

use std::fmt;
use uuid::Uuid;

/// Identifies a registered change handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sub({})", &self.0.to_string()[..8])
    }
}

type Handler<E> = Box<dyn FnMut(&E)>;

/// Ordered list of change handlers
pub struct ChangeNotifier<E> {
    handlers: Vec<(SubscriptionId, Handler<E>)>,
}

impl<E> ChangeNotifier<E> {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Registers a handler; handlers are called in subscription order.
    pub fn subscribe<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&E) + 'static,
    {
        let id = SubscriptionId::new();
        self.handlers.push((id, Box::new(handler)));
        tracing::trace!("Subscription {} added", id);
        id
    }

    /// Removes a handler, returning whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(sid, _)| *sid != id);
        let removed = self.handlers.len() != before;
        if removed {
            tracing::trace!("Subscription {} removed", id);
        }
        removed
    }

    pub fn notify(&mut self, event: &E) {
        for (_, handler) in self.handlers.iter_mut() {
            handler(event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.handlers.len()
    }
}

impl<E> Default for ChangeNotifier<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for ChangeNotifier<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("subscribers", &self.handlers.len())
            .finish()
    }
}
