//! Synchronous publish/subscribe plumbing shared by the engine and the ledger.
//!
//! Subscribers are invoked in registration order, on the caller's thread, before the
//! mutating operation that produced the event returns. Handlers must not call back
//! into the table's mutating operations.

use craps_types::Event;
use std::sync::mpsc::Sender;

/// Receiver of state-change notifications.
pub trait Observer {
    fn notify(&mut self, event: &Event);
}

impl<F> Observer for F
where
    F: FnMut(&Event),
{
    fn notify(&mut self, event: &Event) {
        self(event)
    }
}

/// Forwards every notification into a channel.
pub struct Channel(pub Sender<Event>);

impl Observer for Channel {
    fn notify(&mut self, event: &Event) {
        // A dropped receiver just stops listening.
        let _ = self.0.send(*event);
    }
}

/// Ordered list of subscribers owned by a publishing component.
#[derive(Default)]
pub struct Notifier {
    observers: Vec<Box<dyn Observer>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an observer for the rest of the session.
    pub fn subscribe<O: Observer + 'static>(&mut self, observer: O) {
        self.observers.push(Box::new(observer));
    }

    /// Deliver `event` to every subscriber.
    pub fn emit(&mut self, event: Event) {
        tracing::trace!(event = event.name(), subscribers = self.observers.len(), "emit");
        for observer in self.observers.iter_mut() {
            observer.notify(&event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.observers.len()
    }
}
