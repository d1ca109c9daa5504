//=========================================================================
// Listeners
//=========================================================================
//
// Subscribable notifications for state changes outside the tick loop:
// panel visibility, action map switches.
//
// Same fan-out as the progress channel: one bounded crossbeam channel
// per subscriber, `try_send` on notify, disconnected receivers pruned.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use log::trace;

//=== Constants ===========================================================

/// Events buffered per subscriber before new ones are dropped.
pub const LISTENER_CAPACITY: usize = 32;

//=== Listeners ===========================================================

/// Fan-out of events of type `T` to any number of receivers.
pub struct Listeners<T> {
    senders: Vec<Sender<T>>,
}

impl<T: Clone> Listeners<T> {
    pub fn new() -> Self {
        Self { senders: Vec::new() }
    }

    /// Adds a subscriber. Dropping the receiver unsubscribes it.
    pub fn subscribe(&mut self) -> Receiver<T> {
        let (sender, receiver) = bounded(LISTENER_CAPACITY);
        self.senders.push(sender);
        receiver
    }

    /// Sends `event` to every live subscriber without blocking.
    pub fn notify(&mut self, event: &T) {
        self.senders.retain(|sender| match sender.try_send(event.clone()) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                trace!("Listener full, event dropped");
                true
            }
            Err(TrySendError::Disconnected(_)) => false,
        });
    }

    pub fn len(&self) -> usize {
        self.senders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.senders.is_empty()
    }
}

impl<T: Clone> Default for Listeners<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Listeners<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("subscribers", &self.senders.len())
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
