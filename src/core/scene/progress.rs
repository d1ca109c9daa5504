//=========================================================================
// Progress Channel
//=========================================================================
//
// Broadcasts scene loading progress to any number of subscribers.
//
// Architecture:
//   publish(LoadProgress) ──try_send──> Sender ─┬─> Receiver (loading screen)
//                                               └─> Receiver (audio fade, ...)
//
// Each subscriber owns a bounded crossbeam channel. Publishing never
// blocks the tick: a full subscriber misses the sample, a dropped
// receiver is pruned.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, Receiver, Sender, TryIter, TrySendError};
use log::debug;

//=== LoadProgress ========================================================

/// One progress sample for the scene being loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadProgress {
    pub scene: String,

    /// In `[0, 1]`, non-decreasing within one transition.
    pub progress: f32,
}

//=== Subscriptions =======================================================

/// Handle identifying a subscriber for explicit unsubscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

/// Receiving end of a progress subscription.
///
/// Dropping it unsubscribes at the next publish.
pub struct ProgressSubscription {
    id: SubscriberId,
    receiver: Receiver<LoadProgress>,
}

impl ProgressSubscription {
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    pub fn receiver(&self) -> &Receiver<LoadProgress> {
        &self.receiver
    }

    /// Iterates samples received so far without blocking.
    pub fn try_iter(&self) -> TryIter<'_, LoadProgress> {
        self.receiver.try_iter()
    }

    /// Most recent sample received so far, draining older ones.
    pub fn latest(&self) -> Option<LoadProgress> {
        self.receiver.try_iter().last()
    }
}

//=== ProgressChannel =====================================================

/// Fan-out of progress samples to subscribers.
pub struct ProgressChannel {
    subscribers: Vec<(SubscriberId, Sender<LoadProgress>)>,
    next_id: u64,
    capacity: usize,
}

impl ProgressChannel {
    /// Creates a channel whose subscribers buffer up to `capacity` samples.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Progress capacity must be positive");
        Self {
            subscribers: Vec::new(),
            next_id: 0,
            capacity,
        }
    }

    /// Adds a subscriber.
    pub fn subscribe(&mut self) -> ProgressSubscription {
        let id = SubscriberId(self.next_id);
        self.next_id += 1;

        let (sender, receiver) = bounded(self.capacity);
        self.subscribers.push((id, sender));

        debug!("Progress subscriber {:?} added", id);
        ProgressSubscription { id, receiver }
    }

    /// Removes a subscriber. Returns false if it was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        before != self.subscribers.len()
    }

    /// Sends `sample` to every live subscriber.
    pub fn publish(&mut self, sample: LoadProgress) {
        self.subscribers.retain(|(id, sender)| match sender.try_send(sample.clone()) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                debug!("Progress subscriber {:?} is full, sample dropped", id);
                true
            }
            Err(TrySendError::Disconnected(_)) => {
                debug!("Progress subscriber {:?} disconnected", id);
                false
            }
        });
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
