//! Fan-out of message events to in-process listeners.
//!
//! Services publish a [`MessageEvent`] after every successful mutation. The
//! notifier is the only long-lived listener; `/health` reports whether it is
//! still attached.

use tokio::sync::broadcast;

use super::MessageEvent;

/// Broadcast bus for [`MessageEvent`]s.
///
/// A slow listener loses the oldest events once `capacity` are queued. A
/// publish with nobody listening is dropped and never fails the mutation.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<MessageEvent>,
}

impl EventBus {
    /// Creates a bus holding up to `capacity` undelivered events (minimum 1).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publishes an event and returns how many listeners it reached.
    pub fn publish(&self, event: MessageEvent) -> usize {
        let kind = event.event_type_str();
        match self.sender.send(event) {
            Ok(reached) => reached,
            Err(_) => {
                tracing::debug!(event = kind, "no listener attached, event dropped");
                0
            }
        }
    }

    /// Attaches a listener that sees every event published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<MessageEvent> {
        self.sender.subscribe()
    }

    /// Number of attached listeners.
    #[must_use]
    pub fn listeners(&self) -> usize {
        self.sender.receiver_count()
    }
}
