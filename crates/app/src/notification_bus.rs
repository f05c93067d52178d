//! In-process notification bus backed by a tokio broadcast channel.

use tokio::sync::broadcast;

use playhook_domain::notification::Notification;

use crate::ports::Notifier;

/// In-process notification bus using a tokio [`broadcast`] channel.
///
/// Notifying succeeds even when there are no active subscribers
/// (the notification is simply dropped). Slow subscribers lose the oldest
/// notifications instead of blocking the engine.
pub struct InProcessNotificationBus {
    sender: broadcast::Sender<Notification>,
}

impl InProcessNotificationBus {
    /// Create a new bus with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to notifications on this bus.
    ///
    /// Returns a receiver that will get all notifications sent *after*
    /// the subscription is created.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Notifier for InProcessNotificationBus {
    fn notify(&self, notification: Notification) {
        // Fails only when nobody is subscribed.
        let _ = self.sender.send(notification);
    }
}
