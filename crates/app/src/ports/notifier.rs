//! Notifier port: fire-and-forget user notifications.

use std::sync::Arc;

use playhook_domain::notification::Notification;

/// Delivers notifications to whoever presents them.
///
/// Delivery must not block and must swallow its own failures.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

impl<T: Notifier> Notifier for Arc<T> {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification);
    }
}
