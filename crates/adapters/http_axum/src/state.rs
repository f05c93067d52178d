//! Shared application state for axum handlers.

use std::sync::Arc;

use playhook_app::executors::Dispatch;
use playhook_app::notification_bus::InProcessNotificationBus;
use playhook_app::ports::{Notifier, ProcessControl};
use playhook_app::services::{DocumentHandle, LifecycleService};

/// Application state shared across all axum handlers.
///
/// Generic over the process table, the action dispatcher and the notifier
/// used by the lifecycle service, to avoid dynamic dispatch.
/// `Clone` is implemented manually so the underlying types themselves do not
/// need to be `Clone`: only the `Arc` wrappers are cloned.
pub struct AppState<P, E, N> {
    /// Runs the lifecycle phases.
    pub lifecycle: Arc<LifecycleService<P, E, N>>,
    /// Owner of profiles, mappings, settings and the action log.
    pub documents: DocumentHandle,
    /// Source of the notification stream.
    pub notifications: Arc<InProcessNotificationBus>,
}

impl<P, E, N> Clone for AppState<P, E, N> {
    fn clone(&self) -> Self {
        Self {
            lifecycle: Arc::clone(&self.lifecycle),
            documents: self.documents.clone(),
            notifications: Arc::clone(&self.notifications),
        }
    }
}

impl<P, E, N> AppState<P, E, N>
where
    P: ProcessControl + Clone + 'static,
    E: Dispatch + 'static,
    N: Notifier + 'static,
{
    /// Create the state from services already shared with background tasks.
    pub fn new(
        lifecycle: Arc<LifecycleService<P, E, N>>,
        documents: DocumentHandle,
        notifications: Arc<InProcessNotificationBus>,
    ) -> Self {
        Self {
            lifecycle,
            documents,
            notifications,
        }
    }
}
