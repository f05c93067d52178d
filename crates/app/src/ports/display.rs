//! Display port: read and change the primary display mode.

use std::future::Future;
use std::sync::Arc;

use playhook_domain::display::DisplayMode;
use playhook_domain::error::PlayhookError;

pub trait DisplayControl: Send + Sync {
    /// The mode the primary display is currently using.
    fn current_mode(&self) -> impl Future<Output = Result<DisplayMode, PlayhookError>> + Send;

    /// Switch the primary display to `mode`. Fails if the display rejects it.
    fn apply_mode(
        &self,
        mode: DisplayMode,
    ) -> impl Future<Output = Result<(), PlayhookError>> + Send;
}

impl<T: DisplayControl> DisplayControl for Arc<T> {
    fn current_mode(&self) -> impl Future<Output = Result<DisplayMode, PlayhookError>> + Send {
        (**self).current_mode()
    }

    fn apply_mode(
        &self,
        mode: DisplayMode,
    ) -> impl Future<Output = Result<(), PlayhookError>> + Send {
        (**self).apply_mode(mode)
    }
}
