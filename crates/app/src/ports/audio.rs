//! Audio port: master volume and per-application mute.

use std::future::Future;
use std::sync::Arc;

use playhook_domain::error::PlayhookError;

pub trait AudioControl: Send + Sync {
    /// Current master volume in percent.
    fn master_volume(&self) -> impl Future<Output = Result<u8, PlayhookError>> + Send;

    /// Set the master volume. `percent` is already clamped to `0..=100`.
    fn set_master_volume(
        &self,
        percent: u8,
    ) -> impl Future<Output = Result<(), PlayhookError>> + Send;

    /// Primary strategy: mute or unmute the audio sessions owned by `process`.
    ///
    /// Returns `Ok(false)` when the process has no audio session.
    fn set_session_mute(
        &self,
        process: &str,
        mute: bool,
    ) -> impl Future<Output = Result<bool, PlayhookError>> + Send;

    /// Secondary strategy, tried when the primary one did not find a session.
    ///
    /// Returns `Ok(false)` when nothing matched either.
    fn set_mute_fallback(
        &self,
        process: &str,
        mute: bool,
    ) -> impl Future<Output = Result<bool, PlayhookError>> + Send;
}

impl<T: AudioControl> AudioControl for Arc<T> {
    fn master_volume(&self) -> impl Future<Output = Result<u8, PlayhookError>> + Send {
        (**self).master_volume()
    }

    fn set_master_volume(
        &self,
        percent: u8,
    ) -> impl Future<Output = Result<(), PlayhookError>> + Send {
        (**self).set_master_volume(percent)
    }

    fn set_session_mute(
        &self,
        process: &str,
        mute: bool,
    ) -> impl Future<Output = Result<bool, PlayhookError>> + Send {
        (**self).set_session_mute(process, mute)
    }

    fn set_mute_fallback(
        &self,
        process: &str,
        mute: bool,
    ) -> impl Future<Output = Result<bool, PlayhookError>> + Send {
        (**self).set_mute_fallback(process, mute)
    }
}
