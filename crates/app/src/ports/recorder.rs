//! Recorder port: append entries to the action log.

use std::future::Future;
use std::sync::Arc;

use playhook_domain::error::PlayhookError;
use playhook_domain::log::LogEntry;

pub trait ActionRecorder: Send + Sync {
    /// Append one entry. Retention is the recorder's concern.
    fn record(&self, entry: LogEntry) -> impl Future<Output = Result<(), PlayhookError>> + Send;
}

impl<T: ActionRecorder> ActionRecorder for Arc<T> {
    fn record(&self, entry: LogEntry) -> impl Future<Output = Result<(), PlayhookError>> + Send {
        (**self).record(entry)
    }
}
