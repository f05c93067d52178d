//! Document store port: load and save the persisted document.

use std::future::Future;

use playhook_domain::document::Document;
use playhook_domain::error::PlayhookError;

/// Whole-document persistence.
pub trait DocumentStore: Send + Sync {
    /// Load the stored document.
    ///
    /// Returns `Ok(None)` when nothing has been stored yet and an error when
    /// the stored data cannot be read or parsed.
    fn load(&self) -> impl Future<Output = Result<Option<Document>, PlayhookError>> + Send;

    /// Replace the stored document.
    fn save(&self, document: &Document) -> impl Future<Output = Result<(), PlayhookError>> + Send;
}
