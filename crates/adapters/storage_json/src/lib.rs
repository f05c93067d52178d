//! # playhook-adapter-storage-json
//!
//! JSON file persistence adapter.
//!
//! ## Responsibilities
//! - Implement the `DocumentStore` port defined in `playhook-app::ports`
//! - Write the document atomically (temporary file in the same directory,
//!   then rename) so a crash never leaves a half-written file behind
//! - Tell a missing file (first run) apart from a corrupt one
//! - Write timestamped backups and prune the oldest beyond a retention count
//!
//! ## Dependency rule
//! Depends on `playhook-app` (for port traits) and `playhook-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

pub mod backup;
pub mod error;
mod fs;
pub mod store;

pub use backup::Backups;
pub use error::StorageError;
pub use store::JsonDocumentStore;
