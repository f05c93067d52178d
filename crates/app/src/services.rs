//! Application services: use-case implementations.
//!
//! Each service struct accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.

pub mod document_service;
pub mod lifecycle_service;

pub use document_service::{DocumentHandle, load_or_default};
pub use lifecycle_service::LifecycleService;
