//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`PlayhookError`] via `From` at the port boundaries.

/// Root error type shared by the domain, the application layer and adapters.
#[derive(Debug, thiserror::Error)]
pub enum PlayhookError {
    /// A domain invariant was violated.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// A referenced record does not exist.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// The document store failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A host-system operation (process, shell, display, audio) failed.
    #[error("host error")]
    Host(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Domain invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A name field was empty.
    #[error("name must not be empty")]
    EmptyName,

    /// A display-mode descriptor could not be parsed.
    #[error("invalid resolution descriptor: {0:?}")]
    InvalidResolution(String),

    /// A volume level could not be parsed.
    #[error("invalid volume level: {0:?}")]
    InvalidVolume(String),

    /// A time-of-day string could not be parsed.
    #[error("invalid time of day: {0:?}")]
    InvalidTimeOfDay(String),

    /// An identifier could not be parsed.
    #[error("invalid identifier: {0:?}")]
    InvalidId(String),
}

/// A lookup by identifier found nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    /// Kind of record, e.g. `"Profile"`.
    pub entity: &'static str,
    /// Identifier that was looked up.
    pub id: String,
}
