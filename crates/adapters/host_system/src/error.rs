//! Host-specific error type.

use playhook_domain::error::PlayhookError;

/// Errors raised while driving the host system.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// A program could not be started.
    #[error("could not start {program}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// A helper tool ran but reported failure.
    #[error("{program} failed ({status}): {stderr}")]
    ToolFailed {
        program: String,
        status: String,
        stderr: String,
    },

    /// Reading host state failed.
    #[error("io error")]
    Io(#[from] std::io::Error),

    /// A helper tool produced output that could not be understood.
    #[error("unexpected output from {0}")]
    UnexpectedOutput(&'static str),

    /// The operation is not available on this platform.
    #[error("{0} is not supported on this platform")]
    Unsupported(&'static str),
}

impl From<HostError> for PlayhookError {
    fn from(err: HostError) -> Self {
        Self::Host(Box::new(err))
    }
}
