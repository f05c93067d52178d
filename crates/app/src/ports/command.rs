//! Command port: run a program to completion and capture its output.

use std::future::Future;
use std::sync::Arc;

use playhook_domain::error::PlayhookError;

/// A program and its argument vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl std::fmt::Display for Invocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Result of a finished program.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// `None` when the process was killed by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// Runs programs synchronously from the caller's point of view.
///
/// Implementations must stop the child process when the returned future is
/// dropped, so that callers can enforce timeouts and cancellation by simply
/// abandoning the future.
pub trait CommandRunner: Send + Sync {
    fn run(
        &self,
        invocation: &Invocation,
    ) -> impl Future<Output = Result<CommandOutput, PlayhookError>> + Send;
}

impl<T: CommandRunner> CommandRunner for Arc<T> {
    fn run(
        &self,
        invocation: &Invocation,
    ) -> impl Future<Output = Result<CommandOutput, PlayhookError>> + Send {
        (**self).run(invocation)
    }
}
