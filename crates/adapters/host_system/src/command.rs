//! Program execution with captured output.

use playhook_app::ports::{CommandOutput, CommandRunner, Invocation};
use playhook_domain::error::PlayhookError;

use crate::exec;

/// [`CommandRunner`] spawning real child processes.
///
/// The child is killed when the future returned by `run` is dropped.
#[derive(Debug, Clone, Default)]
pub struct ShellCommandRunner;

impl ShellCommandRunner {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for ShellCommandRunner {
    async fn run(&self, invocation: &Invocation) -> Result<CommandOutput, PlayhookError> {
        let output = exec::output(&invocation.program, &invocation.args).await?;
        Ok(CommandOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
