//! Run scripts and shell commands to completion.
//!
//! The caller blocks until the child exits. The optional timeout from the
//! settings and the run's cancellation token both abandon the child, which
//! the [`CommandRunner`] kills.

use std::path::Path;

use super::{ExecutionContext, ExecutionOutcome, NO_EXIT_CODE, describe};
use crate::expand::{expand_env, split_arguments};
use crate::ports::{CommandOutput, CommandRunner, Invocation};

/// Captured output longer than this is cut before it reaches the action log.
pub const MAX_OUTPUT_BYTES: usize = 1024;

const TRUNCATED_MARKER: &str = " [output truncated]";

/// How scripts and system commands are turned into invocations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    /// Shell used for system commands.
    pub shell: String,
    /// Arguments placed before the command line, e.g. `-c`.
    pub shell_args: Vec<String>,
    /// Interpreter for script actions.
    pub script_interpreter: String,
    /// Arguments placed before a script file path.
    pub script_file_args: Vec<String>,
    /// Arguments placed before an inline script.
    pub script_inline_args: Vec<String>,
    /// Extension (without dot) that marks a script path even if the file is missing.
    pub script_extension: String,
}

impl Default for ShellConfig {
    #[cfg(windows)]
    fn default() -> Self {
        Self {
            shell: "cmd".to_string(),
            shell_args: vec!["/C".to_string()],
            script_interpreter: "powershell".to_string(),
            script_file_args: ["-NoProfile", "-ExecutionPolicy", "Bypass", "-File"]
                .map(String::from)
                .to_vec(),
            script_inline_args: ["-NoProfile", "-Command"].map(String::from).to_vec(),
            script_extension: "ps1".to_string(),
        }
    }

    #[cfg(not(windows))]
    fn default() -> Self {
        Self {
            shell: "sh".to_string(),
            shell_args: vec!["-c".to_string()],
            script_interpreter: "sh".to_string(),
            script_file_args: Vec::new(),
            script_inline_args: vec!["-c".to_string()],
            script_extension: "sh".to_string(),
        }
    }
}

impl ShellConfig {
    /// Invocation for a system command line.
    #[must_use]
    pub fn command_invocation(&self, command: &str, arguments: &str) -> Invocation {
        let line = join_line(command, arguments);
        let mut args = self.shell_args.clone();
        args.push(line);
        Invocation {
            program: self.shell.clone(),
            args,
        }
    }

    /// Invocation for a script action.
    ///
    /// `path` is a script file when it exists on disk or carries the script
    /// extension; anything else is run as inline script text.
    pub async fn script_invocation(&self, path: &str, arguments: &str) -> Invocation {
        let expanded = expand_env(path.trim().trim_matches('"'));
        let mut args;
        if self.is_script_file(&expanded).await {
            args = self.script_file_args.clone();
            args.push(expanded);
            args.extend(split_arguments(arguments));
        } else {
            args = self.script_inline_args.clone();
            args.push(join_line(path, arguments));
        }
        Invocation {
            program: self.script_interpreter.clone(),
            args,
        }
    }

    async fn is_script_file(&self, path: &str) -> bool {
        let has_extension = !self.script_extension.is_empty()
            && Path::new(path)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(&self.script_extension));
        has_extension
            || tokio::fs::metadata(path)
                .await
                .is_ok_and(|metadata| metadata.is_file())
    }
}

fn join_line(command: &str, arguments: &str) -> String {
    let command = command.trim();
    let arguments = arguments.trim();
    if arguments.is_empty() {
        command.to_string()
    } else {
        format!("{command} {arguments}")
    }
}

pub async fn run_script<C: CommandRunner>(
    commands: &C,
    shell: &ShellConfig,
    path: &str,
    arguments: &str,
    ctx: &ExecutionContext,
) -> ExecutionOutcome {
    if path.trim().is_empty() {
        return ExecutionOutcome::failed(NO_EXIT_CODE, "no script to run");
    }
    let invocation = shell.script_invocation(path, arguments).await;
    run(commands, &invocation, ctx).await
}

pub async fn run_system_command<C: CommandRunner>(
    commands: &C,
    shell: &ShellConfig,
    command: &str,
    arguments: &str,
    ctx: &ExecutionContext,
) -> ExecutionOutcome {
    if command.trim().is_empty() {
        return ExecutionOutcome::failed(NO_EXIT_CODE, "no command to run");
    }
    run(commands, &shell.command_invocation(command, arguments), ctx).await
}

/// Run `invocation`, honouring the context's timeout and cancellation.
pub async fn run<C: CommandRunner>(
    commands: &C,
    invocation: &Invocation,
    ctx: &ExecutionContext,
) -> ExecutionOutcome {
    tracing::debug!(%invocation, "running");
    let execution = async {
        match ctx.command_timeout() {
            Some(limit) => tokio::time::timeout(limit, commands.run(invocation))
                .await
                .map_err(|_| limit),
            None => Ok(commands.run(invocation).await),
        }
    };
    let result = tokio::select! {
        () = ctx.cancel.cancelled() => {
            return ExecutionOutcome::failed(NO_EXIT_CODE, "cancelled before the command finished");
        }
        result = execution => result,
    };
    match result {
        Ok(Ok(output)) => outcome_from_output(output),
        Ok(Err(err)) => ExecutionOutcome::failed(
            NO_EXIT_CODE,
            format!("could not run {}: {}", invocation.program, describe(&err)),
        ),
        Err(limit) => {
            tracing::warn!(%invocation, timeout_secs = limit.as_secs(), "command timed out");
            ExecutionOutcome::failed(
                NO_EXIT_CODE,
                format!("timed out after {}s", limit.as_secs()),
            )
        }
    }
}

fn outcome_from_output(output: CommandOutput) -> ExecutionOutcome {
    let stdout = output.stdout.trim();
    let stderr = output.stderr.trim();
    match output.exit_code {
        Some(0) => ExecutionOutcome::ok(if stdout.is_empty() {
            "exit code 0".to_string()
        } else {
            truncate_output(stdout)
        }),
        Some(code) => {
            let message = if stderr.is_empty() {
                format!("exited with code {code}")
            } else {
                truncate_output(stderr)
            };
            ExecutionOutcome::failed(code, message)
        }
        None => ExecutionOutcome::failed(NO_EXIT_CODE, "terminated by a signal"),
    }
}

/// Keep at most [`MAX_OUTPUT_BYTES`] of captured output, cut on a char boundary.
fn truncate_output(output: &str) -> String {
    if output.len() <= MAX_OUTPUT_BYTES {
        return output.to_string();
    }
    let mut end = MAX_OUTPUT_BYTES;
    while !output.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}{TRUNCATED_MARKER}", &output[..end])
}
