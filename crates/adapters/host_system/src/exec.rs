//! Helpers for running the OS tools this adapter relies on.

use std::process::{Output, Stdio};

use tokio::process::Command;

use crate::error::HostError;

/// Run `program` to completion, capturing its output.
///
/// The child is killed if the returned future is dropped.
pub(crate) async fn output(program: &str, args: &[String]) -> Result<Output, HostError> {
    Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|source| HostError::Spawn {
            program: program.to_string(),
            source,
        })
}

/// Run a helper tool and return its stdout, failing on a non-zero exit.
pub(crate) async fn checked(program: &str, args: &[&str]) -> Result<String, HostError> {
    let args: Vec<String> = args.iter().map(ToString::to_string).collect();
    let output = output(program, &args).await?;
    if !output.status.success() {
        return Err(HostError::ToolFailed {
            program: program.to_string(),
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
