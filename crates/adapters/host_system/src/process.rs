//! Host process table access.

use std::process::Stdio;

use playhook_app::ports::{ProcessControl, ProcessInfo};
use playhook_domain::error::PlayhookError;
use tokio::process::Command;

use crate::error::HostError;
use crate::exec;
use crate::parse;

/// [`ProcessControl`] backed by the host operating system.
#[derive(Debug, Clone, Default)]
pub struct HostProcesses;

impl HostProcesses {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ProcessControl for HostProcesses {
    async fn list(&self) -> Result<Vec<ProcessInfo>, PlayhookError> {
        Ok(list_processes().await?)
    }

    async fn launch(&self, path: &str, args: &[String]) -> Result<u32, PlayhookError> {
        let child = Command::new(path)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| HostError::Spawn {
                program: path.to_string(),
                source,
            })?;
        let pid = child
            .id()
            .ok_or(HostError::UnexpectedOutput("process spawn"))?;
        tracing::debug!(path, pid, "launched process");
        Ok(pid)
    }

    async fn terminate(&self, pid: u32) -> Result<(), PlayhookError> {
        let pid = pid.to_string();
        #[cfg(windows)]
        exec::checked("taskkill", &["/F", "/PID", &pid]).await?;
        #[cfg(not(windows))]
        exec::checked("kill", &["-9", &pid]).await?;
        Ok(())
    }
}

#[cfg(target_os = "linux")]
async fn list_processes() -> Result<Vec<ProcessInfo>, HostError> {
    let mut entries = tokio::fs::read_dir("/proc").await?;
    let mut processes = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let Some(pid) = entry.file_name().to_str().and_then(|s| s.parse().ok()) else {
            continue;
        };
        // Processes can exit between listing and reading.
        let name = match tokio::fs::read(entry.path().join("cmdline")).await {
            Ok(raw) => parse::parse_cmdline(&raw),
            Err(_) => continue,
        };
        let name = match name {
            Some(name) => name,
            None => match tokio::fs::read_to_string(entry.path().join("comm")).await {
                Ok(comm) if !comm.trim().is_empty() => comm.trim().to_string(),
                _ => continue,
            },
        };
        processes.push(ProcessInfo { pid, name });
    }
    Ok(processes)
}

#[cfg(all(unix, not(target_os = "linux")))]
async fn list_processes() -> Result<Vec<ProcessInfo>, HostError> {
    let output = exec::checked("ps", &["-axo", "pid=,comm="]).await?;
    Ok(parse::parse_ps(&output))
}

#[cfg(windows)]
async fn list_processes() -> Result<Vec<ProcessInfo>, HostError> {
    let output = exec::checked("tasklist", &["/FO", "CSV", "/NH"]).await?;
    Ok(parse::parse_tasklist_csv(&output))
}
