//! Process port: enumerate, launch and terminate host processes.

use std::future::Future;
use std::sync::Arc;

use playhook_domain::action::process_name;
use playhook_domain::error::PlayhookError;

/// A running process as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessInfo {
    pub pid: u32,
    /// Executable name as the host reports it, with or without extension.
    pub name: String,
}

impl ProcessInfo {
    /// Whether this process is an instance of `target` (a path or bare name).
    ///
    /// Both sides are reduced to their base name without extension and
    /// compared case-insensitively.
    #[must_use]
    pub fn matches(&self, target: &str) -> bool {
        let wanted = process_name(target);
        !wanted.is_empty() && process_name(&self.name).eq_ignore_ascii_case(&wanted)
    }
}

/// Host process table access.
pub trait ProcessControl: Send + Sync {
    /// List every process currently running.
    fn list(&self) -> impl Future<Output = Result<Vec<ProcessInfo>, PlayhookError>> + Send;

    /// Start `path` with `args` without waiting for it to exit. Returns the pid.
    fn launch(
        &self,
        path: &str,
        args: &[String],
    ) -> impl Future<Output = Result<u32, PlayhookError>> + Send;

    /// Force-terminate one process.
    fn terminate(&self, pid: u32) -> impl Future<Output = Result<(), PlayhookError>> + Send;

    /// Whether at least one process named like `target` is running.
    fn is_running(&self, target: &str) -> impl Future<Output = Result<bool, PlayhookError>> + Send {
        async move {
            let processes = self.list().await?;
            Ok(processes.iter().any(|p| p.matches(target)))
        }
    }
}

impl<T: ProcessControl> ProcessControl for Arc<T> {
    fn list(&self) -> impl Future<Output = Result<Vec<ProcessInfo>, PlayhookError>> + Send {
        (**self).list()
    }

    fn launch(
        &self,
        path: &str,
        args: &[String],
    ) -> impl Future<Output = Result<u32, PlayhookError>> + Send {
        (**self).launch(path, args)
    }

    fn terminate(&self, pid: u32) -> impl Future<Output = Result<(), PlayhookError>> + Send {
        (**self).terminate(pid)
    }
}
