//! Launch and terminate programs.

use playhook_domain::action::process_name;

use super::{ExecutionOutcome, NO_EXIT_CODE, describe};
use crate::expand::{expand_env, split_arguments};
use crate::ports::ProcessControl;

/// Start `path` and return as soon as the process exists.
pub async fn launch<P: ProcessControl>(processes: &P, path: &str, arguments: &str) -> ExecutionOutcome {
    let program = expand_env(path.trim().trim_matches('"'));
    if program.is_empty() {
        return ExecutionOutcome::failed(NO_EXIT_CODE, "no program to launch");
    }
    let args = split_arguments(arguments);
    match processes.launch(&program, &args).await {
        Ok(pid) => {
            tracing::info!(program, pid, "launched");
            ExecutionOutcome::ok(format!("launched {program} (pid {pid})"))
        }
        Err(err) => {
            tracing::warn!(program, error = %err, "launch failed");
            ExecutionOutcome::failed(NO_EXIT_CODE, format!("could not launch {program}: {}", describe(&err)))
        }
    }
}

/// Force-terminate every process named like `path`.
///
/// Nothing to terminate is a success. Individual termination failures are
/// logged and reported in the message but do not fail the action.
pub async fn terminate<P: ProcessControl>(processes: &P, path: &str) -> ExecutionOutcome {
    let name = process_name(path);
    if name.is_empty() {
        return ExecutionOutcome::failed(NO_EXIT_CODE, "no process name to terminate");
    }
    let running = match processes.list().await {
        Ok(list) => list,
        Err(err) => {
            return ExecutionOutcome::failed(
                NO_EXIT_CODE,
                format!("could not enumerate processes: {}", describe(&err)),
            );
        }
    };
    let targets: Vec<_> = running.into_iter().filter(|p| p.matches(&name)).collect();
    if targets.is_empty() {
        return ExecutionOutcome::ok(format!("{name} is not running"));
    }

    let mut terminated = 0_usize;
    for target in &targets {
        match processes.terminate(target.pid).await {
            Ok(()) => terminated += 1,
            Err(err) => {
                tracing::warn!(process = %name, pid = target.pid, error = %err, "could not terminate process");
            }
        }
    }
    tracing::info!(process = %name, terminated, found = targets.len(), "terminated");
    ExecutionOutcome::ok(format!("terminated {terminated} of {} {name} process(es)", targets.len()))
}
