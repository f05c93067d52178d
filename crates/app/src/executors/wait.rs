//! Pause the action sequence.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use super::{ExecutionOutcome, NO_EXIT_CODE};

/// Sleep for `max(1, seconds)` seconds or until `cancel` fires.
pub async fn wait(seconds: u64, cancel: &CancellationToken) -> ExecutionOutcome {
    let seconds = seconds.max(1);
    tokio::select! {
        () = tokio::time::sleep(Duration::from_secs(seconds)) => {
            ExecutionOutcome::ok(format!("waited {seconds}s"))
        }
        () = cancel.cancelled() => ExecutionOutcome::failed(NO_EXIT_CODE, "wait cancelled"),
    }
}
