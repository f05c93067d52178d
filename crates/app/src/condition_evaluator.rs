//! Condition evaluator: decides whether an action's guard holds.
//!
//! Evaluation is fail-open: a guard that cannot be evaluated (malformed time,
//! unreadable path, process table unavailable) counts as satisfied and a
//! warning is logged. Conditions refine automation, they never disable it.

use chrono::NaiveTime;
use playhook_domain::condition::{Condition, parse_time_of_day, time_in_window};

use crate::expand::expand_env;
use crate::ports::ProcessControl;

pub struct ConditionEvaluator<P> {
    processes: P,
}

impl<P: ProcessControl> ConditionEvaluator<P> {
    pub fn new(processes: P) -> Self {
        Self { processes }
    }

    /// Evaluate `condition` against the current host state and local time.
    pub async fn evaluate(&self, condition: &Condition) -> bool {
        self.evaluate_at(condition, playhook_domain::time::local_time_of_day())
            .await
    }

    /// Evaluate `condition` with `now` as the local time of day.
    pub async fn evaluate_at(&self, condition: &Condition, now: NaiveTime) -> bool {
        match condition {
            Condition::None => true,
            Condition::ProcessRunning { process } => self
                .process_running(process)
                .await
                .unwrap_or(true),
            Condition::ProcessNotRunning { process } => self
                .process_running(process)
                .await
                .is_none_or(|running| !running),
            Condition::FileExists { path } => path_exists(path).await.unwrap_or(true),
            Condition::FileNotExists { path } => {
                path_exists(path).await.is_none_or(|exists| !exists)
            }
            Condition::TimeRange { start, end } => {
                match (parse_time_of_day(start), parse_time_of_day(end)) {
                    (Ok(start), Ok(end)) => time_in_window(start, end, now),
                    (Err(err), _) | (_, Err(err)) => {
                        tracing::warn!(error = %err, "time range condition ignored");
                        true
                    }
                }
            }
        }
    }

    /// `None` when the process table could not be read.
    async fn process_running(&self, process: &str) -> Option<bool> {
        if process.trim().is_empty() {
            tracing::warn!("process condition without a process name ignored");
            return None;
        }
        match self.processes.is_running(process).await {
            Ok(running) => Some(running),
            Err(err) => {
                tracing::warn!(process, error = %err, "process condition ignored");
                None
            }
        }
    }
}

/// `None` when the path is missing or its existence cannot be determined.
async fn path_exists(path: &str) -> Option<bool> {
    if path.trim().is_empty() {
        tracing::warn!("file condition without a path ignored");
        return None;
    }
    let expanded = expand_env(path.trim());
    match tokio::fs::try_exists(&expanded).await {
        Ok(exists) => Some(exists),
        Err(err) => {
            tracing::warn!(path = %expanded, error = %err, "file condition ignored");
            None
        }
    }
}
