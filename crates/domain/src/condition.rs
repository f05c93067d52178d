//! Condition: a guard that must hold for an action to run.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A predicate evaluated right before an action is dispatched.
///
/// [`Condition::None`] always holds. Evaluation that cannot complete (a
/// malformed time, an unreadable path) is treated as satisfied by the
/// evaluator, so a broken guard never disables automation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Condition {
    /// No guard.
    #[default]
    None,
    /// A process with this base name is running.
    ProcessRunning { process: String },
    /// No process with this base name is running.
    ProcessNotRunning { process: String },
    /// The path (environment variables expanded) exists as a file or directory.
    FileExists { path: String },
    /// The path (environment variables expanded) does not exist.
    FileNotExists { path: String },
    /// The local time of day lies within `start..=end`, wrapping past midnight
    /// when `start` is later than `end`.
    TimeRange {
        /// `HH:MM` or `HH:MM:SS`.
        #[serde(default)]
        start: String,
        /// `HH:MM` or `HH:MM:SS`.
        #[serde(default)]
        end: String,
    },
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            Self::ProcessRunning { process } => write!(f, "process_running({process})"),
            Self::ProcessNotRunning { process } => write!(f, "process_not_running({process})"),
            Self::FileExists { path } => write!(f, "file_exists({path})"),
            Self::FileNotExists { path } => write!(f, "file_not_exists({path})"),
            Self::TimeRange { start, end } => write!(f, "time_range({start}..{end})"),
        }
    }
}

/// Parse a `HH:MM` or `HH:MM:SS` time of day.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidTimeOfDay`] for empty or malformed input.
pub fn parse_time_of_day(value: &str) -> Result<NaiveTime, ValidationError> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|_| ValidationError::InvalidTimeOfDay(value.to_string()))
}

/// Whether `now` falls in the inclusive window `start..=end`.
///
/// A window whose start is later than its end wraps past midnight.
#[must_use]
pub fn time_in_window(start: NaiveTime, end: NaiveTime, now: NaiveTime) -> bool {
    if start <= end {
        now >= start && now <= end
    } else {
        now >= start || now <= end
    }
}
