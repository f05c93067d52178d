//! Action log: capped, append-only record of dispatched actions.

use std::collections::{HashMap, VecDeque};

use serde::{Deserialize, Serialize};

use crate::action::Phase;
use crate::id::{ActionId, GameId};
use crate::time::Timestamp;

/// Default number of entries retained by the action log.
pub const DEFAULT_MAX_LOG_ENTRIES: usize = 100;

/// Outcome of one dispatched (or dry-run) action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub action_id: ActionId,
    pub action_name: String,
    #[serde(default)]
    pub game_id: Option<GameId>,
    #[serde(default)]
    pub phase: Phase,
    pub timestamp: Timestamp,
    pub success: bool,
    #[serde(default)]
    pub exit_code: i32,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub dry_run: bool,
}

/// Ring buffer of [`LogEntry`] values, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionLog {
    entries: VecDeque<LogEntry>,
}

impl ActionLog {
    /// Append an entry, evicting the oldest entries so that at most `max`
    /// remain. A `max` of zero keeps nothing.
    pub fn push(&mut self, entry: LogEntry, max: usize) {
        self.entries.push_back(entry);
        self.truncate(max);
    }

    /// Evict the oldest entries until at most `max` remain.
    pub fn truncate(&mut self, max: usize) {
        while self.entries.len() > max {
            self.entries.pop_front();
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterate oldest first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// The `limit` most recent entries, newest first.
    #[must_use]
    pub fn recent(&self, limit: usize) -> Vec<LogEntry> {
        self.entries.iter().rev().take(limit).cloned().collect()
    }

    /// Aggregate per-action statistics over the retained entries.
    #[must_use]
    pub fn stats(&self) -> HashMap<ActionId, ActionStats> {
        let mut stats: HashMap<ActionId, ActionStats> = HashMap::new();
        for entry in &self.entries {
            stats.entry(entry.action_id).or_default().record(entry);
        }
        stats
    }
}

/// Counters derived from the log for one action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionStats {
    pub action_name: String,
    pub runs: u32,
    pub successes: u32,
    pub failures: u32,
    pub dry_runs: u32,
    pub last_run: Option<Timestamp>,
}

impl ActionStats {
    fn record(&mut self, entry: &LogEntry) {
        self.action_name.clone_from(&entry.action_name);
        self.runs += 1;
        if entry.dry_run {
            self.dry_runs += 1;
        } else if entry.success {
            self.successes += 1;
        } else {
            self.failures += 1;
        }
        self.last_run = Some(self.last_run.map_or(entry.timestamp, |t| t.max(entry.timestamp)));
    }
}
