//! Phase: the lifecycle moment an action belongs to.

use serde::{Deserialize, Serialize};

/// One of the three moments of a game session at which automation can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Immediately before the game process is started.
    #[default]
    BeforeStart,
    /// Immediately after the game process has started.
    AfterStart,
    /// After the game process has stopped.
    AfterStop,
}

impl Phase {
    /// All phases in lifecycle order.
    pub const ALL: [Self; 3] = [Self::BeforeStart, Self::AfterStart, Self::AfterStop];

    /// Whether mirror actions of this phase are reversed once the game stops.
    #[must_use]
    pub fn precedes_stop(self) -> bool {
        !matches!(self, Self::AfterStop)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BeforeStart => f.write_str("before_start"),
            Self::AfterStart => f.write_str("after_start"),
            Self::AfterStop => f.write_str("after_stop"),
        }
    }
}
