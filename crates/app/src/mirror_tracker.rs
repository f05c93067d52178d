//! Mirror tracker: per-session memory of what the engine changed.
//!
//! A mirror action's effect is reversed after the game stops, but only if
//! the engine itself caused the change. For closing a program that means
//! remembering, before closing it, whether it was running at all.
//!
//! One tracker exists per game session. It is created when the session
//! starts, carried through the phases and dropped once the stop phase is
//! done, so concurrent sessions never share state.

use std::collections::{HashMap, HashSet};

use playhook_domain::action::{Action, ActionKind};
use playhook_domain::id::ActionId;

use crate::ports::ProcessControl;

#[derive(Debug, Default)]
pub struct MirrorTracker {
    /// Action id → "the target was already closed before the action ran".
    already_closed: HashMap<ActionId, bool>,
    /// Mirror actions dispatched successfully during this session.
    applied: HashSet<ActionId>,
}

impl MirrorTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the state of the process a terminate mirror is about to close.
    ///
    /// Must be awaited before the action is dispatched. Does nothing for
    /// non-mirror actions and for kinds other than terminate. If the process
    /// table cannot be read the target is treated as already closed so that
    /// nothing is relaunched unexpectedly.
    pub async fn observe_before<P: ProcessControl>(&mut self, action: &Action, processes: &P) {
        if !action.mirror {
            return;
        }
        let ActionKind::TerminateProcess { path, .. } = &action.kind else {
            return;
        };
        let already_closed = match processes.is_running(path).await {
            Ok(running) => !running,
            Err(err) => {
                tracing::warn!(action = %action.name, error = %err, "could not observe process before closing it");
                true
            }
        };
        tracing::debug!(action = %action.name, already_closed, "observed mirror target");
        self.record_observation(action.id, already_closed);
    }

    /// Store an observation directly.
    pub fn record_observation(&mut self, id: ActionId, already_closed: bool) {
        self.already_closed.insert(id, already_closed);
    }

    /// Whether the engine must undo `action` after the game stops.
    ///
    /// True only for terminate mirrors whose target was observed running.
    /// Unobserved actions are never restored.
    #[must_use]
    pub fn should_restore(&self, action: &Action) -> bool {
        action.mirror
            && action.kind.is_tracked_mirror()
            && self
                .already_closed
                .get(&action.id)
                .is_some_and(|closed| !closed)
    }

    /// Remember that a mirror action actually ran in this session.
    pub fn mark_applied(&mut self, id: ActionId) {
        self.applied.insert(id);
    }

    #[must_use]
    pub fn was_applied(&self, id: ActionId) -> bool {
        self.applied.contains(&id)
    }

    pub fn clear(&mut self) {
        self.already_closed.clear();
        self.applied.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.already_closed.is_empty() && self.applied.is_empty()
    }
}
