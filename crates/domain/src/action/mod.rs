//! Action: one system-level step of a profile.
//!
//! An action pairs an [`ActionKind`] (what to do) with scheduling metadata:
//! the [`Phase`] it runs in, its priority, an optional [`Condition`] guard
//! and the mirror flag that asks the engine to undo its effect once the game
//! stops.

mod kind;
mod phase;

pub use kind::{ActionKind, RESTORE, process_name};
pub use phase::Phase;

use serde::{Deserialize, Serialize};

use crate::condition::Condition;
use crate::error::{PlayhookError, ValidationError};
use crate::id::ActionId;

/// A single automation step.
///
/// Priority is ascending (lower runs earlier) and is not required to be
/// unique; ties keep the order of the owning list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    #[serde(default)]
    pub id: ActionId,
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub kind: ActionKind,
    #[serde(default)]
    pub phase: Phase,
    /// Undo this action's effect when the game stops.
    #[serde(default)]
    pub mirror: bool,
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub condition: Condition,
    /// Free-text grouping used by configuration surfaces.
    #[serde(default)]
    pub category: String,
}

impl Action {
    /// Create a builder for an action of the given kind.
    #[must_use]
    pub fn builder(kind: ActionKind) -> ActionBuilder {
        ActionBuilder::new(kind)
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyName`] when `name` is blank.
    pub fn validate(&self) -> Result<(), PlayhookError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(())
    }

    /// Synthesize the action that undoes this one at [`Phase::AfterStop`].
    ///
    /// The restore keeps the identity of the original so log entries and
    /// statistics aggregate under one action. It is unconditional and never
    /// itself mirrored.
    #[must_use]
    pub fn restore_counterpart(&self) -> Option<Action> {
        let kind = self.kind.mirror_counterpart()?;
        Some(Action {
            id: self.id,
            name: format!("{} (restore)", self.name),
            kind,
            phase: Phase::AfterStop,
            mirror: false,
            priority: self.priority,
            condition: Condition::None,
            category: self.category.clone(),
        })
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]", self.name, self.kind)
    }
}

/// Step-by-step builder for [`Action`].
#[derive(Debug)]
pub struct ActionBuilder {
    id: Option<ActionId>,
    name: Option<String>,
    kind: ActionKind,
    phase: Phase,
    mirror: bool,
    priority: i32,
    condition: Condition,
    category: String,
}

impl ActionBuilder {
    fn new(kind: ActionKind) -> Self {
        Self {
            id: None,
            name: None,
            kind,
            phase: Phase::default(),
            mirror: false,
            priority: 0,
            condition: Condition::None,
            category: String::new(),
        }
    }

    #[must_use]
    pub fn id(mut self, id: ActionId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn phase(mut self, phase: Phase) -> Self {
        self.phase = phase;
        self
    }

    #[must_use]
    pub fn mirror(mut self, mirror: bool) -> Self {
        self.mirror = mirror;
        self
    }

    #[must_use]
    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    #[must_use]
    pub fn condition(mut self, condition: Condition) -> Self {
        self.condition = condition;
        self
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Consume the builder, validate, and return an [`Action`].
    ///
    /// # Errors
    ///
    /// Returns [`PlayhookError::Validation`] if the name is missing or empty.
    pub fn build(self) -> Result<Action, PlayhookError> {
        let action = Action {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            kind: self.kind,
            phase: self.phase,
            mirror: self.mirror,
            priority: self.priority,
            condition: self.condition,
            category: self.category,
        };
        action.validate()?;
        Ok(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close_chrome() -> Action {
        Action::builder(ActionKind::TerminateProcess {
            path: "chrome.exe".to_string(),
            arguments: String::new(),
        })
        .name("Close Chrome")
        .mirror(true)
        .build()
        .unwrap()
    }

    #[test]
    fn should_build_action_with_defaults() {
        let action = close_chrome();
        assert_eq!(action.phase, Phase::BeforeStart);
        assert_eq!(action.priority, 0);
        assert_eq!(action.condition, Condition::None);
        assert!(action.category.is_empty());
    }

    #[test]
    fn should_return_validation_error_when_name_is_empty() {
        let result = Action::builder(ActionKind::Wait { seconds: 1 }).build();
        assert!(matches!(
            result,
            Err(PlayhookError::Validation(ValidationError::EmptyName))
        ));
    }

    #[test]
    fn should_synthesize_launch_restore_for_close_action() {
        let action = close_chrome();
        let restore = action.restore_counterpart().unwrap();
        assert_eq!(restore.id, action.id);
        assert_eq!(restore.phase, Phase::AfterStop);
        assert!(!restore.mirror);
        assert!(matches!(
            restore.kind,
            ActionKind::LaunchProcess { ref path, .. } if path == "chrome.exe"
        ));
    }

    #[test]
    fn should_serialize_kind_flattened_next_to_common_fields() {
        let action = close_chrome();
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["kind"], "terminate_process");
        assert_eq!(json["path"], "chrome.exe");
        assert_eq!(json["phase"], "before_start");
        assert_eq!(json["mirror"], true);
    }

    #[test]
    fn should_default_missing_optional_fields_when_deserializing() {
        let json = serde_json::json!({
            "name": "Pause",
            "kind": "wait",
            "seconds": 3
        });
        let action: Action = serde_json::from_value(json).unwrap();
        assert_eq!(action.kind, ActionKind::Wait { seconds: 3 });
        assert_eq!(action.phase, Phase::BeforeStart);
        assert!(!action.mirror);
        assert_eq!(action.condition, Condition::None);
    }

    #[test]
    fn should_roundtrip_action_through_serde_json() {
        let action = Action::builder(ActionKind::ChangeResolution {
            mode: "1920x1080@60Hz".to_string(),
        })
        .name("1080p")
        .phase(Phase::BeforeStart)
        .priority(3)
        .condition(Condition::FileExists {
            path: "%APPDATA%/marker".to_string(),
        })
        .category("Display")
        .build()
        .unwrap();
        let json = serde_json::to_string(&action).unwrap();
        let parsed: Action = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, action);
    }
}
