//! Profile: a named, ordered list of actions assigned to games.

use serde::{Deserialize, Serialize};

use crate::action::{Action, Phase};
use crate::error::{PlayhookError, ValidationError};
use crate::id::ProfileId;

/// A named list of actions.
///
/// Actions are owned copies: editing an action in the library after it has
/// been added to a profile does not change the profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub id: ProfileId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub actions: Vec<Action>,
}

impl Profile {
    /// Create a builder for constructing a [`Profile`].
    #[must_use]
    pub fn builder() -> ProfileBuilder {
        ProfileBuilder::default()
    }

    /// Check domain invariants of the profile and every action it owns.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyName`] when the profile or one of its
    /// actions has a blank name.
    pub fn validate(&self) -> Result<(), PlayhookError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        self.actions.iter().try_for_each(Action::validate)
    }

    /// Iterate over the actions that belong to `phase`, in list order.
    pub fn actions_in(&self, phase: Phase) -> impl Iterator<Item = &Action> {
        self.actions.iter().filter(move |a| a.phase == phase)
    }

    /// Reassign priorities `0, step, 2*step, …` following the current list order.
    pub fn renumber_priorities(&mut self, step: i32) {
        let mut next = 0_i32;
        for action in &mut self.actions {
            action.priority = next;
            next = next.saturating_add(step);
        }
    }
}

/// Step-by-step builder for [`Profile`].
#[derive(Debug, Default)]
pub struct ProfileBuilder {
    id: Option<ProfileId>,
    name: Option<String>,
    actions: Vec<Action>,
}

impl ProfileBuilder {
    #[must_use]
    pub fn id(mut self, id: ProfileId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    /// Consume the builder, validate, and return a [`Profile`].
    ///
    /// # Errors
    ///
    /// Returns [`PlayhookError::Validation`] if the name is missing or empty.
    pub fn build(self) -> Result<Profile, PlayhookError> {
        let profile = Profile {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            actions: self.actions,
        };
        profile.validate()?;
        Ok(profile)
    }
}
