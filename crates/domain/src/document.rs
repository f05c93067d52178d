//! The persisted document: everything the engine reads and the
//! configuration surfaces edit.
//!
//! Every field defaults when absent so that documents written by older
//! versions keep loading after the schema gains new optional fields.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::error::{NotFoundError, PlayhookError};
use crate::id::{GameId, ProfileId};
use crate::log::{ActionLog, DEFAULT_MAX_LOG_ENTRIES, LogEntry};
use crate::profile::Profile;

/// Root of the persisted state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    /// Reusable action templates; profiles hold copies, not references.
    pub action_library: Vec<Action>,
    pub profiles: Vec<Profile>,
    /// One profile per game.
    pub mappings: BTreeMap<GameId, ProfileId>,
    pub settings: Settings,
    pub action_log: ActionLog,
}

impl Document {
    #[must_use]
    pub fn profile(&self, id: ProfileId) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    /// Insert a profile or replace the one with the same id, keeping its position.
    ///
    /// # Errors
    ///
    /// Returns [`PlayhookError::Validation`] if the profile is invalid.
    pub fn upsert_profile(&mut self, profile: Profile) -> Result<(), PlayhookError> {
        profile.validate()?;
        match self.profiles.iter_mut().find(|p| p.id == profile.id) {
            Some(existing) => *existing = profile,
            None => self.profiles.push(profile),
        }
        Ok(())
    }

    /// Remove a profile and every mapping that pointed at it.
    ///
    /// # Errors
    ///
    /// Returns [`PlayhookError::NotFound`] if no such profile exists.
    pub fn remove_profile(&mut self, id: ProfileId) -> Result<Profile, PlayhookError> {
        let index = self
            .profiles
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| NotFoundError {
                entity: "Profile",
                id: id.to_string(),
            })?;
        self.mappings.retain(|_, profile_id| *profile_id != id);
        Ok(self.profiles.remove(index))
    }

    /// Assign a profile to a game, replacing any previous assignment.
    ///
    /// # Errors
    ///
    /// Returns [`PlayhookError::NotFound`] if the profile does not exist.
    pub fn assign(&mut self, game: GameId, profile: ProfileId) -> Result<(), PlayhookError> {
        if self.profile(profile).is_none() {
            return Err(NotFoundError {
                entity: "Profile",
                id: profile.to_string(),
            }
            .into());
        }
        self.mappings.insert(game, profile);
        Ok(())
    }

    /// Remove a game's assignment. Returns the previously assigned profile.
    pub fn unassign(&mut self, game: GameId) -> Option<ProfileId> {
        self.mappings.remove(&game)
    }

    /// Append to the action log honouring the configured cap.
    pub fn append_log(&mut self, entry: LogEntry) {
        self.action_log.push(entry, self.settings.max_log_entries);
    }
}

/// Engine settings stored alongside the profiles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Action log retention.
    pub max_log_entries: usize,
    /// Record what would run without dispatching anything.
    pub dry_run: bool,
    pub notify_on_success: bool,
    pub notify_on_error: bool,
    /// Upper bound for script and system-command execution. `None` waits
    /// until the spawned process exits.
    pub command_timeout_secs: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_log_entries: DEFAULT_MAX_LOG_ENTRIES,
            dry_run: false,
            notify_on_success: false,
            notify_on_error: true,
            command_timeout_secs: None,
        }
    }
}
