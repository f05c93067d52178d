//! Volume levels requested by set-volume actions.

use std::str::FromStr;

use crate::action::RESTORE;
use crate::error::ValidationError;

/// What a set-volume action asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeRequest {
    /// Re-apply the master volume saved before the first change.
    Restore,
    /// Set the master volume to this percentage, already clamped to `0..=100`.
    Percent(u8),
}

impl VolumeRequest {
    /// Clamp an arbitrary integer to a valid percentage.
    #[must_use]
    pub fn clamped(percent: i64) -> Self {
        // Clamped to 0..=100 first, so the narrowing cannot truncate.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let value = percent.clamp(0, 100) as u8;
        Self::Percent(value)
    }
}

impl FromStr for VolumeRequest {
    type Err = ValidationError;

    /// Parse `RESTORE` or an integer percentage (optionally suffixed with `%`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case(RESTORE) {
            return Ok(Self::Restore);
        }
        trimmed
            .trim_end_matches('%')
            .trim()
            .parse::<i64>()
            .map(Self::clamped)
            .map_err(|_| ValidationError::InvalidVolume(s.to_string()))
    }
}
