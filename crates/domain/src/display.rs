//! Display modes and resolution-change requests.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::action::RESTORE;
use crate::error::ValidationError;

/// Refresh rate used when a descriptor omits it and as the first fallback rung.
pub const DEFAULT_REFRESH_HZ: u32 = 60;

/// Mode applied when a requested mode is rejected, or when a restore is
/// requested but no original mode was ever captured.
pub const FALLBACK_MODE: DisplayMode = DisplayMode {
    width: 1920,
    height: 1080,
    refresh_hz: DEFAULT_REFRESH_HZ,
};

/// Width, height and refresh rate of a display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DisplayMode {
    pub width: u32,
    pub height: u32,
    pub refresh_hz: u32,
}

impl DisplayMode {
    #[must_use]
    pub fn new(width: u32, height: u32, refresh_hz: u32) -> Self {
        Self {
            width,
            height,
            refresh_hz,
        }
    }

    /// The same resolution at [`DEFAULT_REFRESH_HZ`].
    #[must_use]
    pub fn at_default_refresh(self) -> Self {
        Self {
            refresh_hz: DEFAULT_REFRESH_HZ,
            ..self
        }
    }
}

impl std::fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}@{}Hz", self.width, self.height, self.refresh_hz)
    }
}

impl FromStr for DisplayMode {
    type Err = ValidationError;

    /// Parse `WIDTHxHEIGHT[@REFRESH[Hz]]`, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidResolution(s.to_string());
        let lower = s.trim().to_ascii_lowercase();
        let (size, refresh) = match lower.split_once('@') {
            Some((size, refresh)) => (size, Some(refresh)),
            None => (lower.as_str(), None),
        };
        let (width, height) = size.split_once('x').ok_or_else(invalid)?;
        let width: u32 = width.trim().parse().map_err(|_| invalid())?;
        let height: u32 = height.trim().parse().map_err(|_| invalid())?;
        let refresh_hz = match refresh {
            Some(r) => r
                .trim()
                .trim_end_matches("hz")
                .trim()
                .parse()
                .map_err(|_| invalid())?,
            None => DEFAULT_REFRESH_HZ,
        };
        if width == 0 || height == 0 || refresh_hz == 0 {
            return Err(invalid());
        }
        Ok(Self::new(width, height, refresh_hz))
    }
}

/// What a change-resolution action asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionRequest {
    /// Re-apply the mode captured before the first change.
    Restore,
    /// Switch to a specific mode.
    Mode(DisplayMode),
}

impl FromStr for ResolutionRequest {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case(RESTORE) {
            return Ok(Self::Restore);
        }
        s.parse().map(Self::Mode)
    }
}
