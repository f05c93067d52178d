//! Action kinds: the closed set of system-level operations an action performs.

use serde::{Deserialize, Serialize};

/// Restore sentinel accepted by [`ActionKind::SetVolume`] and
/// [`ActionKind::ChangeResolution`].
pub const RESTORE: &str = "RESTORE";

/// What an action does, together with the payload that kind needs.
///
/// Serialized with a `kind` tag so it can be flattened into [`Action`](super::Action).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActionKind {
    /// Start a program without waiting for it to exit.
    LaunchProcess {
        #[serde(default)]
        path: String,
        #[serde(default)]
        arguments: String,
    },
    /// Force-terminate every running process whose name matches `path`.
    ///
    /// `arguments` is used when the process is relaunched as a mirror restore.
    TerminateProcess {
        #[serde(default)]
        path: String,
        #[serde(default)]
        arguments: String,
    },
    /// Run a script file, or an inline script when `path` is not a file.
    RunScript {
        #[serde(default)]
        path: String,
        #[serde(default)]
        arguments: String,
    },
    /// Run a command line through the system shell.
    RunSystemCommand {
        #[serde(default)]
        command: String,
        #[serde(default)]
        arguments: String,
    },
    /// Pause the action sequence.
    Wait {
        #[serde(default)]
        seconds: u64,
    },
    /// Set the master volume to a percentage, or `RESTORE` the saved level.
    SetVolume {
        #[serde(default)]
        level: String,
    },
    /// Mute the audio of one application.
    MuteApp {
        #[serde(default)]
        process: String,
    },
    /// Unmute the audio of one application.
    UnmuteApp {
        #[serde(default)]
        process: String,
    },
    /// Change the primary display mode (`WIDTHxHEIGHT@REFRESHHz`) or `RESTORE` it.
    ChangeResolution {
        #[serde(default)]
        mode: String,
    },
}

impl ActionKind {
    /// Stable snake-case name of the kind, matching the serialized tag.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::LaunchProcess { .. } => "launch_process",
            Self::TerminateProcess { .. } => "terminate_process",
            Self::RunScript { .. } => "run_script",
            Self::RunSystemCommand { .. } => "run_system_command",
            Self::Wait { .. } => "wait",
            Self::SetVolume { .. } => "set_volume",
            Self::MuteApp { .. } => "mute_app",
            Self::UnmuteApp { .. } => "unmute_app",
            Self::ChangeResolution { .. } => "change_resolution",
        }
    }

    /// Whether reversing this kind depends on the state observed before it ran.
    ///
    /// Only closing a program is tracked: the program is relaunched afterwards
    /// only if it was running before it was closed.
    #[must_use]
    pub fn is_tracked_mirror(&self) -> bool {
        matches!(self, Self::TerminateProcess { .. })
    }

    /// The kind that undoes this one, if any.
    #[must_use]
    pub fn mirror_counterpart(&self) -> Option<Self> {
        match self {
            Self::TerminateProcess { path, arguments } => Some(Self::LaunchProcess {
                path: path.clone(),
                arguments: arguments.clone(),
            }),
            Self::LaunchProcess { path, arguments } => Some(Self::TerminateProcess {
                path: path.clone(),
                arguments: arguments.clone(),
            }),
            Self::SetVolume { .. } => Some(Self::SetVolume {
                level: RESTORE.to_string(),
            }),
            Self::ChangeResolution { .. } => Some(Self::ChangeResolution {
                mode: RESTORE.to_string(),
            }),
            Self::MuteApp { process } => Some(Self::UnmuteApp {
                process: process.clone(),
            }),
            Self::UnmuteApp { process } => Some(Self::MuteApp {
                process: process.clone(),
            }),
            Self::RunScript { .. } | Self::RunSystemCommand { .. } | Self::Wait { .. } => None,
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = self.label();
        match self {
            Self::LaunchProcess { path, .. }
            | Self::TerminateProcess { path, .. }
            | Self::RunScript { path, .. } => write!(f, "{label}({path})"),
            Self::RunSystemCommand { command, .. } => write!(f, "{label}({command})"),
            Self::Wait { seconds } => write!(f, "{label}({seconds}s)"),
            Self::SetVolume { level } => write!(f, "{label}({level})"),
            Self::MuteApp { process } | Self::UnmuteApp { process } => {
                write!(f, "{label}({process})")
            }
            Self::ChangeResolution { mode } => write!(f, "{label}({mode})"),
        }
    }
}

/// Reduce a path or file name to a bare process name.
///
/// Both `/` and `\` are treated as separators regardless of platform and the
/// last extension is stripped, so `C:\Apps\chrome.exe` becomes `chrome`.
#[must_use]
pub fn process_name(path: &str) -> String {
    let trimmed = path.trim().trim_matches('"');
    let base = trimmed
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(trimmed);
    match base.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem.to_string(),
        _ => base.to_string(),
    }
}
