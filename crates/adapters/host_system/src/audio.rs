//! Master volume and per-application mute through `pactl`.
//!
//! Works against PulseAudio and PipeWire (via `pipewire-pulse`). The primary
//! mute strategy matches sink inputs by their process binary, the fallback
//! by the application name the client announced.

use playhook_app::ports::AudioControl;
use playhook_domain::action::process_name;
use playhook_domain::error::PlayhookError;

use crate::error::HostError;
use crate::parse::SinkInput;
#[cfg(not(windows))]
use crate::{exec, parse};

const DEFAULT_SINK: &str = "@DEFAULT_SINK@";

/// [`AudioControl`] backed by the `pactl` tool.
#[derive(Debug, Clone)]
pub struct PactlAudio {
    program: String,
}

impl Default for PactlAudio {
    fn default() -> Self {
        Self {
            program: "pactl".to_string(),
        }
    }
}

impl PactlAudio {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use another `pactl` executable.
    #[must_use]
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    #[cfg(not(windows))]
    async fn volume(&self) -> Result<u8, HostError> {
        let output = exec::checked(&self.program, &["get-sink-volume", DEFAULT_SINK]).await?;
        parse::parse_volume_percent(&output)
            .ok_or(HostError::UnexpectedOutput("pactl get-sink-volume"))
    }

    #[cfg(not(windows))]
    async fn set_volume(&self, percent: u8) -> Result<(), HostError> {
        let level = format!("{percent}%");
        exec::checked(&self.program, &["set-sink-volume", DEFAULT_SINK, &level]).await?;
        Ok(())
    }

    /// Mute every sink input selected by `select`. Returns whether any matched.
    #[cfg(not(windows))]
    async fn mute_matching<F>(&self, mute: bool, select: F) -> Result<bool, HostError>
    where
        F: Fn(&SinkInput) -> bool + Send,
    {
        let output = exec::checked(&self.program, &["list", "sink-inputs"]).await?;
        let matching: Vec<u32> = parse::parse_sink_inputs(&output)
            .iter()
            .filter(|input| select(input))
            .map(|input| input.id)
            .collect();
        let flag = if mute { "1" } else { "0" };
        for id in &matching {
            let id = id.to_string();
            exec::checked(&self.program, &["set-sink-input-mute", &id, flag]).await?;
        }
        Ok(!matching.is_empty())
    }

    #[cfg(windows)]
    async fn volume(&self) -> Result<u8, HostError> {
        Err(HostError::Unsupported("audio control"))
    }

    #[cfg(windows)]
    async fn set_volume(&self, _percent: u8) -> Result<(), HostError> {
        Err(HostError::Unsupported("audio control"))
    }

    #[cfg(windows)]
    async fn mute_matching<F>(&self, _mute: bool, _select: F) -> Result<bool, HostError>
    where
        F: Fn(&SinkInput) -> bool + Send,
    {
        Err(HostError::Unsupported("audio control"))
    }
}

/// Case-insensitive comparison of process names, ignoring path and extension.
fn same_process(candidate: Option<&str>, target: &str) -> bool {
    let target = process_name(target);
    !target.is_empty()
        && candidate.is_some_and(|name| process_name(name).eq_ignore_ascii_case(&target))
}

impl AudioControl for PactlAudio {
    async fn master_volume(&self) -> Result<u8, PlayhookError> {
        Ok(self.volume().await?)
    }

    async fn set_master_volume(&self, percent: u8) -> Result<(), PlayhookError> {
        Ok(self.set_volume(percent).await?)
    }

    async fn set_session_mute(&self, process: &str, mute: bool) -> Result<bool, PlayhookError> {
        let process = process.to_string();
        let matched = self
            .mute_matching(mute, move |input: &SinkInput| {
                same_process(input.binary.as_deref(), &process)
            })
            .await?;
        Ok(matched)
    }

    async fn set_mute_fallback(&self, process: &str, mute: bool) -> Result<bool, PlayhookError> {
        let process = process.to_string();
        let matched = self
            .mute_matching(mute, move |input: &SinkInput| {
                same_process(input.application.as_deref(), &process)
            })
            .await?;
        Ok(matched)
    }
}
