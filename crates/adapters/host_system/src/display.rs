//! Primary display control through `xrandr`.

use playhook_app::ports::DisplayControl;
use playhook_domain::display::DisplayMode;
use playhook_domain::error::PlayhookError;

use crate::error::HostError;
#[cfg(not(windows))]
use crate::{exec, parse};

/// [`DisplayControl`] for X11 sessions.
#[derive(Debug, Clone)]
pub struct XrandrDisplay {
    program: String,
}

impl Default for XrandrDisplay {
    fn default() -> Self {
        Self {
            program: "xrandr".to_string(),
        }
    }
}

impl XrandrDisplay {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use another `xrandr` executable.
    #[must_use]
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    #[cfg(not(windows))]
    async fn query(&self) -> Result<(String, DisplayMode), HostError> {
        let output = exec::checked(&self.program, &["--query"]).await?;
        parse::parse_xrandr(&output).ok_or(HostError::UnexpectedOutput("xrandr --query"))
    }

    #[cfg(windows)]
    async fn query(&self) -> Result<(String, DisplayMode), HostError> {
        Err(HostError::Unsupported("display control"))
    }

    #[cfg(not(windows))]
    async fn apply(&self, mode: DisplayMode) -> Result<(), HostError> {
        let (output, _) = self.query().await?;
        let size = format!("{}x{}", mode.width, mode.height);
        let rate = mode.refresh_hz.to_string();
        exec::checked(
            &self.program,
            &["--output", &output, "--mode", &size, "--rate", &rate],
        )
        .await?;
        tracing::debug!(%output, %mode, "display mode applied");
        Ok(())
    }

    #[cfg(windows)]
    async fn apply(&self, _mode: DisplayMode) -> Result<(), HostError> {
        Err(HostError::Unsupported("display control"))
    }
}

impl DisplayControl for XrandrDisplay {
    async fn current_mode(&self) -> Result<DisplayMode, PlayhookError> {
        let (_, mode) = self.query().await?;
        Ok(mode)
    }

    async fn apply_mode(&self, mode: DisplayMode) -> Result<(), PlayhookError> {
        Ok(self.apply(mode).await?)
    }
}
