//! Action executors: one handler per action kind.
//!
//! [`ActionExecutor`] matches exhaustively on [`ActionKind`], so adding a kind
//! without a handler does not compile. Executors never fail the phase: every
//! problem becomes an unsuccessful [`ExecutionOutcome`].

pub mod audio;
pub mod command;
pub mod display;
pub mod process;
pub mod wait;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use playhook_domain::action::{Action, ActionKind};
use playhook_domain::document::Settings;
use tokio_util::sync::CancellationToken;

use crate::ports::{AudioControl, CommandRunner, DisplayControl, ProcessControl};

pub use audio::AudioController;
pub use command::ShellConfig;
pub use display::ResolutionController;

/// Exit code reported when no process exit code is available.
pub const NO_EXIT_CODE: i32 = -1;

/// Result of dispatching one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionOutcome {
    pub success: bool,
    pub exit_code: i32,
    pub message: String,
    /// A failure that is logged but never notified.
    pub best_effort: bool,
}

impl ExecutionOutcome {
    #[must_use]
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            exit_code: 0,
            message: message.into(),
            best_effort: false,
        }
    }

    #[must_use]
    pub fn failed(exit_code: i32, message: impl Into<String>) -> Self {
        Self {
            success: false,
            exit_code,
            message: message.into(),
            best_effort: false,
        }
    }

    #[must_use]
    pub fn best_effort_failure(message: impl Into<String>) -> Self {
        Self {
            best_effort: true,
            ..Self::failed(NO_EXIT_CODE, message)
        }
    }
}

/// Per-run inputs shared by every executor.
#[derive(Debug, Clone, Default)]
pub struct ExecutionContext {
    pub settings: Settings,
    pub cancel: CancellationToken,
}

impl ExecutionContext {
    #[must_use]
    pub fn new(settings: Settings, cancel: CancellationToken) -> Self {
        Self { settings, cancel }
    }

    /// Limit for script and command execution, if configured.
    #[must_use]
    pub fn command_timeout(&self) -> Option<Duration> {
        self.settings
            .command_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

/// Something that can carry out an action.
pub trait Dispatch: Send + Sync {
    fn execute(
        &self,
        action: &Action,
        ctx: &ExecutionContext,
    ) -> impl Future<Output = ExecutionOutcome> + Send;

    /// Called when a new game session starts.
    fn begin_session(&self) -> impl Future<Output = ()> + Send {
        async {}
    }
}

impl<T: Dispatch> Dispatch for Arc<T> {
    fn execute(
        &self,
        action: &Action,
        ctx: &ExecutionContext,
    ) -> impl Future<Output = ExecutionOutcome> + Send {
        (**self).execute(action, ctx)
    }

    fn begin_session(&self) -> impl Future<Output = ()> + Send {
        (**self).begin_session()
    }
}

/// Dispatches actions to the host through the ports.
pub struct ActionExecutor<P, C, D, A> {
    processes: P,
    commands: C,
    shell: ShellConfig,
    display: ResolutionController<D>,
    audio: AudioController<A>,
}

impl<P, C, D, A> ActionExecutor<P, C, D, A>
where
    P: ProcessControl,
    C: CommandRunner,
    D: DisplayControl,
    A: AudioControl,
{
    pub fn new(processes: P, commands: C, display: D, audio: A, shell: ShellConfig) -> Self {
        Self {
            processes,
            commands,
            shell,
            display: ResolutionController::new(display),
            audio: AudioController::new(audio),
        }
    }
}

impl<P, C, D, A> Dispatch for ActionExecutor<P, C, D, A>
where
    P: ProcessControl,
    C: CommandRunner,
    D: DisplayControl,
    A: AudioControl,
{
    async fn execute(&self, action: &Action, ctx: &ExecutionContext) -> ExecutionOutcome {
        match &action.kind {
            ActionKind::LaunchProcess { path, arguments } => {
                process::launch(&self.processes, path, arguments).await
            }
            ActionKind::TerminateProcess { path, .. } => {
                process::terminate(&self.processes, path).await
            }
            ActionKind::RunScript { path, arguments } => {
                command::run_script(&self.commands, &self.shell, path, arguments, ctx).await
            }
            ActionKind::RunSystemCommand { command, arguments } => {
                command::run_system_command(&self.commands, &self.shell, command, arguments, ctx)
                    .await
            }
            ActionKind::Wait { seconds } => wait::wait(*seconds, &ctx.cancel).await,
            ActionKind::SetVolume { level } => self.audio.set_volume(level).await,
            ActionKind::MuteApp { process } => self.audio.set_mute(process, true).await,
            ActionKind::UnmuteApp { process } => self.audio.set_mute(process, false).await,
            ActionKind::ChangeResolution { mode } => self.display.change(mode).await,
        }
    }

    async fn begin_session(&self) {
        self.display.begin_session().await;
    }
}

/// Render an error together with its source chain.
pub(crate) fn describe(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
