//! Display resolution changes with a fallback ladder.
//!
//! The mode in effect before the first change is captured once and kept for
//! the lifetime of the controller. A requested mode that the display rejects
//! is retried at 60Hz, then replaced by [`FALLBACK_MODE`].

use playhook_domain::display::{DisplayMode, FALLBACK_MODE, ResolutionRequest};
use tokio::sync::Mutex;

use super::{ExecutionOutcome, NO_EXIT_CODE, describe};
use crate::ports::DisplayControl;

#[derive(Debug, Default)]
struct DisplayState {
    original: Option<DisplayMode>,
    /// Set when a restore fell back to [`FALLBACK_MODE`] because nothing
    /// was captured; prevents applying the fallback over and over.
    restore_attempted: bool,
}

pub struct ResolutionController<D> {
    display: D,
    state: Mutex<DisplayState>,
}

/// Modes to try, in order, for a requested mode.
#[must_use]
pub fn fallback_ladder(requested: DisplayMode) -> Vec<DisplayMode> {
    let mut ladder = vec![requested];
    let at_default = requested.at_default_refresh();
    if at_default != requested {
        ladder.push(at_default);
    }
    if !ladder.contains(&FALLBACK_MODE) {
        ladder.push(FALLBACK_MODE);
    }
    ladder
}

impl<D: DisplayControl> ResolutionController<D> {
    pub fn new(display: D) -> Self {
        Self {
            display,
            state: Mutex::new(DisplayState::default()),
        }
    }

    /// Forget a failed restore fallback from a previous session.
    pub async fn begin_session(&self) {
        self.state.lock().await.restore_attempted = false;
    }

    /// Apply a resolution descriptor or `RESTORE`.
    pub async fn change(&self, descriptor: &str) -> ExecutionOutcome {
        match descriptor.parse::<ResolutionRequest>() {
            Ok(ResolutionRequest::Mode(mode)) => self.apply(mode).await,
            Ok(ResolutionRequest::Restore) => self.restore().await,
            Err(err) => ExecutionOutcome::failed(NO_EXIT_CODE, err.to_string()),
        }
    }

    async fn apply(&self, requested: DisplayMode) -> ExecutionOutcome {
        // Held for the whole ladder so concurrent changes do not interleave.
        let mut state = self.state.lock().await;
        if state.original.is_none() {
            match self.display.current_mode().await {
                Ok(current) => {
                    tracing::debug!(%current, "captured display mode");
                    state.original = Some(current);
                }
                Err(err) => tracing::warn!(error = %err, "could not read current display mode"),
            }
        }

        let mut failures = Vec::new();
        for mode in fallback_ladder(requested) {
            match self.display.apply_mode(mode).await {
                Ok(()) if mode == requested => {
                    return ExecutionOutcome::ok(format!("display set to {mode}"));
                }
                Ok(()) => {
                    return ExecutionOutcome::ok(format!(
                        "display set to {mode} after {requested} was rejected"
                    ));
                }
                Err(err) => {
                    tracing::warn!(%mode, error = %err, "display mode rejected");
                    failures.push(format!("{mode}: {}", describe(&err)));
                }
            }
        }
        ExecutionOutcome::failed(
            NO_EXIT_CODE,
            format!("no display mode accepted ({})", failures.join("; ")),
        )
    }

    async fn restore(&self) -> ExecutionOutcome {
        let mut state = self.state.lock().await;
        if let Some(original) = state.original {
            return match self.display.apply_mode(original).await {
                Ok(()) => {
                    state.restore_attempted = false;
                    ExecutionOutcome::ok(format!("display restored to {original}"))
                }
                Err(err) => ExecutionOutcome::failed(
                    NO_EXIT_CODE,
                    format!("could not restore {original}: {}", describe(&err)),
                ),
            };
        }
        if state.restore_attempted {
            return ExecutionOutcome::failed(
                NO_EXIT_CODE,
                "no captured display mode and restore already attempted",
            );
        }
        state.restore_attempted = true;
        match self.display.apply_mode(FALLBACK_MODE).await {
            Ok(()) => ExecutionOutcome::ok(format!(
                "no captured display mode, applied {FALLBACK_MODE}"
            )),
            Err(err) => ExecutionOutcome::failed(
                NO_EXIT_CODE,
                format!("could not apply {FALLBACK_MODE}: {}", describe(&err)),
            ),
        }
    }
}
