//! Lifecycle service: entry points called by the host at the three game
//! lifecycle moments.
//!
//! Each hook resolves the game's profile from a document snapshot and runs
//! the matching phase. Mirror tracking lives in one [`MirrorTracker`] per
//! game session: created before the game starts, reused after it started,
//! consumed after it stopped.

use std::collections::HashMap;

use playhook_domain::action::Phase;
use playhook_domain::error::PlayhookError;
use playhook_domain::id::GameId;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use crate::executors::{Dispatch, ExecutionContext};
use crate::mirror_tracker::MirrorTracker;
use crate::ports::{Notifier, ProcessControl};
use crate::profile_resolver::resolve;
use crate::scheduler::{PhaseScheduler, RunReport};
use crate::services::document_service::DocumentHandle;

pub struct LifecycleService<P, E, N> {
    documents: DocumentHandle,
    scheduler: PhaseScheduler<P, E, DocumentHandle, N>,
    sessions: Mutex<HashMap<GameId, MirrorTracker>>,
    shutdown: CancellationToken,
}

impl<P, E, N> LifecycleService<P, E, N>
where
    P: ProcessControl + Clone,
    E: Dispatch,
    N: Notifier,
{
    /// Create a service whose runs are logged to `documents`.
    pub fn new(documents: DocumentHandle, processes: P, dispatcher: E, notifier: N) -> Self {
        let scheduler = PhaseScheduler::new(processes, dispatcher, documents.clone(), notifier);
        Self {
            documents,
            scheduler,
            sessions: Mutex::new(HashMap::new()),
            shutdown: CancellationToken::new(),
        }
    }

    /// The game is about to start.
    ///
    /// # Errors
    ///
    /// Returns [`PlayhookError::Storage`] if the document cannot be read.
    /// Action failures are reported in the [`RunReport`], never as errors.
    pub async fn on_before_start(&self, game: GameId) -> Result<RunReport, PlayhookError> {
        self.run_phase(game, Phase::BeforeStart).await
    }

    /// The game has started.
    ///
    /// # Errors
    ///
    /// Returns [`PlayhookError::Storage`] if the document cannot be read.
    pub async fn on_after_start(&self, game: GameId) -> Result<RunReport, PlayhookError> {
        self.run_phase(game, Phase::AfterStart).await
    }

    /// The game has stopped. Ends the game's session.
    ///
    /// # Errors
    ///
    /// Returns [`PlayhookError::Storage`] if the document cannot be read.
    pub async fn on_after_stop(&self, game: GameId) -> Result<RunReport, PlayhookError> {
        self.run_phase(game, Phase::AfterStop).await
    }

    /// Games whose session has started but not yet stopped.
    pub async fn active_sessions(&self) -> Vec<GameId> {
        self.sessions.lock().await.keys().copied().collect()
    }

    /// Abort running commands and waits, and stop every phase run in progress.
    pub fn cancel_running(&self) {
        self.shutdown.cancel();
    }

    #[tracing::instrument(skip(self), fields(%game, %phase))]
    async fn run_phase(&self, game: GameId, phase: Phase) -> Result<RunReport, PlayhookError> {
        let document = self.documents.snapshot().await?;
        let Some(profile) = resolve(&document, game) else {
            tracing::debug!("no profile assigned");
            if phase != Phase::AfterStart {
                self.sessions.lock().await.remove(&game);
            }
            return Ok(RunReport::empty(phase, Some(game)));
        };

        let mut tracker = match phase {
            Phase::BeforeStart => MirrorTracker::new(),
            Phase::AfterStart | Phase::AfterStop => self
                .sessions
                .lock()
                .await
                .remove(&game)
                .unwrap_or_default(),
        };
        let ctx = ExecutionContext::new(document.settings.clone(), self.shutdown.child_token());

        let report = self
            .scheduler
            .run(Some(profile), phase, Some(game), &mut tracker, &ctx)
            .await;

        if phase != Phase::AfterStop {
            self.sessions.lock().await.insert(game, tracker);
        }
        Ok(report)
    }
}
