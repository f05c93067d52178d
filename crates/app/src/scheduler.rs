//! Phase scheduler: runs one phase of a profile as a strictly ordered sequence.
//!
//! Actions of the phase run one after another in ascending priority, ties
//! keeping their order in the profile. Each action's condition is checked
//! right before it runs; a failed action never stops the ones after it.
//!
//! The stop phase also undoes the mirror actions of the earlier phases.
//! Their restore steps are merged into the stop phase by priority and run
//! only if the [`MirrorTracker`] says the engine caused the change.

use playhook_domain::action::{Action, Phase};
use playhook_domain::document::Settings;
use playhook_domain::id::{ActionId, GameId};
use playhook_domain::log::LogEntry;
use playhook_domain::notification::Notification;
use playhook_domain::profile::Profile;

use crate::condition_evaluator::ConditionEvaluator;
use crate::executors::{Dispatch, ExecutionContext, ExecutionOutcome};
use crate::mirror_tracker::MirrorTracker;
use crate::ports::{ActionRecorder, Notifier, ProcessControl};

/// One entry of a phase plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step<'a> {
    /// Run an action of the phase itself.
    Run(&'a Action),
    /// Undo a mirror action from an earlier phase.
    Restore { original: &'a Action, restore: Action },
}

impl Step<'_> {
    #[must_use]
    pub fn priority(&self) -> i32 {
        match self {
            Self::Run(action) => action.priority,
            Self::Restore { original, .. } => original.priority,
        }
    }
}

/// Ordered steps for `phase`.
///
/// The sort is stable, so equal priorities keep their order in the profile.
#[must_use]
pub fn plan(profile: &Profile, phase: Phase) -> Vec<Step<'_>> {
    let mut steps: Vec<Step<'_>> = profile
        .actions
        .iter()
        .filter_map(|action| {
            if action.phase == phase {
                Some(Step::Run(action))
            } else if phase == Phase::AfterStop && action.mirror && action.phase.precedes_stop() {
                action
                    .restore_counterpart()
                    .map(|restore| Step::Restore {
                        original: action,
                        restore,
                    })
            } else {
                None
            }
        })
        .collect();
    steps.sort_by_key(Step::priority);
    steps
}

/// What happened during one phase run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub phase: Phase,
    pub game_id: Option<GameId>,
    /// One entry per dispatched (or dry-run) action, in dispatch order.
    pub entries: Vec<LogEntry>,
    /// Actions whose condition did not hold.
    pub skipped: Vec<ActionId>,
}

impl RunReport {
    #[must_use]
    pub fn empty(phase: Phase, game_id: Option<GameId>) -> Self {
        Self {
            phase,
            game_id,
            entries: Vec::new(),
            skipped: Vec::new(),
        }
    }

    #[must_use]
    pub fn failures(&self) -> usize {
        self.entries.iter().filter(|e| !e.success).count()
    }
}

pub struct PhaseScheduler<P, E, R, N> {
    processes: P,
    evaluator: ConditionEvaluator<P>,
    dispatcher: E,
    recorder: R,
    notifier: N,
}

impl<P, E, R, N> PhaseScheduler<P, E, R, N>
where
    P: ProcessControl + Clone,
    E: Dispatch,
    R: ActionRecorder,
    N: Notifier,
{
    pub fn new(processes: P, dispatcher: E, recorder: R, notifier: N) -> Self {
        Self {
            evaluator: ConditionEvaluator::new(processes.clone()),
            processes,
            dispatcher,
            recorder,
            notifier,
        }
    }

    /// Run every eligible action of `phase`.
    ///
    /// A missing profile is not an error: the report is simply empty. The
    /// tracker is cleared when `phase` is [`Phase::BeforeStart`].
    #[tracing::instrument(skip_all, fields(%phase, profile = profile.map(|p| p.name.as_str())))]
    pub async fn run(
        &self,
        profile: Option<&Profile>,
        phase: Phase,
        game: Option<GameId>,
        tracker: &mut MirrorTracker,
        ctx: &ExecutionContext,
    ) -> RunReport {
        let mut report = RunReport::empty(phase, game);
        let Some(profile) = profile else {
            tracing::debug!("no profile, nothing to run");
            return report;
        };
        if phase == Phase::BeforeStart {
            tracker.clear();
            self.dispatcher.begin_session().await;
        }

        for step in plan(profile, phase) {
            if ctx.cancel.is_cancelled() {
                tracing::warn!("phase run cancelled");
                break;
            }
            match step {
                Step::Run(action) => {
                    if !self.evaluator.evaluate(&action.condition).await {
                        tracing::debug!(action = %action.name, condition = %action.condition, "condition not met, skipped");
                        report.skipped.push(action.id);
                        continue;
                    }
                    if action.mirror && phase.precedes_stop() {
                        tracker.observe_before(action, &self.processes).await;
                    }
                    let entry = self.dispatch(action, phase, game, ctx).await;
                    if entry.success && action.mirror {
                        tracker.mark_applied(action.id);
                    }
                    report.entries.push(entry);

                    if phase == Phase::AfterStop
                        && tracker.should_restore(action)
                        && let Some(restore) = action.restore_counterpart()
                    {
                        report.entries.push(self.dispatch(&restore, phase, game, ctx).await);
                    }
                }
                Step::Restore { original, restore } => {
                    let due = tracker.was_applied(original.id)
                        && (!original.kind.is_tracked_mirror() || tracker.should_restore(original));
                    if !due {
                        tracing::debug!(action = %original.name, "nothing to restore");
                        continue;
                    }
                    report.entries.push(self.dispatch(&restore, phase, game, ctx).await);
                }
            }
        }

        tracing::info!(
            dispatched = report.entries.len(),
            skipped = report.skipped.len(),
            failures = report.failures(),
            "phase finished"
        );
        report
    }

    async fn dispatch(
        &self,
        action: &Action,
        phase: Phase,
        game: Option<GameId>,
        ctx: &ExecutionContext,
    ) -> LogEntry {
        let dry_run = ctx.settings.dry_run;
        let outcome = if dry_run {
            tracing::info!(%action, "dry run, not dispatched");
            ExecutionOutcome::ok("dry run: not executed")
        } else {
            tracing::info!(%action, "dispatching");
            self.dispatcher.execute(action, ctx).await
        };
        if !outcome.success {
            tracing::warn!(
                action = %action.name,
                exit_code = outcome.exit_code,
                message = %outcome.message,
                best_effort = outcome.best_effort,
                "action failed"
            );
        }

        self.notify(action, &outcome, &ctx.settings);

        let entry = LogEntry {
            action_id: action.id,
            action_name: action.name.clone(),
            game_id: game,
            phase,
            timestamp: playhook_domain::time::now(),
            success: outcome.success,
            exit_code: outcome.exit_code,
            message: outcome.message,
            dry_run,
        };
        if let Err(err) = self.recorder.record(entry.clone()).await {
            tracing::warn!(error = %err, "could not record action log entry");
        }
        entry
    }

    fn notify(&self, action: &Action, outcome: &ExecutionOutcome, settings: &Settings) {
        if outcome.success {
            if settings.notify_on_success && !settings.dry_run {
                self.notifier.notify(Notification::info(format!(
                    "{}: {}",
                    action.name, outcome.message
                )));
            }
        } else if settings.notify_on_error && !outcome.best_effort {
            self.notifier.notify(Notification::error(format!(
                "{} failed: {}",
                action.name, outcome.message
            )));
        }
    }
}
