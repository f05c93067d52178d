//! Lifecycle hook handlers called by the game launcher.

use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;

use playhook_app::executors::Dispatch;
use playhook_app::ports::{Notifier, ProcessControl};
use playhook_app::scheduler::RunReport;
use playhook_domain::action::Phase;
use playhook_domain::id::{ActionId, GameId};
use playhook_domain::log::LogEntry;

use crate::error::{ApiError, parse_id};
use crate::state::AppState;

/// Outcome of one lifecycle phase.
#[derive(Debug, Serialize)]
pub struct RunReportResponse {
    pub phase: Phase,
    pub game_id: Option<GameId>,
    pub entries: Vec<LogEntry>,
    pub skipped: Vec<ActionId>,
    pub failures: usize,
}

impl From<RunReport> for RunReportResponse {
    fn from(report: RunReport) -> Self {
        let failures = report.failures();
        Self {
            phase: report.phase,
            game_id: report.game_id,
            entries: report.entries,
            skipped: report.skipped,
            failures,
        }
    }
}

/// `POST /api/games/:game_id/before-start`: the game is about to start.
pub async fn before_start<P, E, N>(
    State(state): State<AppState<P, E, N>>,
    Path(game_id): Path<String>,
) -> Result<Json<RunReportResponse>, ApiError>
where
    P: ProcessControl + Clone + 'static,
    E: Dispatch + 'static,
    N: Notifier + 'static,
{
    let game = parse_id(&game_id)?;
    let report = state.lifecycle.on_before_start(game).await?;
    Ok(Json(report.into()))
}

/// `POST /api/games/:game_id/after-start`: the game has started.
pub async fn after_start<P, E, N>(
    State(state): State<AppState<P, E, N>>,
    Path(game_id): Path<String>,
) -> Result<Json<RunReportResponse>, ApiError>
where
    P: ProcessControl + Clone + 'static,
    E: Dispatch + 'static,
    N: Notifier + 'static,
{
    let game = parse_id(&game_id)?;
    let report = state.lifecycle.on_after_start(game).await?;
    Ok(Json(report.into()))
}

/// `POST /api/games/:game_id/after-stop`: the game has exited.
pub async fn after_stop<P, E, N>(
    State(state): State<AppState<P, E, N>>,
    Path(game_id): Path<String>,
) -> Result<Json<RunReportResponse>, ApiError>
where
    P: ProcessControl + Clone + 'static,
    E: Dispatch + 'static,
    N: Notifier + 'static,
{
    let game = parse_id(&game_id)?;
    let report = state.lifecycle.on_after_stop(game).await?;
    Ok(Json(report.into()))
}

/// `GET /api/games/sessions`: games started but not yet stopped.
pub async fn sessions<P, E, N>(State(state): State<AppState<P, E, N>>) -> Json<Vec<GameId>>
where
    P: ProcessControl + Clone + 'static,
    E: Dispatch + 'static,
    N: Notifier + 'static,
{
    Json(state.lifecycle.active_sessions().await)
}
