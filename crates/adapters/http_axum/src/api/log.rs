//! JSON REST handlers for the action log.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use playhook_app::executors::Dispatch;
use playhook_app::ports::{Notifier, ProcessControl};
use playhook_domain::id::ActionId;
use playhook_domain::log::{ActionStats, LogEntry};

use crate::error::ApiError;
use crate::state::AppState;

/// Query parameters for the log endpoint.
#[derive(Deserialize)]
pub struct LogQuery {
    /// Most recent entries to return; everything when absent.
    pub limit: Option<usize>,
}

/// Counters for one action.
#[derive(Debug, Serialize)]
pub struct ActionStatsResponse {
    pub action_id: ActionId,
    #[serde(flatten)]
    pub stats: ActionStats,
}

/// `GET /api/log?limit=N`: log entries, newest first.
pub async fn list<P, E, N>(
    State(state): State<AppState<P, E, N>>,
    Query(query): Query<LogQuery>,
) -> Result<Json<Vec<LogEntry>>, ApiError>
where
    P: ProcessControl + Clone + 'static,
    E: Dispatch + 'static,
    N: Notifier + 'static,
{
    let document = state.documents.snapshot().await?;
    let limit = query.limit.unwrap_or(usize::MAX);
    Ok(Json(document.action_log.recent(limit)))
}

/// `DELETE /api/log`: forget every entry.
pub async fn clear<P, E, N>(State(state): State<AppState<P, E, N>>) -> Result<StatusCode, ApiError>
where
    P: ProcessControl + Clone + 'static,
    E: Dispatch + 'static,
    N: Notifier + 'static,
{
    state
        .documents
        .mutate(|document| {
            document.action_log.clear();
            Ok(())
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/log/stats`: per-action counters, most recently run first.
pub async fn stats<P, E, N>(
    State(state): State<AppState<P, E, N>>,
) -> Result<Json<Vec<ActionStatsResponse>>, ApiError>
where
    P: ProcessControl + Clone + 'static,
    E: Dispatch + 'static,
    N: Notifier + 'static,
{
    let document = state.documents.snapshot().await?;
    let mut stats: Vec<ActionStatsResponse> = document
        .action_log
        .stats()
        .into_iter()
        .map(|(action_id, stats)| ActionStatsResponse { action_id, stats })
        .collect();
    stats.sort_by(|a, b| b.stats.last_run.cmp(&a.stats.last_run));
    Ok(Json(stats))
}
