//! JSON REST handlers for engine settings.

use axum::Json;
use axum::extract::State;

use playhook_app::executors::Dispatch;
use playhook_app::ports::{Notifier, ProcessControl};
use playhook_domain::document::Settings;

use crate::error::ApiError;
use crate::state::AppState;

/// `GET /api/settings`: current engine settings.
pub async fn get<P, E, N>(State(state): State<AppState<P, E, N>>) -> Result<Json<Settings>, ApiError>
where
    P: ProcessControl + Clone + 'static,
    E: Dispatch + 'static,
    N: Notifier + 'static,
{
    let document = state.documents.snapshot().await?;
    Ok(Json(document.settings))
}

/// `PUT /api/settings`: replace the engine settings.
///
/// Missing fields take their default value. Lowering the log cap drops the
/// oldest entries.
pub async fn update<P, E, N>(
    State(state): State<AppState<P, E, N>>,
    Json(settings): Json<Settings>,
) -> Result<Json<Settings>, ApiError>
where
    P: ProcessControl + Clone + 'static,
    E: Dispatch + 'static,
    N: Notifier + 'static,
{
    let updated = settings.clone();
    state
        .documents
        .mutate(move |document| {
            document.settings = settings;
            Ok(())
        })
        .await?;
    tracing::info!(dry_run = updated.dry_run, "settings updated");
    Ok(Json(updated))
}
