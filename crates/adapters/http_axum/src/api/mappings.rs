//! JSON REST handlers for game to profile assignments.

use std::collections::BTreeMap;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use playhook_app::executors::Dispatch;
use playhook_app::ports::{Notifier, ProcessControl};
use playhook_domain::error::NotFoundError;
use playhook_domain::id::{GameId, ProfileId};

use crate::error::{ApiError, parse_id};
use crate::state::AppState;

/// Request body for assigning a profile to a game.
#[derive(Deserialize)]
pub struct AssignRequest {
    pub profile_id: ProfileId,
}

/// One game to profile assignment.
#[derive(Debug, Serialize)]
pub struct MappingResponse {
    pub game_id: GameId,
    pub profile_id: ProfileId,
}

/// `GET /api/mappings`: every assignment, keyed by game.
pub async fn list<P, E, N>(
    State(state): State<AppState<P, E, N>>,
) -> Result<Json<BTreeMap<GameId, ProfileId>>, ApiError>
where
    P: ProcessControl + Clone + 'static,
    E: Dispatch + 'static,
    N: Notifier + 'static,
{
    let document = state.documents.snapshot().await?;
    Ok(Json(document.mappings))
}

/// `PUT /api/mappings/:game_id`: assign a profile, replacing any previous one.
pub async fn assign<P, E, N>(
    State(state): State<AppState<P, E, N>>,
    Path(game_id): Path<String>,
    Json(req): Json<AssignRequest>,
) -> Result<Json<MappingResponse>, ApiError>
where
    P: ProcessControl + Clone + 'static,
    E: Dispatch + 'static,
    N: Notifier + 'static,
{
    let game_id = parse_id(&game_id)?;
    let profile_id = req.profile_id;
    state
        .documents
        .mutate(move |document| document.assign(game_id, profile_id))
        .await?;
    Ok(Json(MappingResponse {
        game_id,
        profile_id,
    }))
}

/// `DELETE /api/mappings/:game_id`: remove a game's assignment.
pub async fn unassign<P, E, N>(
    State(state): State<AppState<P, E, N>>,
    Path(game_id): Path<String>,
) -> Result<StatusCode, ApiError>
where
    P: ProcessControl + Clone + 'static,
    E: Dispatch + 'static,
    N: Notifier + 'static,
{
    let game_id: GameId = parse_id(&game_id)?;
    state
        .documents
        .mutate(move |document| {
            document.unassign(game_id).map(|_| ()).ok_or_else(|| {
                NotFoundError {
                    entity: "Mapping",
                    id: game_id.to_string(),
                }
                .into()
            })
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
