//! JSON REST handlers for profiles.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use playhook_app::executors::Dispatch;
use playhook_app::ports::{Notifier, ProcessControl};
use playhook_domain::action::Action;
use playhook_domain::error::NotFoundError;
use playhook_domain::id::ProfileId;
use playhook_domain::profile::Profile;

use crate::error::{ApiError, parse_id};
use crate::state::AppState;

/// Request body for creating or replacing a profile.
#[derive(Deserialize)]
pub struct ProfileRequest {
    pub name: String,
    #[serde(default)]
    pub actions: Vec<Action>,
}

impl ProfileRequest {
    fn into_profile(self, id: Option<ProfileId>) -> Result<Profile, ApiError> {
        let mut builder = Profile::builder().name(self.name);
        if let Some(id) = id {
            builder = builder.id(id);
        }
        for action in self.actions {
            builder = builder.action(action);
        }
        Ok(builder.build()?)
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Profile>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    NoContent,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

fn not_found(id: ProfileId) -> ApiError {
    ApiError::from(playhook_domain::error::PlayhookError::from(NotFoundError {
        entity: "Profile",
        id: id.to_string(),
    }))
}

/// `GET /api/profiles`: list all profiles.
pub async fn list<P, E, N>(
    State(state): State<AppState<P, E, N>>,
) -> Result<Json<Vec<Profile>>, ApiError>
where
    P: ProcessControl + Clone + 'static,
    E: Dispatch + 'static,
    N: Notifier + 'static,
{
    let document = state.documents.snapshot().await?;
    Ok(Json(document.profiles))
}

/// `GET /api/profiles/:id`: get profile by ID.
pub async fn get<P, E, N>(
    State(state): State<AppState<P, E, N>>,
    Path(id): Path<String>,
) -> Result<Json<Profile>, ApiError>
where
    P: ProcessControl + Clone + 'static,
    E: Dispatch + 'static,
    N: Notifier + 'static,
{
    let profile_id = parse_id(&id)?;
    let document = state.documents.snapshot().await?;
    let profile = document
        .profile(profile_id)
        .cloned()
        .ok_or_else(|| not_found(profile_id))?;
    Ok(Json(profile))
}

/// `POST /api/profiles`: create a new profile.
pub async fn create<P, E, N>(
    State(state): State<AppState<P, E, N>>,
    Json(req): Json<ProfileRequest>,
) -> Result<CreateResponse, ApiError>
where
    P: ProcessControl + Clone + 'static,
    E: Dispatch + 'static,
    N: Notifier + 'static,
{
    let profile = req.into_profile(None)?;
    let created = profile.clone();
    state
        .documents
        .mutate(move |document| document.upsert_profile(profile))
        .await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `PUT /api/profiles/:id`: replace an existing profile.
pub async fn update<P, E, N>(
    State(state): State<AppState<P, E, N>>,
    Path(id): Path<String>,
    Json(req): Json<ProfileRequest>,
) -> Result<Json<Profile>, ApiError>
where
    P: ProcessControl + Clone + 'static,
    E: Dispatch + 'static,
    N: Notifier + 'static,
{
    let profile_id = parse_id(&id)?;
    let profile = req.into_profile(Some(profile_id))?;
    let updated = profile.clone();
    state
        .documents
        .mutate(move |document| {
            if document.profile(profile_id).is_none() {
                return Err(NotFoundError {
                    entity: "Profile",
                    id: profile_id.to_string(),
                }
                .into());
            }
            document.upsert_profile(profile)
        })
        .await?;
    Ok(Json(updated))
}

/// `DELETE /api/profiles/:id`: delete a profile and its mappings.
pub async fn delete<P, E, N>(
    State(state): State<AppState<P, E, N>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    P: ProcessControl + Clone + 'static,
    E: Dispatch + 'static,
    N: Notifier + 'static,
{
    let profile_id = parse_id(&id)?;
    state
        .documents
        .mutate(move |document| document.remove_profile(profile_id))
        .await?;
    Ok(DeleteResponse::NoContent)
}
