//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod games;
#[allow(clippy::missing_errors_doc)]
pub mod log;
#[allow(clippy::missing_errors_doc)]
pub mod mappings;
#[allow(clippy::missing_errors_doc)]
pub mod profiles;
#[allow(clippy::missing_errors_doc)]
pub mod settings;
pub mod sse;

use axum::Router;
use axum::routing::{get, post, put};

use playhook_app::executors::Dispatch;
use playhook_app::ports::{Notifier, ProcessControl};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<P, E, N>() -> Router<AppState<P, E, N>>
where
    P: ProcessControl + Clone + 'static,
    E: Dispatch + 'static,
    N: Notifier + 'static,
{
    Router::new()
        // Lifecycle hooks
        .route(
            "/games/{game_id}/before-start",
            post(games::before_start::<P, E, N>),
        )
        .route(
            "/games/{game_id}/after-start",
            post(games::after_start::<P, E, N>),
        )
        .route(
            "/games/{game_id}/after-stop",
            post(games::after_stop::<P, E, N>),
        )
        .route("/games/sessions", get(games::sessions::<P, E, N>))
        // Profiles
        .route(
            "/profiles",
            get(profiles::list::<P, E, N>).post(profiles::create::<P, E, N>),
        )
        .route(
            "/profiles/{id}",
            get(profiles::get::<P, E, N>)
                .put(profiles::update::<P, E, N>)
                .delete(profiles::delete::<P, E, N>),
        )
        // Mappings
        .route("/mappings", get(mappings::list::<P, E, N>))
        .route(
            "/mappings/{game_id}",
            put(mappings::assign::<P, E, N>).delete(mappings::unassign::<P, E, N>),
        )
        // Settings
        .route(
            "/settings",
            get(settings::get::<P, E, N>).put(settings::update::<P, E, N>),
        )
        // Action log
        .route(
            "/log",
            get(log::list::<P, E, N>).delete(log::clear::<P, E, N>),
        )
        .route("/log/stats", get(log::stats::<P, E, N>))
        // Notifications
        .route("/notifications/stream", get(sse::stream::<P, E, N>))
}
