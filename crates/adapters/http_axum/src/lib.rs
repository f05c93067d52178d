//! # playhook-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Receive the host launcher's lifecycle hooks
//!   (`POST /api/games/{game_id}/before-start|after-start|after-stop`)
//!   and answer with the phase's run report
//! - Serve a JSON API to manage profiles, game mappings, settings and the
//!   action log
//! - Stream notifications as Server-Sent Events
//! - Map application errors into HTTP status codes
//!
//! ## Dependency rule
//! Depends on `playhook-app` (for port traits and services) and `playhook-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;

#[cfg(test)]
mod test_support;
