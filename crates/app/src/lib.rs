//! # playhook-app
//!
//! Application layer: the automation engine and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `ProcessControl`: enumerate, launch and terminate processes
//!   - `CommandRunner`: run a program to completion
//!   - `DisplayControl`: read and change the display mode
//!   - `AudioControl`: master volume and per-application mute
//!   - `DocumentStore`: load and save the persisted document
//!   - `Notifier` / `ActionRecorder`: notifications and the action log
//! - Run the engine: condition evaluation, mirror tracking, per-kind
//!   executors and the phase scheduler
//! - Define **driving/inbound ports** as services:
//!   - `LifecycleService`: before-start, after-start and after-stop hooks
//!   - `DocumentHandle`: single owner of the in-memory document
//! - Provide **in-process infrastructure** (notification bus) that doesn't need IO
//!
//! ## Dependency rule
//! Depends on `playhook-domain` only (plus `tokio` for tasks, timers and channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod condition_evaluator;
pub mod executors;
pub mod expand;
pub mod mirror_tracker;
pub mod notification_bus;
pub mod ports;
pub mod profile_resolver;
pub mod scheduler;
pub mod services;

#[cfg(test)]
mod testing;
