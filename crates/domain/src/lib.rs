//! # playhook-domain
//!
//! Pure domain model for the playhook game-session automation engine.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Actions** (launch/close a program, run a script or command,
//!   wait, change volume or display resolution) and the **Phase** they run in
//! - Define **Conditions** (guards evaluated before an action runs)
//! - Define **Profiles** (named ordered lists of actions assigned to a game)
//! - Define the persisted **Document** (action library, profiles, mappings,
//!   settings, action log) and its schema defaults
//! - Define user-facing **Notifications** raised while automation runs
//! - Define descriptors parsed at execution time (display modes, volume levels)
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod action;
pub mod condition;
pub mod display;
pub mod document;
pub mod log;
pub mod notification;
pub mod profile;
pub mod volume;
