//! # playhook-adapter-host-system
//!
//! Drives the host operating system on behalf of the automation engine.
//!
//! ## Responsibilities
//! - Implement `ProcessControl`: enumerate processes (`/proc` on Linux, `ps`
//!   on other Unix systems, `tasklist` on Windows), launch programs and
//!   force-terminate them (`kill -9` / `taskkill /F`)
//! - Implement `CommandRunner`: run programs with captured output, killing
//!   the child when the caller gives up on it
//! - Implement `DisplayControl` through `xrandr`
//! - Implement `AudioControl` through `pactl`
//! - Keep the parsing of tool output in pure functions ([`parse`])
//!
//! Display and audio control are reported as unsupported on Windows.
//!
//! ## Dependency rule
//! Depends on `playhook-app` (for port traits) and `playhook-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

pub mod audio;
pub mod command;
pub mod display;
pub mod error;
mod exec;
pub mod parse;
pub mod process;

pub use audio::PactlAudio;
pub use command::ShellCommandRunner;
pub use display::XrandrDisplay;
pub use error::HostError;
pub use process::HostProcesses;
