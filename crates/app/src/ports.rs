//! Port definitions: traits that adapters implement.
//!
//! Ports are the boundaries between the automation engine and the host it
//! drives. They are defined here (in `app`) so that both the engine and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod audio;
pub mod command;
pub mod display;
pub mod notifier;
pub mod process;
pub mod recorder;
pub mod store;

pub use audio::AudioControl;
pub use command::{CommandOutput, CommandRunner, Invocation};
pub use display::DisplayControl;
pub use notifier::Notifier;
pub use process::{ProcessControl, ProcessInfo};
pub use recorder::ActionRecorder;
pub use store::DocumentStore;
