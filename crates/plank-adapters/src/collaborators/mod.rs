//! External collaborator adapters: the code generator and the task runner.
//!
//! Production variants spawn real processes; recording variants capture
//! calls for tests without touching the system.

mod process;
mod recording;

pub use process::{CommandGenerator, ShellTaskRunner};
pub use recording::{RecordingGenerator, RecordingTaskRunner};
