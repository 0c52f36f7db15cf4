//! Infrastructure adapters for Plank.
//!
//! This crate implements the ports defined in `plank_core::application::ports`.
//! It contains all external dependencies and I/O operations: the real
//! filesystem, the external generator and task-runner processes, TOML plan
//! loading, and the built-in sample-application plan.

pub mod collaborators;
pub mod filesystem;
pub mod plan_loader;
pub mod sample_app;

// Re-export commonly used adapters
pub use collaborators::{CommandGenerator, RecordingGenerator, RecordingTaskRunner, ShellTaskRunner};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use plan_loader::PlanLoader;
