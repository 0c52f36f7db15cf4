//! Application layer: execution-time errors, driven ports, and the executor.
//!
//! The domain layer builds plans; this layer applies them. All side effects
//! go through the port traits, so the executor itself stays testable with
//! in-memory doubles.

pub mod error;
pub mod executor;
pub mod ports;

pub use error::{ExecError, GeneratorError};
pub use executor::{ExecutionReport, OpOutcome, OpReport, PlanExecutor};
pub use ports::{Filesystem, Generator, TaskRunner};
