//! Core domain layer for Plank.
//!
//! Pure plan-construction logic: operations, conditions, template context,
//! declared schemas, and the plan builder. No I/O, no async, no external
//! processes — those concerns live behind the application-layer ports and
//! are implemented in `plank-adapters`.

pub mod common;
pub mod context;
pub mod error;
pub mod operation;
pub mod plan;
pub mod schema;

pub use common::RelativePath;
pub use context::{unresolved_variables, EnvironmentInputs, TemplateContext};
pub use error::{DomainError, ErrorCategory};
pub use operation::{Condition, Operation, Pattern};
pub use plan::{OpSpec, PlanSpec, PlanState, PlannedOp, ScaffoldPlan};
pub use schema::{FieldSpec, FieldType, ModelSpec};
