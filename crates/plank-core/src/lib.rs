//! Plank Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Plank
//! scaffold-plan engine, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            plank-cli (CLI)              │
//! │      (Implements Driving Ports)         │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │           Application Layer             │
//! │            (PlanExecutor)               │
//! │        Applies Plans in Order           │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Application Ports (Traits)        │
//! │  (Filesystem, Generator, TaskRunner)    │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     plank-adapters (Infrastructure)     │
//! │ (LocalFilesystem, CommandGenerator, …)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │  (Operation, ScaffoldPlan, ModelSpec,   │
//! │   TemplateContext) — No I/O             │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use plank_core::{
//!     application::PlanExecutor,
//!     domain::{EnvironmentInputs, Operation, PlanSpec, ScaffoldPlan, TemplateContext},
//! };
//! # fn doc(filesystem: Box<dyn plank_core::application::Filesystem>,
//! #        generator: Box<dyn plank_core::application::Generator>,
//! #        tasks: Box<dyn plank_core::application::TaskRunner>) {
//!
//! // 1. Describe the plan
//! let spec = PlanSpec::new("sample").op(Operation::WriteFile {
//!     path: "README.md".into(),
//!     content: "env: {{ENVIRONMENT}}\n".into(),
//!     force: false,
//! });
//!
//! // 2. Build it against frozen environment inputs
//! let inputs = EnvironmentInputs::new("development", 7);
//! let context = TemplateContext::resolve(&inputs);
//! let plan = ScaffoldPlan::build(&spec, &inputs, &context).unwrap();
//!
//! // 3. Execute through injected adapters
//! let executor = PlanExecutor::new(filesystem, generator, tasks);
//! let report = executor.execute(&plan, std::path::Path::new("./target-app"));
//! assert!(report.is_success());
//! # }
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (execution logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ports::{Filesystem, Generator, TaskRunner},
        ExecError, ExecutionReport, GeneratorError, OpOutcome, OpReport, PlanExecutor,
    };
    pub use crate::domain::{
        Condition, EnvironmentInputs, FieldSpec, FieldType, ModelSpec, OpSpec, Operation,
        Pattern, PlanSpec, PlanState, PlannedOp, RelativePath, ScaffoldPlan, TemplateContext,
    };
    pub use crate::error::{PlankError, PlankResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
