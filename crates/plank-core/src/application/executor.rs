//! Plan executor — applies operations in order against a target directory.
//!
//! The executor owns the three driven ports and walks the plan strictly in
//! sequence. It is deliberately not transactional: the target is
//! disposable, so the first failure halts the run and everything already
//! applied stays on disk. No rollback, no retry.

use std::path::Path;

use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::application::error::ExecError;
use crate::application::ports::{Filesystem, Generator, TaskRunner};
use crate::domain::{Operation, Pattern, PlanState, ScaffoldPlan};

/// Outcome of one operation in a run.
#[derive(Debug, Clone, PartialEq)]
pub enum OpOutcome {
    Completed,
    /// Condition evaluated false at plan-construction time.
    Skipped,
    Failed(ExecError),
}

/// Per-operation entry in the execution report.
#[derive(Debug, Clone, PartialEq)]
pub struct OpReport {
    pub index: usize,
    pub kind: &'static str,
    pub outcome: OpOutcome,
}

/// Result of executing a plan.
///
/// Contains one entry per operation reached during the run; operations
/// after the first failure are never reached and have no entry.
/// Created per run, discarded after reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionReport {
    pub run_id: Uuid,
    pub plan_name: String,
    pub ops: Vec<OpReport>,
    pub state: PlanState,
}

impl ExecutionReport {
    /// Index of the first failing operation, if any.
    pub fn failed_at(&self) -> Option<usize> {
        match self.state {
            PlanState::FailedAt(index) => Some(index),
            _ => None,
        }
    }

    /// The error that halted the run, if any.
    pub fn first_error(&self) -> Option<&ExecError> {
        self.ops.iter().find_map(|op| match &op.outcome {
            OpOutcome::Failed(e) => Some(e),
            _ => None,
        })
    }

    pub fn is_success(&self) -> bool {
        self.state == PlanState::Completed
    }

    pub fn completed_count(&self) -> usize {
        self.count(|o| matches!(o, OpOutcome::Completed))
    }

    pub fn skipped_count(&self) -> usize {
        self.count(|o| matches!(o, OpOutcome::Skipped))
    }

    fn count(&self, pred: impl Fn(&OpOutcome) -> bool) -> usize {
        self.ops.iter().filter(|op| pred(&op.outcome)).count()
    }
}

/// Applies a [`ScaffoldPlan`] through the driven ports.
pub struct PlanExecutor {
    filesystem: Box<dyn Filesystem>,
    generator: Box<dyn Generator>,
    tasks: Box<dyn TaskRunner>,
}

impl PlanExecutor {
    pub fn new(
        filesystem: Box<dyn Filesystem>,
        generator: Box<dyn Generator>,
        tasks: Box<dyn TaskRunner>,
    ) -> Self {
        Self {
            filesystem,
            generator,
            tasks,
        }
    }

    /// Execute the plan against `target_root`.
    ///
    /// Single-threaded and sequential; calls into external processes block
    /// until they exit. Returns a report rather than a `Result` so callers
    /// see skipped and completed operations alongside the failure.
    #[instrument(skip_all, fields(plan = %plan.name, target = %target_root.display()))]
    pub fn execute(&self, plan: &ScaffoldPlan, target_root: &Path) -> ExecutionReport {
        let run_id = Uuid::new_v4();
        info!(%run_id, ops = plan.len(), "plan execution started");

        let mut ops = Vec::with_capacity(plan.len());
        let mut state = PlanState::Running;

        for planned in &plan.ops {
            if planned.skipped {
                debug!(index = planned.index, kind = planned.operation.kind(), "skipped");
                ops.push(OpReport {
                    index: planned.index,
                    kind: planned.operation.kind(),
                    outcome: OpOutcome::Skipped,
                });
                continue;
            }

            debug!(index = planned.index, op = %planned.operation.describe(), "applying");
            match self.apply(&planned.operation, target_root) {
                Ok(()) => ops.push(OpReport {
                    index: planned.index,
                    kind: planned.operation.kind(),
                    outcome: OpOutcome::Completed,
                }),
                Err(e) => {
                    warn!(index = planned.index, error = %e, "operation failed, halting plan");
                    ops.push(OpReport {
                        index: planned.index,
                        kind: planned.operation.kind(),
                        outcome: OpOutcome::Failed(e),
                    });
                    state = PlanState::FailedAt(planned.index);
                    break;
                }
            }
        }

        if state == PlanState::Running {
            state = PlanState::Completed;
            info!(%run_id, "plan execution completed");
        }

        ExecutionReport {
            run_id,
            plan_name: plan.name.clone(),
            ops,
            state,
        }
    }

    fn apply(&self, op: &Operation, root: &Path) -> Result<(), ExecError> {
        match op {
            Operation::WriteFile {
                path,
                content,
                force,
            } => {
                let full = path.resolved_in(root);
                if !force && self.filesystem.exists(&full) {
                    let existing = self.filesystem.read_to_string(&full)?;
                    if existing == *content {
                        // Identical content: re-running the plan is quiet.
                        return Ok(());
                    }
                    return Err(ExecError::AlreadyExists { path: full });
                }
                if let Some(parent) = full.parent() {
                    self.filesystem.create_dir_all(parent)?;
                }
                self.filesystem.write_file(&full, content)
            }

            Operation::AppendFile { path, content } => {
                let full = path.resolved_in(root);
                if !self.filesystem.exists(&full) {
                    return Err(ExecError::NotFound { path: full });
                }
                self.filesystem.append_file(&full, content)
            }

            Operation::InjectAfterMarker {
                path,
                marker,
                content,
            } => {
                let full = path.resolved_in(root);
                let text = self.filesystem.read_to_string(&full)?;
                let (_, end) = find_first(marker, &text)?.ok_or_else(|| {
                    ExecError::MarkerNotFound {
                        path: full.clone(),
                        pattern: marker.to_string(),
                    }
                })?;
                let mut updated = String::with_capacity(text.len() + content.len());
                updated.push_str(&text[..end]);
                updated.push_str(content);
                updated.push_str(&text[end..]);
                self.filesystem.write_file(&full, &updated)
            }

            Operation::GsubReplace {
                path,
                pattern,
                replacement,
            } => {
                let full = path.resolved_in(root);
                let text = self.filesystem.read_to_string(&full)?;
                let (start, end) = find_first(pattern, &text)?.ok_or_else(|| {
                    ExecError::MarkerNotFound {
                        path: full.clone(),
                        pattern: pattern.to_string(),
                    }
                })?;
                let mut updated = String::with_capacity(text.len() + replacement.len());
                updated.push_str(&text[..start]);
                updated.push_str(replacement);
                updated.push_str(&text[end..]);
                self.filesystem.write_file(&full, &updated)
            }

            Operation::RunGenerator { kind, args } => {
                self.generator.generate(kind, args).map_err(ExecError::from)
            }

            Operation::CopyDirectory { source, dest } => {
                let dest = dest.resolved_in(root);
                self.filesystem.copy_dir(source, &dest)
            }

            Operation::RunShellTask { command, env } => {
                let code = self.tasks.run_task(command, env)?;
                if code == 0 {
                    Ok(())
                } else {
                    Err(ExecError::ShellTask {
                        command: command.clone(),
                        code,
                    })
                }
            }
        }
    }
}

/// Byte range of the first match of `pattern` in `text`.
fn find_first(pattern: &Pattern, text: &str) -> Result<Option<(usize, usize)>, ExecError> {
    match pattern {
        Pattern::Literal(needle) => Ok(text.find(needle).map(|i| (i, i + needle.len()))),
        Pattern::Regex(source) => {
            // Validated at plan-construction time; failure here is a bug.
            let re = regex::Regex::new(source).map_err(|e| ExecError::InvalidPattern {
                pattern: source.clone(),
                reason: e.to_string(),
            })?;
            Ok(re.find(text).map(|m| (m.start(), m.end())))
        }
    }
}
