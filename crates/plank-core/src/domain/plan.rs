//! Scaffold plan construction.
//!
//! A [`PlanSpec`] is the static, unrendered description of a plan. Building
//! it against a [`TemplateContext`] and [`EnvironmentInputs`] yields a
//! [`ScaffoldPlan`]: every payload rendered, every pattern validated, every
//! condition evaluated. Construction is a pure function — same inputs, same
//! plan — and performs no I/O.

use serde::{Deserialize, Serialize};

use super::context::{unresolved_variables, EnvironmentInputs, TemplateContext};
use super::error::DomainError;
use super::operation::{Condition, Operation, Pattern};

/// One unrendered plan entry: an operation plus an optional condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpSpec {
    #[serde(flatten)]
    pub operation: Operation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
}

impl OpSpec {
    pub fn new(operation: Operation) -> Self {
        Self {
            operation,
            condition: None,
        }
    }

    pub fn when(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }
}

/// The static definition a plan is built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanSpec {
    pub name: String,
    pub ops: Vec<OpSpec>,
}

impl PlanSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ops: Vec::new(),
        }
    }

    pub fn push(&mut self, spec: OpSpec) {
        self.ops.push(spec);
    }

    pub fn op(mut self, operation: Operation) -> Self {
        self.ops.push(OpSpec::new(operation));
        self
    }

    pub fn op_when(mut self, operation: Operation, condition: Condition) -> Self {
        self.ops.push(OpSpec::new(operation).when(condition));
        self
    }
}

/// A fully rendered operation, ready for the executor.
///
/// `skipped` operations stay in the plan so previews and reports show them;
/// the executor never applies them.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedOp {
    pub index: usize,
    pub operation: Operation,
    pub skipped: bool,
}

/// Ordered, rendered, validated sequence of operations.
///
/// Order is semantically meaningful: later operations may depend on files
/// created by earlier ones.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaffoldPlan {
    pub name: String,
    pub ops: Vec<PlannedOp>,
}

impl ScaffoldPlan {
    /// Build a plan: render every payload through the context, verify no
    /// template variable is left unresolved, validate regex patterns, and
    /// evaluate conditions against the environment inputs.
    pub fn build(
        spec: &PlanSpec,
        inputs: &EnvironmentInputs,
        context: &TemplateContext,
    ) -> Result<Self, DomainError> {
        if spec.ops.is_empty() {
            return Err(DomainError::EmptyPlan {
                name: spec.name.clone(),
            });
        }

        let mut ops = Vec::with_capacity(spec.ops.len());
        for (index, entry) in spec.ops.iter().enumerate() {
            let operation = render_operation(&entry.operation, context);
            check_resolved(index, &operation)?;
            check_patterns(index, &operation)?;

            let skipped = entry
                .condition
                .as_ref()
                .is_some_and(|c| !c.evaluate(inputs));

            ops.push(PlannedOp {
                index,
                operation,
                skipped,
            });
        }

        Ok(Self {
            name: spec.name.clone(),
            ops,
        })
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Operations that will actually run.
    pub fn active(&self) -> impl Iterator<Item = &PlannedOp> {
        self.ops.iter().filter(|op| !op.skipped)
    }
}

/// Lifecycle of the plan as a whole. The executor reports `Running` while a
/// run is in flight and one of the two terminal states afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanState {
    Running,
    Completed,
    FailedAt(usize),
}

// ── rendering helpers ─────────────────────────────────────────────────────────

fn render_operation(op: &Operation, ctx: &TemplateContext) -> Operation {
    match op.clone() {
        Operation::WriteFile {
            path,
            content,
            force,
        } => Operation::WriteFile {
            path,
            content: ctx.render(&content),
            force,
        },
        Operation::AppendFile { path, content } => Operation::AppendFile {
            path,
            content: ctx.render(&content),
        },
        Operation::InjectAfterMarker {
            path,
            marker,
            content,
        } => Operation::InjectAfterMarker {
            path,
            marker,
            content: ctx.render(&content),
        },
        Operation::GsubReplace {
            path,
            pattern,
            replacement,
        } => Operation::GsubReplace {
            path,
            pattern,
            replacement: ctx.render(&replacement),
        },
        Operation::RunGenerator { kind, args } => Operation::RunGenerator {
            kind,
            args: args.into_iter().map(|a| ctx.render(&a)).collect(),
        },
        op @ Operation::CopyDirectory { .. } => op,
        Operation::RunShellTask { command, env } => Operation::RunShellTask {
            command: ctx.render(&command),
            env: env
                .into_iter()
                .map(|(k, v)| (k, ctx.render(&v)))
                .collect(),
        },
    }
}

/// Every payload must be fully resolved once the plan is built.
fn check_resolved(index: usize, op: &Operation) -> Result<(), DomainError> {
    let payloads: Vec<&str> = match op {
        Operation::WriteFile { content, .. }
        | Operation::AppendFile { content, .. }
        | Operation::InjectAfterMarker { content, .. } => vec![content],
        Operation::GsubReplace { replacement, .. } => vec![replacement],
        Operation::RunGenerator { args, .. } => args.iter().map(String::as_str).collect(),
        Operation::CopyDirectory { .. } => vec![],
        Operation::RunShellTask { command, env } => {
            let mut v = vec![command.as_str()];
            v.extend(env.values().map(String::as_str));
            v
        }
    };

    for payload in payloads {
        if let Some(variable) = unresolved_variables(payload).into_iter().next() {
            return Err(DomainError::UnresolvedVariable {
                index,
                kind: op.kind(),
                variable,
            });
        }
    }
    Ok(())
}

fn check_patterns(index: usize, op: &Operation) -> Result<(), DomainError> {
    let pattern = match op {
        Operation::InjectAfterMarker { marker, .. } => marker,
        Operation::GsubReplace { pattern, .. } => pattern,
        _ => return Ok(()),
    };
    if let Pattern::Regex(source) = pattern {
        regex::Regex::new(source).map_err(|e| DomainError::InvalidPattern {
            index,
            kind: op.kind(),
            pattern: source.clone(),
            reason: e.to_string(),
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(environment: &str) -> EnvironmentInputs {
        EnvironmentInputs::new(environment, 7)
    }

    fn ctx(environment: &str) -> TemplateContext {
        TemplateContext::resolve(&inputs(environment))
    }

    fn write(path: &str, content: &str) -> Operation {
        Operation::WriteFile {
            path: path.into(),
            content: content.into(),
            force: false,
        }
    }

    #[test]
    fn build_renders_payloads_once() {
        let spec = PlanSpec::new("sample").op(write("m.rb", "flag: {{OPTIONAL_BELONGS_TO}}"));
        let plan = ScaffoldPlan::build(&spec, &inputs("dev"), &ctx("dev")).unwrap();
        match &plan.ops[0].operation {
            Operation::WriteFile { content, .. } => {
                assert_eq!(content, "flag: optional: true");
            }
            other => panic!("unexpected op: {other:?}"),
        }
    }

    #[test]
    fn build_is_deterministic() {
        let spec = PlanSpec::new("sample")
            .op(write("a.txt", "{{ENVIRONMENT}}"))
            .op_when(
                write("b.txt", "y"),
                Condition::EnvironmentIs("test".into()),
            );
        let a = ScaffoldPlan::build(&spec, &inputs("test"), &ctx("test")).unwrap();
        let b = ScaffoldPlan::build(&spec, &inputs("test"), &ctx("test")).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn unresolved_variable_is_an_error() {
        let spec = PlanSpec::new("sample").op(write("a.txt", "{{NO_SUCH_VAR}}"));
        let err = ScaffoldPlan::build(&spec, &inputs("dev"), &ctx("dev")).unwrap_err();
        assert!(matches!(
            err,
            DomainError::UnresolvedVariable { index: 0, variable, .. } if variable == "NO_SUCH_VAR"
        ));
    }

    #[test]
    fn false_condition_marks_skip_visibly() {
        let spec = PlanSpec::new("sample")
            .op(write("a.txt", "x"))
            .op_when(
                write("b.txt", "y"),
                Condition::EnvironmentIs("test".into()),
            );
        let plan = ScaffoldPlan::build(&spec, &inputs("development"), &ctx("development")).unwrap();
        assert_eq!(plan.len(), 2);
        assert!(!plan.ops[0].skipped);
        assert!(plan.ops[1].skipped);
        assert_eq!(plan.active().count(), 1);
    }

    #[test]
    fn true_condition_keeps_operation_active() {
        let spec = PlanSpec::new("sample").op_when(
            write("b.txt", "y"),
            Condition::EnvironmentIsNot("test".into()),
        );
        let plan = ScaffoldPlan::build(&spec, &inputs("production"), &ctx("production")).unwrap();
        assert!(!plan.ops[0].skipped);
    }

    #[test]
    fn empty_plan_rejected() {
        let spec = PlanSpec::new("empty");
        assert!(matches!(
            ScaffoldPlan::build(&spec, &inputs("dev"), &ctx("dev")),
            Err(DomainError::EmptyPlan { .. })
        ));
    }

    #[test]
    fn invalid_regex_rejected_at_build_time() {
        let spec = PlanSpec::new("sample").op(Operation::GsubReplace {
            path: "f.rb".into(),
            pattern: Pattern::Regex("(unclosed".into()),
            replacement: "x".into(),
        });
        assert!(matches!(
            ScaffoldPlan::build(&spec, &inputs("dev"), &ctx("dev")),
            Err(DomainError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn shell_task_env_values_are_rendered() {
        let spec = PlanSpec::new("sample").op(Operation::RunShellTask {
            command: "db:migrate".into(),
            env: [("APP_ENV".to_string(), "{{ENVIRONMENT}}".to_string())]
                .into_iter()
                .collect(),
        });
        let plan = ScaffoldPlan::build(&spec, &inputs("test"), &ctx("test")).unwrap();
        match &plan.ops[0].operation {
            Operation::RunShellTask { env, .. } => {
                assert_eq!(env.get("APP_ENV").map(String::as_str), Some("test"));
            }
            other => panic!("unexpected op: {other:?}"),
        }
    }
}
