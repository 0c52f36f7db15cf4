//! `plank apply` — build a plan and execute it against a target directory.

use std::io::Write as _;

use tracing::{debug, info, instrument};

use plank_adapters::{CommandGenerator, LocalFilesystem, ShellTaskRunner};
use plank_core::application::{OpOutcome, PlanExecutor};
use plank_core::domain::{ScaffoldPlan, TemplateContext};
use plank_core::error::PlankError;

use crate::cli::{ApplyArgs, GlobalArgs};
use crate::config::AppConfig;
use crate::error::{CliError, CliResult};
use crate::output::OutputManager;

#[instrument(skip_all, fields(target = %args.target.display()))]
pub fn execute(
    args: ApplyArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    if !args.target.is_dir() {
        return Err(CliError::TargetNotFound {
            path: args.target.clone(),
        });
    }

    // ── Build the plan ────────────────────────────────────────────────────
    let inputs = super::resolve_inputs(
        args.environment.as_deref(),
        args.framework_version,
        &config,
    );
    let context = TemplateContext::resolve(&inputs);
    let spec = super::load_plan_spec(args.plan.as_ref(), args.assets.as_deref(), &config)?;

    debug!(
        plan = %spec.name,
        environment = %inputs.environment,
        framework = inputs.framework_major,
        "building plan"
    );
    let plan = ScaffoldPlan::build(&spec, &inputs, &context).map_err(PlankError::from)?;

    let active = plan.active().count();
    output.header(&format!(
        "Plan '{}': {} operations ({} active) for environment '{}'",
        plan.name,
        plan.len(),
        active,
        inputs.environment,
    ))?;

    // ── Dry run: show, don't touch ────────────────────────────────────────
    if args.dry_run {
        for op in &plan.ops {
            let desc = if op.skipped {
                format!("{} (skipped)", op.operation.describe())
            } else {
                op.operation.describe()
            };
            output.op_line(op.index, plan.len(), &desc)?;
        }
        output.info("Dry run: nothing was applied")?;
        return Ok(());
    }

    // ── Confirm ───────────────────────────────────────────────────────────
    if !args.yes && !global.quiet {
        let prompt = format!(
            "Apply {} operations to '{}'?",
            active,
            args.target.display()
        );
        if !confirm(&prompt)? {
            return Err(CliError::Cancelled);
        }
    }

    // ── Execute ───────────────────────────────────────────────────────────
    let generator_cmd = args
        .generator
        .unwrap_or_else(|| config.defaults.generator_command.clone());
    let executor = PlanExecutor::new(
        Box::new(LocalFilesystem::new()),
        Box::new(CommandGenerator::new(&generator_cmd, &args.target)),
        Box::new(ShellTaskRunner::new(
            &config.defaults.task_command,
            &args.target,
        )),
    );

    info!(generator = %generator_cmd, "executing plan");
    let bar = output.progress_bar(active as u64);
    bar.set_prefix("apply");
    let report = executor.execute(&plan, &args.target);
    bar.set_position(report.completed_count() as u64);
    bar.finish_and_clear();

    // ── Report ────────────────────────────────────────────────────────────
    for op in &report.ops {
        let desc = plan.ops[op.index].operation.describe();
        match &op.outcome {
            OpOutcome::Completed => output.op_line(op.index, plan.len(), &desc)?,
            OpOutcome::Skipped => {
                output.op_line(op.index, plan.len(), &format!("{desc} (skipped)"))?
            }
            OpOutcome::Failed(e) => {
                output.error(&format!("op {} ({}): {desc}: {e}", op.index, op.kind))?
            }
        }
    }

    if report.is_success() {
        output.success(&format!(
            "Applied {} operations ({} skipped) — run {}",
            report.completed_count(),
            report.skipped_count(),
            report.run_id,
        ))?;
        Ok(())
    } else {
        let err = report
            .first_error()
            .cloned()
            .map(PlankError::from)
            .unwrap_or_else(|| PlankError::internal("plan failed without a recorded error"));
        Err(CliError::Core(err))
    }
}

/// Simple y/N prompt on stdin. Anything other than `y`/`yes` declines.
fn confirm(prompt: &str) -> CliResult<bool> {
    print!("{prompt} [y/N] ");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(matches!(
        line.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}
