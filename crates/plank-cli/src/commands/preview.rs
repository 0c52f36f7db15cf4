//! `plank preview` — build a plan and show it without touching the target.
//!
//! Previews run plan construction end to end (rendering, validation,
//! condition evaluation) so any build-time error surfaces here too, but no
//! port is ever constructed.

use serde::Serialize;
use tracing::instrument;

use plank_core::domain::{ScaffoldPlan, TemplateContext};
use plank_core::error::PlankError;

use crate::cli::{GlobalArgs, PreviewArgs, PreviewFormat};
use crate::config::AppConfig;
use crate::error::CliResult;
use crate::output::OutputManager;

/// One row of the preview, independent of the render format.
#[derive(Debug, Serialize)]
struct PreviewRow {
    index: usize,
    kind: &'static str,
    description: String,
    skipped: bool,
}

#[instrument(skip_all)]
pub fn execute(
    args: PreviewArgs,
    _global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let inputs = super::resolve_inputs(
        args.environment.as_deref(),
        args.framework_version,
        &config,
    );
    let context = TemplateContext::resolve(&inputs);
    let spec = super::load_plan_spec(args.plan.as_ref(), args.assets.as_deref(), &config)?;
    let plan = ScaffoldPlan::build(&spec, &inputs, &context).map_err(PlankError::from)?;

    let rows: Vec<PreviewRow> = plan
        .ops
        .iter()
        .map(|op| PreviewRow {
            index: op.index,
            kind: op.operation.kind(),
            description: op.operation.describe(),
            skipped: op.skipped,
        })
        .collect();

    match args.format {
        PreviewFormat::Json => {
            // Machine-readable output bypasses the quiet switch.
            println!(
                "{}",
                serde_json::to_string_pretty(&rows)
                    .map_err(|e| PlankError::internal(e.to_string()))?
            );
        }
        PreviewFormat::List => {
            for row in &rows {
                let marker = if row.skipped { " (skipped)" } else { "" };
                output.print(&format!("{}{}", row.description, marker))?;
            }
        }
        PreviewFormat::Table => {
            output.header(&format!(
                "Plan '{}' — environment '{}', {} operations ({} active)",
                plan.name,
                inputs.environment,
                plan.len(),
                plan.active().count(),
            ))?;
            output.print(&format!("{:>3}  {:<18} {:<8} DESCRIPTION", "#", "KIND", "STATE"))?;
            for row in &rows {
                let state = if row.skipped { "skip" } else { "run" };
                output.print(&format!(
                    "{:>3}  {:<18} {:<8} {}",
                    row.index, row.kind, state, row.description
                ))?;
            }
        }
    }

    Ok(())
}
