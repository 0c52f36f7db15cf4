//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "plank",
    bin_name = "plank",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{1f6e0} Ordered, idempotent project scaffolding",
    long_about = "Plank applies declarative scaffold plans to a disposable \
                  target directory: file writes, marker edits, generator \
                  calls, and schema tasks, in a fixed order.",
    after_help = "EXAMPLES:\n\
        \x20 plank apply ./sample-app --env test\n\
        \x20 plank apply ./sample-app --plan my-plan.toml --yes\n\
        \x20 plank preview ./sample-app --format json\n\
        \x20 plank completions bash > /usr/share/bash-completion/completions/plank",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Apply a scaffold plan to a target directory.
    #[command(
        visible_alias = "a",
        about = "Apply a scaffold plan",
        after_help = "EXAMPLES:\n\
            \x20 plank apply ./sample-app\n\
            \x20 plank apply ./sample-app --env test --framework-version 7\n\
            \x20 plank apply ./sample-app --plan plan.toml --dry-run"
    )]
    Apply(ApplyArgs),

    /// Show what a plan would do without touching the target.
    #[command(
        visible_alias = "p",
        about = "Preview a scaffold plan",
        after_help = "EXAMPLES:\n\
            \x20 plank preview ./sample-app\n\
            \x20 plank preview ./sample-app --env test --format json"
    )]
    Preview(PreviewArgs),

    /// Initialise a Plank configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 plank init          # default location\n\
            \x20 plank init --force  # overwrite an existing file"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 plank completions bash > ~/.local/share/bash-completion/completions/plank\n\
            \x20 plank completions zsh  > ~/.zfunc/_plank\n\
            \x20 plank completions fish > ~/.config/fish/completions/plank.fish"
    )]
    Completions(CompletionsArgs),

    /// Manage the Plank configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 plank config get defaults.environment\n\
            \x20 plank config set defaults.environment test\n\
            \x20 plank config list"
    )]
    Config(ConfigCommands),
}

// ── apply ─────────────────────────────────────────────────────────────────────

/// Arguments for `plank apply`.
#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Target directory the plan is applied to.
    #[arg(value_name = "TARGET", default_value = ".", help = "Target directory")]
    pub target: PathBuf,

    /// Plan manifest to apply; the built-in sample-app plan when omitted.
    #[arg(
        long = "plan",
        value_name = "FILE",
        help = "Plan manifest (default: built-in sample-app plan)"
    )]
    pub plan: Option<PathBuf>,

    /// Environment name used for conditions and template variables.
    #[arg(
        short = 'e',
        long = "env",
        value_name = "NAME",
        help = "Environment name (overrides PLANK_ENV)"
    )]
    pub environment: Option<String>,

    /// Major version of the target framework.
    #[arg(
        long = "framework-version",
        value_name = "MAJOR",
        help = "Target framework major version"
    )]
    pub framework_version: Option<u32>,

    /// Program used for `run_generator` operations.
    #[arg(
        short = 'g',
        long = "generator",
        value_name = "PROGRAM",
        help = "Generator program (e.g. bin/rails)"
    )]
    pub generator: Option<String>,

    /// Directory containing asset directories referenced by the plan.
    #[arg(long = "assets", value_name = "DIR", help = "Asset directory")]
    pub assets: Option<PathBuf>,

    /// Skip the confirmation prompt.
    #[arg(
        short = 'y',
        long = "yes",
        help = "Skip confirmation and apply immediately"
    )]
    pub yes: bool,

    /// Build and display the plan without executing anything.
    #[arg(long = "dry-run", help = "Show what would be applied without applying")]
    pub dry_run: bool,
}

// ── preview ───────────────────────────────────────────────────────────────────

/// Arguments for `plank preview`.
#[derive(Debug, Args)]
pub struct PreviewArgs {
    /// Target directory (only used to resolve paths in the display).
    #[arg(value_name = "TARGET", default_value = ".", help = "Target directory")]
    pub target: PathBuf,

    /// Plan manifest to preview; the built-in sample-app plan when omitted.
    #[arg(
        long = "plan",
        value_name = "FILE",
        help = "Plan manifest (default: built-in sample-app plan)"
    )]
    pub plan: Option<PathBuf>,

    /// Environment name used for conditions and template variables.
    #[arg(
        short = 'e',
        long = "env",
        value_name = "NAME",
        help = "Environment name (overrides PLANK_ENV)"
    )]
    pub environment: Option<String>,

    /// Major version of the target framework.
    #[arg(
        long = "framework-version",
        value_name = "MAJOR",
        help = "Target framework major version"
    )]
    pub framework_version: Option<u32>,

    /// Directory containing asset directories referenced by the plan.
    #[arg(long = "assets", value_name = "DIR", help = "Asset directory")]
    pub assets: Option<PathBuf>,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: PreviewFormat,
}

/// Output format for the `preview` command.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PreviewFormat {
    /// Human-readable table.
    Table,
    /// One operation per line.
    List,
    /// JSON array.
    Json,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `plank init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `plank completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `plank config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.environment`.
        key: String,
    },
    /// Set a configuration key to a value.
    Set {
        /// Dotted key path.
        key: String,
        /// New value.
        value: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
