//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};

/// upstep - schema migration and backup for embedded DuckDB databases
#[derive(Parser, Debug)]
#[command(name = "upstep")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scaffold a new upstep project
    Init(InitArgs),

    /// Bring the database schema up to the target version
    Up(UpArgs),

    /// Show current version, target, and pending work
    Status(StatusArgs),

    /// List pending migration buckets without executing anything
    Plan(PlanArgs),

    /// Force a routine backup now
    Backup(BackupArgs),
}

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Project directory name to create
    pub name: String,
}

/// Arguments for the up command
#[derive(Args, Debug)]
pub struct UpArgs {
    /// Override the configured target schema version
    #[arg(long)]
    pub target_version: Option<String>,
}

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: StatusFormat,
}

/// Status output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFormat {
    /// Human-readable summary
    Text,
    /// Machine-readable JSON
    Json,
}

/// Arguments for the plan command
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Override the configured target schema version
    #[arg(long)]
    pub target_version: Option<String>,
}

/// Arguments for the backup command
#[derive(Args, Debug)]
pub struct BackupArgs {
    /// List existing backups instead of creating one
    #[arg(short, long)]
    pub list: bool,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
