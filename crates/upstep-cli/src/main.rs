//! upstep CLI - schema migration and backup for embedded DuckDB databases

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::Cli;
use commands::{backup, init, plan, status, up};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        cli::Commands::Init(args) => init::execute(args),
        cli::Commands::Up(args) => up::execute(args, &cli.global),
        cli::Commands::Status(args) => status::execute(args, &cli.global),
        cli::Commands::Plan(args) => plan::execute(args, &cli.global),
        cli::Commands::Backup(args) => backup::execute(args, &cli.global),
    }
}
