//! blockedit CLI
//!
//! Locate and rewrite named blocks in configuration files from the shell.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;
    tracing::debug!("Verbose mode enabled");

    let cwd = std::env::current_dir()?;
    match cli.command {
        Commands::Apply {
            recipe,
            file,
            dry_run,
        } => commands::run_apply(&cwd, &recipe, file.as_deref(), dry_run),
        Commands::Find {
            file,
            query,
            all,
            json,
        } => commands::run_find(&cwd, &file, &query, all, json),
        Commands::Edit {
            file,
            query,
            scope,
            dry_run,
            op,
        } => commands::run_edit(
            &cwd,
            &file,
            &query,
            scope.occurrence(),
            op.into_operation()?,
            dry_run,
        ),
    }
}
