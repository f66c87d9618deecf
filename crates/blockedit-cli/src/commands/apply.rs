//! Apply command implementation
//!
//! Runs a recipe file against its target and reports each step.

use std::path::Path;

use colored::Colorize;

use blockedit_core::file::{FileOutcome, edit_file};
use blockedit_core::{Recipe, StepOutcome, WriteMode};

use super::resolve;
use crate::error::{CliError, Result};

/// Run the apply command
pub fn run_apply(cwd: &Path, recipe: &Path, file: Option<&Path>, dry_run: bool) -> Result<()> {
    let recipe_path = resolve(cwd, recipe);
    let recipe = Recipe::load(&recipe_path)?;

    let target = match (file, recipe.target.as_deref()) {
        (Some(file), _) => resolve(cwd, file),
        (None, Some(target)) => resolve(cwd, Path::new(target)),
        (None, None) => {
            return Err(CliError::user(format!(
                "{} has no `target`; pass --file",
                recipe_path
            )));
        }
    };

    let mode = if dry_run {
        WriteMode::DryRun
    } else {
        WriteMode::Apply
    };
    let outcome = edit_file(&target, &recipe, mode)?;
    print_outcome(&outcome, dry_run);
    Ok(())
}

/// Print per-step results, the diff in dry-run mode, and a summary line.
pub(crate) fn print_outcome(outcome: &FileOutcome, dry_run: bool) {
    let heading = if dry_run { "Dry run" } else { "Edit" };
    println!("{} {}", heading.blue().bold(), outcome.path.as_str().yellow());

    for step in &outcome.steps {
        match &step.outcome {
            StepOutcome::Applied { blocks } => {
                let places: Vec<String> = blocks.iter().map(ToString::to_string).collect();
                println!("  {} {} ({})", "+".green(), step.name, places.join(", "));
            }
            StepOutcome::Skipped => {
                println!("  {} {} {}", "=".normal(), step.name, "(skipped)".dimmed());
            }
        }
    }

    if dry_run && outcome.changed() {
        println!();
        for line in outcome.diff.lines() {
            if line.starts_with("+++") || line.starts_with("---") {
                println!("{}", line.bold());
            } else if line.starts_with('+') {
                println!("{}", line.green());
            } else if line.starts_with('-') {
                println!("{}", line.red());
            } else if line.starts_with("@@") {
                println!("{}", line.cyan());
            } else {
                println!("{line}");
            }
        }
    }

    println!();
    if !outcome.changed() {
        println!("{} No changes needed.", "OK".green().bold());
    } else if outcome.written {
        println!(
            "{} {} line(s) added, {} removed.",
            "Written".green().bold(),
            outcome.stats.inserted,
            outcome.stats.deleted
        );
    } else {
        println!(
            "{} {} line(s) would be added, {} removed.",
            "Pending".yellow().bold(),
            outcome.stats.inserted,
            outcome.stats.deleted
        );
    }
}
