//! Edit command implementation
//!
//! Applies one operation to one query without a recipe file.

use std::path::Path;

use blockedit_core::file::edit_file;
use blockedit_core::{EditStep, Occurrence, Operation, Recipe, WriteMode};

use super::apply::print_outcome;
use super::resolve;
use crate::cli::QueryArgs;
use crate::error::Result;

/// Run the edit command
pub fn run_edit(
    cwd: &Path,
    file: &Path,
    query: &QueryArgs,
    occurrence: Occurrence,
    op: Operation,
    dry_run: bool,
) -> Result<()> {
    let target = resolve(cwd, file);
    let recipe = Recipe::new().step(EditStep::block(query.to_query()?, op).occurrence(occurrence));

    let mode = if dry_run {
        WriteMode::DryRun
    } else {
        WriteMode::Apply
    };
    let outcome = edit_file(&target, &recipe, mode)?;
    print_outcome(&outcome, dry_run);
    Ok(())
}
