//! Running recipes against files on disk

use crate::diff::{self, DiffStats};
use crate::document::Document;
use crate::error::Result;
use crate::recipe::{Recipe, StepReport};
use blockedit_fs::{NormalizedPath, io};

/// Whether an edit is written back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WriteMode {
    #[default]
    Apply,
    /// Compute the result and diff, touch nothing.
    DryRun,
}

/// Result of running a recipe against one file.
#[derive(Debug, Clone)]
pub struct FileOutcome {
    pub path: NormalizedPath,
    pub steps: Vec<StepReport>,
    pub stats: DiffStats,
    /// Unified diff of the change; empty when nothing changed.
    pub diff: String,
    pub written: bool,
}

impl FileOutcome {
    pub fn changed(&self) -> bool {
        !self.stats.is_empty()
    }
}

/// Read and decode a file into a document.
pub fn load_file(path: &NormalizedPath) -> Result<Document> {
    let bytes = io::read_bytes(path)?;
    Document::load(&bytes)
}

/// Write a document back atomically.
pub fn save_file(path: &NormalizedPath, doc: &Document) -> Result<()> {
    io::write_atomic(path, &doc.dump())?;
    Ok(())
}

/// Apply `recipe` to the file at `path`.
///
/// Nothing is written if any step fails, in dry-run mode, or when the
/// recipe leaves the content unchanged.
pub fn edit_file(path: &NormalizedPath, recipe: &Recipe, mode: WriteMode) -> Result<FileOutcome> {
    let original = load_file(path)?;
    let outcome = recipe.apply(&original)?;

    let stats = DiffStats::compute(&original, &outcome.document);
    let diff = diff::unified(&original, &outcome.document, path.as_str());
    let written = mode == WriteMode::Apply && original != outcome.document;

    if written {
        save_file(path, &outcome.document)?;
        tracing::info!(
            path = %path,
            inserted = stats.inserted,
            deleted = stats.deleted,
            "edited file"
        );
    } else {
        tracing::info!(path = %path, ?mode, changed = !stats.is_empty(), "file left untouched");
    }

    Ok(FileOutcome {
        path: path.clone(),
        steps: outcome.steps,
        stats,
        diff,
        written,
    })
}
