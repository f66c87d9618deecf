//! Declarative edit recipes
//!
//! A recipe is an ordered list of edit steps, each naming a target and an
//! operation. Steps run against the output of the previous step, so every
//! step re-locates its block. The first failing step aborts the recipe and
//! nothing from it is kept.
//!
//! ```toml
//! target = ".github/workflows/android_build.yml"
//!
//! [[edit]]
//! name = "Add listing step"
//! operation = { insert_before = "- name: List files\n  run: ls -la\n" }
//! [edit.target.block]
//! start = { starts_with = "- name: Set Gradle version" }
//! ```

use crate::document::Document;
use crate::editor;
use crate::error::{Error, Result};
use crate::locator::{Block, BlockQuery, find_all_blocks, find_block, find_unique_block};
use crate::operation::Operation;
use crate::predicate::{LinePredicate, Predicate};
use blockedit_fs::{ConfigStore, NormalizedPath};
use serde::{Deserialize, Serialize};

/// What a step edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    /// The whole document as one block.
    Document,
    /// A located block.
    Block(BlockQuery),
}

/// Which matches a block step edits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Occurrence {
    /// The first match only.
    #[default]
    First,
    /// Exactly one match; more is an error.
    Unique,
    /// Every non-overlapping match.
    All,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditStep {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub target: Target,
    pub operation: Operation,
    #[serde(default)]
    pub occurrence: Occurrence,
    /// Skip the step when any line already satisfies this predicate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_if_present: Option<Predicate>,
}

impl EditStep {
    pub fn new(target: Target, operation: Operation) -> Self {
        Self {
            name: None,
            target,
            operation,
            occurrence: Occurrence::First,
            skip_if_present: None,
        }
    }

    pub fn block(query: BlockQuery, operation: Operation) -> Self {
        Self::new(Target::Block(query), operation)
    }

    pub fn document(operation: Operation) -> Self {
        Self::new(Target::Document, operation)
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn occurrence(mut self, occurrence: Occurrence) -> Self {
        self.occurrence = occurrence;
        self
    }

    pub fn skip_if_present(mut self, predicate: Predicate) -> Self {
        self.skip_if_present = Some(predicate);
        self
    }

    /// Display name: the explicit name, or a summary of the operation.
    pub fn label(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| self.operation.to_string())
    }

    /// Run this step against `doc`.
    pub fn run(&self, doc: &Document) -> Result<(Document, StepOutcome)> {
        if let Some(guard) = &self.skip_if_present {
            if doc.lines().iter().any(|line| guard.matches(line)) {
                tracing::debug!(step = %self.label(), guard = %guard, "skipping step, guard matched");
                return Ok((doc.clone(), StepOutcome::Skipped));
            }
        }

        let blocks = self.locate(doc)?;
        let edited = editor::apply_many(doc, &blocks, &self.operation)?;
        Ok((edited, StepOutcome::Applied { blocks }))
    }

    fn locate(&self, doc: &Document) -> Result<Vec<Block>> {
        let query = match &self.target {
            Target::Document => return Ok(vec![Block::whole(doc)]),
            Target::Block(query) => query,
        };

        match self.occurrence {
            Occurrence::First => find_block(doc, query)
                .map(|block| vec![block])
                .ok_or_else(|| Error::not_found(query.describe())),
            Occurrence::Unique => find_unique_block(doc, query).map(|block| vec![block]),
            Occurrence::All => {
                let blocks = find_all_blocks(doc, query);
                if blocks.is_empty() {
                    Err(Error::not_found(query.describe()))
                } else {
                    Ok(blocks)
                }
            }
        }
    }
}

/// What happened to one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The operation ran on these blocks (indices as located before the edit).
    Applied { blocks: Vec<Block> },
    /// The `skip_if_present` guard matched.
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub name: String,
    pub outcome: StepOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeOutcome {
    pub document: Document,
    pub steps: Vec<StepReport>,
}

impl RecipeOutcome {
    pub fn applied(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| matches!(s.outcome, StepOutcome::Applied { .. }))
            .count()
    }
}

/// An ordered chain of edit steps, optionally bound to a target file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// File the recipe edits, relative to the working directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, rename = "edit", alias = "edits")]
    pub edits: Vec<EditStep>,
}

impl Recipe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a recipe from a TOML, YAML or JSON file.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        let recipe: Self = ConfigStore::new().load(path)?;
        tracing::debug!(path = %path, steps = recipe.edits.len(), "loaded recipe");
        Ok(recipe)
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn step(mut self, step: EditStep) -> Self {
        self.edits.push(step);
        self
    }

    /// Run every step in order against `doc`.
    pub fn apply(&self, doc: &Document) -> Result<RecipeOutcome> {
        let mut current = doc.clone();
        let mut steps = Vec::with_capacity(self.edits.len());

        for (index, step) in self.edits.iter().enumerate() {
            let (next, outcome) = step.run(&current).map_err(|source| Error::Step {
                step: index + 1,
                name: step.label(),
                source: Box::new(source),
            })?;
            current = next;
            steps.push(StepReport {
                name: step.label(),
                outcome,
            });
        }

        Ok(RecipeOutcome {
            document: current,
            steps,
        })
    }
}
