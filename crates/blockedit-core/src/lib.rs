//! Block editing for semi-structured configuration text.
//!
//! A file is loaded into a [`Document`] of [`Line`]s that remember their
//! original terminators, so an unedited document dumps back byte-for-byte.
//! Blocks are found with a [`BlockQuery`] built from line [`Predicate`]s and
//! rewritten with one [`Operation`] at a time. Every edit returns a new
//! document; nothing is mutated in place and nothing falls back to the
//! original content when a block cannot be found.
//!
//! ```
//! use blockedit_core::{BlockQuery, Document, Operation, Predicate, editor};
//!
//! let doc = Document::from_text("- name: A\n  run: x\n- name: B\n  run: y\n");
//! let query = BlockQuery::dedent(Predicate::starts_with("- name: A"));
//!
//! let edited = editor::edit(&doc, &query, &Operation::Delete).unwrap();
//! assert_eq!(edited.to_text(), "- name: B\n  run: y\n");
//! ```
//!
//! Recipes ([`Recipe`]) chain several steps and can be loaded from TOML,
//! YAML or JSON files; [`file::edit_file`] runs one against a file on disk
//! and writes the result atomically.

pub mod diff;
pub mod document;
pub mod editor;
pub mod error;
pub mod file;
pub mod line;
pub mod locator;
pub mod operation;
pub mod predicate;
pub mod recipe;

pub use diff::DiffStats;
pub use document::Document;
pub use error::{Error, Result};
pub use file::{FileOutcome, WriteMode};
pub use line::{Line, Terminator};
pub use locator::{Block, BlockQuery, EndRule, find_all_blocks, find_block, find_unique_block};
pub use operation::Operation;
pub use predicate::{LinePredicate, Pattern, Predicate};
pub use recipe::{EditStep, Occurrence, Recipe, RecipeOutcome, StepOutcome, StepReport, Target};
