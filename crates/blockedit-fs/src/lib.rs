//! Filesystem collaborator for blockedit
//!
//! Provides normalized paths, byte-exact reads, atomic locked writes and
//! format-agnostic loading of edit recipes.

pub mod config;
pub mod error;
pub mod io;
pub mod path;

pub use config::{ConfigStore, Format};
pub use error::{Error, Result};
pub use path::NormalizedPath;
