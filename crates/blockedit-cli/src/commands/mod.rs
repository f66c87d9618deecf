//! Command implementations

mod apply;
mod edit;
mod find;

pub use apply::run_apply;
pub use edit::run_edit;
pub use find::run_find;

use std::path::Path;

use blockedit_fs::NormalizedPath;

/// Resolve a user-supplied path against the working directory.
fn resolve(cwd: &Path, path: &Path) -> NormalizedPath {
    NormalizedPath::new(path).resolve_against(&NormalizedPath::new(cwd))
}
