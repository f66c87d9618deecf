//! Line diffs between two versions of a document

use crate::document::Document;
use similar::{ChangeTag, TextDiff};

/// Count of inserted and deleted lines between two documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffStats {
    pub inserted: usize,
    pub deleted: usize,
}

impl DiffStats {
    pub fn compute(old: &Document, new: &Document) -> Self {
        let old_text = old.to_text();
        let new_text = new.to_text();
        let diff = TextDiff::from_lines(&old_text, &new_text);

        let mut stats = Self::default();
        for change in diff.iter_all_changes() {
            match change.tag() {
                ChangeTag::Insert => stats.inserted += 1,
                ChangeTag::Delete => stats.deleted += 1,
                ChangeTag::Equal => {}
            }
        }
        stats
    }

    pub fn is_empty(&self) -> bool {
        self.inserted == 0 && self.deleted == 0
    }
}

/// Render a unified diff with three lines of context, labelled `a/<label>`
/// and `b/<label>`. Returns an empty string when nothing changed.
pub fn unified(old: &Document, new: &Document, label: &str) -> String {
    if old == new {
        return String::new();
    }

    let old_text = old.to_text();
    let new_text = new.to_text();
    let diff = TextDiff::from_lines(&old_text, &new_text);
    diff.unified_diff()
        .context_radius(3)
        .header(&format!("a/{label}"), &format!("b/{label}"))
        .to_string()
}
