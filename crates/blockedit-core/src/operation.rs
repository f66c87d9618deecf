//! The closed set of block edits

use crate::predicate::Pattern;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One edit applied to a located block.
///
/// Payload text is split on its own line boundaries. Payload lines with no
/// indentation of their own inherit the block start line's indentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Splice lines directly before the block.
    InsertBefore(String),
    /// Splice lines directly after the block.
    InsertAfter(String),
    /// Remove the block.
    Delete,
    /// Swap the block's lines for new ones.
    Replace(String),
    /// Unmark the block when every non-blank line is marked, otherwise
    /// mark every non-blank line.
    CommentToggle(String),
    /// Mark every non-blank line that is not already marked.
    Comment(String),
    /// Strip one marker from every marked line.
    Uncomment(String),
    /// Shift the block so its first line has this many columns of indent.
    Reindent(usize),
    /// Replace every occurrence of `find` inside each line of the block.
    Substitute { find: String, replace: String },
    /// Regex form of [`Operation::Substitute`]. `replace` may use `$1` or
    /// `${name}` capture references.
    SubstituteRegex { pattern: Pattern, replace: String },
}

impl Operation {
    /// Short name, as used in recipes.
    pub fn name(&self) -> &'static str {
        match self {
            Self::InsertBefore(_) => "insert_before",
            Self::InsertAfter(_) => "insert_after",
            Self::Delete => "delete",
            Self::Replace(_) => "replace",
            Self::CommentToggle(_) => "comment_toggle",
            Self::Comment(_) => "comment",
            Self::Uncomment(_) => "uncomment",
            Self::Reindent(_) => "reindent",
            Self::Substitute { .. } => "substitute",
            Self::SubstituteRegex { .. } => "substitute_regex",
        }
    }

    /// The comment marker for the comment operations.
    pub fn marker(&self) -> Option<&str> {
        match self {
            Self::CommentToggle(m) | Self::Comment(m) | Self::Uncomment(m) => Some(m),
            _ => None,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reindent(width) => write!(f, "reindent to {width}"),
            Self::Substitute { find, replace } => write!(f, "substitute {find:?} -> {replace:?}"),
            Self::SubstituteRegex { pattern, replace } => {
                write!(f, "substitute /{}/ -> {replace:?}", pattern.as_str())
            }
            other => match other.marker() {
                Some(marker) => write!(f, "{} {marker:?}", other.name()),
                None => write!(f, "{}", other.name()),
            },
        }
    }
}
