//! Lines with their original terminators

use serde::{Deserialize, Serialize};
use std::fmt;

/// The newline sequence that ended a line in the source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Terminator {
    /// Unix-style `\n`.
    #[default]
    Lf,
    /// Windows-style `\r\n`.
    CrLf,
    /// The final line of a file that does not end with a newline.
    None,
}

impl Terminator {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
            Self::None => "",
        }
    }

    pub fn is_none(self) -> bool {
        self == Self::None
    }
}

/// A single line of a document.
///
/// The text never contains the terminator. Lines are immutable; edits
/// produce new lines via the `with_*` helpers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Line {
    text: String,
    terminator: Terminator,
}

impl Line {
    pub fn new(text: impl Into<String>, terminator: Terminator) -> Self {
        Self {
            text: text.into(),
            terminator,
        }
    }

    /// The raw text without its terminator.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn terminator(&self) -> Terminator {
        self.terminator
    }

    /// The run of spaces and tabs at the start of the line.
    pub fn leading_whitespace(&self) -> &str {
        let end = self
            .text
            .find(|c: char| c != ' ' && c != '\t')
            .unwrap_or(self.text.len());
        &self.text[..end]
    }

    /// Leading-whitespace width in characters. Tabs count as one.
    pub fn indent(&self) -> usize {
        self.leading_whitespace().len()
    }

    /// The text after the leading whitespace.
    pub fn content(&self) -> &str {
        &self.text[self.leading_whitespace().len()..]
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Same terminator, different text.
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self::new(text, self.terminator)
    }

    /// Same text, different terminator.
    pub fn with_terminator(&self, terminator: Terminator) -> Self {
        Self::new(self.text.clone(), terminator)
    }

    /// Total byte length including the terminator.
    pub fn byte_len(&self) -> usize {
        self.text.len() + self.terminator.as_str().len()
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}
