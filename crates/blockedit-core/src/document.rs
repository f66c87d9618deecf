//! The line store: a document as an ordered sequence of lines

use crate::error::{Error, Result};
use crate::line::{Line, Terminator};
use crate::locator::Block;

/// An ordered, owned sequence of lines.
///
/// `Document::load(bytes).dump() == bytes` for any UTF-8 input: every
/// line keeps the exact terminator it was read with, including a missing
/// one on the final line and a stray `\r` that is not part of `\r\n`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    lines: Vec<Line>,
}

impl Document {
    /// Decode raw bytes as UTF-8 and split them into lines.
    pub fn load(bytes: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(bytes).map_err(|e| Error::Decode {
            offset: e.valid_up_to(),
        })?;
        Ok(Self::from_text(text))
    }

    /// Split already-decoded text into lines.
    pub fn from_text(text: &str) -> Self {
        let mut lines = Vec::new();
        let mut rest = text;

        while !rest.is_empty() {
            match rest.find('\n') {
                Some(idx) => {
                    let body = &rest[..idx];
                    let line = match body.strip_suffix('\r') {
                        Some(body) => Line::new(body, Terminator::CrLf),
                        None => Line::new(body, Terminator::Lf),
                    };
                    lines.push(line);
                    rest = &rest[idx + 1..];
                }
                None => {
                    lines.push(Line::new(rest, Terminator::None));
                    break;
                }
            }
        }

        Self { lines }
    }

    pub fn from_lines(lines: Vec<Line>) -> Self {
        Self { lines }
    }

    /// Concatenate every line with its stored terminator.
    pub fn dump(&self) -> Vec<u8> {
        self.to_text().into_bytes()
    }

    pub fn to_text(&self) -> String {
        let capacity = self.lines.iter().map(Line::byte_len).sum();
        let mut out = String::with_capacity(capacity);
        for line in &self.lines {
            out.push_str(line.text());
            out.push_str(line.terminator().as_str());
        }
        out
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<Line> {
        self.lines
    }

    pub fn line(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines covered by `block`, or `None` if it is out of range.
    pub fn slice(&self, block: Block) -> Option<&[Line]> {
        self.lines.get(block.range())
    }

    /// The terminator new lines should use: the first real newline seen,
    /// falling back to `\n`.
    pub fn line_ending(&self) -> Terminator {
        self.lines
            .iter()
            .map(Line::terminator)
            .find(|t| !t.is_none())
            .unwrap_or_default()
    }

    /// Whether the last line ends with a newline. Empty documents count as
    /// terminated.
    pub fn ends_with_newline(&self) -> bool {
        self.lines
            .last()
            .is_none_or(|line| !line.terminator().is_none())
    }
}
