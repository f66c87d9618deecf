//! Block location
//!
//! A block opens at the first line matching the query's start predicate and
//! closes according to its [`EndRule`]. Location never mutates the document
//! and never guesses: a start without a matching end is reported as not
//! found instead of running to the end of the file.

use crate::document::Document;
use crate::error::{Error, Result};
use crate::predicate::{LinePredicate, Predicate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// A half-open range `[start, end)` of line indices.
///
/// Blocks are transient views: any edit invalidates them, so they are
/// re-located before every operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Block {
    pub start: usize,
    pub end: usize,
}

impl Block {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// The whole document as one block.
    pub fn whole(doc: &Document) -> Self {
        Self::new(0, doc.len())
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Index of the last line in the block.
    pub fn last(&self) -> Option<usize> {
        (!self.is_empty()).then(|| self.end - 1)
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn contains(&self, index: usize) -> bool {
        self.range().contains(&index)
    }
}

impl fmt::Display for Block {
    /// 1-based inclusive line numbers, the way editors show them.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.last() {
            Some(last) if last == self.start => write!(f, "line {}", self.start + 1),
            Some(last) => write!(f, "lines {}-{}", self.start + 1, last + 1),
            None => write!(f, "empty at line {}", self.start + 1),
        }
    }
}

fn default_inclusive() -> bool {
    true
}

fn default_end<Q>() -> EndRule<Q> {
    EndRule::default()
}

/// How a block ends once its start line is found.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndRule<Q = Predicate> {
    /// Ends before the first later non-blank line indented no deeper than
    /// the start line. Blank lines are always interior.
    Dedent {
        /// Let the end of the document close the block.
        #[serde(default)]
        close_at_eof: bool,
    },
    /// Ends at the first later line matching `predicate`.
    Until {
        predicate: Q,
        /// Whether the terminating line belongs to the block.
        #[serde(default = "default_inclusive")]
        inclusive: bool,
    },
}

impl<Q> Default for EndRule<Q> {
    fn default() -> Self {
        Self::Dedent {
            close_at_eof: false,
        }
    }
}

/// Start predicate plus end rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockQuery<P = Predicate, Q = Predicate> {
    pub start: P,
    #[serde(default = "default_end")]
    pub end: EndRule<Q>,
}

impl<P> BlockQuery<P, Predicate> {
    /// Indentation-bounded block starting at the first `start` match.
    pub fn dedent(start: P) -> Self {
        Self {
            start,
            end: EndRule::default(),
        }
    }
}

impl<P, Q> BlockQuery<P, Q> {
    /// Block from the first `start` match through the next `end` match.
    pub fn until(start: P, end: Q) -> Self {
        Self {
            start,
            end: EndRule::Until {
                predicate: end,
                inclusive: true,
            },
        }
    }

    /// Leave the terminating line out of the block. No effect on dedent rules.
    pub fn exclusive(mut self) -> Self {
        if let EndRule::Until { inclusive, .. } = &mut self.end {
            *inclusive = false;
        }
        self
    }

    /// Let end-of-document close a dedent block. No effect on `until` rules.
    pub fn close_at_eof(mut self) -> Self {
        if let EndRule::Dedent { close_at_eof } = &mut self.end {
            *close_at_eof = true;
        }
        self
    }
}

impl<P: LinePredicate, Q: LinePredicate> BlockQuery<P, Q> {
    pub fn describe(&self) -> String {
        match &self.end {
            EndRule::Dedent { .. } => format!("block at {} (indentation-bounded)", self.start.describe()),
            EndRule::Until { predicate, .. } => {
                format!("block from {} until {}", self.start.describe(), predicate.describe())
            }
        }
    }
}

/// Find the first block matching `query`.
///
/// Returns `None` when no line matches the start predicate, or when the
/// first start match has no valid end before the end of the document.
pub fn find_block<P, Q>(doc: &Document, query: &BlockQuery<P, Q>) -> Option<Block>
where
    P: LinePredicate,
    Q: LinePredicate,
{
    let block = find_from(doc, query, 0);
    tracing::debug!(query = %query.describe(), ?block, "located block");
    block
}

/// Find every non-overlapping block matching `query`, in document order.
pub fn find_all_blocks<P, Q>(doc: &Document, query: &BlockQuery<P, Q>) -> Vec<Block>
where
    P: LinePredicate,
    Q: LinePredicate,
{
    let mut blocks = Vec::new();
    let mut from = 0;
    while let Some(block) = find_from(doc, query, from) {
        from = block.end;
        blocks.push(block);
    }
    tracing::debug!(query = %query.describe(), count = blocks.len(), "located blocks");
    blocks
}

/// Find exactly one block, failing when there are none or several.
pub fn find_unique_block<P, Q>(doc: &Document, query: &BlockQuery<P, Q>) -> Result<Block>
where
    P: LinePredicate,
    Q: LinePredicate,
{
    let blocks = find_all_blocks(doc, query);
    match blocks.as_slice() {
        [] => Err(Error::not_found(query.describe())),
        [block] => Ok(*block),
        _ => Err(Error::AmbiguousBlock {
            query: query.describe(),
            count: blocks.len(),
        }),
    }
}

fn find_from<P, Q>(doc: &Document, query: &BlockQuery<P, Q>, from: usize) -> Option<Block>
where
    P: LinePredicate,
    Q: LinePredicate,
{
    let lines = doc.lines();
    let start = (from..lines.len()).find(|&i| query.start.matches(&lines[i]))?;
    let end = block_end(doc, &query.end, start)?;
    Some(Block::new(start, end))
}

fn block_end<Q: LinePredicate>(doc: &Document, rule: &EndRule<Q>, start: usize) -> Option<usize> {
    let lines = doc.lines();
    let mut after = start + 1..lines.len();

    match rule {
        EndRule::Until {
            predicate,
            inclusive,
        } => after
            .find(|&i| predicate.matches(&lines[i]))
            .map(|i| if *inclusive { i + 1 } else { i }),
        EndRule::Dedent { close_at_eof } => {
            let base = lines[start].indent();
            after
                .find(|&i| !lines[i].is_blank() && lines[i].indent() <= base)
                .or_else(|| close_at_eof.then_some(lines.len()))
        }
    }
}
