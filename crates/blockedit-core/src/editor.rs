//! Block editing
//!
//! Every function here takes a document by reference and returns a new one.
//! Lines outside the targeted block are carried over untouched.

use crate::document::Document;
use crate::error::{Error, Result};
use crate::line::{Line, Terminator};
use crate::locator::{Block, BlockQuery, find_all_blocks, find_block, find_unique_block};
use crate::operation::Operation;
use crate::predicate::LinePredicate;
use std::ops::Range;

/// Apply `op` to `block` in `doc`.
///
/// Fails with [`Error::InvalidBlock`] when the block does not fit the
/// document and with [`Error::InvalidMarker`] for an unusable comment
/// marker.
pub fn apply(doc: &Document, block: Block, op: &Operation) -> Result<Document> {
    check_block(doc, block)?;
    if let Some(marker) = op.marker() {
        check_marker(marker)?;
    }

    let ending = doc.line_ending();
    let indent = doc
        .line(block.start)
        .filter(|_| !block.is_empty())
        .map(|line| line.leading_whitespace().to_string())
        .unwrap_or_default();

    let edited = match op {
        Operation::Delete => splice(doc, block.range(), Vec::new(), ending, true),
        Operation::Replace(text) => splice(
            doc,
            block.range(),
            payload(text, &indent, ending),
            ending,
            text.ends_with('\n'),
        ),
        Operation::InsertBefore(text) => splice(
            doc,
            block.start..block.start,
            payload(text, &indent, ending),
            ending,
            text.ends_with('\n'),
        ),
        Operation::InsertAfter(text) => splice(
            doc,
            block.end..block.end,
            payload(text, &indent, ending),
            ending,
            text.ends_with('\n'),
        ),
        Operation::CommentToggle(marker) => toggle(doc, block, marker),
        Operation::Comment(marker) => map_block(doc, block, |line| {
            if line.is_blank() || line.content().starts_with(marker.as_str()) {
                line.clone()
            } else {
                mark(line, marker)
            }
        }),
        Operation::Uncomment(marker) => map_block(doc, block, |line| unmark(line, marker)),
        Operation::Reindent(width) => reindent(doc, block, *width),
        Operation::Substitute { find, replace } => {
            if find.is_empty() {
                return Err(Error::InvalidPattern {
                    pattern: String::new(),
                    message: "search text is empty".to_string(),
                });
            }
            substitute(doc, block, |text| text.replace(find.as_str(), replace))
        }
        Operation::SubstituteRegex { pattern, replace } => {
            substitute(doc, block, |text| pattern.replace_all(text, replace).into_owned())
        }
    };

    tracing::debug!(%op, %block, before = doc.len(), after = edited.len(), "applied edit");
    Ok(edited)
}

/// Apply `op` to several blocks at once.
///
/// Blocks must be sorted and non-overlapping, as returned by
/// [`find_all_blocks`]. They are edited last to first so earlier indices
/// stay valid.
pub fn apply_many(doc: &Document, blocks: &[Block], op: &Operation) -> Result<Document> {
    if let Some(pair) = blocks.windows(2).find(|w| w[0].end > w[1].start) {
        return Err(Error::InvalidBlock {
            start: pair[1].start,
            end: pair[1].end,
            len: doc.len(),
        });
    }

    blocks
        .iter()
        .rev()
        .try_fold(doc.clone(), |current, block| apply(&current, *block, op))
}

/// Locate the first block matching `query` and apply `op` to it.
pub fn edit<P, Q>(doc: &Document, query: &BlockQuery<P, Q>, op: &Operation) -> Result<Document>
where
    P: LinePredicate,
    Q: LinePredicate,
{
    let block = find_block(doc, query).ok_or_else(|| Error::not_found(query.describe()))?;
    apply(doc, block, op)
}

/// Like [`edit`], but fails unless exactly one block matches.
pub fn edit_unique<P, Q>(doc: &Document, query: &BlockQuery<P, Q>, op: &Operation) -> Result<Document>
where
    P: LinePredicate,
    Q: LinePredicate,
{
    let block = find_unique_block(doc, query)?;
    apply(doc, block, op)
}

/// Apply `op` to every block matching `query`. At least one must match.
pub fn edit_all<P, Q>(doc: &Document, query: &BlockQuery<P, Q>, op: &Operation) -> Result<Document>
where
    P: LinePredicate,
    Q: LinePredicate,
{
    let blocks = find_all_blocks(doc, query);
    if blocks.is_empty() {
        return Err(Error::not_found(query.describe()));
    }
    apply_many(doc, &blocks, op)
}

fn check_block(doc: &Document, block: Block) -> Result<()> {
    if block.start > block.end || block.end > doc.len() {
        return Err(Error::InvalidBlock {
            start: block.start,
            end: block.end,
            len: doc.len(),
        });
    }
    Ok(())
}

fn check_marker(marker: &str) -> Result<()> {
    let usable = !marker.is_empty()
        && !marker.starts_with(char::is_whitespace)
        && !marker.contains(['\n', '\r']);
    if usable {
        Ok(())
    } else {
        Err(Error::InvalidMarker {
            marker: marker.to_string(),
        })
    }
}

/// Split payload text into lines terminated with `ending`.
///
/// If the first non-blank payload line is flush left, every non-blank line
/// is prefixed with `indent`; otherwise the payload is taken as written.
fn payload(text: &str, indent: &str, ending: Terminator) -> Vec<Line> {
    let parsed = Document::from_text(text);
    let inherit = parsed
        .lines()
        .iter()
        .find(|line| !line.is_blank())
        .is_some_and(|line| line.indent() == 0);

    parsed
        .into_lines()
        .into_iter()
        .map(|line| {
            let text = if inherit && !line.is_blank() {
                format!("{indent}{}", line.text())
            } else {
                line.text().to_string()
            };
            Line::new(text, ending)
        })
        .collect()
}

/// Replace `range` with `payload`.
///
/// Writing at the end of the document keeps its trailing-newline state: if
/// the file ended without a newline, so does the new last line. For an
/// empty document the payload text decides.
fn splice(
    doc: &Document,
    range: Range<usize>,
    mut payload: Vec<Line>,
    ending: Terminator,
    payload_terminated: bool,
) -> Document {
    let lines = doc.lines();
    let mut out = Vec::with_capacity(lines.len() - range.len() + payload.len());
    out.extend_from_slice(&lines[..range.start]);

    if range.end == lines.len() && !payload.is_empty() {
        let unterminated = match lines.last() {
            Some(last) => last.terminator().is_none(),
            None => !payload_terminated,
        };
        if unterminated {
            if let Some(prev) = out.last_mut().filter(|l| l.terminator().is_none()) {
                *prev = prev.with_terminator(ending);
            }
            if let Some(last) = payload.last_mut() {
                *last = last.with_terminator(Terminator::None);
            }
        }
    }

    out.extend(payload);
    out.extend_from_slice(&lines[range.end..]);
    Document::from_lines(out)
}

fn map_block(doc: &Document, block: Block, f: impl Fn(&Line) -> Line) -> Document {
    let lines = doc
        .lines()
        .iter()
        .enumerate()
        .map(|(i, line)| if block.contains(i) { f(line) } else { line.clone() })
        .collect();
    Document::from_lines(lines)
}

/// Flip the comment state of the whole block.
///
/// When every non-blank line is marked, one marker is stripped from each.
/// Otherwise every non-blank line gets a marker, including lines that are
/// already marked. Toggling twice restores the block unless all of its
/// non-blank lines start with the marker twice.
fn toggle(doc: &Document, block: Block, marker: &str) -> Document {
    let strip = doc
        .slice(block)
        .unwrap_or_default()
        .iter()
        .filter(|line| !line.is_blank())
        .all(|line| is_marked(line, marker));

    map_block(doc, block, |line| {
        if line.is_blank() {
            line.clone()
        } else if strip {
            unmark(line, marker)
        } else {
            mark(line, marker)
        }
    })
}

/// Whether `line` has the shape `mark` produces: indentation, the marker,
/// then non-whitespace text. `# x` is not marked by `#`, since stripping
/// the `#` would leave text that starts with whitespace.
fn is_marked(line: &Line, marker: &str) -> bool {
    line.content()
        .strip_prefix(marker)
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| !c.is_whitespace())
}

/// Insert `marker` after the leading whitespace so indentation is kept.
fn mark(line: &Line, marker: &str) -> Line {
    line.with_text(format!(
        "{}{marker}{}",
        line.leading_whitespace(),
        line.content()
    ))
}

fn unmark(line: &Line, marker: &str) -> Line {
    match line.content().strip_prefix(marker) {
        Some(rest) => line.with_text(format!("{}{rest}", line.leading_whitespace())),
        None => line.clone(),
    }
}

/// Rewrite the text of each block line with `rewrite`. Terminators are kept;
/// a rewrite that introduces newlines splits the line.
fn substitute(doc: &Document, block: Block, rewrite: impl Fn(&str) -> String) -> Document {
    let mut out = Vec::with_capacity(doc.len());
    for (i, line) in doc.lines().iter().enumerate() {
        if !block.contains(i) {
            out.push(line.clone());
            continue;
        }
        let text = rewrite(line.text());
        if text == line.text() {
            out.push(line.clone());
        } else if text.contains('\n') {
            let rejoined = format!("{text}{}", line.terminator().as_str());
            out.extend(Document::from_text(&rejoined).into_lines());
        } else {
            out.push(line.with_text(text));
        }
    }
    Document::from_lines(out)
}

fn reindent(doc: &Document, block: Block, width: usize) -> Document {
    let Some(first) = doc.line(block.start).filter(|_| !block.is_empty()) else {
        return doc.clone();
    };
    let delta = width as isize - first.indent() as isize;

    map_block(doc, block, |line| {
        if line.is_blank() {
            return line.with_text("");
        }
        let indent = (line.indent() as isize + delta).max(0) as usize;
        line.with_text(format!("{}{}", " ".repeat(indent), line.content()))
    })
}
