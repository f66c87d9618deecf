//! Error types for blockedit-core

/// Result type for blockedit-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading, locating or editing blocks
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Input is not valid UTF-8 text (invalid byte at offset {offset})")]
    Decode { offset: usize },

    #[error("Block not found: {query}")]
    BlockNotFound { query: String },

    #[error("Expected exactly one block for {query}, found {count}")]
    AmbiguousBlock { query: String, count: usize },

    #[error("Block {start}..{end} is out of range for a document of {len} lines")]
    InvalidBlock { start: usize, end: usize, len: usize },

    #[error("Invalid pattern {pattern:?}: {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("Invalid comment marker {marker:?}: must be non-empty and not start with whitespace")]
    InvalidMarker { marker: String },

    #[error("Edit step {step} ({name}) failed: {source}")]
    Step {
        step: usize,
        name: String,
        source: Box<Error>,
    },

    #[error("Filesystem error: {0}")]
    Fs(#[from] blockedit_fs::Error),
}

impl Error {
    pub fn not_found(query: impl Into<String>) -> Self {
        Self::BlockNotFound {
            query: query.into(),
        }
    }

    /// Unwrap any step context and return the underlying error.
    pub fn root(&self) -> &Error {
        match self {
            Self::Step { source, .. } => source.root(),
            other => other,
        }
    }
}
