//! Error types for blockedit-fs

use crate::config::Format;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not valid UTF-8")]
    NotUtf8 { path: PathBuf },

    #[error("Invalid {format} in {path}: {message}")]
    Parse {
        path: PathBuf,
        format: Format,
        message: String,
    },

    /// Recipes must be `.toml`, `.json`, `.yaml` or `.yml`.
    #[error("Unsupported recipe format {extension:?}")]
    UnsupportedFormat { extension: String },

    #[error("Could not lock {path}: {source}")]
    Lock {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
