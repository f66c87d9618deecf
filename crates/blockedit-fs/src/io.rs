//! Atomic I/O operations with file locking

use crate::{Error, NormalizedPath, Result};
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Read the raw bytes of a file.
///
/// No decoding happens here; line splitting and UTF-8 validation belong to
/// the document layer so terminators survive untouched.
pub fn read_bytes(path: &NormalizedPath) -> Result<Vec<u8>> {
    let native_path = path.to_native();
    fs::read(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Write content atomically to a file with locking.
///
/// Uses write-to-temp-then-rename so a failure part way through never
/// leaves the target truncated. The temp file is removed on any failure.
pub fn write_atomic(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    let native_path = path.to_native();

    if let Some(parent) = native_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    // Same directory as the target so the rename stays on one filesystem
    let temp_name = format!(
        ".{}.{}.tmp",
        native_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    let temp_path = native_path.with_file_name(&temp_name);

    let result = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| Error::io(&temp_path, e))
        .and_then(|file| write_locked(file, &temp_path, &native_path, content))
        .and_then(|()| fs::rename(&temp_path, &native_path).map_err(|e| Error::io(&native_path, e)));

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    } else {
        tracing::debug!(path = %path, bytes = content.len(), "wrote file atomically");
    }
    result
}

fn write_locked(mut file: File, temp_path: &Path, target: &Path, content: &[u8]) -> Result<()> {
    file.lock_exclusive().map_err(|source| Error::Lock {
        path: target.to_path_buf(),
        source,
    })?;

    file.write_all(content).map_err(|e| Error::io(temp_path, e))?;
    file.sync_all().map_err(|e| Error::io(temp_path, e))?;

    file.unlock().map_err(|source| Error::Lock {
        path: target.to_path_buf(),
        source,
    })
}
