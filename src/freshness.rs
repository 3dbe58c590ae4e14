//! Staleness checks for incremental cooking.
//!
//! Freshness state lives entirely in filesystem modification timestamps;
//! there is no manifest or lockfile. An output artifact is stale whenever it
//! cannot be proven current against every one of its inputs.

use std::path::{Path, PathBuf};
use std::time::SystemTime;
use std::{fs, io, thread};

use crate::error::{CookError, Result};

/// Attempts made when deleting a file before giving up.
const DELETE_ATTEMPTS: usize = 10;

/// Fixed backoff between delete attempts.
const DELETE_BACKOFF: std::time::Duration = std::time::Duration::from_millis(100);

/// Check whether `output` must be rebuilt from `inputs`.
///
/// Returns true (stale) if the output does not exist, if `inputs` is empty,
/// if any input is missing, or if any input's modification timestamp is
/// strictly newer than the output's. Pure metadata query, no side effects.
pub fn is_stale<P: AsRef<Path>>(output: &Path, inputs: &[P]) -> bool {
    let Some(output_ts) = mtime(output) else {
        return true;
    };

    if inputs.is_empty() {
        return true;
    }

    for input in inputs {
        match mtime(input.as_ref()) {
            Some(ts) if ts <= output_ts => {}
            _ => return true,
        }
    }

    false
}

/// Modification time of a regular file, or `None` if it cannot be read.
fn mtime(path: &Path) -> Option<SystemTime> {
    fs::metadata(path)
        .ok()
        .filter(|meta| meta.is_file())
        .and_then(|meta| meta.modified().ok())
}

/// Delete a file, retrying on transient filesystem contention.
///
/// A file that is already gone counts as success. After [`DELETE_ATTEMPTS`]
/// failures the deletion becomes fatal.
pub fn remove_file_retry(path: &Path) -> Result<()> {
    let mut last_error: Option<io::Error> = None;

    for _ in 0..DELETE_ATTEMPTS {
        match fs::remove_file(path) {
            Ok(()) => return Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(e) => {
                last_error = Some(e);
                thread::sleep(DELETE_BACKOFF);
            }
        }
    }

    Err(CookError::Io {
        path: path.to_path_buf(),
        message: format!(
            "failed to delete after {} attempts: {}",
            DELETE_ATTEMPTS,
            last_error.map_or_else(|| "unknown error".to_string(), |e| e.to_string())
        ),
    })
}

/// File name without directory or extension, lossily decoded.
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Join paths and require the result to be an existing directory.
pub fn existing_dir(path: &Path) -> Result<&Path> {
    if path.is_dir() {
        Ok(path)
    } else {
        Err(CookError::MissingOutputDirectory {
            path: path.to_path_buf(),
        })
    }
}

/// Require `path` to be an existing regular file.
pub fn existing_file(path: &Path) -> Result<&Path> {
    if path.is_file() {
        Ok(path)
    } else {
        Err(CookError::MissingInput {
            path: path.to_path_buf(),
        })
    }
}

/// Create `dir/name` if needed and return it.
pub fn ensure_subdir(dir: &Path, name: &str) -> Result<PathBuf> {
    let subdir = dir.join(name);
    fs::create_dir_all(&subdir).map_err(|e| CookError::Io {
        path: subdir.clone(),
        message: format!("failed to create directory: {}", e),
    })?;
    Ok(subdir)
}
