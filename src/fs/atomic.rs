//! Atomic file writes.
//!
//! Configuration files are replaced by writing to a sibling temp file,
//! syncing it, and renaming over the target. Rename is atomic on POSIX when
//! source and target share a filesystem; on Windows the existing target is
//! removed first, which narrows but does not close the replacement window.

use crate::error::{DialplanError, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Atomically write UTF-8 content to `path`, creating parent directories.
pub fn atomic_write_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| {
            DialplanError::UserError(format!(
                "failed to create directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }

    let temp_path = temp_sibling(path)?;
    write_synced(&temp_path, content)?;
    replace(&temp_path, path)
}

/// Temp file next to the target: `.{name}.{pid}.tmp`.
fn temp_sibling(target: &Path) -> Result<PathBuf> {
    let parent = target.parent().unwrap_or(Path::new("."));
    let name = target
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| DialplanError::UserError("invalid file path".to_string()))?;
    Ok(parent.join(format!(".{}.{}.tmp", name, std::process::id())))
}

fn write_synced(path: &Path, content: &str) -> Result<()> {
    let mut file = File::create(path).map_err(|e| {
        DialplanError::UserError(format!(
            "failed to create temp file '{}': {}",
            path.display(),
            e
        ))
    })?;

    file.write_all(content.as_bytes())
        .and_then(|_| file.sync_all())
        .map_err(|e| {
            let _ = fs::remove_file(path);
            DialplanError::UserError(format!("failed to write temp file: {}", e))
        })
}

#[cfg(unix)]
fn replace(source: &Path, target: &Path) -> Result<()> {
    fs::rename(source, target).map_err(|e| {
        let _ = fs::remove_file(source);
        DialplanError::UserError(format!("failed to replace '{}': {}", target.display(), e))
    })
}

#[cfg(windows)]
fn replace(source: &Path, target: &Path) -> Result<()> {
    if target.exists() {
        let _ = fs::remove_file(target);
    }
    fs::rename(source, target).map_err(|e| {
        let _ = fs::remove_file(source);
        DialplanError::UserError(format!("failed to replace '{}': {}", target.display(), e))
    })
}
