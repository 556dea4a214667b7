//! Content hash of a source directory.
//!
//! Computed once per process by the caller and passed explicitly to whatever
//! needs it (the Lambda bundle version tag).

use crate::models::PlanError;
use sha2::{Digest, Sha256};
use std::path::Path;
use walkdir::WalkDir;

/// SHA-256 over the relative path and content of every file under `path`.
///
/// Files are visited in sorted order, so the result only depends on the tree's
/// content, never on directory iteration order or timestamps.
pub fn hash_directory(path: &Path) -> Result<String, PlanError> {
    let mut hasher = Sha256::new();
    let mut file_count = 0usize;

    for entry in WalkDir::new(path).sort_by_file_name() {
        let entry = entry.map_err(|e| PlanError::Walk {
            path: path.display().to_string(),
            source: e,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry.path().strip_prefix(path).unwrap_or(entry.path());
        // '/' separators keep the hash identical across platforms
        let relative = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        let content = std::fs::read(entry.path()).map_err(|e| PlanError::Io {
            path: entry.path().display().to_string(),
            source: e,
        })?;

        hasher.update(relative.as_bytes());
        hasher.update([0u8]);
        hasher.update(&content);
        hasher.update([0u8]);
        file_count += 1;
    }

    let digest = hex::encode(hasher.finalize());
    log::info!("Hashed {file_count} files under {} -> {digest}", path.display());
    Ok(digest)
}
