//! File system utilities for scaffolding.
//!
//! Idempotent directory and file helpers used by the orchestrator, the
//! template scaffolder and `--cleanup`.

use std::{
    io::{self},
    path::Path,
};

/// Creates the given directory (parents are not created).
///
/// Returns `true` when the directory was created by this call and `false`
/// when it already existed as a directory.
pub fn create_dir(path: &Path) -> io::Result<bool> {
    match std::fs::create_dir(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists && path.is_dir() => Ok(false),
        Err(e) => Err(e),
    }
}

/// Writes `contents` to `path`, creating any parent directories as needed.
pub fn write_file(path: &Path, contents: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, contents)
}

/// Returns `true` when `path` is a directory with no entries.
pub fn is_empty_dir(path: &Path) -> io::Result<bool> {
    Ok(std::fs::read_dir(path)?.next().is_none())
}

/// Removes a file or directory tree.
///
/// Returns `false` if nothing existed at `path`.
pub fn remove_entry(path: &Path) -> io::Result<bool> {
    let metadata = match std::fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false), // Idempotent
        Err(e) => return Err(e),
    };
    if metadata.is_dir() {
        std::fs::remove_dir_all(path)?;
    } else {
        std::fs::remove_file(path)?;
    }
    Ok(true)
}

/// Lists the top-level entries of `dir`, sorted, with directories suffixed by `/`.
///
/// Unreadable or missing directories yield an empty list.
pub fn top_level_entries(dir: &Path) -> Vec<String> {
    let mut entries: Vec<String> = walkdir::WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| {
            let name = e.file_name().to_string_lossy().into_owned();
            if e.file_type().is_dir() {
                format!("{name}/")
            } else {
                name
            }
        })
        .collect();
    entries.sort();
    entries
}
