//! Removal of a previously scaffolded project.
//!
//! Only entries this tool creates are deleted. A project root that still
//! holds anything else is left in place.

use crate::config::SCAFFOLDED_ENTRIES;
use crate::error::{Result, SetupError};
use crate::scaffold::{PartialState, Step};
use crate::utils::fs;
use std::path::{Path, PathBuf};

/// What `teardown` deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeardownReport {
    pub project_dir: PathBuf,
    /// Scaffolded entries that existed and were removed
    pub removed: Vec<String>,
}

/// Removes the scaffolded entries of `<target>/<name>`, then the root itself.
///
/// # Errors
///
/// - Config: invalid project name
/// - Path: root missing or not a directory, a removal failed, or unknown
///   files remain (the root is then kept and the error lists them)
pub fn teardown(target: &Path, name: &str) -> Result<TeardownReport> {
    super::validate_project_name(name)?;
    let step = Step::Cleanup;
    let project_dir = super::resolve_project_dir(target, name, step)?;

    if !project_dir.is_dir() {
        return Err(SetupError::path(
            step,
            format!("{} is not an existing directory", project_dir.display()),
        ));
    }

    let mut removed = Vec::new();
    for entry in SCAFFOLDED_ENTRIES {
        let path = project_dir.join(entry);
        let existed = fs::remove_entry(&path).map_err(|e| {
            SetupError::path(step, format!("cannot remove {}: {}", path.display(), e))
                .with_partial(PartialState::capture(&project_dir, false))
        })?;
        if existed {
            log::debug!("Removed {}", path.display());
            removed.push(entry.to_string());
        }
    }

    let remaining = fs::top_level_entries(&project_dir);
    if !remaining.is_empty() {
        return Err(SetupError::path(
            step,
            format!(
                "{} still contains files not created by setup ({}); left in place",
                project_dir.display(),
                remaining.join(", ")
            ),
        )
        .with_partial(PartialState::capture(&project_dir, false)));
    }

    std::fs::remove_dir(&project_dir).map_err(|e| {
        SetupError::path(
            step,
            format!("cannot remove {}: {}", project_dir.display(), e),
        )
    })?;
    log::info!("Removed directory at {}", project_dir.display());

    Ok(TeardownReport {
        project_dir,
        removed,
    })
}
