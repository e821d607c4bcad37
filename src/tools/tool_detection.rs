//! External tool detection.
//!
//! Locates the executables the system collaborators shell out to.

use crate::error::ToolError;
use std::path::{Path, PathBuf};

/// Interpreter names tried, in order, when no explicit interpreter is configured.
const PYTHON_CANDIDATES: &[&str] = &["python3", "python"];

/// Finds `name` on PATH.
pub fn find_tool(name: &str) -> Result<PathBuf, ToolError> {
    match which::which(name) {
        Ok(path) => {
            log::debug!("Found {} at: {}", name, path.display());
            Ok(path)
        }
        Err(e) => {
            log::debug!("{} not found in PATH: {}", name, e);
            Err(ToolError::NotFound {
                tool: name.to_string(),
                reason: e.to_string(),
            })
        }
    }
}

/// Resolves the interpreter used to create environments.
///
/// An explicit path must exist; a bare name is looked up on PATH. Without an
/// explicit interpreter, `python3` then `python` are tried.
pub fn find_python(explicit: Option<&Path>) -> Result<PathBuf, ToolError> {
    if let Some(python) = explicit {
        if python.components().count() > 1 {
            return if python.is_file() {
                Ok(python.to_path_buf())
            } else {
                Err(ToolError::NotFound {
                    tool: python.display().to_string(),
                    reason: "no such file".to_string(),
                })
            };
        }
        return find_tool(&python.to_string_lossy());
    }

    let mut last = None;
    for candidate in PYTHON_CANDIDATES {
        match find_tool(candidate) {
            Ok(path) => return Ok(path),
            Err(e) => last = Some(e),
        }
    }
    Err(last.unwrap_or_else(|| ToolError::NotFound {
        tool: "python".to_string(),
        reason: "no interpreter candidates".to_string(),
    }))
}
