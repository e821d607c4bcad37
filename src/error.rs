//! Error types for project setup operations.
//!
//! A run fails with exactly one [`SetupError`]. It names the failing step,
//! carries the underlying tool's message, and records what was left on disk.

use crate::scaffold::{PartialState, Step};
use std::fmt;
use thiserror::Error;

/// Result type alias for setup operations
pub type Result<T> = std::result::Result<T, SetupError>;

/// Failure category, mapped one-to-one onto process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    /// Bad or unrecognized input (project type, project name, missing argument)
    Config,
    /// Filesystem location unusable
    Path,
    /// Isolated environment could not be created
    Environment,
    /// Package installation failed or was incomplete
    Install,
    /// Repository initialization failed
    Repo,
}

impl ErrorKind {
    /// Process exit code reported for this kind of failure.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorKind::Config => 2,
            ErrorKind::Path => 3,
            ErrorKind::Environment => 4,
            ErrorKind::Install => 5,
            ErrorKind::Repo => 6,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorKind::Config => "configuration error",
            ErrorKind::Path => "path error",
            ErrorKind::Environment => "environment error",
            ErrorKind::Install => "install error",
            ErrorKind::Repo => "repository error",
        };
        f.write_str(label)
    }
}

/// Main error type for a setup run.
#[derive(Error, Debug)]
#[error("{kind} during {step}: {cause}")]
pub struct SetupError {
    /// Failure category
    pub kind: ErrorKind,
    /// Step that was executing when the failure occurred
    pub step: Step,
    /// Underlying cause, usually the external tool's error text
    pub cause: String,
    /// Filesystem state left behind, if any step mutated the disk
    pub partial: Option<PartialState>,
}

impl SetupError {
    fn new(kind: ErrorKind, step: Step, cause: impl Into<String>) -> Self {
        Self {
            kind,
            step,
            cause: cause.into(),
            partial: None,
        }
    }

    pub fn config(step: Step, cause: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config, step, cause)
    }

    pub fn path(step: Step, cause: impl Into<String>) -> Self {
        Self::new(ErrorKind::Path, step, cause)
    }

    pub fn environment(cause: impl Into<String>) -> Self {
        Self::new(ErrorKind::Environment, Step::CreateEnvironment, cause)
    }

    pub fn install(cause: impl Into<String>) -> Self {
        Self::new(ErrorKind::Install, Step::InstallPackages, cause)
    }

    pub fn repo(cause: impl Into<String>) -> Self {
        Self::new(ErrorKind::Repo, Step::InitRepository, cause)
    }

    /// Attaches the filesystem state observed at failure time.
    pub fn with_partial(mut self, partial: PartialState) -> Self {
        self.partial = Some(partial);
        self
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        self.kind.exit_code()
    }

    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        let mut suggestions = match self.kind {
            ErrorKind::Config => vec![
                "Valid project types: jupyter-notebook, script".to_string(),
                "Project names may not contain , . / \\ ? or whitespace control characters"
                    .to_string(),
            ],
            ErrorKind::Path => vec![
                "Check that the target directory exists and is writable".to_string(),
                "Use --force to reuse a non-empty project directory".to_string(),
            ],
            ErrorKind::Environment => vec![
                "Ensure python3 with the venv module is installed, or pass --python".to_string(),
            ],
            ErrorKind::Install => vec![
                "Check network access to the package index and rerun with --force".to_string(),
            ],
            ErrorKind::Repo => vec!["Ensure git is installed and on PATH".to_string()],
        };
        if self.partial.as_ref().is_some_and(|p| !p.entries.is_empty()) {
            suggestions.push(
                "Partial results were left in place; remove them with --cleanup or rerun with --force"
                    .to_string(),
            );
        }
        suggestions
    }
}

/// Errors raised by the external tool collaborators.
///
/// The orchestrator translates these into a [`SetupError`] whose kind is
/// decided by the step that was running.
#[derive(Error, Debug)]
pub enum ToolError {
    /// Required executable is not installed or not on PATH
    #[error("{tool} not found: {reason}")]
    NotFound {
        /// Executable name
        tool: String,
        /// Lookup failure detail
        reason: String,
    },

    /// Command ran but exited unsuccessfully
    #[error("`{command}` failed ({status}): {stderr}")]
    Failed {
        /// Rendered command line
        command: String,
        /// Exit status description
        status: String,
        /// Captured standard error
        stderr: String,
    },

    /// Tool reported success but did not produce everything requested
    #[error("incomplete result: {0}")]
    Incomplete(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
