//! Environment creation with the standard library `venv` module.

use super::{EnvironmentCreator, EnvironmentHandle, command, tool_detection};
use crate::config::ENVIRONMENT_DIR;
use crate::error::ToolError;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Creates `<project>/.venv` with `<python> -m venv`.
#[derive(Debug, Clone, Default)]
pub struct VenvCreator {
    python: Option<PathBuf>,
}

impl VenvCreator {
    /// Uses `python` when given, otherwise looks up `python3`/`python` on PATH at creation time.
    pub fn new(python: Option<PathBuf>) -> Self {
        Self { python }
    }
}

/// Interpreter path inside an environment root.
pub fn environment_python(env_root: &Path) -> PathBuf {
    if cfg!(windows) {
        env_root.join("Scripts").join("python.exe")
    } else {
        env_root.join("bin").join("python")
    }
}

impl EnvironmentCreator for VenvCreator {
    fn create(&self, project_dir: &Path) -> Result<EnvironmentHandle, ToolError> {
        let python = tool_detection::find_python(self.python.as_deref())?;
        let root = project_dir.join(ENVIRONMENT_DIR);

        let mut cmd = Command::new(&python);
        cmd.arg("-m").arg("venv").arg(&root).current_dir(project_dir);
        command::run(cmd)?;

        let env_python = environment_python(&root);
        if !env_python.exists() {
            return Err(ToolError::Incomplete(format!(
                "venv reported success but {} is missing",
                env_python.display()
            )));
        }

        log::info!("Created environment at {}", root.display());
        Ok(EnvironmentHandle {
            root,
            python: env_python,
        })
    }
}
