//! Repository initialization with the git CLI.

use super::{RepoHandle, RepositoryInitializer, command, tool_detection};
use crate::config::GIT_DIR;
use crate::error::ToolError;
use std::path::Path;
use std::process::Command;

/// Runs `git init` in the project root.
#[derive(Debug, Clone, Default)]
pub struct GitInitializer;

impl GitInitializer {
    pub fn new() -> Self {
        Self
    }
}

impl RepositoryInitializer for GitInitializer {
    fn init(&self, project_dir: &Path) -> Result<RepoHandle, ToolError> {
        let git = tool_detection::find_tool("git")?;

        let mut cmd = Command::new(git);
        cmd.arg("init").arg("--quiet").current_dir(project_dir);
        command::run(cmd)?;

        let git_dir = project_dir.join(GIT_DIR);
        if !git_dir.is_dir() {
            return Err(ToolError::Incomplete(format!(
                "git init reported success but {} is missing",
                git_dir.display()
            )));
        }

        log::info!("Initialized git repository in {}", project_dir.display());
        Ok(RepoHandle { git_dir })
    }
}
