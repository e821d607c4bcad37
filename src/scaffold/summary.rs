//! Result of a successful run.

use super::{ProjectType, SetupState};
use crate::tools::InstalledPackage;
use serde::Serialize;
use std::path::PathBuf;

/// Outcome of the repository step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RepoStatus {
    /// Not requested; the initializer was never invoked
    Skipped,
    /// A new repository was initialized
    Created,
    /// Requested, but the project root already held a repository
    AlreadyPresent,
}

impl RepoStatus {
    pub fn created(self) -> bool {
        self == RepoStatus::Created
    }
}

/// Everything a successful run produced.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectSummary {
    /// Absolute project root
    pub project_dir: PathBuf,
    pub project_type: ProjectType,
    /// Root of the isolated environment
    pub environment: PathBuf,
    /// Packages the installer confirmed, in requested order
    pub packages: Vec<InstalledPackage>,
    /// The scaffolded starter notebook or script
    pub artifact: PathBuf,
    pub repository: RepoStatus,
    /// Final state of the run
    #[serde(skip)]
    pub state: SetupState,
}

impl ProjectSummary {
    /// Human-readable report, one line per item.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Project:     {}", self.project_dir.display()),
            format!("Type:        {}", self.project_type),
            format!("Environment: {}", self.environment.display()),
            format!("Artifact:    {}", self.artifact.display()),
        ];
        let repo = match self.repository {
            RepoStatus::Skipped => "not requested",
            RepoStatus::Created => "initialized",
            RepoStatus::AlreadyPresent => "already present",
        };
        lines.push(format!("Repository:  {repo}"));
        lines.push(format!("Packages ({}):", self.packages.len()));
        lines.extend(
            self.packages
                .iter()
                .map(|p| format!("  {} {}", p.name, p.version)),
        );
        lines
    }
}
