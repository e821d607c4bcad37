//! External tool collaborators.
//!
//! The orchestrator only talks to the four traits defined here. The system
//! implementations shell out to Python, pip and git; tests substitute fakes.
//!
//! - [`venv`] - environment creation with `python -m venv`
//! - [`pip`] - package installation and confirmation through the environment's pip
//! - [`template`] - starter notebook and script generation
//! - [`git`] - repository initialization
//! - [`tool_detection`] - locating executables on PATH

mod command;
pub mod git;
pub mod pip;
pub mod template;
pub mod tool_detection;
pub mod venv;

pub use git::GitInitializer;
pub use pip::PipInstaller;
pub use template::TemplateScaffolder;
pub use venv::VenvCreator;

use crate::error::ToolError;
use crate::scaffold::ProjectType;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// An isolated environment created inside a project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentHandle {
    /// Environment directory, e.g. `<project>/.venv`
    pub root: PathBuf,
    /// Interpreter living inside the environment
    pub python: PathBuf,
}

/// A package the installer reported as present after installation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstalledPackage {
    pub name: String,
    pub version: String,
}

/// Packages confirmed installed, in the order they were requested.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfirmedPackages(pub Vec<InstalledPackage>);

impl ConfirmedPackages {
    pub fn into_inner(self) -> Vec<InstalledPackage> {
        self.0
    }
}

/// A repository initialized in a project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoHandle {
    /// Repository metadata directory
    pub git_dir: PathBuf,
}

/// Creates an isolated package environment inside a project root.
pub trait EnvironmentCreator {
    fn create(&self, project_dir: &Path) -> Result<EnvironmentHandle, ToolError>;
}

/// Installs named packages into an environment and reports what is actually installed.
pub trait PackageInstaller {
    fn install(
        &self,
        env: &EnvironmentHandle,
        packages: &[String],
    ) -> Result<ConfirmedPackages, ToolError>;
}

/// Produces the starter file for a project type.
pub trait ArtifactScaffolder {
    fn create_artifact(&self, project_dir: &Path, kind: ProjectType)
    -> Result<PathBuf, ToolError>;
}

/// Initializes a version-control repository.
pub trait RepositoryInitializer {
    fn init(&self, project_dir: &Path) -> Result<RepoHandle, ToolError>;
}
