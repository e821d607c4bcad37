//! Run state machine and partial-state reporting.

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// A step of the setup sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Step {
    Validate,
    ResolveDirectory,
    CreateEnvironment,
    InstallPackages,
    ScaffoldArtifact,
    InitRepository,
    Cleanup,
}

impl Step {
    pub fn as_str(self) -> &'static str {
        match self {
            Step::Validate => "validate",
            Step::ResolveDirectory => "resolve-directory",
            Step::CreateEnvironment => "create-environment",
            Step::InstallPackages => "install-packages",
            Step::ScaffoldArtifact => "scaffold-artifact",
            Step::InitRepository => "init-repository",
            Step::Cleanup => "cleanup",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Progress of a single run.
///
/// `Init → DirectoryReady → EnvironmentReady → PackagesInstalled →
/// ArtifactScaffolded → [RepoInitialized] → Done`. Any transition may
/// instead end in [`SetupState::Failed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupState {
    Init,
    DirectoryReady,
    EnvironmentReady,
    PackagesInstalled,
    ArtifactScaffolded,
    RepoInitialized,
    Done,
    Failed(Step),
}

impl SetupState {
    /// The step that moves a run out of this state, if any.
    pub fn next_step(self, init_repo: bool) -> Option<Step> {
        match self {
            SetupState::Init => Some(Step::ResolveDirectory),
            SetupState::DirectoryReady => Some(Step::CreateEnvironment),
            SetupState::EnvironmentReady => Some(Step::InstallPackages),
            SetupState::PackagesInstalled => Some(Step::ScaffoldArtifact),
            SetupState::ArtifactScaffolded if init_repo => Some(Step::InitRepository),
            SetupState::ArtifactScaffolded
            | SetupState::RepoInitialized
            | SetupState::Done
            | SetupState::Failed(_) => None,
        }
    }

    /// State reached when `step` completes, or `None` if `step` is not the
    /// step this state expects next.
    pub fn advance(self, step: Step, init_repo: bool) -> Option<Self> {
        if self.next_step(init_repo) != Some(step) {
            return None;
        }
        match step {
            Step::ResolveDirectory => Some(SetupState::DirectoryReady),
            Step::CreateEnvironment => Some(SetupState::EnvironmentReady),
            Step::InstallPackages => Some(SetupState::PackagesInstalled),
            Step::ScaffoldArtifact => Some(SetupState::ArtifactScaffolded),
            Step::InitRepository => Some(SetupState::RepoInitialized),
            // Not transitions of a setup run
            Step::Validate | Step::Cleanup => None,
        }
    }

    /// `Done`, if every step has run; `None` while steps remain or after a failure.
    pub fn finish(self, init_repo: bool) -> Option<Self> {
        if self.is_terminal() || self.next_step(init_repo).is_some() {
            return None;
        }
        Some(SetupState::Done)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, SetupState::Done | SetupState::Failed(_))
    }
}

/// What a failed run left on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartialState {
    /// Project root the run was working in
    pub project_dir: PathBuf,
    /// Whether this run created the project root
    pub created_dir: bool,
    /// Top-level entries present in the project root at failure time, sorted
    pub entries: Vec<String>,
}

impl PartialState {
    /// Observes the project root as it is now.
    pub fn capture(project_dir: &Path, created_dir: bool) -> Self {
        Self {
            project_dir: project_dir.to_path_buf(),
            created_dir,
            entries: crate::utils::fs::top_level_entries(project_dir),
        }
    }

    /// Human-readable description, one line per fact.
    pub fn describe(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if !self.project_dir.exists() {
            lines.push(format!("{} does not exist", self.project_dir.display()));
            return lines;
        }
        let origin = if self.created_dir {
            "created by this run"
        } else {
            "already existed"
        };
        lines.push(format!("{} ({origin})", self.project_dir.display()));
        if self.entries.is_empty() {
            lines.push("  (empty)".to_string());
        }
        for entry in &self.entries {
            lines.push(format!("  {entry}"));
        }
        lines
    }
}
