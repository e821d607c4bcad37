//! Project request: what to scaffold and where.

use crate::config::STANDARD_PACKAGES;
use crate::error::{Result, SetupError};
use crate::scaffold::Step;
use path_absolutize::Absolutize;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Characters a project name may not contain.
const FORBIDDEN_NAME_CHARS: &[char] = &[',', '.', '/', '\\', '\n', '\t', '?'];

/// Kind of starter artifact to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectType {
    JupyterNotebook,
    Script,
}

impl ProjectType {
    /// Canonical names accepted on the command line
    pub const VALID: &'static [&'static str] = &["jupyter-notebook", "script"];

    pub fn as_str(self) -> &'static str {
        match self {
            ProjectType::JupyterNotebook => "jupyter-notebook",
            ProjectType::Script => "script",
        }
    }

    /// The type whose starter file this one replaces.
    pub fn other(self) -> Self {
        match self {
            ProjectType::JupyterNotebook => ProjectType::Script,
            ProjectType::Script => ProjectType::JupyterNotebook,
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectType {
    type Err = SetupError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "jupyter-notebook" | "notebook" => Ok(ProjectType::JupyterNotebook),
            "script" | "python" => Ok(ProjectType::Script),
            other => Err(SetupError::config(
                Step::Validate,
                format!(
                    "unrecognized project type '{}'. Valid project types: {}",
                    other,
                    Self::VALID.join(", ")
                ),
            )),
        }
    }
}

/// What to do when the project root already exists and is not empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExistingDirPolicy {
    /// Fail with a path error before touching anything
    #[default]
    Abort,
    /// Reuse the directory; scaffolded files are overwritten
    Reuse,
}

/// A single scaffolding request.
///
/// The project root is always `<target>/<name>`; `target` must already exist.
/// The project type is kept as given and validated by the orchestrator, so an
/// unrecognized value fails the same way whatever the filesystem looks like.
#[derive(Debug, Clone)]
pub struct ProjectRequest {
    target: PathBuf,
    name: String,
    project_type: String,
    init_repo: bool,
    existing: ExistingDirPolicy,
}

impl ProjectRequest {
    pub fn builder() -> ProjectRequestBuilder {
        ProjectRequestBuilder::default()
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn init_repo(&self) -> bool {
        self.init_repo
    }

    pub fn existing_policy(&self) -> ExistingDirPolicy {
        self.existing
    }

    /// Parses the requested project type.
    pub fn project_type(&self) -> Result<ProjectType> {
        self.project_type.parse()
    }

    /// The fixed package list installed into every environment.
    pub fn packages(&self) -> Vec<String> {
        STANDARD_PACKAGES.iter().map(|p| p.to_string()).collect()
    }

    /// Validates the name and type without touching the filesystem.
    pub fn validate(&self) -> Result<ProjectType> {
        validate_project_name(&self.name)?;
        self.project_type()
    }

    /// Absolute project root: `absolutize(target) / name`.
    pub fn resolve_project_dir(&self) -> Result<PathBuf> {
        resolve_project_dir(&self.target, &self.name, Step::ResolveDirectory)
    }
}

/// Joins `name` onto the absolutized `target`; failures are path errors at `step`.
pub fn resolve_project_dir(target: &Path, name: &str, step: Step) -> Result<PathBuf> {
    let target = target.absolutize().map_err(|e| {
        SetupError::path(step, format!("cannot resolve {}: {}", target.display(), e))
    })?;
    Ok(target.join(name))
}

/// Builder for [`ProjectRequest`].
#[derive(Debug, Default)]
pub struct ProjectRequestBuilder {
    target: Option<PathBuf>,
    name: Option<String>,
    project_type: Option<String>,
    init_repo: bool,
    existing: ExistingDirPolicy,
}

impl ProjectRequestBuilder {
    /// Sets the directory the project root is created in.
    ///
    /// # Required
    pub fn target<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.target = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the project name (directory name of the project root).
    ///
    /// # Required
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the project type.
    ///
    /// # Required
    pub fn project_type(mut self, project_type: impl Into<String>) -> Self {
        self.project_type = Some(project_type.into());
        self
    }

    /// Requests a git repository in the project root.
    ///
    /// Default: false
    pub fn init_repo(mut self, init_repo: bool) -> Self {
        self.init_repo = init_repo;
        self
    }

    /// Default: [`ExistingDirPolicy::Abort`]
    pub fn existing_policy(mut self, policy: ExistingDirPolicy) -> Self {
        self.existing = policy;
        self
    }

    /// Builds the request.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the target, name or project type is missing.
    pub fn build(self) -> Result<ProjectRequest> {
        let missing = |field: &str| {
            SetupError::config(Step::Validate, format!("missing required input: {field}"))
        };
        Ok(ProjectRequest {
            target: self.target.ok_or_else(|| missing("target path"))?,
            name: self.name.ok_or_else(|| missing("project name"))?,
            project_type: self.project_type.ok_or_else(|| missing("project type"))?,
            init_repo: self.init_repo,
            existing: self.existing,
        })
    }
}

/// Rejects empty names and names containing path separators or punctuation.
pub fn validate_project_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(SetupError::config(
            Step::Validate,
            "project name cannot be empty",
        ));
    }
    if let Some(bad) = name.chars().find(|c| FORBIDDEN_NAME_CHARS.contains(c)) {
        return Err(SetupError::config(
            Step::Validate,
            format!("invalid project name '{}': contains {:?}", name.escape_debug(), bad),
        ));
    }
    Ok(())
}
