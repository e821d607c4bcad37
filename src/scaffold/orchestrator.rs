//! Setup sequencing.
//!
//! This module provides the [`Orchestrator`] that runs the setup steps in
//! order and stops at the first failure.

use super::{
    ExistingDirPolicy, PartialState, ProjectRequest, ProjectSummary, ProjectType, RepoStatus,
    SetupState, Step,
};
use crate::config::{
    DATA_DIR, GIT_DIR, GITIGNORE_FILE, IGNORE_PATTERNS, REQUIREMENTS_FILE, ToolSettings,
};
use crate::error::{Result, SetupError};
use crate::tools::{
    ArtifactScaffolder, EnvironmentCreator, GitInitializer, PackageInstaller, PipInstaller,
    RepositoryInitializer, TemplateScaffolder, VenvCreator,
};
use crate::utils::fs;
use std::path::{Path, PathBuf};

/// Runs a [`ProjectRequest`] against four collaborators.
///
/// Steps run strictly in order, each a precondition for the next:
///
/// 1. Resolve and ensure the project root
/// 2. Create the isolated environment
/// 3. Install the standard package set
/// 4. Scaffold the starter artifact and support files
/// 5. Initialize a repository, when requested
///
/// Nothing is rolled back. A failure stops the run and the returned
/// [`SetupError`] records the step, the cause and what is left on disk.
///
/// # Examples
///
/// ```no_run
/// use ds_project_setup::config::ToolSettings;
/// use ds_project_setup::scaffold::{Orchestrator, ProjectRequest};
///
/// # fn example() -> ds_project_setup::Result<()> {
/// let request = ProjectRequest::builder()
///     .target("/home/me/work")
///     .name("churn")
///     .project_type("jupyter-notebook")
///     .init_repo(true)
///     .build()?;
///
/// let summary = Orchestrator::with_system_tools(&ToolSettings::default()).setup(request)?;
/// println!("created {}", summary.project_dir.display());
/// # Ok(())
/// # }
/// ```
pub struct Orchestrator {
    environment: Box<dyn EnvironmentCreator>,
    installer: Box<dyn PackageInstaller>,
    scaffolder: Box<dyn ArtifactScaffolder>,
    repository: Box<dyn RepositoryInitializer>,
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator").finish_non_exhaustive()
    }
}

/// Per-run bookkeeping: current state and what the run created.
struct Run {
    state: SetupState,
    init_repo: bool,
    project_dir: Option<PathBuf>,
    created_dir: bool,
}

impl Run {
    fn new(init_repo: bool) -> Self {
        Self {
            state: SetupState::Init,
            init_repo,
            project_dir: None,
            created_dir: false,
        }
    }

    /// Whether `step` is the one the current state runs next.
    fn expects(&self, step: Step) -> bool {
        self.state.next_step(self.init_repo) == Some(step)
    }

    fn advance(&mut self, step: Step) {
        match self.state.advance(step, self.init_repo) {
            Some(next) => {
                log::info!("{:?} -> {:?}", self.state, next);
                self.state = next;
            }
            None => debug_assert!(false, "{step} completed out of order in {:?}", self.state),
        }
    }

    fn finish(&mut self) -> SetupState {
        match self.state.finish(self.init_repo) {
            Some(done) => {
                log::info!("{:?} -> {:?}", self.state, done);
                self.state = done;
            }
            None => debug_assert!(false, "run finished early in {:?}", self.state),
        }
        self.state
    }

    /// Marks the run failed and attaches the observed filesystem state.
    fn fail(&mut self, error: SetupError) -> SetupError {
        self.state = SetupState::Failed(error.step);
        log::warn!("Setup failed: {}", error);
        match &self.project_dir {
            Some(dir) => error.with_partial(PartialState::capture(dir, self.created_dir)),
            None => error,
        }
    }
}

impl Orchestrator {
    /// Creates an orchestrator over the given collaborators.
    pub fn new(
        environment: Box<dyn EnvironmentCreator>,
        installer: Box<dyn PackageInstaller>,
        scaffolder: Box<dyn ArtifactScaffolder>,
        repository: Box<dyn RepositoryInitializer>,
    ) -> Self {
        Self {
            environment,
            installer,
            scaffolder,
            repository,
        }
    }

    /// Creates an orchestrator that shells out to python, pip and git.
    pub fn with_system_tools(settings: &ToolSettings) -> Self {
        Self::new(
            Box::new(VenvCreator::new(settings.python.clone())),
            Box::new(PipInstaller::new(settings.upgrade_pip)),
            Box::new(TemplateScaffolder::new()),
            Box::new(GitInitializer::new()),
        )
    }

    /// Runs the full setup sequence for `request`.
    ///
    /// # Errors
    ///
    /// - Config: unrecognized project type or invalid project name (nothing touched)
    /// - Path: target missing, project root is a file, non-empty root without
    ///   [`ExistingDirPolicy::Reuse`], or scaffolding writes failed
    /// - Environment / Install / Repo: the corresponding collaborator failed
    pub fn setup(&self, request: ProjectRequest) -> Result<ProjectSummary> {
        let mut run = Run::new(request.init_repo());

        let kind = request.validate().map_err(|e| run.fail(e))?;
        log::info!(
            "Setting up {} project '{}' in {}",
            kind,
            request.name(),
            request.target().display()
        );

        let project_dir = self
            .ensure_project_dir(&request, &mut run)
            .map_err(|e| run.fail(e))?;
        run.advance(Step::ResolveDirectory);

        let env = self
            .environment
            .create(&project_dir)
            .map_err(|e| run.fail(SetupError::environment(e.to_string())))?;
        run.advance(Step::CreateEnvironment);

        let packages = request.packages();
        let confirmed = self
            .installer
            .install(&env, &packages)
            .map_err(|e| run.fail(SetupError::install(e.to_string())))?;
        run.advance(Step::InstallPackages);

        let artifact = self
            .scaffold(&project_dir, kind, &packages)
            .map_err(|e| run.fail(e))?;
        run.advance(Step::ScaffoldArtifact);

        let repository = if run.expects(Step::InitRepository) {
            let status = self
                .init_repository(&project_dir)
                .map_err(|e| run.fail(e))?;
            run.advance(Step::InitRepository);
            status
        } else {
            log::debug!("Repository not requested, skipping");
            RepoStatus::Skipped
        };

        let state = run.finish();
        Ok(ProjectSummary {
            project_dir,
            project_type: kind,
            environment: env.root,
            packages: confirmed.into_inner(),
            artifact,
            repository,
            state,
        })
    }

    /// Step 1: computes the project root and makes sure it is a usable directory.
    fn ensure_project_dir(&self, request: &ProjectRequest, run: &mut Run) -> Result<PathBuf> {
        let step = Step::ResolveDirectory;
        let target = request.target();
        if !target.is_dir() {
            let reason = if target.exists() {
                "is not a directory"
            } else {
                "does not exist"
            };
            return Err(SetupError::path(
                step,
                format!("target path {} {}", target.display(), reason),
            ));
        }

        let project_dir = request.resolve_project_dir()?;
        if project_dir.exists() && !project_dir.is_dir() {
            return Err(SetupError::path(
                step,
                format!("{} exists and is not a directory", project_dir.display()),
            ));
        }

        if project_dir.is_dir() {
            let empty = fs::is_empty_dir(&project_dir).map_err(|e| {
                SetupError::path(step, format!("cannot read {}: {}", project_dir.display(), e))
            })?;
            if !empty && request.existing_policy() == ExistingDirPolicy::Abort {
                return Err(SetupError::path(
                    step,
                    format!(
                        "{} already exists and is not empty",
                        project_dir.display()
                    ),
                ));
            }
            log::debug!("Reusing existing directory {}", project_dir.display());
        }

        let created = fs::create_dir(&project_dir).map_err(|e| {
            SetupError::path(
                step,
                format!("cannot create {}: {}", project_dir.display(), e),
            )
        })?;
        run.project_dir = Some(project_dir.clone());
        run.created_dir = created;
        if created {
            log::info!("Created project directory {}", project_dir.display());
        }
        Ok(project_dir)
    }

    /// Step 4: starter artifact, then the data directory, requirements and ignore file.
    fn scaffold(
        &self,
        project_dir: &Path,
        kind: ProjectType,
        packages: &[String],
    ) -> Result<PathBuf> {
        let step = Step::ScaffoldArtifact;
        // A reused directory may hold the starter file of the other type
        let stale = project_dir.join(TemplateScaffolder::artifact_name(kind.other()));
        if fs::remove_entry(&stale).map_err(|e| {
            SetupError::path(step, format!("cannot remove {}: {}", stale.display(), e))
        })? {
            log::info!("Removed stale starter file {}", stale.display());
        }

        let artifact = self
            .scaffolder
            .create_artifact(project_dir, kind)
            .map_err(|e| SetupError::path(step, e.to_string()))?;

        let data_dir = project_dir.join(DATA_DIR);
        fs::create_dir(&data_dir).map_err(|e| {
            SetupError::path(step, format!("cannot create {}: {}", data_dir.display(), e))
        })?;

        let support_files = [
            (REQUIREMENTS_FILE, lines(packages.iter().map(String::as_str))),
            (GITIGNORE_FILE, lines(IGNORE_PATTERNS.iter().copied())),
        ];
        for (name, contents) in support_files {
            let path = project_dir.join(name);
            fs::write_file(&path, &contents).map_err(|e| {
                SetupError::path(step, format!("cannot write {}: {}", path.display(), e))
            })?;
        }

        Ok(artifact)
    }

    /// Step 5: an existing repository is left alone and reported as such.
    fn init_repository(&self, project_dir: &Path) -> Result<RepoStatus> {
        if project_dir.join(GIT_DIR).exists() {
            log::info!(
                "Repository already present in {}, not reinitializing",
                project_dir.display()
            );
            return Ok(RepoStatus::AlreadyPresent);
        }
        self.repository
            .init(project_dir)
            .map_err(|e| SetupError::repo(e.to_string()))?;
        Ok(RepoStatus::Created)
    }
}

fn lines<'a>(items: impl Iterator<Item = &'a str>) -> String {
    items.map(|item| format!("{item}\n")).collect()
}
