//! Orchestrator sequencing tests.
//!
//! The four collaborators are replaced by fakes that record their calls into
//! a shared log and return controlled results, so these tests never spawn
//! python, pip or git.

use ds_project_setup::config::STANDARD_PACKAGES;
use ds_project_setup::error::{ErrorKind, ToolError};
use ds_project_setup::scaffold::{
    ExistingDirPolicy, Orchestrator, ProjectRequest, ProjectType, RepoStatus, SetupState, Step,
};
use ds_project_setup::tools::{
    ArtifactScaffolder, ConfirmedPackages, EnvironmentCreator, EnvironmentHandle,
    InstalledPackage, PackageInstaller, RepoHandle, RepositoryInitializer, TemplateScaffolder,
};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

type CallLog = Rc<RefCell<Vec<&'static str>>>;

struct FakeEnvironment {
    log: CallLog,
    fail: bool,
}

impl EnvironmentCreator for FakeEnvironment {
    fn create(&self, project_dir: &Path) -> Result<EnvironmentHandle, ToolError> {
        self.log.borrow_mut().push("environment");
        if self.fail {
            return Err(ToolError::NotFound {
                tool: "python3".to_string(),
                reason: "cannot find binary path".to_string(),
            });
        }
        let root = project_dir.join(".venv");
        std::fs::create_dir_all(root.join("bin"))?;
        Ok(EnvironmentHandle {
            python: root.join("bin").join("python"),
            root,
        })
    }
}

#[derive(Clone, Copy)]
enum InstallOutcome {
    Everything,
    NetworkFailure,
    DropLast,
}

struct FakeInstaller {
    log: CallLog,
    outcome: InstallOutcome,
    requested: Rc<RefCell<Vec<String>>>,
}

impl PackageInstaller for FakeInstaller {
    fn install(
        &self,
        env: &EnvironmentHandle,
        packages: &[String],
    ) -> Result<ConfirmedPackages, ToolError> {
        self.log.borrow_mut().push("install");
        assert!(env.root.is_dir(), "installer ran before environment existed");
        self.requested.borrow_mut().extend(packages.iter().cloned());
        let installed = |names: &[String]| -> Vec<InstalledPackage> {
            names
                .iter()
                .map(|n| InstalledPackage {
                    name: n.clone(),
                    version: "1.0.0".to_string(),
                })
                .collect()
        };
        match self.outcome {
            InstallOutcome::Everything => Ok(ConfirmedPackages(installed(packages))),
            InstallOutcome::NetworkFailure => Err(ToolError::Failed {
                command: "python -m pip install numpy".to_string(),
                status: "exit code 1".to_string(),
                stderr: "Could not fetch URL: connection refused".to_string(),
            }),
            InstallOutcome::DropLast => Err(ToolError::Incomplete(format!(
                "partial install, missing: {}",
                packages[packages.len() - 1]
            ))),
        }
    }
}

struct RecordingScaffolder {
    log: CallLog,
}

impl ArtifactScaffolder for RecordingScaffolder {
    fn create_artifact(
        &self,
        project_dir: &Path,
        kind: ProjectType,
    ) -> Result<PathBuf, ToolError> {
        self.log.borrow_mut().push("artifact");
        TemplateScaffolder::new().create_artifact(project_dir, kind)
    }
}

struct FakeRepository {
    log: CallLog,
    fail: bool,
}

impl RepositoryInitializer for FakeRepository {
    fn init(&self, project_dir: &Path) -> Result<RepoHandle, ToolError> {
        self.log.borrow_mut().push("repository");
        if self.fail {
            return Err(ToolError::NotFound {
                tool: "git".to_string(),
                reason: "cannot find binary path".to_string(),
            });
        }
        let git_dir = project_dir.join(".git");
        std::fs::create_dir_all(&git_dir)?;
        Ok(RepoHandle { git_dir })
    }
}

struct Harness {
    log: CallLog,
    requested: Rc<RefCell<Vec<String>>>,
    orchestrator: Orchestrator,
}

struct HarnessBuilder {
    env_fails: bool,
    install: InstallOutcome,
    repo_fails: bool,
}

impl HarnessBuilder {
    fn new() -> Self {
        Self {
            env_fails: false,
            install: InstallOutcome::Everything,
            repo_fails: false,
        }
    }

    fn env_fails(mut self) -> Self {
        self.env_fails = true;
        self
    }

    fn install(mut self, outcome: InstallOutcome) -> Self {
        self.install = outcome;
        self
    }

    fn repo_fails(mut self) -> Self {
        self.repo_fails = true;
        self
    }

    fn build(self) -> Harness {
        let log: CallLog = Rc::default();
        let requested = Rc::new(RefCell::new(Vec::new()));
        let orchestrator = Orchestrator::new(
            Box::new(FakeEnvironment {
                log: log.clone(),
                fail: self.env_fails,
            }),
            Box::new(FakeInstaller {
                log: log.clone(),
                outcome: self.install,
                requested: requested.clone(),
            }),
            Box::new(RecordingScaffolder { log: log.clone() }),
            Box::new(FakeRepository {
                log: log.clone(),
                fail: self.repo_fails,
            }),
        );
        Harness {
            log,
            requested,
            orchestrator,
        }
    }
}

impl Harness {
    fn calls(&self) -> Vec<&'static str> {
        self.log.borrow().clone()
    }
}

fn request(target: &Path, name: &str, project_type: &str, git: bool) -> ProjectRequest {
    ProjectRequest::builder()
        .target(target)
        .name(name)
        .project_type(project_type)
        .init_repo(git)
        .build()
        .unwrap()
}

#[test]
fn notebook_project_contains_environment_packages_and_one_artifact() {
    let tmp = tempfile::tempdir().unwrap();
    let harness = HarnessBuilder::new().build();

    let summary = harness
        .orchestrator
        .setup(request(tmp.path(), "churn", "jupyter-notebook", false))
        .unwrap();

    let project = tmp.path().join("churn");
    assert_eq!(summary.project_dir, project);
    assert_eq!(summary.project_type, ProjectType::JupyterNotebook);
    assert_eq!(summary.environment, project.join(".venv"));
    assert!(project.join(".venv").is_dir());
    assert_eq!(summary.artifact, project.join("solution.ipynb"));
    assert!(summary.artifact.is_file());
    assert!(!project.join("solution.py").exists());

    let names: Vec<&str> = summary.packages.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, STANDARD_PACKAGES);
    assert_eq!(*harness.requested.borrow(), STANDARD_PACKAGES);

    assert_eq!(summary.repository, RepoStatus::Skipped);
    assert_eq!(harness.calls(), vec!["environment", "install", "artifact"]);
    assert_eq!(summary.state, SetupState::Done);
}

#[test]
fn support_files_are_written() {
    let tmp = tempfile::tempdir().unwrap();
    let harness = HarnessBuilder::new().build();

    harness
        .orchestrator
        .setup(request(tmp.path(), "sales", "script", false))
        .unwrap();

    let project = tmp.path().join("sales");
    assert!(project.join("data").is_dir());
    let requirements = std::fs::read_to_string(project.join("requirements.txt")).unwrap();
    assert_eq!(requirements.lines().collect::<Vec<_>>(), STANDARD_PACKAGES);
    let gitignore = std::fs::read_to_string(project.join(".gitignore")).unwrap();
    assert!(gitignore.lines().any(|l| l == ".venv/"));
}

#[test]
fn unknown_project_type_is_config_error_before_anything_runs() {
    let tmp = tempfile::tempdir().unwrap();
    let harness = HarnessBuilder::new().build();

    let err = harness
        .orchestrator
        .setup(request(tmp.path(), "churn", "spreadsheet", true))
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Config);
    assert_eq!(err.step, Step::Validate);
    assert!(err.partial.is_none());
    assert!(harness.calls().is_empty());
    assert!(!tmp.path().join("churn").exists());
}

#[test]
fn unknown_project_type_wins_over_filesystem_problems() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("churn"), "not a directory").unwrap();
    let harness = HarnessBuilder::new().build();

    let err = harness
        .orchestrator
        .setup(request(tmp.path(), "churn", "spreadsheet", false))
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Config);

    let err = harness
        .orchestrator
        .setup(request(&tmp.path().join("missing"), "churn", "spreadsheet", false))
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Config);
}

#[test]
fn project_path_that_is_a_file_fails_before_environment() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("churn"), "not a directory").unwrap();
    let harness = HarnessBuilder::new().build();

    let err = harness
        .orchestrator
        .setup(request(tmp.path(), "churn", "script", false))
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Path);
    assert_eq!(err.step, Step::ResolveDirectory);
    assert!(harness.calls().is_empty());
}

#[test]
fn missing_target_directory_is_path_error() {
    let tmp = tempfile::tempdir().unwrap();
    let harness = HarnessBuilder::new().build();

    let err = harness
        .orchestrator
        .setup(request(&tmp.path().join("nowhere"), "churn", "script", false))
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Path);
    assert!(err.cause.contains("does not exist"));
    assert!(harness.calls().is_empty());
}

#[test]
fn install_failure_leaves_environment_and_skips_later_steps() {
    let tmp = tempfile::tempdir().unwrap();
    let harness = HarnessBuilder::new()
        .install(InstallOutcome::NetworkFailure)
        .build();

    let err = harness
        .orchestrator
        .setup(request(tmp.path(), "churn", "jupyter-notebook", true))
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Install);
    assert_eq!(err.step, Step::InstallPackages);
    assert!(err.cause.contains("connection refused"));

    let project = tmp.path().join("churn");
    assert!(project.join(".venv").is_dir());
    assert!(!project.join("solution.ipynb").exists());
    assert!(!project.join(".git").exists());
    assert_eq!(harness.calls(), vec!["environment", "install"]);

    let partial = err.partial.expect("partial state reported");
    assert_eq!(partial.project_dir, project);
    assert!(partial.created_dir);
    assert_eq!(partial.entries, vec![".venv/"]);
}

#[test]
fn partial_install_is_install_error() {
    let tmp = tempfile::tempdir().unwrap();
    let harness = HarnessBuilder::new().install(InstallOutcome::DropLast).build();

    let err = harness
        .orchestrator
        .setup(request(tmp.path(), "churn", "script", false))
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Install);
    assert!(err.cause.contains("missing: notebook"));
    assert!(!tmp.path().join("churn").join("solution.py").exists());
}

#[test]
fn environment_failure_reports_created_directory() {
    let tmp = tempfile::tempdir().unwrap();
    let harness = HarnessBuilder::new().env_fails().build();

    let err = harness
        .orchestrator
        .setup(request(tmp.path(), "churn", "script", false))
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Environment);
    assert_eq!(err.exit_code(), 4);
    let partial = err.partial.expect("partial state reported");
    assert!(partial.created_dir);
    assert!(partial.entries.is_empty());
    assert!(tmp.path().join("churn").is_dir());
    assert_eq!(harness.calls(), vec!["environment"]);
}

#[test]
fn successive_runs_produce_independent_projects() {
    let tmp = tempfile::tempdir().unwrap();
    let harness = HarnessBuilder::new().build();

    let notebook = harness
        .orchestrator
        .setup(request(tmp.path(), "first", "jupyter-notebook", false))
        .unwrap();
    let script = harness
        .orchestrator
        .setup(request(tmp.path(), "second", "script", false))
        .unwrap();

    assert_ne!(notebook.project_dir, script.project_dir);
    let first = tmp.path().join("first");
    let second = tmp.path().join("second");
    assert!(first.join("solution.ipynb").is_file());
    assert!(!first.join("solution.py").exists());
    assert!(second.join("solution.py").is_file());
    assert!(!second.join("solution.ipynb").exists());
}

#[test]
fn repository_created_when_requested() {
    let tmp = tempfile::tempdir().unwrap();
    let harness = HarnessBuilder::new().build();

    let summary = harness
        .orchestrator
        .setup(request(tmp.path(), "churn", "script", true))
        .unwrap();

    assert_eq!(summary.repository, RepoStatus::Created);
    assert!(summary.repository.created());
    assert!(tmp.path().join("churn").join(".git").is_dir());
    assert_eq!(summary.state, SetupState::Done);
    assert_eq!(
        harness.calls(),
        vec!["environment", "install", "artifact", "repository"]
    );
}

#[test]
fn existing_repository_is_left_alone() {
    let tmp = tempfile::tempdir().unwrap();
    let project = tmp.path().join("churn");
    std::fs::create_dir_all(project.join(".git")).unwrap();
    let harness = HarnessBuilder::new().build();

    let request = ProjectRequest::builder()
        .target(tmp.path())
        .name("churn")
        .project_type("script")
        .init_repo(true)
        .existing_policy(ExistingDirPolicy::Reuse)
        .build()
        .unwrap();
    let summary = harness.orchestrator.setup(request).unwrap();

    assert_eq!(summary.repository, RepoStatus::AlreadyPresent);
    assert!(!summary.repository.created());
    assert!(!harness.calls().contains(&"repository"));
}

#[test]
fn repository_failure_keeps_scaffolded_files() {
    let tmp = tempfile::tempdir().unwrap();
    let harness = HarnessBuilder::new().repo_fails().build();

    let err = harness
        .orchestrator
        .setup(request(tmp.path(), "churn", "script", true))
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Repo);
    assert_eq!(err.step, Step::InitRepository);
    let partial = err.partial.expect("partial state reported");
    assert!(partial.entries.contains(&"solution.py".to_string()));
    assert!(tmp.path().join("churn").join("solution.py").is_file());
}

#[test]
fn non_empty_directory_requires_reuse_policy() {
    let tmp = tempfile::tempdir().unwrap();
    let project = tmp.path().join("churn");
    std::fs::create_dir(&project).unwrap();
    std::fs::write(project.join("notes.md"), "keep").unwrap();
    let harness = HarnessBuilder::new().build();

    let err = harness
        .orchestrator
        .setup(request(tmp.path(), "churn", "script", false))
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Path);
    assert!(err.cause.contains("not empty"));
    assert!(harness.calls().is_empty());

    let reuse = ProjectRequest::builder()
        .target(tmp.path())
        .name("churn")
        .project_type("script")
        .existing_policy(ExistingDirPolicy::Reuse)
        .build()
        .unwrap();
    harness.orchestrator.setup(reuse).unwrap();
    assert!(project.join("notes.md").is_file());
    assert!(project.join("solution.py").is_file());
}

#[test]
fn reusing_a_notebook_project_as_script_replaces_the_starter_file() {
    let tmp = tempfile::tempdir().unwrap();
    let project = tmp.path().join("churn");
    let harness = HarnessBuilder::new().build();

    harness
        .orchestrator
        .setup(request(tmp.path(), "churn", "jupyter-notebook", false))
        .unwrap();
    assert!(project.join("solution.ipynb").is_file());

    let rerun = ProjectRequest::builder()
        .target(tmp.path())
        .name("churn")
        .project_type("script")
        .existing_policy(ExistingDirPolicy::Reuse)
        .build()
        .unwrap();
    let summary = harness.orchestrator.setup(rerun).unwrap();

    assert_eq!(summary.project_type, ProjectType::Script);
    assert_eq!(summary.artifact, project.join("solution.py"));
    assert!(project.join("solution.py").is_file());
    assert!(!project.join("solution.ipynb").exists());
}

#[test]
fn empty_existing_directory_is_reused() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::create_dir(tmp.path().join("churn")).unwrap();
    let harness = HarnessBuilder::new().install(InstallOutcome::NetworkFailure).build();

    let err = harness
        .orchestrator
        .setup(request(tmp.path(), "churn", "script", false))
        .unwrap_err();

    let partial = err.partial.expect("partial state reported");
    assert!(!partial.created_dir);
}
