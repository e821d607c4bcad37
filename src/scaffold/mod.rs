//! Project scaffolding orchestration.
//!
//! This module provides the [`Orchestrator`] that turns a [`ProjectRequest`]
//! into a ready-to-use data-science workspace.
//!
//! # Overview
//!
//! A run:
//! 1. Validates the project name and type
//! 2. Ensures `<target>/<name>` exists as a directory
//! 3. Creates an isolated environment in it
//! 4. Installs the standard package set
//! 5. Writes the starter artifact and support files
//! 6. Optionally initializes a git repository
//!
//! and returns a [`ProjectSummary`]. Side effects are not transactional: a
//! failure leaves earlier results on disk and reports them in the error.
//!
//! # Module Organization
//!
//! - [`request`] - request type, project types and name validation
//! - [`orchestrator`] - the [`Orchestrator`] sequencing
//! - [`state`] - run state machine and partial-state reporting
//! - [`summary`] - success report
//! - [`cleanup`] - teardown of a scaffolded project

pub mod cleanup;
pub mod orchestrator;
pub mod request;
pub mod state;
pub mod summary;

pub use cleanup::{TeardownReport, teardown};
pub use orchestrator::Orchestrator;
pub use request::{
    ExistingDirPolicy, ProjectRequest, ProjectRequestBuilder, ProjectType, resolve_project_dir,
    validate_project_name,
};
pub use state::{PartialState, SetupState, Step};
pub use summary::{ProjectSummary, RepoStatus};
