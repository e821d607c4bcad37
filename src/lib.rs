//! Data-science project scaffolding library
//!
//! This library sets up a new project workspace in one call:
//! - an isolated Python environment (`.venv`)
//! - the standard data-science package set, confirmed installed
//! - a starter Jupyter notebook or Python script
//! - an optional git repository
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod cli;
pub mod config;
pub mod error;
pub mod scaffold;
pub mod tools;
pub mod utils;

// Re-export commonly used types
pub use error::{ErrorKind, Result, SetupError, ToolError};
pub use scaffold::{Orchestrator, ProjectRequest, ProjectSummary, ProjectType};
