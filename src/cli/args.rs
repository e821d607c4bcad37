//! Command line argument parsing and validation.
//!
//! This module provides CLI argument parsing using clap and converts the
//! parsed arguments into a [`ProjectRequest`] and runtime configuration.

use crate::config::{PYTHON_ENV_VAR, ToolSettings};
use crate::error::Result;
use crate::scaffold::{ExistingDirPolicy, ProjectRequest};
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Data-science project scaffolder
#[derive(Parser, Debug)]
#[command(
    name = "ds_project_setup",
    version,
    about = "Set up a data-science project: virtual environment, packages, starter file, git",
    long_about = "Creates <PATH>/<NAME> containing a Python virtual environment (.venv) with numpy,
pandas, openpyxl, scikit-learn, matplotlib, seaborn and notebook installed, a starter
notebook or script, requirements.txt, .gitignore and a data/ directory, and optionally
a git repository.

Usage:
  ds_project_setup --path ~/work --name churn --project-type jupyter-notebook --git
  ds_project_setup -f . -n scratch -p script
  ds_project_setup -f ~/work -n churn --cleanup

Nothing is rolled back on failure: the error names the failing step and lists what
was left on disk.

Exit codes: 0 success, 2 configuration, 3 path, 4 environment, 5 install, 6 repository."
)]
pub struct Args {
    /// Existing directory in which the project directory is created
    #[arg(short = 'f', long = "path", visible_alias = "file-path", value_name = "DIR")]
    pub path: PathBuf,

    /// Project name; the project directory is <PATH>/<NAME>
    #[arg(short, long, value_name = "NAME")]
    pub name: String,

    /// Starter artifact: jupyter-notebook or script
    #[arg(
        short = 'p',
        long,
        value_name = "TYPE",
        required_unless_present = "cleanup"
    )]
    pub project_type: Option<String>,

    /// Initialize a git repository in the project directory
    #[arg(short = 'g', long)]
    pub git: bool,

    /// Reuse the project directory even if it is not empty
    #[arg(long)]
    pub force: bool,

    /// Remove a previously scaffolded project instead of creating one
    #[arg(short = 'c', long, conflicts_with_all = ["project_type", "git", "force"])]
    pub cleanup: bool,

    /// Python interpreter used to create the environment
    #[arg(long, env = PYTHON_ENV_VAR, value_name = "PYTHON")]
    pub python: Option<PathBuf>,

    /// Skip upgrading pip inside the new environment
    #[arg(long)]
    pub no_pip_upgrade: bool,

    /// Print the result as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only print errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Default log filter for the requested verbosity.
    pub fn log_level(&self) -> log::LevelFilter {
        if self.quiet {
            return log::LevelFilter::Error;
        }
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }

    /// Builds the scaffolding request from the arguments.
    pub fn to_request(&self) -> Result<ProjectRequest> {
        let mut builder = ProjectRequest::builder()
            .target(&self.path)
            .name(self.name.clone())
            .init_repo(self.git)
            .existing_policy(if self.force {
                ExistingDirPolicy::Reuse
            } else {
                ExistingDirPolicy::Abort
            });
        if let Some(project_type) = &self.project_type {
            builder = builder.project_type(project_type.clone());
        }
        builder.build()
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for colored terminal output
    output: super::OutputManager,
    tools: ToolSettings,
    json: bool,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        Self {
            output: super::OutputManager::new(args.verbose > 0, args.quiet || args.json),
            tools: ToolSettings {
                python: args.python.clone(),
                upgrade_pip: !args.no_pip_upgrade,
            },
            json: args.json,
        }
    }
}

impl RuntimeConfig {
    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }

    pub fn tools(&self) -> &ToolSettings {
        &self.tools
    }

    pub fn json(&self) -> bool {
        self.json
    }
}
