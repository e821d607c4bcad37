//! Project layout constants and tool settings.

use std::path::PathBuf;

/// Environment variable naming the Python interpreter used to create environments
pub const PYTHON_ENV_VAR: &str = "DS_SETUP_PYTHON";

/// Directory (inside the project root) holding the isolated environment
pub const ENVIRONMENT_DIR: &str = ".venv";

/// Directory for raw data files
pub const DATA_DIR: &str = "data";

/// Starter notebook file name
pub const NOTEBOOK_FILE: &str = "solution.ipynb";

/// Starter script file name
pub const SCRIPT_FILE: &str = "solution.py";

pub const REQUIREMENTS_FILE: &str = "requirements.txt";

pub const GITIGNORE_FILE: &str = ".gitignore";

/// Repository metadata directory
pub const GIT_DIR: &str = ".git";

/// Common data-science libraries installed into every new environment, in install order.
pub const STANDARD_PACKAGES: &[&str] = &[
    "numpy",
    "pandas",
    "openpyxl",
    "scikit-learn",
    "matplotlib",
    "seaborn",
    "notebook",
];

/// Patterns written to `.gitignore`
pub const IGNORE_PATTERNS: &[&str] = &[
    ".venv/",
    "data/",
    ".ipynb_checkpoints/",
    ".vscode/",
    "__pycache__/",
    ".DS_Store",
    "*.csv",
    "*.xlsx",
    "*.xls",
];

/// Entries `--cleanup` is allowed to delete from a project root
pub const SCAFFOLDED_ENTRIES: &[&str] = &[
    ENVIRONMENT_DIR,
    DATA_DIR,
    GIT_DIR,
    ".ipynb_checkpoints",
    SCRIPT_FILE,
    NOTEBOOK_FILE,
    REQUIREMENTS_FILE,
    GITIGNORE_FILE,
    ".DS_Store",
];

/// Knobs passed to the system tool collaborators.
#[derive(Debug, Clone)]
pub struct ToolSettings {
    /// Interpreter used for `-m venv`. When unset, `python3` then `python` are looked up on PATH.
    pub python: Option<PathBuf>,
    /// Upgrade pip inside the new environment before installing packages
    pub upgrade_pip: bool,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            python: None,
            upgrade_pip: true,
        }
    }
}
