//! Starter notebook and script generation.

use super::ArtifactScaffolder;
use crate::config::{NOTEBOOK_FILE, SCRIPT_FILE};
use crate::error::ToolError;
use crate::scaffold::ProjectType;
use crate::utils::fs::write_file;
use serde::Serialize;
use std::path::{Path, PathBuf};

const STARTER_IMPORTS: &str = "import numpy as np\nimport pandas as pd";

/// nbformat 4.5 notebook document.
#[derive(Debug, Serialize)]
struct Notebook {
    cells: Vec<Cell>,
    metadata: NotebookMetadata,
    nbformat: u32,
    nbformat_minor: u32,
}

#[derive(Debug, Serialize)]
#[serde(tag = "cell_type", rename_all = "lowercase")]
enum Cell {
    Markdown {
        id: String,
        metadata: serde_json::Map<String, serde_json::Value>,
        source: String,
    },
    Code {
        id: String,
        metadata: serde_json::Map<String, serde_json::Value>,
        source: String,
        execution_count: Option<u32>,
        outputs: Vec<serde_json::Value>,
    },
}

impl Cell {
    fn markdown(source: &str) -> Self {
        Cell::Markdown {
            id: cell_id(),
            metadata: Default::default(),
            source: source.to_string(),
        }
    }

    fn code(source: &str) -> Self {
        Cell::Code {
            id: cell_id(),
            metadata: Default::default(),
            source: source.to_string(),
            execution_count: None,
            outputs: Vec::new(),
        }
    }
}

#[derive(Debug, Serialize)]
struct NotebookMetadata {
    kernelspec: KernelSpec,
    language_info: LanguageInfo,
}

#[derive(Debug, Serialize)]
struct KernelSpec {
    display_name: &'static str,
    language: &'static str,
    name: &'static str,
}

#[derive(Debug, Serialize)]
struct LanguageInfo {
    name: &'static str,
}

/// Cell ids must be 1-64 characters of `[a-zA-Z0-9-_]`.
fn cell_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..8].to_string()
}

/// Renders the starter notebook as pretty-printed JSON.
pub fn notebook_json(title: &str) -> Result<String, ToolError> {
    let notebook = Notebook {
        cells: vec![
            Cell::markdown(&format!("# {title}")),
            Cell::code(STARTER_IMPORTS),
        ],
        metadata: NotebookMetadata {
            kernelspec: KernelSpec {
                display_name: "Python 3",
                language: "python",
                name: "python3",
            },
            language_info: LanguageInfo { name: "python" },
        },
        nbformat: 4,
        nbformat_minor: 5,
    };
    let mut json = serde_json::to_string_pretty(&notebook)?;
    json.push('\n');
    Ok(json)
}

/// Starter script contents.
pub fn script_source() -> String {
    format!("{STARTER_IMPORTS}\n")
}

/// Writes `solution.ipynb` or `solution.py` into the project root.
#[derive(Debug, Clone, Default)]
pub struct TemplateScaffolder;

impl TemplateScaffolder {
    pub fn new() -> Self {
        Self
    }

    /// File name of the artifact produced for `kind`.
    pub fn artifact_name(kind: ProjectType) -> &'static str {
        match kind {
            ProjectType::JupyterNotebook => NOTEBOOK_FILE,
            ProjectType::Script => SCRIPT_FILE,
        }
    }
}

impl ArtifactScaffolder for TemplateScaffolder {
    fn create_artifact(
        &self,
        project_dir: &Path,
        kind: ProjectType,
    ) -> Result<PathBuf, ToolError> {
        let path = project_dir.join(Self::artifact_name(kind));
        let contents = match kind {
            ProjectType::JupyterNotebook => {
                let title = project_dir
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "Solution Notebook".to_string());
                notebook_json(&title)?
            }
            ProjectType::Script => script_source(),
        };
        write_file(&path, &contents)?;
        log::info!("Created {} artifact at {}", kind, path.display());
        Ok(path)
    }
}
