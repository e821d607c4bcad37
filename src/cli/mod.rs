//! Command line interface for the project scaffolder.
//!
//! Parses arguments, runs setup or cleanup, and turns the outcome into a
//! printed report and a process exit code.

mod args;
mod output;

pub use args::{Args, RuntimeConfig};
pub use output::OutputManager;

use crate::error::SetupError;
use crate::scaffold::{Orchestrator, ProjectSummary, TeardownReport, teardown};

/// Main CLI entry point.
///
/// Returns the process exit code: `0` on success, or the failing error's
/// [`SetupError::exit_code`]. `Err` is reserved for terminal I/O failures.
pub fn run(args: Args) -> anyhow::Result<i32> {
    let config = RuntimeConfig::from(&args);

    let outcome = if args.cleanup {
        teardown(&args.path, &args.name).map(Outcome::Removed)
    } else {
        match args.to_request() {
            Ok(request) => {
                config.output().progress(&format!(
                    "Setting up '{}' in {}",
                    request.name(),
                    request.target().display()
                ))?;
                Orchestrator::with_system_tools(config.tools())
                    .setup(request)
                    .map(Outcome::Created)
            }
            Err(e) => Err(e),
        }
    };

    match outcome {
        Ok(outcome) => {
            report_success(&config, &outcome)?;
            Ok(0)
        }
        Err(error) => {
            report_failure(&config, &error)?;
            Ok(error.exit_code())
        }
    }
}

enum Outcome {
    Created(ProjectSummary),
    Removed(TeardownReport),
}

fn report_success(config: &RuntimeConfig, outcome: &Outcome) -> anyhow::Result<()> {
    let output = config.output();
    match outcome {
        Outcome::Created(summary) => {
            if config.json() {
                let value = serde_json::json!({ "status": "ok", "summary": summary });
                output.raw(&serde_json::to_string_pretty(&value)?)?;
                return Ok(());
            }
            output.success("Project ready")?;
            output.section("Summary")?;
            for line in summary.lines() {
                output.report(&line)?;
            }
        }
        Outcome::Removed(report) => {
            if config.json() {
                let value = serde_json::json!({
                    "status": "ok",
                    "removed": report.removed,
                    "project_dir": report.project_dir,
                });
                output.raw(&serde_json::to_string_pretty(&value)?)?;
                return Ok(());
            }
            output.success(&format!("Removed {}", report.project_dir.display()))?;
            for entry in &report.removed {
                output.verbose(entry)?;
            }
        }
    }
    Ok(())
}

fn report_failure(config: &RuntimeConfig, error: &SetupError) -> anyhow::Result<()> {
    let output = config.output();
    if config.json() {
        let value = serde_json::json!({
            "status": "error",
            "kind": error.kind,
            "step": error.step,
            "cause": error.cause,
            "exit_code": error.exit_code(),
            "partial": error.partial,
        });
        output.raw(&serde_json::to_string_pretty(&value)?)?;
        return Ok(());
    }

    output.error(&error.to_string())?;
    if let Some(partial) = &error.partial {
        output.warn("left on disk (not cleaned up):")?;
        for line in partial.describe() {
            output.detail(&line)?;
        }
    }
    for suggestion in error.recovery_suggestions() {
        output.indent(&format!("hint: {suggestion}"))?;
    }
    Ok(())
}
