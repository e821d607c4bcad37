//! Blocking subprocess execution with captured output.

use crate::error::ToolError;
use std::process::{Command, Output};

/// Renders a command line for logs and error messages.
pub(crate) fn render(command: &Command) -> String {
    std::iter::once(command.get_program())
        .chain(command.get_args())
        .map(|part| part.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Runs `command` to completion and returns its output.
///
/// A non-zero exit becomes [`ToolError::Failed`] carrying stderr (or stdout
/// when stderr is empty, as pip sometimes reports errors there).
pub(crate) fn run(mut command: Command) -> Result<Output, ToolError> {
    let rendered = render(&command);
    log::debug!("Running: {}", rendered);

    let output = command.output()?;

    if output.status.success() {
        log::trace!(
            "`{}` stdout:\n{}",
            rendered,
            String::from_utf8_lossy(&output.stdout)
        );
        return Ok(output);
    }

    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    let detail = if stderr.is_empty() {
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    } else {
        stderr
    };
    let status = match output.status.code() {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".to_string(),
    };

    log::debug!("`{}` failed with {}", rendered, status);
    Err(ToolError::Failed {
        command: rendered,
        status,
        stderr: detail,
    })
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn renders_program_and_args() {
        let mut cmd = Command::new("python3");
        cmd.args(["-m", "venv", ".venv"]);
        assert_eq!(render(&cmd), "python3 -m venv .venv");
    }

    #[test]
    fn non_zero_exit_carries_stderr() {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "echo boom >&2; exit 3"]);
        match run(cmd) {
            Err(ToolError::Failed { status, stderr, .. }) => {
                assert_eq!(status, "exit code 3");
                assert_eq!(stderr, "boom");
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn missing_program_is_io_error() {
        let cmd = Command::new("definitely-not-a-real-program-7f3a");
        assert!(matches!(run(cmd), Err(ToolError::Io(_))));
    }
}
