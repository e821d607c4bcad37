//! Colored terminal output honoring verbose and quiet modes.

use cyrup_termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use std::io::{self, Write};

/// Writes status lines to stderr and reports to stdout.
#[derive(Debug, Clone)]
pub struct OutputManager {
    verbose: bool,
    quiet: bool,
    color: ColorChoice,
}

impl OutputManager {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        let color = if std::env::var_os("NO_COLOR").is_some() {
            ColorChoice::Never
        } else {
            ColorChoice::Auto
        };
        Self {
            verbose,
            quiet,
            color,
        }
    }

    fn write_colored(
        &self,
        mut stream: StandardStream,
        color: Option<Color>,
        bold: bool,
        prefix: &str,
        message: &str,
    ) -> io::Result<()> {
        let mut spec = ColorSpec::new();
        spec.set_fg(color).set_bold(bold);
        stream.set_color(&spec)?;
        write!(stream, "{prefix}")?;
        stream.reset()?;
        writeln!(stream, "{message}")
    }

    /// Prints a message only in verbose mode
    pub fn verbose(&self, message: &str) -> io::Result<()> {
        if self.verbose && !self.quiet {
            self.write_colored(StandardStream::stderr(self.color), None, false, "  ", message)?;
        }
        Ok(())
    }

    pub fn progress(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.write_colored(
            StandardStream::stderr(self.color),
            Some(Color::Cyan),
            true,
            "→ ",
            message,
        )
    }

    pub fn success(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.write_colored(
            StandardStream::stderr(self.color),
            Some(Color::Green),
            true,
            "✓ ",
            message,
        )
    }

    /// Warnings are printed even in quiet mode
    pub fn warn(&self, message: &str) -> io::Result<()> {
        self.write_colored(
            StandardStream::stderr(self.color),
            Some(Color::Yellow),
            true,
            "warning: ",
            message,
        )
    }

    /// Errors are printed even in quiet mode
    pub fn error(&self, message: &str) -> io::Result<()> {
        self.write_colored(
            StandardStream::stderr(self.color),
            Some(Color::Red),
            true,
            "error: ",
            message,
        )
    }

    pub fn section(&self, title: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.write_colored(StandardStream::stderr(self.color), None, true, "", title)
    }

    /// Prints indented text to stderr
    pub fn indent(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mut stream = StandardStream::stderr(self.color);
        writeln!(stream, "  {message}")
    }

    /// Prints indented text to stderr, even in quiet mode
    pub fn detail(&self, message: &str) -> io::Result<()> {
        let mut stream = StandardStream::stderr(self.color);
        writeln!(stream, "  {message}")
    }

    /// Prints a report line to stdout; suppressed only in quiet mode
    pub fn report(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mut stream = StandardStream::stdout(self.color);
        writeln!(stream, "{message}")
    }

    /// Prints machine-readable output to stdout regardless of mode
    pub fn raw(&self, message: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{message}")
    }
}
