//! Terminal output utilities.
//!
//! Status messages go to stderr so stdout carries only command results.

use std::io::{self, Write};

use console::{Style, Term};
use serde::Serialize;

use crate::error::CliError;

/// Terminal output formatter.
pub(crate) struct Output {
    term: Term,
    red: Style,
    dim: Style,
}

impl Output {
    /// Create a new output formatter.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            red: Style::new().red(),
            dim: Style::new().dim(),
        }
    }

    /// Print an info message (dimmed).
    pub(crate) fn info(&self, msg: &str) {
        let _ = self.term.write_line(&self.dim.apply_to(msg).to_string());
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.term.write_line(&self.red.apply_to(msg).to_string());
    }
}

/// Write `value` as JSON to stdout.
pub(crate) fn write_json<T: Serialize>(value: &T, pretty: bool) -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();
    if pretty {
        serde_json::to_writer_pretty(&mut stdout, value)?;
    } else {
        serde_json::to_writer(&mut stdout, value)?;
    }
    writeln!(stdout)?;
    Ok(())
}

/// Write a line to stdout.
pub(crate) fn write_line(line: &str) -> Result<(), CliError> {
    writeln!(io::stdout().lock(), "{line}")?;
    Ok(())
}
