//! User-facing status output.
//!
//! Status lines go to stdout so that a release log captures the whole run;
//! failures go to stderr. Diagnostics belong in `log` instead.

use std::io::{self, Write};

/// Prints status lines according to verbosity settings.
#[derive(Debug, Clone, Copy)]
pub struct OutputManager {
    verbose: bool,
    quiet: bool,
}

impl OutputManager {
    /// Creates an output manager.
    ///
    /// `quiet` suppresses everything except errors; `verbose` enables
    /// [`OutputManager::verbose`] lines.
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    fn stdout(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mut out = io::stdout().lock();
        writeln!(out, "{}", message)
    }

    /// Plain line.
    pub fn println(&self, message: &str) -> io::Result<()> {
        self.stdout(message)
    }

    /// Stage start, e.g. `Creating source distribution...`.
    pub fn progress(&self, message: &str) -> io::Result<()> {
        self.stdout(message)
    }

    /// Stage completion.
    pub fn success(&self, message: &str) -> io::Result<()> {
        self.stdout(message)
    }

    /// Non-fatal warning.
    pub fn warn(&self, message: &str) -> io::Result<()> {
        self.stdout(message)
    }

    /// Detail shown only in verbose mode.
    pub fn verbose(&self, message: &str) -> io::Result<()> {
        if self.verbose {
            self.stdout(message)
        } else {
            Ok(())
        }
    }

    /// Failure line, never suppressed.
    pub fn error(&self, message: &str) -> io::Result<()> {
        let mut err = io::stderr().lock();
        writeln!(err, "{}", message)
    }
}
