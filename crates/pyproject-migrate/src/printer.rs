//! User-facing status messages on stderr.
//!
//! The manifest itself goes to stdout (or the `--output` file); everything
//! printed here is commentary about the migration. Errors are printed at
//! every level.

use anstream::eprintln;
use owo_colors::OwoColorize;

/// How much commentary to print, from `--quiet` and `--verbose`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Printer {
    /// Errors only.
    Quiet,
    /// Errors, warnings, and progress notes.
    Default,
    /// Everything, including which files are read.
    Verbose,
}

impl Printer {
    /// Pick a level from the global flags. `--quiet` wins over `--verbose`.
    pub fn new(verbosity: u8, quiet: bool) -> Self {
        match (quiet, verbosity) {
            (true, _) => Self::Quiet,
            (false, 0) => Self::Default,
            (false, _) => Self::Verbose,
        }
    }

    /// A progress note, e.g. where the manifest was written.
    pub fn info(self, message: &str) {
        if self != Self::Quiet {
            eprintln!("{message}");
        }
    }

    pub fn warn(self, message: &str) {
        if self != Self::Quiet {
            eprintln!("{}: {message}", "warning".yellow().bold());
        }
    }

    pub fn error(self, message: &str) {
        eprintln!("{}: {message}", "error".red().bold());
    }

    /// Print an error, then one `Caused by:` line per source.
    pub fn error_chain(self, err: &anyhow::Error) {
        let mut chain = err.chain();
        if let Some(head) = chain.next() {
            self.error(&head.to_string());
        }
        for cause in chain {
            eprintln!("  {}: {}", "Caused by".red().bold(), cause.to_string().trim());
        }
    }

    pub fn debug(self, message: &str) {
        if self == Self::Verbose {
            eprintln!("{}: {message}", "debug".dimmed());
        }
    }
}
