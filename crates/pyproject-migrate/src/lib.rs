//! pyproject-migrate: translate setuptools `setup.cfg` / `setup()` arguments
//! into a PEP 621 `pyproject.toml`.
//!
//! This crate provides the main entry point and command dispatch for the
//! binary, plus the library pieces it is built from: the legacy readers
//! ([`legacy`]), the translator ([`translate`]) and the manifest writer
//! ([`manifest`]).

#![deny(clippy::print_stdout, clippy::print_stderr)]

use std::ffi::OsString;
use std::process::ExitCode;

use clap::Parser;

use crate::cli::Cli;
use crate::commands::ExitStatus;
use crate::printer::Printer;

pub mod cli;
pub mod commands;
pub mod legacy;
pub mod logging;
pub mod manifest;
pub mod printer;
pub mod translate;

pub use translate::{TranslateError, TranslateOptions, Translator, translate};

/// Entry point for the pyproject-migrate CLI.
///
/// Parses CLI arguments, sets up logging, and dispatches to the appropriate
/// command handler.
pub fn main<I, T>(args: I) -> ExitCode
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) => err.exit(),
    };

    let printer = Printer::new(cli.verbose, cli.quiet);

    let result = logging::setup_logging(cli.verbose, cli.quiet)
        .and_then(|()| commands::dispatch(cli.command, printer));

    match result {
        Ok(code) => code.into(),
        Err(err) => {
            printer.error_chain(&err);
            ExitStatus::Error.into()
        }
    }
}
