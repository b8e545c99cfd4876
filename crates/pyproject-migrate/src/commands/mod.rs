//! Command dispatch for pyproject-migrate.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use tracing::debug;

use crate::cli::{self, SourceArgs};
use crate::legacy::{LegacyConfig, find_setup_cfg, project_root, setup_cfg};
use crate::printer::Printer;
use crate::translate::TranslateError;

mod convert;
mod dump;

pub use convert::convert;
pub use dump::dump;

/// Exit status for pyproject-migrate commands.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// The command succeeded.
    Success,

    /// The command failed due to an error in the user input.
    Failure,

    /// The command failed with an unexpected error.
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => Self::from(0),
            ExitStatus::Failure => Self::from(1),
            ExitStatus::Error => Self::from(2),
        }
    }
}

/// Dispatch a parsed CLI command to the appropriate handler.
pub fn dispatch(command: cli::Commands, printer: Printer) -> Result<ExitStatus> {
    debug!("Running `{}`", command.name());
    let result = match command {
        cli::Commands::Convert(args) => convert(&args, printer),
        cli::Commands::Dump(args) => dump(&args, printer),
    };
    match result {
        Err(err) if is_user_error(&err) => {
            printer.error_chain(&err);
            Ok(ExitStatus::Failure)
        }
        result => result,
    }
}

/// Errors caused by the content of the user's configuration, as opposed to
/// the environment.
fn is_user_error(err: &anyhow::Error) -> bool {
    err.downcast_ref::<TranslateError>().is_some()
        || err.downcast_ref::<setup_cfg::SetupCfgError>().is_some()
        || err.downcast_ref::<serde_json::Error>().is_some()
}

/// A legacy configuration together with the directory its `file:`
/// references are relative to.
pub(crate) struct LoadedConfig {
    pub(crate) config: LegacyConfig,
    pub(crate) project_root: PathBuf,
}

/// Read the legacy configuration selected on the command line.
pub(crate) fn load_config(source: &SourceArgs, printer: Printer) -> Result<LoadedConfig> {
    if let Some(json) = &source.from_json {
        printer.debug(&format!("Reading setup() arguments from {}", json.display()));
        let config = LegacyConfig::from_json_path(json)?;
        let project_root = if source.path.is_dir() {
            source.path.clone()
        } else {
            project_root(json).to_path_buf()
        };
        return Ok(LoadedConfig {
            config,
            project_root,
        });
    }

    let path = find_setup_cfg(&source.path)?;
    printer.debug(&format!("Reading {}", path.display()));
    let project_root = project_root(&path).to_path_buf();
    warn_about_setup_py(&project_root, printer);
    let config = setup_cfg::from_path(&path)?;
    Ok(LoadedConfig {
        config,
        project_root,
    })
}

/// `setup.py` arguments are only seen through `--from-json`.
fn warn_about_setup_py(project_root: &Path, printer: Printer) {
    if project_root.join("setup.py").is_file() {
        printer.warn(
            "setup.py is not executed; arguments passed to setup() are ignored unless \
             dumped with --from-json",
        );
    }
}
