//! Locate the `setup.cfg` for a project.
//!
//! `PYPROJECT_MIGRATE_SETUP_CFG` names an explicit file and takes precedence
//! over the path given on the command line.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

use crate::legacy::setup_cfg::SETUP_CFG;

/// Environment variable naming an explicit `setup.cfg`.
pub const SETUP_CFG_ENV: &str = "PYPROJECT_MIGRATE_SETUP_CFG";

/// Resolve the `setup.cfg` to read.
///
/// Resolution order:
/// 1. `PYPROJECT_MIGRATE_SETUP_CFG` environment variable (explicit path)
/// 2. `path` itself, if it is a file
/// 3. `path/setup.cfg`, if `path` is a directory
pub fn find_setup_cfg(path: &Path) -> Result<PathBuf> {
    if let Ok(explicit) = env::var(SETUP_CFG_ENV) {
        let explicit_path = PathBuf::from(&explicit);
        if explicit_path.is_file() {
            return Ok(explicit_path);
        }
        bail!("{SETUP_CFG_ENV} is set to '{explicit}' but the file does not exist");
    }

    if path.is_file() {
        return Ok(path.to_path_buf());
    }

    let candidate = path.join(SETUP_CFG);
    if candidate.is_file() {
        return Ok(candidate);
    }

    bail!("No {SETUP_CFG} found in {}", path.display());
}

/// Return the project root for a configuration file: the directory that
/// relative `file:` references are resolved against.
pub fn project_root(config_path: &Path) -> &Path {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
