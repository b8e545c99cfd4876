//! Reader for `setup.cfg` files.
//!
//! Uses `configparser` in the dialect setuptools configures: keys keep their
//! case, indented lines continue the previous value, and only whole-line
//! comments are recognized. The last point matters: `pytest; python_version <
//! "3.8"` must keep its marker.

use std::path::Path;

use anyhow::{Context, Result};
use configparser::ini::Ini;
use indexmap::IndexMap;
use thiserror::Error;
use tracing::debug;

use crate::legacy::model::{FileRef, LegacyConfig, LegacyValue};

/// The conventional file name.
pub const SETUP_CFG: &str = "setup.cfg";

/// Errors raised while reading `setup.cfg`.
#[derive(Debug, Error)]
pub enum SetupCfgError {
    /// The INI syntax itself is broken, e.g. an unclosed section header.
    #[error("{0}")]
    Syntax(String),
}

/// Read and parse the `setup.cfg` at the given path.
pub fn from_path(path: &Path) -> Result<LegacyConfig> {
    let content = fs_err::read_to_string(path)?;
    parse(&content).with_context(|| format!("Failed to parse `{}`", path.display()))
}

/// Parse `setup.cfg` text into a [`LegacyConfig`].
pub fn parse(content: &str) -> Result<LegacyConfig, SetupCfgError> {
    let mut ini = Ini::new_cs();
    ini.set_multiline(true);
    let no_inline_comments: &[char] = &[];
    ini.set_inline_comment_symbols(Some(no_inline_comments));
    let sections = ini.read(content.to_owned()).map_err(SetupCfgError::Syntax)?;

    let mut config = LegacyConfig::new();
    for (section, options) in sections {
        // Options without a value (`key` alone on a line) carry nothing to translate.
        let options: IndexMap<String, String> = options
            .into_iter()
            .filter_map(|(key, value)| value.map(|value| (key, value)))
            .collect();
        match section.as_str() {
            "metadata" | "options" => {
                for (key, value) in options {
                    config.insert(key, scalar_value(value));
                }
            }
            "options.extras_require" => {
                config.insert("extras_require", table_value(options));
            }
            "options.entry_points" => {
                config.insert("entry_points", table_value(options));
            }
            _ => debug!("Skipping unsupported section [{section}]"),
        }
    }
    Ok(config)
}

/// Interpret a `[metadata]`/`[options]` value, recognizing `file:` directives.
fn scalar_value(value: String) -> LegacyValue {
    match FileRef::from_directive(&value) {
        Some(file) => LegacyValue::File(file),
        None => LegacyValue::Text(value),
    }
}

fn table_value(options: IndexMap<String, String>) -> LegacyValue {
    LegacyValue::Table(
        options
            .into_iter()
            .map(|(key, value)| (key, LegacyValue::Text(value)))
            .collect(),
    )
}
