//! Reader for JSON dumps of `setup()` keyword arguments.
//!
//! A dump carries every argument the project passed, most of which have no
//! `[project]` counterpart (`zip_safe`, `packages`, `cmdclass`, ...). Only the
//! fields the translator knows are held to a shape; the rest are kept on a
//! best-effort basis and never fail the read.

use std::path::Path;

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde_json::Value;
use tracing::debug;

use crate::legacy::field::LegacyField;
use crate::legacy::model::{FileRef, LegacyConfig, LegacyValue};
use crate::translate::TranslateError;

impl LegacyConfig {
    /// Parse a configuration from a JSON object of `setup()` keyword arguments.
    ///
    /// A known field of the wrong shape is a [`TranslateError::MalformedValue`]
    /// naming the field. Unknown fields that cannot be represented are dropped.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let raw: IndexMap<String, Value> = serde_json::from_str(content)?;

        let mut config = Self::new();
        for (key, value) in raw {
            match LegacyField::from_key(&key) {
                Some(field) => {
                    let converted = convert(&value).map_err(|reason| {
                        TranslateError::malformed(field, value.to_string(), reason)
                    })?;
                    config.insert_optional(key, converted);
                }
                None => match convert(&value) {
                    Ok(converted) => config.insert_optional(key, converted),
                    Err(reason) => debug!("Dropping `{key}` from the JSON dump: {reason}"),
                },
            }
        }
        Ok(config)
    }

    /// Read a JSON dump of `setup()` keyword arguments from the given path.
    pub fn from_json_path(path: &Path) -> Result<Self> {
        let content = fs_err::read_to_string(path)?;
        Self::from_json_str(&content)
            .with_context(|| format!("Failed to parse `{}`", path.display()))
    }
}

/// Convert one JSON value. `null` is absent; booleans and numbers become
/// their JSON text, so `"version": 1.0` reads as `"1.0"`.
fn convert(value: &Value) -> Result<Option<LegacyValue>, String> {
    match value {
        Value::Null => Ok(None),
        Value::String(text) => Ok(Some(LegacyValue::Text(text.clone()))),
        Value::Bool(_) | Value::Number(_) => Ok(Some(LegacyValue::Text(value.to_string()))),
        Value::Array(items) => items
            .iter()
            .map(list_item)
            .collect::<Result<Vec<_>, _>>()
            .map(|items| Some(LegacyValue::List(items))),
        Value::Object(entries) => {
            if entries.contains_key("file")
                && let Ok(file) = serde_json::from_value::<FileRef>(value.clone())
            {
                return Ok(Some(LegacyValue::File(file)));
            }
            let mut table = IndexMap::with_capacity(entries.len());
            for (key, entry) in entries {
                if let Some(entry) = convert(entry)? {
                    table.insert(key.clone(), entry);
                }
            }
            Ok(Some(LegacyValue::Table(table)))
        }
    }
}

/// A list item: `null` is an empty string, scalars are their text.
fn list_item(item: &Value) -> Result<String, String> {
    match item {
        Value::Null => Ok(String::new()),
        Value::String(text) => Ok(text.clone()),
        Value::Bool(_) | Value::Number(_) => Ok(item.to_string()),
        Value::Array(_) | Value::Object(_) => {
            Err("expected a list of strings, found a nested collection".to_owned())
        }
    }
}
