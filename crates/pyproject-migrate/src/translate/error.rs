use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::legacy::{LegacyField, LegacyValue};

/// Why a legacy configuration could not be translated.
///
/// Translation stops at the first error; no partial manifest is produced.
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("Missing required field `{field}`")]
    MissingRequiredField { field: &'static str },

    #[error("Invalid value for `{field}`: `{value}` ({reason})")]
    MalformedValue {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("Failed to read `{}` referenced by `{field}`", path.display())]
    ReadFile {
        field: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl TranslateError {
    pub(crate) fn missing(field: LegacyField) -> Self {
        Self::MissingRequiredField { field: field.key() }
    }

    pub(crate) fn malformed(
        field: LegacyField,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedValue {
            field: field.key(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// A value of the wrong shape, e.g. a table where a string was expected.
    pub(crate) fn unexpected_shape(field: LegacyField, value: &LegacyValue, expected: &str) -> Self {
        let raw = match value {
            LegacyValue::Text(text) => text.clone(),
            other => serde_json::to_string(other).unwrap_or_else(|_| other.kind().to_owned()),
        };
        Self::malformed(
            field,
            raw,
            format!("expected {expected}, found a {}", value.kind()),
        )
    }

    pub(crate) fn read_file(field: LegacyField, path: PathBuf, source: io::Error) -> Self {
        Self::ReadFile {
            field: field.key(),
            path,
            source,
        }
    }

    /// The legacy field the error is about.
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingRequiredField { field }
            | Self::MalformedValue { field, .. }
            | Self::ReadFile { field, .. } => *field,
        }
    }
}
