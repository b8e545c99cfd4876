//! Data model for legacy setuptools configuration.
//!
//! A [`LegacyConfig`] is an ordered bag of `setup()` keyword arguments or
//! `setup.cfg` options. Values are kept close to their source shape; the
//! translator decides how each one is interpreted.

use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};

/// A single legacy configuration value.
///
/// Values are kept in their source shape: a string, a list of strings, a
/// `{"file": ..., "content-type": ...}` reference, or a nested table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LegacyValue {
    /// A scalar string, possibly spanning several lines.
    Text(String),

    /// An explicit list of strings. `null` items become empty strings.
    List(Vec<String>),

    /// A `file:` reference.
    File(FileRef),

    /// A nested table, e.g. `extras_require` or `project_urls`.
    Table(IndexMap<String, LegacyValue>),
}

/// How a scalar value is split into items.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Split {
    /// Split on newlines only (requirements contain commas).
    Lines,
    /// Split on newlines and commas (`list-comma` options in setuptools).
    CommaOrLines,
}

impl LegacyValue {
    /// Return the scalar text, if this is a [`LegacyValue::Text`].
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Return the nested table, if this is a [`LegacyValue::Table`].
    pub fn as_table(&self) -> Option<&IndexMap<String, LegacyValue>> {
        match self {
            Self::Table(table) => Some(table),
            _ => None,
        }
    }

    /// Flatten a scalar or list into trimmed, non-empty items.
    ///
    /// Tables and file references yield no items.
    pub fn items(&self, split: Split) -> Vec<String> {
        let raw: Vec<&str> = match self {
            Self::Text(text) => match split {
                Split::Lines => text.lines().collect(),
                Split::CommaOrLines => text.lines().flat_map(|line| line.split(',')).collect(),
            },
            Self::List(items) => items.iter().map(String::as_str).collect(),
            Self::File(_) | Self::Table(_) => Vec::new(),
        };
        raw.into_iter()
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(ToOwned::to_owned)
            .collect()
    }

    /// A short description of the value's shape, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "string",
            Self::List(_) => "list",
            Self::File(_) => "file reference",
            Self::Table(_) => "table",
        }
    }
}

impl From<&str> for LegacyValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for LegacyValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<String>> for LegacyValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

impl From<FileRef> for LegacyValue {
    fn from(value: FileRef) -> Self {
        Self::File(value)
    }
}

impl From<IndexMap<String, LegacyValue>> for LegacyValue {
    fn from(value: IndexMap<String, LegacyValue>) -> Self {
        Self::Table(value)
    }
}

/// A `file:` directive: one or more comma-separated paths and an optional
/// declared content type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileRef {
    /// The raw path list, as written after the directive.
    pub file: String,

    /// The declared content type, if any.
    #[serde(
        rename = "content-type",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub content_type: Option<String>,
}

impl FileRef {
    /// Create a file reference from the text following `file:`.
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            content_type: None,
        }
    }

    /// Parse a `file: <paths>` directive, returning `None` for other text.
    ///
    /// Whitespace between the directive and the first path is not part of
    /// the path.
    pub fn from_directive(text: &str) -> Option<Self> {
        text.trim_start()
            .strip_prefix("file:")
            .map(|rest| Self::new(rest.trim()))
    }

    /// The referenced paths, in order.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.file
            .split(',')
            .map(str::trim)
            .filter(|path| !path.is_empty())
            .map(PathBuf::from)
            .collect()
    }
}

/// An ordered set of legacy configuration fields.
///
/// Absent and `null` values are indistinguishable: the readers drop `null`
/// entries, so the translator only ever sees present values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegacyConfig {
    fields: IndexMap<String, LegacyValue>,
}

impl LegacyConfig {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<LegacyValue>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Set a field if a value is present; `None` leaves the field absent.
    pub fn insert_optional(&mut self, key: impl Into<String>, value: Option<LegacyValue>) {
        if let Some(value) = value {
            self.fields.insert(key.into(), value);
        }
    }

    /// Builder-style [`LegacyConfig::insert`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<LegacyValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&LegacyValue> {
        self.fields.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LegacyValue)> {
        self.fields.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for LegacyConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}
