//! Data model for the generated `pyproject.toml`.
//!
//! These types mirror the `[build-system]` table (PEP 518) and the
//! `[project]` table (PEP 621). Optional fields are `None` or empty when the
//! legacy configuration did not provide them; the writer omits them.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use thiserror::Error;

/// The build backend every migrated project keeps using.
pub const SETUPTOOLS_BACKEND: &str = "setuptools.build_meta";

/// A translated project manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetManifest {
    pub build_system: BuildSystem,
    pub name: String,
    pub version: Option<String>,
    /// Where setuptools computes the version, when it is not static.
    pub dynamic_version: Option<DynamicVersion>,
    pub description: Option<String>,
    pub readme: Option<Readme>,
    pub license: Option<License>,
    pub license_files: Vec<String>,
    pub authors: Vec<Contributor>,
    pub maintainers: Vec<Contributor>,
    pub keywords: Vec<String>,
    pub classifiers: Vec<String>,
    pub urls: IndexMap<String, String>,
    pub requires_python: Option<String>,
    pub dependencies: Vec<String>,
    pub optional_dependencies: IndexMap<String, Vec<String>>,
    pub entry_points: IndexMap<String, IndexMap<String, String>>,
    pub scripts: IndexMap<String, String>,
    pub gui_scripts: IndexMap<String, String>,
}

/// The `[build-system]` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSystem {
    pub requires: Vec<String>,
    pub build_backend: String,
}

impl Default for BuildSystem {
    fn default() -> Self {
        Self {
            requires: vec!["setuptools".to_owned()],
            build_backend: SETUPTOOLS_BACKEND.to_owned(),
        }
    }
}

/// An author or maintainer. At least one of the two parts is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contributor {
    name: Option<String>,
    email: Option<String>,
}

impl Contributor {
    /// Build a contributor from trimmed parts, treating empty strings as
    /// absent. Returns `None` when neither part is present.
    pub fn new(name: Option<&str>, email: Option<&str>) -> Option<Self> {
        let present = |part: Option<&str>| {
            part.map(str::trim)
                .filter(|part| !part.is_empty())
                .map(ToOwned::to_owned)
        };
        let name = present(name);
        let email = present(email);
        if name.is_none() && email.is_none() {
            return None;
        }
        Some(Self { name, email })
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
}

/// The `readme` field: content plus its content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Readme {
    /// The full description text.
    pub content: String,
    pub content_type: ContentType,
    /// The file the content came from, when there is exactly one.
    pub path: Option<PathBuf>,
}

/// The `license` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum License {
    Text(String),
    File(PathBuf),
}

/// A version computed by setuptools at build time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DynamicVersion {
    /// `attr: package.module.__version__`
    Attr(String),
    /// `file: VERSION`
    File(Vec<String>),
}

/// The content type of a readme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentType {
    Markdown,
    ReStructuredText,
    PlainText,
    /// Any other syntactically valid media type, kept verbatim (including
    /// parameters such as `charset`).
    Other(String),
}

#[derive(Debug, Error)]
#[error("`{0}` is not a valid content type")]
pub struct InvalidContentType(String);

/// RFC 6838 type/subtype with optional RFC 2045 parameters. Whitespace
/// around `;` is tolerated since it is common in practice.
static MEDIA_TYPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^[A-Za-z0-9][A-Za-z0-9!#$&^_.+-]{0,126}",
        r"/[A-Za-z0-9][A-Za-z0-9!#$&^_.+-]{0,126}",
        r#"(?:\s*;\s*[A-Za-z0-9][A-Za-z0-9!#$&^_.+-]{0,126}=(?:[^\s;"]+|"[^"]+"))*$"#,
    ))
    .expect("media type pattern is valid")
});

impl ContentType {
    /// Infer the content type from a readme file's extension.
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|extension| extension.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("md" | "markdown") => Self::Markdown,
            Some("rst") => Self::ReStructuredText,
            _ => Self::PlainText,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Markdown => "text/markdown",
            Self::ReStructuredText => "text/x-rst",
            Self::PlainText => "text/plain",
            Self::Other(media_type) => media_type,
        }
    }
}

impl FromStr for ContentType {
    type Err = InvalidContentType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if !MEDIA_TYPE.is_match(s) {
            return Err(InvalidContentType(s.to_owned()));
        }
        let content_type = match s.to_ascii_lowercase().as_str() {
            "text/markdown" => Self::Markdown,
            "text/x-rst" => Self::ReStructuredText,
            "text/plain" => Self::PlainText,
            _ => Self::Other(s.to_owned()),
        };
        Ok(content_type)
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
