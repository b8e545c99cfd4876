//! The fixed set of legacy fields the translator understands.

use std::fmt;

/// A recognized legacy configuration field.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum LegacyField {
    Name,
    Version,
    Description,
    LongDescription,
    LongDescriptionContentType,
    DescriptionFile,
    Author,
    AuthorEmail,
    Maintainer,
    MaintainerEmail,
    License,
    LicenseFiles,
    Keywords,
    Classifiers,
    ProjectUrls,
    Url,
    DownloadUrl,
    PythonRequires,
    InstallRequires,
    ExtrasRequire,
    EntryPoints,
    SetupRequires,
}

impl LegacyField {
    /// Look up a field by key, accepting setuptools aliases and `-` in place
    /// of `_`. Returns `None` for keys the translator does not handle.
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim().replace('-', "_");
        let field = match key.as_str() {
            "name" => Self::Name,
            "version" => Self::Version,
            "description" | "summary" => Self::Description,
            "long_description" => Self::LongDescription,
            "long_description_content_type" => Self::LongDescriptionContentType,
            "description_file" => Self::DescriptionFile,
            "author" => Self::Author,
            "author_email" => Self::AuthorEmail,
            "maintainer" => Self::Maintainer,
            "maintainer_email" => Self::MaintainerEmail,
            "license" => Self::License,
            "license_files" | "license_file" => Self::LicenseFiles,
            "keywords" => Self::Keywords,
            "classifiers" | "classifier" => Self::Classifiers,
            "project_urls" => Self::ProjectUrls,
            "url" | "home_page" => Self::Url,
            "download_url" => Self::DownloadUrl,
            "python_requires" | "requires_python" => Self::PythonRequires,
            "install_requires" => Self::InstallRequires,
            "extras_require" => Self::ExtrasRequire,
            "entry_points" => Self::EntryPoints,
            "setup_requires" => Self::SetupRequires,
            _ => return None,
        };
        Some(field)
    }

    /// The canonical key, as used in error messages.
    pub fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Version => "version",
            Self::Description => "description",
            Self::LongDescription => "long_description",
            Self::LongDescriptionContentType => "long_description_content_type",
            Self::DescriptionFile => "description_file",
            Self::Author => "author",
            Self::AuthorEmail => "author_email",
            Self::Maintainer => "maintainer",
            Self::MaintainerEmail => "maintainer_email",
            Self::License => "license",
            Self::LicenseFiles => "license_files",
            Self::Keywords => "keywords",
            Self::Classifiers => "classifiers",
            Self::ProjectUrls => "project_urls",
            Self::Url => "url",
            Self::DownloadUrl => "download_url",
            Self::PythonRequires => "python_requires",
            Self::InstallRequires => "install_requires",
            Self::ExtrasRequire => "extras_require",
            Self::EntryPoints => "entry_points",
            Self::SetupRequires => "setup_requires",
        }
    }
}

impl fmt::Display for LegacyField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
