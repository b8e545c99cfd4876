//! Translate a legacy setuptools configuration into a `pyproject.toml`
//! manifest.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tracing::debug;

use crate::legacy::{FileRef, LegacyConfig, LegacyField, LegacyValue, Split};
use crate::manifest::{ContentType, DynamicVersion, License, TargetManifest};

mod entry_points;
mod error;
mod people;
mod readme;
mod requirements;

pub use error::TranslateError;

use entry_points::{CONSOLE_SCRIPTS, EntryPointGroups, GUI_SCRIPTS};
use readme::ReadmeFields;
use requirements::Dependencies;

/// Settings that come from the caller rather than the configuration.
#[derive(Debug, Clone)]
pub struct TranslateOptions {
    /// Directory that `file:` references are resolved against.
    pub project_root: PathBuf,
    /// Replaces the declared or inferred readme content type.
    pub readme_content_type: Option<ContentType>,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        Self {
            project_root: PathBuf::from("."),
            readme_content_type: None,
        }
    }
}

/// Translate with default options, resolving files against the current
/// directory.
pub fn translate(config: &LegacyConfig) -> Result<TargetManifest, TranslateError> {
    Translator::default().translate(config)
}

#[derive(Debug, Clone, Default)]
pub struct Translator {
    options: TranslateOptions,
}

/// Fields that need each other, or the whole configuration, before they can
/// be translated.
#[derive(Default)]
struct Draft<'a> {
    manifest: TargetManifest,
    readme: ReadmeFields<'a>,
    author: Option<&'a LegacyValue>,
    author_email: Option<&'a LegacyValue>,
    maintainer: Option<&'a LegacyValue>,
    maintainer_email: Option<&'a LegacyValue>,
    dependencies: Dependencies,
    entry_points: EntryPointGroups,
    setup_requires: Vec<String>,
}

impl Translator {
    pub fn new(options: TranslateOptions) -> Self {
        Self { options }
    }

    /// Translate `config`, or report the first field that cannot be
    /// represented.
    pub fn translate(&self, config: &LegacyConfig) -> Result<TargetManifest, TranslateError> {
        let mut draft = Draft::default();
        for (key, value) in config.iter() {
            let Some(field) = LegacyField::from_key(key) else {
                debug!("Ignoring unsupported field `{key}`");
                continue;
            };
            self.apply(&mut draft, field, value)?;
        }
        self.finish(draft)
    }

    fn root(&self) -> &Path {
        &self.options.project_root
    }

    fn apply<'a>(
        &self,
        draft: &mut Draft<'a>,
        field: LegacyField,
        value: &'a LegacyValue,
    ) -> Result<(), TranslateError> {
        match field {
            LegacyField::Name => draft.manifest.name = scalar(field, value)?.unwrap_or_default(),
            LegacyField::Version => {
                let (version, dynamic) = version(value)?;
                draft.manifest.version = version;
                draft.manifest.dynamic_version = dynamic;
            }
            LegacyField::Description => draft.manifest.description = scalar(field, value)?,
            LegacyField::LongDescription => draft.readme.long_description = Some(value),
            LegacyField::LongDescriptionContentType => draft.readme.content_type = Some(value),
            LegacyField::DescriptionFile => draft.readme.description_file = Some(value),
            LegacyField::Author => draft.author = Some(value),
            LegacyField::AuthorEmail => draft.author_email = Some(value),
            LegacyField::Maintainer => draft.maintainer = Some(value),
            LegacyField::MaintainerEmail => draft.maintainer_email = Some(value),
            LegacyField::License => draft.manifest.license = self.license(value)?,
            LegacyField::LicenseFiles => {
                draft.manifest.license_files = list(field, value, Split::CommaOrLines)?;
            }
            LegacyField::Keywords => {
                draft.manifest.keywords = list(field, value, Split::CommaOrLines)?;
            }
            LegacyField::Classifiers => {
                draft.manifest.classifiers = self.lines(field, value, Split::CommaOrLines)?;
            }
            LegacyField::ProjectUrls => draft.manifest.urls = urls(value)?,
            LegacyField::Url | LegacyField::DownloadUrl => {
                debug!("Skipping `{field}`, which has no `[project]` equivalent");
            }
            LegacyField::PythonRequires => {
                draft.manifest.requires_python = match scalar(field, value)? {
                    Some(raw) => requirements::requires_python(&raw)?,
                    None => None,
                };
            }
            LegacyField::InstallRequires => {
                for raw in self.lines(field, value, Split::Lines)? {
                    draft.dependencies.add_install(&raw)?;
                }
            }
            LegacyField::ExtrasRequire => {
                let Some(groups) = value.as_table() else {
                    return Err(TranslateError::unexpected_shape(
                        field,
                        value,
                        "a table of extras",
                    ));
                };
                for (extra, group) in groups {
                    let entries = self.lines(field, group, Split::Lines)?;
                    draft.dependencies.add_extra(extra, &entries)?;
                }
            }
            LegacyField::EntryPoints => draft.entry_points = self.entry_points(value)?,
            LegacyField::SetupRequires => {
                draft.setup_requires = self.lines(field, value, Split::Lines)?;
            }
        }
        Ok(())
    }

    fn finish(&self, draft: Draft<'_>) -> Result<TargetManifest, TranslateError> {
        let mut manifest = draft.manifest;
        if manifest.name.is_empty() {
            return Err(TranslateError::missing(LegacyField::Name));
        }

        manifest.readme = draft
            .readme
            .resolve(self.root(), self.options.readme_content_type.as_ref())?;
        manifest.authors = people::contributors(draft.author, draft.author_email);
        manifest.maintainers = people::contributors(draft.maintainer, draft.maintainer_email);

        let (dependencies, optional_dependencies) = draft.dependencies.finish();
        manifest.dependencies = dependencies;
        manifest.optional_dependencies = optional_dependencies;

        for (group, entries) in draft.entry_points {
            match group.as_str() {
                CONSOLE_SCRIPTS => manifest.scripts = entries,
                GUI_SCRIPTS => manifest.gui_scripts = entries,
                _ => {
                    manifest.entry_points.insert(group, entries);
                }
            }
        }

        manifest.build_system.requires = requirements::build_requires(&draft.setup_requires)?;
        Ok(manifest)
    }

    fn license(&self, value: &LegacyValue) -> Result<Option<License>, TranslateError> {
        let field = LegacyField::License;
        let file = match value {
            LegacyValue::Text(text) => match FileRef::from_directive(text) {
                Some(file) => file,
                None => return Ok(canonical(text).map(|text| License::Text(text.to_owned()))),
            },
            LegacyValue::File(file) => file.clone(),
            other => {
                return Err(TranslateError::unexpected_shape(
                    field,
                    other,
                    "a string or a file reference",
                ));
            }
        };
        let [path]: [PathBuf; 1] = file.paths().try_into().map_err(|_| {
            TranslateError::malformed(
                field,
                format!("file: {}", file.file),
                "expected exactly one license file",
            )
        })?;
        let full = self.root().join(&path);
        fs_err::File::open(&full).map_err(|err| TranslateError::read_file(field, full, err))?;
        Ok(Some(License::File(path)))
    }

    /// The items of a scalar or list, or the lines of the files named by a
    /// `file:` value. Comment lines are dropped.
    fn lines(
        &self,
        field: LegacyField,
        value: &LegacyValue,
        split: Split,
    ) -> Result<Vec<String>, TranslateError> {
        let file = match value {
            LegacyValue::File(file) => Some(file.clone()),
            LegacyValue::Text(text) => FileRef::from_directive(text),
            LegacyValue::List(_) | LegacyValue::Table(_) => None,
        };
        let items = match file {
            Some(file) => {
                LegacyValue::from(read_text(field, &file.paths(), self.root())?).items(Split::Lines)
            }
            None => list(field, value, split)?,
        };
        Ok(items
            .into_iter()
            .filter(|line| !line.starts_with('#'))
            .collect())
    }

    fn entry_points(&self, value: &LegacyValue) -> Result<EntryPointGroups, TranslateError> {
        let field = LegacyField::EntryPoints;
        match value {
            LegacyValue::Table(table) => entry_points::from_table(table),
            LegacyValue::List(lines) => entry_points::from_ini(&lines.join("\n")),
            LegacyValue::Text(text) => match FileRef::from_directive(text) {
                Some(file) => entry_points::from_ini(&read_text(field, &file.paths(), self.root())?),
                None => entry_points::from_ini(text),
            },
            LegacyValue::File(file) => {
                entry_points::from_ini(&read_text(field, &file.paths(), self.root())?)
            }
        }
    }
}

/// Trim a scalar, treating the setuptools placeholder `UNKNOWN` as empty.
pub(crate) fn canonical(text: &str) -> Option<&str> {
    let text = text.trim();
    if text.is_empty() || text == "UNKNOWN" {
        None
    } else {
        Some(text)
    }
}

fn scalar(field: LegacyField, value: &LegacyValue) -> Result<Option<String>, TranslateError> {
    match value {
        LegacyValue::Text(text) => Ok(canonical(text).map(ToOwned::to_owned)),
        other => Err(TranslateError::unexpected_shape(field, other, "a string")),
    }
}

fn list(field: LegacyField, value: &LegacyValue, split: Split) -> Result<Vec<String>, TranslateError> {
    match value {
        LegacyValue::Text(_) | LegacyValue::List(_) => Ok(value
            .items(split)
            .into_iter()
            .filter(|item| canonical(item).is_some())
            .collect()),
        other => Err(TranslateError::unexpected_shape(field, other, "a string or a list")),
    }
}

fn version(value: &LegacyValue) -> Result<(Option<String>, Option<DynamicVersion>), TranslateError> {
    let field = LegacyField::Version;
    match value {
        LegacyValue::Text(text) => {
            let Some(text) = canonical(text) else {
                return Ok((None, None));
            };
            if let Some(attr) = text.strip_prefix("attr:") {
                let attr = attr.trim();
                if attr.is_empty() {
                    return Err(TranslateError::malformed(field, text, "`attr:` names no attribute"));
                }
                return Ok((None, Some(DynamicVersion::Attr(attr.to_owned()))));
            }
            if let Some(file) = FileRef::from_directive(text) {
                return dynamic_file(field, &file).map(|dynamic| (None, Some(dynamic)));
            }
            Ok((Some(text.to_owned()), None))
        }
        LegacyValue::File(file) => dynamic_file(field, file).map(|dynamic| (None, Some(dynamic))),
        other => Err(TranslateError::unexpected_shape(field, other, "a string")),
    }
}

fn dynamic_file(field: LegacyField, file: &FileRef) -> Result<DynamicVersion, TranslateError> {
    let paths: Vec<String> = file
        .paths()
        .iter()
        .map(|path| path.display().to_string())
        .collect();
    if paths.is_empty() {
        return Err(TranslateError::malformed(
            field,
            format!("file: {}", file.file),
            "file reference names no files",
        ));
    }
    Ok(DynamicVersion::File(paths))
}

/// `label = url` pairs; a repeated label keeps its first position and takes
/// the last url.
fn urls(value: &LegacyValue) -> Result<IndexMap<String, String>, TranslateError> {
    let field = LegacyField::ProjectUrls;
    let mut urls = IndexMap::new();
    let mut insert = |label: &str, url: &str| {
        if let (Some(label), Some(url)) = (canonical(label), canonical(url)) {
            urls.insert(label.to_owned(), url.to_owned());
        }
    };

    match value {
        LegacyValue::Table(table) => {
            for (label, url) in table {
                let Some(url) = url.as_text() else {
                    return Err(TranslateError::unexpected_shape(field, url, "a url"));
                };
                insert(label.as_str(), url);
            }
        }
        LegacyValue::Text(_) | LegacyValue::List(_) => {
            for line in value.items(Split::Lines) {
                let Some((label, url)) = line.split_once('=') else {
                    return Err(TranslateError::malformed(field, line, "expected `label = url`"));
                };
                insert(label, url);
            }
        }
        other @ LegacyValue::File(_) => {
            return Err(TranslateError::unexpected_shape(field, other, "a table of urls"));
        }
    }
    Ok(urls)
}

/// Read and concatenate files relative to `root`.
pub(crate) fn read_text(
    field: LegacyField,
    paths: &[PathBuf],
    root: &Path,
) -> Result<String, TranslateError> {
    if paths.is_empty() {
        return Err(TranslateError::malformed(field, "file:", "file reference names no files"));
    }
    let mut contents = Vec::with_capacity(paths.len());
    for path in paths {
        let full = root.join(path);
        debug!("Reading `{}` for `{field}`", full.display());
        let content = fs_err::read_to_string(&full)
            .map_err(|err| TranslateError::read_file(field, full.clone(), err))?;
        contents.push(content);
    }
    Ok(contents.join("\n"))
}
