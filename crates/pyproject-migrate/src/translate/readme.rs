//! Resolve `long_description` into a readme.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::legacy::{FileRef, LegacyField, LegacyValue};
use crate::manifest::{ContentType, Readme};
use crate::translate::{TranslateError, canonical, read_text};

const FIELD: LegacyField = LegacyField::LongDescription;

/// The legacy fields that together describe the readme.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct ReadmeFields<'a> {
    pub(crate) long_description: Option<&'a LegacyValue>,
    pub(crate) content_type: Option<&'a LegacyValue>,
    pub(crate) description_file: Option<&'a LegacyValue>,
}

impl ReadmeFields<'_> {
    /// Build the readme, reading referenced files relative to `root`.
    ///
    /// The content type is taken from `content_type_override`, then the
    /// declared type, then inferred from the source file's extension.
    pub(crate) fn resolve(
        self,
        root: &Path,
        content_type_override: Option<&ContentType>,
    ) -> Result<Option<Readme>, TranslateError> {
        let declared = self.declared_content_type()?;
        if let (Some(content_type), Some(declared)) = (content_type_override, &declared)
            && content_type != declared
        {
            warn!("Using content type `{content_type}` instead of the declared `{declared}`");
        }
        let hint = content_type_override.cloned().or(declared);

        let Some(value) = self.long_description else {
            return Ok(None);
        };
        match value {
            LegacyValue::File(file) => read_files(file, root, hint).map(Some),
            LegacyValue::Text(text) => {
                if let Some(file) = FileRef::from_directive(text) {
                    return read_files(&file, root, hint).map(Some);
                }
                let Some(content) = canonical(text) else {
                    return Ok(None);
                };
                let path = self.description_path().or_else(|| guess_path(root, content));
                Ok(Some(inline(content, path, hint)))
            }
            other => Err(TranslateError::unexpected_shape(
                FIELD,
                other,
                "a string or a file reference",
            )),
        }
    }

    fn declared_content_type(&self) -> Result<Option<ContentType>, TranslateError> {
        let Some(value) = self.content_type else {
            return Ok(None);
        };
        let field = LegacyField::LongDescriptionContentType;
        let Some(text) = value.as_text() else {
            return Err(TranslateError::unexpected_shape(field, value, "a media type"));
        };
        let Some(text) = canonical(text) else {
            return Ok(None);
        };
        text.parse()
            .map(Some)
            .map_err(|err| TranslateError::malformed(field, text, format!("{err}")))
    }

    /// pbr's `description_file`, which may list several files.
    fn description_path(&self) -> Option<PathBuf> {
        let text = self.description_file?.as_text()?;
        let first = text.split([',', '\n']).find_map(canonical)?;
        Some(PathBuf::from(first))
    }
}

/// Read and concatenate the referenced files.
fn read_files(
    file: &FileRef,
    root: &Path,
    hint: Option<ContentType>,
) -> Result<Readme, TranslateError> {
    let paths = file.paths();
    let Some(first) = paths.first() else {
        return Err(TranslateError::malformed(
            FIELD,
            format!("file: {}", file.file),
            "file reference names no files",
        ));
    };

    debug!("Reading readme from `{}`", file.file);
    let content = read_text(FIELD, &paths, root)?;

    let declared = file
        .content_type
        .as_deref()
        .map(|text| {
            text.parse::<ContentType>()
                .map_err(|err| TranslateError::malformed(FIELD, text, format!("{err}")))
        })
        .transpose()?;
    let content_type = hint
        .or(declared)
        .unwrap_or_else(|| ContentType::from_path(first));

    Ok(Readme {
        content,
        content_type,
        path: (paths.len() == 1).then(|| first.clone()),
    })
}

fn inline(content: &str, path: Option<PathBuf>, hint: Option<ContentType>) -> Readme {
    let content_type = match (hint, &path) {
        (Some(content_type), _) => content_type,
        (None, Some(path)) => ContentType::from_path(path),
        (None, None) => {
            warn!(
                "No content type declared for `long_description`, defaulting to `{}`",
                ContentType::PlainText
            );
            ContentType::PlainText
        }
    };
    Readme {
        content: content.to_owned(),
        content_type,
        path,
    }
}

/// Find a `README*` file in `root` whose content matches the inline
/// description.
fn guess_path(root: &Path, content: &str) -> Option<PathBuf> {
    let entries = fs_err::read_dir(root).ok()?;
    let mut candidates: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with("README"))
        })
        .collect();
    candidates.sort();

    candidates.into_iter().find_map(|path| {
        let candidate = fs_err::read_to_string(&path).ok()?;
        if candidate.trim_end() != content.trim_end() {
            return None;
        }
        debug!("Matched `long_description` to `{}`", path.display());
        path.strip_prefix(root).ok().map(Path::to_path_buf)
    })
}
