//! Entry point groups.
//!
//! setuptools accepts either a table of groups or a single INI-style string.
//! Both normalize to group → name → target.

use indexmap::IndexMap;

use crate::legacy::{LegacyField, LegacyValue, Split};
use crate::translate::TranslateError;

pub(crate) type EntryPoints = IndexMap<String, String>;
pub(crate) type EntryPointGroups = IndexMap<String, EntryPoints>;

const FIELD: LegacyField = LegacyField::EntryPoints;

/// Groups that have a dedicated `[project]` table.
pub(crate) const CONSOLE_SCRIPTS: &str = "console_scripts";
pub(crate) const GUI_SCRIPTS: &str = "gui_scripts";

/// Normalize a table of groups. Each group holds `name = target` lines or a
/// list of `name = target` strings.
pub(crate) fn from_table(
    table: &IndexMap<String, LegacyValue>,
) -> Result<EntryPointGroups, TranslateError> {
    let mut groups = EntryPointGroups::new();
    for (group, value) in table {
        let lines = match value {
            LegacyValue::Text(_) | LegacyValue::List(_) => value.items(Split::Lines),
            other => {
                return Err(TranslateError::unexpected_shape(
                    FIELD,
                    other,
                    "`name = target` lines",
                ));
            }
        };
        let entries = groups.entry(group.trim().to_owned()).or_default();
        for line in lines.iter().filter(|line| !is_comment(line)) {
            let (name, target) = parse_entry_point(line)?;
            entries.insert(name, target);
        }
    }
    groups.retain(|_, entries| !entries.is_empty());
    Ok(groups)
}

/// Normalize an INI-style string whose groups are headed by `[group]` or
/// `group:`.
pub(crate) fn from_ini(text: &str) -> Result<EntryPointGroups, TranslateError> {
    let mut groups = EntryPointGroups::new();
    let mut current: Option<String> = None;

    for line in text.lines().map(str::trim) {
        if line.is_empty() || is_comment(line) {
            continue;
        }
        if let Some(group) = group_header(line) {
            current = Some(group.to_owned());
            continue;
        }
        let Some(group) = &current else {
            return Err(TranslateError::malformed(
                FIELD,
                line,
                "entry point appears before any group header",
            ));
        };
        let (name, target) = parse_entry_point(line)?;
        groups.entry(group.clone()).or_default().insert(name, target);
    }

    groups.retain(|_, entries| !entries.is_empty());
    Ok(groups)
}

fn group_header(line: &str) -> Option<&str> {
    if let Some(group) = line.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
        return Some(group.trim());
    }
    if line.contains('=') {
        return None;
    }
    line.strip_suffix(':').map(str::trim)
}

fn is_comment(line: &str) -> bool {
    line.starts_with('#') || line.starts_with(';')
}

/// Split `name = target`, keeping case.
fn parse_entry_point(line: &str) -> Result<(String, String), TranslateError> {
    let Some((name, target)) = line.split_once('=') else {
        return Err(TranslateError::malformed(
            FIELD,
            line,
            "expected `name = target`",
        ));
    };
    let (name, target) = (name.trim(), target.trim());
    if name.is_empty() || target.is_empty() {
        return Err(TranslateError::malformed(
            FIELD,
            line,
            "entry point name and target must be non-empty",
        ));
    }
    Ok((name.to_owned(), target.to_owned()))
}
