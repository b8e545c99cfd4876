//! Dependencies, optional dependencies and build requirements.
//!
//! Requirement strings are validated as PEP 508 but otherwise kept as
//! written. They are only re-rendered when an `extra == "..."` clause has to
//! be removed from the marker.

use std::collections::BTreeSet;
use std::str::FromStr;
use std::sync::LazyLock;

use indexmap::IndexMap;
use pep440_rs::VersionSpecifiers;
use pep508_rs::{ExtraName, Requirement};
use regex::Regex;
use tracing::debug;

use crate::legacy::LegacyField;
use crate::translate::TranslateError;

/// `extra == "name"` or `extra == 'name'` anywhere in a marker.
static EXTRA_CLAUSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\bextra\s*==\s*(?:"([^"]*)"|'([^']*)')"#).expect("extra pattern is valid")
});

/// A bare `or`, which makes an `extra` clause conditional.
static OR_OPERATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bor\b").expect("or pattern is valid"));

/// Requirements collected from `install_requires` and `extras_require`.
#[derive(Debug, Default)]
pub(crate) struct Dependencies {
    install: Vec<String>,
    /// Entries from `extras_require` groups without an extra name.
    conditional: Vec<String>,
    extras: IndexMap<String, Vec<String>>,
    /// `install_requires` entries that only apply to an extra.
    moved: IndexMap<String, Vec<String>>,
}

impl Dependencies {
    /// Add an `install_requires` entry.
    pub(crate) fn add_install(&mut self, raw: &str) -> Result<(), TranslateError> {
        let field = LegacyField::InstallRequires;
        let requirement = parse(field, raw)?;
        let (_, marker) = split_marker(raw, &requirement);

        if let Some(extra) = marker.and_then(unconditional_extra) {
            debug!("Moving `{raw}` from `install_requires` to extra `{extra}`");
            let stripped = strip_extra(raw, requirement, &extra);
            self.moved.entry(extra).or_default().push(stripped);
        } else {
            self.install.push(raw.to_owned());
        }
        Ok(())
    }

    /// Add an `extras_require` group. The key may carry a marker after `:`
    /// that applies to every requirement in the group.
    pub(crate) fn add_extra(&mut self, key: &str, entries: &[String]) -> Result<(), TranslateError> {
        let field = LegacyField::ExtrasRequire;
        let (extra, group_marker) = match key.split_once(':') {
            Some((extra, marker)) => (extra.trim(), Some(marker.trim()).filter(|m| !m.is_empty())),
            None => (key.trim(), None),
        };

        let mut group = Vec::with_capacity(entries.len());
        for raw in entries {
            let raw = match group_marker {
                Some(group_marker) => join_marker(field, raw, group_marker)?,
                None => raw.clone(),
            };
            let requirement = parse(field, &raw)?;

            if extra.is_empty() {
                group.push(raw);
                continue;
            }

            let (_, marker) = split_marker(&raw, &requirement);
            let redundant = marker
                .and_then(unconditional_extra)
                .is_some_and(|clause| same_extra(&clause, extra));
            if redundant {
                group.push(strip_extra(&raw, requirement, extra));
            } else {
                group.push(raw);
            }
        }

        if extra.is_empty() {
            self.conditional.extend(group);
        } else {
            self.extras.entry(extra.to_owned()).or_default().extend(group);
        }
        Ok(())
    }

    /// The `dependencies` array and `optional-dependencies` table.
    pub(crate) fn finish(self) -> (Vec<String>, IndexMap<String, Vec<String>>) {
        let mut dependencies = self.install;
        dependencies.extend(self.conditional);

        let mut extras = self.extras;
        for (extra, moved) in self.moved {
            extras.entry(extra).or_default().extend(moved);
        }
        (dependencies, extras)
    }
}

/// Parse a PEP 508 requirement, reporting the first line of the parser's
/// diagnostic.
fn parse(field: LegacyField, raw: &str) -> Result<Requirement, TranslateError> {
    raw.parse::<Requirement>().map_err(|err| {
        let reason = err.to_string();
        let reason = reason.lines().next().unwrap_or("invalid requirement");
        TranslateError::malformed(field, raw, format!("not a PEP 508 requirement: {reason}"))
    })
}

/// Split a requirement string at its marker separator. Environment markers
/// are the only part of a requirement that can contain `;`, except for URLs
/// which need whitespace before the separator.
fn split_marker<'a>(raw: &'a str, requirement: &Requirement) -> (&'a str, Option<&'a str>) {
    if requirement.marker.is_true() {
        return (raw.trim(), None);
    }
    let separator = if requirement.version_or_url.is_some() && raw.contains(" ;") {
        raw.find(" ;")
    } else {
        raw.find(';')
    };
    match separator {
        Some(index) => {
            let (head, marker) = raw.split_at(index);
            let marker = marker.trim_start().trim_start_matches(';').trim();
            (head.trim(), Some(marker).filter(|marker| !marker.is_empty()))
        }
        None => (raw.trim(), None),
    }
}

/// The extra named by a marker's `extra == "..."` clause, unless an `or`
/// makes the clause conditional.
fn unconditional_extra(marker: &str) -> Option<String> {
    if OR_OPERATOR.is_match(marker) {
        return None;
    }
    let captures = EXTRA_CLAUSE.captures(marker)?;
    captures
        .get(1)
        .or_else(|| captures.get(2))
        .map(|extra| extra.as_str().trim().to_owned())
        .filter(|extra| !extra.is_empty())
}

/// Compare extra names after PEP 685 normalization.
fn same_extra(left: &str, right: &str) -> bool {
    match (ExtraName::from_str(left), ExtraName::from_str(right)) {
        (Ok(left), Ok(right)) => left == right,
        _ => left == right,
    }
}

/// Remove the `extra == "<extra>"` clause from a requirement's marker.
///
/// When the clause is a top-level `and` operand it is cut out of the text, so
/// the rest of the marker stays as written. Otherwise the marker is simplified
/// and re-rendered by `pep508_rs`. Requirements whose extra is not a valid
/// name are returned unchanged.
fn strip_extra(raw: &str, requirement: Requirement, extra: &str) -> String {
    let (head, marker) = split_marker(raw, &requirement);
    if let Some(marker) = marker {
        let operands = and_operands(marker);
        let kept: Vec<&str> = operands
            .iter()
            .copied()
            .filter(|operand| !is_extra_clause(operand, extra))
            .collect();
        if kept.len() < operands.len() {
            return if kept.is_empty() {
                head.to_owned()
            } else {
                format!("{head}; {}", kept.join(" and "))
            };
        }
    }

    let Ok(extra) = ExtraName::from_str(extra) else {
        return raw.trim().to_owned();
    };
    let marker = requirement.marker.simplify_extras(&[extra]);
    match marker.contents() {
        Some(contents) => format!("{head}; {contents}"),
        None => head.to_owned(),
    }
}

/// Split a marker at its top-level `and` operators, outside quotes and
/// parentheses.
fn and_operands(marker: &str) -> Vec<&str> {
    let mut operands = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;
    for (index, ch) in marker.char_indices() {
        match (quote, ch) {
            (Some(open), _) if ch == open => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(ch),
            (None, '(') => depth += 1,
            (None, ')') => depth = depth.saturating_sub(1),
            (None, 'a') if depth == 0 && is_and_at(marker, index) => {
                operands.push(marker[start..index].trim());
                start = index + "and".len();
            }
            _ => {}
        }
    }
    operands.push(marker[start..].trim());
    operands
}

/// Whether a standalone `and` keyword starts at `index`.
fn is_and_at(marker: &str, index: usize) -> bool {
    let separated = |ch: char| ch.is_whitespace() || ch == '(' || ch == ')';
    marker[index..].starts_with("and")
        && marker[..index].chars().next_back().is_some_and(separated)
        && marker[index + "and".len()..].chars().next().is_some_and(separated)
}

/// Whether a marker operand is exactly `extra == "<extra>"`, possibly
/// parenthesized.
fn is_extra_clause(operand: &str, extra: &str) -> bool {
    let mut operand = operand.trim();
    while let Some(inner) = operand
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
    {
        operand = inner.trim();
    }
    EXTRA_CLAUSE.find(operand).is_some_and(|found| found.as_str() == operand)
        && unconditional_extra(operand).is_some_and(|clause| same_extra(&clause, extra))
}

/// Append `marker` to a requirement, combining it with any existing marker.
fn join_marker(field: LegacyField, raw: &str, marker: &str) -> Result<String, TranslateError> {
    let requirement = parse(field, raw)?;
    let joined = match split_marker(raw, &requirement) {
        (head, Some(existing)) => format!("{head}; ({existing}) and ({marker})"),
        (head, None) => format!("{head}; {marker}"),
    };
    Ok(joined)
}

/// Normalize `python_requires`: whitespace inside each clause is removed and
/// the clauses are joined with `,`.
pub(crate) fn requires_python(raw: &str) -> Result<Option<String>, TranslateError> {
    let normalized = raw
        .split(',')
        .map(|clause| clause.split_whitespace().collect::<String>())
        .filter(|clause| !clause.is_empty())
        .collect::<Vec<_>>()
        .join(",");
    if normalized.is_empty() {
        return Ok(None);
    }
    VersionSpecifiers::from_str(&normalized).map_err(|err| {
        TranslateError::malformed(
            LegacyField::PythonRequires,
            raw.trim(),
            format!("not a PEP 440 specifier set: {err}"),
        )
    })?;
    Ok(Some(normalized))
}

/// `[build-system] requires`: the `setup_requires` entries plus
/// `setuptools`, sorted and deduplicated.
pub(crate) fn build_requires(entries: &[String]) -> Result<Vec<String>, TranslateError> {
    let mut requires = BTreeSet::new();
    let mut has_setuptools = false;
    for raw in entries {
        let requirement = parse(LegacyField::SetupRequires, raw)?;
        has_setuptools |= AsRef::<str>::as_ref(&requirement.name) == "setuptools";
        requires.insert(raw.trim().to_owned());
    }
    if !has_setuptools {
        requires.insert("setuptools".to_owned());
    }
    Ok(requires.into_iter().collect())
}
