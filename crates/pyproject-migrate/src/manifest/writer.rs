//! Manifest writer: serialize a [`TargetManifest`] to `pyproject.toml` text.
//!
//! Follows the layout recommended by the packaging guide: `[build-system]`
//! first, then `[project]` with scalars before arrays, then the
//! `[project.*]` sub-tables, then `[tool.setuptools.dynamic]` if needed.
//! Arrays stay on one line while they fit in [`WriterOptions::line_width`].

use std::path::Path;

use anyhow::Result;
use indexmap::IndexMap;
use toml_edit::{Array, DocumentMut, InlineTable, Item, Table, Value, value};

use crate::manifest::model::{Contributor, DynamicVersion, License, Readme, TargetManifest};

/// Style options for the writer, passed explicitly to each call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriterOptions {
    /// Maximum width of a `key = [...]` line before the array is expanded to
    /// one item per line.
    pub line_width: usize,
    /// How the readme is written.
    pub readme: ReadmeStyle,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            line_width: DEFAULT_LINE_WIDTH,
            readme: ReadmeStyle::Reference,
        }
    }
}

/// Default line width, matching common Python formatter settings.
pub const DEFAULT_LINE_WIDTH: usize = 88;

/// How the `readme` field is written.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum ReadmeStyle {
    /// Reference the source file when it is known, otherwise embed the text.
    #[default]
    Reference,
    /// Always embed the readme text.
    Embed,
}

impl TargetManifest {
    /// Write the manifest to the given path.
    pub fn write_to(&self, path: &Path, options: &WriterOptions) -> Result<()> {
        fs_err::write(path, self.to_toml_string(options))?;
        Ok(())
    }

    /// Serialize the manifest to a TOML string.
    pub fn to_toml_string(&self, options: &WriterOptions) -> String {
        self.to_document(options).to_string()
    }

    /// Build the TOML document for the manifest.
    pub fn to_document(&self, options: &WriterOptions) -> DocumentMut {
        let mut doc = DocumentMut::new();

        // [build-system]
        let mut build_system = Table::new();
        build_system.insert(
            "requires",
            array_item("requires", string_array(&self.build_system.requires), options),
        );
        build_system.insert("build-backend", value(self.build_system.build_backend.as_str()));
        doc.insert("build-system", Item::Table(build_system));

        // [project]
        let mut project = Table::new();
        project.insert("name", value(self.name.as_str()));
        if let Some(version) = &self.version {
            project.insert("version", value(version.as_str()));
        }
        if self.dynamic_version.is_some() {
            project.insert(
                "dynamic",
                array_item("dynamic", string_array(["version"]), options),
            );
        }
        if let Some(description) = &self.description {
            project.insert("description", value(description.as_str()));
        }
        if let Some(readme) = &self.readme {
            project.insert("readme", value(readme_table(readme, options.readme)));
        }
        if let Some(requires_python) = &self.requires_python {
            project.insert("requires-python", value(requires_python.as_str()));
        }
        if let Some(license) = &self.license {
            project.insert("license", value(license_table(license)));
        }
        insert_strings(&mut project, "license-files", &self.license_files, options);
        insert_contributors(&mut project, "authors", &self.authors, options);
        insert_contributors(&mut project, "maintainers", &self.maintainers, options);
        insert_strings(&mut project, "keywords", &self.keywords, options);
        insert_strings(&mut project, "classifiers", &self.classifiers, options);
        insert_strings(&mut project, "dependencies", &self.dependencies, options);

        // [project.*] sub-tables
        insert_string_table(&mut project, "urls", &self.urls);
        insert_string_table(&mut project, "scripts", &self.scripts);
        insert_string_table(&mut project, "gui-scripts", &self.gui_scripts);

        if !self.entry_points.is_empty() {
            let mut entry_points = Table::new();
            entry_points.set_implicit(true);
            for (group, targets) in &self.entry_points {
                entry_points.insert(group, Item::Table(string_table(targets)));
            }
            project.insert("entry-points", Item::Table(entry_points));
        }

        if !self.optional_dependencies.is_empty() {
            let mut extras = Table::new();
            for (extra, requirements) in &self.optional_dependencies {
                extras.insert(
                    extra,
                    array_item(extra, string_array(requirements), options),
                );
            }
            project.insert("optional-dependencies", Item::Table(extras));
        }

        doc.insert("project", Item::Table(project));

        // [tool.setuptools.dynamic]
        if let Some(dynamic_version) = &self.dynamic_version {
            let mut dynamic = Table::new();
            dynamic.insert("version", value(dynamic_version_table(dynamic_version)));

            let mut setuptools = Table::new();
            setuptools.set_implicit(true);
            setuptools.insert("dynamic", Item::Table(dynamic));

            let mut tool = Table::new();
            tool.set_implicit(true);
            tool.insert("setuptools", Item::Table(setuptools));
            doc.insert("tool", Item::Table(tool));
        }

        doc
    }
}

fn string_array<I, S>(items: I) -> Array
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .map(|item| item.as_ref().to_owned())
        .collect()
}

fn insert_strings(table: &mut Table, key: &str, items: &[String], options: &WriterOptions) {
    if !items.is_empty() {
        table.insert(key, array_item(key, string_array(items), options));
    }
}

fn insert_contributors(
    table: &mut Table,
    key: &str,
    contributors: &[Contributor],
    options: &WriterOptions,
) {
    if contributors.is_empty() {
        return;
    }
    let array: Array = contributors.iter().map(contributor_table).collect();
    table.insert(key, array_item(key, array, options));
}

fn insert_string_table(
    table: &mut Table,
    key: &str,
    entries: &IndexMap<String, String>,
) {
    if !entries.is_empty() {
        table.insert(key, Item::Table(string_table(entries)));
    }
}

fn string_table(entries: &IndexMap<String, String>) -> Table {
    let mut table = Table::new();
    for (key, target) in entries {
        table.insert(key, value(target.as_str()));
    }
    table
}

/// Keep the array on one line if `key = [...]` fits, otherwise put each
/// item on its own line with a trailing comma.
fn array_item(key: &str, mut array: Array, options: &WriterOptions) -> Item {
    let inline_width = key.chars().count() + " = ".len() + array.to_string().chars().count();
    if inline_width > options.line_width && !array.is_empty() {
        for item in array.iter_mut() {
            item.decor_mut().set_prefix("\n    ");
            item.decor_mut().set_suffix("");
        }
        array.set_trailing("\n");
        array.set_trailing_comma(true);
    }
    value(array)
}

fn contributor_table(contributor: &Contributor) -> Value {
    let mut table = InlineTable::new();
    if let Some(name) = contributor.name() {
        table.insert("name", name.into());
    }
    if let Some(email) = contributor.email() {
        table.insert("email", email.into());
    }
    Value::InlineTable(table)
}

fn readme_table(readme: &Readme, style: ReadmeStyle) -> InlineTable {
    let mut table = InlineTable::new();
    match (style, &readme.path) {
        (ReadmeStyle::Reference, Some(path)) => {
            table.insert("file", Value::from(path.to_string_lossy().into_owned()));
        }
        _ => {
            table.insert("text", readme.content.as_str().into());
        }
    }
    table.insert("content-type", readme.content_type.as_str().into());
    table
}

fn license_table(license: &License) -> InlineTable {
    let mut table = InlineTable::new();
    match license {
        License::Text(text) => table.insert("text", text.as_str().into()),
        License::File(path) => {
            table.insert("file", Value::from(path.to_string_lossy().into_owned()))
        }
    };
    table
}

fn dynamic_version_table(dynamic_version: &DynamicVersion) -> InlineTable {
    let mut table = InlineTable::new();
    match dynamic_version {
        DynamicVersion::Attr(attr) => table.insert("attr", attr.as_str().into()),
        DynamicVersion::File(files) => table.insert("file", Value::Array(string_array(files))),
    };
    table
}
