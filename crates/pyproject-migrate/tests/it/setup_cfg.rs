//! Tests for reading `setup.cfg` fixtures into a legacy configuration.

use pyproject_migrate::legacy::setup_cfg;
use pyproject_migrate::legacy::{LegacyValue, Split, find_setup_cfg, project_root};

use crate::common::fixture;

#[test]
fn read_full_fixture() {
    let path = find_setup_cfg(&fixture("full")).expect("Failed to find setup.cfg");
    assert_eq!(project_root(&path), fixture("full"));

    let config = setup_cfg::from_path(&path).expect("Failed to parse setup.cfg");
    assert_eq!(config.get("name"), Some(&LegacyValue::from("spam-eggs")));
    assert!(matches!(
        config.get("long_description"),
        Some(LegacyValue::File(file)) if file.file == "README.rst"
    ));
    // Sections other than metadata and options are not read.
    assert!(config.get("max-line-length").is_none());
    assert!(config.get("packages").is_some());

    let extras = config
        .get("extras_require")
        .and_then(LegacyValue::as_table)
        .expect("extras_require is a table");
    assert_eq!(
        extras.keys().map(String::as_str).collect::<Vec<_>>(),
        ["test", "docs"]
    );
    assert_eq!(
        extras["test"].items(Split::Lines),
        ["pytest>=6", "pytest-cov; extra == \"test\""]
    );
}

#[test]
fn inline_semicolons_are_not_comments() {
    let config = setup_cfg::from_path(&fixture("inline-marker").join("setup.cfg"))
        .expect("Failed to parse setup.cfg");
    let requires = config
        .get("install_requires")
        .expect("install_requires is present")
        .items(Split::Lines);
    assert_eq!(
        requires,
        [
            "tomli; python_version < \"3.11\"",
            "typing-extensions>=4 ; python_version < \"3.10\"",
        ]
    );
}
