//! End-to-end tests for `pyproject-migrate convert`.

use toml::Table;

use crate::common::{INSTA_FILTERS, convert_command, fixture, migrate_command, project};
use crate::migrate_snapshot;

/// Run `convert` and parse its stdout back as TOML.
fn convert_to_table(mut command: std::process::Command) -> Table {
    let output = command.output().expect("Failed to execute pyproject-migrate");
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "convert failed: {stderr}");
    stdout.parse::<Table>().expect("output is valid TOML")
}

fn strings(value: &toml::Value) -> Vec<&str> {
    value
        .as_array()
        .expect("expected an array")
        .iter()
        .map(|item| item.as_str().expect("expected a string"))
        .collect()
}

#[test]
fn minimal() {
    migrate_snapshot!(&INSTA_FILTERS, convert_command(&fixture("minimal")), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    [build-system]
    requires = ["setuptools"]
    build-backend = "setuptools.build_meta"

    [project]
    name = "spam"
    version = "1.0"
    ----- stderr -----
    "#);
}

#[test]
fn setup_cfg_path_is_accepted() {
    let table = convert_to_table(convert_command(&fixture("minimal").join("setup.cfg")));
    assert_eq!(table["project"]["name"].as_str(), Some("spam"));
}

#[test]
fn full_project() {
    let table = convert_to_table(convert_command(&fixture("full")));

    let build_system = &table["build-system"];
    assert_eq!(strings(&build_system["requires"]), ["setuptools", "wheel"]);
    assert_eq!(
        build_system["build-backend"].as_str(),
        Some("setuptools.build_meta")
    );

    let project = &table["project"];
    assert_eq!(project["name"].as_str(), Some("spam-eggs"));
    assert!(project.get("version").is_none());
    assert_eq!(strings(&project["dynamic"]), ["version"]);
    assert_eq!(project["description"].as_str(), Some("Spam and eggs"));
    assert_eq!(project["readme"]["file"].as_str(), Some("README.rst"));
    assert_eq!(project["readme"]["content-type"].as_str(), Some("text/x-rst"));
    assert_eq!(project["requires-python"].as_str(), Some(">=3.8,<4"));
    assert_eq!(project["license"]["text"].as_str(), Some("MIT"));
    assert_eq!(strings(&project["license-files"]), ["LICENSE"]);
    assert_eq!(strings(&project["keywords"]), ["spam", "eggs"]);
    assert_eq!(
        strings(&project["classifiers"]),
        [
            "Programming Language :: Python :: 3",
            "License :: OSI Approved :: MIT License",
            "Programming Language :: Python :: 3",
        ]
    );

    let authors = project["authors"].as_array().unwrap();
    assert_eq!(authors.len(), 2);
    assert_eq!(authors[0]["name"].as_str(), Some("John Cleese"));
    assert_eq!(authors[0]["email"].as_str(), Some("john@python.example.com"));
    assert_eq!(authors[1]["name"].as_str(), Some("Graham Chapman"));
    assert!(authors[1].get("email").is_none());

    let maintainers = project["maintainers"].as_array().unwrap();
    assert_eq!(maintainers[0]["email"].as_str(), Some("eric@python.example.com"));

    assert_eq!(
        strings(&project["dependencies"]),
        ["requests>=2.0,<3", "importlib-metadata; python_version < \"3.8\""]
    );
    let extras = &project["optional-dependencies"];
    assert_eq!(strings(&extras["test"]), ["pytest>=6", "pytest-cov"]);
    assert!(strings(&extras["docs"]).is_empty());

    let urls = project["urls"].as_table().unwrap();
    assert_eq!(
        urls.keys().map(String::as_str).collect::<Vec<_>>(),
        ["Source", "Tracker"]
    );
    assert_eq!(project["scripts"]["spam"].as_str(), Some("spam.cli:main"));
    assert_eq!(project["gui-scripts"]["spam-gui"].as_str(), Some("spam.gui:main"));
    assert_eq!(
        project["entry-points"]["spam.plugins"]["eggs"].as_str(),
        Some("spam.eggs:plugin")
    );

    assert_eq!(
        table["tool"]["setuptools"]["dynamic"]["version"]["attr"].as_str(),
        Some("spam.__version__")
    );
}

#[test]
fn embed_readme() {
    let mut command = convert_command(&fixture("full"));
    command.arg("--embed-readme");
    let table = convert_to_table(command);
    let readme = &table["project"]["readme"];
    assert!(readme.get("file").is_none());
    assert!(
        readme["text"]
            .as_str()
            .unwrap()
            .starts_with("Spam and eggs\n=============")
    );
}

#[test]
fn readme_content_type_override() {
    let mut command = convert_command(&fixture("full"));
    command.args(["--readme-content-type", "text/markdown; variant=GFM"]);
    let table = convert_to_table(command);
    assert_eq!(
        table["project"]["readme"]["content-type"].as_str(),
        Some("text/markdown; variant=GFM")
    );

    let mut command = convert_command(&fixture("full"));
    command.args(["--readme-content-type", "auto"]);
    let table = convert_to_table(command);
    assert_eq!(
        table["project"]["readme"]["content-type"].as_str(),
        Some("text/x-rst")
    );
}

#[test]
fn invalid_readme_content_type() {
    let mut command = convert_command(&fixture("full"));
    command.args(["--readme-content-type", "markdown"]);
    let output = command.output().expect("Failed to execute pyproject-migrate");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr.contains("`markdown` is not a valid content type"), "{stderr}");
}

#[test]
fn from_json() {
    let dir = fixture("setup-json");
    let mut command = migrate_command();
    command
        .arg("convert")
        .arg(&dir)
        .arg("--from-json")
        .arg(dir.join("setup.json"));
    let table = convert_to_table(command);

    let project = &table["project"];
    assert_eq!(project["version"].as_str(), Some("2.0.0"));
    assert_eq!(project["readme"]["file"].as_str(), Some("README.md"));
    assert_eq!(project["readme"]["content-type"].as_str(), Some("text/markdown"));
    assert_eq!(project["authors"][0]["name"].as_str(), Some("Terry Jones"));
    assert!(project["authors"][0].get("email").is_none());
    assert!(project.get("maintainers").is_none());
    assert_eq!(strings(&project["dependencies"]), ["click>=8"]);
    assert_eq!(
        strings(&project["optional-dependencies"]["windows"]),
        ["pywin32; sys_platform == \"win32\""]
    );
    assert_eq!(project["scripts"]["spam"].as_str(), Some("spam.cli:main"));
    assert_eq!(
        project["urls"]["Documentation"].as_str(),
        Some("https://spam.readthedocs.io")
    );
}

#[test]
fn json_dump_with_setup_flags() {
    let dir = project(&[(
        "setup.json",
        r#"{"name": "spam", "version": 1.0, "zip_safe": false, "include_package_data": true}"#,
    )]);
    let mut command = migrate_command();
    command
        .arg("convert")
        .arg(dir.path())
        .arg("--from-json")
        .arg(dir.path().join("setup.json"));
    let table = convert_to_table(command);

    assert_eq!(table["project"]["name"].as_str(), Some("spam"));
    assert_eq!(table["project"]["version"].as_str(), Some("1.0"));
}

#[test]
fn requirements_from_files() {
    let dir = project(&[
        (
            "setup.cfg",
            "[metadata]\nname = spam\n\n[options]\ninstall_requires = file: requirements.txt\n\n[options.extras_require]\ntest = file: requirements-test.txt\n",
        ),
        ("requirements.txt", "requests>=2\n# pinned for py3.7\nimportlib-metadata; python_version < \"3.8\"\n"),
        ("requirements-test.txt", "pytest>=7\n"),
    ]);
    let table = convert_to_table(convert_command(dir.path()));

    let project = &table["project"];
    assert_eq!(
        strings(&project["dependencies"]),
        ["requests>=2", "importlib-metadata; python_version < \"3.8\""]
    );
    assert_eq!(strings(&project["optional-dependencies"]["test"]), ["pytest>=7"]);
}

#[test]
fn inline_semicolons_survive() {
    let table = convert_to_table(convert_command(&fixture("inline-marker")));
    assert_eq!(
        strings(&table["project"]["dependencies"]),
        [
            "tomli; python_version < \"3.11\"",
            "typing-extensions>=4 ; python_version < \"3.10\"",
        ]
    );
}

#[test]
fn write_to_file() {
    let dir = project(&[("setup.cfg", "[metadata]\nname = spam\n")]);
    let output_path = dir.path().join("pyproject.toml");
    let mut command = convert_command(dir.path());
    command.arg("-o").arg(&output_path);

    let output = command.output().expect("Failed to execute pyproject-migrate");
    assert!(output.status.success());
    assert!(output.stdout.is_empty());

    let written = fs_err::read_to_string(&output_path).unwrap();
    let table = written.parse::<Table>().unwrap();
    assert_eq!(table["project"]["name"].as_str(), Some("spam"));
}

#[test]
fn line_width_from_env() {
    let dir = project(&[(
        "setup.cfg",
        "[metadata]\nname = spam\nkeywords = spam, eggs\n",
    )]);
    let mut command = convert_command(dir.path());
    command.env("PYPROJECT_MIGRATE_LINE_WIDTH", "10");
    let output = command.output().expect("Failed to execute pyproject-migrate");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("keywords = [\n    \"spam\",\n    \"eggs\",\n]"),
        "{stdout}"
    );
}

#[test]
fn missing_name() {
    let dir = project(&[("setup.cfg", "[metadata]\nversion = 1.0\n")]);
    migrate_snapshot!(&INSTA_FILTERS, convert_command(dir.path()), @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    error: Failed to translate the setuptools configuration
      Caused by: Missing required field `name`
    ");
}

#[test]
fn malformed_entry_point() {
    let dir = project(&[(
        "setup.cfg",
        "[metadata]\nname = spam\n\n[options.entry_points]\nconsole_scripts =\n    spam\n",
    )]);
    migrate_snapshot!(&INSTA_FILTERS, convert_command(dir.path()), @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    error: Failed to translate the setuptools configuration
      Caused by: Invalid value for `entry_points`: `spam` (expected `name = target`)
    ");
}

#[test]
fn missing_readme_file() {
    let dir = project(&[(
        "setup.cfg",
        "[metadata]\nname = spam\nlong_description = file: README.md\n",
    )]);
    let output = convert_command(dir.path())
        .output()
        .expect("Failed to execute pyproject-migrate");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(1));
    assert!(
        stderr.contains("referenced by `long_description`"),
        "{stderr}"
    );
}

#[test]
fn malformed_setup_cfg() {
    let dir = project(&[("setup.cfg", "[metadata\nname = spam\n")]);
    let output = convert_command(dir.path())
        .output()
        .expect("Failed to execute pyproject-migrate");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("Failed to parse"), "{stderr}");
}

#[test]
fn no_setup_cfg() {
    let dir = project(&[]);
    let output = convert_command(dir.path())
        .output()
        .expect("Failed to execute pyproject-migrate");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr.contains("No setup.cfg found"), "{stderr}");
}

#[test]
fn explicit_setup_cfg_env() {
    let dir = project(&[("custom.cfg", "[metadata]\nname = custom\n")]);
    let mut command = migrate_command();
    command
        .arg("convert")
        .env("PYPROJECT_MIGRATE_SETUP_CFG", dir.path().join("custom.cfg"));
    let table = convert_to_table(command);
    assert_eq!(table["project"]["name"].as_str(), Some("custom"));
}
