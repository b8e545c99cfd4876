use crate::common::{dump_command, fixture, migrate_command};

#[test]
fn dump_setup_cfg() {
    let output = dump_command(&fixture("minimal"))
        .output()
        .expect("Failed to execute pyproject-migrate");
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json, serde_json::json!({ "name": "spam", "version": "1.0" }));
}

#[test]
fn dump_keeps_file_references_and_tables() {
    let output = dump_command(&fixture("full"))
        .output()
        .expect("Failed to execute pyproject-migrate");
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["long_description"], serde_json::json!({ "file": "README.rst" }));
    assert_eq!(json["version"], "attr: spam.__version__");
    assert_eq!(
        json["entry_points"]["console_scripts"].as_str().map(str::trim),
        Some("spam = spam.cli:main")
    );
}

#[test]
fn dump_json_drops_nulls() {
    let dir = fixture("setup-json");
    let output = migrate_command()
        .arg("dump")
        .arg(&dir)
        .arg("--from-json")
        .arg(dir.join("setup.json"))
        .output()
        .expect("Failed to execute pyproject-migrate");
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(json.get("author_email").is_none());
    assert!(json.get("maintainer").is_none());
    assert_eq!(json["author"], "Terry Jones");
}
