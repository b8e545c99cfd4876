use crate::common::{migrate_command, project};

#[test]
fn quiet_suppresses_warnings() {
    let dir = project(&[
        ("setup.cfg", "[metadata]\nname = spam\nlong_description = Spam and eggs.\n"),
        ("setup.py", "from setuptools import setup\nsetup()\n"),
    ]);
    let mut cmd = migrate_command();
    cmd.arg("--quiet").arg("convert").arg(dir.path());

    let output = cmd.output().expect("Failed to execute pyproject-migrate");
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(output.status.success());
    assert!(
        stderr.is_empty(),
        "Expected no output with --quiet, got: {stderr}"
    );
}

#[test]
fn lossy_defaults_are_warned_about() {
    let dir = project(&[(
        "setup.cfg",
        "[metadata]\nname = spam\nlong_description = Spam and eggs.\n",
    )]);
    let mut cmd = migrate_command();
    cmd.arg("convert").arg(dir.path());

    let output = cmd.output().expect("Failed to execute pyproject-migrate");
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(output.status.success());
    assert!(
        stderr.contains("defaulting to `text/plain`"),
        "Expected a content type warning, got: {stderr}"
    );
}

#[test]
fn setup_py_is_warned_about() {
    let dir = project(&[
        ("setup.cfg", "[metadata]\nname = spam\n"),
        ("setup.py", "from setuptools import setup\nsetup()\n"),
    ]);
    let mut cmd = migrate_command();
    cmd.arg("convert").arg(dir.path());

    let output = cmd.output().expect("Failed to execute pyproject-migrate");
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(output.status.success());
    assert!(
        stderr.contains("setup.py is not executed"),
        "Expected a setup.py warning, got: {stderr}"
    );
}

#[test]
fn verbose_logs_ignored_fields() {
    let dir = project(&[(
        "setup.cfg",
        "[metadata]\nname = spam\nplatforms = any\n",
    )]);
    let mut cmd = migrate_command();
    cmd.arg("-v").arg("convert").arg(dir.path());

    let output = cmd.output().expect("Failed to execute pyproject-migrate");
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(output.status.success());
    assert!(
        stderr.contains("Ignoring unsupported field `platforms`"),
        "Expected a debug log for the ignored field, got: {stderr}"
    );
}
