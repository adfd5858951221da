//! Project-local configuration layering tests.
//!
//! Runs the binary from a temp working directory carrying a `.quadrant.toml`
//! and verifies file values apply where CLI flags are absent, and lose where
//! they are present.

#![allow(clippy::unwrap_used, deprecated)]

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use quadrant_test_support::SyntheticRasterBuilder;

fn write_project_config(dir: &Path, content: &str) {
    std::fs::write(dir.join(".quadrant.toml"), content).unwrap();
}

#[test]
fn test_config_dir_from_project_file() {
    let workdir = tempfile::tempdir().unwrap();
    write_project_config(
        workdir.path(),
        r"
[general]
config_dir = 'cfgs'
",
    );

    let mut init = Command::cargo_bin("quadrant").unwrap();
    init.current_dir(workdir.path())
        .arg("init")
        .arg("--width")
        .arg("800")
        .arg("--height")
        .arg("600");
    init.assert().success();

    assert!(
        workdir.path().join("cfgs").join("Default.json").is_file(),
        "configuration should land in the configured directory"
    );

    let mut list = Command::cargo_bin("quadrant").unwrap();
    list.current_dir(workdir.path()).arg("configs");
    list.assert()
        .success()
        .stdout(predicate::str::contains("Default - 800x600"));
}

#[test]
fn test_cli_config_dir_overrides_project_file() {
    let workdir = tempfile::tempdir().unwrap();
    write_project_config(
        workdir.path(),
        r"
[general]
config_dir = 'from_file'
",
    );

    let mut init = Command::cargo_bin("quadrant").unwrap();
    init.current_dir(workdir.path())
        .arg("init")
        .arg("--width")
        .arg("800")
        .arg("--height")
        .arg("600")
        .arg("--config-dir")
        .arg("from_cli");
    init.assert().success();

    assert!(workdir.path().join("from_cli").join("Default.json").is_file());
    assert!(!workdir.path().join("from_file").exists());
}

#[test]
fn test_process_output_default_from_project_file() {
    let workdir = tempfile::tempdir().unwrap();
    write_project_config(
        workdir.path(),
        r"
[general]
config_dir = 'cfgs'

[process]
output = 'crops'
",
    );

    let mut init = Command::cargo_bin("quadrant").unwrap();
    init.current_dir(workdir.path())
        .arg("init")
        .arg("--width")
        .arg("200")
        .arg("--height")
        .arg("100");
    init.assert().success();

    SyntheticRasterBuilder::coordinate_gradient(200, 100)
        .save(workdir.path().join("shot.png"))
        .unwrap();

    let mut process = Command::cargo_bin("quadrant").unwrap();
    process
        .current_dir(workdir.path())
        .arg("process")
        .arg("shot.png")
        .arg("--config")
        .arg("Default")
        .arg("--quiet");
    process
        .assert()
        .success()
        .stdout(predicate::str::contains("Processed: 4"));

    assert!(
        workdir
            .path()
            .join("crops")
            .join("Top Left")
            .join("shot_Top Left.png")
            .is_file(),
        "crops should land under the configured output root"
    );
}

#[test]
fn test_invalid_blur_value_in_project_file_warns() {
    let workdir = tempfile::tempdir().unwrap();
    write_project_config(
        workdir.path(),
        r"
[general]
config_dir = 'cfgs'

[blur]
intensity = 42
",
    );

    let mut cmd = Command::cargo_bin("quadrant").unwrap();
    cmd.current_dir(workdir.path()).arg("configs");

    // Invalid values warn but never abort the command
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("blur.intensity"));
}
