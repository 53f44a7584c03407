//! Integration tests for the fontbridge binary

use assert_cmd::{cargo::cargo_bin_cmd, Command};
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

fn fixture_config_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("fontbridge.toml")
}

fn fontbridge_cmd() -> Command {
    let mut cmd = cargo_bin_cmd!("fontbridge");
    cmd.env("FONTBRIDGE_CONFIG", fixture_config_path());
    cmd
}

#[test]
fn test_version_flag() {
    fontbridge_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("fontbridge"));
}

#[test]
fn test_help() {
    fontbridge_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("drives fontforge"));
}

#[test]
fn test_invalid_command() {
    fontbridge_cmd().arg("invalid").assert().failure();
}

#[test]
fn test_version_normalize() {
    fontbridge_cmd()
        .args(["version", "normalize", "1.2 build 110"])
        .assert()
        .success()
        .stdout("1.2+110\n");

    fontbridge_cmd()
        .args(["version", "normalize", "2.0;extra text"])
        .assert()
        .success()
        .stdout("2.0\n");
}

#[test]
fn test_version_parse() {
    fontbridge_cmd()
        .args(["version", "parse", "003.001"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3.1.0"));
}

#[test]
fn test_version_parse_invalid() {
    fontbridge_cmd()
        .args(["version", "parse", "not-a-version"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid version format"));
}

#[test]
fn test_config_show() {
    fontbridge_cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration:"))
        .stdout(predicate::str::contains("fontforge"));
}

#[test]
fn test_config_path() {
    fontbridge_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fontbridge.toml"));
}

#[test]
fn test_config_set_then_show() {
    let dir = TempDir::new().expect("tempdir");
    let config = dir.path().join("fontbridge.toml");

    let mut set = cargo_bin_cmd!("fontbridge");
    set.env("FONTBRIDGE_CONFIG", &config)
        .args(["config", "set", "module", "fontforge_stub"])
        .assert()
        .success();

    let mut show = cargo_bin_cmd!("fontbridge");
    show.env("FONTBRIDGE_CONFIG", &config)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fontforge_stub"));
}

#[test]
fn test_config_set_unknown_key() {
    let dir = TempDir::new().expect("tempdir");
    let mut cmd = cargo_bin_cmd!("fontbridge");
    cmd.env("FONTBRIDGE_CONFIG", dir.path().join("fontbridge.toml"))
        .args(["config", "set", "colour", "blue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn test_config_show_reports_missing_venv() {
    let dir = TempDir::new().expect("tempdir");
    let config = dir.path().join("fontbridge.toml");
    std::fs::write(
        &config,
        format!("venv_path = \"{}\"\n", dir.path().join("no-venv").display()),
    )
    .expect("write config");

    let mut cmd = cargo_bin_cmd!("fontbridge");
    cmd.env("FONTBRIDGE_CONFIG", &config)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Virtual environment not found"));
}

#[test]
fn test_info_missing_file() {
    fontbridge_cmd()
        .args(["info", "/nonexistent/font.sfd"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_set_names_unpaired() {
    fontbridge_cmd()
        .args([
            "set-names",
            "/nonexistent/font.sfd",
            "Copyright",
            "--output",
            "out.sfd",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Expected key/value pairs"));
}
