use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_config_path_command() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("deskmon")
        .env("DESKMON_HOME", dir.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_init_creates_file() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");

    assert!(!config_path.exists());

    cargo_bin_cmd!("deskmon")
        .env("DESKMON_HOME", dir.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created config at"));

    assert!(config_path.exists());

    let contents = fs::read_to_string(&config_path).unwrap();
    assert!(contents.contains("# deskmon Configuration"));
    assert!(contents.contains("api_base_url ="));
    assert!(contents.contains("monitoring_url ="));
}

#[test]
fn test_config_init_fails_if_exists() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");

    fs::write(&config_path, "# existing config").unwrap();

    cargo_bin_cmd!("deskmon")
        .env("DESKMON_HOME", dir.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_config_set_url_updates_file() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");

    cargo_bin_cmd!("deskmon")
        .env("DESKMON_HOME", dir.path())
        .args(["config", "set-url", "http://api.internal:9000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set api_base_url to"));

    let contents = fs::read_to_string(&config_path).unwrap();
    assert!(contents.contains(r#"api_base_url = "http://api.internal:9000""#));
    // Template comments and the other key survive the edit.
    assert!(contents.contains("# deskmon Configuration"));
    assert!(contents.contains("monitoring_url ="));
}

#[test]
fn test_config_set_url_rejects_empty() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("deskmon")
        .env("DESKMON_HOME", dir.path())
        .args(["config", "set-url", "  "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("URL cannot be empty"));
}
