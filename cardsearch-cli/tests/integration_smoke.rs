//! Smoke tests to verify command wiring

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/samples.json")
}

/// Command isolated from the user's home, cwd config and environment
fn cardsearch(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("cardsearch").unwrap();
    cmd.env("HOME", home.path())
        .env_remove("CARDSEARCH_API_URL")
        .env_remove("RUST_LOG")
        .current_dir(home.path())
        .arg("--quiet");
    cmd
}

// === Help Tests ===

#[test]
fn test_samples_help() {
    let mut cmd = Command::cargo_bin("cardsearch").unwrap();
    cmd.arg("samples").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Read the catalog from a local JSON file"));
}

#[test]
fn test_search_help() {
    let mut cmd = Command::cargo_bin("cardsearch").unwrap();
    cmd.arg("search").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Milliseconds before the warm-up notice"));
}

#[test]
fn test_completions_bash() {
    let mut cmd = Command::cargo_bin("cardsearch").unwrap();
    cmd.arg("completions").arg("bash");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("cardsearch"));
}

// === Config Tests ===

#[test]
fn test_config_path_uses_home() {
    let home = TempDir::new().unwrap();
    cardsearch(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".cardsearch/config.toml"));
}

#[test]
fn test_config_init_then_show() {
    let home = TempDir::new().unwrap();
    cardsearch(&home).args(["config", "init"]).assert().success();
    assert!(home.path().join(".cardsearch/config.toml").exists());

    cardsearch(&home)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    cardsearch(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("delay_ms = 5000"))
        .stdout(predicate::str::contains("compact_limit = 6"));
}

#[test]
fn test_api_url_flag_and_env_reach_config() {
    let home = TempDir::new().unwrap();
    cardsearch(&home)
        .env("CARDSEARCH_API_URL", "https://env.example.com")
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://env.example.com"));

    cardsearch(&home)
        .env("CARDSEARCH_API_URL", "https://env.example.com")
        .args(["--api-url", "https://flag.example.com", "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://flag.example.com"));
}

#[test]
fn test_local_config_overrides_home() {
    let home = TempDir::new().unwrap();
    std::fs::write(
        home.path().join("cardsearch.toml"),
        "[samples]\ncompact_limit = 2\n",
    )
    .unwrap();

    cardsearch(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("compact_limit = 2"));
}

// === Samples Tests ===

#[test]
fn test_samples_text_from_file() {
    let home = TempDir::new().unwrap();
    cardsearch(&home)
        .args(["samples", "--file"])
        .arg(fixture())
        .assert()
        .success()
        .stdout(predicate::str::contains("## Creatures"))
        .stdout(predicate::str::contains("\"red dragon\" (5-40 results) [color, type]"));
}

#[test]
fn test_samples_compact_html_truncates() {
    let home = TempDir::new().unwrap();
    cardsearch(&home)
        .args(["samples", "--format", "compact", "--max", "2", "--file"])
        .arg(fixture())
        .assert()
        .success()
        .stdout(predicate::str::contains("<div id=\"compact-samples\"><h3>Popular Searches</h3>"))
        .stdout(predicate::str::contains(">1 mana elf</button>"))
        .stdout(predicate::str::contains("counter target spell").not());
}

#[test]
fn test_samples_full_html_with_styles() {
    let home = TempDir::new().unwrap();
    cardsearch(&home)
        .args(["samples", "--format", "full", "--with-styles", "--file"])
        .arg(fixture())
        .assert()
        .success()
        .stdout(predicate::str::contains("<style id=\"sample-queries-styles\">"))
        .stdout(predicate::str::contains("Try These Sample Searches"))
        .stdout(predicate::str::contains("role=\"button\" tabindex=\"0\""));
}

#[test]
fn test_samples_bad_file_fails() {
    let home = TempDir::new().unwrap();
    std::fs::write(home.path().join("broken.json"), "{\"samples\": [").unwrap();

    cardsearch(&home)
        .args(["samples", "--file", "broken.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load sample queries"));
}

// === Search Tests ===

#[test]
fn test_search_requires_api_url() {
    let home = TempDir::new().unwrap();
    cardsearch(&home)
        .args(["search", "red dragon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No API URL configured"));
}
