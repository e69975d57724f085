// crates/nt-cli/tests/cli.rs - End-to-end tests for the nt binary

use assert_cmd::Command;
use chrono::Utc;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    fn db(&self) -> PathBuf {
        self.dir.path().join("notes.db")
    }

    /// `nt` isolated from the user's config, data dir and environment
    fn nt(&self) -> Command {
        let mut cmd = Command::cargo_bin("nt").unwrap();
        cmd.env_remove("NT_DB")
            .env_remove("NT_LOG")
            .env("HOME", self.dir.path())
            .env("XDG_CONFIG_HOME", self.dir.path().join("config"))
            .env("XDG_DATA_HOME", self.dir.path().join("data"))
            .arg("--db")
            .arg(self.db());
        cmd
    }

    fn add(&self, title: &str, body: &str) {
        self.nt().args(["add", title, body]).assert().success();
    }
}

fn today() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}

#[test]
fn test_add_list_view_round() {
    let sb = Sandbox::new();

    sb.nt()
        .args(["add", "Buy milk", "2% milk, 1 gal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added note 1: Buy milk"));

    sb.nt()
        .arg("list")
        .assert()
        .success()
        .stdout(format!("1\t{}\tBuy milk\n", today()));

    sb.nt()
        .args(["view", "1"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("ID: 1\nTitle: Buy milk\nDate: "))
        .stdout(predicate::str::ends_with("\n\n2% milk, 1 gal\n"));
}

#[test]
fn test_ids_are_sequential_and_listed_ascending() {
    let sb = Sandbox::new();
    sb.add("first", "a");
    sb.add("second", "b");
    sb.add("third", "c");

    let output = sb.nt().arg("list").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let ids: Vec<&str> = stdout
        .lines()
        .map(|line| line.split('\t').next().unwrap())
        .collect();
    assert_eq!(ids, ["1", "2", "3"]);
}

#[test]
fn test_view_missing_note_fails() {
    let sb = Sandbox::new();
    sb.add("only", "one");

    sb.nt()
        .args(["view", "42"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Note 42 not found"));
}

#[test]
fn test_invalid_ids_are_rejected() {
    let sb = Sandbox::new();

    for bad in ["abc", "0", "-3"] {
        sb.nt().args(["view", "--", bad]).assert().failure();
    }

    // Rejected before the store is opened, so no database file appears
    assert!(!sb.db().exists());
}

#[test]
fn test_view_reads_id_from_stdin() {
    let sb = Sandbox::new();
    sb.add("piped", "body text");

    sb.nt()
        .arg("view")
        .write_stdin("1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Title: piped"));

    sb.nt()
        .arg("view")
        .write_stdin("one\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid note ID"));
}

#[test]
fn test_add_reads_body_from_stdin() {
    let sb = Sandbox::new();

    sb.nt()
        .args(["add", "Meeting"])
        .write_stdin("Agenda\n- budget\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Added note 1: Meeting"));

    sb.nt()
        .args(["view", "1"])
        .assert()
        .success()
        .stdout(predicate::str::ends_with("\n\nAgenda\n- budget\n"));
}

#[test]
fn test_list_json() {
    let sb = Sandbox::new();
    sb.add("Buy milk", "2% milk, 1 gal");
    sb.add("Call mom", "Sunday");

    let output = sb.nt().args(["list", "--json"]).output().unwrap();
    assert!(output.status.success());

    let notes: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let notes = notes.as_array().unwrap();
    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0]["id"], 1);
    assert_eq!(notes[0]["title"], "Buy milk");
    assert_eq!(notes[0]["body"], "2% milk, 1 gal");
    assert_eq!(notes[0]["completed"], false);
    assert_eq!(notes[1]["title"], "Call mom");
}

#[test]
fn test_empty_list_prints_nothing() {
    let sb = Sandbox::new();
    sb.nt().arg("list").assert().success().stdout("");
}

#[test]
fn test_db_from_environment() {
    let sb = Sandbox::new();
    let other = sb.dir.path().join("other.db");

    let mut cmd = Command::cargo_bin("nt").unwrap();
    cmd.env("NT_DB", &other)
        .env("HOME", sb.dir.path())
        .env("XDG_CONFIG_HOME", sb.dir.path().join("config"))
        .args(["add", "elsewhere", "x"])
        .assert()
        .success();

    assert!(other.exists());
    assert!(!sb.db().exists());
}

// dirs only honors XDG_CONFIG_HOME on Linux
#[cfg(target_os = "linux")]
#[test]
fn test_db_from_config_file() {
    let sb = Sandbox::new();
    let config_dir = sb.dir.path().join("config").join("nt");
    std::fs::create_dir_all(&config_dir).unwrap();
    let configured = sb.dir.path().join("configured.db");
    write_config(&config_dir, &configured);

    let mut cmd = Command::cargo_bin("nt").unwrap();
    cmd.env_remove("NT_DB")
        .env("HOME", sb.dir.path())
        .env("XDG_CONFIG_HOME", sb.dir.path().join("config"))
        .args(["add", "configured", "x"])
        .assert()
        .success();

    assert!(configured.exists());
}

fn write_config(config_dir: &Path, db: &Path) {
    let contents = format!("[storage]\npath = {:?}\n", db.display().to_string());
    std::fs::write(config_dir.join("config.toml"), contents).unwrap();
}

#[test]
fn test_config_prints_defaults_without_opening_store() {
    let sb = Sandbox::new();

    sb.nt()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("[storage]"))
        .stdout(predicate::str::contains("lock_timeout_ms = 1000"));

    assert!(!sb.db().exists());
}
