//! Integration tests for the gitseed CLI.
//!
//! These tests drive the binary end-to-end against real git repositories.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command as StdCommand;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper to get the gitseed command.
fn gitseed() -> Command {
    Command::new(env!("CARGO_BIN_EXE_gitseed"))
}

/// Run a git command in `dir`, panicking on failure.
fn git(dir: &Path, args: &[&str]) -> String {
    let output = StdCommand::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run git");
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Create a bare origin repository seeded with one commit on main.
fn setup_seeded_origin(temp: &TempDir, name: &str) -> PathBuf {
    let origin = temp.path().join(name);
    git(temp.path(), &["init", "--bare", "-b", "main", name]);

    let seed = temp.path().join(format!("{name}-seed"));
    let seed_path = seed.to_str().expect("seed path is not utf-8").to_string();
    fs::create_dir(&seed).expect("failed to create seed dir");
    git(temp.path(), &["init", "-b", "main", &seed_path]);
    git(&seed, &["config", "user.name", "Seed User"]);
    git(&seed, &["config", "user.email", "seed@example.com"]);

    fs::write(seed.join("seed.txt"), "seed\n").expect("failed to write seed file");
    git(&seed, &["add", "."]);
    git(&seed, &["commit", "-m", "seed commit"]);

    let origin_path = origin.to_str().expect("origin path is not utf-8");
    git(&seed, &["push", origin_path, "main"]);

    origin
}

/// Find the directory a create-mode run produced inside `temp`.
fn generated_dir(temp: &TempDir) -> PathBuf {
    fs::read_dir(temp.path())
        .expect("failed to read temp dir")
        .filter_map(std::result::Result::ok)
        .map(|e| e.path())
        .find(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with("repository-"))
        })
        .expect("no generated repository directory found")
}

// ============================================================================
// Basic CLI tests
// ============================================================================

#[test]
fn test_version_flag() {
    gitseed()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("gitseed"));
}

#[test]
fn test_help_flag() {
    gitseed()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("fast-import"))
        .stdout(predicate::str::contains("--no-weekends"))
        .stdout(predicate::str::contains("--days-before"))
        .stdout(predicate::str::contains("--append"));
}

// ============================================================================
// Validation tests
// ============================================================================

#[test]
fn test_rejects_max_commits_out_of_range() {
    let temp = TempDir::new().unwrap();
    gitseed()
        .current_dir(&temp)
        .args(["--max-commits", "25", "--user-name", "T", "--user-email", "t@e.c"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("between 1 and 20"));
}

#[test]
fn test_rejects_frequency_out_of_range() {
    let temp = TempDir::new().unwrap();
    gitseed()
        .current_dir(&temp)
        .args(["--frequency", "150", "--user-name", "T", "--user-email", "t@e.c"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("between 0 and 100"));
}

#[test]
fn test_append_requires_repository() {
    gitseed()
        .arg("--append")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--repository"));
}

#[test]
fn test_missing_identity_is_fatal() {
    let temp = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();

    gitseed()
        .current_dir(&temp)
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path())
        .env("GIT_CONFIG_GLOBAL", home.path().join("gitconfig"))
        .env("GIT_CONFIG_SYSTEM", "/dev/null")
        .args(["--days-before", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("user.name not configured"));
}

// ============================================================================
// Generation tests
// ============================================================================

#[test]
fn test_generates_commit_history() {
    let temp = TempDir::new().unwrap();

    gitseed()
        .current_dir(&temp)
        .args([
            "--days-before",
            "10",
            "--frequency",
            "100",
            "--max-commits",
            "2",
            "--user-name",
            "Test User",
            "--user-email",
            "test@example.com",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Generating"))
        .stdout(predicate::str::contains("Repository generated successfully"));

    let repo = generated_dir(&temp);

    // Every day was scheduled, so at least 10 commits exist.
    let count: u32 = git(&repo, &["rev-list", "--count", "main"])
        .trim()
        .parse()
        .unwrap();
    assert!((10..=20).contains(&count), "unexpected commit count {count}");

    let log = git(&repo, &["log", "--format=%s %ae", "main"]);
    for line in log.lines() {
        assert!(line.starts_with("Contribution: "), "unexpected subject: {line}");
        assert!(line.ends_with("test@example.com"));
    }

    // The placeholder file is checked out on main.
    let readme = fs::read_to_string(repo.join("README.md")).unwrap();
    assert!(readme.starts_with("# Contributions"));
}

#[test]
fn test_empty_range_skips_import() {
    let temp = TempDir::new().unwrap();

    gitseed()
        .current_dir(&temp)
        .args([
            "--days-before",
            "0",
            "--days-after",
            "0",
            "--user-name",
            "Test User",
            "--user-email",
            "test@example.com",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("No commits scheduled"));

    // The repository was initialized but stayed empty.
    let repo = generated_dir(&temp);
    let output = StdCommand::new("git")
        .args(["rev-parse", "HEAD"])
        .current_dir(&repo)
        .output()
        .unwrap();
    assert!(!output.status.success(), "empty range must not create commits");
}

#[test]
fn test_directory_collision_is_fatal() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("taken")).unwrap();

    gitseed()
        .current_dir(&temp)
        .args([
            "-r",
            "https://example.com/taken.git",
            "--user-name",
            "T",
            "--user-email",
            "t@e.c",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

// ============================================================================
// Remote / append tests
// ============================================================================

#[test]
fn test_append_preserves_existing_history() {
    let temp = TempDir::new().unwrap();
    let origin = setup_seeded_origin(&temp, "origin.git");
    let origin = origin.to_str().unwrap();

    gitseed()
        .current_dir(&temp)
        .args([
            "--append",
            "-r",
            origin,
            "--days-before",
            "5",
            "--frequency",
            "100",
            "--max-commits",
            "1",
            "--user-name",
            "Test User",
            "--user-email",
            "test@example.com",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cloning"))
        .stdout(predicate::str::contains("Repository generated successfully"));

    // Origin now holds one linear history: the seed commit at the root,
    // generated commits on top.
    let log = git(temp.path(), &["--git-dir", "origin.git", "log", "--format=%s", "main"]);
    let subjects: Vec<&str> = log.lines().collect();

    assert_eq!(subjects.last(), Some(&"seed commit"));
    assert_eq!(subjects.len(), 6);
    for subject in &subjects[..5] {
        assert!(subject.starts_with("Contribution: "));
    }
}

#[test]
fn test_push_rejection_prints_guidance() {
    let temp = TempDir::new().unwrap();
    let origin = setup_seeded_origin(&temp, "busy.git");
    let origin = origin.to_str().unwrap();

    gitseed()
        .current_dir(&temp)
        .args([
            "-r",
            origin,
            "--days-before",
            "3",
            "--frequency",
            "100",
            "--user-name",
            "Test User",
            "--user-email",
            "test@example.com",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Push rejected"))
        .stderr(predicate::str::contains("--append"))
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn test_force_push_overwrites_remote() {
    let temp = TempDir::new().unwrap();
    let origin = setup_seeded_origin(&temp, "overwrite.git");
    let origin = origin.to_str().unwrap();

    let work = TempDir::new().unwrap();
    gitseed()
        .current_dir(&work)
        .args([
            "-r",
            origin,
            "--force",
            "--days-before",
            "3",
            "--frequency",
            "100",
            "--user-name",
            "Test User",
            "--user-email",
            "test@example.com",
        ])
        .assert()
        .success();

    // Remote history was replaced entirely.
    let log = git(temp.path(), &["--git-dir", "overwrite.git", "log", "--format=%s", "main"]);
    assert!(!log.contains("seed commit"));
    assert!(log.lines().all(|l| l.starts_with("Contribution: ")));
}
