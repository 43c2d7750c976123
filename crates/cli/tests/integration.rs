//! Integration tests for the s3fs binary
//!
//! These tests require a running S3-compatible server.
//!
//! Run with:
//! ```bash
//! # Start an S3-compatible server, for example MinIO
//! docker run -d --name minio -p 9000:9000 \
//!     -e MINIO_ROOT_USER=accesskey \
//!     -e MINIO_ROOT_PASSWORD=secretkey \
//!     minio/minio server /data
//!
//! # Run tests
//! TEST_S3_ENDPOINT=http://localhost:9000 \
//! TEST_S3_ACCESS_KEY=accesskey \
//! TEST_S3_SECRET_KEY=secretkey \
//! TEST_S3_BUCKET=s3fs-test \
//!     cargo test --features integration
//! ```
//!
//! The bucket must already exist.

#![cfg(feature = "integration")]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Get the path to the s3fs binary
fn s3fs_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_s3fs"))
}

/// Connection settings from the environment, if configured
fn get_test_config() -> Option<(String, String, String, String)> {
    let endpoint = std::env::var("TEST_S3_ENDPOINT").ok()?;
    let access_key = std::env::var("TEST_S3_ACCESS_KEY").ok()?;
    let secret_key = std::env::var("TEST_S3_SECRET_KEY").ok()?;
    let bucket = std::env::var("TEST_S3_BUCKET").unwrap_or_else(|_| "s3fs-test".to_string());
    Some((endpoint, access_key, secret_key, bucket))
}

/// Write an isolated config file pointing at the test server
fn write_config(dir: &Path, endpoint: &str, access_key: &str, secret_key: &str) -> PathBuf {
    let path = dir.join("config.toml");
    let content = format!(
        "schema_version = 1\n\n[connection]\nendpoint = \"{endpoint}\"\naccess_key = \"{access_key}\"\nsecret_key = \"{secret_key}\"\npath_style = true\n\n[shell]\nloader = \"none\"\ncolor = \"never\"\n"
    );
    std::fs::write(&path, content).expect("Failed to write config");
    path
}

/// Run one command line against the test server
fn run_s3fs(config: &Path, workdir: &Path, line: &str) -> Output {
    Command::new(s3fs_binary())
        .arg("--config")
        .arg(config)
        .args(["-c", line])
        .current_dir(workdir)
        .output()
        .expect("Failed to execute s3fs")
}

/// Temp dir, config file and bucket name, or `None` when no server is configured
fn setup() -> Option<(TempDir, PathBuf, String)> {
    let Some((endpoint, access_key, secret_key, bucket)) = get_test_config() else {
        eprintln!("Skipping: TEST_S3_ENDPOINT, TEST_S3_ACCESS_KEY and TEST_S3_SECRET_KEY must be set");
        return None;
    };

    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = write_config(dir.path(), &endpoint, &access_key, &secret_key);
    Some((dir, config, bucket))
}

#[test]
fn test_ls_root_lists_test_bucket() {
    let Some((dir, config, bucket)) = setup() else {
        return;
    };

    let output = run_s3fs(&config, dir.path(), "ls");
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.lines().any(|line| line == format!("[B] {bucket}")));
}

#[test]
fn test_put_ls_get_round_trip() {
    let Some((dir, config, bucket)) = setup() else {
        return;
    };

    let local = dir.path().join("hello.txt");
    std::fs::write(&local, "hello from s3fs\n").unwrap();
    let folder = format!("s3fs-it-{}", std::process::id());

    let line = format!(
        "cd {bucket} && put {} {folder}/hello.txt && cd {folder} && ls",
        local.display()
    );
    let output = run_s3fs(&config, dir.path(), &line);
    assert!(output.status.success(), "stdout: {}", String::from_utf8_lossy(&output.stdout));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(&format!("File uploaded: {bucket}/{folder}/hello.txt")));
    assert!(stdout.lines().any(|line| line == "[F] hello.txt"));

    let download_dir = dir.path().join("downloads");
    std::fs::create_dir(&download_dir).unwrap();
    let line = format!("get {bucket}/{folder}/hello.txt downloads");
    let output = run_s3fs(&config, dir.path(), &line);
    assert!(output.status.success());

    let contents = std::fs::read_to_string(download_dir.join("hello.txt")).unwrap();
    assert_eq!(contents, "hello from s3fs\n");
}

#[test]
fn test_failed_command_sets_exit_code() {
    let Some((dir, config, bucket)) = setup() else {
        return;
    };

    let output = run_s3fs(&config, dir.path(), &format!("cd {bucket}/no-such-folder-s3fs"));
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Cannot change into non-existent directory"));
}
