//! End-to-end tests for the protogo binary

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const USER_PROTO: &str = "syntax = \"proto3\";

message User {
  string user_id = 1; // UUID
  string name = 2;
}

service Api {
  rpc Get(GetRequest) returns (GetResponse);
}
";

const USER_GO: &str = "package models

import (
\t\"context\"
\t\"github.com/google/uuid\"
)

// User represents the User model from proto
type User struct {
\tUserID uuid.UUID `json:\"user_id,omitempty\"`
\tName string `json:\"name,omitempty\"`
}

// Api defines the interface for the REST client/server
type Api interface {
\tGet(ctx context.Context, req *GetRequest) (*GetResponse, error)
}
";

fn protogo(dir: &Path, args: &[&str]) -> Output {
    let log_file = dir.join("converter.log");
    Command::new(env!("CARGO_BIN_EXE_protogo"))
        .args(args)
        .arg("--log-file")
        .arg(&log_file)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run protogo")
}

fn write_proto(dir: &Path) -> String {
    let path = dir.join("user.proto");
    fs::write(&path, USER_PROTO).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn test_convert_to_stdout() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_proto(temp_dir.path());

    let output = protogo(temp_dir.path(), &[input.as_str()]);

    assert!(output.status.success(), "protogo failed: {output:?}");
    assert_eq!(String::from_utf8_lossy(&output.stdout), format!("{USER_GO}\n"));
}

#[test]
fn test_convert_to_file_with_package() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_proto(temp_dir.path());
    let out_path = temp_dir.path().join("user.go");
    let out = out_path.to_string_lossy().into_owned();

    let output = protogo(
        temp_dir.path(),
        &[input.as_str(), "--package", "api", "-o", out.as_str()],
    );

    assert!(output.status.success(), "protogo failed: {output:?}");
    assert!(output.stdout.is_empty(), "stdout should stay empty");

    let written = fs::read_to_string(&out_path).unwrap();
    assert!(written.starts_with("package api\n"));
    assert!(written.contains("type User struct {"));
}

#[test]
fn test_missing_input_fails() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir
        .path()
        .join("absent.proto")
        .to_string_lossy()
        .into_owned();

    let output = protogo(temp_dir.path(), &[missing.as_str()]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty(), "no code should be emitted");
    assert!(String::from_utf8_lossy(&output.stderr).contains("Input file not found"));
}

#[test]
fn test_missing_formatter_keeps_unformatted_output() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_proto(temp_dir.path());
    let gofmt = temp_dir
        .path()
        .join("no-such-gofmt")
        .to_string_lossy()
        .into_owned();

    let output = protogo(
        temp_dir.path(),
        &[input.as_str(), "--format", "--gofmt", gofmt.as_str()],
    );

    assert!(output.status.success(), "protogo failed: {output:?}");
    assert_eq!(String::from_utf8_lossy(&output.stdout), format!("{USER_GO}\n"));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Skipping formatting"));
}

#[test]
fn test_json_log_file_written() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_proto(temp_dir.path());

    let output = protogo(temp_dir.path(), &[input.as_str(), "--verbose"]);
    assert!(output.status.success(), "protogo failed: {output:?}");

    let log = fs::read_to_string(temp_dir.path().join("converter.log")).unwrap();
    let lines: Vec<&str> = log.lines().collect();
    assert!(!lines.is_empty());
    assert!(lines.iter().all(|l| l.starts_with('{') && l.contains("\"level\"")));
    assert!(log.contains("Found message definition: User"));
    assert!(log.contains("Found service definition: Api"));
}
