use std::fs;

use assert_cmd::Command;
use serde_json::Value;
use tempfile::tempdir;

fn vidforge() -> Command {
    Command::cargo_bin("vidforge").expect("binary present")
}

#[test]
fn config_init_then_validate() {
    let temp = tempdir().unwrap();

    vidforge()
        .current_dir(temp.path())
        .args(["config", "init"])
        .assert()
        .success();
    let written = fs::read_to_string(temp.path().join("config.yaml")).unwrap();
    assert!(written.contains("crf: 23"));

    vidforge()
        .current_dir(temp.path())
        .args(["config", "validate"])
        .assert()
        .success();

    // A second init refuses to clobber the file.
    vidforge()
        .current_dir(temp.path())
        .args(["config", "init"])
        .assert()
        .failure();
}

#[test]
fn invalid_config_fails_validation() {
    let temp = tempdir().unwrap();
    let config = temp.path().join("bad.yaml");
    fs::write(&config, "video:\n  compression:\n    crf: 70\n").unwrap();

    vidforge()
        .args(["--config", config.to_str().unwrap(), "config", "validate"])
        .assert()
        .failure();
}

#[test]
fn metadata_generate_writes_record_pair() {
    let temp = tempdir().unwrap();

    let assert = vidforge()
        .current_dir(temp.path())
        .args([
            "metadata",
            "generate",
            "--title",
            "CLI Video",
            "--description",
            "Made from the command line",
            "--tags",
            "rust,cli",
            "--timestamp",
            "0:00,Intro",
            "--link",
            "Docs,https://example.com/docs",
        ])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(stdout.contains("CLI_Video_metadata.json"));

    let json_path = temp.path().join("metadata/CLI_Video_metadata.json");
    let record: Value = serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(record["tags"], serde_json::json!(["rust", "cli"]));
    let description = record["description"].as_str().unwrap();
    assert!(description.contains("0:00 - Intro"));
    assert!(description.contains("Docs: https://example.com/docs"));
    assert!(temp.path().join("metadata/CLI_Video_metadata.yaml").is_file());
}

#[test]
fn metadata_update_sets_fields() {
    let temp = tempdir().unwrap();
    vidforge()
        .current_dir(temp.path())
        .args(["metadata", "generate", "--title", "Up", "--output", "up.json"])
        .assert()
        .success();

    vidforge()
        .current_dir(temp.path())
        .args([
            "metadata",
            "update",
            "up.json",
            "--json",
            r#"{"tags": ["new"]}"#,
            "--set",
            "privacyStatus=unlisted",
        ])
        .assert()
        .success();

    let record: Value =
        serde_json::from_str(&fs::read_to_string(temp.path().join("metadata/up.json")).unwrap())
            .unwrap();
    assert_eq!(record["tags"], serde_json::json!(["new"]));
    assert_eq!(record["privacyStatus"], "unlisted");
    assert_eq!(record["title"], "Up");
}

#[test]
fn seo_tags_prints_one_per_line() {
    let assert = vidforge()
        .args(["metadata", "seo-tags", "Learn Async Programming", "--tags", "python"])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(&lines[..4], &["python", "learn", "async", "programming"]);
    assert_eq!(lines.len(), 11);
}

#[test]
fn parse_timestamps_reads_stdin() {
    let assert = vidforge()
        .args(["metadata", "parse-timestamps"])
        .write_stdin("0:00 - Intro\nbogus\n1:00 - Next\n")
        .assert()
        .success();
    let parsed: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 2);
    assert_eq!(parsed[1]["label"], "Next");
}

#[test]
fn series_create_and_add() {
    let temp = tempdir().unwrap();
    vidforge()
        .current_dir(temp.path())
        .args(["series", "create", "Web Dev", "--playlist-id", "PLX"])
        .assert()
        .success();
    vidforge()
        .current_dir(temp.path())
        .args(["series", "add", "Web Dev", "--episode", "1", "--title", "HTML"])
        .assert()
        .success();

    let registry: Value = serde_json::from_str(
        &fs::read_to_string(temp.path().join("metadata/Web Dev_series.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(registry["videos"][0]["title"], "Web Dev #1: HTML");

    let episode: Value = serde_json::from_str(
        &fs::read_to_string(temp.path().join("metadata/Web_Dev_ep01_metadata.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(episode["playlist"], "PLX");
}

#[test]
fn series_add_without_create_fails() {
    let temp = tempdir().unwrap();
    vidforge()
        .current_dir(temp.path())
        .args(["series", "add", "Ghost", "--episode", "1", "--title", "Boo"])
        .assert()
        .failure();
}

#[test]
fn video_command_with_missing_input_fails() {
    let temp = tempdir().unwrap();
    vidforge()
        .current_dir(temp.path())
        .args(["video", "info", "missing.mp4"])
        .assert()
        .failure();
}

#[test]
fn completions_are_generated() {
    let assert = vidforge().args(["completions", "bash"]).assert().success();
    assert!(!assert.get_output().stdout.is_empty());
}
