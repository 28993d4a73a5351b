//! Integration tests for the `ambeo` CLI binary.
//!
//! Argument parsing, config handling and error exit codes run without a
//! device. The last few tests drive the binary against a wiremock soundbar.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `ambeo` binary with env isolation.
///
/// Clears all `AMBEO_*` env vars and points the config file at `config`
/// so tests never touch the user's real configuration.
fn ambeo_cmd(config: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("ambeo");
    cmd.env("HOME", "/tmp/ambeo-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/ambeo-cli-test-nonexistent")
        .env("AMBEO_CONFIG", config)
        .env("NO_COLOR", "1")
        .env_remove("AMBEO_PROFILE")
        .env_remove("AMBEO_HOST")
        .env_remove("AMBEO_PORT")
        .env_remove("AMBEO_OUTPUT")
        .env_remove("AMBEO_TIMEOUT")
        .env_remove("AMBEO_INTERVAL")
        .env_remove("RUST_LOG");
    cmd
}

fn isolated() -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    (dir, config)
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let (_dir, config) = isolated();
    let output = ambeo_cmd(&config).output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    let (_dir, config) = isolated();
    ambeo_cmd(&config).arg("--help").assert().success().stdout(
        predicate::str::contains("AMBEO")
            .and(predicate::str::contains("status"))
            .and(predicate::str::contains("sources"))
            .and(predicate::str::contains("watch")),
    );
}

#[test]
fn test_version_flag() {
    let (_dir, config) = isolated();
    ambeo_cmd(&config)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("ambeo"));
}

#[test]
fn test_completions_bash() {
    let (_dir, config) = isolated();
    ambeo_cmd(&config)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_path_honors_env() {
    let (_dir, config) = isolated();
    ambeo_cmd(&config)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(config.display().to_string()));
}

#[test]
fn test_config_set_host_then_show() {
    let (_dir, config) = isolated();
    ambeo_cmd(&config)
        .args(["config", "set-host", "192.168.1.50"])
        .assert()
        .success();

    ambeo_cmd(&config)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("192.168.1.50"));
}

#[test]
fn test_config_set_host_rejects_urls() {
    let (_dir, config) = isolated();
    let output = ambeo_cmd(&config)
        .args(["config", "set-host", "http://soundbar/"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(!config.exists());
}

#[test]
fn test_config_use_unknown_profile() {
    let (_dir, config) = isolated();
    let output = ambeo_cmd(&config)
        .args(["config", "use", "kitchen"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));
    assert!(combined_output(&output).contains("kitchen"));
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_status_without_config() {
    let (_dir, config) = isolated();
    let output = ambeo_cmd(&config).arg("status").output().unwrap();
    assert_eq!(output.status.code(), Some(3));
    let text = combined_output(&output);
    assert!(
        text.contains("No soundbar configured"),
        "Expected config error:\n{text}"
    );
}

#[test]
fn test_set_unknown_control() {
    let (_dir, config) = isolated();
    let output = ambeo_cmd(&config)
        .args(["--host", "127.0.0.1", "set", "Bass", "3"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("Bass"));
}

#[test]
fn test_set_volume_out_of_range() {
    let (_dir, config) = isolated();
    let output = ambeo_cmd(&config)
        .args(["--host", "127.0.0.1", "set", "volume", "150"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_unreachable_soundbar() {
    let (_dir, config) = isolated();
    let output = ambeo_cmd(&config)
        .args(["--host", "127.0.0.1", "--port", "9", "--timeout", "2", "status"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(7));
    assert!(combined_output(&output).contains("Could not connect"));
}

// ── Against a mock soundbar ─────────────────────────────────────────

async fn mount_data(server: &MockServer, device_path: &str, value: Value) {
    Mock::given(method("GET"))
        .and(path("/api/getData"))
        .and(query_param("path", device_path))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "value": value })))
        .mount(server)
        .await;
}

/// An AMBEO Max on optical, volume 20.
async fn max_device() -> MockServer {
    let server = MockServer::start().await;
    mount_data(
        &server,
        "settings:/system/productName",
        json!({"type": "string_", "string_": "AMBEO Soundbar Max"}),
    )
    .await;
    mount_data(&server, "player:volume", json!({"type": "i32_", "i32_": 20})).await;
    mount_data(
        &server,
        "popcorn:inputChange/selected",
        json!({"type": "popcornInputId", "popcornInputId": "optical"}),
    )
    .await;
    mount_data(
        &server,
        "settings:/popcorn/audio/audioPresets/audioPreset",
        json!({"type": "popcornAudioPreset", "popcornAudioPreset": "movies"}),
    )
    .await;
    for p in [
        "settings:/mediaPlayer/mute",
        "settings:/popcorn/audio/nightModeStatus",
        "settings:/popcorn/audio/ambeoModeStatus",
        "settings:/popcorn/audio/voiceEnhancement",
        "settings:/popcorn/ux/soundFeedbackStatus",
    ] {
        mount_data(&server, p, json!({"type": "bool_", "bool_": false})).await;
    }
    Mock::given(method("GET"))
        .and(path("/api/setData"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;
    server
}

/// Run the binary off the async runtime so the mock server keeps serving.
async fn run_against(server: &MockServer, args: &[&str]) -> std::process::Output {
    let addr = server.address();
    let mut argv = vec![
        "--host".to_owned(),
        addr.ip().to_string(),
        "--port".to_owned(),
        addr.port().to_string(),
    ];
    argv.extend(args.iter().map(|a| (*a).to_owned()));

    tokio::task::spawn_blocking(move || {
        let (_dir, config) = isolated();
        ambeo_cmd(&config).args(&argv).output().unwrap()
    })
    .await
    .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_info_reports_dialect() {
    let server = max_device().await;
    let output = run_against(&server, &["-o", "json", "info"]).await;
    assert!(output.status.success(), "{}", combined_output(&output));

    let info: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(info["dialect"], "Espresso");
    assert_eq!(info["model"], "AMBEO Soundbar Max");
    assert_eq!(info["inputs"], 4);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_sources_plain() {
    let server = max_device().await;
    let output = run_against(&server, &["-o", "plain", "sources"]).await;
    assert!(output.status.success(), "{}", combined_output(&output));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let titles: Vec<&str> = stdout.lines().collect();
    assert_eq!(titles, ["HDMI 1", "HDMI 2", "Optical", "Bluetooth"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_status_labels_selected_input() {
    let server = max_device().await;
    let output = run_against(&server, &["-o", "json", "status"]).await;
    assert!(output.status.success(), "{}", combined_output(&output));

    let rows: Vec<Value> = serde_json::from_slice(&output.stdout).unwrap();
    let source = rows.iter().find(|r| r["control"] == "Source").unwrap();
    assert_eq!(source["value"], 2);
    assert_eq!(source["label"], "Optical");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_set_unknown_source_index() {
    let server = max_device().await;
    let output = run_against(&server, &["set", "source", "9"]).await;
    assert_eq!(output.status.code(), Some(4));
    assert!(combined_output(&output).contains("ambeo sources"));
}
