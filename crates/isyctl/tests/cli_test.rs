//! Integration tests for the `isy` CLI binary.
//!
//! Argument parsing, help output, and error handling run without a
//! controller; the end-to-end cases drive the binary against a mock
//! controller with a throwaway config directory.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `isy` binary with env isolation.
///
/// Clears all `ISY_*` env vars and points config directories at `home`
/// so tests never touch the user's real configuration.
fn isy_cmd(home: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("isy");
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("ISY_PROFILE")
        .env_remove("ISY_CONTROLLER")
        .env_remove("ISY_USERNAME")
        .env_remove("ISY_PASSWORD")
        .env_remove("ISY_OUTPUT")
        .env_remove("ISY_INSECURE")
        .env_remove("ISY_TIMEOUT");
    cmd
}

fn isolated() -> (tempfile::TempDir, assert_cmd::Command) {
    let home = tempfile::tempdir().unwrap();
    let cmd = isy_cmd(home.path());
    (home, cmd)
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

/// Write a profile pointing at `controller` with two seeded entries.
fn write_config(home: &Path, controller: &str) {
    let dir = home.join(".config").join("isyctl");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("config.toml"),
        format!(
            r#"
default_profile = "home"

[profiles.home]
controller = "{controller}"
username = "admin"
password_env = "ISYCTL_TEST_PASSWORD"
timeout = 5
devices = [
  {{ name = "hall light", address = "12 AB 3 1", dimmable = true }},
  ["evening scene", "20109", 0],
]
"#
        ),
    )
    .unwrap();
}

/// Run the binary off the async runtime so the mock server keeps serving.
async fn run_isy(home: &Path, args: &[&str]) -> std::process::Output {
    let home = home.to_path_buf();
    let args: Vec<String> = args.iter().map(|a| (*a).to_owned()).collect();
    tokio::task::spawn_blocking(move || {
        isy_cmd(&home)
            .env("ISYCTL_TEST_PASSWORD", "admin")
            .args(&args)
            .output()
            .unwrap()
    })
    .await
    .unwrap()
}

fn xml(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.to_owned(), "text/xml")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let (_home, mut cmd) = isolated();
    let output = cmd.output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    let (_home, mut cmd) = isolated();
    cmd.arg("--help").assert().success().stdout(
        predicate::str::contains("REST API")
            .and(predicate::str::contains("status"))
            .and(predicate::str::contains("level"))
            .and(predicate::str::contains("devices")),
    );
}

#[test]
fn test_version_flag() {
    let (_home, mut cmd) = isolated();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("isy"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    let (_home, mut cmd) = isolated();
    cmd.args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    let (_home, mut cmd) = isolated();
    cmd.args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let (_home, mut cmd) = isolated();
    let output = cmd.arg("foobar").output().unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(
        text.contains("unrecognized") || text.contains("foobar"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

#[test]
fn test_status_without_config() {
    let (_home, mut cmd) = isolated();
    let output = cmd.args(["status", "hall"]).output().unwrap();
    assert_eq!(output.status.code(), Some(4));
    let text = combined_output(&output);
    assert!(
        text.to_lowercase().contains("config"),
        "Expected config hint:\n{text}"
    );
}

#[test]
fn test_controller_flag_without_password() {
    let (_home, mut cmd) = isolated();
    let output = cmd
        .args(["--controller", "http://127.0.0.1:9", "status", "hall"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn test_level_requires_number() {
    let (_home, mut cmd) = isolated();
    cmd.args(["level", "hall", "bright"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_config_show_no_config() {
    // `config show` renders defaults when no file exists.
    let (_home, mut cmd) = isolated();
    cmd.args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[defaults]"));
}

#[test]
fn test_config_profiles_and_use() {
    let home = tempfile::tempdir().unwrap();
    write_config(home.path(), "http://127.0.0.1:9");

    isy_cmd(home.path())
        .args(["config", "profiles"])
        .assert()
        .success()
        .stdout(predicate::str::contains("home *"));

    isy_cmd(home.path())
        .args(["config", "use", "away"])
        .assert()
        .failure()
        .code(4);
}

#[test]
fn test_devices_list_plain() {
    let home = tempfile::tempdir().unwrap();
    write_config(home.path(), "http://127.0.0.1:9");

    isy_cmd(home.path())
        .env("ISYCTL_TEST_PASSWORD", "admin")
        .args(["devices", "list", "-o", "plain"])
        .assert()
        .success()
        .stdout("hall light\nevening scene\n");
}

// ── Against a mock controller ───────────────────────────────────────

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_level_sends_scaled_command() {
    let server = MockServer::start().await;
    let home = tempfile::tempdir().unwrap();
    write_config(home.path(), &server.uri());

    Mock::given(method("GET"))
        .and(path("/rest/nodes/12%20AB%203%201/cmd/DON/128"))
        .respond_with(xml(
            r#"<RestResponse succeeded="true"><status>200</status></RestResponse>"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let output = run_isy(home.path(), &["level", "Hall", "50"]).await;
    assert!(output.status.success(), "{}", combined_output(&output));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Set hall light to 50%"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_level_out_of_range_sends_nothing() {
    let server = MockServer::start().await;
    let home = tempfile::tempdir().unwrap();
    write_config(home.path(), &server.uri());

    Mock::given(path_regex(".*"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let output = run_isy(home.path(), &["level", "hall", "101"]).await;
    assert_eq!(output.status.code(), Some(2), "{}", combined_output(&output));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_on_reads_status_then_commands() {
    let server = MockServer::start().await;
    let home = tempfile::tempdir().unwrap();
    write_config(home.path(), &server.uri());

    Mock::given(method("GET"))
        .and(path("/rest/status/12%20AB%203%201"))
        .respond_with(xml(
            r#"<properties><property id="ST" value="0" formatted="Off" uom="%/on/off"/></properties>"#,
        ))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/nodes/12%20AB%203%201/cmd/DON"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let output = run_isy(home.path(), &["on", "hall%20light"]).await;
    assert!(output.status.success(), "{}", combined_output(&output));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Turned on hall light"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_already_on_reports_level_without_commanding() {
    let server = MockServer::start().await;
    let home = tempfile::tempdir().unwrap();
    write_config(home.path(), &server.uri());

    Mock::given(method("GET"))
        .and(path("/rest/status/12%20AB%203%201"))
        .respond_with(xml(
            r#"<properties><property id="ST" value="94" formatted="37%" uom="%/on/off"/></properties>"#,
        ))
        .mount(&server)
        .await;
    Mock::given(path_regex("/cmd/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let output = run_isy(home.path(), &["-o", "json-compact", "on", "hall"]).await;
    assert!(output.status.success(), "{}", combined_output(&output));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(r#""changed":false"#), "{stdout}");
    assert!(stdout.contains(r#""level":37"#), "{stdout}");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_scene_status_has_no_reading() {
    let server = MockServer::start().await;
    let home = tempfile::tempdir().unwrap();
    write_config(home.path(), &server.uri());

    Mock::given(path_regex(".*"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let output = run_isy(home.path(), &["status", "evening"]).await;
    assert!(output.status.success(), "{}", combined_output(&output));
    assert!(String::from_utf8_lossy(&output.stdout).contains("no status available"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_unknown_name_cannot_be_controlled() {
    let server = MockServer::start().await;
    let home = tempfile::tempdir().unwrap();
    write_config(home.path(), &server.uri());

    let output = run_isy(home.path(), &["off", "garage door"]).await;
    assert_eq!(output.status.code(), Some(4));
    assert!(combined_output(&output).contains("Cannot control 'garage door'"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_scene_cannot_be_dimmed() {
    let server = MockServer::start().await;
    let home = tempfile::tempdir().unwrap();
    write_config(home.path(), &server.uri());

    let output = run_isy(home.path(), &["dim", "evening"]).await;
    assert_eq!(output.status.code(), Some(5), "{}", combined_output(&output));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_unrecognized_state_sends_nothing() {
    let server = MockServer::start().await;
    let home = tempfile::tempdir().unwrap();
    write_config(home.path(), &server.uri());

    Mock::given(method("GET"))
        .and(path("/rest/status/12%20AB%203%201"))
        .respond_with(xml(
            r#"<properties><property id="ST" value=" " formatted="Unknown" uom="%/on/off"/></properties>"#,
        ))
        .mount(&server)
        .await;
    Mock::given(path_regex("/cmd/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    for action in ["on", "off"] {
        let output = run_isy(home.path(), &[action, "hall"]).await;
        assert_eq!(output.status.code(), Some(1), "{}", combined_output(&output));
        let text = combined_output(&output);
        assert!(
            text.contains("Having trouble controlling 'hall light'") && text.contains("Unknown"),
            "{text}"
        );
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_zero_percent_reads_as_off() {
    let server = MockServer::start().await;
    let home = tempfile::tempdir().unwrap();
    write_config(home.path(), &server.uri());

    Mock::given(method("GET"))
        .and(path("/rest/status/12%20AB%203%201"))
        .respond_with(xml(
            r#"<properties><property id="ST" value="0" formatted="0%" uom="%/on/off"/></properties>"#,
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/nodes/12%20AB%203%201/cmd/DON"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let off = run_isy(home.path(), &["off", "hall"]).await;
    assert!(off.status.success(), "{}", combined_output(&off));
    assert!(String::from_utf8_lossy(&off.stdout).contains("already off"));

    let on = run_isy(home.path(), &["on", "hall"]).await;
    assert!(on.status.success(), "{}", combined_output(&on));
}
