use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper to create a test command isolated from the caller's environment
fn qbizctl() -> Command {
    let mut cmd = Command::cargo_bin("qbizctl").unwrap();
    cmd.env_remove("QBIZCTL_PROFILE")
        .env_remove("QBIZCTL_CONFIG_FILE")
        .env_remove("QBIZ_ENDPOINT")
        .env_remove("QBIZ_TOKEN")
        .env_remove("RUST_LOG");
    cmd
}

/// Write a config with one profile pointing at `endpoint`
fn write_config(dir: &TempDir, endpoint: &str) -> PathBuf {
    let config_path = dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        format!(
            r#"default_profile = "test"

[profiles.test]
endpoint = "{}"
token = "test-token"
"#,
            endpoint
        ),
    )
    .unwrap();
    config_path
}

fn with_config(config_path: &Path) -> Command {
    let mut cmd = qbizctl();
    cmd.arg("--config-file").arg(config_path);
    cmd
}

#[test]
fn test_help_flag() {
    qbizctl()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Q Business management CLI"))
        .stdout(predicate::str::contains("EXAMPLES:"));
}

#[test]
fn test_version_flag() {
    qbizctl()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("qbizctl"))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_version_command_json() {
    qbizctl()
        .args(["version", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"qbizctl\""));
}

#[test]
fn test_no_args_shows_help() {
    qbizctl()
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_invalid_subcommand() {
    qbizctl()
        .arg("invalid-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_completions_bash() {
    qbizctl()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("qbizctl"));
}

#[test]
fn test_corrupt_config_only_breaks_commands_that_read_it() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.toml");
    std::fs::write(&config_path, "[[[broken").unwrap();

    with_config(&config_path)
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("qbizctl"));

    with_config(&config_path)
        .args(["completions", "zsh"])
        .assert()
        .success();

    with_config(&config_path)
        .args(["profile", "list"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("config.toml"));
}

#[test]
fn test_profile_lifecycle() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("nested").join("config.toml");

    with_config(&config_path)
        .args([
            "profile",
            "set",
            "dev",
            "--endpoint",
            "https://dev.example.com",
            "--token",
            "secret-token",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Profile 'dev' created"));

    let content = std::fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("https://dev.example.com"));
    assert!(content.contains("default_profile = \"dev\""));

    with_config(&config_path)
        .args(["profile", "list", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"dev\""))
        .stdout(predicate::str::contains("\"is_default\": true"));

    with_config(&config_path)
        .args(["profile", "show", "dev", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("********"))
        .stdout(predicate::str::contains("secret-token").not());

    with_config(&config_path)
        .args(["profile", "set", "prod", "--endpoint", "https://prod.example.com"])
        .assert()
        .success();
    with_config(&config_path)
        .args(["profile", "default", "prod"])
        .assert()
        .success();
    with_config(&config_path)
        .args(["profile", "remove", "dev"])
        .assert()
        .success();

    let content = std::fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("default_profile = \"prod\""));
    assert!(!content.contains("dev.example.com"));
}

#[test]
fn test_profile_show_unknown() {
    let dir = TempDir::new().unwrap();
    let config_path = write_config(&dir, "https://unused.example.com");

    with_config(&config_path)
        .args(["profile", "show", "missing"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Profile 'missing' not found"))
        .stderr(predicate::str::contains("qbizctl profile list"));
}

#[test]
fn test_operation_without_profiles() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("empty.toml");

    with_config(&config_path)
        .args(["application", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No profile configured"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_index_create_outputs_index_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/applications/app-1/indices"))
        .and(header("authorization", "Bearer test-token"))
        .and(body_json(json!({"displayName": "Support"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"indexId": "idx-1", "indexArn": "arn:idx-1"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config_path = write_config(&dir, &server.uri());

    with_config(&config_path)
        .args([
            "index",
            "create",
            "--application-id",
            "app-1",
            "--display-name",
            "Support",
            "-o",
            "json",
        ])
        .assert()
        .success()
        .stdout("\"idx-1\"\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_index_create_echoes_parameter() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/applications/app-1/indices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"indexId": "idx-1"})))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config_path = write_config(&dir, &server.uri());

    with_config(&config_path)
        .args([
            "index",
            "create",
            "--application-id",
            "app-1",
            "--display-name",
            "My Index",
            "-s",
            "^DisplayName",
            "-o",
            "json",
        ])
        .assert()
        .success()
        .stdout("\"My Index\"\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_structured_input_with_flag_override() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/applications/app-2/indices/idx-9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "applicationId": "app-2",
            "indexId": "idx-9",
            "status": "ACTIVE"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config_path = write_config(&dir, &server.uri());

    with_config(&config_path)
        .args([
            "index",
            "get",
            "--input-json",
            r#"{"ApplicationId": "app-1", "IndexId": "idx-9"}"#,
            "--application-id",
            "app-2",
            "-q",
            "status",
            "-o",
            "json",
        ])
        .assert()
        .success()
        .stdout("\"ACTIVE\"\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_parameter_is_usage_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config_path = write_config(&dir, &server.uri());

    with_config(&config_path)
        .args(["index", "get", "--application-id", "app-1"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("missing required parameter 'IndexId'"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_invalid_selector_is_usage_error() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let config_path = write_config(&dir, &server.uri());

    with_config(&config_path)
        .args([
            "index",
            "get",
            "--application-id",
            "app-1",
            "--index-id",
            "idx-1",
            "-s",
            "NoSuchField",
        ])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Invalid output selector 'NoSuchField'"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_without_force_aborts_when_not_interactive() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config_path = write_config(&dir, &server.uri());

    with_config(&config_path)
        .args([
            "index",
            "delete",
            "--application-id",
            "app-1",
            "--index-id",
            "idx-1",
        ])
        .write_stdin("")
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("requires confirmation"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_with_force() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/applications/app-1/indices/idx-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config_path = write_config(&dir, &server.uri());

    with_config(&config_path)
        .args([
            "index",
            "delete",
            "--application-id",
            "app-1",
            "--index-id",
            "idx-1",
            "--force",
            "-o",
            "json",
        ])
        .assert()
        .success()
        .stdout("{}\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_batch_delete_documents() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/applications/app-1/indices/idx-1/documents/delete"))
        .and(body_json(json!({
            "documents": [{"documentId": "doc-1"}, {"documentId": "doc-2"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"failedDocuments": []})))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config_path = write_config(&dir, &server.uri());

    with_config(&config_path)
        .args([
            "document",
            "batch-delete",
            "--application-id",
            "app-1",
            "--index-id",
            "idx-1",
            "--document-id",
            "doc-1",
            "--document-id",
            "doc-2",
            "--force",
            "-o",
            "json",
        ])
        .assert()
        .success()
        .stdout("[]\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_not_found_exits_with_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/applications/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "__type": "ResourceNotFoundException",
            "message": "Application missing not found"
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config_path = write_config(&dir, &server.uri());

    with_config(&config_path)
        .args(["application", "get", "--application-id", "missing"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Application missing not found"))
        .stderr(predicate::str::contains("Verify the resource ID is correct"));
}
