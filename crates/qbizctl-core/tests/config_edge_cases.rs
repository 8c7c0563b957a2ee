use std::fs;
use std::path::PathBuf;

use qbizctl_core::config::{Config, ConfigError, Profile};
use serial_test::serial;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

#[test]
fn load_from_nonexistent_path_returns_default_config() {
    let path = PathBuf::from("/tmp/qbizctl-test-nonexistent/does/not/exist/config.toml");
    assert!(!path.exists());

    let config = Config::load_from_path(&path).expect("missing file is an empty config");

    assert!(config.profiles.is_empty());
    assert!(config.default_profile.is_none());
}

#[test]
fn load_empty_config_file_returns_default_config() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.toml");
    fs::write(&config_path, "").unwrap();

    let config = Config::load_from_path(&config_path).expect("empty file should parse");

    assert!(config.profiles.is_empty());
    assert!(config.default_profile.is_none());
}

#[test]
fn load_corrupt_toml_returns_parse_error() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.toml");
    fs::write(&config_path, "[[[broken").unwrap();

    let err = Config::load_from_path(&config_path).unwrap_err();
    assert!(
        matches!(err, ConfigError::Parse { ref path, .. } if path == &config_path),
        "got {err}"
    );
    assert!(err.to_string().contains("config.toml"));
}

#[test]
fn load_profile_with_wrong_field_type_fails() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.toml");
    fs::write(
        &config_path,
        r#"
[profiles.dev]
endpoint = "https://qbusiness.us-east-1.api.aws"
timeout_secs = "soon"
"#,
    )
    .unwrap();

    assert!(Config::load_from_path(&config_path).is_err());
}

#[test]
fn load_full_config() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.toml");
    fs::write(
        &config_path,
        r#"
default_profile = "prod"

[profiles.prod]
endpoint = "https://qbusiness.us-east-1.api.aws"
region = "us-east-1"
token = "keyring:prod-token"
timeout_secs = 60

[profiles.local]
endpoint = "http://localhost:4566"
"#,
    )
    .unwrap();

    let config = Config::load_from_path(&config_path).unwrap();
    let (name, profile) = config.resolve_profile(None).unwrap();
    assert_eq!(name, "prod");
    assert_eq!(profile.region.as_deref(), Some("us-east-1"));
    assert_eq!(profile.timeout_secs, Some(60));
    assert!(profile.has_token());

    let names: Vec<_> = config
        .list_profiles()
        .into_iter()
        .map(|(name, _)| name.as_str())
        .collect();
    assert_eq!(names, vec!["local", "prod"]);
}

#[test]
fn default_profile_pointing_nowhere_is_an_error() {
    let config: Config = toml::from_str(
        r#"
default_profile = "gone"

[profiles.dev]
endpoint = "http://localhost"
"#,
    )
    .unwrap();

    assert!(matches!(
        config.resolve_profile(None),
        Err(ConfigError::ProfileNotFound { ref name }) if name == "gone"
    ));
}

// ---------------------------------------------------------------------------
// Saving
// ---------------------------------------------------------------------------

#[test]
fn save_creates_parent_directories_and_round_trips() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("nested").join("dir").join("config.toml");

    let mut config = Config::default();
    let mut profile = Profile::new("https://qbusiness.eu-west-1.api.aws");
    profile.region = Some("eu-west-1".to_string());
    config.set_profile("eu".to_string(), profile);
    config.default_profile = Some("eu".to_string());

    config.save_to_path(&config_path).unwrap();
    assert!(config_path.exists());

    let loaded = Config::load_from_path(&config_path).unwrap();
    assert_eq!(loaded, config);
}

#[cfg(unix)]
#[test]
fn save_to_read_only_directory_fails() {
    use std::os::unix::fs::PermissionsExt;

    // root ignores directory permissions
    let is_root = std::process::Command::new("id")
        .arg("-u")
        .output()
        .ok()
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .is_some_and(|s| s.trim() == "0");
    if is_root {
        return;
    }

    let dir = TempDir::new().unwrap();
    let locked = dir.path().join("locked");
    fs::create_dir(&locked).unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o500)).unwrap();

    let result = Config::default().save_to_path(&locked.join("config.toml"));
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o700)).unwrap();

    assert!(matches!(result, Err(ConfigError::Write { .. })));
}

// ---------------------------------------------------------------------------
// Environment expansion
// ---------------------------------------------------------------------------

#[test]
#[serial]
fn env_references_expand_on_load() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.toml");
    fs::write(
        &config_path,
        r#"
[profiles.ci]
endpoint = "${QBIZCTL_EDGE_ENDPOINT:-http://fallback.local}"
token = "${QBIZCTL_EDGE_TOKEN}"
"#,
    )
    .unwrap();

    unsafe {
        std::env::set_var("QBIZCTL_EDGE_TOKEN", "ci-token");
        std::env::remove_var("QBIZCTL_EDGE_ENDPOINT");
    }
    let config = Config::load_from_path(&config_path);
    unsafe {
        std::env::remove_var("QBIZCTL_EDGE_TOKEN");
    }

    let config = config.unwrap();
    let resolved = config.profiles["ci"].resolve("ci", false).unwrap();
    assert_eq!(resolved.endpoint, "http://fallback.local");
    assert_eq!(resolved.token.as_deref(), Some("ci-token"));
}
