//! Configuration file and profile resolution
//!
//! Configuration is stored in TOML format with support for multiple named
//! profiles, each naming one service endpoint.

#[cfg(target_os = "macos")]
use directories::BaseDirs;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::credential::CredentialStore;
use super::error::{ConfigError, Result};

/// Environment variable overriding the profile's endpoint
pub const ENDPOINT_ENV: &str = "QBIZ_ENDPOINT";
/// Environment variable overriding the profile's token
pub const TOKEN_ENV: &str = "QBIZ_TOKEN";

/// Main configuration structure
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct Config {
    /// Profile used when none is given on the command line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_profile: Option<String>,
    /// Map of profile name -> profile configuration
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

/// Connection settings for one service endpoint
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct Profile {
    /// Base URL of the service, e.g. `https://qbusiness.us-east-1.api.aws`
    #[serde(default)]
    pub endpoint: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Bearer token, plaintext or `keyring:<key>`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Request timeout in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

/// A profile with its credentials resolved, ready to build a client
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedProfile {
    pub endpoint: String,
    pub token: Option<String>,
    pub timeout: Option<Duration>,
}

impl Profile {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    pub fn has_token(&self) -> bool {
        self.token.as_deref().is_some_and(|token| !token.is_empty())
    }

    /// Resolve endpoint and token
    ///
    /// With `use_env`, `QBIZ_ENDPOINT` and `QBIZ_TOKEN` override the file.
    pub fn resolve(&self, name: &str, use_env: bool) -> Result<ResolvedProfile> {
        let store = CredentialStore::new();

        let endpoint = store
            .get_credential(&self.endpoint, use_env.then_some(ENDPOINT_ENV))
            .map_err(|e| ConfigError::Unresolved {
                profile: name.to_string(),
                what: "endpoint",
                reason: e.to_string(),
            })?;
        if endpoint.trim().is_empty() {
            return Err(ConfigError::MissingEndpoint {
                name: name.to_string(),
            });
        }

        let env_token = if use_env {
            std::env::var(TOKEN_ENV).ok()
        } else {
            None
        };
        let token = match (env_token, &self.token) {
            (Some(token), _) => Some(token),
            (None, Some(token)) => Some(store.get_credential(token, None).map_err(|e| {
                ConfigError::Unresolved {
                    profile: name.to_string(),
                    what: "token",
                    reason: e.to_string(),
                }
            })?),
            (None, None) => None,
        };

        Ok(ResolvedProfile {
            endpoint,
            token,
            timeout: self.timeout_secs.map(Duration::from_secs),
        })
    }
}

impl Config {
    /// Resolve which profile to use
    ///
    /// An explicit name wins, then `default_profile`, then the first profile
    /// alphabetically.
    pub fn resolve_profile_name(&self, explicit_profile: Option<&str>) -> Result<String> {
        if let Some(name) = explicit_profile {
            return if self.profiles.contains_key(name) {
                Ok(name.to_string())
            } else {
                Err(ConfigError::ProfileNotFound {
                    name: name.to_string(),
                })
            };
        }

        if let Some(ref default) = self.default_profile {
            return if self.profiles.contains_key(default) {
                Ok(default.clone())
            } else {
                Err(ConfigError::ProfileNotFound {
                    name: default.clone(),
                })
            };
        }

        self.list_profiles()
            .first()
            .map(|(name, _)| (*name).clone())
            .ok_or(ConfigError::NoProfiles)
    }

    /// Resolve and return the selected profile
    pub fn resolve_profile(&self, explicit_profile: Option<&str>) -> Result<(String, &Profile)> {
        let name = self.resolve_profile_name(explicit_profile)?;
        let profile = self
            .profiles
            .get(&name)
            .ok_or_else(|| ConfigError::ProfileNotFound { name: name.clone() })?;
        Ok((name, profile))
    }

    /// Load configuration from the standard location
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from_path(&config_path)
    }

    /// Load configuration from a specific path; a missing file is an empty config
    pub fn load_from_path(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(config_path).map_err(|e| ConfigError::Read {
            path: config_path.to_path_buf(),
            source: e,
        })?;

        let expanded_content = Self::expand_env_vars(&content);

        let config: Config =
            toml::from_str(&expanded_content).map_err(|e| ConfigError::Parse {
                path: config_path.to_path_buf(),
                source: Box::new(e),
            })?;

        Ok(config)
    }

    /// Save configuration to the standard location
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        self.save_to_path(&config_path)
    }

    /// Save configuration to a specific path
    pub fn save_to_path(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Write {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let content = toml::to_string_pretty(self)?;

        fs::write(config_path, content).map_err(|e| ConfigError::Write {
            path: config_path.to_path_buf(),
            source: e,
        })?;

        Ok(())
    }

    /// Set or update a profile
    pub fn set_profile(&mut self, name: String, profile: Profile) {
        self.profiles.insert(name, profile);
    }

    /// Remove a profile by name, clearing the default if it pointed there
    pub fn remove_profile(&mut self, name: &str) -> Option<Profile> {
        if self.default_profile.as_deref() == Some(name) {
            self.default_profile = None;
        }
        self.profiles.remove(name)
    }

    /// List all profiles sorted by name
    pub fn list_profiles(&self) -> Vec<(&String, &Profile)> {
        let mut profiles: Vec<_> = self.profiles.iter().collect();
        profiles.sort_by_key(|(name, _)| *name);
        profiles
    }

    /// Get the path to the configuration file
    ///
    /// On macOS, `~/.config/qbizctl/config.toml` is preferred when that
    /// directory exists, falling back to `~/Library/Application Support`.
    ///
    /// On Linux: ~/.config/qbizctl/config.toml
    /// On Windows: %APPDATA%\qbizctl\qbizctl\config.toml
    pub fn config_path() -> Result<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            if let Some(base_dirs) = BaseDirs::new() {
                let linux_style_path = base_dirs
                    .home_dir()
                    .join(".config")
                    .join("qbizctl")
                    .join("config.toml");

                if linux_style_path.parent().is_some_and(|p| p.exists()) {
                    return Ok(linux_style_path);
                }
            }
        }

        let proj_dirs =
            ProjectDirs::from("com", "qbizctl", "qbizctl").ok_or(ConfigError::NoConfigDir)?;

        Ok(proj_dirs.config_dir().join("config.toml"))
    }

    /// Expand `${VAR}` and `${VAR:-default}` references
    ///
    /// Unset variables are left as written so unused profiles still parse.
    fn expand_env_vars(content: &str) -> String {
        shellexpand::env_with_context_no_errors(content, |var| std::env::var(var).ok())
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn config_with(names: &[&str]) -> Config {
        let mut config = Config::default();
        for name in names {
            config.set_profile(
                name.to_string(),
                Profile::new(format!("https://{}.example.com", name)),
            );
        }
        config
    }

    #[test]
    fn test_config_serialization() {
        let mut config = config_with(&["dev"]);
        config.default_profile = Some("dev".to_string());
        if let Some(profile) = config.profiles.get_mut("dev") {
            profile.region = Some("us-east-1".to_string());
            profile.timeout_secs = Some(10);
        }

        let text = toml::to_string_pretty(&config).unwrap();
        assert!(text.contains("default_profile = \"dev\""));
        assert!(!text.contains("token"));

        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_resolve_profile_order() {
        let mut config = config_with(&["staging", "alpha"]);
        assert_eq!(config.resolve_profile_name(None).unwrap(), "alpha");

        config.default_profile = Some("staging".to_string());
        assert_eq!(config.resolve_profile_name(None).unwrap(), "staging");
        assert_eq!(config.resolve_profile_name(Some("alpha")).unwrap(), "alpha");
    }

    #[test]
    fn test_resolve_profile_errors() {
        let config = Config::default();
        assert!(matches!(
            config.resolve_profile_name(None),
            Err(ConfigError::NoProfiles)
        ));

        let config = config_with(&["dev"]);
        assert!(matches!(
            config.resolve_profile_name(Some("prod")),
            Err(ConfigError::ProfileNotFound { .. })
        ));
    }

    #[test]
    fn test_remove_profile_clears_default() {
        let mut config = config_with(&["dev", "prod"]);
        config.default_profile = Some("dev".to_string());
        assert!(config.remove_profile("dev").is_some());
        assert!(config.default_profile.is_none());
        assert!(config.remove_profile("dev").is_none());
    }

    #[test]
    #[serial]
    fn test_env_var_expansion() {
        unsafe {
            std::env::set_var("QBIZCTL_TEST_ENDPOINT", "https://expanded.example.com");
        }
        let content = r#"
[profiles.dev]
endpoint = "${QBIZCTL_TEST_ENDPOINT}"
region = "${QBIZCTL_TEST_UNSET_REGION:-us-west-2}"
token = "${QBIZCTL_TEST_UNSET_TOKEN}"
"#;
        let expanded = Config::expand_env_vars(content);
        unsafe {
            std::env::remove_var("QBIZCTL_TEST_ENDPOINT");
        }

        let config: Config = toml::from_str(&expanded).unwrap();
        let dev = &config.profiles["dev"];
        assert_eq!(dev.endpoint, "https://expanded.example.com");
        assert_eq!(dev.region.as_deref(), Some("us-west-2"));
        assert_eq!(dev.token.as_deref(), Some("${QBIZCTL_TEST_UNSET_TOKEN}"));
    }

    #[test]
    #[serial]
    fn test_profile_resolve_with_and_without_env() {
        let mut profile = Profile::new("https://file.example.com");
        profile.token = Some("file-token".to_string());
        profile.timeout_secs = Some(5);

        unsafe {
            std::env::set_var(ENDPOINT_ENV, "https://env.example.com");
            std::env::set_var(TOKEN_ENV, "env-token");
        }
        let with_env = profile.resolve("dev", true);
        let without_env = profile.resolve("dev", false);
        unsafe {
            std::env::remove_var(ENDPOINT_ENV);
            std::env::remove_var(TOKEN_ENV);
        }

        let with_env = with_env.unwrap();
        assert_eq!(with_env.endpoint, "https://env.example.com");
        assert_eq!(with_env.token.as_deref(), Some("env-token"));

        let without_env = without_env.unwrap();
        assert_eq!(without_env.endpoint, "https://file.example.com");
        assert_eq!(without_env.token.as_deref(), Some("file-token"));
        assert_eq!(without_env.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_profile_without_endpoint() {
        let profile = Profile::default();
        assert!(matches!(
            profile.resolve("empty", false),
            Err(ConfigError::MissingEndpoint { .. })
        ));
    }
}
