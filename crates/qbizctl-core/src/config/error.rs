//! Configuration errors

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot write config file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config file {} is not valid: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: Box<toml::de::Error>,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Profile '{name}' not found")]
    ProfileNotFound { name: String },

    #[error("No profiles configured. Use 'qbizctl profile set <name> --endpoint <URL>' to create one.")]
    NoProfiles,

    #[error("Profile '{name}' has no endpoint. Set one with 'qbizctl profile set {name} --endpoint <URL>'")]
    MissingEndpoint { name: String },

    /// An endpoint or token reference could not be turned into a value
    #[error("Cannot resolve {what} of profile '{profile}': {reason}")]
    Unresolved {
        profile: String,
        what: &'static str,
        reason: String,
    },

    #[error("Keyring reference '{key}' requires the secure-storage feature")]
    KeyringUnavailable { key: String },

    #[cfg(feature = "secure-storage")]
    #[error("Keyring error: {0}")]
    Keyring(String),

    #[error("Cannot determine the platform config directory")]
    NoConfigDir,
}

pub type Result<T> = std::result::Result<T, ConfigError>;
