//! Credential storage with optional keyring support
//!
//! Token values in the config file are either plaintext or a `keyring:<key>`
//! reference into the OS keyring (with the `secure-storage` feature).
//! An environment variable, when named, overrides both.

use super::error::{ConfigError, Result};
use std::env;

/// Prefix that indicates a value should be retrieved from the keyring
const KEYRING_PREFIX: &str = "keyring:";

/// Service name for keyring entries
#[cfg(feature = "secure-storage")]
const SERVICE_NAME: &str = "qbizctl";

/// Storage backend for credentials
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialStorage {
    #[cfg(feature = "secure-storage")]
    Keyring,
    Plaintext,
}

/// Credential store abstraction
#[derive(Debug, Clone)]
pub struct CredentialStore {
    storage: CredentialStorage,
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialStore {
    /// Use the keyring when compiled in and reachable, plaintext otherwise
    pub fn new() -> Self {
        #[cfg(feature = "secure-storage")]
        {
            if keyring::Entry::new(SERVICE_NAME, "__probe__").is_ok() {
                return Self {
                    storage: CredentialStorage::Keyring,
                };
            }
        }
        Self::plaintext()
    }

    pub fn plaintext() -> Self {
        Self {
            storage: CredentialStorage::Plaintext,
        }
    }

    pub fn storage(&self) -> CredentialStorage {
        self.storage
    }

    /// Store a token, returning the value to write into the config file
    pub fn store_credential(&self, key: &str, value: &str) -> Result<String> {
        match self.storage {
            #[cfg(feature = "secure-storage")]
            CredentialStorage::Keyring => {
                let entry = keyring::Entry::new(SERVICE_NAME, key)
                    .map_err(|e| ConfigError::Keyring(e.to_string()))?;
                entry.set_password(value).map_err(|e| {
                    ConfigError::Keyring(format!(
                        "Failed to store credential in keyring: {}",
                        e
                    ))
                })?;
                Ok(format!("{}{}", KEYRING_PREFIX, key))
            }
            CredentialStorage::Plaintext => {
                let _ = key;
                Ok(value.to_string())
            }
        }
    }

    /// Retrieve a credential value
    ///
    /// Resolution order:
    /// 1. the environment variable, if one is named and set
    /// 2. the keyring, for `keyring:` references
    /// 3. the value itself
    pub fn get_credential(&self, value: &str, env_var: Option<&str>) -> Result<String> {
        if let Some(var) = env_var
            && let Ok(env_value) = env::var(var)
        {
            return Ok(env_value);
        }

        let Some(key) = value.strip_prefix(KEYRING_PREFIX) else {
            return Ok(value.to_string());
        };

        #[cfg(feature = "secure-storage")]
        {
            let entry = keyring::Entry::new(SERVICE_NAME, key)
                .map_err(|e| ConfigError::Keyring(e.to_string()))?;
            entry.get_password().map_err(|e| {
                ConfigError::Keyring(format!(
                    "Failed to retrieve credential '{}' from keyring: {}",
                    key, e
                ))
            })
        }
        #[cfg(not(feature = "secure-storage"))]
        {
            Err(ConfigError::KeyringUnavailable {
                key: key.to_string(),
            })
        }
    }

    /// Remove a keyring entry; plaintext values need no cleanup
    pub fn delete_credential(&self, value: &str) -> Result<()> {
        let Some(key) = value.strip_prefix(KEYRING_PREFIX) else {
            return Ok(());
        };

        #[cfg(feature = "secure-storage")]
        {
            let entry = keyring::Entry::new(SERVICE_NAME, key)
                .map_err(|e| ConfigError::Keyring(e.to_string()))?;
            match entry.delete_credential() {
                Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
                Err(e) => Err(ConfigError::Keyring(format!(
                    "Failed to delete credential from keyring: {}",
                    e
                ))),
            }
        }
        #[cfg(not(feature = "secure-storage"))]
        {
            let _ = key;
            Ok(())
        }
    }

    pub fn is_keyring_reference(value: &str) -> bool {
        value.starts_with(KEYRING_PREFIX)
    }

    pub fn storage_backend(&self) -> &'static str {
        match self.storage {
            #[cfg(feature = "secure-storage")]
            CredentialStorage::Keyring => "keyring",
            CredentialStorage::Plaintext => "plaintext",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_plaintext_round_trip() {
        let store = CredentialStore::plaintext();
        let stored = store.store_credential("dev-token", "secret").unwrap();
        assert_eq!(stored, "secret");
        assert_eq!(store.get_credential(&stored, None).unwrap(), "secret");
        assert_eq!(store.storage_backend(), "plaintext");
    }

    #[test]
    #[serial]
    fn test_env_var_override() {
        let store = CredentialStore::plaintext();
        unsafe {
            std::env::set_var("QBIZCTL_TEST_TOKEN_OVERRIDE", "from-env");
        }
        let value = store
            .get_credential("from-file", Some("QBIZCTL_TEST_TOKEN_OVERRIDE"))
            .unwrap();
        unsafe {
            std::env::remove_var("QBIZCTL_TEST_TOKEN_OVERRIDE");
        }
        assert_eq!(value, "from-env");
    }

    #[test]
    fn test_keyring_reference_detection() {
        assert!(CredentialStore::is_keyring_reference("keyring:prod-token"));
        assert!(!CredentialStore::is_keyring_reference("plain"));
    }

    #[cfg(not(feature = "secure-storage"))]
    #[test]
    fn test_keyring_reference_without_feature() {
        let store = CredentialStore::plaintext();
        let err = store.get_credential("keyring:prod", None).unwrap_err();
        assert!(err.to_string().contains("secure-storage"));
        assert!(store.delete_credential("keyring:prod").is_ok());
    }
}
