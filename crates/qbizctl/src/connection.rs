//! Connection management for the Q Business client

use std::path::PathBuf;

use anyhow::Context;
use qbizctl_core::config::ResolvedProfile;
use qbizctl_core::config::config::{ENDPOINT_ENV, TOKEN_ENV};
use qbizctl_core::{Config, QBusinessClient};
use tracing::{debug, info, trace};

use crate::error::{QbizCtlError, Result as CliResult};

/// User agent string for qbizctl HTTP requests
const QBIZCTL_USER_AGENT: &str = concat!("qbizctl/", env!("CARGO_PKG_VERSION"));

/// Connection manager for creating authenticated clients
#[derive(Clone)]
pub struct ConnectionManager {
    pub config: Config,
    pub config_path: Option<PathBuf>,
}

impl ConnectionManager {
    pub fn with_config_path(config: Config, config_path: Option<PathBuf>) -> Self {
        Self {
            config,
            config_path,
        }
    }

    /// Save the configuration to the appropriate location
    pub fn save_config(&self) -> CliResult<()> {
        if let Some(ref path) = self.config_path {
            self.config
                .save_to_path(path)
                .context("Failed to save configuration")?;
        } else {
            self.config.save().context("Failed to save configuration")?;
        }
        Ok(())
    }

    /// Resolve endpoint and token for one invocation
    ///
    /// When --config-file is explicitly specified, environment variables are
    /// ignored so an explicit file fully determines the connection.
    pub fn resolve(&self, profile_name: Option<&str>) -> CliResult<ResolvedProfile> {
        let use_env_vars = self.config_path.is_none();
        debug!(
            "Config path: {:?}, use_env_vars: {}",
            self.config_path, use_env_vars
        );

        if use_env_vars
            && profile_name.is_none()
            && self.config.profiles.is_empty()
            && let Ok(endpoint) = std::env::var(ENDPOINT_ENV)
        {
            info!("Using Q Business endpoint from environment variables");
            return Ok(ResolvedProfile {
                endpoint,
                token: std::env::var(TOKEN_ENV).ok(),
                timeout: None,
            });
        }

        let (name, profile) = self.config.resolve_profile(profile_name)?;
        info!("Using profile: {}", name);
        Ok(profile.resolve(&name, use_env_vars)?)
    }

    /// Create a client for the selected profile
    pub fn create_client(&self, profile_name: Option<&str>) -> CliResult<QBusinessClient> {
        let resolved = self.resolve(profile_name)?;
        trace!(endpoint = %resolved.endpoint, has_token = resolved.token.is_some(), "Building client");

        let mut builder =
            QBusinessClient::builder(resolved.endpoint.clone()).user_agent(QBIZCTL_USER_AGENT);
        if let Some(token) = resolved.token {
            builder = builder.token(token);
        }
        if let Some(timeout) = resolved.timeout {
            builder = builder.timeout(timeout);
        }

        builder
            .build()
            .map_err(|e| QbizCtlError::Configuration(e.to_string()))
    }
}
