//! Profile management command implementations

use qbizctl_core::config::CredentialStore;
use qbizctl_core::{Config, Profile};
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::cli::{OutputFormat, ProfileCommands};
use crate::connection::ConnectionManager;
use crate::error::{QbizCtlError, Result};
use crate::output;

/// Handle profile management commands
pub async fn handle_profile_command(
    profile_cmd: &ProfileCommands,
    conn_mgr: &mut ConnectionManager,
    output_format: OutputFormat,
    query: Option<&str>,
) -> Result<()> {
    match profile_cmd {
        ProfileCommands::List => handle_list(conn_mgr, output_format, query),
        ProfileCommands::Path => handle_path(conn_mgr),
        ProfileCommands::Show { name } => handle_show(conn_mgr, name, output_format, query),
        ProfileCommands::Set {
            name,
            endpoint,
            region,
            token,
            timeout_secs,
            #[cfg(feature = "secure-storage")]
            use_keyring,
        } => {
            #[cfg(feature = "secure-storage")]
            let use_keyring = *use_keyring;
            #[cfg(not(feature = "secure-storage"))]
            let use_keyring = false;

            let profile = Profile {
                endpoint: endpoint.clone(),
                region: region.clone(),
                token: token
                    .as_deref()
                    .map(|token| store_token(name, token, use_keyring))
                    .transpose()?,
                timeout_secs: *timeout_secs,
            };
            handle_set(conn_mgr, name, profile)
        }
        ProfileCommands::Remove { name } => handle_remove(conn_mgr, name),
        ProfileCommands::Default { name } => handle_default(conn_mgr, name),
    }
}

fn config_path_display(conn_mgr: &ConnectionManager) -> Option<String> {
    conn_mgr
        .config_path
        .as_ref()
        .map(|p| p.display().to_string())
        .or_else(|| Config::config_path().ok().map(|p| p.display().to_string()))
}

/// Describe a profile for display, never revealing the token
fn describe(name: &str, profile: &Profile, is_default: bool) -> Value {
    let token = match profile.token.as_deref() {
        None => Value::Null,
        Some(token) if CredentialStore::is_keyring_reference(token) => json!("keyring"),
        Some(token) if token.starts_with("${") => json!(token),
        Some(_) => json!("********"),
    };

    json!({
        "name": name,
        "endpoint": profile.endpoint,
        "region": profile.region,
        "token": token,
        "timeout_secs": profile.timeout_secs,
        "is_default": is_default,
    })
}

fn handle_list(
    conn_mgr: &ConnectionManager,
    output_format: OutputFormat,
    query: Option<&str>,
) -> Result<()> {
    debug!("Listing all configured profiles");
    let config = &conn_mgr.config;
    let profiles: Vec<Value> = config
        .list_profiles()
        .into_iter()
        .map(|(name, profile)| {
            describe(
                name,
                profile,
                config.default_profile.as_deref() == Some(name.as_str()),
            )
        })
        .collect();

    if profiles.is_empty() && matches!(output_format, OutputFormat::Auto | OutputFormat::Table) {
        println!("No profiles configured.");
        if let Some(path) = config_path_display(conn_mgr) {
            println!("Configuration file: {}", path);
        }
        return Ok(());
    }

    output::print_output(profiles, output_format, query)?;
    Ok(())
}

fn handle_path(conn_mgr: &ConnectionManager) -> Result<()> {
    let path = config_path_display(conn_mgr)
        .ok_or_else(|| QbizCtlError::Configuration("Failed to determine config path".into()))?;
    println!("{}", path);
    Ok(())
}

fn handle_show(
    conn_mgr: &ConnectionManager,
    name: &str,
    output_format: OutputFormat,
    query: Option<&str>,
) -> Result<()> {
    let config = &conn_mgr.config;
    let profile = config
        .profiles
        .get(name)
        .ok_or_else(|| QbizCtlError::ProfileNotFound {
            name: name.to_string(),
        })?;

    let is_default = config.default_profile.as_deref() == Some(name);
    output::print_output(describe(name, profile, is_default), output_format, query)?;
    Ok(())
}

/// Value to write into the config file for `token`
fn store_token(name: &str, token: &str, use_keyring: bool) -> Result<String> {
    if !use_keyring {
        return Ok(token.to_string());
    }

    let store = CredentialStore::new();
    if store.storage_backend() != "keyring" {
        return Err(QbizCtlError::Configuration(
            "OS keyring is not available on this system".to_string(),
        ));
    }
    Ok(store.store_credential(&format!("{}-token", name), token)?)
}

fn handle_set(conn_mgr: &mut ConnectionManager, name: &str, profile: Profile) -> Result<()> {
    let is_new = !conn_mgr.config.profiles.contains_key(name);
    if let Some(previous) = conn_mgr.config.profiles.get(name)
        && let Some(old_token) = previous.token.as_deref()
        && profile.token.as_deref() != Some(old_token)
    {
        CredentialStore::new().delete_credential(old_token)?;
    }

    conn_mgr.config.set_profile(name.to_string(), profile);
    if conn_mgr.config.profiles.len() == 1 && conn_mgr.config.default_profile.is_none() {
        conn_mgr.config.default_profile = Some(name.to_string());
    }
    conn_mgr.save_config()?;

    info!("Saved profile '{}'", name);
    if is_new {
        println!("Profile '{}' created", name);
    } else {
        println!("Profile '{}' updated", name);
    }
    Ok(())
}

fn handle_remove(conn_mgr: &mut ConnectionManager, name: &str) -> Result<()> {
    let removed =
        conn_mgr
            .config
            .remove_profile(name)
            .ok_or_else(|| QbizCtlError::ProfileNotFound {
                name: name.to_string(),
            })?;

    if let Some(token) = removed.token.as_deref() {
        CredentialStore::new().delete_credential(token)?;
    }
    conn_mgr.save_config()?;

    println!("Profile '{}' removed", name);
    Ok(())
}

fn handle_default(conn_mgr: &mut ConnectionManager, name: &str) -> Result<()> {
    if !conn_mgr.config.profiles.contains_key(name) {
        return Err(QbizCtlError::ProfileNotFound {
            name: name.to_string(),
        });
    }

    conn_mgr.config.default_profile = Some(name.to_string());
    conn_mgr.save_config()?;

    println!("Default profile set to '{}'", name);
    Ok(())
}
