//! Configuration and profile management
//!
// Allow nested config module - this is intentional for the config subsystem

#![allow(clippy::module_inception)]
//!
//! Profiles name a service endpoint, an optional region and a bearer token.
//! The file is TOML, lives in the platform config directory and may reference
//! environment variables (`${VAR}` / `${VAR:-default}`). Tokens can be kept in
//! the OS keyring with the `secure-storage` feature.

pub mod config;
pub mod credential;
pub mod error;

pub use config::{Config, Profile, ResolvedProfile};
pub use credential::{CredentialStorage, CredentialStore};
pub use error::{ConfigError, Result};
