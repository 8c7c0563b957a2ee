//! # qbizctl-core
//!
//! The engine behind `qbizctl`: a single command-adapter pipeline that every
//! Q Business operation runs through.
//!
//! - [`adapter`] binds loosely typed parameters, resolves the output selector,
//!   confirms destructive calls, builds the typed request and dispatches it
//!   with cancellation support
//! - [`operations`] declares the sixteen supported operations
//! - [`api`] holds the injected client trait and the bundled REST transport
//! - [`model`] holds the typed requests and responses
//! - [`config`] manages profiles in a TOML file
//!
//! Every invocation ends in exactly one [`adapter::Outcome`]:
//! succeeded, failed, cancelled or aborted.

pub mod adapter;
pub mod api;
pub mod config;
pub mod error;
pub mod model;
pub mod operations;

pub use adapter::{
    Bindings, CommandAdapter, Confirmer, Invocation, InvocationOptions, InvocationState,
    Operation, Outcome, OutputSelector,
};
pub use api::{ApiError, ApiResult, QBusinessApi, QBusinessClient};
pub use config::{Config, ConfigError, Profile};
pub use error::{CoreError, Result, UsageError};
