//! Unified error handling for qbizctl-core
//!
//! Every failed invocation carries a [`CoreError`]. Usage errors are raised
//! before anything is sent; API errors wrap the collaborator's [`ApiError`]
//! unchanged so callers can still inspect status and service code.
//!
//! # Example
//!
//! ```rust
//! use qbizctl_core::{ApiError, CoreError};
//!
//! let err = CoreError::from_api(
//!     "GetIndex",
//!     None,
//!     ApiError::from_status(404, None, "Index not found".to_string()),
//! );
//! assert!(err.is_not_found());
//! assert!(!err.is_usage());
//! ```

use thiserror::Error;

use crate::api::ApiError;

/// Errors detected before a request is dispatched
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    #[error("{operation}: missing required parameter '{parameter}'")]
    MissingParameter {
        operation: &'static str,
        parameter: &'static str,
    },

    #[error("{operation}: unknown parameter '{parameter}'")]
    UnknownParameter {
        operation: &'static str,
        parameter: String,
    },

    #[error("{operation}: parameter '{parameter}' was supplied more than once")]
    DuplicateParameter {
        operation: &'static str,
        parameter: &'static str,
    },

    #[error("{operation}: invalid value for parameter '{parameter}': {reason}")]
    InvalidParameter {
        operation: &'static str,
        parameter: &'static str,
        reason: String,
    },

    #[error("{operation}: structured input must be a JSON object, got {found}")]
    InvalidStructuredInput {
        operation: &'static str,
        found: &'static str,
    },

    #[error("Invalid output selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },
}

/// Core error type for a failed invocation
#[derive(Error, Debug)]
pub enum CoreError {
    #[error(transparent)]
    Usage(#[from] UsageError),

    /// The remote call failed
    #[error("{operation} failed: {source}")]
    Api {
        operation: &'static str,
        #[source]
        source: ApiError,
    },

    /// The endpoint host name could not be resolved
    #[error(
        "Name resolution failure attempting to reach {}. Check the endpoint URL and region configured for your profile",
        describe_endpoint(.endpoint.as_deref())
    )]
    EndpointUnreachable {
        operation: &'static str,
        endpoint: Option<String>,
        #[source]
        source: ApiError,
    },

    /// The confirmation prompt could not be shown or read
    #[error("Confirmation prompt failed: {0}")]
    Prompt(#[source] std::io::Error),

    /// The response could not be turned into an output value
    #[error("Failed to serialize {operation} output: {source}")]
    Output {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

fn describe_endpoint(endpoint: Option<&str>) -> String {
    match endpoint {
        Some(endpoint) => format!("service endpoint '{}'", endpoint),
        None => "the service endpoint".to_string(),
    }
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

impl CoreError {
    /// Wrap an API error, re-wrapping DNS failures with a clearer diagnostic
    pub fn from_api(operation: &'static str, endpoint: Option<String>, source: ApiError) -> Self {
        if source.is_name_resolution_failure() {
            CoreError::EndpointUnreachable {
                operation,
                endpoint,
                source,
            }
        } else {
            CoreError::Api { operation, source }
        }
    }

    /// The underlying API error, if the remote call failed
    #[must_use]
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            CoreError::Api { source, .. } | CoreError::EndpointUnreachable { source, .. } => {
                Some(source)
            }
            _ => None,
        }
    }

    /// Returns true if nothing was sent because the invocation was malformed
    #[must_use]
    pub fn is_usage(&self) -> bool {
        matches!(self, CoreError::Usage(_))
    }

    /// Returns true if this is a "not found" error (404)
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.api_error().is_some_and(ApiError::is_not_found)
    }

    /// Returns true if this is an authentication/authorization error (401/403)
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.api_error().is_some_and(ApiError::is_unauthorized)
    }

    /// Returns true if the service could not be reached at all
    #[must_use]
    pub fn is_connectivity(&self) -> bool {
        matches!(
            self,
            CoreError::EndpointUnreachable { .. }
                | CoreError::Api {
                    source: ApiError::Connection { .. } | ApiError::Timeout(_),
                    ..
                }
        )
    }

    /// Returns true if this error is potentially retryable by the caller
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        self.api_error().is_some_and(ApiError::is_retryable)
    }
}
