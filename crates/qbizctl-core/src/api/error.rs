//! Errors raised by the API client collaborator

use std::error::Error as StdError;

use thiserror::Error;

type BoxError = Box<dyn StdError + Send + Sync>;

/// Transport and service errors returned by a [`QBusinessApi`](super::QBusinessApi) call
#[derive(Error, Debug)]
pub enum ApiError {
    /// 400 - the service rejected the request shape or values
    #[error("Bad request: {message}")]
    BadRequest {
        code: Option<String>,
        message: String,
    },

    /// 401/403 - missing, expired or insufficient credentials
    #[error("Access denied: {message}")]
    AccessDenied {
        code: Option<String>,
        message: String,
    },

    /// 404
    #[error("Resource not found: {message}")]
    NotFound {
        code: Option<String>,
        message: String,
    },

    /// 409 - resource state conflict
    #[error("Conflict: {message}")]
    Conflict {
        code: Option<String>,
        message: String,
    },

    /// 429
    #[error("Request throttled: {message}")]
    Throttled {
        code: Option<String>,
        message: String,
    },

    /// 5xx
    #[error("Service error (HTTP {status}): {message}")]
    Server {
        status: u16,
        code: Option<String>,
        message: String,
    },

    /// Any other non-success status
    #[error("Unexpected response (HTTP {status}): {message}")]
    Unexpected { status: u16, message: String },

    /// The request never reached the service
    #[error("Connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// The client could not be used as configured (bad endpoint, worker failure)
    #[error("Client error: {0}")]
    Client(String),
}

/// Fragments that identify a DNS failure in an error chain across platforms
const NAME_RESOLUTION_MARKERS: &[&str] = &[
    "dns error",
    "failed to lookup address",
    "name or service not known",
    "nodename nor servname",
    "no such host is known",
    "name resolution",
    "temporary failure in name resolution",
];

impl ApiError {
    /// Build a connection error keeping the original as the source
    pub fn connection(source: impl Into<BoxError>) -> Self {
        let source = source.into();
        ApiError::Connection {
            message: error_chain(source.as_ref()),
            source: Some(source),
        }
    }

    /// Build an error from an HTTP status, service error code and message
    pub fn from_status(status: u16, code: Option<String>, message: String) -> Self {
        match status {
            400 => ApiError::BadRequest { code, message },
            401 | 403 => ApiError::AccessDenied { code, message },
            404 => ApiError::NotFound { code, message },
            409 => ApiError::Conflict { code, message },
            429 => ApiError::Throttled { code, message },
            500..=599 => ApiError::Server {
                status,
                code,
                message,
            },
            _ => ApiError::Unexpected { status, message },
        }
    }

    /// HTTP status of a service-side error
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::BadRequest { .. } => Some(400),
            ApiError::AccessDenied { .. } => Some(403),
            ApiError::NotFound { .. } => Some(404),
            ApiError::Conflict { .. } => Some(409),
            ApiError::Throttled { .. } => Some(429),
            ApiError::Server { status, .. } | ApiError::Unexpected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Service error code (e.g. `ResourceNotFoundException`)
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        match self {
            ApiError::BadRequest { code, .. }
            | ApiError::AccessDenied { code, .. }
            | ApiError::NotFound { code, .. }
            | ApiError::Conflict { code, .. }
            | ApiError::Throttled { code, .. }
            | ApiError::Server { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::AccessDenied { .. })
    }

    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, ApiError::Conflict { .. })
    }

    #[must_use]
    pub fn is_bad_request(&self) -> bool {
        matches!(self, ApiError::BadRequest { .. })
    }

    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::Timeout(_))
    }

    /// Returns true if repeating the same call could succeed.
    ///
    /// Nothing in this crate retries; this only informs the caller.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ApiError::Throttled { .. }
                | ApiError::Server { .. }
                | ApiError::Timeout(_)
                | ApiError::Connection { .. }
        )
    }

    /// Returns true if the endpoint host name could not be resolved
    #[must_use]
    pub fn is_name_resolution_failure(&self) -> bool {
        match self {
            ApiError::Connection { message, .. } => {
                let message = message.to_lowercase();
                NAME_RESOLUTION_MARKERS
                    .iter()
                    .any(|marker| message.contains(marker))
            }
            _ => false,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout(error_chain(&err))
        } else if err.is_decode() {
            ApiError::Decode(error_chain(&err))
        } else if err.is_builder() {
            ApiError::Client(error_chain(&err))
        } else {
            ApiError::connection(err)
        }
    }
}

/// Flatten an error and its sources into one line
pub(crate) fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
