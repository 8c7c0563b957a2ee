//! Error types for qbizctl
//!
//! Library errors are folded into [`QbizCtlError`], which knows how to
//! suggest a fix and which exit code to use.

use colored::Colorize;
use qbizctl_core::{ApiError, ConfigError, CoreError, UsageError};
use thiserror::Error;

/// Cargo-style diagnostic formatter for CLI errors.
///
/// Produces structured output like:
/// ```text
/// error: Profile 'prod' not found
///
///   tip: List available profiles: qbizctl profile list
/// ```
pub struct CliDiagnostic {
    message: String,
    detail: Option<String>,
    tips: Vec<String>,
}

impl CliDiagnostic {
    pub fn error(message: &str) -> Self {
        Self {
            message: message.to_string(),
            detail: None,
            tips: Vec::new(),
        }
    }

    /// Add a detail line below the error message.
    pub fn detail(mut self, text: &str) -> Self {
        self.detail = Some(text.to_string());
        self
    }

    pub fn tip(mut self, description: &str) -> Self {
        self.tips.push(description.to_string());
        self
    }

    /// Print the diagnostic to stderr with colored formatting.
    pub fn print(&self) {
        eprint!("{}{}", "error".red().bold(), ": ".bold());
        eprintln!("{}", self.message);

        if let Some(detail) = &self.detail {
            eprintln!("  {}", detail);
        }

        for description in &self.tips {
            eprintln!();
            eprint!("  {}{}", "tip".yellow().bold(), ": ".bold());
            eprintln!("{}", description);
        }
    }
}

/// Main error type for the qbizctl application
#[derive(Error, Debug)]
pub enum QbizCtlError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Profile '{name}' not found")]
    ProfileNotFound { name: String },

    #[error("No profile configured. Use 'qbizctl profile set' to configure a profile.")]
    NoProfileConfigured,

    #[error("Profile '{name}' has no endpoint configured")]
    MissingEndpoint { name: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error(transparent)]
    Usage(UsageError),

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("{message}")]
    NotFound { message: String },

    #[error("{message}")]
    ApiError { message: String },

    #[error("{message}")]
    ConnectionError { message: String },

    #[error("File error for '{path}': {message}")]
    FileError { path: String, message: String },

    #[error("Output formatting error: {message}")]
    OutputError { message: String },

    #[error("Operation cancelled")]
    Cancelled,
}

/// Result type for qbizctl operations
pub type Result<T> = std::result::Result<T, QbizCtlError>;

impl QbizCtlError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            QbizCtlError::Usage(_) | QbizCtlError::InvalidInput { .. } => 2,
            QbizCtlError::Cancelled => 130,
            _ => 1,
        }
    }

    /// Get helpful suggestions for resolving this error
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            QbizCtlError::ProfileNotFound { name } => vec![
                "List available profiles: qbizctl profile list".to_string(),
                format!(
                    "Create profile '{}': qbizctl profile set {} --endpoint <url>",
                    name, name
                ),
            ],
            QbizCtlError::NoProfileConfigured => vec![
                "Create a profile: qbizctl profile set default --endpoint https://qbusiness.us-east-1.api.aws --token <token>".to_string(),
                "Or set QBIZ_ENDPOINT and QBIZ_TOKEN in the environment".to_string(),
            ],
            QbizCtlError::MissingEndpoint { name } => vec![format!(
                "Set the endpoint: qbizctl profile set {} --endpoint <url>",
                name
            )],
            QbizCtlError::Usage(UsageError::InvalidSelector { .. }) => vec![
                "Use '*' for the whole response, a response field name, or '^Parameter' to echo a parameter".to_string(),
            ],
            QbizCtlError::Usage(_) => vec![
                "Check the command syntax: qbizctl <resource> <action> --help".to_string(),
            ],
            QbizCtlError::InvalidInput { .. } => vec![
                "Check the command syntax: qbizctl <resource> <action> --help".to_string(),
                "Verify --input-json is a JSON object, inline or as @file".to_string(),
            ],
            QbizCtlError::AuthenticationFailed { .. } => vec![
                "Check your token: qbizctl profile show <profile>".to_string(),
                "Ensure the token has not expired".to_string(),
            ],
            QbizCtlError::NotFound { .. } => vec![
                "Verify the resource ID is correct".to_string(),
                "Check that you're using the correct profile".to_string(),
            ],
            QbizCtlError::ConnectionError { .. } => vec![
                "Check network connectivity".to_string(),
                "Verify the endpoint URL: qbizctl profile show <profile>".to_string(),
            ],
            QbizCtlError::FileError { path, .. } => vec![
                format!("Check that file exists: {}", path),
                "Verify file permissions are correct".to_string(),
            ],
            _ => vec![],
        }
    }

    /// Print a cargo-style diagnostic to stderr using colored formatting.
    pub fn print_diagnostic(&self) {
        let mut diag = CliDiagnostic::error(&self.to_string());

        if let QbizCtlError::ConnectionError { .. } | QbizCtlError::ApiError { .. } = self {
            diag = diag.detail("The request did not complete");
        }

        for suggestion in self.suggestions() {
            diag = diag.tip(&suggestion);
        }

        diag.print();
    }
}

impl From<CoreError> for QbizCtlError {
    fn from(err: CoreError) -> Self {
        if err.is_connectivity() {
            return QbizCtlError::ConnectionError {
                message: err.to_string(),
            };
        }
        if err.is_unauthorized() {
            return QbizCtlError::AuthenticationFailed {
                message: err.to_string(),
            };
        }
        if err.is_not_found() {
            return QbizCtlError::NotFound {
                message: err.to_string(),
            };
        }
        match err {
            CoreError::Usage(usage) => QbizCtlError::Usage(usage),
            CoreError::Output { source, .. } => QbizCtlError::OutputError {
                message: source.to_string(),
            },
            other => QbizCtlError::ApiError {
                message: other.to_string(),
            },
        }
    }
}

impl From<ConfigError> for QbizCtlError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::ProfileNotFound { name } => QbizCtlError::ProfileNotFound { name },
            ConfigError::NoProfiles => QbizCtlError::NoProfileConfigured,
            ConfigError::MissingEndpoint { name } => QbizCtlError::MissingEndpoint { name },
            other => QbizCtlError::Configuration(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for QbizCtlError {
    fn from(err: serde_json::Error) -> Self {
        QbizCtlError::OutputError {
            message: format!("JSON error: {}", err),
        }
    }
}

impl From<std::io::Error> for QbizCtlError {
    fn from(err: std::io::Error) -> Self {
        QbizCtlError::OutputError {
            message: format!("IO error: {}", err),
        }
    }
}

impl From<anyhow::Error> for QbizCtlError {
    fn from(err: anyhow::Error) -> Self {
        QbizCtlError::Configuration(format!("{:#}", err))
    }
}
