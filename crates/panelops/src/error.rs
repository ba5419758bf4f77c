//! CLI error types with miette diagnostics.
//!
//! Maps gateway and core errors into user-facing diagnostics with
//! actionable help text and distinct exit codes.

use miette::Diagnostic;
use thiserror::Error;

use panelops_core::{ApiError, CoreError};

/// Process exit codes, stable for scripting.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    /// Bad flags or arguments, mirroring clap's own usage errors.
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const PERMISSION: i32 = 5;
    pub const CONNECTION: i32 = 6;
    pub const TIMEOUT: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not connect to the panel at {url}")]
    #[diagnostic(
        code(panelops::connection_failed),
        help("Check that the panel is up and reachable. Try: panelops ping --server {url}")
    )]
    ConnectionFailed {
        /// Base URL the request was aimed at.
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("TLS setup failed: {reason}")]
    #[diagnostic(
        code(panelops::tls_error),
        help(
            "The panel may be using a self-signed certificate.\n\
             Use --insecure (-k) to accept it, or configure ca_cert in your profile."
        )
    )]
    Tls { reason: String },

    // ── Authentication ───────────────────────────────────────────────

    #[error("Not authenticated: {}", .message.as_deref().unwrap_or("session missing or expired"))]
    #[diagnostic(
        code(panelops::auth_required),
        help("Log in (again) with: panelops login")
    )]
    AuthRequired { message: Option<String> },

    #[error("Permission denied: {message}")]
    #[diagnostic(
        code(panelops::permission_denied),
        help("This action needs an admin session. Check `panelops whoami`.")
    )]
    PermissionDenied { message: String },

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(panelops::no_credentials),
        help(
            "Run: panelops login --username <name>\n\
             Or set the PANELOPS_USERNAME / PANELOPS_PASSWORD environment variables."
        )
    )]
    NoCredentials { profile: String },

    // ── Resources ────────────────────────────────────────────────────

    #[error("Not found: {message}")]
    #[diagnostic(
        code(panelops::not_found),
        help("Check the ID with the matching `list` subcommand.")
    )]
    NotFound { message: String },

    // ── API ──────────────────────────────────────────────────────────

    #[error("Panel error: {message}")]
    #[diagnostic(code(panelops::api_error))]
    Api {
        message: String,
        status: Option<u16>,
    },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(panelops::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(panelops::profile_not_found),
        help("List profiles with: panelops config profiles")
    )]
    ProfileNotFound { name: String },

    #[error("No panel server configured")]
    #[diagnostic(
        code(panelops::no_config),
        help(
            "Create a profile with: panelops config init\n\
             Or pass --server <URL> directly.\n\
             Expected config at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(panelops::config))]
    Config { message: String },

    // ── Timeout ──────────────────────────────────────────────────────

    #[error("Request timed out")]
    #[diagnostic(
        code(panelops::timeout),
        help("Increase --timeout or check panel responsiveness.")
    )]
    Timeout,

    // ── IO ───────────────────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::Tls { .. } => exit_code::CONNECTION,
            Self::AuthRequired { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::PermissionDenied { .. } => exit_code::PERMISSION,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Timeout => exit_code::TIMEOUT,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    /// True when the cached session token has been rejected and should
    /// be discarded.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::AuthRequired { .. })
    }
}

// ── Error conversions ────────────────────────────────────────────────

impl From<ApiError> for CliError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::AuthExpired { message } => Self::AuthRequired { message },

            ApiError::PermissionDenied { message } => Self::PermissionDenied {
                message: message.unwrap_or_else(|| "insufficient permissions".into()),
            },

            ApiError::NotFound { message } => Self::NotFound {
                message: message.unwrap_or_else(|| "no such entity".into()),
            },

            ApiError::Api { status, message } => Self::Api {
                message: message.unwrap_or_else(|| format!("request failed (HTTP {status})")),
                status: Some(status),
            },

            ApiError::Transport(e) => {
                if e.is_timeout() {
                    Self::Timeout
                } else if e.is_connect() {
                    let url = e.url().map_or_else(|| "<unknown>".to_owned(), ToString::to_string);
                    Self::ConnectionFailed {
                        url,
                        source: Box::new(e),
                    }
                } else {
                    let status = e.status().map(|s| s.as_u16());
                    Self::Api {
                        message: e.to_string(),
                        status,
                    }
                }
            }

            ApiError::InvalidUrl(e) => Self::Validation {
                field: "server".into(),
                reason: format!("invalid URL: {e}"),
            },

            ApiError::Tls(reason) => Self::Tls { reason },

            ApiError::Deserialization { message, body: _ } => Self::Api {
                message: format!("unexpected response from the panel: {message}"),
                status: None,
            },
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => Self::ConnectionFailed {
                url,
                source: reason.into(),
            },

            CoreError::Timeout => Self::Timeout,

            CoreError::SessionExpired { message } => Self::AuthRequired {
                message: Some(message),
            },

            CoreError::PermissionDenied { message } => Self::PermissionDenied { message },

            CoreError::NotFound { message } => Self::NotFound { message },

            CoreError::Api { message, status } => Self::Api { message, status },

            CoreError::Config { message } => Self::Config { message },

            CoreError::Internal(message) => Self::Api {
                message,
                status: None,
            },
        }
    }
}

impl From<panelops_config::ConfigError> for CliError {
    fn from(err: panelops_config::ConfigError) -> Self {
        use panelops_config::ConfigError;
        match err {
            ConfigError::NoCredentials { profile } => Self::NoCredentials { profile },
            ConfigError::UnknownProfile(name) => Self::ProfileNotFound { name },
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            other => Self::Config {
                message: other.to_string(),
            },
        }
    }
}
