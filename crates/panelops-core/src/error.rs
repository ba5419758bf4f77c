// ── Core error types ──
//
// What callers of panelops-core see when something fails. Wire details
// stay behind the gateway: the From impl below folds transport and
// HTTP-status failures into these domain variants.

use thiserror::Error;

use panelops_api::Error as GatewayError;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("cannot reach the panel at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("request timed out")]
    Timeout,

    /// The panel rejected the session (or the login itself). The local
    /// session has already been cleared when this surfaces.
    #[error("session expired: {message}")]
    SessionExpired { message: String },

    #[error("permission denied: {message}")]
    PermissionDenied { message: String },

    #[error("not found: {message}")]
    NotFound { message: String },

    /// Structured refusal from the panel. `message` is the backend's
    /// own wording when it supplied any.
    #[error("panel error: {message}")]
    Api {
        message: String,
        status: Option<u16>,
    },

    #[error("configuration: {message}")]
    Config { message: String },

    #[error("internal: {0}")]
    Internal(String),
}

impl CoreError {
    /// Whether re-authentication would resolve this error.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::SessionExpired { .. })
    }
}

impl From<GatewayError> for CoreError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::AuthExpired { message } => Self::SessionExpired {
                message: message.unwrap_or_else(|| "re-authentication required".into()),
            },
            GatewayError::PermissionDenied { message } => Self::PermissionDenied {
                message: message.unwrap_or_else(|| "insufficient permissions".into()),
            },
            GatewayError::NotFound { message } => Self::NotFound {
                message: message.unwrap_or_else(|| "no such entity".into()),
            },
            GatewayError::Api { status, message } => Self::Api {
                message: message.unwrap_or_else(|| format!("request failed (HTTP {status})")),
                status: Some(status),
            },
            GatewayError::Transport(ref e) => transport_error(e),
            GatewayError::InvalidUrl(e) => Self::Config {
                message: format!("invalid URL: {e}"),
            },
            GatewayError::Tls(msg) => Self::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS: {msg}"),
            },
            GatewayError::Deserialization { message, body: _ } => {
                Self::Internal(format!("unreadable response: {message}"))
            }
        }
    }
}

/// Classify a reqwest failure: timeout and refused-connection get their
/// own variants, everything else is reported as a plain API failure.
fn transport_error(e: &reqwest::Error) -> CoreError {
    if e.is_timeout() {
        return CoreError::Timeout;
    }
    if e.is_connect() {
        let url = e.url().map_or_else(|| "<unknown>".to_owned(), ToString::to_string);
        return CoreError::ConnectionFailed {
            url,
            reason: e.to_string(),
        };
    }
    CoreError::Api {
        message: e.to_string(),
        status: e.status().map(|s| s.as_u16()),
    }
}
