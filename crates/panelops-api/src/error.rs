use thiserror::Error;

/// Top-level error type for the `panelops-api` crate.
///
/// Covers every failure mode a panel request can hit: expired sessions,
/// authorization refusals, transport faults, and malformed bodies.
/// `panelops-core` maps these into user-facing diagnostics.
///
/// Variants that carry `message: Option<String>` hold the `error` field
/// from the response envelope when the backend supplied one; `None`
/// means the body had no usable message.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The backend answered 401 (expired token, or a rejected login).
    /// The gateway has already torn the local session down by the time
    /// this value reaches the caller.
    #[error(
        "Authentication required: {}",
        .message.as_deref().unwrap_or("session expired or invalid credentials")
    )]
    AuthExpired { message: Option<String> },

    // ── Authorization ───────────────────────────────────────────────
    /// The backend answered 403 on an admin-gated or owner-gated route.
    #[error("Permission denied: {}", .message.as_deref().unwrap_or("insufficient permissions"))]
    PermissionDenied { message: Option<String> },

    // ── Transport ───────────────────────────────────────────────────
    /// The request never produced an HTTP response (connection refused,
    /// DNS failure, timeout).
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The base URL or a joined path failed to parse.
    #[error("Malformed URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── API ─────────────────────────────────────────────────────────
    /// The requested entity does not exist (404).
    #[error("Not found: {}", .message.as_deref().unwrap_or("no such entity"))]
    NotFound { message: Option<String> },

    /// Any other structured refusal from the panel, including 2xx
    /// responses whose envelope says `success: false`.
    #[error("API error (HTTP {status}): {}", .message.as_deref().unwrap_or("request failed"))]
    Api {
        status: u16,
        message: Option<String>,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this error means the session is gone and only
    /// re-authentication can help.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::AuthExpired { .. })
    }

    /// Returns `true` for transient transport failures worth retrying
    /// by hand (the client itself never retries).
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// The error message the panel itself put in the response body, if
    /// there was one. Transport and parsing failures have none; callers
    /// that need prose should fall back to their own wording.
    pub fn panel_message(&self) -> Option<&str> {
        match self {
            Self::AuthExpired { message }
            | Self::PermissionDenied { message }
            | Self::NotFound { message }
            | Self::Api { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// The HTTP status behind this error, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::AuthExpired { .. } => Some(401),
            Self::PermissionDenied { .. } => Some(403),
            Self::NotFound { .. } => Some(404),
            Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
