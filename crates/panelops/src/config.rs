//! CLI configuration — thin wrapper around `panelops_config` shared types.
//!
//! Re-exports the shared types and adds CLI-specific resolution that
//! respects `GlobalOpts` flag overrides (--server, --insecure, etc.).

use std::time::Duration;

use panelops_core::{TlsMode, TransportConfig};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use panelops_config::{
    Config, Defaults, Profile, SessionCache, clear_session, config_path, load_config_or_default,
    load_session, save_config, save_session, session_path,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// The profile a command runs against: `--profile` wins, then the
/// config's `default_profile`, then the literal name "default".
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    let chosen = global
        .profile
        .as_deref()
        .or(config.default_profile.as_deref());
    chosen.unwrap_or("default").to_owned()
}

/// Resolve the server URL and transport settings for a command.
///
/// CLI flag overrides take priority over profile values. A `--server`
/// flag works without any profile at all; otherwise the named profile
/// must exist.
pub fn resolve_connection(
    config: &Config,
    profile_name: &str,
    global: &GlobalOpts,
) -> Result<(url::Url, TransportConfig), CliError> {
    let profile = config.profiles.get(profile_name);

    // 1. Server URL (flag > env > profile)
    let url_str = match (global.server.as_deref(), profile) {
        (Some(flag), _) => flag,
        (None, Some(p)) => p.server.as_str(),
        (None, None) => {
            return Err(CliError::NoConfig {
                path: config_path().display().to_string(),
            });
        }
    };
    let url: url::Url = url_str.parse().map_err(|_| CliError::Validation {
        field: "server".into(),
        reason: format!("invalid URL: {url_str}"),
    })?;

    // 2. TLS verification
    let tls = if global.insecure || profile.and_then(|p| p.insecure).unwrap_or(false) {
        TlsMode::DangerAcceptInvalid
    } else if let Some(ca_path) = profile.and_then(|p| p.ca_cert.as_ref()) {
        TlsMode::CustomCa(ca_path.clone())
    } else {
        TlsMode::System
    };

    // 3. Timeout (flag or its default; profile timeouts apply to the TUI)
    let timeout = Duration::from_secs(global.timeout);

    Ok((url, TransportConfig { tls, timeout }))
}

/// Username for login: flag > profile > env.
pub fn resolve_username(
    explicit: Option<&str>,
    config: &Config,
    profile_name: &str,
) -> Option<String> {
    if let Some(name) = explicit {
        return Some(name.to_owned());
    }
    if let Some(profile) = config.profiles.get(profile_name) {
        if let Ok(name) = panelops_config::resolve_username(profile, profile_name) {
            return Some(name);
        }
    }
    std::env::var("PANELOPS_USERNAME").ok()
}

/// Password from the non-interactive chain: env > keyring > profile.
pub fn resolve_password(config: &Config, profile_name: &str) -> Option<secrecy::SecretString> {
    match config.profiles.get(profile_name) {
        Some(profile) => panelops_config::resolve_password(profile, profile_name).ok(),
        None => std::env::var("PANELOPS_PASSWORD")
            .ok()
            .map(secrecy::SecretString::from),
    }
}
