//! Shared configuration for the panelops CLI and TUI.
//!
//! TOML profiles, credential resolution (env + keyring + plaintext),
//! and the on-disk session cache that keeps an operator logged in
//! between invocations. Both binaries depend on this crate; the CLI
//! adds `GlobalOpts`-aware wrappers on top.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use panelops_api::models::{Role, User};
use panelops_api::{TlsMode, TransportConfig};

/// Request timeout applied when neither profile nor defaults set one.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown profile '{0}'")]
    UnknownProfile(String),

    #[error("profile '{profile}' has no usable credentials")]
    NoCredentials { profile: String },

    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("could not read {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("could not serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config layering failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// Boxed by hand since figment::Error is too large for a plain #[from].
impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Config file shape ───────────────────────────────────────────────

/// The whole config file: a default profile name, option defaults, and
/// the `[profiles.*]` tables.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when `--profile` is not given.
    pub default_profile: Option<String>,

    /// Fallbacks for output, color, TLS and timeout options.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named panel servers.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        let defaults = Defaults::default();
        Self {
            default_profile: Some(String::from("default")),
            defaults,
            profiles: HashMap::default(),
        }
    }
}

impl Config {
    /// Look up a profile by explicit name, falling back to the default.
    ///
    /// Commands that can run without any configuration (`ping` against an
    /// explicit `--server`) tolerate the `UnknownProfile` error; everything
    /// else reports it.
    pub fn profile<'a>(
        &'a self,
        name: Option<&'a str>,
    ) -> Result<(&'a str, &'a Profile), ConfigError> {
        let name = name
            .or(self.default_profile.as_deref())
            .unwrap_or("default");
        self.profiles
            .get(name)
            .map(|p| (name, p))
            .ok_or_else(|| ConfigError::UnknownProfile(name.into()))
    }
}

/// The `[defaults]` table. A partially written table keeps the built-in
/// value for whichever keys it leaves out.
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct Defaults {
    pub output: String,
    pub color: String,
    pub insecure: bool,
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: String::from("table"),
            color: String::from("auto"),
            insecure: false,
            timeout: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// One `[profiles.<name>]` table.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Profile {
    /// Panel base URL (e.g., "https://panel.example.com:8080").
    pub server: String,

    /// Username to log in as.
    pub username: Option<String>,

    /// Password in the clear. The keyring or an env var is preferred.
    pub password: Option<String>,

    /// CA bundle for a panel with a private certificate authority.
    pub ca_cert: Option<PathBuf>,

    /// Accept invalid TLS certificates for this server.
    pub insecure: Option<bool>,

    /// Per-profile request timeout in seconds.
    pub timeout: Option<u64>,
}

// ── File paths ──────────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "panelops", "panelops").map_or_else(
        || home_fallback().join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// The session cache lives beside the config file.
pub fn session_path() -> PathBuf {
    let mut p = config_path();
    p.set_file_name("session.toml");
    p
}

fn home_fallback() -> PathBuf {
    let home = std::env::var_os("HOME").map_or_else(|| PathBuf::from("."), PathBuf::from);
    home.join(".config").join("panelops")
}

// ── Config loading and saving ───────────────────────────────────────

/// Layer the config: built-in defaults, then the file, then `PANELOPS_*`
/// environment variables on top.
pub fn load_config() -> Result<Config, ConfigError> {
    let layered = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(config_path()))
        .merge(Env::prefixed("PANELOPS_").split("_"));
    Ok(layered.extract()?)
}

/// Like [`load_config`], but an unreadable or absent file yields the
/// built-in defaults instead of an error.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

/// Write the config back to its canonical path as pretty TOML.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    write_toml(&config_path(), &toml::to_string_pretty(cfg)?)
}

fn write_toml(path: &Path, body: &str) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, body)?;
    Ok(())
}

// ── Credential resolution (without CLI flags) ───────────────────────

/// Resolve a login username for a profile.
pub fn resolve_username(profile: &Profile, profile_name: &str) -> Result<String, ConfigError> {
    profile
        .username
        .clone()
        .or_else(|| std::env::var("PANELOPS_USERNAME").ok())
        .ok_or_else(|| ConfigError::NoCredentials {
            profile: profile_name.into(),
        })
}

/// Password lookup order: environment variable, system keyring, then
/// the profile's plaintext field.
pub fn resolve_password(
    profile: &Profile,
    profile_name: &str,
) -> Result<SecretString, ConfigError> {
    if let Ok(pw) = std::env::var("PANELOPS_PASSWORD") {
        return Ok(SecretString::from(pw));
    }

    let keyring_hit = keyring::Entry::new("panelops", &format!("{profile_name}/password"))
        .and_then(|entry| entry.get_password());
    if let Ok(pw) = keyring_hit {
        return Ok(SecretString::from(pw));
    }

    profile
        .password
        .clone()
        .map(SecretString::from)
        .ok_or_else(|| ConfigError::NoCredentials {
            profile: profile_name.into(),
        })
}

// ── Transport ───────────────────────────────────────────────────────

/// Validate and parse a profile's server URL.
pub fn server_url(profile: &Profile) -> Result<url::Url, ConfigError> {
    profile.server.parse().map_err(|_| ConfigError::Validation {
        field: "server".into(),
        reason: format!("invalid URL: {}", profile.server),
    })
}

/// Build a `TransportConfig` from a profile alone, with no CLI flag
/// overrides. This is what the TUI connects with.
pub fn profile_to_transport(profile: &Profile) -> TransportConfig {
    let tls = if profile.insecure.unwrap_or(false) {
        TlsMode::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsMode::CustomCa(ca_path.clone())
    } else {
        TlsMode::System
    };

    TransportConfig {
        tls,
        timeout: Duration::from_secs(profile.timeout.unwrap_or(DEFAULT_TIMEOUT_SECS)),
    }
}

// ── Session cache ───────────────────────────────────────────────────

/// Persisted login state: the bearer token plus enough identity to
/// show "logged in as ..." without a round-trip.
///
/// Stored as TOML beside the config file, owner-readable only. The
/// `server` field pins the token to the server it was issued by; a
/// cache for a different server is ignored rather than replayed.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionCache {
    pub server: String,
    pub token: String,
    pub user_id: i64,
    pub username: String,
    pub email: String,
    pub role: String,
    pub saved_at: DateTime<Utc>,
}

impl SessionCache {
    /// Capture the current login for persistence.
    pub fn new(server: &url::Url, token: impl Into<String>, user: &User) -> Self {
        Self {
            server: server.as_str().trim_end_matches('/').to_owned(),
            token: token.into(),
            user_id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            role: String::from(user.role.clone()),
            saved_at: Utc::now(),
        }
    }

    /// True when this cache was issued by `server`.
    pub fn matches_server(&self, server: &url::Url) -> bool {
        self.server == server.as_str().trim_end_matches('/')
    }

    /// Rebuild the identity half of the session.
    pub fn user(&self) -> User {
        User {
            id: self.user_id,
            username: self.username.clone(),
            email: self.email.clone(),
            role: Role::from(self.role.clone()),
            ..User::default()
        }
    }
}

/// Persist the session cache at the canonical path.
pub fn save_session(cache: &SessionCache) -> Result<(), ConfigError> {
    write_session_file(&session_path(), cache)
}

/// Load the cached session, `None` when nobody is logged in.
pub fn load_session() -> Result<Option<SessionCache>, ConfigError> {
    read_session_file(&session_path())
}

/// Remove the session cache. Removing an absent cache is not an error.
pub fn clear_session() -> Result<(), ConfigError> {
    match std::fs::remove_file(session_path()) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err.into()),
    }
}

fn write_session_file(path: &Path, cache: &SessionCache) -> Result<(), ConfigError> {
    write_toml(path, &toml::to_string_pretty(cache)?)?;

    // The file holds a live bearer token.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    }

    Ok(())
}

fn read_session_file(path: &Path) -> Result<Option<SessionCache>, ConfigError> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err.into()),
    };
    let cache = toml::from_str(&raw).map_err(|err| ConfigError::Parse {
        path: path.to_owned(),
        reason: err.to_string(),
    })?;
    Ok(Some(cache))
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample_cache() -> SessionCache {
        let server = url::Url::parse("https://panel.example.com:8080/").unwrap();
        let user = User {
            id: 3,
            username: "admin".into(),
            email: "admin@example.com".into(),
            role: Role::Admin,
            ..User::default()
        };
        SessionCache::new(&server, "tok-abc", &user)
    }

    #[test]
    fn test_session_cache_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.toml");

        write_session_file(&path, &sample_cache()).unwrap();
        let restored = read_session_file(&path).unwrap().unwrap();

        assert_eq!(restored.token, "tok-abc");
        assert_eq!(restored.username, "admin");
        let user = restored.user();
        assert_eq!(user.id, 3);
        assert!(user.role.is_admin());
    }

    #[test]
    fn test_missing_session_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = read_session_file(&dir.path().join("session.toml")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_session_is_pinned_to_its_server() {
        let cache = sample_cache();
        let same = url::Url::parse("https://panel.example.com:8080").unwrap();
        let other = url::Url::parse("https://other.example.com:8080").unwrap();
        assert!(cache.matches_server(&same));
        assert!(!cache.matches_server(&other));
    }

    #[cfg(unix)]
    #[test]
    fn test_session_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.toml");
        write_session_file(&path, &sample_cache()).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_profile_lookup_falls_back_to_default() {
        let mut cfg = Config::default();
        cfg.profiles.insert(
            "default".into(),
            Profile {
                server: "https://panel.example.com".into(),
                ..Profile::default()
            },
        );

        let (name, profile) = cfg.profile(None).unwrap();
        assert_eq!(name, "default");
        assert_eq!(profile.server, "https://panel.example.com");

        let missing = cfg.profile(Some("staging"));
        assert!(matches!(missing, Err(ConfigError::UnknownProfile(_))));
    }

    #[test]
    fn test_partial_defaults_table_keeps_builtins() {
        let partial: Defaults = toml::from_str("output = \"json\"").unwrap();
        assert_eq!(partial.output, "json");
        assert_eq!(partial.color, "auto");
        assert_eq!(partial.timeout, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_plaintext_password_is_last_resort() {
        use secrecy::ExposeSecret;

        let profile = Profile {
            server: "https://panel.example.com".into(),
            password: Some("hunter2".into()),
            ..Profile::default()
        };
        // No env var and nothing in the keyring for this made-up profile
        // name, so resolution lands on the plaintext field.
        let secret = resolve_password(&profile, "cfg-test-no-such-profile").unwrap();
        assert_eq!(secret.expose_secret(), "hunter2");
    }

    #[test]
    fn test_insecure_profile_builds_permissive_transport() {
        let profile = Profile {
            server: "https://panel.example.com".into(),
            insecure: Some(true),
            timeout: Some(5),
            ..Profile::default()
        };
        let transport = profile_to_transport(&profile);
        assert!(matches!(transport.tls, TlsMode::DangerAcceptInvalid));
        assert_eq!(transport.timeout, Duration::from_secs(5));
    }
}
