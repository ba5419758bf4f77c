// Panel API wire types
//
// Models for the panel's `/api/v1` JSON contract. Every response is wrapped
// in the `ApiEnvelope<T>` envelope. Fields use `#[serde(default)]` liberally
// because the backend is inconsistent about field presence across versions,
// and each entity carries a `flatten` catch-all for undocumented fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Response Envelope ────────────────────────────────────────────────

/// Standard panel API response envelope.
///
/// Every endpoint wraps its payload:
/// ```json
/// { "success": true, "data": { ... }, "message": "optional", "error": "optional" }
/// ```
/// On failure `success` is `false` and `error` carries the reason.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Payload of create responses: `{ "id": 42 }`.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct CreatedId {
    pub id: i64,
}

// ── Auth ─────────────────────────────────────────────────────────────

/// Body of `POST /auth/login`.
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Payload of a successful login: the bearer token plus the identity
/// it belongs to.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

/// Panel user role. Admin unlocks the user/package/account/system routes.
///
/// Open vocabulary: unknown roles survive round-trips in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString)]
#[serde(from = "String", into = "String")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    Admin,
    User,
    #[strum(default)]
    Other(String),
}

impl Default for Role {
    fn default() -> Self {
        Self::User
    }
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        s.parse().unwrap_or_else(|_| Self::Other(s))
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.to_string()
    }
}

impl Role {
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

// ── Users ────────────────────────────────────────────────────────────

/// Panel user account. The backend never returns password material.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub parent_id: Option<i64>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Body of `POST /users`.
#[derive(Debug, Serialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Body of `PUT /users/:id`. Partial update: absent fields stay untouched.
#[derive(Debug, Default, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

// ── Packages ─────────────────────────────────────────────────────────

/// Hosting plan: quotas and limits applied to accounts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Package {
    pub id: i64,
    pub name: String,
    /// Megabytes.
    #[serde(default)]
    pub disk_quota: i64,
    /// Megabytes per month.
    #[serde(default)]
    pub bandwidth_quota: i64,
    #[serde(default)]
    pub max_domains: i64,
    #[serde(default)]
    pub max_databases: i64,
    #[serde(default)]
    pub max_emails: i64,
    #[serde(default)]
    pub max_ftp: i64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Body of `POST /packages`.
#[derive(Debug, Default, Serialize)]
pub struct NewPackage {
    pub name: String,
    pub disk_quota: i64,
    pub bandwidth_quota: i64,
    pub max_domains: i64,
    pub max_databases: i64,
    pub max_emails: i64,
    pub max_ftp: i64,
}

/// Body of `PUT /packages/:id`. Partial update.
#[derive(Debug, Default, Serialize)]
pub struct PackageUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disk_quota: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bandwidth_quota: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_domains: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_databases: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_emails: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_ftp: Option<i64>,
}

// ── Domains ──────────────────────────────────────────────────────────

/// Hosted domain.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Domain {
    pub id: i64,
    #[serde(default)]
    pub user_id: i64,
    pub name: String,
    #[serde(default)]
    pub document_root: String,
    #[serde(default)]
    pub ssl_enabled: bool,
    #[serde(default)]
    pub ssl_expiry: Option<DateTime<Utc>>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Body of `POST /domains`. The backend defaults the document root to
/// `/home/<user>/public_html/<name>` when none is given.
#[derive(Debug, Serialize)]
pub struct NewDomain {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_root: Option<String>,
}

/// Body of `PUT /domains/:id`. Partial update.
#[derive(Debug, Default, Serialize)]
pub struct DomainUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_root: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssl_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

// ── Databases ────────────────────────────────────────────────────────

/// Provisioned database.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Database {
    pub id: i64,
    #[serde(default)]
    pub user_id: i64,
    pub name: String,
    /// Engine, e.g. `mysql` or `postgresql`.
    #[serde(default, rename = "type")]
    pub kind: String,
    /// Bytes on disk as reported by the backend.
    #[serde(default)]
    pub size: i64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Body of `POST /databases`. The backend defaults `type` to `mysql`.
#[derive(Debug, Serialize)]
pub struct NewDatabase {
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// Body of `PUT /databases/:id`. Partial update.
#[derive(Debug, Default, Serialize)]
pub struct DatabaseUpdate {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

// ── Accounts ─────────────────────────────────────────────────────────

/// Hosting account: a user joined to a primary domain and a package.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub package_id: i64,
    #[serde(default)]
    pub package_name: Option<String>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Body of `POST /accounts`.
#[derive(Debug, Serialize)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub password: String,
    pub domain: String,
    pub package_id: i64,
}

/// Body of `PUT /accounts/:id`. Partial update.
#[derive(Debug, Default, Serialize)]
pub struct AccountUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_id: Option<i64>,
}

// ── Dashboard / system ───────────────────────────────────────────────

/// Aggregate counters for the dashboard, with live system metrics when
/// the backend has them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub total_domains: u64,
    #[serde(default)]
    pub total_databases: u64,
    #[serde(default)]
    pub total_emails: u64,
    #[serde(default)]
    pub system_stats: Option<SystemStats>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Host resource usage sampled by the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SystemStats {
    /// Percent, 0..=100.
    #[serde(default)]
    pub cpu_usage: f64,
    /// Bytes.
    #[serde(default)]
    pub memory_total: u64,
    #[serde(default)]
    pub memory_used: u64,
    #[serde(default)]
    pub disk_total: u64,
    #[serde(default)]
    pub disk_used: u64,
    #[serde(default)]
    pub load_average: Vec<f64>,
}

/// One managed service from `GET /system/services`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub name: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ── Task queue ───────────────────────────────────────────────────────

/// One complete poll of `GET /server/queue`. Replaced wholesale on every
/// refresh; never patched in place.
///
/// `mail_queue_count` is the backend's own count and may differ from
/// `mail_queue.len()` when the returned list is capped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueueSnapshot {
    #[serde(default)]
    pub mail_queue: Vec<MailQueueItem>,
    #[serde(default)]
    pub mail_queue_count: u64,
    #[serde(default)]
    pub cron_jobs: Vec<CronJob>,
    #[serde(default)]
    pub pending_tasks: u64,
}

/// One message sitting in the mail queue. `size` and `time` arrive
/// pre-formatted for display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MailQueueItem {
    pub id: String,
    #[serde(default)]
    pub sender: String,
    #[serde(default)]
    pub recipient: String,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub status: DeliveryStatus,
}

/// Mail delivery state reported by the backend.
///
/// Open vocabulary: `deferred` gets special treatment (temporary failure
/// awaiting retry); anything unrecognized lands in `Other` verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString)]
#[serde(from = "String", into = "String")]
#[strum(serialize_all = "lowercase")]
pub enum DeliveryStatus {
    Queued,
    Deferred,
    #[strum(default)]
    Other(String),
}

impl Default for DeliveryStatus {
    fn default() -> Self {
        Self::Queued
    }
}

impl From<String> for DeliveryStatus {
    fn from(s: String) -> Self {
        s.parse().unwrap_or_else(|_| Self::Other(s))
    }
}

impl From<DeliveryStatus> for String {
    fn from(status: DeliveryStatus) -> Self {
        status.to_string()
    }
}

impl DeliveryStatus {
    pub fn is_deferred(&self) -> bool {
        matches!(self, Self::Deferred)
    }
}

/// One scheduled cron entry. All fields are display strings; the client
/// never parses schedules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CronJob {
    pub user: String,
    pub schedule: String,
    pub command: String,
    #[serde(default)]
    pub next_run: String,
}

/// Payload of `GET /health`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HealthInfo {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub version: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn envelope_parses_error_shape() {
        let env: ApiEnvelope<QueueSnapshot> =
            serde_json::from_str(r#"{"success":false,"error":"permission denied"}"#).unwrap();
        assert!(!env.success);
        assert_eq!(env.error.as_deref(), Some("permission denied"));
        assert!(env.data.is_none());
    }

    #[test]
    fn delivery_status_recognizes_deferred() {
        let status: DeliveryStatus = serde_json::from_str(r#""deferred""#).unwrap();
        assert!(status.is_deferred());
    }

    #[test]
    fn delivery_status_preserves_unknown_values() {
        let status: DeliveryStatus = serde_json::from_str(r#""greylisted""#).unwrap();
        assert_eq!(status, DeliveryStatus::Other("greylisted".into()));
        assert_eq!(serde_json::to_string(&status).unwrap(), r#""greylisted""#);
    }

    #[test]
    fn role_round_trips_unknown() {
        let role: Role = serde_json::from_str(r#""reseller""#).unwrap();
        assert_eq!(role, Role::Other("reseller".into()));
        assert!(!role.is_admin());
        assert_eq!(serde_json::to_string(&role).unwrap(), r#""reseller""#);
    }

    #[test]
    fn queue_snapshot_count_independent_of_list() {
        let snap: QueueSnapshot = serde_json::from_str(
            r#"{"mail_queue":[],"mail_queue_count":5,"cron_jobs":[],"pending_tasks":0}"#,
        )
        .unwrap();
        assert_eq!(snap.mail_queue_count, 5);
        assert!(snap.mail_queue.is_empty());
    }

    #[test]
    fn sparse_snapshot_defaults_clean() {
        let snap: QueueSnapshot = serde_json::from_str("{}").unwrap();
        assert_eq!(snap, QueueSnapshot::default());
    }

    #[test]
    fn partial_update_skips_absent_fields() {
        let update = UserUpdate {
            active: Some(false),
            ..UserUpdate::default()
        };
        assert_eq!(
            serde_json::to_string(&update).unwrap(),
            r#"{"active":false}"#
        );
    }

    #[test]
    fn database_kind_uses_wire_name() {
        let body = serde_json::to_string(&NewDatabase {
            name: "shop".into(),
            kind: Some("postgresql".into()),
        })
        .unwrap();
        assert_eq!(body, r#"{"name":"shop","type":"postgresql"}"#);
    }
}
