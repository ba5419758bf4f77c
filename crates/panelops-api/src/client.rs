// Panel API HTTP client
//
// Wraps `reqwest::Client` with panel-specific URL construction, bearer
// injection, and envelope unwrapping. Every request the crate makes goes
// through this single chokepoint; endpoint modules (users, domains, etc.)
// are implemented as inherent methods in separate files to keep this
// module focused on transport mechanics.
//
// 401 handling is global: the session store is cleared and a
// `SessionEvent::Expired` is published *before* the error is returned,
// so no caller can observe a rejected response while the local session
// still looks valid.

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::watch;
use tracing::{debug, warn};
use url::Url;

use crate::error::Error;
use crate::models::{ApiEnvelope, CreatedId, User};
use crate::session::SessionStore;
use crate::transport::TransportConfig;

/// Lifecycle of the client session, published on a watch channel.
///
/// Subscribers (the TUI, a long-running watch loop) use this in place of
/// browser-style forced navigation: when the value turns `Expired`, the
/// session-bound surface must stop and return the operator to login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// No authenticated session (startup, or after an explicit logout).
    LoggedOut,
    /// A session is active.
    Active,
    /// The backend answered 401; the local session has been cleared.
    Expired,
}

/// Result of a create call: the new entity id plus the backend's
/// human-readable message.
#[derive(Debug, Clone)]
pub struct Created {
    pub id: Option<i64>,
    pub message: Option<String>,
}

/// Result of a non-create mutation (update, delete, flush, restart).
#[derive(Debug, Clone)]
pub struct Ack {
    pub message: Option<String>,
}

/// HTTP client for the panel's `/api/v1` API.
///
/// Cheap to clone; clones share the connection pool, the session store,
/// and the session event channel. Holds no retry logic: every failure
/// surfaces to the caller exactly once.
#[derive(Clone)]
pub struct PanelClient {
    http: reqwest::Client,
    base_url: Url,
    session: SessionStore,
    events: watch::Sender<SessionEvent>,
}

impl PanelClient {
    /// Create a client from a `TransportConfig` and an existing session
    /// store (which may already hold a restored session).
    pub fn new(
        base_url: Url,
        transport: &TransportConfig,
        session: SessionStore,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, base_url, session))
    }

    /// Create a client around a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url, session: SessionStore) -> Self {
        let initial = if session.is_authenticated() {
            SessionEvent::Active
        } else {
            SessionEvent::LoggedOut
        };
        let (events, _) = watch::channel(initial);
        Self {
            http,
            base_url,
            session,
            events,
        }
    }

    /// The session store this client reads its bearer token from.
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// The panel base URL (scheme + host, without `/api/v1`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Subscribe to session lifecycle changes.
    pub fn session_events(&self) -> watch::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Install a session after a successful login.
    pub(crate) fn install_session(&self, token: &str, user: User) {
        self.session.set(token, user);
        let _ = self.events.send(SessionEvent::Active);
    }

    /// Drop the session on explicit logout.
    pub(crate) fn drop_session(&self) {
        self.session.clear();
        let _ = self.events.send(SessionEvent::LoggedOut);
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Build a full URL for an API path: `{base}/api/v1{path}`.
    /// `path` starts with `/`, e.g. `/server/queue`.
    pub(crate) fn api_url(&self, path: &str) -> Result<Url, Error> {
        let full = format!(
            "{}/api/v1{path}",
            self.base_url.as_str().trim_end_matches('/')
        );
        Ok(Url::parse(&full)?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and unwrap the envelope's `data`.
    pub(crate) async fn get<T: DeserializeOwned + Default>(&self, path: &str) -> Result<T, Error> {
        let (env, body) = self.request::<T, ()>(Method::GET, path, None).await?;
        Self::require_data(env, body)
    }

    /// Send a POST request with a JSON body and unwrap the envelope's `data`.
    pub(crate) async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, Error>
    where
        T: DeserializeOwned + Default,
        B: Serialize,
    {
        let (env, raw) = self.request::<T, B>(Method::POST, path, Some(body)).await?;
        Self::require_data(env, raw)
    }

    /// POST a JSON body to a create endpoint; returns the new id and the
    /// backend's message.
    pub(crate) async fn post_created<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Created, Error> {
        let (env, _) = self
            .request::<CreatedId, B>(Method::POST, path, Some(body))
            .await?;
        Ok(Created {
            id: env.data.map(|d| d.id),
            message: env.message,
        })
    }

    /// POST with a JSON body where only the acknowledgement matters.
    pub(crate) async fn post_ack<B: Serialize>(&self, path: &str, body: &B) -> Result<Ack, Error> {
        let (env, _) = self
            .request::<serde_json::Value, B>(Method::POST, path, Some(body))
            .await?;
        Ok(Ack {
            message: env.message,
        })
    }

    /// POST without a body where only the acknowledgement matters
    /// (flush, suspend, restart, logout).
    pub(crate) async fn post_empty_ack(&self, path: &str) -> Result<Ack, Error> {
        let (env, _) = self
            .request::<serde_json::Value, ()>(Method::POST, path, None)
            .await?;
        Ok(Ack {
            message: env.message,
        })
    }

    /// Send a PUT request with a JSON body; returns the acknowledgement.
    pub(crate) async fn put_ack<B: Serialize>(&self, path: &str, body: &B) -> Result<Ack, Error> {
        let (env, _) = self
            .request::<serde_json::Value, B>(Method::PUT, path, Some(body))
            .await?;
        Ok(Ack {
            message: env.message,
        })
    }

    /// Send a DELETE request; returns the acknowledgement.
    pub(crate) async fn delete_ack(&self, path: &str) -> Result<Ack, Error> {
        let (env, _) = self
            .request::<serde_json::Value, ()>(Method::DELETE, path, None)
            .await?;
        Ok(Ack {
            message: env.message,
        })
    }

    fn require_data<T>(env: ApiEnvelope<T>, body: String) -> Result<T, Error> {
        env.data.ok_or_else(|| Error::Deserialization {
            message: "response envelope has no data field".into(),
            body,
        })
    }

    /// Issue one request through both gateway stages.
    ///
    /// Outgoing: attach `Authorization: Bearer <token>` when the store
    /// holds one; a missing token is not an error. Incoming: unwrap the
    /// envelope, with the 401 teardown described at module level.
    async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<(ApiEnvelope<T>, String), Error>
    where
        T: DeserializeOwned + Default,
        B: Serialize,
    {
        let url = self.api_url(path)?;
        debug!("{method} {url}");

        let mut req = self.http.request(method, url);
        if let Some(token) = self.session.token() {
            req = req.bearer_auth(token);
        }
        if let Some(body) = body {
            req = req.json(body);
        }

        let resp = req.send().await.map_err(Error::Transport)?;
        self.parse_envelope(resp).await
    }

    /// Parse the `{ success, data, message, error }` envelope.
    ///
    /// Exactly 401 expires the session (clear + event) before returning;
    /// every other failure is local to the call.
    async fn parse_envelope<T: DeserializeOwned + Default>(
        &self,
        resp: reqwest::Response,
    ) -> Result<(ApiEnvelope<T>, String), Error> {
        let status = resp.status();
        let body = resp.text().await.map_err(Error::Transport)?;

        if status == reqwest::StatusCode::UNAUTHORIZED {
            warn!("panel answered 401, clearing local session");
            let message = Self::body_error(&body);
            self.session.clear();
            let _ = self.events.send(SessionEvent::Expired);
            return Err(Error::AuthExpired { message });
        }

        if !status.is_success() {
            let message = Self::body_error(&body);
            return Err(match status {
                reqwest::StatusCode::FORBIDDEN => Error::PermissionDenied { message },
                reqwest::StatusCode::NOT_FOUND => Error::NotFound { message },
                _ => Error::Api {
                    status: status.as_u16(),
                    message,
                },
            });
        }

        let envelope: ApiEnvelope<T> =
            serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body: body.clone(),
            })?;

        if !envelope.success {
            return Err(Error::Api {
                status: status.as_u16(),
                message: envelope.error.or(envelope.message),
            });
        }

        Ok((envelope, body))
    }

    /// Best-effort extraction of the envelope's `error` (or `message`)
    /// from a failure body that may not even be JSON.
    fn body_error(body: &str) -> Option<String> {
        serde_json::from_str::<ApiEnvelope<serde_json::Value>>(body)
            .ok()
            .and_then(|env| env.error.or(env.message))
    }
}

impl std::fmt::Debug for PanelClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PanelClient")
            .field("base_url", &self.base_url.as_str())
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> PanelClient {
        PanelClient::with_client(
            reqwest::Client::new(),
            Url::parse(base).unwrap(),
            SessionStore::new(),
        )
    }

    #[test]
    fn api_url_joins_base_and_path() {
        let c = client("https://panel.example.com");
        assert_eq!(
            c.api_url("/server/queue").unwrap().as_str(),
            "https://panel.example.com/api/v1/server/queue"
        );
    }

    #[test]
    fn api_url_tolerates_trailing_slash() {
        let c = client("https://panel.example.com/");
        assert_eq!(
            c.api_url("/users/3").unwrap().as_str(),
            "https://panel.example.com/api/v1/users/3"
        );
    }

    #[test]
    fn initial_event_reflects_store() {
        let c = client("https://panel.example.com");
        assert_eq!(*c.session_events().borrow(), SessionEvent::LoggedOut);

        let store = SessionStore::new();
        store.set("tok", crate::models::User::default());
        let c = PanelClient::with_client(
            reqwest::Client::new(),
            Url::parse("https://panel.example.com").unwrap(),
            store,
        );
        assert_eq!(*c.session_events().borrow(), SessionEvent::Active);
    }
}
