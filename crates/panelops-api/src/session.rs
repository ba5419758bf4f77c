// ── Session store ───────────────────────────────────────────────────
//
// Holds the bearer token and the authenticated user's identity behind a
// single atomic cell. The gateway reads it on every outbound request and
// clears it on 401; login/logout write it. Both fields live in one
// allocation so a swap replaces or removes them together: no reader can
// ever observe a token without its user or vice versa.

use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwapOption;

use crate::models::User;

/// One authenticated session: the bearer token plus who it belongs to.
pub struct Session {
    pub token: String,
    pub user: User,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("user", &self.user.username)
            .finish()
    }
}

/// Shared handle to the current session.
///
/// Cheap to clone; all clones observe the same state. Lock-free reads,
/// atomic writes. `clear` is idempotent: clearing an empty store is a
/// no-op, and concurrent clears collapse to one.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<ArcSwapOption<Session>>,
}

impl SessionStore {
    /// Create an empty store (no session).
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a session, replacing any previous one in a single swap.
    pub fn set(&self, token: impl Into<String>, user: User) {
        self.inner.store(Some(Arc::new(Session {
            token: token.into(),
            user,
        })));
    }

    /// Remove the session. Token and user disappear together.
    pub fn clear(&self) {
        self.inner.store(None);
    }

    /// The current bearer token, if a session is active.
    pub fn token(&self) -> Option<String> {
        self.inner.load().as_ref().map(|s| s.token.clone())
    }

    /// The authenticated user, if a session is active.
    pub fn user(&self) -> Option<User> {
        self.inner.load().as_ref().map(|s| s.user.clone())
    }

    /// Snapshot of the whole session (token + user from the same swap).
    pub fn session(&self) -> Option<Arc<Session>> {
        self.inner.load_full()
    }

    /// Whether a session is currently active.
    pub fn is_authenticated(&self) -> bool {
        self.inner.load().is_some()
    }
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn admin() -> User {
        User {
            id: 1,
            username: "admin".into(),
            ..User::default()
        }
    }

    #[test]
    fn empty_store_has_no_token_or_user() {
        let store = SessionStore::new();
        assert!(store.token().is_none());
        assert!(store.user().is_none());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn set_makes_both_fields_visible() {
        let store = SessionStore::new();
        store.set("tok-123", admin());
        assert_eq!(store.token().unwrap(), "tok-123");
        assert_eq!(store.user().unwrap().username, "admin");
        assert!(store.is_authenticated());
    }

    #[test]
    fn clear_removes_both_fields() {
        let store = SessionStore::new();
        store.set("tok-123", admin());
        store.clear();
        assert!(store.token().is_none());
        assert!(store.user().is_none());
    }

    #[test]
    fn clear_is_idempotent() {
        let store = SessionStore::new();
        store.clear();
        store.set("tok-123", admin());
        store.clear();
        store.clear();
        assert!(!store.is_authenticated());
    }

    #[test]
    fn clones_share_state() {
        let store = SessionStore::new();
        let other = store.clone();
        store.set("tok-123", admin());
        assert_eq!(other.token().unwrap(), "tok-123");
        other.clear();
        assert!(!store.is_authenticated());
    }

    #[test]
    fn snapshot_is_internally_consistent() {
        let store = SessionStore::new();
        store.set("tok-123", admin());
        let snap = store.session().unwrap();
        assert_eq!(snap.token, "tok-123");
        assert_eq!(snap.user.username, "admin");
    }
}
