// Authentication endpoints
//
// Login installs the returned session into the store; logout drops it
// locally whether or not the server call succeeded, so a dead backend
// can never pin a stale token on this machine.

use tracing::debug;

use crate::client::{Ack, PanelClient};
use crate::error::Error;
use crate::models::{LoginRequest, LoginResponse, User};

impl PanelClient {
    /// Authenticate and install the returned session.
    ///
    /// `POST /auth/login` with `{username, password}`
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, Error> {
        debug!(username, "logging in");
        let resp: LoginResponse = self
            .post(
                "/auth/login",
                &LoginRequest {
                    username: username.to_owned(),
                    password: password.to_owned(),
                },
            )
            .await?;
        self.install_session(&resp.token, resp.user.clone());
        Ok(resp)
    }

    /// Fetch the identity behind the current token.
    ///
    /// `GET /auth/me`
    pub async fn me(&self) -> Result<User, Error> {
        self.get("/auth/me").await
    }

    /// Invalidate the session server-side, then drop it locally.
    ///
    /// The local drop happens even when the server call fails: the
    /// operator asked to log out, and an unreachable backend must not
    /// leave a token behind.
    ///
    /// `POST /auth/logout`
    pub async fn logout(&self) -> Result<Ack, Error> {
        debug!("logging out");
        let result = self.post_empty_ack("/auth/logout").await;
        self.drop_session();
        result
    }
}
