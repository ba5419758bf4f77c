// Hosting account endpoints (admin-gated)
//
// An account bundles a user, a primary domain, and a package. Suspend
// and unsuspend are idempotent: repeating either is a no-op the backend
// acknowledges normally.

use tracing::debug;

use crate::client::{Ack, Created, PanelClient};
use crate::error::Error;
use crate::models::{Account, AccountUpdate, NewAccount};

impl PanelClient {
    /// List all hosting accounts.
    ///
    /// `GET /accounts`
    pub async fn list_accounts(&self) -> Result<Vec<Account>, Error> {
        self.get("/accounts").await
    }

    /// Fetch one account by id.
    ///
    /// `GET /accounts/:id`
    pub async fn get_account(&self, id: i64) -> Result<Account, Error> {
        self.get(&format!("/accounts/{id}")).await
    }

    /// Provision an account: user + primary domain + package in one call.
    ///
    /// `POST /accounts` with `{username, email, password, domain, package_id}`
    pub async fn create_account(&self, account: &NewAccount) -> Result<Created, Error> {
        debug!(username = account.username, "creating account");
        self.post_created("/accounts", account).await
    }

    /// Partially update an account.
    ///
    /// `PUT /accounts/:id`
    pub async fn update_account(&self, id: i64, update: &AccountUpdate) -> Result<Ack, Error> {
        debug!(id, "updating account");
        self.put_ack(&format!("/accounts/{id}"), update).await
    }

    /// Delete an account and everything attached to it.
    ///
    /// `DELETE /accounts/:id`
    pub async fn delete_account(&self, id: i64) -> Result<Ack, Error> {
        debug!(id, "deleting account");
        self.delete_ack(&format!("/accounts/{id}")).await
    }

    /// Suspend an account (idempotent).
    ///
    /// `POST /accounts/:id/suspend`
    pub async fn suspend_account(&self, id: i64) -> Result<Ack, Error> {
        debug!(id, "suspending account");
        self.post_empty_ack(&format!("/accounts/{id}/suspend")).await
    }

    /// Lift a suspension (idempotent).
    ///
    /// `POST /accounts/:id/unsuspend`
    pub async fn unsuspend_account(&self, id: i64) -> Result<Ack, Error> {
        debug!(id, "unsuspending account");
        self.post_empty_ack(&format!("/accounts/{id}/unsuspend"))
            .await
    }
}
