// User management endpoints (admin-gated)

use tracing::debug;

use crate::client::{Ack, Created, PanelClient};
use crate::error::Error;
use crate::models::{NewUser, User, UserUpdate};

impl PanelClient {
    /// List all panel users.
    ///
    /// `GET /users`
    pub async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.get("/users").await
    }

    /// Fetch one user by id.
    ///
    /// `GET /users/:id`
    pub async fn get_user(&self, id: i64) -> Result<User, Error> {
        self.get(&format!("/users/{id}")).await
    }

    /// Create a user.
    ///
    /// `POST /users` with `{username, email, password, role}`
    pub async fn create_user(&self, user: &NewUser) -> Result<Created, Error> {
        debug!(username = user.username, "creating user");
        self.post_created("/users", user).await
    }

    /// Partially update a user. Absent fields are left untouched.
    ///
    /// `PUT /users/:id`
    pub async fn update_user(&self, id: i64, update: &UserUpdate) -> Result<Ack, Error> {
        debug!(id, "updating user");
        self.put_ack(&format!("/users/{id}"), update).await
    }

    /// Delete a user.
    ///
    /// `DELETE /users/:id`
    pub async fn delete_user(&self, id: i64) -> Result<Ack, Error> {
        debug!(id, "deleting user");
        self.delete_ack(&format!("/users/{id}")).await
    }
}
