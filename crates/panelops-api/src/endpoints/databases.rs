// Database endpoints
//
// Owner-scoped, same 403 rules as domains.

use tracing::debug;

use crate::client::{Ack, Created, PanelClient};
use crate::error::Error;
use crate::models::{Database, DatabaseUpdate, NewDatabase};

impl PanelClient {
    /// List visible databases.
    ///
    /// `GET /databases`
    pub async fn list_databases(&self) -> Result<Vec<Database>, Error> {
        self.get("/databases").await
    }

    /// Fetch one database by id.
    ///
    /// `GET /databases/:id`
    pub async fn get_database(&self, id: i64) -> Result<Database, Error> {
        self.get(&format!("/databases/{id}")).await
    }

    /// Create a database. When `type` is absent the backend defaults
    /// it to `mysql`.
    ///
    /// `POST /databases` with `{name, type?}`
    pub async fn create_database(&self, database: &NewDatabase) -> Result<Created, Error> {
        debug!(name = database.name, "creating database");
        self.post_created("/databases", database).await
    }

    /// Partially update a database.
    ///
    /// `PUT /databases/:id`
    pub async fn update_database(&self, id: i64, update: &DatabaseUpdate) -> Result<Ack, Error> {
        debug!(id, "updating database");
        self.put_ack(&format!("/databases/{id}"), update).await
    }

    /// Delete a database.
    ///
    /// `DELETE /databases/:id`
    pub async fn delete_database(&self, id: i64) -> Result<Ack, Error> {
        debug!(id, "deleting database");
        self.delete_ack(&format!("/databases/{id}")).await
    }
}
