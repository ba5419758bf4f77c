// Domain endpoints
//
// Owner-scoped: non-admins only see and mutate their own domains; the
// backend answers 403 for anything else.

use tracing::debug;

use crate::client::{Ack, Created, PanelClient};
use crate::error::Error;
use crate::models::{Domain, DomainUpdate, NewDomain};

impl PanelClient {
    /// List visible domains.
    ///
    /// `GET /domains`
    pub async fn list_domains(&self) -> Result<Vec<Domain>, Error> {
        self.get("/domains").await
    }

    /// Fetch one domain by id.
    ///
    /// `GET /domains/:id`
    pub async fn get_domain(&self, id: i64) -> Result<Domain, Error> {
        self.get(&format!("/domains/{id}")).await
    }

    /// Create a domain. When `document_root` is absent the backend
    /// defaults it to `/home/<user>/public_html/<name>`.
    ///
    /// `POST /domains` with `{name, document_root?}`
    pub async fn create_domain(&self, domain: &NewDomain) -> Result<Created, Error> {
        debug!(name = domain.name, "creating domain");
        self.post_created("/domains", domain).await
    }

    /// Partially update a domain.
    ///
    /// `PUT /domains/:id`
    pub async fn update_domain(&self, id: i64, update: &DomainUpdate) -> Result<Ack, Error> {
        debug!(id, "updating domain");
        self.put_ack(&format!("/domains/{id}"), update).await
    }

    /// Delete a domain.
    ///
    /// `DELETE /domains/:id`
    pub async fn delete_domain(&self, id: i64) -> Result<Ack, Error> {
        debug!(id, "deleting domain");
        self.delete_ack(&format!("/domains/{id}")).await
    }
}
