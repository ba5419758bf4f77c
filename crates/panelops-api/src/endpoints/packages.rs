// Hosting package endpoints (admin-gated)

use tracing::debug;

use crate::client::{Ack, Created, PanelClient};
use crate::error::Error;
use crate::models::{NewPackage, Package, PackageUpdate};

impl PanelClient {
    /// List all packages.
    ///
    /// `GET /packages`
    pub async fn list_packages(&self) -> Result<Vec<Package>, Error> {
        self.get("/packages").await
    }

    /// Fetch one package by id.
    ///
    /// `GET /packages/:id`
    pub async fn get_package(&self, id: i64) -> Result<Package, Error> {
        self.get(&format!("/packages/{id}")).await
    }

    /// Create a package.
    ///
    /// `POST /packages`
    pub async fn create_package(&self, package: &NewPackage) -> Result<Created, Error> {
        debug!(name = package.name, "creating package");
        self.post_created("/packages", package).await
    }

    /// Partially update a package. Quota changes apply to accounts on
    /// the package at the backend's discretion.
    ///
    /// `PUT /packages/:id`
    pub async fn update_package(&self, id: i64, update: &PackageUpdate) -> Result<Ack, Error> {
        debug!(id, "updating package");
        self.put_ack(&format!("/packages/{id}"), update).await
    }

    /// Delete a package. The backend refuses while accounts still use it.
    ///
    /// `DELETE /packages/:id`
    pub async fn delete_package(&self, id: i64) -> Result<Ack, Error> {
        debug!(id, "deleting package");
        self.delete_ack(&format!("/packages/{id}")).await
    }
}
