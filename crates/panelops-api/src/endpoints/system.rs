// System endpoints
//
// Resource usage and service control are admin-gated; the health probe
// is the one unauthenticated route in the whole API.

use tracing::debug;

use crate::client::{Ack, PanelClient};
use crate::error::Error;
use crate::models::{HealthInfo, ServiceInfo, SystemStats};

impl PanelClient {
    /// Fetch current host resource usage.
    ///
    /// `GET /system/stats`
    pub async fn system_stats(&self) -> Result<SystemStats, Error> {
        self.get("/system/stats").await
    }

    /// List managed services and their states.
    ///
    /// `GET /system/services`
    pub async fn services(&self) -> Result<Vec<ServiceInfo>, Error> {
        self.get("/system/services").await
    }

    /// Restart one managed service by name.
    ///
    /// `POST /system/services/:name/restart`
    pub async fn restart_service(&self, name: &str) -> Result<Ack, Error> {
        debug!(name, "restarting service");
        self.post_empty_ack(&format!("/system/services/{name}/restart"))
            .await
    }

    /// Reachability probe; needs no session.
    ///
    /// `GET /health`
    pub async fn health(&self) -> Result<HealthInfo, Error> {
        self.get("/health").await
    }
}
