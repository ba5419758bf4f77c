// Dashboard endpoint

use crate::client::PanelClient;
use crate::error::Error;
use crate::models::DashboardStats;

impl PanelClient {
    /// Fetch the aggregate counters plus live system metrics (the
    /// latter may be absent when the backend's sampler is down).
    ///
    /// `GET /dashboard/stats`
    pub async fn dashboard_stats(&self) -> Result<DashboardStats, Error> {
        self.get("/dashboard/stats").await
    }
}
