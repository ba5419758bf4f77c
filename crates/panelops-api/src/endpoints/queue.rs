// Task queue endpoints
//
// The snapshot fetch is the poll target of `panelops-core`'s monitor;
// flush is the one mutation. Neither call inspects the payload beyond
// envelope handling -- stale-data policy lives in the monitor.

use tracing::debug;

use crate::client::{Ack, PanelClient};
use crate::error::Error;
use crate::models::QueueSnapshot;

impl PanelClient {
    /// Fetch one complete queue snapshot (mail queue, cron jobs,
    /// pending task count).
    ///
    /// `GET /server/queue`
    pub async fn queue_status(&self) -> Result<QueueSnapshot, Error> {
        self.get("/server/queue").await
    }

    /// Ask the backend to flush the mail queue.
    ///
    /// `POST /server/queue/flush` (no body)
    pub async fn flush_mail_queue(&self) -> Result<Ack, Error> {
        debug!("flushing mail queue");
        self.post_empty_ack("/server/queue/flush").await
    }
}
