// ── Queue monitor ───────────────────────────────────────────────────
//
// Polls `GET /server/queue` on a fixed cadence and publishes the result
// on a watch channel. One spawned task owns the timer; every tick and
// every manual refresh issues an independent fetch, and a generation
// counter resolves overlap: a response is applied only if no newer
// fetch was issued while it was in flight, and never after teardown.
//
// Failures keep the previous snapshot on screen. The published error
// string is the backend's own `error` field when it sent one, else a
// generic fallback; no retry happens beyond the cadence itself.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use panelops_api::PanelClient;
use panelops_api::models::QueueSnapshot;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::error::CoreError;

/// Default poll cadence.
pub const DEFAULT_POLL_PERIOD: Duration = Duration::from_secs(10);

/// Banner text when a fetch fails without a usable body message.
pub const FETCH_ERROR_FALLBACK: &str = "failed to fetch queue status";

/// Banner text when a flush fails without a usable body message.
pub const FLUSH_ERROR_FALLBACK: &str = "failed to flush mail queue";

/// Where the monitor currently is in its fetch cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QueuePhase {
    /// Monitor constructed, nothing fetched yet.
    #[default]
    Idle,
    /// A fetch is in flight. Any previous snapshot stays valid.
    Loading,
    /// The latest fetch succeeded.
    Ready,
    /// The latest fetch failed; `snapshot` still holds the last good data.
    Failed,
}

/// Published monitor state. `snapshot: None` means nothing has ever
/// been fetched, which renders differently from an empty result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueueState {
    pub phase: QueuePhase,
    pub snapshot: Option<QueueSnapshot>,
    pub error: Option<String>,
    pub last_refresh: Option<DateTime<Utc>>,
}

struct MonitorInner {
    client: PanelClient,
    state: watch::Sender<QueueState>,
    /// Fetch generation. Responses carrying an older value are stale
    /// and get dropped, so the latest-issued fetch always wins.
    seq: AtomicU64,
    cancel: CancellationToken,
    period: Duration,
}

/// Polling monitor for the task queue.
///
/// `start` spawns the poll loop (with an immediate first fetch), state
/// flows out through [`QueueMonitor::subscribe`], and `stop` tears the
/// timer down. In-flight HTTP calls are never aborted; their effect on
/// the published state is suppressed instead.
pub struct QueueMonitor {
    inner: Arc<MonitorInner>,
}

impl QueueMonitor {
    /// Create a monitor with the default 10s cadence. Call
    /// [`QueueMonitor::start`] to begin polling.
    pub fn new(client: PanelClient) -> Self {
        Self::with_period(client, DEFAULT_POLL_PERIOD)
    }

    /// Create a monitor with a custom cadence.
    pub fn with_period(client: PanelClient, period: Duration) -> Self {
        let (state, _) = watch::channel(QueueState::default());
        Self {
            inner: Arc::new(MonitorInner {
                client,
                state,
                seq: AtomicU64::new(0),
                cancel: CancellationToken::new(),
                period,
            }),
        }
    }

    /// Subscribe to state updates.
    pub fn subscribe(&self) -> watch::Receiver<QueueState> {
        self.inner.state.subscribe()
    }

    /// Clone of the current state.
    pub fn state(&self) -> QueueState {
        self.inner.state.borrow().clone()
    }

    /// Spawn the poll loop: one fetch right away, then one per period,
    /// unconditionally. Each tick's fetch runs as its own task so a
    /// slow response never delays the cadence.
    pub fn start(&self) {
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(inner.period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    biased;
                    () = inner.cancel.cancelled() => break,
                    _ = ticker.tick() => {
                        let inner = Arc::clone(&inner);
                        tokio::spawn(async move { inner.refresh_once().await });
                    }
                }
            }
            debug!("queue monitor stopped");
        });
    }

    /// Fetch now, outside the timer. Outcome lands in the state channel.
    pub async fn refresh(&self) {
        self.inner.refresh_once().await;
    }

    /// Flush the mail queue.
    ///
    /// On success the backend's acknowledgement message is returned and
    /// a refetch runs immediately so the view reflects the drained
    /// queue. On failure nothing about the data view changes: the error
    /// is recorded in the state's banner slot, and returned to the
    /// caller as well.
    pub async fn flush(&self) -> Result<Option<String>, CoreError> {
        match self.inner.client.flush_mail_queue().await {
            Ok(ack) => {
                self.inner.refresh_once().await;
                Ok(ack.message)
            }
            Err(err) => {
                warn!("mail queue flush failed: {err}");
                let banner = err
                    .panel_message()
                    .map_or_else(|| FLUSH_ERROR_FALLBACK.to_owned(), str::to_owned);
                self.inner.state.send_modify(|s| {
                    s.error = Some(banner);
                });
                Err(err.into())
            }
        }
    }

    /// Cancel the poll loop. Idempotent; late responses from fetches
    /// still in flight are discarded, not applied.
    pub fn stop(&self) {
        self.inner.cancel.cancel();
    }

    /// Whether `stop` has been called.
    pub fn is_stopped(&self) -> bool {
        self.inner.cancel.is_cancelled()
    }
}

impl Drop for QueueMonitor {
    fn drop(&mut self) {
        self.inner.cancel.cancel();
    }
}

impl MonitorInner {
    /// One fetch cycle: bump the generation, mark Loading, await the
    /// response, and apply it unless a newer fetch superseded this one
    /// or the monitor was stopped while it was in flight.
    async fn refresh_once(&self) {
        let seq = self.seq.fetch_add(1, Ordering::Relaxed) + 1;

        self.state.send_modify(|s| {
            s.phase = QueuePhase::Loading;
        });

        let result = self.client.queue_status().await;

        if self.cancel.is_cancelled() || self.seq.load(Ordering::Relaxed) != seq {
            debug!(seq, "discarding superseded queue fetch");
            return;
        }

        match result {
            Ok(snapshot) => {
                self.state.send_modify(|s| {
                    s.phase = QueuePhase::Ready;
                    s.snapshot = Some(snapshot);
                    s.error = None;
                    s.last_refresh = Some(Utc::now());
                });
            }
            Err(err) => {
                warn!("queue fetch failed: {err}");
                let banner = err
                    .panel_message()
                    .map_or_else(|| FETCH_ERROR_FALLBACK.to_owned(), str::to_owned);
                self.state.send_modify(|s| {
                    s.phase = QueuePhase::Failed;
                    s.error = Some(banner);
                });
            }
        }
    }
}
