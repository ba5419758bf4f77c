//! Data bridge — forwards backend state into the TUI action loop.
//!
//! Runs as a background task: starts the queue monitor, watches session
//! lifecycle events, and refetches dashboard stats on the same cadence,
//! forwarding every change as an [`Action`] through the action channel.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use panelops_core::{DEFAULT_POLL_PERIOD, PanelClient, QueueMonitor, SessionEvent};

use crate::action::Action;

/// Banner text when a dashboard fetch fails without a usable message.
pub const DASHBOARD_ERROR_FALLBACK: &str = "failed to fetch dashboard stats";

/// Spawn the bridge task. Cancelling the token shuts it down and stops
/// the queue monitor on the way out.
pub fn spawn(
    client: PanelClient,
    monitor: Arc<QueueMonitor>,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    tokio::spawn(async move {
        let mut queue_rx = monitor.subscribe();
        let mut session_rx = client.session_events();

        monitor.start();

        // Dashboard refresh shares the queue cadence. The first tick
        // fires immediately, so both screens populate right away.
        let mut ticker = tokio::time::interval(DEFAULT_POLL_PERIOD);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;

                () = cancel.cancelled() => break,

                _ = ticker.tick() => {
                    let client = client.clone();
                    let tx = action_tx.clone();
                    tokio::spawn(async move { fetch_dashboard(&client, &tx).await });
                }

                changed = queue_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let state = queue_rx.borrow_and_update().clone();
                    let _ = action_tx.send(Action::QueueChanged(Box::new(state)));
                }

                changed = session_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    if *session_rx.borrow_and_update() == SessionEvent::Expired {
                        warn!("session expired, telling the UI to shut down");
                        let _ = action_tx.send(Action::SessionExpired);
                    }
                }
            }
        }

        monitor.stop();
        debug!("bridge shut down");
    });
}

/// One dashboard fetch. Auth failures are left to the session watcher;
/// anything else surfaces as a banner on the dashboard screen.
async fn fetch_dashboard(client: &PanelClient, tx: &mpsc::UnboundedSender<Action>) {
    match client.dashboard_stats().await {
        Ok(stats) => {
            let _ = tx.send(Action::DashboardUpdated(Box::new(stats)));
        }
        Err(err) if err.is_auth_expired() => {}
        Err(err) => {
            warn!("dashboard fetch failed: {err}");
            let banner = err
                .panel_message()
                .map_or_else(|| DASHBOARD_ERROR_FALLBACK.to_owned(), str::to_owned);
            let _ = tx.send(Action::DashboardFailed(banner));
        }
    }
}
