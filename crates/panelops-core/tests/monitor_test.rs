#![allow(clippy::unwrap_used)]
// Monitor behavior tests using wiremock: poll cadence, manual refresh,
// stale-data retention, flush semantics, and teardown suppression.

use std::time::Duration;

use serde_json::json;
use tokio::sync::watch;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use panelops_core::{
    FETCH_ERROR_FALLBACK, PanelClient, QueueMonitor, QueuePhase, QueueState, SessionStore,
};

// ── Helpers ─────────────────────────────────────────────────────────

const LONG_PERIOD: Duration = Duration::from_secs(3600);
const SHORT_PERIOD: Duration = Duration::from_millis(50);

async fn setup(period: Duration) -> (MockServer, QueueMonitor) {
    let server = MockServer::start().await;
    let client = PanelClient::with_client(
        reqwest::Client::new(),
        Url::parse(&server.uri()).unwrap(),
        SessionStore::new(),
    );
    (server, QueueMonitor::with_period(client, period))
}

fn queue_json(count: u64, items: usize) -> serde_json::Value {
    let mail: Vec<serde_json::Value> = (0..items)
        .map(|i| {
            json!({
                "id": format!("MSG{i}"),
                "sender": "root@host",
                "recipient": "user@example.com",
                "size": "1.0 KB",
                "time": "10:00",
                "status": "queued"
            })
        })
        .collect();
    json!({
        "success": true,
        "data": {
            "mail_queue": mail,
            "mail_queue_count": count,
            "cron_jobs": [],
            "pending_tasks": 0
        }
    })
}

async fn mount_queue(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/v1/server/queue"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Poll the watch channel until `pred` holds, or panic after 5s.
async fn wait_until(
    rx: &mut watch::Receiver<QueueState>,
    pred: impl Fn(&QueueState) -> bool,
) -> QueueState {
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            {
                let state = rx.borrow_and_update();
                if pred(&state) {
                    return state.clone();
                }
            }
            rx.changed().await.expect("monitor state channel closed");
        }
    })
    .await
    .expect("timed out waiting for monitor state")
}

fn mail_count(state: &QueueState) -> Option<u64> {
    state.snapshot.as_ref().map(|s| s.mail_queue_count)
}

// ── Fetch cycle ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_start_fetches_immediately() {
    let (server, monitor) = setup(LONG_PERIOD).await;
    mount_queue(&server, queue_json(2, 2)).await;
    let mut rx = monitor.subscribe();

    assert_eq!(monitor.state().phase, QueuePhase::Idle);
    monitor.start();

    // The period is an hour; only the immediate first fetch can get us here.
    let state = wait_until(&mut rx, |s| s.phase == QueuePhase::Ready).await;
    assert_eq!(mail_count(&state), Some(2));
    assert!(state.last_refresh.is_some());
    assert!(state.error.is_none());
}

#[tokio::test]
async fn test_timer_refetches_on_cadence() {
    let (server, monitor) = setup(SHORT_PERIOD).await;
    mount_queue(&server, queue_json(1, 1)).await;
    let mut rx = monitor.subscribe();

    monitor.start();
    wait_until(&mut rx, |s| mail_count(s) == Some(1)).await;

    // Swap the backend's answer; only a timer tick can pick it up.
    server.reset().await;
    mount_queue(&server, queue_json(7, 3)).await;

    let state = wait_until(&mut rx, |s| mail_count(s) == Some(7)).await;
    assert_eq!(state.snapshot.unwrap().mail_queue.len(), 3);
}

#[tokio::test]
async fn test_manual_refresh_outside_the_timer() {
    let (server, monitor) = setup(LONG_PERIOD).await;
    mount_queue(&server, queue_json(1, 1)).await;
    let mut rx = monitor.subscribe();

    monitor.start();
    wait_until(&mut rx, |s| mail_count(s) == Some(1)).await;

    server.reset().await;
    mount_queue(&server, queue_json(4, 2)).await;

    monitor.refresh().await;
    assert_eq!(mail_count(&monitor.state()), Some(4));
}

// ── Failure handling ────────────────────────────────────────────────

#[tokio::test]
async fn test_failure_keeps_stale_snapshot_and_surfaces_body_error() {
    let (server, monitor) = setup(LONG_PERIOD).await;
    mount_queue(&server, queue_json(5, 3)).await;
    let mut rx = monitor.subscribe();

    monitor.start();
    wait_until(&mut rx, |s| mail_count(s) == Some(5)).await;

    server.reset().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/server/queue"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "success": false,
            "error": "disk full"
        })))
        .mount(&server)
        .await;

    monitor.refresh().await;

    let state = monitor.state();
    assert_eq!(state.phase, QueuePhase::Failed);
    assert_eq!(state.error.as_deref(), Some("disk full"));
    // Stale data stays on screen.
    assert_eq!(mail_count(&state), Some(5));
    assert_eq!(state.snapshot.unwrap().mail_queue.len(), 3);
}

#[tokio::test]
async fn test_failure_without_body_message_uses_fallback() {
    let (server, monitor) = setup(LONG_PERIOD).await;
    Mock::given(method("GET"))
        .and(path("/api/v1/server/queue"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;
    let mut rx = monitor.subscribe();

    monitor.start();
    let state = wait_until(&mut rx, |s| s.phase == QueuePhase::Failed).await;

    assert_eq!(state.error.as_deref(), Some(FETCH_ERROR_FALLBACK));
    assert!(state.snapshot.is_none());
}

#[tokio::test]
async fn test_recovery_clears_the_banner() {
    let (server, monitor) = setup(LONG_PERIOD).await;
    Mock::given(method("GET"))
        .and(path("/api/v1/server/queue"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "success": false,
            "error": "transient"
        })))
        .mount(&server)
        .await;
    let mut rx = monitor.subscribe();

    monitor.start();
    wait_until(&mut rx, |s| s.phase == QueuePhase::Failed).await;

    server.reset().await;
    mount_queue(&server, queue_json(1, 1)).await;

    monitor.refresh().await;
    let state = monitor.state();
    assert_eq!(state.phase, QueuePhase::Ready);
    assert!(state.error.is_none());
}

// ── Flush ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_flush_success_refetches() {
    let (server, monitor) = setup(LONG_PERIOD).await;
    mount_queue(&server, queue_json(3, 3)).await;
    let mut rx = monitor.subscribe();

    monitor.start();
    wait_until(&mut rx, |s| mail_count(s) == Some(3)).await;

    server.reset().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/server/queue/flush"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Mail queue flushed"
        })))
        .expect(1)
        .mount(&server)
        .await;
    mount_queue(&server, queue_json(0, 0)).await;

    let message = monitor.flush().await.unwrap();
    assert_eq!(message.as_deref(), Some("Mail queue flushed"));

    // The refetch ran inside flush; the drained queue is already visible.
    let state = monitor.state();
    assert_eq!(mail_count(&state), Some(0));
    assert_eq!(state.phase, QueuePhase::Ready);
}

#[tokio::test]
async fn test_flush_failure_leaves_data_untouched() {
    let (server, monitor) = setup(LONG_PERIOD).await;
    mount_queue(&server, queue_json(3, 3)).await;
    let mut rx = monitor.subscribe();

    monitor.start();
    let before = wait_until(&mut rx, |s| mail_count(s) == Some(3)).await;

    server.reset().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/server/queue/flush"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "permission denied"
        })))
        .mount(&server)
        .await;
    // A failed flush must not trigger a refetch.
    Mock::given(method("GET"))
        .and(path("/api/v1/server/queue"))
        .respond_with(ResponseTemplate::new(200).set_body_json(queue_json(0, 0)))
        .expect(0)
        .mount(&server)
        .await;

    let result = monitor.flush().await;
    assert!(result.is_err());

    let state = monitor.state();
    // Banner carries the backend's exact words; snapshot and phase as before.
    assert_eq!(state.error.as_deref(), Some("permission denied"));
    assert_eq!(state.snapshot, before.snapshot);
    assert_eq!(state.phase, QueuePhase::Ready);

    server.verify().await;
}

// ── Teardown and supersession ───────────────────────────────────────

#[tokio::test]
async fn test_stop_halts_the_timer() {
    let (server, monitor) = setup(SHORT_PERIOD).await;
    mount_queue(&server, queue_json(1, 1)).await;
    let mut rx = monitor.subscribe();

    monitor.start();
    wait_until(&mut rx, |s| mail_count(s) == Some(1)).await;

    monitor.stop();
    assert!(monitor.is_stopped());
    // Let any in-flight fetch settle before arming the tripwire.
    tokio::time::sleep(Duration::from_millis(150)).await;

    server.reset().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/server/queue"))
        .respond_with(ResponseTemplate::new(200).set_body_json(queue_json(9, 1)))
        .expect(0)
        .mount(&server)
        .await;

    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(mail_count(&monitor.state()), Some(1));
    server.verify().await;
}

#[tokio::test]
async fn test_late_response_after_stop_is_discarded() {
    let (server, monitor) = setup(LONG_PERIOD).await;
    Mock::given(method("GET"))
        .and(path("/api/v1/server/queue"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(queue_json(9, 1))
                .set_delay(Duration::from_millis(400)),
        )
        .mount(&server)
        .await;

    monitor.start();
    // Give the immediate fetch time to get in flight, then tear down.
    tokio::time::sleep(Duration::from_millis(100)).await;
    monitor.stop();

    tokio::time::sleep(Duration::from_millis(600)).await;
    assert!(
        monitor.state().snapshot.is_none(),
        "late response was applied after stop"
    );
}

#[tokio::test]
async fn test_superseded_fetch_is_discarded() {
    let (server, monitor) = setup(LONG_PERIOD).await;

    // First request: slow, stale answer. Second: fast, fresh answer.
    Mock::given(method("GET"))
        .and(path("/api/v1/server/queue"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(queue_json(1, 1))
                .set_delay(Duration::from_millis(400)),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_queue(&server, queue_json(2, 2)).await;

    monitor.start();
    tokio::time::sleep(Duration::from_millis(100)).await;

    // Newer fetch issued while the slow one is still in flight.
    monitor.refresh().await;
    assert_eq!(mail_count(&monitor.state()), Some(2));

    // When the slow response finally lands it must be dropped.
    tokio::time::sleep(Duration::from_millis(600)).await;
    assert_eq!(
        mail_count(&monitor.state()),
        Some(2),
        "stale fetch overwrote a newer one"
    );
}
