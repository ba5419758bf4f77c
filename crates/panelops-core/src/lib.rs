// panelops-core: Domain layer between panelops-api and consumers (CLI/TUI).

pub mod error;
pub mod monitor;
pub mod queue_view;

// ── Primary re-exports ──────────────────────────────────────────────
pub use error::CoreError;
pub use monitor::{
    DEFAULT_POLL_PERIOD, FETCH_ERROR_FALLBACK, FLUSH_ERROR_FALLBACK, QueueMonitor, QueuePhase,
    QueueState,
};
pub use queue_view::{QueueCounters, QueueTab, QueueView, TabBody};

// Re-export the API surface consumers need alongside the monitor, so
// binaries depend on one crate for the whole domain.
pub use panelops_api::{
    Error as ApiError, PanelClient, SessionEvent, SessionStore, TlsMode, TransportConfig, models,
};
