//! All possible UI actions. Actions are the sole mechanism for state mutation.

use std::fmt;

use panelops_core::QueueState;
use panelops_core::models::DashboardStats;

use crate::screen::ScreenId;

/// Notification severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

/// A toast notification.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Error,
        }
    }
}

/// Pending confirmation action.
#[derive(Debug, Clone)]
pub enum ConfirmAction {
    FlushMailQueue { queued: u64 },
}

impl fmt::Display for ConfirmAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FlushMailQueue { queued } => {
                write!(f, "Flush the mail queue? ({queued} queued)")
            }
        }
    }
}

/// The single currency of the UI loop: anything that can happen is an
/// Action, and only actions mutate state.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Loop plumbing ──────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Screen navigation ──────────────────────────────────────────
    SwitchScreen(ScreenId),
    GoBack,
    ToggleHelp,

    // ── Feed updates, sent by the bridge task ──────────────────────
    QueueChanged(Box<QueueState>),
    DashboardUpdated(Box<DashboardStats>),
    DashboardFailed(String),
    SessionExpired,

    // ── Queue operations ───────────────────────────────────────────
    RefreshQueue,
    FlushMailQueue,

    // ── Confirm dialog ─────────────────────────────────────────────
    ShowConfirm(ConfirmAction),
    ConfirmYes,
    ConfirmNo,

    // ── Toasts ─────────────────────────────────────────────────────
    Notify(Notification),
    DismissNotification,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn flush_prompt_names_the_queued_count() {
        let prompt = ConfirmAction::FlushMailQueue { queued: 5 }.to_string();
        assert_eq!(prompt, "Flush the mail queue? (5 queued)");
    }
}
