// ── Queue view model ────────────────────────────────────────────────
//
// Pure derivation over the monitor's published state plus the selected
// tab. No I/O and no clock in here: render layers (TUI screen, CLI
// watch output) ask this module what to show and style it themselves.

use panelops_api::models::{CronJob, MailQueueItem};

use crate::monitor::{QueuePhase, QueueState};

/// Which queue tab is selected. Pure UI state; never sent anywhere.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QueueTab {
    #[default]
    Mail,
    Cron,
}

impl QueueTab {
    pub fn label(self) -> &'static str {
        match self {
            Self::Mail => "Mail Queue",
            Self::Cron => "Cron Jobs",
        }
    }

    /// The other tab (two tabs, so next and previous coincide).
    pub fn toggled(self) -> Self {
        match self {
            Self::Mail => Self::Cron,
            Self::Cron => Self::Mail,
        }
    }
}

/// What the body of the selected tab should show.
///
/// `NoData` (never fetched) and `Empty` (fetched, zero rows) are
/// distinct on purpose: the first renders as a waiting placeholder,
/// the second as a positive "all clear".
#[derive(Debug, PartialEq)]
pub enum TabBody<'a> {
    NoData,
    Empty,
    Mail(&'a [MailQueueItem]),
    Cron(&'a [CronJob]),
}

/// Summary counters shown above the tabs. Derived from the snapshot
/// alone, so switching tabs never changes them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueueCounters {
    /// The backend's advisory count, not the returned list length.
    pub mail_queued: u64,
    pub cron_jobs: usize,
    pub pending_tasks: u64,
}

/// One readable view over `(QueueState, QueueTab)`.
#[derive(Debug, Clone, Copy)]
pub struct QueueView<'a> {
    state: &'a QueueState,
    tab: QueueTab,
}

impl<'a> QueueView<'a> {
    pub fn new(state: &'a QueueState, tab: QueueTab) -> Self {
        Self { state, tab }
    }

    pub fn tab(&self) -> QueueTab {
        self.tab
    }

    /// Body of the selected tab.
    pub fn body(&self) -> TabBody<'a> {
        let Some(snapshot) = self.state.snapshot.as_ref() else {
            return TabBody::NoData;
        };
        match self.tab {
            QueueTab::Mail if snapshot.mail_queue.is_empty() => TabBody::Empty,
            QueueTab::Mail => TabBody::Mail(&snapshot.mail_queue),
            QueueTab::Cron if snapshot.cron_jobs.is_empty() => TabBody::Empty,
            QueueTab::Cron => TabBody::Cron(&snapshot.cron_jobs),
        }
    }

    /// Whether the flush control is offered. Keyed on the backend's
    /// count, not the returned list, so a capped list still offers it.
    /// Display-level only: an invoked flush is sent unconditionally.
    pub fn can_flush(&self) -> bool {
        self.state
            .snapshot
            .as_ref()
            .is_some_and(|s| s.mail_queue_count > 0)
    }

    /// Counters for the summary row; identical whichever tab is active.
    pub fn counters(&self) -> QueueCounters {
        self.state
            .snapshot
            .as_ref()
            .map_or_else(QueueCounters::default, |s| QueueCounters {
                mail_queued: s.mail_queue_count,
                cron_jobs: s.cron_jobs.len(),
                pending_tasks: s.pending_tasks,
            })
    }

    /// Error banner text, shown alongside whatever data is retained.
    pub fn error_banner(&self) -> Option<&'a str> {
        self.state.error.as_deref()
    }

    /// Whether a fetch is currently in flight.
    pub fn is_loading(&self) -> bool {
        self.state.phase == QueuePhase::Loading
    }

    /// Whether the retained snapshot is stale (the latest fetch failed).
    pub fn is_stale(&self) -> bool {
        self.state.phase == QueuePhase::Failed && self.state.snapshot.is_some()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use panelops_api::models::QueueSnapshot;
    use pretty_assertions::assert_eq;

    use super::*;

    fn backup_job() -> CronJob {
        CronJob {
            user: "root".into(),
            schedule: "0 2 * * *".into(),
            command: "backup.sh".into(),
            next_run: "02:00".into(),
        }
    }

    fn ready(snapshot: QueueSnapshot) -> QueueState {
        QueueState {
            phase: QueuePhase::Ready,
            snapshot: Some(snapshot),
            error: None,
            last_refresh: None,
        }
    }

    #[test]
    fn no_data_before_first_fetch() {
        let state = QueueState::default();
        assert_eq!(QueueView::new(&state, QueueTab::Mail).body(), TabBody::NoData);
        assert_eq!(QueueView::new(&state, QueueTab::Cron).body(), TabBody::NoData);
        assert!(!QueueView::new(&state, QueueTab::Mail).can_flush());
    }

    #[test]
    fn empty_mail_with_one_cron_job() {
        let state = ready(QueueSnapshot {
            mail_queue: vec![],
            mail_queue_count: 0,
            cron_jobs: vec![backup_job()],
            pending_tasks: 1,
        });

        // Mail tab: fetched and clean, not "waiting for data".
        assert_eq!(QueueView::new(&state, QueueTab::Mail).body(), TabBody::Empty);

        // Cron tab: exactly one row with the scheduled values.
        match QueueView::new(&state, QueueTab::Cron).body() {
            TabBody::Cron(jobs) => {
                assert_eq!(jobs.len(), 1);
                assert_eq!(jobs[0].user, "root");
                assert_eq!(jobs[0].schedule, "0 2 * * *");
                assert_eq!(jobs[0].command, "backup.sh");
                assert_eq!(jobs[0].next_run, "02:00");
            }
            other => panic!("expected cron rows, got {other:?}"),
        }

        let counters = QueueView::new(&state, QueueTab::Mail).counters();
        assert_eq!(
            counters,
            QueueCounters {
                mail_queued: 0,
                cron_jobs: 1,
                pending_tasks: 1
            }
        );
        assert!(!QueueView::new(&state, QueueTab::Mail).can_flush());
    }

    #[test]
    fn counters_do_not_depend_on_selected_tab() {
        let state = ready(QueueSnapshot {
            mail_queue: vec![MailQueueItem::default()],
            mail_queue_count: 4,
            cron_jobs: vec![backup_job(), backup_job()],
            pending_tasks: 3,
        });

        let from_mail = QueueView::new(&state, QueueTab::Mail).counters();
        let from_cron = QueueView::new(&state, QueueTab::Cron).counters();
        assert_eq!(from_mail, from_cron);
        assert_eq!(from_mail.mail_queued, 4);
        assert_eq!(from_mail.cron_jobs, 2);
        assert_eq!(from_mail.pending_tasks, 3);
    }

    #[test]
    fn flush_offered_when_count_exceeds_returned_list() {
        // Backend capped the list at 3 but reports 5 queued.
        let state = ready(QueueSnapshot {
            mail_queue: vec![
                MailQueueItem::default(),
                MailQueueItem::default(),
                MailQueueItem::default(),
            ],
            mail_queue_count: 5,
            cron_jobs: vec![],
            pending_tasks: 0,
        });

        let view = QueueView::new(&state, QueueTab::Mail);
        assert!(view.can_flush());
        assert_eq!(view.counters().mail_queued, 5);
        match view.body() {
            TabBody::Mail(items) => assert_eq!(items.len(), 3),
            other => panic!("expected mail rows, got {other:?}"),
        }
    }

    #[test]
    fn flush_not_offered_at_zero_even_on_cron_tab() {
        let state = ready(QueueSnapshot {
            mail_queue: vec![],
            mail_queue_count: 0,
            cron_jobs: vec![backup_job()],
            pending_tasks: 0,
        });
        assert!(!QueueView::new(&state, QueueTab::Cron).can_flush());
    }

    #[test]
    fn failed_fetch_keeps_stale_rows_under_the_banner() {
        let state = QueueState {
            phase: QueuePhase::Failed,
            snapshot: Some(QueueSnapshot {
                mail_queue: vec![MailQueueItem {
                    id: "A1".into(),
                    ..MailQueueItem::default()
                }],
                mail_queue_count: 1,
                cron_jobs: vec![],
                pending_tasks: 0,
            }),
            error: Some("permission denied".into()),
            last_refresh: None,
        };

        let view = QueueView::new(&state, QueueTab::Mail);
        assert_eq!(view.error_banner(), Some("permission denied"));
        assert!(view.is_stale());
        match view.body() {
            TabBody::Mail(items) => assert_eq!(items[0].id, "A1"),
            other => panic!("expected retained mail rows, got {other:?}"),
        }
    }

    #[test]
    fn identical_states_derive_identical_views() {
        let snapshot = QueueSnapshot {
            mail_queue: vec![MailQueueItem::default()],
            mail_queue_count: 1,
            cron_jobs: vec![backup_job()],
            pending_tasks: 2,
        };
        let a = ready(snapshot.clone());
        let b = ready(snapshot);

        assert_eq!(
            QueueView::new(&a, QueueTab::Mail).body(),
            QueueView::new(&b, QueueTab::Mail).body()
        );
        assert_eq!(
            QueueView::new(&a, QueueTab::Mail).counters(),
            QueueView::new(&b, QueueTab::Mail).counters()
        );
    }

    #[test]
    fn tab_toggle_is_an_involution() {
        assert_eq!(QueueTab::Mail.toggled(), QueueTab::Cron);
        assert_eq!(QueueTab::Mail.toggled().toggled(), QueueTab::Mail);
    }
}
