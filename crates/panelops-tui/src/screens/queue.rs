//! Queue screen — live mail queue and cron job monitor.
//!
//! A thin render layer over [`QueueView`]: the view model decides what
//! the tabs show, whether flushing is offered, and which banner to
//! display; this screen only styles it. Failed refreshes keep the last
//! good rows on screen beneath the error banner.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, Tabs},
};

use panelops_core::models::{CronJob, MailQueueItem};
use panelops_core::{QueuePhase, QueueState, QueueTab, QueueView, TabBody};

use crate::action::{Action, ConfirmAction};
use crate::component::Component;
use crate::theme;

pub struct QueueScreen {
    state: QueueState,
    tab: QueueTab,
    throbber: throbber_widgets_tui::ThrobberState,
    focused: bool,
}

impl QueueScreen {
    pub fn new() -> Self {
        Self {
            state: QueueState::default(),
            tab: QueueTab::default(),
            throbber: throbber_widgets_tui::ThrobberState::default(),
            focused: false,
        }
    }

    fn render_counters(&self, view: &QueueView<'_>, frame: &mut Frame, area: Rect) {
        let cols = Layout::horizontal([Constraint::Min(0), Constraint::Length(22)]).split(area);

        let counters = view.counters();
        let label = |text: &'static str| Span::styled(text, Style::default().fg(theme::TEXT_DIM));
        let value = |text: String| {
            Span::styled(
                text,
                Style::default()
                    .fg(theme::ACCENT_CYAN)
                    .add_modifier(Modifier::BOLD),
            )
        };

        let mut spans = vec![
            label("  Mail queued: "),
            value(counters.mail_queued.to_string()),
            label("   Cron jobs: "),
            value(counters.cron_jobs.to_string()),
            label("   Pending tasks: "),
            value(counters.pending_tasks.to_string()),
        ];
        if view.is_stale() {
            spans.push(Span::styled(
                "   stale",
                Style::default().fg(theme::WARN_AMBER),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), cols[0]);

        if view.is_loading() {
            let throbber = throbber_widgets_tui::Throbber::default()
                .label("refreshing")
                .style(Style::default().fg(theme::ACCENT_CYAN))
                .throbber_style(Style::default().fg(theme::ACCENT_BLUE));
            frame.render_stateful_widget(throbber, cols[1], &mut self.throbber.clone());
        } else if let Some(at) = self.state.last_refresh {
            let stamp = at.with_timezone(&chrono::Local).format("%H:%M:%S");
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    format!("updated {stamp}"),
                    theme::key_hint(),
                )))
                .alignment(Alignment::Right),
                cols[1],
            );
        }
    }

    fn render_tabs(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = [QueueTab::Mail, QueueTab::Cron]
            .iter()
            .map(|&tab| {
                let style = if tab == self.tab {
                    theme::tab_active()
                } else {
                    theme::tab_inactive()
                };
                Line::from(Span::styled(format!("  {}  ", tab.label()), style))
            })
            .collect();

        let tabs = Tabs::new(titles)
            .divider(Span::styled("│", theme::key_hint()))
            .select(usize::from(self.tab == QueueTab::Cron));
        frame.render_widget(tabs, area);
    }
}

fn render_banner(error: &str, frame: &mut Frame, area: Rect) {
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            format!("  ⚠ {error}"),
            Style::default().fg(theme::ALERT_RED),
        ))),
        area,
    );
}

fn render_body(view: &QueueView<'_>, frame: &mut Frame, area: Rect) {
    match view.body() {
        // Never fetched is not the same as fetched-and-clean.
        TabBody::NoData => {
            render_placeholder("Waiting for data…", theme::placeholder(), frame, area);
        }
        TabBody::Empty => {
            let text = match view.tab() {
                QueueTab::Mail => "Mail queue is empty",
                QueueTab::Cron => "No scheduled jobs found",
            };
            render_placeholder(text, Style::default().fg(theme::TEXT_DIM), frame, area);
        }
        TabBody::Mail(items) => render_mail_table(items, frame, area),
        TabBody::Cron(jobs) => render_cron_table(jobs, frame, area),
    }
}

fn render_placeholder(text: &str, style: Style, frame: &mut Frame, area: Rect) {
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(format!("  {text}"), style))),
        area,
    );
}

fn render_mail_table(items: &[MailQueueItem], frame: &mut Frame, area: Rect) {
    let header = Row::new(vec![
        Cell::from("ID").style(theme::table_header()),
        Cell::from("From").style(theme::table_header()),
        Cell::from("To").style(theme::table_header()),
        Cell::from("Size").style(theme::table_header()),
        Cell::from("Time").style(theme::table_header()),
        Cell::from("Status").style(theme::table_header()),
    ]);

    let rows: Vec<Row> = items
        .iter()
        .map(|item| {
            // Deferred is a temporary failure; make it stand out.
            let status_color = if item.status.is_deferred() {
                theme::WARN_AMBER
            } else {
                theme::TEXT_DIM
            };
            Row::new(vec![
                Cell::from(item.id.clone()),
                Cell::from(item.sender.clone()),
                Cell::from(item.recipient.clone()),
                Cell::from(item.size.clone()),
                Cell::from(item.time.clone()),
                Cell::from(item.status.to_string()).style(Style::default().fg(status_color)),
            ])
            .style(theme::table_row())
        })
        .collect();

    let widths = [
        Constraint::Length(12),
        Constraint::Min(18),
        Constraint::Min(18),
        Constraint::Length(8),
        Constraint::Length(14),
        Constraint::Length(10),
    ];

    frame.render_widget(Table::new(rows, widths).header(header), area);
}

fn render_cron_table(jobs: &[CronJob], frame: &mut Frame, area: Rect) {
    let header = Row::new(vec![
        Cell::from("User").style(theme::table_header()),
        Cell::from("Schedule").style(theme::table_header()),
        Cell::from("Command").style(theme::table_header()),
        Cell::from("Next Run").style(theme::table_header()),
    ]);

    let rows: Vec<Row> = jobs
        .iter()
        .map(|job| {
            Row::new(vec![
                Cell::from(job.user.clone()),
                Cell::from(job.schedule.clone()),
                Cell::from(job.command.clone()),
                Cell::from(job.next_run.clone()),
            ])
            .style(theme::table_row())
        })
        .collect();

    let widths = [
        Constraint::Length(10),
        Constraint::Length(14),
        Constraint::Min(20),
        Constraint::Length(16),
    ];

    frame.render_widget(Table::new(rows, widths).header(header), area);
}

fn render_hints(view: &QueueView<'_>, frame: &mut Frame, area: Rect) {
    let mut spans = vec![
        Span::styled("  m", theme::key_hint_key()),
        Span::styled(" mail  ", theme::key_hint()),
        Span::styled("c", theme::key_hint_key()),
        Span::styled(" cron  ", theme::key_hint()),
        Span::styled("r", theme::key_hint_key()),
        Span::styled(" refresh", theme::key_hint()),
    ];
    // The flush control is offered only while messages are queued.
    if view.can_flush() {
        spans.push(Span::styled("  f", theme::key_hint_key()));
        spans.push(Span::styled(" flush", theme::key_hint()));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

impl Component for QueueScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Char('m') => {
                self.tab = QueueTab::Mail;
                Ok(None)
            }
            KeyCode::Char('c') => {
                self.tab = QueueTab::Cron;
                Ok(None)
            }
            KeyCode::Left | KeyCode::Right | KeyCode::Char('h' | 'l') => {
                self.tab = self.tab.toggled();
                Ok(None)
            }
            KeyCode::Char('f') => {
                let view = QueueView::new(&self.state, self.tab);
                let confirm = view.can_flush().then(|| {
                    Action::ShowConfirm(ConfirmAction::FlushMailQueue {
                        queued: view.counters().mail_queued,
                    })
                });
                Ok(confirm)
            }
            KeyCode::Char('r') => Ok(Some(Action::RefreshQueue)),
            _ => Ok(None),
        }
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::QueueChanged(state) => self.state.clone_from(state),
            Action::Tick if self.state.phase == QueuePhase::Loading => self.throbber.calc_next(),
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let view = QueueView::new(&self.state, self.tab);

        let block = theme::panel_block(" Task Queue ", self.focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let layout = Layout::vertical([
            Constraint::Length(1), // counters + refresh status
            Constraint::Length(1), // error banner slot
            Constraint::Length(1), // tab bar
            Constraint::Min(0),    // body
            Constraint::Length(1), // key hints
        ])
        .split(inner);

        self.render_counters(&view, frame, layout[0]);
        if let Some(error) = view.error_banner() {
            render_banner(error, frame, layout[1]);
        }
        self.render_tabs(frame, layout[2]);
        render_body(&view, frame, layout[3]);
        render_hints(&view, frame, layout[4]);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}
