//! Dashboard screen — panel totals and host resource usage.
//!
//! Fed by the bridge's periodic `GET /dashboard/stats` fetch. A failed
//! fetch keeps the last good numbers on screen beneath an error line,
//! the same stale-data contract the queue screen follows.

use color_eyre::eyre::Result;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use panelops_core::models::{DashboardStats, SystemStats};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::fmt::{fmt_bytes_short, fmt_pct_bar, pct};

const GAUGE_WIDTH: u16 = 24;

pub struct DashboardScreen {
    stats: Option<DashboardStats>,
    /// Last fetch error. Retained stats stay on screen beneath it.
    error: Option<String>,
    focused: bool,
}

impl DashboardScreen {
    pub fn new() -> Self {
        Self {
            stats: None,
            error: None,
            focused: false,
        }
    }

    fn render_totals(stats: &DashboardStats, frame: &mut Frame, area: Rect) {
        let block = theme::panel_block(" Panel ", false);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let kv = |label: &str, value: u64| {
            Line::from(vec![
                Span::styled(
                    format!("  {label:<11}"),
                    Style::default().fg(theme::TEXT_DIM),
                ),
                Span::styled(
                    value.to_string(),
                    Style::default()
                        .fg(theme::ACCENT_CYAN)
                        .add_modifier(Modifier::BOLD),
                ),
            ])
        };

        let lines = vec![
            kv("Users", stats.total_users),
            kv("Domains", stats.total_domains),
            kv("Databases", stats.total_databases),
            kv("Emails", stats.total_emails),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_system(sys: Option<&SystemStats>, frame: &mut Frame, area: Rect) {
        let block = theme::panel_block(" System ", false);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(sys) = sys else {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    "  No host metrics reported",
                    theme::placeholder(),
                ))),
                inner,
            );
            return;
        };

        let mut lines = vec![
            gauge_line("CPU", sys.cpu_usage, format!("{:.1}%", sys.cpu_usage)),
            gauge_line(
                "Memory",
                pct(sys.memory_used, sys.memory_total),
                format!(
                    "{} / {}",
                    fmt_bytes_short(sys.memory_used),
                    fmt_bytes_short(sys.memory_total)
                ),
            ),
            gauge_line(
                "Disk",
                pct(sys.disk_used, sys.disk_total),
                format!(
                    "{} / {}",
                    fmt_bytes_short(sys.disk_used),
                    fmt_bytes_short(sys.disk_total)
                ),
            ),
        ];

        if !sys.load_average.is_empty() {
            let load = sys
                .load_average
                .iter()
                .map(|l| format!("{l:.2}"))
                .collect::<Vec<_>>()
                .join(" ");
            lines.push(Line::from(vec![
                Span::styled("  Load    ", Style::default().fg(theme::TEXT_DIM)),
                Span::styled(load, Style::default().fg(theme::ACCENT_CYAN)),
            ]));
        }

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

/// One labeled usage gauge: `  CPU     [████░░░░]  23.4%`.
fn gauge_line(label: &str, percentage: f64, detail: String) -> Line<'static> {
    let (filled, empty) = fmt_pct_bar(percentage, GAUGE_WIDTH);
    let color = theme::pct_color(percentage);
    Line::from(vec![
        Span::styled(
            format!("  {label:<8}"),
            Style::default().fg(theme::TEXT_DIM),
        ),
        Span::styled(filled, Style::default().fg(color)),
        Span::styled(empty, Style::default().fg(theme::EDGE_GRAY)),
        Span::styled(
            format!("  {detail}"),
            Style::default().fg(theme::TEXT_DIM),
        ),
    ])
}

impl Component for DashboardScreen {
    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::DashboardUpdated(stats) = action {
            self.stats = Some((**stats).clone());
            self.error = None;
        } else if let Action::DashboardFailed(message) = action {
            self.error = Some(message.clone());
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = theme::panel_block(" Dashboard ", self.focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(stats) = self.stats.as_ref() else {
            let text = self.error.as_ref().map_or_else(
                || "Waiting for data…".to_owned(),
                |err| format!("⚠ {err}"),
            );
            let style = if self.error.is_some() {
                Style::default().fg(theme::ALERT_RED)
            } else {
                theme::placeholder()
            };
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(format!("  {text}"), style))),
                inner,
            );
            return;
        };

        let layout = Layout::vertical([
            Constraint::Length(1), // error banner slot
            Constraint::Length(6), // totals
            Constraint::Min(0),    // system
        ])
        .split(inner);

        if let Some(err) = self.error.as_ref() {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    format!("  ⚠ {err}"),
                    Style::default().fg(theme::ALERT_RED),
                ))),
                layout[0],
            );
        }

        Self::render_totals(stats, frame, layout[1]);
        Self::render_system(stats.system_stats.as_ref(), frame, layout[2]);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}
