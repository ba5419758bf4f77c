//! Application core — event loop, screen management, action dispatch.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Margin, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Tabs},
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use panelops_core::{PanelClient, QueueMonitor};

use crate::action::{Action, ConfirmAction, Notification, NotificationLevel};
use crate::bridge;
use crate::component::Component;
use crate::event::{Event, EventReader};
use crate::screen::ScreenId;
use crate::screens::build_screens;
use crate::theme;
use crate::tui::Tui;

/// How long a notification toast stays up.
const NOTIFICATION_TTL: Duration = Duration::from_secs(4);

/// Cadence for notification expiry and screen tick hooks.
const TICK_PERIOD: Duration = Duration::from_millis(250);

/// Redraw cadence, roughly thirty frames a second.
const FRAME_PERIOD: Duration = Duration::from_millis(33);

/// Top-level application state and event loop.
pub struct App {
    client: PanelClient,
    monitor: Arc<QueueMonitor>,
    /// Screen currently drawn and receiving keys.
    active_screen: ScreenId,
    /// Where Esc returns to.
    previous_screen: Option<ScreenId>,
    screens: HashMap<ScreenId, Box<dyn Component>>,
    running: bool,
    help_visible: bool,
    /// Captures all input while a confirmation dialog is up.
    pending_confirm: Option<ConfirmAction>,
    /// Toast plus the moment it appeared, for expiry.
    notification: Option<(Notification, Instant)>,
    /// Message for the operator once the terminal is restored.
    exit_note: Option<String>,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    pub fn new(client: PanelClient) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let monitor = Arc::new(QueueMonitor::new(client.clone()));
        let screens: HashMap<ScreenId, Box<dyn Component>> =
            build_screens().into_iter().collect();

        Self {
            client,
            monitor,
            active_screen: ScreenId::Dashboard,
            previous_screen: None,
            screens,
            running: true,
            help_visible: false,
            pending_confirm: None,
            notification: None,
            exit_note: None,
            action_tx,
            action_rx,
        }
    }

    /// What to tell the operator after the terminal is restored, if
    /// anything. Set when the session dies out from under the UI.
    pub fn exit_note(&self) -> Option<&str> {
        self.exit_note.as_deref()
    }

    fn init_screens(&mut self) -> Result<()> {
        for screen in self.screens.values_mut() {
            screen.init(self.action_tx.clone())?;
        }
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(true);
        }
        Ok(())
    }

    /// Run the main event loop until quit or session loss.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;
        self.init_screens()?;

        let bridge_cancel = CancellationToken::new();
        bridge::spawn(
            self.client.clone(),
            Arc::clone(&self.monitor),
            self.action_tx.clone(),
            bridge_cancel.clone(),
        );

        let mut events = EventReader::new(TICK_PERIOD, FRAME_PERIOD);
        info!("event loop running");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };
            self.dispatch_event(event)?;
            self.drain_actions(&mut tui)?;
        }

        bridge_cancel.cancel();
        events.stop();
        info!("event loop finished");
        Ok(())
    }

    /// Turn a terminal event into an action on the queue.
    fn dispatch_event(&mut self, event: Event) -> Result<()> {
        let action = match event {
            Event::Key(key) => self.handle_key_event(key)?,
            Event::Resize(w, h) => Some(Action::Resize(w, h)),
            Event::Tick => Some(Action::Tick),
            Event::Render => Some(Action::Render),
        };
        if let Some(action) = action {
            self.action_tx.send(action)?;
        }
        Ok(())
    }

    /// Work through everything queued, drawing once per Render action.
    fn drain_actions(&mut self, tui: &mut Tui) -> Result<()> {
        while let Ok(action) = self.action_rx.try_recv() {
            self.process_action(&action)?;
            if matches!(action, Action::Render) {
                tui.draw(|frame| self.render(frame))?;
            }
        }
        Ok(())
    }

    /// Map a key to an action. Overlays capture input first, then the
    /// global bindings, then the active screen.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.pending_confirm.is_some() {
            let verdict = match key.code {
                KeyCode::Char('y' | 'Y') | KeyCode::Enter => Some(Action::ConfirmYes),
                KeyCode::Char('n' | 'N') | KeyCode::Esc => Some(Action::ConfirmNo),
                _ => None,
            };
            return Ok(verdict);
        }

        if self.help_visible {
            let close = matches!(key.code, KeyCode::Esc | KeyCode::Char('?'));
            return Ok(close.then_some(Action::ToggleHelp));
        }

        let bound = match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c'))
            | (KeyModifiers::NONE, KeyCode::Char('q')) => Some(Action::Quit),
            (_, KeyCode::Char('?')) => Some(Action::ToggleHelp),
            (KeyModifiers::NONE, KeyCode::Tab) => {
                Some(Action::SwitchScreen(self.active_screen.next()))
            }
            (KeyModifiers::SHIFT, KeyCode::BackTab) => {
                Some(Action::SwitchScreen(self.active_screen.prev()))
            }
            (KeyModifiers::NONE, KeyCode::Esc) => Some(Action::GoBack),
            (KeyModifiers::NONE, KeyCode::Char(c)) => c
                .to_digit(10)
                .and_then(ScreenId::from_number)
                .map(Action::SwitchScreen),
            _ => None,
        };
        if bound.is_some() {
            return Ok(bound);
        }

        match self.screens.get_mut(&self.active_screen) {
            Some(screen) => screen.handle_key_event(key),
            None => Ok(None),
        }
    }

    /// Hand focus to `target`, remembering where we came from.
    fn focus(&mut self, target: ScreenId) {
        if target == self.active_screen {
            return;
        }
        debug!("screen {} -> {}", self.active_screen, target);
        if let Some(old) = self.screens.get_mut(&self.active_screen) {
            old.set_focused(false);
        }
        self.previous_screen = Some(self.active_screen);
        self.active_screen = target;
        if let Some(new) = self.screens.get_mut(&self.active_screen) {
            new.set_focused(true);
        }
    }

    /// Apply one action to app state and propagate it to screens.
    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => self.running = false,

            // The next render picks up the new size from the frame
            Action::Resize(..) | Action::Render => {}

            Action::SwitchScreen(target) => self.focus(*target),

            Action::GoBack => {
                if let Some(prev) = self.previous_screen.take() {
                    self.action_tx.send(Action::SwitchScreen(prev))?;
                }
            }

            Action::ToggleHelp => self.help_visible = !self.help_visible,

            Action::ShowConfirm(confirm) => self.pending_confirm = Some(confirm.clone()),

            Action::ConfirmYes => {
                if let Some(confirm) = self.pending_confirm.take() {
                    match confirm {
                        ConfirmAction::FlushMailQueue { .. } => {
                            self.action_tx.send(Action::FlushMailQueue)?;
                        }
                    }
                }
            }

            Action::ConfirmNo => self.pending_confirm = None,

            Action::FlushMailQueue => {
                let monitor = Arc::clone(&self.monitor);
                let tx = self.action_tx.clone();
                tokio::spawn(async move {
                    match monitor.flush().await {
                        Ok(message) => {
                            let text =
                                message.unwrap_or_else(|| "Mail queue flushed".to_owned());
                            let _ = tx.send(Action::Notify(Notification::success(text)));
                        }
                        // The failure lands in the queue state's banner
                        Err(err) => debug!("mail queue flush failed: {err}"),
                    }
                });
            }

            Action::RefreshQueue => {
                let monitor = Arc::clone(&self.monitor);
                tokio::spawn(async move { monitor.refresh().await });
            }

            Action::SessionExpired => {
                warn!("session expired, leaving the TUI");
                let _ = panelops_config::clear_session();
                self.exit_note =
                    Some("Session expired. Log in again with: panelops login".to_owned());
                self.running = false;
            }

            Action::Notify(notification) => {
                self.notification = Some((notification.clone(), Instant::now()));
            }

            Action::DismissNotification => self.notification = None,

            Action::Tick => {
                let stale = self
                    .notification
                    .as_ref()
                    .is_some_and(|(_, shown)| shown.elapsed() > NOTIFICATION_TTL);
                if stale {
                    self.notification = None;
                }
                if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                    if let Some(follow_up) = screen.update(action)? {
                        self.action_tx.send(follow_up)?;
                    }
                }
            }

            // Data snapshots go to every screen so a backgrounded
            // screen is current the moment it becomes active.
            Action::QueueChanged(_) | Action::DashboardUpdated(_) | Action::DashboardFailed(_) => {
                self.broadcast(action)?;
            }
        }

        Ok(())
    }

    /// Push a feed update through every screen, queueing any follow-ups.
    fn broadcast(&mut self, action: &Action) -> Result<()> {
        for screen in self.screens.values_mut() {
            if let Some(follow_up) = screen.update(action)? {
                self.action_tx.send(follow_up)?;
            }
        }
        Ok(())
    }

    /// Draw all layers of one frame.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let [content, tab_bar, status_bar] = Layout::vertical([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        if let Some(screen) = self.screens.get(&self.active_screen) {
            screen.render(frame, content);
        }
        self.render_tab_bar(frame, tab_bar);
        self.render_status_bar(frame, status_bar);

        if self.help_visible {
            render_help_overlay(frame, area);
        }
        if let Some((ref notification, _)) = self.notification {
            render_notification(frame, area, notification);
        }
        if let Some(ref confirm) = self.pending_confirm {
            render_confirm_dialog(frame, area, confirm);
        }
    }

    fn render_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let selected = ScreenId::ALL.iter().position(|&s| s == self.active_screen);
        let titles = ScreenId::ALL.iter().map(|&id| {
            let style = if id == self.active_screen {
                theme::tab_active()
            } else {
                theme::tab_inactive()
            };
            Line::styled(format!(" {} {} ", id.number(), id.label()), style)
        });

        let tabs = Tabs::new(titles)
            .divider(Span::styled(" ", theme::key_hint()))
            .select(selected);
        frame.render_widget(tabs, area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let session = match self.client.session().user() {
            Some(user) => Span::styled(
                format!(
                    "● {}@{}",
                    user.username,
                    self.client.base_url().host_str().unwrap_or("panel")
                ),
                Style::default().fg(theme::OK_GREEN),
            ),
            None => Span::styled("○ logged out", Style::default().fg(theme::ALERT_RED)),
        };

        let hints = Span::styled(" │ ? help  q quit", theme::key_hint());

        frame.render_widget(
            Paragraph::new(Line::from(vec![Span::raw(" "), session, hints])),
            area,
        );
    }
}

/// Center a `width` by `height` floating region inside `area`.
fn overlay_area(area: Rect, width: u16, height: u16) -> Rect {
    let [horizontal] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    let [centered] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(horizontal);
    centered
}

/// Render the help overlay centered on screen.
fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let help_area = overlay_area(area, 46, 16);

    frame.render_widget(theme::overlay_backdrop(), help_area);

    let block = theme::panel_block(" Keyboard Shortcuts ", true);
    let inner = block.inner(help_area);
    frame.render_widget(block, help_area);

    let entry = |keys: &'static str, what: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {keys:<9}"), theme::key_hint_key()),
            Span::styled(what, theme::key_hint()),
        ])
    };

    let help_text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Navigation",
            Style::default().fg(theme::ACCENT_CYAN),
        )),
        entry("1-2", "Jump to screen"),
        entry("Tab", "Next screen"),
        entry("Esc", "Back"),
        Line::from(""),
        Line::from(Span::styled(
            "  Queue",
            Style::default().fg(theme::ACCENT_CYAN),
        )),
        entry("m / c", "Mail / cron tab"),
        entry("r", "Refresh now"),
        entry("f", "Flush the mail queue"),
        Line::from(""),
        Line::from(Span::styled(
            "  Global",
            Style::default().fg(theme::ACCENT_CYAN),
        )),
        entry("?", "This help"),
        entry("q", "Quit"),
    ];

    frame.render_widget(Paragraph::new(help_text), inner);
}

/// Render a centered confirmation dialog.
fn render_confirm_dialog(frame: &mut Frame, area: Rect, confirm: &ConfirmAction) {
    let dialog_area = overlay_area(area, 50, 5);
    frame.render_widget(theme::overlay_backdrop(), dialog_area);

    let block = theme::dialog_block(theme::WARN_AMBER)
        .title(" Confirm ")
        .title_style(theme::title_style());
    let inner = block.inner(dialog_area);
    frame.render_widget(block, dialog_area);

    let body = vec![
        Line::styled(format!("  {confirm}"), Style::default().fg(theme::TEXT_DIM)),
        Line::default(),
        Line::from(vec![
            Span::styled("  y", theme::key_hint_key()),
            Span::styled(" confirm   ", theme::key_hint()),
            Span::styled("n", theme::key_hint_key()),
            Span::styled(" cancel", theme::key_hint()),
        ]),
    ];
    frame.render_widget(Paragraph::new(body), inner);
}

/// Render a notification toast in the bottom-right corner, clear of the
/// status bar.
fn render_notification(frame: &mut Frame, area: Rect, notification: &Notification) {
    let msg_len = u16::try_from(notification.message.len()).unwrap_or(u16::MAX);
    let width = msg_len.saturating_add(6).clamp(20, 60);

    let corner = area.inner(Margin {
        horizontal: 1,
        vertical: 2,
    });
    let [column] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::End)
        .areas(corner);
    let [toast_area] = Layout::vertical([Constraint::Length(3)])
        .flex(Flex::End)
        .areas(column);

    let (border_color, icon) = match notification.level {
        NotificationLevel::Success => (theme::OK_GREEN, "✓"),
        NotificationLevel::Error => (theme::ALERT_RED, "✗"),
    };

    frame.render_widget(theme::overlay_backdrop(), toast_area);

    let block = theme::dialog_block(border_color);
    let inner = block.inner(toast_area);
    frame.render_widget(block, toast_area);

    let line = Line::from(vec![
        Span::styled(format!(" {icon} "), Style::default().fg(border_color)),
        Span::styled(
            notification.message.as_str(),
            Style::default().fg(theme::TEXT_DIM),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), inner);
}
