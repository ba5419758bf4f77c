//! Harbor Dusk palette and the semantic styles built on it.
//!
//! Screens never hard-code colors; they pick a role here so the look stays
//! consistent across the app.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders};

// ── Palette ───────────────────────────────────────────────────────────

pub const ACCENT_CYAN: Color = Color::Rgb(42, 195, 222); // #2ac3de
pub const ACCENT_BLUE: Color = Color::Rgb(122, 162, 247); // #7aa2f7
pub const WARN_AMBER: Color = Color::Rgb(224, 175, 104); // #e0af68
pub const OK_GREEN: Color = Color::Rgb(158, 206, 106); // #9ece6a
pub const ALERT_RED: Color = Color::Rgb(247, 118, 142); // #f7768e
pub const TEXT_DIM: Color = Color::Rgb(169, 177, 214); // #a9b1d6
pub const EDGE_GRAY: Color = Color::Rgb(86, 95, 137); // #565f89
pub const PANEL_BG: Color = Color::Rgb(22, 22, 30); // #16161e

// ── Semantic styles ───────────────────────────────────────────────────

/// Panel and overlay titles.
pub fn title_style() -> Style {
    Style::default().fg(ACCENT_CYAN).add_modifier(Modifier::BOLD)
}

/// Border of the panel holding focus.
pub fn border_focused() -> Style {
    Style::default().fg(ACCENT_BLUE)
}

/// Border of any other panel.
pub fn border_default() -> Style {
    Style::default().fg(EDGE_GRAY)
}

/// Column headers in data tables.
pub fn table_header() -> Style {
    Style::default().fg(ACCENT_CYAN).add_modifier(Modifier::BOLD)
}

/// Body rows in data tables.
pub fn table_row() -> Style {
    Style::default().fg(TEXT_DIM)
}

/// The tab currently shown.
pub fn tab_active() -> Style {
    Style::default().fg(ACCENT_BLUE).add_modifier(Modifier::BOLD)
}

/// Any other tab.
pub fn tab_inactive() -> Style {
    Style::default().fg(TEXT_DIM)
}

/// Prose part of a key hint, as in "q quit".
pub fn key_hint() -> Style {
    Style::default().fg(EDGE_GRAY)
}

/// Key part of a key hint.
pub fn key_hint_key() -> Style {
    Style::default().fg(ACCENT_CYAN).add_modifier(Modifier::BOLD)
}

/// Text standing in for data that has not arrived yet.
pub fn placeholder() -> Style {
    Style::default().fg(EDGE_GRAY)
}

/// The rounded frame every screen draws around itself. The border color
/// tracks focus.
pub fn panel_block(title: &str, focused: bool) -> Block<'static> {
    let border = if focused {
        border_focused()
    } else {
        border_default()
    };
    Block::default()
        .title(title.to_owned())
        .title_style(title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border)
}

/// Opaque backdrop painted under an overlay so the screen behind it
/// cannot bleed through.
pub fn overlay_backdrop() -> Block<'static> {
    Block::default().style(Style::default().bg(PANEL_BG))
}

/// Rounded dialog frame with a caller-picked border color.
pub fn dialog_block(border: Color) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
}

/// Gauge color by utilization: red above 80%, amber above 50%.
pub fn pct_color(pct: f64) -> Color {
    if pct > 80.0 {
        ALERT_RED
    } else if pct > 50.0 {
        WARN_AMBER
    } else {
        ACCENT_CYAN
    }
}
