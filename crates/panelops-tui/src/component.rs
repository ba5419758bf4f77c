//! The trait each screen implements to plug into the app loop.

use color_eyre::eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::{Frame, layout::Rect};
use tokio::sync::mpsc::UnboundedSender;

use crate::action::Action;

/// A screen's contract with the app loop.
///
/// `init` runs once at startup; after that the loop feeds key events and
/// actions in and asks for a render each frame.
pub trait Component: Send {
    /// One-time setup. The sender lets the screen push actions of its own
    /// into the loop later.
    fn init(&mut self, _action_tx: UnboundedSender<Action>) -> Result<()> {
        Ok(())
    }

    /// React to a key press, optionally answering with an action.
    fn handle_key_event(&mut self, _key: KeyEvent) -> Result<Option<Action>> {
        Ok(None)
    }

    /// Absorb a dispatched action, optionally answering with a follow-up.
    fn update(&mut self, _action: &Action) -> Result<Option<Action>> {
        Ok(None)
    }

    /// Paint the screen into `area`.
    fn render(&self, frame: &mut Frame, area: Rect);

    /// Told whenever the screen gains or loses the foreground.
    fn set_focused(&mut self, _focused: bool) {}
}
