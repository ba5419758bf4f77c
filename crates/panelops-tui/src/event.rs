//! Terminal input pump.
//!
//! A background task multiplexes crossterm input with two timers: a coarse
//! tick that drives notification expiry, and a render tick that paces frame
//! drawing. The UI loop consumes the merged stream through one channel and
//! never polls the terminal directly.

use std::time::Duration;

use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::time::{Interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// One unit of input for the UI loop.
#[derive(Debug)]
pub enum Event {
    /// A key press (release and repeat are filtered out).
    Key(KeyEvent),
    /// New terminal dimensions in columns and rows.
    Resize(u16, u16),
    /// Coarse timer for notification expiry (4 Hz).
    Tick,
    /// Frame pacing timer (~30 FPS).
    Render,
}

/// Handle to the background input task.
pub struct EventReader {
    rx: mpsc::UnboundedReceiver<Event>,
    cancel: CancellationToken,
}

impl EventReader {
    /// Start the input task with the given tick and frame cadences.
    pub fn new(tick_rate: Duration, render_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();

        let stop = cancel.clone();
        tokio::spawn(async move {
            let mut input = EventStream::new();
            let mut ticks = ticker(tick_rate);
            let mut frames = ticker(render_rate);

            loop {
                let event = tokio::select! {
                    _ = stop.cancelled() => break,

                    _ = ticks.tick() => Event::Tick,

                    _ = frames.tick() => Event::Render,

                    read = input.next() => match read {
                        Some(Ok(raw)) => {
                            let Some(event) = terminal_event(raw) else { continue };
                            event
                        }
                        // Read errors are transient; a closed stream is final.
                        Some(Err(_)) => continue,
                        None => break,
                    },
                };

                // Receiver gone means the UI loop already exited.
                if tx.send(event).is_err() {
                    return;
                }
            }
        });

        Self { rx, cancel }
    }

    /// Next event, or `None` once the input task has stopped.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }

    /// Ask the input task to shut down.
    pub fn stop(&self) {
        self.cancel.cancel();
    }
}

// Going out of scope shuts the input task down too.
impl Drop for EventReader {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Interval that skips missed ticks instead of bursting to catch up.
fn ticker(period: Duration) -> Interval {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval
}

fn terminal_event(raw: CrosstermEvent) -> Option<Event> {
    match raw {
        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Event::Key(key)),
        CrosstermEvent::Resize(cols, rows) => Some(Event::Resize(cols, rows)),
        // Mouse, focus, paste and key-release events are unused.
        _ => None,
    }
}
