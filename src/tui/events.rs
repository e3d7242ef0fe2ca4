//! Event handling for the TUI.
//!
//! Processes keyboard, focus and resize events using crossterm.

use crate::error::{Result, TermError};
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent};
use std::time::Duration;

/// Application events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// The terminal gained (`true`) or lost (`false`) input focus.
    Focus(bool),
    /// The terminal was resized.
    Resize(u16, u16),
    /// Nothing arrived before the timeout.
    Tick,
}

impl From<CrosstermEvent> for Event {
    fn from(event: CrosstermEvent) -> Self {
        match event {
            CrosstermEvent::Key(key) => Self::Key(key),
            CrosstermEvent::FocusGained => Self::Focus(true),
            CrosstermEvent::FocusLost => Self::Focus(false),
            CrosstermEvent::Resize(width, height) => Self::Resize(width, height),
            _ => Self::Tick,
        }
    }
}

/// Handles terminal events.
pub struct EventHandler {
    /// Longest time to wait for an event.
    tick_rate: Duration,
}

impl EventHandler {
    /// Creates a new event handler with default tick rate.
    pub fn new() -> Self {
        Self {
            tick_rate: Duration::from_millis(100),
        }
    }

    /// Returns the current tick rate.
    pub fn tick_rate(&self) -> Duration {
        self.tick_rate
    }

    /// Polls for the next event, waiting at most `timeout` (capped at the tick rate).
    ///
    /// Returns `Event::Tick` if nothing arrived in time.
    pub fn next(&self, timeout: Duration) -> Result<Event> {
        let timeout = timeout.min(self.tick_rate);
        if event::poll(timeout)
            .map_err(|e| TermError::terminal(format!("Failed to poll events: {e}")))?
        {
            let event = event::read()
                .map_err(|e| TermError::terminal(format!("Failed to read event: {e}")))?;
            Ok(event.into())
        } else {
            Ok(Event::Tick)
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}
