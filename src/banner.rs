//! The welcome banner and its typewriter reveal.

use crate::timer::Timer;
use std::time::{Duration, Instant};

/// Banner text used when the host supplies none.
pub const DEFAULT_WELCOME: &str =
    "Welcome to your terminal. Type `help` to see available commands.";

/// Delay between revealed characters.
pub const DEFAULT_REVEAL_INTERVAL: Duration = Duration::from_millis(10);

/// Introductory text revealed one character per tick.
#[derive(Debug, Clone)]
pub struct WelcomeBanner {
    text: String,
    total: usize,
    revealed: usize,
    timer: Timer,
}

impl WelcomeBanner {
    /// Creates a banner and starts revealing it at `now`.
    ///
    /// A zero interval shows the whole text at once.
    pub fn new(text: impl Into<String>, interval: Duration, now: Instant) -> Self {
        let mut banner = Self {
            text: String::new(),
            total: 0,
            revealed: 0,
            timer: Timer::new(interval),
        };
        banner.set_text(text, now);
        banner
    }

    /// Replaces the text and restarts the reveal from the first character.
    ///
    /// Any tick pending for the previous text is cancelled first.
    pub fn set_text(&mut self, text: impl Into<String>, now: Instant) {
        self.timer.cancel();
        self.text = text.into();
        self.total = self.text.chars().count();
        self.revealed = 0;

        if self.timer.interval().is_zero() {
            self.revealed = self.total;
            return;
        }

        // The first character appears immediately, the rest on ticks.
        self.revealed = self.total.min(1);
        if !self.is_complete() {
            self.timer.start(now);
        }
    }

    /// Advances the reveal; returns true if more text became visible.
    pub fn tick(&mut self, now: Instant) -> bool {
        let ticks = self.timer.poll(now) as usize;
        if ticks == 0 {
            return false;
        }

        self.revealed = self.total.min(self.revealed + ticks);
        if self.is_complete() {
            self.timer.cancel();
        }
        true
    }

    /// Shows the rest of the text and stops the timer.
    pub fn finish(&mut self) {
        self.timer.cancel();
        self.revealed = self.total;
    }

    /// Stops the reveal where it is.
    pub fn cancel(&mut self) {
        self.timer.cancel();
    }

    /// The part of the text revealed so far.
    pub fn visible(&self) -> &str {
        match self.text.char_indices().nth(self.revealed) {
            Some((idx, _)) => &self.text[..idx],
            None => &self.text,
        }
    }

    /// The full text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns true once every character is visible.
    pub fn is_complete(&self) -> bool {
        self.revealed >= self.total
    }

    /// When the next character is due, if the reveal is running.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timer.next_deadline()
    }
}
