//! Application state for the TUI.
//!
//! `App` ties the key interpreter, the dispatcher and the welcome banner
//! together and is the single owner of all mutable widget state.

use super::Event;
use crate::banner::WelcomeBanner;
use crate::commands::{DispatchOutcome, Dispatcher, EffectSignals};
use crate::config::{render_not_found, Config};
use crate::error::Result;
use crate::input::{is_alt_graph, KeyInput, KeyInterpreter, KeyOutcome, LineBuffer};
use crate::transcript::Transcript;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::rc::Rc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Lines moved per PageUp/PageDown.
pub const SCROLL_PAGE: usize = 10;

/// Main application state.
pub struct App {
    /// Whether the application is still running.
    pub running: bool,
    /// Whether the widget has input focus (drives caret visibility).
    pub focused: bool,
    /// Transcript scroll offset (lines from bottom).
    pub scroll: usize,
    interpreter: KeyInterpreter,
    dispatcher: Dispatcher,
    banner: WelcomeBanner,
    signals: Rc<EffectSignals>,
    last_outcome: Option<DispatchOutcome>,
}

impl App {
    /// Creates an app around a ready dispatcher and banner.
    pub fn new(dispatcher: Dispatcher, banner: WelcomeBanner) -> Self {
        Self {
            running: true,
            focused: true,
            scroll: 0,
            interpreter: KeyInterpreter::new(),
            dispatcher,
            banner,
            signals: Rc::new(EffectSignals::new()),
            last_outcome: None,
        }
    }

    /// Uses `signals` as the channel side effects report through.
    pub fn with_signals(mut self, signals: Rc<EffectSignals>) -> Self {
        self.signals = signals;
        self
    }

    /// Builds the app described by a configuration file.
    pub fn from_config(config: &Config, now: Instant) -> Result<Self> {
        config.validate()?;

        let signals = Rc::new(EffectSignals::new());
        let mut dispatcher = Dispatcher::new(config.registry(&signals), config.prompt());
        if let Some(template) = config.not_found.clone() {
            dispatcher = dispatcher.with_not_found(move |line| render_not_found(&template, line));
        }

        let banner = WelcomeBanner::new(config.initial_feed.clone(), config.reveal_interval(), now);

        info!(
            "Terminal ready as {} with commands: {}",
            config.prompt().identity(),
            dispatcher.registry().names().join(", ")
        );

        Ok(Self::new(dispatcher, banner).with_signals(signals))
    }

    /// Handles an event and updates application state.
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Focus(focused) => {
                debug!("Focus changed: {}", focused);
                self.focused = focused;
            }
            Event::Resize(width, height) => {
                debug!("Terminal resized to {}x{}", width, height);
            }
            Event::Tick => {}
        }
        self.tick(Instant::now());
    }

    /// Handles a crossterm key event.
    ///
    /// Ctrl+C and Ctrl+D quit; everything else goes through [`App::press`].
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        let quit = matches!(key.code, KeyCode::Char('c') | KeyCode::Char('d'))
            && key.modifiers.contains(KeyModifiers::CONTROL)
            && !is_alt_graph(key.modifiers);
        if quit {
            self.running = false;
            return;
        }

        self.press(&KeyInput::from(key));
    }

    /// Feeds one key to the interpreter and dispatches on submission.
    ///
    /// `PageUp` and `PageDown` also scroll the transcript.
    pub fn press(&mut self, key: &KeyInput) -> KeyOutcome {
        match key.name() {
            "PageUp" => self.scroll = self.scroll.saturating_add(SCROLL_PAGE),
            "PageDown" => self.scroll = self.scroll.saturating_sub(SCROLL_PAGE),
            _ => {}
        }

        let outcome = self.interpreter.handle(key);

        if let KeyOutcome::Submitted(line) = &outcome {
            let dispatched = self.dispatcher.submit(line);
            debug!("Dispatched {:?}: {:?}", line, dispatched);
            self.last_outcome = Some(dispatched);
            // Follow the newest output.
            self.scroll = 0;

            if self.signals.exit_requested() {
                info!("Exit requested by command '{}'", line);
                self.running = false;
            }
        }

        outcome
    }

    /// Types each character of `text` as a separate key press.
    pub fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.press(&KeyInput::from_char(c));
        }
    }

    /// Advances time-driven state (the banner reveal).
    pub fn tick(&mut self, now: Instant) {
        self.banner.tick(now);
    }

    /// How long the event loop may wait before the next tick is due.
    pub fn poll_timeout(&self, now: Instant, max: Duration) -> Duration {
        match self.banner.next_deadline() {
            Some(deadline) => deadline.saturating_duration_since(now).min(max),
            None => max,
        }
    }

    /// Shows the whole banner immediately.
    pub fn finish_banner(&mut self) {
        self.banner.finish();
    }

    /// Consumes one pending bell request raised by a side effect.
    pub fn take_bell_request(&self) -> bool {
        self.signals.take_bell_request()
    }

    /// The line being typed.
    pub fn line(&self) -> &LineBuffer {
        self.interpreter.buffer()
    }

    /// Everything printed so far.
    pub fn transcript(&self) -> &Transcript {
        self.dispatcher.transcript()
    }

    /// The dispatcher (prompt identity and command table).
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// The welcome banner.
    pub fn banner(&self) -> &WelcomeBanner {
        &self.banner
    }

    /// Outcome of the most recent submission.
    pub fn last_outcome(&self) -> Option<&DispatchOutcome> {
        self.last_outcome.as_ref()
    }
}
