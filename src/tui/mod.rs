//! Terminal User Interface for termfeed.
//!
//! Provides the main TUI application loop using ratatui and crossterm.

pub mod app;
mod events;
pub mod headless;
pub mod text;
mod ui;
pub mod widgets;

pub use app::App;
pub use events::{Event, EventHandler};

use crate::config::Config;
use crate::error::{Result, TermError};
use crossterm::{
    event::{DisableFocusChange, EnableFocusChange},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout, Write};
use std::panic;
use std::time::Instant;
use tracing::{debug, info};

/// The main TUI application runner.
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_handler: EventHandler,
}

impl Tui {
    /// Creates a new TUI instance, initializing the terminal.
    pub fn new() -> Result<Self> {
        let terminal = Self::setup_terminal()?;
        Ok(Self {
            terminal,
            event_handler: EventHandler::new(),
        })
    }

    /// Sets up the terminal for TUI rendering.
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()
            .map_err(|e| TermError::terminal(format!("Failed to enable raw mode: {e}")))?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableFocusChange)
            .map_err(|e| TermError::terminal(format!("Failed to enter alternate screen: {e}")))?;

        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend)
            .map_err(|e| TermError::terminal(format!("Failed to create terminal: {e}")))
    }

    /// Restores the terminal to its original state.
    fn restore_terminal(&mut self) -> Result<()> {
        disable_raw_mode()
            .map_err(|e| TermError::terminal(format!("Failed to disable raw mode: {e}")))?;

        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableFocusChange
        )
        .map_err(|e| TermError::terminal(format!("Failed to leave alternate screen: {e}")))?;

        self.terminal
            .show_cursor()
            .map_err(|e| TermError::terminal(format!("Failed to show cursor: {e}")))?;

        Ok(())
    }

    /// Runs the main event loop until the app stops.
    pub fn run(&mut self, mut app: App) -> Result<()> {
        // Set up panic hook to restore terminal on panic
        let original_hook = panic::take_hook();
        panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableFocusChange);
            original_hook(panic_info);
        }));

        let result = self.run_event_loop(&mut app);

        // Restore panic hook
        let _ = panic::take_hook();

        info!("Session ended after {} transcript entries", app.transcript().len());
        result
    }

    fn run_event_loop(&mut self, app: &mut App) -> Result<()> {
        while app.running {
            app.tick(Instant::now());

            if app.take_bell_request() {
                ring_bell()?;
            }

            self.terminal
                .draw(|frame| ui::render(frame, app))
                .map_err(|e| TermError::terminal(format!("Failed to draw: {e}")))?;

            let timeout = app.poll_timeout(Instant::now(), self.event_handler.tick_rate());
            let event = self.event_handler.next(timeout)?;
            if event != Event::Tick {
                debug!("Event: {:?}", event);
            }
            app.handle_event(event);
        }

        // A command may have rung the bell right before exiting.
        while app.take_bell_request() {
            ring_bell()?;
        }

        Ok(())
    }
}

/// Writes the ASCII BEL character.
fn ring_bell() -> Result<()> {
    let mut stdout = io::stdout();
    stdout
        .write_all(b"\x07")
        .and_then(|()| stdout.flush())
        .map_err(|e| TermError::terminal(format!("Failed to ring bell: {e}")))
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = self.restore_terminal();
    }
}

/// Runs the interactive terminal described by `config`.
pub fn run(config: &Config) -> Result<()> {
    let app = App::from_config(config, Instant::now())?;
    let mut tui = Tui::new()?;
    tui.run(app)
}
