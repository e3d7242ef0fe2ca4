//! Headless runs: the terminal drawn into memory and driven by a script.
//!
//! Backs the `--headless` flag and the binary-level tests. The app is the
//! same one the real terminal runs; only the backend differs.

mod report;
mod script;

pub use report::{render_report, screen_text, ReportFormat};
pub use script::{parse_script, parse_step, Check, ScriptStep, Step};

use crate::config::Config;
use crate::error::{Result, TermError};
use crate::transcript::TranscriptEntry;
use crate::tui::app::App;
use crate::tui::{ui, Event};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Parses a `WIDTHxHEIGHT` screen size. Both sides must be non-zero.
pub fn parse_size(size: &str) -> std::result::Result<(u16, u16), String> {
    let invalid = || format!("'{size}' is not a WIDTHxHEIGHT size such as 80x24");

    let (width, height) = size.split_once('x').ok_or_else(invalid)?;
    let width: u16 = width.trim().parse().map_err(|_| invalid())?;
    let height: u16 = height.trim().parse().map_err(|_| invalid())?;

    if width == 0 || height == 0 {
        return Err(format!("screen size must be non-zero, got '{size}'"));
    }
    Ok((width, height))
}

/// Settings for one headless run.
#[derive(Debug, Clone)]
pub struct HeadlessConfig {
    pub width: u16,
    pub height: u16,
    pub report: ReportFormat,
    /// Stop at the first failed check.
    pub fail_fast: bool,
    /// Where the report goes; stdout when unset.
    pub output_file: Option<PathBuf>,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            width: 80,
            height: 24,
            report: ReportFormat::Text,
            fail_fast: false,
            output_file: None,
        }
    }
}

/// The terminal's state when the run ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadlessState {
    pub input_text: String,
    pub cursor: usize,
    pub transcript_len: usize,
    pub focused: bool,
    pub running: bool,
    pub scroll: usize,
    pub bells: usize,
    /// Label of the last submission's outcome, if anything was submitted.
    pub last_outcome: Option<&'static str>,
}

impl HeadlessState {
    fn capture(app: &App, bells: usize) -> Self {
        Self {
            input_text: app.line().as_str().to_string(),
            cursor: app.line().cursor(),
            transcript_len: app.transcript().len(),
            focused: app.focused,
            running: app.running,
            scroll: app.scroll,
            bells,
            last_outcome: app.last_outcome().map(|outcome| outcome.label()),
        }
    }
}

/// Passed and failed `expect:` steps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CheckTally {
    pub passed: usize,
    pub failed: usize,
}

/// The screen as it looked after one step.
#[derive(Debug, Clone)]
pub struct Frame {
    /// The step's source text, or `start` before the first step.
    pub label: String,
    pub screen: String,
}

/// Everything a headless run found out.
#[derive(Debug, Serialize)]
pub struct HeadlessResult {
    pub screen: String,
    pub screen_lines: Vec<String>,
    /// Transcript entries as plain text, oldest first.
    pub transcript: Vec<String>,
    pub steps_run: usize,
    pub duration_ms: u64,
    pub checks: CheckTally,
    pub state: HeadlessState,
    /// Only collected for the frames report.
    #[serde(skip)]
    pub frames: Vec<Frame>,
}

/// Drives an [`App`] drawn into a [`TestBackend`].
pub struct HeadlessRunner {
    terminal: Terminal<TestBackend>,
    app: App,
    fail_fast: bool,
    keep_frames: bool,
    bells: usize,
    checks: CheckTally,
    frames: Vec<Frame>,
}

impl HeadlessRunner {
    /// Wraps an app. The banner is shown in full so screens do not depend
    /// on timing.
    pub fn new(config: &HeadlessConfig, mut app: App) -> Result<Self> {
        let terminal = Terminal::new(TestBackend::new(config.width, config.height))
            .map_err(|e| TermError::internal(format!("Failed to create test terminal: {e}")))?;

        app.finish_banner();

        Ok(Self {
            terminal,
            app,
            fail_fast: config.fail_fast,
            keep_frames: config.report == ReportFormat::Frames,
            bells: 0,
            checks: CheckTally::default(),
            frames: Vec::new(),
        })
    }

    /// Builds the app `config` describes and wraps it.
    pub fn from_config(headless: &HeadlessConfig, config: &Config) -> Result<Self> {
        let app = App::from_config(config, Instant::now())?;
        Self::new(headless, app)
    }

    /// Runs `steps` in order. Stops early when the app exits, or at a failed
    /// check under `fail_fast`.
    pub fn run(mut self, steps: &[ScriptStep]) -> Result<HeadlessResult> {
        let started = Instant::now();
        if self.keep_frames {
            self.snapshot("start")?;
        }

        let mut steps_run = 0;
        for ScriptStep { source, step } in steps {
            let verdict = self.apply(step)?;
            steps_run += 1;

            while self.app.take_bell_request() {
                self.bells += 1;
            }
            if self.keep_frames {
                self.snapshot(source)?;
            }

            if verdict == Some(false) {
                warn!("Check failed: {}", source);
                if self.fail_fast {
                    break;
                }
            }
            if !self.app.running {
                debug!("Terminal exited after '{}'", source);
                break;
            }
        }

        self.draw()?;
        let screen = self.screen();
        info!(
            "Headless run done: {} steps, {} checks failed",
            steps_run, self.checks.failed
        );

        Ok(HeadlessResult {
            screen_lines: screen.lines().map(String::from).collect(),
            screen,
            transcript: self
                .app
                .transcript()
                .entries()
                .iter()
                .map(TranscriptEntry::to_plain)
                .collect(),
            steps_run,
            duration_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            checks: self.checks,
            state: HeadlessState::capture(&self.app, self.bells),
            frames: self.frames,
        })
    }

    /// Applies one step. Checks return whether they held.
    fn apply(&mut self, step: &Step) -> Result<Option<bool>> {
        match step {
            Step::Key(key) => {
                self.app.press(key);
            }
            Step::Ctrl(c) => {
                let chord = KeyEvent::new(KeyCode::Char(*c), KeyModifiers::CONTROL);
                self.app.handle_event(Event::Key(chord));
            }
            Step::Type(text) => self.app.type_text(text),
            Step::Focus(focused) => self.app.handle_event(Event::Focus(*focused)),
            Step::Wait(duration) => {
                std::thread::sleep(*duration);
                self.app.tick(Instant::now());
            }
            Step::Resize(width, height) => {
                // The viewport follows the backend, so resize both.
                self.terminal.backend_mut().resize(*width, *height);
                self.terminal
                    .resize(Rect::new(0, 0, *width, *height))
                    .map_err(|e| TermError::internal(format!("Resize failed: {e}")))?;
                self.app.handle_event(Event::Resize(*width, *height));
            }
            Step::Expect(check) => {
                self.draw()?;
                let held = check.holds(&self.screen(), &self.app, self.bells);
                if held {
                    self.checks.passed += 1;
                } else {
                    self.checks.failed += 1;
                }
                return Ok(Some(held));
            }
        }
        Ok(None)
    }

    fn draw(&mut self) -> Result<()> {
        let app = &self.app;
        self.terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| TermError::internal(format!("Failed to render: {e}")))?;
        Ok(())
    }

    fn screen(&self) -> String {
        screen_text(self.terminal.backend().buffer())
    }

    fn snapshot(&mut self, label: &str) -> Result<()> {
        self.draw()?;
        let screen = self.screen();
        self.frames.push(Frame {
            label: label.to_string(),
            screen,
        });
        Ok(())
    }
}

/// Runs `script` against the terminal `config` describes and writes the
/// report.
///
/// Returns the process exit code: 1 if any check failed, else 0.
pub fn run_headless(config: &Config, headless: HeadlessConfig, script: &str) -> Result<i32> {
    let steps = parse_script(script)?;
    debug!("Parsed {} headless steps", steps.len());

    let result = HeadlessRunner::from_config(&headless, config)?.run(&steps)?;
    let report = render_report(&result, headless.report)?;

    match &headless.output_file {
        Some(path) => std::fs::write(path, &report)
            .map_err(|e| TermError::internal(format!("Failed to write report: {e}")))?,
        None => print!("{report}"),
    }

    Ok(i32::from(result.checks.failed > 0))
}
