//! Command-line argument parsing for termfeed.
//!
//! Uses clap to parse CLI arguments. Identity and feed flags override the
//! matching config file values.

use clap::Parser;
use std::io::Read;
use std::path::PathBuf;
use termfeed::config::Config;
use termfeed::error::{Result, TermError};
use termfeed::tui::headless::{parse_size, HeadlessConfig, ReportFormat};

/// A scripted fake terminal with a configurable command table.
#[derive(Parser, Debug)]
#[command(name = "termfeed")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(long, value_name = "PATH", env = "TERMFEED_CONFIG")]
    pub config: Option<PathBuf>,

    /// User name shown in the prompt
    #[arg(short = 'u', long, value_name = "NAME")]
    pub user: Option<String>,

    /// Machine name shown in the prompt
    #[arg(short = 'm', long, value_name = "NAME")]
    pub machine: Option<String>,

    /// Welcome text revealed when the terminal starts
    #[arg(long, value_name = "TEXT")]
    pub feed: Option<String>,

    /// Turn off the built-in `clear` command
    #[arg(long)]
    pub disable_clear: bool,

    // === Headless mode options ===
    /// Run in headless mode (no terminal UI, for testing/automation)
    #[arg(long)]
    pub headless: bool,

    /// Comma-separated script steps for headless mode (e.g., "type:help,key:Enter")
    #[arg(long, value_name = "EVENTS")]
    pub events: Option<String>,

    /// Path to a script file of steps (use "-" for stdin)
    #[arg(long, value_name = "PATH")]
    pub script: Option<String>,

    /// Screen size for headless mode (WIDTHxHEIGHT, e.g., "80x24")
    #[arg(long, value_name = "SIZE", default_value = "80x24")]
    pub size: String,

    /// Headless report format: text, json or frames
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    pub output: String,

    /// Write the headless report to a file instead of stdout
    #[arg(long, value_name = "PATH")]
    pub output_file: Option<PathBuf>,

    /// Stop at the first failed `expect:` step
    #[arg(long)]
    pub fail_fast: bool,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Returns the config file path to use.
    ///
    /// Uses the --config argument if provided, otherwise the default path.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(Config::default_path)
    }

    /// Applies command-line overrides on top of the file configuration.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(user) = &self.user {
            config.user_name = user.clone();
        }
        if let Some(machine) = &self.machine {
            config.machine_name = machine.clone();
        }
        if let Some(feed) = &self.feed {
            config.initial_feed = feed.clone();
        }
        if self.disable_clear {
            config.disable_clear = true;
        }
    }

    /// Parses the screen size from the --size argument.
    pub fn parse_screen_size(&self) -> std::result::Result<(u16, u16), String> {
        parse_size(&self.size)
    }

    /// Parses the report format from the --output argument.
    pub fn parse_output_format(&self) -> std::result::Result<ReportFormat, String> {
        self.output.parse()
    }

    /// Validates headless mode arguments.
    pub fn validate_headless(&self) -> std::result::Result<(), String> {
        if !self.headless {
            return Ok(());
        }

        if self.events.is_none() && self.script.is_none() {
            return Err("--headless requires --events or --script".to_string());
        }
        if self.events.is_some() && self.script.is_some() {
            return Err("--events and --script cannot be used together".to_string());
        }

        self.parse_screen_size()?;
        self.parse_output_format()?;

        Ok(())
    }

    /// Builds the headless runner settings from the arguments.
    pub fn headless_config(&self) -> Result<HeadlessConfig> {
        let (width, height) = self.parse_screen_size().map_err(TermError::config)?;
        let report = self.parse_output_format().map_err(TermError::config)?;

        Ok(HeadlessConfig {
            width,
            height,
            report,
            fail_fast: self.fail_fast,
            output_file: self.output_file.clone(),
        })
    }

    /// Returns the headless script, reading the script file or stdin.
    pub fn read_events(&self) -> Result<String> {
        if let Some(events) = &self.events {
            return Ok(events.clone());
        }

        match self.script.as_deref() {
            Some("-") => {
                let mut buffer = String::new();
                std::io::stdin()
                    .read_to_string(&mut buffer)
                    .map_err(|e| TermError::script(format!("Failed to read stdin: {e}")))?;
                Ok(buffer)
            }
            Some(path) => std::fs::read_to_string(path)
                .map_err(|e| TermError::script(format!("Failed to read script file: {e}"))),
            None => Ok(String::new()),
        }
    }
}
