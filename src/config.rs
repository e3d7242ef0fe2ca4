//! Configuration management for termfeed.
//!
//! Handles loading the prompt identity, welcome text and command table from a
//! TOML file. Values given on the command line are applied on top by the
//! binary.

use crate::banner::{DEFAULT_REVEAL_INTERVAL, DEFAULT_WELCOME};
use crate::commands::{
    build_side_effect, CommandDefinition, EffectSignals, Payload, Prompt, Registry,
};
use crate::error::{Result, TermError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

/// Placeholder replaced by the submitted line in a not-found template.
pub const COMMAND_PLACEHOLDER: &str = "{command}";

/// Main configuration structure for termfeed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// User name shown in the prompt.
    #[serde(default = "default_user_name")]
    pub user_name: String,

    /// Machine name shown in the prompt.
    #[serde(default = "default_machine_name")]
    pub machine_name: String,

    /// Strip whitespace from and lowercase both identity strings.
    #[serde(default)]
    pub normalize_identity: bool,

    /// Welcome banner text.
    #[serde(default = "default_initial_feed")]
    pub initial_feed: String,

    /// Not-found message template; `{command}` is replaced by the line.
    #[serde(default)]
    pub not_found: Option<String>,

    /// Turn off the built-in `clear` command.
    #[serde(default)]
    pub disable_clear: bool,

    /// Milliseconds between banner characters (0 = show at once).
    #[serde(default = "default_reveal_interval_ms")]
    pub reveal_interval_ms: u64,

    /// The command table, in lookup order.
    #[serde(default)]
    pub commands: Vec<CommandConfig>,
}

fn default_user_name() -> String {
    "guest".to_string()
}

fn default_machine_name() -> String {
    "termfeed".to_string()
}

fn default_initial_feed() -> String {
    DEFAULT_WELCOME.to_string()
}

fn default_reveal_interval_ms() -> u64 {
    DEFAULT_REVEAL_INTERVAL.as_millis() as u64
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_name: default_user_name(),
            machine_name: default_machine_name(),
            normalize_identity: false,
            initial_feed: default_initial_feed(),
            not_found: None,
            disable_clear: false,
            reveal_interval_ms: default_reveal_interval_ms(),
            commands: Vec::new(),
        }
    }
}

/// One entry of the command table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommandConfig {
    /// Exact text that selects this command.
    pub name: String,

    /// Text printed when the command runs.
    #[serde(default)]
    pub output: Option<String>,

    /// Table printed when the command runs.
    #[serde(default)]
    pub table: Option<TableConfig>,

    /// Side effect run after the output is printed.
    #[serde(default)]
    pub effect: Option<EffectConfig>,
}

/// Tabular command output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableConfig {
    /// Column headers.
    pub headers: Vec<String>,

    /// Rows; each must have one cell per header.
    #[serde(default)]
    pub rows: Vec<Vec<String>>,
}

/// Side effects available to configured commands.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EffectConfig {
    /// Ring the terminal bell.
    Bell,
    /// Quit after the command is shown.
    Exit,
    /// Write a line to the log.
    Log(String),
}

impl CommandConfig {
    /// The payload this command renders, if any.
    pub fn payload(&self) -> Option<Payload> {
        if let Some(text) = &self.output {
            return Some(Payload::text(text.clone()));
        }
        self.table
            .as_ref()
            .map(|t| Payload::table(t.headers.clone(), t.rows.clone()))
    }

    /// Builds the runtime definition, wiring its side effect to `signals`.
    pub fn to_definition(&self, signals: &Rc<EffectSignals>) -> CommandDefinition {
        let mut definition = CommandDefinition::new(self.name.clone());
        if let Some(payload) = self.payload() {
            definition = definition.with_payload(payload);
        }
        if let Some(effect) = &self.effect {
            let effect = build_side_effect(effect, signals);
            definition = definition.with_side_effect(effect);
        }
        definition
    }

    fn validate(&self) -> Result<()> {
        if self.output.is_some() && self.table.is_some() {
            return Err(TermError::config(format!(
                "command '{}' sets both output and table",
                self.name
            )));
        }

        if let Some(table) = &self.table {
            if let Some((idx, row)) = table
                .rows
                .iter()
                .enumerate()
                .find(|(_, row)| row.len() != table.headers.len())
            {
                return Err(TermError::config(format!(
                    "command '{}': table row {} has {} cells, expected {}",
                    self.name,
                    idx + 1,
                    row.len(),
                    table.headers.len()
                )));
            }
        }

        Ok(())
    }
}

impl Config {
    /// Returns the default config file path for the current platform.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("termfeed")
            .join("config.toml")
    }

    /// Loads configuration from a TOML file.
    ///
    /// A missing file yields the default configuration.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| TermError::config(format!("Failed to read config file: {e}")))?;

        Self::parse_toml(&content, path)
    }

    /// Parses configuration from a TOML string.
    fn parse_toml(content: &str, path: &Path) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| {
            TermError::config(format!(
                "Configuration error in {}:\n  {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks constraints serde cannot express.
    pub fn validate(&self) -> Result<()> {
        self.commands.iter().try_for_each(CommandConfig::validate)
    }

    /// The prompt identity, normalized if requested.
    pub fn prompt(&self) -> Prompt {
        let prompt = Prompt::new(self.user_name.clone(), self.machine_name.clone());
        if self.normalize_identity {
            prompt.normalized()
        } else {
            prompt
        }
    }

    /// Delay between revealed banner characters.
    pub fn reveal_interval(&self) -> Duration {
        Duration::from_millis(self.reveal_interval_ms)
    }

    /// Builds the registry, wiring side effects to `signals`.
    pub fn registry(&self, signals: &Rc<EffectSignals>) -> Registry {
        let commands = self
            .commands
            .iter()
            .map(|c| c.to_definition(signals))
            .collect();
        Registry::new(commands, self.disable_clear)
    }
}

/// Fills a not-found template with the submitted line.
pub fn render_not_found(template: &str, line: &str) -> Payload {
    Payload::Text(template.replace(COMMAND_PLACEHOLDER, line))
}
