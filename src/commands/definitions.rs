//! Command definitions and the registry they live in.
//!
//! The registry is an ordered table supplied by the host. Lookup is an exact,
//! case-sensitive string comparison against the command name; when a name is
//! registered twice the earlier definition wins. Unless disabled, an implicit
//! `clear` entry is appended after the host commands and takes precedence over
//! any host command with the same name.

use super::output::Payload;
use crate::error::Result;
use std::collections::HashSet;
use std::fmt;
use tracing::warn;

/// Name of the built-in command that empties the transcript.
pub const CLEAR_COMMAND: &str = "clear";

/// A zero-argument procedure run after a command's payload is appended.
pub type SideEffect = Box<dyn Fn() -> Result<()>>;

/// A single entry in the command table.
pub struct CommandDefinition {
    name: String,
    payload: Option<Payload>,
    side_effect: Option<SideEffect>,
}

impl CommandDefinition {
    /// Creates a command with no payload and no side effect.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            payload: None,
            side_effect: None,
        }
    }

    /// Attaches the payload rendered when the command runs.
    pub fn with_payload(mut self, payload: impl Into<Payload>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    /// Attaches a side effect invoked after the payload is appended.
    pub fn with_side_effect<F>(mut self, effect: F) -> Self
    where
        F: Fn() -> Result<()> + 'static,
    {
        self.side_effect = Some(Box::new(effect));
        self
    }

    /// The exact string a line must equal to select this command.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The payload, if any.
    pub fn payload(&self) -> Option<&Payload> {
        self.payload.as_ref()
    }

    /// The side effect, if any.
    pub fn side_effect(&self) -> Option<&SideEffect> {
        self.side_effect.as_ref()
    }
}

impl fmt::Debug for CommandDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDefinition")
            .field("name", &self.name)
            .field("payload", &self.payload)
            .field("side_effect", &self.side_effect.is_some())
            .finish()
    }
}

/// Result of looking a line up in the registry.
#[derive(Debug)]
pub enum Lookup<'a> {
    /// The built-in `clear` command.
    Clear,
    /// A host-supplied command.
    Command(&'a CommandDefinition),
    /// Nothing matched.
    NotFound,
}

/// Ordered command table plus the implicit `clear` entry.
#[derive(Debug, Default)]
pub struct Registry {
    commands: Vec<CommandDefinition>,
    clear_enabled: bool,
}

impl Registry {
    /// Builds a registry from the host's command table.
    ///
    /// Duplicate names and host commands shadowed by the built-in `clear` are
    /// kept in place but logged, since they can never be selected.
    pub fn new(commands: Vec<CommandDefinition>, disable_clear: bool) -> Self {
        let clear_enabled = !disable_clear;
        let mut seen = HashSet::new();

        for command in &commands {
            if clear_enabled && command.name() == CLEAR_COMMAND {
                warn!("Command 'clear' is shadowed by the built-in clear command");
            } else if !seen.insert(command.name()) {
                warn!(
                    "Command '{}' is registered more than once; the first definition wins",
                    command.name()
                );
            }
        }

        Self {
            commands,
            clear_enabled,
        }
    }

    /// Looks up a line verbatim: no trimming, no case folding.
    pub fn lookup(&self, line: &str) -> Lookup<'_> {
        if self.clear_enabled && line == CLEAR_COMMAND {
            return Lookup::Clear;
        }

        self.commands
            .iter()
            .find(|command| command.name() == line)
            .map_or(Lookup::NotFound, Lookup::Command)
    }

    /// Command names in lookup order, including the built-in `clear` last.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.iter().map(|c| c.name()).collect();
        if self.clear_enabled {
            names.push(CLEAR_COMMAND);
        }
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn help() -> CommandDefinition {
        CommandDefinition::new("help").with_payload("H")
    }

    #[test]
    fn test_lookup_exact_match() {
        let registry = Registry::new(vec![help()], false);
        match registry.lookup("help") {
            Lookup::Command(cmd) => assert_eq!(cmd.payload(), Some(&Payload::text("H"))),
            other => panic!("Expected command, got {:?}", other),
        }
    }

    #[test]
    fn test_lookup_is_case_sensitive_and_untrimmed() {
        let registry = Registry::new(vec![help()], false);
        assert!(matches!(registry.lookup("Help"), Lookup::NotFound));
        assert!(matches!(registry.lookup(" help"), Lookup::NotFound));
        assert!(matches!(registry.lookup("help "), Lookup::NotFound));
    }

    #[test]
    fn test_first_duplicate_wins() {
        let registry = Registry::new(
            vec![
                CommandDefinition::new("ls").with_payload("first"),
                CommandDefinition::new("ls").with_payload("second"),
            ],
            false,
        );
        match registry.lookup("ls") {
            Lookup::Command(cmd) => assert_eq!(cmd.payload(), Some(&Payload::text("first"))),
            other => panic!("Expected command, got {:?}", other),
        }
    }

    #[test]
    fn test_builtin_clear_shadows_host_clear() {
        let registry = Registry::new(
            vec![CommandDefinition::new("clear").with_payload("host clear")],
            false,
        );
        assert!(matches!(registry.lookup("clear"), Lookup::Clear));
    }

    #[test]
    fn test_disabled_clear_uses_host_command() {
        let registry = Registry::new(
            vec![CommandDefinition::new("clear").with_payload("host clear")],
            true,
        );
        assert!(matches!(registry.lookup("clear"), Lookup::Command(_)));
    }

    #[test]
    fn test_disabled_clear_without_host_command_is_not_found() {
        let registry = Registry::new(vec![help()], true);
        assert!(!registry.names().contains(&"clear"));
        assert!(matches!(registry.lookup("clear"), Lookup::NotFound));
    }

    #[test]
    fn test_names_include_builtin_clear_last() {
        let registry = Registry::new(vec![help()], false);
        assert_eq!(registry.names(), vec!["help", "clear"]);

        let registry = Registry::new(vec![help()], true);
        assert_eq!(registry.names(), vec!["help"]);
    }

    #[test]
    fn test_debug_hides_side_effect_body() {
        let cmd = CommandDefinition::new("beep").with_side_effect(|| Ok(()));
        let debug = format!("{:?}", cmd);
        assert!(debug.contains("beep"));
        assert!(debug.contains("side_effect: true"));
    }
}
