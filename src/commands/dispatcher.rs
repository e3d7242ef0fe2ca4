//! Submission handling: echo, lookup, render, side effect.
//!
//! `Dispatcher::submit` is the only place the transcript changes. It runs to
//! completion before the next key is read and performs no I/O of its own.

use super::definitions::{Lookup, Registry};
use super::output::Payload;
use crate::transcript::{Transcript, TranscriptEntry, PROMPT_SUFFIX};
use std::fmt;
use tracing::{debug, info, warn};

/// Builds the result entry for a line that matched no command.
pub type NotFoundHandler = Box<dyn Fn(&str) -> Payload>;

/// The default not-found message.
pub fn default_not_found(line: &str) -> Payload {
    Payload::Text(format!("'{line}': command not found."))
}

/// The `user@machine` identity shown in the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    user: String,
    machine: String,
}

impl Prompt {
    /// Creates a prompt identity from the given names, verbatim.
    pub fn new(user: impl Into<String>, machine: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            machine: machine.into(),
        }
    }

    /// Returns a copy with whitespace removed and both names lowercased.
    pub fn normalized(&self) -> Self {
        fn normalize(s: &str) -> String {
            s.chars()
                .filter(|c| !c.is_whitespace())
                .flat_map(char::to_lowercase)
                .collect()
        }

        Self {
            user: normalize(&self.user),
            machine: normalize(&self.machine),
        }
    }

    /// `user@machine`.
    pub fn identity(&self) -> String {
        format!("{}@{}", self.user, self.machine)
    }

    /// The echo line recorded for a submitted command.
    pub fn echo(&self, line: &str) -> String {
        format!("{}{}{}", self.identity(), PROMPT_SUFFIX, line)
    }
}

/// What a single submission did to the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// No command matched; a not-found entry was appended.
    NotFound,
    /// The built-in `clear` ran; the transcript is now empty.
    Cleared,
    /// A command ran; `rendered` is false when it had no payload.
    Executed { rendered: bool },
    /// A command ran but its side effect failed; an error entry was appended.
    EffectFailed { message: String },
}

impl DispatchOutcome {
    /// Every value [`label`](Self::label) can return.
    pub const LABELS: [&'static str; 4] = ["not-found", "cleared", "executed", "effect-failed"];

    /// Short kebab-case name of the variant.
    pub fn label(&self) -> &'static str {
        match self {
            Self::NotFound => "not-found",
            Self::Cleared => "cleared",
            Self::Executed { .. } => "executed",
            Self::EffectFailed { .. } => "effect-failed",
        }
    }
}

/// Owns the registry and the transcript and applies submitted lines to them.
pub struct Dispatcher {
    registry: Registry,
    prompt: Prompt,
    not_found: NotFoundHandler,
    transcript: Transcript,
}

impl Dispatcher {
    /// Creates a dispatcher with the default not-found message.
    pub fn new(registry: Registry, prompt: Prompt) -> Self {
        Self {
            registry,
            prompt,
            not_found: Box::new(default_not_found),
            transcript: Transcript::new(),
        }
    }

    /// Replaces the not-found message builder.
    pub fn with_not_found<F>(mut self, handler: F) -> Self
    where
        F: Fn(&str) -> Payload + 'static,
    {
        self.not_found = Box::new(handler);
        self
    }

    /// The prompt identity.
    pub fn prompt(&self) -> &Prompt {
        &self.prompt
    }

    /// The command table.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Read-only view of everything printed so far.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Applies one submitted line to the transcript.
    ///
    /// Side-effect failures are caught and rendered as an error entry after
    /// the command's output; they never abort the dispatch.
    pub fn submit(&mut self, line: &str) -> DispatchOutcome {
        self.transcript
            .push(TranscriptEntry::Echo(self.prompt.echo(line)));

        let command = match self.registry.lookup(line) {
            Lookup::NotFound => {
                debug!("Command not found: {:?}", line);
                self.transcript
                    .push(TranscriptEntry::Output((self.not_found)(line)));
                return DispatchOutcome::NotFound;
            }
            Lookup::Clear => {
                debug!("Clearing {} transcript entries", self.transcript.len());
                self.transcript.reset();
                return DispatchOutcome::Cleared;
            }
            Lookup::Command(command) => command,
        };

        info!("Running command '{}'", command.name());

        let rendered = match command.payload() {
            Some(payload) => {
                self.transcript
                    .push(TranscriptEntry::Output(payload.clone()));
                true
            }
            None => false,
        };

        if let Some(effect) = command.side_effect() {
            if let Err(e) = effect() {
                warn!("Side effect of '{}' failed: {}", command.name(), e);
                let message = e.to_string();
                self.transcript.push(TranscriptEntry::Error(message.clone()));
                return DispatchOutcome::EffectFailed { message };
            }
        }

        DispatchOutcome::Executed { rendered }
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("registry", &self.registry)
            .field("prompt", &self.prompt)
            .field("transcript", &self.transcript)
            .finish_non_exhaustive()
    }
}
