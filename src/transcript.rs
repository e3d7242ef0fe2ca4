//! The transcript: everything the terminal has printed so far.
//!
//! Only the dispatcher mutates a transcript; the rendering layer reads it.

use crate::commands::Payload;

/// The prompt marker that follows the identity in every echo line.
pub const PROMPT_SUFFIX: &str = ":~$ ";

/// One rendered unit of output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptEntry {
    /// The prompt followed by the line the user submitted.
    Echo(String),
    /// A command result or the not-found message.
    Output(Payload),
    /// A side effect that failed after its command ran.
    Error(String),
}

impl TranscriptEntry {
    /// The entry as plain text, as a script or report sees it.
    pub fn to_plain(&self) -> String {
        match self {
            Self::Echo(text) | Self::Error(text) => text.clone(),
            Self::Output(payload) => payload.to_plain(),
        }
    }
}

/// Splits an echo line at its first `:` into the identity and the remainder.
///
/// The remainder keeps the colon, so concatenating both halves gives back the
/// original line. Later colons (for example inside the command) are untouched.
/// A line without a colon is all identity.
pub fn split_echo(echo: &str) -> (&str, &str) {
    match echo.find(':') {
        Some(idx) => echo.split_at(idx),
        None => (echo, ""),
    }
}

/// Append-only sequence of entries, emptied only by `clear`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    /// Creates an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, entry: TranscriptEntry) {
        self.entries.push(entry);
    }

    pub(crate) fn reset(&mut self) {
        self.entries.clear();
    }

    /// All entries in chronological order.
    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been printed since the last clear.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
