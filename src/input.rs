//! Key interpretation and the line buffer.
//!
//! Keys arrive one at a time as browser-style key identifiers (`"a"`,
//! `"Enter"`, `"ArrowLeft"`, ...). Printable single characters are appended to
//! the buffer, `Backspace` removes the last character, `Enter` submits, and
//! everything else is dropped without complaint.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MediaKeyCode, ModifierKeyCode};
use std::fmt;
use tracing::trace;

/// Key identifiers that never produce input.
pub const IGNORED_KEYS: &[&str] = &[
    // Control keys
    "Escape",
    "Tab",
    "Enter",
    "Shift",
    "Control",
    "Alt",
    "AltGraph",
    "Meta",
    "CapsLock",
    "ArrowUp",
    "ArrowDown",
    "ArrowLeft",
    "ArrowRight",
    "Backspace",
    "Delete",
    "Insert",
    "NumLock",
    "ScrollLock",
    // Function keys
    "F1",
    "F2",
    "F3",
    "F4",
    "F5",
    "F6",
    "F7",
    "F8",
    "F9",
    "F10",
    "F11",
    "F12",
    // Multimedia keys
    "Play",
    "Pause",
    "Stop",
    "PreviousTrack",
    "NextTrack",
    "VolumeUp",
    "VolumeDown",
    "Mute",
    // Navigation keys
    "Home",
    "End",
    "PageUp",
    "PageDown",
    // Windows/Command keys
    "ContextMenu",
];

/// A single key press, identified by its key name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyInput(String);

impl KeyInput {
    /// `Enter` submits the current line.
    pub const ENTER: &'static str = "Enter";
    /// `Backspace` removes the last character.
    pub const BACKSPACE: &'static str = "Backspace";

    /// Wraps a raw key identifier.
    pub fn from_name(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Key press for a single character.
    pub fn from_char(c: char) -> Self {
        Self(c.to_string())
    }

    /// The key identifier.
    pub fn name(&self) -> &str {
        &self.0
    }

    /// Returns true if this key is in the ignored set.
    pub fn is_ignored(&self) -> bool {
        IGNORED_KEYS.contains(&self.0.as_str())
    }

    /// The character this key types, if it types exactly one.
    pub fn printable(&self) -> Option<char> {
        let mut chars = self.0.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if !c.is_control() => Some(c),
            _ => None,
        }
    }
}

impl fmt::Display for KeyInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<KeyEvent> for KeyInput {
    /// Maps a crossterm key event onto the key identifier a browser would report.
    ///
    /// Characters typed together with Control, Alt or Meta map to the modifier's
    /// name, so shortcuts never leak letters into the line. Control and Alt
    /// together are AltGr, which types the character it carries.
    fn from(event: KeyEvent) -> Self {
        let name = match event.code {
            KeyCode::Char(c) if is_alt_graph(event.modifiers) => c.to_string(),
            KeyCode::Char(_) if event.modifiers.contains(KeyModifiers::CONTROL) => {
                "Control".to_string()
            }
            KeyCode::Char(_) if event.modifiers.contains(KeyModifiers::ALT) => "Alt".to_string(),
            KeyCode::Char(_)
                if event
                    .modifiers
                    .intersects(KeyModifiers::META | KeyModifiers::SUPER) =>
            {
                "Meta".to_string()
            }
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Backspace => "Backspace".to_string(),
            KeyCode::Esc => "Escape".to_string(),
            KeyCode::Tab | KeyCode::BackTab => "Tab".to_string(),
            KeyCode::Left => "ArrowLeft".to_string(),
            KeyCode::Right => "ArrowRight".to_string(),
            KeyCode::Up => "ArrowUp".to_string(),
            KeyCode::Down => "ArrowDown".to_string(),
            KeyCode::Home => "Home".to_string(),
            KeyCode::End => "End".to_string(),
            KeyCode::PageUp => "PageUp".to_string(),
            KeyCode::PageDown => "PageDown".to_string(),
            KeyCode::Delete => "Delete".to_string(),
            KeyCode::Insert => "Insert".to_string(),
            KeyCode::F(n) => format!("F{n}"),
            KeyCode::CapsLock => "CapsLock".to_string(),
            KeyCode::ScrollLock => "ScrollLock".to_string(),
            KeyCode::NumLock => "NumLock".to_string(),
            KeyCode::Menu => "ContextMenu".to_string(),
            KeyCode::Pause => "Pause".to_string(),
            KeyCode::PrintScreen => "PrintScreen".to_string(),
            KeyCode::Media(media) => media_key_name(media).to_string(),
            KeyCode::Modifier(modifier) => modifier_key_name(modifier).to_string(),
            KeyCode::Null | KeyCode::KeypadBegin => "Unidentified".to_string(),
        };

        Self(name)
    }
}

/// Windows reports AltGr as Control+Alt.
pub fn is_alt_graph(modifiers: KeyModifiers) -> bool {
    modifiers.contains(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

fn media_key_name(code: MediaKeyCode) -> &'static str {
    match code {
        MediaKeyCode::Play => "Play",
        MediaKeyCode::Pause => "Pause",
        MediaKeyCode::Stop => "Stop",
        MediaKeyCode::TrackPrevious => "PreviousTrack",
        MediaKeyCode::TrackNext => "NextTrack",
        MediaKeyCode::RaiseVolume => "VolumeUp",
        MediaKeyCode::LowerVolume => "VolumeDown",
        MediaKeyCode::MuteVolume => "Mute",
        MediaKeyCode::PlayPause => "MediaPlayPause",
        MediaKeyCode::Reverse => "MediaReverse",
        MediaKeyCode::FastForward => "MediaFastForward",
        MediaKeyCode::Rewind => "MediaRewind",
        MediaKeyCode::Record => "MediaRecord",
    }
}

fn modifier_key_name(code: ModifierKeyCode) -> &'static str {
    match code {
        ModifierKeyCode::LeftShift | ModifierKeyCode::RightShift => "Shift",
        ModifierKeyCode::LeftControl | ModifierKeyCode::RightControl => "Control",
        ModifierKeyCode::LeftAlt | ModifierKeyCode::RightAlt => "Alt",
        ModifierKeyCode::LeftSuper
        | ModifierKeyCode::RightSuper
        | ModifierKeyCode::LeftMeta
        | ModifierKeyCode::RightMeta => "Meta",
        ModifierKeyCode::LeftHyper | ModifierKeyCode::RightHyper => "Hyper",
        ModifierKeyCode::IsoLevel3Shift | ModifierKeyCode::IsoLevel5Shift => "AltGraph",
    }
}

/// The line being typed, not yet submitted.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LineBuffer {
    text: String,
}

impl LineBuffer {
    /// Creates an empty line buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current contents.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Cursor position as a character index. Input is append-only, so the
    /// cursor always sits after the last character.
    pub fn cursor(&self) -> usize {
        self.text.chars().count()
    }

    /// Returns true if nothing has been typed.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Appends a character.
    pub fn push(&mut self, c: char) {
        self.text.push(c);
    }

    /// Removes the last character; does nothing on an empty buffer.
    pub fn pop(&mut self) -> Option<char> {
        self.text.pop()
    }

    /// Empties the buffer and returns what it held.
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.text)
    }
}

/// What a key press did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// A character was appended.
    Inserted(char),
    /// The last character was removed.
    Deleted,
    /// `Enter` was pressed; the buffer was emptied and this is its old content.
    Submitted(String),
    /// The key changed nothing.
    Ignored,
}

/// Turns key presses into edits of a line buffer.
#[derive(Debug, Default)]
pub struct KeyInterpreter {
    buffer: LineBuffer,
}

impl KeyInterpreter {
    /// Creates an interpreter with an empty line.
    pub fn new() -> Self {
        Self::default()
    }

    /// The line typed so far.
    pub fn buffer(&self) -> &LineBuffer {
        &self.buffer
    }

    /// Applies one key press.
    pub fn handle(&mut self, key: &KeyInput) -> KeyOutcome {
        match key.name() {
            KeyInput::BACKSPACE => match self.buffer.pop() {
                Some(_) => KeyOutcome::Deleted,
                None => KeyOutcome::Ignored,
            },
            KeyInput::ENTER => KeyOutcome::Submitted(self.buffer.take()),
            _ if key.is_ignored() => KeyOutcome::Ignored,
            _ => match key.printable() {
                Some(c) => {
                    self.buffer.push(c);
                    KeyOutcome::Inserted(c)
                }
                None => {
                    trace!("Ignoring key {:?}", key.name());
                    KeyOutcome::Ignored
                }
            },
        }
    }
}
