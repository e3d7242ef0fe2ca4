//! The step language headless runs are scripted in.
//!
//! A script is a list of `verb:argument` steps separated by commas or
//! newlines. Blank lines and lines starting with `#` are skipped.
//!
//! | step             | does                                               |
//! |------------------|----------------------------------------------------|
//! | `key:Enter`      | presses one key, named the way a browser names it  |
//! | `key:ctrl+c`     | presses a Control chord                            |
//! | `type:help`      | presses one key per character, spaces included     |
//! | `focus:out`      | takes focus away (`focus:in` gives it back)        |
//! | `wait:50`        | sleeps that many milliseconds, then ticks          |
//! | `resize:40x10`   | resizes the screen                                 |
//! | `expect:...`     | checks the screen or the terminal, see [`Check`]   |

use super::parse_size;
use crate::commands::DispatchOutcome;
use crate::error::{Result, TermError};
use crate::input::{KeyInput, IGNORED_KEYS};
use crate::transcript::TranscriptEntry;
use crate::tui::app::App;
use regex::Regex;
use std::time::Duration;

/// Short spellings accepted besides the full key identifiers.
const KEY_ALIASES: &[(&str, &str)] = &[
    ("esc", "Escape"),
    ("space", " "),
    ("left", "ArrowLeft"),
    ("right", "ArrowRight"),
    ("up", "ArrowUp"),
    ("down", "ArrowDown"),
    ("pgup", "PageUp"),
    ("pgdn", "PageDown"),
];

/// Something a script does to the terminal.
#[derive(Debug, Clone)]
pub enum Step {
    /// One key press.
    Key(KeyInput),
    /// Control plus a character.
    Ctrl(char),
    /// One key press per character.
    Type(String),
    /// Focus gained (`true`) or lost.
    Focus(bool),
    /// Sleep, then let timers fire.
    Wait(Duration),
    /// New screen size in columns and rows.
    Resize(u16, u16),
    /// A check that counts as passed or failed.
    Expect(Check),
}

/// A parsed step together with the text it was written as.
#[derive(Debug, Clone)]
pub struct ScriptStep {
    pub source: String,
    pub step: Step,
}

/// What an `expect:` step looks at.
///
/// | check                  | holds when                                  |
/// |------------------------|---------------------------------------------|
/// | `screen:TEXT`          | TEXT appears on screen                      |
/// | `hidden:TEXT`          | TEXT does not appear on screen              |
/// | `matches:REGEX`        | the screen matches REGEX                    |
/// | `line:TEXT`            | the unsubmitted line is exactly TEXT        |
/// | `last:TEXT`            | the newest transcript entry is exactly TEXT |
/// | `outcome:NAME`         | the last submission ended as NAME           |
/// | `entries:N`            | the transcript holds N entries              |
/// | `bells:N`              | N bells have rung                           |
/// | `focused:BOOL`         | focus is as given                           |
#[derive(Debug, Clone)]
pub enum Check {
    OnScreen(String),
    OffScreen(String),
    Pattern(Regex),
    Line(String),
    LastEntry(String),
    Outcome(&'static str),
    Entries(usize),
    Bells(usize),
    Focused(bool),
}

impl Check {
    /// Evaluates the check against the drawn screen and the live app.
    pub fn holds(&self, screen: &str, app: &App, bells: usize) -> bool {
        match self {
            Self::OnScreen(text) => screen.contains(text.as_str()),
            Self::OffScreen(text) => !screen.contains(text.as_str()),
            Self::Pattern(pattern) => pattern.is_match(screen),
            Self::Line(text) => app.line().as_str() == text,
            Self::LastEntry(text) => app
                .transcript()
                .entries()
                .last()
                .map(TranscriptEntry::to_plain)
                .is_some_and(|last| last == *text),
            Self::Outcome(label) => app.last_outcome().map(DispatchOutcome::label) == Some(*label),
            Self::Entries(count) => app.transcript().len() == *count,
            Self::Bells(count) => bells == *count,
            Self::Focused(focused) => app.focused == *focused,
        }
    }
}

/// Parses a whole script.
pub fn parse_script(script: &str) -> Result<Vec<ScriptStep>> {
    script
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split(','))
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(parse_step)
        .collect()
}

/// Parses one `verb:argument` step.
pub fn parse_step(source: &str) -> Result<ScriptStep> {
    let (verb, arg) = source
        .split_once(':')
        .ok_or_else(|| TermError::script(format!("'{source}' is not a verb:argument step")))?;

    let step = match verb.trim() {
        "key" => parse_key(arg.trim())?,
        // Not trimmed, so leading spaces can be typed.
        "type" => Step::Type(arg.to_string()),
        "focus" => match arg.trim() {
            "in" => Step::Focus(true),
            "out" => Step::Focus(false),
            other => {
                return Err(TermError::script(format!(
                    "focus takes 'in' or 'out', not '{other}'"
                )))
            }
        },
        "wait" => {
            let millis = arg.trim();
            let millis = millis.strip_suffix("ms").unwrap_or(millis);
            let millis = millis
                .parse()
                .map_err(|_| TermError::script(format!("wait takes milliseconds, not '{arg}'")))?;
            Step::Wait(Duration::from_millis(millis))
        }
        "resize" => {
            let (width, height) = parse_size(arg.trim()).map_err(TermError::script)?;
            Step::Resize(width, height)
        }
        "expect" => Step::Expect(parse_check(arg)?),
        other => {
            return Err(TermError::script(format!(
                "unknown step '{other}' (expected key, type, focus, wait, resize or expect)"
            )))
        }
    };

    Ok(ScriptStep {
        source: source.to_string(),
        step,
    })
}

/// Resolves a key name to the identifier the interpreter sees.
///
/// Names are matched case-insensitively against the known identifiers and
/// the aliases. Anything else is passed on verbatim, and the interpreter
/// ignores unknown multi-character names.
fn parse_key(name: &str) -> Result<Step> {
    if let Some(chord) = name.strip_prefix("ctrl+") {
        let mut chars = chord.chars();
        return match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(Step::Ctrl(c)),
            _ => Err(TermError::script(format!(
                "ctrl+ takes a single character, not '{chord}'"
            ))),
        };
    }

    if name.chars().count() == 1 {
        return Ok(Step::Key(KeyInput::from_name(name)));
    }

    let known = KEY_ALIASES
        .iter()
        .find(|(alias, _)| alias.eq_ignore_ascii_case(name))
        .map(|(_, key)| *key)
        .or_else(|| {
            IGNORED_KEYS
                .iter()
                .copied()
                .find(|key| key.eq_ignore_ascii_case(name))
        });

    Ok(Step::Key(KeyInput::from_name(known.unwrap_or(name))))
}

fn parse_check(arg: &str) -> Result<Check> {
    let (kind, value) = arg
        .split_once(':')
        .ok_or_else(|| TermError::script(format!("'{arg}' is not a kind:value check")))?;

    let count = |value: &str| {
        value
            .trim()
            .parse::<usize>()
            .map_err(|_| TermError::script(format!("{kind} takes a count, not '{value}'")))
    };

    let check = match kind.trim() {
        "screen" => Check::OnScreen(value.to_string()),
        "hidden" => Check::OffScreen(value.to_string()),
        "matches" => Check::Pattern(
            Regex::new(value)
                .map_err(|e| TermError::script(format!("invalid pattern '{value}': {e}")))?,
        ),
        "line" => Check::Line(value.to_string()),
        "last" => Check::LastEntry(value.to_string()),
        "outcome" => {
            let label = DispatchOutcome::LABELS
                .iter()
                .copied()
                .find(|label| *label == value.trim())
                .ok_or_else(|| {
                    TermError::script(format!(
                        "unknown outcome '{value}' (expected one of {})",
                        DispatchOutcome::LABELS.join(", ")
                    ))
                })?;
            Check::Outcome(label)
        }
        "entries" => Check::Entries(count(value)?),
        "bells" => Check::Bells(count(value)?),
        "focused" => Check::Focused(
            value
                .trim()
                .parse()
                .map_err(|_| TermError::script(format!("focused takes true or false, not '{value}'")))?,
        ),
        other => {
            return Err(TermError::script(format!("unknown check '{other}'")));
        }
    };

    Ok(check)
}
