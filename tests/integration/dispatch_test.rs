//! End-to-end key sequences through the interpreter and dispatcher.

use pretty_assertions::assert_eq;
use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};
use termfeed::banner::WelcomeBanner;
use termfeed::commands::{CommandDefinition, DispatchOutcome, Dispatcher, Payload, Prompt, Registry};
use termfeed::error::TermError;
use termfeed::input::{KeyInput, KeyInterpreter, KeyOutcome};
use termfeed::transcript::TranscriptEntry;
use termfeed::tui::App;

fn echo(text: &str) -> TranscriptEntry {
    TranscriptEntry::Echo(text.to_string())
}

fn output(text: &str) -> TranscriptEntry {
    TranscriptEntry::Output(Payload::text(text))
}

fn help_app() -> App {
    let registry = Registry::new(vec![CommandDefinition::new("help").with_payload("H")], false);
    let dispatcher = Dispatcher::new(registry, Prompt::new("Ed", "box"));
    let banner = WelcomeBanner::new("", Duration::ZERO, Instant::now());
    App::new(dispatcher, banner)
}

fn press_all(app: &mut App, keys: &[&str]) {
    for key in keys {
        app.press(&KeyInput::from_name(*key));
    }
}

#[test]
fn test_help_scenario() {
    let mut app = help_app();
    press_all(&mut app, &["h", "e", "l", "p", "Enter"]);

    assert_eq!(
        app.transcript().entries(),
        &[echo("Ed@box:~$ help"), output("H")]
    );
    assert_eq!(app.line().as_str(), "");
}

#[test]
fn test_unknown_command_scenario() {
    let mut app = help_app();
    press_all(&mut app, &["x", "y", "z", "Enter"]);

    assert_eq!(
        app.transcript().entries(),
        &[echo("Ed@box:~$ xyz"), output("'xyz': command not found.")]
    );
}

#[test]
fn test_empty_line_scenario() {
    let mut app = help_app();
    press_all(&mut app, &["a", "Backspace", "Backspace", "Enter"]);

    assert_eq!(
        app.transcript().entries(),
        &[echo("Ed@box:~$ "), output("'': command not found.")]
    );
}

#[test]
fn test_line_buffer_is_concatenation_of_printable_keys() {
    let mut interpreter = KeyInterpreter::new();
    let keys = [
        "H", "Shift", "i", "ArrowLeft", " ", "F5", "日", "Tab", "!", "Escape", "Control",
    ];
    for key in keys {
        interpreter.handle(&KeyInput::from_name(key));
    }
    assert_eq!(interpreter.buffer().as_str(), "Hi 日!");
}

#[test]
fn test_backspace_on_empty_is_noop() {
    let mut interpreter = KeyInterpreter::new();
    for _ in 0..3 {
        let outcome = interpreter.handle(&KeyInput::from_name(KeyInput::BACKSPACE));
        assert_eq!(outcome, KeyOutcome::Ignored);
    }
    assert!(interpreter.buffer().is_empty());
}

#[test]
fn test_clear_resets_any_length() {
    let mut app = help_app();
    for _ in 0..5 {
        app.type_text("help");
        app.press(&KeyInput::from_name(KeyInput::ENTER));
    }
    assert_eq!(app.transcript().len(), 10);

    app.type_text("clear");
    app.press(&KeyInput::from_name(KeyInput::ENTER));
    assert!(app.transcript().is_empty());
    assert_eq!(app.last_outcome(), Some(&DispatchOutcome::Cleared));
}

#[test]
fn test_host_clear_is_shadowed_by_builtin() {
    let ran = Rc::new(Cell::new(false));
    let flag = Rc::clone(&ran);
    let registry = Registry::new(
        vec![CommandDefinition::new("clear")
            .with_payload("host clear")
            .with_side_effect(move || {
                flag.set(true);
                Ok(())
            })],
        false,
    );
    let mut dispatcher = Dispatcher::new(registry, Prompt::new("Ed", "box"));

    dispatcher.submit("x");
    assert_eq!(dispatcher.submit("clear"), DispatchOutcome::Cleared);
    assert!(dispatcher.transcript().is_empty());
    assert!(!ran.get());
}

#[test]
fn test_host_clear_runs_when_builtin_disabled() {
    let registry = Registry::new(
        vec![CommandDefinition::new("clear").with_payload("host clear")],
        true,
    );
    let mut dispatcher = Dispatcher::new(registry, Prompt::new("Ed", "box"));

    dispatcher.submit("clear");
    assert_eq!(
        dispatcher.transcript().entries(),
        &[echo("Ed@box:~$ clear"), output("host clear")]
    );
}

#[test]
fn test_side_effect_runs_after_output_and_failures_are_rendered() {
    let registry = Registry::new(
        vec![CommandDefinition::new("deploy")
            .with_payload("deploying")
            .with_side_effect(|| Err(TermError::side_effect("no route to host")))],
        false,
    );
    let mut dispatcher = Dispatcher::new(registry, Prompt::new("Ed", "box"));

    let outcome = dispatcher.submit("deploy");
    assert!(matches!(outcome, DispatchOutcome::EffectFailed { .. }));

    let entries = dispatcher.transcript().entries();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0], echo("Ed@box:~$ deploy"));
    assert_eq!(entries[1], output("deploying"));
    assert!(matches!(&entries[2], TranscriptEntry::Error(msg) if msg.contains("no route to host")));
}

#[test]
fn test_command_without_payload_adds_only_echo() {
    let registry = Registry::new(vec![CommandDefinition::new("noop")], false);
    let mut dispatcher = Dispatcher::new(registry, Prompt::new("Ed", "box"));

    assert_eq!(
        dispatcher.submit("noop"),
        DispatchOutcome::Executed { rendered: false }
    );
    assert_eq!(dispatcher.transcript().entries(), &[echo("Ed@box:~$ noop")]);
}

#[test]
fn test_lookup_is_exact() {
    let mut app = help_app();
    for line in ["Help", " help", "help "] {
        app.type_text(line);
        app.press(&KeyInput::from_name(KeyInput::ENTER));
        assert_eq!(app.last_outcome(), Some(&DispatchOutcome::NotFound));
    }
}
