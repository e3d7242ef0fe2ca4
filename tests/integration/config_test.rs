//! Config file to running app.

use pretty_assertions::assert_eq;
use std::time::{Duration, Instant};
use termfeed::commands::Payload;
use termfeed::config::Config;
use termfeed::input::KeyInput;
use termfeed::transcript::TranscriptEntry;
use termfeed::tui::App;

const CONFIG: &str = r#"
user_name = "Big Ed"
machine_name = "Work Box"
normalize_identity = true
initial_feed = "hello"
reveal_interval_ms = 5
not_found = "{command}: nope"

[[commands]]
name = "ls"
table = { headers = ["name", "size"], rows = [["a.txt", "1"]] }

[[commands]]
name = "bye"
output = "see you"
effect = "exit"
"#;

fn load() -> Config {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, CONFIG).unwrap();
    Config::load_from_file(&path).unwrap()
}

fn submit(app: &mut App, line: &str) {
    app.type_text(line);
    app.press(&KeyInput::from_name(KeyInput::ENTER));
}

#[test]
fn test_configured_app_runs_commands() {
    let config = load();
    let mut app = App::from_config(&config, Instant::now()).unwrap();

    submit(&mut app, "ls");
    submit(&mut app, "cat");

    assert_eq!(
        app.transcript().entries(),
        &[
            TranscriptEntry::Echo("biged@workbox:~$ ls".to_string()),
            TranscriptEntry::Output(Payload::table(
                vec!["name".to_string(), "size".to_string()],
                vec![vec!["a.txt".to_string(), "1".to_string()]],
            )),
            TranscriptEntry::Echo("biged@workbox:~$ cat".to_string()),
            TranscriptEntry::Output(Payload::text("cat: nope")),
        ]
    );
}

#[test]
fn test_exit_effect_stops_app() {
    let config = load();
    let mut app = App::from_config(&config, Instant::now()).unwrap();

    submit(&mut app, "bye");
    assert!(!app.running);
    assert_eq!(
        app.transcript().entries().last(),
        Some(&TranscriptEntry::Output(Payload::text("see you")))
    );
}

#[test]
fn test_banner_reveals_over_time() {
    let config = load();
    let start = Instant::now();
    let mut app = App::from_config(&config, start).unwrap();

    assert_eq!(app.banner().visible(), "h");
    app.tick(start + Duration::from_millis(5));
    assert_eq!(app.banner().visible(), "he");
    app.tick(start + Duration::from_millis(100));
    assert_eq!(app.banner().visible(), "hello");
    assert!(app.banner().is_complete());
}

#[test]
fn test_invalid_file_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "user_name = 42\n").unwrap();

    let err = Config::load_from_file(&path).unwrap_err();
    assert_eq!(err.category(), "Configuration Error");
}
