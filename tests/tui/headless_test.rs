//! Integration tests for headless mode.

use super::common::{run_headless, run_headless_with_stdin, write_config};
use std::process::Command;

fn json(stdout: &str) -> serde_json::Value {
    serde_json::from_str(stdout).expect("stdout should be JSON")
}

#[test]
fn test_headless_basic_execution() {
    let (code, stdout, _) = run_headless(&["--events", "key:a"]);

    assert_eq!(code, 0, "Expected exit code 0");
    assert!(stdout.contains("steps: 1 run in"));
    assert!(stdout.contains("[Ed@box]$"));
    assert!(stdout.contains("Welcome to the test terminal."));
}

#[test]
fn test_headless_help_scenario() {
    let (code, stdout, _) = run_headless(&[
        "--events",
        "type:help,key:Enter",
        "--output",
        "json",
    ]);

    assert_eq!(code, 0);
    let value = json(&stdout);
    assert_eq!(value["transcript"][0], "Ed@box:~$ help");
    assert_eq!(value["transcript"][1], "H");
    assert_eq!(value["state"]["transcript_len"], 2);
    assert_eq!(value["state"]["input_text"], "");
    assert_eq!(value["state"]["last_outcome"], "executed");
}

#[test]
fn test_headless_not_found_scenario() {
    let (code, stdout, _) = run_headless(&["--events", "type:xyz,key:Enter,expect:outcome:not-found"]);

    assert_eq!(code, 0);
    assert!(stdout.contains("Ed@box:~$ xyz"));
    assert!(stdout.contains("'xyz': command not found."));
}

#[test]
fn test_headless_empty_line_scenario() {
    let (code, stdout, _) = run_headless(&[
        "--events",
        "key:a,key:Backspace,key:Backspace,expect:line:,key:Enter",
        "--output",
        "json",
    ]);

    assert_eq!(code, 0);
    let value = json(&stdout);
    assert_eq!(value["checks"]["passed"], 1);
    assert_eq!(value["transcript"][0], "Ed@box:~$ ");
    assert_eq!(value["transcript"][1], "'': command not found.");
}

#[test]
fn test_headless_clear() {
    let (code, stdout, _) = run_headless(&[
        "--events",
        "type:help,key:Enter,type:clear,key:Enter,expect:entries:0,expect:outcome:cleared",
        "--output",
        "json",
    ]);

    assert_eq!(code, 0);
    let value = json(&stdout);
    assert_eq!(value["checks"]["passed"], 2);
    assert_eq!(value["transcript"].as_array().map(Vec::len), Some(0));
}

#[test]
fn test_headless_disable_clear_flag() {
    let (code, stdout, _) = run_headless(&[
        "--disable-clear",
        "--events",
        "type:clear,key:Enter",
    ]);

    assert_eq!(code, 0);
    assert!(stdout.contains("'clear': command not found."));
}

#[test]
fn test_headless_table_output() {
    let (code, stdout, _) = run_headless(&["--events", "type:ls,key:Enter"]);

    assert_eq!(code, 0);
    assert!(stdout.contains("notes.txt"));
    assert!(stdout.contains("size"));
}

#[test]
fn test_headless_bell_effect() {
    let (code, _, _) = run_headless(&[
        "--events",
        "type:ding,key:Enter,expect:bells:1,expect:screen:ding!",
    ]);
    assert_eq!(code, 0);
}

#[test]
fn test_headless_exit_effect() {
    let (code, stdout, _) = run_headless(&[
        "--events",
        "type:exit,key:Enter,type:help",
        "--output",
        "json",
    ]);

    assert_eq!(code, 0);
    let value = json(&stdout);
    assert_eq!(value["state"]["running"], false);
    assert_eq!(value["steps_run"], 2);
    assert_eq!(value["state"]["input_text"], "");
}

#[test]
fn test_headless_ignored_keys() {
    let (code, stdout, _) = run_headless(&[
        "--events",
        "type:ab,key:Tab,key:left,key:f5,key:esc,key:Unidentified,key:ctrl+x,type:c",
        "--output",
        "json",
    ]);

    assert_eq!(code, 0);
    assert_eq!(json(&stdout)["state"]["input_text"], "abc");
}

#[test]
fn test_headless_focus_events() {
    let (code, _, _) = run_headless(&[
        "--events",
        "focus:out,expect:focused:false,focus:in,expect:focused:true",
    ]);
    assert_eq!(code, 0);
}

#[test]
fn test_headless_failed_check() {
    let (code, stdout, _) = run_headless(&[
        "--events",
        "type:hello,expect:screen:goodbye",
        "--output",
        "json",
    ]);

    assert_eq!(code, 1, "Should exit with code 1 on a failed check");
    let value = json(&stdout);
    assert_eq!(value["checks"]["passed"], 0);
    assert_eq!(value["checks"]["failed"], 1);
}

#[test]
fn test_headless_regex_check() {
    let (code, _, _) = run_headless(&[
        "--events",
        r"type:help,key:Enter,expect:matches:Ed@box:~\$ help",
    ]);
    assert_eq!(code, 0);
}

#[test]
fn test_headless_custom_size() {
    let (code, stdout, _) = run_headless(&[
        "--events",
        "type:help",
        "--size",
        "40x10",
        "--output",
        "json",
    ]);

    assert_eq!(code, 0);
    let value = json(&stdout);
    let lines = value["screen_lines"].as_array().expect("screen_lines");
    assert!(lines.len() <= 10);
    assert!(lines
        .iter()
        .all(|l| l.as_str().map_or(0, |s| s.chars().count()) <= 40));
}

#[test]
fn test_headless_frames_output() {
    let (code, stdout, _) = run_headless(&["--events", "type:he,type:lp", "--output", "frames"]);

    assert_eq!(code, 0);
    assert!(stdout.starts_with("--- start ---\n"));
    assert!(stdout.contains("--- type:lp ---\n"));
    assert!(stdout.contains("frames: 3\n"));
}

#[test]
fn test_headless_script_from_stdin() {
    let script = "# say hello\ntype:help\nkey:Enter\nexpect:screen:Ed@box:~$ help\n";
    let (code, stdout, _) = run_headless_with_stdin(&["--script", "-"], Some(script));

    assert_eq!(code, 0);
    assert!(stdout.contains("checks: 1 passed, 0 failed"));
}

#[test]
fn test_headless_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("result.txt");
    let out_str = out.to_string_lossy().into_owned();

    let (code, stdout, _) = run_headless(&["--events", "type:help", "--output-file", &out_str]);

    assert_eq!(code, 0);
    assert!(stdout.is_empty());
    let written = std::fs::read_to_string(&out).unwrap();
    assert!(written.contains("Ed@box:~$ help"));
}

#[test]
fn test_headless_identity_overrides() {
    let (code, stdout, _) = run_headless(&[
        "--user",
        "root",
        "--machine",
        "prod",
        "--feed",
        "careful now",
        "--events",
        "type:help,key:Enter",
    ]);

    assert_eq!(code, 0);
    assert!(stdout.contains("[root@prod]$"));
    assert!(stdout.contains("root@prod:~$ help"));
    assert!(stdout.contains("careful now"));
}

#[test]
fn test_headless_requires_events() {
    let (code, _, stderr) = run_headless(&[]);

    assert_eq!(code, 1);
    assert!(stderr.contains("Configuration Error"));
    assert!(stderr.contains("requires --events or --script"));
}

#[test]
fn test_headless_bad_event_is_script_error() {
    let (code, _, stderr) = run_headless(&["--events", "dance:now"]);

    assert_eq!(code, 1);
    assert!(stderr.contains("Script Error"));
}

#[test]
fn test_headless_resize_step() {
    let (code, stdout, _) = run_headless(&["--events", "resize:30x5", "--output", "json"]);

    assert_eq!(code, 0);
    let value = json(&stdout);
    let lines = value["screen_lines"].as_array().expect("screen_lines");
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[4].as_str().map(|l| l.chars().count()), Some(30));
}

#[test]
fn test_invalid_config_file_is_reported() {
    let (_dir, config) = write_config("[[commands]]\nname = \"x\"\noutput = \"a\"\ntable = { headers = [\"h\"] }\n");

    let output = Command::new(env!("CARGO_BIN_EXE_termfeed"))
        .args(["--config", &config, "--headless", "--events", "key:a"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Configuration Error"));
    assert!(stderr.contains("sets both output and table"));
}
