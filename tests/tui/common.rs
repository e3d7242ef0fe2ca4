//! Common test utilities for TUI tests.

use std::io::Write;
use std::process::{Command, Stdio};
use tempfile::TempDir;

/// Config used by the headless tests.
pub const TEST_CONFIG: &str = r#"
user_name = "Ed"
machine_name = "box"
initial_feed = "Welcome to the test terminal."

[[commands]]
name = "help"
output = "H"

[[commands]]
name = "ls"
table = { headers = ["name", "size"], rows = [["notes.txt", "12"]] }

[[commands]]
name = "ding"
output = "ding!"
effect = "bell"

[[commands]]
name = "exit"
output = "bye"
effect = "exit"
"#;

/// Writes `content` to a config file inside a fresh temp dir.
pub fn write_config(content: &str) -> (TempDir, String) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.toml");
    std::fs::write(&path, content).expect("Failed to write config");
    let path = path.to_string_lossy().into_owned();
    (dir, path)
}

/// Runs termfeed in headless mode against [`TEST_CONFIG`].
pub fn run_headless(args: &[&str]) -> (i32, String, String) {
    run_headless_with_stdin(args, None)
}

/// Like [`run_headless`], feeding `stdin` to the process.
pub fn run_headless_with_stdin(args: &[&str], stdin: Option<&str>) -> (i32, String, String) {
    let (_dir, config) = write_config(TEST_CONFIG);

    let mut child = Command::new(env!("CARGO_BIN_EXE_termfeed"))
        .args(["--config", &config, "--headless"])
        .args(args)
        .env("RUST_LOG", "warn")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute command");

    if let Some(mut pipe) = child.stdin.take() {
        if let Some(input) = stdin {
            pipe.write_all(input.as_bytes())
                .expect("Failed to write stdin");
        }
    }

    let output = child.wait_with_output().expect("Failed to wait for command");
    let exit_code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    (exit_code, stdout, stderr)
}
