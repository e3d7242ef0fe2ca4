//! What a headless run prints when it is done.

use super::HeadlessResult;
use crate::error::{Result, TermError};
use ratatui::buffer::Buffer;
use std::str::FromStr;
use unicode_width::UnicodeWidthStr;

/// Shape of the end-of-run report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// Final screen and a short summary.
    #[default]
    Text,
    /// Everything in [`HeadlessResult`] as pretty JSON.
    Json,
    /// The screen after every step, then the summary.
    Frames,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(name: &str) -> std::result::Result<Self, Self::Err> {
        const FORMATS: [(&str, ReportFormat); 3] = [
            ("text", ReportFormat::Text),
            ("json", ReportFormat::Json),
            ("frames", ReportFormat::Frames),
        ];

        FORMATS
            .iter()
            .find(|(known, _)| known.eq_ignore_ascii_case(name))
            .map(|(_, format)| *format)
            .ok_or_else(|| format!("unknown report format '{name}' (expected text, json or frames)"))
    }
}

/// Reads the visible text out of a drawn buffer.
///
/// Rows lose their trailing blanks and blank rows at the bottom are dropped.
/// The filler cell behind a wide glyph is skipped so rows read as typed.
pub fn screen_text(buffer: &Buffer) -> String {
    let width = usize::from(buffer.area.width);
    if width == 0 {
        return String::new();
    }

    let mut rows: Vec<String> = buffer
        .content
        .chunks(width)
        .map(|cells| {
            let mut row = String::new();
            let mut covered = 0;
            for cell in cells {
                if covered > 0 {
                    covered -= 1;
                    continue;
                }
                let symbol = cell.symbol();
                covered = symbol.width().saturating_sub(1);
                row.push_str(symbol);
            }
            row.trim_end().to_string()
        })
        .collect();

    while rows.last().is_some_and(String::is_empty) {
        rows.pop();
    }

    rows.join("\n")
}

/// Renders `result` in the requested format.
pub fn render_report(result: &HeadlessResult, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Text => Ok(format!("{}\n\n{}", result.screen, summary(result))),
        ReportFormat::Json => serde_json::to_string_pretty(result)
            .map(|json| json + "\n")
            .map_err(|e| TermError::internal(format!("Failed to encode report: {e}"))),
        ReportFormat::Frames => {
            let mut out: String = result
                .frames
                .iter()
                .map(|frame| format!("--- {} ---\n{}\n\n", frame.label, frame.screen))
                .collect();
            out.push_str(&format!("frames: {}\n", result.frames.len()));
            out.push_str(&summary(result));
            Ok(out)
        }
    }
}

fn summary(result: &HeadlessResult) -> String {
    let mut out = format!(
        "steps: {} run in {}ms\n",
        result.steps_run, result.duration_ms
    );
    let checks = &result.checks;
    if checks.passed + checks.failed > 0 {
        out.push_str(&format!(
            "checks: {} passed, {} failed\n",
            checks.passed, checks.failed
        ));
    }
    out
}
