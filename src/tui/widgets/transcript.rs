//! Transcript widget for the TUI.
//!
//! Renders the banner, every transcript entry and finally the open input line,
//! keeping the bottom in view unless the user scrolled back.

use super::super::text::{
    calculate_scroll_offset, caret_offset, display_width, pad_to_width, wrap_text,
};
use crate::commands::Payload;
use crate::transcript::{split_echo, TranscriptEntry, PROMPT_SUFFIX};
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

/// Space between table columns.
const COLUMN_GAP: &str = "  ";

fn identity_style() -> Style {
    Style::default().fg(Color::Green)
}

/// Transcript panel widget.
pub struct TranscriptView<'a> {
    banner: &'a str,
    entries: &'a [TranscriptEntry],
    identity: String,
    line: &'a str,
    cursor: usize,
    scroll: usize,
}

/// Lines that fit the panel plus where the caret goes.
#[derive(Debug)]
pub struct TranscriptLayout {
    /// Visible lines, top to bottom.
    pub lines: Vec<Line<'static>>,
    /// Caret cell, if the input line is on screen.
    pub caret: Option<Position>,
}

impl<'a> TranscriptView<'a> {
    /// Creates a new transcript widget.
    pub fn new(
        banner: &'a str,
        entries: &'a [TranscriptEntry],
        identity: String,
        line: &'a str,
        cursor: usize,
        scroll: usize,
    ) -> Self {
        Self {
            banner,
            entries,
            identity,
            line,
            cursor,
            scroll,
        }
    }

    /// The frame drawn around the transcript.
    pub fn block() -> Block<'static> {
        Block::default()
            .borders(Borders::LEFT | Borders::RIGHT | Borders::BOTTOM)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
    }

    /// Lays the content out inside `inner` (the area within the border).
    pub fn layout(&self, inner: Rect) -> TranscriptLayout {
        let width = inner.width as usize;
        let height = inner.height as usize;

        let mut lines = self.history_lines(width);
        let (input, caret_col) = self.input_line(width);
        lines.push(input);

        let total = lines.len();
        let max_scroll = total.saturating_sub(height);
        let scroll = self.scroll.min(max_scroll);
        let start = total.saturating_sub(height).saturating_sub(scroll);
        let end = (start + height).min(total);

        let input_row = total - 1;
        let caret = (height > 0 && input_row >= start && input_row < end).then(|| {
            let x = inner.x + (caret_col as u16).min(inner.width.saturating_sub(1));
            let y = inner.y + (input_row - start) as u16;
            Position::new(x, y)
        });

        TranscriptLayout {
            lines: lines.drain(start..end).collect(),
            caret,
        }
    }

    /// Banner and transcript entries, wrapped to `width`.
    fn history_lines(&self, width: usize) -> Vec<Line<'static>> {
        let mut lines = Vec::new();

        if !self.banner.is_empty() {
            lines.extend(wrap_text(self.banner, width).into_iter().map(Line::from));
        }

        for entry in self.entries {
            match entry {
                TranscriptEntry::Echo(text) => lines.extend(echo_lines(text, width)),
                TranscriptEntry::Output(Payload::Text(text)) => {
                    lines.extend(wrap_text(text, width).into_iter().map(Line::from));
                }
                TranscriptEntry::Output(Payload::Table { headers, rows }) => {
                    lines.extend(table_lines(headers, rows));
                }
                TranscriptEntry::Error(message) => {
                    let style = Style::default().fg(Color::Red);
                    lines.extend(
                        wrap_text(message, width)
                            .into_iter()
                            .map(|l| Line::from(Span::styled(l, style))),
                    );
                }
            }
        }

        lines
    }

    /// The open prompt line and the caret column within it.
    fn input_line(&self, width: usize) -> (Line<'static>, usize) {
        let prompt_width = display_width(&self.identity) + display_width(PROMPT_SUFFIX);
        // Leave one column for the caret itself.
        let available = width.saturating_sub(prompt_width + 1);
        let skip = calculate_scroll_offset(self.line, self.cursor, available);
        let visible: String = self.line.chars().skip(skip).collect();
        let caret_col = prompt_width + caret_offset(&visible, self.cursor - skip);

        let line = Line::from(vec![
            Span::styled(self.identity.clone(), identity_style()),
            Span::raw(PROMPT_SUFFIX),
            Span::raw(visible),
        ]);

        (line, caret_col)
    }
}

/// Wraps an echo line to `width`, keeping the identity green across row breaks.
fn echo_lines(echo: &str, width: usize) -> Vec<Line<'static>> {
    let (identity, _) = split_echo(echo);
    let mut identity_left = identity.chars().count();

    wrap_text(echo, width)
        .into_iter()
        .map(|row| {
            let split = row
                .char_indices()
                .nth(identity_left)
                .map_or(row.len(), |(idx, _)| idx);
            let (head, tail) = row.split_at(split);
            identity_left -= head.chars().count();

            let mut spans = Vec::with_capacity(2);
            if !head.is_empty() {
                spans.push(Span::styled(head.to_string(), identity_style()));
            }
            if !tail.is_empty() {
                spans.push(Span::raw(tail.to_string()));
            }
            Line::from(spans)
        })
        .collect()
}

/// Formats a table payload as aligned columns under a bold header row.
fn table_lines(headers: &[String], rows: &[Vec<String>]) -> Vec<Line<'static>> {
    let mut widths: Vec<usize> = headers.iter().map(|h| display_width(h)).collect();
    for row in rows {
        for (idx, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(idx) {
                *w = (*w).max(display_width(cell));
            }
        }
    }

    let format_row = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, w)| pad_to_width(cell, *w))
            .collect::<Vec<_>>()
            .join(COLUMN_GAP)
            .trim_end()
            .to_string()
    };

    let header_style = Style::default().add_modifier(Modifier::BOLD);
    let mut lines = vec![Line::from(Span::styled(format_row(headers), header_style))];
    lines.extend(rows.iter().map(|row| Line::from(format_row(row))));
    lines
}

impl Widget for TranscriptView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Self::block();
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = self.layout(inner);
        Paragraph::new(layout.lines).render(inner, buf);
    }
}
