//! Text measurement helpers for the terminal renderer.
//!
//! Everything here works in display columns, not bytes or chars, so wide
//! glyphs (CJK, emoji) line up with the terminal grid.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width of a string in terminal columns.
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Column offset of the caret placed `cursor` characters into `line`.
pub fn caret_offset(line: &str, cursor: usize) -> usize {
    line.chars()
        .take(cursor)
        .map(|c| UnicodeWidthChar::width(c).unwrap_or(0))
        .sum()
}

/// Number of leading characters to hide so that the first `cursor`
/// characters of `line` fit in `available` columns.
pub fn calculate_scroll_offset(line: &str, cursor: usize, available: usize) -> usize {
    let mut overflow = caret_offset(line, cursor).saturating_sub(available);
    let mut skip = 0;

    for c in line.chars().take(cursor) {
        if overflow == 0 {
            break;
        }
        overflow = overflow.saturating_sub(UnicodeWidthChar::width(c).unwrap_or(0));
        skip += 1;
    }

    skip
}

/// Hard-wraps text to `width` columns, keeping explicit line breaks.
///
/// Lines are broken at character boundaries; an empty input line stays an
/// empty output line.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for source in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0;

        for c in source.chars() {
            let w = UnicodeWidthChar::width(c).unwrap_or(0);
            if current_width + w > width && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            current.push(c);
            current_width += w;
        }

        lines.push(current);
    }

    lines
}

/// Pads `text` with spaces to `width` columns.
pub fn pad_to_width(text: &str, width: usize) -> String {
    let pad = width.saturating_sub(display_width(text));
    format!("{text}{}", " ".repeat(pad))
}
