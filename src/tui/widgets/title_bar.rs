//! Title bar widget for the TUI.
//!
//! Draws the window chrome: three window-control dots on the left and the
//! `[user@machine]$` caption centered.

use super::super::text::display_width;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::Widget,
};

const BAR_BG: Color = Color::DarkGray;
const DOT: &str = "●";
const DOT_COLORS: [Color; 3] = [Color::Red, Color::Yellow, Color::Green];

/// Title bar widget.
pub struct TitleBar<'a> {
    identity: &'a str,
}

impl<'a> TitleBar<'a> {
    /// Creates a title bar for the given `user@machine` identity.
    pub fn new(identity: &'a str) -> Self {
        Self { identity }
    }

    /// The centered caption text.
    pub fn caption(&self) -> String {
        format!("[{}]$", self.identity)
    }
}

impl Widget for TitleBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }

        let style = Style::default()
            .bg(BAR_BG)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);

        for x in area.left()..area.right() {
            buf[(x, area.y)].set_style(style);
        }

        // Window-control dots, one column apart
        let mut x = area.x + 1;
        for color in DOT_COLORS {
            if x >= area.right() {
                break;
            }
            buf.set_string(x, area.y, DOT, Style::default().bg(BAR_BG).fg(color));
            x += 2;
        }

        let caption = self.caption();
        let caption_width = display_width(&caption) as u16;
        let caption_x = area.x + area.width.saturating_sub(caption_width) / 2;
        // Keep clear of the dots on narrow terminals.
        let caption_x = caption_x.max(x.min(area.right()));
        if caption_x < area.right() {
            let span = Span::styled(caption, style);
            buf.set_span(caption_x, area.y, &span, area.right() - caption_x);
        }
    }
}
