//! UI rendering for the TUI.
//!
//! Defines the layout and renders all UI components.

use super::app::App;
use super::widgets::{title_bar::TitleBar, transcript::TranscriptView};
use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    Frame,
};

/// Renders the entire UI.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Main layout: title bar, transcript
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Min(1),    // Transcript
        ])
        .split(area);

    render_title_bar(frame, main_layout[0], app);
    render_transcript(frame, main_layout[1], app);
}

/// Where the caret goes for a transcript drawn in `area`; `None` without focus.
fn caret_position(view: &TranscriptView<'_>, area: Rect, focused: bool) -> Option<Position> {
    if !focused {
        return None;
    }
    view.layout(TranscriptView::block().inner(area)).caret
}

/// Renders the title bar.
fn render_title_bar(frame: &mut Frame, area: Rect, app: &App) {
    let identity = app.dispatcher().prompt().identity();
    frame.render_widget(TitleBar::new(&identity), area);
}

/// Renders the transcript and positions the caret.
fn render_transcript(frame: &mut Frame, area: Rect, app: &App) {
    let line = app.line();
    let widget = TranscriptView::new(
        app.banner().visible(),
        app.transcript().entries(),
        app.dispatcher().prompt().identity(),
        line.as_str(),
        line.cursor(),
        app.scroll,
    );

    let caret = caret_position(&widget, area, app.focused);
    frame.render_widget(widget, area);

    if let Some(position) = caret {
        frame.set_cursor_position(position);
    }
}
