//! UI renderer for rill.
//!
//! Turns the viewer state into one ratatui frame: the visible columns, the
//! reverse-video status line carrying the active path, and the command row
//! at the very bottom (pending `:` line or the last surfaced error).
//!
//! This module stays pure rendering: it reads state and produces widgets,
//! without owning any engine logic.

pub mod columns;

use crate::app::AppState;
use crate::utils::shorten_home_path;

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::Paragraph,
};

/// Renders the entire terminal UI for one frame.
///
/// Also adopts the current frame size into the viewer, so a resize rebuilds
/// the column regions before anything is drawn into them.
pub fn render(frame: &mut Frame, app: &mut AppState) {
    let (content, status, command) = layout_rows(frame.area());
    app.sync_content_area(content);

    for (rect, column) in app.viewer().visible_columns() {
        columns::draw_column(frame, rect, column);
    }

    draw_status_line(frame, status, app);
    draw_command_line(frame, command, app);
}

/// Splits the frame into the column area and the two single-row strips
/// below it: status, then command.
pub fn layout_rows(area: Rect) -> (Rect, Rect, Rect) {
    let [content, status, command] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);
    (content, status, command)
}

fn draw_status_line(frame: &mut Frame, area: Rect, app: &AppState) {
    let path = app
        .viewer()
        .active_path()
        .map(shorten_home_path)
        .unwrap_or_default();

    let style = Style::default().add_modifier(Modifier::REVERSED);
    let line = Line::styled(format!(" {path}"), style);
    frame.render_widget(Paragraph::new(line).style(style), area);
}

fn draw_command_line(frame: &mut Frame, area: Rect, app: &AppState) {
    let text = if let Some(pending) = app.input().pending_line() {
        format!(":{pending}")
    } else if let Some(message) = app.message() {
        message.to_string()
    } else {
        String::new()
    };
    frame.render_widget(Paragraph::new(text), area);
}
