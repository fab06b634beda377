//! Column drawing for rill.
//!
//! One function per column kind: placeholder and text columns show a dim
//! one-liner, directory columns show their visible window of entries with
//! selection and directory styling plus a trailing marker on directory
//! rows. Every directory column carries a separator glyph down its right
//! edge.

use crate::app::{Column, DirColumn, EMPTY_DIR_MESSAGE};
use crate::core::DirEntry;

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use unicode_width::UnicodeWidthChar;

const DIR_COLOR: Color = Color::Green;
const DIR_MARKER: char = '>';
const SEPARATOR: &str = "│";

/// Draws one column into its region.
pub fn draw_column(frame: &mut Frame, area: Rect, column: &Column) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    match column {
        Column::Empty { message } => draw_message(frame, area, message),
        Column::Text { name, .. } => draw_message(frame, area, name),
        Column::Dir(dir) => draw_dir(frame, area, dir),
    }
}

/// Dim single-line message one cell in on the second row, where the first
/// listing entry would sit.
fn draw_message(frame: &mut Frame, area: Rect, message: &str) {
    let text = clip_pad(message, (area.width as usize).saturating_sub(3));
    let lines = vec![
        Line::raw(""),
        Line::styled(
            format!(" {text}"),
            Style::default().add_modifier(Modifier::DIM),
        ),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn draw_dir(frame: &mut Frame, area: Rect, dir: &DirColumn) {
    let width = area.width as usize;
    let rows = area.height as usize;
    let body_width = width - 1;

    let mut lines = Vec::with_capacity(rows);
    for row in 0..rows {
        let body = if dir.entries().is_empty() {
            if row == 1 {
                let message = clip_pad(EMPTY_DIR_MESSAGE, width.saturating_sub(3));
                Span::styled(
                    clip_pad(&format!(" {message}"), body_width),
                    Style::default().add_modifier(Modifier::DIM),
                )
            } else {
                Span::raw(" ".repeat(body_width))
            }
        } else {
            let idx = row + dir.top();
            match dir.entries().get(idx) {
                Some(entry) => entry_body(entry, dir.selected() == Some(idx), body_width),
                None => Span::raw(" ".repeat(body_width)),
            }
        };

        lines.push(Line::from(vec![body, Span::raw(SEPARATOR)]));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

/// Builds the styled row body for one entry: a one-cell pad, the clipped
/// name, and the marker cell that flags directories.
fn entry_body(entry: &DirEntry, is_selected: bool, body_width: usize) -> Span<'static> {
    let mut style = Style::default();
    if entry.is_dir() {
        style = style.fg(DIR_COLOR);
    }
    if is_selected {
        style = style.add_modifier(Modifier::REVERSED);
    }

    let text = if body_width < 3 {
        clip_pad(entry.name(), body_width)
    } else {
        let mut text = String::with_capacity(body_width + 2);
        text.push(' ');
        text.push_str(&clip_pad(entry.name(), body_width - 2));
        text.push(if entry.is_dir() { DIR_MARKER } else { ' ' });
        text
    };

    Span::styled(text, style)
}

/// Clips `s` to at most `width` display cells and pads with spaces to
/// exactly `width`. Control characters are dropped.
fn clip_pad(s: &str, width: usize) -> String {
    let mut out = String::with_capacity(width);
    let mut used = 0;

    for ch in s.chars() {
        if ch.is_control() {
            continue;
        }
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    for _ in used..width {
        out.push(' ');
    }
    out
}
