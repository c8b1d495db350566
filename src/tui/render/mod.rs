pub mod confirm_popup;
pub mod field_pane;
pub mod file_pane;
pub mod status_row;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;
use unicode_width::UnicodeWidthChar;

use super::app::{App, Mode};

/// Main render function — dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: content | status row | help row
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // panes
            Constraint::Length(1), // status row
            Constraint::Length(1), // help row
        ])
        .split(area);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(38), Constraint::Percentage(62)])
        .split(rows[0]);

    file_pane::render_file_pane(frame, app, panes[0]);
    field_pane::render_field_pane(frame, app, panes[1]);
    status_row::render_status_row(frame, app, rows[1]);
    status_row::render_help_row(frame, app, rows[2]);

    // Confirmation dialog on top of everything
    if app.mode == Mode::Confirm {
        confirm_popup::render_confirm_popup(frame, app, area);
    }
}

/// Truncate `text` to at most `max_width` display columns, appending `…`
/// when anything was cut.
pub(super) fn truncate_to_width(text: &str, max_width: usize) -> String {
    let mut width = 0;
    for (i, c) in text.char_indices() {
        let w = c.width().unwrap_or(0);
        if width + w > max_width {
            let mut out = text[..i].to_string();
            if max_width > 0 {
                // Drop one more column to make room for the ellipsis
                while out
                    .chars()
                    .map(|c| c.width().unwrap_or(0))
                    .sum::<usize>()
                    > max_width.saturating_sub(1)
                {
                    out.pop();
                }
                out.push('\u{2026}');
            }
            return out;
        }
        width += w;
    }
    text.to_string()
}
