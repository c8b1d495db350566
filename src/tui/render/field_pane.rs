use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::model::FieldName;
use crate::ops::Pane;
use crate::tui::app::{App, Mode};

/// Render the right pane: one row per metadata field of the current file,
/// or the batch template when files are marked
pub fn render_field_pane(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let active = app.selection.pane == Pane::Fields;
    let batch = app.selection.batch_mode();

    let border_style = if active {
        Style::default().fg(app.theme.highlight).bg(bg)
    } else {
        Style::default().fg(app.theme.dim).bg(bg)
    };
    let title = if batch {
        format!(" BATCH EDIT ({} marked) ", app.selection.marked.len())
    } else {
        " Tags ".to_string()
    };
    let title_style = if batch {
        Style::default()
            .fg(app.theme.yellow)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    } else {
        border_style
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Span::styled(title, title_style))
        .style(Style::default().bg(bg));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.files.is_empty() {
        return;
    }

    let tags = app.display_tags();
    let cursor = app.selection.field_index;
    let editing = app.mode == Mode::FieldEdit;

    let mut lines: Vec<Line> = Vec::new();
    for (i, field) in FieldName::ALL.iter().enumerate() {
        let is_cursor = i == cursor && active;
        let row_bg = if is_cursor {
            app.theme.selection_bg
        } else {
            bg
        };

        let label_style = Style::default().fg(app.theme.dim).bg(row_bg);
        let mut spans = vec![Span::styled(
            format!(" {:<12} ", field.label()),
            label_style,
        )];

        if is_cursor && editing {
            // Split the buffer at the cursor byte offset for the caret
            let (before, after) = app.edit_buffer.split_at(app.edit_cursor);
            let edit_style = Style::default().fg(app.theme.text_bright).bg(row_bg);
            spans.push(Span::styled(before.to_string(), edit_style));
            spans.push(Span::styled(
                "\u{258C}",
                Style::default().fg(app.theme.highlight).bg(row_bg),
            ));
            spans.push(Span::styled(after.to_string(), edit_style));
        } else {
            let value = tags.get(field).map(String::as_str).unwrap_or("");
            let value_style = if is_cursor {
                Style::default()
                    .fg(app.theme.text_bright)
                    .bg(row_bg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(app.theme.text).bg(row_bg)
            };
            spans.push(Span::styled(value.to_string(), value_style));
        }

        if is_cursor {
            let used: usize = spans.iter().map(|s| s.content.chars().count()).sum();
            let w = inner.width as usize;
            if used < w {
                spans.push(Span::styled(
                    " ".repeat(w - used),
                    Style::default().bg(row_bg),
                ));
            }
        }

        lines.push(Line::from(spans));
    }

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, inner);
}
