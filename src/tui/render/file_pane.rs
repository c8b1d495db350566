use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::ops::Pane;
use crate::tui::app::App;

use super::truncate_to_width;

/// Render the left pane: the file list with marks, dirty flags and cursor
pub fn render_file_pane(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let active = app.selection.pane == Pane::Files;

    let border_style = if active {
        Style::default().fg(app.theme.highlight).bg(bg)
    } else {
        Style::default().fg(app.theme.dim).bg(bg)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(" Files ")
        .style(Style::default().bg(bg));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.files.is_empty() {
        let empty = Paragraph::new(" No audio files in this directory")
            .style(Style::default().fg(app.theme.dim).bg(bg));
        frame.render_widget(empty, inner);
        return;
    }

    let height = inner.height as usize;
    let cursor = app.selection.file_index;
    let scroll = if cursor >= height {
        cursor + 1 - height
    } else {
        0
    };

    let mut lines: Vec<Line> = Vec::new();
    for (i, file) in app.files.iter().enumerate().skip(scroll).take(height) {
        let is_cursor = i == cursor;
        let row_bg = if is_cursor && active {
            app.theme.selection_bg
        } else {
            bg
        };

        let mark = if app.selection.marked.contains(&i) {
            "* "
        } else {
            "  "
        };
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.display().to_string());
        let dirty = if app.cache.is_dirty(file) { " [+]" } else { "" };

        let name_width = (inner.width as usize)
            .saturating_sub(mark.len() + dirty.len());
        let name = truncate_to_width(&name, name_width);

        let mark_style = Style::default().fg(app.theme.yellow).bg(row_bg);
        let name_style = if is_cursor {
            Style::default()
                .fg(app.theme.text_bright)
                .bg(row_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text).bg(row_bg)
        };

        let mut spans = vec![
            Span::styled(mark, mark_style),
            Span::styled(name, name_style),
        ];
        if !dirty.is_empty() {
            spans.push(Span::styled(
                dirty,
                Style::default().fg(app.theme.green).bg(row_bg),
            ));
        }

        // Pad the cursor row so the highlight spans the pane
        if is_cursor && active {
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
