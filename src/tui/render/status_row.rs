use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};

/// Render the status row: the command prompt while typing a command,
/// otherwise the transient status message
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;

    let line = match app.mode {
        Mode::Command => Line::from(vec![
            Span::styled(
                format!(":{}", app.command_input),
                Style::default().fg(app.theme.text_bright).bg(bg),
            ),
            Span::styled("\u{258C}", Style::default().fg(app.theme.highlight).bg(bg)),
        ]),
        _ => match &app.status_message {
            Some(msg) => {
                let color = if msg.starts_with("Saved") {
                    app.theme.green
                } else if msg.starts_with("E37") || msg.contains("failed") {
                    app.theme.red
                } else {
                    app.theme.text
                };
                Line::from(Span::styled(
                    msg.clone(),
                    Style::default().fg(color).bg(bg),
                ))
            }
            None => Line::from(""),
        },
    };

    let paragraph = Paragraph::new(line).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

const HELP: &str =
    " [j/k]Move  [h/l]Pane  [Space]Mark  [Enter]Edit  [E]Bulk  [^S]Save  [:]Cmd  [q]Quit ";

/// Render the bottom key-hint row
pub fn render_help_row(frame: &mut Frame, app: &App, area: Rect) {
    let style = Style::default()
        .fg(app.theme.dim)
        .bg(app.theme.background)
        .add_modifier(Modifier::REVERSED);
    let paragraph = Paragraph::new(HELP).style(style);
    frame.render_widget(paragraph, area);
}
