use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, EditKind, Mode};

/// Render the status row (bottom of screen): a validation message when one
/// is pending, otherwise key hints for the current mode
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;

    let line = if let Some(message) = &app.error {
        Line::from(Span::styled(
            format!(" {message}"),
            Style::default()
                .fg(app.theme.error)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
    } else {
        let hint = match app.mode {
            Mode::Navigate => {
                "a add  enter edit  d delete  u undo  U redo  tab switch table  q quit"
            }
            Mode::EditCell => match app.edit.as_ref().map(|e| e.column.edit_kind()) {
                Some(EditKind::Select) => "\u{2191}/\u{2193} choose  enter save  esc cancel",
                Some(EditKind::Date) => {
                    "enter save  esc cancel  ctrl-t/f/n tomorrow / Friday / next Monday"
                }
                _ => "enter save  esc cancel",
            },
            Mode::Form => "enter add  tab next field  esc cancel",
        };
        Line::from(Span::styled(
            format!(" {hint}"),
            Style::default().fg(app.theme.dim).bg(bg),
        ))
    };

    let paragraph = Paragraph::new(line).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
