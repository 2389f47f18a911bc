use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;

use super::centered_rect;

const LABELS: [&str; 6] = [
    "summary*",
    "assignee",
    "priority",
    "status",
    "deadline",
    "remark",
];

/// Render the add-task form as a centered popup
pub fn render_form(frame: &mut Frame, app: &App, area: Rect) {
    let Some(form) = &app.form else {
        return;
    };

    let popup = centered_rect(64, 10, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" add task ")
        .style(
            Style::default()
                .fg(app.theme.text)
                .bg(app.theme.background),
        )
        .border_style(Style::default().fg(app.theme.accent));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let mut lines: Vec<Line> = Vec::new();
    for (idx, label) in LABELS.iter().enumerate() {
        let focused = form.field == idx;
        let label_style = if focused {
            Style::default()
                .fg(app.theme.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.dim)
        };

        let value = match idx {
            0 => text_value(&form.summary, form.cursor, focused),
            1 => text_value(&form.assignee, form.cursor, focused),
            2 => select_value(form.priority().label(), focused),
            3 => select_value(form.status().label(), focused),
            4 => text_value(&form.deadline, form.cursor, focused),
            _ => text_value(&form.remark, form.cursor, focused),
        };

        let mut spans = vec![
            Span::styled(format!(" {label:<10}"), label_style),
            Span::styled(
                value,
                Style::default().fg(if focused {
                    app.theme.text_bright
                } else {
                    app.theme.text
                }),
            ),
        ];
        if idx == 4 {
            spans.push(Span::styled(
                "  ctrl-t/f/n: tomorrow, Friday, next Monday",
                Style::default().fg(app.theme.dim),
            ));
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " enter add   tab next field   esc cancel",
        Style::default().fg(app.theme.dim),
    )));

    frame.render_widget(Paragraph::new(lines), inner);
}

fn text_value(value: &str, cursor: usize, focused: bool) -> String {
    if focused {
        let at = cursor.min(value.len());
        format!("{}\u{258C}{}", &value[..at], &value[at..])
    } else {
        value.to_string()
    }
}

fn select_value(label: &str, focused: bool) -> String {
    if focused {
        format!("\u{25C2} {label} \u{25B8}")
    } else {
        label.to_string()
    }
}
