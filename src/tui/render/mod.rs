pub mod form;
pub mod status_row;
pub mod table;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::tui::app::{App, Mode};
use crate::util::text;
use crate::view;

/// Main render function — dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Projections can shrink under the cursor (e.g. after undo)
    app.clamp_cursors();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: title | active table | completed table | status row
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Fill(3),
            Constraint::Fill(2),
            Constraint::Length(1),
        ])
        .split(area);

    render_title(frame, app, chunks[0]);
    table::render_active_table(frame, app, chunks[1]);
    table::render_completed_table(frame, app, chunks[2]);

    // Add-task form floats over the tables
    if app.mode == Mode::Form {
        form::render_form(frame, app, area);
    }

    status_row::render_status_row(frame, app, chunks[3]);
}

fn render_title(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let active = view::active_view(app.store.tasks()).len();
    let completed = view::completed_view(app.store.tasks()).len();
    let counts = format!("{active} open / {completed} done ");

    let mut spans = vec![Span::styled(
        " worklist",
        Style::default()
            .fg(app.theme.accent)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    )];
    let used = text::display_width(" worklist") + text::display_width(&counts);
    if used < width {
        spans.push(Span::styled(
            " ".repeat(width - used),
            Style::default().bg(bg),
        ));
    }
    spans.push(Span::styled(counts, Style::default().fg(app.theme.dim).bg(bg)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// A rect of the given size centered in `area`, clamped to fit
pub(super) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect {
        x: area.x + (area.width - w) / 2,
        y: area.y + (area.height - h) / 2,
        width: w,
        height: h,
    }
}
