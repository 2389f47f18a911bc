use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::task::{Priority, Status, Task};
use crate::tui::app::{App, CellEdit, Column, EditKind, Mode, Pane};
use crate::util::text;
use crate::view;

const CREATED_W: usize = 5;
const PRIORITY_W: usize = 16;
const STATUS_W: usize = 11;
const ASSIGNEE_W: usize = 10;
const DATE_W: usize = 10;
const COMPLETED_W: usize = 5;

/// Columns of the active table, left to right
const ACTIVE_COLUMNS: [Column; 7] = [
    Column::Created,
    Column::Priority,
    Column::Summary,
    Column::Status,
    Column::Assignee,
    Column::Deadline,
    Column::Remark,
];

/// The completed table appends the completion date
const COMPLETED_COLUMNS: [Column; 8] = [
    Column::Created,
    Column::Priority,
    Column::Summary,
    Column::Status,
    Column::Assignee,
    Column::Deadline,
    Column::Remark,
    Column::Completed,
];

pub fn render_active_table(frame: &mut Frame, app: &mut App, area: Rect) {
    let tasks: Vec<Task> = view::active_view(app.store.tasks())
        .into_iter()
        .cloned()
        .collect();
    render_table(
        frame,
        app,
        area,
        Pane::Active,
        &ACTIVE_COLUMNS,
        &tasks,
        app.active_cursor,
        "no open tasks — press a to add one",
    );
}

pub fn render_completed_table(frame: &mut Frame, app: &mut App, area: Rect) {
    let tasks: Vec<Task> = view::completed_view(app.store.tasks())
        .into_iter()
        .cloned()
        .collect();
    render_table(
        frame,
        app,
        area,
        Pane::Completed,
        &COMPLETED_COLUMNS,
        &tasks,
        app.completed_cursor,
        "no completed tasks",
    );
}

#[allow(clippy::too_many_arguments)]
fn render_table(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    pane: Pane,
    columns: &[Column],
    tasks: &[Task],
    cursor: usize,
    empty_message: &str,
) {
    if area.height < 2 {
        return;
    }
    let bg = app.theme.background;
    let width = area.width as usize;
    let focused = app.pane == pane;
    let (summary_w, remark_w) = flex_widths(width, columns);

    let mut lines: Vec<Line> = Vec::new();

    // Section title
    let title = match pane {
        Pane::Active => format!(" active ({})", tasks.len()),
        Pane::Completed => format!(" completed ({})", tasks.len()),
    };
    let title_fg = if focused {
        app.theme.accent
    } else {
        app.theme.dim
    };
    lines.push(Line::from(Span::styled(
        text::fit_to_width(&title, width),
        Style::default()
            .fg(title_fg)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    )));

    // Column headers
    let mut header = vec![Span::styled(" ", Style::default().bg(app.theme.header_bg))];
    for column in columns {
        header.push(Span::styled(
            format!(
                "{} ",
                text::fit_to_width(column.title(), column_width(*column, summary_w, remark_w))
            ),
            Style::default()
                .fg(app.theme.dim)
                .bg(app.theme.header_bg)
                .add_modifier(Modifier::BOLD),
        ));
    }
    pad_line(&mut header, width, Style::default().bg(app.theme.header_bg));
    lines.push(Line::from(header));

    if tasks.is_empty() {
        lines.push(Line::from(Span::styled(
            format!(" {empty_message}"),
            Style::default().fg(app.theme.dim).bg(bg),
        )));
    }

    // Scroll so the cursor row stays visible
    let visible = (area.height as usize).saturating_sub(2);
    let offset = if focused && cursor + 1 > visible {
        cursor + 1 - visible
    } else {
        0
    };

    for (row, task) in tasks.iter().enumerate().skip(offset).take(visible) {
        let is_cursor = focused && row == cursor;
        let row_bg = if is_cursor { app.theme.selection_bg } else { bg };

        let mut spans: Vec<Span> = Vec::new();
        if is_cursor {
            spans.push(Span::styled(
                "\u{258E}",
                Style::default()
                    .fg(app.theme.selection_border)
                    .bg(row_bg),
            ));
        } else {
            spans.push(Span::styled(" ", Style::default().bg(row_bg)));
        }

        for column in columns {
            spans.push(cell_span(app, task, *column, is_cursor, summary_w, remark_w));
        }
        pad_line(&mut spans, width, Style::default().bg(row_bg));
        lines.push(Line::from(spans));
    }

    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(bg)),
        area,
    );
}

/// Split the width left over after the fixed columns between summary and
/// remark, 3:2
fn flex_widths(total: usize, columns: &[Column]) -> (usize, usize) {
    let mut fixed = 1; // cursor marker column
    for column in columns {
        fixed += match column {
            Column::Created => CREATED_W + 1,
            Column::Priority => PRIORITY_W + 1,
            Column::Status => STATUS_W + 1,
            Column::Assignee => ASSIGNEE_W + 1,
            Column::Deadline => DATE_W + 1,
            Column::Completed => COMPLETED_W + 1,
            Column::Summary | Column::Remark => 1, // separator only
        };
    }
    let flex = total.saturating_sub(fixed).max(10);
    let summary = flex * 3 / 5;
    (summary.max(5), (flex - summary).max(5))
}

fn column_width(column: Column, summary_w: usize, remark_w: usize) -> usize {
    match column {
        Column::Created => CREATED_W,
        Column::Priority => PRIORITY_W,
        Column::Summary => summary_w,
        Column::Status => STATUS_W,
        Column::Assignee => ASSIGNEE_W,
        Column::Deadline => DATE_W,
        Column::Remark => remark_w,
        Column::Completed => COMPLETED_W,
    }
}

fn cell_span<'a>(
    app: &App,
    task: &Task,
    column: Column,
    row_selected: bool,
    summary_w: usize,
    remark_w: usize,
) -> Span<'a> {
    let width = column_width(column, summary_w, remark_w);
    let bg = if row_selected {
        app.theme.selection_bg
    } else {
        app.theme.background
    };

    // An in-flight edit replaces the cell content
    if app.mode == Mode::EditCell
        && let Some(edit) = &app.edit
        && edit.task_id == task.id
        && edit.column == column
    {
        return editing_span(app, edit, width);
    }

    let (content, fg) = match column {
        Column::Created => (task.created_display(), app.theme.dim),
        Column::Priority => (
            task.priority.label().to_string(),
            app.theme.priority_color(task.priority),
        ),
        Column::Summary => (task.summary.clone(), app.theme.text_bright),
        Column::Status => (
            task.status.label().to_string(),
            app.theme.status_color(task.status),
        ),
        Column::Assignee => (task.assignee.clone(), app.theme.text),
        Column::Deadline => (task.deadline_display(), app.theme.text),
        Column::Remark => (task.remark.clone(), app.theme.text),
        Column::Completed => (task.completed_display(), app.theme.dim),
    };

    let mut style = Style::default().fg(fg).bg(bg);
    let cell_selected = row_selected
        && app.mode == Mode::Navigate
        && app.cursor_column() == column;
    if cell_selected {
        style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
    }

    Span::styled(format!("{} ", text::fit_to_width(&content, width)), style)
}

fn editing_span<'a>(app: &App, edit: &CellEdit, width: usize) -> Span<'a> {
    let content = match edit.column.edit_kind() {
        EditKind::Select => {
            let label = match edit.column {
                Column::Priority => Priority::ALL[edit.select_idx].label(),
                _ => Status::ALL[edit.select_idx].label(),
            };
            format!("\u{25C2}{label}\u{25B8}")
        }
        _ => format!(
            "{}\u{258C}{}",
            &edit.buffer[..edit.cursor],
            &edit.buffer[edit.cursor..]
        ),
    };
    Span::styled(
        format!("{} ", text::fit_to_width(&content, width)),
        Style::default()
            .fg(app.theme.text_bright)
            .bg(app.theme.edit_bg),
    )
}

fn pad_line(spans: &mut Vec<Span>, width: usize, style: Style) {
    let used: usize = spans.iter().map(|s| text::display_width(&s.content)).sum();
    if used < width {
        spans.push(Span::styled(" ".repeat(width - used), style));
    }
}
