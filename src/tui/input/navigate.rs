use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::task::{Priority, Status};
use crate::tui::app::{App, CellEdit, Column, EditKind, FormState, Mode, Pane};

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,

        KeyCode::Tab | KeyCode::BackTab => toggle_pane(app),

        KeyCode::Char('j') | KeyCode::Down => move_row(app, 1),
        KeyCode::Char('k') | KeyCode::Up => move_row(app, -1),
        KeyCode::Char('g') | KeyCode::Home => jump_row(app, 0),
        KeyCode::Char('G') | KeyCode::End => jump_row(app, usize::MAX),

        KeyCode::Char('h') | KeyCode::Left => move_col(app, -1),
        KeyCode::Char('l') | KeyCode::Right => move_col(app, 1),

        KeyCode::Char('a') => open_form(app),
        KeyCode::Char('e') | KeyCode::Enter => begin_cell_edit(app),
        KeyCode::Char('d') | KeyCode::Delete => app.delete_cursor_task(),

        KeyCode::Char('u') => app.undo(),
        KeyCode::Char('U') => app.redo(),
        KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => app.redo(),

        _ => {}
    }
}

fn toggle_pane(app: &mut App) {
    app.pane = match app.pane {
        Pane::Active => Pane::Completed,
        Pane::Completed => Pane::Active,
    };
    app.clamp_cursors();
}

fn move_row(app: &mut App, delta: i64) {
    let len = app.pane_len(app.pane);
    if len == 0 {
        return;
    }
    let cursor = match app.pane {
        Pane::Active => &mut app.active_cursor,
        Pane::Completed => &mut app.completed_cursor,
    };
    let next = (*cursor as i64 + delta).clamp(0, len as i64 - 1);
    *cursor = next as usize;
}

fn jump_row(app: &mut App, target: usize) {
    let len = app.pane_len(app.pane);
    if len == 0 {
        return;
    }
    let cursor = match app.pane {
        Pane::Active => &mut app.active_cursor,
        Pane::Completed => &mut app.completed_cursor,
    };
    *cursor = target.min(len - 1);
}

fn move_col(app: &mut App, delta: i64) {
    let max = Column::EDITABLE.len() as i64 - 1;
    app.col = (app.col as i64 + delta).clamp(0, max) as usize;
}

fn open_form(app: &mut App) {
    app.form = Some(FormState::default());
    app.mode = Mode::Form;
}

/// Start an inline edit on the cell under the cursor
fn begin_cell_edit(app: &mut App) {
    let Some(task) = app.cursor_task() else {
        return;
    };
    let column = app.cursor_column();

    let edit = match column.edit_kind() {
        EditKind::Select => {
            let select_idx = match column {
                Column::Priority => Priority::ALL
                    .iter()
                    .position(|p| *p == task.priority)
                    .unwrap_or(0),
                _ => Status::ALL
                    .iter()
                    .position(|s| *s == task.status)
                    .unwrap_or(0),
            };
            CellEdit {
                task_id: task.id,
                column,
                buffer: String::new(),
                cursor: 0,
                select_idx,
            }
        }
        EditKind::Date => {
            let buffer = task
                .deadline
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default();
            CellEdit {
                task_id: task.id,
                column,
                cursor: buffer.len(),
                buffer,
                select_idx: 0,
            }
        }
        EditKind::Text => {
            let buffer = match column {
                Column::Summary => task.summary.clone(),
                Column::Assignee => task.assignee.clone(),
                _ => task.remark.clone(),
            };
            CellEdit {
                task_id: task.id,
                column,
                cursor: buffer.len(),
                buffer,
                select_idx: 0,
            }
        }
    };

    app.edit = Some(edit);
    app.mode = Mode::EditCell;
}
