use crossterm::event::{KeyCode, KeyEvent};

use crate::model::task::{self, Priority, Status};
use crate::tui::app::{App, Column, EditKind, Mode};

use super::common::{handle_text_key, quick_deadline_key, quick_deadline_value};

pub(super) fn handle_edit(app: &mut App, key: KeyEvent) {
    let Some(edit) = app.edit.as_mut() else {
        app.mode = Mode::Navigate;
        return;
    };

    match edit.column.edit_kind() {
        EditKind::Select => match key.code {
            KeyCode::Esc => cancel(app),
            KeyCode::Enter => commit(app),
            KeyCode::Up | KeyCode::Left | KeyCode::Char('k') => {
                let len = select_len(edit.column);
                edit.select_idx = (edit.select_idx + len - 1) % len;
            }
            KeyCode::Down | KeyCode::Right | KeyCode::Char('j') => {
                edit.select_idx = (edit.select_idx + 1) % select_len(edit.column);
            }
            _ => {}
        },
        EditKind::Date => {
            if let Some(preset) = quick_deadline_key(key) {
                edit.buffer = quick_deadline_value(preset);
                edit.cursor = edit.buffer.len();
                return;
            }
            match key.code {
                KeyCode::Esc => cancel(app),
                KeyCode::Enter => commit(app),
                _ => {
                    handle_text_key(&mut edit.buffer, &mut edit.cursor, key);
                }
            }
        }
        EditKind::Text => match key.code {
            KeyCode::Esc => cancel(app),
            KeyCode::Enter => commit(app),
            _ => {
                handle_text_key(&mut edit.buffer, &mut edit.cursor, key);
            }
        },
    }
}

fn select_len(column: Column) -> usize {
    match column {
        Column::Priority => Priority::ALL.len(),
        _ => Status::ALL.len(),
    }
}

fn cancel(app: &mut App) {
    app.edit = None;
    app.mode = Mode::Navigate;
}

/// Commit the in-flight edit as a wholesale task replacement
fn commit(app: &mut App) {
    let Some(edit) = app.edit.clone() else {
        app.mode = Mode::Navigate;
        return;
    };
    let Some(current) = app.store.get(&edit.task_id).cloned() else {
        cancel(app);
        return;
    };

    let mut replacement = current;
    match edit.column {
        Column::Priority => replacement.priority = Priority::ALL[edit.select_idx],
        Column::Status => replacement.status = Status::ALL[edit.select_idx],
        Column::Summary => replacement.summary = edit.buffer.clone(),
        Column::Assignee => replacement.assignee = edit.buffer.clone(),
        Column::Remark => replacement.remark = edit.buffer.clone(),
        Column::Deadline => {
            if edit.buffer.is_empty() {
                replacement.deadline = None;
            } else {
                match task::parse_date(&edit.buffer) {
                    Some(date) => replacement.deadline = Some(date),
                    None => {
                        // Stay in the editor so the date can be fixed
                        app.error = Some("invalid date, expected YYYY-MM-DD".to_string());
                        return;
                    }
                }
            }
        }
        Column::Created | Column::Completed => {}
    }

    match app.store.update(&edit.task_id, replacement) {
        Ok(()) => {
            app.edit = None;
            app.mode = Mode::Navigate;
            app.clamp_cursors();
            app.persist();
        }
        Err(e) => {
            // Rejected edits revert: close the editor and surface the message
            app.error = Some(e.to_string());
            app.edit = None;
            app.mode = Mode::Navigate;
        }
    }
}
