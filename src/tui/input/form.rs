use crossterm::event::{KeyCode, KeyEvent};

use crate::model::task::{self, Priority, Status, TaskDraft};
use crate::tui::app::{App, FORM_FIELDS, Mode, Pane};
use crate::view;

use super::common::{handle_text_key, quick_deadline_key, quick_deadline_value};

// Field indexes in the add form
const FIELD_SUMMARY: usize = 0;
const FIELD_ASSIGNEE: usize = 1;
const FIELD_PRIORITY: usize = 2;
const FIELD_STATUS: usize = 3;
const FIELD_DEADLINE: usize = 4;
const FIELD_REMARK: usize = 5;

pub(super) fn handle_form(app: &mut App, key: KeyEvent) {
    let Some(form) = app.form.as_mut() else {
        app.mode = Mode::Navigate;
        return;
    };

    match key.code {
        KeyCode::Esc => {
            app.form = None;
            app.mode = Mode::Navigate;
            return;
        }
        KeyCode::Enter => {
            submit(app);
            return;
        }
        KeyCode::Tab | KeyCode::Down => {
            form.field = (form.field + 1) % FORM_FIELDS;
            form.cursor = field_text_len(form);
            return;
        }
        KeyCode::BackTab | KeyCode::Up => {
            form.field = (form.field + FORM_FIELDS - 1) % FORM_FIELDS;
            form.cursor = field_text_len(form);
            return;
        }
        _ => {}
    }

    match form.field {
        FIELD_PRIORITY => match key.code {
            KeyCode::Left => {
                let len = Priority::ALL.len();
                form.priority_idx = (form.priority_idx + len - 1) % len;
            }
            KeyCode::Right | KeyCode::Char(' ') => {
                form.priority_idx = (form.priority_idx + 1) % Priority::ALL.len();
            }
            _ => {}
        },
        FIELD_STATUS => match key.code {
            KeyCode::Left => {
                let len = Status::ALL.len();
                form.status_idx = (form.status_idx + len - 1) % len;
            }
            KeyCode::Right | KeyCode::Char(' ') => {
                form.status_idx = (form.status_idx + 1) % Status::ALL.len();
            }
            _ => {}
        },
        FIELD_DEADLINE => {
            if let Some(preset) = quick_deadline_key(key) {
                form.deadline = quick_deadline_value(preset);
                form.cursor = form.deadline.len();
            } else {
                handle_text_key(&mut form.deadline, &mut form.cursor, key);
            }
        }
        FIELD_SUMMARY => {
            handle_text_key(&mut form.summary, &mut form.cursor, key);
        }
        FIELD_ASSIGNEE => {
            handle_text_key(&mut form.assignee, &mut form.cursor, key);
        }
        _ => {
            handle_text_key(&mut form.remark, &mut form.cursor, key);
        }
    }
}

fn field_text_len(form: &crate::tui::app::FormState) -> usize {
    match form.field {
        FIELD_SUMMARY => form.summary.len(),
        FIELD_ASSIGNEE => form.assignee.len(),
        FIELD_DEADLINE => form.deadline.len(),
        FIELD_REMARK => form.remark.len(),
        _ => 0,
    }
}

fn submit(app: &mut App) {
    let Some(form) = app.form.clone() else {
        return;
    };

    let deadline = if form.deadline.is_empty() {
        None
    } else {
        match task::parse_date(&form.deadline) {
            Some(date) => Some(date),
            None => {
                app.error = Some("invalid deadline, expected YYYY-MM-DD".to_string());
                return;
            }
        }
    };

    let draft = TaskDraft {
        summary: form.summary.clone(),
        assignee: form.assignee.clone(),
        priority: Some(form.priority()),
        status: Some(form.status()),
        deadline,
        remark: form.remark.clone(),
    };

    match app.store.add(draft) {
        Ok(id) => {
            app.form = None;
            app.mode = Mode::Navigate;
            app.persist();
            // Land the cursor on the new row, wherever it sorted
            app.pane = Pane::Active;
            if let Some(pos) = view::active_view(app.store.tasks())
                .iter()
                .position(|t| t.id == id)
            {
                app.active_cursor = pos;
            } else if let Some(pos) = view::completed_view(app.store.tasks())
                .iter()
                .position(|t| t.id == id)
            {
                app.pane = Pane::Completed;
                app.completed_cursor = pos;
            }
        }
        Err(e) => {
            // The form stays up with its values so the summary can be filled in
            app.error = Some(e.to_string());
        }
    }
}
