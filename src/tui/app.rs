use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::{journal, tasks_io};
use crate::model::task::{Priority, Status, Task};
use crate::store::{self, TaskStore};
use crate::view;

use super::input;
use super::render;
use super::theme::Theme;

/// Which table has the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Active,
    Completed,
}

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    EditCell,
    Form,
}

/// Table columns. `Created` and `Completed` are read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Created,
    Priority,
    Summary,
    Status,
    Assignee,
    Deadline,
    Remark,
    Completed,
}

impl Column {
    /// Columns the cell cursor can land on, in left-to-right order
    pub const EDITABLE: [Column; 6] = [
        Column::Priority,
        Column::Summary,
        Column::Status,
        Column::Assignee,
        Column::Deadline,
        Column::Remark,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Column::Created => "added",
            Column::Priority => "priority",
            Column::Summary => "summary",
            Column::Status => "status",
            Column::Assignee => "assignee",
            Column::Deadline => "due",
            Column::Remark => "remark",
            Column::Completed => "done",
        }
    }

    /// How the cell is edited
    pub fn edit_kind(self) -> EditKind {
        match self {
            Column::Priority | Column::Status => EditKind::Select,
            Column::Deadline => EditKind::Date,
            _ => EditKind::Text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    Text,
    Select,
    Date,
}

/// In-flight inline cell edit
#[derive(Debug, Clone)]
pub struct CellEdit {
    pub task_id: String,
    pub column: Column,
    /// Text/date columns: the edit buffer
    pub buffer: String,
    /// Byte offset of the cursor in `buffer`
    pub cursor: usize,
    /// Select columns: index into `Priority::ALL` / `Status::ALL`
    pub select_idx: usize,
}

/// Add-task form field order mirrors the entry form: summary, assignee,
/// priority, status, deadline, remark
pub const FORM_FIELDS: usize = 6;

#[derive(Debug, Clone, Default)]
pub struct FormState {
    pub field: usize,
    pub summary: String,
    pub assignee: String,
    pub priority_idx: usize,
    pub status_idx: usize,
    pub deadline: String,
    pub remark: String,
    /// Byte offset of the cursor in the focused text field
    pub cursor: usize,
}

impl FormState {
    pub fn priority(&self) -> Priority {
        Priority::ALL[self.priority_idx.min(Priority::ALL.len() - 1)]
    }

    pub fn status(&self) -> Status {
        Status::ALL[self.status_idx.min(Status::ALL.len() - 1)]
    }
}

/// Main application state
pub struct App {
    pub store: TaskStore,
    pub data_file: PathBuf,
    pub theme: Theme,
    pub pane: Pane,
    pub mode: Mode,
    /// Row cursor in the active table (index into the active view)
    pub active_cursor: usize,
    /// Row cursor in the completed table
    pub completed_cursor: usize,
    /// Column cursor (index into `Column::EDITABLE`)
    pub col: usize,
    pub edit: Option<CellEdit>,
    pub form: Option<FormState>,
    /// Validation message shown in the status row until the next key
    pub error: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(store: TaskStore, data_file: PathBuf) -> Self {
        App {
            store,
            data_file,
            theme: Theme::default(),
            pane: Pane::Active,
            mode: Mode::Navigate,
            active_cursor: 0,
            completed_cursor: 0,
            col: 1, // summary
            edit: None,
            form: None,
            error: None,
            should_quit: false,
        }
    }

    /// Id of the task under the row cursor, through the current projection
    pub fn cursor_task_id(&self) -> Option<String> {
        match self.pane {
            Pane::Active => view::active_view(self.store.tasks())
                .get(self.active_cursor)
                .map(|t| t.id.clone()),
            Pane::Completed => view::completed_view(self.store.tasks())
                .get(self.completed_cursor)
                .map(|t| t.id.clone()),
        }
    }

    pub fn cursor_task(&self) -> Option<Task> {
        let id = self.cursor_task_id()?;
        self.store.get(&id).cloned()
    }

    /// Row count of the pane's projection
    pub fn pane_len(&self, pane: Pane) -> usize {
        match pane {
            Pane::Active => view::active_view(self.store.tasks()).len(),
            Pane::Completed => view::completed_view(self.store.tasks()).len(),
        }
    }

    /// Keep both row cursors inside their projections
    pub fn clamp_cursors(&mut self) {
        let active_len = self.pane_len(Pane::Active);
        let completed_len = self.pane_len(Pane::Completed);
        self.active_cursor = self.active_cursor.min(active_len.saturating_sub(1));
        self.completed_cursor = self.completed_cursor.min(completed_len.saturating_sub(1));
    }

    /// The column under the cell cursor
    pub fn cursor_column(&self) -> Column {
        Column::EDITABLE[self.col.min(Column::EDITABLE.len() - 1)]
    }

    /// Persist the current state. Gated on the initial load; failures are
    /// journaled and otherwise swallowed (fire-and-forget).
    pub fn persist(&mut self) {
        if !self.store.is_loaded() {
            return;
        }
        if let Err(e) = tasks_io::save_tasks(&self.data_file, self.store.tasks()) {
            let payload =
                serde_json::to_string_pretty(self.store.tasks()).unwrap_or_default();
            let dir = self
                .data_file
                .parent()
                .unwrap_or(Path::new("."))
                .to_path_buf();
            journal::log_write_failure(&dir, &e, &payload);
        }
    }

    pub fn undo(&mut self) {
        if self.store.undo() {
            self.clamp_cursors();
            self.persist();
        }
    }

    pub fn redo(&mut self) {
        if self.store.redo() {
            self.clamp_cursors();
            self.persist();
        }
    }

    pub fn delete_cursor_task(&mut self) {
        let Some(id) = self.cursor_task_id() else {
            return;
        };
        if self.store.delete(&id) {
            self.clamp_cursors();
            self.persist();
        }
    }
}

/// Run the TUI application
pub fn run(data_dir: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let data_dir = match data_dir {
        Some(dir) => PathBuf::from(dir),
        None => tasks_io::default_data_dir(),
    };
    let data_file = tasks_io::data_file(&data_dir);

    // The store accepts no save until this load has resolved; a missing or
    // unreadable file falls back to the built-in samples.
    let mut store = TaskStore::new();
    match tasks_io::load_tasks(&data_file) {
        Some(tasks) => store.load(tasks),
        None => store.load(store::sample_tasks()),
    }

    let mut app = App::new(store, data_file);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
