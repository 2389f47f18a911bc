use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::io::journal::atomic_write;
use crate::model::task::Task;

const DATA_FILE: &str = "tasks.json";

/// Per-user data directory for the task file. Falls back to the current
/// directory when the platform offers no data dir.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("worklist")
}

pub fn data_file(data_dir: &Path) -> PathBuf {
    data_dir.join(DATA_FILE)
}

/// Load the persisted task list. A missing file or unparseable content
/// degrades to `None` ("no data"); this never raises to the caller.
pub fn load_tasks(path: &Path) -> Option<Vec<Task>> {
    let content = fs::read_to_string(path).ok()?;
    serde_json::from_str(&content).ok()
}

/// Durably write the full task list, overwriting prior content.
pub fn save_tasks(path: &Path, tasks: &[Task]) -> io::Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let content = serde_json::to_string_pretty(tasks)?;
    atomic_write(path, content.as_bytes())
}
