use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

const JOURNAL_FILE: &str = "journal.md";
const FILE_HEADER: &str = "# worklist journal\n\n\
    Failed writes land here so the payload is not lost.\n\n";

/// Write `content` to `path` atomically: write a temp file in the same
/// directory, then rename over the target.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Record a failed task-file write in the journal next to the data file.
/// Journaling failures degrade to stderr; nothing here can crash the UI.
pub fn log_write_failure(data_dir: &Path, error: &io::Error, payload: &str) {
    if let Err(e) = log_write_failure_inner(data_dir, error, payload) {
        eprintln!("warning: could not write to journal: {}", e);
    }
}

fn log_write_failure_inner(data_dir: &Path, error: &io::Error, payload: &str) -> io::Result<()> {
    let path = data_dir.join(JOURNAL_FILE);
    let needs_header = !path.exists() || std::fs::metadata(&path).map_or(true, |m| m.len() == 0);

    let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
    if needs_header {
        file.write_all(FILE_HEADER.as_bytes())?;
    }

    let mut entry = String::new();
    entry.push_str(&format!(
        "## {} — task write failed: {}\n\n",
        chrono::Local::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        error,
    ));
    entry.push_str("```json\n");
    entry.push_str(payload);
    if !payload.ends_with('\n') {
        entry.push('\n');
    }
    entry.push_str("```\n\n");

    file.write_all(entry.as_bytes())
}
