//! File I/O around the codecs

use serde_json::Value;
use std::fs;
use std::path::Path;

use bookmarks_storage::{BookmarkRow, Database};

use crate::Result;

fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => Ok(fs::create_dir_all(parent)?),
        _ => Ok(()),
    }
}

pub fn read_text(path: &Path) -> Result<String> {
    Ok(fs::read_to_string(path)?)
}

pub fn write_text(path: &Path, text: &str) -> Result<()> {
    ensure_parent(path)?;
    fs::write(path, text)?;
    tracing::debug!(path = %path.display(), bytes = text.len(), "Wrote text file");
    Ok(())
}

/// Non-ASCII text is written as is; `pretty` indents by two spaces.
pub fn write_json(path: &Path, value: &Value, pretty: bool) -> Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    write_text(path, &text)
}

/// Create a new database at `path` and insert `rows`. Existing files are
/// never reused.
pub fn save_db(path: &Path, rows: &[BookmarkRow]) -> Result<usize> {
    ensure_parent(path)?;
    let db = Database::create(path)?;
    Ok(db.bulk_insert(rows)?)
}
