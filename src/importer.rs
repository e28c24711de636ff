/// Type definitions for the Journey backup format.
///
/// A backup is a ZIP archive with one JSON file per journal entry, plus any
/// photo assets the entries reference. Field survey across backup
/// generations:
///
/// - `text` and `date_journal` are present in every known export.
/// - `address` is dropped entirely by some app versions.
/// - `photos` may be missing, empty, or a list of file names/URLs.
/// - `date_journal` is a POSIX timestamp in milliseconds.
///
/// Everything else in the record (tags, weather, coordinates, mood) is
/// ignored by this tool.
use chrono::DateTime;
use eyre::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::utils::{EntryOrder, ExportError};

/// One entry record as it appears on disk.
#[derive(Debug, Deserialize)]
pub struct RawEntry {
    pub text: String,
    #[serde(default)]
    pub photos: Vec<String>,
    pub address: Option<String>,
    pub date_journal: i64,
}

/// An entry normalized for rendering: the raw record plus the display date
/// (computed once) and the source file name (ordering, error messages).
#[derive(Debug, Clone)]
pub struct JournalEntry {
    pub text: String,
    pub photos: Vec<String>,
    pub address: Option<String>,
    pub date_journal: i64,
    pub display_date: String,
    pub file_name: String,
}

/// Format a POSIX-millisecond timestamp for display, in UTC.
/// The last three digits are milliseconds and are discarded:
/// `1509022007088` is epoch second `1509022007`.
pub fn display_date(millis: i64) -> Option<String> {
    DateTime::from_timestamp(millis.div_euclid(1000), 0)
        .map(|dt| dt.format("%B %d, %Y %H:%M").to_string())
}

/// Load and normalize a single entry file. Any parse failure, missing
/// required field, or unrepresentable timestamp is a malformed record.
pub fn load_entry(path: &Path) -> Result<JournalEntry> {
    let bytes = fs::read(path).wrap_err_with(|| format!("Failed to read: {}", path.display()))?;

    let raw: RawEntry =
        serde_json::from_slice(&bytes).map_err(|err| ExportError::MalformedEntry {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;

    let display_date =
        display_date(raw.date_journal).ok_or_else(|| ExportError::MalformedEntry {
            path: path.to_path_buf(),
            message: format!("timestamp out of range: {}", raw.date_journal),
        })?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(JournalEntry {
        text: raw.text,
        photos: raw.photos,
        address: raw.address,
        date_journal: raw.date_journal,
        display_date,
        file_name,
    })
}

/// Non-recursive scan of `dir` for `.json` entry files, sorted by path.
pub fn list_entry_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let entries = fs::read_dir(dir)
        .wrap_err_with(|| format!("Failed to read directory: {}", dir.display()))?;

    for entry in entries {
        let path = entry?.path();
        if path.is_file() && path.extension().and_then(|ext| ext.to_str()) == Some("json") {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Load every entry in `dir`, aborting on the first malformed record, then
/// apply the configured ordering.
pub fn load_entries(dir: &Path, order: EntryOrder) -> Result<Vec<JournalEntry>> {
    let files = list_entry_files(dir)?;
    let mut entries = Vec::with_capacity(files.len());
    for file in &files {
        entries.push(load_entry(file)?);
    }

    match order {
        EntryOrder::Date => entries.sort_by(|a, b| {
            (a.date_journal, &a.file_name).cmp(&(b.date_journal, &b.file_name))
        }),
        EntryOrder::Name => entries.sort_by(|a, b| a.file_name.cmp(&b.file_name)),
    }

    Ok(entries)
}
