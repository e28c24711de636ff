use clap::ValueEnum;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Configuration required to run the export process.
/// This decouples the pipeline from how the arguments were parsed (CLI/Config file).
#[derive(Clone)]
pub struct ExportConfig {
    pub source: PathBuf,
    pub output: Option<PathBuf>,
    pub stylesheet: String,
    pub title_source: TitleSource,
    pub render_markdown: bool,
    pub order: EntryOrder,
    pub verbose: bool,
    pub quiet: bool,
}

/// What the `<h1>` of each entry block is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TitleSource {
    /// The formatted entry date.
    #[default]
    Date,
    /// The first few words of the entry text.
    TextPrefix,
}

/// Order of entry blocks in the output page. Raw directory-listing order is
/// never used; both choices are deterministic across platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntryOrder {
    /// Ascending by entry timestamp, file name as tie-break.
    #[default]
    Date,
    /// By entry file name.
    Name,
}

/// Failure classes of a run. Created at the point of failure and downcast
/// from the `eyre::Report` in `main` to pick the process exit code.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("input path does not exist: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("refusing to overwrite existing path: {}", .0.display())]
    OutputCollision(PathBuf),

    #[error("malformed entry {}: {message}", .path.display())]
    MalformedEntry { path: PathBuf, message: String },

    #[error("failed to read archive {}: {source}", .path.display())]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },
}

impl ExportError {
    /// Exit status for this failure: 10 for malformed input, 20 for the
    /// filesystem class.
    pub fn exit_code(&self) -> i32 {
        match self {
            ExportError::MalformedEntry { .. } => 10,
            _ => 20,
        }
    }
}
