//! Error types for project summaries

use std::path::PathBuf;

use thiserror::Error;

use crate::records::RecordKind;

/// Result type alias for summary operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for summary operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV serialization error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Spreadsheet serialization error
    #[error("Spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// The project descriptor could not be opened
    #[error("Project file {} could not be read: {source}", .path.display())]
    MissingIndexFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A path that resolves to no project descriptor
    #[error("No project file found at {}", .0.display())]
    ProjectNotFound(PathBuf),

    /// A flow, geometry or plan file shorter than its header grammar
    #[error(
        "Malformed {kind} file {}: expected at least {expected} lines, found {found}",
        .path.display()
    )]
    MalformedRecordFile {
        path: PathBuf,
        kind: RecordKind,
        expected: usize,
        found: usize,
    },

    /// A plan pointing at a flow or geometry file that was not parsed
    #[error("Plan {plan} references {kind} file {key}, which does not exist or could not be parsed")]
    UnresolvedReference {
        plan: String,
        kind: RecordKind,
        key: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
