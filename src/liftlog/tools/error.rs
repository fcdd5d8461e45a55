use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ToolError>;

/// Error type covering the different failure cases that can occur when the
/// tool reads, appends to, or summarises the workout files.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Wrapper for IO failures such as reading files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when a CSV row cannot be read or decoded into its record type.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Raised when JSON serialization of command output fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors bubbled up from the Excel writer implementation.
    #[error("Excel write error: {0}")]
    ExcelWrite(#[from] rust_xlsxwriter::XlsxError),

    /// Errors bubbled up from the Excel reader implementation.
    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::XlsxError),

    /// Raised when a movement is inserted under an id the catalog already holds.
    #[error("movement id already exists: {0}")]
    DuplicateIdentifier(String),

    /// Raised when an import source does not exist.
    #[error("import source not found: {0}")]
    SourceNotFound(PathBuf),

    /// Raised when one of the backing files cannot be written.
    #[error("failed to write {path}: {source}")]
    StorageWrite {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Raised when a set names neither a known movement id nor a movement name.
    #[error("movement not found; provide a movement id or a movement name to auto-create")]
    MovementNotFound,

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

impl ToolError {
    pub(crate) fn storage_write(path: impl Into<PathBuf>, source: impl Into<csv::Error>) -> Self {
        ToolError::StorageWrite {
            path: path.into(),
            source: source.into(),
        }
    }
}

/// Non-fatal signal raised when a set carries a tag outside the known set
/// type vocabulary. The set is still written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("set_type '{0}' not in known choices")]
pub struct UnknownSetType(pub String);
