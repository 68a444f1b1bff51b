use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the Launch Calendar.
#[derive(Error, Debug)]
pub enum CalendarError {
    /// The data file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A CSV record could not be parsed.
    #[error("Failed to parse CSV: {0}")]
    CsvParse(#[from] csv::Error),

    /// The data file has no header row, so no columns can be derived.
    #[error("Data file {0} has no header row")]
    MissingHeader(PathBuf),

    /// No launch grid file could be located.
    #[error("Data file not found: {0}")]
    DataFileNotFound(PathBuf),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the calendar crates.
pub type Result<T> = std::result::Result<T, CalendarError>;
