//! Error types for the nthmax library.

use std::convert::Infallible;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while selecting the N-th maximum of a column.
#[derive(Error, Debug)]
pub enum NthMaxError {
    /// `n` is not a positive integer.
    #[error("Invalid argument: n must be a positive integer, got {n}")]
    InvalidArgument { n: i64 },

    /// Fewer than `n` numeric values were present in the scanned column.
    #[error("Insufficient data: requested the {requested}-th maximum but only {found} numeric values were found")]
    InsufficientData { requested: usize, found: usize },

    /// The spreadsheet file does not exist.
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// The workbook could not be opened or parsed.
    #[error("Workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    /// IO error when reading files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The workbook contains no worksheets.
    #[error("Workbook has no sheets: {path}")]
    NoSheets { path: PathBuf },

    /// A present cell in the first column is not numeric.
    #[error("Non-numeric cell at row {row}: {value}")]
    NonNumericCell { row: u32, value: String },
}

/// Coarse classification of [`NthMaxError`], for callers that map errors to
/// user-facing statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller supplied a bad `n` or a path that does not exist.
    BadInput,
    /// The column held fewer than `n` numeric values.
    InsufficientData,
    /// The file or sheet could not be read.
    SourceUnavailable,
}

impl NthMaxError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            NthMaxError::InvalidArgument { .. } | NthMaxError::FileNotFound { .. } => {
                ErrorKind::BadInput
            }
            NthMaxError::InsufficientData { .. } => ErrorKind::InsufficientData,
            NthMaxError::Workbook(_)
            | NthMaxError::Io(_)
            | NthMaxError::NoSheets { .. }
            | NthMaxError::NonNumericCell { .. } => ErrorKind::SourceUnavailable,
        }
    }
}

impl From<Infallible> for NthMaxError {
    fn from(e: Infallible) -> Self {
        match e {}
    }
}

/// Result type alias using [`NthMaxError`].
pub type Result<T> = std::result::Result<T, NthMaxError>;
