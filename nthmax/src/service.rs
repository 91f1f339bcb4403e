//! File-level N-th maximum queries.
//!
//! This module provides [`NthMaxService`], which resolves a spreadsheet path,
//! opens its first sheet and runs bounded selection over column A.
//!
//! ```ignore
//! use nthmax::{NonNumericPolicy, NthMaxServiceBuilder};
//!
//! let service = NthMaxServiceBuilder::new()
//!     .base_dir("/data/sheets")
//!     .non_numeric(NonNumericPolicy::Skip)
//!     .build();
//!
//! let outcome = service.nth_max("sales.xlsx", 3)?;
//! println!("3rd largest: {}", outcome.value);
//! ```

use std::path::{Path, PathBuf};

use crate::error::{NthMaxError, Result};
use crate::selector::{try_select_nth_max, try_select_top_n};
use crate::source::{FirstColumn, FirstSheet, NonNumericPolicy};

/// Result of a successful N-th maximum query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NthMaxOutcome {
    /// The N-th largest value in column A.
    pub value: i64,
    /// The requested position (1 = maximum).
    pub n: usize,
    /// Number of rows in the sheet's used range that were read.
    pub rows_scanned: usize,
    /// Number of numeric cells among those rows.
    pub numeric_values: usize,
}

/// Overview of column A of a workbook's first sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSummary {
    /// Names of every sheet in the workbook.
    pub sheet_names: Vec<String>,
    /// Name of the sheet that was scanned.
    pub sheet_name: String,
    /// Rows in the used range.
    pub rows: usize,
    /// Numeric cells in column A.
    pub numeric_values: usize,
    /// Rows whose column A cell was blank (or skipped as non-numeric).
    pub blank_cells: usize,
    /// Smallest numeric value, if any.
    pub min: Option<i64>,
    /// Largest numeric value, if any.
    pub max: Option<i64>,
}

/// Validate a caller-supplied position.
///
/// # Errors
///
/// Returns [`NthMaxError::InvalidArgument`] unless `n >= 1`.
pub fn validate_n(n: i64) -> Result<usize> {
    usize::try_from(n)
        .ok()
        .filter(|n| *n > 0)
        .ok_or(NthMaxError::InvalidArgument { n })
}

/// N-th maximum queries over spreadsheet files.
///
/// Each call opens its own row source and selector, so a single service can
/// be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct NthMaxService {
    /// Directory that relative paths are resolved against.
    base_dir: Option<PathBuf>,
    /// Handling of text, boolean and error cells in column A.
    non_numeric: NonNumericPolicy,
}

impl NthMaxService {
    /// Create a service with no base directory and the default policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for more configuration options.
    pub fn builder() -> NthMaxServiceBuilder {
        NthMaxServiceBuilder::new()
    }

    /// The configured base directory, if any.
    pub fn base_dir(&self) -> Option<&Path> {
        self.base_dir.as_deref()
    }

    /// The configured non-numeric cell policy.
    pub fn non_numeric_policy(&self) -> NonNumericPolicy {
        self.non_numeric
    }

    /// Resolve a caller-supplied path.
    ///
    /// Absolute paths are returned unchanged; relative paths are joined to the
    /// base directory when one is configured.
    pub fn resolve_path<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        let path = path.as_ref();
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }

    /// Return the `n`-th largest numeric value in column A of the first sheet.
    ///
    /// # Errors
    ///
    /// - [`NthMaxError::InvalidArgument`] if `n < 1` (the file is not opened)
    /// - [`NthMaxError::FileNotFound`] if the resolved path does not exist
    /// - [`NthMaxError::InsufficientData`] if fewer than `n` numeric values exist
    /// - [`NthMaxError::Workbook`], [`NthMaxError::NoSheets`] or
    ///   [`NthMaxError::NonNumericCell`] if the file cannot be read
    pub fn nth_max<P: AsRef<Path>>(&self, path: P, n: i64) -> Result<NthMaxOutcome> {
        let n = validate_n(n)?;
        let mut column = self.open_column(path.as_ref())?;

        let mut numeric_values = 0usize;
        let value = try_select_nth_max(
            column.by_ref().inspect(|v| {
                if matches!(v, Ok(Some(_))) {
                    numeric_values += 1;
                }
            }),
            n,
        )?;

        Ok(NthMaxOutcome {
            value,
            n,
            rows_scanned: column.rows_read(),
            numeric_values,
        })
    }

    /// Return the `n` largest numeric values in column A, largest first.
    ///
    /// # Errors
    ///
    /// Same as [`Self::nth_max`].
    pub fn top_values<P: AsRef<Path>>(&self, path: P, n: i64) -> Result<Vec<i64>> {
        let n = validate_n(n)?;
        let column = self.open_column(path.as_ref())?;
        try_select_top_n(column, n)
    }

    /// Summarize column A of the first sheet.
    pub fn column_summary<P: AsRef<Path>>(&self, path: P) -> Result<ColumnSummary> {
        let path = self.existing_path(path.as_ref())?;
        let sheet = FirstSheet::open(&path)?;

        let mut summary = ColumnSummary {
            sheet_names: sheet.sheet_names.clone(),
            sheet_name: sheet.name.clone(),
            ..Default::default()
        };

        for value in sheet.into_column(self.non_numeric) {
            summary.rows += 1;
            match value? {
                Some(v) => {
                    summary.numeric_values += 1;
                    summary.min = Some(summary.min.map_or(v, |m| m.min(v)));
                    summary.max = Some(summary.max.map_or(v, |m| m.max(v)));
                }
                None => summary.blank_cells += 1,
            }
        }

        Ok(summary)
    }

    fn existing_path(&self, path: &Path) -> Result<PathBuf> {
        let resolved = self.resolve_path(path);
        if !resolved.exists() {
            return Err(NthMaxError::FileNotFound { path: resolved });
        }
        Ok(resolved)
    }

    fn open_column(&self, path: &Path) -> Result<FirstColumn> {
        let resolved = self.existing_path(path)?;
        FirstColumn::open(resolved, self.non_numeric)
    }
}

/// Builder for creating [`NthMaxService`] with custom configuration.
///
/// ```ignore
/// use nthmax::NthMaxServiceBuilder;
///
/// let service = NthMaxServiceBuilder::from_env()?.build();
/// ```
#[derive(Debug, Clone, Default)]
pub struct NthMaxServiceBuilder {
    base_dir: Option<PathBuf>,
    non_numeric: NonNumericPolicy,
}

impl NthMaxServiceBuilder {
    /// Create a builder with no base directory and the `fail` policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder configured from environment variables.
    ///
    /// # Environment Variables
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `NTHMAX_BASE_DIR` | Directory for resolving relative paths | None |
    /// | `NTHMAX_NON_NUMERIC` | `fail` or `skip` | `fail` |
    ///
    /// # Errors
    ///
    /// Returns an error if `NTHMAX_NON_NUMERIC` holds an unknown policy.
    pub fn from_env() -> Result<Self> {
        let base_dir = std::env::var("NTHMAX_BASE_DIR")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        let non_numeric = match std::env::var("NTHMAX_NON_NUMERIC") {
            Ok(value) => value.parse().map_err(|msg: String| {
                NthMaxError::Io(std::io::Error::new(std::io::ErrorKind::InvalidInput, msg))
            })?,
            Err(_) => NonNumericPolicy::default(),
        };

        Ok(Self {
            base_dir,
            non_numeric,
        })
    }

    /// Set the directory that relative paths are resolved against.
    pub fn base_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.base_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set how non-numeric cells in column A are handled.
    pub fn non_numeric(mut self, policy: NonNumericPolicy) -> Self {
        self.non_numeric = policy;
        self
    }

    /// Build the [`NthMaxService`].
    pub fn build(self) -> NthMaxService {
        NthMaxService {
            base_dir: self.base_dir,
            non_numeric: self.non_numeric,
        }
    }
}
