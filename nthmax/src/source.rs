//! Spreadsheet row source for the first column of the first sheet.
//!
//! [`FirstColumn`] walks the used range of a sheet top to bottom and yields one
//! `Result<Option<i64>>` per row, read from column A. Numeric cells are
//! truncated toward zero; blank cells yield `None`.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use calamine::{open_workbook_auto, Data, Range, Reader};

use crate::error::{NthMaxError, Result};

/// What to do with a present cell that holds no number (text, boolean, error).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NonNumericPolicy {
    /// Abort the read with [`NthMaxError::NonNumericCell`].
    #[default]
    Fail,
    /// Treat the cell like a blank one.
    Skip,
}

impl FromStr for NonNumericPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fail" | "error" => Ok(NonNumericPolicy::Fail),
            "skip" | "ignore" => Ok(NonNumericPolicy::Skip),
            other => Err(format!(
                "unknown non-numeric policy '{}', expected 'fail' or 'skip'",
                other
            )),
        }
    }
}

impl fmt::Display for NonNumericPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NonNumericPolicy::Fail => write!(f, "fail"),
            NonNumericPolicy::Skip => write!(f, "skip"),
        }
    }
}

/// Truncate a cell's numeric value toward zero.
///
/// Values beyond the `i64` range saturate; NaN maps to 0.
pub fn truncate_cell(value: f64) -> i64 {
    value.trunc() as i64
}

/// Convert one cell of column A into a row value.
///
/// `row` is the 0-based sheet row, reported 1-based in errors.
pub fn cell_value(cell: Option<&Data>, row: u32, policy: NonNumericPolicy) -> Result<Option<i64>> {
    match cell {
        None | Some(Data::Empty) => Ok(None),
        Some(Data::Int(i)) => Ok(Some(*i)),
        Some(Data::Float(f)) => Ok(Some(truncate_cell(*f))),
        Some(Data::DateTime(dt)) => Ok(Some(truncate_cell(dt.as_f64()))),
        Some(other) => match policy {
            NonNumericPolicy::Skip => Ok(None),
            NonNumericPolicy::Fail => Err(NthMaxError::NonNumericCell {
                row: row.saturating_add(1),
                value: other.to_string(),
            }),
        },
    }
}

/// The first worksheet of a workbook, loaded by position.
pub struct FirstSheet {
    /// Names of every sheet in the workbook, in order.
    pub sheet_names: Vec<String>,
    /// Name of the first sheet.
    pub name: String,
    /// Used cell range of the first sheet.
    pub range: Range<Data>,
}

impl FirstSheet {
    /// Open a workbook (xlsx, xlsm, xlsb, xls or ods) and load its first sheet.
    ///
    /// # Errors
    ///
    /// - [`NthMaxError::Workbook`] if the file cannot be opened or parsed
    /// - [`NthMaxError::NoSheets`] if the workbook has no worksheets
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut workbook = open_workbook_auto(path)?;
        let sheet_names = workbook.sheet_names().to_vec();

        let name = sheet_names
            .first()
            .cloned()
            .ok_or_else(|| NthMaxError::NoSheets {
                path: path.to_path_buf(),
            })?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| NthMaxError::NoSheets {
                path: path.to_path_buf(),
            })??;

        Ok(Self {
            sheet_names,
            name,
            range,
        })
    }

    /// Iterate column A of this sheet.
    pub fn into_column(self, policy: NonNumericPolicy) -> FirstColumn {
        FirstColumn::new(self.range, policy)
    }
}

/// Single-pass iterator over column A of a sheet range.
///
/// # Example
///
/// ```ignore
/// use nthmax::{FirstColumn, NonNumericPolicy};
///
/// let column = FirstColumn::open("numbers.xlsx", NonNumericPolicy::Fail)?;
/// let best = nthmax::try_select_nth_max(column, 3)?;
/// ```
pub struct FirstColumn {
    range: Range<Data>,
    /// Next absolute row to read.
    next_row: u64,
    /// Last absolute row of the used range, `None` for an empty sheet.
    end_row: Option<u32>,
    policy: NonNumericPolicy,
    rows_read: usize,
}

impl FirstColumn {
    /// Wrap an already-loaded sheet range.
    pub fn new(range: Range<Data>, policy: NonNumericPolicy) -> Self {
        let next_row = range.start().map(|(row, _)| row as u64).unwrap_or(0);
        let end_row = range.end().map(|(row, _)| row);
        Self {
            range,
            next_row,
            end_row,
            policy,
            rows_read: 0,
        }
    }

    /// Open `path` and iterate column A of its first sheet.
    pub fn open<P: AsRef<Path>>(path: P, policy: NonNumericPolicy) -> Result<Self> {
        Ok(FirstSheet::open(path)?.into_column(policy))
    }

    /// Number of rows yielded so far.
    pub fn rows_read(&self) -> usize {
        self.rows_read
    }
}

impl Iterator for FirstColumn {
    type Item = Result<Option<i64>>;

    fn next(&mut self) -> Option<Self::Item> {
        let end = self.end_row?;
        if self.next_row > end as u64 {
            return None;
        }

        let row = self.next_row as u32;
        self.next_row += 1;
        self.rows_read += 1;

        Some(cell_value(self.range.get_value((row, 0)), row, self.policy))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match self.end_row {
            Some(end) if self.next_row <= end as u64 => (end as u64 - self.next_row + 1) as usize,
            _ => 0,
        };
        (remaining, Some(remaining))
    }
}
