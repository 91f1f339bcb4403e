//! # nthmax - N-th maximum of a spreadsheet column
//!
//! Finds the N-th largest numeric value in the first column of a workbook's
//! first sheet, in a single pass and `O(N)` memory.
//!
//! ## Features
//!
//! - **Bounded**: a min-heap of at most N elements, whatever the row count
//! - **Generic**: [`select_nth_max`] works over any `Option<T: Ord>` iterator
//! - **Formats**: xlsx, xlsm, xlsb, xls and ods through calamine
//! - **Explicit errors**: bad input, insufficient data and read failures are
//!   distinct [`NthMaxError`] variants
//!
//! ## Quick Start
//!
//! ```ignore
//! use nthmax::NthMaxService;
//!
//! let service = NthMaxService::new();
//! let outcome = service.nth_max("/data/numbers.xlsx", 2)?;
//! println!("2nd largest: {}", outcome.value);
//! ```
//!
//! ## Cell Handling
//!
//! - Numbers (and dates, by serial number) are truncated toward zero: `7.9 -> 7`, `-7.9 -> -7`
//! - Blank cells are skipped, never read as zero
//! - Text, boolean and error cells follow the [`NonNumericPolicy`]

pub mod error;
pub mod selector;
pub mod service;
pub mod source;

// Re-export main types at crate root for convenience
pub use error::{ErrorKind, NthMaxError, Result};
pub use selector::{select_nth_max, try_select_nth_max, try_select_top_n, TopN};
pub use service::{validate_n, ColumnSummary, NthMaxOutcome, NthMaxService, NthMaxServiceBuilder};
pub use source::{truncate_cell, FirstColumn, FirstSheet, NonNumericPolicy};
