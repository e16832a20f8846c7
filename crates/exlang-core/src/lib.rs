//! # exlang-core
//!
//! Core data structures for the exlang markup-to-spreadsheet compiler.
//!
//! This crate provides the spreadsheet-side types the compiler works with:
//! - [`CellAddress`] and [`CellRange`] - A1-style addressing and inclusive rectangles
//! - [`CellValue`] and [`TypeHint`] - typed cell values and literal inference
//! - [`SheetSink`] and [`SheetWrite`] - the capability interface the compiler writes through
//! - [`Workbook`], [`Worksheet`] - an in-memory sink implementation
//!
//! ## Example
//!
//! ```rust
//! use exlang_core::{CellValue, SheetSink, SheetWrite, Workbook};
//!
//! let mut workbook = Workbook::new();
//! let sheet = workbook.create_sheet("Data").unwrap();
//!
//! // Using row/column indices (1-based, A = column 1)
//! sheet.set_cell(1, 1, CellValue::from("Hello")).unwrap();
//!
//! // Or using A1-style addresses
//! sheet.set_cell_by_address("B1", CellValue::Int(42)).unwrap();
//! ```

pub mod address;
pub mod error;
pub mod sink;
pub mod value;
pub mod workbook;
pub mod worksheet;

// Re-exports for convenience
pub use address::{CellAddress, CellRange};
pub use error::{Error, Result};
pub use sink::{SheetSink, SheetWrite};
pub use value::{CellValue, TypeHint};
pub use workbook::Workbook;
pub use worksheet::Worksheet;

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u16 = 16_384;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;
