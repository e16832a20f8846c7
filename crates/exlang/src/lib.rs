//! # exlang
//!
//! A compiler from exlang - a compact, declarative XML markup describing
//! spreadsheet content - into a concrete cell grid.
//!
//! Markup like this:
//!
//! ```xml
//! <workbook>
//!   <sheet name="Budget">
//!     <row r="1"><v>Month</v><v>Amount</v></row>
//!     <repeat times="12" r="2" c="A">
//!       <v>Month {{i}}</v>
//!       <v>0</v>
//!     </repeat>
//!     <cell addr="D1" v="2024-01-01" t="date"/>
//!   </sheet>
//! </workbook>
//! ```
//!
//! compiles into named sheets of typed cell values, written through the
//! [`SheetSink`] capability interface. [`Workbook`] is the bundled
//! in-memory sink; file-format backends implement the same trait.
//!
//! ## Example
//!
//! ```rust
//! use exlang::prelude::*;
//!
//! let wb = exlang::compile_to_workbook(
//!     r#"<workbook><sheet>
//!          <cell addr="A1" v="Test Value"/>
//!          <cell addr="B2" v="42" t="number"/>
//!        </sheet></workbook>"#,
//! ).unwrap();
//!
//! assert_eq!(wb.sheet_names(), vec!["Sheet1"]);
//! let sheet = wb.worksheet(0).unwrap();
//! assert_eq!(sheet.value("A1").unwrap().unwrap().as_str(), Some("Test Value"));
//! assert_eq!(sheet.value("B2").unwrap().unwrap().as_int(), Some(42));
//! ```

pub mod prelude;

// Re-export core types
pub use exlang_core::{
    CellAddress, CellRange, CellValue, Error, Result, SheetSink, SheetWrite, TypeHint, Workbook,
    Worksheet, MAX_COLS, MAX_ROWS, MAX_SHEET_NAME_LEN,
};

// Re-export compiler types
pub use exlang_compiler::{
    compile, compile_document, expand, parse_document, resolve_sheet_names, validate, CompileError,
    CompileResult, Direction, Directive, Document, Sheet,
};

/// Compile markup text into a fresh in-memory [`Workbook`]
pub fn compile_to_workbook(markup: &str) -> CompileResult<Workbook> {
    let mut workbook = Workbook::new();
    compile(markup, &mut workbook)?;
    Ok(workbook)
}
