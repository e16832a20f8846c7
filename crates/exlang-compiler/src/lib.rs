//! # exlang-compiler
//!
//! Compiles exlang markup - a small declarative XML language describing
//! spreadsheet content - into cell writes against a
//! [`SheetSink`](exlang_core::SheetSink).
//!
//! The pipeline is: parse the markup into a [`Document`](ast::Document)
//! tree, run the [`validator`] (which accumulates every structural error in
//! one pass), then walk each sheet's directives in the fixed category order
//! Row, Range, Repeat, Cell and issue cell writes. The fixed order gives
//! the deterministic overwrite precedence Row < Range < Repeat < Cell.
//!
//! ## Example
//!
//! ```rust
//! use exlang_compiler::compile;
//! use exlang_core::Workbook;
//!
//! let markup = r#"
//! <workbook>
//!   <sheet name="Report">
//!     <row r="1"><v>Item</v><v>Count</v></row>
//!     <cell addr="B2" v="42" t="number"/>
//!   </sheet>
//! </workbook>
//! "#;
//!
//! let mut wb = Workbook::new();
//! compile(markup, &mut wb).unwrap();
//!
//! let sheet = wb.worksheet_by_name("Report").unwrap();
//! assert_eq!(sheet.value("B2").unwrap().unwrap().as_int(), Some(42));
//! ```

pub mod ast;
pub mod compiler;
pub mod error;
pub mod parser;
pub mod template;
pub mod validator;

// Re-exports for convenience
pub use ast::{
    CellDirective, Direction, Directive, Document, RangeDirective, RepeatDirective, RowDirective,
    Sheet,
};
pub use compiler::{compile, compile_document};
pub use error::{CompileError, CompileResult};
pub use parser::parse_document;
pub use template::expand;
pub use validator::{resolve_sheet_names, validate};
