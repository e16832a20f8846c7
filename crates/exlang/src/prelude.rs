//! Prelude module - common imports for exlang users
//!
//! ```rust
//! use exlang::prelude::*;
//! ```

pub use crate::{
    compile,
    compile_to_workbook,
    validate,
    // Addressing
    CellAddress,
    CellRange,
    // Cell types
    CellValue,
    // Error types
    CompileError,
    Error,
    // Sink traits
    SheetSink,
    SheetWrite,
    TypeHint,
    // Main types
    Workbook,
    Worksheet,
};
