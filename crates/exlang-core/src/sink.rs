//! The sink capability interface the compiler writes through
//!
//! The compiler never learns how cells are persisted; it only needs to
//! create named sheets and set values at addresses. [`Workbook`] implements
//! the interface for in-memory use; a file-format backend implements it for
//! real output.
//!
//! [`Workbook`]: crate::Workbook

use crate::address::CellAddress;
use crate::error::Result;
use crate::value::CellValue;

/// Write access to a single sheet
pub trait SheetWrite {
    /// Set a cell value at 1-based row/column indices
    fn set_cell(&mut self, row: u32, col: u16, value: CellValue) -> Result<()>;

    /// Set a cell value at an A1-style address
    fn set_cell_by_address(&mut self, addr: &str, value: CellValue) -> Result<()> {
        let addr = CellAddress::parse(addr)?;
        self.set_cell(addr.row, addr.col, value)
    }
}

/// A destination for compiled sheets
///
/// Sheets are created in document order; every write afterwards is a direct
/// set-at-address operation, never a read back.
pub trait SheetSink {
    /// The sheet handle type writes go through
    type Sheet: SheetWrite;

    /// Create a named sheet and return a handle to it
    fn create_sheet(&mut self, name: &str) -> Result<&mut Self::Sheet>;
}
