//! Worksheet type

use std::collections::BTreeMap;

use crate::address::{CellAddress, CellRange};
use crate::error::{Error, Result};
use crate::sink::SheetWrite;
use crate::value::CellValue;
use crate::{MAX_COLS, MAX_ROWS};

/// A worksheet: a named sparse grid of cells
///
/// Only non-empty cells are stored, in a row-based map so iteration comes
/// out in row-major order.
#[derive(Debug, Clone, Default)]
pub struct Worksheet {
    /// Sheet name
    name: String,
    /// Sparse cell storage: row -> (col -> value), 1-based indices
    rows: BTreeMap<u32, BTreeMap<u16, CellValue>>,
}

impl Worksheet {
    /// Create a new empty worksheet with the given name
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            rows: BTreeMap::new(),
        }
    }

    /// Get the sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the sheet name
    pub fn set_name<S: Into<String>>(&mut self, name: S) {
        self.name = name.into();
    }

    /// Set a cell value at 1-based row/column indices
    pub fn set_value_at(&mut self, row: u32, col: u16, value: CellValue) -> Result<()> {
        if row == 0 || row > MAX_ROWS {
            return Err(Error::RowOutOfBounds(row, MAX_ROWS));
        }
        if col == 0 || col > MAX_COLS {
            return Err(Error::ColumnOutOfBounds(col, MAX_COLS));
        }

        self.rows.entry(row).or_default().insert(col, value);
        Ok(())
    }

    /// Get a cell value at 1-based row/column indices
    pub fn value_at(&self, row: u32, col: u16) -> Option<&CellValue> {
        self.rows.get(&row).and_then(|r| r.get(&col))
    }

    /// Get a cell value by A1-style address string
    pub fn value(&self, address: &str) -> Result<Option<&CellValue>> {
        let addr = CellAddress::parse(address)?;
        Ok(self.value_at(addr.row, addr.col))
    }

    /// Get the number of non-empty cells
    pub fn cell_count(&self) -> usize {
        self.rows.values().map(|r| r.len()).sum()
    }

    /// Check whether the sheet has no cells
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get the bounding rectangle of all set cells, if any
    pub fn used_range(&self) -> Option<CellRange> {
        let min_row = *self.rows.keys().next()?;
        let max_row = *self.rows.keys().next_back()?;

        let mut min_col = u16::MAX;
        let mut max_col = 0;
        for row in self.rows.values() {
            if let (Some(first), Some(last)) = (row.keys().next(), row.keys().next_back()) {
                min_col = min_col.min(*first);
                max_col = max_col.max(*last);
            }
        }

        Some(CellRange::new(
            CellAddress::new(min_row, min_col),
            CellAddress::new(max_row, max_col),
        ))
    }

    /// Iterate over all set cells in row-major order
    pub fn iter_cells(&self) -> impl Iterator<Item = (CellAddress, &CellValue)> {
        self.rows.iter().flat_map(|(&row, cols)| {
            cols.iter()
                .map(move |(&col, value)| (CellAddress::new(row, col), value))
        })
    }
}

impl SheetWrite for Worksheet {
    fn set_cell(&mut self, row: u32, col: u16, value: CellValue) -> Result<()> {
        self.set_value_at(row, col, value)
    }
}
