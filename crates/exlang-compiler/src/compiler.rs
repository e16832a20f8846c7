//! Compilation orchestration
//!
//! Validates the document, then walks each sheet's directives in the fixed
//! category order Row, Range, Repeat, Cell (document order within a
//! category) and issues cell writes. The order is a design choice, not an
//! accident of traversal: later categories overwrite earlier ones, giving
//! the precedence Row < Range < Repeat < Cell.
//!
//! Failure is atomic: validation errors are raised as one batch before any
//! sink write, and a write-phase error aborts the rest of the compilation.

use std::str::FromStr;

use log::debug;

use crate::ast::{
    CellDirective, Direction, Document, RangeDirective, RepeatDirective, RowDirective,
};
use crate::error::{CompileError, CompileResult};
use crate::parser::parse_document;
use crate::template::expand;
use crate::validator::{resolve_sheet_names, validate};
use exlang_core::{
    CellAddress, CellRange, CellValue, Error as CoreError, SheetSink, SheetWrite, TypeHint,
    MAX_COLS, MAX_ROWS,
};

/// Compile exlang markup text into a sheet sink
///
/// Fails with [`CompileError::Parse`]/[`CompileError::Xml`] on malformed
/// markup and [`CompileError::Validation`] (carrying the full batch of
/// findings) before any sink mutation when the tree violates the
/// structural contract.
pub fn compile<S: SheetSink>(markup: &str, sink: &mut S) -> CompileResult<()> {
    let doc = parse_document(markup)?;
    compile_document(&doc, sink)
}

/// Compile an already-parsed document into a sheet sink
pub fn compile_document<S: SheetSink>(doc: &Document, sink: &mut S) -> CompileResult<()> {
    let errors = validate(doc);
    if !errors.is_empty() {
        return Err(CompileError::Validation(errors));
    }

    let names = resolve_sheet_names(doc);
    for (sheet, name) in doc.sheets.iter().zip(&names) {
        debug!("compiling sheet '{}'", name);
        let ws = sink.create_sheet(name)?;

        for row in sheet.rows() {
            compile_row(row, ws)?;
        }
        for range in sheet.ranges() {
            compile_range(range, ws)?;
        }
        for repeat in sheet.repeats() {
            compile_repeat(repeat, ws)?;
        }
        for cell in sheet.cells() {
            compile_cell(cell, ws)?;
        }
    }

    Ok(())
}

fn compile_row<W: SheetWrite>(row: &RowDirective, ws: &mut W) -> CompileResult<()> {
    let r = parse_row_number(required(&row.row, "r")?)?;
    let start_col = CellAddress::letters_to_column(row.start_col.as_deref().unwrap_or("A"))?;

    for (offset, leaf) in row.leaves.iter().enumerate() {
        let value = CellValue::infer(leaf, None)?;
        ws.set_cell(r, offset_col(start_col, offset)?, value)?;
    }

    Ok(())
}

fn compile_range<W: SheetWrite>(range: &RangeDirective, ws: &mut W) -> CompileResult<()> {
    let rect = CellRange::from_corners(required(&range.from, "from")?, required(&range.to, "to")?)?;
    let hint = parse_hint(&range.type_hint)?;
    let value = CellValue::infer(required(&range.fill, "fill")?, hint)?;

    debug!("filling {} ({} cells)", rect, rect.cell_count());
    for addr in rect.cells() {
        ws.set_cell(addr.row, addr.col, value.clone())?;
    }

    Ok(())
}

fn compile_repeat<W: SheetWrite>(repeat: &RepeatDirective, ws: &mut W) -> CompileResult<()> {
    let times = parse_times(required(&repeat.times, "times")?)?;
    let direction = match &repeat.direction {
        Some(raw) => Direction::from_str(raw).map_err(CompileError::Parse)?,
        None => Direction::default(),
    };
    let anchor_row = parse_row_number(repeat.row.as_deref().unwrap_or("1"))?;
    let anchor_col = CellAddress::letters_to_column(repeat.start_col.as_deref().unwrap_or("A"))?;

    for i in 1..=times {
        for (offset, leaf) in repeat.leaves.iter().enumerate() {
            let expanded = expand(leaf, i);
            let value = CellValue::infer(&expanded, None)?;

            // Leaves advance along the axis perpendicular to the movement
            // direction; iterations advance along the movement direction.
            let (row, col) = match direction {
                Direction::Down => (offset_row(anchor_row, i - 1)?, offset_col(anchor_col, offset)?),
                Direction::Right => {
                    (offset_row(anchor_row, offset as u32)?, offset_col(anchor_col, (i - 1) as usize)?)
                }
            };

            ws.set_cell(row, col, value)?;
        }
    }

    Ok(())
}

fn compile_cell<W: SheetWrite>(cell: &CellDirective, ws: &mut W) -> CompileResult<()> {
    let addr = CellAddress::parse(required(&cell.addr, "addr")?)?;
    let hint = parse_hint(&cell.type_hint)?;
    let value = CellValue::infer(required(&cell.value, "v")?, hint)?;

    ws.set_cell(addr.row, addr.col, value)?;
    Ok(())
}

/// Fetch an attribute the validator guarantees is present
///
/// The error arm is defensive: it is reachable only when compile_document
/// is bypassed with an unvalidated tree.
fn required<'a>(attr: &'a Option<String>, name: &str) -> CompileResult<&'a str> {
    attr.as_deref()
        .ok_or_else(|| CompileError::Parse(format!("missing required attribute '{}'", name)))
}

fn parse_hint(raw: &Option<String>) -> CompileResult<Option<TypeHint>> {
    Ok(raw.as_deref().map(TypeHint::from_str).transpose()?)
}

fn parse_row_number(raw: &str) -> CompileResult<u32> {
    let row: u32 = raw
        .trim()
        .parse()
        .map_err(|_| CompileError::Parse(format!("invalid row number '{}'", raw)))?;
    if row == 0 || row > MAX_ROWS {
        return Err(CoreError::RowOutOfBounds(row, MAX_ROWS).into());
    }
    Ok(row)
}

fn parse_times(raw: &str) -> CompileResult<u32> {
    raw.trim()
        .parse()
        .map_err(|_| CompileError::Parse(format!("invalid iteration count '{}'", raw)))
}

fn offset_row(row: u32, offset: u32) -> CompileResult<u32> {
    match row.checked_add(offset) {
        Some(r) if r <= MAX_ROWS => Ok(r),
        _ => Err(CoreError::RowOutOfBounds(MAX_ROWS, MAX_ROWS).into()),
    }
}

fn offset_col(col: u16, offset: usize) -> CompileResult<u16> {
    u16::try_from(offset)
        .ok()
        .and_then(|o| col.checked_add(o))
        .filter(|&c| c <= MAX_COLS)
        .ok_or_else(|| CoreError::ColumnOutOfBounds(MAX_COLS, MAX_COLS).into())
}
