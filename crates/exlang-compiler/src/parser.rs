//! Markup parser
//!
//! Event-based parse of exlang markup text into the [`ast`](crate::ast)
//! tree. The parser is permissive about structure the validator owns: any
//! root tag is accepted (the validator reports non-`workbook` roots), and
//! unknown elements are skipped whole. Disallowed children of `<repeat>`
//! are recorded by tag name so the validator can report them.

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::ast::{
    CellDirective, Directive, Document, RangeDirective, RepeatDirective, RowDirective, Sheet,
};
use crate::error::{CompileError, CompileResult};

/// Parse exlang markup text into a [`Document`] tree
///
/// Fails with [`CompileError::Xml`] or [`CompileError::Parse`] when the
/// input is not well-formed markup. Structural-contract violations are left
/// for the validator.
pub fn parse_document(text: &str) -> CompileResult<Document> {
    let mut reader = Reader::from_str(text);

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let root_tag = tag_name(&e);
                let sheets = parse_sheets(&mut reader)?;
                return Ok(Document { root_tag, sheets });
            }
            Event::Empty(e) => {
                return Ok(Document {
                    root_tag: tag_name(&e),
                    sheets: Vec::new(),
                })
            }
            Event::Eof => return Err(CompileError::Parse("no root element".into())),
            // Prolog, comments, and inter-element whitespace
            _ => {}
        }
    }
}

/// Parse the children of the root element until its end tag
fn parse_sheets(reader: &mut Reader<&[u8]>) -> CompileResult<Vec<Sheet>> {
    let mut sheets = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                if e.name().as_ref() == b"sheet" {
                    let name = get_attr(&e, b"name")?;
                    let directives = parse_directives(reader)?;
                    sheets.push(Sheet { name, directives });
                } else {
                    reader.read_to_end(e.name())?;
                }
            }
            Event::Empty(e) => {
                if e.name().as_ref() == b"sheet" {
                    sheets.push(Sheet {
                        name: get_attr(&e, b"name")?,
                        directives: Vec::new(),
                    });
                }
            }
            Event::End(_) => return Ok(sheets),
            Event::Eof => return Err(CompileError::Parse("unexpected end of input".into())),
            _ => {}
        }
    }
}

/// Parse the children of a `<sheet>` element until its end tag
fn parse_directives(reader: &mut Reader<&[u8]>) -> CompileResult<Vec<Directive>> {
    let mut directives = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"row" => {
                    let mut row = row_from_attrs(&e)?;
                    row.leaves = parse_leaves(reader, &mut Vec::new())?;
                    directives.push(Directive::Row(row));
                }
                b"range" => {
                    let range = range_from_attrs(&e)?;
                    // A range has no meaningful children
                    reader.read_to_end(e.name())?;
                    directives.push(Directive::Range(range));
                }
                b"repeat" => {
                    let mut repeat = repeat_from_attrs(&e)?;
                    repeat.leaves = parse_leaves(reader, &mut repeat.rejected_children)?;
                    directives.push(Directive::Repeat(repeat));
                }
                b"cell" => {
                    let cell = cell_from_attrs(&e)?;
                    reader.read_to_end(e.name())?;
                    directives.push(Directive::Cell(cell));
                }
                _ => {
                    reader.read_to_end(e.name())?;
                }
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"row" => directives.push(Directive::Row(row_from_attrs(&e)?)),
                b"range" => directives.push(Directive::Range(range_from_attrs(&e)?)),
                b"repeat" => directives.push(Directive::Repeat(repeat_from_attrs(&e)?)),
                b"cell" => directives.push(Directive::Cell(cell_from_attrs(&e)?)),
                _ => {}
            },
            Event::End(_) => return Ok(directives),
            Event::Eof => return Err(CompileError::Parse("unexpected end of input".into())),
            _ => {}
        }
    }
}

/// Parse ordered `<v>` leaves until the enclosing end tag
///
/// Non-leaf child elements are skipped whole and their tag names recorded
/// in `rejected` for the validator.
fn parse_leaves(
    reader: &mut Reader<&[u8]>,
    rejected: &mut Vec<String>,
) -> CompileResult<Vec<String>> {
    let mut leaves = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                if e.name().as_ref() == b"v" {
                    leaves.push(parse_leaf_text(reader)?);
                } else {
                    rejected.push(tag_name(&e));
                    reader.read_to_end(e.name())?;
                }
            }
            Event::Empty(e) => {
                if e.name().as_ref() == b"v" {
                    leaves.push(String::new());
                } else {
                    rejected.push(tag_name(&e));
                }
            }
            Event::End(_) => return Ok(leaves),
            Event::Eof => return Err(CompileError::Parse("unexpected end of input".into())),
            _ => {}
        }
    }
}

/// Collect the text content of a `<v>` element until its end tag
fn parse_leaf_text(reader: &mut Reader<&[u8]>) -> CompileResult<String> {
    let mut text = String::new();

    loop {
        match reader.read_event()? {
            Event::Text(e) => text.push_str(&e.unescape()?),
            Event::CData(e) => {
                text.push_str(
                    std::str::from_utf8(&e)
                        .map_err(|_| CompileError::Parse("invalid UTF-8 in CDATA".into()))?,
                );
            }
            Event::Start(e) => {
                // Leaves hold text only; nested markup is dropped
                reader.read_to_end(e.name())?;
            }
            Event::End(_) => return Ok(text),
            Event::Eof => return Err(CompileError::Parse("unexpected end of input".into())),
            _ => {}
        }
    }
}

fn row_from_attrs(e: &BytesStart) -> CompileResult<RowDirective> {
    Ok(RowDirective {
        row: get_attr(e, b"r")?,
        start_col: get_attr(e, b"c")?,
        leaves: Vec::new(),
    })
}

fn range_from_attrs(e: &BytesStart) -> CompileResult<RangeDirective> {
    Ok(RangeDirective {
        from: get_attr(e, b"from")?,
        to: get_attr(e, b"to")?,
        fill: get_attr(e, b"fill")?,
        type_hint: get_attr(e, b"t")?,
    })
}

fn repeat_from_attrs(e: &BytesStart) -> CompileResult<RepeatDirective> {
    Ok(RepeatDirective {
        times: get_attr(e, b"times")?,
        row: get_attr(e, b"r")?,
        start_col: get_attr(e, b"c")?,
        direction: get_attr(e, b"direction")?,
        leaves: Vec::new(),
        rejected_children: Vec::new(),
    })
}

fn cell_from_attrs(e: &BytesStart) -> CompileResult<CellDirective> {
    Ok(CellDirective {
        addr: get_attr(e, b"addr")?,
        value: get_attr(e, b"v")?,
        type_hint: get_attr(e, b"t")?,
    })
}

/// Look up an attribute by name, decoding XML entities
fn get_attr(e: &BytesStart, key: &[u8]) -> CompileResult<Option<String>> {
    for attr in e.attributes() {
        let attr = attr.map_err(|err| CompileError::Parse(format!("bad attribute: {}", err)))?;
        if attr.key.as_ref() == key {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

fn tag_name(e: &BytesStart) -> String {
    String::from_utf8_lossy(e.name().as_ref()).into_owned()
}
