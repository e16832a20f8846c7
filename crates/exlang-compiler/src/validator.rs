//! Structural validation of the markup tree
//!
//! The validator never raises: it walks the whole tree once and returns
//! every finding, so a caller gets the full diagnostic set at once. The
//! compiler refuses to write while the list is non-empty.

use std::str::FromStr;

use ahash::AHashSet;

use crate::ast::{Direction, Document, Sheet};
use exlang_core::TypeHint;

/// Resolve final sheet names: explicit names as given, `Sheet<k>` for
/// unnamed sheets where `k` counts only the unnamed ones in document order.
///
/// Both the validator (collision detection) and the compiler (sheet
/// creation) use this so the naming rule lives in one place.
pub fn resolve_sheet_names(doc: &Document) -> Vec<String> {
    let mut auto_counter = 0;
    doc.sheets
        .iter()
        .map(|sheet| match &sheet.name {
            Some(name) => name.clone(),
            None => {
                auto_counter += 1;
                format!("Sheet{}", auto_counter)
            }
        })
        .collect()
}

/// Validate an exlang document, accumulating every structural error
pub fn validate(doc: &Document) -> Vec<String> {
    let mut errors = Vec::new();

    // A malformed root cannot be safely walked
    if doc.root_tag != "workbook" {
        errors.push(format!(
            "Root element must be <workbook> but found <{}>",
            doc.root_tag
        ));
        return errors;
    }

    check_sheet_name_collisions(doc, &mut errors);

    for sheet in &doc.sheets {
        check_sheet(sheet, &mut errors);
    }

    errors
}

/// Report one error per auto-generated name that an explicit name shadows,
/// plus any remaining duplicate among the resolved names
fn check_sheet_name_collisions(doc: &Document, errors: &mut Vec<String>) {
    let explicit: AHashSet<&str> = doc
        .sheets
        .iter()
        .filter_map(|s| s.name.as_deref())
        .collect();
    let unnamed_count = doc.sheets.iter().filter(|s| s.name.is_none()).count();

    let mut reported_auto: AHashSet<String> = AHashSet::new();
    for k in 1..=unnamed_count {
        let auto_name = format!("Sheet{}", k);
        if explicit.contains(auto_name.as_str()) {
            errors.push(format!(
                "Auto-generated sheet name '{}' conflicts with an explicitly named sheet. \
                 Either name all sheets or ensure explicit names don't use 'Sheet1', 'Sheet2', etc.",
                auto_name
            ));
            reported_auto.insert(auto_name);
        }
    }

    // Explicit repeats and case-variant clashes would otherwise only
    // surface from the sink mid-compile. The comparison is
    // case-insensitive to match what sheet creation enforces.
    let mut seen: AHashSet<String> = AHashSet::new();
    for name in resolve_sheet_names(doc) {
        if !seen.insert(name.to_lowercase()) && !reported_auto.contains(name.as_str()) {
            errors.push(format!("Duplicate sheet name '{}'", name));
        }
    }
}

fn check_sheet(sheet: &Sheet, errors: &mut Vec<String>) {
    for row in sheet.rows() {
        if row.row.is_none() {
            errors.push("<row> missing required attribute 'r'".into());
        }
    }

    for cell in sheet.cells() {
        if cell.addr.is_none() {
            errors.push("<cell> missing required attribute 'addr'".into());
        }
        if cell.value.is_none() {
            errors.push("<cell> missing required attribute 'v'".into());
        }
        if let Some(t) = &cell.type_hint {
            if TypeHint::from_str(t).is_err() {
                errors.push(format!(
                    "<cell> at {} has invalid type hint t='{}'",
                    cell.addr.as_deref().unwrap_or("?"),
                    t
                ));
            }
        }
    }

    for range in sheet.ranges() {
        if range.from.is_none() {
            errors.push("<range> missing required attribute 'from'".into());
        }
        if range.to.is_none() {
            errors.push("<range> missing required attribute 'to'".into());
        }
        if range.fill.is_none() {
            errors.push("<range> missing required attribute 'fill'".into());
        }
        if let Some(t) = &range.type_hint {
            if TypeHint::from_str(t).is_err() {
                errors.push(format!(
                    "<range> from {} to {} has invalid type hint t='{}'",
                    range.from.as_deref().unwrap_or("?"),
                    range.to.as_deref().unwrap_or("?"),
                    t
                ));
            }
        }
    }

    for repeat in sheet.repeats() {
        match &repeat.times {
            None => errors.push("<repeat> missing required attribute 'times'".into()),
            Some(raw) => match raw.trim().parse::<i64>() {
                Err(_) => errors.push(format!(
                    "<repeat> attribute 'times' must be an integer (found '{}')",
                    raw
                )),
                Ok(n) if n < 1 => errors.push(format!(
                    "<repeat> attribute 'times' must be >= 1 (found {})",
                    n
                )),
                // The compile phase reads 'times' as a u32, so anything
                // larger must be caught here to keep failures atomic.
                Ok(n) if n > i64::from(u32::MAX) => errors.push(format!(
                    "<repeat> attribute 'times' is too large (found {})",
                    n
                )),
                Ok(_) => {}
            },
        }

        if let Some(dir) = &repeat.direction {
            if Direction::from_str(dir).is_err() {
                errors.push(format!(
                    "<repeat> has invalid direction '{}' (expected 'down' or 'right')",
                    dir
                ));
            }
        }

        for child in &repeat.rejected_children {
            if child == "repeat" {
                errors.push("Nested <repeat> is not allowed".into());
            } else {
                errors.push(format!(
                    "<repeat> can only contain <v> leaves (found <{}>)",
                    child
                ));
            }
        }
    }
}
