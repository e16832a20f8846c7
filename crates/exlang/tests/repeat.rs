//! Repeat directive: iteration geometry, placeholder substitution, and
//! validation of its structural contract.

use exlang::prelude::*;

fn value_at<'a>(wb: &'a Workbook, sheet: &str, addr: &str) -> &'a CellValue {
    wb.worksheet_by_name(sheet)
        .unwrap()
        .value(addr)
        .unwrap()
        .unwrap()
}

#[test]
fn test_basic_down() {
    let wb = exlang::compile_to_workbook(
        r#"<workbook>
             <sheet name="Test">
               <repeat times="3" r="1" c="A">
                 <v>Row {{i}}</v>
               </repeat>
             </sheet>
           </workbook>"#,
    )
    .unwrap();

    assert_eq!(value_at(&wb, "Test", "A1").as_str(), Some("Row 1"));
    assert_eq!(value_at(&wb, "Test", "A2").as_str(), Some("Row 2"));
    assert_eq!(value_at(&wb, "Test", "A3").as_str(), Some("Row 3"));
}

#[test]
fn test_basic_right() {
    let wb = exlang::compile_to_workbook(
        r#"<workbook>
             <sheet name="Test">
               <repeat times="3" r="1" c="A" direction="right">
                 <v>Col {{i}}</v>
               </repeat>
             </sheet>
           </workbook>"#,
    )
    .unwrap();

    assert_eq!(value_at(&wb, "Test", "A1").as_str(), Some("Col 1"));
    assert_eq!(value_at(&wb, "Test", "B1").as_str(), Some("Col 2"));
    assert_eq!(value_at(&wb, "Test", "C1").as_str(), Some("Col 3"));
}

#[test]
fn test_multiple_leaves_per_iteration() {
    let wb = exlang::compile_to_workbook(
        r#"<workbook>
             <sheet name="Test">
               <repeat times="4" r="2" c="B">
                 <v>Month {{i}}</v>
                 <v>0</v>
               </repeat>
             </sheet>
           </workbook>"#,
    )
    .unwrap();

    for i in 1..=4u32 {
        let row = i + 1;
        assert_eq!(
            value_at(&wb, "Test", &format!("B{}", row)).as_str(),
            Some(format!("Month {}", i).as_str())
        );
        assert_eq!(value_at(&wb, "Test", &format!("C{}", row)).as_int(), Some(0));
    }
}

#[test]
fn test_zero_based_placeholder() {
    let wb = exlang::compile_to_workbook(
        r#"<workbook>
             <sheet name="Test">
               <repeat times="3" r="1" c="A">
                 <v>Index {{i0}}</v>
               </repeat>
             </sheet>
           </workbook>"#,
    )
    .unwrap();

    assert_eq!(value_at(&wb, "Test", "A1").as_str(), Some("Index 0"));
    assert_eq!(value_at(&wb, "Test", "A2").as_str(), Some("Index 1"));
    assert_eq!(value_at(&wb, "Test", "A3").as_str(), Some("Index 2"));
}

#[test]
fn test_both_placeholder_kinds() {
    let wb = exlang::compile_to_workbook(
        r#"<workbook>
             <sheet name="Test">
               <repeat times="2" r="1" c="A">
                 <v>Row {{i}}</v>
                 <v>Index {{i0}}</v>
               </repeat>
             </sheet>
           </workbook>"#,
    )
    .unwrap();

    assert_eq!(value_at(&wb, "Test", "A1").as_str(), Some("Row 1"));
    assert_eq!(value_at(&wb, "Test", "B1").as_str(), Some("Index 0"));
    assert_eq!(value_at(&wb, "Test", "A2").as_str(), Some("Row 2"));
    assert_eq!(value_at(&wb, "Test", "B2").as_str(), Some("Index 1"));
}

#[test]
fn test_expanded_numeric_leaf_is_sniffed() {
    // "{{i0}}" expands to "0", "1", ... which sniff as integers
    let wb = exlang::compile_to_workbook(
        r#"<workbook>
             <sheet name="Test">
               <repeat times="2" r="1" c="A">
                 <v>{{i0}}</v>
               </repeat>
             </sheet>
           </workbook>"#,
    )
    .unwrap();

    assert_eq!(value_at(&wb, "Test", "A1").as_int(), Some(0));
    assert_eq!(value_at(&wb, "Test", "A2").as_int(), Some(1));
}

#[test]
fn test_right_direction_with_multiple_leaves() {
    let wb = exlang::compile_to_workbook(
        r#"<workbook>
             <sheet name="Test">
               <repeat times="3" r="1" c="A" direction="right">
                 <v>Q{{i}}</v>
                 <v>0</v>
               </repeat>
             </sheet>
           </workbook>"#,
    )
    .unwrap();

    // Iterations advance across columns, leaves go down rows
    assert_eq!(value_at(&wb, "Test", "A1").as_str(), Some("Q1"));
    assert_eq!(value_at(&wb, "Test", "A2").as_int(), Some(0));
    assert_eq!(value_at(&wb, "Test", "B1").as_str(), Some("Q2"));
    assert_eq!(value_at(&wb, "Test", "B2").as_int(), Some(0));
    assert_eq!(value_at(&wb, "Test", "C1").as_str(), Some("Q3"));
    assert_eq!(value_at(&wb, "Test", "C2").as_int(), Some(0));
}

#[test]
fn test_default_anchor_and_direction() {
    let wb = exlang::compile_to_workbook(
        r#"<workbook>
             <sheet name="Test">
               <repeat times="2">
                 <v>Default {{i}}</v>
               </repeat>
             </sheet>
           </workbook>"#,
    )
    .unwrap();

    assert_eq!(value_at(&wb, "Test", "A1").as_str(), Some("Default 1"));
    assert_eq!(value_at(&wb, "Test", "A2").as_str(), Some("Default 2"));
}

#[test]
fn test_repeat_with_row_header() {
    let wb = exlang::compile_to_workbook(
        r#"<workbook>
             <sheet name="Test">
               <row r="1"><v>Header</v><v>Value</v></row>
               <repeat times="3" r="2" c="A">
                 <v>Row {{i}}</v>
                 <v>{{i0}}</v>
               </repeat>
             </sheet>
           </workbook>"#,
    )
    .unwrap();

    assert_eq!(value_at(&wb, "Test", "A1").as_str(), Some("Header"));
    assert_eq!(value_at(&wb, "Test", "B1").as_str(), Some("Value"));
    assert_eq!(value_at(&wb, "Test", "A2").as_str(), Some("Row 1"));
    assert_eq!(value_at(&wb, "Test", "B2").as_int(), Some(0));
    assert_eq!(value_at(&wb, "Test", "A3").as_str(), Some("Row 2"));
    assert_eq!(value_at(&wb, "Test", "B3").as_int(), Some(1));
}

#[test]
fn test_cell_overrides_repeat() {
    let wb = exlang::compile_to_workbook(
        r#"<workbook>
             <sheet name="Test">
               <repeat times="5" r="1" c="A">
                 <v>Original {{i}}</v>
               </repeat>
               <cell addr="A3" v="Overridden"/>
             </sheet>
           </workbook>"#,
    )
    .unwrap();

    assert_eq!(value_at(&wb, "Test", "A1").as_str(), Some("Original 1"));
    assert_eq!(value_at(&wb, "Test", "A2").as_str(), Some("Original 2"));
    assert_eq!(value_at(&wb, "Test", "A3").as_str(), Some("Overridden"));
    assert_eq!(value_at(&wb, "Test", "A4").as_str(), Some("Original 4"));
    assert_eq!(value_at(&wb, "Test", "A5").as_str(), Some("Original 5"));
}

#[test]
fn test_repeat_overwrites_range_fill() {
    let wb = exlang::compile_to_workbook(
        r#"<workbook>
             <sheet name="Test">
               <range from="A1" to="A10" fill="Default"/>
               <repeat times="3" r="2" c="A">
                 <v>Repeat {{i}}</v>
               </repeat>
             </sheet>
           </workbook>"#,
    )
    .unwrap();

    assert_eq!(value_at(&wb, "Test", "A1").as_str(), Some("Default"));
    assert_eq!(value_at(&wb, "Test", "A2").as_str(), Some("Repeat 1"));
    assert_eq!(value_at(&wb, "Test", "A3").as_str(), Some("Repeat 2"));
    assert_eq!(value_at(&wb, "Test", "A4").as_str(), Some("Repeat 3"));
    assert_eq!(value_at(&wb, "Test", "A5").as_str(), Some("Default"));
}

#[test]
fn test_multiple_repeats_in_one_sheet() {
    let wb = exlang::compile_to_workbook(
        r#"<workbook>
             <sheet name="Test">
               <repeat times="2" r="1" c="A"><v>First {{i}}</v></repeat>
               <repeat times="2" r="1" c="C"><v>Second {{i}}</v></repeat>
             </sheet>
           </workbook>"#,
    )
    .unwrap();

    assert_eq!(value_at(&wb, "Test", "A1").as_str(), Some("First 1"));
    assert_eq!(value_at(&wb, "Test", "A2").as_str(), Some("First 2"));
    assert_eq!(value_at(&wb, "Test", "C1").as_str(), Some("Second 1"));
    assert_eq!(value_at(&wb, "Test", "C2").as_str(), Some("Second 2"));
}

#[test]
fn test_large_iteration_count() {
    let wb = exlang::compile_to_workbook(
        r#"<workbook>
             <sheet name="Test">
               <repeat times="50" r="1" c="A"><v>Row {{i}}</v></repeat>
             </sheet>
           </workbook>"#,
    )
    .unwrap();

    assert_eq!(value_at(&wb, "Test", "A1").as_str(), Some("Row 1"));
    assert_eq!(value_at(&wb, "Test", "A25").as_str(), Some("Row 25"));
    assert_eq!(value_at(&wb, "Test", "A50").as_str(), Some("Row 50"));
    assert_eq!(wb.worksheet_by_name("Test").unwrap().cell_count(), 50);
}

#[test]
fn test_nested_repeat_rejected_before_any_write() {
    let err = exlang::compile_to_workbook(
        r#"<workbook>
             <sheet name="Test">
               <repeat times="2">
                 <v>Outer {{i}}</v>
                 <repeat times="2"><v>Inner</v></repeat>
               </repeat>
             </sheet>
           </workbook>"#,
    )
    .unwrap_err();

    let errors = err.validation_errors().unwrap();
    assert!(errors.iter().any(|e| e.contains("Nested <repeat>")));
}

#[test]
fn test_repeat_validation_errors() {
    let check = |markup: &str| -> Vec<String> {
        validate(&exlang::parse_document(markup).unwrap())
    };

    let errors =
        check(r#"<workbook><sheet><repeat r="1" c="A"><v>x</v></repeat></sheet></workbook>"#);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("missing required attribute 'times'"));

    let errors = check(r#"<workbook><sheet><repeat times="abc"><v>x</v></repeat></sheet></workbook>"#);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("must be an integer"));

    let errors = check(r#"<workbook><sheet><repeat times="0"><v>x</v></repeat></sheet></workbook>"#);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("must be >= 1"));

    let errors = check(
        r#"<workbook><sheet><repeat times="3" direction="up"><v>x</v></repeat></sheet></workbook>"#,
    );
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("invalid direction 'up'"));
}
