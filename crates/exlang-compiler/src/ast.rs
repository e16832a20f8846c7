//! The parsed markup tree
//!
//! Attributes are kept as raw strings so the validator can report missing
//! and unparsable values; the compiler converts them only after validation
//! has passed.

use std::fmt;
use std::str::FromStr;

/// A parsed exlang document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Tag name of the root element (the validator requires `workbook`)
    pub root_tag: String,
    /// Sheets in document order
    pub sheets: Vec<Sheet>,
}

/// A sheet node
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sheet {
    /// Explicit name, if the `name` attribute was given
    pub name: Option<String>,
    /// Directives in document order
    pub directives: Vec<Directive>,
}

impl Sheet {
    /// Row directives in document order
    pub fn rows(&self) -> impl Iterator<Item = &RowDirective> {
        self.directives.iter().filter_map(|d| match d {
            Directive::Row(row) => Some(row),
            _ => None,
        })
    }

    /// Range directives in document order
    pub fn ranges(&self) -> impl Iterator<Item = &RangeDirective> {
        self.directives.iter().filter_map(|d| match d {
            Directive::Range(range) => Some(range),
            _ => None,
        })
    }

    /// Repeat directives in document order
    pub fn repeats(&self) -> impl Iterator<Item = &RepeatDirective> {
        self.directives.iter().filter_map(|d| match d {
            Directive::Repeat(repeat) => Some(repeat),
            _ => None,
        })
    }

    /// Cell directives in document order
    pub fn cells(&self) -> impl Iterator<Item = &CellDirective> {
        self.directives.iter().filter_map(|d| match d {
            Directive::Cell(cell) => Some(cell),
            _ => None,
        })
    }
}

/// One placement construct inside a sheet
///
/// The set is closed and exhaustively handled at validation and compile
/// time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    Row(RowDirective),
    Range(RangeDirective),
    Repeat(RepeatDirective),
    Cell(CellDirective),
}

/// `<row r=".." c="..">` with ordered `<v>` leaves
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RowDirective {
    /// Required `r` attribute (1-based row number)
    pub row: Option<String>,
    /// Optional `c` attribute (starting column letters, default `A`)
    pub start_col: Option<String>,
    /// Leaf literals in document order
    pub leaves: Vec<String>,
}

/// `<range from=".." to=".." fill=".." t="..">`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RangeDirective {
    /// Required `from` corner address
    pub from: Option<String>,
    /// Required `to` corner address
    pub to: Option<String>,
    /// Required fill literal
    pub fill: Option<String>,
    /// Optional type hint
    pub type_hint: Option<String>,
}

/// `<repeat times=".." r=".." c=".." direction="..">` with `<v>` templates
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RepeatDirective {
    /// Required `times` attribute (iteration count, >= 1)
    pub times: Option<String>,
    /// Optional `r` attribute (anchor row, default 1)
    pub row: Option<String>,
    /// Optional `c` attribute (anchor column letters, default `A`)
    pub start_col: Option<String>,
    /// Optional `direction` attribute (`down` or `right`, default `down`)
    pub direction: Option<String>,
    /// Leaf templates in document order
    pub leaves: Vec<String>,
    /// Tag names of disallowed (non-leaf) children seen by the parser
    pub rejected_children: Vec<String>,
}

/// `<cell addr=".." v=".." t="..">`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CellDirective {
    /// Required address
    pub addr: Option<String>,
    /// Required literal value
    pub value: Option<String>,
    /// Optional type hint
    pub type_hint: Option<String>,
}

/// Movement direction of a repeat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Iterations advance down rows; leaves go across columns
    #[default]
    Down,
    /// Iterations advance across columns; leaves go down rows
    Right,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Down => write!(f, "down"),
            Direction::Right => write!(f, "right"),
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, String> {
        match s {
            "down" => Ok(Direction::Down),
            "right" => Ok(Direction::Right),
            _ => Err(format!("invalid direction '{}'", s)),
        }
    }
}
