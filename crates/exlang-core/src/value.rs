//! Cell value types and literal inference

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{Error, Result};

/// Represents the value stored in a cell
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellValue {
    /// Empty cell (no value)
    Empty,

    /// Boolean value (TRUE/FALSE)
    Bool(bool),

    /// Integer value
    Int(i64),

    /// Floating-point value
    Float(f64),

    /// Date or datetime value
    DateTime(NaiveDateTime),

    /// String value (includes pass-through formula text)
    String(String),
}

impl CellValue {
    /// Infer a typed value from a literal string and an optional type hint.
    ///
    /// A present hint forces interpretation and fails with
    /// [`Error::TypeMismatch`] when the literal cannot be coerced. Without a
    /// hint, sniffing tries integer, then float, then falls back to string.
    /// Booleans and dates are never auto-sniffed, so labels like "True" or
    /// "2024-01-01" stay strings unless explicitly hinted.
    ///
    /// # Examples
    /// ```
    /// use exlang_core::{CellValue, TypeHint};
    ///
    /// assert_eq!(CellValue::infer("42", None).unwrap(), CellValue::Int(42));
    /// assert_eq!(
    ///     CellValue::infer("42", Some(TypeHint::String)).unwrap(),
    ///     CellValue::String("42".into())
    /// );
    /// assert!(CellValue::infer("abc", Some(TypeHint::Number)).is_err());
    /// ```
    pub fn infer(raw: &str, hint: Option<TypeHint>) -> Result<CellValue> {
        if raw.is_empty() {
            // Empty input stays an empty string, except where a hint demands
            // a value that cannot be empty.
            return match hint {
                None | Some(TypeHint::String) => Ok(CellValue::String(String::new())),
                Some(hint) => Err(Error::TypeMismatch {
                    raw: raw.into(),
                    hint,
                }),
            };
        }

        match hint {
            Some(TypeHint::String) => Ok(CellValue::String(raw.into())),
            Some(TypeHint::Number) => {
                if let Ok(i) = raw.parse::<i64>() {
                    Ok(CellValue::Int(i))
                } else if let Ok(f) = raw.parse::<f64>() {
                    Ok(CellValue::Float(f))
                } else {
                    Err(Error::TypeMismatch {
                        raw: raw.into(),
                        hint: TypeHint::Number,
                    })
                }
            }
            Some(TypeHint::Bool) => match raw.to_ascii_lowercase().as_str() {
                "true" | "1" => Ok(CellValue::Bool(true)),
                "false" | "0" => Ok(CellValue::Bool(false)),
                _ => Err(Error::TypeMismatch {
                    raw: raw.into(),
                    hint: TypeHint::Bool,
                }),
            },
            Some(TypeHint::Date) => {
                if let Ok(dt) = NaiveDateTime::from_str(raw) {
                    Ok(CellValue::DateTime(dt))
                } else if let Ok(d) = NaiveDate::from_str(raw) {
                    Ok(CellValue::DateTime(NaiveDateTime::new(d, NaiveTime::MIN)))
                } else {
                    Err(Error::TypeMismatch {
                        raw: raw.into(),
                        hint: TypeHint::Date,
                    })
                }
            }
            None => {
                if let Ok(i) = raw.parse::<i64>() {
                    Ok(CellValue::Int(i))
                } else if let Ok(f) = raw.parse::<f64>() {
                    Ok(CellValue::Float(f))
                } else {
                    Ok(CellValue::String(raw.into()))
                }
            }
        }
    }

    /// Check if the cell is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Try to get the value as an integer
    pub fn as_int(&self) -> Option<i64> {
        match self {
            CellValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get the value as a float (integers widen)
    pub fn as_float(&self) -> Option<f64> {
        match self {
            CellValue::Float(f) => Some(*f),
            CellValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Try to get the value as a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get the value as a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Try to get the value as a datetime
    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            CellValue::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }

    /// Get the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Empty => "empty",
            CellValue::Bool(_) => "bool",
            CellValue::Int(_) => "int",
            CellValue::Float(_) => "float",
            CellValue::DateTime(_) => "datetime",
            CellValue::String(_) => "string",
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Empty
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => write!(f, ""),
            CellValue::Bool(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            CellValue::Int(i) => write!(f, "{}", i),
            CellValue::Float(n) => write!(f, "{}", n),
            CellValue::DateTime(dt) => write!(f, "{}", dt),
            CellValue::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.into())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Int(i)
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        CellValue::Float(f)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

/// An explicit type hint forcing literal-to-value coercion
///
/// The allowed set is a closed enumeration; new literal kinds extend the
/// enum rather than silently coercing to string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TypeHint {
    /// Integer or floating-point number
    Number,
    /// Plain text, no coercion
    String,
    /// ISO-8601 date or datetime
    Date,
    /// Case-insensitive true/false/1/0
    Bool,
}

impl TypeHint {
    /// All hint names accepted by the markup's `t` attribute
    pub const ALLOWED: [&'static str; 4] = ["number", "string", "date", "bool"];

    /// Get the markup name of the hint
    pub fn name(&self) -> &'static str {
        match self {
            TypeHint::Number => "number",
            TypeHint::String => "string",
            TypeHint::Date => "date",
            TypeHint::Bool => "bool",
        }
    }
}

impl fmt::Display for TypeHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for TypeHint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "number" => Ok(TypeHint::Number),
            "string" => Ok(TypeHint::String),
            "date" => Ok(TypeHint::Date),
            "bool" => Ok(TypeHint::Bool),
            _ => Err(Error::InvalidTypeHint(s.into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sniff_integer() {
        assert_eq!(CellValue::infer("42", None).unwrap(), CellValue::Int(42));
        assert_eq!(CellValue::infer("-7", None).unwrap(), CellValue::Int(-7));
        assert_eq!(CellValue::infer("0", None).unwrap(), CellValue::Int(0));
    }

    #[test]
    fn test_sniff_float() {
        assert_eq!(
            CellValue::infer("3.14", None).unwrap(),
            CellValue::Float(3.14)
        );
        assert_eq!(
            CellValue::infer("1e3", None).unwrap(),
            CellValue::Float(1000.0)
        );
    }

    #[test]
    fn test_sniff_string_fallback() {
        assert_eq!(
            CellValue::infer("hello", None).unwrap(),
            CellValue::String("hello".into())
        );
        // Booleans and dates are never auto-sniffed
        assert_eq!(
            CellValue::infer("True", None).unwrap(),
            CellValue::String("True".into())
        );
        assert_eq!(
            CellValue::infer("2024-01-01", None).unwrap(),
            CellValue::String("2024-01-01".into())
        );
        // Formulas pass through as strings
        assert_eq!(
            CellValue::infer("=SUM(A1:A10)", None).unwrap(),
            CellValue::String("=SUM(A1:A10)".into())
        );
    }

    #[test]
    fn test_hint_string_keeps_raw() {
        assert_eq!(
            CellValue::infer("42", Some(TypeHint::String)).unwrap(),
            CellValue::String("42".into())
        );
    }

    #[test]
    fn test_hint_number() {
        assert_eq!(
            CellValue::infer("42", Some(TypeHint::Number)).unwrap(),
            CellValue::Int(42)
        );
        assert_eq!(
            CellValue::infer("2.5", Some(TypeHint::Number)).unwrap(),
            CellValue::Float(2.5)
        );
        assert!(matches!(
            CellValue::infer("abc", Some(TypeHint::Number)),
            Err(Error::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_hint_bool() {
        assert_eq!(
            CellValue::infer("true", Some(TypeHint::Bool)).unwrap(),
            CellValue::Bool(true)
        );
        assert_eq!(
            CellValue::infer("FALSE", Some(TypeHint::Bool)).unwrap(),
            CellValue::Bool(false)
        );
        assert_eq!(
            CellValue::infer("1", Some(TypeHint::Bool)).unwrap(),
            CellValue::Bool(true)
        );
        assert_eq!(
            CellValue::infer("0", Some(TypeHint::Bool)).unwrap(),
            CellValue::Bool(false)
        );
        assert!(CellValue::infer("yes", Some(TypeHint::Bool)).is_err());
    }

    #[test]
    fn test_hint_date() {
        let d = CellValue::infer("2024-01-15", Some(TypeHint::Date)).unwrap();
        assert_eq!(
            d.as_datetime().unwrap().date(),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
        assert_eq!(d.as_datetime().unwrap().time(), NaiveTime::MIN);

        let dt = CellValue::infer("2024-01-15T10:30:00", Some(TypeHint::Date)).unwrap();
        assert_eq!(
            dt.as_datetime().unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 15)
                .unwrap()
                .and_hms_opt(10, 30, 0)
                .unwrap()
        );

        assert!(CellValue::infer("not a date", Some(TypeHint::Date)).is_err());
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(
            CellValue::infer("", None).unwrap(),
            CellValue::String(String::new())
        );
        assert_eq!(
            CellValue::infer("", Some(TypeHint::String)).unwrap(),
            CellValue::String(String::new())
        );
        assert!(CellValue::infer("", Some(TypeHint::Number)).is_err());
        assert!(CellValue::infer("", Some(TypeHint::Bool)).is_err());
        assert!(CellValue::infer("", Some(TypeHint::Date)).is_err());
    }

    #[test]
    fn test_type_hint_from_str() {
        assert_eq!("number".parse::<TypeHint>().unwrap(), TypeHint::Number);
        assert_eq!("string".parse::<TypeHint>().unwrap(), TypeHint::String);
        assert_eq!("date".parse::<TypeHint>().unwrap(), TypeHint::Date);
        assert_eq!("bool".parse::<TypeHint>().unwrap(), TypeHint::Bool);
        assert!("float".parse::<TypeHint>().is_err());
        assert!("Number".parse::<TypeHint>().is_err());
    }
}
