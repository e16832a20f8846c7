//! Placeholder substitution for repeat leaves
//!
//! `{{i}}` is replaced with the 1-based iteration number and `{{i0}}` with
//! the 0-based one. Substitution is purely textual: no recursion, no
//! arithmetic, everything else passes through untouched.

/// 1-based iteration placeholder
const PLACEHOLDER_ONE_BASED: &str = "{{i}}";

/// 0-based iteration placeholder
const PLACEHOLDER_ZERO_BASED: &str = "{{i0}}";

/// Substitute iteration placeholders in a repeat leaf's text
///
/// `iteration` is 1-based.
///
/// # Examples
/// ```
/// use exlang_compiler::expand;
///
/// assert_eq!(expand("Row {{i}}", 3), "Row 3");
/// assert_eq!(expand("Index {{i0}}", 3), "Index 2");
/// ```
pub fn expand(raw: &str, iteration: u32) -> String {
    raw.replace(PLACEHOLDER_ZERO_BASED, &iteration.saturating_sub(1).to_string())
        .replace(PLACEHOLDER_ONE_BASED, &iteration.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_based() {
        assert_eq!(expand("Row {{i}}", 1), "Row 1");
        assert_eq!(expand("Row {{i}}", 3), "Row 3");
    }

    #[test]
    fn test_zero_based() {
        assert_eq!(expand("Index {{i0}}", 1), "Index 0");
        assert_eq!(expand("Index {{i0}}", 3), "Index 2");
    }

    #[test]
    fn test_both_and_multiple_occurrences() {
        assert_eq!(expand("{{i}}/{{i0}}/{{i}}", 5), "5/4/5");
    }

    #[test]
    fn test_no_placeholders() {
        assert_eq!(expand("plain text", 7), "plain text");
        assert_eq!(expand("", 7), "");
    }

    #[test]
    fn test_unknown_tokens_untouched() {
        assert_eq!(expand("{{j}} {i} {{i }}", 2), "{{j}} {i} {{i }}");
    }
}
