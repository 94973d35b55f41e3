//! Text utilities shared by header matching, searching and report file naming.

use regex::Regex;

/// Folds a string for case-insensitive comparison.
/// Uses full Unicode lowercase mapping so Cyrillic headers compare correctly.
#[inline]
pub(crate) fn fold_case(value: &str) -> String {
    value.to_lowercase()
}

/// Number of characters in a string, as used for console column widths.
#[inline]
pub(crate) fn char_width(value: &str) -> usize {
    value.chars().count()
}

/// Removes characters that are not allowed in file names: `\ / * ? : " < > |`.
/// Falls back to `query` when nothing printable is left.
pub(crate) fn sanitize_file_name(name: &str) -> String {
    let pattern = Regex::new(r#"[\\/*?:"<>|]"#).expect("Hardcode regex pattern");
    let sanitized = pattern.replace_all(name, "");
    let sanitized = sanitized.trim();
    if sanitized.is_empty() {
        String::from("query")
    } else {
        sanitized.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_case_cyrillic() {
        assert_eq!(fold_case("НАЗВАНИЕ"), "название");
        assert_eq!(fold_case("Розница"), "розница");
    }

    #[test]
    fn test_char_width_counts_characters() {
        assert_eq!(char_width("Груша"), 5);
        assert_eq!("Груша".len(), 10);
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("a/b\\c*d?e:f\"g<h>i|j"), "abcdefghij");
        assert_eq!(sanitize_file_name("яблоко"), "яблоко");
        assert_eq!(sanitize_file_name("??"), "query");
        assert_eq!(sanitize_file_name(""), "query");
    }
}
