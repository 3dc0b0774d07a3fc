//! # Text Utilities Module
//!
//! Low-level text normalization shared by every parser in the crate:
//! decimal-separator fixes, OCR artifact cleanup, slug generation and a
//! minimal quote-aware CSV field splitter.
//!
//! ## Features
//!
//! - Comma-to-dot decimal normalization ("14,5" -> "14.5")
//! - OCR cleanup for pasted label text (spaced digits, "O" read as "0")
//! - Slug/id generation from free-form exercise names
//! - Quote-aware CSV line splitting for the known export formats

use lazy_static::lazy_static;
use log::trace;
use regex::Regex;

lazy_static! {
    static ref DECIMAL_COMMA: Regex = Regex::new(r"(\d),(\d)").expect("decimal comma pattern");
    static ref SPACED_DIGITS: Regex =
        Regex::new(r"(?i)(\d)\s+(\d+)\s*(g|mg|kg|kcal|kj)\b").expect("spaced digit pattern");
    static ref OCR_OH_FOR_ZERO: Regex = Regex::new(r"(\d)[Oo]|[Oo](\d)").expect("O/0 pattern");
    static ref MULTI_SPACE: Regex = Regex::new(r"\s+").expect("whitespace pattern");
}

/// Replace decimal commas between digits with dots.
///
/// Swedish label text writes "14,5 g"; all downstream numeric parsing
/// expects "14.5".
pub fn normalize_decimal_separators(text: &str) -> String {
    DECIMAL_COMMA.replace_all(text, "$1.$2").into_owned()
}

/// Normalize pasted/OCR:ed label text for keyword matching.
///
/// Lowercases, fixes decimal commas, joins digits split by stray spaces
/// ("1 4 g" -> "14 g") and repairs "O" misread as "0" next to a digit.
pub fn normalize_label_text(text: &str) -> String {
    let mut out = normalize_decimal_separators(text).to_lowercase();

    out = SPACED_DIGITS.replace_all(&out, "$1$2 $3").into_owned();

    out = OCR_OH_FOR_ZERO
        .replace_all(&out, |caps: &regex::Captures| {
            if let Some(d) = caps.get(1) {
                format!("{}0", d.as_str())
            } else {
                format!("0{}", &caps[2])
            }
        })
        .into_owned();

    trace!("Normalized label text to {} chars", out.len());
    out
}

/// Collapse runs of whitespace into single spaces and trim.
pub fn collapse_whitespace(text: &str) -> String {
    MULTI_SPACE.replace_all(text.trim(), " ").into_owned()
}

/// Parse a number that may still carry a decimal comma or stray spaces.
pub fn parse_number(raw: &str) -> Option<f64> {
    let cleaned = raw.trim().replace(',', ".");
    cleaned.parse::<f64>().ok()
}

/// Lowercased, whitespace-collapsed form of an exercise name, used as the
/// deduplication key for the lazy exercise catalog.
pub fn normalize_exercise_name(name: &str) -> String {
    collapse_whitespace(&name.to_lowercase())
}

/// Turn a normalized name into a stable slug id ("Machine Chest Fly" ->
/// "machine-chest-fly").
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_dash = true;
    for c in name.to_lowercase().chars() {
        if c.is_alphanumeric() {
            slug.push(c);
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    slug.trim_end_matches('-').to_string()
}

/// Split one CSV line into fields.
///
/// Comma-separated, double-quote delimited fields, no escaped-quote support.
/// This covers the three known export formats; it is not a general CSV
/// parser.
pub fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current = String::new();
            }
            _ => current.push(c),
        }
    }
    fields.push(current.trim().to_string());
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_comma_normalization() {
        assert_eq!(normalize_decimal_separators("14,5 g"), "14.5 g");
        assert_eq!(normalize_decimal_separators("1,2 och 3,4"), "1.2 och 3.4");
        // Thousands-style lists keep their structure, only digit,digit changes
        assert_eq!(normalize_decimal_separators("a, b"), "a, b");
    }

    #[test]
    fn test_label_normalization_lowercases() {
        let out = normalize_label_text("Protein 14,5 G");
        assert!(out.contains("protein 14.5 g"));
    }

    #[test]
    fn test_ocr_oh_for_zero() {
        let out = normalize_label_text("1O0 g");
        assert!(out.contains("100 g"));
    }

    #[test]
    fn test_spaced_digits_joined() {
        let out = normalize_label_text("protein 1 4 g");
        assert!(out.contains("protein 14 g"));
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Machine Chest Fly"), "machine-chest-fly");
        assert_eq!(slugify("Squat (Barbell)"), "squat-barbell");
        assert_eq!(slugify("  Pull-ups!  "), "pull-ups");
    }

    #[test]
    fn test_normalize_exercise_name() {
        assert_eq!(normalize_exercise_name("  Bench   Press "), "bench press");
    }

    #[test]
    fn test_split_csv_plain() {
        assert_eq!(
            split_csv_line("a,b,c"),
            vec!["a".to_string(), "b".to_string(), "c".to_string()]
        );
    }

    #[test]
    fn test_split_csv_quoted_comma() {
        assert_eq!(
            split_csv_line(r#""Squat: 5 x 100, 5 x 110",2024-03-02"#),
            vec!["Squat: 5 x 100, 5 x 110".to_string(), "2024-03-02".to_string()]
        );
    }

    #[test]
    fn test_split_csv_empty_fields() {
        assert_eq!(split_csv_line("a,,b"), vec!["a", "", "b"]);
    }

    #[test]
    fn test_parse_number_with_comma() {
        assert_eq!(parse_number("57,5"), Some(57.5));
        assert_eq!(parse_number(" 65 "), Some(65.0));
        assert_eq!(parse_number("x"), None);
    }
}
