//! # Nutrition Text Parser
//!
//! Turns free-form pasted nutrition-label text into a [`ParsedNutrition`]
//! record. The input is whatever a user copied from a product page or a
//! photographed label: mixed Swedish/English vocabulary, table fragments,
//! OCR noise.
//!
//! ## Features
//!
//! - Three priority-ordered match strategies per nutrient, short-circuiting
//!   on the first hit
//! - Swedish and English keyword synonyms ("kolhydrater" / "carbohydrates")
//! - Exclusion keywords so "varav mättat fett 3 g" never becomes total fat
//! - kJ fallback for energy when no kcal value is present
//! - Line-based product-name and ingredient-declaration heuristics
//!
//! Never fails: empty or unrecognizable input yields an empty record.

use crate::nutrition_model::ParsedNutrition;
use crate::textutil::normalize_label_text;
use lazy_static::lazy_static;
use log::{debug, info, trace};
use regex::Regex;

/// One nutrient's keyword set and the compiled strategy patterns for it.
struct NutrientPatterns {
    /// Strategy (a): keyword immediately followed by a number, only
    /// punctuation/whitespace between ("protein: 14").
    keyword_then_number: Vec<Regex>,
    /// Strategy (b): number immediately followed by the keyword
    /// ("14g protein").
    number_then_keyword: Vec<Regex>,
    /// Strategy (c): keyword followed by a number within a bounded window
    /// on the same region ("fett ..... 10").
    keyword_window: Vec<Regex>,
    /// Substrings that disqualify a match when found just before the
    /// keyword or inside the window gap ("mättat", "varav").
    exclusions: &'static [&'static str],
}

impl NutrientPatterns {
    fn new(keywords: &[&str], exclusions: &'static [&'static str]) -> Self {
        let keyword_then_number = keywords
            .iter()
            .map(|kw| {
                Regex::new(&format!(
                    r"\b{}\b[\s:.,;·]{{0,6}}(\d+(?:\.\d+)?)",
                    regex::escape(kw)
                ))
                .expect("keyword-then-number pattern")
            })
            .collect();
        let number_then_keyword = keywords
            .iter()
            .map(|kw| {
                Regex::new(&format!(
                    r"(\d+(?:\.\d+)?)\s*(?:g|gram)?\s*{}\b",
                    regex::escape(kw)
                ))
                .expect("number-then-keyword pattern")
            })
            .collect();
        let keyword_window = keywords
            .iter()
            .map(|kw| {
                Regex::new(&format!(
                    r"\b{}\b([^\n\d]{{0,40}})(\d+(?:\.\d+)?)",
                    regex::escape(kw)
                ))
                .expect("keyword-window pattern")
            })
            .collect();
        Self {
            keyword_then_number,
            number_then_keyword,
            keyword_window,
            exclusions,
        }
    }

    /// Try all three strategies in priority order against the normalized
    /// text; first accepted match wins.
    fn extract(&self, text: &str, nutrient: &str) -> Option<f64> {
        for pattern in &self.keyword_then_number {
            if let Some(value) = first_unexcluded(pattern, text, self.exclusions, false) {
                debug!("{}: keyword-then-number matched {}", nutrient, value);
                return Some(value);
            }
        }
        for pattern in &self.number_then_keyword {
            for caps in pattern.captures_iter(text) {
                if preceding_is_excluded(text, caps.get(0).map_or(0, |m| m.start()), self.exclusions)
                {
                    continue;
                }
                if let Ok(value) = caps[1].parse::<f64>() {
                    debug!("{}: number-then-keyword matched {}", nutrient, value);
                    return Some(value);
                }
            }
        }
        for pattern in &self.keyword_window {
            if let Some(value) = first_unexcluded(pattern, text, self.exclusions, true) {
                debug!("{}: keyword-window matched {}", nutrient, value);
                return Some(value);
            }
        }
        trace!("{}: no strategy matched", nutrient);
        None
    }
}

/// First capture whose surroundings carry no exclusion keyword. With
/// `check_gap` the text between keyword and number (capture 1) is checked
/// too, and the value then sits in capture 2.
fn first_unexcluded(
    pattern: &Regex,
    text: &str,
    exclusions: &[&str],
    check_gap: bool,
) -> Option<f64> {
    for caps in pattern.captures_iter(text) {
        let start = caps.get(0).map_or(0, |m| m.start());
        if preceding_is_excluded(text, start, exclusions) {
            continue;
        }
        let value_idx = if check_gap { 2 } else { 1 };
        if check_gap {
            let gap = caps.get(1).map_or("", |m| m.as_str());
            if exclusions.iter().any(|ex| gap.contains(ex)) {
                trace!("Skipping match, exclusion keyword in gap: '{}'", gap.trim());
                continue;
            }
        }
        if let Some(value) = caps.get(value_idx).and_then(|m| m.as_str().parse().ok()) {
            return Some(value);
        }
    }
    None
}

/// Check the few characters before a keyword match for an exclusion prefix,
/// so "mättat fett 3" is not read as total fat.
fn preceding_is_excluded(text: &str, match_start: usize, exclusions: &[&str]) -> bool {
    let window_start = match_start.saturating_sub(20);
    let mut start = window_start;
    while !text.is_char_boundary(start) {
        start += 1;
    }
    let before = &text[start..match_start];
    exclusions.iter().any(|ex| before.contains(ex))
}

lazy_static! {
    static ref KCAL_VALUE: Regex =
        Regex::new(r"(\d+(?:\.\d+)?)\s*kcal\b").expect("kcal value pattern");
    static ref KCAL_KEYWORD: Regex = Regex::new(
        r"\b(?:kcal|kalorier|calories|energy)\b[\s:.,;·]{0,6}(\d+(?:\.\d+)?)"
    )
    .expect("kcal keyword pattern");
    static ref ENERGI_VALUE: Regex =
        Regex::new(r"\benergi\b[^\d\n]{0,15}(\d+(?:\.\d+)?)\s*(kj|kcal)?")
            .expect("energi pattern");
    static ref PROTEIN: NutrientPatterns =
        NutrientPatterns::new(&["protein", "proteiner"], &[]);
    static ref CARBS: NutrientPatterns = NutrientPatterns::new(
        &["kolhydrater", "kolhydrat", "carbohydrates", "carbohydrate", "carbs"],
        &["sockerarter", "sugars", "varav"],
    );
    static ref FAT: NutrientPatterns = NutrientPatterns::new(
        &["fett", "fat"],
        &["mättat", "saturated", "varav", "omättat"],
    );
    static ref FIBER: NutrientPatterns =
        NutrientPatterns::new(&["kostfiber", "fibrer", "fiber", "fibre"], &[]);
    static ref KILOJOULE: Regex =
        Regex::new(r"(\d+(?:\.\d+)?)\s*kj\b").expect("kJ pattern");
    static ref PORTION: Regex =
        Regex::new(r"portion[^\d\n]{0,15}(\d+(?:\.\d+)?)\s*g\b").expect("portion pattern");
    static ref INGREDIENTS_SECTION: Regex = Regex::new(
        r"(?is)\b(?:ingrediens(?:er)?|ingredients|innehåll)\b\s*:?\s*(.+?)(?:\bnäring|\benergi\b|\bnutrition\b|$)"
    )
    .expect("ingredients pattern");
}

/// Line-level blacklist for the product-name heuristic: table headers and
/// section labels are never product names.
const NAME_BLACKLIST: [&str; 14] = [
    "näringsvärde",
    "näringsinnehåll",
    "nutrition",
    "ingrediens",
    "ingredients",
    "innehåll",
    "per 100",
    "energi",
    "kcal",
    "protein",
    "kolhydrat",
    "fett",
    "fiber",
    "varav",
];

/// Parse free-form nutrition-label text into a best-effort record.
///
/// # Examples
///
/// ```rust
/// use halsologg::nutrition_parser::parse_nutrition_text;
///
/// let parsed = parse_nutrition_text("Havredryck\nEnergi 250 kJ\nProtein 1,0 g\nFett 1,5 g");
/// assert_eq!(parsed.protein, Some(1.0));
/// assert_eq!(parsed.calories, Some(60.0)); // 250 kJ / 4.184, rounded
/// ```
pub fn parse_nutrition_text(text: &str) -> ParsedNutrition {
    let mut result = ParsedNutrition::default();
    if text.trim().is_empty() {
        return result;
    }

    let normalized = normalize_label_text(text);
    debug!("Parsing nutrition text, {} chars", normalized.len());

    result.calories = extract_calories(&normalized);
    result.protein = PROTEIN.extract(&normalized, "protein");
    result.carbs = CARBS.extract(&normalized, "carbs");
    result.fat = FAT.extract(&normalized, "fat");
    result.fiber = FIBER.extract(&normalized, "fiber");
    result.default_portion_grams = PORTION
        .captures(&normalized)
        .and_then(|c| c[1].parse().ok());

    result.name = extract_product_name(text);
    result.ingredients = extract_ingredients(text);

    info!(
        "Parsed nutrition text: {} field(s) extracted",
        result.field_count()
    );
    result
}

/// Energy extraction: explicit kcal first, kJ converted as a fallback.
fn extract_calories(normalized: &str) -> Option<f64> {
    if let Some(caps) = KCAL_VALUE.captures(normalized) {
        if let Ok(kcal) = caps[1].parse::<f64>() {
            debug!("calories: explicit kcal value {}", kcal);
            return Some(kcal);
        }
    }
    if let Some(caps) = KCAL_KEYWORD.captures(normalized) {
        if let Ok(kcal) = caps[1].parse::<f64>() {
            debug!("calories: kcal keyword matched {}", kcal);
            return Some(kcal);
        }
    }
    if let Some(caps) = ENERGI_VALUE.captures(normalized) {
        if let Ok(value) = caps[1].parse::<f64>() {
            // "Energi 1046 kJ" converts; "Energi 250" is taken as kcal.
            return if caps.get(2).map(|m| m.as_str()) == Some("kj") {
                let kcal = (value / 4.184).round();
                debug!("calories: converted {} kJ to {} kcal", value, kcal);
                Some(kcal)
            } else {
                debug!("calories: energi keyword matched {}", value);
                Some(value)
            };
        }
    }
    if let Some(caps) = KILOJOULE.captures(normalized) {
        if let Ok(kj) = caps[1].parse::<f64>() {
            let kcal = (kj / 4.184).round();
            debug!("calories: converted bare {} kJ to {} kcal", kj, kcal);
            return Some(kcal);
        }
    }
    None
}

/// First short line that is neither a table/section header nor
/// numeric-leading. A plain heuristic, not NLP.
fn extract_product_name(text: &str) -> Option<String> {
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.len() >= 60 {
            continue;
        }
        if line.chars().next().is_some_and(|c| c.is_ascii_digit()) {
            continue;
        }
        let lower = line.to_lowercase();
        if NAME_BLACKLIST.iter().any(|kw| lower.contains(kw)) {
            trace!("Skipping blacklisted name candidate: '{}'", line);
            continue;
        }
        debug!("Product name candidate: '{}'", line);
        return Some(line.to_string());
    }
    None
}

/// Capture the ingredient declaration between an ingredients keyword and a
/// trailing nutrition marker. Length-bounded to reject both noise and
/// whole-document over-capture.
fn extract_ingredients(text: &str) -> Option<String> {
    let caps = INGREDIENTS_SECTION.captures(text)?;
    let captured = caps[1]
        .trim()
        .trim_start_matches(|c: char| c == ':' || c == '-' || c == '.' || c.is_whitespace())
        .trim_end()
        .to_string();
    if captured.len() < 5 || captured.len() > 2000 {
        trace!("Rejecting ingredients capture of {} chars", captured.len());
        return None;
    }
    Some(captured)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_yields_empty_record() {
        assert!(parse_nutrition_text("").is_empty());
        assert!(parse_nutrition_text("   \n  ").is_empty());
    }

    #[test]
    fn test_keyword_then_number() {
        let parsed = parse_nutrition_text("Protein: 14 g");
        assert_eq!(parsed.protein, Some(14.0));
    }

    #[test]
    fn test_number_then_keyword() {
        let parsed = parse_nutrition_text("14g Protein");
        assert_eq!(parsed.protein, Some(14.0));
    }

    #[test]
    fn test_decimal_comma_values() {
        let parsed = parse_nutrition_text("Fett 1,5 g\nKolhydrater 6,6 g");
        assert_eq!(parsed.fat, Some(1.5));
        assert_eq!(parsed.carbs, Some(6.6));
    }

    #[test]
    fn test_saturated_fat_not_captured_as_total() {
        let parsed = parse_nutrition_text("Fett 10 g\nvarav mättat fett 3 g");
        assert_eq!(parsed.fat, Some(10.0));
    }

    #[test]
    fn test_saturated_only_is_excluded() {
        // Only a "varav mättat" row present: must not report 3 as total fat.
        let parsed = parse_nutrition_text("varav mättat fett 3 g");
        assert_eq!(parsed.fat, None);
    }

    #[test]
    fn test_sugars_not_captured_as_carbs() {
        let parsed = parse_nutrition_text("Kolhydrater 40 g\nvarav sockerarter 12 g");
        assert_eq!(parsed.carbs, Some(40.0));
    }

    #[test]
    fn test_kcal_preferred_over_kj() {
        let parsed = parse_nutrition_text("Energi 1046 kJ / 250 kcal");
        assert_eq!(parsed.calories, Some(250.0));
    }

    #[test]
    fn test_kj_conversion_fallback() {
        let parsed = parse_nutrition_text("Energi 1046 kJ");
        assert_eq!(parsed.calories, Some((1046.0_f64 / 4.184).round()));
    }

    #[test]
    fn test_swedish_synonyms() {
        let parsed = parse_nutrition_text("Kolhydrater 6,6 g\nKostfiber 2,1 g");
        assert_eq!(parsed.carbs, Some(6.6));
        assert_eq!(parsed.fiber, Some(2.1));
    }

    #[test]
    fn test_product_name_skips_headers_and_numbers() {
        let text = "Näringsvärde per 100 g\n250 ml\nHavredryck Ikaffe\nProtein 1 g";
        let parsed = parse_nutrition_text(text);
        assert_eq!(parsed.name.as_deref(), Some("Havredryck Ikaffe"));
    }

    #[test]
    fn test_product_name_length_bound() {
        let long = "x".repeat(80);
        let text = format!("{}\nKort namn", long);
        let parsed = parse_nutrition_text(&text);
        assert_eq!(parsed.name.as_deref(), Some("Kort namn"));
    }

    #[test]
    fn test_ingredients_capture() {
        let text = "Ingredienser: vatten, havre 10%, rapsolja, salt.\nNäringsvärde per 100 ml";
        let parsed = parse_nutrition_text(text);
        assert_eq!(
            parsed.ingredients.as_deref(),
            Some("vatten, havre 10%, rapsolja, salt.")
        );
    }

    #[test]
    fn test_ingredients_too_short_rejected() {
        let parsed = parse_nutrition_text("Ingredienser: a");
        assert_eq!(parsed.ingredients, None);
    }

    #[test]
    fn test_portion_extraction() {
        let parsed = parse_nutrition_text("Per portion (30 g)");
        assert_eq!(parsed.default_portion_grams, Some(30.0));
    }
}
