//! # Product Metadata Extraction
//!
//! Packaging weight, brand and display-name cleanup for scraped or pasted
//! product text. Same strategy shape as the nutrient extraction: an
//! explicit-keyword match first (highest confidence), then a bounded
//! heuristic fallback.

use crate::textutil::{collapse_whitespace, parse_number};
use lazy_static::lazy_static;
use log::{debug, trace};
use regex::Regex;

lazy_static! {
    static ref LABELLED_WEIGHT: Regex = Regex::new(
        r"(?i)\b(?:nettovikt|netto|net\s*weight|net\s*wt|förpackningsstorlek|vikt)\b[^\d\n]{0,15}(\d+(?:[.,]\d+)?)\s*(kg|g)\b"
    )
    .expect("labelled weight pattern");
    static ref STANDALONE_WEIGHT: Regex =
        Regex::new(r"(?i)(\d+(?:[.,]\d+)?)\s*(kg|g)\b").expect("standalone weight pattern");
    static ref LABELLED_BRAND: Regex =
        Regex::new(r"(?i)\b(?:varumärke|brand|märke|tillverkare)\b\s*:?\s*([^\n,;]+)")
            .expect("labelled brand pattern");
    static ref TRAILING_SIZE: Regex = Regex::new(
        r"(?i)[,\s\-–]*\d+(?:[.,]\d+)?\s*(?:x\s*\d+(?:[.,]\d+)?\s*)?(?:g|kg|ml|cl|l|st|pack|p)\.?\s*$"
    )
    .expect("trailing size pattern");
}

/// Extract the package net weight in grams.
///
/// An explicitly labelled weight ("Nettovikt 500 g") wins. The fallback
/// scans for any standalone weight between 5 g and 5000 g, skipping
/// exactly 100 because on product pages that overwhelmingly denotes the
/// per-100 g nutrition-table reference rather than a package size.
pub fn extract_packaging_weight(text: &str) -> Option<f64> {
    if let Some(caps) = LABELLED_WEIGHT.captures(text) {
        if let Some(grams) = to_grams(&caps[1], &caps[2]) {
            debug!("Labelled package weight: {} g", grams);
            return Some(grams);
        }
    }

    for caps in STANDALONE_WEIGHT.captures_iter(text) {
        let Some(grams) = to_grams(&caps[1], &caps[2]) else {
            continue;
        };
        if !(5.0..=5000.0).contains(&grams) {
            trace!("Skipping out-of-range weight candidate {} g", grams);
            continue;
        }
        if grams == 100.0 {
            // The per-100g table reference, not a package size.
            trace!("Skipping bare 100 g candidate");
            continue;
        }
        debug!("Fallback package weight: {} g", grams);
        return Some(grams);
    }
    None
}

fn to_grams(amount: &str, unit: &str) -> Option<f64> {
    let value = parse_number(amount)?;
    match unit.to_lowercase().as_str() {
        "kg" => Some(value * 1000.0),
        _ => Some(value),
    }
}

/// Extract a brand name from product text.
///
/// Strategy 1: an explicit "varumärke"/"brand" label. Strategy 2: fuzzy
/// containment against the caller-provided known-brand list, checked
/// longest-first so "Oatly Barista" beats "Oat".
pub fn extract_brand(text: &str, known_brands: &[String]) -> Option<String> {
    if let Some(caps) = LABELLED_BRAND.captures(text) {
        let brand = caps[1].trim().to_string();
        if !brand.is_empty() {
            debug!("Labelled brand: '{}'", brand);
            return Some(brand);
        }
    }

    let lowered = text.to_lowercase();
    let mut candidates: Vec<&String> = known_brands.iter().filter(|b| !b.is_empty()).collect();
    candidates.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    for brand in candidates {
        if lowered.contains(&brand.to_lowercase()) {
            debug!("Known-brand containment match: '{}'", brand);
            return Some(brand.clone());
        }
    }
    None
}

/// Clean a product display name: drop a leading brand repetition and
/// trailing packaging sizes ("Oatly Havredryck Ikaffe 1 l" -> "Havredryck
/// Ikaffe" when the brand is Oatly).
pub fn clean_product_name(name: &str, brand: Option<&str>) -> String {
    let mut cleaned = collapse_whitespace(name);

    if let Some(brand) = brand {
        let brand_lower = brand.trim().to_lowercase();
        if !brand_lower.is_empty() {
            // Find the prefix of the name that case-folds to the brand.
            // Byte lengths may differ after lowercasing, so the slice
            // point must come from the name itself.
            let prefix_end = (0..=cleaned.len())
                .filter(|&i| cleaned.is_char_boundary(i))
                .find(|&i| cleaned[..i].to_lowercase() == brand_lower);
            if let Some(end) = prefix_end {
                cleaned = cleaned[end..]
                    .trim_start_matches(|c: char| c.is_whitespace() || c == '-' || c == ',')
                    .to_string();
            }
        }
    }

    cleaned = TRAILING_SIZE.replace(&cleaned, "").trim().to_string();

    if cleaned.is_empty() {
        // Never return an empty display name; fall back to the input.
        collapse_whitespace(name)
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brands(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_labelled_weight_wins() {
        assert_eq!(
            extract_packaging_weight("Pris 25 kr. Nettovikt 500 g. Per 100 g: 250 kcal"),
            Some(500.0)
        );
    }

    #[test]
    fn test_labelled_weight_kg() {
        assert_eq!(extract_packaging_weight("Nettovikt 1,5 kg"), Some(1500.0));
    }

    #[test]
    fn test_bare_100_excluded() {
        // An unlabelled "100 g" is the nutrition-table reference.
        assert_eq!(extract_packaging_weight("Näringsvärde per 100 g"), None);
    }

    #[test]
    fn test_labelled_100_accepted() {
        assert_eq!(extract_packaging_weight("Nettovikt 100 g"), Some(100.0));
    }

    #[test]
    fn test_fallback_weight_in_bounds() {
        assert_eq!(extract_packaging_weight("Chokladkaka 200 g mörk"), Some(200.0));
    }

    #[test]
    fn test_fallback_skips_out_of_range() {
        assert_eq!(extract_packaging_weight("2 g salt"), None);
        assert_eq!(extract_packaging_weight("10000 g"), None);
    }

    #[test]
    fn test_labelled_brand() {
        assert_eq!(
            extract_brand("Varumärke: Felix\nUrsprung Sverige", &[]),
            Some("Felix".to_string())
        );
    }

    #[test]
    fn test_known_brand_longest_first() {
        let known = brands(&["Oat", "Oatly", "Oatly Barista"]);
        assert_eq!(
            extract_brand("Oatly Barista Havredryck 1 l", &known),
            Some("Oatly Barista".to_string())
        );
    }

    #[test]
    fn test_known_brand_case_insensitive() {
        let known = brands(&["Oatly"]);
        assert_eq!(
            extract_brand("OATLY havredryck", &known),
            Some("Oatly".to_string())
        );
    }

    #[test]
    fn test_no_brand_found() {
        assert_eq!(extract_brand("Havredryck", &brands(&["Felix"])), None);
    }

    #[test]
    fn test_clean_name_strips_brand_and_size() {
        assert_eq!(
            clean_product_name("Oatly Havredryck Ikaffe 1 l", Some("Oatly")),
            "Havredryck Ikaffe"
        );
    }

    #[test]
    fn test_clean_name_brand_with_multibyte_casing() {
        // "ẞ" lowercases to the two-byte "ß", so the brand's own byte
        // length must never be used to slice the name.
        assert_eq!(
            clean_product_name("WEIẞE Bönor 400 g", Some("Weiße")),
            "Bönor"
        );
        assert_eq!(
            clean_product_name("ÄNGLAMARK Müsli 750 g", Some("Änglamark")),
            "Müsli"
        );
    }

    #[test]
    fn test_clean_name_multipack_size() {
        assert_eq!(
            clean_product_name("Läsk 6 x 33 cl", None),
            "Läsk"
        );
    }

    #[test]
    fn test_clean_name_keeps_plain_names() {
        assert_eq!(clean_product_name("Havredryck", None), "Havredryck");
    }

    #[test]
    fn test_clean_name_never_empty() {
        assert_eq!(clean_product_name("Oatly", Some("Oatly")), "Oatly");
    }
}
