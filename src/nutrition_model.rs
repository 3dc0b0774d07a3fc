//! # Nutrition Data Model
//!
//! Best-effort extraction result for pasted nutrition-label text and
//! scraped structured data. Every field is optional: absence means the
//! value was not found in the input, never that the input was invalid.

use serde::{Deserialize, Serialize};

/// Structured nutrition facts extracted from free-form text or JSON-LD.
///
/// Values are per 100 g unless the source text says otherwise; the caller
/// decides what counts as "enough" data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedNutrition {
    /// Product display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Brand or manufacturer name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,

    /// Package net weight in grams
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_weight: Option<f64>,

    /// Energy in kcal (converted from kJ when only kJ is present)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,

    /// Protein in grams
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein: Option<f64>,

    /// Carbohydrates in grams
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbs: Option<f64>,

    /// Fat in grams
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fat: Option<f64>,

    /// Fiber in grams
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fiber: Option<f64>,

    /// Ingredient declaration as free text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<String>,

    /// Suggested portion size in grams
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_portion_grams: Option<f64>,
}

impl ParsedNutrition {
    /// True when no field at all was extracted.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// True when at least one macro/energy value was extracted.
    pub fn has_nutrients(&self) -> bool {
        self.calories.is_some()
            || self.protein.is_some()
            || self.carbs.is_some()
            || self.fat.is_some()
            || self.fiber.is_some()
    }

    /// Count of populated fields, used by callers to rank alternative
    /// extraction sources.
    pub fn field_count(&self) -> usize {
        [
            self.name.is_some(),
            self.brand.is_some(),
            self.package_weight.is_some(),
            self.calories.is_some(),
            self.protein.is_some(),
            self.carbs.is_some(),
            self.fat.is_some(),
            self.fiber.is_some(),
            self.ingredients.is_some(),
            self.default_portion_grams.is_some(),
        ]
        .iter()
        .filter(|b| **b)
        .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        let parsed = ParsedNutrition::default();
        assert!(parsed.is_empty());
        assert!(!parsed.has_nutrients());
        assert_eq!(parsed.field_count(), 0);
    }

    #[test]
    fn test_field_count() {
        let parsed = ParsedNutrition {
            protein: Some(14.0),
            calories: Some(250.0),
            ..Default::default()
        };
        assert!(parsed.has_nutrients());
        assert_eq!(parsed.field_count(), 2);
    }

    #[test]
    fn test_serde_camel_case() {
        let parsed = ParsedNutrition {
            package_weight: Some(500.0),
            ..Default::default()
        };
        let json = serde_json::to_string(&parsed).unwrap();
        assert!(json.contains("packageWeight"));
        assert!(!json.contains("protein"));
    }
}
