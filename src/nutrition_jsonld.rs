//! # JSON-LD Nutrition Extraction
//!
//! Scraped product pages often embed schema.org structured data next to the
//! visible text. This module walks those nested JSON-LD object graphs and
//! fills [`ParsedNutrition`] fields the text parser did not find.
//!
//! Only unset fields are written, first found wins across the graph, so the
//! text parser's output always takes precedence.

use crate::nutrition_model::ParsedNutrition;
use crate::textutil::parse_number;
use lazy_static::lazy_static;
use log::{debug, trace};
use regex::Regex;
use serde_json::Value;

lazy_static! {
    static ref LEADING_NUMBER: Regex =
        Regex::new(r"(\d+(?:[.,]\d+)?)").expect("leading number pattern");
}

/// Walk JSON-LD objects and fill unset fields of `target`.
///
/// Handles schema.org `Product`, `Recipe` and `NutritionInformation`
/// shapes: `name`, `brand` (string or `{"name": ...}`), `nutrition`,
/// `weight` (`QuantitativeValue`), `ingredients`/`recipeIngredient`.
pub fn extract_from_json_ld(objects: &[Value], target: &mut ParsedNutrition) {
    for object in objects {
        walk(object, target, 0);
    }
}

fn walk(value: &Value, target: &mut ParsedNutrition, depth: usize) {
    // Scraped graphs can self-reference through @graph blobs; ten levels is
    // far beyond any real schema.org nesting.
    if depth > 10 {
        return;
    }
    match value {
        Value::Object(map) => {
            if target.name.is_none() {
                if let Some(name) = map.get("name").and_then(Value::as_str) {
                    debug!("JSON-LD name: '{}'", name);
                    target.name = Some(name.to_string());
                }
            }
            if target.brand.is_none() {
                if let Some(brand) = map.get("brand").and_then(brand_name) {
                    debug!("JSON-LD brand: '{}'", brand);
                    target.brand = Some(brand);
                }
            }
            if let Some(nutrition) = map.get("nutrition").and_then(Value::as_object) {
                apply_nutrition_information(nutrition, target);
            }
            if target.package_weight.is_none() {
                if let Some(grams) = map.get("weight").and_then(weight_grams) {
                    debug!("JSON-LD package weight: {} g", grams);
                    target.package_weight = Some(grams);
                }
            }
            if target.ingredients.is_none() {
                let ingredients = map
                    .get("ingredients")
                    .or_else(|| map.get("recipeIngredient"));
                if let Some(text) = ingredients.and_then(ingredients_text) {
                    target.ingredients = Some(text);
                }
            }
            for child in map.values() {
                walk(child, target, depth + 1);
            }
        }
        Value::Array(items) => {
            for item in items {
                walk(item, target, depth + 1);
            }
        }
        _ => {}
    }
}

/// schema.org NutritionInformation: values are strings with units
/// ("218 kcal", "4.5 g").
fn apply_nutrition_information(
    map: &serde_json::Map<String, Value>,
    target: &mut ParsedNutrition,
) {
    let fields: [(&str, &mut Option<f64>); 5] = [
        ("calories", &mut target.calories),
        ("proteinContent", &mut target.protein),
        ("carbohydrateContent", &mut target.carbs),
        ("fatContent", &mut target.fat),
        ("fiberContent", &mut target.fiber),
    ];
    for (key, slot) in fields {
        if slot.is_none() {
            if let Some(value) = map.get(key).and_then(numeric_value) {
                trace!("JSON-LD nutrition {}: {}", key, value);
                *slot = Some(value);
            }
        }
    }
    if target.default_portion_grams.is_none() {
        if let Some(grams) = map.get("servingSize").and_then(numeric_value) {
            target.default_portion_grams = Some(grams);
        }
    }
}

/// Leading number from a JSON value that is either numeric or a
/// "<number> <unit>" string.
fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => LEADING_NUMBER
            .captures(s)
            .and_then(|caps| parse_number(&caps[1])),
        _ => None,
    }
}

/// Brand is either a plain string or a `Brand` object with a `name`.
fn brand_name(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Object(map) => map
            .get("name")
            .and_then(Value::as_str)
            .map(|s| s.trim().to_string()),
        _ => None,
    }
}

/// schema.org weight: QuantitativeValue with `value` + `unitText`/`unitCode`,
/// or a bare "500 g" string. Result in grams.
fn weight_grams(value: &Value) -> Option<f64> {
    match value {
        Value::Object(map) => {
            let amount = map.get("value").and_then(numeric_value)?;
            let unit = map
                .get("unitText")
                .or_else(|| map.get("unitCode"))
                .and_then(Value::as_str)
                .unwrap_or("g")
                .to_lowercase();
            match unit.as_str() {
                "kg" | "kgm" => Some(amount * 1000.0),
                _ => Some(amount),
            }
        }
        Value::String(s) => {
            let lowered = s.to_lowercase();
            let amount = numeric_value(value)?;
            if lowered.contains("kg") {
                Some(amount * 1000.0)
            } else {
                Some(amount)
            }
        }
        _ => None,
    }
}

/// Ingredient declarations appear as one string or an array of strings.
fn ingredients_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if s.len() >= 5 => Some(s.clone()),
        Value::Array(items) => {
            let parts: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(", "))
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_product_with_nutrition() {
        let object = json!({
            "@type": "Product",
            "name": "Havredryck Ikaffe",
            "brand": {"name": "Oatly"},
            "nutrition": {
                "calories": "59 kcal",
                "proteinContent": "1 g",
                "fatContent": "1.5 g",
                "carbohydrateContent": "6.6 g"
            }
        });
        let mut target = ParsedNutrition::default();
        extract_from_json_ld(&[object], &mut target);

        assert_eq!(target.name.as_deref(), Some("Havredryck Ikaffe"));
        assert_eq!(target.brand.as_deref(), Some("Oatly"));
        assert_eq!(target.calories, Some(59.0));
        assert_eq!(target.protein, Some(1.0));
        assert_eq!(target.fat, Some(1.5));
        assert_eq!(target.carbs, Some(6.6));
    }

    #[test]
    fn test_existing_fields_not_overwritten() {
        let object = json!({"name": "Scraped name", "brand": "Scraped"});
        let mut target = ParsedNutrition {
            name: Some("Text name".to_string()),
            ..Default::default()
        };
        extract_from_json_ld(&[object], &mut target);

        assert_eq!(target.name.as_deref(), Some("Text name"));
        assert_eq!(target.brand.as_deref(), Some("Scraped"));
    }

    #[test]
    fn test_first_found_wins_across_graph() {
        let objects = [json!({"name": "First"}), json!({"name": "Second"})];
        let mut target = ParsedNutrition::default();
        extract_from_json_ld(&objects, &mut target);
        assert_eq!(target.name.as_deref(), Some("First"));
    }

    #[test]
    fn test_nested_graph_walked() {
        let object = json!({
            "@graph": [
                {"@type": "WebPage"},
                {"@type": "Product", "nutrition": {"calories": 218}}
            ]
        });
        let mut target = ParsedNutrition::default();
        extract_from_json_ld(&[object], &mut target);
        assert_eq!(target.calories, Some(218.0));
    }

    #[test]
    fn test_weight_quantitative_value_kg() {
        let object = json!({"weight": {"value": 0.5, "unitText": "kg"}});
        let mut target = ParsedNutrition::default();
        extract_from_json_ld(&[object], &mut target);
        assert_eq!(target.package_weight, Some(500.0));
    }

    #[test]
    fn test_recipe_ingredient_array() {
        let object = json!({"recipeIngredient": ["vatten", "havre 10%", "salt"]});
        let mut target = ParsedNutrition::default();
        extract_from_json_ld(&[object], &mut target);
        assert_eq!(target.ingredients.as_deref(), Some("vatten, havre 10%, salt"));
    }

    #[test]
    fn test_decimal_comma_in_string_value() {
        let object = json!({"nutrition": {"proteinContent": "4,5 g"}});
        let mut target = ParsedNutrition::default();
        extract_from_json_ld(&[object], &mut target);
        assert_eq!(target.protein, Some(4.5));
    }
}
