//! # Hälsologg Parsers
//!
//! Heuristic parsers that turn unstructured health and training text into
//! structured data: scraped nutrition labels, strength-log CSV exports in
//! three dialects, free-form interval-workout descriptions and smart
//! search queries.

pub mod duration;
pub mod nutrition_jsonld;
pub mod nutrition_model;
pub mod nutrition_parser;
pub mod product_extract;
pub mod smart_query;
pub mod strength_model;
pub mod strengthlog;
pub mod textutil;
pub mod workout_description;
