//! Lazy exercise catalog built during a single parse run.
//!
//! Entries are created the first time a normalized exercise name is seen
//! and deduplicated by that name. The catalog is a local accumulator owned
//! by the parse invocation, never a module-level registry, so concurrent
//! parses stay independent.

use crate::strength_model::{ExerciseCategory, StrengthExercise};
use crate::textutil::{normalize_exercise_name, slugify};
use log::debug;
use std::collections::HashMap;

/// Keywords marking a compound (multi-joint) movement.
const COMPOUND_KEYWORDS: [&str; 12] = [
    "squat", "deadlift", "press", "row", "pull-up", "pull up", "pullup", "chin", "clean",
    "snatch", "lunge", "dip",
];

/// (keyword, muscle) pairs checked in order; first hit wins.
const MUSCLE_KEYWORDS: [(&str, &str); 16] = [
    ("bench", "chest"),
    ("chest", "chest"),
    ("fly", "chest"),
    ("deadlift", "back"),
    ("row", "back"),
    ("pull", "back"),
    ("chin", "back"),
    ("lat", "back"),
    ("squat", "legs"),
    ("lunge", "legs"),
    ("leg", "legs"),
    ("calf", "legs"),
    ("curl", "arms"),
    ("tricep", "arms"),
    ("press", "shoulders"),
    ("plank", "core"),
];

const CARDIO_KEYWORDS: [&str; 9] = [
    "rowing", "ski erg", "skierg", "bike", "elliptical", "crosstrainer", "stair", "treadmill",
    "running",
];

pub struct ExerciseCatalog {
    by_normalized: HashMap<String, usize>,
    entries: Vec<StrengthExercise>,
}

impl ExerciseCatalog {
    pub fn new() -> Self {
        Self {
            by_normalized: HashMap::new(),
            entries: Vec::new(),
        }
    }

    /// The catalog entry for `raw_name`, created on first encounter.
    pub fn resolve(&mut self, raw_name: &str) -> &StrengthExercise {
        let normalized = normalize_exercise_name(raw_name);
        if let Some(&idx) = self.by_normalized.get(&normalized) {
            return &self.entries[idx];
        }

        let category = guess_category(&normalized);
        let is_compound = category != ExerciseCategory::Cardio
            && COMPOUND_KEYWORDS.iter().any(|kw| normalized.contains(kw));
        let entry = StrengthExercise {
            id: slugify(&normalized),
            name: raw_name.trim().to_string(),
            normalized_name: normalized.clone(),
            category,
            primary_muscle: guess_primary_muscle(&normalized),
            is_compound,
        };
        debug!(
            "New catalog entry '{}' ({:?}, compound={})",
            entry.id, entry.category, entry.is_compound
        );
        self.entries.push(entry);
        self.by_normalized.insert(normalized, self.entries.len() - 1);
        self.entries.last().expect("just pushed")
    }

    pub fn into_entries(self) -> Vec<StrengthExercise> {
        self.entries
    }
}

impl Default for ExerciseCatalog {
    fn default() -> Self {
        Self::new()
    }
}

fn guess_category(normalized: &str) -> ExerciseCategory {
    // Cardio machines frequently carry "(machine)" in their names, so the
    // cardio check must run before the machine check.
    if CARDIO_KEYWORDS.iter().any(|kw| normalized.contains(kw)) {
        return ExerciseCategory::Cardio;
    }
    if normalized.contains("barbell") || normalized.contains("skivstång") {
        ExerciseCategory::Barbell
    } else if normalized.contains("dumbbell") || normalized.contains("hantel") {
        ExerciseCategory::Dumbbell
    } else if normalized.contains("cable") {
        ExerciseCategory::Cable
    } else if normalized.contains("machine") || normalized.contains("maskin") {
        ExerciseCategory::Machine
    } else if normalized.contains("kettlebell") {
        ExerciseCategory::Kettlebell
    } else if ["pull up", "pull-up", "chin", "dip", "push up", "push-up", "plank", "bodyweight"]
        .iter()
        .any(|kw| normalized.contains(kw))
    {
        ExerciseCategory::Bodyweight
    } else {
        ExerciseCategory::Other
    }
}

fn guess_primary_muscle(normalized: &str) -> Option<String> {
    MUSCLE_KEYWORDS
        .iter()
        .find(|(kw, _)| normalized.contains(kw))
        .map(|(_, muscle)| muscle.to_string())
}

/// Weighted-distance exercises rank personal bests by weight first,
/// distance as tie-break.
pub fn is_weighted_distance(normalized: &str) -> bool {
    ["sled", "farmer", "yoke", "carry"]
        .iter()
        .any(|kw| normalized.contains(kw))
}
