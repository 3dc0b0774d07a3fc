//! # Strength-Log CSV Parser
//!
//! Parses CSV exports from three third-party formats into one normalized
//! shape: the legacy StrengthLog export (section-based), the new flat
//! StrengthLog CSV and the Hevy export.
//!
//! Format detection sniffs the first line and dispatches to the matching
//! sub-parser; unrecognized input falls through to the legacy parser,
//! which errors hard if its required `Workouts` section marker is absent.
//! Everything else is best-effort: lines that fail to parse are collected
//! as soft errors and never abort the import.

mod catalog;
mod flat;
mod hevy;
mod legacy;
mod records;
mod sets;

pub use records::estimate_one_rep_max;

use crate::strength_model::{
    StrengthImport, StrengthSet, StrengthWorkout, UserInfo, WorkoutSource,
};
use catalog::ExerciseCatalog;
use chrono::NaiveDate;
use log::{debug, info};
use records::PersonalBestTracker;

/// Errors from the strength-log import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StrengthLogError {
    /// The legacy format requires a `Workouts` section marker
    MissingWorkoutsSection,
}

impl std::fmt::Display for StrengthLogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StrengthLogError::MissingWorkoutsSection => {
                write!(f, "No 'Workouts' section marker found in legacy export")
            }
        }
    }
}

impl std::error::Error for StrengthLogError {}

/// The three recognized export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CsvFormat {
    Legacy,
    Flat,
    Hevy,
}

fn detect_format(first_line: &str) -> CsvFormat {
    let line = first_line.trim();
    if line.contains("\"title\"") && line.contains("\"start_time\"") {
        return CsvFormat::Hevy;
    }
    if line.to_lowercase().starts_with("workout,start,end") {
        return CsvFormat::Flat;
    }
    CsvFormat::Legacy
}

/// Parse a strength-log CSV export of any recognized format.
///
/// # Errors
///
/// Only the legacy path can fail hard, when its `Workouts` section marker
/// is missing. All other malformed content lands in
/// [`StrengthImport::errors`].
pub fn parse_strength_log_csv(
    content: &str,
    user_id: &str,
) -> Result<StrengthImport, StrengthLogError> {
    let first_line = content.lines().next().unwrap_or("");
    let format = detect_format(first_line);
    info!("Detected strength-log format {:?}", format);

    match format {
        CsvFormat::Legacy => legacy::parse(content, user_id),
        CsvFormat::Flat => Ok(flat::parse(content, user_id)),
        CsvFormat::Hevy => Ok(hevy::parse(content, user_id)),
    }
}

/// Shared accumulator state for all three sub-parsers: a "current workout"
/// that rows append to until the next workout boundary finalizes it.
struct ImportBuilder {
    user_id: String,
    user_info: UserInfo,
    workouts: Vec<StrengthWorkout>,
    current: Option<StrengthWorkout>,
    catalog: ExerciseCatalog,
    tracker: PersonalBestTracker,
    errors: Vec<String>,
}

impl ImportBuilder {
    fn new(user_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            user_info: UserInfo::default(),
            workouts: Vec::new(),
            current: None,
            catalog: ExerciseCatalog::new(),
            tracker: PersonalBestTracker::new(),
            errors: Vec::new(),
        }
    }

    /// Finalize the open workout, if any, and start a new one.
    fn start_workout(&mut self, date: NaiveDate, name: &str, source: WorkoutSource) {
        self.finish_current();
        debug!("Starting workout '{}' on {}", name, date);
        self.current = Some(StrengthWorkout::new(&self.user_id, date, name, source));
    }

    fn current_mut(&mut self) -> Option<&mut StrengthWorkout> {
        self.current.as_mut()
    }

    /// Append a set to the current workout, creating the per-exercise
    /// group and catalog entry as needed, and feed the PB tracker.
    fn add_set(&mut self, exercise_name: &str, set: StrengthSet) {
        let entry = self.catalog.resolve(exercise_name).clone();
        let Some(workout) = self.current.as_mut() else {
            self.errors
                .push(format!("set for '{}' outside any workout", exercise_name));
            return;
        };
        self.tracker.observe(&entry, &set, workout.date);
        workout.exercise_group(&entry.id, &entry.name).sets.push(set);
    }

    fn soft_error(&mut self, line_number: usize, message: impl std::fmt::Display) {
        self.errors.push(format!("line {}: {}", line_number + 1, message));
    }

    fn finish_current(&mut self) {
        if let Some(mut workout) = self.current.take() {
            workout.finalize();
            self.workouts.push(workout);
        }
    }

    fn finish(mut self) -> StrengthImport {
        self.finish_current();
        info!(
            "Import finished: {} workout(s), {} soft error(s)",
            self.workouts.len(),
            self.errors.len()
        );
        StrengthImport {
            user_info: self.user_info,
            workouts: self.workouts,
            exercises: self.catalog.into_entries(),
            personal_bests: self.tracker.into_records(),
            errors: self.errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_detection() {
        assert_eq!(
            detect_format("\"title\",\"start_time\",\"end_time\""),
            CsvFormat::Hevy
        );
        assert_eq!(
            detect_format("workout,start,end,note,bodyWeight"),
            CsvFormat::Flat
        );
        assert_eq!(detect_format("Name,Anna"), CsvFormat::Legacy);
        assert_eq!(detect_format(""), CsvFormat::Legacy);
    }

    #[test]
    fn test_unrecognized_format_errors_via_legacy() {
        let err = parse_strength_log_csv("just,some,random\ncsv,data,here", "u1").unwrap_err();
        assert_eq!(err, StrengthLogError::MissingWorkoutsSection);
    }

    #[test]
    fn test_builder_set_outside_workout_is_soft_error() {
        let mut builder = ImportBuilder::new("u1");
        builder.add_set("Bench Press", StrengthSet::default());
        let import = builder.finish();
        assert_eq!(import.workouts.len(), 0);
        assert_eq!(import.errors.len(), 1);
    }
}
