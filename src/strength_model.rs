//! # Strength Training Data Model
//!
//! Normalized output shape shared by all three CSV import formats:
//! workouts, their exercises and sets, the lazily built exercise catalog
//! and derived personal-best records.
//!
//! Workouts are created once per parsed row group and finalized (totals
//! computed) when the next workout boundary is detected or input ends;
//! after finalization they are immutable within a parse run.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Which export format a workout was parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutSource {
    StrengthlogLegacy,
    StrengthlogFlat,
    Hevy,
}

/// One set within an exercise. Optional fields depend on the exercise
/// type: bodyweight-assisted lifts, cardio/distance work and timed holds
/// each populate their own subset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrengthSet {
    pub set_number: u32,
    pub reps: u32,
    pub weight: f64,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_bodyweight: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bodyweight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_weight: Option<f64>,
    /// Distance in metres (km inputs are converted on parse)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_unit: Option<String>,
    /// Clock-formatted duration as it appeared in the export
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_seconds: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rpm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rpe: Option<f64>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_warmup: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tempo: Option<String>,
}

impl StrengthSet {
    /// reps × weight, the volume contribution of this set.
    pub fn volume(&self) -> f64 {
        f64::from(self.reps) * self.weight
    }

    /// A distance effort with no rep count still counts as one completed
    /// set. Called during parsing before the set is appended.
    pub fn normalize_distance_reps(&mut self) {
        if self.reps == 0 && self.distance.unwrap_or(0.0) > 0.0 {
            self.reps = 1;
        }
    }
}

/// One exercise within a workout, owning its ordered sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrengthWorkoutExercise {
    pub exercise_id: String,
    pub exercise_name: String,
    pub sets: Vec<StrengthSet>,
    pub total_volume: f64,
    /// The set maximizing weight, reps as tie-break
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_set: Option<StrengthSet>,
}

impl StrengthWorkoutExercise {
    pub fn new(exercise_id: String, exercise_name: String) -> Self {
        Self {
            exercise_id,
            exercise_name,
            sets: Vec::new(),
            total_volume: 0.0,
            top_set: None,
        }
    }

    /// Compute the derived fields from the accumulated sets.
    pub fn finalize(&mut self) {
        self.total_volume = self.sets.iter().map(StrengthSet::volume).sum();
        self.top_set = self
            .sets
            .iter()
            .max_by(|a, b| {
                a.weight
                    .partial_cmp(&b.weight)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(a.reps.cmp(&b.reps))
            })
            .cloned();
    }
}

/// One logged training session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrengthWorkout {
    pub id: String,
    pub user_id: String,
    pub date: NaiveDate,
    pub name: String,
    pub source: WorkoutSource,
    pub exercises: Vec<StrengthWorkoutExercise>,
    pub total_volume: f64,
    pub total_sets: u32,
    pub total_reps: u32,
    pub unique_exercises: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sleep: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stress: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl StrengthWorkout {
    pub fn new(user_id: &str, date: NaiveDate, name: &str, source: WorkoutSource) -> Self {
        let id = format!("{}-{}", date, crate::textutil::slugify(name));
        Self {
            id,
            user_id: user_id.to_string(),
            date,
            name: name.to_string(),
            source,
            exercises: Vec::new(),
            total_volume: 0.0,
            total_sets: 0,
            total_reps: 0,
            unique_exercises: 0,
            body_weight: None,
            sleep: None,
            stress: None,
            shape: None,
            notes: None,
        }
    }

    /// Finalize every exercise, then roll the totals up to workout level.
    pub fn finalize(&mut self) {
        for exercise in &mut self.exercises {
            exercise.finalize();
        }
        self.total_volume = self.exercises.iter().map(|e| e.total_volume).sum();
        self.total_sets = self.exercises.iter().map(|e| e.sets.len() as u32).sum();
        self.total_reps = self
            .exercises
            .iter()
            .flat_map(|e| e.sets.iter())
            .map(|s| s.reps)
            .sum();
        self.unique_exercises = self.exercises.len() as u32;
    }

    /// The exercise group for `exercise_id`, created on first use within
    /// this workout.
    pub fn exercise_group(
        &mut self,
        exercise_id: &str,
        exercise_name: &str,
    ) -> &mut StrengthWorkoutExercise {
        if let Some(idx) = self
            .exercises
            .iter()
            .position(|e| e.exercise_id == exercise_id)
        {
            &mut self.exercises[idx]
        } else {
            self.exercises.push(StrengthWorkoutExercise::new(
                exercise_id.to_string(),
                exercise_name.to_string(),
            ));
            self.exercises.last_mut().expect("just pushed")
        }
    }
}

/// Rough equipment/movement category, guessed from the exercise name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseCategory {
    Barbell,
    Dumbbell,
    Machine,
    Cable,
    Kettlebell,
    Bodyweight,
    Cardio,
    Other,
}

/// Catalog entry created lazily the first time a normalized exercise name
/// is seen during a parse run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrengthExercise {
    pub id: String,
    pub name: String,
    pub normalized_name: String,
    pub category: ExerciseCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_muscle: Option<String>,
    pub is_compound: bool,
}

/// Metric type a personal best is tracked under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PersonalBestKind {
    /// Estimated one-rep max (also keys the weight-primary record of
    /// weighted-distance exercises)
    #[serde(rename = "1rm")]
    OneRm,
    /// Longest held duration in seconds
    #[serde(rename = "time")]
    Time,
    /// Longest distance in metres
    #[serde(rename = "distance")]
    Distance,
}

/// Best-ever value per (exercise, metric type) within a parse run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalBest {
    pub exercise_id: String,
    pub exercise_name: String,
    #[serde(rename = "type")]
    pub kind: PersonalBestKind,
    pub value: f64,
    /// Tie-break distance for weighted-carry records
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_best: Option<f64>,
    pub date: NaiveDate,
}

/// User metadata from the legacy export preamble.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_weight: Option<f64>,
}

/// Complete result of one CSV import.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrengthImport {
    pub user_info: UserInfo,
    pub workouts: Vec<StrengthWorkout>,
    pub exercises: Vec<StrengthExercise>,
    pub personal_bests: Vec<PersonalBest>,
    /// Per-line soft errors; a bad line never invalidates the rest of the
    /// file
    pub errors: Vec<String>,
}
