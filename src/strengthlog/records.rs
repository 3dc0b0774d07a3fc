//! Incremental personal-best tracking during a CSV import.
//!
//! One current-best record exists per (exercise, metric type) key at any
//! time; a strictly better value overwrites in place and retains the old
//! value as `previous_best`. A single set can compete for several metric
//! types at once (a timed weighted carry updates both the time record and
//! the weight/distance record).

use super::catalog::is_weighted_distance;
use crate::strength_model::{
    ExerciseCategory, PersonalBest, PersonalBestKind, StrengthExercise, StrengthSet,
};
use chrono::NaiveDate;
use log::debug;
use std::collections::HashMap;

/// Estimated one-rep max via the Epley formula. A single rep is already a
/// one-rep max, so it degenerates to the lifted weight itself.
pub fn estimate_one_rep_max(weight: f64, reps: u32) -> f64 {
    if reps <= 1 {
        return weight;
    }
    weight * (1.0 + f64::from(reps) / 30.0)
}

pub struct PersonalBestTracker {
    best: HashMap<(String, PersonalBestKind), PersonalBest>,
}

impl PersonalBestTracker {
    pub fn new() -> Self {
        Self {
            best: HashMap::new(),
        }
    }

    /// Feed one parsed set into the tracker.
    pub fn observe(&mut self, exercise: &StrengthExercise, set: &StrengthSet, date: NaiveDate) {
        if set.is_warmup {
            return;
        }

        if is_weighted_distance(&exercise.normalized_name) {
            if set.weight > 0.0 {
                self.offer_weighted_distance(exercise, set.weight, set.distance, date);
            }
        } else if exercise.category == ExerciseCategory::Cardio {
            if let Some(distance) = set.distance.filter(|d| *d > 0.0) {
                self.offer(exercise, PersonalBestKind::Distance, distance, None, date);
            }
        } else if set.reps > 0 {
            // Bodyweight-assisted lifts only have a calculable load in the
            // extra weight.
            let load = if set.is_bodyweight {
                set.extra_weight.unwrap_or(0.0)
            } else {
                set.weight
            };
            if load > 0.0 {
                let one_rm = estimate_one_rep_max(load, set.reps);
                self.offer(exercise, PersonalBestKind::OneRm, one_rm, None, date);
            }
        }

        // Any held duration competes for the time record regardless of
        // exercise type.
        if let Some(seconds) = set.time_seconds.filter(|s| *s > 0) {
            self.offer(exercise, PersonalBestKind::Time, f64::from(seconds), None, date);
        }
    }

    fn offer(
        &mut self,
        exercise: &StrengthExercise,
        kind: PersonalBestKind,
        value: f64,
        distance: Option<f64>,
        date: NaiveDate,
    ) {
        let key = (exercise.id.clone(), kind);
        match self.best.get_mut(&key) {
            Some(current) if value > current.value => {
                debug!(
                    "New {:?} best for '{}': {} (was {})",
                    kind, exercise.id, value, current.value
                );
                current.previous_best = Some(current.value);
                current.value = value;
                current.distance = distance;
                current.date = date;
            }
            Some(_) => {}
            None => {
                self.best.insert(
                    key,
                    PersonalBest {
                        exercise_id: exercise.id.clone(),
                        exercise_name: exercise.name.clone(),
                        kind,
                        value,
                        distance,
                        previous_best: None,
                        date,
                    },
                );
            }
        }
    }

    /// Weighted-carry ranking: higher weight first, longer distance as
    /// tie-break. Stored under the 1RM key.
    fn offer_weighted_distance(
        &mut self,
        exercise: &StrengthExercise,
        weight: f64,
        distance: Option<f64>,
        date: NaiveDate,
    ) {
        let key = (exercise.id.clone(), PersonalBestKind::OneRm);
        match self.best.get_mut(&key) {
            Some(current) => {
                let better = weight > current.value
                    || (weight == current.value
                        && distance.unwrap_or(0.0) > current.distance.unwrap_or(0.0));
                if better {
                    current.previous_best = Some(current.value);
                    current.value = weight;
                    current.distance = distance;
                    current.date = date;
                }
            }
            None => {
                self.best.insert(
                    key,
                    PersonalBest {
                        exercise_id: exercise.id.clone(),
                        exercise_name: exercise.name.clone(),
                        kind: PersonalBestKind::OneRm,
                        value: weight,
                        distance,
                        previous_best: None,
                        date,
                    },
                );
            }
        }
    }

    /// Drain into a deterministic, sorted record list.
    pub fn into_records(self) -> Vec<PersonalBest> {
        let mut records: Vec<PersonalBest> = self.best.into_values().collect();
        records.sort_by(|a, b| {
            a.exercise_id
                .cmp(&b.exercise_id)
                .then_with(|| format!("{:?}", a.kind).cmp(&format!("{:?}", b.kind)))
        });
        records
    }
}

impl Default for PersonalBestTracker {
    fn default() -> Self {
        Self::new()
    }
}
