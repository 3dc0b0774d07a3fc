//! New flat StrengthLog CSV: one row per set, header starting
//! `workout,start,end`, workouts grouped by (start, workout name).
//!
//! Columns are resolved by header name, not position, because the export
//! has shipped with a duplicate `calories` column (set-level and
//! workout-level). Duplicates are flagged as a soft error and the first
//! occurrence is used, never a silent positional guess.

use super::sets::combine_distance_metres;
use super::ImportBuilder;
use crate::duration::parse_duration_seconds;
use crate::strength_model::{StrengthImport, StrengthSet, WorkoutSource};
use crate::textutil::{parse_number, split_csv_line};
use chrono::{NaiveDate, NaiveDateTime};
use log::{debug, warn};
use std::collections::HashMap;

pub fn parse(content: &str, user_id: &str) -> StrengthImport {
    let mut builder = ImportBuilder::new(user_id);
    let mut lines = content.lines().enumerate();

    let Some((_, header_line)) = lines.next() else {
        return builder.finish();
    };
    let columns = HeaderIndex::new(header_line, &mut builder);

    let mut current_key: Option<(String, String)> = None;
    for (line_number, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        let fields = split_csv_line(line);

        let workout_name = columns.get(&fields, "workout").unwrap_or_default();
        let start = columns.get(&fields, "start").unwrap_or_default();
        let Some(exercise) = columns.get(&fields, "exercise").filter(|e| !e.is_empty()) else {
            builder.soft_error(line_number, "row without exercise name");
            continue;
        };

        let key = (start.clone(), workout_name.clone());
        if current_key.as_ref() != Some(&key) {
            let Some(date) = parse_start_date(&start) else {
                builder.soft_error(line_number, format!("unparseable start '{}'", start));
                continue;
            };
            builder.start_workout(date, &workout_name, WorkoutSource::StrengthlogFlat);
            apply_workout_metadata(&mut builder, &columns, &fields);
            current_key = Some(key);
        }

        match parse_set_row(&columns, &fields) {
            Ok(set) => builder.add_set(&exercise, set),
            Err(message) => builder.soft_error(line_number, message),
        }
    }

    builder.finish()
}

/// Case-sensitive header-name to first-column-index map.
struct HeaderIndex {
    by_name: HashMap<String, usize>,
}

impl HeaderIndex {
    fn new(header_line: &str, builder: &mut ImportBuilder) -> Self {
        let mut by_name = HashMap::new();
        for (idx, name) in split_csv_line(header_line).into_iter().enumerate() {
            if let Some(first) = by_name.insert(name.clone(), idx) {
                // Keep the first occurrence; the insert above replaced it.
                by_name.insert(name.clone(), first);
                warn!("Duplicate column '{}' at indices {} and {}", name, first, idx);
                builder.errors.push(format!(
                    "header: duplicate column '{}' (using index {})",
                    name, first
                ));
            }
        }
        debug!("Flat header with {} column(s)", by_name.len());
        Self { by_name }
    }

    fn get(&self, fields: &[String], name: &str) -> Option<String> {
        self.by_name
            .get(name)
            .and_then(|&idx| fields.get(idx))
            .filter(|f| !f.is_empty())
            .cloned()
    }

    fn number(&self, fields: &[String], name: &str) -> Option<f64> {
        self.get(fields, name).as_deref().and_then(parse_number)
    }
}

fn parse_start_date(start: &str) -> Option<NaiveDate> {
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(start, format) {
            return Some(dt.date());
        }
    }
    NaiveDate::parse_from_str(start, "%Y-%m-%d").ok()
}

/// Session metadata is repeated on every row of a group; the first row of
/// the group wins.
fn apply_workout_metadata(builder: &mut ImportBuilder, columns: &HeaderIndex, fields: &[String]) {
    let body_weight = columns.number(fields, "bodyWeight");
    let shape = columns.number(fields, "shape");
    let sleep = columns.number(fields, "sleep");
    let stress = columns.number(fields, "stress");
    let notes = columns.get(fields, "note");
    if let Some(workout) = builder.current_mut() {
        workout.body_weight = body_weight;
        workout.shape = shape;
        workout.sleep = sleep;
        workout.stress = stress;
        workout.notes = notes;
    }
}

fn parse_set_row(columns: &HeaderIndex, fields: &[String]) -> Result<StrengthSet, String> {
    let mut set = StrengthSet {
        set_number: columns.number(fields, "set").map_or(0, |v| v as u32),
        reps: columns.number(fields, "reps").map_or(0, |v| v.round() as u32),
        ..Default::default()
    };

    let explicit_weight = columns.number(fields, "weight");
    let bodyweight = columns.number(fields, "bodyweight");
    let extra_weight = columns.number(fields, "extraWeight");
    if let Some(bw) = bodyweight {
        set.is_bodyweight = true;
        set.bodyweight = Some(bw);
        set.extra_weight = extra_weight;
        // Bodyweight plus extra load unless an explicit weight was given.
        set.weight = explicit_weight.unwrap_or(bw + extra_weight.unwrap_or(0.0));
    } else {
        set.weight = explicit_weight.unwrap_or(0.0);
        set.extra_weight = extra_weight;
    }

    let distance = columns.number(fields, "distance");
    let unit = columns.get(fields, "distanceUnit");
    let extra_metres = columns.number(fields, "distanceMeters");
    if let Some(metres) = combine_distance_metres(distance, unit.as_deref(), extra_metres) {
        if metres > 0.0 {
            set.distance = Some(metres);
            set.distance_unit = Some("m".to_string());
        }
    }

    if let Some(time) = columns.get(fields, "time") {
        match parse_duration_seconds(&time) {
            Some(seconds) if seconds > 0 => {
                set.time = Some(time);
                set.time_seconds = Some(seconds);
            }
            Some(_) => {}
            None => return Err(format!("unparseable time '{}'", time)),
        }
    }

    set.calories = columns.number(fields, "calories");
    set.rpm = columns.number(fields, "rpm");
    set.rpe = columns.number(fields, "rpe");
    set.tempo = columns.get(fields, "tempo");
    set.is_warmup = matches!(
        columns.get(fields, "warmup").as_deref(),
        Some("1") | Some("true") | Some("yes")
    );

    if set.reps == 0 && set.weight == 0.0 && set.distance.is_none() && set.time_seconds.is_none() {
        return Err("empty set row".to_string());
    }

    set.normalize_distance_reps();
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "workout,start,end,note,bodyWeight,shape,sleep,stress,exercise,set,reps,weight,bodyweight,extraWeight,distance,distanceUnit,distanceMeters,time,rpm,rpe,warmup,tempo,calories,calories";

    fn export(rows: &[&str]) -> String {
        let mut out = String::from(HEADER);
        for row in rows {
            out.push('\n');
            out.push_str(row);
        }
        out
    }

    #[test]
    fn test_grouping_by_start_and_name() {
        let content = export(&[
            "Push,2024-03-02 17:30,2024-03-02 18:30,,80,,,,Bench Press,1,10,60,,,,,,,,,,,",
            "Push,2024-03-02 17:30,2024-03-02 18:30,,80,,,,Bench Press,2,8,70,,,,,,,,,,,",
            "Pull,2024-03-04 17:30,2024-03-04 18:45,,80,,,,Barbell Row,1,10,50,,,,,,,,,,,",
        ]);
        let import = parse(&content, "u1");

        assert_eq!(import.workouts.len(), 2);
        assert_eq!(import.workouts[0].name, "Push");
        assert_eq!(import.workouts[0].exercises[0].sets.len(), 2);
        assert_eq!(
            import.workouts[0].date,
            NaiveDate::from_ymd_opt(2024, 3, 2).unwrap()
        );
        assert_eq!(import.workouts[1].name, "Pull");
    }

    #[test]
    fn test_duplicate_calories_header_flagged() {
        let content = export(&[]);
        let import = parse(&content, "u1");
        assert!(import
            .errors
            .iter()
            .any(|e| e.contains("duplicate column 'calories'")));
    }

    #[test]
    fn test_bodyweight_defaulting() {
        let content = export(&[
            "Pull,2024-03-04 17:30,,,80,,,,Pull ups,1,8,,80,10,,,,,,,,,,",
        ]);
        let import = parse(&content, "u1");
        let set = &import.workouts[0].exercises[0].sets[0];
        assert!(set.is_bodyweight);
        assert_eq!(set.weight, 90.0);
        assert_eq!(set.extra_weight, Some(10.0));
    }

    #[test]
    fn test_km_and_metres_merged() {
        let content = export(&[
            "Cardio,2024-03-05 08:00,,,,,,,Rowing (Machine),1,0,,,,2,km,500,00:09:30,,,,,,",
        ]);
        let import = parse(&content, "u1");
        let set = &import.workouts[0].exercises[0].sets[0];
        assert_eq!(set.distance, Some(2500.0));
        assert_eq!(set.reps, 1);
        assert_eq!(set.time_seconds, Some(570));
    }

    #[test]
    fn test_warmup_flag() {
        let content = export(&[
            "Push,2024-03-02 17:30,,,,,,,Bench Press,1,10,40,,,,,,,,,1,,,",
        ]);
        let import = parse(&content, "u1");
        assert!(import.workouts[0].exercises[0].sets[0].is_warmup);
    }

    #[test]
    fn test_bad_row_is_soft_error() {
        let content = export(&[
            "Push,not-a-date,,,,,,,Bench Press,1,10,60,,,,,,,,,,,,",
            "Push,2024-03-02 17:30,,,,,,,Bench Press,1,10,60,,,,,,,,,,,,",
        ]);
        let import = parse(&content, "u1");
        assert_eq!(import.workouts.len(), 1);
        assert!(import.errors.iter().any(|e| e.contains("not-a-date")));
    }
}
