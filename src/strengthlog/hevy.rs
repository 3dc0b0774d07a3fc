//! Hevy CSV export: fully quoted columns, one row per set, workouts
//! grouped by (start_time, title).

use super::ImportBuilder;
use crate::duration::format_duration_seconds;
use crate::strength_model::{StrengthImport, StrengthSet, WorkoutSource};
use crate::textutil::{parse_number, split_csv_line};
use chrono::{NaiveDate, NaiveDateTime};
use log::debug;
use std::collections::HashMap;

pub fn parse(content: &str, user_id: &str) -> StrengthImport {
    let mut builder = ImportBuilder::new(user_id);
    let mut lines = content.lines().enumerate();

    let Some((_, header_line)) = lines.next() else {
        return builder.finish();
    };
    let columns: HashMap<String, usize> = split_csv_line(header_line)
        .into_iter()
        .enumerate()
        .map(|(idx, name)| (name, idx))
        .collect();
    debug!("Hevy header with {} column(s)", columns.len());

    let get = |fields: &[String], name: &str| -> Option<String> {
        columns
            .get(name)
            .and_then(|&idx| fields.get(idx))
            .filter(|f| !f.is_empty())
            .cloned()
    };

    let mut current_key: Option<(String, String)> = None;
    for (line_number, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        let fields = split_csv_line(line);

        let title = get(&fields, "title").unwrap_or_default();
        let start_time = get(&fields, "start_time").unwrap_or_default();
        let Some(exercise) = get(&fields, "exercise_title") else {
            builder.soft_error(line_number, "row without exercise_title");
            continue;
        };

        let key = (start_time.clone(), title.clone());
        if current_key.as_ref() != Some(&key) {
            let Some(date) = parse_hevy_date(&start_time) else {
                builder.soft_error(
                    line_number,
                    format!("unparseable start_time '{}'", start_time),
                );
                continue;
            };
            builder.start_workout(date, &title, WorkoutSource::Hevy);
            if let Some(workout) = builder.current_mut() {
                workout.notes = get(&fields, "description");
            }
            current_key = Some(key);
        }

        let mut set = StrengthSet {
            set_number: get(&fields, "set_index")
                .as_deref()
                .and_then(parse_number)
                .map_or(0, |v| v as u32 + 1),
            reps: get(&fields, "reps")
                .as_deref()
                .and_then(parse_number)
                .map_or(0, |v| v.round() as u32),
            weight: get(&fields, "weight_kg")
                .as_deref()
                .and_then(parse_number)
                .unwrap_or(0.0),
            is_warmup: get(&fields, "set_type").as_deref() == Some("warmup"),
            rpe: get(&fields, "rpe").as_deref().and_then(parse_number),
            ..Default::default()
        };

        if let Some(km) = get(&fields, "distance_km").as_deref().and_then(parse_number) {
            if km > 0.0 {
                set.distance = Some(km * 1000.0);
                set.distance_unit = Some("m".to_string());
            }
        }
        if let Some(seconds) = get(&fields, "duration_seconds")
            .as_deref()
            .and_then(parse_number)
            .filter(|s| *s > 0.0)
        {
            set.time_seconds = Some(seconds as u32);
            set.time = Some(format_duration_seconds(seconds as u32));
        }

        set.normalize_distance_reps();
        builder.add_set(&exercise, set);
    }

    builder.finish()
}

fn parse_hevy_date(start_time: &str) -> Option<NaiveDate> {
    // Hevy writes "27 Mar 2024, 18:00".
    if let Ok(dt) = NaiveDateTime::parse_from_str(start_time, "%d %b %Y, %H:%M") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(start_time, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "\"title\",\"start_time\",\"end_time\",\"description\",\"exercise_title\",\"superset_id\",\"exercise_notes\",\"set_index\",\"set_type\",\"weight_kg\",\"reps\",\"distance_km\",\"duration_seconds\",\"rpe\"";

    fn export(rows: &[&str]) -> String {
        let mut out = String::from(HEADER);
        for row in rows {
            out.push('\n');
            out.push_str(row);
        }
        out
    }

    #[test]
    fn test_basic_workout() {
        let content = export(&[
            "\"Push\",\"27 Mar 2024, 18:00\",\"27 Mar 2024, 19:00\",\"\",\"Bench Press (Barbell)\",\"\",\"\",\"0\",\"warmup\",\"40\",\"12\",\"\",\"\",\"\"",
            "\"Push\",\"27 Mar 2024, 18:00\",\"27 Mar 2024, 19:00\",\"\",\"Bench Press (Barbell)\",\"\",\"\",\"1\",\"normal\",\"80\",\"8\",\"\",\"\",\"8.5\"",
        ]);
        let import = parse(&content, "u1");

        assert_eq!(import.workouts.len(), 1);
        let workout = &import.workouts[0];
        assert_eq!(workout.name, "Push");
        assert_eq!(workout.date, NaiveDate::from_ymd_opt(2024, 3, 27).unwrap());

        let sets = &workout.exercises[0].sets;
        assert_eq!(sets.len(), 2);
        assert!(sets[0].is_warmup);
        assert_eq!(sets[0].set_number, 1);
        assert_eq!(sets[1].weight, 80.0);
        assert_eq!(sets[1].rpe, Some(8.5));
    }

    #[test]
    fn test_cardio_row_converts_km_and_seconds() {
        let content = export(&[
            "\"Morning run\",\"28 Mar 2024, 07:00\",\"\",\"\",\"Running\",\"\",\"\",\"0\",\"normal\",\"\",\"0\",\"5.2\",\"1800\",\"\"",
        ]);
        let import = parse(&content, "u1");
        let set = &import.workouts[0].exercises[0].sets[0];
        assert_eq!(set.distance, Some(5200.0));
        assert_eq!(set.time_seconds, Some(1800));
        assert_eq!(set.time.as_deref(), Some("30:00"));
        assert_eq!(set.reps, 1);
    }

    #[test]
    fn test_two_workouts_split_on_start_time() {
        let content = export(&[
            "\"Push\",\"27 Mar 2024, 18:00\",\"\",\"\",\"Bench Press (Barbell)\",\"\",\"\",\"0\",\"normal\",\"80\",\"8\",\"\",\"\",\"\"",
            "\"Push\",\"29 Mar 2024, 18:00\",\"\",\"\",\"Bench Press (Barbell)\",\"\",\"\",\"0\",\"normal\",\"82.5\",\"8\",\"\",\"\",\"\"",
        ]);
        let import = parse(&content, "u1");
        assert_eq!(import.workouts.len(), 2);
    }

    #[test]
    fn test_personal_best_from_hevy_sets() {
        let content = export(&[
            "\"Push\",\"27 Mar 2024, 18:00\",\"\",\"\",\"Bench Press (Barbell)\",\"\",\"\",\"0\",\"normal\",\"80\",\"8\",\"\",\"\",\"\"",
            "\"Push\",\"29 Mar 2024, 18:00\",\"\",\"\",\"Bench Press (Barbell)\",\"\",\"\",\"0\",\"normal\",\"85\",\"8\",\"\",\"\",\"\"",
        ]);
        let import = parse(&content, "u1");
        assert_eq!(import.personal_bests.len(), 1);
        let best = &import.personal_bests[0];
        assert!(best.previous_best.is_some());
        assert!(best.value > best.previous_best.unwrap());
    }
}
