//! Legacy StrengthLog export: a metadata preamble, a required `Workouts`
//! section marker, then workout rows (date-shaped second column) each
//! followed by `Exercise: set, set, ...` lines.

use super::sets::parse_set_group;
use super::{ImportBuilder, StrengthLogError};
use crate::strength_model::{StrengthImport, WorkoutSource};
use crate::textutil::{normalize_exercise_name, parse_number, split_csv_line};
use chrono::NaiveDate;
use log::debug;

pub fn parse(content: &str, user_id: &str) -> Result<StrengthImport, StrengthLogError> {
    let lines: Vec<&str> = content.lines().collect();
    let marker = lines
        .iter()
        .position(|line| line.trim().trim_matches('"') == "Workouts")
        .ok_or(StrengthLogError::MissingWorkoutsSection)?;

    let mut builder = ImportBuilder::new(user_id);
    parse_preamble(&lines[..marker], &mut builder);

    for (offset, raw_line) in lines[marker + 1..].iter().enumerate() {
        let line_number = marker + 1 + offset;
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        let fields = split_csv_line(line);
        if let Some(date) = workout_row_date(&fields) {
            start_workout(&mut builder, &fields, date);
        } else if let Some((name, set_list)) = exercise_row(line) {
            parse_exercise_row(&mut builder, line_number, &name, &set_list);
        } else {
            builder.soft_error(line_number, format!("unrecognized row '{}'", line));
        }
    }

    Ok(builder.finish())
}

/// Rows before the `Workouts` marker: `Name,<user>` and `Body weight,<kg>`.
/// Unknown preamble rows are ignored.
fn parse_preamble(lines: &[&str], builder: &mut ImportBuilder) {
    for line in lines {
        let fields = split_csv_line(line.trim());
        if fields.len() < 2 {
            continue;
        }
        match fields[0].to_lowercase().as_str() {
            "name" => builder.user_info.name = Some(fields[1].clone()),
            "body weight" | "bodyweight" => {
                builder.user_info.body_weight = parse_number(&fields[1]);
            }
            _ => {}
        }
    }
}

/// A workout boundary is a row with a date-shaped second column.
fn workout_row_date(fields: &[String]) -> Option<NaiveDate> {
    if fields.len() < 2 {
        return None;
    }
    NaiveDate::parse_from_str(fields[1].trim(), "%Y-%m-%d").ok()
}

/// Workout row layout: name, date, body weight, shape, sleep, stress, notes.
fn start_workout(builder: &mut ImportBuilder, fields: &[String], date: NaiveDate) {
    builder.start_workout(date, &fields[0], WorkoutSource::StrengthlogLegacy);
    let workout = builder.current_mut().expect("workout just started");
    workout.body_weight = fields.get(2).and_then(|f| parse_number(f));
    workout.shape = fields.get(3).and_then(|f| parse_number(f));
    workout.sleep = fields.get(4).and_then(|f| parse_number(f));
    workout.stress = fields.get(5).and_then(|f| parse_number(f));
    workout.notes = fields.get(6).filter(|f| !f.is_empty()).cloned();
}

/// An exercise row is `Name: set, set, ...`, possibly quoted as a whole.
fn exercise_row(line: &str) -> Option<(String, String)> {
    let unquoted = line.trim().trim_matches('"');
    let (name, set_list) = unquoted.split_once(':')?;
    let name = name.trim();
    // Clock values also contain ':'; an exercise name never starts with a
    // digit.
    if name.is_empty() || name.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        return None;
    }
    Some((name.to_string(), set_list.trim().to_string()))
}

fn parse_exercise_row(builder: &mut ImportBuilder, line_number: usize, name: &str, set_list: &str) {
    if builder.current_mut().is_none() {
        builder.soft_error(line_number, format!("exercise '{}' before any workout", name));
        return;
    }

    let normalized = normalize_exercise_name(name);
    let bodyweight = builder
        .current_mut()
        .and_then(|w| w.body_weight)
        .or(builder.user_info.body_weight);

    debug!("Exercise row '{}' with sets '{}'", name, set_list);
    let mut set_number = 0;
    for group in set_list.split(',') {
        if group.trim().is_empty() {
            continue;
        }
        set_number += 1;
        match parse_set_group(&normalized, group, set_number, bodyweight) {
            Ok(set) => builder.add_set(name, set),
            Err(message) => {
                builder.soft_error(line_number, format!("{}: {}", name, message));
                set_number -= 1;
            }
        }
    }
}
