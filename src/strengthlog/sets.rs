//! Set-field grammar shared by the legacy format and helpers for the flat
//! formats.
//!
//! The legacy export writes each exercise as `Name: group, group, ...`
//! where a group is `reps x weight`, a clock duration, or a
//! machine-specific positional encoding. The positional semantics per
//! machine family are reverse-engineered from real exports and the known
//! fixtures are the authoritative contract:
//!
//! - rowing / ski erg, 5 fields: `km x kcal x _ x _ x hh:mm:ss`
//! - air bike / elliptical, 3 fields: `km x kcal x time`
//! - stair climber, 3 fields: `floors÷10 x kcal x time`

use crate::duration::parse_duration_seconds;
use crate::strength_model::StrengthSet;
use crate::textutil::parse_number;
use lazy_static::lazy_static;
use log::trace;
use regex::Regex;

lazy_static! {
    static ref ANNOTATION: Regex = Regex::new(r"\s*\([^()]*\)").expect("annotation pattern");
    static ref CLOCK: Regex = Regex::new(r"^\d{1,2}:\d{2}(?::\d{2})?$").expect("clock pattern");
    static ref FIELD_SPLIT: Regex = Regex::new(r"\s*[x×]\s*").expect("field split pattern");
    static ref BODYWEIGHT_TOKEN: Regex =
        Regex::new(r"(?i)^bw\s*(?:([+-])\s*(\d+(?:\.\d+)?))?$").expect("bodyweight token pattern");
}

/// Cardio machine families with positional field encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CardioShape {
    /// 5 fields, distance (km) first, duration last
    Rower,
    /// 3 fields: km, kcal, duration
    KmCalTime,
    /// 3 fields: floors÷10, kcal, duration
    StairClimber,
}

fn cardio_shape(normalized_exercise: &str) -> Option<CardioShape> {
    if normalized_exercise.contains("rowing") || normalized_exercise.contains("ski erg") {
        Some(CardioShape::Rower)
    } else if normalized_exercise.contains("stair") {
        Some(CardioShape::StairClimber)
    } else if normalized_exercise.contains("bike")
        || normalized_exercise.contains("elliptical")
        || normalized_exercise.contains("crosstrainer")
    {
        Some(CardioShape::KmCalTime)
    } else {
        None
    }
}

/// Parse one comma-separated set group from a legacy exercise line.
pub fn parse_set_group(
    normalized_exercise: &str,
    raw: &str,
    set_number: u32,
    bodyweight: Option<f64>,
) -> Result<StrengthSet, String> {
    let cleaned = ANNOTATION.replace_all(raw, "").trim().to_string();
    if cleaned.is_empty() {
        return Err(format!("empty set group '{}'", raw.trim()));
    }

    let mut set = StrengthSet {
        set_number,
        ..Default::default()
    };

    // A bare clock value is a timed hold ("Plank: 00:01:30").
    if CLOCK.is_match(&cleaned) {
        apply_time(&mut set, &cleaned)?;
        set.reps = 1;
        return Ok(set);
    }

    let fields: Vec<&str> = FIELD_SPLIT.split(&cleaned).collect();

    match cardio_shape(normalized_exercise) {
        Some(CardioShape::Rower) if fields.len() == 5 => {
            apply_km(&mut set, fields[0])?;
            apply_calories(&mut set, fields[1]);
            apply_time(&mut set, fields[4])?;
        }
        Some(CardioShape::KmCalTime) if fields.len() == 3 => {
            apply_km(&mut set, fields[0])?;
            apply_calories(&mut set, fields[1]);
            apply_time(&mut set, fields[2])?;
        }
        Some(CardioShape::StairClimber) if fields.len() == 3 => {
            // First field encodes floors divided by ten; a floor count has
            // no metre equivalent, so it lands in reps.
            let floors = parse_number(fields[0])
                .ok_or_else(|| format!("unparseable floor count '{}'", fields[0]))?;
            set.reps = (floors * 10.0).round() as u32;
            apply_calories(&mut set, fields[1]);
            apply_time(&mut set, fields[2])?;
        }
        _ => parse_generic_fields(&mut set, &fields, bodyweight)?,
    }

    set.normalize_distance_reps();
    trace!("Parsed set group '{}' -> {:?}", cleaned, set);
    Ok(set)
}

/// Generic grammar: `reps`, `reps x weight`, `reps x weight x time`,
/// `reps x weight x metres`.
fn parse_generic_fields(
    set: &mut StrengthSet,
    fields: &[&str],
    bodyweight: Option<f64>,
) -> Result<(), String> {
    match fields.len() {
        1 => {
            set.reps = parse_reps(fields[0])?;
        }
        2 => {
            set.reps = parse_reps(fields[0])?;
            apply_weight_token(set, fields[1], bodyweight)?;
        }
        3 => {
            set.reps = parse_reps(fields[0])?;
            apply_weight_token(set, fields[1], bodyweight)?;
            if CLOCK.is_match(fields[2].trim()) {
                apply_time(set, fields[2])?;
            } else {
                let metres = parse_number(fields[2])
                    .ok_or_else(|| format!("unparseable distance '{}'", fields[2]))?;
                set.distance = Some(metres);
                set.distance_unit = Some("m".to_string());
            }
        }
        n => return Err(format!("unexpected field count {} in set group", n)),
    }
    Ok(())
}

fn parse_reps(field: &str) -> Result<u32, String> {
    parse_number(field)
        .filter(|v| *v >= 0.0)
        .map(|v| v.round() as u32)
        .ok_or_else(|| format!("unparseable rep count '{}'", field))
}

/// Weight token: plain number, `BW`, `BW+x` or `BW-x`. With a bodyweight
/// present the set weight defaults to bodyweight plus the extra load.
fn apply_weight_token(
    set: &mut StrengthSet,
    token: &str,
    bodyweight: Option<f64>,
) -> Result<(), String> {
    let token = token.trim();
    if let Some(caps) = BODYWEIGHT_TOKEN.captures(token) {
        set.is_bodyweight = true;
        set.bodyweight = bodyweight;
        let extra = match (caps.get(1), caps.get(2)) {
            (Some(sign), Some(value)) => {
                let magnitude: f64 = value.as_str().parse().map_err(|_| {
                    format!("unparseable extra weight in '{}'", token)
                })?;
                if sign.as_str() == "-" {
                    -magnitude
                } else {
                    magnitude
                }
            }
            _ => 0.0,
        };
        if extra != 0.0 {
            set.extra_weight = Some(extra);
        }
        set.weight = bodyweight.unwrap_or(0.0) + extra;
        return Ok(());
    }
    set.weight =
        parse_number(token).ok_or_else(|| format!("unparseable weight '{}'", token))?;
    Ok(())
}

fn apply_km(set: &mut StrengthSet, field: &str) -> Result<(), String> {
    let km = parse_number(field).ok_or_else(|| format!("unparseable distance '{}'", field))?;
    if km > 0.0 {
        set.distance = Some(km * 1000.0);
        set.distance_unit = Some("m".to_string());
    }
    Ok(())
}

fn apply_calories(set: &mut StrengthSet, field: &str) {
    if let Some(calories) = parse_number(field).filter(|c| *c > 0.0) {
        set.calories = Some(calories);
    }
}

fn apply_time(set: &mut StrengthSet, field: &str) -> Result<(), String> {
    let field = field.trim();
    let seconds =
        parse_duration_seconds(field).ok_or_else(|| format!("unparseable time '{}'", field))?;
    if seconds > 0 {
        set.time = Some(field.to_string());
        set.time_seconds = Some(seconds);
    }
    Ok(())
}

/// Kilometre values convert to metres and merge additively with any
/// separately given metre value.
pub fn combine_distance_metres(
    value: Option<f64>,
    unit: Option<&str>,
    extra_metres: Option<f64>,
) -> Option<f64> {
    let base = value.map(|v| match unit.map(str::to_lowercase).as_deref() {
        Some("km") => v * 1000.0,
        _ => v,
    });
    match (base, extra_metres) {
        (Some(b), Some(e)) => Some(b + e),
        (Some(b), None) => Some(b),
        (None, Some(e)) => Some(e),
        (None, None) => None,
    }
}
