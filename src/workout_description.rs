//! # Workout-Description Parser
//!
//! Turns free-form written interval-training descriptions
//! ("5x1000m @ 4:00 vila 90s") into an ordered [`WorkoutSegment`]
//! sequence plus a coarse classification used to pre-fill a structured
//! planning form.
//!
//! ## Pipeline
//!
//! 1. Normalize each line: strip emoji, standardize dashes and
//!    multiplication signs, collapse whitespace, lowercase.
//! 2. Classify each line's role (warmup / interval / rest / cooldown) by
//!    keyword.
//! 3. Extract repeat counts, work distance/duration and pace targets from
//!    interval lines; recovery comes inline, from a following rest line,
//!    or from a trailing standalone rest line.
//! 4. Expand variable-list recoveries whose length matches the repeat
//!    count into single-repetition segments. This is the one
//!    normalization downstream consumers may rely on.

use crate::duration::parse_duration_seconds;
use crate::textutil::collapse_whitespace;
use lazy_static::lazy_static;
use log::{debug, trace};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Plausible running-pace bounds in seconds per km; matches outside this
/// range are not paces.
const PACE_MIN_SECONDS: u32 = 120;
const PACE_MAX_SECONDS: u32 = 900;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SegmentKind {
    Warmup,
    Interval,
    Rest,
    Cooldown,
}

/// Pace target in seconds per km, either steady or progressive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum PaceTarget {
    Fixed { seconds_per_km: u32 },
    Progressive { from_seconds: u32, to_seconds: u32 },
}

/// The work portion of a segment: distance and/or duration and/or pace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_meters: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pace: Option<PaceTarget>,
}

impl WorkSpec {
    fn is_empty(&self) -> bool {
        self.distance_meters.is_none() && self.duration_seconds.is_none()
    }
}

/// Recovery between repetitions: a fixed distance, a fixed duration, or a
/// per-repetition list of values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Recovery {
    Distance { meters: f64 },
    Duration { seconds: u32 },
    VariableList { values: Vec<f64>, unit: RecoveryUnit },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecoveryUnit {
    Meters,
    Seconds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSegment {
    #[serde(rename = "type")]
    pub kind: SegmentKind,
    pub reps: u32,
    pub work: WorkSpec,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recovery: Option<Recovery>,
    /// Source line, kept for traceability
    pub original_string: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WorkoutKind {
    Intervals,
    Distance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrainingType {
    Interval,
    LongRun,
    Tempo,
    Default,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedWorkout {
    pub segments: Vec<WorkoutSegment>,
    pub workout_kind: WorkoutKind,
    pub training_type: TrainingType,
}

lazy_static! {
    static ref EMOJI: Regex =
        Regex::new(r"[\u{1F000}-\u{1FAFF}\u{2600}-\u{27BF}\u{2B00}-\u{2BFF}\u{FE0F}]")
            .expect("emoji pattern");
    static ref REPEAT_COUNT: Regex = Regex::new(r"(\d+)\s*x\s*").expect("repeat pattern");
    static ref WORK_DISTANCE: Regex =
        Regex::new(r"(\d+(?:\.\d+)?)\s*(km|m)\b").expect("work distance pattern");
    static ref WORK_DURATION: Regex =
        Regex::new(r"(\d+(?:\.\d+)?)\s*min\b|(\d+)\s*(?:sek|s)\b").expect("work duration pattern");
    static ref PACE: Regex = Regex::new(
        r"(?:@\s*(\d{1,2}:\d{2})(?:\s*->\s*(\d{1,2}:\d{2}))?|(\d{1,2}:\d{2})(?:\s*->\s*(\d{1,2}:\d{2}))?\s*/\s*km)"
    )
    .expect("pace pattern");
    static ref RECOVERY_INLINE: Regex =
        Regex::new(r"\b(?:vila|rest|paus)\b\s*:?\s*(.+)$").expect("recovery pattern");
    static ref VARIABLE_LIST: Regex = Regex::new(
        r"^(\d+(?:\.\d+)?(?:\s*,\s*\d+(?:\.\d+)?)+)\s*(min|sek|s|m)?\b"
    )
    .expect("variable list pattern");
    static ref FIXED_RECOVERY: Regex =
        Regex::new(r"(\d+(?:\.\d+)?)\s*(min|sek|s|km|m)\b").expect("fixed recovery pattern");
    static ref BARE_ITEM_LIST: Regex = Regex::new(
        r"^\s*\d+(?:\.\d+)?\s*(?:min|sek|s|km|m)(?:\s*,\s*\d+(?:\.\d+)?\s*(?:min|sek|s|km|m))+\s*$"
    )
    .expect("bare item list pattern");
    static ref BARE_ITEM: Regex =
        Regex::new(r"(\d+(?:\.\d+)?)\s*(min|sek|s|km|m)").expect("bare item pattern");
}

const WARMUP_KEYWORDS: [&str; 5] = ["uppvärmning", "uppv", "warmup", "warm up", "wu"];
const COOLDOWN_KEYWORDS: [&str; 6] =
    ["nedvarvning", "nedjogg", "cooldown", "cool down", "cd", "utjogg"];
const REST_KEYWORDS: [&str; 3] = ["vila", "rest", "paus"];

/// Parse a free-form session description into ordered segments.
pub fn parse_workout(title: &str, description: &str) -> ParsedWorkout {
    let mut segments = Vec::new();

    let lines: Vec<String> = description
        .lines()
        .map(normalize_line)
        .filter(|l| !l.is_empty())
        .collect();
    debug!("Parsing workout description with {} line(s)", lines.len());

    let mut i = 0;
    while i < lines.len() {
        let line = &lines[i];
        match classify_line(line) {
            SegmentKind::Warmup => {
                segments.push(WorkoutSegment {
                    kind: SegmentKind::Warmup,
                    reps: 1,
                    work: extract_work(line),
                    recovery: None,
                    original_string: line.clone(),
                });
            }
            SegmentKind::Cooldown => {
                segments.push(WorkoutSegment {
                    kind: SegmentKind::Cooldown,
                    reps: 1,
                    work: extract_work(line),
                    recovery: None,
                    original_string: line.clone(),
                });
            }
            SegmentKind::Rest => {
                // Standalone rest line not consumed by look-ahead: merge
                // into the preceding segment's recovery.
                if let Some(previous) = segments.last_mut() {
                    if previous.recovery.is_none() {
                        previous.recovery = parse_recovery(line);
                    }
                } else {
                    trace!("Dropping leading rest line '{}'", line);
                }
            }
            SegmentKind::Interval => {
                // Comma-separated lists of bare durations/distances
                // ("1min, 2min, 3min") don't fit the repeat-count
                // grammar; treat the line as a flat sequence of
                // single-repetition efforts.
                if BARE_ITEM_LIST.is_match(line) {
                    segments.extend(parse_bare_item_list(line));
                    i += 1;
                    continue;
                }
                let mut segment = parse_interval_line(line);
                if segment.recovery.is_none() {
                    // Look ahead: a following rest line belongs to this
                    // segment.
                    if let Some(next) = lines.get(i + 1) {
                        if classify_line(next) == SegmentKind::Rest {
                            segment.recovery = parse_recovery(next);
                            i += 1;
                        }
                    }
                }
                if !segment.work.is_empty() || segment.reps > 1 {
                    segments.push(segment);
                } else {
                    trace!("Skipping line without workload: '{}'", line);
                }
            }
        }
        i += 1;
    }

    segments = expand_variable_lists(segments);
    classify(title, description, segments)
}

/// Strip emoji, standardize dashes/multiplication signs and unit spelling,
/// collapse whitespace, lowercase.
fn normalize_line(line: &str) -> String {
    let mut out = EMOJI.replace_all(line, " ").to_lowercase();
    out = out
        .replace(['–', '—'], "-")
        .replace(['×', '*'], "x")
        .replace('→', "->")
        .replace("meter", "m")
        .replace("minuter", "min")
        .replace("sekunder", "sek");
    collapse_whitespace(&out)
}

fn classify_line(line: &str) -> SegmentKind {
    if WARMUP_KEYWORDS.iter().any(|kw| line.contains(kw)) {
        return SegmentKind::Warmup;
    }
    if COOLDOWN_KEYWORDS.iter().any(|kw| line.contains(kw)) {
        return SegmentKind::Cooldown;
    }
    // A rest line leads with a rest keyword; an interval line mentioning
    // "vila" inline is still an interval.
    if REST_KEYWORDS.iter().any(|kw| line.starts_with(kw)) {
        return SegmentKind::Rest;
    }
    SegmentKind::Interval
}

fn parse_interval_line(line: &str) -> WorkoutSegment {
    let reps = REPEAT_COUNT
        .captures(line)
        .and_then(|c| c[1].parse().ok())
        .unwrap_or(1);

    // Work is extracted from the part before any inline recovery clause.
    let (work_part, recovery_part) = match RECOVERY_INLINE.captures(line) {
        Some(caps) => {
            let clause_start = caps.get(0).map_or(line.len(), |m| m.start());
            (&line[..clause_start], Some(caps[1].to_string()))
        }
        None => (line, None),
    };

    let work = extract_work(work_part);
    let recovery = recovery_part.as_deref().and_then(parse_recovery_spec);

    trace!("Interval line '{}': reps={}, work={:?}", line, reps, work);
    WorkoutSegment {
        kind: SegmentKind::Interval,
        reps,
        work,
        recovery,
        original_string: line.to_string(),
    }
}

/// Work distance/duration/pace from a (possibly repeat-counted) line
/// fragment. The value right after "Nx" is the per-repetition workload.
fn extract_work(fragment: &str) -> WorkSpec {
    let mut work = WorkSpec::default();

    // The repeat-count "5x" prefix is skipped so its number is not read as
    // the workload.
    let after_reps = match REPEAT_COUNT.find(fragment) {
        Some(m) => &fragment[m.end()..],
        None => fragment,
    };

    let pace_span = PACE.find(after_reps).map(|m| (m.start(), m.end()));
    let without_pace = match pace_span {
        Some((start, _)) => &after_reps[..start],
        None => after_reps,
    };

    if let Some(caps) = WORK_DISTANCE.captures(without_pace) {
        if let Ok(value) = caps[1].parse::<f64>() {
            work.distance_meters = Some(match &caps[2] {
                "km" => value * 1000.0,
                _ => value,
            });
        }
    }
    if work.distance_meters.is_none() {
        if let Some(caps) = WORK_DURATION.captures(without_pace) {
            if let Some(minutes) = caps.get(1) {
                if let Ok(value) = minutes.as_str().parse::<f64>() {
                    work.duration_seconds = Some((value * 60.0).round() as u32);
                }
            } else if let Some(seconds) = caps.get(2) {
                work.duration_seconds = seconds.as_str().parse().ok();
            }
        }
    }
    work.pace = extract_pace(after_reps);
    work
}

/// Pace targets: "@ 4:00", "4:00/km", progressive "4:00->3:45". Values
/// outside the plausible running range are rejected.
fn extract_pace(fragment: &str) -> Option<PaceTarget> {
    let caps = PACE.captures(fragment)?;
    let from = caps
        .get(1)
        .or_else(|| caps.get(3))
        .and_then(|m| parse_pace_seconds(m.as_str()))?;
    let to = caps
        .get(2)
        .or_else(|| caps.get(4))
        .and_then(|m| parse_pace_seconds(m.as_str()));
    Some(match to {
        Some(to_seconds) => PaceTarget::Progressive {
            from_seconds: from,
            to_seconds,
        },
        None => PaceTarget::Fixed {
            seconds_per_km: from,
        },
    })
}

fn parse_pace_seconds(clock: &str) -> Option<u32> {
    let seconds = parse_duration_seconds(clock)?;
    if (PACE_MIN_SECONDS..=PACE_MAX_SECONDS).contains(&seconds) {
        Some(seconds)
    } else {
        trace!("Rejecting implausible pace {} s/km", seconds);
        None
    }
}

/// Recovery from a rest line ("vila 90s") or a bare spec ("90s").
fn parse_recovery(line: &str) -> Option<Recovery> {
    match RECOVERY_INLINE.captures(line) {
        Some(caps) => parse_recovery_spec(&caps[1]),
        None => parse_recovery_spec(line),
    }
}

/// Three recovery shapes: fixed distance, fixed duration, or a variable
/// list whose unit is inferred from context (seconds when an explicit
/// "s"/"sek"/"min" marker is present, metres otherwise).
fn parse_recovery_spec(spec: &str) -> Option<Recovery> {
    let spec = spec.trim();

    if let Some(caps) = VARIABLE_LIST.captures(spec) {
        let values: Vec<f64> = caps[1]
            .split(',')
            .filter_map(|v| v.trim().parse().ok())
            .collect();
        if values.len() > 1 {
            let unit = match caps.get(2).map(|m| m.as_str()) {
                Some("s") | Some("sek") => RecoveryUnit::Seconds,
                Some("min") => {
                    return Some(Recovery::VariableList {
                        values: values.iter().map(|v| v * 60.0).collect(),
                        unit: RecoveryUnit::Seconds,
                    })
                }
                _ => RecoveryUnit::Meters,
            };
            return Some(Recovery::VariableList { values, unit });
        }
    }

    if let Some(seconds) = parse_duration_seconds(spec) {
        return Some(Recovery::Duration { seconds });
    }

    if let Some(caps) = FIXED_RECOVERY.captures(spec) {
        let value: f64 = caps[1].parse().ok()?;
        return Some(match &caps[2] {
            "min" => Recovery::Duration {
                seconds: (value * 60.0).round() as u32,
            },
            "s" | "sek" => Recovery::Duration {
                seconds: value.round() as u32,
            },
            "km" => Recovery::Distance {
                meters: value * 1000.0,
            },
            _ => Recovery::Distance { meters: value },
        });
    }
    None
}

/// "1min, 2min, 3min" as a flat sequence of single-repetition efforts.
fn parse_bare_item_list(line: &str) -> Vec<WorkoutSegment> {
    BARE_ITEM
        .captures_iter(line)
        .filter_map(|caps| {
            let value: f64 = caps[1].parse().ok()?;
            let mut work = WorkSpec::default();
            match &caps[2] {
                "min" => work.duration_seconds = Some((value * 60.0).round() as u32),
                "s" | "sek" => work.duration_seconds = Some(value.round() as u32),
                "km" => work.distance_meters = Some(value * 1000.0),
                _ => work.distance_meters = Some(value),
            }
            Some(WorkoutSegment {
                kind: SegmentKind::Interval,
                reps: 1,
                work,
                recovery: None,
                original_string: line.to_string(),
            })
        })
        .collect()
}

/// Expand segments whose variable-list recovery length matches the repeat
/// count into single-repetition segments, one scalar recovery each, in
/// list order.
fn expand_variable_lists(segments: Vec<WorkoutSegment>) -> Vec<WorkoutSegment> {
    let mut out = Vec::with_capacity(segments.len());
    for segment in segments {
        match &segment.recovery {
            Some(Recovery::VariableList { values, unit })
                if segment.reps as usize == values.len() =>
            {
                debug!(
                    "Expanding variable-list segment into {} single-rep segments",
                    values.len()
                );
                for value in values {
                    let scalar = match unit {
                        RecoveryUnit::Seconds => Recovery::Duration {
                            seconds: value.round() as u32,
                        },
                        RecoveryUnit::Meters => Recovery::Distance { meters: *value },
                    };
                    out.push(WorkoutSegment {
                        kind: segment.kind,
                        reps: 1,
                        work: segment.work,
                        recovery: Some(scalar),
                        original_string: segment.original_string.clone(),
                    });
                }
            }
            _ => out.push(segment),
        }
    }
    out
}

fn classify(title: &str, description: &str, segments: Vec<WorkoutSegment>) -> ParsedWorkout {
    let interval_count = segments
        .iter()
        .filter(|s| s.kind == SegmentKind::Interval)
        .count();
    let has_repeats = segments.iter().any(|s| s.reps > 1);
    let workout_kind = if interval_count > 1 || has_repeats {
        WorkoutKind::Intervals
    } else {
        WorkoutKind::Distance
    };

    let text = format!("{} {}", title, description).to_lowercase();
    let total_distance: f64 = segments
        .iter()
        .map(|s| s.work.distance_meters.unwrap_or(0.0) * f64::from(s.reps.max(1)))
        .sum();
    let training_type = if text.contains("tempo") {
        TrainingType::Tempo
    } else if workout_kind == WorkoutKind::Intervals {
        TrainingType::Interval
    } else if total_distance >= 14_000.0 || text.contains("långpass") {
        TrainingType::LongRun
    } else {
        TrainingType::Default
    };

    debug!(
        "Workout classified as {:?}/{:?} with {} segment(s)",
        workout_kind,
        training_type,
        segments.len()
    );
    ParsedWorkout {
        segments,
        workout_kind,
        training_type,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_interval_line() {
        let parsed = parse_workout("Intervaller", "5x1000m @ 4:00 vila 90s");
        assert_eq!(parsed.segments.len(), 1);
        let segment = &parsed.segments[0];
        assert_eq!(segment.kind, SegmentKind::Interval);
        assert_eq!(segment.reps, 5);
        assert_eq!(segment.work.distance_meters, Some(1000.0));
        assert_eq!(
            segment.work.pace,
            Some(PaceTarget::Fixed { seconds_per_km: 240 })
        );
        assert_eq!(segment.recovery, Some(Recovery::Duration { seconds: 90 }));
        assert_eq!(parsed.workout_kind, WorkoutKind::Intervals);
        assert_eq!(parsed.training_type, TrainingType::Interval);
    }

    #[test]
    fn test_warmup_and_cooldown_lines() {
        let parsed = parse_workout(
            "Pass",
            "Uppvärmning 2km\n4x800m @ 3:50\nNedjogg 1km",
        );
        assert_eq!(parsed.segments.len(), 3);
        assert_eq!(parsed.segments[0].kind, SegmentKind::Warmup);
        assert_eq!(parsed.segments[0].work.distance_meters, Some(2000.0));
        assert_eq!(parsed.segments[2].kind, SegmentKind::Cooldown);
    }

    #[test]
    fn test_rest_on_following_line_attached() {
        let parsed = parse_workout("Pass", "6x400m\nvila 60s");
        assert_eq!(parsed.segments.len(), 1);
        assert_eq!(
            parsed.segments[0].recovery,
            Some(Recovery::Duration { seconds: 60 })
        );
    }

    #[test]
    fn test_progressive_pace() {
        let parsed = parse_workout("Pass", "3x2000m @ 4:10->3:55 vila 2min");
        let work = parsed.segments[0].work;
        assert_eq!(
            work.pace,
            Some(PaceTarget::Progressive {
                from_seconds: 250,
                to_seconds: 235,
            })
        );
        assert_eq!(
            parsed.segments[0].recovery,
            Some(Recovery::Duration { seconds: 120 })
        );
    }

    #[test]
    fn test_pace_slash_km_form() {
        let parsed = parse_workout("Pass", "10km 5:00/km");
        assert_eq!(
            parsed.segments[0].work.pace,
            Some(PaceTarget::Fixed { seconds_per_km: 300 })
        );
        assert_eq!(parsed.workout_kind, WorkoutKind::Distance);
    }

    #[test]
    fn test_implausible_pace_rejected() {
        // 0:30/km is not a plausible running pace.
        let parsed = parse_workout("Pass", "10km 0:30/km");
        assert_eq!(parsed.segments[0].work.pace, None);
    }

    #[test]
    fn test_duration_intervals() {
        let parsed = parse_workout("Pass", "4x4min vila 3min");
        let segment = &parsed.segments[0];
        assert_eq!(segment.reps, 4);
        assert_eq!(segment.work.duration_seconds, Some(240));
        assert_eq!(segment.recovery, Some(Recovery::Duration { seconds: 180 }));
    }

    #[test]
    fn test_variable_list_expansion() {
        let parsed = parse_workout("Pyramid", "5x400m vila 90, 75, 60, 45, 30 s");
        assert_eq!(parsed.segments.len(), 5);
        let seconds: Vec<u32> = parsed
            .segments
            .iter()
            .map(|s| match s.recovery {
                Some(Recovery::Duration { seconds }) => seconds,
                _ => panic!("expected scalar duration recovery"),
            })
            .collect();
        assert_eq!(seconds, vec![90, 75, 60, 45, 30]);
        assert!(parsed.segments.iter().all(|s| s.reps == 1));
        assert!(parsed
            .segments
            .iter()
            .all(|s| s.work.distance_meters == Some(400.0)));
    }

    #[test]
    fn test_variable_list_length_mismatch_not_expanded() {
        let parsed = parse_workout("Pass", "5x400m vila 90, 60 s");
        assert_eq!(parsed.segments.len(), 1);
        assert!(matches!(
            parsed.segments[0].recovery,
            Some(Recovery::VariableList { .. })
        ));
    }

    #[test]
    fn test_variable_list_defaults_to_meters() {
        let parsed = parse_workout("Pass", "3x1000m vila 400, 300, 200");
        assert_eq!(parsed.segments.len(), 3);
        assert_eq!(
            parsed.segments[0].recovery,
            Some(Recovery::Distance { meters: 400.0 })
        );
    }

    #[test]
    fn test_bare_duration_list() {
        let parsed = parse_workout("Backar", "1min, 2min, 3min");
        assert_eq!(parsed.segments.len(), 3);
        assert_eq!(parsed.segments[0].work.duration_seconds, Some(60));
        assert_eq!(parsed.segments[2].work.duration_seconds, Some(180));
        assert!(parsed.segments.iter().all(|s| s.reps == 1));
    }

    #[test]
    fn test_bare_duration_list_after_warmup_line() {
        // The flat-list grammar applies per line, not only when the
        // whole description is a single line.
        let parsed = parse_workout("Backar", "uppvärmning 2km\n1min, 2min, 3min");
        assert_eq!(parsed.segments.len(), 4);
        assert_eq!(parsed.segments[0].kind, SegmentKind::Warmup);
        let durations: Vec<Option<u32>> = parsed.segments[1..]
            .iter()
            .map(|s| s.work.duration_seconds)
            .collect();
        assert_eq!(durations, vec![Some(60), Some(120), Some(180)]);
    }

    #[test]
    fn test_tempo_classification() {
        let parsed = parse_workout("Tempo", "8km @ 4:30");
        assert_eq!(parsed.training_type, TrainingType::Tempo);
    }

    #[test]
    fn test_long_run_classification() {
        let parsed = parse_workout("Söndag", "21km lugnt");
        assert_eq!(parsed.workout_kind, WorkoutKind::Distance);
        assert_eq!(parsed.training_type, TrainingType::LongRun);
    }

    #[test]
    fn test_emoji_and_dash_normalization() {
        let parsed = parse_workout("Pass", "🔥 5×1000m - vila 90s");
        assert_eq!(parsed.segments[0].reps, 5);
        assert_eq!(parsed.segments[0].work.distance_meters, Some(1000.0));
    }

    #[test]
    fn test_empty_description() {
        let parsed = parse_workout("Pass", "");
        assert!(parsed.segments.is_empty());
        assert_eq!(parsed.workout_kind, WorkoutKind::Distance);
    }

    #[test]
    fn test_original_string_kept() {
        let parsed = parse_workout("Pass", "5x1000m vila 90s");
        assert_eq!(parsed.segments[0].original_string, "5x1000m vila 90s");
    }
}
