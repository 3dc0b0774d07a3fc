//! # Smart-Query Parser
//!
//! Parses free-text search queries like ">10km", "4:00-5:00/km löpning"
//! or "2024 >5t" into structured filters that can be applied to a
//! training history. Each recognized token is consumed from the query;
//! whatever text remains becomes a free-text filter over titles and
//! notes.
//!
//! Recognition runs in a fixed order so that ambiguous fragments are
//! claimed by the more specific pattern first: date, year, distance,
//! tonnage, pace, duration, then free text. Every pattern claims all
//! of its matches before the next one runs, so a query may carry
//! several filters of the same kind.

use chrono::{Datelike, NaiveDate};
use lazy_static::lazy_static;
use log::{debug, trace};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::textutil::collapse_whitespace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    Year,
    Date,
    Distance,
    Tonnage,
    Pace,
    Duration,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOp {
    Greater,
    Less,
    Range,
    Equal,
    Approx,
    Contains,
}

/// One parsed filter. Numeric filters carry their value(s) in the unit
/// of their kind: km for distance, kg for tonnage, seconds per km for
/// pace, seconds for duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmartFilter {
    pub kind: FilterKind,
    pub op: FilterOp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value2: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Human-readable chip label shown in the search UI
    pub label: String,
    pub matched_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmartQuery {
    pub filters: Vec<SmartFilter>,
    /// Query text left after all recognized tokens were consumed
    pub remaining_text: String,
}

/// One searchable history entry, the shape [`apply_smart_filters`]
/// operates on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryEntry {
    pub date: NaiveDate,
    pub title: String,
    #[serde(default)]
    pub notes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tonnage_kg: Option<f64>,
}

impl QueryEntry {
    /// Average pace in seconds per km, when both inputs are present.
    pub fn pace_seconds_per_km(&self) -> Option<f64> {
        let distance = self.distance_km?;
        if distance <= 0.0 {
            return None;
        }
        Some(f64::from(self.duration_seconds?) / distance)
    }
}

/// Tolerance for "~5km" style approximate distance filters, in km.
const APPROX_DISTANCE_TOLERANCE_KM: f64 = 1.0;

lazy_static! {
    static ref YEAR: Regex = Regex::new(r"\b(19\d{2}|20\d{2})\b").expect("year pattern");
    static ref DATE: Regex = Regex::new(r"\b(\d{4}-\d{2}-\d{2})\b").expect("date pattern");
    static ref DISTANCE_RANGE: Regex =
        Regex::new(r"(\d+(?:\.\d+)?)\s*-\s*(\d+(?:\.\d+)?)\s*km\b").expect("distance range");
    static ref DISTANCE_APPROX: Regex =
        Regex::new(r"~\s*(\d+(?:\.\d+)?)\s*km\b").expect("approx distance");
    static ref DISTANCE_TOLERANCE: Regex =
        Regex::new(r"(\d+(?:\.\d+)?)\s*±\s*(\d+(?:\.\d+)?)\s*km\b").expect("tolerance distance");
    static ref DISTANCE_CMP: Regex =
        Regex::new(r"([<>])\s*(\d+(?:\.\d+)?)\s*km\b").expect("distance comparison");
    static ref DISTANCE_EXACT: Regex =
        Regex::new(r"(\d+(?:\.\d+)?)\s*km\b").expect("exact distance");
    // "t" for tonnes; the word boundary keeps "5tim" (hours) from
    // matching.
    static ref TONNAGE: Regex =
        Regex::new(r"([<>])?\s*(\d+(?:\.\d+)?)\s*t(?:on)?\b").expect("tonnage pattern");
    static ref PACE_RANGE: Regex =
        Regex::new(r"(\d{1,2}:\d{2})\s*-\s*(\d{1,2}:\d{2})\s*/\s*km").expect("pace range");
    static ref PACE_CMP: Regex =
        Regex::new(r"([<>])?\s*(\d{1,2}:\d{2})\s*/\s*km").expect("pace pattern");
    // "1:30h" must be claimed before the plain-hours pattern would read
    // the "30h" tail as thirty hours.
    static ref DURATION_CLOCK: Regex =
        Regex::new(r"([<>])?\s*(\d{1,2}:\d{2})\s*(?:h|tim)\b").expect("clock duration pattern");
    static ref DURATION_HOURS: Regex =
        Regex::new(r"([<>])?\s*(\d+(?:\.\d+)?)\s*(?:h|tim(?:mar)?)\b").expect("hours pattern");
    static ref DURATION_MINUTES: Regex =
        Regex::new(r"([<>])?\s*(\d+)\s*(?:min|m)\b").expect("minutes pattern");
}

/// Parse a search query into structured filters plus leftover text.
pub fn parse_smart_query(query: &str) -> SmartQuery {
    let mut text = query.to_lowercase();
    let mut filters = Vec::new();

    // Date before year so "2024-03-15" is not claimed as the year 2024.
    scan(&DATE, &mut text, &mut filters, |caps| {
        let matched = caps[1].to_string();
        if NaiveDate::parse_from_str(&matched, "%Y-%m-%d").is_err() {
            return None;
        }
        Some(SmartFilter {
            kind: FilterKind::Date,
            op: FilterOp::Equal,
            value: None,
            value2: None,
            text: Some(matched.clone()),
            label: matched.clone(),
            matched_text: matched,
        })
    });

    scan(&YEAR, &mut text, &mut filters, |caps| {
        let year: f64 = caps[1].parse().unwrap_or(0.0);
        Some(SmartFilter {
            kind: FilterKind::Year,
            op: FilterOp::Equal,
            value: Some(year),
            value2: None,
            text: None,
            label: caps[1].to_string(),
            matched_text: caps[0].to_string(),
        })
    });

    extract_distance(&mut text, &mut filters);
    extract_tonnage(&mut text, &mut filters);
    extract_pace(&mut text, &mut filters);
    extract_duration(&mut text, &mut filters);

    let remaining_text = collapse_whitespace(&text);
    if !remaining_text.is_empty() {
        filters.push(SmartFilter {
            kind: FilterKind::Text,
            op: FilterOp::Contains,
            value: None,
            value2: None,
            text: Some(remaining_text.clone()),
            label: format!("\"{}\"", remaining_text),
            matched_text: remaining_text.clone(),
        });
    }

    debug!(
        "Query '{}' parsed into {} filter(s), remaining '{}'",
        query,
        filters.len(),
        remaining_text
    );
    SmartQuery {
        filters,
        remaining_text,
    }
}

/// Run one pattern over the query and consume every span it claims.
///
/// The snapshot keeps match offsets stable while the live text is
/// blanked; `consume` preserves byte length so the offsets agree.
/// A `None` from the builder rejects the match and leaves its span
/// for later patterns.
fn scan(
    regex: &Regex,
    text: &mut String,
    filters: &mut Vec<SmartFilter>,
    build: impl Fn(&regex::Captures) -> Option<SmartFilter>,
) {
    let snapshot = text.clone();
    for caps in regex.captures_iter(&snapshot) {
        if let Some(filter) = build(&caps) {
            filters.push(filter);
            let m = caps.get(0).expect("whole match");
            consume(text, m.start(), m.end());
        }
    }
}

/// Blank out a consumed span so later patterns cannot re-match it.
/// Byte-for-byte, so offsets taken before the blanking stay valid.
fn consume(text: &mut String, start: usize, end: usize) {
    let blank: String = " ".repeat(end - start);
    text.replace_range(start..end, &blank);
}

fn extract_distance(text: &mut String, filters: &mut Vec<SmartFilter>) {
    scan(&DISTANCE_RANGE, text, filters, |caps| {
        let low: f64 = caps[1].parse().unwrap_or(0.0);
        let high: f64 = caps[2].parse().unwrap_or(0.0);
        Some(SmartFilter {
            kind: FilterKind::Distance,
            op: FilterOp::Range,
            value: Some(low.min(high)),
            value2: Some(low.max(high)),
            text: None,
            label: format!("{}-{} km", &caps[1], &caps[2]),
            matched_text: caps[0].to_string(),
        })
    });
    scan(&DISTANCE_TOLERANCE, text, filters, |caps| {
        let center: f64 = caps[1].parse().unwrap_or(0.0);
        let tolerance: f64 = caps[2].parse().unwrap_or(0.0);
        Some(SmartFilter {
            kind: FilterKind::Distance,
            op: FilterOp::Range,
            value: Some(center - tolerance),
            value2: Some(center + tolerance),
            text: None,
            label: format!("~{} km", &caps[1]),
            matched_text: caps[0].to_string(),
        })
    });
    scan(&DISTANCE_APPROX, text, filters, |caps| {
        let center: f64 = caps[1].parse().unwrap_or(0.0);
        Some(SmartFilter {
            kind: FilterKind::Distance,
            op: FilterOp::Range,
            value: Some(center - APPROX_DISTANCE_TOLERANCE_KM),
            value2: Some(center + APPROX_DISTANCE_TOLERANCE_KM),
            text: None,
            label: format!("~{} km", &caps[1]),
            matched_text: caps[0].to_string(),
        })
    });
    scan(&DISTANCE_CMP, text, filters, |caps| {
        let op = if &caps[1] == ">" {
            FilterOp::Greater
        } else {
            FilterOp::Less
        };
        let value: f64 = caps[2].parse().unwrap_or(0.0);
        Some(SmartFilter {
            kind: FilterKind::Distance,
            op,
            value: Some(value),
            value2: None,
            text: None,
            label: format!("{} {} km", &caps[1], &caps[2]),
            matched_text: caps[0].to_string(),
        })
    });
    scan(&DISTANCE_EXACT, text, filters, |caps| {
        let value: f64 = caps[1].parse().unwrap_or(0.0);
        Some(SmartFilter {
            kind: FilterKind::Distance,
            op: FilterOp::Equal,
            value: Some(value),
            value2: None,
            text: None,
            label: format!("{} km", &caps[1]),
            matched_text: caps[0].to_string(),
        })
    });
}

fn extract_tonnage(text: &mut String, filters: &mut Vec<SmartFilter>) {
    scan(&TONNAGE, text, filters, |caps| {
        let op = comparison_op(caps.get(1));
        let tonnes: f64 = caps[2].parse().unwrap_or(0.0);
        trace!("Tonnage filter {:?} {} t", op, tonnes);
        Some(SmartFilter {
            kind: FilterKind::Tonnage,
            op,
            value: Some(tonnes * 1000.0),
            value2: None,
            text: None,
            label: format!("{} t", &caps[2]),
            matched_text: caps[0].to_string(),
        })
    });
}

fn extract_pace(text: &mut String, filters: &mut Vec<SmartFilter>) {
    scan(&PACE_RANGE, text, filters, |caps| {
        let low = pace_seconds(&caps[1])?;
        let high = pace_seconds(&caps[2])?;
        Some(SmartFilter {
            kind: FilterKind::Pace,
            op: FilterOp::Range,
            value: Some(f64::from(low.min(high))),
            value2: Some(f64::from(low.max(high))),
            text: None,
            label: format!("{}-{}/km", &caps[1], &caps[2]),
            matched_text: caps[0].to_string(),
        })
    });
    scan(&PACE_CMP, text, filters, |caps| {
        let seconds = pace_seconds(&caps[2])?;
        Some(SmartFilter {
            kind: FilterKind::Pace,
            op: comparison_op(caps.get(1)),
            value: Some(f64::from(seconds)),
            value2: None,
            text: None,
            label: format!("{}/km", &caps[2]),
            matched_text: caps[0].to_string(),
        })
    });
}

fn pace_seconds(clock: &str) -> Option<u32> {
    crate::duration::parse_duration_seconds(clock)
}

fn extract_duration(text: &mut String, filters: &mut Vec<SmartFilter>) {
    scan(&DURATION_CLOCK, text, filters, |caps| {
        let seconds = crate::duration::parse_duration_seconds(&caps[2])?;
        Some(SmartFilter {
            kind: FilterKind::Duration,
            op: comparison_op(caps.get(1)),
            // hh:mm read as hours and minutes.
            value: Some(f64::from(seconds) * 60.0),
            value2: None,
            text: None,
            label: format!("{} h", &caps[2]),
            matched_text: caps[0].to_string(),
        })
    });
    scan(&DURATION_HOURS, text, filters, |caps| {
        let hours: f64 = caps[2].parse().unwrap_or(0.0);
        Some(SmartFilter {
            kind: FilterKind::Duration,
            op: comparison_op(caps.get(1)),
            value: Some(hours * 3600.0),
            value2: None,
            text: None,
            label: format!("{} h", &caps[2]),
            matched_text: caps[0].to_string(),
        })
    });
    scan(&DURATION_MINUTES, text, filters, |caps| {
        let minutes: f64 = caps[2].parse().unwrap_or(0.0);
        Some(SmartFilter {
            kind: FilterKind::Duration,
            op: comparison_op(caps.get(1)),
            value: Some(minutes * 60.0),
            value2: None,
            text: None,
            label: format!("{} min", &caps[2]),
            matched_text: caps[0].to_string(),
        })
    });
}

fn comparison_op(sign: Option<regex::Match>) -> FilterOp {
    match sign.map(|m| m.as_str()) {
        Some(">") => FilterOp::Greater,
        Some("<") => FilterOp::Less,
        _ => FilterOp::Equal,
    }
}

/// Apply all filters conjunctively: an entry survives only when every
/// filter matches it.
pub fn apply_smart_filters<'a>(
    entries: &'a [QueryEntry],
    filters: &[SmartFilter],
) -> Vec<&'a QueryEntry> {
    entries
        .iter()
        .filter(|entry| filters.iter().all(|f| filter_matches(f, entry)))
        .collect()
}

fn filter_matches(filter: &SmartFilter, entry: &QueryEntry) -> bool {
    match filter.kind {
        FilterKind::Year => filter
            .value
            .map(|y| entry.date.year() == y as i32)
            .unwrap_or(false),
        FilterKind::Date => filter
            .text
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
            .map(|d| entry.date == d)
            .unwrap_or(false),
        FilterKind::Distance => numeric_matches(filter, entry.distance_km),
        FilterKind::Tonnage => numeric_matches(filter, entry.tonnage_kg),
        FilterKind::Duration => {
            numeric_matches(filter, entry.duration_seconds.map(f64::from))
        }
        FilterKind::Pace => numeric_matches(filter, entry.pace_seconds_per_km()),
        FilterKind::Text => {
            let needle = match filter.text.as_deref() {
                Some(t) => t,
                None => return true,
            };
            entry.title.to_lowercase().contains(needle)
                || entry.notes.to_lowercase().contains(needle)
        }
    }
}

fn numeric_matches(filter: &SmartFilter, actual: Option<f64>) -> bool {
    let actual = match actual {
        Some(v) => v,
        None => return false,
    };
    let value = match filter.value {
        Some(v) => v,
        None => return false,
    };
    match filter.op {
        FilterOp::Greater => actual > value,
        FilterOp::Less => actual < value,
        FilterOp::Range => {
            let high = filter.value2.unwrap_or(value);
            actual >= value && actual <= high
        }
        FilterOp::Approx => (actual - value).abs() <= APPROX_DISTANCE_TOLERANCE_KM,
        FilterOp::Equal => (actual - value).abs() < f64::EPSILON * value.abs().max(1.0),
        FilterOp::Contains => false,
    }
}
