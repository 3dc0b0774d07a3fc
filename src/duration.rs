//! # Duration Helpers
//!
//! Parsing and formatting of clock-style durations ("mm:ss", "hh:mm:ss")
//! used by the strength-log, workout-description and smart-query parsers.

/// Parse a "mm:ss" or "hh:mm:ss" string into whole seconds.
///
/// Seconds (and minutes in the three-part form) must be below 60 so that a
/// parsed value formats back to the same minute:second pair.
pub fn parse_duration_seconds(raw: &str) -> Option<u32> {
    let parts: Vec<&str> = raw.trim().split(':').collect();
    match parts.len() {
        2 => {
            let minutes: u32 = parts[0].parse().ok()?;
            let seconds: u32 = parts[1].parse().ok()?;
            if seconds >= 60 {
                return None;
            }
            Some(minutes * 60 + seconds)
        }
        3 => {
            let hours: u32 = parts[0].parse().ok()?;
            let minutes: u32 = parts[1].parse().ok()?;
            let seconds: u32 = parts[2].parse().ok()?;
            if minutes >= 60 || seconds >= 60 {
                return None;
            }
            Some(hours * 3600 + minutes * 60 + seconds)
        }
        _ => None,
    }
}

/// Format whole seconds as "m:ss" below one hour, "h:mm:ss" above.
pub fn format_duration_seconds(total: u32) -> String {
    if total >= 3600 {
        format!("{}:{:02}:{:02}", total / 3600, (total % 3600) / 60, total % 60)
    } else {
        format!("{}:{:02}", total / 60, total % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mm_ss() {
        assert_eq!(parse_duration_seconds("1:30"), Some(90));
        assert_eq!(parse_duration_seconds("0:45"), Some(45));
        assert_eq!(parse_duration_seconds("4:00"), Some(240));
    }

    #[test]
    fn test_parse_hh_mm_ss() {
        assert_eq!(parse_duration_seconds("00:08:15"), Some(495));
        assert_eq!(parse_duration_seconds("1:02:03"), Some(3723));
    }

    #[test]
    fn test_parse_rejects_invalid() {
        assert_eq!(parse_duration_seconds("1:75"), None);
        assert_eq!(parse_duration_seconds("90"), None);
        assert_eq!(parse_duration_seconds("a:b"), None);
        assert_eq!(parse_duration_seconds(""), None);
    }

    #[test]
    fn test_format() {
        assert_eq!(format_duration_seconds(90), "1:30");
        assert_eq!(format_duration_seconds(495), "8:15");
        assert_eq!(format_duration_seconds(3723), "1:02:03");
    }

    #[test]
    fn test_round_trip_mm_ss() {
        // For all valid mm:ss values, parse -> format reproduces the pair.
        for text in ["1:30", "0:05", "59:59", "12:00"] {
            let seconds = parse_duration_seconds(text).unwrap();
            let formatted = format_duration_seconds(seconds);
            let reparsed = parse_duration_seconds(&formatted).unwrap();
            assert_eq!(seconds, reparsed, "round trip failed for {}", text);
        }
        assert_eq!(format_duration_seconds(parse_duration_seconds("1:30").unwrap()), "1:30");
    }
}
