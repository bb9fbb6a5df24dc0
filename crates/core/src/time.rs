//! Minute-of-day time normalization.
//!
//! The upstream feed mixes 24-hour (`HH:MM:SS`, `HH:MM`) and 12-hour
//! (`H:MM AM`, `H AM`, seconds tolerated) strings. Everything funnels
//! through [`parse_minutes`]; callers pick the failure policy
//! explicitly rather than letting a thrown error pick it for them.

use thiserror::Error;
use tracing::warn;

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum TimeParseError {
    #[error("empty time string")]
    Empty,
    #[error("unrecognized time format: {0}")]
    Unrecognized(String),
    #[error("time range must be \"start-end\": {0}")]
    NotARange(String),
}

/// Parses a time string into a minute of the day in `[0, 1439]`.
///
/// Accepts `HH:MM:SS` and `HH:MM` (24-hour), and `H:MM AM/PM` and
/// `H AM/PM` (12-hour, case-insensitive, optional seconds dropped).
pub fn parse_minutes(text: &str) -> Result<u16, TimeParseError> {
    let t = text.trim().to_ascii_uppercase();
    if t.is_empty() {
        return Err(TimeParseError::Empty);
    }
    let unrec = || TimeParseError::Unrecognized(text.trim().to_string());

    if let Some(body) = t.strip_suffix("AM").or_else(|| t.strip_suffix("PM")) {
        let pm = t.ends_with("PM");
        let mut parts = body.trim().split(':');
        let hour: u16 = parts
            .next()
            .and_then(|p| p.trim().parse().ok())
            .ok_or_else(unrec)?;
        let minute: u16 = match parts.next() {
            Some(p) => p.trim().parse().map_err(|_| unrec())?,
            None => 0,
        };
        if let Some(seconds) = parts.next() {
            // tolerated but ignored
            seconds.trim().parse::<u16>().map_err(|_| unrec())?;
        }
        if parts.next().is_some() || !(1..=12).contains(&hour) || minute > 59 {
            return Err(unrec());
        }
        let hour24 = if pm { hour % 12 + 12 } else { hour % 12 };
        Ok(hour24 * 60 + minute)
    } else {
        let parts: Vec<&str> = t.split(':').collect();
        if parts.len() != 2 && parts.len() != 3 {
            return Err(unrec());
        }
        let hour: u16 = parts[0].trim().parse().map_err(|_| unrec())?;
        let minute: u16 = parts[1].trim().parse().map_err(|_| unrec())?;
        if parts.len() == 3 {
            parts[2].trim().parse::<u16>().map_err(|_| unrec())?;
        }
        if hour > 23 || minute > 59 {
            return Err(unrec());
        }
        Ok(hour * 60 + minute)
    }
}

/// Fail-open variant for schedule comparisons: unparseable input is
/// logged and becomes 0 ("unknown/midnight"). A 0..0 range never
/// overlaps anything, so a broken time cannot invent a schedule clash.
/// Exam logic must NOT use this — it treats 0 as a forced conflict.
pub fn parse_minutes_lenient(text: &str) -> u16 {
    match parse_minutes(text) {
        Ok(m) => m,
        Err(e) => {
            warn!(input = text, error = %e, "treating unparseable time as midnight");
            0
        }
    }
}

/// `"HH:MM:SS"`, the feed's own 24-hour shape.
pub fn format_minutes(minutes: u16) -> String {
    let m = minutes % 1440;
    format!("{:02}:{:02}:00", m / 60, m % 60)
}

/// 12-hour display form, no leading zero on the hour: `"8:00 AM"`.
pub fn format_minutes_12h(minutes: u16) -> String {
    let m = minutes % 1440;
    let (hour24, minute) = (m / 60, m % 60);
    let (hour12, suffix) = match hour24 {
        0 => (12, "AM"),
        1..=11 => (hour24, "AM"),
        12 => (12, "PM"),
        _ => (hour24 - 12, "PM"),
    };
    format!("{}:{:02} {}", hour12, minute, suffix)
}

pub fn format_range_12h(start: u16, end: u16) -> String {
    format!("{} - {}", format_minutes_12h(start), format_minutes_12h(end))
}

pub fn format_range(start: u16, end: u16) -> String {
    format!("{} - {}", format_minutes(start), format_minutes(end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_24_hour_forms() {
        assert_eq!(parse_minutes("08:00:00"), Ok(480));
        assert_eq!(parse_minutes("8:00"), Ok(480));
        assert_eq!(parse_minutes("23:59:59"), Ok(1439));
        assert_eq!(parse_minutes("00:00"), Ok(0));
    }

    #[test]
    fn parses_12_hour_forms() {
        assert_eq!(parse_minutes("8:00 AM"), Ok(480));
        assert_eq!(parse_minutes("9:30 am"), Ok(570));
        assert_eq!(parse_minutes("12:20 PM"), Ok(740));
        assert_eq!(parse_minutes("12:00 AM"), Ok(0));
        assert_eq!(parse_minutes("5 PM"), Ok(1020));
        // seconds dropped, minutes kept
        assert_eq!(parse_minutes("9:30:15 AM"), Ok(570));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_minutes(""), Err(TimeParseError::Empty));
        assert!(parse_minutes("25:00").is_err());
        assert!(parse_minutes("13:00 PM").is_err());
        assert!(parse_minutes("noonish").is_err());
        assert!(parse_minutes("8:77 AM").is_err());
    }

    #[test]
    fn lenient_parse_defaults_to_midnight() {
        assert_eq!(parse_minutes_lenient("not a time"), 0);
        assert_eq!(parse_minutes_lenient("11:00:00"), 660);
    }

    #[test]
    fn formats_display_forms() {
        assert_eq!(format_minutes(480), "08:00:00");
        assert_eq!(format_minutes_12h(480), "8:00 AM");
        assert_eq!(format_minutes_12h(0), "12:00 AM");
        assert_eq!(format_minutes_12h(720), "12:00 PM");
        assert_eq!(format_minutes_12h(1100), "6:20 PM");
        assert_eq!(format_range_12h(480, 560), "8:00 AM - 9:20 AM");
    }

    proptest! {
        #[test]
        fn hms_round_trips(m in 0u16..1440) {
            prop_assert_eq!(parse_minutes(&format_minutes(m)), Ok(m));
        }

        #[test]
        fn twelve_hour_round_trips(m in 0u16..1440) {
            prop_assert_eq!(parse_minutes(&format_minutes_12h(m)), Ok(m));
        }
    }
}
