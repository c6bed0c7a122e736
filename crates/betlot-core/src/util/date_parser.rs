//! Flexible date parsing for user input.
//!
//! Supports:
//! - Date: `2026-02-07` or `07/02/2026`
//! - Date+time: `2026-02-07T17:00`, `2026-02-07 17:00[:30]`
//! - Range: `2026-01-01..2026-03-31`

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Error type for range parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeParseError {
    pub input: String,
    pub message: String,
}

impl std::fmt::Display for RangeParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to parse range '{}': {}", self.input, self.message)
    }
}

impl std::error::Error for RangeParseError {}

/// Parse a flexible date string into a [`NaiveDate`].
pub fn parse_input_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if let Ok(d) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(d) = NaiveDate::parse_from_str(input, "%d/%m/%Y") {
        return Some(d);
    }
    None
}

/// Parse a flexible date or datetime string. Bare dates resolve to midnight.
pub fn parse_input_datetime(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();

    for format in [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, format) {
            return Some(dt);
        }
    }

    parse_input_date(input).map(|d| NaiveDateTime::new(d, NaiveTime::MIN))
}

/// Parse a `start..end` date range (both sides required, inclusive).
pub fn parse_date_range(input: &str) -> Result<(NaiveDate, NaiveDate), RangeParseError> {
    let input = input.trim();
    let err = |message: &str| RangeParseError {
        input: input.to_string(),
        message: message.to_string(),
    };

    let Some((start_text, end_text)) = input.split_once("..") else {
        return Err(err("expected 'START..END', e.g. 2026-01-01..2026-03-31"));
    };

    let start = parse_input_date(start_text).ok_or_else(|| err("invalid start date"))?;
    let end = parse_input_date(end_text).ok_or_else(|| err("invalid end date"))?;
    if end < start {
        return Err(err("end date is before start date"));
    }
    Ok((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_and_slash_dates() {
        let expected = NaiveDate::from_ymd_opt(2026, 2, 7).unwrap();
        assert_eq!(parse_input_date("2026-02-07"), Some(expected));
        assert_eq!(parse_input_date("07/02/2026"), Some(expected));
        assert_eq!(parse_input_date("soon"), None);
    }

    #[test]
    fn datetime_falls_back_to_midnight() {
        let dt = parse_input_datetime("2026-02-07").unwrap();
        assert_eq!(dt.time(), NaiveTime::MIN);
        let dt = parse_input_datetime("2026-02-07T17:30").unwrap();
        assert_eq!(dt.format("%H:%M").to_string(), "17:30");
    }

    #[test]
    fn range_requires_both_sides_in_order() {
        let (start, end) = parse_date_range("2026-01-01..2026-03-31").unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2026, 3, 31).unwrap());

        assert!(parse_date_range("2026-01-01").is_err());
        assert!(parse_date_range("2026-03-31..2026-01-01").is_err());
        assert!(parse_date_range("x..y").is_err());
    }
}
