//! Shared display formatting and decorated-text parsing.
//!
//! All pure string helpers live here: currency/percent/datetime rendering for
//! table cells, and the inverse best-effort parsers that sorting and filtering
//! run against cell text. Parsers return [`ParseOutcome`] so each consumer
//! states its own failure policy (zero substitution for sorting, pass-through
//! for filtering) instead of relying on incidental NaN propagation.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Outcome of parsing a display cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParseOutcome<T> {
    /// The cell text carried a usable value.
    Valid(T),
    /// The cell text could not be interpreted (blank, `-`, free text).
    Unparsable,
}

impl<T> ParseOutcome<T> {
    /// Valid value, or `None`.
    pub fn valid(self) -> Option<T> {
        match self {
            ParseOutcome::Valid(v) => Some(v),
            ParseOutcome::Unparsable => None,
        }
    }

    /// Valid value, or the given substitute.
    pub fn unwrap_or(self, fallback: T) -> T {
        match self {
            ParseOutcome::Valid(v) => v,
            ParseOutcome::Unparsable => fallback,
        }
    }
}

// ---------------------------------------------------------------------------
// Cell rendering
// ---------------------------------------------------------------------------

/// Format a dollar amount with thousands separators: `"$1,234.56"`, `"-$5.00"`.
pub fn format_currency(v: f64) -> String {
    let sign = if v < 0.0 { "-" } else { "" };
    let abs = v.abs();
    let cents = (abs * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;
    format!("{}${}.{:02}", sign, group_thousands(whole), frac)
}

/// Format a fractional value as a percentage: `0.1234` -> `"12.34%"`.
pub fn format_percent(v: f64) -> String {
    format!("{:.2}%", v * 100.0)
}

/// Format a price/quantity with two decimals: `"0.45"`.
pub fn format_quantity(v: f64) -> String {
    format!("{:.2}", v)
}

/// Format a UTC datetime the way the dashboard displays it: `"07/08/2026 14:30"`.
pub fn format_datetime(dt: DateTime<Utc>) -> String {
    dt.format("%d/%m/%Y %H:%M").to_string()
}

/// Format a date for drawdown windows: `"07/Aug/2026"`.
pub fn format_day(date: NaiveDate) -> String {
    date.format("%d/%b/%Y").to_string()
}

/// Join tags for a single cell: `"NBA, Basketball"`.
pub fn format_tags(tags: &[String]) -> String {
    tags.join(", ")
}

fn group_thousands(mut n: u64) -> String {
    if n < 1000 {
        return n.to_string();
    }
    let mut groups = Vec::new();
    while n >= 1000 {
        groups.push(format!("{:03}", n % 1000));
        n /= 1000;
    }
    let mut out = n.to_string();
    for g in groups.iter().rev() {
        out.push(',');
        out.push_str(g);
    }
    out
}

// ---------------------------------------------------------------------------
// Cell parsing
// ---------------------------------------------------------------------------

/// Parse a decorated numeric cell (`"$1,234.56"`, `"12.34%"`, `"-5"`).
///
/// Strips every character except digits, `.` and `-` before parsing, so
/// currency symbols, thousands separators and percent signs are ignored.
/// Percent scaling is the caller's concern.
pub fn parse_decorated_number(text: &str) -> ParseOutcome<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() => ParseOutcome::Valid(v),
        _ => ParseOutcome::Unparsable,
    }
}

/// Parse a datetime cell in either of the dashboard's encodings.
///
/// Primary: `"DD/MM/YYYY HH:MM"` (time optional). Fallback: ISO-like
/// `"YYYY-MM-DD HH:MM[:SS]"` with `T` or space separator, or a bare date.
pub fn parse_datetime_cell(text: &str) -> ParseOutcome<NaiveDateTime> {
    let text = text.trim();
    if text.is_empty() {
        return ParseOutcome::Unparsable;
    }

    if text.contains('/') {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%d/%m/%Y %H:%M") {
            return ParseOutcome::Valid(dt);
        }
        if let Ok(d) = NaiveDate::parse_from_str(text, "%d/%m/%Y") {
            return ParseOutcome::Valid(NaiveDateTime::new(d, NaiveTime::MIN));
        }
        return ParseOutcome::Unparsable;
    }

    for format in [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return ParseOutcome::Valid(dt);
        }
    }
    if let Ok(d) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return ParseOutcome::Valid(NaiveDateTime::new(d, NaiveTime::MIN));
    }
    // Rollup labels: "2026-02" and "2026" resolve to the bucket start.
    if text.len() == 7
        && let Ok(d) = NaiveDate::parse_from_str(&format!("{text}-01"), "%Y-%m-%d")
    {
        return ParseOutcome::Valid(NaiveDateTime::new(d, NaiveTime::MIN));
    }
    if text.len() == 4
        && text.chars().all(|c| c.is_ascii_digit())
        && let Ok(d) = NaiveDate::parse_from_str(&format!("{text}-01-01"), "%Y-%m-%d")
    {
        return ParseOutcome::Valid(NaiveDateTime::new(d, NaiveTime::MIN));
    }

    ParseOutcome::Unparsable
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    #[test]
    fn currency_grouping_and_sign() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(10.0), "$10.00");
        assert_eq!(format_currency(-5.0), "-$5.00");
        assert_eq!(format_currency(1234.56), "$1,234.56");
        assert_eq!(format_currency(1_234_567.891), "$1,234,567.89");
    }

    #[test]
    fn percent_is_fraction_scaled() {
        assert_eq!(format_percent(0.1234), "12.34%");
        assert_eq!(format_percent(-0.05), "-5.00%");
    }

    #[test]
    fn datetime_round_trip() {
        let dt = Utc.with_ymd_and_hms(2026, 8, 7, 14, 30, 0).unwrap();
        let text = format_datetime(dt);
        assert_eq!(text, "07/08/2026 14:30");
        assert_eq!(
            parse_datetime_cell(&text).valid().unwrap(),
            dt.naive_utc()
        );
    }

    #[test]
    fn decorated_number_strips_decoration() {
        assert_eq!(parse_decorated_number("$10.00").valid(), Some(10.0));
        assert_eq!(parse_decorated_number("-$5.00").valid(), Some(-5.0));
        assert_eq!(parse_decorated_number("$1,234.56").valid(), Some(1234.56));
        assert_eq!(parse_decorated_number("12.34%").valid(), Some(12.34));
        assert_eq!(parse_decorated_number("abc").valid(), None);
        assert_eq!(parse_decorated_number("").valid(), None);
        assert_eq!(parse_decorated_number("-").valid(), None);
    }

    #[test]
    fn datetime_cell_accepts_both_encodings() {
        let expected = NaiveDate::from_ymd_opt(2026, 2, 7)
            .unwrap()
            .and_hms_opt(17, 30, 0)
            .unwrap();
        assert_eq!(
            parse_datetime_cell("07/02/2026 17:30").valid(),
            Some(expected)
        );
        assert_eq!(
            parse_datetime_cell("2026-02-07 17:30").valid(),
            Some(expected)
        );
        assert_eq!(
            parse_datetime_cell("2026-02-07T17:30:00").valid(),
            Some(expected)
        );

        let midnight = NaiveDate::from_ymd_opt(2026, 2, 7)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(parse_datetime_cell("2026-02-07").valid(), Some(midnight));
        assert_eq!(parse_datetime_cell("07/02/2026").valid(), Some(midnight));
        assert_eq!(parse_datetime_cell("soon").valid(), None);
    }

    #[test]
    fn rollup_labels_resolve_to_bucket_starts() {
        let feb = NaiveDate::from_ymd_opt(2026, 2, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(parse_datetime_cell("2026-02").valid(), Some(feb));

        let year = NaiveDate::from_ymd_opt(2026, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(parse_datetime_cell("2026").valid(), Some(year));
        assert_eq!(parse_datetime_cell("20xx").valid(), None);
    }
}
