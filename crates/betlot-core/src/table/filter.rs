//! Named range filters and the expression syntax that builds them.
//!
//! A filter expression is a whitespace-separated list of `key:min..max`
//! terms. Either side of `..` may be empty (unbounded); a bare value means
//! both bounds. Numeric keys take plain numbers, datetime keys take
//! `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM`.
//!
//! Examples: `roi:0.01..`, `staked:..500`, `date:2025-01-01..2025-03-31`,
//! `pnl:0`.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDateTime;

use crate::util::parse_input_datetime;

use super::{CellKind, ColumnSpec};

/// One side of a range constraint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RangeBound {
    Number(f64),
    Time(NaiveDateTime),
}

/// A `[min, max]` constraint, inclusive, each side optional.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FilterRange {
    pub min: Option<RangeBound>,
    pub max: Option<RangeBound>,
}

impl FilterRange {
    pub fn is_empty(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

/// Error compiling a filter expression.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterParseError {
    UnknownKey(String),
    InvalidBound { key: String, text: String },
}

impl fmt::Display for FilterParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterParseError::UnknownKey(key) => write!(f, "unknown filter key '{key}'"),
            FilterParseError::InvalidBound { key, text } => {
                write!(f, "invalid bound '{text}' for filter '{key}'")
            }
        }
    }
}

impl std::error::Error for FilterParseError {}

/// Compiles a filter expression against the table's columns.
///
/// An empty input compiles to an empty constraint set (everything passes).
pub fn parse_filter_expression(
    input: &str,
    columns: &[ColumnSpec],
) -> Result<BTreeMap<String, FilterRange>, FilterParseError> {
    let mut ranges = BTreeMap::new();

    for term in input.split_whitespace() {
        let Some((key, spec)) = term.split_once(':') else {
            return Err(FilterParseError::UnknownKey(term.to_string()));
        };

        let column = columns
            .iter()
            .find(|c| c.filter_key.as_deref() == Some(key))
            .ok_or_else(|| FilterParseError::UnknownKey(key.to_string()))?;

        let (min_text, max_text) = match spec.split_once("..") {
            Some((min, max)) => (min, max),
            // Bare value: both bounds.
            None => (spec, spec),
        };

        let range = FilterRange {
            min: parse_bound(min_text, column, key)?,
            max: parse_bound(max_text, column, key)?,
        };
        if !range.is_empty() {
            ranges.insert(key.to_string(), range);
        }
    }

    Ok(ranges)
}

fn parse_bound(
    text: &str,
    column: &ColumnSpec,
    key: &str,
) -> Result<Option<RangeBound>, FilterParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    let invalid = || FilterParseError::InvalidBound {
        key: key.to_string(),
        text: text.to_string(),
    };
    match column.kind {
        CellKind::DateTime => parse_input_datetime(text)
            .map(|dt| Some(RangeBound::Time(dt)))
            .ok_or_else(invalid),
        CellKind::Number | CellKind::Text => text
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(|v| Some(RangeBound::Number(v)))
            .ok_or_else(invalid),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn columns() -> Vec<ColumnSpec> {
        vec![
            ColumnSpec::datetime("DATE").with_filter_key("date"),
            ColumnSpec::text("EVENT"),
            ColumnSpec::number("STAKED").with_filter_key("staked"),
            ColumnSpec::number("ROI").percent_scaled().with_filter_key("roi"),
        ]
    }

    #[test]
    fn compiles_min_max_and_open_ranges() {
        let ranges =
            parse_filter_expression("staked:10..500 roi:0.05..", &columns()).unwrap();
        assert_eq!(ranges.len(), 2);
        assert_eq!(
            ranges["staked"],
            FilterRange {
                min: Some(RangeBound::Number(10.0)),
                max: Some(RangeBound::Number(500.0)),
            }
        );
        assert_eq!(ranges["roi"].min, Some(RangeBound::Number(0.05)));
        assert_eq!(ranges["roi"].max, None);
    }

    #[test]
    fn bare_value_binds_both_sides() {
        let ranges = parse_filter_expression("staked:100", &columns()).unwrap();
        assert_eq!(ranges["staked"].min, Some(RangeBound::Number(100.0)));
        assert_eq!(ranges["staked"].max, Some(RangeBound::Number(100.0)));
    }

    #[test]
    fn datetime_keys_take_dates() {
        let ranges =
            parse_filter_expression("date:2025-01-01..2025-03-31", &columns()).unwrap();
        let expected_min = NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(ranges["date"].min, Some(RangeBound::Time(expected_min)));
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = parse_filter_expression("bogus:1..2", &columns()).unwrap_err();
        assert_eq!(err, FilterParseError::UnknownKey("bogus".to_string()));
    }

    #[test]
    fn invalid_bound_is_rejected() {
        let err = parse_filter_expression("staked:abc..", &columns()).unwrap_err();
        assert!(matches!(err, FilterParseError::InvalidBound { .. }));
    }

    #[test]
    fn empty_input_compiles_to_no_constraints() {
        assert!(parse_filter_expression("  ", &columns()).unwrap().is_empty());
    }
}
