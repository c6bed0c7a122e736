//! Cumulative profit series for the chart widgets.
//!
//! One parametrized builder serves every chart on every tab; each chart only
//! differs in its data source and selected period. Custom ranges recompute
//! the cumulative sum within the range — profit from before the range does
//! not carry in.

use chrono::{Datelike, Days, NaiveDate};

use crate::analysis::PeriodBalance;

/// Chart time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartPeriod {
    All,
    LastDays(u64),
    YearToDate,
    Custom { start: NaiveDate, end: NaiveDate },
}

impl ChartPeriod {
    /// Preset cycle used by the period control.
    pub const PRESETS: [ChartPeriod; 5] = [
        ChartPeriod::All,
        ChartPeriod::LastDays(7),
        ChartPeriod::LastDays(30),
        ChartPeriod::LastDays(90),
        ChartPeriod::YearToDate,
    ];

    pub fn label(&self) -> String {
        match self {
            ChartPeriod::All => "all".to_string(),
            ChartPeriod::LastDays(n) => format!("{n}d"),
            ChartPeriod::YearToDate => "ytd".to_string(),
            ChartPeriod::Custom { start, end } => format!("{start}..{end}"),
        }
    }

    /// Next preset in the cycle. A custom period restarts the cycle.
    pub fn next_preset(&self) -> ChartPeriod {
        let pos = Self::PRESETS.iter().position(|p| p == self);
        match pos {
            Some(i) => Self::PRESETS[(i + 1) % Self::PRESETS.len()],
            None => Self::PRESETS[0],
        }
    }

    /// Inclusive date bounds of the window, `None` when unbounded.
    pub fn range(&self, today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        match *self {
            ChartPeriod::All => None,
            ChartPeriod::LastDays(n) => {
                let start = today.checked_sub_days(Days::new(n.saturating_sub(1)))?;
                Some((start, today))
            }
            ChartPeriod::YearToDate => {
                let start = NaiveDate::from_ymd_opt(today.year(), 1, 1)?;
                Some((start, today))
            }
            ChartPeriod::Custom { start, end } => Some((start, end)),
        }
    }
}

/// One chart point: x is the day as a unix timestamp in seconds, y the
/// cumulative profit up to and including that day.
pub type ChartPoint = (f64, f64);

/// Builds the cumulative profit series for the selected period.
pub fn cumulative_series(
    daily: &[PeriodBalance],
    period: ChartPeriod,
    today: NaiveDate,
) -> Vec<ChartPoint> {
    let range = period.range(today);
    let mut points = Vec::new();
    let mut cumulative = 0.0;
    let mut sorted: Vec<&PeriodBalance> = daily.iter().collect();
    sorted.sort_by_key(|b| b.date);

    for balance in sorted {
        if let Some((start, end)) = range
            && (balance.date < start || balance.date > end)
        {
            continue;
        }
        cumulative += balance.profit;
        let ts = balance
            .date
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc().timestamp())
            .unwrap_or(0);
        points.push((ts as f64, cumulative));
    }
    points
}
