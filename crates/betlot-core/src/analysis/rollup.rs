//! Daily/monthly/yearly profit rollups.

use std::collections::BTreeMap;

use chrono::{Datelike, Days, NaiveDate};

use crate::model::Bet;

use super::stats::{flat_units, safe_divide, totals};

/// Rollup bucket size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Granularity {
    #[default]
    Daily,
    Monthly,
    Yearly,
}

impl Granularity {
    pub fn name(&self) -> &'static str {
        match self {
            Granularity::Daily => "daily",
            Granularity::Monthly => "monthly",
            Granularity::Yearly => "yearly",
        }
    }

    /// First day of the bucket containing `date`.
    fn bucket_start(&self, date: NaiveDate) -> NaiveDate {
        match self {
            Granularity::Daily => date,
            Granularity::Monthly => date.with_day(1).unwrap_or(date),
            Granularity::Yearly => {
                NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date)
            }
        }
    }

    /// Bucket label: `"2026-02-07"`, `"2026-02"`, or `"2026"`.
    fn label(&self, start: NaiveDate) -> String {
        match self {
            Granularity::Daily => start.format("%Y-%m-%d").to_string(),
            Granularity::Monthly => start.format("%Y-%m").to_string(),
            Granularity::Yearly => start.format("%Y").to_string(),
        }
    }
}

/// One rollup bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodBalance {
    /// Bucket start day (used for ordering and range filters).
    pub date: NaiveDate,
    /// Display label for the bucket.
    pub label: String,
    pub profit: f64,
    pub volume: f64,
    pub roi: Option<f64>,
    /// Flat-staking profit in units.
    pub units: f64,
    pub bets: usize,
}

/// Groups bets by end-date bucket (UTC) and computes per-bucket totals.
/// Buckets are returned in ascending date order.
pub fn rollup(bets: &[Bet], granularity: Granularity) -> Vec<PeriodBalance> {
    let mut buckets: BTreeMap<NaiveDate, Vec<&Bet>> = BTreeMap::new();
    for bet in bets {
        let day = bet.end_date.date_naive();
        buckets
            .entry(granularity.bucket_start(day))
            .or_default()
            .push(bet);
    }

    buckets
        .into_iter()
        .map(|(start, bucket)| {
            let t = totals(bucket.iter().copied());
            PeriodBalance {
                date: start,
                label: granularity.label(start),
                profit: t.profit,
                volume: t.volume,
                roi: t.roi,
                units: flat_units(bucket.iter().copied()),
                bets: bucket.len(),
            }
        })
        .collect()
}

/// Keeps only the buckets falling in the last `n` days counting back from
/// `today` (inclusive). Used for the default daily summary window.
pub fn last_n_days(balances: &[PeriodBalance], n: u64, today: NaiveDate) -> Vec<PeriodBalance> {
    let Some(first) = today.checked_sub_days(Days::new(n.saturating_sub(1))) else {
        return balances.to_vec();
    };
    balances
        .iter()
        .filter(|b| b.date >= first && b.date <= today)
        .cloned()
        .collect()
}

/// Totals line shown under the summary table.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RollupTotals {
    pub profit: f64,
    pub units: f64,
    /// Simple mean of bucket ROIs (buckets without ROI count as zero).
    pub avg_roi: f64,
}

/// Computes the totals line over the currently displayed buckets.
pub fn rollup_totals(balances: &[PeriodBalance]) -> RollupTotals {
    let profit = balances.iter().map(|b| b.profit).sum();
    let units = balances.iter().map(|b| b.units).sum();
    let roi_sum: f64 = balances.iter().filter_map(|b| b.roi).sum();
    RollupTotals {
        profit,
        units,
        avg_roi: safe_divide(roi_sum, balances.len() as f64).unwrap_or(0.0),
    }
}
