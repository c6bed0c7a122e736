//! Drawdown over the daily profit series.
//!
//! Works on the cumulative profit curve (and its flat-staking twin): the
//! drawdown at a day is the distance from the running peak down to the
//! cumulative value. Reported are the maximum in both measures, the window of
//! the maximum profit drawdown (peak day to recovery day, or to the trough if
//! the curve never recovered), and the median over strictly-positive
//! drawdown values.

use chrono::NaiveDate;

use super::rollup::PeriodBalance;
use super::stats::median;

/// Drawdown summary for a (possibly range-filtered) daily series.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DrawdownReport {
    pub max_profit: f64,
    pub max_flat: f64,
    pub median_profit: f64,
    pub median_flat: f64,
    pub days: i64,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

/// Computes the drawdown report over daily balances.
///
/// Days with zero profit are ignored, matching the source series which only
/// materializes days that settled bets. `range` bounds are inclusive.
pub fn compute_drawdown(
    daily: &[PeriodBalance],
    range: Option<(NaiveDate, NaiveDate)>,
) -> DrawdownReport {
    let mut series: Vec<&PeriodBalance> = daily
        .iter()
        .filter(|b| b.profit != 0.0)
        .filter(|b| match range {
            Some((from, to)) => b.date >= from && b.date <= to,
            None => true,
        })
        .collect();
    series.sort_by_key(|b| b.date);

    if series.is_empty() {
        return DrawdownReport::default();
    }

    // Cumulative curves and their expanding peaks.
    let mut cum_profit = Vec::with_capacity(series.len());
    let mut cum_flat = Vec::with_capacity(series.len());
    let (mut acc_p, mut acc_f) = (0.0, 0.0);
    for b in &series {
        acc_p += b.profit;
        acc_f += b.units;
        cum_profit.push(acc_p);
        cum_flat.push(acc_f);
    }

    let dd_profit = drawdowns(&cum_profit);
    let dd_flat = drawdowns(&cum_flat);

    let (max_idx, max_profit) = dd_profit
        .iter()
        .copied()
        .enumerate()
        .fold((0, 0.0), |best, (i, v)| if v > best.1 { (i, v) } else { best });
    let max_flat = dd_flat.iter().copied().fold(0.0, f64::max);

    let mut days = 0;
    let mut start = None;
    let mut end = None;
    if max_profit > 0.0 {
        let peak_value = peak_at(&cum_profit, max_idx);
        // First day the peak value was reached.
        let peak_idx = cum_profit
            .iter()
            .position(|&v| v == peak_value)
            .unwrap_or(max_idx);
        // Recovery: first day at or above the peak after the trough.
        let end_idx = cum_profit[max_idx..]
            .iter()
            .position(|&v| v >= peak_value)
            .map(|off| max_idx + off)
            .unwrap_or(max_idx);

        let start_date = series[peak_idx].date;
        let end_date = series[end_idx].date;
        days = (end_date - start_date).num_days();
        start = Some(start_date);
        end = Some(end_date);
    }

    let positive: Vec<f64> = dd_profit.iter().copied().filter(|&v| v > 0.0).collect();
    let positive_flat: Vec<f64> = dd_flat.iter().copied().filter(|&v| v > 0.0).collect();

    DrawdownReport {
        max_profit,
        max_flat,
        median_profit: median(&positive).unwrap_or(0.0),
        median_flat: median(&positive_flat).unwrap_or(0.0),
        days,
        start,
        end,
    }
}

/// Peak-minus-value series (always >= 0).
fn drawdowns(cumulative: &[f64]) -> Vec<f64> {
    let mut peak = f64::NEG_INFINITY;
    cumulative
        .iter()
        .map(|&v| {
            peak = peak.max(v);
            peak - v
        })
        .collect()
}

fn peak_at(cumulative: &[f64], idx: usize) -> f64 {
    cumulative[..=idx]
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32, profit: f64) -> PeriodBalance {
        let date = NaiveDate::from_ymd_opt(2026, 3, d).unwrap();
        PeriodBalance {
            date,
            label: date.format("%Y-%m-%d").to_string(),
            profit,
            volume: profit.abs() * 10.0,
            roi: None,
            units: profit / 10.0,
            bets: 1,
        }
    }

    #[test]
    fn empty_series_yields_zeroed_report() {
        let report = compute_drawdown(&[], None);
        assert_eq!(report, DrawdownReport::default());
        assert!(report.start.is_none());
    }

    #[test]
    fn max_drawdown_window_runs_peak_to_recovery() {
        // Cumulative: 10, 30, 10, 5, 35. Peak 30 on day 2, trough 5 on day 4,
        // recovered (>= 30) on day 5. Max drawdown 25.
        let daily = vec![
            day(1, 10.0),
            day(2, 20.0),
            day(3, -20.0),
            day(4, -5.0),
            day(5, 30.0),
        ];
        let report = compute_drawdown(&daily, None);
        assert!((report.max_profit - 25.0).abs() < 1e-12);
        assert_eq!(report.start, NaiveDate::from_ymd_opt(2026, 3, 2));
        assert_eq!(report.end, NaiveDate::from_ymd_opt(2026, 3, 5));
        assert_eq!(report.days, 3);
        // Drawdowns: 0, 0, 20, 25, 0 -> positive [20, 25] -> median 22.5
        assert!((report.median_profit - 22.5).abs() < 1e-12);
    }

    #[test]
    fn unrecovered_drawdown_ends_at_trough() {
        // Cumulative: 10, 30, 5 — never recovers.
        let daily = vec![day(1, 10.0), day(2, 20.0), day(3, -25.0)];
        let report = compute_drawdown(&daily, None);
        assert!((report.max_profit - 25.0).abs() < 1e-12);
        assert_eq!(report.start, NaiveDate::from_ymd_opt(2026, 3, 2));
        assert_eq!(report.end, NaiveDate::from_ymd_opt(2026, 3, 3));
        assert_eq!(report.days, 1);
    }

    #[test]
    fn range_filter_is_inclusive() {
        let daily = vec![
            day(1, 10.0),
            day(2, 20.0),
            day(3, -20.0),
            day(4, -5.0),
            day(5, 30.0),
        ];
        let from = NaiveDate::from_ymd_opt(2026, 3, 3).unwrap();
        let to = NaiveDate::from_ymd_opt(2026, 3, 5).unwrap();
        // Within the window the curve is -20, -25, 5: peak -20, trough -25.
        let report = compute_drawdown(&daily, Some((from, to)));
        assert!((report.max_profit - 5.0).abs() < 1e-12);
    }

    #[test]
    fn zero_profit_days_are_ignored() {
        let daily = vec![day(1, 10.0), day(2, 0.0), day(3, -5.0)];
        let report = compute_drawdown(&daily, None);
        assert!((report.max_profit - 5.0).abs() < 1e-12);
    }
}
