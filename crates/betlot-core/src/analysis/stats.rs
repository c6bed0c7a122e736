//! Totals and stake statistics shared by the rollup, tag, and drawdown code.

use crate::model::Bet;

/// Division that treats a zero or non-finite result as "no value".
pub fn safe_divide(num: f64, den: f64) -> Option<f64> {
    if den == 0.0 {
        return None;
    }
    let v = num / den;
    v.is_finite().then_some(v)
}

/// Profit, volume and ROI over a set of bets.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Totals {
    /// Realized plus cash PnL.
    pub profit: f64,
    /// Total amount staked (`total_bought * avg_price`).
    pub volume: f64,
    /// `profit / volume`; `None` when volume is zero.
    pub roi: Option<f64>,
}

/// Computes [`Totals`] over the given bets.
pub fn totals<'a>(bets: impl IntoIterator<Item = &'a Bet>) -> Totals {
    let mut profit = 0.0;
    let mut volume = 0.0;
    for bet in bets {
        profit += bet.total_profit();
        volume += bet.staked();
    }
    Totals {
        profit,
        volume,
        roi: safe_divide(profit, volume),
    }
}

/// Flat-staking profit in units: the sum of per-bet realized returns.
/// Bets with zero stake contribute nothing.
pub fn flat_units<'a>(bets: impl IntoIterator<Item = &'a Bet>) -> f64 {
    bets.into_iter()
        .filter_map(|b| safe_divide(b.realized_pnl, b.staked()))
        .sum()
}

/// Median of a value set. Not stable across NaN inputs; callers filter first.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[mid])
    } else {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    pub(crate) fn bet(profit: f64, bought: f64, price: f64) -> Bet {
        Bet {
            end_date: Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap(),
            title: "event".into(),
            outcome: "Yes".into(),
            slug: String::new(),
            total_bought: bought,
            avg_price: price,
            cur_price: None,
            realized_pnl: profit,
            cash_pnl: None,
            tags: Vec::new(),
            condition_id: String::new(),
            asset: String::new(),
            start_time: None,
            closing_price: None,
        }
    }

    #[test]
    fn safe_divide_guards_zero() {
        assert_eq!(safe_divide(10.0, 2.0), Some(5.0));
        assert_eq!(safe_divide(10.0, 0.0), None);
    }

    #[test]
    fn totals_sum_profit_and_volume() {
        let bets = vec![bet(10.0, 100.0, 0.5), bet(-5.0, 50.0, 0.2)];
        let t = totals(&bets);
        assert_eq!(t.profit, 5.0);
        assert_eq!(t.volume, 60.0);
        assert!((t.roi.unwrap() - 5.0 / 60.0).abs() < 1e-12);
    }

    #[test]
    fn flat_units_skip_zero_stakes() {
        let bets = vec![bet(10.0, 100.0, 0.5), bet(7.0, 0.0, 0.5)];
        // 10/50 = 0.2; the zero-stake bet contributes nothing
        assert!((flat_units(&bets) - 0.2).abs() < 1e-12);
    }

    #[test]
    fn median_odd_and_even() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[4.0, 1.0, 2.0, 3.0]), Some(2.5));
        assert_eq!(median(&[]), None);
    }
}
