//! Closing Line Value: how the average entry price compares to the market's
//! price at start time.
//!
//! For each bet the entry price is the size-weighted average over the user's
//! fills placed strictly before the market start. `price_clv` is the closing
//! (start-time) price minus that average; `odds_clv` is the difference of the
//! implied odds. Bets without the needed data are skipped with a named reason
//! rather than dropped silently.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{Bet, Fill};

use super::stats::{median, safe_divide};

/// The slice of a bet the CLV computation needs. Also the wire row of the
/// CLV service request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "api", derive(utoipa::ToSchema))]
pub struct ClvBet {
    #[serde(default)]
    pub condition_id: String,
    #[serde(default)]
    pub asset: String,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub closing_price: Option<f64>,
}

impl From<&Bet> for ClvBet {
    fn from(bet: &Bet) -> Self {
        Self {
            condition_id: bet.condition_id.clone(),
            asset: bet.asset.clone(),
            start_time: bet.start_time,
            closing_price: bet.closing_price,
        }
    }
}

/// Why a bet was excluded from the CLV summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MissingClosingPrice,
    MissingStartTime,
    NoFills,
    NoPreStartFills,
    ZeroPrice,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::MissingClosingPrice => "closing_price_missing",
            SkipReason::MissingStartTime => "start_time_missing",
            SkipReason::NoFills => "no_fills",
            SkipReason::NoPreStartFills => "no_pre_start_fills",
            SkipReason::ZeroPrice => "zero_price",
        }
    }
}

/// Aggregated CLV summary over a set of bets.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClvStats {
    /// Share of computed bets with positive price CLV, in percent.
    pub positive_percent: f64,
    pub zero_percent: f64,
    pub negative_percent: f64,
    /// Mean of `(odds_clv - 1) * 100` over computed bets.
    pub avg_percent: f64,
    pub median_percent: f64,
    pub avg_odds: f64,
    pub median_odds: f64,
    /// Bets with a computed CLV.
    pub computed: usize,
    /// Bets considered.
    pub total: usize,
    /// Skip-reason label -> count.
    pub skipped: BTreeMap<String, usize>,
}

/// Computes the CLV summary for `bets` against the user's trade `fills`.
pub fn compute_clv(bets: &[ClvBet], fills: &[Fill]) -> ClvStats {
    // Group fills by market key once.
    let mut by_key: HashMap<(&str, &str), Vec<&Fill>> = HashMap::new();
    for fill in fills {
        by_key
            .entry((fill.condition_id.as_str(), fill.asset.as_str()))
            .or_default()
            .push(fill);
    }

    fn skip(reason: SkipReason, skipped: &mut BTreeMap<String, usize>) {
        *skipped.entry(reason.as_str().to_string()).or_insert(0) += 1;
    }

    let mut price_clvs = Vec::new();
    let mut odds_clvs = Vec::new();
    let mut skipped: BTreeMap<String, usize> = BTreeMap::new();

    for bet in bets {
        let Some(closing) = bet.closing_price.filter(|p| p.is_finite()) else {
            skip(SkipReason::MissingClosingPrice, &mut skipped);
            continue;
        };
        let Some(start) = bet.start_time else {
            skip(SkipReason::MissingStartTime, &mut skipped);
            continue;
        };
        let Some(group) = by_key.get(&(bet.condition_id.as_str(), bet.asset.as_str())) else {
            skip(SkipReason::NoFills, &mut skipped);
            continue;
        };

        let start_secs = start.timestamp();
        let pre_start: Vec<&&Fill> = group
            .iter()
            .filter(|f| f.timestamp_secs() < start_secs)
            .collect();

        let total_size: f64 = pre_start.iter().map(|f| f.size).sum();
        if total_size == 0.0 {
            skip(SkipReason::NoPreStartFills, &mut skipped);
            continue;
        }

        let weighted: f64 = pre_start.iter().map(|f| f.size * f.price).sum();
        let avg_price = weighted / total_size;

        let price_clv = closing - avg_price;
        let odds_clv = match (safe_divide(1.0, avg_price), safe_divide(1.0, closing)) {
            (Some(entry), Some(close)) => entry - close,
            _ => {
                skip(SkipReason::ZeroPrice, &mut skipped);
                continue;
            }
        };

        price_clvs.push(price_clv);
        odds_clvs.push(odds_clv);
    }

    debug!(
        computed = price_clvs.len(),
        total = bets.len(),
        "clv computation finished"
    );

    summarize(bets.len(), &price_clvs, &odds_clvs, skipped)
}

fn summarize(
    total: usize,
    price_clvs: &[f64],
    odds_clvs: &[f64],
    skipped: BTreeMap<String, usize>,
) -> ClvStats {
    let computed = price_clvs.len();
    if computed == 0 {
        return ClvStats {
            total,
            skipped,
            ..ClvStats::default()
        };
    }

    let count = computed as f64;
    let positive = price_clvs.iter().filter(|&&v| v > 0.0).count() as f64;
    let zero = price_clvs.iter().filter(|&&v| v == 0.0).count() as f64;
    let negative = price_clvs.iter().filter(|&&v| v < 0.0).count() as f64;

    let odds_percent: Vec<f64> = odds_clvs.iter().map(|v| (v - 1.0) * 100.0).collect();

    ClvStats {
        positive_percent: positive / count * 100.0,
        zero_percent: zero / count * 100.0,
        negative_percent: negative / count * 100.0,
        avg_percent: odds_percent.iter().sum::<f64>() / count,
        median_percent: median(&odds_percent).unwrap_or(0.0),
        avg_odds: odds_clvs.iter().sum::<f64>() / count,
        median_odds: median(odds_clvs).unwrap_or(0.0),
        computed,
        total,
        skipped,
    }
}
