//! Bet and trade records as exported by the data pipeline.

mod loader;

pub use loader::{LoadError, load_portfolio, load_trade_history};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// One position from the betting export.
///
/// `start_time` and `closing_price` are only present when the export was
/// enriched with market price history; CLV computation skips bets without
/// them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bet {
    pub end_date: DateTime<Utc>,
    pub title: String,
    pub outcome: String,
    #[serde(default)]
    pub slug: String,
    #[serde(deserialize_with = "flexible_f64")]
    pub total_bought: f64,
    #[serde(deserialize_with = "flexible_f64")]
    pub avg_price: f64,
    #[serde(default, deserialize_with = "flexible_opt_f64")]
    pub cur_price: Option<f64>,
    #[serde(deserialize_with = "flexible_f64")]
    pub realized_pnl: f64,
    #[serde(default, deserialize_with = "flexible_opt_f64")]
    pub cash_pnl: Option<f64>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub condition_id: String,
    #[serde(default)]
    pub asset: String,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "flexible_opt_f64")]
    pub closing_price: Option<f64>,
}

impl Bet {
    /// Amount put at risk: `total_bought * avg_price`.
    pub fn staked(&self) -> f64 {
        self.total_bought * self.avg_price
    }

    /// Realized plus cash PnL.
    pub fn total_profit(&self) -> f64 {
        self.realized_pnl + self.cash_pnl.unwrap_or(0.0)
    }

    /// Per-bet return on stake. `None` when nothing was staked.
    pub fn roi(&self) -> Option<f64> {
        crate::analysis::safe_divide(self.total_profit(), self.staked())
    }
}

/// A full export: the wallet it belongs to plus every bet.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub user_address: String,
    pub bets: Vec<Bet>,
}

/// One trade fill from the activity export. Timestamps are in milliseconds,
/// as delivered by the upstream API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fill {
    #[serde(default)]
    pub condition_id: String,
    #[serde(default)]
    pub asset: String,
    pub timestamp: i64,
    #[serde(deserialize_with = "flexible_f64")]
    pub size: f64,
    #[serde(deserialize_with = "flexible_f64")]
    pub price: f64,
}

impl Fill {
    /// Fill time in seconds since epoch.
    pub fn timestamp_secs(&self) -> i64 {
        self.timestamp / 1000
    }
}

/// The trade activity export consumed by the CLV service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeHistory {
    pub user_address: String,
    pub trades: Vec<Fill>,
}

/// Numeric export fields arrive as JSON numbers or numeric strings.
fn flexible_f64<'de, D: Deserializer<'de>>(de: D) -> Result<f64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(f64),
        Text(String),
    }
    match Raw::deserialize(de)? {
        Raw::Num(v) => Ok(v),
        Raw::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("invalid number: {s:?}"))),
    }
}

fn flexible_opt_f64<'de, D: Deserializer<'de>>(de: D) -> Result<Option<f64>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(f64),
        Text(String),
        None,
    }
    match Option::<Raw>::deserialize(de)? {
        Some(Raw::Num(v)) => Ok(Some(v)),
        Some(Raw::Text(s)) => {
            let s = s.trim();
            if s.is_empty() {
                Ok(None)
            } else {
                s.parse::<f64>()
                    .map(Some)
                    .map_err(|_| serde::de::Error::custom(format!("invalid number: {s:?}")))
            }
        }
        Some(Raw::None) | None => Ok(None),
    }
}
