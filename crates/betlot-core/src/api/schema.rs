//! Wire types of the CLV endpoint.
//!
//! Field names mirror the dashboard's original JSON contract
//! (`clv_positive_percent`, `avg_clv_odds`, ...).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::analysis::{ClvBet, ClvStats};

/// `POST /api/v1/clv` request body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClvRequest {
    /// Wallet the trade history belongs to.
    pub user_address: String,
    /// Bets to evaluate (typically one tag's bets).
    pub rows: Vec<ClvBet>,
}

/// `POST /api/v1/clv` success response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ClvSummary {
    pub clv_positive_percent: f64,
    pub clv_zero_percent: f64,
    pub clv_negative_percent: f64,
    pub avg_clv_percent: f64,
    pub median_clv_percent: f64,
    pub avg_clv_odds: f64,
    pub median_clv_odds: f64,
    pub computed: usize,
    pub total: usize,
    /// Skip-reason label -> count for bets without a computed CLV.
    #[serde(default)]
    pub skipped: BTreeMap<String, usize>,
}

impl From<ClvStats> for ClvSummary {
    fn from(stats: ClvStats) -> Self {
        Self {
            clv_positive_percent: stats.positive_percent,
            clv_zero_percent: stats.zero_percent,
            clv_negative_percent: stats.negative_percent,
            avg_clv_percent: stats.avg_percent,
            median_clv_percent: stats.median_percent,
            avg_clv_odds: stats.avg_odds,
            median_clv_odds: stats.median_odds,
            computed: stats.computed,
            total: stats.total,
            skipped: stats.skipped,
        }
    }
}

/// Error body returned on any non-success status.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    pub error: String,
}
