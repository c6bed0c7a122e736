//! Shared application state: the loaded trade history, indexed for CLV.

use std::sync::Arc;

use axum::extract::State;

use betlot_core::model::{Fill, TradeHistory};

/// Trade history loaded at startup; read-only for the process lifetime.
pub(crate) struct TradesIndex {
    pub(crate) user_address: String,
    pub(crate) fills: Vec<Fill>,
}

impl TradesIndex {
    pub(crate) fn new(history: TradeHistory) -> Self {
        Self {
            user_address: history.user_address,
            fills: history.trades,
        }
    }
}

pub(crate) type SharedState = Arc<TradesIndex>;

pub(crate) type AppState = State<SharedState>;
