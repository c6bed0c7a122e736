//! JSON export loading.

use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::info;

use super::{Portfolio, TradeHistory};

/// Error loading an export file.
#[derive(Debug)]
pub enum LoadError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "failed to read export: {e}"),
            LoadError::Parse(e) => write!(f, "failed to parse export: {e}"),
        }
    }
}

impl std::error::Error for LoadError {}

impl From<std::io::Error> for LoadError {
    fn from(e: std::io::Error) -> Self {
        LoadError::Io(e)
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(e: serde_json::Error) -> Self {
        LoadError::Parse(e)
    }
}

/// Loads a betting export (`{ userAddress, bets: [...] }`).
pub fn load_portfolio(path: &Path) -> Result<Portfolio, LoadError> {
    let reader = BufReader::new(File::open(path)?);
    let portfolio: Portfolio = serde_json::from_reader(reader)?;
    info!(
        path = %path.display(),
        bets = portfolio.bets.len(),
        user = %portfolio.user_address,
        "loaded portfolio export"
    );
    Ok(portfolio)
}

/// Loads a trade activity export (`{ userAddress, trades: [...] }`).
pub fn load_trade_history(path: &Path) -> Result<TradeHistory, LoadError> {
    let reader = BufReader::new(File::open(path)?);
    let history: TradeHistory = serde_json::from_reader(reader)?;
    info!(
        path = %path.display(),
        trades = history.trades.len(),
        user = %history.user_address,
        "loaded trade history export"
    );
    Ok(history)
}
