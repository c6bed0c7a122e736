//! betlot-core — shared library for the betlot ecosystem.
//!
//! Provides:
//! - `model` — bet records and the JSON export loader
//! - `analysis` — profit/volume/ROI stats, rollups, drawdown, tags, CLV
//! - `table` — generic table controller (sorting, range filters, pagination)
//! - `chart` — cumulative profit series with period selection
//! - `fmt` — display formatting and decorated-text parsing
//! - `view` — UI-agnostic table view models
//! - `util` — date and date-range parsing for user input
//!
//! With `api` feature:
//! - `api` — JSON-serializable CLV service types
//!
//! With `client` feature (implies `api`):
//! - `api::client` — blocking HTTP client for the CLV service
//!
//! With `tui` feature (default):
//! - `tui` — TUI rendering (ratatui/crossterm), state, input, widgets

pub mod analysis;
pub mod chart;
pub mod fmt;
pub mod model;
pub mod table;
pub mod util;
pub mod view;

#[cfg(feature = "api")]
pub mod api;

#[cfg(feature = "tui")]
pub mod tui;

/// Crate version, shared by the binaries for `--version` and logging.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
