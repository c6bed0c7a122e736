//! Terminal User Interface for the betlot viewer.
//!
//! An interactive dashboard over a betting export: bets table with range
//! filters, pagination and mouse-resizable columns; daily/monthly/yearly
//! rollups with cumulative chart and drawdown; per-tag breakdown with
//! on-demand CLV analysis.

mod app;
mod event;
mod input;
mod render;
mod resize;
mod state;
mod style;
mod widgets;

pub use app::App;
pub use state::{AnalysisOptions, AppState, Tab};
