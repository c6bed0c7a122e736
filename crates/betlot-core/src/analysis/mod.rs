//! Pure analysis over bet records: totals, period rollups, drawdown,
//! per-tag breakdowns, and Closing Line Value.

mod clv;
mod drawdown;
mod rollup;
mod stats;
mod tags;

pub use clv::{ClvBet, ClvStats, SkipReason, compute_clv};
pub use drawdown::{DrawdownReport, compute_drawdown};
pub use rollup::{Granularity, PeriodBalance, RollupTotals, last_n_days, rollup, rollup_totals};
pub use stats::{Totals, flat_units, median, safe_divide, totals};
pub use tags::{TagSummary, tag_analysis};
