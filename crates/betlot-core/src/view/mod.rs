//! View models: pure presentation data built from controllers and analysis
//! results, consumed by the TUI widgets.

mod bets;
mod common;
mod summary;
mod tags;

pub use bets::{bet_columns, bets_table, build_bets_view};
pub use common::{RowStyleClass, TableViewModel, ViewCell, ViewRow, decorate_headers, stripe_for};
pub use summary::{build_summary_view, filtered_totals, summary_table, totals_line};
pub use tags::{build_tags_view, tags_table};
