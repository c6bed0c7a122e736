//! Tag breakdown table.

use crate::analysis::TagSummary;
use crate::fmt::{ParseOutcome, format_currency, format_percent, parse_decorated_number};
use crate::table::{ColumnSpec, TableController};

use super::common::{TableViewModel, ViewCell, ViewRow, decorate_headers, stripe_for};

const SIGNED_COLUMNS: [usize; 3] = [1, 3, 4];

fn tag_columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::text("TAG"),
        ColumnSpec::number("PROFIT").with_filter_key("profit"),
        ColumnSpec::number("VOLUME").with_filter_key("volume"),
        ColumnSpec::number("ROI").percent_scaled().with_filter_key("roi"),
        ColumnSpec::number("UNITS").with_filter_key("units"),
        ColumnSpec::number("BETS").with_filter_key("bets"),
    ]
}

fn tag_cells(summary: &TagSummary) -> Vec<String> {
    vec![
        summary.tag.clone(),
        format_currency(summary.profit),
        format_currency(summary.volume),
        summary
            .roi
            .map(format_percent)
            .unwrap_or_else(|| "-".to_string()),
        format!("{:.2}", summary.units),
        summary.bets.to_string(),
    ]
}

/// Builds the tag table; the input is already sorted by ROI descending.
pub fn tags_table(summaries: &[TagSummary]) -> TableController {
    TableController::new(tag_columns(), summaries.iter().map(tag_cells).collect())
}

/// Builds the view model for the tag table.
pub fn build_tags_view(ctrl: &TableController, widths: &[u16]) -> TableViewModel<usize> {
    let sort = ctrl.sort_state();
    let rows = ctrl
        .page_rows()
        .enumerate()
        .map(|(visible_idx, row)| {
            let cells = row
                .cells
                .iter()
                .enumerate()
                .map(|(col, text)| {
                    if SIGNED_COLUMNS.contains(&col) {
                        match parse_decorated_number(text) {
                            ParseOutcome::Valid(v) => ViewCell::signed(text.clone(), v),
                            ParseOutcome::Unparsable => ViewCell::plain(text.clone()),
                        }
                    } else {
                        ViewCell::plain(text.clone())
                    }
                })
                .collect();
            ViewRow {
                id: row.origin,
                cells,
                style: stripe_for(visible_idx),
            }
        })
        .collect();

    TableViewModel {
        title: format!(" Tags [{}] ", ctrl.filtered_len()),
        headers: decorate_headers(
            ctrl.columns().iter().map(|c| c.title.clone()),
            sort.column,
            sort.ascending,
        ),
        widths: widths.to_vec(),
        rows,
        sort_column: sort.column,
        sort_ascending: sort.ascending,
        footer: Some(ctrl.page_label()),
        prev_enabled: ctrl.can_prev(),
        next_enabled: ctrl.can_next(),
    }
}
