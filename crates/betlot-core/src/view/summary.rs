//! Summary tab: period rollup table plus the totals line.

use crate::analysis::{Granularity, PeriodBalance, RollupTotals, safe_divide};
use crate::fmt::{
    ParseOutcome, format_currency, format_percent, parse_decorated_number,
};
use crate::table::{ColumnSpec, TableController};

use super::common::{TableViewModel, ViewCell, ViewRow, decorate_headers, stripe_for};

const SIGNED_COLUMNS: [usize; 3] = [1, 3, 4];

fn summary_columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::datetime("PERIOD").with_filter_key("date"),
        ColumnSpec::number("PROFIT").with_filter_key("profit"),
        ColumnSpec::number("VOLUME").with_filter_key("volume"),
        ColumnSpec::number("ROI").percent_scaled().with_filter_key("roi"),
        ColumnSpec::number("UNITS").with_filter_key("units"),
        ColumnSpec::number("BETS").with_filter_key("bets"),
    ]
}

fn balance_cells(balance: &PeriodBalance) -> Vec<String> {
    vec![
        balance.label.clone(),
        format_currency(balance.profit),
        format_currency(balance.volume),
        balance
            .roi
            .map(format_percent)
            .unwrap_or_else(|| "-".to_string()),
        format!("{:.2}", balance.units),
        balance.bets.to_string(),
    ]
}

/// Builds the rollup table, newest period first (the dashboard default).
pub fn summary_table(balances: &[PeriodBalance]) -> TableController {
    let mut ctrl =
        TableController::new(summary_columns(), balances.iter().map(balance_cells).collect());
    ctrl.set_sort(0, false);
    ctrl
}

/// Totals over the rows passing the active filters — not just the visible
/// page — matching the dashboard's totals strip.
pub fn filtered_totals(ctrl: &TableController) -> RollupTotals {
    let mut profit = 0.0;
    let mut units = 0.0;
    let mut roi_sum = 0.0;
    let mut count = 0usize;
    for row in ctrl.filtered_rows() {
        if let Some(ParseOutcome::Valid(v)) = row.cells.get(1).map(|t| parse_decorated_number(t)) {
            profit += v;
        }
        if let Some(ParseOutcome::Valid(v)) = row.cells.get(4).map(|t| parse_decorated_number(t)) {
            units += v;
        }
        if let Some(ParseOutcome::Valid(v)) = row.cells.get(3).map(|t| parse_decorated_number(t)) {
            roi_sum += v / 100.0;
        }
        count += 1;
    }
    RollupTotals {
        profit,
        units,
        avg_roi: safe_divide(roi_sum, count as f64).unwrap_or(0.0),
    }
}

/// The totals strip under the summary table.
pub fn totals_line(totals: &RollupTotals) -> String {
    format!(
        "Total: {}  Units: {:.2}  Avg ROI: {}",
        format_currency(totals.profit),
        totals.units,
        format_percent(totals.avg_roi)
    )
}

/// Builds the view model for the summary table.
pub fn build_summary_view(
    ctrl: &TableController,
    granularity: Granularity,
    widths: &[u16],
) -> TableViewModel<usize> {
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
        title: format!(" Summary [{}] [{}] ", granularity.name(), ctrl.filtered_len()),
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

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn balance(d: u32, profit: f64) -> PeriodBalance {
        let date = NaiveDate::from_ymd_opt(2026, 2, d).unwrap();
        PeriodBalance {
            date,
            label: date.format("%Y-%m-%d").to_string(),
            profit,
            volume: profit.abs() * 10.0,
            roi: Some(0.1),
            units: profit / 10.0,
            bets: 2,
        }
    }

    #[test]
    fn newest_period_comes_first() {
        let ctrl = summary_table(&[balance(5, 1.0), balance(7, 2.0), balance(6, 3.0)]);
        let first: Vec<&str> = ctrl.page_rows().map(|r| r.cells[0].as_str()).collect();
        assert_eq!(first, vec!["2026-02-07", "2026-02-06", "2026-02-05"]);
    }

    #[test]
    fn totals_cover_all_filtered_rows_not_just_the_page() {
        let balances: Vec<PeriodBalance> =
            (1..=28).map(|d| balance(d, 10.0)).collect();
        let mut ctrl = summary_table(&balances);
        ctrl.set_items_per_page(10);
        let totals = filtered_totals(&ctrl);
        assert!((totals.profit - 280.0).abs() < 1e-9);
        assert!((totals.avg_roi - 0.1).abs() < 1e-9);
    }

    #[test]
    fn totals_line_formats_the_strip() {
        let line = totals_line(&RollupTotals {
            profit: 1234.5,
            units: 2.5,
            avg_roi: 0.05,
        });
        assert_eq!(line, "Total: $1,234.50  Units: 2.50  Avg ROI: 5.00%");
    }
}
