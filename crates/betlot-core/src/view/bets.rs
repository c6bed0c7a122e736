//! Bet table: column layout, cell rendering, and the view model builder.

use crate::fmt::{
    ParseOutcome, format_currency, format_datetime, format_percent, format_quantity, format_tags,
    parse_decorated_number,
};
use crate::model::Bet;
use crate::table::{ColumnSpec, TableController};

use super::common::{TableViewModel, ViewCell, ViewRow, decorate_headers, stripe_for};

/// Columns colored by sign (PNL, PROFIT, ROI).
const SIGNED_COLUMNS: [usize; 3] = [6, 7, 8];

/// Column layout of the bet table. Filter keys match the filter expression
/// syntax surfaced in the UI.
pub fn bet_columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::datetime("DATE").with_filter_key("date"),
        ColumnSpec::text("EVENT"),
        ColumnSpec::text("BET"),
        ColumnSpec::number("BOUGHT").with_filter_key("bought"),
        ColumnSpec::number("PRICE").with_filter_key("price"),
        ColumnSpec::number("STAKED").with_filter_key("staked"),
        ColumnSpec::number("PNL").with_filter_key("pnl"),
        ColumnSpec::number("PROFIT").with_filter_key("profit"),
        ColumnSpec::number("ROI").percent_scaled().with_filter_key("roi"),
        ColumnSpec::text("TAGS"),
    ]
}

fn bet_cells(bet: &Bet) -> Vec<String> {
    vec![
        format_datetime(bet.end_date),
        bet.title.clone(),
        bet.outcome.clone(),
        format_quantity(bet.total_bought),
        format_quantity(bet.avg_price),
        format_currency(bet.staked()),
        format_currency(bet.realized_pnl),
        format_currency(bet.total_profit()),
        bet.roi().map(format_percent).unwrap_or_else(|| "-".to_string()),
        format_tags(&bet.tags),
    ]
}

/// Builds the bet table controller over rendered cells.
pub fn bets_table(bets: &[Bet]) -> TableController {
    TableController::new(bet_columns(), bets.iter().map(bet_cells).collect())
}

/// Builds the view model for the current page.
pub fn build_bets_view(ctrl: &TableController, widths: &[u16]) -> TableViewModel<usize> {
    let sort = ctrl.sort_state();

    let title = if ctrl.active_filter_count() > 0 {
        format!(
            " Bets [{}/{}] (filters: {}) ",
            ctrl.filtered_len(),
            ctrl.rows().len(),
            ctrl.active_filter_count()
        )
    } else {
        format!(" Bets [{}] ", ctrl.rows().len())
    };

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
        title,
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
    use crate::view::RowStyleClass;
    use chrono::{TimeZone, Utc};

    fn bet(title: &str, pnl: f64) -> Bet {
        Bet {
            end_date: Utc.with_ymd_and_hms(2026, 2, 7, 17, 0, 0).unwrap(),
            title: title.into(),
            outcome: "Yes".into(),
            slug: String::new(),
            total_bought: 100.0,
            avg_price: 0.5,
            cur_price: None,
            realized_pnl: pnl,
            cash_pnl: None,
            tags: vec!["NBA".into()],
            condition_id: String::new(),
            asset: String::new(),
            start_time: None,
            closing_price: None,
        }
    }

    #[test]
    fn cells_render_in_display_format() {
        let cells = bet_cells(&bet("event", -5.0));
        assert_eq!(cells[0], "07/02/2026 17:00");
        assert_eq!(cells[5], "$50.00");
        assert_eq!(cells[6], "-$5.00");
        assert_eq!(cells[8], "-10.00%"); // -5 / 50
        assert_eq!(cells[9], "NBA");
    }

    #[test]
    fn signed_columns_carry_profit_loss_styles() {
        let ctrl = bets_table(&[bet("a", 10.0), bet("b", -3.0)]);
        let view = build_bets_view(&ctrl, &[10; 10]);
        assert_eq!(view.rows[0].cells[6].style, Some(RowStyleClass::Profit));
        assert_eq!(view.rows[1].cells[6].style, Some(RowStyleClass::Loss));
        // Zebra stripes by visible index.
        assert_eq!(view.rows[0].style, RowStyleClass::Normal);
        assert_eq!(view.rows[1].style, RowStyleClass::Stripe);
    }

    #[test]
    fn active_sort_column_is_decorated() {
        let mut ctrl = bets_table(&[bet("a", 1.0)]);
        ctrl.sort_by(6);
        let view = build_bets_view(&ctrl, &[10; 10]);
        assert_eq!(view.headers[6], "PNL▲");
        assert_eq!(view.headers[7], "PROFIT");
    }
}
