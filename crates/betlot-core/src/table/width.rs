//! Column width measurement for auto-fit.
//!
//! Widths are measured in terminal cells over the header and the currently
//! visible page only; off-page rows do not count.

use super::{CellKind, TableController};

/// Columns never shrink below this.
pub const MIN_COLUMN_WIDTH: u16 = 8;
/// Breathing room added on top of the measured content width.
pub const WIDTH_PADDING: u16 = 3;
/// Cap for text cells; numeric and datetime cells are measured unwrapped.
const MAX_TEXT_MEASURE: usize = 48;

/// Computes the auto-fit width for `column`.
///
/// Numeric/datetime cells are measured unwrapped. Text cells take the longer
/// of the unwrapped width and the longest line after wrapping at the column's
/// current width, capped at a maximum. The result is the maximum over the
/// header and the visible cells, plus padding, floored at the minimum.
pub fn auto_fit_width(ctrl: &TableController, column: usize, current_width: u16) -> u16 {
    let Some(spec) = ctrl.columns().get(column) else {
        return MIN_COLUMN_WIDTH;
    };

    let mut max_width = spec.title.chars().count();
    for row in ctrl.page_rows() {
        let Some(text) = row.cells.get(column) else {
            continue;
        };
        let text = text.trim();
        if text.is_empty() || text == "-" {
            continue;
        }
        let unwrapped = text.chars().count();
        let cell_width = match spec.kind {
            CellKind::Number | CellKind::DateTime => unwrapped,
            CellKind::Text => {
                let wrapped = longest_wrapped_line(text, current_width as usize);
                unwrapped.max(wrapped).min(MAX_TEXT_MEASURE)
            }
        };
        max_width = max_width.max(cell_width);
    }

    (max_width as u16 + WIDTH_PADDING).max(MIN_COLUMN_WIDTH)
}

/// Default widths for every column: header plus first-page content.
pub fn natural_widths(ctrl: &TableController) -> Vec<u16> {
    (0..ctrl.columns().len())
        .map(|col| auto_fit_width(ctrl, col, MAX_TEXT_MEASURE as u16))
        .collect()
}

/// Longest line after greedy word wrap at `width`. Words longer than the
/// width stay on their own (overflowing) line.
fn longest_wrapped_line(text: &str, width: usize) -> usize {
    if width == 0 {
        return text.chars().count();
    }
    let mut longest = 0;
    let mut line = 0;
    for word in text.split_whitespace() {
        let w = word.chars().count();
        if line == 0 {
            line = w;
        } else if line + 1 + w <= width {
            line += 1 + w;
        } else {
            longest = longest.max(line);
            line = w;
        }
    }
    longest.max(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::ColumnSpec;

    fn controller(event: &str) -> TableController {
        TableController::new(
            vec![ColumnSpec::text("EVENT"), ColumnSpec::number("PNL")],
            vec![vec![event.to_string(), "$1,234.56".to_string()]],
        )
    }

    #[test]
    fn numeric_cells_measure_unwrapped() {
        let ctrl = controller("e");
        // "$1,234.56" is 9 chars + padding
        assert_eq!(auto_fit_width(&ctrl, 1, 10), 9 + WIDTH_PADDING);
    }

    #[test]
    fn header_sets_the_floor_for_short_content() {
        let ctrl = TableController::new(
            vec![ColumnSpec::text("A VERY WIDE HEADER")],
            vec![vec!["x".to_string()]],
        );
        assert_eq!(auto_fit_width(&ctrl, 0, 10), 18 + WIDTH_PADDING);
    }

    #[test]
    fn text_cells_are_capped() {
        let long = "word ".repeat(40);
        let ctrl = controller(long.trim());
        assert_eq!(auto_fit_width(&ctrl, 0, 20), 48 + WIDTH_PADDING);
    }

    #[test]
    fn minimum_width_applies() {
        let ctrl = TableController::new(
            vec![ColumnSpec::text("X")],
            vec![vec!["y".to_string()]],
        );
        assert_eq!(auto_fit_width(&ctrl, 0, 10), MIN_COLUMN_WIDTH);
    }

    #[test]
    fn wrap_measures_longest_line() {
        assert_eq!(longest_wrapped_line("alpha beta gamma", 11), 10);
        assert_eq!(longest_wrapped_line("alpha beta gamma", 100), 16);
        // A word longer than the width overflows on its own line.
        assert_eq!(longest_wrapped_line("hippopotamus at", 5), 12);
    }

    #[test]
    fn only_visible_page_rows_count() {
        let mut rows: Vec<Vec<String>> = (0..60).map(|_| vec!["short".to_string()]).collect();
        rows.push(vec!["a considerably longer cell on page two".to_string()]);
        let mut ctrl = TableController::new(vec![ColumnSpec::text("EVENT")], rows);
        let page1 = auto_fit_width(&ctrl, 0, 48);
        assert_eq!(page1, 8); // "short" under the minimum
        ctrl.next_page();
        assert!(auto_fit_width(&ctrl, 0, 48) > page1);
    }
}
