//! Per-tab state: the table pane plus tab-specific extras.

use std::sync::mpsc::Receiver;

use ratatui::layout::Rect;
use ratatui::widgets::TableState as RatatuiTableState;

use crate::analysis::{Granularity, TagSummary};
use crate::api::client::ClvError;
use crate::api::schema::ClvSummary;
use crate::chart::ChartPeriod;
use crate::table::{MIN_COLUMN_WIDTH, TableController, auto_fit_width, natural_widths};
use crate::tui::resize::ResizeController;

/// Items-per-page options cycled by the pagination control.
pub const ITEMS_PER_PAGE_OPTIONS: [usize; 4] = [25, 50, 100, 200];

/// Where a mouse position lands in a rendered table header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderHit {
    /// The label area of a column (click-to-sort).
    Label(usize),
    /// The boundary after a column (resize affordance).
    Separator(usize),
}

/// Rendered geometry of a table, written by the render pass and read by the
/// mouse handler on the next event.
#[derive(Debug, Clone, Default)]
pub struct TableLayout {
    pub area: Rect,
    pub header_y: u16,
    /// Per-column `(start_x, width)` in screen coordinates.
    pub columns: Vec<(u16, u16)>,
}

impl TableLayout {
    /// Hit-tests a header-row x coordinate.
    pub fn hit(&self, x: u16, y: u16) -> Option<HeaderHit> {
        if y != self.header_y || self.columns.is_empty() {
            return None;
        }
        for (i, &(start, width)) in self.columns.iter().enumerate() {
            let end = start + width;
            if x >= start && x < end {
                return Some(HeaderHit::Label(i));
            }
            // The one-cell gap after the column is its resize affordance.
            if x == end && i + 1 < self.columns.len() {
                return Some(HeaderHit::Separator(i));
            }
        }
        None
    }
}

/// A sortable/filterable/paginated table with its presentation state.
#[derive(Debug)]
pub struct TablePane {
    pub table: TableController,
    /// Current column widths; auto-fit and drag-resize mutate these.
    pub widths: Vec<u16>,
    /// Selected visible row (index into the current page).
    pub selected: usize,
    pub resize: ResizeController,
    pub ratatui_state: RatatuiTableState,
    pub layout: TableLayout,
}

impl TablePane {
    pub fn new(table: TableController) -> Self {
        let widths = natural_widths(&table);
        Self {
            table,
            widths,
            selected: 0,
            resize: ResizeController::new(),
            ratatui_state: RatatuiTableState::default(),
            layout: TableLayout::default(),
        }
    }

    pub fn select_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_down(&mut self) {
        let max = self.table.page_indices().len().saturating_sub(1);
        self.selected = self.selected.saturating_add(1).min(max);
    }

    /// Clamps selection to the current page and syncs the ratatui state.
    pub fn resolve_selection(&mut self) {
        let len = self.table.page_indices().len();
        if len == 0 {
            self.selected = 0;
            self.ratatui_state.select(None);
        } else {
            self.selected = self.selected.min(len - 1);
            self.ratatui_state.select(Some(self.selected));
        }
    }

    /// Cycles the sort column (keyboard `s`).
    pub fn next_sort_column(&mut self) {
        let count = self.table.columns().len();
        if count == 0 {
            return;
        }
        let next = match self.table.sort_state().column {
            Some(col) => (col + 1) % count,
            None => 0,
        };
        self.table.set_sort(next, true);
        self.selected = 0;
    }

    /// Toggles sort direction on the active column (keyboard `r`).
    pub fn toggle_sort_direction(&mut self) {
        if let Some(col) = self.table.sort_state().column {
            self.table.sort_by(col);
            self.selected = 0;
        }
    }

    /// Header click: toggle/select the column.
    pub fn sort_by_click(&mut self, column: usize) {
        self.table.sort_by(column);
        self.selected = 0;
    }

    /// Auto-fits `column` to the visible page content.
    pub fn auto_fit(&mut self, column: usize) {
        let current = self
            .widths
            .get(column)
            .copied()
            .unwrap_or(MIN_COLUMN_WIDTH);
        if let Some(width) = self.widths.get_mut(column) {
            *width = auto_fit_width(&self.table, column, current);
        }
    }

    /// Live width update during a drag.
    pub fn set_width(&mut self, column: usize, width: u16) {
        if let Some(w) = self.widths.get_mut(column) {
            *w = width.max(MIN_COLUMN_WIDTH);
        }
    }

    /// Cycles items-per-page through the preset options.
    pub fn cycle_items_per_page(&mut self) {
        let current = self.table.page_state().items_per_page;
        let next = match ITEMS_PER_PAGE_OPTIONS.iter().position(|&n| n == current) {
            Some(i) => ITEMS_PER_PAGE_OPTIONS[(i + 1) % ITEMS_PER_PAGE_OPTIONS.len()],
            None => ITEMS_PER_PAGE_OPTIONS[0],
        };
        self.table.set_items_per_page(next);
        self.selected = 0;
    }
}

/// State for the bets (BET) tab.
#[derive(Debug)]
pub struct BetsTabState {
    pub pane: TablePane,
}

/// State for the summary (SUM) tab.
#[derive(Debug)]
pub struct SummaryTabState {
    pub pane: TablePane,
    pub granularity: Granularity,
    pub chart_period: ChartPeriod,
    /// Daily view limited to the most recent days (the dashboard default).
    pub limit_recent: bool,
}

/// Days shown by the daily summary when `limit_recent` is on.
pub const RECENT_DAYS: u64 = 10;

/// CLV panel lifecycle on the tags tab.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ClvPanel {
    #[default]
    Hidden,
    Loading,
    Ready(ClvSummary),
    Failed(String),
}

/// State for the tags (TAG) tab.
pub struct TagsTabState {
    pub pane: TablePane,
    /// Summaries backing the table rows, indexed by row origin.
    pub summaries: Vec<TagSummary>,
    pub clv: ClvPanel,
    /// Tag the CLV panel refers to.
    pub clv_tag: Option<String>,
    /// Last successful summary, shown again without a new request.
    pub cached: Option<(String, ClvSummary)>,
    /// In-flight CLV request. Replaced (not cancelled) when re-triggered;
    /// whichever answer lands last wins the poll.
    pub pending: Option<Receiver<Result<ClvSummary, ClvError>>>,
}

impl std::fmt::Debug for TagsTabState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TagsTabState")
            .field("pane", &self.pane)
            .field("clv", &self.clv)
            .field("clv_tag", &self.clv_tag)
            .field("pending", &self.pending.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::ColumnSpec;

    fn pane(rows: usize) -> TablePane {
        let cells = (0..rows).map(|i| vec![format!("{i}")]).collect();
        TablePane::new(TableController::new(vec![ColumnSpec::number("N")], cells))
    }

    #[test]
    fn selection_clamps_to_page() {
        let mut p = pane(3);
        p.select_down();
        p.select_down();
        p.select_down();
        assert_eq!(p.selected, 2);
        p.resolve_selection();
        assert_eq!(p.ratatui_state.selected(), Some(2));
    }

    #[test]
    fn items_per_page_cycles_presets() {
        let mut p = pane(300);
        assert_eq!(p.table.page_state().items_per_page, 50);
        p.cycle_items_per_page();
        assert_eq!(p.table.page_state().items_per_page, 100);
        p.cycle_items_per_page();
        p.cycle_items_per_page();
        assert_eq!(p.table.page_state().items_per_page, 25);
    }

    #[test]
    fn header_hit_test_separates_labels_and_affordances() {
        let layout = TableLayout {
            area: Rect::new(0, 0, 40, 10),
            header_y: 1,
            columns: vec![(1, 6), (8, 6)],
        };
        assert_eq!(layout.hit(2, 1), Some(HeaderHit::Label(0)));
        assert_eq!(layout.hit(7, 1), Some(HeaderHit::Separator(0)));
        assert_eq!(layout.hit(9, 1), Some(HeaderHit::Label(1)));
        // Wrong row
        assert_eq!(layout.hit(2, 2), None);
        // Past the last column there is no affordance
        assert_eq!(layout.hit(14, 1), None);
    }
}
