//! Generic table controller: canonical row order, named range filters,
//! pagination, and the sort/filter parse policies.
//!
//! The controller owns display strings, not typed values: sorting and
//! filtering both re-parse the text the user actually sees in the table.
//! Sorting substitutes zero for unparsable cells; filtering keeps
//! them (fail-open). Both policies go through [`ParseOutcome`] so the choice
//! is explicit at each call site.

mod filter;
mod width;

pub use filter::{FilterParseError, FilterRange, RangeBound, parse_filter_expression};
pub use width::{MIN_COLUMN_WIDTH, WIDTH_PADDING, auto_fit_width, natural_widths};

use std::collections::BTreeMap;

use crate::fmt::{ParseOutcome, parse_datetime_cell, parse_decorated_number};

/// How a column's text is interpreted for sorting and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Number,
    Text,
    DateTime,
}

/// Column description: display title, interpretation, optional filter key.
#[derive(Debug, Clone)]
pub struct ColumnSpec {
    pub title: String,
    pub kind: CellKind,
    /// Name under which range filters address this column.
    pub filter_key: Option<String>,
    /// Display text is a percentage; parsed values are divided by 100 before
    /// range comparison, so bounds are expressed in fractional units.
    pub percent_scaled: bool,
}

impl ColumnSpec {
    pub fn number(title: &str) -> Self {
        Self::new(title, CellKind::Number)
    }

    pub fn text(title: &str) -> Self {
        Self::new(title, CellKind::Text)
    }

    pub fn datetime(title: &str) -> Self {
        Self::new(title, CellKind::DateTime)
    }

    fn new(title: &str, kind: CellKind) -> Self {
        Self {
            title: title.to_string(),
            kind,
            filter_key: None,
            percent_scaled: false,
        }
    }

    pub fn with_filter_key(mut self, key: &str) -> Self {
        self.filter_key = Some(key.to_string());
        self
    }

    pub fn percent_scaled(mut self) -> Self {
        self.percent_scaled = true;
        self
    }
}

/// One table row: display cells plus the stable original-order position.
#[derive(Debug, Clone)]
pub struct Row {
    pub cells: Vec<String>,
    pub origin: usize,
}

/// Current sort: `None` column means unsorted (original or last-sorted order).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState {
    pub column: Option<usize>,
    pub ascending: bool,
}

/// Pagination state; `current_page` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    pub items_per_page: usize,
    pub current_page: usize,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            items_per_page: 50,
            current_page: 1,
        }
    }
}

/// Table state machine: full row set, active filters, sort, page.
#[derive(Debug, Clone)]
pub struct TableController {
    columns: Vec<ColumnSpec>,
    /// Canonical order. Sorting reorders this vector in place.
    rows: Vec<Row>,
    /// Indices into `rows` passing all filters, in canonical order.
    filtered: Vec<usize>,
    filters: BTreeMap<String, FilterRange>,
    sort: SortState,
    page: PageState,
}

impl TableController {
    /// Builds a controller over cell matrices; each row is one `Vec` of
    /// display strings matching `columns` by position.
    pub fn new(columns: Vec<ColumnSpec>, cell_rows: Vec<Vec<String>>) -> Self {
        let rows: Vec<Row> = cell_rows
            .into_iter()
            .enumerate()
            .map(|(origin, cells)| Row { cells, origin })
            .collect();
        let filtered = (0..rows.len()).collect();
        Self {
            columns,
            rows,
            filtered,
            filters: BTreeMap::new(),
            sort: SortState::default(),
            page: PageState::default(),
        }
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    /// Full row set in canonical (current) order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn sort_state(&self) -> SortState {
        self.sort
    }

    pub fn page_state(&self) -> PageState {
        self.page
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    pub fn active_filter_count(&self) -> usize {
        self.filters.len()
    }

    // -----------------------------------------------------------------------
    // Sorting
    // -----------------------------------------------------------------------

    /// Sorts by `column`, toggling direction when it is already active.
    pub fn sort_by(&mut self, column: usize) {
        let ascending = match self.sort.column {
            Some(active) if active == column => !self.sort.ascending,
            _ => true,
        };
        self.set_sort(column, ascending);
    }

    /// Sorts by `column` in the given direction.
    ///
    /// Reorders the canonical row order in place (later filtering operates on
    /// the sorted order), re-derives the filtered view, and resets to page 1.
    pub fn set_sort(&mut self, column: usize, ascending: bool) {
        let Some(spec) = self.columns.get(column) else {
            return;
        };
        self.sort = SortState {
            column: Some(column),
            ascending,
        };

        let kind = spec.kind;
        self.rows.sort_by(|a, b| {
            let ord = compare_cells(
                a.cells.get(column).map(String::as_str).unwrap_or(""),
                b.cells.get(column).map(String::as_str).unwrap_or(""),
                kind,
            );
            if ascending { ord } else { ord.reverse() }
        });

        self.refresh_filtered();
        self.page.current_page = 1;
    }

    // -----------------------------------------------------------------------
    // Filtering
    // -----------------------------------------------------------------------

    /// Replaces the active constraint set and re-derives the filtered view.
    pub fn apply_filters(&mut self, ranges: BTreeMap<String, FilterRange>) {
        self.filters = ranges;
        self.refresh_filtered();
        self.page.current_page = 1;
    }

    /// Drops all constraints; the filtered view becomes the full row set in
    /// its current (possibly sorted) order.
    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.refresh_filtered();
        self.page.current_page = 1;
    }

    fn refresh_filtered(&mut self) {
        self.filtered = (0..self.rows.len())
            .filter(|&i| self.row_passes(&self.rows[i]))
            .collect();
        self.clamp_page();
    }

    /// A row passes iff it satisfies every active constraint. A cell that
    /// cannot be located or parsed passes its constraint (fail-open):
    /// dropping unparsable rows silently would hide data.
    fn row_passes(&self, row: &Row) -> bool {
        self.filters.iter().all(|(key, range)| {
            let Some((idx, spec)) = self
                .columns
                .iter()
                .enumerate()
                .find(|(_, c)| c.filter_key.as_deref() == Some(key.as_str()))
            else {
                return true;
            };
            let Some(text) = row.cells.get(idx) else {
                return true;
            };
            match spec.kind {
                CellKind::DateTime => match parse_datetime_cell(text) {
                    ParseOutcome::Valid(dt) => time_in_range(dt, range),
                    ParseOutcome::Unparsable => true,
                },
                CellKind::Number | CellKind::Text => match parse_decorated_number(text) {
                    ParseOutcome::Valid(v) => {
                        let v = if spec.percent_scaled { v / 100.0 } else { v };
                        number_in_range(v, range)
                    }
                    ParseOutcome::Unparsable => true,
                },
            }
        })
    }

    // -----------------------------------------------------------------------
    // Pagination
    // -----------------------------------------------------------------------

    pub fn total_pages(&self) -> usize {
        self.filtered.len().div_ceil(self.page.items_per_page)
    }

    pub fn set_items_per_page(&mut self, n: usize) {
        self.page.items_per_page = n.max(1);
        self.page.current_page = 1;
    }

    pub fn next_page(&mut self) {
        if self.can_next() {
            self.page.current_page += 1;
        }
    }

    pub fn prev_page(&mut self) {
        if self.can_prev() {
            self.page.current_page -= 1;
        }
    }

    pub fn can_prev(&self) -> bool {
        !self.filtered.is_empty() && self.page.current_page > 1
    }

    pub fn can_next(&self) -> bool {
        !self.filtered.is_empty() && self.page.current_page < self.total_pages()
    }

    /// Indices (into [`rows`](Self::rows)) of the current page's slice of the
    /// filtered view, in filtered order.
    pub fn page_indices(&self) -> &[usize] {
        let start = (self.page.current_page - 1) * self.page.items_per_page;
        let end = (start + self.page.items_per_page).min(self.filtered.len());
        if start >= end {
            &[]
        } else {
            &self.filtered[start..end]
        }
    }

    /// Rows of the current page, in filtered order.
    pub fn page_rows(&self) -> impl Iterator<Item = &Row> {
        self.page_indices().iter().map(|&i| &self.rows[i])
    }

    /// All rows passing the active filters, in filtered order (every page).
    pub fn filtered_rows(&self) -> impl Iterator<Item = &Row> {
        self.filtered.iter().map(|&i| &self.rows[i])
    }

    /// The dashboard's pagination label.
    pub fn page_label(&self) -> String {
        let n = self.filtered.len();
        if n == 0 {
            return "Nenhum resultado encontrado".to_string();
        }
        let p = self.page.current_page;
        let start = (p - 1) * self.page.items_per_page + 1;
        let end = (p * self.page.items_per_page).min(n);
        format!("Página {} de {} ({}-{} de {})", p, self.total_pages(), start, end, n)
    }

    fn clamp_page(&mut self) {
        let max = self.total_pages().max(1);
        if self.page.current_page > max {
            self.page.current_page = max;
        }
        if self.page.current_page == 0 {
            self.page.current_page = 1;
        }
    }
}

fn number_in_range(v: f64, range: &FilterRange) -> bool {
    if let Some(RangeBound::Number(min)) = range.min
        && v < min
    {
        return false;
    }
    if let Some(RangeBound::Number(max)) = range.max
        && v > max
    {
        return false;
    }
    true
}

fn time_in_range(dt: chrono::NaiveDateTime, range: &FilterRange) -> bool {
    if let Some(RangeBound::Time(min)) = range.min
        && dt < min
    {
        return false;
    }
    if let Some(RangeBound::Time(max)) = range.max
        && dt > max
    {
        return false;
    }
    true
}

fn compare_cells(a: &str, b: &str, kind: CellKind) -> std::cmp::Ordering {
    use std::cmp::Ordering;
    match kind {
        CellKind::Number => {
            // Unparsable cells sort as zero. This can misorder blank cells
            // between negative and positive values; kept as shipped.
            let a = parse_decorated_number(a).unwrap_or(0.0);
            let b = parse_decorated_number(b).unwrap_or(0.0);
            a.partial_cmp(&b).unwrap_or(Ordering::Equal)
        }
        CellKind::DateTime => {
            let a = parse_datetime_cell(a)
                .valid()
                .map(|dt| dt.and_utc().timestamp())
                .unwrap_or(0);
            let b = parse_datetime_cell(b)
                .valid()
                .map(|dt| dt.and_utc().timestamp())
                .unwrap_or(0);
            a.cmp(&b)
        }
        CellKind::Text => {
            let a = a.trim().to_lowercase();
            let b = b.trim().to_lowercase();
            a.cmp(&b)
        }
    }
}
