//! UI-agnostic view model types.
//!
//! These types represent presentation data without any dependency on a
//! specific rendering framework. The TUI maps them to ratatui styles; a web
//! frontend would map them to CSS classes.

/// Row-level style classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RowStyleClass {
    #[default]
    Normal,
    /// Alternate zebra stripe, assigned by visible-order index.
    Stripe,
    /// Positive value (TUI: green).
    Profit,
    /// Negative value (TUI: red).
    Loss,
    /// De-emphasized (TUI: dark gray).
    Dimmed,
    /// Highlight (TUI: cyan).
    Accent,
}

/// A single table cell with optional per-cell style override.
#[derive(Debug, Clone, Default)]
pub struct ViewCell {
    pub text: String,
    /// `None` = inherit row style.
    pub style: Option<RowStyleClass>,
}

impl ViewCell {
    pub fn plain(text: String) -> Self {
        Self { text, style: None }
    }

    pub fn styled(text: String, style: RowStyleClass) -> Self {
        Self {
            text,
            style: Some(style),
        }
    }

    /// Profit/loss coloring by sign.
    pub fn signed(text: String, value: f64) -> Self {
        let style = if value < 0.0 {
            RowStyleClass::Loss
        } else {
            RowStyleClass::Profit
        };
        Self::styled(text, style)
    }
}

/// One table row, parameterized by entity ID type.
#[derive(Debug, Clone)]
pub struct ViewRow<Id> {
    pub id: Id,
    pub cells: Vec<ViewCell>,
    pub style: RowStyleClass,
}

/// Complete table ready to be rendered by any frontend.
#[derive(Debug, Clone)]
pub struct TableViewModel<Id> {
    pub title: String,
    /// Headers already carrying the sort glyph on the active column.
    pub headers: Vec<String>,
    pub widths: Vec<u16>,
    pub rows: Vec<ViewRow<Id>>,
    pub sort_column: Option<usize>,
    pub sort_ascending: bool,
    /// Pagination label (or totals line) shown under the table.
    pub footer: Option<String>,
    pub prev_enabled: bool,
    pub next_enabled: bool,
}

/// Appends the direction glyph to the active column's header.
pub fn decorate_headers(
    titles: impl IntoIterator<Item = String>,
    sort_column: Option<usize>,
    ascending: bool,
) -> Vec<String> {
    titles
        .into_iter()
        .enumerate()
        .map(|(i, title)| {
            if sort_column == Some(i) {
                format!("{}{}", title, if ascending { "▲" } else { "▼" })
            } else {
                title
            }
        })
        .collect()
}

/// Zebra stripe by visible-order index.
pub fn stripe_for(visible_index: usize) -> RowStyleClass {
    if visible_index % 2 == 0 {
        RowStyleClass::Normal
    } else {
        RowStyleClass::Stripe
    }
}
