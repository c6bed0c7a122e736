//! Generic table renderer over a [`TableViewModel`].

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Row, Table};

use crate::tui::state::{TableLayout, TablePane};
use crate::tui::style::Styles;
use crate::view::TableViewModel;

/// Renders a table pane: the table itself plus the pagination footer.
/// Records the rendered geometry in the pane for mouse hit-testing.
pub fn render_table_pane(
    frame: &mut Frame,
    area: Rect,
    pane: &mut TablePane,
    view: &TableViewModel<usize>,
) {
    pane.resolve_selection();

    let chunks = Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).split(area);
    let table_area = chunks[0];

    let header = Row::new(
        view.headers
            .iter()
            .map(|h| Span::styled(h.clone(), Styles::table_header())),
    )
    .style(Styles::table_header())
    .height(1);

    let rows: Vec<Row> = view
        .rows
        .iter()
        .map(|vr| {
            let row_style = Styles::from_class(vr.style);
            let cells: Vec<Span> = vr
                .cells
                .iter()
                .map(|cell| match cell.style {
                    Some(class) => Span::styled(cell.text.clone(), Styles::from_class(class)),
                    None => Span::raw(cell.text.clone()),
                })
                .collect();
            Row::new(cells).style(row_style).height(1)
        })
        .collect();

    let widths: Vec<Constraint> = view
        .widths
        .iter()
        .map(|&w| Constraint::Length(w))
        .collect();

    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .block(Block::default().borders(Borders::ALL).title(view.title.clone()))
        .row_highlight_style(Styles::selected());

    frame.render_widget(Clear, table_area);
    frame.render_stateful_widget(table, table_area, &mut pane.ratatui_state);

    // Record geometry for the mouse handler: columns start inside the border,
    // the header row sits on the first inner line.
    let mut columns = Vec::with_capacity(view.widths.len());
    let mut x = table_area.x + 1;
    for &w in &view.widths {
        columns.push((x, w));
        x += w + 1;
    }
    pane.layout = TableLayout {
        area: table_area,
        header_y: table_area.y + 1,
        columns,
    };

    // Footer: pagination label plus navigation affordances, dimmed when
    // disabled.
    if let Some(label) = &view.footer {
        let prev_style = if view.prev_enabled {
            Styles::help_key()
        } else {
            Styles::dim()
        };
        let next_style = if view.next_enabled {
            Styles::help_key()
        } else {
            Styles::dim()
        };
        let line = Line::from(vec![
            Span::styled("[", prev_style),
            Span::styled(" ◀ ", prev_style),
            Span::raw(" "),
            Span::styled(label.clone(), Styles::default()),
            Span::raw(" "),
            Span::styled(" ▶ ", next_style),
            Span::styled("]", next_style),
        ]);
        frame.render_widget(Paragraph::new(line), chunks[1]);
    }
}
