//! Cumulative profit chart.

use chrono::DateTime;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::symbols;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph};

use crate::chart::{ChartPeriod, ChartPoint};
use crate::fmt::format_currency;
use crate::tui::style::Styles;

/// Renders the cumulative profit line for the selected period.
pub fn render_chart(frame: &mut Frame, area: Rect, points: &[ChartPoint], period: ChartPeriod) {
    let title = format!(" Cumulative Profit [{}] ", period.label());

    if points.len() < 2 {
        let empty = Paragraph::new("not enough data for this period")
            .style(Styles::dim())
            .block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(empty, area);
        return;
    }

    let x_min = points.first().map(|p| p.0).unwrap_or(0.0);
    let x_max = points.last().map(|p| p.0).unwrap_or(1.0);
    let (mut y_min, mut y_max) = points
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.1), hi.max(p.1))
        });
    // Flat series still need a visible band.
    if (y_max - y_min).abs() < f64::EPSILON {
        y_min -= 1.0;
        y_max += 1.0;
    }

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Styles::chart())
        .data(points);

    let x_labels = vec![
        Span::styled(date_label(x_min), Styles::dim()),
        Span::styled(date_label((x_min + x_max) / 2.0), Styles::dim()),
        Span::styled(date_label(x_max), Styles::dim()),
    ];
    let y_labels = vec![
        Span::styled(format_currency(y_min), Styles::dim()),
        Span::styled(format_currency((y_min + y_max) / 2.0), Styles::dim()),
        Span::styled(format_currency(y_max), Styles::dim()),
    ];

    let chart = Chart::new(vec![dataset])
        .block(Block::default().borders(Borders::ALL).title(title))
        .x_axis(Axis::default().bounds([x_min, x_max]).labels(x_labels))
        .y_axis(Axis::default().bounds([y_min, y_max]).labels(y_labels));

    frame.render_widget(chart, area);
}

fn date_label(ts: f64) -> String {
    DateTime::from_timestamp(ts as i64, 0)
        .map(|dt| dt.format("%d/%m").to_string())
        .unwrap_or_else(|| "-".to_string())
}
