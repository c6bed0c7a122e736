//! Summary tab: rollup table, totals strip, cumulative chart, drawdown panel.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::analysis::{DrawdownReport, compute_drawdown};
use crate::chart::cumulative_series;
use crate::fmt::{format_currency, format_day};
use crate::tui::state::AppState;
use crate::tui::style::Styles;
use crate::view::{build_summary_view, filtered_totals, totals_line};

use super::chart::render_chart;
use super::table::render_table_pane;

/// Renders the whole summary tab.
pub fn render_summary_tab(frame: &mut Frame, area: Rect, state: &mut AppState) {
    let halves = Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    // Left: rollup table + totals strip.
    let left = Layout::vertical([Constraint::Min(5), Constraint::Length(1)]).split(halves[0]);

    let granularity = state.summary_tab.granularity;
    let view = {
        let pane = &state.summary_tab.pane;
        build_summary_view(&pane.table, granularity, &pane.widths)
    };
    render_table_pane(frame, left[0], &mut state.summary_tab.pane, &view);

    let totals = filtered_totals(&state.summary_tab.pane.table);
    let strip = totals_line(&totals);
    let strip_style = if totals.profit < 0.0 {
        Styles::loss()
    } else {
        Styles::profit()
    };
    frame.render_widget(Paragraph::new(strip).style(strip_style), left[1]);

    // Right: chart over the drawdown panel.
    let right = Layout::vertical([Constraint::Min(6), Constraint::Length(7)]).split(halves[1]);

    let period = state.summary_tab.chart_period;
    let points = cumulative_series(&state.daily, period, state.today);
    render_chart(frame, right[0], &points, period);

    let report = compute_drawdown(&state.daily, state.chart_range());
    render_drawdown(frame, right[1], &report);
}

/// Renders the drawdown panel for the chart's period.
pub fn render_drawdown(frame: &mut Frame, area: Rect, report: &DrawdownReport) {
    let block = Block::default().borders(Borders::ALL).title(" Drawdown ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let window = match (report.start, report.end) {
        (Some(start), Some(end)) => format!(
            "{} days, {} → {}",
            report.days,
            format_day(start),
            format_day(end)
        ),
        _ => "N/A".to_string(),
    };

    let lines = vec![
        metric_line(
            "Max (profit)   ",
            format_currency(report.max_profit),
            Some(window.as_str()),
        ),
        metric_line("Max (units)    ", format!("{:.2}", report.max_flat), None),
        metric_line(
            "Median (profit)",
            format_currency(report.median_profit),
            None,
        ),
        metric_line("Median (units) ", format!("{:.2}", report.median_flat), None),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

fn metric_line(label: &str, value: String, window: Option<&str>) -> Line<'static> {
    let mut spans = vec![
        Span::styled(format!("{label}  "), Styles::default()),
        Span::styled(value, Styles::loss()),
    ];
    if let Some(window) = window {
        spans.push(Span::styled(format!("  ({window})"), Styles::dim()));
    }
    Line::from(spans)
}
