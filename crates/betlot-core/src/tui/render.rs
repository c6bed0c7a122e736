//! Main rendering logic for TUI.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::widgets::Paragraph;

use super::state::{AppState, InputMode, Tab};
use super::style::Styles;
use super::widgets::{
    render_clv_popup, render_header, render_help, render_prompt, render_quit_confirm,
    render_summary_tab, render_table_pane,
};
use crate::view::{build_bets_view, build_tags_view};

/// Main render function.
pub fn render(frame: &mut Frame, state: &mut AppState) {
    let area = frame.area();

    let chunks = Layout::vertical([
        Constraint::Length(1), // Header
        Constraint::Min(10),   // Content
        Constraint::Length(1), // Status line
    ])
    .split(area);

    render_header(frame, chunks[0], state);
    render_content(frame, chunks[1], state);

    // Status line: message or key hints.
    let status = state
        .status_message
        .clone()
        .unwrap_or_else(|| " ?:help  /:filter  c:clear  s:sort  [ ]:pages  q:quit".to_string());
    frame.render_widget(Paragraph::new(status).style(Styles::dim()), chunks[2]);

    // Overlays, rendered last.
    if state.current_tab == Tab::Tags {
        render_clv_popup(
            frame,
            area,
            &state.tags_tab.clv,
            state.tags_tab.clv_tag.as_deref(),
        );
    }

    if state.show_help {
        render_help(frame, area, &mut state.help_scroll);
    }

    match state.input_mode {
        InputMode::Filter => render_prompt(
            frame,
            area,
            "Filter",
            &state.filter_input,
            "key:min..max, space-separated — e.g. roi:0.05.. staked:..500 date:2025-01-01..",
            state.filter_error.as_deref(),
        ),
        InputMode::Range => render_prompt(
            frame,
            area,
            "Chart range",
            &state.range_input,
            "START..END — e.g. 2025-01-01..2025-03-31",
            state.range_error.as_deref(),
        ),
        InputMode::Normal => {}
    }

    if state.show_quit_confirm {
        render_quit_confirm(frame, area);
    }
}

/// Renders content based on current tab.
fn render_content(frame: &mut Frame, area: Rect, state: &mut AppState) {
    match state.current_tab {
        Tab::Bets => {
            let view = {
                let pane = &state.bets_tab.pane;
                build_bets_view(&pane.table, &pane.widths)
            };
            render_table_pane(frame, area, &mut state.bets_tab.pane, &view);
        }
        Tab::Summary => render_summary_tab(frame, area, state),
        Tab::Tags => {
            let view = {
                let pane = &state.tags_tab.pane;
                build_tags_view(&pane.table, &pane.widths)
            };
            render_table_pane(frame, area, &mut state.tags_tab.pane, &view);
        }
    }
}
