//! Input handling: keybindings and mouse interactions.

use std::sync::mpsc;
use std::thread;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use tracing::debug;

use crate::analysis::{ClvBet, Granularity};
use crate::api::client::ClvClient;
use crate::api::schema::ClvRequest;
use crate::chart::ChartPeriod;
use crate::table::MIN_COLUMN_WIDTH;
use crate::util::parse_date_range;

use super::resize::ResizeRelease;
use super::state::{AppState, ClvPanel, HeaderHit, InputMode, Tab};

/// Result of handling a key event.
#[derive(Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// No action, continue.
    None,
    /// Quit the application.
    Quit,
}

/// Handles key input and updates state.
pub fn handle_key(state: &mut AppState, key: KeyEvent) -> KeyAction {
    if state.show_quit_confirm {
        return handle_quit_confirm(state, key);
    }
    match state.input_mode {
        InputMode::Normal => handle_normal_mode(state, key),
        InputMode::Filter => handle_filter_mode(state, key),
        InputMode::Range => handle_range_mode(state, key),
    }
}

fn handle_quit_confirm(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('Q') => {
            state.show_quit_confirm = false;
            KeyAction::Quit
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.show_quit_confirm = false;
            KeyAction::Quit
        }
        KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
            state.show_quit_confirm = false;
            KeyAction::None
        }
        _ => KeyAction::None,
    }
}

/// Handles keys in normal mode.
fn handle_normal_mode(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        // Quit
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            state.show_quit_confirm = true;
            KeyAction::None
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,

        // Tab navigation
        KeyCode::Tab => {
            state.switch_tab(state.current_tab.next());
            KeyAction::None
        }
        KeyCode::BackTab => {
            state.switch_tab(state.current_tab.prev());
            KeyAction::None
        }
        KeyCode::Char('1') => {
            state.switch_tab(Tab::Bets);
            KeyAction::None
        }
        KeyCode::Char('2') => {
            state.switch_tab(Tab::Summary);
            KeyAction::None
        }
        KeyCode::Char('3') => {
            state.switch_tab(Tab::Tags);
            KeyAction::None
        }

        // Row navigation (or help scroll when the popup is open)
        KeyCode::Up | KeyCode::Char('k') => {
            if state.show_help {
                state.help_scroll = state.help_scroll.saturating_sub(1);
            } else {
                state.active_pane_mut().select_up();
            }
            KeyAction::None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if state.show_help {
                state.help_scroll = state.help_scroll.saturating_add(1);
            } else {
                state.active_pane_mut().select_down();
            }
            KeyAction::None
        }

        // Sorting
        KeyCode::Char('s') | KeyCode::Char('S') => {
            state.active_pane_mut().next_sort_column();
            KeyAction::None
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            state.active_pane_mut().toggle_sort_direction();
            KeyAction::None
        }

        // Filter mode
        KeyCode::Char('/') => {
            state.input_mode = InputMode::Filter;
            state.filter_error = None;
            KeyAction::None
        }
        KeyCode::Char('c') | KeyCode::Char('C') => {
            state.clear_active_filters();
            KeyAction::None
        }

        // Pagination
        KeyCode::Left | KeyCode::Char('[') | KeyCode::PageUp => {
            state.active_pane_mut().table.prev_page();
            KeyAction::None
        }
        KeyCode::Right | KeyCode::Char(']') | KeyCode::PageDown => {
            state.active_pane_mut().table.next_page();
            KeyAction::None
        }
        KeyCode::Char('i') | KeyCode::Char('I') => {
            state.active_pane_mut().cycle_items_per_page();
            KeyAction::None
        }

        // Summary tab: granularity, recent-days limit, chart period
        KeyCode::Char('d') | KeyCode::Char('D') => {
            if state.current_tab == Tab::Summary {
                state.set_granularity(Granularity::Daily);
            }
            KeyAction::None
        }
        KeyCode::Char('m') | KeyCode::Char('M') => {
            if state.current_tab == Tab::Summary {
                state.set_granularity(Granularity::Monthly);
            }
            KeyAction::None
        }
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            if state.current_tab == Tab::Summary {
                state.set_granularity(Granularity::Yearly);
            }
            KeyAction::None
        }
        KeyCode::Char('a') | KeyCode::Char('A') => {
            if state.current_tab == Tab::Summary {
                state.toggle_summary_limit();
            }
            KeyAction::None
        }
        KeyCode::Char('p') | KeyCode::Char('P') => {
            if state.current_tab == Tab::Summary {
                state.summary_tab.chart_period = state.summary_tab.chart_period.next_preset();
            }
            KeyAction::None
        }
        KeyCode::Char('b') | KeyCode::Char('B') => {
            if state.current_tab == Tab::Summary {
                state.input_mode = InputMode::Range;
                state.range_error = None;
            }
            KeyAction::None
        }

        // Tags tab: CLV request / retry
        KeyCode::Char('v') | KeyCode::Char('V') => {
            if state.current_tab == Tab::Tags {
                request_clv(state);
            }
            KeyAction::None
        }

        // Help popup
        KeyCode::Char('?') | KeyCode::Char('H') => {
            state.show_help = !state.show_help;
            if state.show_help {
                state.help_scroll = 0;
            }
            KeyAction::None
        }

        // Close popups with Escape
        KeyCode::Esc => {
            state.status_message = None;
            if state.show_help {
                state.show_help = false;
            } else if state.current_tab == Tab::Tags
                && !matches!(state.tags_tab.clv, ClvPanel::Hidden)
            {
                state.tags_tab.clv = ClvPanel::Hidden;
            }
            KeyAction::None
        }

        _ => KeyAction::None,
    }
}

/// Handles keys in filter mode.
fn handle_filter_mode(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Esc => {
            state.input_mode = InputMode::Normal;
            state.filter_error = None;
            KeyAction::None
        }
        KeyCode::Enter => {
            if state.apply_filter_input() {
                state.input_mode = InputMode::Normal;
            }
            KeyAction::None
        }
        KeyCode::Backspace => {
            state.filter_input.pop();
            state.filter_error = None;
            KeyAction::None
        }
        KeyCode::Char(c) => {
            if key.modifiers.contains(KeyModifiers::CONTROL)
                || key.modifiers.contains(KeyModifiers::ALT)
            {
                return KeyAction::None;
            }
            state.filter_input.push(c);
            state.filter_error = None;
            KeyAction::None
        }
        _ => KeyAction::None,
    }
}

/// Handles keys in chart-range mode.
fn handle_range_mode(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Esc => {
            state.input_mode = InputMode::Normal;
            state.range_error = None;
            KeyAction::None
        }
        KeyCode::Enter => {
            match parse_date_range(&state.range_input) {
                Ok((start, end)) => {
                    state.summary_tab.chart_period = ChartPeriod::Custom { start, end };
                    state.input_mode = InputMode::Normal;
                    state.range_error = None;
                }
                Err(e) => state.range_error = Some(e.to_string()),
            }
            KeyAction::None
        }
        KeyCode::Backspace => {
            state.range_input.pop();
            state.range_error = None;
            KeyAction::None
        }
        KeyCode::Char(c) => {
            if key.modifiers.contains(KeyModifiers::CONTROL)
                || key.modifiers.contains(KeyModifiers::ALT)
            {
                return KeyAction::None;
            }
            state.range_input.push(c);
            state.range_error = None;
            KeyAction::None
        }
        _ => KeyAction::None,
    }
}

/// Handles mouse input: header click-to-sort, divider drag-resize, and
/// double-click auto-fit, all against the active tab's table.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent, now_ms: u64) {
    if state.show_quit_confirm || state.show_help || state.input_mode != InputMode::Normal {
        return;
    }
    let pane = state.active_pane_mut();

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(HeaderHit::Separator(col)) = pane.layout.hit(mouse.column, mouse.row) {
                let width = pane.widths.get(col).copied().unwrap_or(MIN_COLUMN_WIDTH);
                pane.resize.pointer_down(col, mouse.column, width);
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if let Some((col, width)) = pane.resize.pointer_move(mouse.column) {
                pane.set_width(col, width);
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            if pane.resize.is_dragging() {
                match pane.resize.pointer_up(mouse.column, now_ms) {
                    // Width was applied live during the drag; the release
                    // armed the sort-suppression window.
                    ResizeRelease::Resized { .. } | ResizeRelease::None => {}
                    ResizeRelease::Clicked { column } => {
                        if pane.resize.affordance_click(column, now_ms) {
                            pane.auto_fit(column);
                        }
                    }
                }
            } else if let Some(HeaderHit::Label(col)) = pane.layout.hit(mouse.column, mouse.row) {
                // A drag that just ended swallows exactly one sort click.
                if !pane.resize.consume_sort_suppression(now_ms) {
                    pane.sort_by_click(col);
                }
            }
        }
        MouseEventKind::ScrollUp => pane.select_up(),
        MouseEventKind::ScrollDown => pane.select_down(),
        _ => {}
    }
}

/// Kicks off a CLV request for the selected tag on a worker thread.
///
/// A request in flight blocks re-triggering (the original UI disables the
/// button); a cached summary for the same tag is shown without a new call.
fn request_clv(state: &mut AppState) {
    if matches!(state.tags_tab.clv, ClvPanel::Loading) {
        return;
    }

    let Some(tag) = state.selected_tag().map(str::to_string) else {
        state.status_message = Some("No tag selected".to_string());
        return;
    };

    if let Some((cached_tag, summary)) = &state.tags_tab.cached
        && *cached_tag == tag
        && !matches!(state.tags_tab.clv, ClvPanel::Failed(_))
    {
        state.tags_tab.clv = ClvPanel::Ready(summary.clone());
        state.tags_tab.clv_tag = Some(tag);
        return;
    }

    let rows: Vec<ClvBet> = state
        .bets_with_tag(&tag)
        .into_iter()
        .map(ClvBet::from)
        .collect();
    if rows.is_empty() {
        state.status_message = Some(format!("No bets found for tag '{tag}'"));
        return;
    }

    let request = ClvRequest {
        user_address: state.user_address.clone(),
        rows,
    };
    let url = state.server_url.clone();
    debug!(%tag, rows = request.rows.len(), "spawning clv request");

    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let client = ClvClient::new(&url);
        let _ = tx.send(client.request_summary(&request));
    });

    state.tags_tab.pending = Some(rx);
    state.tags_tab.clv = ClvPanel::Loading;
    state.tags_tab.clv_tag = Some(tag);
}

/// Drains a finished CLV request, if any. Called on every tick.
pub fn poll_clv(state: &mut AppState) {
    let Some(rx) = &state.tags_tab.pending else {
        return;
    };
    match rx.try_recv() {
        Ok(Ok(summary)) => {
            if let Some(tag) = &state.tags_tab.clv_tag {
                state.tags_tab.cached = Some((tag.clone(), summary.clone()));
            }
            state.tags_tab.clv = ClvPanel::Ready(summary);
            state.tags_tab.pending = None;
        }
        Ok(Err(e)) => {
            state.tags_tab.clv = ClvPanel::Failed(e.to_string());
            state.tags_tab.pending = None;
        }
        Err(mpsc::TryRecvError::Empty) => {}
        Err(mpsc::TryRecvError::Disconnected) => {
            if matches!(state.tags_tab.clv, ClvPanel::Loading) {
                state.tags_tab.clv = ClvPanel::Failed("request aborted".to_string());
            }
            state.tags_tab.pending = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Bet, Portfolio};
    use crate::tui::state::AnalysisOptions;
    use chrono::{NaiveDate, TimeZone, Utc};
    use crossterm::event::{KeyEventKind, KeyEventState};
    use ratatui::layout::Rect;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn state() -> AppState {
        let bet = |d: u32, pnl: f64| Bet {
            end_date: Utc.with_ymd_and_hms(2026, 2, d, 12, 0, 0).unwrap(),
            title: format!("event {d}"),
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
        };
        AppState::new(
            Portfolio {
                user_address: "0xabc".into(),
                bets: vec![bet(1, 10.0), bet(2, -5.0)],
            },
            &AnalysisOptions {
                min_bets: 1,
                exclude_tags: Vec::new(),
            },
            "http://localhost:8080".into(),
            NaiveDate::from_ymd_opt(2026, 2, 3).unwrap(),
        )
    }

    #[test]
    fn number_keys_switch_tabs() {
        let mut state = state();
        assert_eq!(state.current_tab, Tab::Bets);
        let _ = handle_key(&mut state, key(KeyCode::Char('3')));
        assert_eq!(state.current_tab, Tab::Tags);
        let _ = handle_key(&mut state, key(KeyCode::Tab));
        assert_eq!(state.current_tab, Tab::Bets);
    }

    #[test]
    fn quit_requires_confirmation() {
        let mut state = state();
        let action = handle_key(&mut state, key(KeyCode::Char('q')));
        assert_eq!(action, KeyAction::None);
        assert!(state.show_quit_confirm);

        let action = handle_key(&mut state, key(KeyCode::Enter));
        assert_eq!(action, KeyAction::Quit);
        assert!(!state.show_quit_confirm);
    }

    #[test]
    fn quit_confirmation_cancels_on_esc() {
        let mut state = state();
        let _ = handle_key(&mut state, key(KeyCode::Char('q')));
        let action = handle_key(&mut state, key(KeyCode::Esc));
        assert_eq!(action, KeyAction::None);
        assert!(!state.show_quit_confirm);
    }

    #[test]
    fn filter_mode_applies_on_enter() {
        let mut state = state();
        let _ = handle_key(&mut state, key(KeyCode::Char('/')));
        assert_eq!(state.input_mode, InputMode::Filter);
        for c in "pnl:0..".chars() {
            let _ = handle_key(&mut state, key(KeyCode::Char(c)));
        }
        let _ = handle_key(&mut state, key(KeyCode::Enter));
        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(state.bets_tab.pane.table.filtered_len(), 1);
    }

    #[test]
    fn invalid_filter_keeps_the_prompt_open() {
        let mut state = state();
        let _ = handle_key(&mut state, key(KeyCode::Char('/')));
        for c in "nope:1..".chars() {
            let _ = handle_key(&mut state, key(KeyCode::Char(c)));
        }
        let _ = handle_key(&mut state, key(KeyCode::Enter));
        assert_eq!(state.input_mode, InputMode::Filter);
        assert!(state.filter_error.is_some());
        let _ = handle_key(&mut state, key(KeyCode::Esc));
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn range_mode_sets_a_custom_chart_period() {
        let mut state = state();
        state.switch_tab(Tab::Summary);
        let _ = handle_key(&mut state, key(KeyCode::Char('b')));
        assert_eq!(state.input_mode, InputMode::Range);
        for c in "2026-02-01..2026-02-02".chars() {
            let _ = handle_key(&mut state, key(KeyCode::Char(c)));
        }
        let _ = handle_key(&mut state, key(KeyCode::Enter));
        assert_eq!(state.input_mode, InputMode::Normal);
        assert!(matches!(
            state.summary_tab.chart_period,
            ChartPeriod::Custom { .. }
        ));
    }

    #[test]
    fn granularity_keys_only_act_on_the_summary_tab() {
        let mut state = state();
        let _ = handle_key(&mut state, key(KeyCode::Char('m')));
        assert_eq!(state.summary_tab.granularity, Granularity::Daily);
        state.switch_tab(Tab::Summary);
        let _ = handle_key(&mut state, key(KeyCode::Char('m')));
        assert_eq!(state.summary_tab.granularity, Granularity::Monthly);
    }

    fn layout_for_test(state: &mut AppState) {
        state.bets_tab.pane.layout = crate::tui::state::TableLayout {
            area: Rect::new(0, 1, 60, 20),
            header_y: 2,
            columns: vec![(1, 10), (12, 10)],
        };
    }

    fn mouse(kind: MouseEventKind, x: u16, y: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column: x,
            row: y,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn header_click_sorts_but_a_fresh_drag_suppresses_it() {
        let mut state = state();
        layout_for_test(&mut state);

        // Plain click on the first header sorts ascending.
        handle_mouse(&mut state, mouse(MouseEventKind::Up(MouseButton::Left), 3, 2), 100);
        assert_eq!(state.bets_tab.pane.table.sort_state().column, Some(0));

        // Drag the divider by 10 cells: resize, no sort on the next click.
        state.bets_tab.pane.widths[0] = 10;
        handle_mouse(
            &mut state,
            mouse(MouseEventKind::Down(MouseButton::Left), 11, 2),
            200,
        );
        handle_mouse(
            &mut state,
            mouse(MouseEventKind::Drag(MouseButton::Left), 21, 2),
            210,
        );
        handle_mouse(&mut state, mouse(MouseEventKind::Up(MouseButton::Left), 21, 2), 220);
        assert_eq!(state.bets_tab.pane.widths[0], 20);

        let sorted_before = state.bets_tab.pane.table.sort_state();
        handle_mouse(&mut state, mouse(MouseEventKind::Up(MouseButton::Left), 3, 2), 250);
        assert_eq!(state.bets_tab.pane.table.sort_state(), sorted_before);

        // The suppression is spent; the next click sorts again.
        handle_mouse(&mut state, mouse(MouseEventKind::Up(MouseButton::Left), 3, 2), 300);
        assert_ne!(state.bets_tab.pane.table.sort_state(), sorted_before);
    }

    #[test]
    fn double_click_on_the_divider_auto_fits() {
        let mut state = state();
        layout_for_test(&mut state);
        state.bets_tab.pane.widths[0] = 30;

        // Two sub-threshold press/release pairs within the window.
        for t in [100u64, 200] {
            handle_mouse(
                &mut state,
                mouse(MouseEventKind::Down(MouseButton::Left), 11, 2),
                t,
            );
            handle_mouse(
                &mut state,
                mouse(MouseEventKind::Up(MouseButton::Left), 12, 2),
                t + 10,
            );
        }
        // Auto-fit measured the page content; width is no longer the manual 30.
        assert_ne!(state.bets_tab.pane.widths[0], 30);
    }
}
