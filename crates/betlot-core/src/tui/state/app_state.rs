//! Top-level application state.

use chrono::NaiveDate;

use crate::analysis::{Granularity, PeriodBalance, rollup, last_n_days, tag_analysis};
use crate::chart::ChartPeriod;
use crate::model::{Bet, Portfolio};
use crate::table::parse_filter_expression;
use crate::view::{bets_table, summary_table, tags_table};

use super::tab_states::{
    BetsTabState, ClvPanel, RECENT_DAYS, SummaryTabState, TablePane, TagsTabState,
};
use super::{InputMode, Tab};

/// Tag-analysis knobs passed through from the CLI.
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    pub min_bets: usize,
    pub exclude_tags: Vec<String>,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            min_bets: 50,
            exclude_tags: Vec::new(),
        }
    }
}

/// Main application state.
pub struct AppState {
    pub current_tab: Tab,
    pub input_mode: InputMode,
    /// Filter expression being typed (filter mode).
    pub filter_input: String,
    pub filter_error: Option<String>,
    /// Custom chart range being typed (range mode).
    pub range_input: String,
    pub range_error: Option<String>,
    pub status_message: Option<String>,
    pub show_help: bool,
    pub help_scroll: usize,
    pub show_quit_confirm: bool,
    /// Reference date for "last N days" windows and chart presets.
    pub today: NaiveDate,
    pub user_address: String,
    /// CLV service address.
    pub server_url: String,
    /// Source records, original order.
    pub bets: Vec<Bet>,
    /// Daily rollup, cached: drawdown and charts derive from it.
    pub daily: Vec<PeriodBalance>,
    pub bets_tab: BetsTabState,
    pub summary_tab: SummaryTabState,
    pub tags_tab: TagsTabState,
}

impl AppState {
    pub fn new(
        portfolio: Portfolio,
        options: &AnalysisOptions,
        server_url: String,
        today: NaiveDate,
    ) -> Self {
        let Portfolio { user_address, bets } = portfolio;

        let daily = rollup(&bets, Granularity::Daily);
        let summaries = tag_analysis(&bets, options.min_bets, &options.exclude_tags);

        let bets_tab = BetsTabState {
            pane: TablePane::new(bets_table(&bets)),
        };
        let summary_tab = SummaryTabState {
            pane: TablePane::new(summary_table(&last_n_days(&daily, RECENT_DAYS, today))),
            granularity: Granularity::Daily,
            chart_period: ChartPeriod::All,
            limit_recent: true,
        };
        let tags_tab = TagsTabState {
            pane: TablePane::new(tags_table(&summaries)),
            summaries,
            clv: ClvPanel::Hidden,
            clv_tag: None,
            cached: None,
            pending: None,
        };

        Self {
            current_tab: Tab::default(),
            input_mode: InputMode::default(),
            filter_input: String::new(),
            filter_error: None,
            range_input: String::new(),
            range_error: None,
            status_message: None,
            show_help: false,
            help_scroll: 0,
            show_quit_confirm: false,
            today,
            user_address,
            server_url,
            bets,
            daily,
            bets_tab,
            summary_tab,
            tags_tab,
        }
    }

    pub fn switch_tab(&mut self, tab: Tab) {
        self.current_tab = tab;
        self.status_message = None;
    }

    /// The table pane of the current tab.
    pub fn active_pane_mut(&mut self) -> &mut TablePane {
        match self.current_tab {
            Tab::Bets => &mut self.bets_tab.pane,
            Tab::Summary => &mut self.summary_tab.pane,
            Tab::Tags => &mut self.tags_tab.pane,
        }
    }

    pub fn active_pane(&self) -> &TablePane {
        match self.current_tab {
            Tab::Bets => &self.bets_tab.pane,
            Tab::Summary => &self.summary_tab.pane,
            Tab::Tags => &self.tags_tab.pane,
        }
    }

    /// Compiles and applies the typed filter expression to the active table.
    /// Returns `true` when the expression compiled.
    pub fn apply_filter_input(&mut self) -> bool {
        let input = self.filter_input.clone();
        let pane = self.active_pane_mut();
        match parse_filter_expression(&input, pane.table.columns()) {
            Ok(ranges) => {
                pane.table.apply_filters(ranges);
                pane.selected = 0;
                self.filter_error = None;
                true
            }
            Err(e) => {
                self.filter_error = Some(e.to_string());
                false
            }
        }
    }

    /// Clears filters on the active table.
    pub fn clear_active_filters(&mut self) {
        self.filter_input.clear();
        self.filter_error = None;
        let pane = self.active_pane_mut();
        pane.table.clear_filters();
        pane.selected = 0;
    }

    /// Switches the summary granularity, rebuilding the rollup table while
    /// keeping the pane's widths/resize state fresh.
    pub fn set_granularity(&mut self, granularity: Granularity) {
        self.summary_tab.granularity = granularity;
        self.rebuild_summary_table();
    }

    /// Toggles the daily summary between "recent days" and the full history.
    pub fn toggle_summary_limit(&mut self) {
        self.summary_tab.limit_recent = !self.summary_tab.limit_recent;
        self.rebuild_summary_table();
    }

    fn rebuild_summary_table(&mut self) {
        let balances = match self.summary_tab.granularity {
            Granularity::Daily if self.summary_tab.limit_recent => {
                last_n_days(&self.daily, RECENT_DAYS, self.today)
            }
            Granularity::Daily => self.daily.clone(),
            granularity => rollup(&self.bets, granularity),
        };
        self.summary_tab.pane = TablePane::new(summary_table(&balances));
    }

    /// Balances currently backing the summary chart and drawdown panel.
    pub fn chart_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.summary_tab.chart_period.range(self.today)
    }

    /// Tag selected on the tags tab, if any.
    pub fn selected_tag(&self) -> Option<&str> {
        let pane = &self.tags_tab.pane;
        let idx = pane.table.page_indices().get(pane.selected).copied()?;
        let row = pane.table.rows().get(idx)?;
        row.cells.first().map(String::as_str)
    }

    /// Bets carrying the given tag, for the CLV request.
    pub fn bets_with_tag(&self, tag: &str) -> Vec<&Bet> {
        self.bets
            .iter()
            .filter(|b| b.tags.iter().any(|t| t == tag))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn portfolio() -> Portfolio {
        let bet = |d: u32, tags: &[&str], pnl: f64| Bet {
            end_date: Utc.with_ymd_and_hms(2026, 2, d, 12, 0, 0).unwrap(),
            title: format!("event {d}"),
            outcome: "Yes".into(),
            slug: String::new(),
            total_bought: 100.0,
            avg_price: 0.5,
            cur_price: None,
            realized_pnl: pnl,
            cash_pnl: None,
            tags: tags.iter().map(|s| s.to_string()).collect(),
            condition_id: String::new(),
            asset: String::new(),
            start_time: None,
            closing_price: None,
        };
        Portfolio {
            user_address: "0xabc".into(),
            bets: vec![
                bet(1, &["NBA"], 10.0),
                bet(2, &["NBA"], -5.0),
                bet(3, &["NHL"], 2.0),
            ],
        }
    }

    fn options() -> AnalysisOptions {
        AnalysisOptions {
            min_bets: 1,
            exclude_tags: Vec::new(),
        }
    }

    fn state() -> AppState {
        AppState::new(
            portfolio(),
            &options(),
            "http://localhost:8080".into(),
            NaiveDate::from_ymd_opt(2026, 2, 3).unwrap(),
        )
    }

    #[test]
    fn construction_builds_all_tabs() {
        let state = state();
        assert_eq!(state.bets_tab.pane.table.rows().len(), 3);
        assert_eq!(state.daily.len(), 3);
        assert_eq!(state.tags_tab.summaries.len(), 2);
        // Daily summary starts limited to the recent window.
        assert_eq!(state.summary_tab.pane.table.rows().len(), 3);
    }

    #[test]
    fn filter_input_round_trip() {
        let mut state = state();
        state.filter_input = "pnl:0..".to_string();
        assert!(state.apply_filter_input());
        assert_eq!(state.bets_tab.pane.table.filtered_len(), 2);
        state.clear_active_filters();
        assert_eq!(state.bets_tab.pane.table.filtered_len(), 3);
    }

    #[test]
    fn bad_filter_input_reports_and_keeps_mode() {
        let mut state = state();
        state.filter_input = "bogus:1..".to_string();
        assert!(!state.apply_filter_input());
        assert!(state.filter_error.as_deref().unwrap_or("").contains("bogus"));
    }

    #[test]
    fn granularity_switch_rebuilds_the_summary() {
        let mut state = state();
        state.set_granularity(Granularity::Monthly);
        assert_eq!(state.summary_tab.pane.table.rows().len(), 1);
        state.set_granularity(Granularity::Daily);
        assert_eq!(state.summary_tab.pane.table.rows().len(), 3);
    }

    #[test]
    fn selected_tag_follows_the_tag_table() {
        let state = state();
        // tag_analysis sorts by ROI desc: NBA roi = 5/100, NHL roi = 2/50
        let tag = state.selected_tag().unwrap().to_string();
        assert!(tag == "NBA" || tag == "NHL");
        let bets = state.bets_with_tag("NBA");
        assert_eq!(bets.len(), 2);
    }
}
