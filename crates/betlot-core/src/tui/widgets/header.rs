//! Header bar: app name, tabs, wallet, date.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::state::{AppState, Tab};
use crate::tui::style::Styles;

/// Renders the header bar.
pub fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::horizontal([
        Constraint::Length(9),  // Name
        Constraint::Min(20),    // Tabs
        Constraint::Length(20), // Filter badge
        Constraint::Length(26), // Wallet + date
    ])
    .split(area);

    let name = Paragraph::new(" betlot ").style(Styles::header());
    frame.render_widget(name, chunks[0]);

    // Tabs
    let tabs: Vec<Span> = Tab::all()
        .iter()
        .enumerate()
        .flat_map(|(i, tab)| {
            let style = if *tab == state.current_tab {
                Styles::tab_active()
            } else {
                Styles::tab_inactive()
            };
            let num = format!(" {}:", i + 1);
            let name = format!("{} ", tab.name());
            vec![Span::styled(num, Styles::dim()), Span::styled(name, style)]
        })
        .collect();
    frame.render_widget(
        Paragraph::new(Line::from(tabs)).style(Styles::header()),
        chunks[1],
    );

    // Active-filter badge for the current tab.
    let filters = state.active_pane().table.active_filter_count();
    let badge = if filters > 0 {
        format!(" filters: {filters} ")
    } else {
        String::new()
    };
    frame.render_widget(Paragraph::new(badge).style(Styles::header()), chunks[2]);

    // Wallet (shortened) + reference date.
    let wallet = short_address(&state.user_address);
    let right = format!(" {wallet}  {} ", state.today.format("%Y-%m-%d"));
    frame.render_widget(Paragraph::new(right).style(Styles::header()), chunks[3]);
}

/// `0x1234…abcd` — enough to recognize the wallet without the full address.
fn short_address(address: &str) -> String {
    if address.len() <= 12 {
        return address.to_string();
    }
    let head: String = address.chars().take(6).collect();
    let tail: String = address
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    format!("{head}…{tail}")
}

#[cfg(test)]
mod tests {
    use super::short_address;

    #[test]
    fn long_addresses_are_shortened() {
        assert_eq!(
            short_address("0x1234567890abcdef1234567890abcdef12345678"),
            "0x1234…5678"
        );
        assert_eq!(short_address("0xabc"), "0xabc");
    }
}
