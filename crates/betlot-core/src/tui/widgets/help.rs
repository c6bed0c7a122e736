//! Help popup.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::style::Styles;

fn key_line(keys: &str, action: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {keys:<14}"), Styles::help_key()),
        Span::styled(action.to_string(), Styles::help()),
    ])
}

fn section(title: &str) -> Line<'static> {
    Line::from(Span::styled(title.to_string(), Styles::section_header()))
}

/// Renders the scrollable help popup.
pub fn render_help(frame: &mut Frame, area: Rect, scroll: &mut usize) {
    let popup_width = (area.width * 60 / 100).clamp(46, 72);
    let popup_height = (area.height * 80 / 100).clamp(12, 30);
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Help (Esc to close) ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let lines = vec![
        section("Tabs"),
        key_line("Tab / S-Tab", "next / previous tab"),
        key_line("1 2 3", "bets / summary / tags"),
        Line::from(""),
        section("Tables"),
        key_line("j k / ↓ ↑", "move selection"),
        key_line("s", "next sort column"),
        key_line("r", "toggle sort direction"),
        key_line("click header", "sort by column"),
        key_line("drag divider", "resize column"),
        key_line("dbl-click divider", "auto-fit column"),
        Line::from(""),
        section("Filters & pages"),
        key_line("/", "edit filter (key:min..max ...)"),
        key_line("c", "clear filters"),
        key_line("[ ] / ← →", "previous / next page"),
        key_line("i", "cycle items per page"),
        Line::from(""),
        section("Summary tab"),
        key_line("d m y", "daily / monthly / yearly"),
        key_line("a", "toggle recent-days limit"),
        key_line("p", "cycle chart period"),
        key_line("b", "custom chart range"),
        Line::from(""),
        section("Tags tab"),
        key_line("v", "request CLV analysis (retry on error)"),
        key_line("Esc", "close CLV panel"),
        Line::from(""),
        section("General"),
        key_line("?", "toggle this help"),
        key_line("q", "quit"),
    ];

    let max_scroll = lines.len().saturating_sub(inner.height as usize);
    *scroll = (*scroll).min(max_scroll);

    let paragraph = Paragraph::new(lines).scroll((*scroll as u16, 0));
    frame.render_widget(paragraph, inner);
}
