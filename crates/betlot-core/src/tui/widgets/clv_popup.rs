//! CLV panel popup on the tags tab.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::tui::state::ClvPanel;
use crate::tui::style::Styles;

/// Renders the CLV popup for the current panel state.
pub fn render_clv_popup(frame: &mut Frame, area: Rect, panel: &ClvPanel, tag: Option<&str>) {
    if matches!(panel, ClvPanel::Hidden) {
        return;
    }

    let popup_width = (area.width * 60 / 100).clamp(44, 70);
    let popup_height = 14.min(area.height);
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    frame.render_widget(Clear, popup_area);

    let title = match tag {
        Some(tag) => format!(" CLV — {tag} "),
        None => " CLV ".to_string(),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let lines = match panel {
        ClvPanel::Hidden => return,
        ClvPanel::Loading => vec![
            Line::from(""),
            Line::from(Span::styled("Analyzing...", Styles::dim())),
        ],
        ClvPanel::Ready(summary) => {
            let pct = |v: f64| format!("{v:.2}%");
            let odds = |v: f64| format!("{v:.2}");
            let mut lines = vec![
                Line::from(vec![
                    Span::styled("CLV+  ", Styles::profit()),
                    Span::raw(pct(summary.clv_positive_percent)),
                    Span::raw("   "),
                    Span::styled("CLV0  ", Styles::dim()),
                    Span::raw(pct(summary.clv_zero_percent)),
                    Span::raw("   "),
                    Span::styled("CLV-  ", Styles::loss()),
                    Span::raw(pct(summary.clv_negative_percent)),
                ]),
                Line::from(""),
                Line::from(vec![
                    Span::styled("Avg CLV (percent)     ", Styles::default()),
                    Span::raw(pct(summary.avg_clv_percent)),
                ]),
                Line::from(vec![
                    Span::styled("Median CLV (percent)  ", Styles::default()),
                    Span::raw(pct(summary.median_clv_percent)),
                ]),
                Line::from(vec![
                    Span::styled("Avg CLV (odds)        ", Styles::default()),
                    Span::raw(odds(summary.avg_clv_odds)),
                ]),
                Line::from(vec![
                    Span::styled("Median CLV (odds)     ", Styles::default()),
                    Span::raw(odds(summary.median_clv_odds)),
                ]),
                Line::from(""),
                Line::from(Span::styled(
                    format!("computed {} of {} bets", summary.computed, summary.total),
                    Styles::dim(),
                )),
            ];
            for (reason, count) in &summary.skipped {
                lines.push(Line::from(Span::styled(
                    format!("  skipped {count}: {reason}"),
                    Styles::dim(),
                )));
            }
            lines
        }
        ClvPanel::Failed(message) => vec![
            Line::from(Span::styled(format!("Error: {message}"), Styles::loss())),
            Line::from(""),
            Line::from(vec![
                Span::styled("v", Styles::help_key()),
                Span::styled(" → retry   ", Styles::help()),
                Span::styled("Esc", Styles::help_key()),
                Span::styled(" → close", Styles::help()),
            ]),
        ],
    };

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, inner);
}
