//! Bottom input prompt for filter and range entry.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::style::Styles;

/// Renders the input prompt anchored to the bottom of the screen.
/// `error` keeps the prompt open and explains what failed to parse.
pub fn render_prompt(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    input: &str,
    hint: &str,
    error: Option<&str>,
) {
    let height = 4.min(area.height);
    let prompt_area = Rect::new(
        area.x,
        area.y + area.height.saturating_sub(height),
        area.width,
        height,
    );

    frame.render_widget(Clear, prompt_area);

    let block = Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL);
    let inner = block.inner(prompt_area);
    frame.render_widget(block, prompt_area);

    let mut lines = vec![Line::from(vec![
        Span::styled("> ", Styles::dim()),
        Span::styled(input.to_string(), Styles::input()),
        Span::styled("█", Styles::dim()),
    ])];
    match error {
        Some(error) => lines.push(Line::from(Span::styled(error.to_string(), Styles::loss()))),
        None => lines.push(Line::from(Span::styled(hint.to_string(), Styles::help()))),
    }

    frame.render_widget(Paragraph::new(lines), inner);
}
