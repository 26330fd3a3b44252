use crate::theme::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

/// Border plus one cell of padding on each side
const CHROME: usize = 4;

/// Size of the dialog needed to show `text` inside `area`
pub fn message_size(text: &str, area: Rect) -> (u16, u16) {
    let max_inner = usize::from(area.width).saturating_sub(CHROME).max(1);
    let text_width = text.width().max(1);
    let inner = text_width.min(max_inner);
    let lines = text_width.div_ceil(inner);
    let width = u16::try_from(inner + CHROME).unwrap_or(u16::MAX).min(area.width);
    let height = u16::try_from(lines + 2).unwrap_or(u16::MAX).min(area.height);
    (width, height)
}

/// Draw `text` in a bordered box centered over `area`
pub fn draw(f: &mut Frame, area: Rect, text: &str, theme: &Theme) {
    if area.width < 3 || area.height < 3 {
        return;
    }
    let (width, height) = message_size(text, area);
    let rect = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .padding(Padding::horizontal(1));
    f.render_widget(Clear, rect);
    f.render_widget(
        Paragraph::new(text)
            .style(Style::default().fg(theme.title))
            .wrap(Wrap { trim: true })
            .block(block),
        rect,
    );
}
