use crate::theme::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

const PROMPT: &str = "/";

/// The longest suffix of `text` that fits in `max_width` cells, with its width
fn visible_tail(text: &str, max_width: usize) -> (&str, usize) {
    let mut start = text.len();
    let mut width = 0;
    for (idx, grapheme) in text.grapheme_indices(true).rev() {
        let w = grapheme.width();
        if width + w > max_width {
            break;
        }
        width += w;
        start = idx;
    }
    (&text[start..], width)
}

/// Render the inline search prompt on a single row, keeping the cursor after the query
pub fn draw(f: &mut Frame, area: Rect, query: &str, theme: &Theme) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let prompt_width = PROMPT.width();
    // one cell for the cursor
    let room = usize::from(area.width).saturating_sub(prompt_width + 1);
    let (shown, shown_width) = visible_tail(query, room);

    let content = Line::from(vec![
        Span::styled(
            PROMPT,
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(shown),
    ]);
    f.render_widget(Paragraph::new(content), area);

    let cursor_offset = u16::try_from(prompt_width + shown_width).unwrap_or(u16::MAX);
    f.set_cursor_position((area.x.saturating_add(cursor_offset), area.y));
}
