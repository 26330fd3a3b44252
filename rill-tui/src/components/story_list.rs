use crate::host::wrap_title;
use crate::theme::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use rill_core::{Entry, Group, ViewState};

fn marker(group: &Group, entry: &Entry) -> &'static str {
    if entry.marked {
        "* "
    } else if group.collapsed {
        "+ "
    } else {
        "  "
    }
}

fn entry_style(entry: &Entry, selected: bool, theme: &Theme) -> Style {
    if selected {
        return Style::default()
            .fg(theme.highlight_fg)
            .bg(theme.accent)
            .add_modifier(Modifier::BOLD);
    }
    let fg = if entry.marked {
        theme.marked
    } else if entry.read {
        theme.read
    } else {
        theme.unread
    };
    let style = Style::default().fg(fg);
    if entry.is_unread() {
        style.add_modifier(Modifier::BOLD)
    } else {
        style
    }
}

/// Draw the visible window of the projection, flowing lines down each column in turn
pub fn draw(f: &mut Frame, area: Rect, state: &ViewState, theme: &Theme) {
    let layout = state.layout;
    let column_width = layout.column_width();
    let selected = state.selected_slot();

    for (slot, window_row) in state.visible_slots() {
        let Some((group, entry)) = state.groups.entry(slot.group, slot.entry) else {
            continue;
        };
        let is_selected = selected.as_ref() == Some(slot);
        let style = entry_style(entry, is_selected, theme);

        for (i, text) in wrap_title(&entry.title, column_width).into_iter().enumerate() {
            let Some(line) = isize::try_from(i)
                .ok()
                .and_then(|i| usize::try_from(window_row + i).ok())
            else {
                // scrolled above the window
                continue;
            };
            let Some((column, row)) = layout.locate(line) else {
                break;
            };
            let (Ok(x), Ok(y), Ok(width)) = (
                u16::try_from(column * column_width),
                u16::try_from(row),
                u16::try_from(column_width),
            ) else {
                continue;
            };
            if y >= area.height || x >= area.width {
                continue;
            }
            let cell = Rect::new(
                area.x + x,
                area.y + y,
                width.min(area.width - x),
                1,
            );
            let lead = if i == 0 { marker(group, entry) } else { "  " };
            let content = Line::from(vec![
                Span::styled(lead, Style::default().fg(theme.marked)),
                Span::styled(text, style),
            ]);
            f.render_widget(Paragraph::new(content), cell);
        }
    }
}
