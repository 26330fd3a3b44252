use crate::theme::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use rill_core::{Filter, ViewState};

fn filter_label(state: &ViewState) -> String {
    let global = state.filters.current();
    match state
        .selected()
        .map(|(group, _)| group.filters.current())
        .filter(|filter| *filter != Filter::All)
    {
        Some(group_filter) => format!("{global}/{group_filter}"),
        None => global.to_string(),
    }
}

fn position_label(state: &ViewState) -> String {
    match state.cursor {
        Some(cursor) => format!("{}/{}", cursor + 1, state.projection.len()),
        None => format!("-/{}", state.projection.len()),
    }
}

/// One row summarising the current group, filters, position and new arrivals
pub fn draw(f: &mut Frame, area: Rect, state: &ViewState, new_entries: usize, theme: &Theme) {
    let group = state
        .selected()
        .map_or_else(String::new, |(group, _)| group.name.clone());
    let muted = Style::default().fg(theme.read);

    let mut spans = vec![
        Span::styled(
            " rill ",
            Style::default()
                .fg(theme.highlight_fg)
                .bg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" {group} "), Style::default().fg(theme.title)),
        Span::styled(format!(" [{}] ", filter_label(state)), muted),
        Span::styled(format!(" {} ", position_label(state)), muted),
    ];
    if new_entries > 0 {
        spans.push(Span::styled(
            format!(" {new_entries} new "),
            Style::default().fg(theme.marked),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
