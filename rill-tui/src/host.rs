use rill_core::host::{Hooks, Membership, Renderer, ViewContext, tag_membership};
use rill_core::{Entry, Group, ViewState};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Cells reserved in front of every entry for the mark/collapse indicator.
pub const MARKER_WIDTH: usize = 2;

/// Split `title` into lines that fit a column `width` cells wide, after the marker.
pub fn wrap_title(title: &str, width: usize) -> Vec<String> {
    let avail = width.saturating_sub(MARKER_WIDTH).max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for grapheme in title.graphemes(true) {
        let w = grapheme.width();
        if current_width + w > avail && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }
        current.push_str(grapheme);
        current_width += w;
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// The terminal host: sizes entries by wrapped title, assigns them to groups by tag and
/// reports hook activity to the log.
#[derive(Debug, Default)]
pub struct TuiHost {
    new_entries: usize,
}

impl TuiHost {
    /// Entries announced as new since the session started.
    pub fn new_entries(&self) -> usize {
        self.new_entries
    }
}

impl Renderer for TuiHost {
    fn render(&mut self, group: &Group, entry: &Entry, _target_row: usize, ctx: &ViewContext) -> usize {
        if !ctx.filter.admits(entry) || !group.filters.current().admits(entry) {
            return 0;
        }
        wrap_title(&entry.title, ctx.layout.column_width()).len()
    }
}

impl Hooks for TuiHost {
    fn on_select(&mut self, group: &Group, entry: &Entry) {
        log::trace!("select {} in {}", entry.id, group.name);
    }

    fn on_unselect(&mut self, group: &Group, entry: &Entry) {
        log::trace!("unselect {} in {}", entry.id, group.name);
    }

    fn on_new(&mut self, group: &Group, entry: &Entry) {
        self.new_entries += 1;
        log::debug!("new entry {} ({}) in {}", entry.id, entry.title, group.name);
    }

    fn on_update(&mut self, state: &ViewState) {
        log::debug!(
            "view updated: {} slots, cursor {:?}",
            state.projection.len(),
            state.cursor
        );
    }

    fn on_session_start(&mut self, state: &ViewState) {
        log::info!("browsing {} groups", state.groups.len());
    }

    fn on_session_end(&mut self, _state: &ViewState) {
        log::info!("session ended");
    }
}

impl Membership for TuiHost {
    fn admits(&self, group: &Group, entry: &Entry) -> bool {
        tag_membership(group, entry)
    }
}
