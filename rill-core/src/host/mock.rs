use super::{Hooks, Membership, Renderer, ViewContext, tag_membership};
use crate::entry::{Entry, EntryId};
use crate::group::Group;
use crate::state::ViewState;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookEvent {
    Select { group: String, entry: String },
    Unselect { group: String, entry: String },
    New { group: String, entry: String },
    Update { cursor: Option<usize> },
    SessionStart,
    SessionEnd,
}

impl HookEvent {
    fn named(make: fn(String, String) -> HookEvent, group: &Group, entry: &Entry) -> HookEvent {
        make(group.name.clone(), entry.id.to_string())
    }
}

/// Host that records every hook and render call it receives. Entries render one line each unless overridden
/// in `lines`; the active global and group filters are honoured like a real host would.
#[derive(Debug, Default)]
pub struct MockHost {
    pub events: Vec<HookEvent>,
    pub lines: HashMap<EntryId, usize>,
    /// `target_row` of every render call, in call order.
    pub render_rows: Vec<usize>,
}

impl MockHost {
    pub fn with_lines(mut self, id: &str, lines: usize) -> Self {
        self.lines.insert(EntryId::from(id), lines);
        self
    }

    pub fn take_events(&mut self) -> Vec<HookEvent> {
        std::mem::take(&mut self.events)
    }

    /// Recorded `(unselect, select)` counts.
    pub fn selection_counts(&self) -> (usize, usize) {
        let unselects = self
            .events
            .iter()
            .filter(|e| matches!(e, HookEvent::Unselect { .. }))
            .count();
        let selects = self
            .events
            .iter()
            .filter(|e| matches!(e, HookEvent::Select { .. }))
            .count();
        (unselects, selects)
    }
}

impl Renderer for MockHost {
    fn render(&mut self, group: &Group, entry: &Entry, target_row: usize, ctx: &ViewContext) -> usize {
        self.render_rows.push(target_row);
        if !ctx.filter.admits(entry) || !group.filters.current().admits(entry) {
            return 0;
        }
        self.lines.get(&entry.id).copied().unwrap_or(1)
    }
}

impl Hooks for MockHost {
    fn on_select(&mut self, group: &Group, entry: &Entry) {
        self.events.push(HookEvent::named(
            |group, entry| HookEvent::Select { group, entry },
            group,
            entry,
        ));
    }

    fn on_unselect(&mut self, group: &Group, entry: &Entry) {
        self.events.push(HookEvent::named(
            |group, entry| HookEvent::Unselect { group, entry },
            group,
            entry,
        ));
    }

    fn on_new(&mut self, group: &Group, entry: &Entry) {
        self.events.push(HookEvent::named(
            |group, entry| HookEvent::New { group, entry },
            group,
            entry,
        ));
    }

    fn on_update(&mut self, state: &ViewState) {
        self.events.push(HookEvent::Update {
            cursor: state.cursor,
        });
    }

    fn on_session_start(&mut self, _state: &ViewState) {
        self.events.push(HookEvent::SessionStart);
    }

    fn on_session_end(&mut self, _state: &ViewState) {
        self.events.push(HookEvent::SessionEnd);
    }
}

impl Membership for MockHost {
    fn admits(&self, group: &Group, entry: &Entry) -> bool {
        tag_membership(group, entry)
    }
}
