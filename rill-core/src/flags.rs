//! Read and mark flag operations. Flags are applied to every copy of an entry, so an entry
//! shown in several groups reads the same everywhere.

use crate::action::CommandResult;
use crate::entry::{Entry, EntryId};
use crate::host::Host;
use crate::navigation::{is_marked, next_filtered, prev_filtered};
use crate::selection::require_items;
use crate::state::ViewState;

fn set_read(state: &mut ViewState, ids: &[EntryId], read: bool) {
    for id in ids {
        state.groups.update_entry(id, |e| e.read = read);
    }
}

fn selected_ids(state: &ViewState) -> Vec<EntryId> {
    state.selected_id().cloned().into_iter().collect()
}

fn selected_group_ids(state: &ViewState) -> Vec<EntryId> {
    state
        .selected_group()
        .and_then(|g| state.groups.get(g))
        .map(|g| g.entries().iter().map(|e| e.id.clone()).collect())
        .unwrap_or_default()
}

fn all_ids(state: &ViewState) -> Vec<EntryId> {
    state
        .groups
        .iter()
        .flat_map(|g| g.entries().iter().map(|e| e.id.clone()))
        .collect()
}

/// Set the read flag on the selected entry.
pub fn mark_read(state: &mut ViewState, read: bool) -> CommandResult {
    require_items(state, |state| {
        let ids = selected_ids(state);
        set_read(state, &ids, read);
        CommandResult::RedrawOnly
    })
}

/// Set the read flag on every entry of the selected entry's group.
pub fn group_read(state: &mut ViewState, read: bool) -> CommandResult {
    require_items(state, |state| {
        let ids = selected_group_ids(state);
        log::debug!("marking {} entries read={read}", ids.len());
        set_read(state, &ids, read);
        CommandResult::RedrawOnly
    })
}

pub fn all_read(state: &mut ViewState, read: bool) -> CommandResult {
    let ids = all_ids(state);
    set_read(state, &ids, read);
    CommandResult::RedrawOnly
}

pub fn toggle_mark(state: &mut ViewState) -> CommandResult {
    require_items(state, |state| {
        let Some(id) = state.selected_id().cloned() else {
            return CommandResult::Handled;
        };
        state.groups.update_entry(&id, |e| e.marked = !e.marked);
        CommandResult::RedrawOnly
    })
}

/// Unmark every projected entry. Hidden entries keep their marks.
pub fn clear_marks(state: &mut ViewState) -> CommandResult {
    require_items(state, |state| {
        let ids: Vec<EntryId> = (0..state.projection.len())
            .filter_map(|i| state.slot_entry(i).map(|(_, e)| e.id.clone()))
            .collect();
        for id in &ids {
            state.groups.update_entry(id, |e| e.marked = false);
        }
        CommandResult::RedrawOnly
    })
}

/// Mark every entry `matcher` accepts and unmark the rest, then move to the nearest mark by
/// searching backwards and then forwards.
pub fn apply_search(
    state: &mut ViewState,
    host: &mut dyn Host,
    matcher: &dyn Fn(&Entry) -> bool,
) -> CommandResult {
    let mut matched = 0;
    for group in state.groups.iter_mut() {
        for entry in group.entries_mut() {
            entry.marked = matcher(entry);
            matched += usize::from(entry.marked);
        }
    }
    log::debug!("search marked {matched} entries");
    prev_filtered(state, host, &is_marked);
    next_filtered(state, host, &is_marked)
}
