//! Structural changes: wholesale refresh, collapse toggling and filter cycling. Each one
//! rebuilds the projection and re-derives a valid cursor and scroll offset.

use crate::action::CommandResult;
use crate::entry::Entry;
use crate::filter::Direction;
use crate::host::Host;
use crate::message::NO_ITEMS;
use crate::selection::{require_items, with_selection};
use crate::state::ViewState;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterScope {
    Global,
    CurrentGroup,
}

/// Replace every group's contents from `list` and re-derive selection and scroll.
///
/// The previously selected entry stays selected if it is still projected in the same group.
/// Otherwise the cursor lands on the first projected entry at or after that group, falling
/// back to the top.
pub fn refresh(state: &mut ViewState, host: &mut dyn Host, list: &[Entry]) -> CommandResult {
    with_selection(state, host, |state, host| reconcile(state, host, list));
    state.settle_scroll();
    host.on_update(state);
    CommandResult::RedrawOnly
}

fn reconcile(state: &mut ViewState, host: &mut dyn Host, list: &[Entry]) {
    let previous = state
        .selected()
        .map(|(_, entry)| entry.id.clone())
        .zip(state.selected_group());

    state.groups.repopulate(list, host);
    announce_new(state, host);
    state.rebuild(host);

    if state.projection.is_empty() {
        state.cursor = None;
        if previous.is_some() {
            state.messages.show(NO_ITEMS);
        }
    } else {
        let cursor = match &previous {
            Some((id, group)) => state
                .projection
                .position_of(&state.groups, *group, id)
                .unwrap_or_else(|| top_of_group(state, *group)),
            None => 0,
        };
        state.cursor = Some(cursor.min(state.projection.len() - 1));
        state.messages.clear();
    }

    if state.messages.promote_deferred() {
        log::debug!("promoted deferred message: {:?}", state.messages.active());
    }

    log::debug!(
        "reconciled {} entries into {} slots, cursor {:?}",
        list.len(),
        state.projection.len(),
        state.cursor
    );
}

/// Fire `on_new` once per distinct new id, then clear the flag on every copy.
fn announce_new(state: &mut ViewState, host: &mut dyn Host) {
    let mut announced = HashSet::new();
    for group in state.groups.iter() {
        for entry in group.entries() {
            if entry.is_new && announced.insert(entry.id.clone()) {
                host.on_new(group, entry);
            }
        }
    }
    for group in state.groups.iter_mut() {
        for entry in group.entries_mut() {
            entry.is_new = false;
        }
    }
}

/// Populate the collection for the first time and select the first projected entry.
pub(crate) fn populate(state: &mut ViewState, host: &mut dyn Host, list: &[Entry]) {
    state.groups.repopulate(list, host);
    announce_new(state, host);
    state.rebuild(host);
    with_selection(state, host, |state, _| {
        state.cursor = if state.has_items() {
            Some(0)
        } else {
            state.messages.show(NO_ITEMS);
            None
        };
    });
    state.settle_scroll();
}

fn top_of_group(state: &ViewState, group: usize) -> usize {
    state.projection.first_from_group(group).unwrap_or(0)
}

fn reselect_from(state: &mut ViewState, group: usize) {
    if state.projection.is_empty() {
        state.cursor = None;
        state.messages.show(NO_ITEMS);
    } else {
        state.cursor = Some(top_of_group(state, group));
    }
}

/// Flip one group's collapsed state and select from that group onward.
pub fn toggle_collapse(state: &mut ViewState, host: &mut dyn Host, group: usize) -> CommandResult {
    if group >= state.groups.len() {
        return CommandResult::Handled;
    }
    with_selection(state, host, |state, host| {
        if let Some(g) = state.groups.get_mut(group) {
            g.collapsed = !g.collapsed;
            log::debug!("group '{}' collapsed: {}", g.name, g.collapsed);
        }
        state.rebuild(host);
        reselect_from(state, group);
    });
    state.settle_scroll();
    CommandResult::RedrawOnly
}

/// Toggle the group owning the selected entry.
pub fn toggle_collapse_current(state: &mut ViewState, host: &mut dyn Host) -> CommandResult {
    require_items(state, |state| match state.selected_group() {
        Some(group) => toggle_collapse(state, host, group),
        None => CommandResult::Handled,
    })
}

/// Collapse or expand every group, then select from the current group onward.
pub fn set_collapse_all(state: &mut ViewState, host: &mut dyn Host, collapsed: bool) -> CommandResult {
    let from = state.selected_group().unwrap_or(0);
    with_selection(state, host, |state, host| {
        for group in state.groups.iter_mut() {
            group.collapsed = collapsed;
        }
        log::debug!("all groups collapsed: {collapsed}");
        state.rebuild(host);
        reselect_from(state, from);
    });
    state.settle_scroll();
    CommandResult::RedrawOnly
}

/// Step the global or current group's filter. The new filter name is announced through the
/// deferred message, so it shows after the reconciliation pass the caller runs next.
pub fn cycle_filter(state: &mut ViewState, direction: Direction, scope: FilterScope) -> CommandResult {
    match scope {
        FilterScope::Global => {
            if !state.filters.step(direction) {
                return CommandResult::Handled;
            }
            let name = state.filters.current();
            log::debug!("global filter: {name}");
            state.messages.defer(format!("Filter: {name}"));
            CommandResult::RebuildAndRedraw
        }
        FilterScope::CurrentGroup => require_items(state, |state| {
            let Some(group) = state.selected_group().and_then(|g| state.groups.get_mut(g)) else {
                return CommandResult::Handled;
            };
            if !group.filters.step(direction) {
                return CommandResult::Handled;
            }
            let name = group.filters.current();
            log::debug!("filter for group '{}': {name}", group.name);
            state.messages.defer(format!("Filter: {name}"));
            CommandResult::RebuildAndRedraw
        }),
    }
}
