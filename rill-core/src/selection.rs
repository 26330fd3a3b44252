use crate::action::CommandResult;
use crate::host::Host;
use crate::message::NO_ITEMS;
use crate::state::ViewState;

/// Run `op` as one selection transaction: unselect whatever is selected, run, then select
/// whatever the cursor points at afterwards. Both hooks fire even if the cursor did not move.
pub fn with_selection<R>(
    state: &mut ViewState,
    host: &mut dyn Host,
    op: impl FnOnce(&mut ViewState, &mut dyn Host) -> R,
) -> R {
    if let Some(slot) = state.selected_slot() {
        if let Some((group, entry)) = state.groups.entry(slot.group, slot.entry) {
            host.on_unselect(group, entry);
        }
        if let Some(entry) = state.groups.entry_mut(slot.group, slot.entry) {
            entry.selected = false;
        }
    }

    let result = op(state, &mut *host);

    if let Some(slot) = state.selected_slot() {
        if let Some(entry) = state.groups.entry_mut(slot.group, slot.entry) {
            entry.selected = true;
        }
        if let Some((group, entry)) = state.groups.entry(slot.group, slot.entry) {
            host.on_select(group, entry);
        }
    }

    result
}

/// Skip `op` and raise the "No Items." message when nothing is projected.
pub fn require_items(
    state: &mut ViewState,
    op: impl FnOnce(&mut ViewState) -> CommandResult,
) -> CommandResult {
    if state.projection.is_empty() {
        state.messages.show(NO_ITEMS);
        return CommandResult::RedrawOnly;
    }
    op(state)
}
