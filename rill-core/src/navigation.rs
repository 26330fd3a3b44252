//! Cursor movement over the current projection.

use crate::action::CommandResult;
use crate::entry::Entry;
use crate::group::Group;
use crate::host::Host;
use crate::selection::{require_items, with_selection};
use crate::state::ViewState;

fn step_forward(state: &mut ViewState) -> bool {
    match state.cursor {
        Some(c) if c + 1 < state.projection.len() => {
            state.cursor = Some(c + 1);
            true
        }
        _ => false,
    }
}

fn step_back(state: &mut ViewState) -> bool {
    match state.cursor {
        Some(c) if c > 0 => {
            state.cursor = Some(c - 1);
            true
        }
        _ => false,
    }
}

pub fn next_entry(state: &mut ViewState, host: &mut dyn Host) -> CommandResult {
    require_items(state, |state| {
        with_selection(state, host, |state, _| step_forward(state));
        CommandResult::RedrawOnly
    })
}

pub fn prev_entry(state: &mut ViewState, host: &mut dyn Host) -> CommandResult {
    require_items(state, |state| {
        with_selection(state, host, |state, _| step_back(state));
        CommandResult::RedrawOnly
    })
}

/// Move to the first entry of the next group and scroll it to the top of the window.
pub fn next_group(state: &mut ViewState, host: &mut dyn Host) -> CommandResult {
    require_items(state, |state| {
        with_selection(state, host, |state, _| {
            let Some(start) = state.selected_group() else {
                return;
            };
            while state.selected_group() == Some(start) {
                if !step_forward(state) {
                    break;
                }
            }
        });
        if let Some(slot) = state.selected_slot() {
            state.scroll.align_top(&slot, &state.projection);
        }
        CommandResult::RedrawOnly
    })
}

/// Move back to the first projected entry of the previous group.
pub fn prev_group(state: &mut ViewState, host: &mut dyn Host) -> CommandResult {
    require_items(state, |state| {
        with_selection(state, host, |state, _| {
            let Some(start) = state.selected_group() else {
                return;
            };
            while step_back(state) {
                let Some(slot) = state.selected_slot() else {
                    break;
                };
                if slot.group != start && slot.entry == 0 {
                    break;
                }
            }
        });
        CommandResult::RedrawOnly
    })
}

/// Forward scan over `(cursor, len - 1)`; the last slot is never a match.
fn scan_forward<P>(state: &ViewState, predicate: &P) -> Option<usize>
where
    P: Fn(&Group, &Entry) -> bool + ?Sized,
{
    let cursor = state.cursor?;
    let end = state.projection.len().saturating_sub(1);
    (cursor + 1..end).find(|&i| {
        state
            .slot_entry(i)
            .is_some_and(|(group, entry)| predicate(group, entry))
    })
}

/// Backward scan over `(0, cursor)`; the first slot is never a match.
fn scan_back<P>(state: &ViewState, predicate: &P) -> Option<usize>
where
    P: Fn(&Group, &Entry) -> bool + ?Sized,
{
    let cursor = state.cursor?;
    (1..cursor).rev().find(|&i| {
        state
            .slot_entry(i)
            .is_some_and(|(group, entry)| predicate(group, entry))
    })
}

/// Jump to the next entry matching `predicate`; without a match the cursor stays put.
pub fn next_filtered<P>(state: &mut ViewState, host: &mut dyn Host, predicate: &P) -> CommandResult
where
    P: Fn(&Group, &Entry) -> bool + ?Sized,
{
    require_items(state, |state| {
        with_selection(state, host, |state, _| match scan_forward(state, predicate) {
            Some(found) => state.cursor = Some(found),
            None => log::debug!("next_filtered: no match"),
        });
        CommandResult::RedrawOnly
    })
}

pub fn prev_filtered<P>(state: &mut ViewState, host: &mut dyn Host, predicate: &P) -> CommandResult
where
    P: Fn(&Group, &Entry) -> bool + ?Sized,
{
    require_items(state, |state| {
        with_selection(state, host, |state, _| match scan_back(state, predicate) {
            Some(found) => state.cursor = Some(found),
            None => log::debug!("prev_filtered: no match"),
        });
        CommandResult::RedrawOnly
    })
}

pub fn is_marked(_group: &Group, entry: &Entry) -> bool {
    entry.marked
}

pub fn is_unread(_group: &Group, entry: &Entry) -> bool {
    entry.is_unread()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::EntryId;
    use crate::filter::FilterCycle;
    use crate::group::GroupCollection;
    use crate::host::mock::MockHost;
    use crate::layout::Layout;

    fn group(name: &str, ids: &[&str]) -> Group {
        Group::new(name).with_entries(ids.iter().map(|id| Entry::new(*id, *id)).collect())
    }

    fn state(groups: Vec<Group>, rows: usize, host: &mut MockHost) -> ViewState {
        let mut state = ViewState::new(
            GroupCollection::new(groups),
            Layout::new(rows, 1, 80),
            FilterCycle::default(),
        );
        state.rebuild(host);
        state.cursor = Some(0);
        state
    }

    fn selected(state: &ViewState) -> &str {
        state.selected_id().map(EntryId::as_str).unwrap()
    }

    #[test]
    fn test_next_and_prev_clamp_at_boundaries() {
        let mut host = MockHost::default();
        let mut state = state(vec![group("g", &["a", "b"])], 10, &mut host);

        prev_entry(&mut state, &mut host);
        assert_eq!(state.cursor, Some(0));
        next_entry(&mut state, &mut host);
        next_entry(&mut state, &mut host);
        assert_eq!(state.cursor, Some(1));
        assert_eq!(host.selection_counts(), (3, 3), "boundary no-ops still pair hooks");
    }

    struct FailingSelectHost;

    impl crate::host::Renderer for FailingSelectHost {
        fn render(
            &mut self,
            _group: &Group,
            _entry: &Entry,
            _target_row: usize,
            _ctx: &crate::host::ViewContext,
        ) -> usize {
            1
        }
    }

    impl crate::host::Hooks for FailingSelectHost {
        fn on_select(&mut self, _group: &Group, entry: &Entry) {
            panic!("select hook failed on {}", entry.id);
        }
    }

    impl crate::host::Membership for FailingSelectHost {}

    #[test]
    #[should_panic(expected = "select hook failed on b")]
    fn test_hook_panic_propagates_out_of_next_entry() {
        let mut host = FailingSelectHost;
        let mut state = ViewState::new(
            GroupCollection::new(vec![group("g", &["a", "b"])]),
            Layout::new(10, 1, 80),
            FilterCycle::default(),
        );
        state.rebuild(&mut host);
        state.cursor = Some(0);

        next_entry(&mut state, &mut host);
    }

    #[test]
    fn test_navigation_on_empty_projection_raises_message() {
        let mut host = MockHost::default();
        let mut state = state(vec![group("g", &[])], 10, &mut host);
        state.cursor = None;

        let result = next_entry(&mut state, &mut host);

        assert_eq!(result, CommandResult::RedrawOnly);
        assert_eq!(state.messages.active(), Some(crate::message::NO_ITEMS));
        assert!(host.events.is_empty());
    }

    #[test]
    fn test_next_group_lands_on_next_group_head() {
        let mut host = MockHost::default();
        let mut state = state(
            vec![group("g0", &["a", "b", "c"]), group("g1", &["d", "e", "f"])],
            4,
            &mut host,
        );
        state.cursor = Some(2);

        next_group(&mut state, &mut host);

        assert_eq!(state.cursor, Some(3));
        assert_eq!(selected(&state), "d");
        // row 3 exceeds max offset 6 - 4 = 2
        assert_eq!(state.scroll.offset, 2);
        assert_eq!(host.selection_counts(), (1, 1), "one transaction for the whole jump");
    }

    #[test]
    fn test_next_group_offset_uses_row_when_room() {
        let mut host = MockHost::default();
        let mut state = state(
            vec![group("g0", &["a"]), group("g1", &["b", "c", "d", "e", "f"])],
            3,
            &mut host,
        );

        next_group(&mut state, &mut host);

        assert_eq!(selected(&state), "b");
        assert_eq!(state.scroll.offset, 1);
    }

    #[test]
    fn test_next_group_in_last_group_stops_at_end() {
        let mut host = MockHost::default();
        let mut state = state(vec![group("g0", &["a"]), group("g1", &["b", "c"])], 10, &mut host);
        state.cursor = Some(1);

        next_group(&mut state, &mut host);

        assert_eq!(state.cursor, Some(2));
    }

    #[test]
    fn test_prev_group_stops_at_previous_group_head() {
        let mut host = MockHost::default();
        let mut state = state(
            vec![
                group("g0", &["a", "b"]),
                group("g1", &["c", "d"]),
                group("g2", &["e"]),
            ],
            10,
            &mut host,
        );
        state.cursor = Some(4);

        prev_group(&mut state, &mut host);
        assert_eq!(selected(&state), "c");

        prev_group(&mut state, &mut host);
        assert_eq!(selected(&state), "a");

        prev_group(&mut state, &mut host);
        assert_eq!(state.cursor, Some(0));
    }

    #[test]
    fn test_prev_group_skips_group_whose_head_is_hidden() {
        let mut host = MockHost::default().with_lines("c", 0);
        let mut state = state(
            vec![group("g0", &["a", "b"]), group("g1", &["c", "d"]), group("g2", &["e"])],
            10,
            &mut host,
        );
        // slots: a b d e
        state.cursor = Some(3);

        prev_group(&mut state, &mut host);

        assert_eq!(selected(&state), "a");
    }

    #[test]
    fn test_next_filtered_never_matches_last_slot() {
        let mut host = MockHost::default();
        let mut state = state(vec![group("g", &["a", "b", "c", "d"])], 10, &mut host);
        state.groups.update_entry(&EntryId::from("d"), |e| e.marked = true);
        state.cursor = Some(2);

        next_filtered(&mut state, &mut host, &is_marked);

        assert_eq!(state.cursor, Some(2));
    }

    #[test]
    fn test_prev_filtered_never_matches_first_slot() {
        let mut host = MockHost::default();
        let mut state = state(vec![group("g", &["a", "b", "c", "d"])], 10, &mut host);
        state.groups.update_entry(&EntryId::from("a"), |e| e.marked = true);
        state.cursor = Some(3);

        prev_filtered(&mut state, &mut host, &is_marked);

        assert_eq!(state.cursor, Some(3));
    }

    #[test]
    fn test_filtered_scans_find_nearest_match() {
        let mut host = MockHost::default();
        let mut state = state(vec![group("g", &["a", "b", "c", "d", "e", "f"])], 10, &mut host);
        for id in ["b", "c", "e"] {
            state.groups.update_entry(&EntryId::from(id), |e| e.read = true);
        }
        state.cursor = Some(1);

        next_filtered(&mut state, &mut host, &is_unread);
        assert_eq!(selected(&state), "d");

        prev_filtered(&mut state, &mut host, &|_: &Group, e: &Entry| e.read);
        assert_eq!(selected(&state), "c");
    }
}
