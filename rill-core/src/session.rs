use crate::action::{Action, ActionFn, CommandResult};
use crate::commands;
use crate::config::Command;
use crate::entry::Entry;
use crate::filter::FilterCycle;
use crate::flags;
use crate::group::GroupCollection;
use crate::host::Host;
use crate::layout::Layout;
use crate::reconcile;
use crate::state::ViewState;
use std::collections::HashMap;
use std::str::FromStr;

/// One browsing session: the view state, the host it reports to, and the dispatch table.
pub struct Session<H: Host> {
    state: ViewState,
    host: H,
    /// Last list delivered, kept so filter changes can reconcile without a fetch.
    latest: Vec<Entry>,
    custom: HashMap<String, ActionFn>,
}

impl<H: Host> Session<H> {
    /// Populate the groups from `list`, select the first projected entry and announce the
    /// session to the host.
    pub fn start(
        mut host: H,
        groups: GroupCollection,
        layout: Layout,
        filters: FilterCycle,
        mut list: Vec<Entry>,
    ) -> Self {
        let mut state = ViewState::new(groups, layout, filters);
        reconcile::populate(&mut state, &mut host, &list);
        host.on_session_start(&state);
        log::info!(
            "session started with {} entries, {} projected",
            list.len(),
            state.projection.len()
        );
        for entry in &mut list {
            entry.is_new = false;
        }
        Self {
            state,
            host,
            latest: list,
            custom: HashMap::new(),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut ViewState {
        &mut self.state
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Make `name` dispatchable. Registered names shadow built-in commands.
    pub fn register(&mut self, name: impl Into<String>, action: ActionFn) {
        self.custom.insert(name.into(), action);
    }

    /// Apply a freshly delivered list. Read and mark flags the user set on entries that are
    /// still present are carried over. Host panics propagate like they do from `dispatch`.
    pub fn refresh(&mut self, mut list: Vec<Entry>) -> CommandResult {
        self.state.groups.carry_flags(&mut list);
        let result = reconcile::refresh(&mut self.state, &mut self.host, &list);
        for entry in &mut list {
            entry.is_new = false;
        }
        self.latest = list;
        result
    }

    /// Re-run reconciliation against the last delivered list.
    pub fn reconcile(&mut self) -> CommandResult {
        let list = std::mem::take(&mut self.latest);
        self.refresh(list)
    }

    /// Adopt new screen geometry. Renderers may size entries by width, so this reconciles.
    pub fn set_layout(&mut self, layout: Layout) -> CommandResult {
        if self.state.layout == layout {
            return CommandResult::Handled;
        }
        self.state.layout = layout;
        self.state.scroll.set_visible_lines(layout.visible_lines());
        self.reconcile()
    }

    /// Run an action. A non-empty view drops the current transient message first.
    /// Panics from the host or the action propagate to the caller unchanged.
    pub fn dispatch(&mut self, action: Action) -> CommandResult {
        if self.state.has_items() {
            self.state.messages.clear();
        }
        match action {
            Action::Direct(mut f) => f(&mut self.state, &mut self.host),
            Action::Named(name) => self.dispatch_named(&name),
        }
    }

    fn dispatch_named(&mut self, name: &str) -> CommandResult {
        if let Some(action) = self.custom.get_mut(name) {
            return action(&mut self.state, &mut self.host);
        }
        match Command::from_str(name) {
            Ok(command) => commands::run(command, &mut self.state, &mut self.host),
            Err(e) => {
                log::warn!("{e}");
                CommandResult::Handled
            }
        }
    }

    /// Mark entries `matcher` accepts and move to the nearest match.
    pub fn search(&mut self, matcher: &dyn Fn(&Entry) -> bool) -> CommandResult {
        flags::apply_search(&mut self.state, &mut self.host, matcher)
    }

    /// Keep the selection on screen before a frame is drawn.
    pub fn prepare_draw(&mut self) {
        if let Some(slot) = self.state.selected_slot() {
            self.state.scroll.check(&slot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::EntryId;
    use crate::filter::Filter;
    use crate::group::Group;
    use crate::host::mock::{HookEvent, MockHost};
    use crate::message::NO_ITEMS;

    fn entries(ids: &[&str]) -> Vec<Entry> {
        ids.iter().map(|id| Entry::new(*id, *id)).collect()
    }

    fn session(groups: Vec<Group>, list: Vec<Entry>) -> Session<MockHost> {
        Session::start(
            MockHost::default(),
            GroupCollection::new(groups),
            Layout::new(10, 1, 80),
            FilterCycle::new(vec![Filter::All, Filter::Unread]),
            list,
        )
    }

    fn selected(session: &Session<MockHost>) -> Option<&str> {
        session.state().selected_id().map(EntryId::as_str)
    }

    #[test]
    fn test_start_selects_first_and_fires_hooks() {
        let list = vec![Entry::new("a", "a").with_new(), Entry::new("b", "b")];
        let session = session(vec![Group::new("all")], list);

        assert_eq!(session.state().cursor, Some(0));
        assert_eq!(
            session.host().events,
            vec![
                HookEvent::New {
                    group: "all".into(),
                    entry: "a".into()
                },
                HookEvent::Select {
                    group: "all".into(),
                    entry: "a".into()
                },
                HookEvent::SessionStart,
            ]
        );
    }

    #[test]
    fn test_start_empty_shows_no_items() {
        let session = session(vec![Group::new("all")], Vec::new());
        assert_eq!(session.state().cursor, None);
        assert_eq!(session.state().messages.active(), Some(NO_ITEMS));
    }

    #[test]
    fn test_scenario_two_groups_navigation() {
        let mut session = session(
            vec![Group::new("g0").with_tags(["0"]), Group::new("g1").with_tags(["1"])],
            vec![
                Entry::new("a", "a").with_tags(["0"]),
                Entry::new("b", "b").with_tags(["0"]),
                Entry::new("c", "c").with_tags(["0"]),
                Entry::new("d", "d").with_tags(["1"]),
                Entry::new("e", "e").with_tags(["1"]),
                Entry::new("f", "f").with_tags(["1"]),
            ],
        );
        let rows: Vec<_> = session.state().projection.slots().iter().map(|s| s.row).collect();
        assert_eq!(rows, vec![0, 1, 2, 3, 4, 5]);

        session.dispatch(Action::from(Command::NextItem));
        session.dispatch(Action::from(Command::NextItem));
        session.dispatch(Action::from(Command::NextTag));
        assert_eq!(selected(&session), Some("d"));
        assert_eq!(session.state().scroll.offset, 0, "max offset is 0 when everything fits");

        session.dispatch(Action::from(Command::PrevTag));
        assert_eq!(selected(&session), Some("a"));
    }

    #[test]
    fn test_dispatch_clears_message_when_items_exist() {
        let mut session = session(vec![Group::new("all")], entries(&["a"]));
        session.state_mut().messages.show("stale");

        session.dispatch(Action::from(Command::Noop));

        assert_eq!(session.state().messages.active(), None);
    }

    #[test]
    fn test_dispatch_keeps_message_on_empty_view() {
        let mut session = session(vec![Group::new("all")], Vec::new());
        let result = session.dispatch(Action::named("next_item"));
        assert_eq!(result, CommandResult::RedrawOnly);
        assert_eq!(session.state().messages.active(), Some(NO_ITEMS));
    }

    #[test]
    fn test_unknown_name_is_handled() {
        let mut session = session(vec![Group::new("all")], entries(&["a"]));
        assert_eq!(
            session.dispatch(Action::named("launch_rocket")),
            CommandResult::Handled
        );
    }

    #[test]
    fn test_registered_action_shadows_builtin() {
        let mut session = session(vec![Group::new("all")], entries(&["a", "b"]));
        session.register(
            "next_item",
            Box::new(|state: &mut ViewState, _: &mut dyn Host| {
                state.messages.show("custom");
                CommandResult::Handled
            }),
        );

        session.dispatch(Action::named("next_item"));

        assert_eq!(session.state().cursor, Some(0));
        assert_eq!(session.state().messages.active(), Some("custom"));
    }

    #[test]
    fn test_direct_action_runs_against_view() {
        let mut session = session(vec![Group::new("all")], entries(&["a", "b", "c"]));
        let result = session.dispatch(Action::direct(|state, host| {
            crate::navigation::next_entry(state, host);
            crate::navigation::next_entry(state, host)
        }));
        assert_eq!(result, CommandResult::RedrawOnly);
        assert_eq!(selected(&session), Some("c"));
    }

    #[test]
    fn test_quit_fires_session_end() {
        let mut session = session(vec![Group::new("all")], entries(&["a"]));
        let startup = session.host_mut().take_events();
        assert!(startup.contains(&HookEvent::SessionStart));

        let result = session.dispatch(Action::from(Command::Quit));

        assert_eq!(result, CommandResult::Terminate);
        assert_eq!(session.host().events, vec![HookEvent::SessionEnd]);
    }

    #[test]
    fn test_filter_change_then_reconcile() {
        let mut session = session(vec![Group::new("all")], entries(&["a", "b", "c"]));
        session.dispatch(Action::from(Command::JustRead));

        let result = session.dispatch(Action::from(Command::NextFilter));
        assert_eq!(result, CommandResult::RebuildAndRedraw);
        assert_eq!(session.state().projection.len(), 3, "nothing changes until reconcile");

        session.reconcile();
        assert_eq!(session.state().projection.len(), 2);
        assert_eq!(session.state().messages.active(), Some("Filter: unread"));
        assert_eq!(selected(&session), Some("b"));
    }

    #[test]
    fn test_filter_message_cleared_by_next_dispatch() {
        let mut session = session(vec![Group::new("all")], entries(&["a", "b"]));
        session.dispatch(Action::from(Command::NextFilter));
        session.reconcile();
        assert_eq!(session.state().messages.active(), Some("Filter: unread"));

        session.dispatch(Action::from(Command::NextItem));
        assert_eq!(session.state().messages.active(), None);
    }

    #[test]
    fn test_refresh_carries_user_flags() {
        let mut session = session(vec![Group::new("all")], entries(&["a", "b"]));
        session.dispatch(Action::from(Command::ToggleMark));

        session.refresh(entries(&["a", "b", "c"]));

        let (_, a) = session.state().groups.entry(0, 0).unwrap();
        assert!(a.marked);
        assert_eq!(session.state().projection.len(), 3);
    }

    #[test]
    fn test_reconcile_does_not_reannounce_new_entries() {
        let mut session = session(vec![Group::new("all")], Vec::new());
        session.refresh(vec![Entry::new("n", "n").with_new()]);
        let announced = session.host_mut().take_events();
        assert!(announced.iter().any(|e| matches!(e, HookEvent::New { .. })));

        session.reconcile();

        assert!(
            !session
                .host()
                .events
                .iter()
                .any(|e| matches!(e, HookEvent::New { .. }))
        );
    }

    #[test]
    fn test_set_layout_resizes_window() {
        let ids: Vec<String> = (0..20).map(|i| format!("e{i}")).collect();
        let list = ids.iter().map(|id| Entry::new(id.clone(), id.clone())).collect();
        let mut session = session(vec![Group::new("all")], list);
        for _ in 0..15 {
            session.dispatch(Action::from(Command::NextItem));
        }
        session.prepare_draw();
        assert_eq!(session.state().scroll.offset, 6);

        session.set_layout(Layout::new(4, 2, 80));
        session.prepare_draw();

        assert_eq!(session.state().scroll.visible_lines(), 8);
        assert_eq!(selected(&session), Some("e15"));
        assert_eq!(session.state().scroll.offset, 8);
    }

    #[test]
    fn test_search_marks_and_selects() {
        let mut session = session(vec![Group::new("all")], entries(&["apple", "banana", "cherry"]));
        session.search(&|e: &Entry| e.title.contains("an"));
        assert_eq!(selected(&session), Some("banana"));
    }
}
