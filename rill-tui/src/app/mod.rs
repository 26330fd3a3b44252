mod spawn;

use crate::{
    components,
    host::TuiHost,
    keymap::{self, KeyInput},
    theme::Theme,
};
use crossterm::event::{self, Event, KeyEventKind};
use fuzzy_matcher::{FuzzyMatcher, skim::SkimMatcherV2};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
};
use rill_core::{
    Action, CommandResult, Entry, EntrySource, Session,
    config::{Command, KeysConfig},
    event::AppEvent,
    flags,
    state::Mode,
};
use spawn::{spawn_refresh, spawn_refresh_timer};
use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
        mpsc,
    },
    time::Duration,
};
use unicode_segmentation::UnicodeSegmentation;

/// Handle for dispatching background work
#[derive(Clone)]
pub struct EventSender {
    tx: mpsc::Sender<AppEvent>,
    cancel: Arc<AtomicBool>,
}

impl EventSender {
    /// Send an event from a background thread to the main loop
    pub fn send(&self, event: AppEvent) {
        let _ = self.tx.send(event);
    }
}

/// Text being typed into the inline search prompt
#[derive(Debug, Default)]
struct Prompt {
    mode: Mode,
    query: String,
}

impl Prompt {
    fn open(&mut self) {
        self.mode = Mode::Search;
        self.query.clear();
    }

    fn close(&mut self) -> String {
        self.mode = Mode::Browse;
        std::mem::take(&mut self.query)
    }

    fn delete_backward_char(&mut self) {
        if let Some((idx, _)) = self.query.grapheme_indices(true).next_back() {
            self.query.truncate(idx);
        }
    }

    fn delete_backward_word(&mut self) {
        let trimmed = self.query.trim_end().len();
        let start = self.query[..trimmed]
            .grapheme_indices(true)
            .rev()
            .take_while(|(_, g)| !g.chars().all(char::is_whitespace))
            .last()
            .map_or(trimmed, |(idx, _)| idx);
        self.query.truncate(start);
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Mark entries whose titles fuzzy-match `query` and jump to the nearest one
pub fn search_action(query: String) -> Action {
    let matcher = SkimMatcherV2::default();
    Action::direct(move |state, host| {
        flags::apply_search(state, host, &|entry: &Entry| {
            matcher.fuzzy_match(&entry.title, &query).is_some()
        })
    })
}

pub fn run(
    terminal: &mut DefaultTerminal,
    session: &mut Session<TuiHost>,
    source: &Arc<dyn EntrySource>,
    theme: &Theme,
    keys: &KeysConfig,
    columns: usize,
    refresh_every: Duration,
) -> anyhow::Result<()> {
    let (tx, rx) = mpsc::channel::<AppEvent>();
    let cancel = Arc::new(AtomicBool::new(false));
    let event_sender = EventSender {
        tx,
        cancel: Arc::clone(&cancel),
    };
    let mut prompt = Prompt::default();

    spawn_refresh_timer(source, &event_sender, refresh_every);

    loop {
        terminal.draw(|f| draw(f, session, &prompt, theme, columns))?;

        // Check background channel (non-blocking)
        if let Ok(app_event) = rx.try_recv() {
            process_app_event(app_event, session);
            continue;
        }

        if event::poll(Duration::from_millis(80))?
            && let Event::Key(key) = event::read()?
        {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if let Some(input) = keymap::resolve(key, prompt.mode, keys)
                && process_input(input, session, &mut prompt, source, &event_sender)
                    == Flow::Quit
            {
                // Signal cancellation to background threads
                cancel.store(true, Ordering::Relaxed);
                return Ok(());
            }
        }
    }
}

fn draw(
    f: &mut Frame,
    session: &mut Session<TuiHost>,
    prompt: &Prompt,
    theme: &Theme,
    columns: usize,
) {
    let [list_area, status_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(f.area());

    session.set_layout(rill_core::Layout::new(
        usize::from(list_area.height),
        columns,
        usize::from(list_area.width),
    ));
    session.prepare_draw();

    let state = session.state();
    components::story_list::draw(f, list_area, state, theme);
    match prompt.mode {
        Mode::Search => components::search_bar::draw(f, status_area, &prompt.query, theme),
        Mode::Browse => components::status_bar::draw(
            f,
            status_area,
            state,
            session.host().new_entries(),
            theme,
        ),
    }
    if let Some(text) = state.messages.active() {
        components::message::draw(f, list_area, text, theme);
    }
}

fn process_app_event(event: AppEvent, session: &mut Session<TuiHost>) {
    match event {
        AppEvent::Refreshed { entries } => {
            log::debug!("refreshed with {} entries", entries.len());
            session.refresh(entries);
        }
        AppEvent::SourceFailed(error) => {
            log::warn!("refresh failed: {error}");
            session
                .state_mut()
                .messages
                .show(format!("Refresh failed: {error}"));
        }
    }
}

fn process_input(
    input: KeyInput,
    session: &mut Session<TuiHost>,
    prompt: &mut Prompt,
    source: &Arc<dyn EntrySource>,
    sender: &EventSender,
) -> Flow {
    match input {
        KeyInput::Insert(c) => {
            prompt.query.push(c);
            Flow::Continue
        }
        KeyInput::Command(command) => process_command(command, session, prompt, source, sender),
    }
}

fn process_command(
    command: Command,
    session: &mut Session<TuiHost>,
    prompt: &mut Prompt,
    source: &Arc<dyn EntrySource>,
    sender: &EventSender,
) -> Flow {
    match (prompt.mode, command) {
        (Mode::Browse, Command::InlineSearch) => prompt.open(),
        (Mode::Search, Command::Cancel) => {
            prompt.close();
        }
        (Mode::Search, Command::Confirm) => {
            let query = prompt.close();
            if !query.is_empty() {
                session.dispatch(search_action(query));
            }
        }
        (Mode::Search, Command::DeleteBackwardChar) => prompt.delete_backward_char(),
        (Mode::Search, Command::DeleteBackwardWord) => prompt.delete_backward_word(),
        _ => match session.dispatch(Action::from(command)) {
            CommandResult::Terminate => return Flow::Quit,
            CommandResult::RebuildAndRedraw => {
                session.reconcile();
                if command == Command::ForceUpdate {
                    spawn_refresh(source, sender);
                }
            }
            CommandResult::Handled | CommandResult::RedrawOnly => {}
        },
    }
    Flow::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use rill_core::group::{Group, GroupCollection};
    use rill_core::source::mock::MockEntrySource;
    use rill_core::{Filter, FilterCycle};

    fn make_sender() -> (EventSender, mpsc::Receiver<AppEvent>) {
        let (tx, rx) = mpsc::channel();
        let sender = EventSender {
            tx,
            cancel: Arc::new(AtomicBool::new(false)),
        };
        (sender, rx)
    }

    fn make_session(list: Vec<Entry>) -> Session<TuiHost> {
        Session::start(
            TuiHost::default(),
            GroupCollection::new(vec![Group::new("all")]),
            rill_core::Layout::new(10, 1, 40),
            FilterCycle::new(vec![Filter::All, Filter::Unread]),
            list,
        )
    }

    fn entries() -> Vec<Entry> {
        vec![
            Entry::new("a", "Rust 2024 released"),
            Entry::new("b", "Gardening tips"),
            Entry::new("c", "Ratatui widgets"),
            Entry::new("d", "Cooking pasta"),
        ]
    }

    fn send(command: Command, session: &mut Session<TuiHost>, prompt: &mut Prompt) -> Flow {
        let (sender, _rx) = make_sender();
        let source: Arc<dyn EntrySource> = Arc::new(MockEntrySource::default());
        process_command(command, session, prompt, &source, &sender)
    }

    fn type_text(text: &str, session: &mut Session<TuiHost>, prompt: &mut Prompt) {
        let (sender, _rx) = make_sender();
        let source: Arc<dyn EntrySource> = Arc::new(MockEntrySource::default());
        for c in text.chars() {
            process_input(KeyInput::Insert(c), session, prompt, &source, &sender);
        }
    }

    #[test]
    fn test_navigation_moves_cursor() {
        let mut session = make_session(entries());
        let mut prompt = Prompt::default();
        assert_eq!(send(Command::NextItem, &mut session, &mut prompt), Flow::Continue);
        assert_eq!(session.state().cursor, Some(1));
        send(Command::PrevItem, &mut session, &mut prompt);
        assert_eq!(session.state().cursor, Some(0));
    }

    #[test]
    fn test_quit_returns_quit() {
        let mut session = make_session(entries());
        let mut prompt = Prompt::default();
        assert_eq!(send(Command::Quit, &mut session, &mut prompt), Flow::Quit);
    }

    #[test]
    fn test_filter_change_rebuilds_projection() {
        let mut session = make_session(entries());
        let mut prompt = Prompt::default();
        send(Command::JustRead, &mut session, &mut prompt);
        send(Command::NextFilter, &mut session, &mut prompt);

        assert_eq!(session.state().filters.current(), Filter::Unread);
        assert_eq!(session.state().projection.len(), 3);
        assert_eq!(session.state().messages.active(), Some("Filter: unread"));
    }

    #[test]
    fn test_inline_search_marks_matches() {
        let mut session = make_session(entries());
        let mut prompt = Prompt::default();
        send(Command::InlineSearch, &mut session, &mut prompt);
        assert_eq!(prompt.mode, Mode::Search);

        type_text("rat", &mut session, &mut prompt);
        assert_eq!(prompt.query, "rat");
        send(Command::Confirm, &mut session, &mut prompt);

        assert_eq!(prompt.mode, Mode::Browse);
        assert!(prompt.query.is_empty());
        let (_, selected) = session.state().selected().unwrap();
        assert_eq!(selected.id.as_str(), "c");
        assert!(selected.marked);
    }

    #[test]
    fn test_inline_search_cancel_leaves_marks() {
        let mut session = make_session(entries());
        let mut prompt = Prompt::default();
        send(Command::InlineSearch, &mut session, &mut prompt);
        type_text("cook", &mut session, &mut prompt);
        send(Command::Cancel, &mut session, &mut prompt);

        assert_eq!(prompt.mode, Mode::Browse);
        assert_eq!(session.state().cursor, Some(0));
        assert!(
            session
                .state()
                .groups
                .iter()
                .flat_map(|g| g.entries())
                .all(|e| !e.marked)
        );
    }

    #[test]
    fn test_prompt_deletes_graphemes_and_words() {
        let mut prompt = Prompt::default();
        prompt.open();
        prompt.query.push_str("cafe\u{301} au lait");
        prompt.delete_backward_word();
        assert_eq!(prompt.query, "cafe\u{301} au ");
        prompt.delete_backward_word();
        assert_eq!(prompt.query, "cafe\u{301} ");
        prompt.delete_backward_char();
        prompt.delete_backward_char();
        assert_eq!(prompt.query, "caf");
    }

    #[test]
    fn test_force_update_spawns_refresh() {
        let mut session = make_session(entries());
        let mut prompt = Prompt::default();
        let (sender, rx) = make_sender();
        let source: Arc<dyn EntrySource> =
            Arc::new(MockEntrySource::new(vec![Entry::new("z", "Fresh").with_new()]));

        process_command(
            Command::ForceUpdate,
            &mut session,
            &mut prompt,
            &source,
            &sender,
        );
        let event = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        process_app_event(event, &mut session);

        assert_eq!(session.state().projection.len(), 1);
        assert_eq!(session.host().new_entries(), 1);
    }

    #[test]
    fn test_source_failure_shows_message() {
        let mut session = make_session(entries());
        process_app_event(AppEvent::SourceFailed("boom".into()), &mut session);
        assert_eq!(
            session.state().messages.active(),
            Some("Refresh failed: boom")
        );
        assert_eq!(session.state().projection.len(), 4);
    }

    #[test]
    fn test_draw_renders_list_and_status() {
        let mut session = make_session(entries());
        let prompt = Prompt::default();
        let theme = Theme::default();
        let output = components::render_to_string(40, 6, |f| {
            draw(f, &mut session, &prompt, &theme, 1);
        });
        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[0].contains("Rust 2024 released"));
        assert!(lines[5].contains("1/4"));
        assert_eq!(session.state().layout.rows, 5);
    }
}
