use crate::entry::Entry;

/// Events that arrive asynchronously from background tasks.
/// These get merged into the main event loop alongside keyboard input.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The entry source delivered a fresh list
    Refreshed { entries: Vec<Entry> },

    /// The entry source could not be read
    SourceFailed(String),
}
