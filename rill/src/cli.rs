use rill_core::{
    Entry, EntrySource, Layout, Session, config::Config, message::NO_ITEMS,
    source::json::JsonFileSource,
};
use rill_tui::TuiHost;
use serde::Serialize;
use std::fmt::Write;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Clone)]
pub struct CliError {
    message: String,
    code: i32,
}

impl CliError {
    pub fn system(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: 2,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn code(&self) -> i32 {
        self.code
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(value: anyhow::Error) -> Self {
        Self::system(format!("{value:#}"))
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ListedEntry {
    pub group: String,
    pub id: String,
    pub title: String,
    pub read: bool,
    pub marked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// Project `entries` through the configured groups and filters, in display order
pub fn listed_entries(config: &Config, entries: Vec<Entry>) -> Vec<ListedEntry> {
    let session = Session::start(
        TuiHost::default(),
        config.build_groups(),
        Layout::default(),
        config.filter_cycle(),
        entries,
    );
    let state = session.state();
    (0..state.projection.len())
        .filter_map(|index| state.slot_entry(index))
        .map(|(group, entry)| ListedEntry {
            group: group.name.clone(),
            id: entry.id.to_string(),
            title: entry.title.clone(),
            read: entry.read,
            marked: entry.marked,
            link: entry.link.clone(),
        })
        .collect()
}

fn status_label(entry: &ListedEntry) -> &'static str {
    match (entry.read, entry.marked) {
        (false, false) => "unread",
        (true, false) => "read",
        (false, true) => "unread*",
        (true, true) => "read*",
    }
}

fn format_entry_table(entries: &[ListedEntry]) -> String {
    let group_header = "group";
    let status_header = "status";
    let group_width = entries
        .iter()
        .map(|entry| entry.group.len())
        .max()
        .unwrap_or(group_header.len())
        .max(group_header.len());
    let status_width = status_header.len().max("unread*".len());

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{group_header:<group_width$}  {status_header:<status_width$}  title"
    );
    for entry in entries {
        let _ = writeln!(
            out,
            "{:<group_width$}  {:<status_width$}  {}",
            entry.group,
            status_label(entry),
            entry.title
        );
    }
    out
}

fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    println!(
        "{}",
        serde_json::to_string(value).map_err(|e| CliError::system(e.to_string()))?
    );
    Ok(())
}

pub fn print_error(error: &CliError, json: bool) {
    if json {
        let payload = serde_json::json!({ "error": error.message() });
        eprintln!("{payload}");
    } else {
        eprintln!("{}", error.message());
    }
}

pub fn cmd_list(config: &Config, json: bool) -> CliResult<()> {
    let source = JsonFileSource::new(config.resolved_feed()?);
    let output = listed_entries(config, source.load()?);

    if json {
        print_json(&output)?;
    } else if output.is_empty() {
        println!("{NO_ITEMS}");
    } else {
        print!("{}", format_entry_table(&output));
    }
    Ok(())
}
