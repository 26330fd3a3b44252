pub mod json;
pub mod mock;

pub use json::JsonFileSource;

use crate::entry::Entry;
use anyhow::Result;

/// Where entry lists come from. Called from background threads, hence `Send + Sync`.
pub trait EntrySource: Send + Sync {
    /// Deliver the full current list. Entries the source has not delivered before should have
    /// `is_new` set.
    fn load(&self) -> Result<Vec<Entry>>;

    /// Short human-readable description for logs and errors.
    fn describe(&self) -> String;
}
