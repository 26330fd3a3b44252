use super::EntrySource;
use crate::entry::{Entry, EntryId};
use anyhow::{Context, Result, anyhow};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Reads a JSON array of entries from disk on every load.
pub struct JsonFileSource {
    path: PathBuf,
    seen: Mutex<HashSet<EntryId>>,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            seen: Mutex::new(HashSet::new()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EntrySource for JsonFileSource {
    fn load(&self) -> Result<Vec<Entry>> {
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read feed {}", self.path.display()))?;
        let mut entries: Vec<Entry> = serde_json::from_str(&contents)
            .with_context(|| format!("Invalid feed JSON in {}", self.path.display()))?;

        let mut seen = self
            .seen
            .lock()
            .map_err(|_| anyhow!("seen-id set lock poisoned"))?;
        for entry in &mut entries {
            if seen.insert(entry.id.clone()) {
                entry.is_new = true;
            }
        }
        log::debug!("loaded {} entries from {}", entries.len(), self.path.display());
        Ok(entries)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
