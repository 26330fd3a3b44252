use super::EntrySource;
use crate::entry::Entry;
use anyhow::{Result, bail};
use std::sync::Mutex;

/// Hands out queued results in order, then repeats `fallback`.
#[derive(Default)]
pub struct MockEntrySource {
    pub queued: Mutex<Vec<Result<Vec<Entry>>>>,
    pub fallback: Vec<Entry>,
    pub load_calls: Mutex<usize>,
}

impl MockEntrySource {
    pub fn new(fallback: Vec<Entry>) -> Self {
        Self {
            fallback,
            ..Self::default()
        }
    }

    pub fn push(&self, result: Result<Vec<Entry>>) {
        if let Ok(mut queued) = self.queued.lock() {
            queued.push(result);
        }
    }

    pub fn calls(&self) -> usize {
        self.load_calls.lock().map_or(0, |calls| *calls)
    }
}

impl EntrySource for MockEntrySource {
    fn load(&self) -> Result<Vec<Entry>> {
        if let Ok(mut calls) = self.load_calls.lock() {
            *calls += 1;
        }
        let Ok(mut queued) = self.queued.lock() else {
            bail!("mock source lock poisoned");
        };
        if queued.is_empty() {
            Ok(self.fallback.clone())
        } else {
            queued.remove(0)
        }
    }

    fn describe(&self) -> String {
        "mock".to_string()
    }
}
