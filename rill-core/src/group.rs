use crate::entry::{Entry, EntryId};
use crate::filter::FilterCycle;
use crate::host::Membership;
use std::collections::HashMap;

/// A named, ordered bucket of entries. Insertion order is display order.
#[derive(Debug, Clone)]
pub struct Group {
    pub name: String,
    /// Tags this group admits; empty admits every entry.
    pub tags: Vec<String>,
    pub collapsed: bool,
    pub filters: FilterCycle,
    entries: Vec<Entry>,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tags: Vec::new(),
            collapsed: false,
            filters: FilterCycle::default(),
            entries: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_filters(mut self, filters: FilterCycle) -> Self {
        self.filters = filters;
        self
    }

    #[must_use]
    pub fn collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = collapsed;
        self
    }

    #[must_use]
    pub fn with_entries(mut self, entries: Vec<Entry>) -> Self {
        self.entries = entries;
        self
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn entries_mut(&mut self) -> &mut [Entry] {
        &mut self.entries
    }

    pub fn entry(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn position(&self, id: &EntryId) -> Option<usize> {
        self.entries.iter().position(|e| &e.id == id)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// The ordered set of groups. Group order defines navigation and filter precedence.
#[derive(Debug, Clone, Default)]
pub struct GroupCollection {
    groups: Vec<Group>,
}

impl GroupCollection {
    pub fn new(groups: Vec<Group>) -> Self {
        Self { groups }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Group> {
        self.groups.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Group> {
        self.groups.iter_mut()
    }

    pub fn get(&self, index: usize) -> Option<&Group> {
        self.groups.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Group> {
        self.groups.get_mut(index)
    }

    pub fn entry(&self, group: usize, entry: usize) -> Option<(&Group, &Entry)> {
        let g = self.groups.get(group)?;
        Some((g, g.entry(entry)?))
    }

    pub fn entry_mut(&mut self, group: usize, entry: usize) -> Option<&mut Entry> {
        self.groups.get_mut(group)?.entries.get_mut(entry)
    }

    /// Clear every group and refill each, in list order, with the entries `membership` admits.
    /// An entry may land in several groups; each group gets its own copy.
    pub fn repopulate<M: Membership + ?Sized>(&mut self, list: &[Entry], membership: &M) {
        for group in &mut self.groups {
            let admitted: Vec<Entry> = list
                .iter()
                .filter(|entry| membership.admits(group, entry))
                .map(|entry| Entry {
                    selected: false,
                    ..entry.clone()
                })
                .collect();
            group.entries = admitted;
        }
    }

    /// Apply `update` to every copy of the entry with `id`, across all groups.
    pub fn update_entry(&mut self, id: &EntryId, mut update: impl FnMut(&mut Entry)) {
        self.groups
            .iter_mut()
            .flat_map(|g| g.entries.iter_mut())
            .filter(|e| &e.id == id)
            .for_each(&mut update);
    }

    /// Copy read/marked flags from the current entries onto a fresh list, matched by id.
    /// Ids not currently held keep whatever flags the list already carries.
    pub fn carry_flags(&self, list: &mut [Entry]) {
        let mut known: HashMap<&EntryId, (bool, bool)> = HashMap::new();
        for entry in self.groups.iter().flat_map(|g| g.entries.iter()) {
            known.insert(&entry.id, (entry.read, entry.marked));
        }
        for entry in list.iter_mut() {
            if let Some(&(read, marked)) = known.get(&entry.id) {
                entry.read = read;
                entry.marked = marked;
            }
        }
    }
}
