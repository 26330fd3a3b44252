use crate::entry::EntryId;
use crate::group::GroupCollection;
use crate::host::{Renderer, ViewContext};

/// One visible entry: where it lives in the collection and which virtual rows it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub group: usize,
    pub entry: usize,
    pub row: usize,
    pub lines: usize,
}

impl Slot {
    /// First virtual row past this slot.
    pub fn end(&self) -> usize {
        self.row + self.lines
    }
}

/// The flat sequence of visible entries, derived from scratch on every structural change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewProjection {
    slots: Vec<Slot>,
}

impl ViewProjection {
    /// Walk groups in order and ask the renderer to size every candidate. Collapsed groups
    /// contribute at most their first entry; a zero-line render leaves the entry out.
    pub fn rebuild<R: Renderer + ?Sized>(
        groups: &GroupCollection,
        renderer: &mut R,
        ctx: &ViewContext,
    ) -> Self {
        let mut slots = Vec::new();
        let mut row = 0;

        for (group_index, group) in groups.iter().enumerate() {
            for (entry_index, entry) in group.entries().iter().enumerate() {
                if group.collapsed && entry_index > 0 {
                    break;
                }
                let lines = renderer.render(group, entry, row, ctx);
                if lines == 0 {
                    continue;
                }
                slots.push(Slot {
                    group: group_index,
                    entry: entry_index,
                    row,
                    lines,
                });
                row += lines;
            }
        }

        Self { slots }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn total_lines(&self) -> usize {
        self.slots.last().map_or(0, Slot::end)
    }

    /// Largest scroll offset that still fills the window, floored at zero.
    pub fn max_offset(&self, visible_lines: usize) -> usize {
        self.total_lines().saturating_sub(visible_lines)
    }

    /// Index of the slot showing `id` inside `group`, if it is still projected there.
    pub fn position_of(&self, groups: &GroupCollection, group: usize, id: &EntryId) -> Option<usize> {
        self.slots.iter().position(|slot| {
            slot.group == group
                && groups
                    .entry(slot.group, slot.entry)
                    .is_some_and(|(_, entry)| &entry.id == id)
        })
    }

    /// First slot belonging to `group` or any later group.
    pub fn first_from_group(&self, group: usize) -> Option<usize> {
        self.slots.iter().position(|slot| slot.group >= group)
    }
}
