use crate::entry::{Entry, EntryId};
use crate::filter::FilterCycle;
use crate::group::{Group, GroupCollection};
use crate::host::{Renderer, ViewContext};
use crate::layout::Layout;
use crate::message::Messages;
use crate::projection::{Slot, ViewProjection};
use crate::scroll::ScrollWindow;

/// Which keymap layer is active in the host
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Browse,
    Search,
}

/// Everything the engine mutates. Owned by a `Session`; operations borrow it explicitly.
#[derive(Debug, Clone)]
pub struct ViewState {
    pub groups: GroupCollection,
    pub projection: ViewProjection,
    /// Index into `projection`; `None` exactly when nothing is selected.
    pub cursor: Option<usize>,
    pub scroll: ScrollWindow,
    pub layout: Layout,
    /// Global filter cycle.
    pub filters: FilterCycle,
    pub messages: Messages,
}

impl ViewState {
    pub fn new(groups: GroupCollection, layout: Layout, filters: FilterCycle) -> Self {
        Self {
            groups,
            projection: ViewProjection::default(),
            cursor: None,
            scroll: ScrollWindow::new(layout.visible_lines()),
            layout,
            filters,
            messages: Messages::default(),
        }
    }

    pub fn context(&self) -> ViewContext {
        ViewContext {
            layout: self.layout,
            filter: self.filters.current(),
        }
    }

    pub fn has_items(&self) -> bool {
        !self.projection.is_empty()
    }

    pub fn selected_slot(&self) -> Option<Slot> {
        self.cursor.and_then(|c| self.projection.get(c)).copied()
    }

    pub fn selected(&self) -> Option<(&Group, &Entry)> {
        let slot = self.selected_slot()?;
        self.groups.entry(slot.group, slot.entry)
    }

    pub fn selected_id(&self) -> Option<&EntryId> {
        self.selected().map(|(_, entry)| &entry.id)
    }

    pub fn selected_group(&self) -> Option<usize> {
        self.selected_slot().map(|slot| slot.group)
    }

    pub fn slot_entry(&self, index: usize) -> Option<(&Group, &Entry)> {
        let slot = self.projection.get(index)?;
        self.groups.entry(slot.group, slot.entry)
    }

    pub fn rebuild<R: Renderer + ?Sized>(&mut self, renderer: &mut R) {
        self.projection = ViewProjection::rebuild(&self.groups, renderer, &self.context());
    }

    /// Clamp the offset after the projection shrank and keep the selection on screen.
    pub fn settle_scroll(&mut self) {
        self.scroll.clamp(&self.projection);
        if let Some(slot) = self.selected_slot() {
            self.scroll.check(&slot);
        }
    }

    /// Slots to draw this frame, with window-relative rows.
    pub fn visible_slots(&self) -> impl Iterator<Item = (&Slot, isize)> {
        self.scroll.visible(&self.projection)
    }
}
