use crate::projection::{Slot, ViewProjection};

/// Vertical scroll position over the projection's virtual rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollWindow {
    pub offset: usize,
    visible_lines: usize,
}

impl ScrollWindow {
    pub fn new(visible_lines: usize) -> Self {
        Self {
            offset: 0,
            visible_lines,
        }
    }

    pub fn visible_lines(&self) -> usize {
        self.visible_lines
    }

    pub fn set_visible_lines(&mut self, visible_lines: usize) {
        self.visible_lines = visible_lines;
    }

    pub fn max_offset(&self, projection: &ViewProjection) -> usize {
        projection.max_offset(self.visible_lines)
    }

    /// Shift the window the least amount needed to bring `slot` on screen. Returns whether
    /// the offset moved.
    pub fn check(&mut self, slot: &Slot) -> bool {
        let before = self.offset;
        if slot.row < self.offset {
            self.offset = slot.row;
        } else if slot.end() > self.offset + self.visible_lines {
            self.offset = slot.end().saturating_sub(self.visible_lines);
        }
        self.offset != before
    }

    /// Put `slot` at the top of the window, as far as the projection allows.
    pub fn align_top(&mut self, slot: &Slot, projection: &ViewProjection) {
        self.offset = slot.row.min(self.max_offset(projection));
    }

    pub fn clamp(&mut self, projection: &ViewProjection) {
        self.offset = self.offset.min(self.max_offset(projection));
    }

    /// Slots intersecting the window paired with their window-relative row. The first slot may
    /// start above the window, giving a negative row.
    pub fn visible<'a>(
        &self,
        projection: &'a ViewProjection,
    ) -> impl Iterator<Item = (&'a Slot, isize)> + 'a {
        let offset = self.offset;
        let bottom = self.offset + self.visible_lines;
        projection
            .slots()
            .iter()
            .skip_while(move |slot| slot.end() <= offset)
            .take_while(move |slot| slot.row < bottom)
            .map(move |slot| (slot, to_signed(slot.row) - to_signed(offset)))
    }
}

#[allow(clippy::cast_possible_wrap)]
fn to_signed(value: usize) -> isize {
    value as isize
}
