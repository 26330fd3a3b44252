/// Screen geometry the view is laid out against. Read-only during a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub rows: usize,
    pub columns: usize,
    pub width: usize,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            rows: 24,
            columns: 1,
            width: 80,
        }
    }
}

impl Layout {
    pub fn new(rows: usize, columns: usize, width: usize) -> Self {
        Self {
            rows,
            columns: columns.max(1),
            width,
        }
    }

    /// Lines visible at once: entries flow down one column and continue at the top of the next.
    pub fn visible_lines(&self) -> usize {
        self.rows * self.columns
    }

    pub fn column_width(&self) -> usize {
        self.width / self.columns.max(1)
    }

    /// Map a window-relative line to `(column, row)`, or `None` if it falls outside the window.
    pub fn locate(&self, line: usize) -> Option<(usize, usize)> {
        if self.rows == 0 || line >= self.visible_lines() {
            return None;
        }
        Some((line / self.rows, line % self.rows))
    }
}
