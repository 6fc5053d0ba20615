/// Scroll window over a list of `total` rows that keeps the selection centered when it can.
///
/// Knows nothing about the rows themselves, only their count, so the same type serves the
/// display list and every per-display mode list.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Viewport {
    max_height: usize,
    offset: usize,
    current_index: usize,
}

impl Viewport {
    pub fn new(max_height: usize) -> Self {
        Self {
            max_height: max_height.max(1),
            offset: 0,
            current_index: 0,
        }
    }

    pub fn max_height(&self) -> usize {
        self.max_height
    }

    /// Takes effect on the next `update`.
    pub fn set_max_height(&mut self, max_height: usize) {
        self.max_height = max_height.max(1);
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn update(&mut self, total_items: usize, current_index: usize) {
        self.current_index = current_index;
        let centered = current_index.saturating_sub(self.max_height / 2);
        let max_offset = total_items.saturating_sub(self.max_height);
        self.offset = centered.min(max_offset);
    }

    /// Half-open `[start, end)` range of visible rows.
    pub fn visible_range(&self, total_items: usize) -> (usize, usize) {
        let end = self.offset.saturating_add(self.max_height).min(total_items);
        (self.offset.min(end), end)
    }

    pub fn has_scroll_up(&self) -> bool {
        self.offset() > 0
    }

    pub fn has_scroll_down(&self, total_items: usize) -> bool {
        self.offset.saturating_add(self.max_height) < total_items
    }
}
