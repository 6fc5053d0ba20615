use std::collections::BTreeMap;

/// Highlighted display plus one independent mode cursor per display.
///
/// Mode cursors are keyed by persistent screen id so switching displays back and forth keeps
/// each display's position. Indices are not validated here; callers own the bounds.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SelectionState {
    display_index: usize,
    mode_indices: BTreeMap<String, usize>,
}

impl SelectionState {
    pub fn new<'a>(persistent_ids: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            display_index: 0,
            mode_indices: persistent_ids
                .into_iter()
                .map(|id| (id.to_string(), 0))
                .collect(),
        }
    }

    pub fn current_display_index(&self) -> usize {
        self.display_index
    }

    pub fn set_current_display_index(&mut self, index: usize) {
        self.display_index = index;
    }

    pub fn current_mode_index(&self, persistent_id: &str) -> usize {
        self.mode_indices.get(persistent_id).copied().unwrap_or(0)
    }

    pub fn set_current_mode_index(&mut self, persistent_id: &str, index: usize) {
        self.mode_indices.insert(persistent_id.to_string(), index);
    }
}
