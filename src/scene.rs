use crate::item::ShapeItem;

/// Ordered store of shape items. Order is paint order: later items draw on
/// top. At most one item is selected at a time; every mutation keeps the
/// selection index valid or clears it.
#[derive(Default)]
pub struct Scene {
    items: Vec<ShapeItem>,
    selected: Option<usize>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[ShapeItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, index: usize) -> Option<&ShapeItem> {
        self.items.get(index)
    }

    pub fn item_mut(&mut self, index: usize) -> Option<&mut ShapeItem> {
        self.items.get_mut(index)
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_item(&self) -> Option<&ShapeItem> {
        self.items.get(self.selected?)
    }

    /// Select an item by index, or clear the selection with `None`.
    /// Out-of-range indices clear the selection.
    pub fn select(&mut self, index: Option<usize>) {
        self.selected = index.filter(|&i| i < self.items.len());
    }

    pub fn append(&mut self, item: ShapeItem) {
        self.items.push(item);
    }

    /// Swap out the item at `index`. Replacing the selected item clears the
    /// selection, since the caller's notion of what was selected no longer
    /// holds.
    pub fn replace_at(&mut self, index: usize, item: ShapeItem) {
        if index >= self.items.len() {
            return;
        }
        self.items[index] = item;
        if self.selected == Some(index) {
            self.selected = None;
        }
    }

    /// Replace `count` items starting at `index` with `replacements`
    /// (possibly empty). Used by the eraser to turn one item into
    /// zero-or-many fragments. Selection indices at or past `index` are
    /// cleared or shifted to keep them valid.
    pub fn replace_range(&mut self, index: usize, count: usize, replacements: Vec<ShapeItem>) {
        if index > self.items.len() {
            return;
        }
        let count = count.min(self.items.len() - index);
        let added = replacements.len();
        self.items.splice(index..index + count, replacements);

        if let Some(sel) = self.selected {
            if sel >= index + count {
                self.selected = Some(sel + added - count);
            } else if sel >= index {
                self.selected = None;
            }
        }
    }

    pub fn remove_at(&mut self, index: usize) -> Option<ShapeItem> {
        if index >= self.items.len() {
            return None;
        }
        let removed = self.items.remove(index);
        if let Some(sel) = self.selected {
            if sel == index {
                self.selected = None;
            } else if sel > index {
                self.selected = Some(sel - 1);
            }
        }
        Some(removed)
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.selected = None;
    }
}
