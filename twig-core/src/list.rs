/// How a list session ended. Raised by key handling, consumed once by the driving loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListSignal {
    Finished,
    Canceled,
}

/// Ordered cursor over a candidate set that gets replaced wholesale.
///
/// The cursor is `None` exactly when the list is empty, otherwise it is clamped to
/// `0..len`. Used for branches and for stash paths.
#[derive(Debug, Clone)]
pub struct SelectionList<T> {
    items: Vec<T>,
    selected: Option<usize>,
    scroll_offset: usize,
    page_rows: usize,
    signal: Option<ListSignal>,
}

impl<T> Default for SelectionList<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T> SelectionList<T> {
    pub fn new(items: Vec<T>) -> Self {
        let selected = if items.is_empty() { None } else { Some(0) };
        Self {
            items,
            selected,
            scroll_offset: 0,
            page_rows: 10,
            signal: None,
        }
    }

    /// Replace the visible set. The cursor goes back to the top; the previously
    /// highlighted item is not searched for.
    pub fn set_candidates(&mut self, items: Vec<T>) {
        self.selected = if items.is_empty() { None } else { Some(0) };
        self.items = items;
        self.scroll_offset = 0;
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected(&self) -> Option<&T> {
        self.selected.and_then(|i| self.items.get(i))
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn move_up(&mut self) {
        self.move_by(-1);
    }

    pub fn move_down(&mut self) {
        self.move_by(1);
    }

    pub fn page_up(&mut self) {
        self.move_by(-self.page_delta());
    }

    pub fn page_down(&mut self) {
        self.move_by(self.page_delta());
    }

    fn page_delta(&self) -> isize {
        isize::try_from(self.page_rows.max(1)).unwrap_or(isize::MAX)
    }

    /// Move by `delta`, clamping to bounds. No-op on an empty list.
    pub fn move_by(&mut self, delta: isize) {
        let len = self.items.len();
        if len == 0 {
            return;
        }
        let current = self.selected.unwrap_or(0);
        let next = if delta >= 0 {
            current.saturating_add(delta.unsigned_abs()).min(len - 1)
        } else {
            current.saturating_sub(delta.unsigned_abs())
        };
        self.selected = Some(next);
    }

    /// Remove and return the highlighted item, keeping the cursor in bounds
    pub fn take_selected(&mut self) -> Option<T> {
        let idx = self.selected?;
        let item = self.items.remove(idx);
        self.selected = if self.items.is_empty() {
            None
        } else {
            Some(idx.min(self.items.len() - 1))
        };
        Some(item)
    }

    /// Append an item; an empty list gains a cursor at the new item
    pub fn push(&mut self, item: T) {
        self.items.push(item);
        if self.selected.is_none() {
            self.selected = Some(0);
        }
    }

    pub fn set_page_rows(&mut self, rows: usize) {
        self.page_rows = rows.max(1);
    }

    /// Keep the cursor inside the viewport, with one row of context above and below
    /// when there is room for it.
    pub fn update_scroll_offset(&mut self) {
        let len = self.items.len();
        if len == 0 {
            self.scroll_offset = 0;
            return;
        }

        let viewport_rows = self.page_rows.max(1);
        let max_offset = len.saturating_sub(viewport_rows);
        let selected = self.selected.unwrap_or(0).min(len - 1);
        let anchor_top = usize::from(viewport_rows > 2);
        let anchor_bottom = viewport_rows.saturating_sub(1 + anchor_top);

        if selected < self.scroll_offset.saturating_add(anchor_top) {
            self.scroll_offset = selected.saturating_sub(anchor_top);
        } else if selected > self.scroll_offset.saturating_add(anchor_bottom) {
            self.scroll_offset = selected.saturating_sub(anchor_bottom);
        }

        self.scroll_offset = self.scroll_offset.min(max_offset);
    }

    pub fn finish(&mut self) {
        self.signal = Some(ListSignal::Finished);
    }

    pub fn cancel(&mut self) {
        self.signal = Some(ListSignal::Canceled);
    }

    /// Hand the pending signal to the caller; a second call returns `None`
    pub fn take_signal(&mut self) -> Option<ListSignal> {
        self.signal.take()
    }
}
