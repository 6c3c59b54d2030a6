use unicode_segmentation::UnicodeSegmentation;

/// Single-line text buffer with a byte-offset cursor that always sits on a grapheme
/// boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    text: String,
    cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Replace the contents, leaving the cursor at the end
    pub fn set(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.text.len();
    }

    fn boundaries(&self) -> Vec<usize> {
        let mut boundaries: Vec<usize> = self.text.grapheme_indices(true).map(|(i, _)| i).collect();
        boundaries.push(self.text.len());
        boundaries
    }

    /// Snap the cursor onto a boundary and return that boundary's index
    fn clamp_cursor(&mut self, boundaries: &[usize]) -> usize {
        let cursor = self.cursor.min(self.text.len());
        let idx = match boundaries.binary_search(&cursor) {
            Ok(idx) => idx,
            Err(idx) => idx.saturating_sub(1),
        };
        self.cursor = boundaries.get(idx).copied().unwrap_or(0);
        idx
    }

    pub fn insert_char(&mut self, c: char) {
        let boundaries = self.boundaries();
        self.clamp_cursor(&boundaries);
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Remove the grapheme before the cursor. Returns whether anything was removed.
    pub fn backspace(&mut self) -> bool {
        let boundaries = self.boundaries();
        let idx = self.clamp_cursor(&boundaries);
        if idx == 0 {
            return false;
        }
        let prev = boundaries[idx - 1];
        self.text.drain(prev..self.cursor);
        self.cursor = prev;
        true
    }

    /// Remove the grapheme under the cursor. Returns whether anything was removed.
    pub fn delete_forward(&mut self) -> bool {
        let boundaries = self.boundaries();
        let idx = self.clamp_cursor(&boundaries);
        if idx + 1 >= boundaries.len() {
            return false;
        }
        let end = boundaries[idx + 1];
        self.text.drain(self.cursor..end);
        true
    }

    /// Delete back to the start of the previous word (trailing whitespace included)
    pub fn delete_word(&mut self) -> bool {
        let boundaries = self.boundaries();
        let idx = self.clamp_cursor(&boundaries);
        if idx == 0 {
            return false;
        }

        let graphemes: Vec<&str> = self.text.graphemes(true).collect();
        let is_space = |i: usize| graphemes[i].chars().all(char::is_whitespace);

        let mut start = idx;
        while start > 0 && is_space(start - 1) {
            start -= 1;
        }
        while start > 0 && !is_space(start - 1) {
            start -= 1;
        }

        let from = boundaries[start];
        self.text.drain(from..self.cursor);
        self.cursor = from;
        true
    }

    pub fn cursor_left(&mut self) {
        let boundaries = self.boundaries();
        let idx = self.clamp_cursor(&boundaries);
        if idx > 0 {
            self.cursor = boundaries[idx - 1];
        }
    }

    pub fn cursor_right(&mut self) {
        let boundaries = self.boundaries();
        let idx = self.clamp_cursor(&boundaries);
        if idx + 1 < boundaries.len() {
            self.cursor = boundaries[idx + 1];
        }
    }

    pub fn cursor_start(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.text.len();
    }
}
