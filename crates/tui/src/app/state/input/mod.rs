/// Editable multi-line text. The cursor is a byte offset that always sits on
/// a char boundary.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    text: String,
    cursor: usize,
    goal_column: Option<usize>,
}

impl InputState {
    pub fn current(&self) -> String {
        self.text.clone()
    }

    #[cfg(test)]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Text on the cursor's line, up to the cursor.
    pub fn line_before_cursor(&self) -> &str {
        &self.text[self.line_start(self.cursor)..self.cursor]
    }

    pub fn set_from(&mut self, value: &str) {
        self.text = value.to_string();
        self.cursor = self.text.len();
        self.goal_column = None;
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
        self.goal_column = None;
    }

    pub fn insert_char(&mut self, ch: char) {
        self.text.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
        self.goal_column = None;
    }

    #[cfg(test)]
    pub fn insert_str(&mut self, value: &str) {
        self.text.insert_str(self.cursor, value);
        self.cursor += value.len();
        self.goal_column = None;
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = self.prev_boundary(self.cursor) {
            self.text.replace_range(prev..self.cursor, "");
            self.cursor = prev;
        }
        self.goal_column = None;
    }

    pub fn delete(&mut self) {
        if let Some(next) = self.next_boundary(self.cursor) {
            self.text.replace_range(self.cursor..next, "");
        }
        self.goal_column = None;
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = self.prev_boundary(self.cursor) {
            self.cursor = prev;
        }
        self.goal_column = None;
    }

    pub fn move_right(&mut self) {
        if let Some(next) = self.next_boundary(self.cursor) {
            self.cursor = next;
        }
        self.goal_column = None;
    }

    pub fn move_home(&mut self) {
        self.cursor = self.line_start(self.cursor);
        self.goal_column = None;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.line_end(self.cursor);
        self.goal_column = None;
    }

    /// Moves to the previous line, keeping the column the vertical motion
    /// started from. Returns false on the first line.
    pub fn move_up(&mut self) -> bool {
        let start = self.line_start(self.cursor);
        if start == 0 {
            self.goal_column = None;
            return false;
        }
        let column = self.goal_column.unwrap_or_else(|| self.column());
        let prev_end = start - 1;
        let prev_start = self.line_start(prev_end);
        self.cursor = self.offset_in_line(prev_start, prev_end, column);
        self.goal_column = Some(column);
        true
    }

    /// Returns false on the last line.
    pub fn move_down(&mut self) -> bool {
        let end = self.line_end(self.cursor);
        if end == self.text.len() {
            self.goal_column = None;
            return false;
        }
        let column = self.goal_column.unwrap_or_else(|| self.column());
        let next_start = end + 1;
        let next_end = self.line_end(next_start);
        self.cursor = self.offset_in_line(next_start, next_end, column);
        self.goal_column = Some(column);
        true
    }

    /// Removes trailing whitespace before the cursor and then the word before it.
    pub fn delete_word_back(&mut self) {
        let head = self.text[..self.cursor].trim_end_matches(char::is_whitespace);
        let word_start = head
            .char_indices()
            .rev()
            .find(|(_, ch)| ch.is_whitespace())
            .map(|(idx, ch)| idx + ch.len_utf8())
            .unwrap_or(0);
        self.text.replace_range(word_start..self.cursor, "");
        self.cursor = word_start;
        self.goal_column = None;
    }

    /// Zero-based (line, column) of the cursor, in chars.
    pub fn cursor_line_col(&self) -> (usize, usize) {
        let line = self.text[..self.cursor].matches('\n').count();
        (line, self.column())
    }

    fn column(&self) -> usize {
        self.line_before_cursor().chars().count()
    }

    fn prev_boundary(&self, pos: usize) -> Option<usize> {
        self.text[..pos]
            .chars()
            .next_back()
            .map(|ch| pos - ch.len_utf8())
    }

    fn next_boundary(&self, pos: usize) -> Option<usize> {
        self.text[pos..].chars().next().map(|ch| pos + ch.len_utf8())
    }

    fn line_start(&self, pos: usize) -> usize {
        self.text[..pos].rfind('\n').map(|idx| idx + 1).unwrap_or(0)
    }

    fn line_end(&self, pos: usize) -> usize {
        self.text[pos..]
            .find('\n')
            .map(|idx| pos + idx)
            .unwrap_or(self.text.len())
    }

    fn offset_in_line(&self, start: usize, end: usize, column: usize) -> usize {
        self.text[start..end]
            .char_indices()
            .nth(column)
            .map(|(idx, _)| start + idx)
            .unwrap_or(end)
    }
}
