//! Single-line edit buffer for the rename field.
//!
//! `EditBuffer` owns the text, the cursor byte offset, a select-all flag
//! (set when editing starts, so the first keystroke replaces the old name)
//! and a horizontal scroll offset that keeps the cursor in view.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditBuffer {
    text: String,
    /// Byte offset into `text` (always on a char boundary)
    cursor: usize,
    selected_all: bool,
    /// First visible display column
    scroll: usize,
}

impl EditBuffer {
    /// A buffer holding `text` with everything selected and the cursor at the end.
    pub fn selecting(text: &str) -> Self {
        Self {
            text: text.to_string(),
            cursor: text.len(),
            selected_all: !text.is_empty(),
            scroll: 0,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_all_selected(&self) -> bool {
        self.selected_all
    }

    /// Drop the selected text, if any. Returns whether something was selected.
    fn take_selection(&mut self) -> bool {
        if !self.selected_all {
            return false;
        }
        self.selected_all = false;
        self.text.clear();
        self.cursor = 0;
        self.scroll = 0;
        true
    }

    pub fn insert(&mut self, c: char) {
        // Single-line field: line breaks are dropped.
        if c == '\n' || c == '\r' {
            return;
        }
        self.take_selection();
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn insert_str(&mut self, s: &str) {
        let clean: String = s.chars().filter(|c| *c != '\n' && *c != '\r').collect();
        if clean.is_empty() {
            return;
        }
        self.take_selection();
        self.text.insert_str(self.cursor, &clean);
        self.cursor += clean.len();
    }

    pub fn backspace(&mut self) {
        if self.take_selection() {
            return;
        }
        if let Some(c) = self.text[..self.cursor].chars().next_back() {
            let start = self.cursor - c.len_utf8();
            self.text.drain(start..self.cursor);
            self.cursor = start;
        }
    }

    pub fn delete(&mut self) {
        if self.take_selection() {
            return;
        }
        if let Some(c) = self.text[self.cursor..].chars().next() {
            self.text.drain(self.cursor..self.cursor + c.len_utf8());
        }
    }

    pub fn move_left(&mut self) {
        if std::mem::take(&mut self.selected_all) {
            self.cursor = 0;
            return;
        }
        if let Some(c) = self.text[..self.cursor].chars().next_back() {
            self.cursor -= c.len_utf8();
        }
    }

    pub fn move_right(&mut self) {
        if std::mem::take(&mut self.selected_all) {
            self.cursor = self.text.len();
            return;
        }
        if let Some(c) = self.text[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    pub fn move_home(&mut self) {
        self.selected_all = false;
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.selected_all = false;
        self.cursor = self.text.len();
    }

    /// Display column of the cursor within the whole text.
    pub fn cursor_column(&self) -> usize {
        self.text[..self.cursor].width()
    }

    /// The slice of text visible in a field `width` columns wide, and the
    /// cursor's column inside that slice. Scrolls horizontally as needed.
    pub fn visible(&mut self, width: usize) -> (String, u16) {
        if width == 0 {
            return (String::new(), 0);
        }
        let cursor_col = self.cursor_column();
        // Keep one column free for the cursor at the end of the text.
        if cursor_col < self.scroll {
            self.scroll = cursor_col;
        } else if cursor_col >= self.scroll + width {
            self.scroll = cursor_col + 1 - width;
        }

        let mut col = 0;
        let mut out = String::new();
        for c in self.text.chars() {
            let w = c.width().unwrap_or(0);
            if col >= self.scroll && col + w <= self.scroll + width {
                out.push(c);
            }
            col += w;
            if col >= self.scroll + width {
                break;
            }
        }
        (out, (cursor_col - self.scroll) as u16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selecting_replaces_on_first_keystroke() {
        let mut buf = EditBuffer::selecting("Informe mensual");
        assert!(buf.is_all_selected());
        buf.insert('X');
        assert_eq!(buf.text(), "X");
        assert!(!buf.is_all_selected());
        buf.insert('y');
        assert_eq!(buf.text(), "Xy");
    }

    #[test]
    fn test_backspace_on_selection_clears() {
        let mut buf = EditBuffer::selecting("abc");
        buf.backspace();
        assert_eq!(buf.text(), "");
        buf.backspace();
        assert_eq!(buf.text(), "");
    }

    #[test]
    fn test_arrow_keys_keep_text_and_clear_selection() {
        let mut buf = EditBuffer::selecting("abc");
        buf.move_left();
        assert!(!buf.is_all_selected());
        assert_eq!(buf.cursor_column(), 0);
        buf.insert('>');
        assert_eq!(buf.text(), ">abc");

        let mut buf = EditBuffer::selecting("abc");
        buf.move_right();
        buf.insert('!');
        assert_eq!(buf.text(), "abc!");
    }

    #[test]
    fn test_multibyte_editing() {
        let mut buf = EditBuffer::selecting("reunión");
        buf.move_end();
        buf.backspace();
        buf.backspace();
        assert_eq!(buf.text(), "reuni");
        buf.insert('ó');
        buf.insert('n');
        assert_eq!(buf.text(), "reunión");
        buf.move_left();
        buf.move_left();
        buf.delete();
        assert_eq!(buf.text(), "reunin");
    }

    #[test]
    fn test_paste_strips_newlines() {
        let mut buf = EditBuffer::selecting("");
        buf.insert_str("Acta\nde\r\nreunión");
        assert_eq!(buf.text(), "Actadereunión");
        buf.insert('\n');
        assert_eq!(buf.text(), "Actadereunión");
    }

    #[test]
    fn test_visible_scrolls_to_cursor() {
        let mut buf = EditBuffer::selecting("abcdefghij");
        buf.move_end();
        let (text, col) = buf.visible(5);
        assert_eq!(text, "ghij");
        assert_eq!(col, 4);

        buf.move_home();
        let (text, col) = buf.visible(5);
        assert_eq!(text, "abcde");
        assert_eq!(col, 0);
    }

    #[test]
    fn test_visible_short_text_fits() {
        let mut buf = EditBuffer::selecting("abc");
        assert_eq!(buf.visible(10), ("abc".to_string(), 3));
        assert_eq!(buf.visible(0), (String::new(), 0));
    }
}
