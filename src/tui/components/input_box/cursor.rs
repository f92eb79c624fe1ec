//! Cursor position tracking for the InputBox.
//!
//! `CursorState` owns the cursor byte offset and the horizontal scroll
//! offset. All methods accept `buffer: &str` explicitly; the text is owned by
//! `InputBox`, keeping the dependency visible.

use unicode_width::UnicodeWidthStr;

/// Cursor and horizontal scroll state, separated from the text buffer.
pub(super) struct CursorState {
    /// Cursor position as byte offset in buffer (0..=buffer.len())
    pub pos: usize,
    /// First visible display column
    pub scroll_offset: u16,
}

impl CursorState {
    pub fn new() -> Self {
        Self {
            pos: 0,
            scroll_offset: 0,
        }
    }

    /// Reset cursor to start (used after Submit clears the buffer).
    pub fn reset(&mut self) {
        self.pos = 0;
        self.scroll_offset = 0;
    }

    /// Display column of the cursor, accounting for wide characters.
    pub fn column(&self, buffer: &str) -> u16 {
        buffer[..self.pos].width().min(u16::MAX as usize) as u16
    }

    /// Keep the cursor inside a viewport `width` columns wide.
    pub fn update_scroll_offset(&mut self, buffer: &str, width: u16) {
        if width == 0 {
            self.scroll_offset = 0;
            return;
        }
        let column = self.column(buffer);
        if column < self.scroll_offset {
            self.scroll_offset = column;
        } else if column >= self.scroll_offset + width {
            self.scroll_offset = column - width + 1;
        }
    }

    /// Cursor column relative to the left edge of the visible text.
    pub fn visible_column(&self, buffer: &str) -> u16 {
        self.column(buffer).saturating_sub(self.scroll_offset)
    }
}

/// Find the byte offset of the previous character boundary before `pos` in `text`.
pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Find the byte offset of the next character boundary after `pos` in `text`.
pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_boundaries_multibyte() {
        let text = "aé👋b";
        assert_eq!(next_char_boundary(text, 0), 1);
        assert_eq!(next_char_boundary(text, 1), 3);
        assert_eq!(next_char_boundary(text, 3), 7);
        assert_eq!(prev_char_boundary(text, 7), 3);
        assert_eq!(prev_char_boundary(text, 0), 0);
        assert_eq!(next_char_boundary(text, text.len()), text.len());
    }

    #[test]
    fn test_column_counts_wide_chars() {
        let mut cursor = CursorState::new();
        let text = "a👋";
        cursor.pos = text.len();
        assert_eq!(cursor.column(text), 3);
    }

    #[test]
    fn test_scroll_follows_cursor() {
        let mut cursor = CursorState::new();
        let text = "abcdefghij";

        cursor.pos = 10;
        cursor.update_scroll_offset(text, 4);
        assert_eq!(cursor.scroll_offset, 7);
        assert_eq!(cursor.visible_column(text), 3);

        cursor.pos = 2;
        cursor.update_scroll_offset(text, 4);
        assert_eq!(cursor.scroll_offset, 2);
        assert_eq!(cursor.visible_column(text), 0);

        cursor.reset();
        assert_eq!(cursor.pos, 0);
        assert_eq!(cursor.scroll_offset, 0);
    }
}
