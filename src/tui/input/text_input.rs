//! Single-line text input used for the exhibitor search box.

use unicode_width::UnicodeWidthStr;

/// State for a text input field.
#[derive(Clone, Debug, Default)]
pub struct TextInput {
    /// The current text content.
    content: String,
    /// Cursor position, in characters.
    cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a character at the cursor position.
    pub fn insert(&mut self, c: char) {
        let at = self.byte_offset(self.cursor);
        self.content.insert(at, c);
        self.cursor += 1;
    }

    /// Deletes the character before the cursor (backspace).
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_offset(self.cursor);
            self.content.remove(at);
        }
    }

    /// Deletes the character at the cursor position (delete).
    pub fn delete(&mut self) {
        if self.cursor < self.char_count() {
            let at = self.byte_offset(self.cursor);
            self.content.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }

    /// Empties the input.
    pub fn clear(&mut self) {
        self.cursor = 0;
        self.content.clear();
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Terminal columns occupied by the text before the cursor.
    pub fn cursor_column(&self) -> u16 {
        let before = &self.content[..self.byte_offset(self.cursor)];
        u16::try_from(before.width()).unwrap_or(u16::MAX)
    }

    fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.content
            .char_indices()
            .nth(chars)
            .map_or(self.content.len(), |(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> TextInput {
        let mut input = TextInput::new();
        text.chars().for_each(|c| input.insert(c));
        input
    }

    #[test]
    fn edits_at_cursor() {
        let mut input = typed("costa");
        input.move_home();
        input.delete();
        input.insert('C');
        assert_eq!(input.as_str(), "Costa");
        input.move_end();
        input.backspace();
        assert_eq!(input.as_str(), "Cost");
    }

    #[test]
    fn handles_multibyte_characters() {
        let mut input = typed("café");
        input.move_left();
        input.insert('x');
        assert_eq!(input.as_str(), "cafxé");
        input.move_end();
        input.backspace();
        assert_eq!(input.as_str(), "cafx");
    }

    #[test]
    fn cursor_column_counts_display_width() {
        let mut input = typed("日本");
        assert_eq!(input.cursor_column(), 4);
        input.move_left();
        assert_eq!(input.cursor_column(), 2);
    }

    #[test]
    fn clear_resets_cursor() {
        let mut input = typed("abc");
        input.clear();
        assert!(input.is_empty());
        assert_eq!(input.cursor_column(), 0);
    }
}
