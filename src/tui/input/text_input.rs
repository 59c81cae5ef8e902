//! Quantity entry field.

/// State for the holding-quantity input field.
///
/// Only accepts characters that can appear in a decimal quantity; parsing
/// and validation happen when the value is committed.
#[derive(Clone, Debug, Default)]
pub struct QuantityInput {
    /// The current text content.
    pub content: String,
    /// Cursor position (character index).
    pub cursor: usize,
}

impl QuantityInput {
    /// Creates an input prefilled with an existing quantity, cursor at the end.
    pub fn with_value(value: &str) -> Self {
        Self {
            content: value.to_string(),
            cursor: value.len(),
        }
    }

    /// Inserts a character at the cursor if it fits a decimal quantity:
    /// digits, or a single `.`.
    pub fn insert(&mut self, c: char) {
        let accepted = c.is_ascii_digit() || (c == '.' && !self.content.contains('.'));
        if accepted {
            self.content.insert(self.cursor, c);
            self.cursor += 1;
        }
    }

    /// Deletes the character before the cursor (backspace).
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.content.remove(self.cursor);
        }
    }

    /// Deletes the character at the cursor position (delete).
    pub fn delete(&mut self) {
        if self.cursor < self.content.len() {
            self.content.remove(self.cursor);
        }
    }

    /// Moves the cursor left.
    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Moves the cursor right.
    pub fn move_right(&mut self) {
        if self.cursor < self.content.len() {
            self.cursor += 1;
        }
    }

    /// Moves the cursor to the beginning.
    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    /// Moves the cursor to the end.
    pub fn move_end(&mut self) {
        self.cursor = self.content.len();
    }

    /// Takes the content and resets the input.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.content)
    }

    /// Returns the current content as a string slice.
    pub fn as_str(&self) -> &str {
        &self.content
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_letters_and_second_decimal_point() {
        let mut input = QuantityInput::default();
        for c in "1a.2.5x".chars() {
            input.insert(c);
        }
        assert_eq!(input.as_str(), "1.25");
    }

    #[test]
    fn edits_at_cursor() {
        let mut input = QuantityInput::with_value("12.5");
        input.move_home();
        input.insert('0');
        assert_eq!(input.as_str(), "012.5");
        input.move_end();
        input.backspace();
        assert_eq!(input.as_str(), "012.");
        assert_eq!(input.take(), "012.");
        assert!(input.is_empty());
        assert_eq!(input.cursor, 0);
    }
}
