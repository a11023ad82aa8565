use zeroize::Zeroize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Username,
    Password,
}

impl Field {
    /// "Next"/"done" on one field hands focus to the other.
    pub fn other(self) -> Self {
        match self {
            Field::Username => Field::Password,
            Field::Password => Field::Username,
        }
    }
}

/// Single-line text input. Secure fields render masked and wipe their
/// contents when cleared or dropped.
#[derive(Default)]
pub struct TextField {
    content: String,
    cursor: usize,
    secure: bool,
}

impl TextField {
    pub fn plain() -> Self {
        Self::default()
    }

    pub fn secure() -> Self {
        Self {
            content: String::new(),
            cursor: 0,
            secure: true,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    pub fn display(&self) -> String {
        if self.secure {
            "•".repeat(self.char_count())
        } else {
            self.content.clone()
        }
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_offset(self.cursor);
        self.content.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_offset(self.cursor);
        self.content.remove(at);
    }

    pub fn delete(&mut self) {
        if self.cursor < self.char_count() {
            let at = self.byte_offset(self.cursor);
            self.content.remove(at);
        }
    }

    pub fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_count());
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.char_count();
    }

    pub fn clear(&mut self) {
        self.wipe();
        self.cursor = 0;
    }

    /// Overwrite the whole buffer, spare capacity included, then empty it.
    fn wipe(&mut self) {
        self.content.zeroize();
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.content
            .char_indices()
            .nth(chars)
            .map(|(i, _)| i)
            .unwrap_or(self.content.len())
    }
}

impl Drop for TextField {
    fn drop(&mut self) {
        if self.secure {
            self.wipe();
        }
    }
}
