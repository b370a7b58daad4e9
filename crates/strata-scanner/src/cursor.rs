use std::str::Chars;

use text_size::{TextLen, TextSize};

pub(crate) const EOF_CHAR: char = '\0';

pub(crate) struct Cursor<'t> {
    chars: Chars<'t>,
    len: TextSize,
    previous: char,
    blank_prefix: bool,
}

impl<'t> Cursor<'t> {
    pub(crate) fn new(text: &'t str, previous: char, blank_prefix: bool) -> Self {
        Self { chars: text.chars(), len: text.text_len(), previous, blank_prefix }
    }

    pub(crate) fn rest(&self) -> &'t str {
        self.chars.as_str()
    }

    pub(crate) fn is_eof(&self) -> bool {
        self.chars.as_str().is_empty()
    }

    pub(crate) fn previous(&self) -> char {
        self.previous
    }

    /// Whether only spaces and tabs were consumed since the last line break.
    pub(crate) fn blank_prefix(&self) -> bool {
        self.blank_prefix
    }

    fn consume(&mut self, c: char) {
        self.previous = c;
        self.blank_prefix = match c {
            '\n' | '\r' => true,
            ' ' | '\t' => self.blank_prefix,
            _ => false,
        };
    }

    /// Bytes consumed since the cursor was created.
    pub(crate) fn consumed(&self) -> TextSize {
        self.len - self.rest().text_len()
    }

    pub(crate) fn advance(&mut self) -> char {
        let c = self.chars.next().unwrap_or(EOF_CHAR);
        self.consume(c);
        c
    }

    /// Skips `len` bytes, which must end on a char boundary.
    pub(crate) fn bump(&mut self, len: usize) {
        let rest = self.chars.as_str();
        let (skipped, rest) = rest.split_at(len);
        for c in skipped.chars() {
            self.consume(c);
        }
        self.chars = rest.chars();
    }
}
