//! A forward-only position in an immutable string.
//!
//! Every read is bounds-checked and only ever lands on a char boundary, so
//! truncated or malformed markup can never panic the decoder.

#[derive(Debug, Clone)]
pub(crate) struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.text.len()
    }

    /// The unread part of the text.
    pub fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Consume `prefix` if the unread text starts with it.
    pub fn eat(&mut self, prefix: &str) -> bool {
        if self.rest().starts_with(prefix) {
            self.pos += prefix.len();
            true
        } else {
            false
        }
    }

    /// Consume and return everything before the next `pattern`, leaving the
    /// cursor on the pattern. Without a match, consumes the rest.
    pub fn take_until(&mut self, pattern: &str) -> &'a str {
        let rest = self.rest();
        let len = rest.find(pattern).unwrap_or(rest.len());
        self.pos += len;
        &rest[..len]
    }
}
