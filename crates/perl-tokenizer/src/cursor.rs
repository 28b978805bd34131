use std::str::Chars;

use text_size::{TextLen, TextSize};

pub(crate) const EOF_CHAR: char = '\0';

/// Forward-only view over the source that knows where it is in lines and columns.
pub(crate) struct Cursor<'a> {
    chars: Chars<'a>,
    len: TextSize,
    previous: char,
    line: u32,
    column: u32,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Self { chars: text.chars(), len: text.text_len(), previous: '\n', line: 1, column: 1 }
    }

    /// Byte offset of the next character.
    pub(crate) fn offset(&self) -> TextSize {
        self.len - self.rest().text_len()
    }

    pub(crate) fn line(&self) -> u32 {
        self.line
    }

    pub(crate) fn column(&self) -> u32 {
        self.column
    }

    pub(crate) fn rest(&self) -> &'a str {
        self.chars.as_str()
    }

    pub(crate) fn is_eof(&self) -> bool {
        self.chars.as_str().is_empty()
    }

    /// At the start of input or right after a newline.
    pub(crate) fn at_line_start(&self) -> bool {
        self.previous == '\n'
    }

    pub(crate) fn after_whitespace(&self) -> bool {
        self.previous.is_whitespace()
    }

    pub(crate) fn peek(&self) -> char {
        self.chars.clone().next().unwrap_or(EOF_CHAR)
    }

    pub(crate) fn second(&self) -> char {
        self.nth(1)
    }

    pub(crate) fn nth(&self, n: usize) -> char {
        self.chars.clone().nth(n).unwrap_or(EOF_CHAR)
    }

    pub(crate) fn matches(&self, c: char) -> bool {
        self.peek() == c && !self.is_eof()
    }

    pub(crate) fn starts_with(&self, prefix: &str) -> bool {
        self.rest().starts_with(prefix)
    }

    pub(crate) fn advance(&mut self) -> char {
        let Some(c) = self.chars.next() else { return EOF_CHAR };
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        self.previous = c;
        c
    }

    pub(crate) fn eat(&mut self, c: char) -> bool {
        let matched = self.matches(c);
        if matched {
            self.advance();
        }
        matched
    }

    /// Advances until `len` more bytes are consumed; `len` must fall on a char boundary.
    pub(crate) fn advance_bytes(&mut self, len: usize) {
        let target = self.rest().len() - len;
        while self.rest().len() > target {
            self.advance();
        }
    }

    pub(crate) fn advance_while(&mut self, f: impl Fn(char) -> bool + Copy) {
        while !self.is_eof() && f(self.peek()) {
            self.advance();
        }
    }

    /// Consumes the rest of the line, newline included.
    pub(crate) fn advance_line(&mut self) {
        self.advance_while(|c| c != '\n');
        self.eat('\n');
    }
}
