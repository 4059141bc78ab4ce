use super::token::Position;
use std::str::Chars;

#[derive(Clone)]
pub struct Cursor<'a> {
    chars: Chars<'a>,
    line: u32,
    column: u32,
}

impl<'a> Cursor<'a> {
    pub fn new(s: &'a str) -> Self {
        let chars = s.chars();
        Self {
            chars,
            line: 1,
            column: 1,
        }
    }

    pub fn peek(&self) -> Option<char> {
        self.chars.clone().next()
    }

    #[inline]
    pub fn skip_if(&mut self, p: impl FnOnce(char) -> bool) -> bool {
        let skipped = self.peek().filter(|&c| p(c)).is_some();
        if skipped {
            self.take();
        }
        skipped
    }

    pub fn skip_whitespaces(&mut self) {
        while self.skip_if(char::is_whitespace) {}
    }

    /// Consumes characters while `p` holds and returns them as one lexeme.
    pub fn take_while(&mut self, mut p: impl FnMut(char) -> bool) -> &'a str {
        let rest = self.chars.as_str();
        let mut len = 0;
        while let Some(c) = self.peek().filter(|&c| p(c)) {
            len += c.len_utf8();
            self.take();
        }
        &rest[..len]
    }

    pub fn take(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }
}
