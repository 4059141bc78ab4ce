mod cursor;
mod lexer_error;
mod pool;
mod token;

#[cfg(test)]
mod lexer_tests;

use cursor::Cursor;
use token::{continues_identifier, starts_identifier};
use tracing::trace;

pub use lexer_error::LexError;
pub use pool::{Interner, LiteralPools, Name};
pub use token::{classify, Position, Token, TokenKind};

/// Everything the scanner produced for one source unit.
///
/// The token sequence always ends with exactly one [End](TokenKind::End) token.
#[derive(Debug, Clone, Default)]
pub struct TokenStream {
    pub tokens: Vec<Token>,
    pub pools: LiteralPools,
    pub names: Interner,
    pub rejected: Vec<LexError>,
}

impl TokenStream {
    /// Reason an [Unrecognized](TokenKind::Unrecognized) token was produced.
    pub fn rejection(&self, token: &Token) -> Option<&LexError> {
        (token.kind == TokenKind::Unrecognized)
            .then(|| self.rejected.get(token.aux))
            .flatten()
    }
}

/// Single-cursor scanner producing one token per call.
pub struct Scanner<'a> {
    cursor: Cursor<'a>,
    pools: LiteralPools,
    names: Interner,
    rejected: Vec<LexError>,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
            pools: LiteralPools::new(),
            names: Interner::new(),
            rejected: Vec::new(),
        }
    }

    /// Scans the next token. Once the input is exhausted every call returns `End`.
    pub fn next_token(&mut self) -> Token {
        self.cursor.skip_whitespaces();
        let pos = self.cursor.position();
        let Some(c) = self.cursor.peek() else {
            return Token::bare(TokenKind::End, pos);
        };

        let token = match c {
            c if starts_identifier(c) => self.lex_identifier(pos),
            c if c.is_ascii_digit() => self.lex_numeral(pos),
            '"' => self.lex_string(pos),
            '\'' => self.lex_char(pos),
            _ => self.lex_punctuation(pos),
        };
        trace!(kind = ?token.kind, aux = token.aux, %pos, "scanned token");
        token
    }

    pub fn into_stream(self, tokens: Vec<Token>) -> TokenStream {
        TokenStream {
            tokens,
            pools: self.pools,
            names: self.names,
            rejected: self.rejected,
        }
    }

    fn reject(&mut self, err: LexError, pos: Position) -> Token {
        self.rejected.push(err);
        Token::new(TokenKind::Unrecognized, self.rejected.len() - 1, pos)
    }

    fn lex_identifier(&mut self, pos: Position) -> Token {
        let spelling = self.cursor.take_while(continues_identifier);
        if let Some(keyword) = TokenKind::keyword(spelling) {
            return Token::bare(keyword, pos);
        }
        let name = self.names.intern(spelling);
        Token::new(TokenKind::Identifier, name, pos)
    }

    fn lex_numeral(&mut self, pos: Position) -> Token {
        let digits = self.cursor.take_while(|c| c.is_ascii_digit());

        if let Some(c) = self.cursor.peek().filter(|&c| continues_identifier(c)) {
            self.cursor.take_while(continues_identifier);
            return self.reject(LexError::BadConstantSuffix(c), pos);
        }

        match digits.parse::<i64>() {
            Ok(value) => {
                let index = self.pools.add_int(value);
                Token::new(TokenKind::Numeral, index, pos)
            }
            Err(_) => self.reject(LexError::BadConstant(digits.to_owned()), pos),
        }
    }

    fn lex_string(&mut self, pos: Position) -> Token {
        self.cursor.take();
        let body = self.cursor.take_while(|c| c != '"');
        if !self.cursor.skip_if(|c| c == '"') {
            return self.reject(LexError::UnterminatedString, pos);
        }
        let index = self.pools.add_string(body);
        Token::new(TokenKind::StringVal, index, pos)
    }

    fn lex_char(&mut self, pos: Position) -> Token {
        self.cursor.take();
        let body = self.cursor.take();
        let closed = self.cursor.skip_if(|c| c == '\'');
        match body {
            Some(c) if c != '\'' && closed => {
                let index = self.pools.add_char(c);
                Token::new(TokenKind::Character, index, pos)
            }
            _ => self.reject(LexError::BadCharLiteral, pos),
        }
    }

    fn lex_punctuation(&mut self, pos: Position) -> Token {
        let Some(first) = self.cursor.take() else {
            return Token::bare(TokenKind::End, pos);
        };

        // longest match first
        if let Some(second) = self.cursor.peek() {
            let pair: String = [first, second].iter().collect();
            if let Some(kind) = TokenKind::punctuation(&pair) {
                self.cursor.take();
                return Token::bare(kind, pos);
            }
        }

        let single = first.to_string();
        match TokenKind::punctuation(&single) {
            Some(kind) => Token::bare(kind, pos),
            None if matches!(first, '&' | '|') => {
                self.reject(LexError::BadMcharOperator(single), pos)
            }
            None => self.reject(LexError::UnexpectedChar(first), pos),
        }
    }
}

/// Scans the whole source, stopping after the first `End` token.
///
/// Malformed input does not abort the scan: it yields
/// [Unrecognized](TokenKind::Unrecognized) tokens that the translator reports when
/// it reaches them.
pub fn lex(source: &str) -> TokenStream {
    let mut scanner = Scanner::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = scanner.next_token();
        tokens.push(token);
        if token.kind == TokenKind::End {
            break;
        }
    }
    scanner.into_stream(tokens)
}
