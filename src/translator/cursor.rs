use super::{InnerTranslateError, Result, SyntaxError, TranslateError};
use crate::lexer::{Position, Token, TokenKind, TokenStream};

/// One-token lookahead over a scanned [TokenStream].
///
/// Never moves past the `End` token.
#[derive(Debug)]
pub struct Cursor<'a> {
    stream: &'a TokenStream,
    position: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(stream: &'a TokenStream) -> Self {
        Self {
            stream,
            position: 0,
        }
    }

    pub fn peek(&self) -> Token {
        self.stream
            .tokens
            .get(self.position)
            .or_else(|| self.stream.tokens.last())
            .copied()
            .unwrap_or_else(|| Token::bare(TokenKind::End, Position::default()))
    }

    pub fn kind(&self) -> TokenKind {
        self.peek().kind
    }

    pub fn pos(&self) -> Position {
        self.peek().pos
    }

    pub fn bump(&mut self) -> Token {
        let token = self.peek();
        if token.kind != TokenKind::End {
            self.position += 1;
        }
        token
    }

    pub fn bump_if(&mut self, kind: TokenKind) -> bool {
        let condition = self.kind() == kind;
        if condition {
            self.bump();
        }
        condition
    }

    pub fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        let next = self.peek();
        if next.kind == kind {
            self.bump();
            return Ok(next);
        }
        Err(self.rejected(next).unwrap_or_else(|| {
            SyntaxError::ExpectedButGot {
                expected: kind,
                got: next.kind,
            }
            .into_error(next.pos)
        }))
    }

    /// Error for a current token that no production accepts.
    pub fn unexpected(&self) -> TranslateError {
        let next = self.peek();
        self.rejected(next)
            .unwrap_or_else(|| SyntaxError::UnexpectedToken(next.kind).into_error(next.pos))
    }

    fn rejected(&self, token: Token) -> Option<TranslateError> {
        self.stream
            .rejection(&token)
            .map(|err| InnerTranslateError::Lexical(err.clone()).at(token.pos))
    }
}

impl SyntaxError {
    fn into_error(self, pos: Position) -> TranslateError {
        InnerTranslateError::Syntax(self).at(pos)
    }
}
