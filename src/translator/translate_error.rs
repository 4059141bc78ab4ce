use crate::lexer::{LexError, Position, TokenKind};
use crate::semantic_analysis::{ScopeError, TypeError};
use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TranslateError>;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("expected token {expected:?}, but got {got:?}")]
    ExpectedButGot { expected: TokenKind, got: TokenKind },
    #[error("unexpected token {0:?}")]
    UnexpectedToken(TokenKind),
    #[error("break statement outside of a loop")]
    BreakOutsideLoop,
    #[error("continue statement outside of a loop")]
    ContinueOutsideLoop,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InnerTranslateError {
    #[error(transparent)]
    Lexical(#[from] LexError),
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Scope(#[from] ScopeError),
    #[error(transparent)]
    Type(#[from] TypeError),
}

impl InnerTranslateError {
    pub fn at(self, pos: Position) -> TranslateError {
        TranslateError { inner: self, pos }
    }
}

/// First error of a compile, with the position of the token it was raised at.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{inner}")]
pub struct TranslateError {
    pub inner: InnerTranslateError,
    pub pos: Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Lexical,
    Syntax,
    Redeclaration,
    NotDeclared,
    Type,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lexical => write!(f, "lexical"),
            Self::Syntax => write!(f, "syntax"),
            Self::Redeclaration => write!(f, "redeclaration"),
            Self::NotDeclared => write!(f, "not declared"),
            Self::Type => write!(f, "type"),
        }
    }
}

impl TranslateError {
    pub fn kind(&self) -> ErrorKind {
        match &self.inner {
            InnerTranslateError::Lexical(_) => ErrorKind::Lexical,
            InnerTranslateError::Syntax(_) => ErrorKind::Syntax,
            InnerTranslateError::Scope(ScopeError::Redeclaration(_)) => ErrorKind::Redeclaration,
            InnerTranslateError::Scope(
                ScopeError::NotDeclared(_) | ScopeError::UnknownField { .. },
            ) => ErrorKind::NotDeclared,
            InnerTranslateError::Type(_) => ErrorKind::Type,
        }
    }

    pub fn pos(&self) -> Position {
        self.pos
    }
}

/// Positions a stage error, for use with `map_err`.
pub(super) fn located<E>(pos: Position) -> impl FnOnce(E) -> TranslateError
where
    E: Into<InnerTranslateError>,
{
    move |err| err.into().at(pos)
}
