use thiserror::Error;

/// Why a character sequence was rejected by the scanner.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LexError {
    #[error("unexpected character: {0:?}")]
    UnexpectedChar(char),
    #[error("bad multi-char operator: {0}")]
    BadMcharOperator(String),
    #[error("bad numeral suffix: {0:?}")]
    BadConstantSuffix(char),
    #[error("numeral out of range: {0}")]
    BadConstant(String),
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("character literal must hold exactly one character")]
    BadCharLiteral,
}
