use std::fmt;

/// Line/column of the first character of a token, both 1-based.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Classified lexical unit.
///
/// The auxiliary index of a [Token] is meaningful only for the literal classes,
/// [Identifier](TokenKind::Identifier) and [Unrecognized](TokenKind::Unrecognized).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// array keyword
    Array,
    /// boolean keyword
    Boolean,
    /// break keyword
    Break,
    /// char keyword
    Char,
    /// continue keyword
    Continue,
    /// do keyword
    Do,
    /// else keyword
    Else,
    /// false keyword
    False,
    /// function keyword
    Function,
    /// if keyword
    If,
    /// integer keyword
    Integer,
    /// of keyword
    Of,
    /// return keyword
    Return,
    /// "string" keyword
    KwString,
    /// struct keyword
    Struct,
    /// true keyword
    True,
    /// type keyword
    Type,
    /// var keyword
    Var,
    /// while keyword
    While,
    /// :
    Colon,
    /// ;
    Semicolon,
    /// ,
    Comma,
    /// =
    Assign,
    /// [
    OpenSquare,
    /// ]
    CloseSquare,
    /// {
    OpenCurly,
    /// }
    CloseCurly,
    /// (
    OpenParanth,
    /// )
    CloseParanth,
    /// &&
    LogicalAnd,
    /// ||
    LogicalOr,
    /// <
    IsLessThan,
    /// >
    IsGreaterThan,
    /// <=
    IsLessThanOrEqual,
    /// >=
    IsGreaterThanOrEqual,
    /// !=
    IsNotEqual,
    /// ==
    IsEqual,
    /// +
    Plus,
    /// ++
    Increment,
    /// -
    Hyphen,
    /// --
    Decrement,
    /// *
    Asterisk,
    /// /
    FSlash,
    /// .
    Dot,
    /// !
    LogicalNot,
    /// character literal, aux indexes the character pool
    Character,
    /// integer literal, aux indexes the integer pool
    Numeral,
    /// string literal, aux indexes the string pool
    StringVal,
    /// any non-keyword name, aux is the interned id
    Identifier,
    /// end of input, sticky
    End,
    /// malformed input, aux indexes the rejected lexemes of the stream
    Unrecognized,
}

impl TokenKind {
    pub fn keyword(s: &str) -> Option<Self> {
        let kind = match s {
            "array" => Self::Array,
            "boolean" => Self::Boolean,
            "break" => Self::Break,
            "char" => Self::Char,
            "continue" => Self::Continue,
            "do" => Self::Do,
            "else" => Self::Else,
            "false" => Self::False,
            "function" => Self::Function,
            "if" => Self::If,
            "integer" => Self::Integer,
            "of" => Self::Of,
            "return" => Self::Return,
            "string" => Self::KwString,
            "struct" => Self::Struct,
            "true" => Self::True,
            "type" => Self::Type,
            "var" => Self::Var,
            "while" => Self::While,
            _ => return None,
        };
        Some(kind)
    }

    pub fn punctuation(s: &str) -> Option<Self> {
        let kind = match s {
            ":" => Self::Colon,
            ";" => Self::Semicolon,
            "," => Self::Comma,
            "=" => Self::Assign,
            "[" => Self::OpenSquare,
            "]" => Self::CloseSquare,
            "{" => Self::OpenCurly,
            "}" => Self::CloseCurly,
            "(" => Self::OpenParanth,
            ")" => Self::CloseParanth,
            "&&" => Self::LogicalAnd,
            "||" => Self::LogicalOr,
            "<" => Self::IsLessThan,
            ">" => Self::IsGreaterThan,
            "<=" => Self::IsLessThanOrEqual,
            ">=" => Self::IsGreaterThanOrEqual,
            "!=" => Self::IsNotEqual,
            "==" => Self::IsEqual,
            "+" => Self::Plus,
            "++" => Self::Increment,
            "-" => Self::Hyphen,
            "--" => Self::Decrement,
            "*" => Self::Asterisk,
            "/" => Self::FSlash,
            "." => Self::Dot,
            "!" => Self::LogicalNot,
            _ => return None,
        };
        Some(kind)
    }

    pub fn is_keyword(self) -> bool {
        (self as u8) <= (Self::While as u8)
    }

    pub fn is_relational(self) -> bool {
        matches!(
            self,
            Self::IsLessThan
                | Self::IsGreaterThan
                | Self::IsLessThanOrEqual
                | Self::IsGreaterThanOrEqual
                | Self::IsEqual
                | Self::IsNotEqual
        )
    }

    /// Tokens that may start a declaration at program level.
    pub fn starts_declaration(self) -> bool {
        matches!(self, Self::Function | Self::Type | Self::Var)
    }
}

pub(super) fn starts_identifier(c: char) -> bool {
    c.is_ascii_alphabetic()
}

pub(super) fn continues_identifier(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next().is_some_and(starts_identifier) && chars.all(continues_identifier)
}

fn is_char_literal(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(
        (chars.next(), chars.next(), chars.next(), chars.next()),
        (Some('\''), Some(_), Some('\''), None)
    )
}

fn is_string_literal(s: &str) -> bool {
    s.len() >= 2 && s.starts_with('"') && s.ends_with('"') && !s[1..s.len() - 1].contains('"')
}

/// Classifies a complete spelling the way the scanner would classify it as one token.
///
/// Keywords and punctuation come from the fixed tables; anything else is matched
/// against the literal classes and finally the identifier shape. A spelling fitting
/// none of them is [Unrecognized](TokenKind::Unrecognized).
pub fn classify(spelling: &str) -> TokenKind {
    if let Some(kind) = TokenKind::keyword(spelling).or_else(|| TokenKind::punctuation(spelling)) {
        return kind;
    }

    if is_char_literal(spelling) {
        TokenKind::Character
    } else if is_string_literal(spelling) {
        TokenKind::StringVal
    } else if !spelling.is_empty() && spelling.chars().all(|c| c.is_ascii_digit()) {
        TokenKind::Numeral
    } else if is_identifier(spelling) {
        TokenKind::Identifier
    } else {
        TokenKind::Unrecognized
    }
}

/// Token kind plus auxiliary index, with the position it was scanned at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub aux: usize,
    pub pos: Position,
}

impl Token {
    pub fn new(kind: TokenKind, aux: usize, pos: Position) -> Self {
        Self { kind, aux, pos }
    }

    pub fn bare(kind: TokenKind, pos: Position) -> Self {
        Self::new(kind, 0, pos)
    }
}
