use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn kinds(source: &str) -> Vec<TokenKind> {
    lex(source).tokens.into_iter().map(|t| t.kind).collect()
}

const KEYWORDS: [&str; 19] = [
    "array", "boolean", "break", "char", "continue", "do", "else", "false", "function", "if",
    "integer", "of", "return", "string", "struct", "true", "type", "var", "while",
];

// Kept in its own module so the `test_case`-generated `use super::*` does not
// glob-import `pretty_assertions::assert_eq` and clash with the prelude macro.
mod classify_cases {
    use super::{classify, TokenKind};
    use test_case::test_case;

    #[test_case("char" => TokenKind::Char; "char keyword")]
    #[test_case("if" => TokenKind::If; "if keyword")]
    #[test_case("string" => TokenKind::KwString; "string keyword")]
    #[test_case("return" => TokenKind::Return; "return keyword")]
    #[test_case("+" => TokenKind::Plus; "plus")]
    #[test_case(">=" => TokenKind::IsGreaterThanOrEqual; "greater or equal")]
    #[test_case("'Z'" => TokenKind::Character; "letter char literal")]
    #[test_case("'9'" => TokenKind::Character; "digit char literal")]
    #[test_case("'$'" => TokenKind::Character; "symbol char literal")]
    #[test_case("\"Teste\"" => TokenKind::StringVal; "string literal")]
    #[test_case("42" => TokenKind::Numeral; "numeral")]
    #[test_case("a1" => TokenKind::Identifier; "identifier")]
    #[test_case("1_var" => TokenKind::Unrecognized; "digit-led name")]
    #[test_case("&" => TokenKind::Unrecognized; "lone ampersand")]
    fn test_classify(spelling: &str) -> TokenKind {
        classify(spelling)
    }
}

#[test]
fn test_basic_declaration() {
    let expected = vec![
        TokenKind::Var,
        TokenKind::Identifier,
        TokenKind::Colon,
        TokenKind::Integer,
        TokenKind::Semicolon,
        TokenKind::End,
    ];
    assert_eq!(expected, kinds("var x: integer;"));
}

#[test]
fn test_longest_match_operators() {
    let expected = vec![
        TokenKind::Assign,
        TokenKind::IsEqual,
        TokenKind::IsLessThan,
        TokenKind::IsLessThanOrEqual,
        TokenKind::LogicalAnd,
        TokenKind::LogicalOr,
        TokenKind::Increment,
        TokenKind::Plus,
        TokenKind::Decrement,
        TokenKind::IsNotEqual,
        TokenKind::LogicalNot,
        TokenKind::End,
    ];
    assert_eq!(expected, kinds("= == < <= && || +++ -- != !"));
}

#[test]
fn test_lone_bar_is_unrecognized() {
    let stream = lex("a | b");
    let bad = stream.tokens[1];
    assert_eq!(TokenKind::Unrecognized, bad.kind);
    assert_eq!(
        Some(&LexError::BadMcharOperator("|".into())),
        stream.rejection(&bad)
    );
}

#[test]
fn test_bad_atsign() {
    let stream = lex("x = 0@1;");
    let bad = stream.tokens[3];
    assert_eq!(Some(&LexError::UnexpectedChar('@')), stream.rejection(&bad));
    assert_eq!(Position::new(1, 6), bad.pos);
}

#[test]
fn test_bad_constant_suffix() {
    let stream = lex("x = 1foo;");
    let bad = stream.tokens[2];
    assert_eq!(Some(&LexError::BadConstantSuffix('f')), stream.rejection(&bad));
    assert_eq!(TokenKind::Semicolon, stream.tokens[3].kind);
}

#[test]
fn test_numeral_overflow() {
    let stream = lex("99999999999999999999");
    let bad = stream.tokens[0];
    assert_eq!(
        Some(&LexError::BadConstant("99999999999999999999".into())),
        stream.rejection(&bad)
    );
}

#[test]
fn test_literals_are_pooled_in_order() {
    let stream = lex("7 'c' \"hello world\" 12 'd'");
    let aux: Vec<usize> = stream.tokens.iter().map(|t| t.aux).collect();
    assert_eq!(vec![0, 0, 0, 1, 1, 0], aux);
    assert_eq!(Some(7), stream.pools.int_at(0));
    assert_eq!(Some(12), stream.pools.int_at(1));
    assert_eq!(Some('c'), stream.pools.char_at(0));
    assert_eq!(Some('d'), stream.pools.char_at(1));
    assert_eq!(Some("hello world"), stream.pools.string_at(0));
}

#[test]
fn test_string_keeps_body_verbatim() {
    let stream = lex(r#""a\n 'b' ""#);
    assert_eq!(Some(r"a\n 'b' "), stream.pools.string_at(0));
}

#[test]
fn test_unterminated_string() {
    let stream = lex("\"never closed");
    assert_eq!(
        Some(&LexError::UnterminatedString),
        stream.rejection(&stream.tokens[0])
    );
    assert_eq!(TokenKind::End, stream.tokens[1].kind);
}

#[test]
fn test_bad_char_literals() {
    for source in ["'ab'", "''", "'x"] {
        let stream = lex(source);
        assert_eq!(
            Some(&LexError::BadCharLiteral),
            stream.rejection(&stream.tokens[0]),
            "{source}"
        );
    }
}

#[test]
fn test_interning_is_shared_across_blocks() {
    let stream = lex("x { y { x } } y");
    let ids: Vec<usize> = stream
        .tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Identifier)
        .map(|t| t.aux)
        .collect();
    assert_eq!(vec![0, 1, 0, 1], ids);
    assert_eq!("x", stream.names.resolve(0));
    assert_eq!("y", stream.names.resolve(1));
}

#[test]
fn test_end_is_sticky() {
    let mut scanner = Scanner::new("  x ");
    assert_eq!(TokenKind::Identifier, scanner.next_token().kind);
    for _ in 0..3 {
        assert_eq!(TokenKind::End, scanner.next_token().kind);
    }
}

#[test]
fn test_positions_track_lines() {
    let stream = lex("var\n  x;");
    let positions: Vec<Position> = stream.tokens.iter().map(|t| t.pos).collect();
    assert_eq!(
        vec![
            Position::new(1, 1),
            Position::new(2, 3),
            Position::new(2, 4),
            Position::new(2, 5),
        ],
        positions
    );
}

#[test]
fn test_keywords_never_classify_as_identifiers() {
    for keyword in KEYWORDS {
        let kind = classify(keyword);
        assert!(kind.is_keyword(), "{keyword} classified as {kind:?}");
        assert_eq!(vec![kind, TokenKind::End], kinds(keyword));
    }
}

proptest! {
    #[test]
    fn test_identifiers_classify_and_intern(s in "[a-zA-Z][a-zA-Z0-9_]{0,12}") {
        prop_assume!(!KEYWORDS.contains(&s.as_str()));
        prop_assert_eq!(TokenKind::Identifier, classify(&s));

        let stream = lex(&format!("{s} {s}"));
        prop_assert_eq!(TokenKind::Identifier, stream.tokens[0].kind);
        prop_assert_eq!(stream.tokens[0].aux, stream.tokens[1].aux);
        prop_assert_eq!(1, stream.names.len());
    }

    #[test]
    fn test_scanner_agrees_with_classify(s in "[a-zA-Z0-9][a-zA-Z0-9_]{0,9}") {
        prop_assert_eq!(vec![classify(&s), TokenKind::End], kinds(&s));
    }

    #[test]
    fn test_intern_is_idempotent(s in "[a-z]{1,8}") {
        let mut interner = Interner::new();
        let first = interner.intern(&s);
        prop_assert_eq!(first, interner.intern(&s));
        prop_assert_eq!(Some(first), interner.get(&s));
    }

    #[test]
    fn test_numerals_round_trip(n in 0i64..i64::MAX) {
        let stream = lex(&n.to_string());
        prop_assert_eq!(TokenKind::Numeral, stream.tokens[0].kind);
        prop_assert_eq!(Some(n), stream.pools.int_at(stream.tokens[0].aux));
    }
}
