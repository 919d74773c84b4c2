// tests/lexer_tests.rs

use rstest::rstest;
use uql::ast::{Token, TokenKind};
use uql::lexer::{LexError, Tokenizer};
use uql::options::ParseOptions;

fn tokenize(input: &str) -> Vec<Token> {
    Tokenizer::new(input).tokenize().unwrap()
}

fn tokenize_strict(input: &str) -> Result<Vec<Token>, LexError> {
    Tokenizer::with_options(input, ParseOptions::strict()).tokenize()
}

fn in_list_tokens() -> Vec<Token> {
    vec![
        Token::identifier("city"),
        Token::assign(),
        Token::in_operator(),
        Token::separator("["),
        Token::literal("\"São João\""),
        Token::separator(","),
        Token::literal("234"),
        Token::separator("]"),
    ]
}

// ============================================================================
// Whole queries
// ============================================================================

#[test]
fn test_hyphenated_identifier_with_assignment() {
    assert_eq!(
        tokenize("city-district := eq:"),
        vec![
            Token::identifier("city-district"),
            Token::assign(),
            Token::comparison("eq:"),
        ]
    );
}

#[rstest]
#[case::spaced("city := IN: [ \"São João\", 234 ]")]
#[case::compact("city:=IN:[\"São João\",234]")]
fn test_in_list(#[case] input: &str) {
    assert_eq!(tokenize(input), in_list_tokens());
}

#[test]
fn test_lone_assignment() {
    assert_eq!(tokenize(":="), vec![Token::assign()]);
}

#[test]
fn test_grouped_filter() {
    assert_eq!(
        tokenize("( number := gt: \"345\" )"),
        vec![
            Token::separator("("),
            Token::identifier("number"),
            Token::assign(),
            Token::comparison("gt:"),
            Token::literal("\"345\""),
            Token::separator(")"),
        ]
    );
}

#[rstest]
#[case("&&")]
#[case("||")]
fn test_chained_groups(#[case] logical: &str) {
    let query = format!(
        "( city := eq: \"São João\" ) {} ( neighborhood := not: \"Centro\" )",
        logical
    );

    assert_eq!(
        tokenize(&query),
        vec![
            Token::separator("("),
            Token::identifier("city"),
            Token::assign(),
            Token::comparison("eq:"),
            Token::literal("\"São João\""),
            Token::separator(")"),
            Token::logical(logical),
            Token::separator("("),
            Token::identifier("neighborhood"),
            Token::assign(),
            Token::comparison("not:"),
            Token::literal("\"Centro\""),
            Token::separator(")"),
        ]
    );
}

#[test]
fn test_multiline_query() {
    let query = "(\n    city eq: 1 &&\r\n    number eq: 2\n)\n";
    let kinds: Vec<TokenKind> = tokenize(query).into_iter().map(|t| t.kind).collect();

    assert_eq!(
        kinds,
        vec![
            TokenKind::Separator,
            TokenKind::Identifier,
            TokenKind::ComparisonOperator,
            TokenKind::Literal,
            TokenKind::LogicalOperator,
            TokenKind::Identifier,
            TokenKind::ComparisonOperator,
            TokenKind::Literal,
            TokenKind::Separator,
        ]
    );
}

// ============================================================================
// Operators
// ============================================================================

#[test]
fn test_comparison_operators() {
    let test_cases = vec!["eq:", "gt:", "lt:", "gte:", "lte:", "not:", "IN:"];

    for input in test_cases {
        assert_eq!(
            tokenize(input),
            vec![Token::comparison(input)],
            "Failed for input: {}",
            input
        );
    }
}

#[test]
fn test_operator_prefix_is_not_an_operator() {
    // keys that merely start like an operator stay keys
    assert_eq!(
        tokenize("equal eq: 1"),
        vec![
            Token::identifier("equal"),
            Token::comparison("eq:"),
            Token::literal("1"),
        ]
    );
    assert_eq!(tokenize("INDEX")[0], Token::identifier("INDEX"));
    assert_eq!(tokenize("notes")[0], Token::identifier("notes"));
}

#[test]
fn test_operators_without_spaces() {
    assert_eq!(
        tokenize("age gte:18&&age lte:65"),
        vec![
            Token::identifier("age"),
            Token::comparison("gte:"),
            Token::literal("18"),
            Token::logical("&&"),
            Token::identifier("age"),
            Token::comparison("lte:"),
            Token::literal("65"),
        ]
    );
}

#[test]
fn test_single_logical_chars_are_skipped() {
    assert_eq!(
        tokenize("a & b | c"),
        vec![
            Token::identifier("a"),
            Token::identifier("b"),
            Token::identifier("c"),
        ]
    );
}

// ============================================================================
// Identifiers and literals
// ============================================================================

#[test]
fn test_identifier_characters() {
    let test_cases = vec!["city", "city-district", "address.zip_code", "_private", "a1"];

    for input in test_cases {
        assert_eq!(tokenize(input), vec![Token::identifier(input)]);
    }
}

#[test]
fn test_identifier_cannot_start_with_digit() {
    assert_eq!(
        tokenize("123abc"),
        vec![Token::literal("123"), Token::identifier("abc")]
    );
}

#[test]
fn test_numeric_literals() {
    assert_eq!(
        tokenize("12 345 6"),
        vec![Token::literal("12"), Token::literal("345"), Token::literal("6")]
    );
}

#[test]
fn test_quoted_literal_keeps_quotes_and_unicode() {
    assert_eq!(tokenize("\"São João\""), vec![Token::literal("\"São João\"")]);
    assert_eq!(tokenize("\"\""), vec![Token::literal("\"\"")]);
    assert_eq!(
        tokenize("\"a && b (c)\""),
        vec![Token::literal("\"a && b (c)\"")]
    );
}

#[test]
fn test_separators() {
    let test_cases = vec!["(", ")", "[", "]", ","];

    for input in test_cases {
        assert_eq!(tokenize(input), vec![Token::separator(input)]);
    }
}

// ============================================================================
// Errors and leniency
// ============================================================================

#[rstest]
#[case::colon("( city := :eq: \"são joão\" )", ':', 11)]
#[case::at_sign("( city := @ eq: \"são joão\" )", '@', 11)]
#[case::inside_key("a@b", '@', 2)]
#[case::dangling_colon("freq: 1", ':', 5)]
fn test_invalid_characters(#[case] input: &str, #[case] ch: char, #[case] column: usize) {
    assert_eq!(
        Tokenizer::new(input).tokenize(),
        Err(LexError::InvalidCharacter { ch, column })
    );
}

#[test]
fn test_invalid_character_message() {
    let err = Tokenizer::new("a@b").tokenize().unwrap_err();
    assert_eq!(err.to_string(), "Invalid character '@' at column 2");
}

#[test]
fn test_unknown_characters_skipped_when_lenient() {
    assert_eq!(
        tokenize("city # eq: 1"),
        vec![
            Token::identifier("city"),
            Token::comparison("eq:"),
            Token::literal("1"),
        ]
    );
    // non-ASCII outside quotes is not a key char
    assert_eq!(
        tokenize("São"),
        vec![Token::identifier("S"), Token::identifier("o")]
    );
}

#[test]
fn test_unknown_characters_rejected_when_strict() {
    assert_eq!(
        tokenize_strict("city # eq: 1"),
        Err(LexError::InvalidCharacter { ch: '#', column: 6 })
    );
    assert_eq!(
        tokenize_strict("São"),
        Err(LexError::InvalidCharacter { ch: 'ã', column: 2 })
    );
}

#[test]
fn test_unterminated_literal() {
    assert_eq!(
        tokenize("city eq: \"abc"),
        vec![Token::identifier("city"), Token::comparison("eq:")]
    );
    assert_eq!(
        tokenize_strict("city eq: \"abc"),
        Err(LexError::UnterminatedLiteral { column: 10 })
    );
}

#[test]
fn test_strict_accepts_well_formed_input() {
    assert_eq!(
        tokenize_strict("city := IN: [ \"São João\", 234 ]"),
        Ok(in_list_tokens())
    );
}
