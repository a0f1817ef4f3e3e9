// tests/lexer_tests.rs

use rstest::rstest;
use scim_filter::ast::{Position, Token};
use scim_filter::dialect::{FilterDialect, PatchDialect};
use scim_filter::lexer::{LexError, Lexer, tokenize};

fn tokens(input: &str) -> Vec<Token> {
    tokenize(input, &FilterDialect)
        .unwrap()
        .into_iter()
        .map(|t| t.token)
        .collect()
}

fn ident(name: &str) -> Token {
    Token::Identifier(name.to_string())
}

// ============================================================================
// Punctuation
// ============================================================================

#[test]
fn test_grouping_tokens() {
    assert_eq!(
        tokens("( ) [ ]"),
        vec![
            Token::LParen,
            Token::RParen,
            Token::LBracket,
            Token::RBracket,
            Token::Eof
        ]
    );
}

#[test]
fn test_dot_is_patch_only() {
    let err = tokenize("a[b pr].c", &FilterDialect).unwrap_err();
    assert_eq!(
        err,
        LexError::UnexpectedCharacter {
            ch: '.',
            position: Position::new(1, 8),
        }
    );

    let patch: Vec<Token> = tokenize("a[b pr].c", &PatchDialect)
        .unwrap()
        .into_iter()
        .map(|t| t.token)
        .collect();
    assert_eq!(
        patch,
        vec![
            ident("a"),
            Token::LBracket,
            ident("b"),
            Token::Pr,
            Token::RBracket,
            Token::Dot,
            ident("c"),
            Token::Eof
        ]
    );
}

// ============================================================================
// Keywords
// ============================================================================

#[rstest]
#[case("eq", Token::Eq)]
#[case("EQ", Token::Eq)]
#[case("Eq", Token::Eq)]
#[case("ne", Token::Ne)]
#[case("GT", Token::Gt)]
#[case("ge", Token::Ge)]
#[case("lt", Token::Lt)]
#[case("Le", Token::Le)]
#[case("co", Token::Co)]
#[case("SW", Token::Sw)]
#[case("ew", Token::Ew)]
#[case("pr", Token::Pr)]
#[case("AND", Token::And)]
#[case("And", Token::And)]
#[case("oR", Token::Or)]
#[case("NOT", Token::Not)]
#[case("True", Token::Boolean(true))]
#[case("FALSE", Token::Boolean(false))]
#[case("NULL", Token::Null)]
fn test_keywords_ignore_case(#[case] input: &str, #[case] expected: Token) {
    assert_eq!(tokens(input), vec![expected, Token::Eof]);
}

#[test]
fn test_identifiers_keep_case() {
    assert_eq!(tokens("userName"), vec![ident("userName"), Token::Eof]);
    assert_eq!(tokens("USERNAME"), vec![ident("USERNAME"), Token::Eof]);
}

#[test]
fn test_keyword_prefix_is_identifier() {
    assert_eq!(tokens("order"), vec![ident("order"), Token::Eof]);
    assert_eq!(tokens("prefix"), vec![ident("prefix"), Token::Eof]);
    assert_eq!(tokens("nullable"), vec![ident("nullable"), Token::Eof]);
}

// ============================================================================
// Identifiers
// ============================================================================

#[rstest]
#[case("name.familyName")]
#[case("urn:ietf:params:scim:schemas:core:2.0:User:userName")]
#[case("urn:ietf:params:scim:schemas:extension:enterprise:2.0:User:manager.value")]
#[case("x-custom_attr/sub")]
#[case("_internal")]
fn test_permissive_identifiers(#[case] input: &str) {
    assert_eq!(tokens(input), vec![ident(input), Token::Eof]);
}

// ============================================================================
// Literals
// ============================================================================

#[test]
fn test_numbers() {
    assert_eq!(tokens("0 42 1234567"), vec![
        Token::Integer(0),
        Token::Integer(42),
        Token::Integer(1234567),
        Token::Eof
    ]);
}

#[test]
fn test_number_out_of_range() {
    let err = tokenize("a eq 99999999999999999999", &FilterDialect).unwrap_err();
    assert!(matches!(err, LexError::NumberOutOfRange { ref literal, .. } if literal == "99999999999999999999"));
    assert_eq!(err.position(), Position::new(1, 6));
}

#[test]
fn test_strings() {
    assert_eq!(
        tokens(r#""bjensen" "with space" "@example.com" "" "#),
        vec![
            Token::String("bjensen".to_string()),
            Token::String("with space".to_string()),
            Token::String("@example.com".to_string()),
            Token::String(String::new()),
            Token::Eof
        ]
    );
}

#[test]
fn test_string_escapes() {
    assert_eq!(
        tokens(r#""say \"hi\"""#),
        vec![Token::String(r#"say "hi""#.to_string()), Token::Eof]
    );
    assert_eq!(
        tokens(r#""C:\\dir""#),
        vec![Token::String(r"C:\dir".to_string()), Token::Eof]
    );
    // other backslashes are kept as written
    assert_eq!(
        tokens(r#""a\nb""#),
        vec![Token::String(r"a\nb".to_string()), Token::Eof]
    );
}

#[test]
fn test_string_keeps_keywords_verbatim() {
    assert_eq!(
        tokens(r#""AND or EQ""#),
        vec![Token::String("AND or EQ".to_string()), Token::Eof]
    );
}

#[test]
fn test_unterminated_string() {
    let err = tokenize(r#"ham eq "spam"#, &FilterDialect).unwrap_err();
    assert_eq!(
        err,
        LexError::UnterminatedString {
            position: Position::new(1, 8)
        }
    );

    let err = tokenize(r#"ham eq "spam\""#, &FilterDialect).unwrap_err();
    assert!(matches!(err, LexError::UnterminatedString { .. }));
}

// ============================================================================
// Positions and errors
// ============================================================================

#[test]
fn test_positions() {
    let spanned = tokenize("title pr and\n  userType eq \"E\"", &FilterDialect).unwrap();
    let positions: Vec<Position> = spanned.iter().map(|t| t.position).collect();
    assert_eq!(
        positions,
        vec![
            Position::new(1, 1),
            Position::new(1, 7),
            Position::new(1, 10),
            Position::new(2, 3),
            Position::new(2, 12),
            Position::new(2, 15),
            Position::new(2, 18),
        ]
    );
}

#[test]
fn test_unexpected_character() {
    let err = tokenize("ham == \"spam\"", &FilterDialect).unwrap_err();
    assert_eq!(
        err,
        LexError::UnexpectedCharacter {
            ch: '=',
            position: Position::new(1, 5),
        }
    );
    assert_eq!(err.to_string(), "unexpected character '=' at 1:5");
}

#[test]
fn test_scanning_stops_after_error() {
    let mut lexer = Lexer::new("a ! b");
    assert_eq!(lexer.next_token().unwrap().token, ident("a"));
    let first = lexer.next_token().unwrap_err();
    let second = lexer.next_token().unwrap_err();
    assert_eq!(first, second);
}

#[test]
fn test_eof_is_sticky() {
    let mut lexer = Lexer::new("  ");
    assert_eq!(lexer.next_token().unwrap().token, Token::Eof);
    assert_eq!(lexer.next_token().unwrap().token, Token::Eof);
}
