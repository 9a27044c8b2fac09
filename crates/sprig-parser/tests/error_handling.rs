//! Error handling tests for the sprig parser.
//!
//! Every stage stops at the first problem it finds:
//! - illegal bracket pairs (brace validation)
//! - missing atoms and stray keywords (segmentation)
//! - well-formed chains with no construction rule (building)
//! - nesting past the configured limit (any stage)

use sprig_lexer::{Block, Keyword, Token};
use sprig_parser::{ParseError, ParseErrorKind, Parser, ParserConfig, parse};

/// Helper to verify that parsing fails and return the error.
fn expect_error(source: &str) -> ParseError {
    let tokens = sprig_lexer::lex(source).expect("Lex failed");
    match parse(tokens) {
        Ok(ast) => panic!("Expected parse error for {source:?}, got {ast:?}"),
        Err(err) => err,
    }
}

// =============================================================================
// Brace Validation
// =============================================================================

#[test]
fn test_curly_closed_by_paren() {
    let err = expect_error("{a)");
    assert_eq!(
        err,
        ParseError::BraceMismatch {
            left: '{',
            right: ')',
            expected: "}",
        }
    );
    assert!(err.to_string().contains("cannot be closed by"));
}

#[test]
fn test_nested_mismatch_is_found() {
    let err = expect_error("f(x [y}) + 1");
    assert_eq!(err.kind(), ParseErrorKind::BraceMismatch);
}

#[test]
fn test_mismatch_inside_interpolation() {
    let tokens = vec![Token::String(vec![sprig_lexer::StringPart::Block(Block::new(
        '{',
        ')',
        vec![],
    ))])];
    assert_eq!(parse(tokens).unwrap_err().kind(), ParseErrorKind::BraceMismatch);
}

// =============================================================================
// Segmentation
// =============================================================================

#[test]
fn test_dangling_operator() {
    let err = expect_error("a +");
    assert_eq!(
        err,
        ParseError::UnexpectedToken {
            expected: "an atom",
            found: None,
            position: 2,
        }
    );
}

#[test]
fn test_doubled_comma() {
    let err = expect_error("a, , b");
    assert_eq!(err.kind(), ParseErrorKind::UnexpectedToken);
    assert!(err.to_string().contains("found `,`"), "{err}");
}

#[test]
fn test_else_without_if() {
    let err = expect_error("else x");
    assert_eq!(
        err,
        ParseError::UnknownKeyword {
            keyword: Keyword::Else,
            position: 0,
        }
    );
}

#[test]
fn test_reserved_keywords_cannot_start_expressions() {
    assert_eq!(expect_error("return x").kind(), ParseErrorKind::UnknownKeyword);
    assert_eq!(expect_error("import x").kind(), ParseErrorKind::UnknownKeyword);
}

#[test]
fn test_if_without_body() {
    let err = expect_error("if x");
    assert_eq!(err.kind(), ParseErrorKind::UnexpectedToken);
}

// =============================================================================
// Building
// =============================================================================

#[test]
fn test_mismatched_delimiters_outside_a_range() {
    let err = expect_error("(a b]");
    assert_eq!(err.kind(), ParseErrorKind::UnsupportedShape);
    assert!(err.to_string().starts_with("unsupported block"), "{err}");
}

#[test]
fn test_two_ranges_at_one_level() {
    assert_eq!(expect_error("a..b..c").kind(), ParseErrorKind::UnsupportedShape);
}

#[test]
fn test_invalid_declaration_target() {
    let err = expect_error("let 5");
    assert_eq!(err.kind(), ParseErrorKind::UnsupportedShape);
    assert!(err.to_string().contains("declaration target"), "{err}");
}

#[test]
fn test_express_needs_identifier() {
    assert_eq!(expect_error("express a + b").kind(), ParseErrorKind::UnsupportedShape);
}

// =============================================================================
// Depth Limit
// =============================================================================

#[test]
fn test_deep_nesting_is_rejected() {
    let source = format!("{}x{}", "(".repeat(40), ")".repeat(40));
    let tokens = sprig_lexer::lex(&source).unwrap();

    let parser = Parser::new(ParserConfig::default().with_max_depth(16));
    assert_eq!(
        parser.parse(tokens.clone()).unwrap_err(),
        ParseError::DepthExceeded { limit: 16 }
    );
    assert!(parse(tokens).is_ok());
}

#[test]
fn test_long_chains_hit_the_builder_limit() {
    let source = vec!["1"; 64].join(" + ");
    let tokens = sprig_lexer::lex(&source).unwrap();

    let parser = Parser::new(ParserConfig::default().with_max_depth(32));
    assert_eq!(
        parser.parse(tokens.clone()).unwrap_err().kind(),
        ParseErrorKind::DepthExceeded
    );
    assert!(parse(tokens).is_ok());
}

#[test]
fn test_errors_are_all_or_nothing() {
    // the first expression is fine; the whole parse still fails
    let err = expect_error("a + b\nc +");
    assert_eq!(err.kind(), ParseErrorKind::UnexpectedToken);
}
