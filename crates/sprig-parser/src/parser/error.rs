//! Parse error types.
//!
//! Parsing is all-or-nothing: the first structural error aborts the whole
//! parse and no partial tree is returned. Each error carries the smallest
//! token span needed to locate the problem.

use sprig_lexer::{DisplayTokens, Keyword, Token};
use thiserror::Error;

/// Parse failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("'{left}' cannot be closed by '{right}' (legal closers: {expected:?})")]
    BraceMismatch {
        left: char,
        right: char,
        /// Closers registered for `left`, empty when `left` is not an opener.
        expected: &'static str,
    },

    #[error("expected {expected}, found {} at token {position}", found_text(.found.as_ref()))]
    UnexpectedToken {
        expected: &'static str,
        found: Option<Token>,
        /// Index into the token sequence being segmented.
        position: usize,
    },

    #[error("unsupported {context}: `{}`", DisplayTokens(.tokens))]
    UnsupportedShape {
        context: &'static str,
        tokens: Vec<Token>,
    },

    #[error("keyword `{keyword}` cannot start an expression (token {position})")]
    UnknownKeyword { keyword: Keyword, position: usize },

    #[error("nesting deeper than {limit} levels")]
    DepthExceeded { limit: usize },
}

fn found_text(found: Option<&Token>) -> String {
    match found {
        Some(token) => format!("`{token}`"),
        None => "end of input".to_string(),
    }
}

/// Category of parse error.
///
/// Fieldless mirror of [`ParseError`] for callers that only need to branch
/// on what went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    /// A block's closing delimiter is not registered for its opener.
    ///
    /// Example: `{a)`. Raised before any other stage runs.
    BraceMismatch,

    /// The segmenter needed an atom or continuation and found something
    /// else, or ran out of tokens.
    ///
    /// Example: `a +` (nothing after the operator).
    UnexpectedToken,

    /// A well-formed chain or block that no construction rule covers.
    ///
    /// Example: `(a b]`, a mismatched pair that is not a range.
    UnsupportedShape,

    /// A keyword that cannot head an expression.
    ///
    /// Example: `else` without a preceding `if`.
    UnknownKeyword,

    /// Input nested deeper than the configured limit.
    DepthExceeded,
}

impl ParseError {
    pub fn kind(&self) -> ParseErrorKind {
        match self {
            ParseError::BraceMismatch { .. } => ParseErrorKind::BraceMismatch,
            ParseError::UnexpectedToken { .. } => ParseErrorKind::UnexpectedToken,
            ParseError::UnsupportedShape { .. } => ParseErrorKind::UnsupportedShape,
            ParseError::UnknownKeyword { .. } => ParseErrorKind::UnknownKeyword,
            ParseError::DepthExceeded { .. } => ParseErrorKind::DepthExceeded,
        }
    }

    /// Create an "unexpected token" error.
    pub(crate) fn unexpected_token(
        expected: &'static str,
        found: Option<&Token>,
        position: usize,
    ) -> Self {
        ParseError::UnexpectedToken {
            expected,
            found: found.cloned(),
            position,
        }
    }

    /// Create an "unsupported shape" error carrying the offending tokens.
    pub(crate) fn unsupported(context: &'static str, tokens: &[Token]) -> Self {
        ParseError::UnsupportedShape {
            context,
            tokens: tokens.to_vec(),
        }
    }
}
