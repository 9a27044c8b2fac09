// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Lexical layer for the sprig language.
//!
//! # Design
//!
//! - [`Token`] is a tree: bracketed regions arrive as single block tokens
//!   with their own bodies, so later stages never re-pair brackets.
//! - Whitespace is a token. Adjacency decides between juxtaposition and
//!   separate expressions, and the parser turns it into explicit markers.
//! - [`lex`] is the reference tokenizer used by the driver and the tests.
//!
//! # Examples
//!
//! ```
//! use sprig_lexer::{Token, lex};
//!
//! let tokens = lex("f(x) + 1").unwrap();
//! assert!(matches!(tokens[1], Token::Block(_)));
//! ```

mod lexer;
mod token;

pub use lexer::{LexError, lex};
pub use token::{
    Block, DisplayTokens, Keyword, Operator, ShiftOp, StringPart, Token, escape, render_tokens,
};
