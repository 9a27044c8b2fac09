// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Chain-based parser for the sprig language.
//!
//! Takes the nested token tree produced by a tokenizer and builds the root
//! [`Ast`] block. Everything is all-or-nothing: the first error aborts the
//! parse.
//!
//! # Examples
//!
//! ```
//! use sprig_parser::{Ast, parse};
//!
//! let tokens = sprig_lexer::lex("a + b").unwrap();
//! let root = parse(tokens).unwrap();
//! assert_eq!(root.to_string(), "{{a + b}}");
//! ```

pub mod parser;

pub use parser::{
    Chain, ParseError, ParseErrorKind, Parser, ParserConfig, build_root, invert_whitespace,
    next_chain, parse, split_chains, validate_block_braces, validate_within,
};

pub use sprig_ast::Ast;
pub use sprig_lexer::Token;
