//! Token tree to AST parser.
//!
//! Parsing runs in fixed stages over an already-nested token tree:
//!
//! 1. brace validation (every block's closer is legal for its opener),
//! 2. whitespace inversion (whitespace out, juxtaposition markers in),
//! 3. chain segmentation and AST construction.
//!
//! ## Architecture
//!
//! - `braces`: bracket pair legality and the depth check
//! - `whitespace`: in-place whitespace inversion
//! - `chain`: splitting a token sequence into chains of chunks
//! - `build`: chains to AST nodes (precedence, blocks, keyword expressions)
//! - `stream`: token cursor with lookahead
//! - `error`: ParseError and its categories
//!
//! ## Public API
//!
//! ```rust,ignore
//! pub fn parse(tokens: Vec<Token>) -> Result<Ast, ParseError>
//! Parser::new(config).parse(tokens)
//! ```

mod braces;
mod build;
mod chain;
mod config;
mod error;
mod stream;
mod whitespace;

pub use braces::{
    VALID_BRACE_PAIRS, is_legal_pair, legal_closers, validate_block_braces, validate_within,
};
pub use build::{build_chain, build_root, build_sequence};
pub use chain::{
    Atom, Chain, ChainElement, Chunk, KeywordExpr, is_connective, next_chain, split_chains,
};
pub use config::{DEFAULT_MAX_DEPTH, ParserConfig};
pub use error::{ParseError, ParseErrorKind};
pub use whitespace::invert_whitespace;

use sprig_ast::Ast;
use sprig_lexer::Token;
use tracing::debug;

/// Runs the parse stages with one configuration.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parses a whole token tree into the root block.
    ///
    /// # Errors
    /// Returns the first error any stage reports; nothing is built past it.
    pub fn parse(&self, mut tokens: Vec<Token>) -> Result<Ast, ParseError> {
        let max_depth = self.config.max_depth;

        braces::validate_within(&tokens, max_depth)?;
        invert_whitespace(&mut tokens);
        debug!("inverted whitespace: {} top-level tokens", tokens.len());

        let root = build::AstBuilder::new(max_depth).root(&tokens)?;
        if let Ast::Block { items, .. } = &root {
            debug!("built root block with {} expressions", items.len());
        }
        Ok(root)
    }
}

/// Parses a token tree with the default configuration.
///
/// # Errors
/// See [`Parser::parse`].
pub fn parse(tokens: Vec<Token>) -> Result<Ast, ParseError> {
    Parser::default().parse(tokens)
}
