//! Chain segmentation.
//!
//! A *chunk* is `prefix-op* atom postfix-op*`; a *chain* is a chunk followed
//! by any number of `connective chunk` pairs and an optional `;`. A chain is
//! one expression; a token sequence is a list of chains.
//!
//! ```text
//! chunk      = prefix_op* atom postfix_op*        (postfix `;` excluded)
//! chain      = chunk (connective chunk?)* ";"?    (chunk optional only after `..`)
//! connective = binary_op | broadcast_op | juxtapose | shift_op | "," | ".."
//! atom       = identifier | integer | based | string | raw_string | block
//!            | type_param | hashtag | ".." | keyword_expr
//! ```
//!
//! Segmentation never copies tokens: chains and chunks borrow sub-slices of
//! the input, and the consumed prefix plus the remainder is the input.

use sprig_lexer::{Keyword, Operator, Token};
use tracing::trace;

use super::config::DEFAULT_MAX_DEPTH;
use super::stream::TokenStream;
use super::ParseError;

/// One expression worth of tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct Chain<'t> {
    /// Every token the chain consumed, terminator included.
    pub tokens: &'t [Token],
    /// Alternating chunks and connectives, starting with a chunk.
    pub elements: Vec<ChainElement<'t>>,
    /// Ended with the statement terminator `;`.
    pub terminated: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChainElement<'t> {
    Chunk(Chunk<'t>),
    Connective(&'t Token),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Chunk<'t> {
    pub tokens: &'t [Token],
    pub prefix: &'t [Token],
    pub atom: Atom<'t>,
    pub postfix: &'t [Token],
}

#[derive(Debug, Clone, PartialEq)]
pub enum Atom<'t> {
    Token(&'t Token),
    Keyword(KeywordExpr<'t>),
}

/// A keyword together with the sub-chains it consumed.
#[derive(Debug, Clone, PartialEq)]
pub enum KeywordExpr<'t> {
    /// `if`/`loop` condition body (`else` chain)?
    Flow {
        keyword: Keyword,
        condition: Box<Chain<'t>>,
        body: Box<Chain<'t>>,
        otherwise: Option<Box<Chain<'t>>>,
    },
    /// `let`/`const` target
    Declare {
        keyword: Keyword,
        target: Box<Chain<'t>>,
    },
    /// `express` target
    Express { target: Box<Chain<'t>> },
    /// `break`/`continue` #label?
    Jump {
        keyword: Keyword,
        label: Option<&'t Token>,
    },
}

impl<'t> Chain<'t> {
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk<'t>> {
        self.elements.iter().filter_map(|element| match element {
            ChainElement::Chunk(chunk) => Some(chunk),
            ChainElement::Connective(_) => None,
        })
    }

    pub fn connectives(&self) -> impl Iterator<Item = &'t Token> + '_ {
        self.elements.iter().filter_map(|element| match element {
            ChainElement::Connective(token) => Some(*token),
            ChainElement::Chunk(_) => None,
        })
    }
}

impl Chunk<'_> {
    /// A lone atom with no operators attached.
    pub fn is_bare(&self) -> bool {
        self.prefix.is_empty() && self.postfix.is_empty()
    }
}

/// Tokens that join two chunks into one chain.
pub fn is_connective(token: &Token) -> bool {
    match token {
        Token::Operator(op) | Token::Broadcast(op) => op.is_binary(),
        Token::Juxtapose | Token::ShiftOperator(_) | Token::Comma | Token::DotDot => true,
        _ => false,
    }
}

fn starts_chunk(token: &Token) -> bool {
    match token {
        Token::Operator(op) => op.is_prefix(),
        Token::Keyword(_) => true,
        _ => token.is_atom(),
    }
}

fn is_prefix_op(token: &Token) -> bool {
    matches!(token, Token::Operator(op) if op.is_prefix())
}

fn is_chunk_postfix_op(token: &Token) -> bool {
    matches!(token, Token::Operator(op) if op.is_postfix() && *op != Operator::Semicolon)
}

/// Consumes one chain from the front of `tokens`.
///
/// Returns the chain and the untouched remainder; `chain.tokens` followed
/// by the remainder is exactly `tokens`.
pub fn next_chain(tokens: &[Token]) -> Result<(Chain<'_>, &[Token]), ParseError> {
    next_chain_within(tokens, DEFAULT_MAX_DEPTH)
}

pub(crate) fn next_chain_within(
    tokens: &[Token],
    max_depth: usize,
) -> Result<(Chain<'_>, &[Token]), ParseError> {
    let mut segmenter = Segmenter::new(tokens, max_depth);
    let chain = segmenter.chain(Role::Statement)?;
    Ok((chain, segmenter.stream.rest()))
}

/// Splits a whole sequence into chains.
pub fn split_chains(tokens: &[Token]) -> Result<Vec<Chain<'_>>, ParseError> {
    split_chains_within(tokens, DEFAULT_MAX_DEPTH)
}

pub(crate) fn split_chains_within(
    tokens: &[Token],
    max_depth: usize,
) -> Result<Vec<Chain<'_>>, ParseError> {
    let mut segmenter = Segmenter::new(tokens, max_depth);
    let mut chains = Vec::new();
    while !segmenter.stream.at_end() {
        chains.push(segmenter.chain(Role::Statement)?);
    }
    trace!("split {} tokens into {} chains", tokens.len(), chains.len());
    Ok(chains)
}

/// What a chain is read for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    /// A whole expression, which may take the `;`.
    Statement,
    /// A keyword expression's operand. The `;` is left for the enclosing chain.
    Operand,
    /// An `if`/`loop` condition, which also ends where a `{...}` body is
    /// written against it: `if(x){y}`.
    Condition,
}

struct Segmenter<'t> {
    stream: TokenStream<'t>,
    depth: usize,
    max_depth: usize,
}

impl<'t> Segmenter<'t> {
    fn new(tokens: &'t [Token], max_depth: usize) -> Self {
        Self {
            stream: TokenStream::new(tokens),
            depth: 0,
            max_depth,
        }
    }

    fn chain(&mut self, role: Role) -> Result<Chain<'t>, ParseError> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(ParseError::DepthExceeded {
                limit: self.max_depth,
            });
        }

        let start = self.stream.current_pos();
        let mut elements = vec![ChainElement::Chunk(self.chunk()?)];

        while let Some(token) = self.stream.peek() {
            if !is_connective(token) || (role == Role::Condition && self.body_follows()) {
                break;
            }
            self.stream.advance();
            elements.push(ChainElement::Connective(token));

            // open ranges: `(0..)`, `a.. + b` has no right operand for `..`
            if *token == Token::DotDot && !self.stream.peek().is_some_and(starts_chunk) {
                continue;
            }
            elements.push(ChainElement::Chunk(self.chunk()?));
        }

        let terminated = role == Role::Statement
            && self
                .stream
                .advance_if(|t| t.is_operator(Operator::Semicolon))
                .is_some();

        self.depth -= 1;
        Ok(Chain {
            tokens: self.stream.slice_from(start),
            elements,
            terminated,
        })
    }

    fn chunk(&mut self) -> Result<Chunk<'t>, ParseError> {
        let start = self.stream.current_pos();
        while self.stream.advance_if(is_prefix_op).is_some() {}
        let prefix = self.stream.slice_from(start);

        let position = self.stream.current_pos();
        let atom = match self.stream.advance() {
            Some(token) if token.is_atom() => Atom::Token(token),
            Some(Token::Keyword(keyword)) => Atom::Keyword(self.keyword_expr(*keyword, position)?),
            found => return Err(ParseError::unexpected_token("an atom", found, position)),
        };

        let postfix_start = self.stream.current_pos();
        while self.stream.advance_if(is_chunk_postfix_op).is_some() {}

        Ok(Chunk {
            tokens: self.stream.slice_from(start),
            prefix,
            atom,
            postfix: self.stream.slice_from(postfix_start),
        })
    }

    fn keyword_expr(&mut self, keyword: Keyword, position: usize) -> Result<KeywordExpr<'t>, ParseError> {
        self.skip_juxtapose();
        match keyword {
            Keyword::If | Keyword::Loop => {
                let condition = Box::new(self.chain(Role::Condition)?);
                self.skip_juxtapose();
                let body = Box::new(self.chain(Role::Operand)?);
                let otherwise = match self.stream.advance_if(|t| t.is_keyword(Keyword::Else)) {
                    Some(_) => {
                        self.skip_juxtapose();
                        Some(Box::new(self.chain(Role::Operand)?))
                    }
                    None => None,
                };
                Ok(KeywordExpr::Flow {
                    keyword,
                    condition,
                    body,
                    otherwise,
                })
            }
            Keyword::Let | Keyword::Const => Ok(KeywordExpr::Declare {
                keyword,
                target: Box::new(self.chain(Role::Operand)?),
            }),
            Keyword::Express => Ok(KeywordExpr::Express {
                target: Box::new(self.chain(Role::Operand)?),
            }),
            Keyword::Break | Keyword::Continue => Ok(KeywordExpr::Jump {
                keyword,
                label: self.stream.advance_if(|t| matches!(t, Token::Hashtag(_))),
            }),
            Keyword::Else | Keyword::Return | Keyword::Import => {
                Err(ParseError::UnknownKeyword { keyword, position })
            }
        }
    }

    fn skip_juxtapose(&mut self) {
        self.stream.advance_if(|t| *t == Token::Juxtapose);
    }

    /// A `{...}` block written directly against the chain so far.
    fn body_follows(&self) -> bool {
        self.stream.peek() == Some(&Token::Juxtapose)
            && matches!(
                self.stream.peek_nth(1),
                Some(Token::Block(block)) if block.left == '{'
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ParseErrorKind;
    use sprig_lexer::Block;

    fn ident(name: &str) -> Token {
        Token::Identifier(name.to_string())
    }

    fn op(op: Operator) -> Token {
        Token::Operator(op)
    }

    #[test]
    fn chain_stops_at_a_missing_connective() {
        let tokens = vec![ident("a"), op(Operator::Plus), ident("b"), ident("c")];
        let (chain, rest) = next_chain(&tokens).unwrap();
        assert_eq!(chain.tokens, &tokens[..3]);
        assert_eq!(rest, &tokens[3..]);
        assert_eq!(chain.chunks().count(), 2);
        assert!(!chain.terminated);
    }

    #[test]
    fn terminator_closes_the_chain() {
        let tokens = vec![ident("a"), op(Operator::Semicolon), ident("b")];
        let (chain, rest) = next_chain(&tokens).unwrap();
        assert!(chain.terminated);
        assert_eq!(chain.tokens.len(), 2);
        assert_eq!(rest, &[ident("b")]);
    }

    #[test]
    fn chunks_collect_prefix_and_postfix_operators() {
        let tokens = vec![
            op(Operator::Minus),
            op(Operator::Not),
            ident("x"),
            op(Operator::Backtick),
            op(Operator::Semicolon),
        ];
        let (chain, rest) = next_chain(&tokens).unwrap();
        assert!(rest.is_empty());
        let chunk = chain.chunks().next().unwrap();
        assert_eq!(chunk.prefix.len(), 2);
        assert_eq!(chunk.postfix, &[op(Operator::Backtick)]);
        assert_eq!(chunk.atom, Atom::Token(&tokens[2]));
        assert!(chain.terminated);
    }

    #[test]
    fn missing_atom_is_an_unexpected_token() {
        let tokens = vec![ident("a"), op(Operator::Star)];
        let err = next_chain(&tokens).unwrap_err();
        assert_eq!(
            err,
            ParseError::UnexpectedToken {
                expected: "an atom",
                found: None,
                position: 2,
            }
        );

        let tokens = vec![Token::Comma];
        let err = next_chain(&tokens).unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::UnexpectedToken);
    }

    #[test]
    fn range_dot_may_end_a_chain() {
        let tokens = vec![Token::Integer(0), Token::DotDot];
        let (chain, rest) = next_chain(&tokens).unwrap();
        assert!(rest.is_empty());
        assert_eq!(chain.elements.len(), 2);
    }

    #[test]
    fn if_else_packages_its_sub_chains() {
        let body = Token::Block(Block::new('{', '}', vec![ident("b")]));
        let tokens = vec![
            Token::Keyword(Keyword::If),
            ident("a"),
            body.clone(),
            Token::Keyword(Keyword::Else),
            ident("c"),
            op(Operator::Semicolon),
            ident("next"),
        ];
        let (chain, rest) = next_chain(&tokens).unwrap();
        assert_eq!(rest, &[ident("next")]);
        assert!(chain.terminated);

        let Atom::Keyword(KeywordExpr::Flow {
            condition,
            body: parsed_body,
            otherwise: Some(otherwise),
            ..
        }) = &chain.chunks().next().unwrap().atom
        else {
            panic!("expected a flow, got {chain:?}");
        };
        assert_eq!(condition.tokens, &[ident("a")]);
        assert_eq!(parsed_body.tokens, &[body]);
        assert_eq!(otherwise.tokens, &[ident("c")]);
        assert!(!otherwise.terminated);
    }

    #[test]
    fn juxtaposed_body_ends_the_condition() {
        let condition = Token::Block(Block::new('(', ')', vec![ident("x")]));
        let body = Token::Block(Block::new('{', '}', vec![ident("y")]));
        let tokens = vec![
            Token::Keyword(Keyword::If),
            condition.clone(),
            Token::Juxtapose,
            body.clone(),
        ];
        let (chain, rest) = next_chain(&tokens).unwrap();
        assert!(rest.is_empty());

        let Atom::Keyword(KeywordExpr::Flow {
            condition: parsed_condition,
            body: parsed_body,
            otherwise: None,
            ..
        }) = &chain.chunks().next().unwrap().atom
        else {
            panic!("expected a flow, got {chain:?}");
        };
        assert_eq!(parsed_condition.tokens, &[condition]);
        assert_eq!(parsed_body.tokens, &[body]);
    }

    #[test]
    fn juxtaposed_braces_outside_a_condition_stay_connected() {
        let tokens = vec![
            Token::Keyword(Keyword::Let),
            ident("f"),
            Token::Juxtapose,
            Token::Block(Block::new('{', '}', vec![ident("y")])),
        ];
        let (chain, rest) = next_chain(&tokens).unwrap();
        assert!(rest.is_empty());
        assert_eq!(chain.tokens.len(), 4);
    }

    #[test]
    fn break_takes_an_optional_label() {
        let tokens = vec![Token::Keyword(Keyword::Break), Token::Hashtag("outer".into())];
        let (chain, _) = next_chain(&tokens).unwrap();
        assert_eq!(chain.tokens.len(), 2);

        let tokens = vec![Token::Keyword(Keyword::Continue), ident("x")];
        let (chain, rest) = next_chain(&tokens).unwrap();
        assert_eq!(chain.tokens.len(), 1);
        assert_eq!(rest, &[ident("x")]);
    }

    #[test]
    fn else_without_if_is_an_unknown_keyword() {
        let tokens = vec![ident("a"), Token::Keyword(Keyword::Else), ident("b")];
        let chains = split_chains(&tokens).unwrap_err();
        assert_eq!(
            chains,
            ParseError::UnknownKeyword {
                keyword: Keyword::Else,
                position: 1,
            }
        );
    }

    #[test]
    fn split_covers_every_token() {
        let tokens = vec![
            ident("x"),
            op(Operator::Assign),
            Token::Integer(1),
            ident("y"),
            Token::Juxtapose,
            Token::Block(Block::new('(', ')', vec![])),
        ];
        let chains = split_chains(&tokens).unwrap();
        assert_eq!(chains.len(), 2);
        let total: usize = chains.iter().map(|c| c.tokens.len()).sum();
        assert_eq!(total, tokens.len());
    }

    #[test]
    fn keyword_nesting_respects_the_depth_limit() {
        let mut tokens = Vec::new();
        for _ in 0..10 {
            tokens.push(Token::Keyword(Keyword::Let));
        }
        tokens.push(ident("x"));
        assert!(next_chain_within(&tokens, 20).is_ok());
        assert_eq!(
            next_chain_within(&tokens, 5).unwrap_err().kind(),
            ParseErrorKind::DepthExceeded
        );
    }
}
