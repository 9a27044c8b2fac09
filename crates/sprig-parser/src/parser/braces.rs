//! Bracket pair legality.
//!
//! The tokenizer pairs brackets by nesting alone, so `[0..10)` arrives as a
//! block with `[` and `)`. This pass decides which pairs are allowed:
//! round and square brackets may close each other (half-open ranges),
//! curly braces only close themselves.

use sprig_lexer::{Block, StringPart, Token};
use tracing::debug;

use super::ParseError;
use super::config::DEFAULT_MAX_DEPTH;

/// Legal openers and the closers registered for each.
pub const VALID_BRACE_PAIRS: [(char, &str); 3] = [('{', "}"), ('(', ")]"), ('[', "])")];

/// Closers registered for `left`, or `None` if `left` is not an opener.
pub fn legal_closers(left: char) -> Option<&'static str> {
    VALID_BRACE_PAIRS
        .iter()
        .find(|(open, _)| *open == left)
        .map(|(_, closers)| *closers)
}

pub fn is_legal_pair(left: char, right: char) -> bool {
    legal_closers(left).is_some_and(|closers| closers.contains(right))
}

/// Checks every block in the token tree, including type-parameter bodies
/// and string interpolations. Fails on the first illegal pair, or on a tree
/// nested deeper than [`DEFAULT_MAX_DEPTH`].
pub fn validate_block_braces(tokens: &[Token]) -> Result<(), ParseError> {
    validate_within(tokens, DEFAULT_MAX_DEPTH)
}

/// Like [`validate_block_braces`], also rejecting trees nested deeper than
/// `max_depth` levels.
pub fn validate_within(tokens: &[Token], max_depth: usize) -> Result<(), ParseError> {
    let mut blocks = 0;
    validate_sequence(tokens, 0, max_depth, &mut blocks)?;
    debug!("validated {} blocks", blocks);
    Ok(())
}

fn validate_sequence(
    tokens: &[Token],
    depth: usize,
    max_depth: usize,
    blocks: &mut usize,
) -> Result<(), ParseError> {
    for token in tokens {
        match token {
            Token::Block(block) => validate_block(block, depth + 1, max_depth, blocks)?,
            Token::TypeParam(body) => {
                check_depth(depth + 1, max_depth)?;
                validate_sequence(body, depth + 1, max_depth, blocks)?;
            }
            Token::String(parts) => {
                for part in parts {
                    if let StringPart::Block(block) = part {
                        validate_block(block, depth + 1, max_depth, blocks)?;
                    }
                }
            }
            _ => {}
        }
    }
    Ok(())
}

fn validate_block(
    block: &Block,
    depth: usize,
    max_depth: usize,
    blocks: &mut usize,
) -> Result<(), ParseError> {
    check_depth(depth, max_depth)?;
    if !is_legal_pair(block.left, block.right) {
        return Err(ParseError::BraceMismatch {
            left: block.left,
            right: block.right,
            expected: legal_closers(block.left).unwrap_or(""),
        });
    }
    *blocks += 1;
    validate_sequence(&block.body, depth, max_depth, blocks)
}

fn check_depth(depth: usize, max_depth: usize) -> Result<(), ParseError> {
    if depth > max_depth {
        return Err(ParseError::DepthExceeded { limit: max_depth });
    }
    Ok(())
}
