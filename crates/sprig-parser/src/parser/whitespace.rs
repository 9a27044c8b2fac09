//! Whitespace inversion.
//!
//! Source adjacency is meaningful: `f(x)` applies `f`, while `f (x)` is two
//! expressions. After this pass whitespace tokens are gone and every pair of
//! tokens that was written touching is separated by an explicit
//! [`Token::Juxtapose`] marker instead.

use sprig_lexer::{StringPart, Token};
use tracing::trace;

/// Replaces whitespace with juxtaposition markers, in place and recursively.
///
/// Markers next to operators, shift operators, commas or keywords are
/// dropped since those tokens never juxtapose. The sequence is rebuilt in a
/// single pass rather than edited by index.
pub fn invert_whitespace(tokens: &mut Vec<Token>) {
    let source = std::mem::take(tokens);
    let mut inverted = Vec::with_capacity(source.len() * 2);
    let mut separated = true;

    for mut token in source {
        match &mut token {
            Token::Whitespace => {
                separated = true;
                continue;
            }
            Token::Block(block) => invert_whitespace(&mut block.body),
            Token::TypeParam(body) => invert_whitespace(body),
            Token::String(parts) => {
                for part in parts {
                    if let StringPart::Block(block) = part {
                        invert_whitespace(&mut block.body);
                    }
                }
            }
            _ => {}
        }

        if !separated {
            inverted.push(Token::Juxtapose);
        }
        inverted.push(token);
        separated = false;
    }

    *tokens = drop_insensitive_juxtapositions(inverted);
    trace!("inverted sequence of {} tokens", tokens.len());
}

/// Removes markers adjacent to tokens that do not care about whitespace.
fn drop_insensitive_juxtapositions(tokens: Vec<Token>) -> Vec<Token> {
    let keep: Vec<bool> = (0..tokens.len())
        .map(|i| {
            if tokens[i] != Token::Juxtapose {
                return true;
            }
            let before = i.checked_sub(1).and_then(|j| tokens.get(j));
            let after = tokens.get(i + 1);
            ![before, after]
                .into_iter()
                .flatten()
                .any(Token::is_whitespace_insensitive)
        })
        .collect();

    tokens
        .into_iter()
        .zip(keep)
        .filter_map(|(token, keep)| keep.then_some(token))
        .collect()
}
