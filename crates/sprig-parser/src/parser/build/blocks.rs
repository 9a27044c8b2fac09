//! Block roles.
//!
//! The same bracket can mean a group, a scope, a collection or a range; the
//! role follows from the delimiters and what the body builds to.

use sprig_ast::{Ast, BinaryOp, RangeBrackets};
use sprig_lexer::{Block, Token};
use tracing::trace;

use super::AstBuilder;
use crate::parser::ParseError;

impl AstBuilder {
    pub(super) fn block(&mut self, block: &Block) -> Result<Ast, ParseError> {
        self.descend(|this| {
            let ast = this.block_role(block)?;
            trace!("{}{} block built as {}", block.left, block.right, ast.name());
            Ok(ast)
        })
    }

    fn block_role(&mut self, block: &Block) -> Result<Ast, ParseError> {
        match (block.left, block.right, block.body.as_slice()) {
            ('(', ')', []) | ('{', '}', []) => Ok(Ast::Void),
            ('[', ']', []) => Ok(Ast::Array(Vec::new())),
            (left @ ('(' | '['), right @ (')' | ']'), [Token::DotDot]) => {
                match RangeBrackets::from_delimiters(left, right) {
                    Some(brackets) => Ok(Ast::range(None, None, brackets)),
                    None => Err(mismatched(block)),
                }
            }
            ('{', '}', [Token::Block(inner)]) if inner.left == '{' && inner.right == '}' => {
                let items = match self.block(inner)? {
                    Ast::Block { items, .. } => items,
                    other => vec![other],
                };
                Ok(Ast::Block {
                    items,
                    new_scope: true,
                })
            }
            ('(', ')', [single]) | ('{', '}', [single])
                if single.is_atom() && *single != Token::DotDot =>
            {
                self.token(single)
            }
            _ => self.block_body(block),
        }
    }

    fn block_body(&mut self, block: &Block) -> Result<Ast, ParseError> {
        let mut items = self.sequence(&block.body)?;

        if let Some(brackets) = RangeBrackets::from_delimiters(block.left, block.right) {
            if let [Ast::BareRange { .. }] = items.as_slice() {
                if let Some(Ast::BareRange { left, right }) = items.pop() {
                    return Ok(Ast::Range {
                        left,
                        right,
                        brackets,
                    });
                }
            }
        }

        match (block.left, block.right) {
            ('(', ')') => Ok(Ast::Group(items)),
            ('{', '}') => Ok(Ast::Block {
                items,
                new_scope: false,
            }),
            ('[', ']') => Ok(collection(items)),
            _ => Err(mismatched(block)),
        }
    }
}

/// Classifies the items of a `[...]` block.
fn collection(mut items: Vec<Ast>) -> Ast {
    if let [Ast::PrototypeTuple(_)] = items.as_slice() {
        if let Some(Ast::PrototypeTuple(inner)) = items.pop() {
            items = inner;
        }
    }

    if all_binary(&items, BinaryOp::PointsTo) {
        return Ast::Dict(items);
    }
    if all_binary(&items, BinaryOp::BidirPointsTo) {
        return Ast::BidirDict(items);
    }
    let is_member = |item: &Ast| {
        matches!(
            item,
            Ast::Declare { .. }
                | Ast::Binary {
                    op: BinaryOp::Assign,
                    ..
                }
        )
    };
    if items.iter().any(is_member) {
        Ast::ObjectLiteral(items)
    } else {
        Ast::Array(items)
    }
}

fn all_binary(items: &[Ast], op: BinaryOp) -> bool {
    !items.is_empty()
        && items
            .iter()
            .all(|item| matches!(item, Ast::Binary { op: found, .. } if *found == op))
}

fn mismatched(block: &Block) -> ParseError {
    ParseError::unsupported("block", std::slice::from_ref(&Token::Block(block.clone())))
}
