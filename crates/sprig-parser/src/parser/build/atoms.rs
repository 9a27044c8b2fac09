//! Chunks, atoms and keyword expressions.

use sprig_ast::{Ast, BinaryOp, DeclarationType, PostfixOp, PrefixOp};
use sprig_lexer::{Keyword, Operator, StringPart, Token};

use super::AstBuilder;
use crate::parser::chain::{Atom, Chunk, KeywordExpr};
use crate::parser::ParseError;

impl AstBuilder {
    /// Postfix operators bind first, then prefixes from the inside out.
    pub(super) fn chunk(&mut self, chunk: &Chunk<'_>) -> Result<Ast, ParseError> {
        let mut ast = match &chunk.atom {
            Atom::Token(token) => self.token(token)?,
            Atom::Keyword(expr) => self.keyword(expr)?,
        };
        for token in chunk.postfix {
            ast = Ast::postfix(postfix_op(token, chunk.tokens)?, ast);
        }
        for token in chunk.prefix.iter().rev() {
            ast = Ast::prefix(prefix_op(token, chunk.tokens)?, ast);
        }
        Ok(ast)
    }

    pub(super) fn token(&mut self, token: &Token) -> Result<Ast, ParseError> {
        Ok(match token {
            Token::Identifier(name) => match name.as_str() {
                "true" => Ast::Bool(true),
                "false" => Ast::Bool(false),
                "void" => Ast::Void,
                "undefined" => Ast::Undefined,
                _ => Ast::Identifier(name.clone()),
            },
            Token::Integer(value) | Token::BasedNumber { value, .. } => Ast::Int(i128::from(*value)),
            Token::RawString(body) => Ast::String(body.clone()),
            Token::String(parts) => self.string(parts)?,
            Token::Block(block) => self.block(block)?,
            Token::TypeParam(body) => Ast::TypeParam(self.sequence(body)?),
            Token::Hashtag(name) => Ast::Hashtag(name.clone()),
            Token::DotDot => Ast::bare_range(None, None),
            other => return Err(ParseError::unsupported("atom", std::slice::from_ref(other))),
        })
    }

    fn string(&mut self, parts: &[StringPart]) -> Result<Ast, ParseError> {
        let plain: Option<String> = parts
            .iter()
            .map(|part| match part {
                StringPart::Text(text) => Some(text.as_str()),
                StringPart::Block(_) => None,
            })
            .collect();
        if let Some(text) = plain {
            return Ok(Ast::String(text));
        }

        let mut built = Vec::with_capacity(parts.len());
        for part in parts {
            match part {
                StringPart::Text(text) if text.is_empty() => {}
                StringPart::Text(text) => built.push(Ast::String(text.clone())),
                StringPart::Block(block) => built.push(self.block(block)?),
            }
        }
        Ok(Ast::IString(built))
    }

    fn keyword(&mut self, expr: &KeywordExpr<'_>) -> Result<Ast, ParseError> {
        match expr {
            KeywordExpr::Flow {
                keyword,
                condition,
                body,
                otherwise,
            } => {
                let condition = Box::new(self.chain(condition)?);
                let body = Box::new(self.chain(body)?);
                let mut branches = vec![match keyword {
                    Keyword::Loop => Ast::Loop { condition, body },
                    _ => Ast::If { condition, body },
                }];
                if let Some(otherwise) = otherwise {
                    match self.chain(otherwise)? {
                        Ast::Flow(rest) => branches.extend(rest),
                        fallback => branches.push(Ast::Default(Box::new(fallback))),
                    }
                }
                Ok(Ast::Flow(branches))
            }
            KeywordExpr::Declare { keyword, target } => {
                let built = self.chain(target)?;
                if !is_declarable(&built) {
                    return Err(ParseError::unsupported("declaration target", target.tokens));
                }
                Ok(Ast::Declare {
                    decltype: match keyword {
                        Keyword::Const => DeclarationType::Const,
                        _ => DeclarationType::Let,
                    },
                    target: Box::new(built),
                })
            }
            KeywordExpr::Express { target } => match self.chain(target)? {
                id @ Ast::Identifier(_) => Ok(Ast::Express(Box::new(id))),
                _ => Err(ParseError::unsupported("express target", target.tokens)),
            },
            KeywordExpr::Jump { keyword, label } => {
                let label = match label {
                    Some(Token::Hashtag(name)) => Some(name.clone()),
                    _ => None,
                };
                Ok(match keyword {
                    Keyword::Continue => Ast::Continue(label),
                    _ => Ast::Break(label),
                })
            }
        }
    }
}

fn is_declarable(target: &Ast) -> bool {
    matches!(
        target,
        Ast::Identifier(_)
            | Ast::TypedIdentifier { .. }
            | Ast::UnpackTarget(_)
            | Ast::Binary {
                op: BinaryOp::Assign | BinaryOp::ReturnTyped,
                ..
            }
    )
}

fn prefix_op(token: &Token, context: &[Token]) -> Result<PrefixOp, ParseError> {
    Ok(match token {
        Token::Operator(Operator::Not) => PrefixOp::Not,
        Token::Operator(Operator::Minus) => PrefixOp::UnaryNeg,
        Token::Operator(Operator::Plus) => PrefixOp::UnaryPos,
        Token::Operator(Operator::Star) => PrefixOp::UnaryMul,
        Token::Operator(Operator::Slash) => PrefixOp::UnaryDiv,
        Token::Operator(Operator::At) => PrefixOp::AtHandle,
        Token::Operator(Operator::Ellipsis) => PrefixOp::Spread,
        _ => return Err(ParseError::unsupported("prefix operator", context)),
    })
}

fn postfix_op(token: &Token, context: &[Token]) -> Result<PostfixOp, ParseError> {
    match token {
        Token::Operator(Operator::Backtick) => Ok(PostfixOp::RollAxes),
        Token::Operator(Operator::Semicolon) => Ok(PostfixOp::Suppress),
        _ => Err(ParseError::unsupported("postfix operator", context)),
    }
}
