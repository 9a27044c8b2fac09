//! AST construction from segmented chains.
//!
//! A chain is flattened into operands and connectives, then split at the
//! weakest-binding connective and built recursively. Blocks pick their role
//! from their delimiters and contents; keyword expressions are built from
//! the sub-chains the segmenter packaged for them.

mod atoms;
mod blocks;
mod precedence;

use sprig_ast::{Ast, BinaryOp, JuxLevel};
use sprig_lexer::Token;
use tracing::trace;

use super::chain::{split_chains_within, Atom, Chain, ChainElement, Chunk};
use super::config::DEFAULT_MAX_DEPTH;
use super::ParseError;
use precedence::{binary_op, shift_op, Assoc, Connective};

/// Builds one chain into its expression.
pub fn build_chain(chain: &Chain<'_>) -> Result<Ast, ParseError> {
    AstBuilder::new(DEFAULT_MAX_DEPTH).chain(chain)
}

/// Builds a whole sequence into its list of expressions.
pub fn build_sequence(tokens: &[Token]) -> Result<Vec<Ast>, ParseError> {
    AstBuilder::new(DEFAULT_MAX_DEPTH).sequence(tokens)
}

/// Builds a whole program: the root is a scope-introducing block.
pub fn build_root(tokens: &[Token]) -> Result<Ast, ParseError> {
    AstBuilder::new(DEFAULT_MAX_DEPTH).root(tokens)
}

/// Recursive builder carrying the nesting guard.
pub(crate) struct AstBuilder {
    max_depth: usize,
    depth: usize,
}

/// A chain operand; `None` only next to a `..` with an open end.
type Operand<'c, 't> = Option<&'c Chunk<'t>>;

enum Item<'c, 't> {
    Operand(&'c Chunk<'t>),
    Connective(&'t Token),
    RangeDot,
}

impl AstBuilder {
    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth,
            depth: 0,
        }
    }

    pub fn root(&mut self, tokens: &[Token]) -> Result<Ast, ParseError> {
        let items = self.sequence(tokens)?;
        Ok(Ast::Block {
            items,
            new_scope: true,
        })
    }

    pub fn sequence(&mut self, tokens: &[Token]) -> Result<Vec<Ast>, ParseError> {
        split_chains_within(tokens, self.max_depth)?
            .iter()
            .map(|chain| self.chain(chain))
            .collect()
    }

    /// Runs `build` one nesting level deeper.
    fn descend<T>(
        &mut self,
        build: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= self.max_depth {
            return Err(ParseError::DepthExceeded {
                limit: self.max_depth,
            });
        }
        self.depth += 1;
        let result = build(self);
        self.depth -= 1;
        result
    }

    pub fn chain(&mut self, chain: &Chain<'_>) -> Result<Ast, ParseError> {
        self.descend(|this| {
            let (operands, connectives) = normalize(chain)?;
            let ast = this.span(&operands, &connectives, chain.tokens)?;
            Ok(if chain.terminated {
                Ast::postfix(sprig_ast::PostfixOp::Suppress, ast)
            } else {
                ast
            })
        })
    }

    /// Builds `operands[0] c[0] operands[1] ... c[n-1] operands[n]`.
    fn span(
        &mut self,
        operands: &[Operand<'_, '_>],
        connectives: &[Connective],
        context: &[Token],
    ) -> Result<Ast, ParseError> {
        self.descend(|this| {
            let Some(weakest) = connectives.iter().map(|c| c.strength()).min() else {
                return match operands.first() {
                    Some(Some(chunk)) => this.chunk(chunk),
                    _ => Err(ParseError::unsupported("chain", context)),
                };
            };
            let splits: Vec<usize> = connectives
                .iter()
                .enumerate()
                .filter(|(_, c)| c.strength() == weakest)
                .map(|(i, _)| i)
                .collect();

            match connectives[splits[0]] {
                Connective::Comma => {
                    let mut items = Vec::with_capacity(splits.len() + 1);
                    let mut start = 0;
                    for end in splits.iter().copied().chain([connectives.len()]) {
                        items.push(this.span(
                            &operands[start..=end],
                            &connectives[start..end],
                            context,
                        )?);
                        start = end + 1;
                    }
                    Ok(Ast::PrototypeTuple(items))
                }
                Connective::RangeDot => {
                    if splits.len() > 1 {
                        return Err(ParseError::unsupported("range", context));
                    }
                    let i = splits[0];
                    let left = this.range_side(&operands[..=i], &connectives[..i], context)?;
                    let right =
                        this.range_side(&operands[i + 1..], &connectives[i + 1..], context)?;
                    Ok(Ast::bare_range(left, right))
                }
                connective => {
                    let i = match connective.binding().1 {
                        Assoc::Right => splits[0],
                        Assoc::Left => splits[splits.len() - 1],
                    };
                    let left = this.span(&operands[..=i], &connectives[..i], context)?;
                    let right = this.span(&operands[i + 1..], &connectives[i + 1..], context)?;
                    let right_chunk = match (&operands[i + 1..], &connectives[i + 1..]) {
                        ([Some(chunk)], []) => Some(*chunk),
                        _ => None,
                    };
                    this.combine(connective, left, right, right_chunk, context)
                }
            }
        })
    }

    /// One side of a `..`; a lone missing operand is an open end.
    fn range_side(
        &mut self,
        operands: &[Operand<'_, '_>],
        connectives: &[Connective],
        context: &[Token],
    ) -> Result<Option<Ast>, ParseError> {
        match (operands, connectives) {
            ([None], []) => Ok(None),
            _ => self.span(operands, connectives, context).map(Some),
        }
    }

    fn combine(
        &mut self,
        connective: Connective,
        left: Ast,
        right: Ast,
        right_chunk: Option<&Chunk<'_>>,
        context: &[Token],
    ) -> Result<Ast, ParseError> {
        use sprig_lexer::Operator;

        match connective {
            Connective::Binary(Operator::FatArrow) => Ok(Ast::PrototypeFunctionLiteral {
                args: Box::new(left),
                body: Box::new(right),
            }),
            Connective::Binary(Operator::Colon) => Ok(match left {
                Ast::Identifier(_) => Ast::TypedIdentifier {
                    id: Box::new(left),
                    ty: Box::new(right),
                },
                left => Ast::binary(BinaryOp::TypeAnnotation, left, right),
            }),
            Connective::Binary(Operator::Assign) => {
                Ok(Ast::binary(BinaryOp::Assign, unpack_target(left), right))
            }
            Connective::Binary(op) => binary_op(op)
                .map(|op| Ast::binary(op, left, right))
                .ok_or_else(|| ParseError::unsupported("operator", context)),
            Connective::Broadcast(op) => binary_op(op)
                .map(|op| Ast::broadcast(op, left, right))
                .ok_or_else(|| ParseError::unsupported("broadcast", context)),
            Connective::Shift(op) => Ok(Ast::binary(shift_op(op), left, right)),
            Connective::Juxtapose(level) => Ok(juxtapose(left, right, right_chunk, level)),
            Connective::Comma | Connective::RangeDot => {
                Err(ParseError::unsupported("chain", context))
            }
        }
    }
}

/// Flattens a chain into `n + 1` operands around `n` connectives.
///
/// A bare `..` chunk acts as a range-dot connective, juxtapositions touching
/// a range-dot are dropped, and an operand may be missing only beside a
/// range-dot.
fn normalize<'c, 't>(
    chain: &'c Chain<'t>,
) -> Result<(Vec<Operand<'c, 't>>, Vec<Connective>), ParseError> {
    let mut items: Vec<Item<'c, 't>> = chain
        .elements
        .iter()
        .map(|element| match element {
            ChainElement::Chunk(chunk)
                if chunk.is_bare() && matches!(chunk.atom, Atom::Token(Token::DotDot)) =>
            {
                Item::RangeDot
            }
            ChainElement::Chunk(chunk) => Item::Operand(chunk),
            ChainElement::Connective(Token::DotDot) => Item::RangeDot,
            ChainElement::Connective(token) => Item::Connective(*token),
        })
        .collect();

    if items.len() == 1 && matches!(items[0], Item::RangeDot) {
        // a lone `..` is an unbounded range, built as an atom
        if let Some(ChainElement::Chunk(chunk)) = chain.elements.first() {
            return Ok((vec![Some(chunk)], Vec::new()));
        }
    }

    let touches_range = |items: &[Item<'_, '_>], i: usize| {
        let before = i.checked_sub(1).and_then(|j| items.get(j));
        [before, items.get(i + 1)]
            .into_iter()
            .flatten()
            .any(|item| matches!(item, Item::RangeDot))
    };
    let mut i = 0;
    while i < items.len() {
        if matches!(items[i], Item::Connective(Token::Juxtapose)) && touches_range(&items, i) {
            items.remove(i);
        } else {
            i += 1;
        }
    }

    let unsupported = || ParseError::unsupported("chain", chain.tokens);
    let mut operands = Vec::new();
    let mut between: Vec<Item<'c, 't>> = Vec::new();
    let mut expecting_operand = true;
    for item in items {
        match item {
            Item::Operand(chunk) => {
                if !expecting_operand {
                    return Err(unsupported());
                }
                operands.push(Some(chunk));
                expecting_operand = false;
            }
            connective => {
                if expecting_operand {
                    let after_range = matches!(between.last(), Some(Item::RangeDot));
                    if !(after_range || matches!(connective, Item::RangeDot)) {
                        return Err(unsupported());
                    }
                    operands.push(None);
                }
                between.push(connective);
                expecting_operand = true;
            }
        }
    }
    if expecting_operand {
        if !matches!(between.last(), Some(Item::RangeDot)) {
            return Err(unsupported());
        }
        operands.push(None);
    }

    let connectives = between
        .iter()
        .enumerate()
        .map(|(i, item)| match item {
            Item::RangeDot => Ok(Connective::RangeDot),
            Item::Connective(token) => classify(token, operands[i], operands[i + 1])
                .ok_or_else(unsupported),
            Item::Operand(_) => Err(unsupported()),
        })
        .collect::<Result<Vec<_>, _>>()?;

    trace!(
        "normalized chain: {} operands, {} connectives",
        operands.len(),
        connectives.len()
    );
    Ok((operands, connectives))
}

fn classify(token: &Token, left: Operand<'_, '_>, right: Operand<'_, '_>) -> Option<Connective> {
    match token {
        Token::Operator(op) if op.is_binary() => Some(Connective::Binary(*op)),
        Token::Broadcast(op) if op.is_binary() => Some(Connective::Broadcast(*op)),
        Token::ShiftOperator(op) => Some(Connective::Shift(*op)),
        Token::Comma => Some(Connective::Comma),
        Token::Juxtapose => Some(Connective::Juxtapose(jux_level(left?, right?))),
        _ => None,
    }
}

/// Call level when nothing is attached between the two chunks and the right
/// one is self-delimited: `f(x)`, `f"text"`, `f<T>`.
fn jux_level(left: &Chunk<'_>, right: &Chunk<'_>) -> JuxLevel {
    let delimited = matches!(
        right.atom,
        Atom::Token(
            Token::Block(_) | Token::TypeParam(_) | Token::String(_) | Token::RawString(_)
        )
    );
    if left.postfix.is_empty() && right.prefix.is_empty() && delimited {
        JuxLevel::Call
    } else {
        JuxLevel::Multiply
    }
}

fn is_empty_parens(chunk: &Chunk<'_>) -> bool {
    matches!(
        chunk.atom,
        Atom::Token(Token::Block(block))
            if block.left == '(' && block.right == ')' && block.body.is_empty()
    ) && chunk.is_bare()
}

fn juxtapose(left: Ast, right: Ast, right_chunk: Option<&Chunk<'_>>, level: JuxLevel) -> Ast {
    if right_chunk.is_some_and(is_empty_parens) {
        return Ast::Call {
            f: Box::new(left),
            args: None,
        };
    }
    match (left, right) {
        (left, right @ Ast::Range { .. }) => Ast::Index {
            left: Box::new(left),
            right: Box::new(right),
        },
        (left @ Ast::TypeParam(_), right) => Ast::DeclareGeneric {
            left: Box::new(left),
            right: Box::new(right),
        },
        (left, right @ Ast::TypeParam(_)) => Ast::Parameterize {
            left: Box::new(left),
            right: Box::new(right),
        },
        (left, right) => Ast::juxtapose(left, right, level),
    }
}

/// `[a b] = x` destructures; any other left side is left as written.
fn unpack_target(left: Ast) -> Ast {
    match left {
        Ast::Array(items) if items.iter().all(is_unpack_item) => {
            Ast::UnpackTarget(items.into_iter().map(into_unpack_item).collect())
        }
        left => left,
    }
}

fn is_unpack_item(ast: &Ast) -> bool {
    match ast {
        Ast::Identifier(_) | Ast::TypedIdentifier { .. } | Ast::UnpackTarget(_) => true,
        Ast::Array(items) => items.iter().all(is_unpack_item),
        Ast::Prefix {
            op: sprig_ast::PrefixOp::Spread,
            operand,
        } => matches!(**operand, Ast::Identifier(_) | Ast::TypedIdentifier { .. }),
        _ => false,
    }
}

fn into_unpack_item(ast: Ast) -> Ast {
    match ast {
        Ast::Array(items) => Ast::UnpackTarget(items.into_iter().map(into_unpack_item).collect()),
        other => other,
    }
}
