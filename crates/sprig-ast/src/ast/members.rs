//! Named member enumeration.
//!
//! Every node lists its stored attributes in declaration order, each
//! classified as a direct child, a container of children, or a plain value.
//! The mutable form hands out `&mut` handles, so a caller can replace a
//! child in place and keep enumerating the remaining members.

use std::fmt;

use super::Ast;

/// A non-AST attribute value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    Bool(bool),
    Int(i128),
    Text(&'a str),
    /// A fixed tag such as an operator level or declaration type.
    Symbol(&'static str),
    /// An optional attribute that is absent.
    None,
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(value) => write!(f, "{value}"),
            Value::Int(value) => write!(f, "{value}"),
            Value::Text(text) => f.write_str(text),
            Value::Symbol(symbol) => f.write_str(symbol),
            Value::None => f.write_str("none"),
        }
    }
}

/// A borrowed member of a node.
#[derive(Debug, Clone, Copy)]
pub enum Member<'a> {
    Child(&'static str, &'a Ast),
    Children(&'static str, &'a [Ast]),
    Value(&'static str, Value<'a>),
}

impl Member<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            Member::Child(name, _) | Member::Children(name, _) | Member::Value(name, _) => name,
        }
    }
}

/// A mutable member of a node. Writing through a `Child` or `Children`
/// handle replaces the stored subtree.
#[derive(Debug)]
pub enum MemberMut<'a> {
    Child(&'static str, &'a mut Ast),
    Children(&'static str, &'a mut Vec<Ast>),
    Value(&'static str, Value<'a>),
}

impl MemberMut<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            MemberMut::Child(name, _)
            | MemberMut::Children(name, _)
            | MemberMut::Value(name, _) => name,
        }
    }
}

fn optional<'a>(name: &'static str, slot: &'a Option<Box<Ast>>) -> Member<'a> {
    match slot {
        Some(child) => Member::Child(name, child),
        None => Member::Value(name, Value::None),
    }
}

fn optional_mut<'a>(name: &'static str, slot: &'a mut Option<Box<Ast>>) -> MemberMut<'a> {
    match slot {
        Some(child) => MemberMut::Child(name, child.as_mut()),
        None => MemberMut::Value(name, Value::None),
    }
}

fn label(label: Option<&str>) -> Value<'_> {
    label.map_or(Value::None, Value::Text)
}

impl Ast {
    /// Members in declaration order.
    pub fn members(&self) -> Vec<Member<'_>> {
        use Member::{Child, Children};

        match self {
            Ast::Undefined | Ast::Void | Ast::Ellipsis => vec![],
            Ast::Bool(value) => vec![Member::Value("val", Value::Bool(*value))],
            Ast::Int(value) => vec![Member::Value("val", Value::Int(*value))],
            Ast::String(value) => vec![Member::Value("val", Value::Text(value))],
            Ast::Identifier(name) | Ast::PrototypeIdentifier(name) | Ast::Hashtag(name) => {
                vec![Member::Value("name", Value::Text(name))]
            }
            Ast::Type { name, parameters } => vec![
                Member::Value("name", Value::Text(name)),
                Children("parameters", parameters),
            ],
            Ast::IString(parts) => vec![Children("parts", parts)],
            Ast::Array(items)
            | Ast::Dict(items)
            | Ast::BidirDict(items)
            | Ast::ObjectLiteral(items)
            | Ast::Group(items)
            | Ast::TypeParam(items)
            | Ast::PrototypeTuple(items)
            | Ast::ListOfAsts(items) => vec![Children("items", items)],
            Ast::Block { items, new_scope } => vec![
                Member::Value("new_scope", Value::Bool(*new_scope)),
                Children("items", items),
            ],
            Ast::UnpackTarget(targets) => vec![Children("targets", targets)],
            Ast::Flow(branches) => vec![Children("branches", branches)],
            Ast::Binary { left, right, .. }
            | Ast::Index { left, right }
            | Ast::DeclareGeneric { left, right }
            | Ast::Parameterize { left, right } => {
                vec![Child("left", left), Child("right", right)]
            }
            Ast::Broadcast { op, left, right } => vec![
                Member::Value("op", Value::Symbol(op.symbol())),
                Child("left", left),
                Child("right", right),
            ],
            Ast::Prefix { operand, .. } | Ast::Postfix { operand, .. } => {
                vec![Child("operand", operand)]
            }
            Ast::If { condition, body } | Ast::Loop { condition, body } => {
                vec![Child("condition", condition), Child("body", body)]
            }
            Ast::Default(body) => vec![Child("body", body)],
            Ast::Break(name) | Ast::Continue(name) => {
                vec![Member::Value("label", label(name.as_deref()))]
            }
            Ast::Call { f, args } => vec![Child("f", f), optional("args", args)],
            Ast::Range {
                left,
                right,
                brackets,
            } => vec![
                Member::Value("brackets", Value::Symbol(brackets.as_str())),
                optional("left", left),
                optional("right", right),
            ],
            Ast::BareRange { left, right } => {
                vec![optional("left", left), optional("right", right)]
            }
            Ast::Declare { decltype, target } => vec![
                Member::Value("decltype", Value::Symbol(decltype.as_str())),
                Child("target", target),
            ],
            Ast::TypedIdentifier { id, ty } => vec![Child("id", id), Child("type", ty)],
            Ast::Express(id) => vec![Child("id", id)],
            Ast::PrototypeFunctionLiteral { args, body } => {
                vec![Child("args", args), Child("body", body)]
            }
            Ast::Juxtapose { left, right, level } => vec![
                Member::Value("level", Value::Symbol(level.as_str())),
                Child("left", left),
                Child("right", right),
            ],
        }
    }

    /// Members in declaration order, with mutable handles on children.
    pub fn members_mut(&mut self) -> Vec<MemberMut<'_>> {
        use MemberMut::{Child, Children};

        match self {
            Ast::Undefined | Ast::Void | Ast::Ellipsis => vec![],
            Ast::Bool(value) => vec![MemberMut::Value("val", Value::Bool(*value))],
            Ast::Int(value) => vec![MemberMut::Value("val", Value::Int(*value))],
            Ast::String(value) => vec![MemberMut::Value("val", Value::Text(value))],
            Ast::Identifier(name) | Ast::PrototypeIdentifier(name) | Ast::Hashtag(name) => {
                vec![MemberMut::Value("name", Value::Text(name))]
            }
            Ast::Type { name, parameters } => vec![
                MemberMut::Value("name", Value::Text(name)),
                Children("parameters", parameters),
            ],
            Ast::IString(parts) => vec![Children("parts", parts)],
            Ast::Array(items)
            | Ast::Dict(items)
            | Ast::BidirDict(items)
            | Ast::ObjectLiteral(items)
            | Ast::Group(items)
            | Ast::TypeParam(items)
            | Ast::PrototypeTuple(items)
            | Ast::ListOfAsts(items) => vec![Children("items", items)],
            Ast::Block { items, new_scope } => vec![
                MemberMut::Value("new_scope", Value::Bool(*new_scope)),
                Children("items", items),
            ],
            Ast::UnpackTarget(targets) => vec![Children("targets", targets)],
            Ast::Flow(branches) => vec![Children("branches", branches)],
            Ast::Binary { left, right, .. }
            | Ast::Index { left, right }
            | Ast::DeclareGeneric { left, right }
            | Ast::Parameterize { left, right } => {
                vec![Child("left", left.as_mut()), Child("right", right.as_mut())]
            }
            Ast::Broadcast { op, left, right } => vec![
                MemberMut::Value("op", Value::Symbol(op.symbol())),
                Child("left", left.as_mut()),
                Child("right", right.as_mut()),
            ],
            Ast::Prefix { operand, .. } | Ast::Postfix { operand, .. } => {
                vec![Child("operand", operand.as_mut())]
            }
            Ast::If { condition, body } | Ast::Loop { condition, body } => vec![
                Child("condition", condition.as_mut()),
                Child("body", body.as_mut()),
            ],
            Ast::Default(body) => vec![Child("body", body.as_mut())],
            Ast::Break(name) | Ast::Continue(name) => {
                vec![MemberMut::Value("label", label(name.as_deref()))]
            }
            Ast::Call { f, args } => vec![Child("f", f.as_mut()), optional_mut("args", args)],
            Ast::Range {
                left,
                right,
                brackets,
            } => vec![
                MemberMut::Value("brackets", Value::Symbol(brackets.as_str())),
                optional_mut("left", left),
                optional_mut("right", right),
            ],
            Ast::BareRange { left, right } => {
                vec![optional_mut("left", left), optional_mut("right", right)]
            }
            Ast::Declare { decltype, target } => vec![
                MemberMut::Value("decltype", Value::Symbol(decltype.as_str())),
                Child("target", target.as_mut()),
            ],
            Ast::TypedIdentifier { id, ty } => {
                vec![Child("id", id.as_mut()), Child("type", ty.as_mut())]
            }
            Ast::Express(id) => vec![Child("id", id.as_mut())],
            Ast::PrototypeFunctionLiteral { args, body } => {
                vec![Child("args", args.as_mut()), Child("body", body.as_mut())]
            }
            Ast::Juxtapose { left, right, level } => vec![
                MemberMut::Value("level", Value::Symbol(level.as_str())),
                Child("left", left.as_mut()),
                Child("right", right.as_mut()),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinaryOp, JuxLevel, RangeBrackets};

    #[test]
    fn binary_members_are_left_then_right() {
        let ast = Ast::binary(BinaryOp::Sub, Ast::int(3), Ast::int(4));
        let names: Vec<_> = ast.members().iter().map(Member::name).collect();
        assert_eq!(names, ["left", "right"]);
    }

    #[test]
    fn absent_optional_children_are_values() {
        let ast = Ast::range(Some(Ast::int(0)), None, RangeBrackets::ClosedOpen);
        let members = ast.members();
        assert!(matches!(members[0], Member::Value("brackets", Value::Symbol("[)"))));
        assert!(matches!(members[1], Member::Child("left", Ast::Int(0))));
        assert!(matches!(members[2], Member::Value("right", Value::None)));
    }

    #[test]
    fn replacing_through_a_handle_writes_back_and_continues() {
        let mut ast = Ast::juxtapose(Ast::ident("f"), Ast::ident("x"), JuxLevel::Multiply);
        let mut seen = Vec::new();
        for member in ast.members_mut() {
            seen.push(member.name());
            if let MemberMut::Child("left", child) = member {
                *child = Ast::ident("g");
            }
        }
        assert_eq!(seen, ["level", "left", "right"]);
        assert_eq!(
            ast,
            Ast::juxtapose(Ast::ident("g"), Ast::ident("x"), JuxLevel::Multiply)
        );
    }

    #[test]
    fn container_handles_allow_item_replacement() {
        let mut ast = Ast::Array(vec![Ast::int(1), Ast::int(2)]);
        for member in ast.members_mut() {
            if let MemberMut::Children(_, items) = member {
                items[1] = Ast::ident("two");
            }
        }
        assert_eq!(ast, Ast::Array(vec![Ast::int(1), Ast::ident("two")]));
    }

    #[test]
    fn broadcast_lists_its_operator_first() {
        let ast = Ast::broadcast(BinaryOp::Mul, Ast::ident("a"), Ast::ident("b"));
        let members = ast.members();
        assert!(matches!(members[0], Member::Value("op", Value::Symbol("*"))));
        assert_eq!(ast.children(), vec![&Ast::ident("a"), &Ast::ident("b")]);
    }

    #[test]
    fn value_display() {
        assert_eq!(Value::Text("abc").to_string(), "abc");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::None.to_string(), "none");
    }
}
