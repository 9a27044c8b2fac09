//! AST node model.
//!
//! The tree is a single closed enum. Parsing produces it in two phases of
//! completeness: nodes whose meaning is fixed, and *prototype* nodes that
//! only record what was written and wait for a later pass to replace them
//! (a comma list that may become a tuple or an argument list, a
//! juxtaposition that may be a call or a multiplication). A tree is
//! [settled](Ast::is_settled) once no prototypes remain.
//!
//! # Modules
//!
//! - `ops` - operator and tag enums carried by nodes
//! - `render` - canonical source rendering (`Display`)
//! - `tree` - indented tree debug form
//! - `members` - named member enumeration with in-place replacement
//! - `walk` - whole-tree traversal built on member enumeration

mod members;
mod ops;
mod render;
mod tree;
pub mod walk;

pub use members::{Member, MemberMut, Value};
pub use ops::{BinaryOp, DeclarationType, JuxLevel, PostfixOp, PrefixOp, RangeBrackets};
pub use tree::TreeDisplay;

use serde::{Deserialize, Serialize};

/// A syntax tree node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Ast {
    // === Literals ===
    Undefined,
    Void,
    /// A bare `...` placeholder.
    Ellipsis,
    Bool(bool),
    Int(i128),
    String(String),
    /// Interpolated string: text parts are `String` nodes, the rest are
    /// the interpolated expressions.
    IString(Vec<Ast>),
    Identifier(String),
    Hashtag(String),
    /// A named type with optional parameters.
    Type {
        name: String,
        parameters: Vec<Ast>,
    },

    // === Composite literals ===
    Array(Vec<Ast>),
    /// `[k -> v ...]`
    Dict(Vec<Ast>),
    /// `[k <-> v ...]`
    BidirDict(Vec<Ast>),
    /// `[let a = 1 b = 2]`
    ObjectLiteral(Vec<Ast>),
    /// `(a b c)`
    Group(Vec<Ast>),
    /// `{a b c}`. `new_scope` is set for the program root and `{{...}}`.
    Block {
        items: Vec<Ast>,
        new_scope: bool,
    },
    /// `<a b>`
    TypeParam(Vec<Ast>),

    // === Operators ===
    Binary {
        op: BinaryOp,
        left: Box<Ast>,
        right: Box<Ast>,
    },
    /// `a .+ b`, the operator applied element-wise.
    Broadcast {
        op: BinaryOp,
        left: Box<Ast>,
        right: Box<Ast>,
    },
    Prefix {
        op: PrefixOp,
        operand: Box<Ast>,
    },
    Postfix {
        op: PostfixOp,
        operand: Box<Ast>,
    },

    // === Control flow ===
    /// `if a b else if c d else e` as one ordered list of branches.
    Flow(Vec<Ast>),
    If {
        condition: Box<Ast>,
        body: Box<Ast>,
    },
    Loop {
        condition: Box<Ast>,
        body: Box<Ast>,
    },
    /// Trailing `else` branch of a flow.
    Default(Box<Ast>),
    Break(Option<String>),
    Continue(Option<String>),

    // === Application ===
    /// `f()` has no arguments at all, as opposed to `f(void)`.
    Call {
        f: Box<Ast>,
        args: Option<Box<Ast>>,
    },
    /// `a[0..10)`
    Index {
        left: Box<Ast>,
        right: Box<Ast>,
    },
    Range {
        left: Option<Box<Ast>>,
        right: Option<Box<Ast>>,
        brackets: RangeBrackets,
    },
    /// `<T>f`
    DeclareGeneric {
        left: Box<Ast>,
        right: Box<Ast>,
    },
    /// `f<T>`
    Parameterize {
        left: Box<Ast>,
        right: Box<Ast>,
    },

    // === Declarations ===
    Declare {
        decltype: DeclarationType,
        target: Box<Ast>,
    },
    /// `a:T`
    TypedIdentifier {
        id: Box<Ast>,
        ty: Box<Ast>,
    },
    /// `[a b] = ...`
    UnpackTarget(Vec<Ast>),
    Express(Box<Ast>),

    // === Prototypes ===
    PrototypeIdentifier(String),
    /// `a, b, c` before it is known to be a tuple or an argument list.
    PrototypeTuple(Vec<Ast>),
    ListOfAsts(Vec<Ast>),
    /// `args => body`
    PrototypeFunctionLiteral {
        args: Box<Ast>,
        body: Box<Ast>,
    },
    /// `a..b` outside range brackets.
    BareRange {
        left: Option<Box<Ast>>,
        right: Option<Box<Ast>>,
    },
    /// `f x`, call or multiplication still to be decided.
    Juxtapose {
        left: Box<Ast>,
        right: Box<Ast>,
        level: JuxLevel,
    },
}

impl Ast {
    pub fn ident(name: impl Into<String>) -> Self {
        Ast::Identifier(name.into())
    }

    pub fn int(value: i128) -> Self {
        Ast::Int(value)
    }

    pub fn string(value: impl Into<String>) -> Self {
        Ast::String(value.into())
    }

    pub fn binary(op: BinaryOp, left: Ast, right: Ast) -> Self {
        Ast::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn broadcast(op: BinaryOp, left: Ast, right: Ast) -> Self {
        Ast::Broadcast {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn prefix(op: PrefixOp, operand: Ast) -> Self {
        Ast::Prefix {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn postfix(op: PostfixOp, operand: Ast) -> Self {
        Ast::Postfix {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn juxtapose(left: Ast, right: Ast, level: JuxLevel) -> Self {
        Ast::Juxtapose {
            left: Box::new(left),
            right: Box::new(right),
            level,
        }
    }

    pub fn range(left: Option<Ast>, right: Option<Ast>, brackets: RangeBrackets) -> Self {
        Ast::Range {
            left: left.map(Box::new),
            right: right.map(Box::new),
            brackets,
        }
    }

    pub fn bare_range(left: Option<Ast>, right: Option<Ast>) -> Self {
        Ast::BareRange {
            left: left.map(Box::new),
            right: right.map(Box::new),
        }
    }

    /// Node type name, as shown by the tree debug form.
    pub fn name(&self) -> &'static str {
        match self {
            Ast::Undefined => "Undefined",
            Ast::Void => "Void",
            Ast::Ellipsis => "Ellipsis",
            Ast::Bool(_) => "Bool",
            Ast::Int(_) => "Int",
            Ast::String(_) => "String",
            Ast::IString(_) => "IString",
            Ast::Identifier(_) => "Identifier",
            Ast::Hashtag(_) => "Hashtag",
            Ast::Type { .. } => "Type",
            Ast::Array(_) => "Array",
            Ast::Dict(_) => "Dict",
            Ast::BidirDict(_) => "BidirDict",
            Ast::ObjectLiteral(_) => "ObjectLiteral",
            Ast::Group(_) => "Group",
            Ast::Block { .. } => "Block",
            Ast::TypeParam(_) => "TypeParam",
            Ast::Binary { op, .. } => op.name(),
            Ast::Broadcast { .. } => "Broadcast",
            Ast::Prefix { op, .. } => op.name(),
            Ast::Postfix { op, .. } => op.name(),
            Ast::Flow(_) => "Flow",
            Ast::If { .. } => "If",
            Ast::Loop { .. } => "Loop",
            Ast::Default(_) => "Default",
            Ast::Break(_) => "Break",
            Ast::Continue(_) => "Continue",
            Ast::Call { .. } => "Call",
            Ast::Index { .. } => "Index",
            Ast::Range { .. } => "Range",
            Ast::DeclareGeneric { .. } => "DeclareGeneric",
            Ast::Parameterize { .. } => "Parameterize",
            Ast::Declare { .. } => "Declare",
            Ast::TypedIdentifier { .. } => "TypedIdentifier",
            Ast::UnpackTarget(_) => "UnpackTarget",
            Ast::Express(_) => "Express",
            Ast::PrototypeIdentifier(_) => "PrototypeIdentifier",
            Ast::PrototypeTuple(_) => "PrototypeTuple",
            Ast::ListOfAsts(_) => "ListOfAsts",
            Ast::PrototypeFunctionLiteral { .. } => "PrototypeFunctionLiteral",
            Ast::BareRange { .. } => "BareRange",
            Ast::Juxtapose { .. } => "Juxtapose",
        }
    }

    /// Parse-time placeholder that a later pass must replace.
    pub fn is_prototype(&self) -> bool {
        matches!(
            self,
            Ast::PrototypeIdentifier(_)
                | Ast::PrototypeTuple(_)
                | Ast::ListOfAsts(_)
                | Ast::PrototypeFunctionLiteral { .. }
                | Ast::BareRange { .. }
                | Ast::Juxtapose { .. }
        )
    }

    /// Rendering already supplies its own enclosing punctuation.
    pub fn is_delimited(&self) -> bool {
        matches!(
            self,
            Ast::String(_)
                | Ast::IString(_)
                | Ast::Group(_)
                | Ast::Block { .. }
                | Ast::Array(_)
                | Ast::Dict(_)
                | Ast::BidirDict(_)
                | Ast::ObjectLiteral(_)
                | Ast::TypeParam(_)
                | Ast::UnpackTarget(_)
                | Ast::Range { .. }
        )
    }

    /// True when neither this node nor any descendant is a prototype.
    pub fn is_settled(&self) -> bool {
        !self.is_prototype() && self.children().into_iter().all(Ast::is_settled)
    }

    /// Direct AST children in member order.
    pub fn children(&self) -> Vec<&Ast> {
        let mut children = Vec::new();
        for member in self.members() {
            match member {
                Member::Child(_, child) => children.push(child),
                Member::Children(_, items) => children.extend(items),
                Member::Value(..) => {}
            }
        }
        children
    }
}
