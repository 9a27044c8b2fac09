//! Operator and tag types carried by AST nodes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Binary operators.
///
/// Each operator has a fixed source symbol and a flag for whether it is
/// rendered with spaces around it. Only `.` and `:` render tight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    // Structure
    /// `a = b`
    Assign,
    /// `a -> b`
    PointsTo,
    /// `a <-> b`
    BidirPointsTo,
    /// `a.b`
    Access,
    /// `a:b` where `a` is not a plain identifier
    TypeAnnotation,
    /// `a :> b`
    ReturnTyped,

    // Comparison
    /// `a =? b`
    Equal,
    /// `a <? b`
    Less,
    /// `a <=? b`
    LessEqual,
    /// `a >? b`
    Greater,
    /// `a >=? b`
    GreaterEqual,

    // Shifts
    LeftShift,
    RightShift,
    LeftRotate,
    RightRotate,
    LeftRotateCarry,
    RightRotateCarry,

    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    /// `÷`
    IDiv,
    Mod,
    Pow,

    // Logical
    And,
    Or,
    Xor,
    Nand,
    Nor,
    Xnor,

    // Membership
    /// `a in b`
    IterIn,
    /// `a in? b`
    MemberIn,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Assign => "=",
            Self::PointsTo => "->",
            Self::BidirPointsTo => "<->",
            Self::Access => ".",
            Self::TypeAnnotation => ":",
            Self::ReturnTyped => ":>",
            Self::Equal => "=?",
            Self::Less => "<?",
            Self::LessEqual => "<=?",
            Self::Greater => ">?",
            Self::GreaterEqual => ">=?",
            Self::LeftShift => "<<",
            Self::RightShift => ">>",
            Self::LeftRotate => "<<<",
            Self::RightRotate => ">>>",
            Self::LeftRotateCarry => "<<!",
            Self::RightRotateCarry => "!>>",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::IDiv => "÷",
            Self::Mod => "%",
            Self::Pow => "^",
            Self::And => "and",
            Self::Or => "or",
            Self::Xor => "xor",
            Self::Nand => "nand",
            Self::Nor => "nor",
            Self::Xnor => "xnor",
            Self::IterIn => "in",
            Self::MemberIn => "in?",
        }
    }

    /// Whether the canonical rendering puts spaces around the symbol.
    pub fn spaced(self) -> bool {
        !matches!(self, Self::Access | Self::TypeAnnotation)
    }

    /// Node name used by the tree debug form.
    pub fn name(self) -> &'static str {
        match self {
            Self::Assign => "Assign",
            Self::PointsTo => "PointsTo",
            Self::BidirPointsTo => "BidirPointsTo",
            Self::Access => "Access",
            Self::TypeAnnotation => "TypeAnnotation",
            Self::ReturnTyped => "ReturnTyped",
            Self::Equal => "Equal",
            Self::Less => "Less",
            Self::LessEqual => "LessEqual",
            Self::Greater => "Greater",
            Self::GreaterEqual => "GreaterEqual",
            Self::LeftShift => "LeftShift",
            Self::RightShift => "RightShift",
            Self::LeftRotate => "LeftRotate",
            Self::RightRotate => "RightRotate",
            Self::LeftRotateCarry => "LeftRotateCarry",
            Self::RightRotateCarry => "RightRotateCarry",
            Self::Add => "Add",
            Self::Sub => "Sub",
            Self::Mul => "Mul",
            Self::Div => "Div",
            Self::IDiv => "IDiv",
            Self::Mod => "Mod",
            Self::Pow => "Pow",
            Self::And => "And",
            Self::Or => "Or",
            Self::Xor => "Xor",
            Self::Nand => "Nand",
            Self::Nor => "Nor",
            Self::Xnor => "Xnor",
            Self::IterIn => "IterIn",
            Self::MemberIn => "MemberIn",
        }
    }

    /// Binds tighter than a juxtaposition grouped at `level`, so a node
    /// built from it can be that juxtaposition's left operand unparenthesized.
    pub fn binds_tighter_than_juxtaposition(self, level: JuxLevel) -> bool {
        match self {
            Self::Access | Self::TypeAnnotation => true,
            Self::Pow => level == JuxLevel::Multiply,
            _ => false,
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrefixOp {
    /// `not x`
    Not,
    /// `-x`
    UnaryNeg,
    /// `+x`
    UnaryPos,
    /// `*x`
    UnaryMul,
    /// `/x`
    UnaryDiv,
    /// `@x`, a reference to `x` rather than its value
    AtHandle,
    /// `...x`
    Spread,
}

impl PrefixOp {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Not => "not",
            Self::UnaryNeg => "-",
            Self::UnaryPos => "+",
            Self::UnaryMul => "*",
            Self::UnaryDiv => "/",
            Self::AtHandle => "@",
            Self::Spread => "...",
        }
    }

    pub fn spaced(self) -> bool {
        matches!(self, Self::Not)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Not => "Not",
            Self::UnaryNeg => "UnaryNeg",
            Self::UnaryPos => "UnaryPos",
            Self::UnaryMul => "UnaryMul",
            Self::UnaryDiv => "UnaryDiv",
            Self::AtHandle => "AtHandle",
            Self::Spread => "Spread",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PostfixOp {
    /// `` x` ``
    RollAxes,
    /// `x;`, evaluates `x` without producing its value
    Suppress,
}

impl PostfixOp {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::RollAxes => "`",
            Self::Suppress => ";",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::RollAxes => "RollAxes",
            Self::Suppress => "Suppress",
        }
    }
}

/// Precedence level a juxtaposition was grouped at.
///
/// Whether a juxtaposition is a call or a multiplication is not decided
/// while parsing; the level only records how it was grouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JuxLevel {
    Call,
    Multiply,
}

impl JuxLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Call => "call",
            Self::Multiply => "multiply",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeclarationType {
    Let,
    Const,
}

impl DeclarationType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Let => "let",
            Self::Const => "const",
        }
    }
}

/// The literal bracket pair a range was written with.
///
/// `[` and `]` include the bound, `(` and `)` exclude it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RangeBrackets {
    /// `[a..b]`
    Closed,
    /// `[a..b)`
    ClosedOpen,
    /// `(a..b]`
    OpenClosed,
    /// `(a..b)`
    Open,
}

impl RangeBrackets {
    /// Maps a delimiter pair onto a bracket kind. Only `(`/`[` openers and
    /// `)`/`]` closers form ranges.
    pub fn from_delimiters(left: char, right: char) -> Option<Self> {
        match (left, right) {
            ('[', ']') => Some(Self::Closed),
            ('[', ')') => Some(Self::ClosedOpen),
            ('(', ']') => Some(Self::OpenClosed),
            ('(', ')') => Some(Self::Open),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Closed => "[]",
            Self::ClosedOpen => "[)",
            Self::OpenClosed => "(]",
            Self::Open => "()",
        }
    }

    pub fn left(self) -> char {
        match self {
            Self::Closed | Self::ClosedOpen => '[',
            Self::OpenClosed | Self::Open => '(',
        }
    }

    pub fn right(self) -> char {
        match self {
            Self::Closed | Self::OpenClosed => ']',
            Self::ClosedOpen | Self::Open => ')',
        }
    }
}

impl fmt::Display for RangeBrackets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_access_and_annotation_render_tight() {
        assert!(!BinaryOp::Access.spaced());
        assert!(!BinaryOp::TypeAnnotation.spaced());
        assert!(BinaryOp::Add.spaced());
        assert!(BinaryOp::Assign.spaced());
    }

    #[test]
    fn range_brackets_round_trip_their_delimiters() {
        for (l, r) in [('[', ']'), ('[', ')'), ('(', ']'), ('(', ')')] {
            let brackets = RangeBrackets::from_delimiters(l, r).unwrap();
            assert_eq!((brackets.left(), brackets.right()), (l, r));
        }
        assert_eq!(RangeBrackets::from_delimiters('{', '}'), None);
        assert_eq!(RangeBrackets::ClosedOpen.to_string(), "[)");
    }
}
