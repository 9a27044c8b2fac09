//! Connective binding strengths.

use sprig_ast::{BinaryOp, JuxLevel};
use sprig_lexer::{Operator, ShiftOp};

/// Operator associativity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Assoc {
    Left,
    Right,
}

/// A connective between two operands of a chain, after normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Connective {
    Binary(Operator),
    /// Element-wise form of a binary operator; binds like the operator.
    Broadcast(Operator),
    Shift(ShiftOp),
    Juxtapose(JuxLevel),
    /// N-ary: every comma at one level forms a single tuple.
    Comma,
    /// `..`, at most one per level.
    RangeDot,
}

impl Connective {
    /// Binding strength and associativity; higher binds tighter.
    ///
    /// This is the single source of truth for how chains split.
    pub fn binding(self) -> (u8, Assoc) {
        use Operator::*;

        match self {
            Connective::Broadcast(op) => Connective::Binary(op).binding(),
            Connective::Binary(Dot) => (150, Assoc::Left),
            Connective::Binary(Colon) => (140, Assoc::Left),
            Connective::Juxtapose(JuxLevel::Call) => (130, Assoc::Left),
            Connective::Binary(Caret) => (120, Assoc::Right),
            Connective::Juxtapose(JuxLevel::Multiply) => (110, Assoc::Left),
            Connective::Binary(Star | Slash | IntDivide | Percent) => (100, Assoc::Left),
            Connective::Binary(Plus | Minus) => (90, Assoc::Left),
            Connective::Shift(_) => (80, Assoc::Left),
            Connective::Comma => (70, Assoc::Left),
            Connective::RangeDot => (60, Assoc::Left),
            Connective::Binary(Equal | Less | LessEqual | Greater | GreaterEqual | In | InQuery) => {
                (50, Assoc::Left)
            }
            Connective::Binary(And | Nand) => (40, Assoc::Left),
            Connective::Binary(Or | Xor | Nor | Xnor) => (30, Assoc::Left),
            Connective::Binary(Arrow | BiArrow) => (20, Assoc::Left),
            Connective::Binary(ReturnArrow) => (15, Assoc::Left),
            Connective::Binary(FatArrow) => (10, Assoc::Right),
            Connective::Binary(Assign) => (5, Assoc::Right),
            // prefix/postfix-only operators are never connectives
            Connective::Binary(Not | At | Ellipsis | Backtick | Semicolon) => (0, Assoc::Left),
        }
    }

    pub fn strength(self) -> u8 {
        self.binding().0
    }
}

/// AST operator for a binary operator token, where there is a plain one.
/// `=>` has none since it builds a function literal.
pub(super) fn binary_op(op: Operator) -> Option<BinaryOp> {
    use Operator::*;

    Some(match op {
        Plus => BinaryOp::Add,
        Minus => BinaryOp::Sub,
        Star => BinaryOp::Mul,
        Slash => BinaryOp::Div,
        IntDivide => BinaryOp::IDiv,
        Percent => BinaryOp::Mod,
        Caret => BinaryOp::Pow,
        Assign => BinaryOp::Assign,
        Equal => BinaryOp::Equal,
        Less => BinaryOp::Less,
        LessEqual => BinaryOp::LessEqual,
        Greater => BinaryOp::Greater,
        GreaterEqual => BinaryOp::GreaterEqual,
        Arrow => BinaryOp::PointsTo,
        BiArrow => BinaryOp::BidirPointsTo,
        ReturnArrow => BinaryOp::ReturnTyped,
        Dot => BinaryOp::Access,
        Colon => BinaryOp::TypeAnnotation,
        And => BinaryOp::And,
        Or => BinaryOp::Or,
        Xor => BinaryOp::Xor,
        Nand => BinaryOp::Nand,
        Nor => BinaryOp::Nor,
        Xnor => BinaryOp::Xnor,
        In => BinaryOp::IterIn,
        InQuery => BinaryOp::MemberIn,
        FatArrow | Not | At | Ellipsis | Backtick | Semicolon => return None,
    })
}

pub(super) fn shift_op(op: ShiftOp) -> BinaryOp {
    match op {
        ShiftOp::Left => BinaryOp::LeftShift,
        ShiftOp::Right => BinaryOp::RightShift,
        ShiftOp::RotateLeft => BinaryOp::LeftRotate,
        ShiftOp::RotateRight => BinaryOp::RightRotate,
        ShiftOp::RotateLeftCarry => BinaryOp::LeftRotateCarry,
        ShiftOp::RotateRightCarry => BinaryOp::RightRotateCarry,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn call_binds_tighter_than_power_which_beats_multiplication() {
        let call = Connective::Juxtapose(JuxLevel::Call).strength();
        let pow = Connective::Binary(Operator::Caret).strength();
        let mul_jux = Connective::Juxtapose(JuxLevel::Multiply).strength();
        let mul = Connective::Binary(Operator::Star).strength();
        assert!(call > pow && pow > mul_jux && mul_jux > mul);
    }

    #[test]
    fn list_forming_connectives_sit_between_shifts_and_comparisons() {
        let shift = Connective::Shift(ShiftOp::Left).strength();
        let comma = Connective::Comma.strength();
        let range = Connective::RangeDot.strength();
        let cmp = Connective::Binary(Operator::Equal).strength();
        assert!(shift > comma && comma > range && range > cmp);
    }

    #[test]
    fn assignment_and_power_are_right_associative() {
        assert_eq!(Connective::Binary(Operator::Assign).binding().1, Assoc::Right);
        assert_eq!(Connective::Binary(Operator::Caret).binding().1, Assoc::Right);
        assert_eq!(Connective::Binary(Operator::Minus).binding().1, Assoc::Left);
    }

    #[test]
    fn broadcast_binds_like_its_operator() {
        for op in [Operator::Plus, Operator::Star, Operator::Caret, Operator::Less] {
            assert_eq!(Connective::Broadcast(op).binding(), Connective::Binary(op).binding());
        }
    }

    #[test]
    fn every_binary_operator_token_maps_or_is_special() {
        for op in Operator::ALL.into_iter().filter(|op| op.is_binary()) {
            assert!(
                binary_op(op).is_some() || op == Operator::FatArrow,
                "{op:?} has no AST operator"
            );
            assert!(Connective::Binary(op).strength() > 0);
        }
    }
}
