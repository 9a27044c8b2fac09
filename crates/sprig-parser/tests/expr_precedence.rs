//! Expression precedence and associativity tests.
//!
//! Chains split at their weakest-binding connective. Strongest first:
//!
//! `.`  `:`  call-juxtaposition  `^`  multiply-juxtaposition  `* / ÷ %`
//! `+ -`  shifts  `,`  `..`  comparisons  `and nand`  `or xor nor xnor`
//! `-> <->`  `:>`  `=>`  `=`
//!
//! Ties group to the left except for `^`, `=>` and `=`.

use sprig_ast::{Ast, BinaryOp, JuxLevel, PrefixOp};
use sprig_parser::parse;

/// Helper to parse source holding exactly one expression.
fn parse_expr(source: &str) -> Ast {
    let tokens = sprig_lexer::lex(source).expect("Lex failed");
    match parse(tokens).expect("Parse failed") {
        Ast::Block { mut items, .. } if items.len() == 1 => items.remove(0),
        other => panic!("expected one expression in {source:?}, got {other:?}"),
    }
}

/// Helper to check the operator of a binary node.
fn is_binary(ast: &Ast, expected: BinaryOp) -> bool {
    matches!(ast, Ast::Binary { op, .. } if *op == expected)
}

/// Helper to get left and right operands of a binary node.
fn operands(ast: &Ast) -> (&Ast, &Ast) {
    match ast {
        Ast::Binary { left, right, .. } => (left, right),
        other => panic!("binary expected, got {other:?}"),
    }
}

// =============================================================================
// Arithmetic
// =============================================================================

#[test]
fn test_multiplication_binds_tighter_than_addition() {
    let ast = parse_expr("a + b * c");
    assert!(is_binary(&ast, BinaryOp::Add));
    let (left, right) = operands(&ast);
    assert_eq!(*left, Ast::ident("a"));
    assert!(is_binary(right, BinaryOp::Mul));

    let ast = parse_expr("a * b + c");
    assert!(is_binary(&ast, BinaryOp::Add));
    assert!(is_binary(operands(&ast).0, BinaryOp::Mul));
}

#[test]
fn test_subtraction_left_associative() {
    // a - b - c should parse as: (a - b) - c
    let ast = parse_expr("a - b - c");
    assert!(is_binary(&ast, BinaryOp::Sub));
    let (left, right) = operands(&ast);
    assert!(is_binary(left, BinaryOp::Sub));
    assert_eq!(*right, Ast::ident("c"));
}

#[test]
fn test_power_right_associative() {
    // a ^ b ^ c should parse as: a ^ (b ^ c)
    let ast = parse_expr("a ^ b ^ c");
    let (left, right) = operands(&ast);
    assert_eq!(*left, Ast::ident("a"));
    assert!(is_binary(right, BinaryOp::Pow));
}

#[test]
fn test_integer_division_and_modulo_share_a_level() {
    let ast = parse_expr("a ÷ b % c");
    assert!(is_binary(&ast, BinaryOp::Mod));
    assert!(is_binary(operands(&ast).0, BinaryOp::IDiv));
}

#[test]
fn test_prefix_binds_to_its_atom() {
    let ast = parse_expr("-x ^ 2");
    assert!(is_binary(&ast, BinaryOp::Pow));
    assert!(matches!(
        operands(&ast).0,
        Ast::Prefix {
            op: PrefixOp::UnaryNeg,
            ..
        }
    ));

    let ast = parse_expr("not a and b");
    assert!(is_binary(&ast, BinaryOp::And));
    assert!(matches!(operands(&ast).0, Ast::Prefix { op: PrefixOp::Not, .. }));
}

// =============================================================================
// Juxtaposition
// =============================================================================

#[test]
fn test_call_juxtaposition_beats_power() {
    // f(x)^2 should parse as: (f(x)) ^ 2
    let ast = parse_expr("f(x)^2");
    assert!(is_binary(&ast, BinaryOp::Pow));
    assert_eq!(
        *operands(&ast).0,
        Ast::juxtapose(Ast::ident("f"), Ast::ident("x"), JuxLevel::Call)
    );
}

#[test]
fn test_power_beats_multiply_juxtaposition() {
    // 2x^2 should parse as: 2 (x ^ 2)
    let ast = parse_expr("2x^2");
    let Ast::Juxtapose { left, right, level } = &ast else {
        panic!("juxtapose expected, got {ast:?}");
    };
    assert_eq!(*level, JuxLevel::Multiply);
    assert_eq!(**left, Ast::int(2));
    assert!(is_binary(right, BinaryOp::Pow));
}

#[test]
fn test_multiply_juxtaposition_beats_explicit_multiplication() {
    // a * 2b should parse as: a * (2 b)
    let ast = parse_expr("a * 2b");
    assert!(is_binary(&ast, BinaryOp::Mul));
    assert!(matches!(
        operands(&ast).1,
        Ast::Juxtapose {
            level: JuxLevel::Multiply,
            ..
        }
    ));
}

#[test]
fn test_access_beats_call() {
    // a.b(c) should parse as: (a.b)(c)
    let ast = parse_expr("a.b(c)");
    let Ast::Juxtapose { left, level, .. } = &ast else {
        panic!("juxtapose expected, got {ast:?}");
    };
    assert_eq!(*level, JuxLevel::Call);
    assert!(is_binary(left, BinaryOp::Access));
}

#[test]
fn test_chained_calls_group_left() {
    // f(a)(b) should parse as: (f(a))(b)
    let ast = parse_expr("f(a)(b)");
    let Ast::Juxtapose { left, right, .. } = &ast else {
        panic!("juxtapose expected, got {ast:?}");
    };
    assert!(matches!(**left, Ast::Juxtapose { .. }));
    assert_eq!(**right, Ast::ident("b"));
}

#[test]
fn test_space_separates_expressions() {
    let tokens = sprig_lexer::lex("f (x)").unwrap();
    let Ast::Block { items, .. } = parse(tokens).unwrap() else {
        panic!("root block expected");
    };
    assert_eq!(items, vec![Ast::ident("f"), Ast::ident("x")]);
}

// =============================================================================
// Lists, ranges and shifts
// =============================================================================

#[test]
fn test_comma_builds_one_tuple() {
    let ast = parse_expr("a, b + 1, c");
    let Ast::PrototypeTuple(items) = &ast else {
        panic!("tuple expected, got {ast:?}");
    };
    assert_eq!(items.len(), 3);
    assert!(is_binary(&items[1], BinaryOp::Add));
}

#[test]
fn test_assignment_is_weaker_than_comma() {
    // a, b = c, d should parse as: (a, b) = (c, d)
    let ast = parse_expr("a, b = c, d");
    assert!(is_binary(&ast, BinaryOp::Assign));
    let (left, right) = operands(&ast);
    assert!(matches!(left, Ast::PrototypeTuple(items) if items.len() == 2));
    assert!(matches!(right, Ast::PrototypeTuple(items) if items.len() == 2));
}

#[test]
fn test_range_is_weaker_than_addition() {
    // 0..n + 1 should parse as: 0..(n + 1)
    let ast = parse_expr("0..n + 1");
    let Ast::BareRange {
        left: Some(left),
        right: Some(right),
    } = &ast
    else {
        panic!("bare range expected, got {ast:?}");
    };
    assert_eq!(**left, Ast::int(0));
    assert!(is_binary(right, BinaryOp::Add));
}

#[test]
fn test_range_is_stronger_than_membership() {
    // x in 0..10 should parse as: x in (0..10)
    let ast = parse_expr("x in 0..10");
    assert!(is_binary(&ast, BinaryOp::IterIn));
    assert!(matches!(operands(&ast).1, Ast::BareRange { .. }));
}

#[test]
fn test_shift_is_weaker_than_addition() {
    let ast = parse_expr("x << 2 + 1");
    assert!(is_binary(&ast, BinaryOp::LeftShift));
    assert!(is_binary(operands(&ast).1, BinaryOp::Add));

    let ast = parse_expr("x !>> y");
    assert!(is_binary(&ast, BinaryOp::RightRotateCarry));
}

// =============================================================================
// Logic, arrows and assignment
// =============================================================================

#[test]
fn test_or_vs_and() {
    // a or b and c should parse as: a or (b and c)
    let ast = parse_expr("a or b and c");
    assert!(is_binary(&ast, BinaryOp::Or));
    assert!(is_binary(operands(&ast).1, BinaryOp::And));
}

#[test]
fn test_comparison_beats_logic() {
    let ast = parse_expr("a =? b or x in? xs");
    assert!(is_binary(&ast, BinaryOp::Or));
    let (left, right) = operands(&ast);
    assert!(is_binary(left, BinaryOp::Equal));
    assert!(is_binary(right, BinaryOp::MemberIn));
}

#[test]
fn test_arrows_are_weaker_than_logic() {
    let ast = parse_expr("a and b -> c");
    assert!(is_binary(&ast, BinaryOp::PointsTo));
    assert!(is_binary(operands(&ast).0, BinaryOp::And));
}

#[test]
fn test_function_literal_and_return_type() {
    let ast = parse_expr("x => x + 1");
    let Ast::PrototypeFunctionLiteral { args, body } = &ast else {
        panic!("function literal expected, got {ast:?}");
    };
    assert_eq!(**args, Ast::ident("x"));
    assert!(is_binary(body, BinaryOp::Add));

    // f = (x:int) :> int => x should parse as: f = (((x:int) :> int) => x)
    let ast = parse_expr("f = (x:int) :> int => x");
    assert!(is_binary(&ast, BinaryOp::Assign));
    let Ast::PrototypeFunctionLiteral { args, .. } = operands(&ast).1 else {
        panic!("function literal expected");
    };
    assert!(is_binary(args, BinaryOp::ReturnTyped));
}

#[test]
fn test_assignment_right_associative() {
    // a = b = c should parse as: a = (b = c)
    let ast = parse_expr("a = b = c");
    let (left, right) = operands(&ast);
    assert_eq!(*left, Ast::ident("a"));
    assert!(is_binary(right, BinaryOp::Assign));
}

#[test]
fn test_typed_identifier() {
    let ast = parse_expr("x:int = 5");
    assert!(is_binary(&ast, BinaryOp::Assign));
    assert_eq!(
        *operands(&ast).0,
        Ast::TypedIdentifier {
            id: Box::new(Ast::ident("x")),
            ty: Box::new(Ast::ident("int")),
        }
    );

    // only identifiers become typed identifiers
    let ast = parse_expr("a.b:int");
    assert!(is_binary(&ast, BinaryOp::TypeAnnotation));
}

#[test]
fn test_access_left_associative() {
    let ast = parse_expr("a.b.c");
    assert!(is_binary(&ast, BinaryOp::Access));
    assert!(is_binary(operands(&ast).0, BinaryOp::Access));
    assert_eq!(ast.to_string(), "a.b.c");
}
