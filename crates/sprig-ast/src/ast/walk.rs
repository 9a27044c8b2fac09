//! Whole-tree traversal.
//!
//! # Design
//!
//! - **Closures, not a visitor trait** - passes supply an `FnMut` and own
//!   their state
//! - **Pre-order** - a node is visited before its children
//! - **Replacement in place** - [`walk_replace`] lets a pass substitute any
//!   descendant while walking; traversal then continues into the
//!   substitute's children, never the discarded original's
//!
//! # Examples
//!
//! ```
//! use sprig_ast::{Ast, JuxLevel, walk::walk_replace};
//!
//! // Resolve every juxtaposition as a multiplication
//! let mut tree = Ast::Group(vec![Ast::juxtapose(Ast::int(2), Ast::ident("x"), JuxLevel::Multiply)]);
//! walk_replace(&mut tree, &mut |node| match node {
//!     Ast::Juxtapose { left, right, .. } => Some(Ast::binary(
//!         sprig_ast::BinaryOp::Mul,
//!         (**left).clone(),
//!         (**right).clone(),
//!     )),
//!     _ => None,
//! });
//! assert!(tree.is_settled());
//! ```

use super::{Ast, MemberMut};

/// Visits `ast` and every descendant in pre-order.
pub fn walk<V>(ast: &Ast, visitor: &mut V)
where
    V: FnMut(&Ast),
{
    visitor(ast);
    for child in ast.children() {
        walk(child, visitor);
    }
}

/// Visits every descendant of `ast` in pre-order, replacing a node whenever
/// `replace` returns a substitute.
///
/// The root itself is not offered for replacement since the caller already
/// owns it.
pub fn walk_replace<F>(ast: &mut Ast, replace: &mut F)
where
    F: FnMut(&Ast) -> Option<Ast>,
{
    for member in ast.members_mut() {
        match member {
            MemberMut::Child(_, child) => visit_slot(child, replace),
            MemberMut::Children(_, items) => {
                for item in items.iter_mut() {
                    visit_slot(item, replace);
                }
            }
            MemberMut::Value(..) => {}
        }
    }
}

fn visit_slot<F>(slot: &mut Ast, replace: &mut F)
where
    F: FnMut(&Ast) -> Option<Ast>,
{
    if let Some(substitute) = replace(slot) {
        *slot = substitute;
    }
    walk_replace(slot, replace);
}
