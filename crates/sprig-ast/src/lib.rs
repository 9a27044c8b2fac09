// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! AST types for the sprig language.
//!
//! This crate holds the node model shared by the parser and later passes:
//! the closed [`Ast`] enum, its operator tables, canonical rendering, the
//! tree debug form, member enumeration and traversal with replacement.

pub mod ast;

pub use ast::*;
