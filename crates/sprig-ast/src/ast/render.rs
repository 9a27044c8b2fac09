//! Canonical source rendering.
//!
//! `Display` for [`Ast`] writes source text that parses back to the same
//! tree for parser-produced nodes. Parentheses are only added where a
//! juxtaposed neighbour would otherwise regroup.

use std::fmt::{self, Display, Write};

use super::{Ast, JuxLevel, PrefixOp};

impl Display for Ast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ast::Undefined => f.write_str("undefined"),
            Ast::Void => f.write_str("void"),
            Ast::Ellipsis => f.write_str("..."),
            Ast::Bool(value) => write!(f, "{value}"),
            Ast::Int(value) => write!(f, "{value}"),
            Ast::String(value) => {
                f.write_char('"')?;
                write_escaped(f, value)?;
                f.write_char('"')
            }
            Ast::IString(parts) => {
                f.write_char('"')?;
                for part in parts {
                    match part {
                        Ast::String(text) => write_escaped(f, text)?,
                        Ast::Block { .. } => write!(f, "{part}")?,
                        other => write!(f, "{{{other}}}")?,
                    }
                }
                f.write_char('"')
            }
            Ast::Identifier(name) | Ast::PrototypeIdentifier(name) => f.write_str(name),
            Ast::Hashtag(name) => write!(f, "#{name}"),
            Ast::Type { name, parameters } => {
                f.write_str(name)?;
                if !parameters.is_empty() {
                    write!(f, "<{}>", Joined(parameters, ", "))?;
                }
                Ok(())
            }

            Ast::Array(items)
            | Ast::Dict(items)
            | Ast::BidirDict(items)
            | Ast::ObjectLiteral(items)
            | Ast::UnpackTarget(items) => write!(f, "[{}]", Joined(items, " ")),
            Ast::Group(items) => write!(f, "({})", Joined(items, " ")),
            Ast::Block { items, new_scope } => {
                // a fresh scope is written as a doubled brace
                if *new_scope {
                    write!(f, "{{{{{}}}}}", Joined(items, " "))
                } else {
                    write!(f, "{{{}}}", Joined(items, " "))
                }
            }
            Ast::TypeParam(items) => write!(f, "<{}>", Joined(items, " ")),

            Ast::Binary { op, left, right } => {
                if op.spaced() {
                    write!(f, "{left} {op} {right}")
                } else {
                    write!(f, "{left}{op}{right}")
                }
            }
            Ast::Broadcast { op, left, right } => write!(f, "{left} .{op} {right}"),
            Ast::Prefix { op, operand } => match op {
                PrefixOp::Not => write!(f, "not {operand}"),
                PrefixOp::AtHandle
                    if !(operand.is_delimited() || matches!(**operand, Ast::Identifier(_))) =>
                {
                    write!(f, "@({operand})")
                }
                _ => write!(f, "{}{operand}", op.symbol()),
            },
            Ast::Postfix { op, operand } => write!(f, "{operand}{}", op.symbol()),

            Ast::Flow(branches) => write!(f, "{}", Joined(branches, " else ")),
            Ast::If { condition, body } => write!(f, "if {condition} {body}"),
            Ast::Loop { condition, body } => write!(f, "loop {condition} {body}"),
            Ast::Default(body) => write!(f, "{body}"),
            Ast::Break(label) => write_jump(f, "break", label.as_deref()),
            Ast::Continue(label) => write_jump(f, "continue", label.as_deref()),

            Ast::Call { f: callee, args } => match args {
                None => write!(f, "{callee}()"),
                Some(args) if args.is_delimited() => write!(f, "{callee}{args}"),
                Some(args) => write!(f, "{callee}({args})"),
            },
            Ast::Index { left, right }
            | Ast::DeclareGeneric { left, right }
            | Ast::Parameterize { left, right } => write!(f, "{left}{right}"),
            Ast::Range {
                left,
                right,
                brackets,
            } => {
                f.write_char(brackets.left())?;
                write_range_body(f, left.as_deref(), right.as_deref())?;
                f.write_char(brackets.right())
            }
            Ast::BareRange { left, right } => write_range_body(f, left.as_deref(), right.as_deref()),

            Ast::Declare { decltype, target } => write!(f, "{} {target}", decltype.as_str()),
            Ast::TypedIdentifier { id, ty } => write!(f, "{id}:{ty}"),
            Ast::Express(id) => write!(f, "express {id}"),

            Ast::PrototypeTuple(items) | Ast::ListOfAsts(items) => {
                write!(f, "{}", Joined(items, ", "))
            }
            Ast::PrototypeFunctionLiteral { args, body } => write!(f, "{args} => {body}"),
            Ast::Juxtapose { left, right, level } => write_juxtapose(f, left, right, *level),
        }
    }
}

/// Writes items separated by a fixed string.
struct Joined<'a>(&'a [Ast], &'a str);

impl Display for Joined<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(self.1)?;
            }
            write!(f, "{item}")?;
        }
        Ok(())
    }
}

fn write_escaped(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    for c in text.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            '\r' => f.write_str("\\r")?,
            '{' => f.write_str("\\{")?,
            '}' => f.write_str("\\}")?,
            _ => f.write_char(c)?,
        }
    }
    Ok(())
}

fn write_jump(f: &mut fmt::Formatter<'_>, keyword: &str, label: Option<&str>) -> fmt::Result {
    match label {
        Some(label) => write!(f, "{keyword} #{label}"),
        None => f.write_str(keyword),
    }
}

fn write_range_body(
    f: &mut fmt::Formatter<'_>,
    left: Option<&Ast>,
    right: Option<&Ast>,
) -> fmt::Result {
    if let Some(left) = left {
        write!(f, "{left}")?;
    }
    f.write_str("..")?;
    if let Some(right) = right {
        write!(f, "{right}")?;
    }
    Ok(())
}

/// Writes `left` and `right` with no gap between them, so they lex back
/// as a juxtaposition grouped at the same `level`.
///
/// A call-level right operand must start with a bracket or quote; one that
/// does not is wrapped in parentheses. At multiply level a right operand
/// that would lex into the end of `left` (`f` then `x`) is kept apart by
/// parenthesizing the last atom of `left` instead, since parenthesizing the
/// right side would turn it into a call.
fn write_juxtapose(
    f: &mut fmt::Formatter<'_>,
    left: &Ast,
    right: &Ast,
    level: JuxLevel,
) -> fmt::Result {
    let left = if left.binds_as_juxtaposition_operand(level) {
        left.to_string()
    } else {
        format!("({left})")
    };
    let right_text = right.to_string();

    match level {
        JuxLevel::Call if !right.is_delimited() => write!(f, "{left}({right_text})"),
        JuxLevel::Multiply if lexes_together(&left, &right_text) => {
            write!(f, "{}{right_text}", enclose_last_word(&left))
        }
        _ => write!(f, "{left}{right_text}"),
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// True when the end of `left` and the start of `right` would be read as a
/// single lexeme. `2x` is an integer then a word, but `0x1` and `ab` are one.
fn lexes_together(left: &str, right: &str) -> bool {
    let (Some(last), Some(first)) = (left.chars().next_back(), right.chars().next()) else {
        return false;
    };
    if !is_word_char(last) || !is_word_char(first) {
        return false;
    }
    let word = &left[left.trim_end_matches(is_word_char).len()..];
    let is_number = word.bytes().all(|b| b.is_ascii_digit());
    if !is_number || first.is_ascii_digit() {
        return true;
    }
    word == "0" && matches!(first, 'x' | 'X' | 'b' | 'B' | 'o' | 'O')
}

/// `a ^ b` becomes `a ^ (b)`, `#tag` becomes `(#tag)`.
fn enclose_last_word(text: &str) -> String {
    let mut start = text.trim_end_matches(is_word_char).len();
    if text[..start].ends_with('#') {
        start -= 1;
    }
    format!("{}({})", &text[..start], &text[start..])
}

impl Ast {
    /// Can be written directly to the left of a juxtaposition grouped at
    /// `level` without being regrouped.
    fn binds_as_juxtaposition_operand(&self, level: JuxLevel) -> bool {
        match self {
            Ast::Binary { op, .. } | Ast::Broadcast { op, .. } => {
                op.binds_tighter_than_juxtaposition(level)
            }
            Ast::Flow(_)
            | Ast::If { .. }
            | Ast::Loop { .. }
            | Ast::Declare { .. }
            | Ast::Express(_)
            | Ast::PrototypeTuple(_)
            | Ast::ListOfAsts(_)
            | Ast::PrototypeFunctionLiteral { .. }
            | Ast::BareRange { .. } => false,
            Ast::Juxtapose { level: inner, .. } => {
                *inner == JuxLevel::Call || level == JuxLevel::Multiply
            }
            _ => true,
        }
    }
}
