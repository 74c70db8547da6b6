//! Source rendering for literal nodes.
//!
//! Rendering a literal and lexing/parsing the result yields an equivalent
//! literal node. Only literal forms (numbers, strings, booleans, null and
//! lists of literals) are rendered; anything else returns `None`.

use std::fmt::Write;

use super::{ExprArena, ExprId, ExprKind};
use crate::StringInterner;

/// Render the literal at `id` back to source text.
pub fn literal_source(arena: &ExprArena, interner: &StringInterner, id: ExprId) -> Option<String> {
    let mut out = String::new();
    write_literal(&mut out, arena, interner, id).then_some(out)
}

fn write_literal(
    out: &mut String,
    arena: &ExprArena,
    interner: &StringInterner,
    id: ExprId,
) -> bool {
    match arena.get_expr(id).kind {
        ExprKind::Int(n) => {
            let _ = write!(out, "{n}");
        }
        ExprKind::Float(bits) => out.push_str(&float_literal(f64::from_bits(bits))),
        ExprKind::Str(name) => out.push_str(&quote_string(interner.lookup(name))),
        ExprKind::Bool(b) => out.push_str(if b { "true" } else { "false" }),
        ExprKind::Null => out.push_str("null"),
        ExprKind::List(range) => {
            out.push('[');
            for (i, &item) in arena.get_expr_list(range).iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                if !write_literal(out, arena, interner, item) {
                    return false;
                }
            }
            out.push(']');
        }
        _ => return false,
    }
    true
}

/// Format a float so it always reads back as a float (`2` becomes `2.0`).
pub fn float_literal(value: f64) -> String {
    let mut text = format!("{value}");
    if value.is_finite() && !text.contains('.') {
        text.push_str(".0");
    }
    text
}

/// Quote and escape a string the way the lexer expects to read it.
pub fn quote_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\0' => out.push_str("\\0"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
