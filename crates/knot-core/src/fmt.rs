//! Canonical text rendering of a [`Document`].
//!
//! The output is canonical, not byte-identical to the source: comments are
//! gone, spacing and indentation are normalized (4 spaces per level), `+`
//! signs and digit separators are dropped, escapes are re-encoded from the
//! minimal table, and identifiers are quoted only when they must be. Parsing
//! canonical text and re-rendering it yields the same text (the canonical
//! form is a fixed point), which the round-trip tests rely on.

use crate::chars;
use crate::dom::{Document, NodeId};
use crate::value::{Literal, Number, Radix, Value};

/// Render the canonical text of a document. The root itself is not printed;
/// its children start at depth 0. Every node line ends with a newline, so a
/// non-empty document ends with one and an empty document is the empty
/// string.
pub fn to_text(doc: &Document) -> String {
    let mut out = String::new();
    for &child in doc.node(doc.root()).children() {
        write_node(doc, child, 0, &mut out);
    }
    out
}

fn write_node(doc: &Document, id: NodeId, depth: usize, out: &mut String) {
    let node = doc.node(id);
    let indent = "    ".repeat(depth);
    out.push_str(&indent);
    if let Some(hint) = node.type_hint() {
        out.push('(');
        write_ident(hint, out);
        out.push(')');
    }
    write_ident(node.name(), out);
    for value in node.values() {
        out.push(' ');
        write_value(value, out);
    }
    for (key, value) in node.properties() {
        out.push(' ');
        write_ident(key, out);
        out.push('=');
        write_value(value, out);
    }
    if node.children().is_empty() {
        out.push('\n');
    } else {
        out.push_str(" {\n");
        for &child in node.children() {
            write_node(doc, child, depth + 1, out);
        }
        out.push_str(&indent);
        out.push_str("}\n");
    }
}

fn write_value(value: &Value, out: &mut String) {
    if let Some(hint) = &value.type_hint {
        out.push('(');
        write_ident(hint, out);
        out.push(')');
    }
    match &value.literal {
        Literal::Null => out.push_str("null"),
        Literal::Bool(true) => out.push_str("true"),
        Literal::Bool(false) => out.push_str("false"),
        Literal::String(text) => write_quoted(text, out),
        Literal::Number(number) => write_number(number, out),
    }
}

/// Numbers re-emit their semantic content: sign, digits, fractional width,
/// exponent, and the radix prefix for based literals (lowercase hex digits).
fn write_number(number: &Number, out: &mut String) {
    match number {
        Number::Decimal(decimal) => {
            if decimal.negative {
                out.push('-');
            }
            out.push_str(&decimal.integral.to_string());
            if decimal.fraction_digits > 0 {
                out.push('.');
                let width = decimal.fraction_digits as usize;
                out.push_str(&format!("{:0width$}", decimal.fraction));
            }
            if let Some(exponent) = &decimal.exponent {
                out.push('e');
                if exponent.negative {
                    out.push('-');
                }
                out.push_str(&exponent.magnitude.to_string());
            }
        }
        Number::Based(based) => {
            out.push_str(based.radix.prefix());
            match based.radix {
                Radix::Binary => out.push_str(&format!("{:b}", based.magnitude)),
                Radix::Octal => out.push_str(&format!("{:o}", based.magnitude)),
                Radix::Hex => out.push_str(&format!("{:x}", based.magnitude)),
            }
        }
    }
}

/// Double-quoted string with the minimal escape table; everything else
/// passes through unescaped.
fn write_quoted(text: &str, out: &mut String) {
    out.push('"');
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{8}' => out.push_str("\\b"),
            '\u{C}' => out.push_str("\\f"),
            _ => out.push(ch),
        }
    }
    out.push('"');
}

/// An identifier, key, or type annotation: bare when it would re-parse as
/// the same bare identifier, quoted otherwise.
fn write_ident(text: &str, out: &mut String) {
    if needs_quoting(text) {
        write_quoted(text, out);
    } else {
        out.push_str(text);
    }
}

fn needs_quoting(text: &str) -> bool {
    let mut iter = text.chars();
    let first = match iter.next() {
        Some(first) => first,
        None => return true,
    };
    if chars::is_non_initial(first) {
        return true;
    }
    if matches!(first, '-' | '+') && iter.clone().next().is_some_and(chars::is_digit) {
        return true;
    }
    if iter.any(chars::is_identifier_illegal) {
        return true;
    }
    // Reserved words cannot be bare identifiers.
    matches!(text, "true" | "false" | "null")
}
