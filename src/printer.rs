// ABOUTME: Rendering values back to text, readably or for display

use crate::value::Value;

/// Prints a value. In readable mode strings are quoted and re-escaped (the
/// reverse of the reader); in display mode they are printed raw. All other
/// variants print identically in both modes.
pub fn pr_str(value: &Value, readably: bool) -> String {
    match value {
        Value::Number(n) => n.to_string(),
        Value::Symbol(sym) => sym.name().to_string(),
        Value::String(s) => {
            if readably {
                format!("\"{}\"", escape(s))
            } else {
                s.to_string()
            }
        }
        Value::List(items) => format!("({})", pr_seq(items, readably, " ")),
        Value::Nil => "nil".to_string(),
        Value::True => "true".to_string(),
        Value::False => "false".to_string(),
        Value::Procedure(proc) => {
            let tag = if proc.is_macro() { "macro" } else { "procedure" };
            match proc.name() {
                Some(name) => format!("#<{}:{}>", tag, name.name()),
                None => format!("#<{}>", tag),
            }
        }
        Value::Atom(slot) => format!("(atom {})", pr_str(&slot.borrow(), readably)),
        Value::Exception(_) => "#<exn>".to_string(),
    }
}

/// Prints a sequence of values joined by `sep` (used by lists and by the
/// printing builtins).
pub fn pr_seq(values: &[Value], readably: bool, sep: &str) -> String {
    values
        .iter()
        .map(|value| pr_str(value, readably))
        .collect::<Vec<_>>()
        .join(sep)
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}
