//! Identifier and literal helpers shared by the emitter and the adapters.

use super::types::{TsPrimitive, TsType};

/// Check if a property key must be quoted (or accessed with brackets).
///
/// True when the name is empty, starts with something other than a letter,
/// `_` or `$`, or contains any other non-identifier character.
pub fn needs_bracket_notation(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return true;
    };
    !(first.is_ascii_alphabetic() || first == '_' || first == '$')
        || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Escape a string for use inside a double-quoted JavaScript literal.
pub fn escape_js_string(s: &str) -> String {
    escape_js_string_in(s, '"')
}

/// Escape a string for use inside a literal delimited by `quote`.
pub fn escape_js_string_in(s: &str, quote: char) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            other => out.push(other),
        }
    }
    out
}

/// Quote a property key when it is not a plain identifier.
pub fn quote_if_needed(name: &str) -> String {
    if needs_bracket_notation(name) {
        format!("\"{}\"", escape_js_string(name))
    } else {
        name.to_string()
    }
}

/// Turn an operation name into the PascalCase stem of generated identifiers
/// (`use<Stem>Query`, `<Stem>Request`).
///
/// `-`, `.` and spaces act as word separators and any other invalid character
/// is dropped. Reserved words are kept as they are; a leading digit gets a
/// `_` prefix.
pub fn pascal_identifier_stem(name: &str) -> String {
    let mut result = String::new();
    for part in name.split(['-', '.', ' ']) {
        let mut chars = part
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '$');
        if let Some(first) = chars.next() {
            result.extend(first.to_uppercase());
            result.extend(chars);
        }
    }

    if result.is_empty() {
        return "_empty".to_string();
    }
    if result.starts_with(|c: char| c.is_ascii_digit()) {
        result.insert(0, '_');
    }
    result
}

/// Create a `Record<string, T>` type.
pub fn make_string_record(value_type: TsType) -> TsType {
    TsType::Record {
        key: Box::new(TsType::Primitive(TsPrimitive::String)),
        value: Box::new(value_type),
    }
}

/// Create a `Record<string, unknown>` type (open-ended objects).
pub fn make_unknown_record() -> TsType {
    make_string_record(TsType::Primitive(TsPrimitive::Unknown))
}
