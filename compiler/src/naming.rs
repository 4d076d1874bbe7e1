//! Mapping of schema identifiers to Rust identifiers.

use crate::error::GenError;

/// Strict and reserved keywords; none of them can name a field.
const RUST_KEYWORDS: [&str; 51] = [
    "as", "async", "await", "break", "const", "continue", "crate", "dyn",
    "else", "enum", "extern", "false", "fn", "for", "if", "impl",
    "in", "let", "loop", "match", "mod", "move", "mut", "pub",
    "ref", "return", "self", "Self", "static", "struct", "super", "trait",
    "true", "type", "unsafe", "use", "where", "while",
    "abstract", "become", "box", "do", "final", "macro", "override", "priv",
    "try", "typeof", "unsized", "virtual", "yield",
];

/// Uppercases the first character and leaves the rest untouched.
pub fn capitalize_first(name: &str) -> Result<String, GenError> {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => Ok(first.to_uppercase().chain(chars).collect()),
        None => Err(GenError::EmptyIdentifier("capitalization".to_string())),
    }
}

/// Removes `prefix` from `name` when what remains still starts with an
/// uppercase letter, so `ShapeCircle` under `Shape` becomes `Circle`.
pub fn strip_prefix<'n>(name: &'n str, prefix: &str) -> &'n str {
    if prefix.len() >= name.len() {
        return name;
    }
    match name.strip_prefix(prefix) {
        Some(rest) if rest.chars().next().map_or(false, char::is_uppercase) => rest,
        _ => name,
    }
}

/// Replaces every character that cannot appear in an identifier with `_`.
pub fn sanitize_ident(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Name of the struct generated for a constructor or function.
pub fn struct_name(name: &str) -> Result<String, GenError> {
    if name.is_empty() {
        return Err(GenError::EmptyIdentifier("constructor or function".to_string()));
    }
    capitalize_first(&sanitize_ident(name))
}

/// Name of the tagged union generated for a custom type.
pub fn union_name(type_name: &str) -> Result<String, GenError> {
    if type_name.is_empty() {
        return Err(GenError::EmptyIdentifier("custom type".to_string()));
    }
    capitalize_first(&sanitize_ident(type_name))
}

/// A struct field name. `rename` holds the wire name whenever it differs
/// from `ident`.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldName {
    pub ident:  String,
    pub rename: Option<String>,
}

pub fn field_name(name: &str) -> Result<FieldName, GenError> {
    if name.is_empty() {
        return Err(GenError::EmptyIdentifier("field".to_string()));
    }
    let sanitized = sanitize_ident(name);
    let ident = if sanitized == "type" {
        "typ".to_string()
    } else if RUST_KEYWORDS.contains(&sanitized.as_str()) {
        format!("{}_", sanitized)
    } else {
        sanitized
    };
    let rename = (ident != name).then(|| name.to_string());
    Ok(FieldName { ident, rename })
}
