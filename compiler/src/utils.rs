use crate::error::GenError;

/// JSON-style quoting for names in diagnostics.
pub fn quote(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| format!("\"{}\"", text))
}

pub fn error(msg: &str, line: usize, column: usize) -> GenError {
    GenError::ParseError {
        msg: msg.to_string(),
        line,
        column,
    }
}
