use thiserror::Error;

/// Where the JSON parser gave up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Malformed token or structure.
    Syntax,
    /// Input ended in the middle of a value.
    Eof,
    /// Well-formed JSON that `serde_json` refused (e.g. a number out of range).
    Data,
    /// Nothing but whitespace.
    Empty,
}

/// The input text is not valid JSON. The message is meant for direct display.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid JSON{}: {message}", position(.line, .column))]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    /// 1-based; 0 when the parser did not report a position.
    pub line: usize,
    /// 1-based; 0 when the parser did not report a position.
    pub column: usize,
}

impl ParseError {
    pub(crate) fn empty() -> Self {
        Self {
            kind: ParseErrorKind::Empty,
            message: "no JSON content".to_string(),
            line: 0,
            column: 0,
        }
    }
}

fn position(line: &usize, column: &usize) -> String {
    if *line == 0 { String::new() } else { format!(" at line {line}, column {column}") }
}

impl From<serde_json::Error> for ParseError {
    fn from(error: serde_json::Error) -> Self {
        use serde_json::error::Category;
        let kind = match error.classify() {
            Category::Eof => ParseErrorKind::Eof,
            Category::Data => ParseErrorKind::Data,
            Category::Syntax | Category::Io => ParseErrorKind::Syntax,
        };
        // serde_json appends " at line L column C" to its Display output; keep the bare reason.
        let full = error.to_string();
        let message = match full.rfind(" at line ") {
            Some(ix) => full[..ix].to_string(),
            None => full,
        };
        Self { kind, message, line: error.line(), column: error.column() }
    }
}

/// Failure to load a settings file.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings at JSON path {path}: {message}")]
    Invalid { path: String, message: String },
}
