// Author: Dustin Pilgrim
// License: MIT

use std::fmt;

/// The main error type for grammar loading, parsing and writing.
#[derive(Debug, Clone, PartialEq)]
pub enum VyosError {
    /// Raised when a token has no matching child in the grammar at the
    /// current position. `path` and `expected` are only filled in by the
    /// `set` parser.
    GrammarMismatch {
        token: String,
        line: usize,
        path: Option<String>,
        expected: Vec<String>,
        hint: Option<String>,
        code: Option<u32>,
    },
    SyntaxError {
        message: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Raised when a quoted word is not closed.
    UnclosedString {
        quote: char,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Raised for broken nesting and tree invariant violations.
    StructureError {
        message: String,
        line: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    GrammarError {
        message: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    FileError {
        message: String,
        path: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    RuntimeError {
        message: String,
        hint: Option<String>,
        code: Option<u32>,
    },
}

impl VyosError {
    /// Line number the error points at, or 0 when it has none.
    pub fn line(&self) -> usize {
        match self {
            VyosError::GrammarMismatch { line, .. }
            | VyosError::SyntaxError { line, .. }
            | VyosError::UnclosedString { line, .. }
            | VyosError::StructureError { line, .. } => *line,
            _ => 0,
        }
    }

    /// Stamp a line number onto an error raised below the line reader.
    /// Errors that already carry a line keep it.
    pub fn at_line(mut self, lineno: usize) -> Self {
        match &mut self {
            VyosError::GrammarMismatch { line, .. }
            | VyosError::SyntaxError { line, .. }
            | VyosError::UnclosedString { line, .. }
            | VyosError::StructureError { line, .. } => {
                if *line == 0 {
                    *line = lineno;
                }
            }
            _ => {}
        }
        self
    }
}

fn suffix(hint: &Option<String>, code: &Option<u32>) -> String {
    format!(
        "{}{}",
        hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
        code.map_or(String::new(), |c| format!(" Code: {}", c))
    )
}

impl fmt::Display for VyosError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VyosError::GrammarMismatch { token, line, path, expected, hint, code } => {
                write!(f, "[VYOS] Unexpected token '{}' at line {}", token, line)?;
                if let Some(path) = path {
                    write!(f, " after '{}'", path)?;
                }
                if !expected.is_empty() {
                    write!(f, "; expected one of: {}", expected.join(", "))?;
                }
                write!(f, "{}", suffix(hint, code))
            }
            VyosError::SyntaxError { message, line, column, hint, code } =>
                write!(f, "[VYOS] Syntax Error at {}:{}: {}{}",
                    line, column, message, suffix(hint, code)
                ),
            VyosError::UnclosedString { quote, line, column, hint, code } =>
                write!(f, "[VYOS] Unclosed string starting with '{}' at {}:{}{}",
                    quote, line, column, suffix(hint, code)
                ),
            VyosError::StructureError { message, line, hint, code } =>
                write!(f, "[VYOS] Structure Error at line {}: {}{}",
                    line, message, suffix(hint, code)
                ),
            VyosError::GrammarError { message, hint, code } =>
                write!(f, "[VYOS] Grammar Error: {}{}", message, suffix(hint, code)),
            VyosError::FileError { message, path, hint, code } =>
                write!(f, "[VYOS] File Error '{}': {}{}", path, message, suffix(hint, code)),
            VyosError::RuntimeError { message, hint, code } =>
                write!(f, "[VYOS] Runtime Error: {}{}", message, suffix(hint, code)),
        }
    }
}

impl std::error::Error for VyosError {}
