//! Error types for code generation

use kafkagen_core::SchemaError;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for compile operations
pub type CompileResult<T> = Result<T, CompileError>;

/// Error type for compiling and persisting generated files
#[derive(Error, Debug)]
pub enum CompileError {
    /// A default value cannot be rendered for its field's type
    #[error("{structure}.{field}: {source}")]
    Default {
        structure: String,
        field: String,
        #[source]
        source: SchemaError,
    },

    /// A field refers to a structure no document declares
    #[error("{structure}.{field}: unknown structure type {name:?}")]
    UnknownStruct {
        structure: String,
        field: String,
        name: String,
    },

    /// The generated buffer is not well-formed Rust
    #[error("{}", render_syntax_errors(.0))]
    Syntax(Vec<SyntaxError>),

    /// Writing the generated file failed
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn render_syntax_errors(errors: &[SyntaxError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// One parse error in a generated buffer, with a rendered source snippet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub path: PathBuf,
    /// 1-based line.
    pub line: usize,
    /// 0-based column, in characters.
    pub column: usize,
    pub message: String,
    /// Previous line, offending line and caret marker.
    pub context: Vec<String>,
}

impl SyntaxError {
    /// Build an error at `line`/`column` of `source`, capturing context.
    pub fn new(path: &Path, source: &str, line: usize, column: usize, message: String) -> Self {
        let lines: Vec<&str> = source.lines().collect();
        let mut context = Vec::new();

        if line >= 2
            && let Some(prev) = lines.get(line - 2)
        {
            context.push((*prev).to_string());
        }
        if let Some(current) = line.checked_sub(1).and_then(|i| lines.get(i)) {
            context.push((*current).to_string());
            context.push(caret_line(current, column));
        }

        Self {
            path: path.to_path_buf(),
            line,
            column,
            message,
            context,
        }
    }
}

/// Copy the line's leading whitespace so tabs line up, then pad to `column`.
fn caret_line(line: &str, column: usize) -> String {
    let indent: String = line.chars().take_while(|c| c.is_whitespace()).take(column).collect();
    let pad = column.saturating_sub(indent.chars().count());
    format!("{indent}{}^", " ".repeat(pad))
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}: {}",
            self.path.display(),
            self.line,
            self.column + 1,
            self.message
        )?;
        for line in &self.context {
            write!(f, "\n\t{line}")?;
        }
        Ok(())
    }
}

impl std::error::Error for SyntaxError {}

#[cfg(test)]
#[path = "error/error_tests.rs"]
mod error_tests;
