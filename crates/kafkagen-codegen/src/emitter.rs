//! Auto-indenting source buffer
//!
//! [`SourceFile`] appends text and tracks brace nesting as lines complete:
//! a line ending in `{` opens a level and a line ending in `}` closes one.
//! Lines ending in `{}`, lines shaped like `} else {` and lines starting with
//! `//` leave the depth alone. Each new line is indented four spaces per level
//! before its first byte is written, one level less when that byte is `}`.
//!
//! The finished buffer is parsed with `syn` before it may be written.

use crate::error::{CompileError, CompileResult, SyntaxError};
use std::io::Write;
use std::path::{Path, PathBuf};

const INDENT: &str = "    ";

/// First line of every generated file.
pub const BANNER: &str = "// Code generated by kafkagen. DO NOT EDIT.";

/// Float rendering styles for [`SourceFile::write_float`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloatFormat {
    /// `1.5`, `100.0`; always a valid float literal.
    Literal,
    /// Fixed point, `1.50` with precision 2.
    Decimal,
    /// Scientific, `1.5e2`.
    Exponent,
}

/// A generated source file under construction.
#[derive(Debug, Clone)]
pub struct SourceFile {
    path: PathBuf,
    buf: String,
    depth: usize,
    line_start: usize,
    at_line_start: bool,
}

impl SourceFile {
    /// Start a file at `path` with the banner and `prelude`.
    pub fn new(path: impl Into<PathBuf>, prelude: &str) -> Self {
        let mut file = Self::empty(path);
        file.write_str(BANNER);
        file.write_str("\n\n");
        if !prelude.is_empty() {
            file.write_str(prelude);
            if !prelude.ends_with('\n') {
                file.write_char('\n');
            }
        }
        file
    }

    /// A file with no banner.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            buf: String::new(),
            depth: 0,
            line_start: 0,
            at_line_start: true,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    /// Current nesting depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn write_str(&mut self, text: &str) {
        for c in text.chars() {
            self.write_char(c);
        }
    }

    /// Write `text` followed by a newline.
    pub fn line(&mut self, text: &str) {
        self.write_str(text);
        self.write_char('\n');
    }

    pub fn write_char(&mut self, c: char) {
        if c == '\n' {
            self.buf.push('\n');
            self.end_line();
            return;
        }
        if self.at_line_start {
            let levels = if c == '}' {
                self.depth.saturating_sub(1)
            } else {
                self.depth
            };
            for _ in 0..levels {
                self.buf.push_str(INDENT);
            }
            self.at_line_start = false;
        }
        self.buf.push(c);
    }

    pub fn write_bool(&mut self, v: bool) {
        self.write_str(if v { "true" } else { "false" });
    }

    /// Write the digits of `v` in `radix` (2 to 36), without a base prefix.
    pub fn write_int(&mut self, v: i64, radix: u32) {
        if v < 0 {
            self.write_char('-');
        }
        self.write_uint(v.unsigned_abs(), radix);
    }

    /// Write the digits of `v` in `radix` (2 to 36), without a base prefix.
    pub fn write_uint(&mut self, v: u64, radix: u32) {
        debug_assert!((2..=36).contains(&radix), "radix {radix} out of range");
        let digits = format_radix(v, radix.clamp(2, 36));
        self.write_str(&digits);
    }

    /// Write a float; `precision` applies to the decimal and exponent forms.
    pub fn write_float(&mut self, v: f64, format: FloatFormat, precision: Option<usize>) {
        let text = match (format, precision) {
            (FloatFormat::Literal, _) => format!("{v:?}"),
            (FloatFormat::Decimal, Some(p)) => format!("{v:.p$}"),
            (FloatFormat::Decimal, None) => format!("{v}"),
            (FloatFormat::Exponent, Some(p)) => format!("{v:.p$e}"),
            (FloatFormat::Exponent, None) => format!("{v:e}"),
        };
        self.write_str(&text);
    }

    /// Write `text` as an escaped string literal.
    pub fn write_quoted(&mut self, text: &str) {
        let quoted = format!("{text:?}");
        self.write_str(&quoted);
    }

    fn end_line(&mut self) {
        // The pushed newline is excluded from the completed line.
        match depth_delta(&self.buf[self.line_start..self.buf.len() - 1]) {
            Delta::Open => self.depth += 1,
            Delta::Close => self.depth = self.depth.saturating_sub(1),
            Delta::Same => {}
        }
        self.line_start = self.buf.len();
        self.at_line_start = true;
    }

    /// Parse the buffer as a Rust file.
    ///
    /// `syn` stops at the first error, so on failure each top-level item is
    /// parsed on its own and every broken item is reported with its position
    /// and a caret snippet.
    pub fn validate(&self) -> CompileResult<()> {
        let Err(whole) = syn::parse_file(&self.buf) else {
            return Ok(());
        };

        let mut errors = Vec::new();
        for (first_line, item) in top_level_items(&self.buf) {
            if let Err(err) = syn::parse_file(item) {
                errors.extend(err.into_iter().map(|e| self.syntax_error(&e, first_line - 1)));
            }
        }
        // Items parse alone but not together
        if errors.is_empty() {
            errors.extend(whole.into_iter().map(|e| self.syntax_error(&e, 0)));
        }
        Err(CompileError::Syntax(errors))
    }

    fn syntax_error(&self, err: &syn::Error, line_offset: usize) -> SyntaxError {
        let start = err.span().start();
        SyntaxError::new(
            &self.path,
            &self.buf,
            start.line + line_offset,
            start.column,
            err.to_string(),
        )
    }

    /// Validate, then atomically replace the file at [`Self::path`].
    ///
    /// The content goes to a temporary file in the same directory that is
    /// renamed over the target, so readers never observe a partial file.
    /// Nothing is written when validation fails.
    pub fn persist(&self) -> CompileResult<()> {
        self.validate()?;

        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let io_err = |source| CompileError::Io {
            path: self.path.clone(),
            source,
        };

        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(io_err)?;
        tmp.write_all(self.buf.as_bytes()).map_err(io_err)?;
        tmp.persist(&self.path).map_err(|e| io_err(e.error))?;

        tracing::debug!(path = %self.path.display(), bytes = self.buf.len(), "persisted generated file");
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Delta {
    Open,
    Close,
    Same,
}

/// Nesting change caused by one completed line.
///
/// `} else {` closes and reopens on the same line, so it is neutral.
fn depth_delta(line: &str) -> Delta {
    let line = line.trim();
    if line.starts_with("//") || line.ends_with("{}") {
        return Delta::Same;
    }
    match (line.starts_with('}'), line.ends_with('{'), line.ends_with('}')) {
        (true, true, _) => Delta::Same,
        (_, true, _) => Delta::Open,
        (_, _, true) => Delta::Close,
        _ => Delta::Same,
    }
}

/// Split `source` after every line that ends a depth-0 item, returning each
/// piece with its 1-based first line.
fn top_level_items(source: &str) -> Vec<(usize, &str)> {
    let mut items = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut start_line = 1;
    let mut offset = 0;

    for (i, line) in source.split_inclusive('\n').enumerate() {
        match depth_delta(line) {
            Delta::Open => depth += 1,
            Delta::Close => depth = depth.saturating_sub(1),
            Delta::Same => {}
        }
        offset += line.len();

        let trimmed = line.trim();
        if depth == 0
            && !trimmed.starts_with("//")
            && (trimmed.ends_with('}') || trimmed.ends_with(';'))
        {
            items.push((start_line, &source[start..offset]));
            start = offset;
            start_line = i + 2;
        }
    }
    if start < source.len() {
        items.push((start_line, &source[start..]));
    }
    items
}

fn format_radix(mut v: u64, radix: u32) -> String {
    if v == 0 {
        return "0".to_string();
    }
    let radix = u64::from(radix);
    let mut digits = Vec::new();
    while v > 0 {
        let d = (v % radix) as u32;
        digits.push(char::from_digit(d, radix as u32).unwrap_or('?'));
        v /= radix;
    }
    digits.iter().rev().collect()
}
