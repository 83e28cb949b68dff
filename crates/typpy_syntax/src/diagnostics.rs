//! Diagnostics shared by the syntax frontend and the analyzer.
//!
//! A [`CompileError`] is an unlocated finding: a kind, a message and a byte [`Span`]. The
//! analyzer turns it into a file/line/column record with a [`LineIndex`].

use crate::ast::Span;
use std::fmt;

/// A finding about analyzed source code, anchored to a byte span.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct CompileError {
    pub message: String,
    pub span: Span,
    pub kind: ErrorKind,
    /// Short message rendered next to the underline.
    pub label: Option<String>,
    pub notes: Vec<String>,
    pub hints: Vec<String>,
}

impl CompileError {
    pub fn new(kind: ErrorKind, message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            kind,
            label: None,
            notes: Vec::new(),
            hints: Vec::new(),
        }
    }

    pub fn syntax(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::Syntax, message, span)
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hints.push(hint.into());
        self
    }
}

/// Diagnostic taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Source could not be read or tokenized/parsed.
    Syntax,
    /// A name was not found anywhere in the scope chain.
    UnresolvedSymbol,
    /// Too many or too few values (call arguments, destructuring targets).
    ArityMismatch,
    UnexpectedKeyword,
    /// A keyword re-supplies an already bound parameter.
    DuplicateBinding,
    TypeMismatch,
    UnsupportedConstruct,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Syntax => write!(f, "syntax error"),
            ErrorKind::UnresolvedSymbol => write!(f, "unresolved symbol"),
            ErrorKind::ArityMismatch => write!(f, "arity mismatch"),
            ErrorKind::UnexpectedKeyword => write!(f, "unexpected keyword"),
            ErrorKind::DuplicateBinding => write!(f, "duplicate binding"),
            ErrorKind::TypeMismatch => write!(f, "type mismatch"),
            ErrorKind::UnsupportedConstruct => write!(f, "unsupported construct"),
        }
    }
}

/// Maps byte offsets to line/column positions.
///
/// Lines are 1-based and columns are 0-based byte offsets within the line, matching the
/// conventions of Python's own `ast` module.
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<usize>,
    len: usize,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(source.match_indices('\n').map(|(i, _)| i + 1));
        Self {
            line_starts,
            len: source.len(),
        }
    }

    /// Return `(line, column)` for a byte offset. Offsets past the end clamp to the end.
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.len);
        let line = self.line_starts.partition_point(|&start| start <= offset);
        let line_start = self.line_starts[line - 1];
        (line, offset - line_start)
    }

    /// Byte offset where a 1-based line starts, if the line exists.
    pub fn line_start(&self, line: usize) -> Option<usize> {
        line.checked_sub(1).and_then(|i| self.line_starts.get(i)).copied()
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}
