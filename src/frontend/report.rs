//! Located diagnostics and their terminal rendering.
//!
//! A [`TypingError`] is a [`CompileError`] resolved against its file: 1-based line, 0-based
//! column and, when the underlined span stays on one line, an end column. Rendering with source
//! context goes through `miette`'s graphical handler.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use miette::{Diagnostic, GraphicalReportHandler, GraphicalTheme, LabeledSpan, NamedSource};

use crate::frontend::ast::Span;
use crate::frontend::diagnostics::{CompileError, ErrorKind, LineIndex};

/// A diagnostic located in a file.
#[derive(Debug, Clone, PartialEq)]
pub struct TypingError {
    pub file: PathBuf,
    pub line: usize,
    pub column: usize,
    pub end_column: Option<usize>,
    pub span: Span,
    pub kind: ErrorKind,
    pub message: String,
    /// Short message shown next to the underline.
    pub code_message: Option<String>,
    pub notes: Vec<String>,
    pub hints: Vec<String>,
}

impl TypingError {
    pub fn from_compile_error(file: &Path, index: &LineIndex, error: CompileError) -> Self {
        let (line, column) = index.line_col(error.span.start);
        let (end_line, end_column) = index.line_col(error.span.end);
        let end_column = (end_line == line && end_column > column).then_some(end_column);
        Self {
            file: file.to_path_buf(),
            line,
            column,
            end_column,
            span: error.span,
            kind: error.kind,
            message: error.message,
            code_message: error.label,
            notes: error.notes,
            hints: error.hints,
        }
    }

    /// A file that could not be read at all.
    pub fn unreadable(file: &Path, err: &io::Error) -> Self {
        Self {
            file: file.to_path_buf(),
            line: 1,
            column: 0,
            end_column: None,
            span: Span::default(),
            kind: ErrorKind::Syntax,
            message: format!("Cannot read file: {}", err),
            code_message: None,
            notes: Vec::new(),
            hints: Vec::new(),
        }
    }

    /// Render with a source snippet and the inline label.
    pub fn render(&self, source: &str, color: bool) -> String {
        let start = self.span.start.min(source.len());
        let len = self.span.end.min(source.len()).saturating_sub(start);
        let help = (!self.hints.is_empty() || !self.notes.is_empty())
            .then(|| self.notes.iter().chain(&self.hints).cloned().collect::<Vec<_>>().join("\n"));
        let report = Report {
            message: format!("{}: {}", self.kind, self.message),
            source_code: NamedSource::new(self.file.display().to_string(), source.to_string()),
            labels: vec![LabeledSpan::new(self.code_message.clone(), start, len)],
            help,
        };

        let theme = if color {
            GraphicalTheme::unicode()
        } else {
            GraphicalTheme::unicode_nocolor()
        };
        let mut out = String::new();
        if GraphicalReportHandler::new_themed(theme)
            .render_report(&mut out, &report)
            .is_err()
        {
            return self.to_string();
        }
        out
    }
}

/// `file:line:column: message`, with a 1-based column as editors expect.
impl fmt::Display for TypingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}: {}",
            self.file.display(),
            self.line,
            self.column + 1,
            self.message
        )
    }
}

#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("{message}")]
struct Report {
    message: String,
    #[source_code]
    source_code: NamedSource<String>,
    #[label(collection)]
    labels: Vec<LabeledSpan>,
    #[help]
    help: Option<String>,
}

/// Print every error to stderr followed by a summary line.
///
/// With `with_context`, each error is rendered with its source snippet; files that cannot be read
/// back fall back to the one-line form.
pub fn print_errors(errors: &[TypingError], with_context: bool) {
    let mut sources: HashMap<&Path, Option<String>> = HashMap::new();
    for error in errors {
        if with_context {
            let source = sources
                .entry(error.file.as_path())
                .or_insert_with(|| fs::read_to_string(&error.file).ok());
            if let Some(source) = source {
                eprintln!("{}", error.render(source, true));
                continue;
            }
        }
        eprintln!("{}", error);
    }
    eprintln!("{}", summary(errors));
}

/// `Found 3 errors in 2 files`
pub fn summary(errors: &[TypingError]) -> String {
    let files = errors
        .iter()
        .map(|e| e.file.as_path())
        .collect::<std::collections::HashSet<_>>()
        .len();
    format!(
        "Found {} error{} in {} file{}",
        errors.len(),
        if errors.len() == 1 { "" } else { "s" },
        files,
        if files == 1 { "" } else { "s" }
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn located(source: &str, error: CompileError) -> TypingError {
        TypingError::from_compile_error(Path::new("demo.py"), &LineIndex::new(source), error)
    }

    #[test]
    fn test_location_from_span() {
        let source = "x = 1\nadd(1, 2, 3)\n";
        let error = located(
            source,
            CompileError::new(ErrorKind::ArityMismatch, "too many", Span::new(16, 17)),
        );
        assert_eq!((error.line, error.column, error.end_column), (2, 10, Some(11)));
        assert_eq!(error.to_string(), "demo.py:2:11: too many");
    }

    #[test]
    fn test_multiline_span_has_no_end_column() {
        let source = "if x:\n    pass\n";
        let error = located(source, CompileError::new(ErrorKind::Syntax, "bad", Span::new(0, 12)));
        assert_eq!(error.end_column, None);
    }

    #[test]
    fn test_summary_counts_files() {
        let source = "x\n";
        let mut a = located(source, CompileError::syntax("a", Span::new(0, 1)));
        let b = a.clone();
        assert_eq!(summary(&[a.clone()]), "Found 1 error in 1 file");
        a.file = PathBuf::from("other.py");
        assert_eq!(summary(&[a, b]), "Found 2 errors in 2 files");
    }

    #[test]
    fn test_render_with_snippet() {
        let source = "var: int = 'string'\n";
        let error = located(
            source,
            CompileError::new(
                ErrorKind::TypeMismatch,
                "Expected 'int' in assignment to 'var', found 'str'.",
                Span::new(0, 19),
            )
            .with_label("'var' has type 'int'"),
        );
        let rendered = error.render(source, false);
        assert!(rendered.contains("type mismatch: Expected 'int' in assignment to 'var', found 'str'."));
        assert!(rendered.contains("demo.py:1:1"));
        assert!(rendered.contains("'var' has type 'int'"));
    }
}
