//! Catalog of analyzer diagnostics.
//!
//! Messages follow the wording of the Python interpreter's own `TypeError`s where one exists
//! (`add() missing 1 required argument: 'b'`), so users recognise them.

use crate::frontend::ast::Span;
use crate::frontend::diagnostics::{CompileError, ErrorKind};
use crate::frontend::types::Type;

pub fn undefined_name(name: &str, span: Span) -> CompileError {
    CompileError::new(ErrorKind::UnresolvedSymbol, format!("Name '{}' is not defined.", name), span)
        .with_label("not found in this scope")
}

pub fn undefined_function(name: &str, span: Span) -> CompileError {
    CompileError::new(ErrorKind::UnresolvedSymbol, format!("Function '{}' is not defined.", name), span)
        .with_label("not found in this scope")
        .with_hint("Did you forget to define or import it?")
}

pub fn too_many_arguments(function: &str, expected: usize, given: usize, span: Span) -> CompileError {
    CompileError::new(
        ErrorKind::ArityMismatch,
        format!(
            "{}() takes {} but {} {} given",
            function,
            plural(expected, "positional argument"),
            given,
            if given == 1 { "was" } else { "were" }
        ),
        span,
    )
    .with_label("unexpected argument")
}

pub fn unexpected_keyword(function: &str, keyword: &str, span: Span) -> CompileError {
    CompileError::new(
        ErrorKind::UnexpectedKeyword,
        format!("{}() got an unexpected keyword argument '{}'", function, keyword),
        span,
    )
    .with_label("unknown parameter")
}

pub fn duplicate_argument(function: &str, param: &str, span: Span) -> CompileError {
    CompileError::new(
        ErrorKind::DuplicateBinding,
        format!("{}() got multiple values for argument '{}'", function, param),
        span,
    )
    .with_label(format!("'{}' is already bound", param))
}

pub fn argument_mismatch(function: &str, param: &str, expected: &Type, found: &Type, span: Span) -> CompileError {
    CompileError::new(
        ErrorKind::TypeMismatch,
        format!(
            "Expected '{}' in argument '{}' of '{}', found '{}'.",
            expected, param, function, found
        ),
        span,
    )
    .with_label(format!("expected '{}'", expected))
}

pub fn missing_arguments(function: &str, params: &[&str], span: Span) -> CompileError {
    CompileError::new(
        ErrorKind::ArityMismatch,
        format!(
            "{}() missing {} {}: {}",
            function,
            params.len(),
            if params.len() == 1 { "required argument" } else { "required arguments" },
            quoted_list(params)
        ),
        span,
    )
    .with_label("missing arguments")
}

pub fn assignment_mismatch(name: &str, expected: &Type, found: &Type, span: Span) -> CompileError {
    CompileError::new(
        ErrorKind::TypeMismatch,
        format!("Expected '{}' in assignment to '{}', found '{}'.", expected, name, found),
        span,
    )
    .with_label(format!("'{}' has type '{}'", name, expected))
}

pub fn unpack_arity(elements: usize, targets: usize, span: Span) -> CompileError {
    CompileError::new(
        ErrorKind::ArityMismatch,
        format!(
            "Cannot unpack tuple with {} into {}.",
            plural(elements, "element"),
            plural(targets, "target")
        ),
        span,
    )
}

pub fn unpack_non_tuple(targets: usize, found: &Type, span: Span) -> CompileError {
    CompileError::new(
        ErrorKind::TypeMismatch,
        format!("Expected a tuple to unpack into {}, found '{}'.", plural(targets, "target"), found),
        span,
    )
}

pub fn unsupported_construct(construct: &str, span: Span) -> CompileError {
    CompileError::new(ErrorKind::UnsupportedConstruct, format!("Unsupported construct: {}", construct), span)
        .with_note("This construct is not analyzed; the rest of the file still is.")
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

/// `'a'`, `'a' and 'b'`, `'a', 'b', and 'c'`
fn quoted_list(names: &[&str]) -> String {
    let quoted: Vec<String> = names.iter().map(|n| format!("'{}'", n)).collect();
    match quoted.as_slice() {
        [] => String::new(),
        [one] => one.clone(),
        [first, second] => format!("{} and {}", first, second),
        [init @ .., last] => format!("{}, and {}", init.join(", "), last),
    }
}
