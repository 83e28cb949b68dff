//! Static type checker for Python modules.
//!
//! Checks variable assignments and call sites against annotated and inferred types, and reports
//! every mismatch as a located diagnostic.
//!
//! ## Notes
//!
//! - **Scope per unit**: every module, function and class body gets its own [`Scope`], fully
//!   populated by a [`SymbolProvider`] before any of its statements is checked, so forward
//!   references resolve. Nested definitions are then visited depth-first, each exactly once.
//! - **Error accumulation**: diagnostics are collected, not fatal. A statement the checker does not
//!   model becomes one `UnsupportedConstruct` diagnostic; an unreadable or unparsable file does not
//!   stop the others.
//! - **Gradual typing**: unannotated parameters are `Any`, and expressions the checker cannot type
//!   are never reported as mismatches.
//!
//! ## Examples
//!
//! ```rust
//! use std::path::Path;
//! use typpy::frontend::typechecker::TypeChecker;
//!
//! let source = "def add(a: int, b: int) -> int:\n    return a\n\nadd(1)\n";
//! let errors = TypeChecker::new().check_source(Path::new("demo.py"), source);
//! assert_eq!(errors.len(), 1);
//! assert_eq!(errors[0].message, "add() missing 1 required argument: 'b'");
//! ```

mod assignment;
mod calls;
mod check_stmt;
pub mod errors;
mod expr_type;

#[cfg(test)]
mod tests;

pub use assignment::check_assignment;
pub use calls::{check_call, check_expression};
pub use check_stmt::{check_block, check_statement};
pub use expr_type::{annotation_type, get_expr_type};

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::frontend::ast::{Program, Span, Statement};
use crate::frontend::diagnostics::{CompileError, LineIndex};
use crate::frontend::provider::{AstSymbolProvider, SymbolProvider, Unit, scope_statements};
use crate::frontend::report::TypingError;
use crate::frontend::resolver::ModuleResolver;
use crate::frontend::scope::{Scope, ScopeId, ScopeTable};
use crate::frontend::subtype::{SubtypeError, is_subtype_in};
use crate::frontend::types::Type;
use crate::frontend::{lexer, parser};

/// A construct the checker refuses to guess about.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnalysisError {
    #[error("unsupported construct: {construct}")]
    UnsupportedConstruct { construct: String, span: Span },
    #[error(transparent)]
    Subtype(#[from] SubtypeError),
}

impl AnalysisError {
    pub fn unsupported(construct: impl Into<String>, span: Span) -> Self {
        AnalysisError::UnsupportedConstruct {
            construct: construct.into(),
            span,
        }
    }

    /// Report as a diagnostic, anchored at `fallback` when the error carries no span.
    pub fn into_diagnostic(self, fallback: Span) -> CompileError {
        match self {
            AnalysisError::UnsupportedConstruct { construct, span } => errors::unsupported_construct(&construct, span),
            AnalysisError::Subtype(err) => errors::unsupported_construct(&err.to_string(), fallback),
        }
    }
}

/// Whether a value of type `actual` may be used where `expected` is required.
///
/// Types the checker could not infer are accepted, so they never produce a mismatch.
pub(crate) fn accepts(scopes: &ScopeTable, scope: ScopeId, actual: &Type, expected: &Type) -> Result<bool, AnalysisError> {
    if actual.contains_unresolved() || expected.contains_unresolved() {
        return Ok(true);
    }
    Ok(is_subtype_in(actual, expected, &scopes.classes(scope))?)
}

/// Checks files, modules and nested scopes.
///
/// Create with [`TypeChecker::new`] (symbols read from the syntax tree) or
/// [`TypeChecker::with_provider`], then call [`check_files`](Self::check_files),
/// [`check_source`](Self::check_source) or [`check_program`](Self::check_program).
#[derive(Debug, Default)]
pub struct TypeChecker<P: SymbolProvider = AstSymbolProvider> {
    provider: P,
    resolver: ModuleResolver,
}

impl TypeChecker {
    pub fn new() -> Self {
        Self::with_provider(AstSymbolProvider)
    }
}

impl<P: SymbolProvider> TypeChecker<P> {
    pub fn with_provider(provider: P) -> Self {
        Self {
            provider,
            resolver: ModuleResolver::new(),
        }
    }

    /// Check every file and return all diagnostics, in sorted path order.
    ///
    /// ## Returns
    /// - `Ok(())` when no file produced a diagnostic.
    /// - `Err(Vec<TypingError>)` with the diagnostics of all files otherwise.
    pub fn check_files(&self, paths: &[PathBuf]) -> Result<(), Vec<TypingError>> {
        let mut paths = paths.to_vec();
        paths.sort();
        paths.dedup();

        let errors: Vec<TypingError> = paths.iter().flat_map(|path| self.check_file(path)).collect();
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Read and check one file.
    pub fn check_file(&self, path: &Path) -> Vec<TypingError> {
        match fs::read_to_string(path) {
            Ok(source) => self.check_source(path, &source),
            Err(err) => {
                warn!(path = %path.display(), %err, "cannot read file");
                vec![TypingError::unreadable(path, &err)]
            }
        }
    }

    /// Parse and check `source` as the contents of `file`.
    #[tracing::instrument(skip_all, fields(file = %file.display()))]
    pub fn check_source(&self, file: &Path, source: &str) -> Vec<TypingError> {
        let index = LineIndex::new(source);
        let errors = match lexer::lex(source).and_then(|tokens| parser::parse(&tokens)) {
            Ok(program) => self.check_program(&program, file, &self.qualified_name(file)),
            Err(errors) => errors,
        };
        info!(count = errors.len(), "checked");
        errors
            .into_iter()
            .map(|error| TypingError::from_compile_error(file, &index, error))
            .collect()
    }

    /// Check a parsed module whose scope is named `qualified_name`.
    pub fn check_program(&self, program: &Program, file: &Path, qualified_name: &str) -> Vec<CompileError> {
        let mut scopes = ScopeTable::new();
        let name = qualified_name.rsplit('.').next().unwrap_or(qualified_name);
        let root = scopes.add_scope(Scope::new(name, None, file, qualified_name));
        self.check_unit(&mut scopes, root, Unit::Module(program))
    }

    fn qualified_name(&self, file: &Path) -> String {
        match self.resolver.resolve(file) {
            Ok((name, _)) => name,
            Err(err) => {
                debug!(%err, "module name taken from the file stem");
                file.file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned())
                    .unwrap_or_default()
            }
        }
    }

    /// Populate `scope` from the provider, check the unit's statements, then recurse into every
    /// `def` and `class` the unit defines, once per defining statement.
    #[tracing::instrument(skip_all, fields(scope = %scopes.get(scope).qualified_name))]
    fn check_unit(&self, scopes: &mut ScopeTable, scope: ScopeId, unit: Unit<'_>) -> Vec<CompileError> {
        self.provider.symbols(unit).install(scopes.get_mut(scope));

        let body = unit.body();
        let mut errors = check_block(scopes, scope, body);

        // Every defining statement gets its own scope, including ones a later
        // definition of the same name shadows.
        for stmt in scope_statements(body) {
            let (name, child_unit) = match &stmt.node {
                Statement::FunctionDef(def) => (&def.name.node, Unit::Function(def)),
                Statement::ClassDef(class) => (&class.name.node, Unit::Class(class)),
                _ => continue,
            };
            let child = scopes.add_child(scope, name);
            errors.extend(self.check_unit(scopes, child, child_unit));
        }

        errors
    }
}
