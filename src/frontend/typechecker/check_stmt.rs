//! Statement dispatch.

use tracing::{debug, error};

use crate::frontend::ast::{Expr, Spanned, Statement};
use crate::frontend::diagnostics::CompileError;
use crate::frontend::scope::{ScopeId, ScopeTable};

use super::AnalysisError;
use super::assignment::check_assignment;
use super::calls::check_expression;

/// Check one statement in `scope`.
///
/// Definitions are skipped: their bodies are checked in their own scopes by the driver. Blocks
/// nested in an `if` share the scope of the statement.
///
/// ## Errors
/// - [`AnalysisError::UnsupportedConstruct`] for statement kinds the analyzer does not model
///   (`while`, `for`, `import`, augmented assignment, ...).
pub fn check_statement(
    scopes: &mut ScopeTable,
    scope: ScopeId,
    stmt: &Spanned<Statement>,
) -> Result<Vec<CompileError>, AnalysisError> {
    match &stmt.node {
        Statement::FunctionDef(_) | Statement::ClassDef(_) | Statement::Pass | Statement::Return(None) => Ok(Vec::new()),
        Statement::Assign(_) | Statement::AnnAssign(_) => check_assignment(scopes, scope, stmt),
        Statement::Expr(expr) | Statement::Return(Some(expr)) => check_expression(scopes, scope, expr),
        Statement::If(if_stmt) => {
            let mut errors = check_condition(scopes, scope, &if_stmt.condition);
            errors.extend(check_block(scopes, scope, &if_stmt.then_body));
            for (condition, body) in &if_stmt.elif_branches {
                errors.extend(check_condition(scopes, scope, condition));
                errors.extend(check_block(scopes, scope, body));
            }
            if let Some(body) = &if_stmt.else_body {
                errors.extend(check_block(scopes, scope, body));
            }
            Ok(errors)
        }
        other => Err(AnalysisError::unsupported(other.kind_name(), stmt.span)),
    }
}

/// Check an `if`/`elif` test. A failure stays local to the test so the other branches are
/// still checked.
fn check_condition(scopes: &ScopeTable, scope: ScopeId, condition: &Spanned<Expr>) -> Vec<CompileError> {
    check_expression(scopes, scope, condition).unwrap_or_else(|err| {
        error!(%err, "condition not analyzed");
        vec![err.into_diagnostic(condition.span)]
    })
}

/// Check statements in order. A statement that cannot be analyzed becomes one diagnostic and
/// checking continues with the next statement.
pub fn check_block(scopes: &mut ScopeTable, scope: ScopeId, body: &[Spanned<Statement>]) -> Vec<CompileError> {
    let mut errors = Vec::new();
    for stmt in body {
        debug!(kind = stmt.node.kind_name(), start = stmt.span.start, "checking statement");
        match check_statement(scopes, scope, stmt) {
            Ok(found) => errors.extend(found),
            Err(err) => {
                error!(%err, "statement not analyzed");
                errors.push(err.into_diagnostic(stmt.span));
            }
        }
    }
    errors
}
