//! Walk expressions for diagnostics and validate call sites against signatures.

use std::collections::HashSet;

use tracing::debug;

use crate::frontend::ast::{CallArg, Expr, Span, Spanned};
use crate::frontend::diagnostics::CompileError;
use crate::frontend::scope::{ScopeId, ScopeTable};
use crate::frontend::types::Param;

use super::expr_type::get_expr_type;
use super::{AnalysisError, accepts, errors};

/// Report every problem inside `expr`: undefined names and invalid calls, at any depth.
pub fn check_expression(
    scopes: &ScopeTable,
    scope: ScopeId,
    expr: &Spanned<Expr>,
) -> Result<Vec<CompileError>, AnalysisError> {
    let mut errors = Vec::new();
    match &expr.node {
        Expr::Literal(_) => {}
        Expr::Ident(_) => {
            if let Err(err) = get_expr_type(scopes, scope, expr) {
                errors.push(err);
            }
        }
        Expr::Call(callee, args) => match &callee.node {
            Expr::Ident(name) => errors.extend(check_call(scopes, scope, expr.span, name, args)?),
            _ => {
                errors.extend(check_expression(scopes, scope, callee)?);
                for arg in args {
                    errors.extend(check_expression(scopes, scope, arg.value())?);
                }
            }
        },
        Expr::Attribute(base, _) => errors.extend(check_expression(scopes, scope, base)?),
        Expr::Subscript(value, index) => {
            errors.extend(check_expression(scopes, scope, value)?);
            errors.extend(check_expression(scopes, scope, index)?);
        }
        Expr::Tuple(items) | Expr::List(items) | Expr::Set(items) => {
            for item in items {
                errors.extend(check_expression(scopes, scope, item)?);
            }
        }
        Expr::Dict(entries) => {
            for (key, value) in entries {
                errors.extend(check_expression(scopes, scope, key)?);
                errors.extend(check_expression(scopes, scope, value)?);
            }
        }
        Expr::Unary(_, operand) => errors.extend(check_expression(scopes, scope, operand)?),
        Expr::Binary(lhs, _, rhs) => {
            errors.extend(check_expression(scopes, scope, lhs)?);
            errors.extend(check_expression(scopes, scope, rhs)?);
        }
    }
    Ok(errors)
}

/// Validate the arguments of `name(args...)` against the signature `name` resolves to.
///
/// Positional arguments bind the non-keyword-only parameters in declaration order; keyword
/// arguments bind by name.
/// Every problem is reported: excess positionals, unknown keywords, parameters bound twice and
/// argument types the parameter does not accept, in argument order, then one aggregated
/// error for required parameters left unbound. A callee that cannot be resolved yields a single
/// error and its arguments are not analyzed.
///
/// Calling a variable is not validated, only its arguments are walked.
pub fn check_call(
    scopes: &ScopeTable,
    scope: ScopeId,
    call_span: Span,
    name: &str,
    args: &[CallArg],
) -> Result<Vec<CompileError>, AnalysisError> {
    let mut errors = Vec::new();

    if scopes.resolve_variable(scope, name).is_some() {
        debug!(name, "call through a variable is not validated");
        for arg in args {
            errors.extend(check_expression(scopes, scope, arg.value())?);
        }
        return Ok(errors);
    }

    let Some(entry) = scopes.resolve_callable(scope, name) else {
        errors.push(errors::undefined_function(name, call_span));
        return Ok(errors);
    };
    let signature = &entry.signature;

    let positional_count = args.iter().filter(|arg| matches!(arg, CallArg::Positional(_))).count();
    let mut positional_params = signature.positional();
    let mut bound: HashSet<&str> = HashSet::new();
    let mut required: Vec<&str> = signature
        .params
        .iter()
        .filter(|param| !param.has_default)
        .map(|param| param.name.as_str())
        .collect();

    for arg in args {
        errors.extend(check_expression(scopes, scope, arg.value())?);

        match arg {
            CallArg::Positional(value) => {
                let Some(param) = positional_params.next() else {
                    if !signature.variadic {
                        errors.push(errors::too_many_arguments(
                            name,
                            signature.positional().count(),
                            positional_count,
                            value.span,
                        ));
                    }
                    continue;
                };

                errors.extend(check_argument(scopes, scope, name, param, value, value.span)?);
                bound.insert(param.name.as_str());
                required.retain(|r| *r != param.name);
            }
            CallArg::Keyword(keyword, value) => {
                // Underline from the keyword, not the value.
                let anchor = Span::new(value.span.start.saturating_sub(keyword.node.len() + 1), value.span.end);

                let Some(param) = signature.params.iter().find(|p| p.name == keyword.node) else {
                    if !signature.keywords {
                        errors.push(errors::unexpected_keyword(name, &keyword.node, anchor));
                    }
                    continue;
                };

                if bound.contains(param.name.as_str()) {
                    errors.push(errors::duplicate_argument(name, &param.name, call_span));
                }
                errors.extend(check_argument(scopes, scope, name, param, value, anchor)?);
                bound.insert(param.name.as_str());
                required.retain(|r| *r != param.name);
            }
        }
    }

    if !required.is_empty() {
        errors.push(errors::missing_arguments(name, &required, call_span));
    }

    Ok(errors)
}

fn check_argument(
    scopes: &ScopeTable,
    scope: ScopeId,
    function: &str,
    param: &Param,
    value: &Spanned<Expr>,
    anchor: Span,
) -> Result<Option<CompileError>, AnalysisError> {
    // An undefined name inside the argument was reported by the walk already.
    let Ok(actual) = get_expr_type(scopes, scope, value) else {
        return Ok(None);
    };
    if accepts(scopes, scope, &actual, &param.ty)? {
        Ok(None)
    } else {
        Ok(Some(errors::argument_mismatch(function, &param.name, &param.ty, &actual, anchor)))
    }
}
