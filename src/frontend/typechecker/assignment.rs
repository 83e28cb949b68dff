//! Assignment validation: plain, chained, destructuring and annotated assignments.
//!
//! This is the only place that adds bindings to a scope after it has been populated.

use typpy_core::lang::types::collections;

use crate::frontend::ast::{AnnAssignStmt, AssignStmt, AssignTarget, Ident, Span, Spanned, Statement};
use crate::frontend::diagnostics::CompileError;
use crate::frontend::scope::{ScopeId, ScopeTable};
use crate::frontend::types::Type;

use super::calls::check_expression;
use super::expr_type::{annotation_type, get_expr_type};
use super::{AnalysisError, accepts, errors};

/// Check an assignment statement and record the bindings it introduces.
///
/// ## Errors
/// - [`AnalysisError::UnsupportedConstruct`] for attribute or subscript targets, and for
///   statements that are not assignments.
pub fn check_assignment(
    scopes: &mut ScopeTable,
    scope: ScopeId,
    stmt: &Spanned<Statement>,
) -> Result<Vec<CompileError>, AnalysisError> {
    match &stmt.node {
        Statement::Assign(assign) => check_plain(scopes, scope, assign, stmt.span),
        Statement::AnnAssign(ann) => check_annotated(scopes, scope, ann, stmt.span),
        other => Err(AnalysisError::unsupported(other.kind_name(), stmt.span)),
    }
}

fn check_plain(
    scopes: &mut ScopeTable,
    scope: ScopeId,
    assign: &AssignStmt,
    span: Span,
) -> Result<Vec<CompileError>, AnalysisError> {
    if let Some(target) = assign.targets.iter().find(|t| matches!(t.node, AssignTarget::Expr(_))) {
        let construct = match &target.node {
            AssignTarget::Expr(expr) => format!("assignment to {}", expr.kind_name()),
            _ => "assignment".to_string(),
        };
        return Err(AnalysisError::unsupported(construct, target.span));
    }

    let mut errors = check_expression(scopes, scope, &assign.value)?;
    let value_ty = get_expr_type(scopes, scope, &assign.value).unwrap_or(Type::Unresolved);

    for target in &assign.targets {
        match &target.node {
            AssignTarget::Name(name) => errors.extend(bind(scopes, scope, name, value_ty.clone(), span)?),
            AssignTarget::Tuple(names) => errors.extend(destructure(scopes, scope, names, &value_ty, span)?),
            AssignTarget::Expr(_) => {}
        }
    }
    Ok(errors)
}

/// Bind `name` to `ty`, unless the name is already recorded with a type that `ty` may not replace.
fn bind(
    scopes: &mut ScopeTable,
    scope: ScopeId,
    name: &str,
    ty: Type,
    span: Span,
) -> Result<Option<CompileError>, AnalysisError> {
    if let Some(prior) = scopes.resolve_variable(scope, name) {
        if !can_rebind(scopes, scope, prior, &ty)? {
            return Ok(Some(errors::assignment_mismatch(name, prior, &ty, span)));
        }
    }
    scopes.add_variable(scope, name, ty);
    Ok(None)
}

/// Nominal types only rebind to the same nominal type (`int` stays `int`, `bool` is rejected),
/// though a bare container and its parametrizations are interchangeable. Other recorded types
/// accept any subtype.
fn can_rebind(scopes: &ScopeTable, scope: ScopeId, prior: &Type, new: &Type) -> Result<bool, AnalysisError> {
    if prior == new {
        return Ok(true);
    }
    if prior.is_nominal() && new.is_nominal() && (prior.origin().is_none() || prior.origin() != new.origin()) {
        return Ok(false);
    }
    accepts(scopes, scope, new, prior)
}

/// `a, b = value`: every target is checked, like the targets of a chained assignment.
fn destructure(
    scopes: &mut ScopeTable,
    scope: ScopeId,
    names: &[Spanned<Ident>],
    value_ty: &Type,
    span: Span,
) -> Result<Vec<CompileError>, AnalysisError> {
    let element_types: Vec<Type> = match value_ty {
        Type::Tuple(elements) if elements.len() == names.len() => elements.clone(),
        Type::Tuple(elements) => return Ok(vec![errors::unpack_arity(elements.len(), names.len(), span)]),
        Type::Any | Type::Unresolved => vec![value_ty.clone(); names.len()],
        Type::Generic(origin, args) if iterable(origin) && args.len() == 1 => vec![args[0].clone(); names.len()],
        Type::Primitive(origin) if iterable(origin) => vec![Type::Any; names.len()],
        other => return Ok(vec![errors::unpack_non_tuple(names.len(), other, span)]),
    };

    let mut errors = Vec::new();
    for (name, ty) in names.iter().zip(element_types) {
        errors.extend(bind(scopes, scope, &name.node, ty, span)?);
    }
    Ok(errors)
}

fn iterable(origin: &str) -> bool {
    collections::from_str(origin).is_some_and(|id| collections::info_for(id).iterable)
}

/// `name: T = value` binds the value's own type once `T` accepts it; `name: T` binds `T`.
fn check_annotated(
    scopes: &mut ScopeTable,
    scope: ScopeId,
    ann: &AnnAssignStmt,
    span: Span,
) -> Result<Vec<CompileError>, AnalysisError> {
    let mut errors = Vec::new();
    let annotation = annotation_type(scopes, scope, &ann.annotation).unwrap_or_else(|err| {
        errors.push(err);
        Type::Unresolved
    });
    let name = ann.target.node.as_str();

    let Some(value) = &ann.value else {
        scopes.add_variable(scope, name, annotation);
        return Ok(errors);
    };

    errors.extend(check_expression(scopes, scope, value)?);
    let value_ty = get_expr_type(scopes, scope, value).unwrap_or(Type::Unresolved);

    if value_ty.contains_unresolved() {
        scopes.add_variable(scope, name, annotation);
    } else if accepts(scopes, scope, &value_ty, &annotation)? {
        scopes.add_variable(scope, name, value_ty);
    } else {
        errors.push(errors::assignment_mismatch(name, &annotation, &value_ty, span));
    }
    Ok(errors)
}
