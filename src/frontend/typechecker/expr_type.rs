//! Static type inference for expressions.
//!
//! Inference never mutates a scope. Shapes it does not model produce a warning and
//! [`Type::Unresolved`] instead of an error, so one unknown expression does not stop the analysis
//! of its file. Only names that cannot be found anywhere are errors.

use tracing::{debug, warn};

use typpy_core::lang::types::collections::{self, CollectionTypeId};
use typpy_core::lang::types::numerics::{self, NumericTypeId};
use typpy_core::lang::types::special;
use typpy_core::lang::types::stringlike::{self, StringLikeId};
use typpy_core::{NumericOp, result_numeric_type};

use crate::frontend::ast::{BinaryOp, Expr, Literal, Spanned, UnaryOp};
use crate::frontend::diagnostics::CompileError;
use crate::frontend::parser;
use crate::frontend::scope::{ScopeId, ScopeTable};
use crate::frontend::types::Type;

use super::errors;

/// Infer the static type of `expr` as seen from `scope`.
///
/// ## Errors
/// - `UnresolvedSymbol` when a name or a called function is not defined.
pub fn get_expr_type(scopes: &ScopeTable, scope: ScopeId, expr: &Spanned<Expr>) -> Result<Type, CompileError> {
    match &expr.node {
        Expr::Literal(literal) => Ok(literal_type(literal)),
        Expr::Ident(name) => name_type(scopes, scope, name, expr),
        Expr::Subscript(value, index) => subscript_type(scopes, scope, value, index),
        Expr::Call(callee, _) => match &callee.node {
            Expr::Ident(name) => call_type(scopes, scope, name, callee),
            other => Ok(unsupported(other)),
        },
        Expr::Tuple(items) => Ok(Type::Tuple(types_of(scopes, scope, items)?)),
        Expr::List(items) => container_type(scopes, scope, CollectionTypeId::List, items),
        Expr::Set(items) => container_type(scopes, scope, CollectionTypeId::Set, items),
        Expr::Dict(entries) => {
            let dict = collections::as_str(CollectionTypeId::Dict);
            if entries.is_empty() {
                return Ok(Type::primitive(dict));
            }
            let mut keys = Vec::with_capacity(entries.len());
            let mut values = Vec::with_capacity(entries.len());
            for (key, value) in entries {
                keys.push(get_expr_type(scopes, scope, key)?);
                values.push(get_expr_type(scopes, scope, value)?);
            }
            Ok(Type::generic(dict, vec![Type::union(keys), Type::union(values)]))
        }
        Expr::Unary(op, operand) => {
            let operand_ty = get_expr_type(scopes, scope, operand)?;
            Ok(unary_type(*op, &operand_ty).unwrap_or_else(|| unsupported(&expr.node)))
        }
        Expr::Binary(lhs, op, rhs) => {
            let lhs_ty = get_expr_type(scopes, scope, lhs)?;
            let rhs_ty = get_expr_type(scopes, scope, rhs)?;
            Ok(binary_type(&lhs_ty, *op, &rhs_ty).unwrap_or_else(|| unsupported(&expr.node)))
        }
        Expr::Attribute(..) => Ok(unsupported(&expr.node)),
    }
}

/// Infer the type an annotation expression denotes.
///
/// Like [`get_expr_type`], except that string literals are parsed as deferred annotations.
pub fn annotation_type(scopes: &ScopeTable, scope: ScopeId, annotation: &Spanned<Expr>) -> Result<Type, CompileError> {
    if let Expr::Literal(Literal::Str(text)) = &annotation.node {
        return match parser::parse_expression(text) {
            Ok(parsed) => annotation_type(scopes, scope, &parsed),
            Err(_) => {
                warn!(annotation = %text, "unparsable string annotation");
                Ok(Type::Unresolved)
            }
        };
    }
    get_expr_type(scopes, scope, annotation)
}

fn literal_type(literal: &Literal) -> Type {
    match literal {
        Literal::Int(_) => numeric(NumericTypeId::Int),
        Literal::Float(_) => numeric(NumericTypeId::Float),
        Literal::Complex(_) => numeric(NumericTypeId::Complex),
        Literal::Bool(_) => numeric(NumericTypeId::Bool),
        Literal::Str(_) => Type::primitive(stringlike::as_str(StringLikeId::Str)),
        Literal::Bytes(_) => Type::primitive(stringlike::as_str(StringLikeId::Bytes)),
        Literal::None => Type::NoneType,
    }
}

fn numeric(id: NumericTypeId) -> Type {
    Type::primitive(numerics::as_str(id))
}

/// Variables first, then type names (the name denotes the type itself).
fn name_type(scopes: &ScopeTable, scope: ScopeId, name: &str, expr: &Spanned<Expr>) -> Result<Type, CompileError> {
    if let Some(ty) = scopes.resolve_variable(scope, name) {
        return Ok(ty.clone());
    }
    if let Some(nominal) = scopes.resolve_type(scope, name) {
        return Ok(nominal.ty.clone());
    }
    if special::from_str(name).is_some() {
        debug!(name, "bare special form used as a value");
        return Ok(Type::Unresolved);
    }
    if scopes.resolve_callable(scope, name).is_some() {
        debug!(name, "function used as a value");
        return Ok(Type::Unresolved);
    }
    Err(errors::undefined_name(name, expr.span))
}

fn call_type(scopes: &ScopeTable, scope: ScopeId, name: &str, callee: &Spanned<Expr>) -> Result<Type, CompileError> {
    if let Some(ty) = scopes.resolve_variable(scope, name) {
        return Ok(match ty {
            Type::Any => Type::Any,
            _ => {
                warn!(name, ty = %ty, "call through a variable");
                Type::Unresolved
            }
        });
    }
    match scopes.resolve_callable(scope, name) {
        Some(entry) => Ok(entry.signature.returns.clone()),
        None => Err(errors::undefined_function(name, callee.span)),
    }
}

/// `Outer[Inner, ...]` builds a parametrized type, unless `Outer` is a variable, which is indexed.
fn subscript_type(
    scopes: &ScopeTable,
    scope: ScopeId,
    value: &Spanned<Expr>,
    index: &Spanned<Expr>,
) -> Result<Type, CompileError> {
    let origin = match &value.node {
        Expr::Ident(name) => {
            if let Some(container) = scopes.resolve_variable(scope, name) {
                return Ok(index_type(container, index).unwrap_or_else(|| {
                    warn!(container = %container, "unsupported index operation");
                    Type::Unresolved
                }));
            }
            if scopes.resolve_type(scope, name).is_none() && special::from_str(name).is_none() {
                return Err(errors::undefined_name(name, value.span));
            }
            name.as_str()
        }
        Expr::Attribute(_, attr) => attr.node.as_str(),
        other => return Ok(unsupported(other)),
    };

    let args = match &index.node {
        Expr::Tuple(items) => items
            .iter()
            .map(|item| annotation_type(scopes, scope, item))
            .collect::<Result<Vec<_>, _>>()?,
        _ => vec![annotation_type(scopes, scope, index)?],
    };
    Ok(Type::parametrize(origin, args).unwrap_or_else(|| {
        warn!(origin, "wrong number of type arguments");
        Type::Unresolved
    }))
}

/// Element type produced by `container[index]`.
fn index_type(container: &Type, index: &Spanned<Expr>) -> Option<Type> {
    match container {
        Type::Any => Some(Type::Any),
        Type::Tuple(elements) => {
            let position = match &index.node {
                Expr::Literal(Literal::Int(i)) => *i,
                Expr::Unary(UnaryOp::Neg, inner) => match &inner.node {
                    Expr::Literal(Literal::Int(i)) => -*i,
                    _ => return None,
                },
                _ => return Some(Type::union(elements.iter().cloned())),
            };
            let len = i64::try_from(elements.len()).ok()?;
            let position = if position < 0 { position + len } else { position };
            usize::try_from(position).ok().and_then(|p| elements.get(p)).cloned()
        }
        Type::Generic(origin, args) => match (collections::from_str(origin), args.as_slice()) {
            (Some(CollectionTypeId::List), [element]) => Some(element.clone()),
            (Some(CollectionTypeId::Dict), [_, value]) => Some(value.clone()),
            _ => None,
        },
        Type::Primitive(name) => match stringlike::from_str(name) {
            Some(StringLikeId::Str) => Some(container.clone()),
            Some(StringLikeId::Bytes) => Some(numeric(NumericTypeId::Int)),
            None if collections::from_str(name).is_some() => Some(Type::Any),
            None => None,
        },
        _ => None,
    }
}

fn types_of(scopes: &ScopeTable, scope: ScopeId, items: &[Spanned<Expr>]) -> Result<Vec<Type>, CompileError> {
    items.iter().map(|item| get_expr_type(scopes, scope, item)).collect()
}

/// `[]` is the bare container; `[1, "a"]` is `list[Union[int, str]]`.
fn container_type(
    scopes: &ScopeTable,
    scope: ScopeId,
    container: CollectionTypeId,
    items: &[Spanned<Expr>],
) -> Result<Type, CompileError> {
    let origin = collections::as_str(container);
    if items.is_empty() {
        return Ok(Type::primitive(origin));
    }
    let element = Type::union(types_of(scopes, scope, items)?);
    Ok(Type::generic(origin, vec![element]))
}

fn unary_type(op: UnaryOp, operand: &Type) -> Option<Type> {
    match op {
        UnaryOp::Not => Some(numeric(NumericTypeId::Bool)),
        UnaryOp::Neg | UnaryOp::Pos => match operand {
            Type::Any => Some(Type::Any),
            // `-True` is `-1`
            _ => operand
                .numeric()
                .map(|id| numeric(numerics::wider(id, NumericTypeId::Int))),
        },
    }
}

fn binary_type(lhs: &Type, op: BinaryOp, rhs: &Type) -> Option<Type> {
    if op.is_comparison() {
        return Some(numeric(NumericTypeId::Bool));
    }
    match op {
        BinaryOp::And | BinaryOp::Or => return Some(Type::union([lhs.clone(), rhs.clone()])),
        _ if matches!(lhs, Type::Any) || matches!(rhs, Type::Any) => return Some(Type::Any),
        _ => {}
    }

    if let (Some(l), Some(r), Some(num_op)) = (lhs.numeric(), rhs.numeric(), numeric_op(op)) {
        return Some(numeric(result_numeric_type(num_op, l, r)));
    }

    let is_int = |ty: &Type| matches!(ty.numeric(), Some(NumericTypeId::Bool | NumericTypeId::Int));
    let is_sequence = |ty: &Type| {
        matches!(ty, Type::Tuple(_))
            || ty.origin().is_some_and(|o| {
                stringlike::from_str(o).is_some() || collections::from_str(o) == Some(CollectionTypeId::List)
            })
    };
    match op {
        BinaryOp::Add if lhs == rhs && is_sequence(lhs) => Some(lhs.clone()),
        BinaryOp::Add => match (lhs, rhs) {
            (Type::Tuple(a), Type::Tuple(b)) => Some(Type::Tuple(a.iter().chain(b).cloned().collect())),
            _ => None,
        },
        BinaryOp::Mul if is_sequence(lhs) && is_int(rhs) && !matches!(lhs, Type::Tuple(_)) => Some(lhs.clone()),
        BinaryOp::Mul if is_int(lhs) && is_sequence(rhs) && !matches!(rhs, Type::Tuple(_)) => Some(rhs.clone()),
        // printf-style formatting
        BinaryOp::Mod if lhs.origin().and_then(stringlike::from_str).is_some() => Some(lhs.clone()),
        _ => None,
    }
}

fn numeric_op(op: BinaryOp) -> Option<NumericOp> {
    Some(match op {
        BinaryOp::Add => NumericOp::Add,
        BinaryOp::Sub => NumericOp::Sub,
        BinaryOp::Mul => NumericOp::Mul,
        BinaryOp::Div => NumericOp::Div,
        BinaryOp::FloorDiv => NumericOp::FloorDiv,
        BinaryOp::Mod => NumericOp::Mod,
        BinaryOp::Pow => NumericOp::Pow,
        _ => return None,
    })
}

fn unsupported(expr: &Expr) -> Type {
    warn!(kind = expr.kind_name(), "expression type is not inferred");
    Type::Unresolved
}
