//! Provide the pure vocabulary and numeric policy shared by the typpy syntax frontend and analyzer.
//!
//! This crate is intentionally small and dependency-free. It answers questions such as "is `elif`
//! reserved?", "which builtin type does `List` name?" or "what does `int + float` produce?" without
//! knowing anything about ASTs, scopes or files.
//!
//! ## Notes
//!
//! - **No IO**, no global mutable state, no panics.
//! - Numeric policy follows the Python numeric tower: `bool ⊂ int ⊂ float ⊂ complex`.

pub mod lang;

use lang::types::numerics::{self, NumericTypeId};

/// Represent a binary operator subject to numeric promotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericOp {
    Add,
    Sub,
    Mul,
    /// `/` always produces at least `float`.
    Div,
    /// `//`
    FloorDiv,
    Mod,
    Pow,
}

/// Determine the numeric result type of a binary arithmetic operation.
///
/// ## Parameters
/// - `op`: the arithmetic operator.
/// - `lhs`, `rhs`: tower members of the operands.
///
/// ## Returns
/// - (`NumericTypeId`): the wider of both operands, where `bool` arithmetic yields `int` and true
///   division yields at least `float`.
///
/// ## Examples
/// ```rust
/// use typpy_core::{result_numeric_type, NumericOp};
/// use typpy_core::lang::types::numerics::NumericTypeId;
///
/// assert_eq!(result_numeric_type(NumericOp::Div, NumericTypeId::Int, NumericTypeId::Int), NumericTypeId::Float);
/// assert_eq!(result_numeric_type(NumericOp::Add, NumericTypeId::Bool, NumericTypeId::Bool), NumericTypeId::Int);
/// ```
pub fn result_numeric_type(op: NumericOp, lhs: NumericTypeId, rhs: NumericTypeId) -> NumericTypeId {
    let wider = numerics::wider(lhs, rhs);
    let floor = match op {
        NumericOp::Div => NumericTypeId::Float,
        _ => NumericTypeId::Int,
    };
    numerics::wider(wider, floor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_div_is_at_least_float() {
        assert_eq!(
            result_numeric_type(NumericOp::Div, NumericTypeId::Int, NumericTypeId::Int),
            NumericTypeId::Float
        );
        assert_eq!(
            result_numeric_type(NumericOp::Div, NumericTypeId::Complex, NumericTypeId::Int),
            NumericTypeId::Complex
        );
    }

    #[test]
    fn test_bool_arithmetic_promotes_to_int() {
        assert_eq!(
            result_numeric_type(NumericOp::Add, NumericTypeId::Bool, NumericTypeId::Bool),
            NumericTypeId::Int
        );
        assert_eq!(
            result_numeric_type(NumericOp::Mul, NumericTypeId::Bool, NumericTypeId::Float),
            NumericTypeId::Float
        );
    }

    #[test]
    fn test_floor_div_keeps_operand_width() {
        assert_eq!(
            result_numeric_type(NumericOp::FloorDiv, NumericTypeId::Int, NumericTypeId::Int),
            NumericTypeId::Int
        );
        assert_eq!(
            result_numeric_type(NumericOp::Pow, NumericTypeId::Float, NumericTypeId::Int),
            NumericTypeId::Float
        );
    }
}
