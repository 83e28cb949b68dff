//! Numeric builtin type vocabulary and the numeric tower.
//!
//! The tower is `bool ⊂ int ⊂ float ⊂ complex`: a value of a lower rank is accepted wherever a
//! higher rank is expected, even though only `bool ⊂ int` is a real subclass relationship.
//!
//! ## Examples
//! ```rust
//! use typpy_core::lang::types::numerics::{self, NumericTypeId};
//!
//! assert_eq!(numerics::from_str("complex"), Some(NumericTypeId::Complex));
//! assert!(numerics::is_promotable(NumericTypeId::Int, NumericTypeId::Float));
//! assert!(!numerics::is_promotable(NumericTypeId::Float, NumericTypeId::Int));
//! ```

/// Stable identifier for numeric builtin types, declared from narrowest to widest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NumericTypeId {
    Bool,
    Int,
    Float,
    Complex,
}

/// Metadata for a numeric builtin type.
#[derive(Debug, Clone, Copy)]
pub struct NumericTypeInfo {
    pub id: NumericTypeId,
    pub canonical: &'static str,
    pub description: &'static str,
}

/// Registry of numeric builtin types, ordered like [`NumericTypeId`].
pub const NUMERIC_TYPES: &[NumericTypeInfo] = &[
    info(NumericTypeId::Bool, "bool", "Boolean; a subclass of int."),
    info(NumericTypeId::Int, "int", "Arbitrary precision integer."),
    info(NumericTypeId::Float, "float", "Double precision floating point number."),
    info(NumericTypeId::Complex, "complex", "Complex number with float components."),
];

/// Resolve a type name to a [`NumericTypeId`] (case-sensitive).
pub fn from_str(name: &str) -> Option<NumericTypeId> {
    NUMERIC_TYPES.iter().find(|t| t.canonical == name).map(|t| t.id)
}

/// Return the canonical spelling for a numeric builtin type.
pub fn as_str(id: NumericTypeId) -> &'static str {
    info_for(id).canonical
}

/// Return the full metadata entry for a numeric builtin type.
pub fn info_for(id: NumericTypeId) -> &'static NumericTypeInfo {
    &NUMERIC_TYPES[id as usize]
}

/// Return `true` if a value of `actual` is accepted where `expected` is required.
pub fn is_promotable(actual: NumericTypeId, expected: NumericTypeId) -> bool {
    actual <= expected
}

/// Return the wider of two tower members.
pub fn wider(a: NumericTypeId, b: NumericTypeId) -> NumericTypeId {
    a.max(b)
}

const fn info(id: NumericTypeId, canonical: &'static str, description: &'static str) -> NumericTypeInfo {
    NumericTypeInfo {
        id,
        canonical,
        description,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_is_ordered_like_ids() {
        for (index, t) in NUMERIC_TYPES.iter().enumerate() {
            assert_eq!(t.id as usize, index);
        }
    }

    #[test]
    fn test_tower_accepts_every_narrower_member() {
        use NumericTypeId::*;
        let accepted = [
            (Bool, Int),
            (Bool, Float),
            (Bool, Complex),
            (Int, Float),
            (Int, Complex),
            (Float, Complex),
        ];
        for (actual, expected) in accepted {
            assert!(is_promotable(actual, expected), "{actual:?} -> {expected:?}");
            assert!(!is_promotable(expected, actual), "{expected:?} -> {actual:?}");
        }
    }
}
