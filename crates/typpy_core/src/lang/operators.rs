//! Symbolic operator vocabulary.
//!
//! Word operators (`and`, `or`, `not`, `in`, `is`) are reserved words and live in
//! [`crate::lang::keywords`]; this registry only holds symbolic spellings.
//!
//! ## Examples
//! ```rust
//! use typpy_core::lang::operators::{self, OperatorId};
//!
//! assert_eq!(operators::from_str("//="), Some(OperatorId::SlashSlashEq));
//! assert_eq!(operators::as_str(OperatorId::StarStar), "**");
//! ```

/// Stable identifier for symbolic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorId {
    Plus,
    Minus,
    Star,
    Slash,
    SlashSlash,
    Percent,
    StarStar,
    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Eq,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    SlashSlashEq,
    PercentEq,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorKind {
    Arithmetic,
    Comparison,
    Assignment,
}

#[derive(Debug, Clone, Copy)]
pub struct OperatorInfo {
    pub id: OperatorId,
    pub canonical: &'static str,
    pub kind: OperatorKind,
}

/// Registry of symbolic operators, ordered like [`OperatorId`].
pub const OPERATORS: &[OperatorInfo] = &[
    info(OperatorId::Plus, "+", OperatorKind::Arithmetic),
    info(OperatorId::Minus, "-", OperatorKind::Arithmetic),
    info(OperatorId::Star, "*", OperatorKind::Arithmetic),
    info(OperatorId::Slash, "/", OperatorKind::Arithmetic),
    info(OperatorId::SlashSlash, "//", OperatorKind::Arithmetic),
    info(OperatorId::Percent, "%", OperatorKind::Arithmetic),
    info(OperatorId::StarStar, "**", OperatorKind::Arithmetic),
    info(OperatorId::EqEq, "==", OperatorKind::Comparison),
    info(OperatorId::NotEq, "!=", OperatorKind::Comparison),
    info(OperatorId::Lt, "<", OperatorKind::Comparison),
    info(OperatorId::LtEq, "<=", OperatorKind::Comparison),
    info(OperatorId::Gt, ">", OperatorKind::Comparison),
    info(OperatorId::GtEq, ">=", OperatorKind::Comparison),
    info(OperatorId::Eq, "=", OperatorKind::Assignment),
    info(OperatorId::PlusEq, "+=", OperatorKind::Assignment),
    info(OperatorId::MinusEq, "-=", OperatorKind::Assignment),
    info(OperatorId::StarEq, "*=", OperatorKind::Assignment),
    info(OperatorId::SlashEq, "/=", OperatorKind::Assignment),
    info(OperatorId::SlashSlashEq, "//=", OperatorKind::Assignment),
    info(OperatorId::PercentEq, "%=", OperatorKind::Assignment),
];

pub fn from_str(spelling: &str) -> Option<OperatorId> {
    OPERATORS.iter().find(|o| o.canonical == spelling).map(|o| o.id)
}

pub fn as_str(id: OperatorId) -> &'static str {
    info_for(id).canonical
}

pub fn info_for(id: OperatorId) -> &'static OperatorInfo {
    &OPERATORS[id as usize]
}

const fn info(id: OperatorId, canonical: &'static str, kind: OperatorKind) -> OperatorInfo {
    OperatorInfo { id, canonical, kind }
}
