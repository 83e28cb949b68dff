//! String-like builtin type vocabulary (`str`, `bytes`).

/// Stable identifier for string-like builtin types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StringLikeId {
    Str,
    Bytes,
}

/// Metadata for a string-like builtin type.
#[derive(Debug, Clone, Copy)]
pub struct StringLikeInfo {
    pub id: StringLikeId,
    pub canonical: &'static str,
    pub description: &'static str,
}

/// Registry of string-like builtin types, ordered like [`StringLikeId`].
pub const STRING_LIKE_TYPES: &[StringLikeInfo] = &[
    StringLikeInfo {
        id: StringLikeId::Str,
        canonical: "str",
        description: "Immutable Unicode text.",
    },
    StringLikeInfo {
        id: StringLikeId::Bytes,
        canonical: "bytes",
        description: "Immutable byte sequence.",
    },
];

pub fn from_str(name: &str) -> Option<StringLikeId> {
    STRING_LIKE_TYPES.iter().find(|t| t.canonical == name).map(|t| t.id)
}

pub fn as_str(id: StringLikeId) -> &'static str {
    STRING_LIKE_TYPES[id as usize].canonical
}
