//! Container / generic-base builtin type vocabulary.
//!
//! Every container has a lowercase builtin spelling (`list`) and a `typing` alias (`List`). Both
//! resolve to the same [`CollectionTypeId`] and the canonical (builtin) spelling is what types
//! display as.
//!
//! ## Examples
//! ```rust
//! use typpy_core::lang::types::collections::{self, CollectionTypeId};
//!
//! assert_eq!(collections::from_str("List"), Some(CollectionTypeId::List));
//! assert_eq!(collections::from_str("list"), Some(CollectionTypeId::List));
//! assert_eq!(collections::as_str(CollectionTypeId::Dict), "dict");
//! ```

/// Stable identifier for container builtin types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionTypeId {
    List,
    Dict,
    Set,
    FrozenSet,
    Tuple,
    Type,
}

/// How many type arguments a container takes when parametrized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeArity {
    Exactly(usize),
    /// `tuple[int, str, ...]`
    Variadic,
}

/// Metadata for a container builtin type.
#[derive(Debug, Clone, Copy)]
pub struct CollectionTypeInfo {
    pub id: CollectionTypeId,
    pub canonical: &'static str,
    pub aliases: &'static [&'static str],
    pub arity: TypeArity,
    /// Whether destructuring a value of this container yields its single element type.
    pub iterable: bool,
}

/// Registry of container builtin types, ordered like [`CollectionTypeId`].
pub const COLLECTION_TYPES: &[CollectionTypeInfo] = &[
    info(CollectionTypeId::List, "list", &["List"], TypeArity::Exactly(1), true),
    info(CollectionTypeId::Dict, "dict", &["Dict"], TypeArity::Exactly(2), false),
    info(CollectionTypeId::Set, "set", &["Set"], TypeArity::Exactly(1), true),
    info(
        CollectionTypeId::FrozenSet,
        "frozenset",
        &["FrozenSet"],
        TypeArity::Exactly(1),
        true,
    ),
    info(CollectionTypeId::Tuple, "tuple", &["Tuple"], TypeArity::Variadic, false),
    info(CollectionTypeId::Type, "type", &["Type"], TypeArity::Exactly(1), false),
];

/// Resolve a canonical spelling or alias to a [`CollectionTypeId`] (case-sensitive).
pub fn from_str(name: &str) -> Option<CollectionTypeId> {
    COLLECTION_TYPES
        .iter()
        .find(|t| t.canonical == name || t.aliases.contains(&name))
        .map(|t| t.id)
}

/// Return the canonical spelling for a container type.
pub fn as_str(id: CollectionTypeId) -> &'static str {
    info_for(id).canonical
}

/// Return the full metadata entry for a container type.
pub fn info_for(id: CollectionTypeId) -> &'static CollectionTypeInfo {
    &COLLECTION_TYPES[id as usize]
}

const fn info(
    id: CollectionTypeId,
    canonical: &'static str,
    aliases: &'static [&'static str],
    arity: TypeArity,
    iterable: bool,
) -> CollectionTypeInfo {
    CollectionTypeInfo {
        id,
        canonical,
        aliases,
        arity,
        iterable,
    }
}
