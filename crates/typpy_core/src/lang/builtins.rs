//! Builtin callable vocabulary.
//!
//! Each entry records the callable's parameters and return type as **type spellings** (e.g.
//! `"int"`, `"Any"`). The analyzer lowers these spellings into its own type representation when it
//! builds the builtin scope, so this registry stays free of analyzer types.
//!
//! ## Notes
//! - Constructors of builtin types (`int(...)`, `list(...)`) are listed here too; they return the
//!   bare, unparametrized type.
//! - `variadic` callables accept any number of extra positional arguments (`print(a, b, c)`).
//!
//! ## Examples
//! ```rust
//! use typpy_core::lang::builtins::{self, BuiltinFnId};
//!
//! assert_eq!(builtins::from_str("len"), Some(BuiltinFnId::Len));
//! assert_eq!(builtins::info_for(BuiltinFnId::Len).returns, "int");
//! ```

/// Stable identifier for a builtin callable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinFnId {
    Print,
    Len,
    Abs,
    Repr,
    IsInstance,
    Range,
    Sorted,
    Min,
    Max,
    Sum,
    // Constructors
    Bool,
    Int,
    Float,
    Complex,
    Str,
    Bytes,
    List,
    Dict,
    Set,
    FrozenSet,
    Tuple,
    Object,
    Type,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinKind {
    Function,
    Constructor,
}

/// One declared parameter of a builtin callable.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinParam {
    pub name: &'static str,
    pub ty: &'static str,
    pub has_default: bool,
}

/// Metadata for a builtin callable.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinFnInfo {
    pub id: BuiltinFnId,
    pub canonical: &'static str,
    pub kind: BuiltinKind,
    pub params: &'static [BuiltinParam],
    pub variadic: bool,
    pub returns: &'static str,
}

const fn required(name: &'static str, ty: &'static str) -> BuiltinParam {
    BuiltinParam {
        name,
        ty,
        has_default: false,
    }
}

const fn optional(name: &'static str, ty: &'static str) -> BuiltinParam {
    BuiltinParam {
        name,
        ty,
        has_default: true,
    }
}

/// Registry of all builtin callables, ordered like [`BuiltinFnId`].
pub const BUILTIN_FUNCTIONS: &[BuiltinFnInfo] = &[
    function(BuiltinFnId::Print, "print", &[], true, "None"),
    function(BuiltinFnId::Len, "len", &[required("obj", "Any")], false, "int"),
    function(BuiltinFnId::Abs, "abs", &[required("x", "Any")], false, "Any"),
    function(BuiltinFnId::Repr, "repr", &[required("obj", "Any")], false, "str"),
    function(
        BuiltinFnId::IsInstance,
        "isinstance",
        &[required("obj", "Any"), required("class_or_tuple", "Any")],
        false,
        "bool",
    ),
    function(
        BuiltinFnId::Range,
        "range",
        &[required("start", "int"), optional("stop", "int"), optional("step", "int")],
        false,
        "range",
    ),
    function(BuiltinFnId::Sorted, "sorted", &[required("iterable", "Any")], false, "list"),
    function(BuiltinFnId::Min, "min", &[required("iterable", "Any")], true, "Any"),
    function(BuiltinFnId::Max, "max", &[required("iterable", "Any")], true, "Any"),
    function(
        BuiltinFnId::Sum,
        "sum",
        &[required("iterable", "Any"), optional("start", "Any")],
        false,
        "Any",
    ),
    constructor(BuiltinFnId::Bool, "bool", &[optional("o", "Any")], false),
    constructor(BuiltinFnId::Int, "int", &[optional("x", "Any"), optional("base", "int")], false),
    constructor(BuiltinFnId::Float, "float", &[optional("x", "Any")], false),
    constructor(
        BuiltinFnId::Complex,
        "complex",
        &[optional("real", "Any"), optional("imag", "Any")],
        false,
    ),
    constructor(
        BuiltinFnId::Str,
        "str",
        &[optional("object", "Any"), optional("encoding", "str")],
        false,
    ),
    constructor(BuiltinFnId::Bytes, "bytes", &[optional("source", "Any")], false),
    constructor(BuiltinFnId::List, "list", &[optional("iterable", "Any")], false),
    constructor(BuiltinFnId::Dict, "dict", &[optional("mapping", "Any")], false),
    constructor(BuiltinFnId::Set, "set", &[optional("iterable", "Any")], false),
    constructor(BuiltinFnId::FrozenSet, "frozenset", &[optional("iterable", "Any")], false),
    constructor(BuiltinFnId::Tuple, "tuple", &[optional("iterable", "Any")], false),
    constructor(BuiltinFnId::Object, "object", &[], false),
    constructor(BuiltinFnId::Type, "type", &[required("object", "Any")], false),
];

/// Resolve a spelling to a [`BuiltinFnId`] (case-sensitive).
pub fn from_str(name: &str) -> Option<BuiltinFnId> {
    BUILTIN_FUNCTIONS.iter().find(|f| f.canonical == name).map(|f| f.id)
}

/// Return the canonical spelling of a builtin callable.
pub fn as_str(id: BuiltinFnId) -> &'static str {
    info_for(id).canonical
}

/// Return the full metadata entry for a builtin callable.
pub fn info_for(id: BuiltinFnId) -> &'static BuiltinFnInfo {
    &BUILTIN_FUNCTIONS[id as usize]
}

const fn function(
    id: BuiltinFnId,
    canonical: &'static str,
    params: &'static [BuiltinParam],
    variadic: bool,
    returns: &'static str,
) -> BuiltinFnInfo {
    BuiltinFnInfo {
        id,
        canonical,
        kind: BuiltinKind::Function,
        params,
        variadic,
        returns,
    }
}

/// Constructors return the type they construct.
const fn constructor(
    id: BuiltinFnId,
    canonical: &'static str,
    params: &'static [BuiltinParam],
    variadic: bool,
) -> BuiltinFnInfo {
    BuiltinFnInfo {
        id,
        canonical,
        kind: BuiltinKind::Constructor,
        params,
        variadic,
        returns: canonical,
    }
}
