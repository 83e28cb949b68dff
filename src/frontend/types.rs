//! The static type algebra used by the analyzer.
//!
//! [`Type`] is a closed set of shapes: nominal primitives (`int`, `str`, user classes),
//! parametrized generics (`list[int]`), unions, fixed-arity tuples, `Any`, the type of `None`,
//! and an `Unresolved` marker for expressions the analyzer could not type.
//!
//! ## Notes
//! - Unions are built through [`Type::union`], which flattens nested unions, drops duplicates and
//!   collapses a single member. Union equality ignores member order.
//! - [`Type`]'s `Display` matches how the types are written in annotations, so diagnostics read
//!   like source code: `Optional[int]`, `Union[int, str]`, `tuple[int, float]`, `list[int]`.

use std::fmt;

use typpy_core::lang::types::collections::{self, CollectionTypeId};
use typpy_core::lang::types::numerics::{self, NumericTypeId};
use typpy_core::lang::types::special::{self, SpecialFormId};
use typpy_core::lang::types::{NONE, OBJECT};

/// A static type.
#[derive(Debug, Clone)]
pub enum Type {
    /// A nominal type without parameters: builtin (`int`, `list`) or user class.
    Primitive(String),
    /// A parametrized nominal type: `list[int]`, `dict[str, float]`.
    Generic(String, Vec<Type>),
    /// Never constructed directly; use [`Type::union`].
    Union(Vec<Type>),
    Tuple(Vec<Type>),
    Any,
    NoneType,
    /// The analyzer could not infer this expression's type.
    Unresolved,
}

impl Type {
    pub fn primitive(name: impl Into<String>) -> Self {
        Type::Primitive(name.into())
    }

    pub fn generic(origin: impl Into<String>, args: Vec<Type>) -> Self {
        Type::Generic(origin.into(), args)
    }

    /// Build a union, flattening nested unions and removing duplicates.
    ///
    /// A single distinct member is returned as-is; an empty member list yields `Any`.
    pub fn union(members: impl IntoIterator<Item = Type>) -> Self {
        let mut flat: Vec<Type> = Vec::new();
        for member in members {
            let nested = match member {
                Type::Union(inner) => inner,
                other => vec![other],
            };
            for ty in nested {
                if !flat.contains(&ty) {
                    flat.push(ty);
                }
            }
        }
        match flat.len() {
            0 => Type::Any,
            1 => flat.pop().unwrap_or(Type::Any),
            _ => Type::Union(flat),
        }
    }

    /// `Optional[inner]`
    pub fn optional(inner: Type) -> Self {
        Type::union([inner, Type::NoneType])
    }

    /// Lower a builtin registry spelling (`"int"`, `"Any"`, `"None"`) into a type.
    pub fn from_spelling(spelling: &str) -> Self {
        if spelling == NONE {
            Type::NoneType
        } else if special::from_str(spelling) == Some(SpecialFormId::Any) {
            Type::Any
        } else {
            Type::Primitive(canonical_name(spelling).to_string())
        }
    }

    /// Apply type arguments to an origin name, as in `Origin[args...]`.
    ///
    /// ## Returns
    /// - `Optional[X]` / `Union[...]`: a union.
    /// - `tuple[...]` / `Tuple[...]`: a fixed-arity [`Type::Tuple`].
    /// - any other origin: a [`Type::Generic`] using the canonical container spelling.
    /// - `None` when a special form is used with the wrong number of arguments.
    pub fn parametrize(origin: &str, args: Vec<Type>) -> Option<Self> {
        match special::from_str(origin) {
            Some(SpecialFormId::Optional) => {
                let [inner]: [Type; 1] = args.try_into().ok()?;
                return Some(Type::optional(inner));
            }
            Some(SpecialFormId::Union) if !args.is_empty() => return Some(Type::union(args)),
            Some(_) => return None,
            None => {}
        }
        if collections::from_str(origin) == Some(CollectionTypeId::Tuple) {
            return Some(Type::Tuple(args));
        }
        Some(Type::Generic(canonical_name(origin).to_string(), args))
    }

    /// Nominal origin name of primitives, generics and tuples (`"tuple"`).
    pub fn origin(&self) -> Option<&str> {
        match self {
            Type::Primitive(name) | Type::Generic(name, _) => Some(name),
            Type::Tuple(_) => Some(collections::as_str(CollectionTypeId::Tuple)),
            _ => None,
        }
    }

    /// Member of the numeric tower this type denotes, if any.
    pub fn numeric(&self) -> Option<NumericTypeId> {
        match self {
            Type::Primitive(name) => numerics::from_str(name),
            _ => None,
        }
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Type::Primitive(name) if name == OBJECT)
    }

    /// Whether this type, or any type nested inside it, is [`Type::Unresolved`].
    pub fn contains_unresolved(&self) -> bool {
        match self {
            Type::Unresolved => true,
            Type::Generic(_, args) | Type::Union(args) | Type::Tuple(args) => args.iter().any(Type::contains_unresolved),
            Type::Primitive(_) | Type::Any | Type::NoneType => false,
        }
    }

    /// Nominal types compare by identity when a variable is rebound.
    pub fn is_nominal(&self) -> bool {
        matches!(self, Type::Primitive(_) | Type::Generic(..) | Type::NoneType)
    }
}

/// Map a `typing` alias (`List`) to its builtin spelling (`list`); other names pass through.
pub fn canonical_name(name: &str) -> &str {
    match collections::from_str(name) {
        Some(id) => collections::as_str(id),
        None => name,
    }
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Type::Primitive(a), Type::Primitive(b)) => a == b,
            (Type::Generic(a, xs), Type::Generic(b, ys)) => a == b && xs == ys,
            (Type::Tuple(xs), Type::Tuple(ys)) => xs == ys,
            (Type::Union(xs), Type::Union(ys)) => {
                xs.len() == ys.len() && xs.iter().all(|x| ys.contains(x)) && ys.iter().all(|y| xs.contains(y))
            }
            (Type::Any, Type::Any) | (Type::NoneType, Type::NoneType) | (Type::Unresolved, Type::Unresolved) => true,
            _ => false,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Primitive(name) => write!(f, "{}", name),
            Type::Generic(origin, args) => {
                write!(f, "{}[", origin)?;
                write_list(f, args)?;
                write!(f, "]")
            }
            Type::Union(members) => {
                if let [a, b] = members.as_slice() {
                    if *b == Type::NoneType {
                        return write!(f, "Optional[{}]", a);
                    }
                    if *a == Type::NoneType {
                        return write!(f, "Optional[{}]", b);
                    }
                }
                write!(f, "Union[")?;
                write_list(f, members)?;
                write!(f, "]")
            }
            Type::Tuple(elements) => {
                write!(f, "tuple[")?;
                if elements.is_empty() {
                    write!(f, "()")?;
                } else {
                    write_list(f, elements)?;
                }
                write!(f, "]")
            }
            Type::Any => write!(f, "Any"),
            Type::NoneType => write!(f, "{}", NONE),
            Type::Unresolved => write!(f, "<unresolved>"),
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, types: &[Type]) -> fmt::Result {
    for (i, ty) in types.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", ty)?;
    }
    Ok(())
}

/// One declared parameter of a callable.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub ty: Type,
    pub has_default: bool,
    /// Declared after `*` or `*args`: never bound by a positional argument.
    pub keyword_only: bool,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: Type, has_default: bool) -> Self {
        Self {
            name: name.into(),
            ty,
            has_default,
            keyword_only: false,
        }
    }

    pub fn keyword_only(mut self) -> Self {
        self.keyword_only = true;
        self
    }
}

/// A callable's parameter list and return type.
#[derive(Debug, Clone, PartialEq)]
pub struct Signature {
    /// Named parameters in declaration order; keyword-only ones follow the positional ones.
    pub params: Vec<Param>,
    pub returns: Type,
    /// Accepts extra positional arguments (`*args`).
    pub variadic: bool,
    /// Accepts extra keyword arguments (`**kwargs`).
    pub keywords: bool,
}

impl Signature {
    pub fn new(params: Vec<Param>, returns: Type) -> Self {
        Self {
            params,
            returns,
            variadic: false,
            keywords: false,
        }
    }

    /// Parameters a positional argument can bind, in order.
    pub fn positional(&self) -> impl Iterator<Item = &Param> {
        self.params.iter().filter(|param| !param.keyword_only)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int() -> Type {
        Type::primitive("int")
    }

    fn str_() -> Type {
        Type::primitive("str")
    }

    #[test]
    fn test_union_flattens_and_dedups() {
        let nested = Type::union([int(), Type::union([str_(), int()])]);
        assert_eq!(nested, Type::Union(vec![int(), str_()]));
    }

    #[test]
    fn test_union_of_one_collapses() {
        assert_eq!(Type::union([int(), int()]), int());
    }

    #[test]
    fn test_union_equality_ignores_order() {
        assert_eq!(Type::union([int(), str_()]), Type::union([str_(), int()]));
        assert_ne!(Type::union([int(), str_()]), Type::union([int(), Type::primitive("bytes")]));
    }

    #[test]
    fn test_display() {
        assert_eq!(Type::optional(int()).to_string(), "Optional[int]");
        assert_eq!(Type::union([int(), str_()]).to_string(), "Union[int, str]");
        assert_eq!(Type::union([int(), str_(), Type::NoneType]).to_string(), "Union[int, str, None]");
        assert_eq!(Type::Tuple(vec![int(), str_()]).to_string(), "tuple[int, str]");
        assert_eq!(Type::Tuple(vec![]).to_string(), "tuple[()]");
        assert_eq!(Type::generic("dict", vec![str_(), int()]).to_string(), "dict[str, int]");
        assert_eq!(Type::NoneType.to_string(), "None");
        assert_eq!(Type::Any.to_string(), "Any");
    }

    #[test]
    fn test_parametrize_special_forms() {
        assert_eq!(Type::parametrize("Optional", vec![int()]), Some(Type::optional(int())));
        assert_eq!(Type::parametrize("Optional", vec![int(), str_()]), None);
        assert_eq!(Type::parametrize("Union", vec![int(), str_()]), Some(Type::union([int(), str_()])));
        assert_eq!(Type::parametrize("Tuple", vec![int()]), Some(Type::Tuple(vec![int()])));
        assert_eq!(Type::parametrize("List", vec![int()]), Some(Type::generic("list", vec![int()])));
        assert_eq!(Type::parametrize("Box", vec![int()]), Some(Type::generic("Box", vec![int()])));
        assert_eq!(Type::parametrize("Any", vec![int()]), None);
    }

    #[test]
    fn test_from_spelling() {
        assert_eq!(Type::from_spelling("None"), Type::NoneType);
        assert_eq!(Type::from_spelling("Any"), Type::Any);
        assert_eq!(Type::from_spelling("List"), Type::primitive("list"));
    }

    #[test]
    fn test_contains_unresolved() {
        assert!(Type::generic("list", vec![Type::Unresolved]).contains_unresolved());
        assert!(!Type::Tuple(vec![int(), Type::Any]).contains_unresolved());
    }
}
