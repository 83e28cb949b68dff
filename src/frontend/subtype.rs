//! The subtype relation: is a value of one type acceptable where another is expected?
//!
//! Rules, in order:
//!
//! 1. An unresolved type on either side is an error ([`SubtypeError::NotImplemented`]); callers
//!    that work gradually must filter those out first.
//! 2. Identity.
//! 3. `Any` accepts everything, and an `Any` value is accepted everywhere.
//! 4. The numeric tower `bool ⊂ int ⊂ float ⊂ complex`.
//! 5. An expected union accepts any type one of its members accepts, and a union whose every
//!    member it accepts.
//! 6. An expected tuple accepts a tuple of the same arity, elementwise.
//! 7. Nominal types: `object` accepts everything, classes accept their subclasses, a bare
//!    container accepts any parametrization of it (and the other way round), and parametrized
//!    containers with the same origin compare elementwise.

use std::collections::HashSet;

use super::types::Type;

/// The subtype relation was asked about a shape it does not model.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SubtypeError {
    #[error("subtype relation is not implemented for '{actual}' against '{expected}'")]
    NotImplemented { actual: String, expected: String },
}

/// Source of nominal base-class information.
pub trait ClassHierarchy {
    /// Direct base classes of `name`, or `None` if `name` is not a known class.
    fn bases(&self, name: &str) -> Option<Vec<String>>;
}

/// A hierarchy without user classes.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoClasses;

impl ClassHierarchy for NoClasses {
    fn bases(&self, _name: &str) -> Option<Vec<String>> {
        None
    }
}

/// Decide whether `actual` is acceptable where `expected` is required, without user classes.
///
/// ## Examples
/// ```rust
/// use typpy::frontend::subtype::is_subtype;
/// use typpy::frontend::types::Type;
///
/// let int = Type::primitive("int");
/// let float = Type::primitive("float");
/// assert_eq!(is_subtype(&int, &float), Ok(true));
/// assert_eq!(is_subtype(&float, &int), Ok(false));
/// ```
pub fn is_subtype(actual: &Type, expected: &Type) -> Result<bool, SubtypeError> {
    is_subtype_in(actual, expected, &NoClasses)
}

/// Decide whether `actual` is acceptable where `expected` is required.
///
/// ## Errors
/// - [`SubtypeError::NotImplemented`] if either type is or contains [`Type::Unresolved`].
pub fn is_subtype_in(actual: &Type, expected: &Type, classes: &dyn ClassHierarchy) -> Result<bool, SubtypeError> {
    if actual.contains_unresolved() || expected.contains_unresolved() {
        return Err(SubtypeError::NotImplemented {
            actual: actual.to_string(),
            expected: expected.to_string(),
        });
    }
    accepts(actual, expected, classes)
}

fn accepts(actual: &Type, expected: &Type, classes: &dyn ClassHierarchy) -> Result<bool, SubtypeError> {
    if actual == expected {
        return Ok(true);
    }

    let accepted = match (actual, expected) {
        (Type::Unresolved, _) | (_, Type::Unresolved) => {
            return Err(SubtypeError::NotImplemented {
                actual: actual.to_string(),
                expected: expected.to_string(),
            });
        }

        (_, Type::Any) | (Type::Any, _) => true,

        // Unions are flat, so each actual member is matched against the expected members.
        (Type::Union(actual_members), Type::Union(_)) => {
            for member in actual_members {
                if !accepts(member, expected, classes)? {
                    return Ok(false);
                }
            }
            true
        }
        (_, Type::Union(members)) => {
            for member in members {
                if accepts(actual, member, classes)? {
                    return Ok(true);
                }
            }
            false
        }

        (Type::Tuple(actual_elems), Type::Tuple(expected_elems)) => {
            actual_elems.len() == expected_elems.len() && all_accept(actual_elems, expected_elems, classes)?
        }
        (Type::Union(_) | Type::Primitive(_) | Type::Generic(..) | Type::NoneType, Type::Tuple(_)) => false,

        (_, expected) if expected.is_object() => true,

        (Type::Union(_), Type::Primitive(_) | Type::Generic(..) | Type::NoneType) => false,

        // `tuple` accepts every fixed-arity tuple.
        (Type::Tuple(_), Type::Primitive(name)) => Some(name.as_str()) == actual.origin(),
        (Type::Tuple(_), Type::Generic(..) | Type::NoneType) => false,

        (Type::Primitive(a), Type::Primitive(e)) => match (actual.numeric(), expected.numeric()) {
            (Some(a), Some(e)) => typpy_core::lang::types::numerics::is_promotable(a, e),
            _ => derives_from(a, e, classes),
        },

        (Type::Generic(a, _), Type::Primitive(e)) | (Type::Primitive(a), Type::Generic(e, _)) => a == e,

        (Type::Generic(a, actual_args), Type::Generic(e, expected_args)) => {
            a == e && actual_args.len() == expected_args.len() && all_accept(actual_args, expected_args, classes)?
        }

        // `None` is accepted only by itself, `object` and unions containing it.
        (Type::NoneType, Type::Primitive(_) | Type::Generic(..)) => false,
        (Type::Primitive(_) | Type::Generic(..), Type::NoneType) => false,
        (Type::NoneType, Type::NoneType) => true,
    };
    Ok(accepted)
}

/// Elementwise acceptance of two equally long type lists.
fn all_accept(actual: &[Type], expected: &[Type], classes: &dyn ClassHierarchy) -> Result<bool, SubtypeError> {
    for (a, e) in actual.iter().zip(expected) {
        if !accepts(a, e, classes)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Walk the base-class graph from `actual` looking for `expected`.
fn derives_from(actual: &str, expected: &str, classes: &dyn ClassHierarchy) -> bool {
    let mut seen = HashSet::new();
    let mut pending = vec![actual.to_string()];
    while let Some(name) = pending.pop() {
        if name == expected {
            return true;
        }
        if !seen.insert(name.clone()) {
            continue;
        }
        if let Some(bases) = classes.bases(&name) {
            pending.extend(bases);
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn t(name: &str) -> Type {
        Type::primitive(name)
    }

    fn sub(actual: &Type, expected: &Type) -> bool {
        is_subtype(actual, expected).unwrap()
    }

    struct Classes(HashMap<&'static str, Vec<String>>);

    impl ClassHierarchy for Classes {
        fn bases(&self, name: &str) -> Option<Vec<String>> {
            self.0.get(name).cloned()
        }
    }

    #[test]
    fn test_none_is_accepted_by_itself_object_and_optional() {
        assert!(sub(&Type::NoneType, &Type::NoneType));
        assert!(sub(&Type::NoneType, &t("object")));
        assert!(sub(&Type::NoneType, &Type::optional(t("int"))));
        assert!(!sub(&Type::NoneType, &t("int")));
        assert!(!sub(&Type::NoneType, &Type::generic("list", vec![t("int")])));
        assert!(!sub(&t("int"), &Type::NoneType));
        assert!(!sub(&Type::Tuple(vec![]), &Type::NoneType));
        assert!(!sub(&Type::optional(t("int")), &t("int")));
    }

    #[test]
    fn test_unresolved_inside_container_is_rejected_loudly() {
        let list_unresolved = Type::generic("list", vec![Type::Unresolved]);
        assert!(is_subtype(&list_unresolved, &Type::generic("list", vec![t("int")])).is_err());
        assert!(is_subtype(&t("int"), &Type::union([t("str"), Type::Unresolved])).is_err());
    }

    #[test]
    fn test_reflexive_and_any_is_top() {
        for ty in [t("int"), Type::NoneType, Type::Tuple(vec![t("str")]), Type::optional(t("int"))] {
            assert!(sub(&ty, &ty), "{}", ty);
            assert!(sub(&ty, &Type::Any), "{}", ty);
        }
    }

    #[test]
    fn test_numeric_tower() {
        let tower = ["bool", "int", "float", "complex"];
        for (i, narrow) in tower.iter().enumerate() {
            for (j, wide) in tower.iter().enumerate() {
                assert_eq!(sub(&t(narrow), &t(wide)), i <= j, "{} <: {}", narrow, wide);
            }
        }
    }

    #[test]
    fn test_union() {
        let int_or_str = Type::union([t("int"), t("str")]);
        assert!(sub(&t("int"), &int_or_str));
        assert!(sub(&t("bool"), &int_or_str));
        assert!(!sub(&t("bytes"), &int_or_str));

        let str_or_bytes = Type::union([t("str"), t("bytes")]);
        let numbers_or_bytes = Type::union([t("int"), t("float"), t("bytes")]);
        assert!(!sub(&str_or_bytes, &numbers_or_bytes));
        assert!(sub(&Type::union([t("int"), t("bytes")]), &numbers_or_bytes));
        assert!(!sub(&int_or_str, &t("int")));
    }

    #[test]
    fn test_none_and_optional() {
        assert!(sub(&Type::NoneType, &Type::optional(t("int"))));
        assert!(!sub(&Type::NoneType, &t("int")));
        assert!(!sub(&t("int"), &Type::NoneType));
    }

    #[test]
    fn test_tuple_covariance() {
        let int_str = Type::Tuple(vec![t("int"), t("str")]);
        let int_float = Type::Tuple(vec![t("int"), t("float")]);
        let float_float = Type::Tuple(vec![t("float"), t("float")]);
        assert!(!sub(&int_str, &int_float));
        assert!(sub(&int_float, &float_float));
        assert!(!sub(&Type::Tuple(vec![t("int")]), &int_float));
        assert!(sub(&int_str, &t("tuple")));
        assert!(!sub(&int_str, &t("list")));
    }

    #[test]
    fn test_generics() {
        let list_int = Type::generic("list", vec![t("int")]);
        let list_float = Type::generic("list", vec![t("float")]);
        assert!(sub(&list_int, &list_float));
        assert!(!sub(&list_float, &list_int));
        assert!(sub(&list_int, &t("list")));
        assert!(sub(&t("list"), &list_int));
        assert!(!sub(&list_int, &Type::generic("set", vec![t("int")])));
    }

    #[test]
    fn test_object_accepts_everything() {
        assert!(sub(&Type::NoneType, &t("object")));
        assert!(sub(&Type::union([t("int"), t("str")]), &t("object")));
        assert!(!sub(&t("object"), &t("int")));
    }

    #[test]
    fn test_nominal_derivation() {
        let classes = Classes(HashMap::from([
            ("Dog", vec!["Animal".to_string()]),
            ("Puppy", vec!["Dog".to_string()]),
            ("Animal", vec!["object".to_string()]),
        ]));
        assert_eq!(is_subtype_in(&t("Puppy"), &t("Animal"), &classes), Ok(true));
        assert_eq!(is_subtype_in(&t("Animal"), &t("Dog"), &classes), Ok(false));
        assert_eq!(is_subtype_in(&t("Dog"), &t("Cat"), &classes), Ok(false));
    }

    #[test]
    fn test_cyclic_bases_terminate() {
        let classes = Classes(HashMap::from([("A", vec!["B".to_string()]), ("B", vec!["A".to_string()])]));
        assert_eq!(is_subtype_in(&t("A"), &t("C"), &classes), Ok(false));
    }

    #[test]
    fn test_unresolved_is_rejected_loudly() {
        assert!(is_subtype(&Type::Unresolved, &t("int")).is_err());
        assert!(is_subtype(&t("int"), &Type::generic("list", vec![Type::Unresolved])).is_err());
    }
}
