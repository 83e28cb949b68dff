//! Property-based tests for the typpy analyzer
//!
//! These tests use proptest to verify invariants across many randomly
//! generated types and programs.

use std::path::Path;

use proptest::prelude::*;
use typpy::TypeChecker;
use typpy::frontend::subtype::is_subtype;
use typpy::frontend::types::Type;

const LEAVES: &[&str] = &["bool", "int", "float", "complex", "str", "bytes", "object", "list", "dict"];

/// Arbitrary resolved types, nested a few levels deep.
fn arb_type() -> impl Strategy<Value = Type> {
    let leaf = prop_oneof![
        prop::sample::select(LEAVES).prop_map(Type::primitive),
        Just(Type::Any),
        Just(Type::NoneType),
    ];
    leaf.prop_recursive(3, 16, 4, |inner| {
        prop_oneof![
            inner.clone().prop_map(|t| Type::generic("list", vec![t])),
            (inner.clone(), inner.clone()).prop_map(|(k, v)| Type::generic("dict", vec![k, v])),
            prop::collection::vec(inner.clone(), 0..4).prop_map(Type::Tuple),
            prop::collection::vec(inner, 2..4).prop_map(Type::union),
        ]
    })
}

proptest! {
    /// Property: every type is a subtype of itself.
    #[test]
    fn subtype_is_reflexive(ty in arb_type()) {
        prop_assert_eq!(is_subtype(&ty, &ty), Ok(true));
    }

    /// Property: `Any` accepts every type and is accepted everywhere.
    #[test]
    fn any_is_top_and_bottom(ty in arb_type()) {
        prop_assert_eq!(is_subtype(&ty, &Type::Any), Ok(true));
        prop_assert_eq!(is_subtype(&Type::Any, &ty), Ok(true));
    }

    /// Property: `object` accepts every type.
    #[test]
    fn object_accepts_everything(ty in arb_type()) {
        prop_assert_eq!(is_subtype(&ty, &Type::primitive("object")), Ok(true));
    }

    /// Property: a union accepts each of its members.
    #[test]
    fn union_accepts_members(members in prop::collection::vec(arb_type(), 1..4)) {
        let union = Type::union(members.clone());
        for member in &members {
            prop_assert_eq!(is_subtype(member, &union), Ok(true));
        }
    }

    /// Property: checking the same source twice yields the same diagnostics.
    #[test]
    fn checking_is_deterministic(args in prop::collection::vec(0i64..100, 0..4), kw in "[a-c]") {
        let call_args: Vec<String> = args.iter().map(ToString::to_string).collect();
        let source = format!(
            "def f(a: int, b: str) -> int:\n    return a\n\nf({}, {}=1)\nf({})\n",
            call_args.join(", "),
            kw,
            call_args.join(", "),
        );
        let first = TypeChecker::new().check_source(Path::new("prop.py"), &source);
        let second = TypeChecker::new().check_source(Path::new("prop.py"), &source);
        prop_assert_eq!(first, second);
    }
}
