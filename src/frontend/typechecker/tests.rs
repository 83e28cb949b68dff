//! Typechecker unit tests.

use std::path::Path;

use super::*;
use crate::frontend::diagnostics::ErrorKind;
use crate::frontend::provider::{AstSymbolProvider, SymbolProvider, Unit};
use crate::frontend::scope::{Scope, ScopeId, ScopeTable};
use crate::frontend::types::Type;
use crate::frontend::{lexer, parser};

const ADD: &str = "def add(a: int, b: int) -> int:\n    return a\n";

fn check_str(source: &str) -> Vec<TypingError> {
    TypeChecker::new().check_source(Path::new("test.py"), source)
}

fn messages(source: &str) -> Vec<String> {
    check_str(source).into_iter().map(|e| e.message).collect()
}

fn kinds(source: &str) -> Vec<ErrorKind> {
    check_str(source).into_iter().map(|e| e.kind).collect()
}

/// Check a module body in a single scope and hand the scope back for inspection.
fn module_scope(source: &str) -> (ScopeTable, ScopeId, Vec<CompileError>) {
    let tokens = lexer::lex(source).unwrap();
    let program = parser::parse(&tokens).unwrap();
    let mut scopes = ScopeTable::new();
    let root = scopes.add_scope(Scope::new("test", None, "test.py", "test"));
    AstSymbolProvider.symbols(Unit::Module(&program)).install(scopes.get_mut(root));
    let errors = check_block(&mut scopes, root, &program.body);
    (scopes, root, errors)
}

fn var(scopes: &ScopeTable, scope: ScopeId, name: &str) -> Type {
    scopes.resolve_variable(scope, name).cloned().unwrap()
}

fn int() -> Type {
    Type::primitive("int")
}

fn float() -> Type {
    Type::primitive("float")
}

fn str_() -> Type {
    Type::primitive("str")
}

// ========================================
// Calls
// ========================================

#[test]
fn test_valid_calls() {
    assert!(check_str(&format!("{ADD}add(1, 2)\nadd(a=1, b=2)\nadd(1, b=2)\n")).is_empty());
}

#[test]
fn test_missing_one_argument() {
    let errors = check_str(&format!("{ADD}add(1)\n"));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ErrorKind::ArityMismatch);
    assert_eq!(errors[0].message, "add() missing 1 required argument: 'b'");
    assert_eq!((errors[0].line, errors[0].column), (3, 0));
}

#[test]
fn test_missing_arguments_are_aggregated() {
    assert_eq!(
        messages(&format!("{ADD}add()\n")),
        vec!["add() missing 2 required arguments: 'a' and 'b'"]
    );
}

#[test]
fn test_too_many_arguments_anchor_at_excess_argument() {
    let errors = check_str(&format!("{ADD}add(1, 2, 3)\n"));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "add() takes 2 positional arguments but 3 were given");
    assert_eq!((errors[0].line, errors[0].column, errors[0].end_column), (3, 10, Some(11)));
}

#[test]
fn test_unexpected_keyword_anchors_at_keyword() {
    let errors = check_str(&format!("{ADD}add(a=1, b=2, c=3)\n"));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ErrorKind::UnexpectedKeyword);
    assert_eq!(errors[0].message, "add() got an unexpected keyword argument 'c'");
    assert_eq!((errors[0].column, errors[0].end_column), (14, Some(17)));
}

#[test]
fn test_duplicate_keyword() {
    let errors = check_str(&format!("{ADD}add(1, 2, a=1)\n"));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ErrorKind::DuplicateBinding);
    assert_eq!(errors[0].message, "add() got multiple values for argument 'a'");
    assert_eq!(errors[0].column, 0);
}

#[test]
fn test_call_errors_follow_argument_order() {
    let source = format!("{ADD}add(1, None, a=1, b=2.0)\n");
    assert_eq!(
        kinds(&source),
        vec![
            ErrorKind::TypeMismatch,
            ErrorKind::DuplicateBinding,
            ErrorKind::DuplicateBinding,
            ErrorKind::TypeMismatch,
        ]
    );
    let messages = messages(&source);
    assert_eq!(messages[0], "Expected 'int' in argument 'b' of 'add', found 'None'.");
    assert_eq!(messages[3], "Expected 'int' in argument 'b' of 'add', found 'float'.");
}

#[test]
fn test_undefined_function_skips_arguments() {
    let errors = check_str("nope(missing)\n");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ErrorKind::UnresolvedSymbol);
    assert_eq!(errors[0].message, "Function 'nope' is not defined.");
}

#[test]
fn test_nested_call_in_argument_is_checked() {
    let errors = check_str(&format!("{ADD}add(add(1), 2)\n"));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].column, 4);
}

#[test]
fn test_call_through_variable_is_not_validated() {
    assert!(check_str("def apply(f, x: int):\n    f(x, 1, 2)\n").is_empty());
}

#[test]
fn test_builtin_calls() {
    assert_eq!(
        messages("print(1, 'a', None)\nlen()\n"),
        vec!["len() missing 1 required argument: 'obj'"]
    );
}

#[test]
fn test_numeric_promotion_in_arguments() {
    let source = "def scale(x: float, y: complex) -> float:\n    return x\nscale(1, True)\nscale(1.5, 2.0)\nscale(2j, 1)\n";
    assert_eq!(
        messages(source),
        vec!["Expected 'float' in argument 'x' of 'scale', found 'complex'."]
    );
}

#[test]
fn test_subclass_arguments() {
    let source = "\
class Animal:
    pass
class Dog(Animal):
    pass
def pet(a: Animal) -> None:
    pass
pet(Dog())
pet(Animal())
pet(1)
";
    assert_eq!(messages(source), vec!["Expected 'Animal' in argument 'a' of 'pet', found 'int'."]);
}

#[test]
fn test_constructor_uses_init_signature() {
    let source = "\
class Point:
    def __init__(self, x: float, y: float = 0.0):
        pass
Point(1)
Point(1, 2)
Point()
Point('a')
";
    assert_eq!(
        messages(source),
        vec![
            "Point() missing 1 required argument: 'x'",
            "Expected 'float' in argument 'x' of 'Point', found 'str'.",
        ]
    );
}

#[test]
fn test_optional_and_string_annotations() {
    let source = "\
def f(x: Optional[int] = None, ys: 'list[int]' = []) -> None:
    pass
f()
f(None)
f(1, [1, 2])
f('a')
f(ys=['a'])
";
    assert_eq!(
        messages(source),
        vec![
            "Expected 'Optional[int]' in argument 'x' of 'f', found 'str'.",
            "Expected 'list[int]' in argument 'ys' of 'f', found 'list[str]'.",
        ]
    );
}

#[test]
fn test_keyword_only_parameters_take_no_positional_arguments() {
    let source = "\
def f(*args, key: str = '') -> None:
    pass
def g(a: int, *, flag: bool = False) -> None:
    pass
f(1, 2)
f(1, key='k')
g(1, flag=True)
g(1, 2)
f(1, key=2)
";
    assert_eq!(
        messages(source),
        vec![
            "g() takes 1 positional argument but 2 were given",
            "Expected 'str' in argument 'key' of 'f', found 'int'.",
        ]
    );
}

#[test]
fn test_unannotated_parameters_accept_anything() {
    assert!(check_str("def f(a, b=1):\n    pass\nf('x', None)\nf([1], b={})\n").is_empty());
}

// ========================================
// Assignments
// ========================================

#[test]
fn test_rebinding_requires_same_type() {
    let errors = check_str("var = 1\nvar = True\n");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "Expected 'int' in assignment to 'var', found 'bool'.");
    assert_eq!((errors[0].line, errors[0].column), (2, 0));
}

#[test]
fn test_rebinding_keeps_the_prior_type() {
    let (scopes, root, errors) = module_scope("var = 1\nvar = 'a'\n");
    assert_eq!(errors.len(), 1);
    assert_eq!(var(&scopes, root, "var"), int());
}

#[test]
fn test_rebinding_containers() {
    assert!(check_str("xs = [1]\nxs = []\nxs = [2, 3]\n").is_empty());
    assert_eq!(
        messages("xs = [1]\nxs = ['a']\n"),
        vec!["Expected 'list[int]' in assignment to 'xs', found 'list[str]'."]
    );
}

#[test]
fn test_destructuring_binds_elements() {
    let (scopes, root, errors) = module_scope("var1, var2 = (1, 2.0)\n");
    assert!(errors.is_empty());
    assert_eq!(var(&scopes, root, "var1"), int());
    assert_eq!(var(&scopes, root, "var2"), float());
}

#[test]
fn test_destructuring_reports_every_element() {
    assert_eq!(
        messages("a = 1\nb = 2\na, b = ('x', 'y')\n"),
        vec![
            "Expected 'int' in assignment to 'a', found 'str'.",
            "Expected 'int' in assignment to 'b', found 'str'.",
        ]
    );
}

#[test]
fn test_destructuring_arity_mismatch() {
    let errors = check_str("a, b = (1, 2, 3)\n");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ErrorKind::ArityMismatch);
    assert_eq!(errors[0].message, "Cannot unpack tuple with 3 elements into 2 targets.");
}

#[test]
fn test_destructuring_other_values() {
    assert_eq!(
        messages("a, b = 1\n"),
        vec!["Expected a tuple to unpack into 2 targets, found 'int'."]
    );

    let (scopes, root, errors) = module_scope("a, b = [1, 2]\n");
    assert!(errors.is_empty());
    assert_eq!(var(&scopes, root, "b"), int());
}

#[test]
fn test_chained_assignment() {
    let (scopes, root, errors) = module_scope("var1 = var2 = 1\n");
    assert!(errors.is_empty());
    assert_eq!(var(&scopes, root, "var1"), int());
    assert_eq!(var(&scopes, root, "var2"), int());

    assert_eq!(messages("a = 'x'\nb = 1\na = b = 2.0\n").len(), 2);
}

#[test]
fn test_annotated_assignment() {
    assert_eq!(
        messages("var: int = 'string'\n"),
        vec!["Expected 'int' in assignment to 'var', found 'str'."]
    );

    let (scopes, root, errors) = module_scope("x: float = 1\ny: Optional[int] = None\nz: List[str]\n");
    assert!(errors.is_empty());
    // The value's own type is recorded, not the annotation.
    assert_eq!(var(&scopes, root, "x"), int());
    assert_eq!(var(&scopes, root, "y"), Type::NoneType);
    assert_eq!(var(&scopes, root, "z"), Type::generic("list", vec![str_()]));
}

#[test]
fn test_annotation_with_unknown_name() {
    assert_eq!(messages("x: Missing = 1\n"), vec!["Name 'Missing' is not defined."]);
}

#[test]
fn test_assignment_value_is_checked() {
    assert_eq!(
        messages(&format!("{ADD}x = add(1)\ny = missing\n")),
        vec!["add() missing 1 required argument: 'b'", "Name 'missing' is not defined."]
    );
}

#[test]
fn test_attribute_target_is_unsupported() {
    let errors = check_str("class A:\n    pass\na = A()\na.x = 1\n");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ErrorKind::UnsupportedConstruct);
    assert_eq!(errors[0].message, "Unsupported construct: assignment to attribute access");
    assert_eq!((errors[0].line, errors[0].column), (4, 0));
}

// ========================================
// Statements and scopes
// ========================================

#[test]
fn test_unsupported_statements_do_not_stop_checking() {
    let errors = check_str("while x:\n    pass\nimport os\ny = missing\nx = 1\nx += 1\n");
    let summary: Vec<_> = errors.iter().map(|e| (e.kind, e.line)).collect();
    assert_eq!(
        summary,
        vec![
            (ErrorKind::UnsupportedConstruct, 1),
            (ErrorKind::UnsupportedConstruct, 3),
            (ErrorKind::UnresolvedSymbol, 4),
            (ErrorKind::UnsupportedConstruct, 6),
        ]
    );
    assert_eq!(errors[0].message, "Unsupported construct: while loop");
}

#[test]
fn test_if_branches_share_the_scope() {
    let source = "x = 1\nif x > 0:\n    x = 'a'\nelif missing:\n    y = 2\nelse:\n    pass\ny = 'b'\n";
    assert_eq!(
        messages(source),
        vec![
            "Expected 'int' in assignment to 'x', found 'str'.",
            "Name 'missing' is not defined.",
            "Expected 'int' in assignment to 'y', found 'str'.",
        ]
    );
}

#[test]
fn test_every_branch_is_checked_after_a_failing_condition() {
    let source = "x = 1\nif x:\n    x = 'a'\nelif missing:\n    x = 'b'\nelse:\n    x = None\n";
    assert_eq!(
        messages(source),
        vec![
            "Expected 'int' in assignment to 'x', found 'str'.",
            "Name 'missing' is not defined.",
            "Expected 'int' in assignment to 'x', found 'str'.",
            "Expected 'int' in assignment to 'x', found 'None'.",
        ]
    );
}

#[test]
fn test_definitions_inside_if_blocks_are_visible_and_checked() {
    let source = "if True:\n    def f(a: int) -> int:\n        x: int = 'bad'\n        return a\nf(1)\n";
    let errors = check_str(source);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "Expected 'int' in assignment to 'x', found 'str'.");
    assert_eq!(errors[0].line, 3);
}

#[test]
fn test_redefined_function_bodies_are_all_checked() {
    let source = "def f() -> int:\n    x: int = 'bad'\n    return 1\ndef f() -> int:\n    y: str = 2\n    return 2\n";
    let lines: Vec<_> = check_str(source).iter().map(|e| e.line).collect();
    assert_eq!(lines, vec![2, 5]);
}

#[test]
fn test_imported_names_are_gradual() {
    let source = "import os\nfrom m import f, g as h\nx = 'a'\nx = os.sep\nf(1)\nh(x, key=os)\n";
    let errors = check_str(source);
    assert_eq!(errors.len(), 2);
    assert!(errors.iter().all(|e| e.kind == ErrorKind::UnsupportedConstruct));
}

#[test]
fn test_return_value_is_checked() {
    assert_eq!(messages("def f() -> int:\n    return missing\n"), vec!["Name 'missing' is not defined."]);
}

#[test]
fn test_forward_references_resolve() {
    let source = "f()\ndef f() -> None:\n    g(1)\ndef g(a: int) -> None:\n    pass\n";
    assert!(check_str(source).is_empty());
}

#[test]
fn test_nested_scopes_are_checked_depth_first() {
    let source = "\
def outer(x: int) -> None:
    def inner(y: str) -> None:
        outer(y)
    inner(x)
";
    let errors = check_str(source);
    let lines: Vec<_> = errors.iter().map(|e| e.line).collect();
    assert_eq!(lines, vec![4, 3]);
}

#[test]
fn test_parameters_are_visible_in_body() {
    let source = "def f(a: int, *rest, **options) -> None:\n    b = a\n    c = rest\n    d = options\n    e = undefined\n";
    assert_eq!(messages(source), vec!["Name 'undefined' is not defined."]);
}

#[test]
fn test_enclosing_variables_are_checked() {
    assert_eq!(
        messages("x = 1\ndef f() -> None:\n    x = 'a'\n"),
        vec!["Expected 'int' in assignment to 'x', found 'str'."]
    );
}

#[test]
fn test_method_bodies_are_checked() {
    let source = "\
class Counter:
    def __init__(self, start: int):
        pass
    def bump(self, by: int) -> None:
        Counter('x')
";
    assert_eq!(
        messages(source),
        vec!["Expected 'int' in argument 'start' of 'Counter', found 'str'."]
    );
}

#[test]
fn test_syntax_errors_are_reported() {
    let errors = check_str("x = (\n");
    assert!(!errors.is_empty());
    assert!(errors.iter().all(|e| e.kind == ErrorKind::Syntax));
}

#[test]
fn test_checking_is_deterministic() {
    let source = format!("{ADD}add(1, None, a=1, b=2.0)\nvar = 1\nvar = True\nwhile True:\n    pass\n");
    assert_eq!(check_str(&source), check_str(&source));
}

// ========================================
// Expression types
// ========================================

fn expr_type(expr: &str) -> Result<Type, CompileError> {
    let setup = format!("xs = [1, 2]\nt = (1, 'a')\nd = {{'k': 1.0}}\n{ADD}");
    let (scopes, root, errors) = module_scope(&setup);
    assert!(errors.is_empty());
    let expr = parser::parse_expression(expr).unwrap();
    get_expr_type(&scopes, root, &expr)
}

#[test]
fn test_literal_and_container_types() {
    assert_eq!(expr_type("1").unwrap(), int());
    assert_eq!(expr_type("b'x'").unwrap(), Type::primitive("bytes"));
    assert_eq!(expr_type("None").unwrap(), Type::NoneType);
    assert_eq!(expr_type("[]").unwrap(), Type::primitive("list"));
    assert_eq!(expr_type("[1, 1]").unwrap(), Type::generic("list", vec![int()]));
    assert_eq!(
        expr_type("[1, 'a']").unwrap(),
        Type::generic("list", vec![Type::union([int(), str_()])])
    );
    assert_eq!(expr_type("{1, 2}").unwrap(), Type::generic("set", vec![int()]));
    assert_eq!(expr_type("{}").unwrap(), Type::primitive("dict"));
    assert_eq!(
        expr_type("{'a': 1, 'b': 2.0}").unwrap(),
        Type::generic("dict", vec![str_(), Type::union([int(), float()])])
    );
    assert_eq!(expr_type("(1, 'a')").unwrap(), Type::Tuple(vec![int(), str_()]));
}

#[test]
fn test_type_expressions() {
    assert_eq!(expr_type("int").unwrap(), int());
    assert_eq!(expr_type("List[int]").unwrap(), Type::generic("list", vec![int()]));
    assert_eq!(expr_type("Optional[str]").unwrap(), Type::optional(str_()));
    assert_eq!(
        expr_type("Dict[str, Tuple[int, int]]").unwrap(),
        Type::generic("dict", vec![str_(), Type::Tuple(vec![int(), int()])])
    );
}

#[test]
fn test_operator_types() {
    assert_eq!(expr_type("1 + 2.0").unwrap(), float());
    assert_eq!(expr_type("1 / 2").unwrap(), float());
    assert_eq!(expr_type("True + True").unwrap(), int());
    assert_eq!(expr_type("-True").unwrap(), int());
    assert_eq!(expr_type("'a' + 'b'").unwrap(), str_());
    assert_eq!(expr_type("1 < 2").unwrap(), Type::primitive("bool"));
    assert_eq!(expr_type("not 1").unwrap(), Type::primitive("bool"));
    assert_eq!(expr_type("1 or 'a'").unwrap(), Type::union([int(), str_()]));
}

#[test]
fn test_calls_and_indexing() {
    assert_eq!(expr_type("add(1, 2)").unwrap(), int());
    assert_eq!(expr_type("xs[0]").unwrap(), int());
    assert_eq!(expr_type("t[1]").unwrap(), str_());
    assert_eq!(expr_type("t[-2]").unwrap(), int());
    assert_eq!(expr_type("d['k']").unwrap(), float());
}

#[test]
fn test_unsupported_shapes_are_unresolved() {
    assert_eq!(expr_type("obj.attr").unwrap(), Type::Unresolved);
    assert_eq!(expr_type("add(1, 2).real").unwrap(), Type::Unresolved);
}

#[test]
fn test_undefined_names_are_errors() {
    assert_eq!(expr_type("undefined").unwrap_err().kind, ErrorKind::UnresolvedSymbol);
    assert_eq!(
        expr_type("nope()").unwrap_err().message,
        "Function 'nope' is not defined."
    );
}
