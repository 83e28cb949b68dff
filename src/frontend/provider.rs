//! Discovery of a unit's own symbols before its statements are checked.
//!
//! A [`SymbolProvider`] answers "which callables, classes, imports and parameters does this
//! module, function or class body define in its own scope?" so that the scope for that unit can
//! be fully populated up front and forward references resolve.
//!
//! [`AstSymbolProvider`] reads the answer straight from the AST and never runs the analyzed code.

use indexmap::IndexMap;
use tracing::warn;

use crate::frontend::ast::{ClassDef, Expr, FunctionDef, ImportStmt, Literal, ParamKind, Program, Spanned, Statement};
use crate::frontend::parser;

use super::scope::{CallableEntry, CallableOrigin, NominalType, Scope};
use super::types::{Param, Signature, Type};
use typpy_core::lang::types::OBJECT;

/// A source unit whose top-level symbols can be discovered.
#[derive(Debug, Clone, Copy)]
pub enum Unit<'a> {
    Module(&'a Program),
    Function(&'a FunctionDef),
    Class(&'a ClassDef),
}

impl<'a> Unit<'a> {
    pub fn body(&self) -> &'a [Spanned<Statement>] {
        match self {
            Unit::Module(program) => &program.body,
            Unit::Function(def) => &def.body,
            Unit::Class(class) => &class.body,
        }
    }
}

/// Symbols one unit defines in its own scope.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnitSymbols {
    pub variables: IndexMap<String, Type>,
    pub callables: IndexMap<String, CallableEntry>,
    pub types: IndexMap<String, NominalType>,
}

impl UnitSymbols {
    /// Copy every symbol into `scope`, overwriting same-named entries.
    pub fn install(self, scope: &mut Scope) {
        for (name, ty) in self.variables {
            scope.add_variable(name, ty);
        }
        for (name, entry) in self.callables {
            scope.add_callable(name, entry);
        }
        for (name, ty) in self.types {
            scope.add_type(name, ty);
        }
    }
}

/// Supplies the symbols a unit defines, without executing it.
pub trait SymbolProvider {
    fn symbols(&self, unit: Unit<'_>) -> UnitSymbols;
}

/// [`SymbolProvider`] that reads definitions and annotations from the syntax tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct AstSymbolProvider;

impl SymbolProvider for AstSymbolProvider {
    fn symbols(&self, unit: Unit<'_>) -> UnitSymbols {
        let mut symbols = UnitSymbols::default();

        if let Unit::Function(def) = unit {
            for param in &def.params {
                let ty = match param.node.kind {
                    ParamKind::Regular | ParamKind::KeywordOnly => annotation_or_any(param.node.annotation.as_ref()),
                    ParamKind::VarPositional => Type::primitive("tuple"),
                    ParamKind::VarKeyword => Type::primitive("dict"),
                };
                symbols.variables.insert(param.node.name.clone(), ty);
            }
        }

        for stmt in scope_statements(unit.body()) {
            let origin = CallableOrigin::Definition(stmt.span);
            match &stmt.node {
                Statement::FunctionDef(def) => {
                    symbols.callables.insert(
                        def.name.node.clone(),
                        CallableEntry {
                            origin,
                            signature: function_signature(def),
                        },
                    );
                }
                Statement::ClassDef(class) => {
                    let name = class.name.node.clone();
                    symbols.callables.insert(
                        name.clone(),
                        CallableEntry {
                            origin,
                            signature: constructor_signature(class),
                        },
                    );
                    symbols.types.insert(
                        name.clone(),
                        NominalType {
                            ty: Type::primitive(name),
                            bases: base_names(class),
                        },
                    );
                }
                // Imported modules are not analyzed; their names are gradual.
                Statement::Import(import) => {
                    for name in imported_names(import) {
                        symbols.variables.insert(name, Type::Any);
                    }
                }
                _ => {}
            }
        }

        symbols
    }
}

/// Statements that run in the scope owning `body`, in source order.
///
/// Blocks of `if`, `while` and `for` do not open a scope, so their statements are included;
/// `def` and `class` bodies are not.
pub fn scope_statements(body: &[Spanned<Statement>]) -> Vec<&Spanned<Statement>> {
    let mut out = Vec::new();
    collect_scope_statements(body, &mut out);
    out
}

fn collect_scope_statements<'a>(body: &'a [Spanned<Statement>], out: &mut Vec<&'a Spanned<Statement>>) {
    for stmt in body {
        out.push(stmt);
        match &stmt.node {
            Statement::If(if_stmt) => {
                collect_scope_statements(&if_stmt.then_body, out);
                for (_, branch) in &if_stmt.elif_branches {
                    collect_scope_statements(branch, out);
                }
                if let Some(else_body) = &if_stmt.else_body {
                    collect_scope_statements(else_body, out);
                }
            }
            Statement::While(loop_stmt) => collect_scope_statements(&loop_stmt.body, out),
            Statement::For(loop_stmt) => collect_scope_statements(&loop_stmt.body, out),
            _ => {}
        }
    }
}

/// Names an import statement binds: `import a.b` binds `a`, aliases bind the alias.
fn imported_names(import: &ImportStmt) -> Vec<String> {
    if import.names.is_empty() {
        let bound = import.alias.as_ref().or(import.module.first());
        return bound.cloned().into_iter().collect();
    }
    import
        .names
        .iter()
        .filter(|(name, _)| name != "*")
        .map(|(name, alias)| alias.as_ref().unwrap_or(name).clone())
        .collect()
}

/// Signature of a `def`, with annotations lowered syntactically.
pub fn function_signature(def: &FunctionDef) -> Signature {
    let mut signature = Signature::new(Vec::new(), annotation_or_any(def.returns.as_ref()));
    for param in &def.params {
        let param = &param.node;
        match param.kind {
            ParamKind::Regular => signature.params.push(Param::new(
                param.name.clone(),
                annotation_or_any(param.annotation.as_ref()),
                param.default.is_some(),
            )),
            ParamKind::KeywordOnly => signature.params.push(
                Param::new(
                    param.name.clone(),
                    annotation_or_any(param.annotation.as_ref()),
                    param.default.is_some(),
                )
                .keyword_only(),
            ),
            ParamKind::VarPositional => signature.variadic = true,
            ParamKind::VarKeyword => signature.keywords = true,
        }
    }
    signature
}

/// Constructor signature of a class: `__init__` without its receiver, returning the class.
///
/// A class without `__init__` takes no arguments, unless it has explicit bases whose
/// constructors are not visible here, in which case any arguments are accepted.
fn constructor_signature(class: &ClassDef) -> Signature {
    let returns = Type::primitive(class.name.node.clone());
    // The last `__init__` wins, as at runtime.
    let init = scope_statements(&class.body)
        .into_iter()
        .filter_map(|stmt| match &stmt.node {
            Statement::FunctionDef(def) if def.name.node == "__init__" => Some(def),
            _ => None,
        })
        .last();

    match init {
        Some(def) => {
            let mut signature = function_signature(def);
            if signature.params.first().is_some_and(|receiver| !receiver.keyword_only) {
                signature.params.remove(0);
            }
            signature.returns = returns;
            signature
        }
        None => {
            let mut signature = Signature::new(Vec::new(), returns);
            if base_names(class).iter().any(|b| b != OBJECT) {
                signature.variadic = true;
                signature.keywords = true;
            }
            signature
        }
    }
}

fn base_names(class: &ClassDef) -> Vec<String> {
    let bases: Vec<String> = class
        .bases
        .iter()
        .filter_map(|base| match &base.node {
            Expr::Ident(name) => Some(name.clone()),
            Expr::Attribute(_, attr) => Some(attr.node.clone()),
            _ => None,
        })
        .collect();
    if bases.is_empty() { vec![OBJECT.to_string()] } else { bases }
}

fn annotation_or_any(annotation: Option<&Spanned<Expr>>) -> Type {
    annotation.map_or(Type::Any, |a| lower_annotation(&a.node))
}

/// Lower an annotation expression to a [`Type`] without consulting any scope.
///
/// ## Notes
/// - `None` is the type of `None`; string annotations (`"list[int]"`) are parsed first.
/// - `typing.X` is treated like `X`.
/// - Shapes that do not denote a type lower to [`Type::Unresolved`].
pub fn lower_annotation(expr: &Expr) -> Type {
    match expr {
        Expr::Literal(Literal::None) => Type::NoneType,
        Expr::Literal(Literal::Str(text)) => match parser::parse_expression(text) {
            Ok(parsed) => lower_annotation(&parsed.node),
            Err(errors) => {
                warn!(annotation = %text, errors = errors.len(), "unparsable string annotation");
                Type::Unresolved
            }
        },
        Expr::Ident(name) => Type::from_spelling(name),
        Expr::Attribute(_, attr) => Type::from_spelling(&attr.node),
        Expr::Subscript(value, index) => {
            let origin = match &value.node {
                Expr::Ident(name) => name.as_str(),
                Expr::Attribute(_, attr) => attr.node.as_str(),
                _ => return Type::Unresolved,
            };
            let args = match &index.node {
                Expr::Tuple(items) => items.iter().map(|item| lower_annotation(&item.node)).collect(),
                single => vec![lower_annotation(single)],
            };
            Type::parametrize(origin, args).unwrap_or(Type::Unresolved)
        }
        other => {
            warn!(kind = other.kind_name(), "unsupported annotation");
            Type::Unresolved
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::{lexer, parser};

    fn program(source: &str) -> Program {
        let tokens = lexer::lex(source).unwrap();
        parser::parse(&tokens).unwrap()
    }

    fn annotation(source: &str) -> Type {
        lower_annotation(&parser::parse_expression(source).unwrap().node)
    }

    #[test]
    fn test_lower_annotations() {
        assert_eq!(annotation("int"), Type::primitive("int"));
        assert_eq!(annotation("None"), Type::NoneType);
        assert_eq!(annotation("List[int]"), Type::generic("list", vec![Type::primitive("int")]));
        assert_eq!(annotation("typing.Any"), Type::Any);
        assert_eq!(annotation("Optional[str]"), Type::optional(Type::primitive("str")));
        assert_eq!(
            annotation("Tuple[int, str]"),
            Type::Tuple(vec![Type::primitive("int"), Type::primitive("str")])
        );
        assert_eq!(annotation("'dict[str, int]'"), Type::generic("dict", vec![Type::primitive("str"), Type::primitive("int")]));
        assert_eq!(annotation("1 + 2"), Type::Unresolved);
    }

    #[test]
    fn test_module_symbols() {
        let program = program(
            "x = 1\ndef add(a: int, b: int = 0, *rest) -> int:\n    return a\nclass Point(Base):\n    def __init__(self, x: float):\n        pass\n",
        );
        let symbols = AstSymbolProvider.symbols(Unit::Module(&program));

        let add = &symbols.callables["add"];
        assert_eq!(add.origin, CallableOrigin::Definition(program.body[1].span));
        assert_eq!(add.signature.params.len(), 2);
        assert!(add.signature.params[1].has_default);
        assert!(add.signature.variadic);
        assert_eq!(add.signature.returns, Type::primitive("int"));

        let point = &symbols.callables["Point"];
        assert_eq!(point.signature.params, vec![Param::new("x", Type::primitive("float"), false)]);
        assert_eq!(point.signature.returns, Type::primitive("Point"));
        assert_eq!(symbols.types["Point"].bases, vec!["Base".to_string()]);

        assert!(symbols.variables.is_empty());
    }

    #[test]
    fn test_missing_annotations_are_any() {
        let program = program("def f(a, b=1):\n    pass\n");
        let symbols = AstSymbolProvider.symbols(Unit::Module(&program));
        let f = &symbols.callables["f"].signature;
        assert_eq!(f.params[0].ty, Type::Any);
        assert_eq!(f.returns, Type::Any);
    }

    #[test]
    fn test_function_unit_binds_parameters() {
        let program = program("def f(a: int, *args, **kwargs):\n    def g():\n        pass\n");
        let Statement::FunctionDef(def) = &program.body[0].node else {
            panic!("Expected function");
        };
        let symbols = AstSymbolProvider.symbols(Unit::Function(def));
        assert_eq!(symbols.variables["a"], Type::primitive("int"));
        assert_eq!(symbols.variables["args"], Type::primitive("tuple"));
        assert_eq!(symbols.callables["g"].origin, CallableOrigin::Definition(def.body[0].span));
    }

    #[test]
    fn test_definitions_inside_blocks_share_the_scope() {
        let program = program(
            "if flag:\n    def f(a: int) -> int:\n        return a\nelse:\n    class C:\n        pass\nwhile flag:\n    def g():\n        pass\n",
        );
        let symbols = AstSymbolProvider.symbols(Unit::Module(&program));
        let names: Vec<&str> = symbols.callables.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["f", "C", "g"]);
        assert!(symbols.types.contains_key("C"));

        let Statement::If(if_stmt) = &program.body[0].node else {
            panic!("Expected if");
        };
        assert_eq!(symbols.callables["f"].origin, CallableOrigin::Definition(if_stmt.then_body[0].span));
    }

    #[test]
    fn test_imports_bind_gradual_names() {
        let program = program("import os\nimport a.b\nimport numpy as np\nfrom m import f, g as h\nfrom n import *\n");
        let symbols = AstSymbolProvider.symbols(Unit::Module(&program));
        let names: Vec<&str> = symbols.variables.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["os", "a", "np", "f", "h"]);
        assert!(symbols.variables.values().all(|ty| *ty == Type::Any));
    }

    #[test]
    fn test_keyword_only_parameters() {
        let program = program("def f(a: int, *, flag: bool = False):\n    pass\n");
        let symbols = AstSymbolProvider.symbols(Unit::Module(&program));
        let f = &symbols.callables["f"].signature;
        assert!(!f.params[0].keyword_only);
        assert!(f.params[1].keyword_only);
        assert_eq!(f.positional().count(), 1);
    }

    #[test]
    fn test_class_without_init() {
        let program = program("class A:\n    pass\nclass B(A):\n    pass\n");
        let symbols = AstSymbolProvider.symbols(Unit::Module(&program));
        assert!(!symbols.callables["A"].signature.variadic);
        assert_eq!(symbols.types["A"].bases, vec!["object".to_string()]);
        assert!(symbols.callables["B"].signature.variadic);
    }
}
