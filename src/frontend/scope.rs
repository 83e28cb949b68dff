//! Lexical scopes: an arena of symbol tables linked by parent indices.
//!
//! A scope is created for every module and every function/class body the analyzer visits. Name
//! lookup walks from a scope to its parents and finally to the shared builtin scope, which is
//! built once from the `typpy_core` registries and never changes afterwards.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use indexmap::IndexMap;

use typpy_core::lang::builtins::{BUILTIN_FUNCTIONS, BuiltinKind};
use typpy_core::lang::types::{COLLECTION_TYPES, NUMERIC_TYPES, OBJECT, STRING_LIKE_TYPES};

use super::ast::Span;
use super::subtype::ClassHierarchy;
use super::types::{Param, Signature, Type};

/// Index of a scope inside a [`ScopeTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(usize);

/// Where a callable was defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallableOrigin {
    Builtin,
    /// Span of the defining `def`/`class` statement.
    Definition(Span),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallableEntry {
    pub origin: CallableOrigin,
    pub signature: Signature,
}

/// A named type: a builtin or a user class together with its direct base classes.
#[derive(Debug, Clone, PartialEq)]
pub struct NominalType {
    pub ty: Type,
    pub bases: Vec<String>,
}

/// One lexical symbol table.
#[derive(Debug, Clone)]
pub struct Scope {
    pub name: String,
    /// `None` falls back to the builtin scope.
    pub parent: Option<ScopeId>,
    pub file: PathBuf,
    pub qualified_name: String,
    pub variables: IndexMap<String, Type>,
    pub callables: IndexMap<String, CallableEntry>,
    pub types: IndexMap<String, NominalType>,
}

impl Scope {
    pub fn new(name: impl Into<String>, parent: Option<ScopeId>, file: impl Into<PathBuf>, qualified_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent,
            file: file.into(),
            qualified_name: qualified_name.into(),
            variables: IndexMap::new(),
            callables: IndexMap::new(),
            types: IndexMap::new(),
        }
    }

    pub fn add_variable(&mut self, name: impl Into<String>, ty: Type) {
        self.variables.insert(name.into(), ty);
    }

    pub fn add_callable(&mut self, name: impl Into<String>, entry: CallableEntry) {
        self.callables.insert(name.into(), entry);
    }

    pub fn add_type(&mut self, name: impl Into<String>, ty: NominalType) {
        self.types.insert(name.into(), ty);
    }
}

/// The process-wide builtin scope.
static BUILTINS: LazyLock<Scope> = LazyLock::new(build_builtins);

/// Return the shared builtin scope.
pub fn builtins() -> &'static Scope {
    &BUILTINS
}

fn build_builtins() -> Scope {
    let mut scope = Scope::new("builtins", None, PathBuf::new(), "builtins");

    scope.add_type(
        OBJECT,
        NominalType {
            ty: Type::primitive(OBJECT),
            bases: Vec::new(),
        },
    );

    // The tower is modeled by the subtype relation; `bool` also derives from `int` nominally.
    let mut narrower: Option<&str> = None;
    for info in NUMERIC_TYPES {
        if let Some(narrow) = narrower {
            if let Some(entry) = scope.types.get_mut(narrow) {
                entry.bases = vec![info.canonical.to_string()];
            }
        }
        scope.add_type(info.canonical, nominal(info.canonical));
        narrower = Some(info.canonical);
    }

    for info in STRING_LIKE_TYPES {
        scope.add_type(info.canonical, nominal(info.canonical));
    }

    for info in COLLECTION_TYPES {
        scope.add_type(info.canonical, nominal(info.canonical));
        for alias in info.aliases {
            scope.add_type(*alias, nominal(info.canonical));
        }
    }

    scope.add_type(
        "Any",
        NominalType {
            ty: Type::Any,
            bases: Vec::new(),
        },
    );

    for info in BUILTIN_FUNCTIONS {
        let params = info
            .params
            .iter()
            .map(|p| Param::new(p.name, Type::from_spelling(p.ty), p.has_default))
            .collect();
        let returns = match info.kind {
            BuiltinKind::Constructor => Type::primitive(info.canonical),
            BuiltinKind::Function => Type::from_spelling(info.returns),
        };
        let mut signature = Signature::new(params, returns);
        signature.variadic = info.variadic;
        scope.add_callable(
            info.canonical,
            CallableEntry {
                origin: CallableOrigin::Builtin,
                signature,
            },
        );
    }

    scope
}

fn nominal(name: &str) -> NominalType {
    NominalType {
        ty: Type::primitive(name),
        bases: vec![OBJECT.to_string()],
    }
}

/// Arena of all scopes created while checking one file.
#[derive(Debug, Default)]
pub struct ScopeTable {
    scopes: Vec<Scope>,
}

impl ScopeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_scope(&mut self, scope: Scope) -> ScopeId {
        self.scopes.push(scope);
        ScopeId(self.scopes.len() - 1)
    }

    /// Create an empty scope nested in `parent`, named `parent.name`.
    pub fn add_child(&mut self, parent: ScopeId, name: &str) -> ScopeId {
        let parent_scope = self.get(parent);
        let child = Scope::new(
            name,
            Some(parent),
            parent_scope.file.clone(),
            format!("{}.{}", parent_scope.qualified_name, name),
        );
        self.add_scope(child)
    }

    pub fn get(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.0]
    }

    pub fn get_mut(&mut self, id: ScopeId) -> &mut Scope {
        &mut self.scopes[id.0]
    }

    pub fn file(&self, id: ScopeId) -> &Path {
        &self.get(id).file
    }

    /// Scopes from `id` outwards, ending with the builtin scope.
    fn chain(&self, id: ScopeId) -> impl Iterator<Item = &Scope> {
        std::iter::successors(Some(self.get(id)), |scope| scope.parent.map(|p| self.get(p))).chain(std::iter::once(builtins()))
    }

    pub fn resolve_variable(&self, id: ScopeId, name: &str) -> Option<&Type> {
        self.chain(id).find_map(|scope| scope.variables.get(name))
    }

    pub fn resolve_callable(&self, id: ScopeId, name: &str) -> Option<&CallableEntry> {
        self.chain(id).find_map(|scope| scope.callables.get(name))
    }

    pub fn resolve_type(&self, id: ScopeId, name: &str) -> Option<&NominalType> {
        self.chain(id).find_map(|scope| scope.types.get(name))
    }

    pub fn add_variable(&mut self, id: ScopeId, name: impl Into<String>, ty: Type) {
        self.get_mut(id).add_variable(name, ty);
    }

    /// Class hierarchy as seen from scope `id`.
    pub fn classes(&self, id: ScopeId) -> ScopeClasses<'_> {
        ScopeClasses { table: self, scope: id }
    }
}

/// [`ClassHierarchy`] backed by the type entries visible from one scope.
pub struct ScopeClasses<'a> {
    table: &'a ScopeTable,
    scope: ScopeId,
}

impl ClassHierarchy for ScopeClasses<'_> {
    fn bases(&self, name: &str) -> Option<Vec<String>> {
        self.table.resolve_type(self.scope, name).map(|t| t.bases.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn module(table: &mut ScopeTable) -> ScopeId {
        table.add_scope(Scope::new("mod", None, "mod.py", "mod"))
    }

    #[test]
    fn test_lookup_walks_parent_chain() {
        let mut table = ScopeTable::new();
        let root = module(&mut table);
        table.add_variable(root, "x", Type::primitive("int"));
        let child = table.add_child(root, "f");
        let grandchild = table.add_child(child, "g");

        assert_eq!(table.resolve_variable(grandchild, "x"), Some(&Type::primitive("int")));
        assert_eq!(table.get(grandchild).qualified_name, "mod.f.g");
        assert_eq!(table.resolve_variable(grandchild, "y"), None);
    }

    #[test]
    fn test_shadowing_prefers_nearest_scope() {
        let mut table = ScopeTable::new();
        let root = module(&mut table);
        table.add_variable(root, "x", Type::primitive("int"));
        let child = table.add_child(root, "f");
        table.add_variable(child, "x", Type::primitive("str"));

        assert_eq!(table.resolve_variable(child, "x"), Some(&Type::primitive("str")));
        assert_eq!(table.resolve_variable(root, "x"), Some(&Type::primitive("int")));
    }

    #[test]
    fn test_builtins_are_reachable_from_every_scope() {
        let mut table = ScopeTable::new();
        let root = module(&mut table);
        let child = table.add_child(root, "f");

        let len = table.resolve_callable(child, "len").unwrap();
        assert_eq!(len.origin, CallableOrigin::Builtin);
        assert_eq!(len.signature.returns, Type::primitive("int"));
        assert_eq!(table.resolve_type(child, "List").unwrap().ty, Type::primitive("list"));
        assert_eq!(table.resolve_type(child, "Any").unwrap().ty, Type::Any);
        assert!(table.resolve_callable(child, "print").unwrap().signature.variadic);
    }

    #[test]
    fn test_builtin_constructors_return_their_type() {
        let list = &builtins().callables["list"];
        assert_eq!(list.signature.returns, Type::primitive("list"));
        assert!(list.signature.params.iter().all(|p| p.has_default));
    }

    #[test]
    fn test_bool_derives_from_int() {
        let mut table = ScopeTable::new();
        let root = module(&mut table);
        assert_eq!(table.classes(root).bases("bool"), Some(vec!["int".to_string()]));
        assert_eq!(table.classes(root).bases("Missing"), None);
    }

    #[test]
    fn test_local_definition_shadows_builtin() {
        let mut table = ScopeTable::new();
        let root = module(&mut table);
        table.get_mut(root).add_callable(
            "len",
            CallableEntry {
                origin: CallableOrigin::Definition(Span::new(0, 3)),
                signature: Signature::new(vec![], Type::primitive("str")),
            },
        );
        assert_eq!(table.resolve_callable(root, "len").unwrap().origin, CallableOrigin::Definition(Span::new(0, 3)));
    }
}
