//! Abstract Syntax Tree for the analyzed Python subset.
//!
//! The shapes follow Python's own grammar closely enough that the analyzer can reason about
//! statements and expressions the way a Python programmer reads them: `elif` chains stay flat,
//! chained assignments keep every target, and keyword arguments keep the span of their name.

use std::fmt;

/// Source location span (byte offsets)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// A node with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

pub type Ident = String;

/// A parsed source unit (module body).
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub body: Vec<Spanned<Statement>>,
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    FunctionDef(FunctionDef),
    ClassDef(ClassDef),
    If(IfStmt),
    While(WhileStmt),
    For(ForStmt),
    Return(Option<Spanned<Expr>>),
    Pass,
    Break,
    Continue,
    Import(ImportStmt),
    /// `a = b = value`, `a, b = value`
    Assign(AssignStmt),
    /// `name: annotation [= value]`
    AnnAssign(AnnAssignStmt),
    /// `name += value`
    AugAssign(AugAssignStmt),
    Expr(Spanned<Expr>),
}

impl Statement {
    /// Short human-readable name of the statement kind, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Statement::FunctionDef(_) => "function definition",
            Statement::ClassDef(_) => "class definition",
            Statement::If(_) => "if statement",
            Statement::While(_) => "while loop",
            Statement::For(_) => "for loop",
            Statement::Return(_) => "return statement",
            Statement::Pass => "pass statement",
            Statement::Break => "break statement",
            Statement::Continue => "continue statement",
            Statement::Import(_) => "import statement",
            Statement::Assign(_) => "assignment",
            Statement::AnnAssign(_) => "annotated assignment",
            Statement::AugAssign(_) => "augmented assignment",
            Statement::Expr(_) => "expression statement",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    pub decorators: Vec<Spanned<Expr>>,
    pub name: Spanned<Ident>,
    pub params: Vec<Spanned<Param>>,
    pub returns: Option<Spanned<Expr>>,
    pub body: Vec<Spanned<Statement>>,
}

/// `name[: annotation][= default]`, `*args` or `**kwargs`
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: Ident,
    pub kind: ParamKind,
    pub annotation: Option<Spanned<Expr>>,
    pub default: Option<Spanned<Expr>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParamKind {
    #[default]
    Regular,
    /// Declared after `*` or `*args`; bound by keyword only.
    KeywordOnly,
    /// `*args`
    VarPositional,
    /// `**kwargs`
    VarKeyword,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassDef {
    pub decorators: Vec<Spanned<Expr>>,
    pub name: Spanned<Ident>,
    pub bases: Vec<Spanned<Expr>>,
    pub body: Vec<Spanned<Statement>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Spanned<Expr>,
    pub then_body: Vec<Spanned<Statement>>,
    pub elif_branches: Vec<(Spanned<Expr>, Vec<Spanned<Statement>>)>,
    pub else_body: Option<Vec<Spanned<Statement>>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub condition: Spanned<Expr>,
    pub body: Vec<Spanned<Statement>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub targets: Vec<Spanned<Ident>>,
    pub iter: Spanned<Expr>,
    pub body: Vec<Spanned<Statement>>,
}

/// `import a.b as c` (`names` empty) or `from ..a.b import c, d as e`.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportStmt {
    /// Number of leading dots in a relative `from` import.
    pub level: usize,
    pub module: Vec<Ident>,
    pub alias: Option<Ident>,
    pub names: Vec<(Ident, Option<Ident>)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignStmt {
    /// Every `target =` in source order; more than one means a chained assignment.
    pub targets: Vec<Spanned<AssignTarget>>,
    pub value: Spanned<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AssignTarget {
    Name(Ident),
    /// `a, b` or `(a, b)`
    Tuple(Vec<Spanned<Ident>>),
    /// Attribute or subscript targets (`self.x`, `xs[0]`).
    Expr(Expr),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnnAssignStmt {
    pub target: Spanned<Ident>,
    pub annotation: Spanned<Expr>,
    pub value: Option<Spanned<Expr>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AugAssignStmt {
    pub target: Spanned<Expr>,
    pub op: BinaryOp,
    pub value: Spanned<Expr>,
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Ident(Ident),
    Literal(Literal),
    Attribute(Box<Spanned<Expr>>, Spanned<Ident>),
    Call(Box<Spanned<Expr>>, Vec<CallArg>),
    /// `value[slice]`; a tuple-valued slice is an [`Expr::Tuple`].
    Subscript(Box<Spanned<Expr>>, Box<Spanned<Expr>>),
    Tuple(Vec<Spanned<Expr>>),
    List(Vec<Spanned<Expr>>),
    Set(Vec<Spanned<Expr>>),
    Dict(Vec<(Spanned<Expr>, Spanned<Expr>)>),
    Unary(UnaryOp, Box<Spanned<Expr>>),
    Binary(Box<Spanned<Expr>>, BinaryOp, Box<Spanned<Expr>>),
}

impl Expr {
    /// Short human-readable name of the expression kind, used in diagnostics and logs.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expr::Ident(_) => "name",
            Expr::Literal(_) => "literal",
            Expr::Attribute(..) => "attribute access",
            Expr::Call(..) => "call",
            Expr::Subscript(..) => "subscript",
            Expr::Tuple(_) => "tuple",
            Expr::List(_) => "list",
            Expr::Set(_) => "set",
            Expr::Dict(_) => "dict",
            Expr::Unary(..) => "unary operation",
            Expr::Binary(..) => "binary operation",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
    /// Imaginary literal such as `2j` (the value is the imaginary part).
    Complex(f64),
    Str(String),
    Bytes(Vec<u8>),
    Bool(bool),
    None,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CallArg {
    Positional(Spanned<Expr>),
    /// `name=value`
    Keyword(Spanned<Ident>, Spanned<Expr>),
}

impl CallArg {
    pub fn value(&self) -> &Spanned<Expr> {
        match self {
            CallArg::Positional(value) | CallArg::Keyword(_, value) => value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Pos,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    FloorDiv,
    Mod,
    Pow,
    // Comparison
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    In,
    NotIn,
    Is,
    IsNot,
    // Boolean
    And,
    Or,
}

impl BinaryOp {
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinaryOp::Eq
                | BinaryOp::NotEq
                | BinaryOp::Lt
                | BinaryOp::LtEq
                | BinaryOp::Gt
                | BinaryOp::GtEq
                | BinaryOp::In
                | BinaryOp::NotIn
                | BinaryOp::Is
                | BinaryOp::IsNot
        )
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::FloorDiv => "//",
            BinaryOp::Mod => "%",
            BinaryOp::Pow => "**",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::In => "in",
            BinaryOp::NotIn => "not in",
            BinaryOp::Is => "is",
            BinaryOp::IsNot => "is not",
            BinaryOp::And => "and",
            BinaryOp::Or => "or",
        };
        write!(f, "{}", s)
    }
}
