//! JavaScript AST node definitions
//!
//! The node set is closed: every consumer matches exhaustively over
//! [`Expr`], [`Stmt`] and [`Decl`]. `RawJs` and `Placeholder` appear in all
//! three so that the lowering pass can put them anywhere.

use crate::printer::Printer;
use std::fmt;

/// A compiled JavaScript module (one per compilation unit)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Module {
    /// Name of the compilation unit the module was produced from
    pub name: String,
    /// `import * as alias from "file"` entries
    pub imports: Vec<Import>,
    /// Top-level statements; declarations are wrapped in [`Stmt::Decl`]
    pub body: Vec<Stmt>,
}

impl Module {
    /// Create an empty module
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            imports: Vec::new(),
            body: Vec::new(),
        }
    }
}

/// A namespace import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    /// Local alias of the imported namespace
    pub alias: String,
    /// Path of the imported file
    pub file: String,
}

/// Any JavaScript node, used where siblings of different kinds are mixed
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Expression node
    Expr(Expr),
    /// Statement node
    Stmt(Stmt),
    /// Declaration node
    Decl(Decl),
}

/// Transparent collection of sibling nodes.
///
/// Printing a placeholder prints each child in order as if the
/// placeholder itself were absent.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Placeholder {
    /// Nodes printed in place of the placeholder
    pub children: Vec<Node>,
}

impl Placeholder {
    /// Create a placeholder around `children`
    pub fn new(children: Vec<Node>) -> Self {
        Self { children }
    }
}

/// JavaScript expressions
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Identifier reference
    Identifier {
        /// Identifier name
        name: String,
    },

    /// Literal, stored as its JavaScript source text
    BasicLiteral {
        /// Rendered literal (`42`, `"text"`, `true`)
        value: String,
    },

    /// Binary operation
    BinaryExpression {
        /// Left operand
        lhs: Box<Expr>,
        /// Operator text
        op: String,
        /// Right operand
        rhs: Box<Expr>,
    },

    /// Prefix unary operation
    UnaryExpression {
        /// Operator text
        op: String,
        /// Operand
        operand: Box<Expr>,
    },

    /// `function name(params) { body }`
    FunctionLiteral(FunctionLiteral),

    /// Member access `object.sel`
    SelectorExpr {
        /// Object expression
        object: Box<Expr>,
        /// Member name
        sel: String,
    },

    /// Computed member access `object[index]`
    IndexExpr {
        /// Object expression
        object: Box<Expr>,
        /// Index expression
        index: Box<Expr>,
    },

    /// Call `callee(args)`
    CallExpr {
        /// Called expression
        callee: Box<Expr>,
        /// Arguments
        args: Vec<Expr>,
    },

    /// Object literal `{ key: value }`
    ObjectLiteral {
        /// Properties in insertion order
        properties: Vec<(String, Expr)>,
        /// Print one property per line instead of inline
        multiline: bool,
    },

    /// `new Class(args)`
    ClassInstantiate {
        /// Constructor expression
        class: Box<Expr>,
        /// Constructor arguments
        args: Vec<Expr>,
    },

    /// Declaration used in expression position (anonymous class)
    DeclExpr(Box<Decl>),

    /// Pre-rendered JavaScript
    RawJs(String),

    /// Transparent sibling sequence
    Placeholder(Placeholder),
}

impl Expr {
    /// Identifier expression
    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Identifier { name: name.into() }
    }

    /// Literal expression from rendered JavaScript text
    pub fn literal(value: impl Into<String>) -> Self {
        Expr::BasicLiteral {
            value: value.into(),
        }
    }

    /// Binary expression
    pub fn binary(lhs: Expr, op: impl Into<String>, rhs: Expr) -> Self {
        Expr::BinaryExpression {
            lhs: Box::new(lhs),
            op: op.into(),
            rhs: Box::new(rhs),
        }
    }

    /// Member access expression
    pub fn selector(object: Expr, sel: impl Into<String>) -> Self {
        Expr::SelectorExpr {
            object: Box::new(object),
            sel: sel.into(),
        }
    }

    /// Call expression
    pub fn call(callee: Expr, args: Vec<Expr>) -> Self {
        Expr::CallExpr {
            callee: Box::new(callee),
            args,
        }
    }
}

/// Function literal shared by expressions, declarations and class methods
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FunctionLiteral {
    /// Function name, `None` for anonymous functions
    pub name: Option<String>,
    /// Parameter names
    pub params: Vec<String>,
    /// Body statements
    pub body: Vec<Stmt>,
}

/// Block of statements
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlockStmt {
    /// Statements in order
    pub body: Vec<Stmt>,
}

/// JavaScript statements
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// Expression statement
    Expr(Expr),

    /// `return [value]`
    Return(Option<Expr>),

    /// Declaration statement
    Decl(Decl),

    /// If statement
    If {
        /// Condition
        cond: Expr,
        /// Consequent block
        body: BlockStmt,
        /// Alternate (block or nested if)
        alternative: Option<Box<Stmt>>,
    },

    /// Block statement
    Block(BlockStmt),

    /// Assignment `lhs op rhs`
    Assign {
        /// Assignment target
        lhs: Expr,
        /// Assignment operator text
        op: String,
        /// Assigned value
        rhs: Expr,
    },

    /// Pre-rendered JavaScript
    RawJs(String),

    /// Transparent sibling sequence
    Placeholder(Placeholder),
}

/// Variable declaration kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarKind {
    /// `let`
    Let,
    /// `const`
    Const,
}

impl VarKind {
    /// Keyword text
    pub fn as_str(self) -> &'static str {
        match self {
            VarKind::Let => "let",
            VarKind::Const => "const",
        }
    }
}

/// `let`/`const` declaration, also used for class fields
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    /// Prefix with `export`
    pub exported: bool,
    /// Declaration keyword (ignored for class fields)
    pub kind: VarKind,
    /// Bound name
    pub name: String,
    /// Initial value
    pub value: Option<Expr>,
}

impl VarDecl {
    /// Create a non-exported declaration
    pub fn new(kind: VarKind, name: impl Into<String>, value: Option<Expr>) -> Self {
        Self {
            exported: false,
            kind,
            name: name.into(),
            value,
        }
    }
}

/// Function declaration (also a class method)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FuncDecl {
    /// Prefix with `export`
    pub exported: bool,
    /// The function
    pub func: FunctionLiteral,
}

/// Class declaration
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClassDecl {
    /// Prefix with `export`
    pub exported: bool,
    /// Class name, empty for class expressions
    pub name: String,
    /// Field declarations, printed before methods
    pub fields: Vec<VarDecl>,
    /// Methods (the constructor is a method named `constructor`)
    pub methods: Vec<FuncDecl>,
}

/// JavaScript declarations
#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    /// Function declaration
    Func(FuncDecl),
    /// Class declaration
    Class(ClassDecl),
    /// Variable declaration
    Var(VarDecl),
    /// Pre-rendered JavaScript
    RawJs(String),
    /// Transparent sibling sequence
    Placeholder(Placeholder),
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Printer::new(f).module(self)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Printer::new(f).expr(self)
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Printer::new(f).stmt(self)
    }
}

impl fmt::Display for Decl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Printer::new(f).decl(self)
    }
}
