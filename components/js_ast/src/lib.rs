//! JavaScript target representation for the weblang compiler
//!
//! This crate provides a simplified JavaScript AST and a printer that
//! serializes it back to source text.
//!
//! The tree carries more strings than a typical AST: it only exists to be
//! printed, so operators, names and literal values are stored pre-rendered.
//!
//! # Features
//!
//! - Module / declaration / statement / expression node set
//! - `RawJs` escape hatch for pre-rendered text
//! - `Placeholder` nodes that splice several siblings into one position
//! - Precedence-aware printing with single statement termination
//!
//! # Example
//!
//! ```
//! use js_ast::{Decl, Expr, Module, Stmt, VarDecl, VarKind};
//!
//! let mut module = Module::new("main");
//! module.body.push(Stmt::Decl(Decl::Var(VarDecl::new(
//!     VarKind::Let,
//!     "message",
//!     Some(Expr::literal("\"Hello World!\"")),
//! ))));
//!
//! assert_eq!(module.to_string(), "let message = \"Hello World!\";\n");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod jsast;
pub mod operator;
pub mod printer;

// Re-export main types at crate root
pub use jsast::{
    BlockStmt, ClassDecl, Decl, Expr, FuncDecl, FunctionLiteral, Import, Module, Node,
    Placeholder, Stmt, VarDecl, VarKind,
};
pub use operator::precedence;
pub use printer::{print_module, Printer};
