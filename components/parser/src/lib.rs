//! Front end and JavaScript lowering
//!
//! Turns source text into JavaScript text.
//!
//! # Overview
//!
//! - [`Lexer`] - State-machine scanner with automatic semicolon insertion
//! - [`ThreadedLexer`] - The same scanner running on its own thread
//! - [`Parser`] - Pratt parser producing a [`Program`]
//! - [`SymbolTable`] - Flat name resolution used during lowering
//! - [`Compiler`] - Lowers a [`Program`] to a [`js_ast::Module`] and prints it
//!
//! # Example
//!
//! ```
//! use parser::{Compiler, Parser};
//!
//! let mut parser = Parser::for_source("var message = \"Hello World!\"", "main.wl");
//! let mut program = parser.parse_program();
//! assert!(parser.errors().is_empty());
//!
//! let mut compiler = Compiler::new();
//! compiler.compile(&mut program).unwrap();
//! assert_eq!(compiler.output(), "let message = \"Hello World!\";");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ast;
pub mod error;
pub mod js_gen;
pub mod lexer;
pub mod parser;
pub mod scope;
pub mod token;

pub use ast::{Block, Expression, Program, Statement};
pub use error::ParseError;
pub use js_gen::{CompilationUnit, Compiler, Outputer, StringOutputer, BUILTINS};
pub use lexer::{Lexer, ThreadedLexer, TokenSource};
pub use parser::Parser;
pub use scope::{Symbol, SymbolScope, SymbolTable};
pub use token::{Token, TokenKind};
