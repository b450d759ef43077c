//! Integration test suite for the compiler pipeline
//!
//! Verifies that the components work together across crate boundaries.

/// Re-export components for test convenience
pub mod components {
    pub use core_types;
    pub use js_ast;
    pub use parser;
    pub use wl_cli;
}

use parser::{Compiler, Parser, Program, ThreadedLexer};

/// Parse `source`, failing with the parser's error list
pub fn parse(source: &str) -> Result<Program, Vec<String>> {
    let mut parser = Parser::new(ThreadedLexer::new(source, "test"));
    let program = parser.parse_program();
    let errors = parser.errors();
    if errors.is_empty() {
        Ok(program)
    } else {
        Err(errors)
    }
}

/// Source text to trimmed JavaScript text
pub fn compile(source: &str) -> Result<String, String> {
    let mut program = parse(source).map_err(|errors| errors.join("\n"))?;
    let mut compiler = Compiler::new();
    compiler
        .compile(&mut program)
        .map_err(|diag| diag.to_string())?;
    Ok(compiler.output())
}
