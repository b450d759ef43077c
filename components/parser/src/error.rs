//! Parser error types and helpers

use crate::token::Token;
use core_types::{Diagnostic, ErrorKind, SourcePosition};
use thiserror::Error;

/// Number of recorded errors after which parsing is abandoned
pub const MAX_ERRORS: usize = 10;

/// Error raised while parsing a statement
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Recoverable; parsing resumes at the next statement
    #[error(transparent)]
    Syntax(#[from] Diagnostic),

    /// More than [`MAX_ERRORS`] errors were recorded
    #[error("too many errors")]
    TooManyErrors,
}

/// Create a syntax error at a given position
pub fn syntax_error(message: impl Into<String>, position: SourcePosition) -> ParseError {
    ParseError::Syntax(Diagnostic::new(
        ErrorKind::SyntaxError,
        message,
        Some(position),
    ))
}

/// `expected <what>, found <literal>` at the offending token
pub fn expected(what: &str, found: &Token) -> ParseError {
    syntax_error(
        format!("expected {}, found {}", what, found.literal),
        found.position(),
    )
}

/// Lookahead mismatch
pub fn unexpected_peek(expected: &str, peek: &Token) -> ParseError {
    syntax_error(
        format!(
            "expected next token to be {}, got {} instead",
            expected, peek.kind
        ),
        peek.position(),
    )
}

/// Token that cannot start an expression
pub fn no_prefix_parse_fn(token: &Token) -> ParseError {
    syntax_error(
        format!("no prefix parse function for {} found", token.kind),
        token.position(),
    )
}

/// Scanner failure surfaced as an `Illegal` token
pub fn scan_error(token: &Token) -> ParseError {
    ParseError::Syntax(Diagnostic::new(
        ErrorKind::ScanError,
        token.literal.clone(),
        Some(token.position()),
    ))
}
