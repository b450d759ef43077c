//! Diagnostic types shared by every compilation stage.
//!
//! Scanner and parser problems are collected as a batch, lowering problems
//! abort on the first failure. Both are represented by [`Diagnostic`].

use crate::SourcePosition;
use std::fmt;
use thiserror::Error;

/// The category of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Illegal character, unterminated string or malformed number
    ScanError,
    /// Unexpected token or malformed statement
    SyntaxError,
    /// Reference to an identifier that was never defined
    ReferenceError,
    /// Malformed or unsupported type declaration
    TypeError,
    /// Failure writing output or another toolchain-internal problem
    InternalError,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::ScanError => "scan error",
            ErrorKind::SyntaxError => "syntax error",
            ErrorKind::ReferenceError => "reference error",
            ErrorKind::TypeError => "type error",
            ErrorKind::InternalError => "internal error",
        };
        f.write_str(name)
    }
}

/// A compiler diagnostic with an optional source position.
///
/// The `Display` form is `file:line:col: message` when the position is
/// known and the bare message otherwise.
///
/// # Examples
///
/// ```
/// use core_types::{Diagnostic, ErrorKind};
///
/// let err = Diagnostic::new(ErrorKind::ReferenceError, "undefined variable x", None);
///
/// assert_eq!(err.to_string(), "undefined variable x");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}{message}", position_prefix(.position))]
pub struct Diagnostic {
    /// The type of error
    pub kind: ErrorKind,
    /// Human-readable error message
    pub message: String,
    /// Source position where the error occurred
    pub position: Option<SourcePosition>,
}

fn position_prefix(position: &Option<SourcePosition>) -> String {
    match position {
        Some(pos) => format!("{}: ", pos),
        None => String::new(),
    }
}

impl Diagnostic {
    /// Create a diagnostic
    pub fn new(
        kind: ErrorKind,
        message: impl Into<String>,
        position: Option<SourcePosition>,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            position,
        }
    }
}
