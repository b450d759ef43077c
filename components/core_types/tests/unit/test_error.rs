//! Unit tests for Diagnostic and ErrorKind

use core_types::{Diagnostic, ErrorKind, SourcePosition};
use std::error::Error;

#[test]
fn test_diagnostic_display_prefixes_position() {
    let err = Diagnostic::new(
        ErrorKind::SyntaxError,
        "expected 'IDENT', found 5",
        Some(SourcePosition::new("junk", 1, 5)),
    );

    assert_eq!(err.to_string(), "junk:1:5: expected 'IDENT', found 5");
}

#[test]
fn test_diagnostic_display_without_position() {
    let err = Diagnostic::new(ErrorKind::ReferenceError, "undefined variable nope", None);
    assert_eq!(err.to_string(), "undefined variable nope");
}

#[test]
fn test_diagnostic_is_std_error() {
    let err = Diagnostic::new(ErrorKind::InternalError, "boom", None);
    let as_dyn: &dyn Error = &err;

    assert!(as_dyn.source().is_none());
    assert_eq!(as_dyn.to_string(), "boom");
}

#[test]
fn test_error_kind_display() {
    assert_eq!(ErrorKind::ScanError.to_string(), "scan error");
    assert_eq!(ErrorKind::SyntaxError.to_string(), "syntax error");
    assert_eq!(ErrorKind::ReferenceError.to_string(), "reference error");
    assert_eq!(ErrorKind::TypeError.to_string(), "type error");
}

#[test]
fn test_diagnostic_clone_preserves_fields() {
    let err = Diagnostic::new(
        ErrorKind::TypeError,
        "unknown type decl",
        Some(SourcePosition::new("t.wl", 2, 1)),
    );
    let copy = err.clone();

    assert_eq!(err, copy);
    assert_eq!(copy.kind, ErrorKind::TypeError);
}
