//! Unit tests for SourcePosition

use core_types::SourcePosition;
use std::collections::HashSet;

#[test]
fn test_source_position_fields() {
    let pos = SourcePosition::new("main.wl", 10, 5);

    assert_eq!(&*pos.file, "main.wl");
    assert_eq!(pos.line, 10);
    assert_eq!(pos.column, 5);
}

#[test]
fn test_source_position_large_values() {
    let pos = SourcePosition::new("big.wl", u32::MAX, u32::MAX);
    assert_eq!(pos.to_string(), format!("big.wl:{}:{}", u32::MAX, u32::MAX));
}

#[test]
fn test_source_position_equality_includes_file() {
    let a = SourcePosition::new("a.wl", 1, 1);
    let b = SourcePosition::new("b.wl", 1, 1);

    assert_ne!(a, b);
    assert_eq!(a, a.clone());
}

#[test]
fn test_source_position_hashable() {
    let mut seen = HashSet::new();
    seen.insert(SourcePosition::new("a.wl", 1, 1));
    seen.insert(SourcePosition::new("a.wl", 1, 1));
    seen.insert(SourcePosition::new("a.wl", 2, 1));

    assert_eq!(seen.len(), 2);
}
