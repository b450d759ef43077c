//! Source position tracking for diagnostics.

use std::fmt;
use std::sync::Arc;

/// Represents a position in a source file.
///
/// Lines and columns are 1-based. Columns count bytes, so a multi-byte
/// character advances the column by its UTF-8 width.
///
/// # Examples
///
/// ```
/// use core_types::SourcePosition;
///
/// let pos = SourcePosition::new("lib.wl", 10, 5);
///
/// assert_eq!(pos.line, 10);
/// assert_eq!(pos.to_string(), "lib.wl:10:5");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourcePosition {
    /// File the position refers to
    pub file: Arc<str>,
    /// Line number (1-indexed)
    pub line: u32,
    /// Column number (1-indexed, in bytes)
    pub column: u32,
}

impl SourcePosition {
    /// Create a position in `file` at `line`:`column`
    pub fn new(file: impl Into<Arc<str>>, line: u32, column: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}
