//! Shared source-location and diagnostic types for the weblang toolchain.
//!
//! Every pipeline stage (scanner, parser, lowering, driver) reports problems
//! through the same [`Diagnostic`] value so that the driver can print them
//! uniformly.
//!
//! # Overview
//!
//! - [`SourcePosition`] - File, line and column of a token or node
//! - [`Diagnostic`] - An error with a kind, message and optional position
//! - [`ErrorKind`] - Which stage/category produced the diagnostic
//!
//! # Examples
//!
//! ```
//! use core_types::{Diagnostic, ErrorKind, SourcePosition};
//!
//! let pos = SourcePosition::new("main.wl", 3, 7);
//! let err = Diagnostic::new(ErrorKind::SyntaxError, "expected ';', found }", Some(pos));
//!
//! assert_eq!(err.to_string(), "main.wl:3:7: expected ';', found }");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
mod source;

pub use error::{Diagnostic, ErrorKind};
pub use source::SourcePosition;
