//! Compiler driver library
//!
//! Provides the [`Driver`] and supporting modules for the `wlc` binary.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod config;
pub mod driver;
pub mod error;
pub mod repl;

pub use cli::Cli;
pub use config::BuildConfig;
pub use driver::{Driver, FileOutputer};
pub use error::{CliError, CliResult};
