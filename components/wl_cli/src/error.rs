//! Error types for the CLI

use core_types::Diagnostic;
use thiserror::Error;

/// CLI-specific errors
#[derive(Debug, Error)]
pub enum CliError {
    /// File I/O error
    #[error("File error: {0}")]
    IoError(#[from] std::io::Error),

    /// Malformed build configuration
    #[error("Config error: {0}")]
    ConfigError(#[from] serde_json::Error),

    /// Every error the parser recorded, in order
    #[error("{}", .0.join("\n"))]
    ParseErrors(Vec<String>),

    /// First lowering failure
    #[error("{0}")]
    CompileError(#[from] Diagnostic),

    /// Output path resolves to the input file
    #[error("output would overwrite input {}", .0.display())]
    OverwritesInput(std::path::PathBuf),

    /// REPL error
    #[error("REPL error: {0}")]
    ReplError(String),
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;
