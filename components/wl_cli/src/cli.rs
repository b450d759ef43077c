//! Command-line arguments

use clap::Parser;
use std::path::PathBuf;

/// Compile source files to JavaScript
#[derive(Parser, Debug)]
#[command(name = "wlc")]
#[command(version, about = "Compile source files to JavaScript", long_about = None)]
pub struct Cli {
    /// Source files to compile
    pub files: Vec<PathBuf>,

    /// Directory for generated files (defaults to each input's directory)
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// Compile inline code and print the JavaScript
    #[arg(short, long)]
    pub eval: Option<String>,

    /// Start interactive REPL
    #[arg(short, long)]
    pub repl: bool,

    /// JSON build configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print tokens before parsing
    #[arg(long)]
    pub print_tokens: bool,

    /// Print the parsed program
    #[arg(long)]
    pub print_ast: bool,

    /// Print the lowered JavaScript AST
    #[arg(long)]
    pub print_js_ast: bool,

    /// Report each compiled file on stderr
    #[arg(short, long)]
    pub verbose: bool,
}
