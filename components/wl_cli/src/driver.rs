//! Compilation driver
//!
//! The Driver coordinates the pipeline stages:
//! - ThreadedLexer and Parser for the front end
//! - Compiler for lowering
//! - an Outputer for the generated text

use crate::config::BuildConfig;
use crate::error::{CliError, CliResult};
use crate::repl::run_repl;
use core_types::{Diagnostic, ErrorKind};
use parser::{
    CompilationUnit, Compiler, Lexer, Outputer, Parser, Program, StringOutputer, ThreadedLexer,
};
use std::fs;
use std::path::{Path, PathBuf};

/// Writes each unit to the file its name points at
#[derive(Debug, Default)]
pub struct FileOutputer {
    written: Vec<PathBuf>,
}

impl FileOutputer {
    /// Create an outputer
    pub fn new() -> Self {
        Self::default()
    }

    /// Files written so far
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl Outputer for FileOutputer {
    type Sink = String;

    fn writer_for(&mut self, _unit: &CompilationUnit) -> String {
        String::new()
    }

    fn done(&mut self, unit: &CompilationUnit, sink: String) -> Result<(), Diagnostic> {
        let path = PathBuf::from(&unit.name);
        let mut text = sink.trim().to_string();
        text.push('\n');

        let write_error = |e: std::io::Error| {
            Diagnostic::new(
                ErrorKind::InternalError,
                format!("cannot write {}: {}", path.display(), e),
                None,
            )
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_error)?;
        }
        fs::write(&path, text).map_err(write_error)?;
        self.written.push(path);
        Ok(())
    }
}

/// True when `target` names the existing file `input`
fn same_file(input: &Path, target: &Path) -> bool {
    if input == target {
        return true;
    }
    match (fs::canonicalize(input), fs::canonicalize(target)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Drives source text through the pipeline
pub struct Driver {
    /// Build settings
    config: BuildConfig,
    /// Whether to print tokens before parsing
    print_tokens: bool,
    /// Whether to print the parsed program
    print_ast: bool,
    /// Whether to print the lowered JavaScript AST
    print_js_ast: bool,
    /// Whether to report progress on stderr
    verbose: bool,
}

impl Driver {
    /// Create a driver
    ///
    /// # Example
    /// ```
    /// use wl_cli::{BuildConfig, Driver};
    ///
    /// let driver = Driver::new(BuildConfig::default());
    /// let js = driver.compile_string("var x = 1").unwrap();
    /// assert_eq!(js, "let x = 1;");
    /// ```
    pub fn new(config: BuildConfig) -> Self {
        Self {
            config,
            print_tokens: false,
            print_ast: false,
            print_js_ast: false,
            verbose: false,
        }
    }

    /// Enable token printing
    pub fn with_print_tokens(mut self, enabled: bool) -> Self {
        self.print_tokens = enabled;
        self
    }

    /// Enable AST printing
    pub fn with_print_ast(mut self, enabled: bool) -> Self {
        self.print_ast = enabled;
        self
    }

    /// Enable JavaScript AST printing
    pub fn with_print_js_ast(mut self, enabled: bool) -> Self {
        self.print_js_ast = enabled;
        self
    }

    /// Enable progress reporting
    pub fn with_verbose(mut self, enabled: bool) -> Self {
        self.verbose = enabled;
        self
    }

    /// Build settings in effect
    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Compiler seeded with the configured builtins
    pub fn new_compiler(&self) -> Compiler {
        Compiler::with_builtins(&self.config.builtins)
    }

    /// Compile one file and write the result
    ///
    /// # Returns
    /// Path of the generated file
    ///
    /// # Errors
    /// Returns `CliError` if the file cannot be read, fails to parse or
    /// lower, or the output cannot be written. Also refuses when the output
    /// path is the input itself. Nothing is written on error.
    pub fn compile_file(&self, path: &Path) -> CliResult<PathBuf> {
        let source = fs::read_to_string(path)?;
        let target = self.config.output_path(path);
        if same_file(path, &target) {
            return Err(CliError::OverwritesInput(target));
        }

        if self.verbose {
            eprintln!("compiling {} -> {}", path.display(), target.display());
        }

        let file = path.display().to_string();
        let mut program = self.parse(&source, &file)?;

        let unit = CompilationUnit::new(target.display().to_string());
        let mut compiler = self.new_compiler();
        self.dump_js_ast(&compiler, &unit, &program)?;

        let mut outputer = FileOutputer::new();
        compiler.compile_unit(&unit, &mut program, &mut outputer)?;
        Ok(target)
    }

    /// Compile inline source and return the JavaScript
    pub fn compile_string(&self, source: &str) -> CliResult<String> {
        self.compile_with(&mut self.new_compiler(), source, "<eval>")
    }

    /// Compile `source` against an existing compiler, keeping its symbols
    pub fn compile_with(
        &self,
        compiler: &mut Compiler,
        source: &str,
        file: &str,
    ) -> CliResult<String> {
        let mut program = self.parse(source, file)?;
        let unit = CompilationUnit::new(file);
        self.dump_js_ast(compiler, &unit, &program)?;

        let mut outputer = StringOutputer::new();
        compiler.compile_unit(&unit, &mut program, &mut outputer)?;
        Ok(outputer.output(file).unwrap_or_default().to_string())
    }

    /// Start the interactive REPL
    pub fn repl(&self) -> CliResult<()> {
        run_repl(self)
    }

    fn parse(&self, source: &str, file: &str) -> CliResult<Program> {
        if self.print_tokens {
            for token in Lexer::new(source, file) {
                println!("{}", token);
            }
        }

        let mut parser = Parser::new(ThreadedLexer::new(source, file));
        let program = parser.parse_program();
        let errors = parser.errors();
        if !errors.is_empty() {
            return Err(CliError::ParseErrors(errors));
        }

        if self.print_ast {
            println!("{}", program);
        }
        Ok(program)
    }

    /// Lowers a throwaway copy so the real pass starts from the same symbols
    fn dump_js_ast(
        &self,
        compiler: &Compiler,
        unit: &CompilationUnit,
        program: &Program,
    ) -> CliResult<()> {
        if self.print_js_ast {
            let module = compiler.clone().lower_unit(unit, &mut program.clone())?;
            println!("{:#?}", module);
        }
        Ok(())
    }
}
