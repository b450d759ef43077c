//! REPL (Read-Compile-Print Loop) implementation

use crate::driver::Driver;
use crate::error::{CliError, CliResult};
use parser::{Compiler, SymbolScope};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

const REPL_UNIT: &str = "repl";

/// Run the interactive REPL
///
/// Every complete input is compiled against one persistent compiler, so
/// names defined earlier stay visible.
pub fn run_repl(driver: &Driver) -> CliResult<()> {
    let mut editor = DefaultEditor::new()
        .map_err(|e| CliError::ReplError(format!("Failed to initialize editor: {}", e)))?;
    let mut compiler = driver.new_compiler();

    println!("wlc {}", env!("CARGO_PKG_VERSION"));
    println!("Type code to see its JavaScript, or .help for commands.");
    println!();

    let mut line_buffer = String::new();
    let mut in_multiline = false;

    loop {
        let prompt = if in_multiline { "... " } else { "> " };

        match editor.readline(prompt) {
            Ok(line) => {
                let trimmed = line.trim();

                if !in_multiline && (trimmed == ".exit" || trimmed == "exit") {
                    break;
                }

                if !in_multiline && trimmed.starts_with('.') {
                    println!("{}", handle_repl_command(trimmed, &compiler));
                    continue;
                }

                if in_multiline {
                    line_buffer.push('\n');
                }
                line_buffer.push_str(&line);

                if !is_input_complete(&line_buffer) {
                    in_multiline = true;
                    continue;
                }
                in_multiline = false;

                let _ = editor.add_history_entry(&line_buffer);

                match driver.compile_with(&mut compiler, &line_buffer, REPL_UNIT) {
                    Ok(js) if js.is_empty() => {}
                    Ok(js) => println!("{}", js),
                    Err(e) => eprintln!("{}", e),
                }
                line_buffer.clear();
            }
            Err(ReadlineError::Interrupted) => {
                if in_multiline {
                    println!("^C");
                    line_buffer.clear();
                    in_multiline = false;
                } else {
                    println!("Press Ctrl-D or type .exit to quit");
                }
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                return Err(CliError::ReplError(format!("Readline error: {}", err)));
            }
        }
    }

    Ok(())
}

/// Text printed for a `.command`
fn handle_repl_command(command: &str, compiler: &Compiler) -> String {
    match command {
        ".help" => [
            "REPL Commands:",
            "  .help     - Show this help message",
            "  .symbols  - List names defined so far",
            "  .exit     - Exit the REPL",
        ]
        .join("\n"),
        ".symbols" => compiler
            .symbols()
            .symbols()
            .iter()
            .filter(|s| s.scope == SymbolScope::Local)
            .map(|s| format!("{:>4}  {}", s.index, s.name))
            .collect::<Vec<_>>()
            .join("\n"),
        _ => format!(
            "Unknown command: {}\nType .help for available commands",
            command
        ),
    }
}

/// Balanced braces, brackets and parens, outside any string
fn is_input_complete(input: &str) -> bool {
    let mut depth = 0i32;
    let mut quote: Option<char> = None;
    let mut escape_next = false;

    for c in input.chars() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match quote {
            Some('"') if c == '\\' => escape_next = true,
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None => match c {
                '"' | '`' => quote = Some(c),
                '{' | '[' | '(' => depth += 1,
                '}' | ']' | ')' => depth -= 1,
                _ => {}
            },
        }
    }

    depth <= 0 && quote.is_none()
}
