//! wlc - compile source files to JavaScript
//!
//! Parses CLI arguments and delegates to the Driver.

use clap::Parser as ClapParser;
use wl_cli::{BuildConfig, Cli, CliError, Driver};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match BuildConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let driver = Driver::new(config)
        .with_print_tokens(cli.print_tokens)
        .with_print_ast(cli.print_ast)
        .with_print_js_ast(cli.print_js_ast)
        .with_verbose(cli.verbose);

    if let Some(code) = cli.eval {
        match driver.compile_string(&code) {
            Ok(js) => println!("{}", js),
            Err(e) => {
                report(&e);
                std::process::exit(1);
            }
        }
    } else if cli.repl {
        driver.repl()?;
    } else if !cli.files.is_empty() {
        let mut failed = false;
        for file in &cli.files {
            if let Err(e) = driver.compile_file(file) {
                if let CliError::IoError(io) = &e {
                    eprintln!("Error: Could not read file '{}': {}", file.display(), io);
                } else {
                    report(&e);
                }
                failed = true;
            }
        }
        if failed {
            std::process::exit(1);
        }
    } else {
        println!("wlc {}", env!("CARGO_PKG_VERSION"));
        println!();
        println!("Usage:");
        println!("  wlc <FILE>...          Compile files to JavaScript");
        println!("  wlc --eval <CODE>      Print the JavaScript for inline code");
        println!("  wlc --repl             Start interactive REPL");
        println!();
        println!("Run 'wlc --help' for more options.");
    }

    Ok(())
}

fn report(err: &CliError) {
    match err {
        CliError::ParseErrors(errors) => {
            for error in errors {
                eprintln!("{}", error);
            }
        }
        CliError::CompileError(diag) => eprintln!("Compile Error: {}", diag),
        other => eprintln!("Error: {}", other),
    }
}
