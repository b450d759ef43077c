//! Contract tests for the Driver API
//!
//! File compilation is exercised against scratch directories.

use std::fs;
use tempfile::TempDir;
use wl_cli::{BuildConfig, CliError, Driver};

/// Test Driver::compile_file writes next to the input by default
#[test]
fn contract_driver_compile_file_default_location() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("hello.wl");
    fs::write(&input, "var message = \"Hello World!\"\n").unwrap();

    let driver = Driver::new(BuildConfig::default());
    let output = driver.compile_file(&input).unwrap();

    assert_eq!(output, dir.path().join("hello.js"));
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "let message = \"Hello World!\";\n"
    );
}

/// Test Driver::compile_file honors out_dir and extension
#[test]
fn contract_driver_compile_file_out_dir() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let input = src.path().join("shapes.wl");
    fs::write(&input, "type Point struct { x int; y int }\nvar p Point\n").unwrap();

    let config = BuildConfig {
        out_dir: Some(out.path().to_path_buf()),
        extension: "mjs".to_string(),
        ..BuildConfig::default()
    };
    let output = Driver::new(config).compile_file(&input).unwrap();

    assert_eq!(output, out.path().join("shapes.mjs"));
    let js = fs::read_to_string(&output).unwrap();
    assert!(js.starts_with("class Point {\nconstructor(x, y) {"), "{}", js);
    assert!(js.ends_with("let p = new Point();\n"), "{}", js);
}

/// Test Driver::compile_file with non-existent file
#[test]
fn contract_driver_compile_file_not_found() {
    let driver = Driver::new(BuildConfig::default());
    let result = driver.compile_file("/nonexistent/path/to/file.wl".as_ref());

    match result {
        Err(CliError::IoError(_)) => {}
        _ => panic!("Expected IoError for non-existent file"),
    }
}

/// Test that a lowering error produces no output file
#[test]
fn contract_driver_compile_error_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("bad.wl");
    fs::write(&input, "var a = missing\n").unwrap();

    let result = Driver::new(BuildConfig::default()).compile_file(&input);

    match result {
        Err(CliError::CompileError(diag)) => {
            assert_eq!(diag.message, "undefined variable missing");
        }
        other => panic!("Expected CompileError, got {:?}", other),
    }
    assert!(!dir.path().join("bad.js").exists());
}

/// Test that parse errors carry the input path
#[test]
fn contract_driver_parse_errors_name_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("broken.wl");
    fs::write(&input, "var 5 = x\n").unwrap();

    match Driver::new(BuildConfig::default()).compile_file(&input) {
        Err(CliError::ParseErrors(errors)) => {
            let expected = format!("{}:1:5: expected 'IDENT', found 5", input.display());
            assert_eq!(errors, vec![expected]);
        }
        other => panic!("Expected ParseErrors, got {:?}", other),
    }
}

/// Test BuildConfig::load from a JSON file
#[test]
fn contract_build_config_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("wl.json");
    fs::write(&path, r#"{ "extension": "cjs", "builtins": ["require"] }"#).unwrap();

    let config = BuildConfig::load(&path).unwrap();
    assert_eq!(config.extension, "cjs");
    assert_eq!(config.out_dir, None);

    let js = Driver::new(config)
        .compile_string("var fs = require(\"fs\")")
        .unwrap();
    assert_eq!(js, "let fs = require(\"fs\");");
}

/// Test BuildConfig::load rejects malformed JSON
#[test]
fn contract_build_config_malformed() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("wl.json");
    fs::write(&path, "{ not json").unwrap();

    match BuildConfig::load(&path) {
        Err(CliError::ConfigError(_)) => {}
        other => panic!("Expected ConfigError, got {:?}", other),
    }
}

/// Test Driver::compile_file creates a missing output directory
#[test]
fn contract_driver_compile_file_creates_out_dir() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let input = src.path().join("main.wl");
    fs::write(&input, "var x = 1\n").unwrap();
    let out_dir = out.path().join("build").join("js");

    let config = BuildConfig {
        out_dir: Some(out_dir.clone()),
        ..BuildConfig::default()
    };
    let output = Driver::new(config).compile_file(&input).unwrap();

    assert_eq!(output, out_dir.join("main.js"));
    assert_eq!(fs::read_to_string(&output).unwrap(), "let x = 1;\n");
}

/// Test Driver::compile_file never writes over its own input
#[test]
fn contract_driver_compile_file_refuses_to_overwrite_input() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("x.js");
    let source = "var x = 1\n";
    fs::write(&input, source).unwrap();

    let result = Driver::new(BuildConfig::default()).compile_file(&input);

    match result {
        Err(CliError::OverwritesInput(path)) => assert_eq!(path, input),
        other => panic!("Expected OverwritesInput, got {:?}", other),
    }
    assert_eq!(fs::read_to_string(&input).unwrap(), source);
}
