//! End-to-End CLI Integration Tests
//!
//! Drives whole files through the wl_cli Driver. This is the highest level
//! integration test: source files in, JavaScript files out.

use std::fs;
use tempfile::TempDir;
use wl_cli::{BuildConfig, CliError, Driver};

fn write(dir: &TempDir, name: &str, source: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, source).unwrap();
    path
}

/// Test: the if/assign program compiles to a file
#[test]
fn test_e2e_if_assignment_file() {
    let dir = TempDir::new().unwrap();
    let input = write(
        &dir,
        "greet.wl",
        "var test = \"Hello\"\nif test == \"Hello\" {\n    test = \"World\"\n}\n",
    );

    let output = Driver::new(BuildConfig::default())
        .compile_file(&input)
        .unwrap();

    assert_eq!(
        fs::read_to_string(output).unwrap(),
        "let test = \"Hello\";\nif (test === \"Hello\") {\ntest = \"World\";\n};\n"
    );
}

/// Test: the enum program compiles to a file
#[test]
fn test_e2e_enum_file() {
    let dir = TempDir::new().unwrap();
    let input = write(
        &dir,
        "enum.wl",
        "type test enum { None = 0; Blah = 1; Yu = 2 }\nvar v = test.Blah\nif v == test.Yu { return false }\n",
    );

    let output = Driver::new(BuildConfig::default())
        .compile_file(&input)
        .unwrap();

    let expected = "const test = Object.freeze({
None: { name: \"None\", value: 0 },
Blah: { name: \"Blah\", value: 1 },
Yu: { name: \"Yu\", value: 2 }
});
let v = test.Blah;
if (v === test.Yu) {
return false;
};
";
    assert_eq!(fs::read_to_string(output).unwrap(), expected);
}

/// Test: files are compiled independently, each with its own symbols
#[test]
fn test_e2e_files_do_not_share_symbols() {
    let dir = TempDir::new().unwrap();
    let first = write(&dir, "first.wl", "var shared = 1\n");
    let second = write(&dir, "second.wl", "var other = shared\n");

    let driver = Driver::new(BuildConfig::default());
    driver.compile_file(&first).unwrap();

    match driver.compile_file(&second) {
        Err(CliError::CompileError(diag)) => {
            assert_eq!(diag.message, "undefined variable shared");
        }
        other => panic!("Expected CompileError, got {:?}", other),
    }
    assert!(dir.path().join("first.js").exists());
    assert!(!dir.path().join("second.js").exists());
}

/// Test: a JSON config controls output location, extension and builtins
#[test]
fn test_e2e_config_file() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("dist");
    fs::create_dir(&out).unwrap();

    let config_path = write(
        &dir,
        "wl.json",
        &format!(
            r#"{{ "out_dir": {:?}, "extension": "mjs", "builtins": ["document"] }}"#,
            out.display().to_string()
        ),
    );
    let input = write(&dir, "page.wl", "document.title = \"Home\"\n");

    let config = BuildConfig::load(&config_path).unwrap();
    let output = Driver::new(config).compile_file(&input).unwrap();

    assert_eq!(output, out.join("page.mjs"));
    assert_eq!(
        fs::read_to_string(output).unwrap(),
        "document.title = \"Home\";\n"
    );
}

/// Test: scan errors surface as parse errors with positions
#[test]
fn test_e2e_scan_error() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "bad.wl", "var a = 1\n@\n");

    match Driver::new(BuildConfig::default()).compile_file(&input) {
        Err(CliError::ParseErrors(errors)) => {
            assert_eq!(errors.len(), 1);
            assert!(
                errors[0].ends_with(":2:1: unrecognized character: U+0040 '@'"),
                "{}",
                errors[0]
            );
        }
        other => panic!("Expected ParseErrors, got {:?}", other),
    }
}
