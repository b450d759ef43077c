//! Full Pipeline Integration Tests
//!
//! Source text -> tokens -> Program -> js_ast::Module -> JavaScript text.

use integration_tests::{compile, parse};
use js_ast::{Decl, Expr, Stmt};
use parser::ast::{Expression, Statement};
use parser::{Compiler, Lexer, Parser, Token, TokenKind, TokenSource};

/// Test: scanner output is identical through both token sources
#[test]
fn test_pipeline_token_sources_agree() {
    let source = "type T struct { a int }\nvar t T\nif t.a == 0 { t.a = 1 } else { return }";

    let pull: Vec<Token> = Lexer::new(source, "test").collect();

    let mut threaded = parser::ThreadedLexer::new(source, "test");
    let mut pushed = Vec::new();
    loop {
        let token = threaded.next_token();
        let done = token.is(TokenKind::Eof);
        pushed.push(token);
        if done {
            break;
        }
    }
    threaded.drain();

    assert_eq!(pull, pushed);
}

/// Test: hello world
#[test]
fn test_pipeline_hello_world() {
    assert_eq!(
        compile("var message = \"Hello World!\"").unwrap(),
        "let message = \"Hello World!\";"
    );
}

/// Test: only equality operators are rewritten
#[test]
fn test_pipeline_operator_rewrites() {
    let js = compile("var a = 1\nvar b = a == 1\nvar c = a != 2\nvar d = a <= 3\nvar e = -a * 2").unwrap();
    assert_eq!(
        js,
        "let a = 1;\nlet b = a === 1;\nlet c = a !== 2;\nlet d = a <= 3;\nlet e = -a * 2;"
    );
}

/// Test: selector chains stay left-associative through lowering
#[test]
fn test_pipeline_selector_chain() {
    let mut program = parse("var h = 1\nvar x = h.i.j").unwrap();

    let Statement::VarDeclaration { spec, .. } = &program.statements[1] else {
        panic!("expected a var declaration");
    };
    match &spec.value {
        Some(Expression::Selector { object, field, .. }) => {
            assert_eq!(field.name, "j");
            assert!(matches!(**object, Expression::Selector { .. }));
        }
        other => panic!("expected a selector, got {:?}", other),
    }

    let module = Compiler::new().lower(&mut program).unwrap();
    let Stmt::Decl(Decl::Var(var)) = &module.body[1] else {
        panic!("expected a lowered var");
    };
    match &var.value {
        Some(Expr::SelectorExpr { object, sel }) => {
            assert_eq!(sel, "j");
            assert!(matches!(**object, Expr::SelectorExpr { .. }));
        }
        other => panic!("expected a selector, got {:?}", other),
    }
}

/// Test: struct field order is kept in parameters and assignments
#[test]
fn test_pipeline_struct_field_order() {
    let js = compile("type P struct { z int; a int; m int }").unwrap();
    assert_eq!(
        js,
        "class P {\nconstructor(z, a, m) {\nthis.z = z;\nthis.a = a;\nthis.m = m;\n};\n};"
    );
}

/// Test: enum member order and literal values are kept verbatim
#[test]
fn test_pipeline_enum_order_and_values() {
    let js = compile("type E enum { B = 0x10; A = 3; C = \"c\" }").unwrap();
    let b = js.find("B:").unwrap();
    let a = js.find("A:").unwrap();
    let c = js.find("C:").unwrap();
    assert!(b < a && a < c);
    assert!(js.contains("B: { name: \"B\", value: 0x10 }"), "{}", js);
    assert!(js.contains("C: { name: \"C\", value: \"c\" }"), "{}", js);
}

/// Test: var with a named struct type and no value instantiates it
#[test]
fn test_pipeline_struct_zero_value() {
    let js = compile("type Test struct { val int }\nvar v Test").unwrap();
    assert!(js.ends_with("let v = new Test();"), "{}", js);
}

/// Test: the canonical form of every scenario reparses identically
#[test]
fn test_pipeline_idempotent_reparse() {
    let sources = [
        "var test = \"Hello\"\nif test == \"Hello\" {\n    test = \"World\"\n}",
        "type test enum { None = 0; Blah = 1; Yu = 2 }\nvar v = test.Blah",
        "type Test struct { val int; val2 string = \"d\" }\nvar v Test",
        "const (\n  a = 1\n  b = a[0](2)\n)\nvar f = func(x) { return -x }",
    ];

    for source in sources {
        let printed = parse(source).unwrap().to_string();
        let reprinted = parse(&printed)
            .unwrap_or_else(|errors| panic!("{:?} reparsing {}", errors, printed))
            .to_string();
        assert_eq!(printed, reprinted);
    }
}

/// Test: parse errors are returned as a batch with positions
#[test]
fn test_pipeline_parse_errors() {
    let errors = parse("var 5 = x\nvar ok = 1\nconst = 2").unwrap_err();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0], "test:1:5: expected 'IDENT', found 5");
    assert!(errors[1].starts_with("test:3:7:"), "{}", errors[1]);
}

/// Test: the parser gives up after too many errors
#[test]
fn test_pipeline_error_limit() {
    let source = "var 1\n".repeat(50);
    let mut parser = Parser::for_source(&source, "test");
    parser.parse_program();
    assert_eq!(parser.errors().len(), parser::error::MAX_ERRORS + 1);
}

/// Test: giving up releases the threaded scanner
#[test]
fn test_pipeline_error_limit_threaded() {
    let source = "var 1\n".repeat(50);
    let mut parser = Parser::new(parser::ThreadedLexer::new(source, "test"));
    let program = parser.parse_program();

    assert!(program.statements.is_empty());
    assert_eq!(parser.errors().len(), parser::error::MAX_ERRORS + 1);
}

/// Test: lowering stops at the first undefined name
#[test]
fn test_pipeline_lowering_error() {
    let err = compile("var a = 1\nvar b = c + d").unwrap_err();
    assert_eq!(err, "test:2:9: undefined variable c");
}
