//! Printer output for hand-built modules

use js_ast::{
    print_module, BlockStmt, ClassDecl, Decl, Expr, FuncDecl, FunctionLiteral, Import, Module,
    Node, Placeholder, Stmt, VarDecl, VarKind,
};

fn let_stmt(name: &str, value: Expr) -> Stmt {
    Stmt::Decl(Decl::Var(VarDecl::new(VarKind::Let, name, Some(value))))
}

fn string(s: &str) -> Expr {
    Expr::literal(format!("\"{s}\""))
}

#[test]
fn test_hello_world_var() {
    let mut module = Module::new("main");
    module.body.push(let_stmt("message", string("Hello World!")));

    assert_eq!(module.to_string(), "let message = \"Hello World!\";\n");
}

#[test]
fn test_if_with_assignment() {
    let mut module = Module::new("main");
    module.body.push(let_stmt("test", string("Hello")));
    module.body.push(Stmt::If {
        cond: Expr::binary(Expr::ident("test"), "===", string("Hello")),
        body: BlockStmt {
            body: vec![Stmt::Assign {
                lhs: Expr::ident("test"),
                op: "=".into(),
                rhs: string("World"),
            }],
        },
        alternative: None,
    });

    assert_eq!(
        module.to_string(),
        "let test = \"Hello\";\nif (test === \"Hello\") {\ntest = \"World\";\n};\n"
    );
}

#[test]
fn test_if_else_chain_terminates_every_block() {
    let stmt = Stmt::If {
        cond: Expr::ident("a"),
        body: BlockStmt::default(),
        alternative: Some(Box::new(Stmt::If {
            cond: Expr::ident("b"),
            body: BlockStmt::default(),
            alternative: Some(Box::new(Stmt::Block(BlockStmt {
                body: vec![Stmt::Return(None)],
            }))),
        })),
    };

    assert_eq!(
        stmt.to_string(),
        "if (a) {\n};\nelse if (b) {\n};\nelse {\nreturn;\n};\n"
    );
}

#[test]
fn test_frozen_enum_object() {
    let member = |name: &str, value: &str| {
        (
            name.to_string(),
            Expr::ObjectLiteral {
                properties: vec![
                    ("name".to_string(), string(name)),
                    ("value".to_string(), Expr::RawJs(value.to_string())),
                ],
                multiline: false,
            },
        )
    };
    let freeze = Expr::call(
        Expr::selector(Expr::ident("Object"), "freeze"),
        vec![Expr::ObjectLiteral {
            properties: vec![member("None", "0"), member("Blah", "1")],
            multiline: true,
        }],
    );
    let decl = Decl::Var(VarDecl::new(VarKind::Const, "test", Some(freeze)));

    assert_eq!(
        decl.to_string(),
        "const test = Object.freeze({\n\
         None: { name: \"None\", value: 0 },\n\
         Blah: { name: \"Blah\", value: 1 }\n\
         });\n"
    );
}

#[test]
fn test_class_with_constructor() {
    let assign = |field: &str| Stmt::Assign {
        lhs: Expr::selector(Expr::ident("this"), field),
        op: "=".into(),
        rhs: Expr::ident(field),
    };
    let class = ClassDecl {
        name: "Test".into(),
        methods: vec![FuncDecl {
            exported: false,
            func: FunctionLiteral {
                name: Some("constructor".into()),
                params: vec!["val".into(), "val2".into()],
                body: vec![assign("val"), assign("val2")],
            },
        }],
        ..ClassDecl::default()
    };
    let mut module = Module::new("main");
    module.body.push(Stmt::Decl(Decl::Class(class)));
    module.body.push(let_stmt(
        "v",
        Expr::ClassInstantiate {
            class: Box::new(Expr::ident("Test")),
            args: vec![],
        },
    ));

    assert_eq!(
        module.to_string(),
        "class Test {\n\
         constructor(val, val2) {\n\
         this.val = val;\n\
         this.val2 = val2;\n\
         };\n\
         };\n\
         let v = new Test();\n"
    );
}

#[test]
fn test_anonymous_class_expression() {
    let value = Expr::DeclExpr(Box::new(Decl::Class(ClassDecl::default())));
    let stmt = let_stmt("T", value);

    assert_eq!(stmt.to_string(), "let T = class {\n};\n");
}

#[test]
fn test_function_declaration() {
    let decl = Decl::Func(FuncDecl {
        exported: true,
        func: FunctionLiteral {
            name: Some("add".into()),
            params: vec!["a".into(), "b".into()],
            body: vec![Stmt::Return(Some(Expr::binary(
                Expr::ident("a"),
                "+",
                Expr::ident("b"),
            )))],
        },
    });

    assert_eq!(
        decl.to_string(),
        "export function add(a, b) {\nreturn a + b;\n};\n"
    );
}

#[test]
fn test_placeholder_is_transparent() {
    let group = Stmt::Placeholder(Placeholder::new(vec![
        Node::Decl(Decl::Var(VarDecl::new(VarKind::Let, "a", Some(Expr::literal("1"))))),
        Node::Decl(Decl::Var(VarDecl::new(VarKind::Let, "b", None))),
    ]));

    assert_eq!(group.to_string(), "let a = 1;\nlet b;\n");
}

#[test]
fn test_empty_placeholder_prints_nothing() {
    let mut module = Module::new("main");
    module.body.push(Stmt::Placeholder(Placeholder::new(vec![])));
    module.body.push(Stmt::Decl(Decl::Var(VarDecl::new(
        VarKind::Let,
        "x",
        Some(Expr::literal("1")),
    ))));

    assert_eq!(module.to_string(), "let x = 1;\n");
}

#[test]
fn test_imports_are_separated_from_body() {
    let mut module = Module::new("main");
    module.imports.push(Import {
        alias: "util".into(),
        file: "./util.js".into(),
    });
    module.body.push(Stmt::Expr(Expr::call(
        Expr::selector(Expr::ident("util"), "run"),
        vec![],
    )));

    let mut out = String::new();
    print_module(&mut out, &module).unwrap();

    assert_eq!(
        out,
        "import * as util from \"./util.js\";\n\n\nutil.run();\n"
    );
}

#[test]
fn test_index_and_empty_objects() {
    let index = Expr::IndexExpr {
        object: Box::new(Expr::ident("xs")),
        index: Box::new(Expr::literal("0")),
    };
    assert_eq!(index.to_string(), "xs[0]");

    let inline = Expr::ObjectLiteral {
        properties: vec![],
        multiline: false,
    };
    assert_eq!(inline.to_string(), "{}");

    let multi = Expr::ObjectLiteral {
        properties: vec![],
        multiline: true,
    };
    assert_eq!(multi.to_string(), "{\n}");
}
