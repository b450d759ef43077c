//! Lowering from the source AST to the JavaScript AST
//!
//! Structs become classes whose constructor takes one parameter per field,
//! enums become frozen objects, and `==`/`!=` become strict comparisons.
//! Every identifier reference is checked against the symbol table; the
//! first failure aborts the pass.

use crate::ast::{
    Block, Expression, FieldList, FunctionLiteral, Program, Statement, VarKind, VarSpec,
};
use crate::scope::SymbolTable;
use core_types::{Diagnostic, ErrorKind, SourcePosition};
use js_ast::{
    print_module, BlockStmt, ClassDecl, Decl, Expr, FuncDecl, Module, Node, Placeholder, Stmt,
    VarDecl,
};
use std::collections::BTreeMap;
use std::fmt;

/// Names every compilation can reference without defining them
pub const BUILTINS: &[&str] = &[
    "console",
    "Object",
    "Math",
    "JSON",
    "Array",
    "String",
    "Number",
    "Boolean",
    "Date",
    "Promise",
    "parseInt",
    "parseFloat",
    "isNaN",
    "undefined",
    "int",
    "float",
    "string",
    "bool",
];

/// Identifiers that are not valid JavaScript binding names
const JS_RESERVED: &[&str] = &[
    "await",
    "break",
    "case",
    "catch",
    "class",
    "continue",
    "debugger",
    "default",
    "delete",
    "do",
    "export",
    "extends",
    "finally",
    "for",
    "function",
    "import",
    "in",
    "instanceof",
    "let",
    "new",
    "null",
    "super",
    "switch",
    "this",
    "throw",
    "try",
    "typeof",
    "void",
    "while",
    "with",
    "yield",
];

/// One output artifact of a compilation
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CompilationUnit {
    /// Unit name, also used as the module name
    pub name: String,
}

impl CompilationUnit {
    /// Create a unit
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Supplies and receives the sink each unit is printed into
pub trait Outputer {
    /// Text sink handed to the printer
    type Sink: fmt::Write;

    /// Sink for `unit`
    fn writer_for(&mut self, unit: &CompilationUnit) -> Self::Sink;

    /// Called once `unit` has been fully printed into `sink`
    fn done(&mut self, unit: &CompilationUnit, sink: Self::Sink) -> Result<(), Diagnostic>;
}

/// Keeps each unit's trimmed output in memory
#[derive(Debug, Default)]
pub struct StringOutputer {
    outputs: BTreeMap<CompilationUnit, String>,
}

impl StringOutputer {
    /// Create an empty outputer
    pub fn new() -> Self {
        Self::default()
    }

    /// Output of the unit called `name`
    pub fn output(&self, name: &str) -> Option<&str> {
        self.outputs
            .get(&CompilationUnit::new(name))
            .map(String::as_str)
    }
}

impl Outputer for StringOutputer {
    type Sink = String;

    fn writer_for(&mut self, _unit: &CompilationUnit) -> String {
        String::new()
    }

    fn done(&mut self, unit: &CompilationUnit, sink: String) -> Result<(), Diagnostic> {
        self.outputs.insert(unit.clone(), sink.trim().to_string());
        Ok(())
    }
}

/// Lowers programs to JavaScript.
///
/// The symbol table persists across calls, so later programs can refer to
/// names defined by earlier ones.
#[derive(Debug, Clone)]
pub struct Compiler {
    symbols: SymbolTable,
    output: String,
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Compiler {
    /// Create a compiler with the [`BUILTINS`] pre-defined
    pub fn new() -> Self {
        let mut symbols = SymbolTable::new();
        for (index, name) in BUILTINS.iter().enumerate() {
            symbols.define_builtin(index, name);
        }
        Self {
            symbols,
            output: String::new(),
        }
    }

    /// Create a compiler with extra builtin names
    pub fn with_builtins<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut compiler = Self::new();
        for (offset, name) in extra.into_iter().enumerate() {
            compiler
                .symbols
                .define_builtin(BUILTINS.len() + offset, name.as_ref());
        }
        compiler
    }

    /// Names known so far
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Lower `program` and append its JavaScript to the output buffer
    pub fn compile(&mut self, program: &mut Program) -> Result<(), Diagnostic> {
        let module = self.lower(program)?;
        print_module(&mut self.output, &module).map_err(print_failure)
    }

    /// Accumulated JavaScript, trimmed
    pub fn output(&self) -> String {
        self.output.trim().to_string()
    }

    /// Lower `program` into a module named `main`
    pub fn lower(&mut self, program: &mut Program) -> Result<Module, Diagnostic> {
        self.lower_unit(&CompilationUnit::new("main"), program)
    }

    /// Lower `program` into a module named after `unit`
    pub fn lower_unit(
        &mut self,
        unit: &CompilationUnit,
        program: &mut Program,
    ) -> Result<Module, Diagnostic> {
        // names defined by a program that fails to lower are forgotten
        let checkpoint = self.symbols.clone();

        let mut module = Module::new(unit.name.clone());
        for stmt in &mut program.statements {
            match self.lower_statement(stmt) {
                Ok(lowered) => module.body.push(lowered),
                Err(err) => {
                    self.symbols = checkpoint;
                    return Err(err);
                }
            }
        }
        Ok(module)
    }

    /// Lower `program` and print it into the sink `outputer` provides
    pub fn compile_unit<O: Outputer>(
        &mut self,
        unit: &CompilationUnit,
        program: &mut Program,
        outputer: &mut O,
    ) -> Result<(), Diagnostic> {
        let module = self.lower_unit(unit, program)?;
        let mut sink = outputer.writer_for(unit);
        print_module(&mut sink, &module).map_err(print_failure)?;
        outputer.done(unit, sink)
    }

    fn lower_statement(&mut self, stmt: &mut Statement) -> Result<Stmt, Diagnostic> {
        let lowered = match stmt {
            Statement::VarDeclaration { kind, spec, .. } => {
                Stmt::Decl(Decl::Var(self.lower_var_spec(*kind, spec)?))
            }
            Statement::VarGroup { kind, specs, .. } => {
                let mut children = Vec::with_capacity(specs.len());
                for spec in specs.iter_mut() {
                    children.push(Node::Decl(Decl::Var(self.lower_var_spec(*kind, spec)?)));
                }
                Stmt::Placeholder(Placeholder::new(children))
            }
            Statement::TypeDeclaration {
                name,
                type_def,
                position,
            } => {
                let js_name = js_safe(&name.name);
                let decl = match type_def {
                    Expression::Struct { fields, .. } => Decl::Class(ClassDecl {
                        name: js_name,
                        ..self.lower_struct(fields)?
                    }),
                    Expression::Enum { fields, .. } => Decl::Var(VarDecl::new(
                        js_ast::VarKind::Const,
                        js_name,
                        Some(lower_enum(fields)),
                    )),
                    _ => {
                        return Err(Diagnostic::new(
                            ErrorKind::TypeError,
                            "unknown type decl",
                            Some(position.clone()),
                        ))
                    }
                };
                self.symbols.define(&name.name);
                Stmt::Decl(decl)
            }
            Statement::Return { value, .. } => {
                let value = match value {
                    Some(value) => Some(self.lower_expression(value)?),
                    None => None,
                };
                Stmt::Return(value)
            }
            Statement::Expression { expression, .. } => {
                Stmt::Expr(self.lower_expression(expression)?)
            }
            Statement::Block(block) => Stmt::Block(self.lower_block(block)?),
            Statement::If {
                condition,
                consequence,
                alternative,
                ..
            } => {
                let cond = self.lower_expression(condition)?;
                let body = self.lower_block(consequence)?;
                let alternative = match alternative {
                    Some(alt) => Some(Box::new(self.lower_statement(alt)?)),
                    None => None,
                };
                Stmt::If {
                    cond,
                    body,
                    alternative,
                }
            }
            Statement::FunctionDeclaration { name, function, .. } => {
                // defined before the body so the function can recurse
                self.symbols.define(&name.name);
                function.name = Some(name.name.clone());
                Stmt::Decl(Decl::Func(FuncDecl {
                    exported: false,
                    func: self.lower_function(function)?,
                }))
            }
            Statement::Assign {
                lhs, operator, rhs, ..
            } => Stmt::Assign {
                lhs: self.lower_expression(lhs)?,
                op: operator.clone(),
                rhs: self.lower_expression(rhs)?,
            },
        };
        Ok(lowered)
    }

    fn lower_block(&mut self, block: &mut Block) -> Result<BlockStmt, Diagnostic> {
        let mut body = Vec::with_capacity(block.statements.len());
        for stmt in &mut block.statements {
            body.push(self.lower_statement(stmt)?);
        }
        Ok(BlockStmt { body })
    }

    fn lower_var_spec(&mut self, kind: VarKind, spec: &mut VarSpec) -> Result<VarDecl, Diagnostic> {
        // defined before the value so a function literal can refer to itself
        self.symbols.define(&spec.name.name);

        if let Some(Expression::Function(func)) = &mut spec.value {
            func.name = Some(spec.name.name.clone());
        }

        let value = match (&mut spec.value, &spec.type_expr) {
            (Some(value), _) => Some(self.lower_expression(value)?),
            (None, Some(type_expr)) => Some(self.zero_value(type_expr)?),
            (None, None) => None,
        };

        let kind = match kind {
            VarKind::Var => js_ast::VarKind::Let,
            VarKind::Const => js_ast::VarKind::Const,
        };
        Ok(VarDecl::new(kind, js_safe(&spec.name.name), value))
    }

    /// Initial value of a variable declared with a type and no value
    fn zero_value(&mut self, type_expr: &Expression) -> Result<Expr, Diagnostic> {
        if let Expression::Identifier(ident) = type_expr {
            match ident.name.as_str() {
                "int" | "float" => return Ok(Expr::literal("0")),
                "string" => return Ok(Expr::literal("\"\"")),
                "bool" => return Ok(Expr::literal("false")),
                _ => {}
            }
        }

        match type_expr {
            Expression::Identifier(_) | Expression::Selector { .. } => {
                let mut type_expr = type_expr.clone();
                Ok(Expr::ClassInstantiate {
                    class: Box::new(self.lower_expression(&mut type_expr)?),
                    args: Vec::new(),
                })
            }
            other => Err(Diagnostic::new(
                ErrorKind::TypeError,
                format!("unsupported type for zero value {}", other),
                Some(other.position().clone()),
            )),
        }
    }

    fn lower_struct(&mut self, fields: &mut FieldList) -> Result<ClassDecl, Diagnostic> {
        let mut params = Vec::with_capacity(fields.fields.len());
        let mut body = Vec::with_capacity(fields.fields.len());

        for field in &mut fields.fields {
            let param = js_safe(&field.name.name);
            body.push(Stmt::Assign {
                lhs: Expr::selector(Expr::ident("this"), field.name.name.clone()),
                op: "=".to_string(),
                rhs: Expr::ident(param.clone()),
            });
            match &mut field.value {
                Some(default) => {
                    let default = self.lower_expression(default)?;
                    params.push(format!("{} = {}", param, default));
                }
                None => params.push(param),
            }
        }

        let constructor = FuncDecl {
            exported: false,
            func: js_ast::FunctionLiteral {
                name: Some("constructor".to_string()),
                params,
                body,
            },
        };

        Ok(ClassDecl {
            methods: vec![constructor],
            ..ClassDecl::default()
        })
    }

    fn lower_expression(&mut self, expr: &mut Expression) -> Result<Expr, Diagnostic> {
        let lowered = match expr {
            Expression::Identifier(ident) => {
                if self.symbols.resolve(&ident.name).is_none() {
                    return Err(undefined_variable(&ident.name, &ident.position));
                }
                Expr::ident(js_safe(&ident.name))
            }
            Expression::IntegerLiteral { value, .. } => Expr::literal(value.to_string()),
            Expression::FloatLiteral { literal, .. } => Expr::literal(literal.clone()),
            Expression::StringLiteral { value, .. } => Expr::literal(format!("\"{}\"", value)),
            Expression::RawStringLiteral { value, .. } => Expr::literal(quote_raw(value)),
            Expression::BooleanLiteral { value, .. } => Expr::literal(value.to_string()),
            Expression::Prefix {
                operator, operand, ..
            } => Expr::UnaryExpression {
                op: operator.clone(),
                operand: Box::new(self.lower_expression(operand)?),
            },
            Expression::Infix {
                left,
                operator,
                right,
                ..
            } => {
                let op = match operator.as_str() {
                    "==" => "===",
                    "!=" => "!==",
                    other => other,
                };
                Expr::binary(
                    self.lower_expression(left)?,
                    op,
                    self.lower_expression(right)?,
                )
            }
            Expression::Selector { object, field, .. } => {
                Expr::selector(self.lower_expression(object)?, field.name.clone())
            }
            Expression::Call {
                function,
                arguments,
                ..
            } => {
                let callee = self.lower_expression(function)?;
                let mut args = Vec::with_capacity(arguments.len());
                for arg in arguments.iter_mut() {
                    args.push(self.lower_expression(arg)?);
                }
                Expr::call(callee, args)
            }
            Expression::Index { object, index, .. } => Expr::IndexExpr {
                object: Box::new(self.lower_expression(object)?),
                index: Box::new(self.lower_expression(index)?),
            },
            Expression::Function(func) => Expr::FunctionLiteral(self.lower_function(func)?),
            Expression::Struct { fields, .. } => {
                Expr::DeclExpr(Box::new(Decl::Class(self.lower_struct(fields)?)))
            }
            Expression::Enum { fields, .. } => lower_enum(fields),
        };
        Ok(lowered)
    }

    fn lower_function(
        &mut self,
        func: &mut FunctionLiteral,
    ) -> Result<js_ast::FunctionLiteral, Diagnostic> {
        let mut params = Vec::with_capacity(func.parameters.len());
        for param in &func.parameters {
            self.symbols.define(&param.name);
            params.push(js_safe(&param.name));
        }
        let body = self.lower_block(&mut func.body)?.body;

        Ok(js_ast::FunctionLiteral {
            name: func.name.as_deref().map(js_safe),
            params,
            body,
        })
    }
}

/// `Object.freeze({ A: { name: "A", value: 0 }, .. })`, members in
/// declaration order. A member without a value takes its ordinal.
fn lower_enum(fields: &FieldList) -> Expr {
    let properties = fields
        .fields
        .iter()
        .enumerate()
        .map(|(ordinal, field)| {
            let value = match &field.value {
                Some(value) => value.to_string(),
                None => ordinal.to_string(),
            };
            let member = Expr::ObjectLiteral {
                properties: vec![
                    (
                        "name".to_string(),
                        Expr::literal(format!("\"{}\"", field.name.name)),
                    ),
                    ("value".to_string(), Expr::RawJs(value)),
                ],
                multiline: false,
            };
            (field.name.name.clone(), member)
        })
        .collect();

    Expr::call(
        Expr::selector(Expr::ident("Object"), "freeze"),
        vec![Expr::ObjectLiteral {
            properties,
            multiline: true,
        }],
    )
}

fn js_safe(name: &str) -> String {
    if JS_RESERVED.contains(&name) {
        format!("_{}", name)
    } else {
        name.to_string()
    }
}

/// Raw string contents as a double-quoted JavaScript string
fn quote_raw(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for ch in value.chars() {
        match ch {
            '\\' => quoted.push_str("\\\\"),
            '"' => quoted.push_str("\\\""),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

fn undefined_variable(name: &str, position: &SourcePosition) -> Diagnostic {
    Diagnostic::new(
        ErrorKind::ReferenceError,
        format!("undefined variable {}", name),
        Some(position.clone()),
    )
}

fn print_failure(_: fmt::Error) -> Diagnostic {
    Diagnostic::new(ErrorKind::InternalError, "failed to write output", None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;

    fn compile(input: &str) -> Result<String, Diagnostic> {
        let mut parser = Parser::for_source(input, "test");
        let mut program = parser.parse_program();
        assert!(parser.errors().is_empty(), "{:?}", parser.errors());

        let mut compiler = Compiler::new();
        compiler.compile(&mut program)?;
        Ok(compiler.output())
    }

    #[test]
    fn test_js_safe_prefixes_reserved_words() {
        assert_eq!(js_safe("class"), "_class");
        assert_eq!(js_safe("value"), "value");
    }

    #[test]
    fn test_quote_raw_escapes() {
        assert_eq!(quote_raw("a\"b\\c\nd"), "\"a\\\"b\\\\c\\nd\"");
    }

    #[test]
    fn test_undefined_variable() {
        let err = compile("x = 1").unwrap_err();
        assert_eq!(err.kind, ErrorKind::ReferenceError);
        assert_eq!(err.to_string(), "test:1:1: undefined variable x");
    }

    #[test]
    fn test_zero_values_for_builtin_types() {
        let out = compile("var a int\nvar b string\nvar c bool").unwrap();
        assert_eq!(out, "let a = 0;\nlet b = \"\";\nlet c = false;");
    }

    #[test]
    fn test_not_equal_is_strict() {
        let out = compile("var a = 1\nvar b = a != 2").unwrap();
        assert_eq!(out, "let a = 1;\nlet b = a !== 2;");
    }

    #[test]
    fn test_function_literal_takes_variable_name() {
        let out = compile("var add = func(a, b) { return a + b }").unwrap();
        assert_eq!(out, "let add = function add(a, b) {\nreturn a + b;\n};");
    }

    #[test]
    fn test_failed_lowering_forgets_its_names() {
        let mut compiler = Compiler::new();
        let mut program = Parser::for_source("var a = 1\nvar b = missing", "test").parse_program();
        assert!(compiler.compile(&mut program).is_err());

        assert!(compiler.symbols().resolve("a").is_none());
        assert!(compiler.symbols().resolve("b").is_none());
        assert_eq!(compiler.symbols().num_definitions(), 0);
    }

    #[test]
    fn test_function_declaration_can_recurse() {
        let out = compile("func count(n) { return count(n - 1) }").unwrap();
        assert_eq!(out, "function count(n) {\nreturn count(n - 1);\n};");
    }

    #[test]
    fn test_with_builtins_extends_scope() {
        let mut parser = Parser::for_source("document.title = \"x\"", "test");
        let mut program = parser.parse_program();

        let mut compiler = Compiler::with_builtins(["document"]);
        compiler.compile(&mut program).unwrap();
        assert_eq!(compiler.output(), "document.title = \"x\";");
    }
}
