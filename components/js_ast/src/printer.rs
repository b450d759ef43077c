//! JavaScript printer
//!
//! Walks the tree module → statements → declarations → expressions and
//! writes source text into any [`fmt::Write`] sink. Statement termination
//! is tracked so that a node which already closed itself with `;\n` is not
//! terminated a second time by its parent.

use crate::jsast::{
    BlockStmt, ClassDecl, Decl, Expr, FuncDecl, FunctionLiteral, Module, Node, Placeholder, Stmt,
    VarDecl,
};
use crate::operator::{precedence, HIGHEST_PREC, UNARY_PREC};
use std::fmt;

const END_STMT: &str = ";\n";

/// Serializes JavaScript AST nodes to text
pub struct Printer<W: fmt::Write> {
    out: W,
    just_printed_end_stmt: bool,
}

/// Print a whole module into `out`
pub fn print_module<W: fmt::Write>(out: W, module: &Module) -> fmt::Result {
    Printer::new(out).module(module)
}

impl<W: fmt::Write> Printer<W> {
    /// Create a printer writing into `out`
    pub fn new(out: W) -> Self {
        Self {
            out,
            just_printed_end_stmt: false,
        }
    }

    /// Consume the printer and return its sink
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Print imports followed by the module body
    pub fn module(&mut self, module: &Module) -> fmt::Result {
        for import in &module.imports {
            self.print("import * as ")?;
            self.print(&import.alias)?;
            self.print(" from \"")?;
            self.print(&import.file)?;
            self.print("\";\n")?;
        }
        if !module.imports.is_empty() {
            self.print("\n\n")?;
        }
        self.stmt_list(&module.body)
    }

    /// Print any node
    pub fn node(&mut self, node: &Node) -> fmt::Result {
        match node {
            Node::Expr(expr) => self.expr(expr),
            Node::Stmt(stmt) => self.stmt(stmt),
            Node::Decl(decl) => self.decl(decl),
        }
    }

    /// Print an expression
    pub fn expr(&mut self, expr: &Expr) -> fmt::Result {
        match expr {
            Expr::Placeholder(placeholder) => self.placeholder(placeholder),
            Expr::RawJs(text) => self.print(text),
            Expr::Identifier { name } => self.print(name),
            Expr::BasicLiteral { value } => self.print(value),
            Expr::BinaryExpression { lhs, op, rhs } => {
                let prec = precedence(op);
                self.operand(lhs, expr_precedence(lhs) < prec)?;
                self.print(" ")?;
                self.print(op)?;
                self.print(" ")?;
                self.operand(rhs, expr_precedence(rhs) <= prec)
            }
            Expr::UnaryExpression { op, operand } => {
                self.print(op)?;
                // `- -a` must not collapse into `--a`
                let nested = matches!(operand.as_ref(), Expr::UnaryExpression { .. });
                self.operand(operand, nested || expr_precedence(operand) < UNARY_PREC)
            }
            Expr::FunctionLiteral(func) => self.function(func, true),
            Expr::SelectorExpr { object, sel } => {
                self.operand(object, expr_precedence(object) < HIGHEST_PREC)?;
                self.print(".")?;
                self.print(sel)
            }
            Expr::IndexExpr { object, index } => {
                self.operand(object, expr_precedence(object) < HIGHEST_PREC)?;
                self.print("[")?;
                self.expr(index)?;
                self.print("]")
            }
            Expr::CallExpr { callee, args } => {
                self.operand(callee, expr_precedence(callee) < HIGHEST_PREC)?;
                self.args(args)
            }
            Expr::ObjectLiteral {
                properties,
                multiline,
            } => self.object(properties, *multiline),
            Expr::ClassInstantiate { class, args } => {
                self.print("new ")?;
                self.expr(class)?;
                self.args(args)
            }
            Expr::DeclExpr(decl) => match decl.as_ref() {
                Decl::Class(class) => self.class(class, false),
                other => self.decl(other),
            },
        }
    }

    /// Print a statement followed by its terminator
    pub fn stmt(&mut self, stmt: &Stmt) -> fmt::Result {
        match stmt {
            Stmt::Placeholder(placeholder) if placeholder.children.is_empty() => return Ok(()),
            Stmt::Placeholder(placeholder) => self.placeholder(placeholder)?,
            Stmt::RawJs(text) => self.print(text)?,
            Stmt::Expr(expr) => self.expr(expr)?,
            Stmt::Return(result) => {
                self.print("return")?;
                if let Some(result) = result {
                    self.print(" ")?;
                    self.expr(result)?;
                }
            }
            Stmt::Block(block) => self.block(block)?,
            Stmt::If {
                cond,
                body,
                alternative,
            } => {
                self.print("if (")?;
                self.expr(cond)?;
                self.print(") ")?;
                self.block(body)?;
                // blocks always close with `;`, including before `else`
                self.print_end_statement()?;
                if let Some(alternative) = alternative {
                    self.print("else ")?;
                    self.stmt(alternative)?;
                }
            }
            Stmt::Decl(decl) => self.decl(decl)?,
            Stmt::Assign { lhs, op, rhs } => {
                self.expr(lhs)?;
                self.print(" ")?;
                self.print(op)?;
                self.print(" ")?;
                self.expr(rhs)?;
            }
        }
        self.print_end_statement()
    }

    /// Print a declaration
    pub fn decl(&mut self, decl: &Decl) -> fmt::Result {
        match decl {
            Decl::Placeholder(placeholder) => self.placeholder(placeholder),
            Decl::RawJs(text) => self.print(text),
            Decl::Class(class) => self.class(class, true),
            Decl::Func(func) => self.func_decl(func, true),
            Decl::Var(var) => {
                if var.exported {
                    self.print("export ")?;
                }
                self.print(var.kind.as_str())?;
                self.var_tail(var)
            }
        }
    }

    fn stmt_list(&mut self, list: &[Stmt]) -> fmt::Result {
        for stmt in list {
            self.stmt(stmt)?;
        }
        Ok(())
    }

    fn block(&mut self, block: &BlockStmt) -> fmt::Result {
        self.print("{\n")?;
        self.stmt_list(&block.body)?;
        self.print("}")
    }

    fn class(&mut self, class: &ClassDecl, terminate: bool) -> fmt::Result {
        if class.exported {
            self.print("export ")?;
        }
        self.print("class ")?;
        if !class.name.is_empty() {
            self.print(&class.name)?;
            self.print(" ")?;
        }
        self.print("{\n")?;
        for field in &class.fields {
            self.var_tail(field)?;
        }
        for method in &class.methods {
            self.func_decl(method, false)?;
        }
        if terminate {
            self.print("};\n")
        } else {
            self.print("}")
        }
    }

    /// ` name[ = value];` shared by variables (after the keyword) and fields
    fn var_tail(&mut self, var: &VarDecl) -> fmt::Result {
        self.print(" ")?;
        self.print(&var.name)?;
        if let Some(value) = &var.value {
            self.print(" = ")?;
            self.expr(value)?;
        }
        self.print_end_statement()
    }

    fn func_decl(&mut self, func: &FuncDecl, keyword: bool) -> fmt::Result {
        if func.exported {
            self.print("export ")?;
        }
        self.function(&func.func, keyword)?;
        self.print_end_statement()
    }

    fn function(&mut self, func: &FunctionLiteral, keyword: bool) -> fmt::Result {
        if keyword {
            self.print("function ")?;
        }
        if let Some(name) = &func.name {
            self.print(name)?;
        }
        self.print("(")?;
        for (i, param) in func.params.iter().enumerate() {
            if i > 0 {
                self.print(", ")?;
            }
            self.print(param)?;
        }
        self.print(") {\n")?;
        self.stmt_list(&func.body)?;
        self.print("}")
    }

    fn args(&mut self, args: &[Expr]) -> fmt::Result {
        self.print("(")?;
        for (i, arg) in args.iter().enumerate() {
            if i > 0 {
                self.print(", ")?;
            }
            self.expr(arg)?;
        }
        self.print(")")
    }

    fn object(&mut self, properties: &[(String, Expr)], multiline: bool) -> fmt::Result {
        if multiline {
            self.print("{\n")?;
            for (i, (key, value)) in properties.iter().enumerate() {
                if i > 0 {
                    self.print(",\n")?;
                }
                self.property(key, value)?;
            }
            if !properties.is_empty() {
                self.print("\n")?;
            }
            return self.print("}");
        }

        if properties.is_empty() {
            return self.print("{}");
        }
        self.print("{ ")?;
        for (i, (key, value)) in properties.iter().enumerate() {
            if i > 0 {
                self.print(", ")?;
            }
            self.property(key, value)?;
        }
        self.print(" }")
    }

    fn property(&mut self, key: &str, value: &Expr) -> fmt::Result {
        self.print(key)?;
        self.print(": ")?;
        self.expr(value)
    }

    fn operand(&mut self, expr: &Expr, parenthesize: bool) -> fmt::Result {
        if parenthesize {
            self.print("(")?;
            self.expr(expr)?;
            self.print(")")
        } else {
            self.expr(expr)
        }
    }

    fn placeholder(&mut self, placeholder: &Placeholder) -> fmt::Result {
        for child in &placeholder.children {
            self.node(child)?;
        }
        Ok(())
    }

    fn print_end_statement(&mut self) -> fmt::Result {
        if self.just_printed_end_stmt {
            return Ok(());
        }
        self.print(END_STMT)
    }

    fn print(&mut self, s: &str) -> fmt::Result {
        if s.is_empty() {
            return Ok(());
        }
        self.out.write_str(s)?;
        self.just_printed_end_stmt = s.ends_with(END_STMT);
        Ok(())
    }
}

fn expr_precedence(expr: &Expr) -> u8 {
    match expr {
        Expr::BinaryExpression { op, .. } => precedence(op),
        Expr::UnaryExpression { .. } => UNARY_PREC,
        _ => HIGHEST_PREC,
    }
}
