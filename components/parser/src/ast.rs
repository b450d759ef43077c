//! Abstract Syntax Tree node definitions
//!
//! `Display` renders every node in a canonical source form that parses back
//! to an equivalent tree.

use core_types::SourcePosition;
use std::fmt;

/// Parsed compilation unit
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    /// Top-level statements in source order
    pub statements: Vec<Statement>,
}

/// `var` or `const`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarKind {
    /// Mutable binding
    Var,
    /// Constant binding
    Const,
}

impl VarKind {
    /// Source keyword
    pub fn as_str(self) -> &'static str {
        match self {
            VarKind::Var => "var",
            VarKind::Const => "const",
        }
    }
}

/// One `name [Type] [= value]` binding
#[derive(Debug, Clone, PartialEq)]
pub struct VarSpec {
    /// Bound name
    pub name: Identifier,
    /// Declared type
    pub type_expr: Option<Expression>,
    /// Initial value
    pub value: Option<Expression>,
}

/// Statements
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `var name [Type] [= value]`
    VarDeclaration {
        /// var or const
        kind: VarKind,
        /// The binding
        spec: VarSpec,
        /// Source location
        position: SourcePosition,
    },

    /// `var ( spec; spec )`
    VarGroup {
        /// var or const
        kind: VarKind,
        /// Bindings in source order
        specs: Vec<VarSpec>,
        /// Source location
        position: SourcePosition,
    },

    /// `type Name struct {..}` / `type Name enum {..}`
    TypeDeclaration {
        /// Declared type name
        name: Identifier,
        /// Struct or enum expression
        type_def: Expression,
        /// Source location
        position: SourcePosition,
    },

    /// `return [value]`
    Return {
        /// Returned value
        value: Option<Expression>,
        /// Source location
        position: SourcePosition,
    },

    /// Bare expression
    Expression {
        /// The expression
        expression: Expression,
        /// Source location
        position: SourcePosition,
    },

    /// Nested block
    Block(Block),

    /// `if cond { .. } [else ..]`
    If {
        /// Condition
        condition: Expression,
        /// Consequence block
        consequence: Block,
        /// Block or nested if
        alternative: Option<Box<Statement>>,
        /// Source location
        position: SourcePosition,
    },

    /// `func name(params) { .. }`
    FunctionDeclaration {
        /// Declared function name
        name: Identifier,
        /// Parameters and body
        function: FunctionLiteral,
        /// Source location
        position: SourcePosition,
    },

    /// `lhs = rhs`
    Assign {
        /// Target
        lhs: Expression,
        /// Operator text
        operator: String,
        /// Value
        rhs: Expression,
        /// Source location
        position: SourcePosition,
    },
}

/// `{ statements }`
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// Statements in order
    pub statements: Vec<Statement>,
    /// Position of the opening brace
    pub position: SourcePosition,
}

/// Identifier with its position
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    /// Name
    pub name: String,
    /// Source location
    pub position: SourcePosition,
}

impl Identifier {
    /// Create an identifier
    pub fn new(name: impl Into<String>, position: SourcePosition) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }
}

/// `func (params) { body }`
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionLiteral {
    /// Parameter names
    pub parameters: Vec<Identifier>,
    /// Body
    pub body: Block,
    /// Inferred name, attached when the literal is bound by `var`
    pub name: Option<String>,
    /// Source location
    pub position: SourcePosition,
}

/// Fields of a struct or enum, in declaration order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldList {
    /// Fields
    pub fields: Vec<Field>,
}

/// `name [Type] [= value]` inside a struct or enum
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Field name
    pub name: Identifier,
    /// Field type; a bare name uses itself as the type
    pub type_expr: Option<Expression>,
    /// Default or enum value
    pub value: Option<Expression>,
}

/// Expressions
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Identifier reference
    Identifier(Identifier),

    /// Integer literal
    IntegerLiteral {
        /// Parsed value
        value: i64,
        /// Source text
        literal: String,
        /// Source location
        position: SourcePosition,
    },

    /// Float literal
    FloatLiteral {
        /// Parsed value
        value: f64,
        /// Source text
        literal: String,
        /// Source location
        position: SourcePosition,
    },

    /// Double-quoted string, escapes kept verbatim
    StringLiteral {
        /// Text between the quotes
        value: String,
        /// Source location
        position: SourcePosition,
    },

    /// Back-quoted raw string
    RawStringLiteral {
        /// Text between the quotes
        value: String,
        /// Source location
        position: SourcePosition,
    },

    /// `true` / `false`
    BooleanLiteral {
        /// Value
        value: bool,
        /// Source location
        position: SourcePosition,
    },

    /// `-x`, `!x`
    Prefix {
        /// Operator text
        operator: String,
        /// Operand
        operand: Box<Expression>,
        /// Source location
        position: SourcePosition,
    },

    /// `left op right`
    Infix {
        /// Left operand
        left: Box<Expression>,
        /// Operator text
        operator: String,
        /// Right operand
        right: Box<Expression>,
        /// Source location
        position: SourcePosition,
    },

    /// `object.field`
    Selector {
        /// Object expression
        object: Box<Expression>,
        /// Selected field
        field: Identifier,
        /// Source location
        position: SourcePosition,
    },

    /// `function(args)`
    Call {
        /// Called expression
        function: Box<Expression>,
        /// Arguments
        arguments: Vec<Expression>,
        /// Source location
        position: SourcePosition,
    },

    /// `object[index]`
    Index {
        /// Indexed expression
        object: Box<Expression>,
        /// Index expression
        index: Box<Expression>,
        /// Source location
        position: SourcePosition,
    },

    /// Function literal
    Function(FunctionLiteral),

    /// `struct { fields }`
    Struct {
        /// Fields
        fields: FieldList,
        /// Source location
        position: SourcePosition,
    },

    /// `enum { fields }`
    Enum {
        /// Members
        fields: FieldList,
        /// Source location
        position: SourcePosition,
    },
}

impl Expression {
    /// Source location of the expression
    pub fn position(&self) -> &SourcePosition {
        match self {
            Expression::Identifier(ident) => &ident.position,
            Expression::Function(func) => &func.position,
            Expression::IntegerLiteral { position, .. }
            | Expression::FloatLiteral { position, .. }
            | Expression::StringLiteral { position, .. }
            | Expression::RawStringLiteral { position, .. }
            | Expression::BooleanLiteral { position, .. }
            | Expression::Prefix { position, .. }
            | Expression::Infix { position, .. }
            | Expression::Selector { position, .. }
            | Expression::Call { position, .. }
            | Expression::Index { position, .. }
            | Expression::Struct { position, .. }
            | Expression::Enum { position, .. } => position,
        }
    }
}

impl Statement {
    /// Source location of the statement
    pub fn position(&self) -> &SourcePosition {
        match self {
            Statement::Block(block) => &block.position,
            Statement::VarDeclaration { position, .. }
            | Statement::VarGroup { position, .. }
            | Statement::TypeDeclaration { position, .. }
            | Statement::Return { position, .. }
            | Statement::Expression { position, .. }
            | Statement::If { position, .. }
            | Statement::FunctionDeclaration { position, .. }
            | Statement::Assign { position, .. } => position,
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, stmt) in self.statements.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}

impl fmt::Display for VarSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_binding(f, &self.name, &self.type_expr, &self.value)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_binding(f, &self.name, &self.type_expr, &self.value)
    }
}

fn write_binding(
    f: &mut fmt::Formatter<'_>,
    name: &Identifier,
    type_expr: &Option<Expression>,
    value: &Option<Expression>,
) -> fmt::Result {
    write!(f, "{}", name)?;
    if let Some(type_expr) = type_expr {
        write!(f, " {}", type_expr)?;
    }
    if let Some(value) = value {
        write!(f, " = {}", value)?;
    }
    Ok(())
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::VarDeclaration { kind, spec, .. } => write!(f, "{} {};", kind.as_str(), spec),
            Statement::VarGroup { kind, specs, .. } => {
                write!(f, "{} (", kind.as_str())?;
                for (i, spec) in specs.iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    write!(f, "{}", spec)?;
                }
                f.write_str(")")
            }
            Statement::TypeDeclaration { name, type_def, .. } => {
                write!(f, "type {} {}", name, type_def)
            }
            Statement::Return { value, .. } => match value {
                Some(value) => write!(f, "return {};", value),
                None => f.write_str("return;"),
            },
            Statement::Expression { expression, .. } => write!(f, "{}", expression),
            Statement::Block(block) => write!(f, "{}", block),
            Statement::If {
                condition,
                consequence,
                alternative,
                ..
            } => {
                write!(f, "if {} {}", condition, consequence)?;
                if let Some(alternative) = alternative {
                    write!(f, " else {}", alternative)?;
                }
                Ok(())
            }
            Statement::FunctionDeclaration { name, function, .. } => {
                write!(f, "func {}", name)?;
                write_parameters(f, &function.parameters)?;
                write!(f, " {}", function.body)
            }
            Statement::Assign {
                lhs, operator, rhs, ..
            } => write!(f, "{} {} {}", lhs, operator, rhs),
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.statements.is_empty() {
            return f.write_str("{}");
        }
        f.write_str("{ ")?;
        for (i, stmt) in self.statements.iter().enumerate() {
            let text = stmt.to_string();
            f.write_str(&text)?;
            let last = i + 1 == self.statements.len();
            if !last {
                f.write_str(if text.ends_with(';') { " " } else { "; " })?;
            }
        }
        f.write_str(" }")
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Display for FieldList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", field)?;
        }
        f.write_str("}")
    }
}

impl fmt::Display for FunctionLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("func")?;
        if let Some(name) = &self.name {
            write!(f, "<{}>", name)?;
        }
        write_parameters(f, &self.parameters)?;
        write!(f, " {}", self.body)
    }
}

fn write_parameters(f: &mut fmt::Formatter<'_>, parameters: &[Identifier]) -> fmt::Result {
    f.write_str("(")?;
    for (i, param) in parameters.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", param)?;
    }
    f.write_str(")")
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Identifier(ident) => write!(f, "{}", ident),
            Expression::IntegerLiteral { literal, .. } | Expression::FloatLiteral { literal, .. } => {
                f.write_str(literal)
            }
            Expression::StringLiteral { value, .. } => write!(f, "\"{}\"", value),
            Expression::RawStringLiteral { value, .. } => write!(f, "`{}`", value),
            Expression::BooleanLiteral { value, .. } => write!(f, "{}", value),
            Expression::Prefix {
                operator, operand, ..
            } => write!(f, "({}{})", operator, operand),
            Expression::Infix {
                left,
                operator,
                right,
                ..
            } => write!(f, "({} {} {})", left, operator, right),
            Expression::Selector { object, field, .. } => write!(f, "{}.{}", object, field),
            Expression::Call {
                function,
                arguments,
                ..
            } => {
                write!(f, "{}(", function)?;
                for (i, arg) in arguments.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(")")
            }
            Expression::Index { object, index, .. } => write!(f, "({}[{}])", object, index),
            Expression::Function(func) => write!(f, "{}", func),
            Expression::Struct { fields, .. } => write!(f, "struct {}", fields),
            Expression::Enum { fields, .. } => write!(f, "enum {}", fields),
        }
    }
}
