//! Pratt parser producing the source AST
//!
//! The parser keeps a two-token window (`cur`, `peek`). Every statement and
//! expression routine starts on its first token and returns with `cur` on
//! the token that follows it.

use crate::ast::*;
use crate::error::*;
use crate::lexer::{Lexer, TokenSource};
use crate::token::{Token, TokenKind};
use core_types::{Diagnostic, SourcePosition};

/// Binding strength of infix operators, lowest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    /// Start of an expression
    Lowest,
    /// `==` `!=`
    Equals,
    /// `<` `<=` `>` `>=`
    LessGreater,
    /// `+` `-`
    Sum,
    /// `*` `/`
    Product,
    /// `-x` `!x`
    Prefix,
    /// `f(x)`
    Call,
    /// `a[i]`
    Index,
    /// `a.b`
    Selector,
}

impl Precedence {
    /// Infix precedence of a token kind
    pub fn of(kind: TokenKind) -> Self {
        match kind {
            TokenKind::Eq | TokenKind::NotEq => Precedence::Equals,
            TokenKind::Lt | TokenKind::Lte | TokenKind::Gt | TokenKind::Gte => {
                Precedence::LessGreater
            }
            TokenKind::Plus | TokenKind::Minus => Precedence::Sum,
            TokenKind::Slash | TokenKind::Asterisk => Precedence::Product,
            TokenKind::LParen => Precedence::Call,
            TokenKind::LBracket => Precedence::Index,
            TokenKind::Dot => Precedence::Selector,
            _ => Precedence::Lowest,
        }
    }
}

type ParseResult<T> = Result<T, ParseError>;

/// Parser over any [`TokenSource`]
pub struct Parser<S: TokenSource> {
    source: S,
    cur: Token,
    peek: Token,
    errors: Vec<Diagnostic>,
}

impl Parser<Lexer> {
    /// Parser over a pull-based [`Lexer`] for `input`
    pub fn for_source(input: &str, file: &str) -> Self {
        Parser::new(Lexer::new(input, file))
    }
}

impl<S: TokenSource> Parser<S> {
    /// Create a parser and prime the token window
    pub fn new(mut source: S) -> Self {
        let cur = source.next_token();
        let peek = if cur.is(TokenKind::Eof) {
            cur.clone()
        } else {
            source.next_token()
        };
        Self {
            source,
            cur,
            peek,
            errors: Vec::new(),
        }
    }

    /// Recorded errors rendered as `file:line:col: message`
    pub fn errors(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    /// Recorded errors
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.errors
    }

    /// Parse until end of input.
    ///
    /// Always returns a program; check [`Parser::errors`] before using it.
    pub fn parse_program(&mut self) -> Program {
        let mut program = Program::default();

        while !self.cur_is(TokenKind::Eof) {
            match self.parse_terminated_statement() {
                Ok(Some(stmt)) => program.statements.push(stmt),
                Ok(None) => {}
                Err(ParseError::Syntax(diag)) => {
                    if self.record(diag).is_err() {
                        self.abort();
                        break;
                    }
                    self.synchronize(false);
                    if self.cur_is(TokenKind::Semicolon) {
                        self.next_token();
                    }
                }
                Err(ParseError::TooManyErrors) => {
                    self.abort();
                    break;
                }
            }
        }

        program
    }

    fn parse_terminated_statement(&mut self) -> ParseResult<Option<Statement>> {
        let stmt = self.parse_statement()?;
        self.expect(TokenKind::Semicolon)?;
        self.next_token();
        Ok(stmt)
    }

    fn next_token(&mut self) {
        self.cur = self.peek.clone();
        if self.cur.is(TokenKind::Eof) {
            return;
        }
        self.peek = self.source.next_token();
    }

    fn cur_is(&self, kind: TokenKind) -> bool {
        self.cur.is(kind)
    }

    fn expect(&self, kind: TokenKind) -> ParseResult<()> {
        if self.cur_is(kind) {
            Ok(())
        } else {
            Err(expected(&format!("'{}'", kind), &self.cur))
        }
    }

    fn expect_peek(&mut self, kind: TokenKind) -> ParseResult<()> {
        if self.peek.is(kind) {
            self.next_token();
            Ok(())
        } else {
            Err(unexpected_peek(kind.as_str(), &self.peek))
        }
    }

    fn record(&mut self, diag: Diagnostic) -> ParseResult<()> {
        self.errors.push(diag);
        if self.errors.len() > MAX_ERRORS {
            return Err(ParseError::TooManyErrors);
        }
        Ok(())
    }

    /// Stop consuming input and release the token source
    fn abort(&mut self) {
        self.source.drain();
        let (line, column) = (self.cur.line, self.cur.column);
        self.cur = Token::new(TokenKind::Eof, "", line, column, self.cur.file.clone());
        self.peek = self.cur.clone();
    }

    /// Skip to the terminator of the current statement, or to the closing
    /// brace of the enclosing block when `in_block`
    fn synchronize(&mut self, in_block: bool) {
        let mut depth = 0usize;
        loop {
            match self.cur.kind {
                TokenKind::Eof => return,
                TokenKind::Semicolon if depth == 0 => return,
                TokenKind::LBrace => depth += 1,
                TokenKind::RBrace if depth == 0 => {
                    if in_block {
                        return;
                    }
                }
                TokenKind::RBrace => depth -= 1,
                _ => {}
            }
            self.next_token();
        }
    }

    fn parse_statement(&mut self) -> ParseResult<Option<Statement>> {
        let stmt = match self.cur.kind {
            TokenKind::Var | TokenKind::Const => self.parse_var_statement()?,
            TokenKind::Type => self.parse_type_declaration()?,
            TokenKind::Return => self.parse_return_statement()?,
            TokenKind::If => self.parse_if_statement()?,
            TokenKind::LBrace => Statement::Block(self.parse_block()?),
            TokenKind::Function if self.peek.is(TokenKind::Ident) => {
                self.parse_function_declaration()?
            }
            TokenKind::Ident
            | TokenKind::Int
            | TokenKind::Float
            | TokenKind::String
            | TokenKind::RawString
            | TokenKind::True
            | TokenKind::False
            | TokenKind::Function
            | TokenKind::LParen
            | TokenKind::LBracket
            | TokenKind::Struct
            | TokenKind::Enum
            | TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::Asterisk
            | TokenKind::Bang => self.parse_simple_statement()?,
            TokenKind::Semicolon => return Ok(None),
            TokenKind::Illegal => return Err(scan_error(&self.cur)),
            _ => return Err(expected("statement", &self.cur)),
        };
        Ok(Some(stmt))
    }

    fn parse_var_statement(&mut self) -> ParseResult<Statement> {
        let position = self.cur.position();
        let kind = if self.cur_is(TokenKind::Const) {
            VarKind::Const
        } else {
            VarKind::Var
        };
        self.next_token();

        if !self.cur_is(TokenKind::LParen) {
            let spec = self.parse_var_spec()?;
            return Ok(Statement::VarDeclaration {
                kind,
                spec,
                position,
            });
        }

        self.next_token();
        let mut specs = Vec::new();
        while !self.cur_is(TokenKind::RParen) && !self.cur_is(TokenKind::Eof) {
            specs.push(self.parse_var_spec()?);
            if self.cur_is(TokenKind::Semicolon) {
                self.next_token();
            } else if !self.cur_is(TokenKind::RParen) {
                return Err(expected("';' or ')'", &self.cur));
            }
        }
        self.expect(TokenKind::RParen)?;
        self.next_token();

        Ok(Statement::VarGroup {
            kind,
            specs,
            position,
        })
    }

    /// `name = value` | `name Type [= value]`
    fn parse_var_spec(&mut self) -> ParseResult<VarSpec> {
        self.expect(TokenKind::Ident)?;
        let name = self.current_identifier();
        self.next_token();

        let mut spec = VarSpec {
            name,
            type_expr: None,
            value: None,
        };

        if !self.cur_is(TokenKind::Assign) {
            spec.type_expr = Some(self.parse_expression(Precedence::Lowest)?);
        }
        if self.cur_is(TokenKind::Assign) {
            self.next_token();
            spec.value = Some(self.parse_expression(Precedence::Lowest)?);
        }

        Ok(spec)
    }

    fn parse_type_declaration(&mut self) -> ParseResult<Statement> {
        let position = self.cur.position();
        self.next_token();

        self.expect(TokenKind::Ident)?;
        let name = self.current_identifier();
        self.next_token();

        let type_def = match self.cur.kind {
            TokenKind::Struct => self.parse_struct()?,
            TokenKind::Enum => self.parse_enum()?,
            _ => return Err(expected("struct or enum", &self.cur)),
        };

        Ok(Statement::TypeDeclaration {
            name,
            type_def,
            position,
        })
    }

    fn parse_struct(&mut self) -> ParseResult<Expression> {
        let position = self.cur.position();
        self.next_token();
        let fields = self.parse_field_list()?;
        Ok(Expression::Struct { fields, position })
    }

    fn parse_enum(&mut self) -> ParseResult<Expression> {
        let position = self.cur.position();
        self.next_token();
        let fields = self.parse_field_list()?;
        Ok(Expression::Enum { fields, position })
    }

    fn parse_field_list(&mut self) -> ParseResult<FieldList> {
        self.expect(TokenKind::LBrace)?;
        self.next_token();

        let mut list = FieldList::default();
        while self.cur_is(TokenKind::Ident) {
            list.fields.push(self.parse_field()?);
        }

        self.expect(TokenKind::RBrace)?;
        self.next_token();
        Ok(list)
    }

    fn parse_field(&mut self) -> ParseResult<Field> {
        let name = self.current_identifier();
        self.next_token();

        let mut field = Field {
            name,
            type_expr: None,
            value: None,
        };

        match self.cur.kind {
            // bare name: the type matches the name
            TokenKind::Semicolon | TokenKind::RBrace => {
                field.type_expr = Some(Expression::Identifier(field.name.clone()));
            }
            TokenKind::Assign => {
                self.next_token();
                field.value = Some(self.parse_expression(Precedence::Lowest)?);
            }
            TokenKind::Ident => {
                field.type_expr = Some(self.parse_expression(Precedence::Lowest)?);
                if self.cur_is(TokenKind::Assign) {
                    self.next_token();
                    field.value = Some(self.parse_expression(Precedence::Lowest)?);
                }
            }
            TokenKind::Struct => field.type_expr = Some(self.parse_struct()?),
            TokenKind::Enum => field.type_expr = Some(self.parse_enum()?),
            _ => {
                return Err(expected(
                    "end of statement, an identifier, a struct, or an enum",
                    &self.cur,
                ))
            }
        }

        // the last field of a list needs no terminator
        if self.cur_is(TokenKind::Semicolon) {
            self.next_token();
        }

        Ok(field)
    }

    fn parse_return_statement(&mut self) -> ParseResult<Statement> {
        let position = self.cur.position();
        self.next_token();

        let value = match self.cur.kind {
            TokenKind::Semicolon | TokenKind::RBrace | TokenKind::Eof => None,
            _ => Some(self.parse_expression(Precedence::Lowest)?),
        };

        Ok(Statement::Return { value, position })
    }

    fn parse_if_statement(&mut self) -> ParseResult<Statement> {
        let position = self.cur.position();
        self.next_token();

        let condition = self.parse_expression(Precedence::Lowest)?;
        self.expect(TokenKind::LBrace)?;
        let consequence = self.parse_block()?;

        let mut alternative = None;
        if self.cur_is(TokenKind::Else) {
            self.next_token();
            let alt = match self.cur.kind {
                TokenKind::If => self.parse_if_statement()?,
                TokenKind::LBrace => Statement::Block(self.parse_block()?),
                _ => return Err(expected("if statement or block", &self.cur)),
            };
            alternative = Some(Box::new(alt));
        }

        Ok(Statement::If {
            condition,
            consequence,
            alternative,
            position,
        })
    }

    fn parse_block(&mut self) -> ParseResult<Block> {
        let position = self.cur.position();
        self.next_token();

        let mut statements = Vec::new();
        while !self.cur_is(TokenKind::RBrace) && !self.cur_is(TokenKind::Eof) {
            match self.parse_block_item() {
                Ok(Some(stmt)) => statements.push(stmt),
                Ok(None) => {}
                Err(ParseError::Syntax(diag)) => {
                    self.record(diag)?;
                    self.synchronize(true);
                    if self.cur_is(TokenKind::Semicolon) {
                        self.next_token();
                    }
                }
                Err(err) => return Err(err),
            }
        }

        self.expect(TokenKind::RBrace)?;
        self.next_token();

        Ok(Block {
            statements,
            position,
        })
    }

    /// A statement plus its terminator, which the last statement may omit
    fn parse_block_item(&mut self) -> ParseResult<Option<Statement>> {
        let stmt = self.parse_statement()?;
        if !self.cur_is(TokenKind::RBrace) {
            self.expect(TokenKind::Semicolon)?;
            self.next_token();
        }
        Ok(stmt)
    }

    /// Expression statement, or assignment when followed by `=`
    fn parse_simple_statement(&mut self) -> ParseResult<Statement> {
        let position = self.cur.position();
        let lhs = self.parse_expression(Precedence::Lowest)?;

        if self.cur_is(TokenKind::Assign) {
            let operator = self.cur.literal.clone();
            self.next_token();
            let rhs = self.parse_expression(Precedence::Lowest)?;
            return Ok(Statement::Assign {
                lhs,
                operator,
                rhs,
                position,
            });
        }

        Ok(Statement::Expression {
            expression: lhs,
            position,
        })
    }

    /// Precedence climbing: one prefix form, then every infix operator that
    /// binds tighter than `precedence`
    pub(crate) fn parse_expression(&mut self, precedence: Precedence) -> ParseResult<Expression> {
        let mut left = self.parse_prefix()?;

        while !self.cur_is(TokenKind::Semicolon) && precedence < Precedence::of(self.cur.kind) {
            left = match self.cur.kind {
                TokenKind::Dot => self.parse_selector(left)?,
                TokenKind::LParen => self.parse_call(left)?,
                TokenKind::LBracket => self.parse_index(left)?,
                _ => self.parse_infix(left)?,
            };
        }

        Ok(left)
    }

    fn parse_prefix(&mut self) -> ParseResult<Expression> {
        let position = self.cur.position();
        let expr = match self.cur.kind {
            TokenKind::Ident => {
                let ident = self.current_identifier();
                self.next_token();
                Expression::Identifier(ident)
            }
            TokenKind::Int => {
                let literal = self.cur.literal.clone();
                let value = parse_integer(&literal).ok_or_else(|| {
                    syntax_error(
                        format!("could not parse {:?} as integer", literal),
                        position.clone(),
                    )
                })?;
                self.next_token();
                Expression::IntegerLiteral {
                    value,
                    literal,
                    position,
                }
            }
            TokenKind::Float => {
                let literal = self.cur.literal.clone();
                let value = literal.parse::<f64>().map_err(|_| {
                    syntax_error(
                        format!("could not parse {:?} as float", literal),
                        position.clone(),
                    )
                })?;
                self.next_token();
                Expression::FloatLiteral {
                    value,
                    literal,
                    position,
                }
            }
            TokenKind::String => {
                let value = self.cur.literal.clone();
                self.next_token();
                Expression::StringLiteral { value, position }
            }
            TokenKind::RawString => {
                let value = self.cur.literal.clone();
                self.next_token();
                Expression::RawStringLiteral { value, position }
            }
            TokenKind::True | TokenKind::False => {
                let value = self.cur_is(TokenKind::True);
                self.next_token();
                Expression::BooleanLiteral { value, position }
            }
            TokenKind::Bang | TokenKind::Minus => {
                let operator = self.cur.literal.clone();
                self.next_token();
                let operand = self.parse_expression(Precedence::Prefix)?;
                Expression::Prefix {
                    operator,
                    operand: Box::new(operand),
                    position,
                }
            }
            TokenKind::LParen => {
                self.next_token();
                let inner = self.parse_expression(Precedence::Lowest)?;
                self.expect(TokenKind::RParen)?;
                self.next_token();
                inner
            }
            TokenKind::Function => self.parse_function_literal()?,
            TokenKind::Struct => self.parse_struct()?,
            TokenKind::Enum => self.parse_enum()?,
            _ => return Err(no_prefix_parse_fn(&self.cur)),
        };
        Ok(expr)
    }

    fn parse_infix(&mut self, left: Expression) -> ParseResult<Expression> {
        let position = self.cur.position();
        let operator = self.cur.literal.clone();
        let precedence = Precedence::of(self.cur.kind);
        self.next_token();

        let right = self.parse_expression(precedence)?;
        Ok(Expression::Infix {
            left: Box::new(left),
            operator,
            right: Box::new(right),
            position,
        })
    }

    fn parse_selector(&mut self, object: Expression) -> ParseResult<Expression> {
        let position = self.cur.position();
        self.expect_peek(TokenKind::Ident)?;
        let field = self.current_identifier();
        self.next_token();

        Ok(Expression::Selector {
            object: Box::new(object),
            field,
            position,
        })
    }

    fn parse_call(&mut self, function: Expression) -> ParseResult<Expression> {
        let position = self.cur.position();
        self.next_token();

        let mut arguments = Vec::new();
        if !self.cur_is(TokenKind::RParen) {
            arguments.push(self.parse_expression(Precedence::Lowest)?);
            while self.cur_is(TokenKind::Comma) {
                self.next_token();
                arguments.push(self.parse_expression(Precedence::Lowest)?);
            }
        }
        self.expect(TokenKind::RParen)?;
        self.next_token();

        Ok(Expression::Call {
            function: Box::new(function),
            arguments,
            position,
        })
    }

    fn parse_index(&mut self, object: Expression) -> ParseResult<Expression> {
        let position = self.cur.position();
        self.next_token();

        let index = self.parse_expression(Precedence::Lowest)?;
        self.expect(TokenKind::RBracket)?;
        self.next_token();

        Ok(Expression::Index {
            object: Box::new(object),
            index: Box::new(index),
            position,
        })
    }

    fn parse_function_literal(&mut self) -> ParseResult<Expression> {
        let position = self.cur.position();
        self.expect_peek(TokenKind::LParen)?;
        Ok(Expression::Function(self.parse_function(position)?))
    }

    /// `func name(params) { .. }` at statement level
    fn parse_function_declaration(&mut self) -> ParseResult<Statement> {
        let position = self.cur.position();
        self.expect_peek(TokenKind::Ident)?;
        let name = self.current_identifier();
        self.expect_peek(TokenKind::LParen)?;
        let function = self.parse_function(position.clone())?;

        Ok(Statement::FunctionDeclaration {
            name,
            function,
            position,
        })
    }

    /// Parameter list and body, starting at `(`
    fn parse_function(&mut self, position: SourcePosition) -> ParseResult<FunctionLiteral> {
        self.next_token();

        let mut parameters = Vec::new();
        if !self.cur_is(TokenKind::RParen) {
            loop {
                self.expect(TokenKind::Ident)?;
                parameters.push(self.current_identifier());
                self.next_token();
                if !self.cur_is(TokenKind::Comma) {
                    break;
                }
                self.next_token();
            }
        }
        self.expect(TokenKind::RParen)?;
        self.next_token();

        self.expect(TokenKind::LBrace)?;
        let body = self.parse_block()?;

        Ok(FunctionLiteral {
            parameters,
            body,
            name: None,
            position,
        })
    }

    fn current_identifier(&self) -> Identifier {
        Identifier::new(self.cur.literal.clone(), self.cur.position())
    }
}

/// Integer with base prefix detection (`0x` hex, leading `0` octal) that
/// fits in 53 signed bits
fn parse_integer(literal: &str) -> Option<i64> {
    let (digits, radix) = if let Some(hex) = literal
        .strip_prefix("0x")
        .or_else(|| literal.strip_prefix("0X"))
    {
        (hex, 16)
    } else if literal.len() > 1 && literal.starts_with('0') {
        (&literal[1..], 8)
    } else {
        (literal, 10)
    };

    let value = i64::from_str_radix(digits, radix).ok()?;
    (value < 1 << 52).then_some(value)
}
