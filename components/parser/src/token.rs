//! Token kinds and the keyword table

use core_types::SourcePosition;
use std::fmt;
use std::sync::Arc;

/// Kind of a lexical token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Scan failure; the literal carries the message
    Illegal,
    /// End of input
    Eof,

    /// Identifier (`add`, `x`)
    Ident,
    /// Integer literal (`1343456`, `0x1F`)
    Int,
    /// Float literal (`123.456`, `1e9`)
    Float,
    /// Double-quoted string literal
    String,
    /// Back-quoted raw string literal
    RawString,

    /// `=`
    Assign,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `!`
    Bang,
    /// `*`
    Asterisk,
    /// `/`
    Slash,
    /// `<`
    Lt,
    /// `<=`
    Lte,
    /// `>`
    Gt,
    /// `>=`
    Gte,
    /// `==`
    Eq,
    /// `!=`
    NotEq,

    /// `,`
    Comma,
    /// `;` (written or inserted at end of line)
    Semicolon,
    /// `:`
    Colon,
    /// `.`
    Dot,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `[`
    LBracket,
    /// `]`
    RBracket,

    /// `func`
    Function,
    /// `var`
    Var,
    /// `const`
    Const,
    /// `true`
    True,
    /// `false`
    False,
    /// `if`
    If,
    /// `else`
    Else,
    /// `return`
    Return,
    /// `struct`
    Struct,
    /// `type`
    Type,
    /// `enum`
    Enum,
}

impl TokenKind {
    /// Name used in diagnostics
    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::Illegal => "ILLEGAL",
            TokenKind::Eof => "EOF",
            TokenKind::Ident => "IDENT",
            TokenKind::Int => "INT",
            TokenKind::Float => "FLOAT",
            TokenKind::String => "STRING",
            TokenKind::RawString => "RAWSTRING",
            TokenKind::Assign => "=",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Bang => "!",
            TokenKind::Asterisk => "*",
            TokenKind::Slash => "/",
            TokenKind::Lt => "<",
            TokenKind::Lte => "<=",
            TokenKind::Gt => ">",
            TokenKind::Gte => ">=",
            TokenKind::Eq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::Colon => ":",
            TokenKind::Dot => ".",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Function => "FUNCTION",
            TokenKind::Var => "VAR",
            TokenKind::Const => "CONST",
            TokenKind::True => "TRUE",
            TokenKind::False => "FALSE",
            TokenKind::If => "IF",
            TokenKind::Else => "ELSE",
            TokenKind::Return => "RETURN",
            TokenKind::Struct => "STRUCT",
            TokenKind::Type => "TYPE",
            TokenKind::Enum => "ENUM",
        }
    }

    /// Whether a line break after this token ends the statement
    pub fn ends_line(self) -> bool {
        matches!(
            self,
            TokenKind::Ident
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Int
                | TokenKind::Float
                | TokenKind::String
                | TokenKind::RawString
                | TokenKind::RParen
                | TokenKind::RBrace
                | TokenKind::RBracket
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map an identifier to its keyword kind, or [`TokenKind::Ident`]
pub fn lookup_ident(ident: &str) -> TokenKind {
    match ident {
        "func" => TokenKind::Function,
        "var" => TokenKind::Var,
        "const" => TokenKind::Const,
        "true" => TokenKind::True,
        "false" => TokenKind::False,
        "if" => TokenKind::If,
        "else" => TokenKind::Else,
        "return" => TokenKind::Return,
        "struct" => TokenKind::Struct,
        "type" => TokenKind::Type,
        "enum" => TokenKind::Enum,
        _ => TokenKind::Ident,
    }
}

/// A scanned token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Token kind
    pub kind: TokenKind,
    /// Source text (string literals exclude their quotes)
    pub literal: String,
    /// 1-based line
    pub line: u32,
    /// 1-based column, counted in bytes
    pub column: u32,
    /// Name of the file the token came from
    pub file: Arc<str>,
}

impl Token {
    /// Create a token
    pub fn new(
        kind: TokenKind,
        literal: impl Into<String>,
        line: u32,
        column: u32,
        file: Arc<str>,
    ) -> Self {
        Self {
            kind,
            literal: literal.into(),
            line,
            column,
            file,
        }
    }

    /// Check the token kind
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// Source position of the first character
    pub fn position(&self) -> SourcePosition {
        SourcePosition::new(self.file.clone(), self.line, self.column)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.literal, self.kind)
    }
}
