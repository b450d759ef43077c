//! Scanner - tokenizes source text into position-tagged tokens
//!
//! The scanner is a small state machine: each state consumes some input,
//! queues zero or more tokens, and names the next state. Statement
//! terminators are synthesized at line ends (and at end of input) when the
//! previous token can end a statement.

use crate::token::{lookup_ident, Token, TokenKind};
use crossbeam::channel::{self, Receiver};
use std::collections::VecDeque;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// A pull-based stream of tokens
pub trait TokenSource {
    /// Next token; yields `Eof` forever once the input is exhausted
    fn next_token(&mut self) -> Token;

    /// Discard everything the source can still produce
    fn drain(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Text,
    Newline,
    Identifier,
    Number,
    String,
    RawString,
}

/// Scanner over an owned source string
#[derive(Debug)]
pub struct Lexer {
    file: Arc<str>,
    input: String,
    /// Start of the pending lexeme
    start: usize,
    pos: usize,
    /// Byte width of the last character read
    width: usize,
    /// Width of the previous line, for backing up over a newline
    line_width: u32,
    paren_depth: i32,
    prev_kind: Option<TokenKind>,

    line: u32,
    column: u32,
    start_line: u32,
    start_column: u32,

    state: Option<State>,
    pending: VecDeque<Token>,
    /// Set once the iterator has handed out `Eof` or `Illegal`
    exhausted: bool,
}

impl Lexer {
    /// Create a scanner; `file` only labels token positions
    pub fn new(input: impl Into<String>, file: impl Into<Arc<str>>) -> Self {
        Self {
            file: file.into(),
            input: input.into(),
            start: 0,
            pos: 0,
            width: 0,
            line_width: 0,
            paren_depth: 0,
            prev_kind: None,
            line: 1,
            column: 1,
            start_line: 1,
            start_column: 1,
            state: Some(State::Text),
            pending: VecDeque::new(),
            exhausted: false,
        }
    }

    /// File label attached to every token
    pub fn file(&self) -> &Arc<str> {
        &self.file
    }

    /// Scan and return the next token
    pub fn next_token(&mut self) -> Token {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return token;
            }
            match self.state.take() {
                Some(state) => self.state = self.step(state),
                None => return self.eof_token(),
            }
        }
    }

    fn step(&mut self, state: State) -> Option<State> {
        match state {
            State::Text => self.lex_text(),
            State::Newline => self.lex_newline(),
            State::Identifier => self.lex_identifier(),
            State::Number => self.lex_number(),
            State::String => self.lex_string(),
            State::RawString => self.lex_raw_string(),
        }
    }

    fn lex_text(&mut self) -> Option<State> {
        self.skip_space();

        let Some(ch) = self.next_char() else {
            self.insert_semicolon();
            self.emit(TokenKind::Eof);
            return None;
        };

        match ch {
            '\r' | '\n' => return Some(State::Newline),
            '=' => self.equal_peek(TokenKind::Eq, TokenKind::Assign),
            '!' => self.equal_peek(TokenKind::NotEq, TokenKind::Bang),
            '<' => self.equal_peek(TokenKind::Lte, TokenKind::Lt),
            '>' => self.equal_peek(TokenKind::Gte, TokenKind::Gt),
            '(' => {
                self.emit(TokenKind::LParen);
                self.paren_depth += 1;
            }
            ')' => {
                self.emit(TokenKind::RParen);
                self.paren_depth -= 1;
                if self.paren_depth < 0 {
                    return self.error(format!("unexpected right paren {}", quote_rune(ch)));
                }
            }
            ',' => self.emit(TokenKind::Comma),
            ';' => self.emit(TokenKind::Semicolon),
            ':' => self.emit(TokenKind::Colon),
            '.' => self.emit(TokenKind::Dot),
            '+' => self.emit(TokenKind::Plus),
            '-' => self.emit(TokenKind::Minus),
            '*' => self.emit(TokenKind::Asterisk),
            '/' => self.emit(TokenKind::Slash),
            '{' => self.emit(TokenKind::LBrace),
            '}' => self.emit(TokenKind::RBrace),
            '[' => self.emit(TokenKind::LBracket),
            ']' => self.emit(TokenKind::RBracket),
            '"' => return Some(State::String),
            '`' => return Some(State::RawString),
            '0'..='9' => {
                self.backup();
                return Some(State::Number);
            }
            c if is_alpha(c) => return Some(State::Identifier),
            c => return self.error(format!("unrecognized character: {}", quote_rune(c))),
        }

        Some(State::Text)
    }

    fn lex_newline(&mut self) -> Option<State> {
        self.insert_semicolon();
        Some(State::Text)
    }

    /// Terminate the statement if the previous token can end one
    fn insert_semicolon(&mut self) {
        if self.prev_kind.is_some_and(TokenKind::ends_line) {
            self.emit(TokenKind::Semicolon);
        }
    }

    fn lex_identifier(&mut self) -> Option<State> {
        loop {
            match self.next_char() {
                Some(c) if is_alphanumeric(c) => {}
                _ => {
                    self.backup();
                    break;
                }
            }
        }
        let kind = lookup_ident(&self.input[self.start..self.pos]);
        self.emit(kind);
        Some(State::Text)
    }

    /// Decimal, hex or float with optional exponent. Malformed digit runs
    /// such as `089` are accepted here and rejected by the parser.
    fn lex_number(&mut self) -> Option<State> {
        let mut is_float = false;

        self.accept("+-");

        let mut digits = "0123456789";
        if self.accept("0") && self.accept("xX") {
            digits = "0123456789abcdefABCDEF";
        }
        self.accept_run(digits);
        if self.accept(".") {
            is_float = true;
            self.accept_run(digits);
        }
        if self.accept("eE") {
            is_float = true;
            self.accept("+-");
            self.accept_run("0123456789");
        }

        if self.peek_char().is_some_and(is_alphanumeric) {
            self.next_char();
            let lexeme = self.input[self.start..self.pos].to_string();
            return self.error(format!("bad number syntax: {:?}", lexeme));
        }

        if is_float {
            self.emit(TokenKind::Float);
        } else {
            self.emit(TokenKind::Int);
        }
        Some(State::Text)
    }

    fn lex_string(&mut self) -> Option<State> {
        // drop the opening quote
        self.ignore();
        loop {
            match self.next_char() {
                Some('\\') => match self.next_char() {
                    Some(c) if c != '\n' => {}
                    _ => return self.error("unterminated quoted string"),
                },
                None | Some('\n') => return self.error("unterminated quoted string"),
                Some('"') => {
                    self.backup();
                    break;
                }
                Some(_) => {}
            }
        }
        self.emit(TokenKind::String);

        // closing quote
        self.next_char();
        Some(State::Text)
    }

    fn lex_raw_string(&mut self) -> Option<State> {
        self.ignore();
        loop {
            match self.next_char() {
                None => return self.error("unterminated raw quoted string"),
                Some('`') => {
                    self.backup();
                    break;
                }
                Some(_) => {}
            }
        }
        self.emit(TokenKind::RawString);

        self.next_char();
        Some(State::Text)
    }

    fn next_char(&mut self) -> Option<char> {
        let Some(ch) = self.input[self.pos..].chars().next() else {
            self.width = 0;
            return None;
        };
        self.width = ch.len_utf8();
        self.pos += self.width;
        self.column += self.width as u32;
        if ch == '\n' {
            self.line += 1;
            self.line_width = self.column - 1;
            self.column = 1;
        }
        Some(ch)
    }

    /// Step back one character; only valid once per call of `next`
    fn backup(&mut self) {
        self.pos -= self.width;
        self.column -= self.width as u32;
        if self.width == 1 && self.input.as_bytes()[self.pos] == b'\n' {
            self.line -= 1;
            self.column = self.line_width;
        }
    }

    fn peek_char(&mut self) -> Option<char> {
        let ch = self.next_char();
        self.backup();
        ch
    }

    fn equal_peek(&mut self, with_equals: TokenKind, without: TokenKind) {
        if self.peek_char() == Some('=') {
            self.next_char();
            self.emit(with_equals);
        } else {
            self.emit(without);
        }
    }

    fn accept(&mut self, valid: &str) -> bool {
        match self.next_char() {
            Some(c) if valid.contains(c) => true,
            _ => {
                self.backup();
                false
            }
        }
    }

    fn accept_run(&mut self, valid: &str) {
        while self.accept(valid) {}
    }

    fn skip_space(&mut self) {
        while matches!(self.next_char(), Some(' ' | '\t')) {}
        self.backup();
        self.ignore();
    }

    /// Skip over the pending input
    fn ignore(&mut self) {
        self.start = self.pos;
        self.start_line = self.line;
        self.start_column = self.column;
    }

    fn emit(&mut self, kind: TokenKind) {
        let token = Token::new(
            kind,
            &self.input[self.start..self.pos],
            self.start_line,
            self.start_column,
            self.file.clone(),
        );
        self.pending.push_back(token);
        self.prev_kind = Some(kind);
        self.ignore();
    }

    /// Queue an `Illegal` token and stop scanning
    fn error(&mut self, message: impl Into<String>) -> Option<State> {
        let token = Token::new(
            TokenKind::Illegal,
            message,
            self.start_line,
            self.start_column,
            self.file.clone(),
        );
        self.pending.push_back(token);
        None
    }

    fn eof_token(&self) -> Token {
        Token::new(
            TokenKind::Eof,
            "",
            self.line,
            self.column,
            self.file.clone(),
        )
    }
}

impl TokenSource for Lexer {
    fn next_token(&mut self) -> Token {
        Lexer::next_token(self)
    }

    fn drain(&mut self) {
        self.pending.clear();
        self.state = None;
        self.exhausted = true;
    }
}

impl Iterator for Lexer {
    type Item = Token;

    /// Yields tokens up to and including the first `Eof` or `Illegal`
    fn next(&mut self) -> Option<Token> {
        if self.exhausted {
            return None;
        }
        let token = self.next_token();
        if matches!(token.kind, TokenKind::Eof | TokenKind::Illegal) {
            self.exhausted = true;
        }
        Some(token)
    }
}

/// Scanner running on its own thread.
///
/// Tokens are handed over a rendezvous channel, so the producer is never
/// more than one token ahead of the consumer. Dropping the source releases
/// the producer as well: its next send fails and the thread exits.
pub struct ThreadedLexer {
    tokens: Receiver<Token>,
    producer: Option<JoinHandle<()>>,
    file: Arc<str>,
    last_position: (u32, u32),
}

impl ThreadedLexer {
    /// Start scanning `input` on a producer thread
    pub fn new(input: impl Into<String>, file: impl Into<Arc<str>>) -> Self {
        let lexer = Lexer::new(input, file);
        let file = lexer.file().clone();
        let (sender, tokens) = channel::bounded(0);

        let producer = thread::spawn(move || {
            for token in lexer {
                if sender.send(token).is_err() {
                    break;
                }
            }
        });

        Self {
            tokens,
            producer: Some(producer),
            file,
            last_position: (1, 1),
        }
    }
}

impl TokenSource for ThreadedLexer {
    fn next_token(&mut self) -> Token {
        match self.tokens.recv() {
            Ok(token) => {
                self.last_position = (token.line, token.column);
                token
            }
            Err(_) => {
                let (line, column) = self.last_position;
                Token::new(TokenKind::Eof, "", line, column, self.file.clone())
            }
        }
    }

    fn drain(&mut self) {
        for _ in self.tokens.iter() {}
        if let Some(producer) = self.producer.take() {
            // the producer cannot panic past a closed channel
            let _ = producer.join();
        }
    }
}

fn is_alpha(ch: char) -> bool {
    ch == '_' || ch.is_alphabetic()
}

fn is_alphanumeric(ch: char) -> bool {
    is_alpha(ch) || ch.is_numeric()
}

/// `U+0029 ')'`
fn quote_rune(ch: char) -> String {
    if ch.is_control() {
        format!("U+{:04X}", ch as u32)
    } else {
        format!("U+{:04X} '{}'", ch as u32, ch)
    }
}
