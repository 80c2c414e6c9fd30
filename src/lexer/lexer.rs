use std::rc::Rc;

use crate::{errors::errors::{Error, ErrorImpl}, Position, MK_TOKEN};

use super::tokens::{Literal, Token, TokenKind, RESERVED_LOOKUP};

/// Everything a successful scan produced.
#[derive(Debug, Clone)]
pub struct ScanOutput {
    pub tokens: Vec<Token>,
    /// Recoverable errors, in the order they were found.
    pub diagnostics: Vec<Error>,
}

impl ScanOutput {
    pub fn had_error(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

pub struct Scanner {
    source: String,
    tokens: Vec<Token>,
    diagnostics: Vec<Error>,
    start: usize,
    current: usize,
    line: usize,
    /// Line the current lexeme began on; strings can span several.
    start_line: usize,
    file: Rc<String>,
}

impl Scanner {
    pub fn new(source: String, file: Option<String>) -> Scanner {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Scanner {
            source,
            tokens: vec![],
            diagnostics: vec![],
            start: 0,
            current: 0,
            line: 1,
            start_line: 1,
            file: file_name,
        }
    }

    /// Scans the whole source in one pass.
    ///
    /// Unexpected characters and unterminated strings are collected in
    /// [`ScanOutput::diagnostics`]. A number that does not fit its literal
    /// aborts the scan and nothing scanned so far is returned.
    pub fn scan_tokens(mut self) -> Result<ScanOutput, Error> {
        while !self.at_eof() {
            self.start = self.current;
            self.start_line = self.line;
            self.scan_token()?;
        }

        self.tokens
            .push(MK_TOKEN!(TokenKind::EOF, String::new(), Literal::None, self.line));

        Ok(ScanOutput {
            tokens: self.tokens,
            diagnostics: self.diagnostics,
        })
    }

    fn scan_token(&mut self) -> Result<(), Error> {
        let Some(c) = self.advance() else {
            return Ok(());
        };

        match c {
            '(' => self.add_token(TokenKind::LeftParen),
            ')' => self.add_token(TokenKind::RightParen),
            '{' => self.add_token(TokenKind::LeftBrace),
            '}' => self.add_token(TokenKind::RightBrace),
            ',' => self.add_token(TokenKind::Comma),
            '.' => self.add_token(TokenKind::Dot),
            '+' => self.add_token(TokenKind::Plus),
            '-' => self.add_token(TokenKind::Minus),
            ';' => self.add_token(TokenKind::Semicolon),
            '*' => self.add_token(TokenKind::Star),

            '!' => {
                let kind = if self.match_next('=') { TokenKind::BangEqual } else { TokenKind::Bang };
                self.add_token(kind);
            }
            '=' => {
                let kind = if self.match_next('=') { TokenKind::EqualEqual } else { TokenKind::Equal };
                self.add_token(kind);
            }
            '<' => {
                let kind = if self.match_next('=') { TokenKind::LessEqual } else { TokenKind::Less };
                self.add_token(kind);
            }
            '>' => {
                let kind = if self.match_next('=') { TokenKind::GreaterEqual } else { TokenKind::Greater };
                self.add_token(kind);
            }

            '/' => {
                if self.match_next('/') {
                    // The newline is left for the next call so the line count stays right.
                    while self.peek().is_some_and(|c| c != '\n') {
                        self.advance();
                    }
                } else {
                    self.add_token(TokenKind::Slash);
                }
            }

            ' ' | '\r' | '\t' => (),
            '\n' => self.line += 1,

            '"' => self.string(),
            c if c.is_ascii_digit() => self.number()?,
            c if is_alpha(c) => self.identifier(),

            other => self.report(ErrorImpl::UnexpectedCharacter { character: other }),
        }

        Ok(())
    }

    fn string(&mut self) {
        loop {
            match self.peek() {
                None => {
                    // Nothing left to advance over; the opening quote never closes.
                    self.report(ErrorImpl::UnterminatedString);
                    return;
                }
                Some('"') => break,
                Some(_) => {
                    let c = self.advance();
                    let escaped = if c == Some('\\') { self.advance() } else { c };

                    if escaped == Some('\n') {
                        self.line += 1;
                    }
                }
            }
        }

        // closing quote
        self.advance();

        let raw = &self.source[self.start + 1..self.current - 1];
        let value = unescape(raw);
        self.add_token_with_literal(TokenKind::String, Literal::Text(value));
    }

    fn number(&mut self) -> Result<(), Error> {
        self.consume_digits();

        let is_float = self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit());
        if is_float {
            self.advance();
            self.consume_digits();
        }

        let text = &self.source[self.start..self.current];
        let literal = if is_float {
            // Too many digits parse as infinity instead of failing.
            text.parse::<f64>().ok().filter(|value| value.is_finite()).map(Literal::Float)
        } else {
            text.parse::<i64>().ok().map(Literal::Integer)
        };

        match literal {
            Some(literal) => {
                self.add_token_with_literal(TokenKind::Number, literal);
                Ok(())
            }
            None => Err(Error::new(
                ErrorImpl::NumberParseError { token: text.to_string() },
                self.position(),
            )),
        }
    }

    fn identifier(&mut self) {
        while self.peek().is_some_and(is_alpha_numeric) {
            self.advance();
        }

        let text = &self.source[self.start..self.current];
        let kind = RESERVED_LOOKUP.get(text).copied().unwrap_or(TokenKind::Identifier);
        self.add_token(kind);
    }

    fn consume_digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.current += c.len_utf8();
        Some(c)
    }

    /// Consumes the next character only if it is `expected`.
    fn match_next(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.current += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn peek(&self) -> Option<char> {
        self.source[self.current..].chars().next()
    }

    fn peek_next(&self) -> Option<char> {
        self.source[self.current..].chars().nth(1)
    }

    fn at_eof(&self) -> bool {
        self.current >= self.source.len()
    }

    fn add_token(&mut self, kind: TokenKind) {
        self.add_token_with_literal(kind, Literal::None);
    }

    fn add_token_with_literal(&mut self, kind: TokenKind, literal: Literal) {
        let lexeme = String::from(&self.source[self.start..self.current]);
        self.tokens.push(MK_TOKEN!(kind, lexeme, literal, self.start_line));
    }

    fn position(&self) -> Position {
        Position {
            line: self.line,
            offset: self.start,
            file: Rc::clone(&self.file),
        }
    }

    fn report(&mut self, error: ErrorImpl) {
        let position = self.position();
        self.diagnostics.push(Error::new(error, position));
    }
}

fn is_alpha(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_alpha_numeric(c: char) -> bool {
    is_alpha(c) || c.is_ascii_digit()
}

fn unescape(raw: &str) -> String {
    let mut result = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }

        let decoded = match chars.peek() {
            Some('n') => Some('\n'),
            Some('t') => Some('\t'),
            Some('r') => Some('\r'),
            Some('\\') => Some('\\'),
            Some('"') => Some('"'),
            Some('0') => Some('\0'),
            _ => None,
        };

        match decoded {
            Some(decoded) => {
                result.push(decoded);
                chars.next();
            }
            None => result.push(ch), // keep the backslash
        }
    }

    result
}

/// Scans `source` in one go. `file` names the source in diagnostics and
/// defaults to `shell`.
pub fn tokenize(source: String, file: Option<String>) -> Result<ScanOutput, Error> {
    Scanner::new(source, file).scan_tokens()
}
