//! Lexer for literal expressions.
//!
//! Tokens are produced one at a time through [`LiteralLexer::next_token`].
//! The parser only pulls the tokens it needs, so text following a complete
//! literal (the rest of the host document) is never inspected.
//!
//! # Examples
//!
//! ```
//! use tagmark_literal::lexer::{LiteralLexer, TokenKind};
//!
//! let tokens = LiteralLexer::tokenize("{ hey: 45 }").unwrap();
//! assert_eq!(tokens[0].kind, TokenKind::LBrace);
//! assert_eq!(tokens[1].kind, TokenKind::Identifier("hey".into()));
//! assert_eq!(tokens[3].kind, TokenKind::Number(45.0));
//! ```

use std::fmt;

use crate::LiteralError;

/// Character range of a token, relative to the start of the lexed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// Token classification. Literal variants carry their value.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literals
    String(String),
    Number(f64),
    Boolean(bool),
    Null,
    Identifier(String),

    // Delimiters
    LBrace,
    RBrace,
    LBracket,
    RBracket,

    // Punctuation
    Comma,
    Colon,

    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::String(s) => write!(f, "string {s:?}"),
            TokenKind::Number(n) => write!(f, "number {n}"),
            TokenKind::Boolean(b) => write!(f, "'{b}'"),
            TokenKind::Null => f.write_str("'null'"),
            TokenKind::Identifier(name) => write!(f, "identifier '{name}'"),
            TokenKind::LBrace => f.write_str("'{'"),
            TokenKind::RBrace => f.write_str("'}'"),
            TokenKind::LBracket => f.write_str("'['"),
            TokenKind::RBracket => f.write_str("']'"),
            TokenKind::Comma => f.write_str("','"),
            TokenKind::Colon => f.write_str("':'"),
            TokenKind::Eof => f.write_str("end of input"),
        }
    }
}

/// A token produced by the literal lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

/// On-demand lexer over a literal expression.
pub struct LiteralLexer {
    chars: Vec<char>,
    pos: usize,
}

impl LiteralLexer {
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
        }
    }

    /// Tokenize the whole source. Fails on any character that cannot start
    /// a token, so this is only useful for standalone literals.
    pub fn tokenize(source: &str) -> Result<Vec<Token>, LiteralError> {
        let mut lexer = LiteralLexer::new(source);
        let mut tokens = Vec::new();

        loop {
            let token = lexer.next_token()?;
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }

        Ok(tokens)
    }

    /// Current character offset.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Move back (or forward) to an offset previously reported by this lexer.
    pub fn reset(&mut self, pos: usize) {
        self.pos = pos.min(self.chars.len());
    }

    /// Read the next token, skipping leading whitespace.
    pub fn next_token(&mut self) -> Result<Token, LiteralError> {
        self.skip_whitespace();

        let Some(ch) = self.current() else {
            return Ok(self.token(TokenKind::Eof, self.pos));
        };
        let start = self.pos;

        match ch {
            '0'..='9' => self.read_number(start),
            '.' if self.peek_is_digit(1) => self.read_number(start),
            '-' | '+' if self.starts_unsigned_number(1) => self.read_number(start),

            '"' | '\'' | '`' => self.read_string(start, ch),

            'a'..='z' | 'A'..='Z' | '_' | '$' => Ok(self.read_identifier(start)),

            '{' => Ok(self.single(TokenKind::LBrace, start)),
            '}' => Ok(self.single(TokenKind::RBrace, start)),
            '[' => Ok(self.single(TokenKind::LBracket, start)),
            ']' => Ok(self.single(TokenKind::RBracket, start)),
            ',' => Ok(self.single(TokenKind::Comma, start)),
            ':' => Ok(self.single(TokenKind::Colon, start)),

            _ => Err(LiteralError {
                message: format!("Unexpected character: '{ch}'"),
                offset: start,
            }),
        }
    }

    pub fn skip_whitespace(&mut self) {
        while self.current().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    // --- Private helpers ---

    fn read_number(&mut self, start: usize) -> Result<Token, LiteralError> {
        if matches!(self.current(), Some('-' | '+')) {
            self.pos += 1;
        }
        self.skip_digits();
        if self.current() == Some('.') {
            self.pos += 1;
            self.skip_digits();
        }
        if matches!(self.current(), Some('e' | 'E')) {
            let has_sign = matches!(self.peek_at(1), Some('-' | '+'));
            let digit_at = if has_sign { 2 } else { 1 };
            if self.peek_is_digit(digit_at) {
                self.pos += digit_at;
                self.skip_digits();
            }
        }

        let text: String = self.chars[start..self.pos].iter().collect();
        let value: f64 = text.parse().map_err(|_| LiteralError {
            message: format!("Invalid number: '{text}'"),
            offset: start,
        })?;

        Ok(self.token(TokenKind::Number(value), start))
    }

    fn read_string(&mut self, start: usize, quote: char) -> Result<Token, LiteralError> {
        self.pos += 1; // opening quote

        let mut value = String::new();

        loop {
            let Some(ch) = self.current() else {
                return Err(LiteralError {
                    message: "Unterminated string".into(),
                    offset: start,
                });
            };
            self.pos += 1;

            if ch == quote {
                break;
            }
            if ch != '\\' {
                value.push(ch);
                continue;
            }

            let Some(escaped) = self.current() else {
                return Err(LiteralError {
                    message: "Unterminated escape sequence".into(),
                    offset: self.pos,
                });
            };
            self.pos += 1;
            value.push(match escaped {
                'n' => '\n',
                't' => '\t',
                'r' => '\r',
                '0' => '\0',
                other => other,
            });
        }

        Ok(self.token(TokenKind::String(value), start))
    }

    fn read_identifier(&mut self, start: usize) -> Token {
        while self
            .current()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        {
            self.pos += 1;
        }

        let text: String = self.chars[start..self.pos].iter().collect();
        let kind = match text.as_str() {
            "true" => TokenKind::Boolean(true),
            "false" => TokenKind::Boolean(false),
            "null" => TokenKind::Null,
            _ => TokenKind::Identifier(text),
        };
        self.token(kind, start)
    }

    fn single(&mut self, kind: TokenKind, start: usize) -> Token {
        self.pos += 1;
        self.token(kind, start)
    }

    fn token(&self, kind: TokenKind, start: usize) -> Token {
        Token {
            kind,
            span: Span::new(start, self.pos),
        }
    }

    /// A digit, or `.` followed by a digit, at `offset` from the cursor.
    fn starts_unsigned_number(&self, offset: usize) -> bool {
        self.peek_is_digit(offset)
            || (self.peek_at(offset) == Some('.') && self.peek_is_digit(offset + 1))
    }

    fn skip_digits(&mut self) {
        while self.current().is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
        }
    }

    fn current(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn peek_is_digit(&self, offset: usize) -> bool {
        self.peek_at(offset).is_some_and(|c| c.is_ascii_digit())
    }
}
