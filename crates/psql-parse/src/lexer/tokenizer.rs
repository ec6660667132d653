//! SQL Tokenizer implementation.

use super::{Keyword, LexError, Position, Span, StringKind, Token, TokenKind};

/// A lexer that tokenizes SQL input.
///
/// The lexer owns a copy of its input so that a single instance can be
/// re-targeted with [`Lexer::reset`] and reused across independent parses.
#[derive(Debug, Default)]
pub struct Lexer {
    /// The input source code.
    input: String,
    /// The current byte position.
    pos: usize,
    /// The current line (1-based).
    line: u32,
    /// The current column (1-based).
    column: u32,
    /// The position of the start of the current token.
    start: Position,
}

impl Lexer {
    /// Creates a new lexer for the given input.
    #[must_use]
    pub fn new(input: &str) -> Self {
        let mut lexer = Self::default();
        lexer.reset(input);
        lexer
    }

    /// Discards all scanning state and starts over on `input`.
    pub fn reset(&mut self, input: &str) {
        self.input.clear();
        self.input.push_str(input);
        self.pos = 0;
        self.line = 1;
        self.column = 1;
        self.start = self.position();
    }

    /// Returns the input currently being scanned.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Returns the current position.
    #[must_use]
    pub const fn position(&self) -> Position {
        Position::new(self.pos, self.line, self.column)
    }

    /// Returns the character `n` places ahead without advancing.
    fn peek_nth(&self, n: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(n)
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.peek_nth(0)
    }

    /// Returns the next character without advancing.
    fn peek_next(&self) -> Option<char> {
        self.peek_nth(1)
    }

    /// Advances to the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Skips whitespace and comments.
    fn skip_whitespace_and_comments(&mut self) -> Result<(), LexError> {
        loop {
            while self.peek().is_some_and(char::is_whitespace) {
                self.advance();
            }

            // Single-line comments (-- ...)
            if self.peek() == Some('-') && self.peek_next() == Some('-') {
                while self.peek().is_some_and(|c| c != '\n') {
                    self.advance();
                }
                continue;
            }

            // Multi-line comments (/* ... */)
            if self.peek() == Some('/') && self.peek_next() == Some('*') {
                self.start = self.position();
                self.advance();
                self.advance();
                loop {
                    match self.advance() {
                        Some('*') if self.peek() == Some('/') => {
                            self.advance();
                            break;
                        }
                        None => return Err(self.error("Unterminated block comment")),
                        _ => {}
                    }
                }
                continue;
            }

            return Ok(());
        }
    }

    /// Creates a span from start to current position.
    const fn make_span(&self) -> Span {
        Span::new(self.start, self.position())
    }

    /// Creates a token with the current span.
    const fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(kind, self.make_span())
    }

    /// Creates an error covering the current token.
    fn error(&self, message: impl Into<String>) -> LexError {
        LexError::new(message, self.make_span())
    }

    /// Scans an identifier or keyword.
    fn scan_identifier(&mut self) -> Token {
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '$')
        {
            self.advance();
        }

        let text = &self.input[self.start.offset..self.pos];

        if let Some(keyword) = Keyword::from_str(text) {
            self.make_token(TokenKind::Keyword(keyword))
        } else {
            self.make_token(TokenKind::Identifier(text.to_lowercase()))
        }
    }

    /// Scans a double-quoted identifier, keeping its exact case.
    fn scan_quoted_identifier(&mut self) -> Result<Token, LexError> {
        self.advance(); // opening quote
        let mut name = String::new();

        loop {
            match self.advance() {
                Some('"') if self.peek() == Some('"') => {
                    self.advance();
                    name.push('"');
                }
                Some('"') => break,
                Some(c) => name.push(c),
                None => return Err(self.error("Unterminated quoted identifier")),
            }
        }

        if name.is_empty() {
            return Err(self.error("Zero-length quoted identifier"));
        }
        Ok(self.make_token(TokenKind::Identifier(name)))
    }

    /// Scans a number (integer or float).
    fn scan_number(&mut self) -> Result<Token, LexError> {
        let mut is_float = false;

        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            is_float = true;
            self.advance(); // .
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        if self.peek().is_some_and(|c| c == 'e' || c == 'E') {
            let digits_at = if self.peek_next().is_some_and(|c| c == '+' || c == '-') {
                2
            } else {
                1
            };
            if self.peek_nth(digits_at).is_some_and(|c| c.is_ascii_digit()) {
                is_float = true;
                for _ in 0..digits_at {
                    self.advance();
                }
                while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.advance();
                }
            }
        }

        let text = &self.input[self.start.offset..self.pos];

        if is_float {
            match text.parse::<f64>() {
                Ok(f) if f.is_finite() => Ok(self.make_token(TokenKind::Float(f))),
                Ok(_) => Err(self.error(format!("Float literal out of range: {text}"))),
                Err(e) => Err(self.error(format!("Invalid float: {e}"))),
            }
        } else {
            match text.parse::<i64>() {
                Ok(i) => Ok(self.make_token(TokenKind::Integer(i))),
                Err(e) => Err(self.error(format!("Invalid integer: {e}"))),
            }
        }
    }

    /// Scans a quoted string literal; `prefix` is the already consumed
    /// letter in front of the quote, if any.
    fn scan_string(&mut self, prefix: Option<char>) -> Result<Token, LexError> {
        self.advance(); // opening quote
        let backslash_escapes = matches!(prefix, Some('e' | 'E'));
        let mut value = String::new();

        loop {
            match self.advance() {
                Some('\'') if self.peek() == Some('\'') => {
                    self.advance();
                    value.push('\'');
                }
                Some('\'') => break,
                Some('\\') if backslash_escapes => {
                    let escaped = match self.advance() {
                        Some('n') => '\n',
                        Some('t') => '\t',
                        Some('r') => '\r',
                        Some('b') => '\u{8}',
                        Some('f') => '\u{c}',
                        Some(c @ ('\\' | '\'')) => c,
                        Some(c) => return Err(self.error(format!("Invalid escape sequence: \\{c}"))),
                        None => return Err(self.error("Unterminated string literal")),
                    };
                    value.push(escaped);
                }
                Some(c) => value.push(c),
                None => return Err(self.error("Unterminated string literal")),
            }
        }

        let kind = match prefix {
            Some('b' | 'B') => {
                if !value.chars().all(|c| c == '0' || c == '1') {
                    return Err(self.error(format!("Invalid bit string literal: B'{value}'")));
                }
                StringKind::Bit
            }
            Some('x' | 'X') => {
                if !value.chars().all(|c| c.is_ascii_hexdigit()) {
                    return Err(self.error(format!("Invalid hex string literal: X'{value}'")));
                }
                StringKind::Hex
            }
            Some('n' | 'N') => StringKind::National,
            _ => StringKind::Char,
        };

        Ok(self.make_token(TokenKind::String { value, kind }))
    }

    /// Scans the next token.
    ///
    /// # Errors
    ///
    /// Returns a `LexError` for malformed input such as an unterminated
    /// string or an unexpected character.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace_and_comments()?;
        self.start = self.position();

        let Some(c) = self.peek() else {
            return Ok(self.make_token(TokenKind::Eof));
        };

        // Literals that need the full scanner
        match c {
            '\'' => return self.scan_string(None),
            '"' => return self.scan_quoted_identifier(),
            'b' | 'B' | 'x' | 'X' | 'n' | 'N' | 'e' | 'E' if self.peek_next() == Some('\'') => {
                self.advance();
                return self.scan_string(Some(c));
            }
            c if c.is_ascii_digit() => return self.scan_number(),
            '.' if self.peek_next().is_some_and(|c| c.is_ascii_digit()) => {
                return self.scan_number();
            }
            c if c.is_alphabetic() || c == '_' => return Ok(self.scan_identifier()),
            _ => {}
        }

        self.advance();
        let kind = match c {
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            '[' => TokenKind::LeftBracket,
            ']' => TokenKind::RightBracket,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            '.' => TokenKind::Dot,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '=' => TokenKind::Eq,
            '<' => match self.peek() {
                Some('=') => {
                    self.advance();
                    TokenKind::LtEq
                }
                Some('>') => {
                    self.advance();
                    TokenKind::NotEq
                }
                _ => TokenKind::Lt,
            },
            '>' => {
                if self.peek() == Some('=') {
                    self.advance();
                    TokenKind::GtEq
                } else {
                    TokenKind::Gt
                }
            }
            '!' if self.peek() == Some('=') => {
                self.advance();
                TokenKind::NotEq
            }
            '|' if self.peek() == Some('|') => {
                self.advance();
                TokenKind::Concat
            }
            _ => return Err(self.error(format!("Unexpected character: {c}"))),
        };
        Ok(self.make_token(kind))
    }

    /// Tokenizes the entire input and returns all tokens, ending with EOF.
    ///
    /// # Errors
    ///
    /// Returns the first `LexError` encountered.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = token.is_eof();
            tokens.push(token);
            if is_eof {
                return Ok(tokens);
            }
        }
    }
}
