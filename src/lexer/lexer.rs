use std::rc::Rc;

use tracing::{debug, trace};

use crate::{errors::errors::Error, Position, Span, MK_SPAN, MK_TOKEN};

use super::tokens::{lookup_identifier, Token, TokenKind};

/// Pull-based scanner over a single source buffer.
///
/// `position` indexes the byte in `ch`, `read_position` the next unread
/// byte; `read_position == position + 1` after every advance. `ch` is
/// `None` once the input is exhausted.
#[derive(Debug, Clone)]
pub struct Lexer {
    source: String,
    position: usize,
    read_position: usize,
    ch: Option<u8>,
    file: Rc<String>,
    finished: bool,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        let mut lexer = Lexer {
            source,
            position: 0,
            read_position: 0,
            ch: None,
            file: file_name,
            finished: false,
        };
        lexer.read_char();
        lexer
    }

    pub fn file(&self) -> Rc<String> {
        Rc::clone(&self.file)
    }

    /// Returns the next token. Past the end of the input this keeps
    /// returning `EndOfInput`.
    pub fn next_token(&mut self) -> Token {
        let token = self.scan_token();
        trace!(
            kind = %token.kind,
            value = %token.value,
            start = token.span.start.0,
            end = token.span.end.0,
            "scanned token"
        );
        token
    }

    fn scan_token(&mut self) -> Token {
        self.skip_whitespace();

        let start = self.position;
        let ch = match self.ch {
            Some(ch) => ch,
            None => {
                let end = self.position.min(self.source.len());
                return MK_TOKEN!(TokenKind::EndOfInput, String::new(), MK_SPAN!(self.file, end, end));
            }
        };

        // Identifier and number runs leave the cursor on the first byte past the run.
        if is_letter(ch) {
            let value = self.read_identifier();
            let kind = lookup_identifier(&value);
            return MK_TOKEN!(kind, value, MK_SPAN!(self.file, start, self.position));
        }

        if is_digit(ch) {
            let value = self.read_number();
            return MK_TOKEN!(TokenKind::IntegerLiteral, value, MK_SPAN!(self.file, start, self.position));
        }

        let token = match ch {
            b'=' => match self.peek_char() {
                Some(second @ b'=') => {
                    self.read_char();
                    self.new_two_char_token(TokenKind::Equal, ch, second, start)
                }
                _ => self.new_token(TokenKind::Assign, ch),
            },
            b'!' => match self.peek_char() {
                Some(second @ b'=') => {
                    self.read_char();
                    self.new_two_char_token(TokenKind::NotEqual, ch, second, start)
                }
                _ => self.new_token(TokenKind::Bang, ch),
            },
            b'+' => self.new_token(TokenKind::Plus, ch),
            b'-' => self.new_token(TokenKind::Minus, ch),
            b'*' => self.new_token(TokenKind::Asterisk, ch),
            b'/' => self.new_token(TokenKind::Slash, ch),
            b'<' => self.new_token(TokenKind::LessThan, ch),
            b'>' => self.new_token(TokenKind::GreaterThan, ch),
            b',' => self.new_token(TokenKind::Comma, ch),
            b';' => self.new_token(TokenKind::Semicolon, ch),
            b'(' => self.new_token(TokenKind::LeftParen, ch),
            b')' => self.new_token(TokenKind::RightParen, ch),
            b'{' => self.new_token(TokenKind::LeftBrace, ch),
            b'}' => self.new_token(TokenKind::RightBrace, ch),
            _ => self.new_token(TokenKind::Illegal, ch),
        };

        self.read_char();
        token
    }

    fn read_char(&mut self) {
        self.ch = self.source.as_bytes().get(self.read_position).copied();
        self.position = self.read_position;
        self.read_position += 1;
    }

    fn peek_char(&self) -> Option<u8> {
        self.source.as_bytes().get(self.read_position).copied()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.ch, Some(b' ' | b'\t' | b'\n' | b'\r')) {
            self.read_char();
        }
    }

    fn read_identifier(&mut self) -> String {
        let start = self.position;
        while self.ch.is_some_and(is_letter) {
            self.read_char();
        }
        String::from(&self.source[start..self.position])
    }

    fn read_number(&mut self) -> String {
        let start = self.position;
        while self.ch.is_some_and(is_digit) {
            self.read_char();
        }
        String::from(&self.source[start..self.position])
    }

    /// Token for the byte under the cursor.
    fn new_token(&self, kind: TokenKind, ch: u8) -> Token {
        MK_TOKEN!(
            kind,
            render_byte(ch),
            MK_SPAN!(self.file, self.position, self.position + 1)
        )
    }

    /// Token whose text is `first` followed by `second`, ending at the cursor.
    fn new_two_char_token(&self, kind: TokenKind, first: u8, second: u8, start: usize) -> Token {
        let mut value = String::with_capacity(2);
        value.push(first as char);
        value.push(second as char);

        MK_TOKEN!(kind, value, MK_SPAN!(self.file, start, self.position + 1))
    }
}

impl Iterator for Lexer {
    type Item = Token;

    /// Yields every token including a single trailing `EndOfInput`.
    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }

        let token = self.next_token();
        if token.is_eof() {
            self.finished = true;
        }
        Some(token)
    }
}

/// Text of a single-byte token. Bytes outside ASCII are not characters on
/// their own, so they are written as `\xNN`.
fn render_byte(ch: u8) -> String {
    if ch.is_ascii() {
        (ch as char).to_string()
    } else {
        format!("\\x{:02x}", ch)
    }
}

fn is_letter(ch: u8) -> bool {
    ch.is_ascii_alphabetic() || ch == b'_'
}

fn is_digit(ch: u8) -> bool {
    ch.is_ascii_digit()
}

/// Scans the whole source and fails on the first illegal character.
pub fn tokenize(source: String, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, file);
    let mut tokens = vec![];

    for token in lex.by_ref() {
        if token.kind == TokenKind::Illegal {
            debug!(offset = token.span.start.0, value = %token.value, "illegal character");
            return Err(Error::illegal_character(&token));
        }
        tokens.push(token);
    }

    debug!(count = tokens.len(), file = %lex.file(), "tokenized source");
    Ok(tokens)
}

/// Scans the whole source, leaving `Illegal` tokens in the stream.
pub fn tokenize_lossy(source: String, file: Option<String>) -> Vec<Token> {
    let lex = Lexer::new(source, file);
    let tokens: Vec<Token> = lex.collect();

    debug!(count = tokens.len(), "tokenized source");
    tokens
}
