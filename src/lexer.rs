//! Tokenizer for the NLS bundle micro-grammar.
//!
//! The lexer is total: lexical problems such as unterminated strings
//! or characters outside the grammar become [`TokenKind::Invalid`]
//! tokens carrying the offending span, and the failure decision is
//! deferred to the parser. The token stream is complete and
//! order-preserving (whitespace and comments included), so any byte
//! range of the input can be reconstructed from token spans.

use crate::token::{InvalidReason, Span, Token, TokenKind};

/// Tokenize NLS bundle source text into a sequence of tokens.
#[must_use]
pub fn tokenize(input: &str) -> Vec<Token> {
    Lexer::new(input).tokenize()
}

struct Lexer<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Lexer<'a> {
    const fn new(source: &'a str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            pos: 0,
        }
    }

    fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        // A leading BOM is trivia, like any other formatting byte.
        if self.bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
            self.pos = 3;
            tokens.push(Token {
                kind: TokenKind::Trivia,
                span: Span::new(0, 3),
            });
        }

        while self.pos < self.bytes.len() {
            let ch = self.bytes[self.pos];

            let token = match ch {
                b'{' => self.punct(TokenKind::OpenBrace),
                b'}' => self.punct(TokenKind::CloseBrace),
                b'(' => self.punct(TokenKind::OpenParen),
                b')' => self.punct(TokenKind::CloseParen),
                b':' => self.punct(TokenKind::Colon),
                b',' => self.punct(TokenKind::Comma),
                b'+' => self.punct(TokenKind::Plus),
                b'\'' | b'"' => self.read_string(ch),
                b' ' | b'\t' | b'\r' | b'\n' => self.read_whitespace(),
                b'/' if matches!(self.peek_at(1), Some(b'/' | b'*')) => self.read_comment(),
                c if c.is_ascii_alphanumeric() || c == b'_' || c == b'$' => self.read_ident(),
                _ => self.read_unexpected(),
            };

            tokens.push(token);
        }

        tokens
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn punct(&mut self, kind: TokenKind) -> Token {
        let start = self.pos;
        self.pos += 1;
        Token {
            kind,
            span: Span::new(start, self.pos),
        }
    }

    fn read_whitespace(&mut self) -> Token {
        let start = self.pos;
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\r' | b'\n')) {
            self.pos += 1;
        }
        Token {
            kind: TokenKind::Trivia,
            span: Span::new(start, self.pos),
        }
    }

    fn read_comment(&mut self) -> Token {
        let start = self.pos;
        if self.peek_at(1) == Some(b'*') {
            // Block comment. An unterminated one swallows the rest of
            // the input; nothing structural can follow it anyway.
            self.pos += 2;
            while self.pos < self.bytes.len() {
                if self.bytes[self.pos] == b'*' && self.peek_at(1) == Some(b'/') {
                    self.pos += 2;
                    break;
                }
                self.pos += 1;
            }
        } else {
            // Line comment up to (not including) the newline.
            self.pos += 2;
            while self.pos < self.bytes.len() && self.bytes[self.pos] != b'\n' {
                self.pos += 1;
            }
        }
        Token {
            kind: TokenKind::Trivia,
            span: Span::new(start, self.pos),
        }
    }

    fn read_ident(&mut self) -> Token {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == b'_' || c == b'$' {
                self.pos += 1;
            } else {
                break;
            }
        }
        Token {
            kind: TokenKind::Ident,
            span: Span::new(start, self.pos),
        }
    }

    /// Read a `'` or `"` quoted literal, unescaping as it goes.
    ///
    /// A raw newline or EOF before the closing quote makes the token
    /// `Invalid(UnterminatedString)`; the span covers whatever was
    /// consumed so the parser can report the right offset.
    fn read_string(&mut self, quote: u8) -> Token {
        let start = self.pos;
        self.pos += 1;

        let mut value = String::new();
        loop {
            match self.peek() {
                None | Some(b'\n') => {
                    return Token {
                        kind: TokenKind::Invalid {
                            reason: InvalidReason::UnterminatedString,
                        },
                        span: Span::new(start, self.pos),
                    };
                }
                Some(c) if c == quote => {
                    self.pos += 1;
                    return Token {
                        kind: TokenKind::Str { value },
                        span: Span::new(start, self.pos),
                    };
                }
                Some(b'\\') => {
                    self.pos += 1;
                    self.read_escape(&mut value);
                }
                Some(_) => {
                    // Copy the raw run up to the next delimiter in one
                    // slice; the boundaries are all ASCII so the slice
                    // stays on UTF-8 character boundaries.
                    let run = self.pos;
                    while let Some(c) = self.peek() {
                        if c == quote || c == b'\\' || c == b'\n' {
                            break;
                        }
                        self.pos += 1;
                    }
                    value.push_str(&self.source[run..self.pos]);
                }
            }
        }
    }

    fn read_escape(&mut self, value: &mut String) {
        match self.peek() {
            // Trailing backslash at EOF; the enclosing loop reports
            // the unterminated string.
            None => {}
            Some(b'n') => {
                value.push('\n');
                self.pos += 1;
            }
            Some(b't') => {
                value.push('\t');
                self.pos += 1;
            }
            Some(b'r') => {
                value.push('\r');
                self.pos += 1;
            }
            Some(b'0') => {
                value.push('\0');
                self.pos += 1;
            }
            Some(b'u') => {
                self.pos += 1;
                self.read_unicode_escape(value);
            }
            // Escaped line break: JS line continuation, contributes
            // nothing to the value.
            Some(b'\n') => {
                self.pos += 1;
            }
            // Everything else, including quotes and backslash itself:
            // the escape resolves to the character (JS drops the
            // backslash for unknown escapes).
            Some(_) => {
                if let Some(ch) = self.source[self.pos..].chars().next() {
                    value.push(ch);
                    self.pos += ch.len_utf8();
                }
            }
        }
    }

    /// `\uXXXX`. The leading `\u` is already consumed. Malformed
    /// digits fall back to the unknown-escape rule (a literal `u`).
    fn read_unicode_escape(&mut self, value: &mut String) {
        let digits = &self.bytes[self.pos..];
        if digits.len() >= 4 && digits[..4].iter().all(u8::is_ascii_hexdigit) {
            let hex = &self.source[self.pos..self.pos + 4];
            if let Some(ch) = u32::from_str_radix(hex, 16).ok().and_then(char::from_u32) {
                value.push(ch);
                self.pos += 4;
                return;
            }
        }
        value.push('u');
    }

    fn read_unexpected(&mut self) -> Token {
        let start = self.pos;
        let ch = self.source[self.pos..].chars().next().unwrap_or('\u{FFFD}');
        self.pos += ch.len_utf8();
        Token {
            kind: TokenKind::Invalid {
                reason: InvalidReason::UnexpectedCharacter(ch),
            },
            span: Span::new(start, self.pos),
        }
    }
}
