/// Byte range into the source buffer (end exclusive).
///
/// Every structural node keeps the span it came from so the merge
/// engine can copy untouched regions verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Slice the source text this span indexes into.
    #[must_use]
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }
}

/// Reason a region could not be lexed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidReason {
    /// String literal with no closing quote before newline or EOF.
    UnterminatedString,
    /// Character that cannot start any token.
    UnexpectedCharacter(char),
}

/// Token kinds produced by the lexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Bare identifier (`define`, `root`, `true`).
    Ident,
    /// Quoted string literal (`'...'` or `"..."`); carries the
    /// unescaped value. The span covers the quotes.
    Str { value: String },
    /// Opening brace `{`.
    OpenBrace,
    /// Closing brace `}`.
    CloseBrace,
    /// Opening parenthesis `(`.
    OpenParen,
    /// Closing parenthesis `)`.
    CloseParen,
    /// Colon `:`.
    Colon,
    /// Comma `,`.
    Comma,
    /// Plus `+` (string concatenation).
    Plus,
    /// Whitespace or comment run.
    Trivia,
    /// Region the lexer could not classify. The parser decides
    /// whether it matters.
    Invalid { reason: InvalidReason },
}

/// A single token with its kind and source span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    /// Raw source text covered by this token.
    #[must_use]
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        self.span.text(source)
    }
}
