//! Parser for the NLS bundle micro-grammar.
//!
//! Recognizes the module-registration wrapper and the nested key/value
//! table, producing a [`BundleDocument`] that records both resolved
//! values and exact source spans. The grammar is the object-literal
//! and string-concatenation subset used by AMD i18n bundles, nothing
//! more.

use std::fmt;

use crate::document::{BundleDocument, Entry, Section, StringFragment};
use crate::token::{InvalidReason, Span, Token, TokenKind};

/// Structural reason behind a `MalformedBundle` failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedKind {
    /// No registration call (an opening parenthesis) in the input.
    MissingRegistrationCall,
    /// The call argument is not an object literal.
    NotAnObject { found: Option<String> },
    /// A key token is neither a string literal nor an identifier.
    InvalidKey { found: String },
    /// Expected `:` after a key.
    ExpectedColon { found: Option<String> },
    /// Expected a value after `:`.
    ExpectedValue { found: String },
    /// Expected `)` after the argument object.
    ExpectedCloseParen { found: Option<String> },
    /// EOF inside an object literal.
    UnbalancedBraces,
    /// String literal with no closing quote.
    UnterminatedString,
    /// Character outside the grammar in a structural position.
    UnexpectedCharacter(char),
}

impl fmt::Display for MalformedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingRegistrationCall => {
                write!(f, "registration call not found")
            }
            Self::NotAnObject { found: None } => {
                write!(f, "call argument is not an object literal")
            }
            Self::NotAnObject { found: Some(t) } => {
                write!(f, "call argument is not an object literal, got '{t}'")
            }
            Self::InvalidKey { found } => {
                write!(f, "invalid key '{found}'")
            }
            Self::ExpectedColon { found: None } => {
                write!(f, "expected ':'")
            }
            Self::ExpectedColon { found: Some(t) } => {
                write!(f, "expected ':', got '{t}'")
            }
            Self::ExpectedValue { found } => {
                write!(f, "expected a value, got '{found}'")
            }
            Self::ExpectedCloseParen { found: None } => {
                write!(f, "expected ')'")
            }
            Self::ExpectedCloseParen { found: Some(t) } => {
                write!(f, "expected ')', got '{t}'")
            }
            Self::UnbalancedBraces => {
                write!(f, "unbalanced braces")
            }
            Self::UnterminatedString => {
                write!(f, "unterminated string literal")
            }
            Self::UnexpectedCharacter(ch) => {
                write!(f, "unexpected character: {ch}")
            }
        }
    }
}

/// Classifies a parser error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Structural parse failure; fatal for the file.
    MalformedBundle(MalformedKind),
    /// A `+` not followed by a string literal.
    UnresolvedConcatenation,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedBundle(kind) => {
                write!(f, "malformed bundle: {kind}")
            }
            Self::UnresolvedConcatenation => {
                write!(f, "unresolved concatenation: '+' not followed by a string literal")
            }
        }
    }
}

/// Error produced during parsing, carrying the offending byte offset.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at byte {offset}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub offset: usize,
}

impl ParseError {
    const fn malformed(kind: MalformedKind, offset: usize) -> Self {
        Self {
            kind: ParseErrorKind::MalformedBundle(kind),
            offset,
        }
    }
}

/// Parse a token stream into a [`BundleDocument`].
///
/// `source` must be the text the tokens were produced from; the
/// document borrows it as the backing buffer for all spans.
///
/// # Errors
///
/// Returns `ParseError` when the registration call is missing, the
/// argument is not an object literal, a key is neither a string nor an
/// identifier, braces are unbalanced, a string is unterminated, or a
/// `+` is not followed by a string literal.
pub fn parse<'a>(source: &'a str, tokens: &[Token]) -> Result<BundleDocument<'a>, ParseError> {
    Parser::new(source, tokens).parse()
}

/// An object-literal child before the flat-vs-sectioned decision.
enum ChildValue {
    /// One-or-more concatenated string fragments.
    Literal(Vec<StringFragment>),
    /// A nested object literal with its own children.
    Object(Vec<Child>, Span),
    /// Non-string scalar (`true`, numbers); not translatable,
    /// preserved verbatim on merge.
    Scalar,
}

struct Child {
    key: String,
    key_span: Span,
    value: ChildValue,
    value_span: Span,
    trailing_span: Span,
}

struct Parser<'a, 't> {
    source: &'a str,
    tokens: &'t [Token],
    pos: usize,
}

impl<'a, 't> Parser<'a, 't> {
    const fn new(source: &'a str, tokens: &'t [Token]) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
        }
    }

    fn parse(mut self) -> Result<BundleDocument<'a>, ParseError> {
        // Everything before the registration call's opening
        // parenthesis is preamble, whatever it contains.
        let Some(open_paren) = self
            .tokens
            .iter()
            .position(|t| t.kind == TokenKind::OpenParen)
        else {
            return Err(ParseError::malformed(
                MalformedKind::MissingRegistrationCall,
                self.source.len(),
            ));
        };

        let call_start = self.tokens[open_paren].span.start;
        let preamble = Span::new(0, call_start);
        self.pos = open_paren + 1;
        self.skip_trivia();

        match self.peek() {
            Some(t) if t.kind == TokenKind::OpenBrace => {}
            Some(t) => {
                return Err(ParseError::malformed(
                    MalformedKind::NotAnObject {
                        found: Some(t.text(self.source).to_string()),
                    },
                    t.span.start,
                ));
            }
            None => {
                return Err(ParseError::malformed(
                    MalformedKind::NotAnObject { found: None },
                    self.source.len(),
                ));
            }
        }

        let object_start = self.peek_span_start();
        let wrapper_open = Span::new(call_start, object_start);

        let (children, object_span) = self.parse_object()?;

        // Closing parenthesis of the call.
        self.skip_trivia();
        let close_paren = match self.peek() {
            Some(t) if t.kind == TokenKind::CloseParen => {
                let span = t.span;
                self.pos += 1;
                span
            }
            Some(t) => {
                return Err(ParseError::malformed(
                    MalformedKind::ExpectedCloseParen {
                        found: Some(t.text(self.source).to_string()),
                    },
                    t.span.start,
                ));
            }
            None => {
                return Err(ParseError::malformed(
                    MalformedKind::ExpectedCloseParen { found: None },
                    self.source.len(),
                ));
            }
        };

        let wrapper_close = Span::new(object_span.end, close_paren.end);
        let trailing = Span::new(close_paren.end, self.source.len());

        let sections = Self::build_sections(children, object_span);

        Ok(BundleDocument::new(
            self.source,
            preamble,
            wrapper_open,
            wrapper_close,
            sections,
            trailing,
        ))
    }

    /// Flat-vs-sectioned decision: the argument object is a locale
    /// table when it has a `root` key (ASCII case-insensitive) mapped
    /// to an object literal. Then every object-valued child is a
    /// section and scalar children (locale flags like `"fr": true`)
    /// are wrapper bytes only. Otherwise the whole object is one
    /// `root` section.
    fn build_sections(children: Vec<Child>, object_span: Span) -> Vec<Section> {
        let sectioned = children.iter().any(|c| {
            c.key.eq_ignore_ascii_case("root") && matches!(c.value, ChildValue::Object(..))
        });

        if sectioned {
            children
                .into_iter()
                .filter_map(|c| match c.value {
                    ChildValue::Object(sub, span) => Some(Section {
                        name: c.key,
                        entries: Self::leaf_entries(sub),
                        span,
                    }),
                    _ => None,
                })
                .collect()
        } else {
            vec![Section {
                name: "root".to_string(),
                entries: Self::leaf_entries(children),
                span: object_span,
            }]
        }
    }

    /// String-valued children become entries; scalars and nested
    /// objects are dropped from the model (their bytes survive merge
    /// untouched because merge only rewrites entry value spans).
    fn leaf_entries(children: Vec<Child>) -> Vec<Entry> {
        children
            .into_iter()
            .filter_map(|c| match c.value {
                ChildValue::Literal(fragments) => Some(Entry {
                    key: c.key,
                    key_span: c.key_span,
                    fragments,
                    value_span: c.value_span,
                    trailing_span: c.trailing_span,
                }),
                _ => None,
            })
            .collect()
    }

    /// Parse an object literal starting at the current `{` token.
    /// Returns the children and the span including both braces.
    fn parse_object(&mut self) -> Result<(Vec<Child>, Span), ParseError> {
        let open = self.peek_span_start();
        self.pos += 1; // caller verified the `{`

        let mut children = Vec::new();
        loop {
            self.skip_trivia();
            match self.peek() {
                None => {
                    return Err(ParseError::malformed(
                        MalformedKind::UnbalancedBraces,
                        self.source.len(),
                    ));
                }
                Some(t) if t.kind == TokenKind::CloseBrace => {
                    let end = t.span.end;
                    self.pos += 1;
                    return Ok((children, Span::new(open, end)));
                }
                Some(_) => children.push(self.parse_child()?),
            }
        }
    }

    /// Parse one `key : value ,?` child. The current token is the key.
    fn parse_child(&mut self) -> Result<Child, ParseError> {
        let key_token = &self.tokens[self.pos];
        let key_span = key_token.span;
        let key = match &key_token.kind {
            TokenKind::Str { value } => value.clone(),
            TokenKind::Ident => key_token.text(self.source).to_string(),
            TokenKind::Invalid { reason } => {
                return Err(Self::invalid_token_error(reason, key_span.start));
            }
            _ => {
                return Err(ParseError::malformed(
                    MalformedKind::InvalidKey {
                        found: key_token.text(self.source).to_string(),
                    },
                    key_span.start,
                ));
            }
        };
        self.pos += 1;

        self.skip_trivia();
        match self.peek() {
            Some(t) if t.kind == TokenKind::Colon => self.pos += 1,
            Some(t) => {
                return Err(ParseError::malformed(
                    MalformedKind::ExpectedColon {
                        found: Some(t.text(self.source).to_string()),
                    },
                    t.span.start,
                ));
            }
            None => {
                return Err(ParseError::malformed(
                    MalformedKind::ExpectedColon { found: None },
                    self.source.len(),
                ));
            }
        }

        self.skip_trivia();
        let (value, value_span) = self.parse_value()?;

        // Trailing trivia and the separating comma, if present.
        let mut trailing_end = value_span.end;
        self.skip_trivia();
        if let Some(t) = self.peek() {
            if t.kind == TokenKind::Comma {
                trailing_end = t.span.end;
                self.pos += 1;
            }
        }

        Ok(Child {
            key,
            key_span,
            value,
            value_span,
            trailing_span: Span::new(value_span.end, trailing_end),
        })
    }

    fn parse_value(&mut self) -> Result<(ChildValue, Span), ParseError> {
        let Some(token) = self.peek() else {
            return Err(ParseError::malformed(
                MalformedKind::UnbalancedBraces,
                self.source.len(),
            ));
        };

        match &token.kind {
            TokenKind::Str { .. } => {
                let (fragments, span) = self.parse_concatenation()?;
                Ok((ChildValue::Literal(fragments), span))
            }
            TokenKind::OpenBrace => {
                let (children, span) = self.parse_object()?;
                Ok((ChildValue::Object(children, span), span))
            }
            TokenKind::Ident => {
                // `true`, `false`, bare numbers: tolerated, skipped.
                let span = token.span;
                self.pos += 1;
                Ok((ChildValue::Scalar, span))
            }
            TokenKind::Plus => Err(ParseError {
                kind: ParseErrorKind::UnresolvedConcatenation,
                offset: token.span.start,
            }),
            TokenKind::Invalid { reason } => {
                Err(Self::invalid_token_error(reason, token.span.start))
            }
            _ => Err(ParseError::malformed(
                MalformedKind::ExpectedValue {
                    found: token.text(self.source).to_string(),
                },
                token.span.start,
            )),
        }
    }

    /// Parse `literal (+ literal)*`. The current token is the first
    /// string literal. Each fragment keeps its own span so that
    /// single-fragment values can stay verbatim under merge while
    /// multi-fragment values are replaced as one unit.
    fn parse_concatenation(&mut self) -> Result<(Vec<StringFragment>, Span), ParseError> {
        let mut fragments = vec![self.take_fragment()];

        loop {
            let checkpoint = self.pos;
            self.skip_trivia();
            match self.peek() {
                Some(t) if t.kind == TokenKind::Plus => {
                    self.pos += 1;
                    self.skip_trivia();
                    match self.peek() {
                        Some(t) if matches!(t.kind, TokenKind::Str { .. }) => {
                            fragments.push(self.take_fragment());
                        }
                        Some(t) => {
                            return Err(match &t.kind {
                                TokenKind::Invalid { reason } => {
                                    Self::invalid_token_error(reason, t.span.start)
                                }
                                _ => ParseError {
                                    kind: ParseErrorKind::UnresolvedConcatenation,
                                    offset: t.span.start,
                                },
                            });
                        }
                        None => {
                            return Err(ParseError {
                                kind: ParseErrorKind::UnresolvedConcatenation,
                                offset: self.source.len(),
                            });
                        }
                    }
                }
                _ => {
                    self.pos = checkpoint;
                    break;
                }
            }
        }

        let span = Span::new(
            fragments[0].span.start,
            fragments[fragments.len() - 1].span.end,
        );
        Ok((fragments, span))
    }

    /// Take the current token, known to be a string literal, as a
    /// fragment.
    fn take_fragment(&mut self) -> StringFragment {
        let token = &self.tokens[self.pos];
        let TokenKind::Str { value } = &token.kind else {
            unreachable!("caller checked for a string literal");
        };
        let fragment = StringFragment {
            value: value.clone(),
            span: token.span,
        };
        self.pos += 1;
        fragment
    }

    fn invalid_token_error(reason: &InvalidReason, offset: usize) -> ParseError {
        let kind = match reason {
            InvalidReason::UnterminatedString => MalformedKind::UnterminatedString,
            InvalidReason::UnexpectedCharacter(ch) => MalformedKind::UnexpectedCharacter(*ch),
        };
        ParseError::malformed(kind, offset)
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_span_start(&self) -> usize {
        self.tokens
            .get(self.pos)
            .map_or(self.source.len(), |t| t.span.start)
    }

    fn skip_trivia(&mut self) {
        while let Some(t) = self.peek() {
            if t.kind == TokenKind::Trivia {
                self.pos += 1;
            } else {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn parse_input(input: &str) -> Result<BundleDocument<'_>, ParseError> {
        let tokens = tokenize(input);
        parse(input, &tokens)
    }

    #[test]
    fn flat_bundle() {
        let doc = parse_input("define({\n\t'a': 'x',\n\t'b': 'y'\n});\n").expect("parse failed");
        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.sections[0].name, "root");
        let keys: Vec<_> = doc.sections[0].entries.iter().map(|e| &e.key).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn sectioned_bundle() {
        let doc = parse_input(
            "define({\n\
             \t\"root\": {\n\t\t\"msg.hello\": \"Hello\"\n\t},\n\
             \t\"fr\": true,\n\
             \t\"de\": true\n\
             });\n",
        )
        .expect("parse failed");
        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.sections[0].name, "root");
        assert_eq!(doc.sections[0].entries[0].key, "msg.hello");
    }

    #[test]
    fn locale_sections_alongside_root() {
        let doc = parse_input(
            "define({\n\
             \t\"root\": {\"greeting\": \"Hello\"},\n\
             \t\"fr\": {\"greeting\": \"Bonjour\"}\n\
             });\n",
        )
        .expect("parse failed");
        assert_eq!(doc.sections.len(), 2);
        assert_eq!(doc.sections[1].name, "fr");
        assert_eq!(doc.sections[1].entries[0].resolved_value(), "Bonjour");
    }

    #[test]
    fn root_key_without_object_value_means_flat() {
        let doc = parse_input("define({\"root\": \"literally a value\"});").expect("parse failed");
        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.sections[0].name, "root");
        assert_eq!(doc.sections[0].entries[0].key, "root");
    }

    #[test]
    fn bare_identifier_keys() {
        let doc = parse_input("define({greeting: 'Hello'});").expect("parse failed");
        assert_eq!(doc.sections[0].entries[0].key, "greeting");
    }

    #[test]
    fn duplicate_keys_become_distinct_entries() {
        let doc =
            parse_input("define({'k': 'first', 'k': 'second'});").expect("parse failed");
        let entries = &doc.sections[0].entries;
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].resolved_value(), "first");
        assert_eq!(entries[1].resolved_value(), "second");
    }

    #[test]
    fn concatenated_value_records_fragments() {
        let input = "define({'k': 'a' + 'b'\n\t\t+ 'c'});";
        let doc = parse_input(input).expect("parse failed");
        let entry = &doc.sections[0].entries[0];
        assert_eq!(entry.fragments.len(), 3);
        assert_eq!(entry.resolved_value(), "abc");
        assert_eq!(entry.value_span.text(input), "'a' + 'b'\n\t\t+ 'c'");
    }

    #[test]
    fn single_fragment_value_span() {
        let input = "define({'k': 'only'});";
        let doc = parse_input(input).expect("parse failed");
        let entry = &doc.sections[0].entries[0];
        assert_eq!(entry.fragments.len(), 1);
        assert_eq!(entry.value_span.text(input), "'only'");
    }

    #[test]
    fn trailing_span_includes_comma() {
        let input = "define({'a': 'x' , 'b': 'y'});";
        let doc = parse_input(input).expect("parse failed");
        let entry = &doc.sections[0].entries[0];
        assert_eq!(entry.trailing_span.text(input), " ,");
    }

    #[test]
    fn preamble_and_trailing_text() {
        let input = "// colors.js\ndefine({'a': 'x'});\n";
        let doc = parse_input(input).expect("parse failed");
        assert_eq!(doc.preamble_text(), "// colors.js\ndefine");
        assert_eq!(doc.trailing_text(), ";\n");
    }

    #[test]
    fn scalar_values_are_skipped() {
        let doc = parse_input("define({'a': 'x', 'n': 42, 'b': 'y'});").expect("parse failed");
        let keys: Vec<_> = doc.sections[0].entries.iter().map(|e| &e.key).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn empty_table() {
        let doc = parse_input("define({});").expect("parse failed");
        assert_eq!(doc.sections.len(), 1);
        assert!(doc.sections[0].entries.is_empty());
    }

    #[test]
    fn trailing_comma_accepted() {
        let doc = parse_input("define({'a': 'x',});").expect("parse failed");
        assert_eq!(doc.sections[0].entries.len(), 1);
    }

    #[test]
    fn missing_registration_call() {
        let err = parse_input("var x = 1").expect_err("should fail");
        assert_eq!(
            err.kind,
            ParseErrorKind::MalformedBundle(MalformedKind::MissingRegistrationCall)
        );
    }

    #[test]
    fn argument_not_an_object() {
        let err = parse_input("define('just a string')").expect_err("should fail");
        assert!(matches!(
            err.kind,
            ParseErrorKind::MalformedBundle(MalformedKind::NotAnObject { .. })
        ));
        assert_eq!(err.offset, 7);
    }

    #[test]
    fn unbalanced_braces() {
        let err = parse_input("define({'a': 'x'").expect_err("should fail");
        assert_eq!(
            err.kind,
            ParseErrorKind::MalformedBundle(MalformedKind::UnbalancedBraces)
        );
        assert_eq!(err.offset, 16);
    }

    #[test]
    fn invalid_key_token() {
        let err = parse_input("define({ : 'x' });").expect_err("should fail");
        assert!(matches!(
            err.kind,
            ParseErrorKind::MalformedBundle(MalformedKind::InvalidKey { .. })
        ));
    }

    #[test]
    fn unterminated_string_reported_with_offset() {
        let input = "define({'a': 'unclosed});";
        let err = parse_input(input).expect_err("should fail");
        assert_eq!(
            err.kind,
            ParseErrorKind::MalformedBundle(MalformedKind::UnterminatedString)
        );
        assert_eq!(err.offset, 13);
    }

    #[test]
    fn stray_plus_as_value() {
        let err = parse_input("define({'a': + });").expect_err("should fail");
        assert_eq!(err.kind, ParseErrorKind::UnresolvedConcatenation);
        assert_eq!(err.offset, 13);
    }

    #[test]
    fn plus_followed_by_non_string() {
        let err = parse_input("define({'a': 'x' + true});").expect_err("should fail");
        assert_eq!(err.kind, ParseErrorKind::UnresolvedConcatenation);
        assert_eq!(err.offset, 19);
    }

    #[test]
    fn plus_at_end_of_input() {
        let err = parse_input("define({'a': 'x' +").expect_err("should fail");
        assert_eq!(err.kind, ParseErrorKind::UnresolvedConcatenation);
    }

    #[test]
    fn missing_colon() {
        let err = parse_input("define({'a' 'x'});").expect_err("should fail");
        assert!(matches!(
            err.kind,
            ParseErrorKind::MalformedBundle(MalformedKind::ExpectedColon { .. })
        ));
    }

    #[test]
    fn missing_close_paren() {
        let err = parse_input("define({'a': 'x'};").expect_err("should fail");
        assert!(matches!(
            err.kind,
            ParseErrorKind::MalformedBundle(MalformedKind::ExpectedCloseParen { .. })
        ));
    }

    #[test]
    fn error_display_carries_offset() {
        let err = parse_input("define({'a': 'unclosed});").expect_err("should fail");
        let message = err.to_string();
        assert!(message.contains("at byte 13"), "got: {message}");
    }
}
