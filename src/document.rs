//! In-memory model of a parsed NLS bundle.
//!
//! A [`BundleDocument`] is an ordered list of sections and entries,
//! each carrying both its resolved string value and the exact source
//! spans needed to reproduce the original text verbatim. The document
//! borrows the source buffer it was parsed from; spans index into that
//! single buffer and nothing is copied during parsing except the
//! unescaped literal values themselves.

use crate::token::Span;

/// One quoted literal in a (possibly concatenated) value expression.
///
/// A logical value is an ordered sequence of fragments joined by `+`
/// in the source; the resolved value is the fragment contents
/// concatenated with no separators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringFragment {
    /// Unescaped literal content.
    pub value: String,
    /// Span of the literal including its quotes.
    pub span: Span,
}

/// A single `key : value` entry in a section.
///
/// Duplicate keys within one section each get their own `Entry` in
/// source order; only the semantic flattening step resolves duplicates
/// (last occurrence wins).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Unescaped key text.
    pub key: String,
    /// Span of the key token.
    pub key_span: Span,
    /// Value fragments in source order, never empty.
    pub fragments: Vec<StringFragment>,
    /// Span covering the full value expression, from the first
    /// fragment's opening quote to the last fragment's closing quote.
    pub value_span: Span,
    /// Span from the end of the value up to and including the
    /// separating comma, if any.
    pub trailing_span: Span,
}

impl Entry {
    /// Resolve the fragment sequence to the logical string value.
    #[must_use]
    pub fn resolved_value(&self) -> String {
        self.fragments
            .iter()
            .map(|f| f.value.as_str())
            .collect()
    }
}

/// A named key/value table: the `root` section of a localized bundle,
/// a sibling locale section, or the whole object of a flat bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// `"root"` or a locale identifier.
    pub name: String,
    /// Entries in source order, duplicates included.
    pub entries: Vec<Entry>,
    /// Span covering the section's object literal including braces.
    pub span: Span,
}

/// A parsed NLS bundle, borrowing the source text it was parsed from.
///
/// Constructed once per parse call, immutable afterwards. All spans
/// index into the single backing buffer returned by
/// [`BundleDocument::source`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleDocument<'a> {
    source: &'a str,
    /// Raw text before the registration call (leading comments etc.).
    pub preamble: Span,
    /// Call syntax from the opening parenthesis up to the argument
    /// object literal.
    pub wrapper_open: Span,
    /// Call syntax from the end of the argument object through the
    /// closing parenthesis.
    pub wrapper_close: Span,
    /// Sections in source order; a flat bundle has a single `root`
    /// section covering the whole argument object.
    pub sections: Vec<Section>,
    /// Raw text after the registration call.
    pub trailing: Span,
}

impl<'a> BundleDocument<'a> {
    pub(crate) const fn new(
        source: &'a str,
        preamble: Span,
        wrapper_open: Span,
        wrapper_close: Span,
        sections: Vec<Section>,
        trailing: Span,
    ) -> Self {
        Self {
            source,
            preamble,
            wrapper_open,
            wrapper_close,
            sections,
            trailing,
        }
    }

    /// The backing source buffer all spans index into.
    #[must_use]
    pub const fn source(&self) -> &'a str {
        self.source
    }

    /// Text before the registration call.
    #[must_use]
    pub fn preamble_text(&self) -> &'a str {
        self.preamble.text(self.source)
    }

    /// Text after the registration call.
    #[must_use]
    pub fn trailing_text(&self) -> &'a str {
        self.trailing.text(self.source)
    }

    /// The `root` section, if present (always present on documents
    /// produced by the parser).
    #[must_use]
    pub fn root(&self) -> Option<&Section> {
        self.sections
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case("root"))
    }
}
