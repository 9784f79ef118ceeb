//! Merge engine: substitute translated values into the original
//! source text while preserving every other byte.
//!
//! Output is produced by copying the source span-by-span; only the
//! value spans of translated entries are rewritten, as freshly
//! serialized string literals. Comments, whitespace, key ordering,
//! wrapper boilerplate, and untouched entries are copied unchanged,
//! so merging with an empty translation map reproduces the input
//! byte-for-byte.

use indexmap::IndexMap;

use crate::document::BundleDocument;
use crate::token::Span;

/// Merge translated values into the original bundle text.
///
/// Keys present in `translations` but absent from the document are
/// silently ignored; translation sets routinely lag behind source
/// changes and an unknown key is not an error. When a key is
/// duplicated within a section, only the last occurrence is replaced
/// and earlier occurrences are copied unchanged, matching the
/// last-wins semantics of [`crate::flatten`].
#[must_use]
pub fn merge(doc: &BundleDocument<'_>, translations: &IndexMap<String, String>) -> String {
    let source = doc.source();

    // Resolve which value spans get rewritten: per section, the last
    // occurrence of each translated key.
    let mut replacements: Vec<(Span, &str)> = Vec::new();
    for section in &doc.sections {
        let mut last: IndexMap<&str, Span> = IndexMap::new();
        for entry in &section.entries {
            if translations.contains_key(&entry.key) {
                last.insert(entry.key.as_str(), entry.value_span);
            }
        }
        for (key, span) in last {
            if let Some(value) = translations.get(key) {
                replacements.push((span, value));
            }
        }
    }
    replacements.sort_unstable_by_key(|(span, _)| span.start);

    let mut out = String::with_capacity(source.len());
    let mut cursor = 0;
    for (span, value) in replacements {
        out.push_str(&source[cursor..span.start]);
        out.push_str(&serialize_literal(value));
        cursor = span.end;
    }
    out.push_str(&source[cursor..]);
    out
}

/// Serialize a translated value as a minimal single-quoted literal.
#[must_use]
pub fn serialize_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    escape_into(&mut out, value, '\'');
    out.push('\'');
    out
}

/// Escape `value` into `out` for embedding in a literal quoted with
/// `quote`. Backslashes, the quote character, and control characters
/// are escaped; everything else passes through untouched.
pub(crate) fn escape_into(out: &mut String, value: &str, quote: char) {
    use std::fmt::Write as _;

    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if (c as u32) < 0x20 => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
}
