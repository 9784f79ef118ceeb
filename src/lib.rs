//! AMD i18n NLS bundle lexer, parser, extractor, and merge engine.
//!
//! Parses module-registration files carrying a nested key/value string
//! table, extracts the translatable entries as a flat ordered mapping,
//! and merges new translations back into a copy of the original file
//! while preserving comments, whitespace, key ordering, and every
//! untouched entry byte-for-byte.
//!
//! # Quick start
//!
//! ## Extract and merge
//!
//! ```
//! use nlsbundle_rs::{flatten, merge, parse_str};
//!
//! let source = "define({\n\t'greeting': 'Hello'\n});\n";
//! let doc = parse_str(source).unwrap();
//!
//! let table = flatten(&doc);
//! assert_eq!(table["greeting"], "Hello");
//!
//! let mut translations = indexmap::IndexMap::new();
//! translations.insert("greeting".to_string(), "Bonjour".to_string());
//! let merged = merge(&doc, &translations);
//! assert_eq!(merged, "define({\n\t'greeting': 'Bonjour'\n});\n");
//!
//! // Merging nothing reproduces the input exactly.
//! assert_eq!(merge(&doc, &indexmap::IndexMap::new()), source);
//! ```
//!
//! ## Write a fresh bundle
//!
//! ```
//! let mut table = indexmap::IndexMap::new();
//! table.insert("greeting".to_string(), "Bonjour".to_string());
//! let out = nlsbundle_rs::compose(&table);
//! assert!(out.contains("\"greeting\": \"Bonjour\""));
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod compose;
pub mod document;
pub mod extract;
pub mod lexer;
pub mod merge;
pub mod parser;
pub mod token;

pub use compose::compose;
pub use document::{BundleDocument, Entry, Section, StringFragment};
pub use extract::{flatten, flatten_section};
pub use lexer::tokenize;
pub use merge::{merge, serialize_literal};
pub use parser::{MalformedKind, ParseError, ParseErrorKind, parse};
pub use token::{InvalidReason, Span, Token, TokenKind};

/// Tokenize and parse an NLS bundle source string in one step.
///
/// The returned document borrows `input` as its backing buffer.
pub fn parse_str(input: &str) -> Result<BundleDocument<'_>, ParseError> {
    let tokens = tokenize(input);
    parse(input, &tokens)
}
