//! Writer for brand-new flat bundles.
//!
//! Used by the pipeline when emitting a translated target-language
//! bundle from scratch rather than merging into an existing file.

use indexmap::IndexMap;

use crate::merge::escape_into;

/// Serialize a key/value mapping as a flat NLS bundle.
///
/// Entries are emitted in map order, double-quoted, one per line:
///
/// ```
/// let mut table = indexmap::IndexMap::new();
/// table.insert("bear 1".to_string(), "Brown Bear".to_string());
/// let out = nlsbundle_rs::compose(&table);
/// assert_eq!(out, "define({\n\"bear 1\": \"Brown Bear\"\n});\n");
/// ```
#[must_use]
pub fn compose(entries: &IndexMap<String, String>) -> String {
    let mut out = String::from("define({\n");
    for (i, (key, value)) in entries.iter().enumerate() {
        if i > 0 {
            out.push_str(",\n");
        }
        out.push('"');
        escape_into(&mut out, key, '"');
        out.push_str("\": \"");
        escape_into(&mut out, value, '"');
        out.push('"');
    }
    out.push_str("\n});\n");
    out
}
