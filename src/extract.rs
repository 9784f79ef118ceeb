//! Flattening of a parsed bundle into a key/value mapping for the
//! translation-lookup collaborators.

use indexmap::IndexMap;

use crate::document::{BundleDocument, Section};

/// Flatten a document to an ordered `key -> resolved value` mapping.
///
/// Entries are visited in source order across all sections; inserting
/// a key that already exists overwrites the previous value, so a
/// duplicated key resolves to its last occurrence. This mirrors the
/// module runtime's own object-literal semantics where later
/// definitions shadow earlier ones.
#[must_use]
pub fn flatten(doc: &BundleDocument<'_>) -> IndexMap<String, String> {
    let mut map = IndexMap::new();
    for section in &doc.sections {
        flatten_into(&mut map, section);
    }
    map
}

/// Flatten a single section by name (ASCII case-insensitive), or
/// `None` if the document has no such section.
#[must_use]
pub fn flatten_section(doc: &BundleDocument<'_>, name: &str) -> Option<IndexMap<String, String>> {
    let section = doc
        .sections
        .iter()
        .find(|s| s.name.eq_ignore_ascii_case(name))?;
    let mut map = IndexMap::new();
    flatten_into(&mut map, section);
    Some(map)
}

fn flatten_into(map: &mut IndexMap<String, String>, section: &Section) {
    for entry in &section.entries {
        map.insert(entry.key.clone(), entry.resolved_value());
    }
}
