#![allow(dead_code)]

use indexmap::IndexMap;
use nlsbundle_rs::{BundleDocument, merge, parse_str};

pub fn parse(input: &str) -> BundleDocument<'_> {
    parse_str(input).expect("parse failed")
}

/// Assert that merging with no translations reproduces the input
/// byte-for-byte.
pub fn identity(input: &str) {
    let doc = parse(input);
    let output = merge(&doc, &IndexMap::new());
    assert_eq!(
        output, input,
        "identity merge mismatch:\n--- expected ---\n{input}\n--- got ---\n{output}"
    );
}

pub fn translations(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}
