//! Round-trip tests: merging with an empty translation map must
//! reproduce the input byte-for-byte.

mod common;

use common::identity;

// -----------------------------------------------------------
// Basic round-trip tests.
// -----------------------------------------------------------

#[test]
fn roundtrip_flat_bundle() {
    identity("define({\n\t'greeting': 'Hello'\n});\n");
}

#[test]
fn roundtrip_double_quoted() {
    identity("define({\n\t\"greeting\": \"Hello\"\n});\n");
}

#[test]
fn roundtrip_bare_keys() {
    identity("define({greeting: 'Hello', farewell: 'Bye'});\n");
}

#[test]
fn roundtrip_empty_table() {
    identity("define({});\n");
}

#[test]
fn roundtrip_no_trailing_newline() {
    identity("define({'a': 'x'})");
}

#[test]
fn roundtrip_trailing_comma() {
    identity("define({\n\t'a': 'x',\n});\n");
}

#[test]
fn roundtrip_duplicate_keys() {
    identity("define({'k': 'first', 'k': 'second'});\n");
}

#[test]
fn roundtrip_concatenated_value() {
    identity("define({'k': 'a' + 'b'\n\t\t+ 'c'});\n");
}

#[test]
fn roundtrip_escaped_content() {
    identity(r#"define({'k': 'line\nbreak \u00e9'});"#);
}

// -----------------------------------------------------------
// Formatting and trivia preservation.
// -----------------------------------------------------------

#[test]
fn roundtrip_leading_comment_preamble() {
    identity("//my/nls/colors.js contents:\ndefine({\n\t'a': 'x'\n});\n");
}

#[test]
fn roundtrip_block_comment_between_entries() {
    identity("define({\n\t'a': 'x', /* note */\n\t'b': 'y'\n});\n");
}

#[test]
fn roundtrip_comment_inside_table() {
    identity("define({\n\t// section one\n\t'a': 'x'\n});\n");
}

#[test]
fn roundtrip_irregular_whitespace() {
    identity("define( {  'a'   :'x' ,'b'\t:\t'y'  } ) ;\n");
}

#[test]
fn roundtrip_crlf_line_endings() {
    identity("define({\r\n\t'a': 'x'\r\n});\r\n");
}

#[test]
fn roundtrip_bom() {
    identity("\u{FEFF}define({'a': 'x'});\n");
}

#[test]
fn roundtrip_trailing_text_after_call() {
    identity("define({'a': 'x'});\n// end of file\n");
}

// -----------------------------------------------------------
// Sectioned bundles.
// -----------------------------------------------------------

#[test]
fn roundtrip_root_section_with_locale_flags() {
    identity(
        "define({\n\
         \t\"root\": {\n\
         \t\t\"msg.hello\": \"Hello\",\n\
         \t\t\"msg.bye\": \"Bye\"\n\
         \t},\n\
         \t\"fr\": true,\n\
         \t\"de\": true\n\
         });\n",
    );
}

#[test]
fn roundtrip_multiple_locale_sections() {
    identity(
        "define({\n\
         \t\"root\": {\"greeting\": \"Hello\"},\n\
         \t\"fr\": {\"greeting\": \"Bonjour\"}\n\
         });\n",
    );
}

#[test]
fn roundtrip_non_string_values_preserved() {
    identity("define({'a': 'x', 'flag': true, 'n': 42, 'b': 'y'});\n");
}

#[test]
fn roundtrip_multibyte_content() {
    identity("define({\n\t'greeting': 'こんにちは'\n});\n");
}
