//! Test utilities and snapshot macros.

use core_types::{NamedType, NodeDocument, TypeNode};

use crate::{EmitConfig, ParseConfig};

/// Snapshot the emitted form of a TypeScript source after a parse/emit cycle.
#[macro_export]
macro_rules! shot_ts {
    ($source:literal, @$snapshot:literal) => {{
        let source = indoc::indoc!($source);
        let output = $crate::test_utils::reemit(source);
        insta::assert_snapshot!(output, @$snapshot);
    }};
}

/// Wrap named types into a document.
pub fn document(types: Vec<(&str, TypeNode)>) -> NodeDocument {
    NodeDocument::new(
        types
            .into_iter()
            .map(|(name, node)| NamedType::new(name, node))
            .collect(),
    )
}

/// Emit without the generated-file banner.
pub fn emit_plain(doc: &NodeDocument) -> String {
    let config = EmitConfig::new().no_descriptive_header(true);
    crate::convert_core_types_to_typescript(doc, &config)
        .expect("document should emit")
        .data
}

/// Parse with default options.
pub fn parse_plain(source: &str) -> NodeDocument {
    crate::convert_typescript_to_core_types(source, &ParseConfig::new())
        .expect("source should parse")
        .data
}

/// Parse `source` and emit it again without the banner.
pub fn reemit(source: &str) -> String {
    emit_plain(&parse_plain(source))
}

/// Assert that emitting, parsing and emitting again reproduces the first emission.
pub fn assert_round_trip(doc: &NodeDocument) -> String {
    let first = emit_plain(doc);
    let second = reemit(&first);
    assert_eq!(first, second, "round trip changed the output");
    first
}
