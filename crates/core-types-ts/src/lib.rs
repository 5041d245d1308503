#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Conversion between core-types documents and TypeScript type declarations.
//!
//! Two entry points:
//! - [`convert_core_types_to_typescript`] emits a TypeScript module for a
//!   [`NodeDocument`]
//! - [`convert_typescript_to_core_types`] parses TypeScript declarations back into a
//!   [`NodeDocument`]
//!
//! Both directions share the [`syntax`] tree, so anything the emitter prints the
//! parser reads back:
//!
//! ```
//! use core_types::{NamedType, NodeDocument, ObjectType, TypeNode};
//! use core_types_ts::{EmitConfig, ParseConfig};
//!
//! let doc = NodeDocument::new(vec![NamedType::new(
//!     "User",
//!     TypeNode::object(ObjectType::new().property("name", TypeNode::string(), true)),
//! )]);
//!
//! let config = EmitConfig::new().no_descriptive_header(true);
//! let ts = core_types_ts::convert_core_types_to_typescript(&doc, &config).unwrap();
//! assert_eq!(ts.data, "export interface User {\n  name: string;\n}\n");
//!
//! let back = core_types_ts::convert_typescript_to_core_types(&ts.data, &ParseConfig::new()).unwrap();
//! assert_eq!(back.data, doc);
//! ```

pub mod annotations;
pub mod diagnostics;
pub mod emit;
pub mod parse;
pub mod resolve;
pub mod syntax;

#[cfg(test)]
mod lib_tests;
#[cfg(test)]
pub mod test_utils;

use std::ops::Range;

use core_types::NodeDocument;

pub use diagnostics::ErrorPrinter;
pub use emit::{EmitConfig, Emitted};
pub use parse::{NonExported, ParseConfig, Parsed};

/// Errors raised while converting in either direction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A `ref` names a type that is not declared in the document.
    #[error("unresolved reference `{name}` at {path}")]
    UnresolvedReference { name: String, path: String },

    /// A node or option combination has no TypeScript projection.
    #[error("unsupported node at {path}: {reason}")]
    UnsupportedNode { path: String, reason: String },

    /// Source text uses TypeScript outside the supported declaration subset.
    #[error("unsupported syntax at {line}:{column}: {construct}")]
    UnsupportedSyntax {
        construct: String,
        line: usize,
        column: usize,
        span: Range<usize>,
    },

    /// An `enum` or `const` value cannot be written as a literal type.
    #[error("malformed literal at {path}: {reason}")]
    MalformedLiteral { path: String, reason: String },

    /// Two named types share one name.
    #[error("duplicate type name `{name}`")]
    DuplicateTypeName { name: String },
}

impl Error {
    /// Source range for errors raised while parsing.
    pub fn span(&self) -> Option<Range<usize>> {
        match self {
            Error::UnsupportedSyntax { span, .. } => Some(span.clone()),
            _ => None,
        }
    }
}

/// Result type for conversions.
pub type Result<T> = std::result::Result<T, Error>;

/// Output of a conversion together with what it covered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionResult<T> {
    pub data: T,
    /// Names of the declarations that were converted, in output order.
    pub converted: Vec<String>,
    /// Names of declarations that were seen but left out.
    pub not_converted: Vec<String>,
}

/// Emit TypeScript declarations for every named type in `doc`.
pub fn convert_core_types_to_typescript(
    doc: &NodeDocument,
    config: &EmitConfig,
) -> Result<ConversionResult<String>> {
    let emitted = emit::emit(doc, config)?;
    Ok(ConversionResult {
        data: emitted.text,
        converted: emitted.declared,
        not_converted: Vec::new(),
    })
}

/// Parse TypeScript declarations into a core-types document.
pub fn convert_typescript_to_core_types(
    source: &str,
    config: &ParseConfig,
) -> Result<ConversionResult<NodeDocument>> {
    let parsed = parse::parse(source, config)?;
    Ok(ConversionResult {
        converted: parsed.document.names().map(str::to_string).collect(),
        not_converted: parsed.skipped,
        data: parsed.document,
    })
}
