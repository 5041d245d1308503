#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for language-neutral type descriptions.
//!
//! A [`NodeDocument`] is a flat list of [`NamedType`]s. Each named type wraps a
//! [`TypeNode`]: a tagged [`NodeKind`] plus optional documentation [`Annotations`].
//!
//! Two layers:
//! - **Model layer**: the types in this crate root, used by emitters and parsers
//! - **Serialization layer**: the core-types JSON format (see [`NodeDocument::from_json`])

mod json;
mod node;
pub mod utils;


pub use json::JsonError;
pub use node::{
    Additional, Annotations, ArrayType, EnumType, Literal, LiteralKind, NamedType, NodeDocument,
    NodeKind, ObjectType, Property, TupleType, TypeNode,
};

/// The only document version this crate reads and writes.
pub const DOCUMENT_VERSION: u32 = 1;
