//! TypeScript emission from core-types documents.
//!
//! Each named type is projected into the shared [`syntax`](crate::syntax) tree and
//! printed:
//! - object nodes become `export interface Name { ... }`
//! - everything else becomes `export type Name = ...;`
//!
//! Unions made only of string literals (string consts, string enums and refs to
//! string consts) are flattened into one literal union.

mod config;
mod emitter;
mod project;
mod render;

#[cfg(test)]
mod emit_tests;

pub use config::EmitConfig;
pub use emitter::{Emitted, Emitter, emit};
