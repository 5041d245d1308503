//! TypeScript parsing into core-types documents.
//!
//! Pipeline:
//! - `lexer` tokenizes the source and attaches doc comments to the following token
//! - `parser` reads top-level declarations into the shared [`syntax`](crate::syntax) tree
//! - `lower` maps the tree onto core-types nodes
//!
//! Only the declaration subset the emitter produces is accepted, plus a few harmless
//! spellings (`declare`, `Array<T>`, quoted keys, `,` separators, single quotes).
//! Anything else fails with [`Error::UnsupportedSyntax`].

mod config;
mod lexer;
mod lower;
mod parser;


use std::collections::{HashMap, HashSet};
use std::ops::Range;

use tracing::{debug, trace};

use core_types::{NamedType, NodeDocument};

use crate::{Error, Result};

pub use config::{NonExported, ParseConfig};

/// Parse output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed {
    pub document: NodeDocument,
    /// Non-exported declarations left out of the document, in source order.
    pub skipped: Vec<String>,
}

/// Parse TypeScript declarations from `source`.
pub fn parse(source: &str, config: &ParseConfig) -> Result<Parsed> {
    let tokens = lexer::lex(source)?;
    debug!(tokens = tokens.len(), non_exported = ?config.non_exported, "parsing typescript");

    let decls = parser::Parser::new(source, tokens).parse_module()?;

    let mut seen = HashSet::new();
    for decl in &decls {
        if !seen.insert(decl.name.as_str()) {
            return Err(Error::DuplicateTypeName {
                name: decl.name.clone(),
            });
        }
    }

    if config.non_exported == NonExported::Fail {
        if let Some(decl) = decls.iter().find(|d| !d.exported) {
            return Err(unsupported(
                source,
                format!("non-exported declaration `{}`", decl.name),
                decl.span.clone(),
            ));
        }
    }

    let exported: Vec<bool> = decls.iter().map(|d| d.exported).collect();
    let types: Vec<NamedType> = decls.into_iter().map(lower::lower_decl).collect();
    for named in &types {
        trace!(type_name = named.name.as_str(), kind = named.node.kind.name(), "declaration");
    }

    let (types, skipped) = match config.non_exported {
        NonExported::IncludeIfReferenced => keep_referenced(types, &exported),
        NonExported::Include | NonExported::Fail => (types, Vec::new()),
    };

    Ok(Parsed {
        document: NodeDocument::new(types),
        skipped,
    })
}

/// Keep exported types and the non-exported ones reachable from them.
fn keep_referenced(types: Vec<NamedType>, exported: &[bool]) -> (Vec<NamedType>, Vec<String>) {
    let index: HashMap<&str, usize> = types
        .iter()
        .enumerate()
        .map(|(i, t)| (t.name.as_str(), i))
        .collect();

    let mut reachable = vec![false; types.len()];
    let mut stack: Vec<usize> = (0..types.len()).filter(|&i| exported[i]).collect();
    while let Some(i) = stack.pop() {
        if reachable[i] {
            continue;
        }
        reachable[i] = true;
        for name in types[i].node.references() {
            if let Some(&target) = index.get(name) {
                stack.push(target);
            }
        }
    }

    let mut kept = Vec::new();
    let mut skipped = Vec::new();
    for (named, reachable) in types.into_iter().zip(reachable) {
        if reachable {
            kept.push(named);
        } else {
            skipped.push(named.name);
        }
    }
    (kept, skipped)
}

/// Build an [`Error::UnsupportedSyntax`] located at `span` in `source`.
pub(crate) fn unsupported(source: &str, construct: impl Into<String>, span: Range<usize>) -> Error {
    let (line, column) = line_column(source, span.start);
    Error::UnsupportedSyntax {
        construct: construct.into(),
        line,
        column,
        span,
    }
}

/// One-based line and column (in characters) of a byte offset.
fn line_column(source: &str, offset: usize) -> (usize, usize) {
    let before = &source[..offset.min(source.len())];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}
