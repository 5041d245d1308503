//! Name resolution for `ref` nodes.
//!
//! Built once per document. Every named type gets a TypeScript identifier: valid
//! names are kept, others are sanitized and deduplicated with a numeric suffix.

use std::collections::BTreeSet;

use indexmap::IndexMap;

use core_types::utils::{is_identifier, is_reserved_word, to_identifier};
use core_types::{NodeDocument, TypeNode};

use crate::{Error, Result};

#[derive(Debug)]
struct Entry<'d> {
    identifier: String,
    node: &'d TypeNode,
}

/// Maps document type names to their declarations and emitted identifiers.
#[derive(Debug)]
pub struct Resolver<'d> {
    entries: IndexMap<&'d str, Entry<'d>>,
}

impl<'d> Resolver<'d> {
    pub fn new(doc: &'d NodeDocument) -> Result<Self> {
        let mut nodes: IndexMap<&'d str, &'d TypeNode> = IndexMap::new();
        for named in &doc.types {
            if nodes.insert(named.name.as_str(), &named.node).is_some() {
                return Err(Error::DuplicateTypeName {
                    name: named.name.clone(),
                });
            }
        }

        // Names that are already usable keep their spelling, so reserve them first.
        let mut used_names = BTreeSet::new();
        for &name in nodes.keys() {
            if is_usable(name) {
                used_names.insert(name.to_string());
            }
        }

        let entries = nodes
            .into_iter()
            .map(|(name, node)| {
                let identifier = if is_usable(name) {
                    name.to_string()
                } else {
                    unique_name(&mut used_names, &to_identifier(name))
                };
                (name, Entry { identifier, node })
            })
            .collect();

        Ok(Self { entries })
    }

    /// Identifier for the type called `name`. `path` locates the referencing node.
    pub fn identifier(&self, name: &str, path: &str) -> Result<&str> {
        self.entries
            .get(name)
            .map(|e| e.identifier.as_str())
            .ok_or_else(|| Error::UnresolvedReference {
                name: name.to_string(),
                path: path.to_string(),
            })
    }

    /// Declaration of the type called `name`.
    pub fn target(&self, name: &str) -> Option<&'d TypeNode> {
        self.entries.get(name).map(|e| e.node)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn is_usable(name: &str) -> bool {
    is_identifier(name) && !is_reserved_word(name)
}

fn unique_name(used_names: &mut BTreeSet<String>, base: &str) -> String {
    if used_names.insert(base.to_string()) {
        return base.to_string();
    }

    let mut counter = 2;
    loop {
        let name = format!("{}{}", base, counter);
        if used_names.insert(name.clone()) {
            return name;
        }
        counter += 1;
    }
}
