//! Core emitter struct and main emit logic.

use tracing::{debug, trace};

use core_types::{NodeDocument, NodeKind, TypeNode};

use crate::annotations::to_comment;
use crate::resolve::Resolver;
use crate::syntax::{DeclBody, Keyword, TsDecl};
use crate::{Error, Result};

use super::EmitConfig;
use super::render::{render_decl, render_type};

const PROJECT_URL: &str = "https://github.com/grantila/core-types-ts";

/// Emission output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emitted {
    pub text: String,
    /// Declared type identifiers, in output order.
    pub declared: Vec<String>,
}

/// TypeScript emitter for one document.
pub struct Emitter<'a, 'd> {
    pub(super) resolver: &'a Resolver<'d>,
    pub(super) config: &'a EmitConfig,
    /// Output buffer
    output: String,
    declared: Vec<String>,
}

/// Emit `doc` as TypeScript.
pub fn emit(doc: &NodeDocument, config: &EmitConfig) -> Result<Emitted> {
    debug!(
        types = doc.types.len(),
        declaration = config.declaration,
        use_unknown = config.use_unknown,
        "emitting typescript"
    );
    let resolver = Resolver::new(doc)?;
    Emitter::new(&resolver, config).emit(doc)
}

impl<'a, 'd> Emitter<'a, 'd> {
    pub fn new(resolver: &'a Resolver<'d>, config: &'a EmitConfig) -> Self {
        Self {
            resolver,
            config,
            output: String::new(),
            declared: Vec::new(),
        }
    }

    pub(super) fn top_type(&self) -> Keyword {
        if self.config.use_unknown {
            Keyword::Unknown
        } else {
            Keyword::Any
        }
    }

    /// Emit declarations for all named types of `doc`.
    pub fn emit(mut self, doc: &NodeDocument) -> Result<Emitted> {
        if !self.config.no_descriptive_header {
            self.emit_header();
        }

        if self.config.declaration {
            for named in &doc.types {
                self.emit_declaration(&named.name, &named.node)?;
            }
        } else {
            let [named] = doc.types.as_slice() else {
                return Err(Error::UnsupportedNode {
                    path: "<document>".to_string(),
                    reason: format!(
                        "non-declaration output needs exactly one type, found {}",
                        doc.types.len()
                    ),
                });
            };
            self.emit_expression(&named.name, &named.node)?;
        }

        // Ensure exactly one trailing newline
        self.output.truncate(self.output.trim_end().len());
        if !self.output.is_empty() {
            self.output.push('\n');
        }
        Ok(Emitted {
            text: self.output,
            declared: self.declared,
        })
    }

    fn emit_header(&mut self) {
        let on_behalf = self
            .config
            .user_package
            .as_ref()
            .map(|p| format!(" on behalf of {p}"))
            .unwrap_or_default();
        self.output.push_str(&format!(
            "// This file is generated by core-types-ts{on_behalf}, DO NOT EDIT.\n"
        ));
        self.output.push_str("// For more information, see:\n");
        if let Some(url) = &self.config.user_package_url {
            self.output.push_str(&format!("//  - {url}\n"));
        }
        self.output.push_str(&format!("//  - {PROJECT_URL}\n\n"));
    }

    fn emit_declaration(&mut self, name: &str, node: &TypeNode) -> Result<()> {
        let identifier = self.resolver.identifier(name, name)?.to_string();
        trace!(
            type_name = name,
            identifier = %identifier,
            kind = node.kind.name(),
            "declaration"
        );

        let body = match &node.kind {
            NodeKind::Object(object) => DeclBody::Interface(self.project_object(object, name)?),
            _ => DeclBody::Alias(self.project(node, name)?),
        };
        let decl = TsDecl {
            name: identifier.clone(),
            exported: true,
            doc: node.annotations.clone(),
            body,
            span: 0..0,
        };

        self.output.push_str(&render_decl(&decl));
        self.output.push('\n');
        self.declared.push(identifier);
        Ok(())
    }

    fn emit_expression(&mut self, name: &str, node: &TypeNode) -> Result<()> {
        let ty = self.project(node, name)?;
        if let Some(comment) = to_comment(&node.annotations) {
            self.output.push_str(&comment.render(""));
        }
        self.output.push_str(render_type(&ty, 0).trim_start_matches('\n'));
        self.output.push('\n');
        self.declared.push(name.to_string());
        Ok(())
    }
}
