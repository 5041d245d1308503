//! Projection of core-types nodes into TypeScript syntax.

use tracing::debug;

use core_types::{
    Additional, Annotations, EnumType, Literal, LiteralKind, NodeKind, ObjectType, TupleType,
    TypeNode,
};

use crate::annotations::to_comment;
use crate::syntax::{ElementKind, Keyword, TsElement, TsIndex, TsMember, TsProperty, TsType};
use crate::{Error, Result};

use super::Emitter;

/// Parameter name used in emitted index signatures.
const INDEX_KEY: &str = "key";

impl Emitter<'_, '_> {
    /// Project `node`. Its own annotations are the caller's concern.
    pub(super) fn project(&self, node: &TypeNode, path: &str) -> Result<TsType> {
        Ok(match &node.kind {
            NodeKind::String => TsType::Keyword(Keyword::String),
            NodeKind::Number => TsType::Keyword(Keyword::Number),
            NodeKind::Boolean => TsType::Keyword(Keyword::Boolean),
            NodeKind::Null => TsType::Keyword(Keyword::Null),
            NodeKind::Any => TsType::Keyword(self.top_type()),
            NodeKind::Object(object) => TsType::Object(self.project_object(object, path)?),
            NodeKind::Array(array) => TsType::Array(Box::new(
                self.project_nested(&array.element_type, &format!("{path}.elementType"))?,
            )),
            NodeKind::Tuple(tuple) => TsType::Tuple(self.project_tuple(tuple, path)?),
            NodeKind::Or(members) => self.project_union(members, path)?,
            NodeKind::And(members) => self.project_intersection(members, path)?,
            NodeKind::Ref(name) => TsType::Ref(self.resolver.identifier(name, path)?.to_string()),
            NodeKind::Enum(e) => project_enum(e, path)?,
            NodeKind::Const(value) => {
                check_literal(value, value.kind(), path)?;
                TsType::Literal(value.clone())
            }
        })
    }

    /// Project a node in a position that cannot carry a doc comment.
    fn project_nested(&self, node: &TypeNode, path: &str) -> Result<TsType> {
        if !node.annotations.is_empty() {
            debug!(path, "annotations at a nested position are not emitted");
        }
        self.project(node, path)
    }

    /// Project a union or intersection member, keeping its doc comment.
    fn project_member(&self, node: &TypeNode, path: &str) -> Result<TsType> {
        Ok(self.project(node, path)?.documented(member_doc(node)))
    }

    pub(super) fn project_object(&self, object: &ObjectType, path: &str) -> Result<Vec<TsMember>> {
        let mut members = Vec::with_capacity(object.properties.len() + 1);

        for (name, property) in &object.properties {
            let ty = self.project(&property.node, &format!("{path}.properties.{name}"))?;
            members.push(TsMember::Property(TsProperty {
                name: name.clone(),
                optional: !property.required,
                ty,
                doc: property.node.annotations.clone(),
            }));
        }

        let index = match &object.additional_properties {
            Additional::Closed => None,
            Additional::Open => Some(TsType::Keyword(self.top_type())),
            Additional::Typed(node) => {
                Some(self.project_nested(node, &format!("{path}.additionalProperties"))?)
            }
        };
        if let Some(ty) = index {
            members.push(TsMember::Index(TsIndex {
                key: INDEX_KEY.to_string(),
                ty,
                doc: Default::default(),
            }));
        }

        Ok(members)
    }

    fn project_tuple(&self, tuple: &TupleType, path: &str) -> Result<Vec<TsElement>> {
        let mut elements = tuple
            .element_types
            .iter()
            .enumerate()
            .map(|(i, node)| {
                let kind = if i < tuple.min_items {
                    ElementKind::Required
                } else {
                    ElementKind::Optional
                };
                let ty = self.project(node, &format!("{path}.elementTypes[{i}]"))?;
                Ok(TsElement::new(kind, ty).with_doc(member_doc(node)))
            })
            .collect::<Result<Vec<_>>>()?;

        let tail_path = format!("{path}.additionalItems");
        let tail = match &tuple.additional_items {
            Additional::Closed => None,
            Additional::Open => Some(TsType::Keyword(self.top_type())),
            Additional::Typed(node) => Some(self.project_nested(node, &tail_path)?),
        };

        let declared = tuple.element_types.len();
        if tuple.min_items > declared {
            // Required slots past the declared elements can only come from the tail.
            let Some(tail) = &tail else {
                return Err(Error::UnsupportedNode {
                    path: path.to_string(),
                    reason: format!(
                        "tuple requires {} items but declares {declared} and allows no additional items",
                        tuple.min_items
                    ),
                });
            };
            for _ in declared..tuple.min_items {
                elements.push(TsElement::new(ElementKind::Required, tail.clone()));
            }
        }

        if let Some(tail) = tail {
            elements.push(TsElement::new(ElementKind::Rest, tail));
        }
        Ok(elements)
    }

    fn project_union(&self, members: &[TypeNode], path: &str) -> Result<TsType> {
        if members.is_empty() {
            return Err(Error::UnsupportedNode {
                path: path.to_string(),
                reason: "union without members".to_string(),
            });
        }

        let mut projected = Vec::with_capacity(members.len());
        for (i, member) in members.iter().enumerate() {
            match self.project_member(member, &format!("{path}.or[{i}]"))? {
                TsType::Union(inner) => projected.extend(inner),
                ty => projected.push(ty),
            }
        }

        if let Some(literals) = self.flatten_string_union(members) {
            projected = literals;
        }

        Ok(collapse(projected, TsType::Union))
    }

    fn project_intersection(&self, members: &[TypeNode], path: &str) -> Result<TsType> {
        if members.is_empty() {
            return Err(Error::UnsupportedNode {
                path: path.to_string(),
                reason: "intersection without members".to_string(),
            });
        }

        let mut projected = Vec::with_capacity(members.len());
        for (i, member) in members.iter().enumerate() {
            match self.project_member(member, &format!("{path}.and[{i}]"))? {
                TsType::Intersection(inner) => projected.extend(inner),
                ty => projected.push(ty),
            }
        }
        Ok(collapse(projected, TsType::Intersection))
    }

    /// Merge a union of string literal sources into one flat literal union.
    ///
    /// Applies only when every member is a string `const`, a string `enum` or a `ref`
    /// to a declared string `const`, and none has a doc comment of its own. Values
    /// keep member order; repeats are dropped.
    fn flatten_string_union(&self, members: &[TypeNode]) -> Option<Vec<TsType>> {
        let mut values: Vec<&str> = Vec::new();
        for member in members {
            if !member_doc(member).is_empty() {
                return None;
            }
            match &member.kind {
                NodeKind::Const(Literal::String(value)) => values.push(value),
                NodeKind::Enum(EnumType {
                    base: LiteralKind::String,
                    values: enum_values,
                }) => {
                    for value in enum_values {
                        values.push(value.as_str()?);
                    }
                }
                NodeKind::Ref(name) => match &self.resolver.target(name)?.kind {
                    NodeKind::Const(Literal::String(value)) => values.push(value),
                    _ => return None,
                },
                _ => return None,
            }
        }

        let mut literals = Vec::with_capacity(values.len());
        for value in values {
            let literal = TsType::Literal(Literal::from(value));
            if !literals.contains(&literal) {
                literals.push(literal);
            }
        }
        Some(literals)
    }
}

/// Annotations of a union, intersection or tuple member that print as a comment.
fn member_doc(node: &TypeNode) -> Annotations {
    if to_comment(&node.annotations).is_some() {
        node.annotations.clone()
    } else {
        Annotations::default()
    }
}

/// A lone member stands for the whole union or intersection and has nowhere to put
/// its doc comment.
fn collapse(mut members: Vec<TsType>, wrap: fn(Vec<TsType>) -> TsType) -> TsType {
    if members.len() == 1 {
        return members.remove(0).undocumented();
    }
    wrap(members)
}

fn project_enum(e: &EnumType, path: &str) -> Result<TsType> {
    if e.values.is_empty() {
        return Err(Error::MalformedLiteral {
            path: path.to_string(),
            reason: "enum has no values".to_string(),
        });
    }

    let mut literals = Vec::with_capacity(e.values.len());
    for (i, value) in e.values.iter().enumerate() {
        check_literal(value, e.base, &format!("{path}.enum[{i}]"))?;
        literals.push(TsType::Literal(value.clone()));
    }
    Ok(collapse(literals, TsType::Union))
}

fn check_literal(value: &Literal, base: LiteralKind, path: &str) -> Result<()> {
    if value.kind() != base {
        return Err(Error::MalformedLiteral {
            path: path.to_string(),
            reason: format!("{} value in a {base} enum", value.kind()),
        });
    }
    match value {
        Literal::Number(n) if n.as_f64().is_some_and(|f| !f.is_finite()) => {
            Err(Error::MalformedLiteral {
                path: path.to_string(),
                reason: format!("{n} is not a finite number"),
            })
        }
        _ => Ok(()),
    }
}
