//! Lowering of parsed TypeScript syntax into core-types nodes.

use core_types::{
    Additional, ArrayType, Literal, NamedType, NodeKind, ObjectType, Property, TupleType,
    TypeNode,
};

use crate::syntax::{DeclBody, ElementKind, Keyword, TsDecl, TsElement, TsMember, TsType};

pub(super) fn lower_decl(decl: TsDecl) -> NamedType {
    let node = match decl.body {
        DeclBody::Interface(members) => TypeNode::object(lower_members(members)),
        DeclBody::Alias(ty) => lower_type(ty),
    };
    NamedType::new(decl.name, node.with_annotations(decl.doc))
}

fn lower_type(ty: TsType) -> TypeNode {
    match ty {
        TsType::Keyword(keyword) => TypeNode::new(match keyword {
            Keyword::String => NodeKind::String,
            Keyword::Number => NodeKind::Number,
            Keyword::Boolean => NodeKind::Boolean,
            Keyword::Null => NodeKind::Null,
            Keyword::Any | Keyword::Unknown => NodeKind::Any,
        }),
        TsType::Literal(literal) => TypeNode::constant(literal),
        TsType::Ref(name) => TypeNode::reference(name),
        TsType::Array(element) => TypeNode::new(NodeKind::Array(ArrayType {
            element_type: Box::new(lower_type(*element)),
        })),
        TsType::Tuple(elements) => TypeNode::new(NodeKind::Tuple(lower_tuple(elements))),
        TsType::Object(members) => TypeNode::object(lower_members(members)),
        TsType::Union(members) => lower_union(members),
        TsType::Intersection(members) => {
            let mut flat = Vec::with_capacity(members.len());
            flatten(members, &mut flat, |ty| match ty {
                TsType::Intersection(inner) => Ok(inner),
                other => Err(other),
            });
            TypeNode::and(flat.into_iter().map(lower_type).collect())
        }
        TsType::Documented { doc, ty } => lower_type(*ty).with_annotations(doc),
    }
}

fn lower_union(members: Vec<TsType>) -> TypeNode {
    let mut flat = Vec::with_capacity(members.len());
    flatten(members, &mut flat, |ty| match ty {
        TsType::Union(inner) => Ok(inner),
        other => Err(other),
    });

    if let Some(values) = literal_values(&flat) {
        let base = values[0].kind();
        if values.iter().all(|v| v.kind() == base) {
            return TypeNode::enumeration(base, values);
        }
    }
    TypeNode::or(flat.into_iter().map(lower_type).collect())
}

/// Splice nested members of the same operator into `out`.
fn flatten(
    members: Vec<TsType>,
    out: &mut Vec<TsType>,
    split: fn(TsType) -> Result<Vec<TsType>, TsType>,
) {
    for member in members {
        match split(member) {
            Ok(inner) => flatten(inner, out, split),
            Err(member) => out.push(member),
        }
    }
}

/// Literal values of `members` when every member is a literal.
fn literal_values(members: &[TsType]) -> Option<Vec<Literal>> {
    if members.is_empty() {
        return None;
    }
    members
        .iter()
        .map(|m| match m {
            TsType::Literal(literal) => Some(literal.clone()),
            _ => None,
        })
        .collect()
}

fn lower_tuple(elements: Vec<TsElement>) -> TupleType {
    let mut tuple = TupleType::default();
    for element in elements {
        match element.kind {
            ElementKind::Required => {
                tuple.min_items += 1;
                tuple
                    .element_types
                    .push(lower_type(element.ty).with_annotations(element.doc));
            }
            ElementKind::Optional => tuple
                .element_types
                .push(lower_type(element.ty).with_annotations(element.doc)),
            ElementKind::Rest => tuple.additional_items = lower_additional(element.ty),
        }
    }
    tuple
}

fn lower_members(members: Vec<TsMember>) -> ObjectType {
    let mut object = ObjectType::new();
    for member in members {
        match member {
            TsMember::Property(property) => {
                let node = lower_type(property.ty).with_annotations(property.doc);
                object.properties.insert(
                    property.name,
                    Property {
                        required: !property.optional,
                        node,
                    },
                );
            }
            TsMember::Index(index) => {
                object.additional_properties = lower_additional(index.ty);
            }
        }
    }
    object
}

/// `any`/`unknown` mean anything goes; other types constrain the extra members.
fn lower_additional(ty: TsType) -> Additional {
    match ty {
        TsType::Keyword(keyword) if keyword.is_top() => Additional::Open,
        ty => Additional::Typed(Box::new(lower_type(ty))),
    }
}
