//! JSON (de)serialization for core-types documents.
//!
//! core-types JSON tags nodes with a `type` field and keeps every other field
//! optional, so the raw layer is one wide struct. Conversion to the model
//! validates the combination of fields.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::node::{
    Additional, Annotations, EnumType, Literal, LiteralKind, NamedType, NodeDocument, NodeKind,
    ObjectType, Property, TupleType, TypeNode,
};

/// Error while reading a core-types document.
#[derive(Debug)]
pub enum JsonError {
    Json(serde_json::Error),
    Shape { path: String, message: String },
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Shape { path, message } => write!(f, "invalid node at {path}: {message}"),
        }
    }
}

impl std::error::Error for JsonError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(e) => Some(e),
            Self::Shape { .. } => None,
        }
    }
}

impl NodeDocument {
    /// Parse a document from core-types JSON.
    pub fn from_json(json: &str) -> Result<Self, JsonError> {
        let raw: RawDocument = serde_json::from_str(json).map_err(JsonError::Json)?;
        raw.try_into()
    }

    /// Serialize the document as pretty-printed core-types JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&RawDocument::from(self))
            .expect("raw documents have string keys only")
    }

    /// Serialize the document as single-line core-types JSON.
    pub fn to_json_compact(&self) -> String {
        serde_json::to_string(&RawDocument::from(self)).expect("raw documents have string keys only")
    }
}

#[derive(Debug, Deserialize, Serialize)]
struct RawDocument {
    #[serde(default = "default_version")]
    version: u32,
    #[serde(default)]
    types: Vec<RawNamedType>,
}

fn default_version() -> u32 {
    crate::DOCUMENT_VERSION
}

#[derive(Debug, Deserialize, Serialize)]
struct RawNamedType {
    name: String,
    #[serde(flatten)]
    node: RawNode,
}

/// Raw node matching the core-types JSON shape.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct RawNode {
    #[serde(rename = "type")]
    type_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    examples: Option<OneOrMany>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    see: Option<OneOrMany>,

    #[serde(default, rename = "enum", skip_serializing_if = "Option::is_none")]
    enum_values: Option<Vec<Value>>,
    #[serde(default, rename = "const", skip_serializing_if = "Option::is_none")]
    const_value: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    properties: Option<IndexMap<String, RawProperty>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    additional_properties: Option<RawAdditional>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    element_type: Option<Box<RawNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    element_types: Option<Vec<RawNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    min_items: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    additional_items: Option<RawAdditional>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    or: Option<Vec<RawNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    and: Option<Vec<RawNode>>,
    #[serde(default, rename = "ref", skip_serializing_if = "Option::is_none")]
    reference: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
struct RawProperty {
    #[serde(default)]
    required: bool,
    node: RawNode,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(untagged)]
enum RawAdditional {
    Flag(bool),
    Node(Box<RawNode>),
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    fn into_vec(self) -> Vec<String> {
        match self {
            OneOrMany::One(s) => vec![s],
            OneOrMany::Many(v) => v,
        }
    }
}

// ============================================================================
// Raw -> model
// ============================================================================

impl TryFrom<RawDocument> for NodeDocument {
    type Error = JsonError;

    fn try_from(raw: RawDocument) -> Result<Self, JsonError> {
        let types = raw
            .types
            .into_iter()
            .map(|named| {
                let node = convert_node(named.node, &named.name)?;
                Ok(NamedType::new(named.name, node))
            })
            .collect::<Result<Vec<_>, JsonError>>()?;
        Ok(NodeDocument {
            version: raw.version,
            types,
        })
    }
}

fn shape_error(path: &str, message: impl Into<String>) -> JsonError {
    JsonError::Shape {
        path: path.to_string(),
        message: message.into(),
    }
}

fn convert_annotations(raw: &mut RawNode) -> Annotations {
    Annotations {
        title: raw.title.take(),
        description: raw.description.take(),
        examples: raw.examples.take().map(OneOrMany::into_vec).unwrap_or_default(),
        default: raw.default.take().map(|v| match v {
            Value::String(s) => s,
            other => other.to_string(),
        }),
        see: raw.see.take().map(OneOrMany::into_vec).unwrap_or_default(),
    }
}

fn convert_node(mut raw: RawNode, path: &str) -> Result<TypeNode, JsonError> {
    let annotations = convert_annotations(&mut raw);

    let scalar = match raw.type_name.as_str() {
        "string" => Some((NodeKind::String, Some(LiteralKind::String))),
        "number" | "integer" => Some((NodeKind::Number, Some(LiteralKind::Number))),
        "boolean" => Some((NodeKind::Boolean, Some(LiteralKind::Boolean))),
        "null" => Some((NodeKind::Null, None)),
        "any" => Some((NodeKind::Any, None)),
        _ => None,
    };

    let kind = if let Some((plain, literal_kind)) = scalar {
        match (raw.enum_values.take(), raw.const_value.take(), literal_kind) {
            (Some(_), Some(_), _) => {
                return Err(shape_error(path, "node has both `enum` and `const`"));
            }
            (Some(values), None, Some(base)) => {
                let values = values
                    .into_iter()
                    .enumerate()
                    .map(|(i, v)| convert_literal(v, base, &format!("{path}.enum[{i}]")))
                    .collect::<Result<Vec<_>, _>>()?;
                NodeKind::Enum(EnumType { base, values })
            }
            (None, Some(value), Some(base)) => {
                NodeKind::Const(convert_literal(value, base, &format!("{path}.const"))?)
            }
            (Some(_), None, None) | (None, Some(_), None) => {
                return Err(shape_error(
                    path,
                    format!("`{}` nodes cannot carry `enum` or `const`", raw.type_name),
                ));
            }
            (None, None, _) => plain,
        }
    } else {
        match raw.type_name.as_str() {
            "object" => {
                let mut object = ObjectType::new();
                for (name, prop) in raw.properties.take().unwrap_or_default() {
                    let node = convert_node(prop.node, &format!("{path}.properties.{name}"))?;
                    object.properties.insert(
                        name,
                        Property {
                            required: prop.required,
                            node,
                        },
                    );
                }
                object.additional_properties = convert_additional(
                    raw.additional_properties.take(),
                    &format!("{path}.additionalProperties"),
                )?;
                NodeKind::Object(object)
            }
            "array" => {
                let Some(element) = raw.element_type.take() else {
                    return Err(shape_error(path, "array node without `elementType`"));
                };
                let element = convert_node(*element, &format!("{path}.elementType"))?;
                NodeKind::Array(crate::ArrayType {
                    element_type: Box::new(element),
                })
            }
            "tuple" => {
                let element_types = raw
                    .element_types
                    .take()
                    .unwrap_or_default()
                    .into_iter()
                    .enumerate()
                    .map(|(i, n)| convert_node(n, &format!("{path}.elementTypes[{i}]")))
                    .collect::<Result<Vec<_>, _>>()?;
                let additional_items = convert_additional(
                    raw.additional_items.take(),
                    &format!("{path}.additionalItems"),
                )?;
                NodeKind::Tuple(TupleType {
                    min_items: raw.min_items.unwrap_or(0),
                    element_types,
                    additional_items,
                })
            }
            "or" => NodeKind::Or(convert_members(raw.or.take(), path, "or")?),
            "and" => NodeKind::And(convert_members(raw.and.take(), path, "and")?),
            "ref" => {
                let Some(name) = raw.reference.take() else {
                    return Err(shape_error(path, "ref node without `ref`"));
                };
                NodeKind::Ref(name)
            }
            other => {
                return Err(shape_error(path, format!("unknown node type `{other}`")));
            }
        }
    };

    Ok(TypeNode { kind, annotations })
}

fn convert_members(
    members: Option<Vec<RawNode>>,
    path: &str,
    field: &str,
) -> Result<Vec<TypeNode>, JsonError> {
    let Some(members) = members else {
        return Err(shape_error(path, format!("{field} node without `{field}`")));
    };
    members
        .into_iter()
        .enumerate()
        .map(|(i, n)| convert_node(n, &format!("{path}.{field}[{i}]")))
        .collect()
}

fn convert_additional(raw: Option<RawAdditional>, path: &str) -> Result<Additional, JsonError> {
    Ok(match raw {
        None | Some(RawAdditional::Flag(false)) => Additional::Closed,
        Some(RawAdditional::Flag(true)) => Additional::Open,
        Some(RawAdditional::Node(node)) => Additional::Typed(Box::new(convert_node(*node, path)?)),
    })
}

fn convert_literal(value: Value, base: LiteralKind, path: &str) -> Result<Literal, JsonError> {
    let literal = match value {
        Value::String(s) => Literal::String(s),
        Value::Number(n) => Literal::Number(n),
        Value::Bool(b) => Literal::Boolean(b),
        other => {
            return Err(shape_error(path, format!("`{other}` is not a literal")));
        }
    };
    if literal.kind() != base {
        return Err(shape_error(
            path,
            format!("{} literal in a {base} node", literal.kind()),
        ));
    }
    Ok(literal)
}

// ============================================================================
// Model -> raw
// ============================================================================

impl From<&NodeDocument> for RawDocument {
    fn from(doc: &NodeDocument) -> Self {
        Self {
            version: doc.version,
            types: doc
                .types
                .iter()
                .map(|named| RawNamedType {
                    name: named.name.clone(),
                    node: RawNode::from(&named.node),
                })
                .collect(),
        }
    }
}

fn literal_value(literal: &Literal) -> Value {
    match literal {
        Literal::String(s) => Value::String(s.clone()),
        Literal::Number(n) => Value::Number(n.clone()),
        Literal::Boolean(b) => Value::Bool(*b),
    }
}

fn raw_additional(additional: &Additional) -> RawAdditional {
    match additional {
        Additional::Closed => RawAdditional::Flag(false),
        Additional::Open => RawAdditional::Flag(true),
        Additional::Typed(node) => RawAdditional::Node(Box::new(RawNode::from(node.as_ref()))),
    }
}

impl From<&TypeNode> for RawNode {
    fn from(node: &TypeNode) -> Self {
        let a = &node.annotations;
        let mut raw = RawNode {
            type_name: node.kind.name().to_string(),
            title: a.title.clone(),
            description: a.description.clone(),
            examples: (!a.examples.is_empty()).then(|| OneOrMany::Many(a.examples.clone())),
            default: a.default.clone().map(Value::String),
            see: (!a.see.is_empty()).then(|| OneOrMany::Many(a.see.clone())),
            ..RawNode::default()
        };

        match &node.kind {
            NodeKind::String
            | NodeKind::Number
            | NodeKind::Boolean
            | NodeKind::Null
            | NodeKind::Any => {}
            NodeKind::Object(object) => {
                raw.properties = Some(
                    object
                        .properties
                        .iter()
                        .map(|(name, prop)| {
                            (
                                name.clone(),
                                RawProperty {
                                    required: prop.required,
                                    node: RawNode::from(&prop.node),
                                },
                            )
                        })
                        .collect(),
                );
                raw.additional_properties = Some(raw_additional(&object.additional_properties));
            }
            NodeKind::Array(array) => {
                raw.element_type = Some(Box::new(RawNode::from(array.element_type.as_ref())));
            }
            NodeKind::Tuple(tuple) => {
                raw.element_types = Some(tuple.element_types.iter().map(RawNode::from).collect());
                raw.min_items = Some(tuple.min_items);
                raw.additional_items = Some(raw_additional(&tuple.additional_items));
            }
            NodeKind::Or(members) => raw.or = Some(members.iter().map(RawNode::from).collect()),
            NodeKind::And(members) => raw.and = Some(members.iter().map(RawNode::from).collect()),
            NodeKind::Ref(name) => raw.reference = Some(name.clone()),
            NodeKind::Enum(e) => {
                raw.type_name = e.base.as_str().to_string();
                raw.enum_values = Some(e.values.iter().map(literal_value).collect());
            }
            NodeKind::Const(value) => {
                raw.type_name = value.kind().as_str().to_string();
                raw.const_value = Some(literal_value(value));
            }
        }

        raw
    }
}
