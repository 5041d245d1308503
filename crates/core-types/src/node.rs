//! The type algebra.
//!
//! # Design Decisions
//!
//! ## Enum and Const
//!
//! The JSON format expresses enumerations and constants as properties of a scalar
//! node (`{ "type": "string", "enum": [...] }`). The model lifts them into their own
//! variants so consumers match on them directly. `EnumType::base` remembers which
//! scalar the values belong to.
//!
//! ## Additional Members
//!
//! Objects and tuples share [`Additional`] for their open tail: `Closed` (no extra
//! members), `Open` (extra members of any type) or `Typed` (extra members of one type).
//! Closed is the default.

use std::fmt;

use indexmap::IndexMap;

use crate::DOCUMENT_VERSION;

/// Documentation attached to a node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotations {
    pub title: Option<String>,
    pub description: Option<String>,
    pub examples: Vec<String>,
    pub default: Option<String>,
    pub see: Vec<String>,
}

impl Annotations {
    /// True when no annotation field is set.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.examples.is_empty()
            && self.default.is_none()
            && self.see.is_empty()
    }
}

/// A literal value usable in `enum` and `const` nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    String(String),
    Number(serde_json::Number),
    Boolean(bool),
}

impl Literal {
    pub fn kind(&self) -> LiteralKind {
        match self {
            Literal::String(_) => LiteralKind::String,
            Literal::Number(_) => LiteralKind::Number,
            Literal::Boolean(_) => LiteralKind::Boolean,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Literal::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::String(value.to_string())
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::Boolean(value)
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Literal::Number(value.into())
    }
}

/// The scalar type a literal belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    String,
    Number,
    Boolean,
}

impl LiteralKind {
    pub fn as_str(self) -> &'static str {
        match self {
            LiteralKind::String => "string",
            LiteralKind::Number => "number",
            LiteralKind::Boolean => "boolean",
        }
    }
}

impl fmt::Display for LiteralKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extra object members or tuple items beyond the declared ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Additional {
    #[default]
    Closed,
    Open,
    Typed(Box<TypeNode>),
}

impl Additional {
    pub fn is_closed(&self) -> bool {
        matches!(self, Additional::Closed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub required: bool,
    pub node: TypeNode,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectType {
    pub properties: IndexMap<String, Property>,
    pub additional_properties: Additional,
}

impl ObjectType {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a property. A repeated name replaces the earlier node in place.
    pub fn property(mut self, name: impl Into<String>, node: TypeNode, required: bool) -> Self {
        self.properties
            .insert(name.into(), Property { required, node });
        self
    }

    pub fn additional(mut self, additional: Additional) -> Self {
        self.additional_properties = additional;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TupleType {
    pub element_types: Vec<TypeNode>,
    /// Elements before this index are required, the rest optional.
    pub min_items: usize,
    pub additional_items: Additional,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayType {
    pub element_type: Box<TypeNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumType {
    pub base: LiteralKind,
    pub values: Vec<Literal>,
}

/// Kind of a type node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    String,
    Number,
    Boolean,
    Null,
    /// Unconstrained top type.
    Any,
    Object(ObjectType),
    Array(ArrayType),
    Tuple(TupleType),
    Or(Vec<TypeNode>),
    And(Vec<TypeNode>),
    Ref(String),
    Enum(EnumType),
    Const(Literal),
}

impl NodeKind {
    /// Name of the kind as used in the JSON `type` tag.
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::String => "string",
            NodeKind::Number => "number",
            NodeKind::Boolean => "boolean",
            NodeKind::Null => "null",
            NodeKind::Any => "any",
            NodeKind::Object(_) => "object",
            NodeKind::Array(_) => "array",
            NodeKind::Tuple(_) => "tuple",
            NodeKind::Or(_) => "or",
            NodeKind::And(_) => "and",
            NodeKind::Ref(_) => "ref",
            NodeKind::Enum(_) => "enum",
            NodeKind::Const(_) => "const",
        }
    }
}

/// One type expression with its annotations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeNode {
    pub kind: NodeKind,
    pub annotations: Annotations,
}

impl From<NodeKind> for TypeNode {
    fn from(kind: NodeKind) -> Self {
        Self {
            kind,
            annotations: Annotations::default(),
        }
    }
}

impl TypeNode {
    pub fn new(kind: NodeKind) -> Self {
        kind.into()
    }

    pub fn string() -> Self {
        NodeKind::String.into()
    }

    pub fn number() -> Self {
        NodeKind::Number.into()
    }

    pub fn boolean() -> Self {
        NodeKind::Boolean.into()
    }

    pub fn null() -> Self {
        NodeKind::Null.into()
    }

    pub fn any() -> Self {
        NodeKind::Any.into()
    }

    pub fn object(object: ObjectType) -> Self {
        NodeKind::Object(object).into()
    }

    pub fn array(element: TypeNode) -> Self {
        NodeKind::Array(ArrayType {
            element_type: Box::new(element),
        })
        .into()
    }

    pub fn tuple(element_types: Vec<TypeNode>, min_items: usize, additional: Additional) -> Self {
        NodeKind::Tuple(TupleType {
            element_types,
            min_items,
            additional_items: additional,
        })
        .into()
    }

    pub fn or(members: Vec<TypeNode>) -> Self {
        NodeKind::Or(members).into()
    }

    pub fn and(members: Vec<TypeNode>) -> Self {
        NodeKind::And(members).into()
    }

    pub fn reference(name: impl Into<String>) -> Self {
        NodeKind::Ref(name.into()).into()
    }

    pub fn enumeration(base: LiteralKind, values: Vec<Literal>) -> Self {
        NodeKind::Enum(EnumType { base, values }).into()
    }

    pub fn constant(value: impl Into<Literal>) -> Self {
        NodeKind::Const(value.into()).into()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.annotations.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.annotations.description = Some(description.into());
        self
    }

    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.annotations.examples.push(example.into());
        self
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.annotations.default = Some(default.into());
        self
    }

    pub fn with_see(mut self, see: impl Into<String>) -> Self {
        self.annotations.see.push(see.into());
        self
    }

    pub fn with_annotations(mut self, annotations: Annotations) -> Self {
        self.annotations = annotations;
        self
    }

    /// Names referenced anywhere below this node, in first-visit order.
    pub fn references(&self) -> Vec<&str> {
        let mut out = Vec::new();
        collect_references(self, &mut out);
        out
    }
}

fn collect_references<'a>(node: &'a TypeNode, out: &mut Vec<&'a str>) {
    match &node.kind {
        NodeKind::String
        | NodeKind::Number
        | NodeKind::Boolean
        | NodeKind::Null
        | NodeKind::Any
        | NodeKind::Enum(_)
        | NodeKind::Const(_) => {}
        NodeKind::Ref(name) => {
            if !out.contains(&name.as_str()) {
                out.push(name);
            }
        }
        NodeKind::Object(object) => {
            for property in object.properties.values() {
                collect_references(&property.node, out);
            }
            collect_additional_references(&object.additional_properties, out);
        }
        NodeKind::Array(array) => collect_references(&array.element_type, out),
        NodeKind::Tuple(tuple) => {
            for element in &tuple.element_types {
                collect_references(element, out);
            }
            collect_additional_references(&tuple.additional_items, out);
        }
        NodeKind::Or(members) | NodeKind::And(members) => {
            for member in members {
                collect_references(member, out);
            }
        }
    }
}

fn collect_additional_references<'a>(additional: &'a Additional, out: &mut Vec<&'a str>) {
    if let Additional::Typed(inner) = additional {
        collect_references(inner, out);
    }
}

/// A type node with a document-unique name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedType {
    pub name: String,
    pub node: TypeNode,
}

impl NamedType {
    pub fn new(name: impl Into<String>, node: TypeNode) -> Self {
        Self {
            name: name.into(),
            node,
        }
    }
}

/// A versioned collection of named types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeDocument {
    pub version: u32,
    pub types: Vec<NamedType>,
}

impl Default for NodeDocument {
    fn default() -> Self {
        Self {
            version: DOCUMENT_VERSION,
            types: Vec::new(),
        }
    }
}

impl NodeDocument {
    pub fn new(types: Vec<NamedType>) -> Self {
        Self {
            version: DOCUMENT_VERSION,
            types,
        }
    }

    pub fn get(&self, name: &str) -> Option<&NamedType> {
        self.types.iter().find(|t| t.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.iter().map(|t| t.name.as_str())
    }
}
