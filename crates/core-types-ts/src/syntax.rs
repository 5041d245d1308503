//! TypeScript type syntax shared by the emitter and the parser.
//!
//! The emitter projects core-types nodes into this tree and prints it. The parser
//! reads source text into the same tree and lowers it. Only the shapes both sides
//! understand are representable.

use std::ops::Range;

use core_types::{Annotations, Literal};

/// Built-in type keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    String,
    Number,
    Boolean,
    Null,
    Any,
    Unknown,
}

impl Keyword {
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::String => "string",
            Keyword::Number => "number",
            Keyword::Boolean => "boolean",
            Keyword::Null => "null",
            Keyword::Any => "any",
            Keyword::Unknown => "unknown",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "string" => Keyword::String,
            "number" => Keyword::Number,
            "boolean" => Keyword::Boolean,
            "null" => Keyword::Null,
            "any" => Keyword::Any,
            "unknown" => Keyword::Unknown,
            _ => return None,
        })
    }

    pub fn is_top(self) -> bool {
        matches!(self, Keyword::Any | Keyword::Unknown)
    }
}

/// A type expression.
#[derive(Debug, Clone, PartialEq)]
pub enum TsType {
    Keyword(Keyword),
    Literal(Literal),
    /// Reference to a declared type by identifier.
    Ref(String),
    /// `T[]`
    Array(Box<TsType>),
    Tuple(Vec<TsElement>),
    /// Type literal `{ ... }`.
    Object(Vec<TsMember>),
    Union(Vec<TsType>),
    Intersection(Vec<TsType>),
    /// A union or intersection member with its own doc comment.
    Documented { doc: Annotations, ty: Box<TsType> },
}

impl TsType {
    /// Attach `doc` unless it is empty.
    pub fn documented(self, doc: Annotations) -> Self {
        if doc.is_empty() {
            return self;
        }
        TsType::Documented {
            doc,
            ty: Box::new(self),
        }
    }

    /// Drop a member doc comment, if any.
    pub fn undocumented(self) -> Self {
        match self {
            TsType::Documented { ty, .. } => *ty,
            ty => ty,
        }
    }
}

/// How a tuple element participates in the tuple length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Required,
    /// `T?`
    Optional,
    /// `...T[]`
    Rest,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TsElement {
    pub kind: ElementKind,
    /// Element type. For rest elements this is the item type, not the array.
    pub ty: TsType,
    pub doc: Annotations,
}

impl TsElement {
    pub fn new(kind: ElementKind, ty: TsType) -> Self {
        Self {
            kind,
            ty,
            doc: Annotations::default(),
        }
    }

    pub fn with_doc(mut self, doc: Annotations) -> Self {
        self.doc = doc;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TsMember {
    Property(TsProperty),
    /// `[key: string]: T`
    Index(TsIndex),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TsProperty {
    pub name: String,
    pub optional: bool,
    pub ty: TsType,
    pub doc: Annotations,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TsIndex {
    pub key: String,
    pub ty: TsType,
    pub doc: Annotations,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeclBody {
    /// `interface Name { ... }`
    Interface(Vec<TsMember>),
    /// `type Name = T;`
    Alias(TsType),
}

/// One top-level declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct TsDecl {
    pub name: String,
    pub exported: bool,
    pub doc: Annotations,
    pub body: DeclBody,
    /// Source range of the declaration name. Empty for emitted declarations.
    pub span: Range<usize>,
}
