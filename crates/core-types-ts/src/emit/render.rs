//! Output rendering for TypeScript syntax.

use core_types::Literal;
use core_types::utils::is_identifier;

use crate::annotations::to_comment;
use crate::syntax::{DeclBody, ElementKind, TsDecl, TsElement, TsMember, TsType};

const INDENT: &str = "  ";

/// Render a declaration with its doc comment. The result ends with a newline.
pub(crate) fn render_decl(decl: &TsDecl) -> String {
    let mut out = String::new();
    if let Some(comment) = to_comment(&decl.doc) {
        out.push_str(&comment.render(""));
    }
    if decl.exported {
        out.push_str("export ");
    }
    match &decl.body {
        DeclBody::Interface(members) => {
            out.push_str(&format!(
                "interface {} {}\n",
                decl.name,
                render_members(members, 0)
            ));
        }
        DeclBody::Alias(ty) => {
            out.push_str(&format!("type {} ={};\n", decl.name, spaced(render_type(ty, 0))));
        }
    }
    out
}

/// Render a type expression. `depth` is the indentation level of the line it starts on.
///
/// A union or intersection with documented members puts one member per line, each
/// after its comment. The result then starts with a newline.
pub(crate) fn render_type(ty: &TsType, depth: usize) -> String {
    match ty {
        TsType::Keyword(keyword) => keyword.as_str().to_string(),
        TsType::Literal(literal) => render_literal(literal),
        TsType::Ref(name) => name.clone(),
        TsType::Array(inner) => format!("{}[]", wrap_if_compound(inner, depth)),
        TsType::Tuple(elements) => render_tuple(elements, depth),
        TsType::Object(members) => render_members(members, depth),
        TsType::Union(members) => render_operands(members, "|", depth),
        TsType::Intersection(members) => render_operands(members, "&", depth),
        // The comment belongs to the enclosing operand list.
        TsType::Documented { ty, .. } => render_type(ty, depth),
    }
}

fn render_operands(members: &[TsType], op: &str, depth: usize) -> String {
    let multi_line = members
        .iter()
        .any(|member| matches!(member, TsType::Documented { .. }));
    let inner_depth = if multi_line { depth + 1 } else { depth };

    let operands = members.iter().map(|member| {
        let ty = match member {
            TsType::Documented { ty, .. } => ty.as_ref(),
            ty => ty,
        };
        let text = render_type(ty, inner_depth);
        let nested = match ty {
            TsType::Union(_) => true,
            TsType::Intersection(_) => op == "&",
            _ => false,
        };
        if nested || text.starts_with('\n') {
            format!("({text})")
        } else {
            text
        }
    });

    if !multi_line {
        return operands.collect::<Vec<_>>().join(&format!(" {op} "));
    }

    let pad = INDENT.repeat(depth + 1);
    let mut out = String::new();
    for (member, operand) in members.iter().zip(operands) {
        out.push('\n');
        if let TsType::Documented { doc, .. } = member {
            if let Some(comment) = to_comment(doc) {
                out.push_str(&comment.render(&pad));
            }
        }
        out.push_str(&format!("{pad}{op} {operand}"));
    }
    out
}

fn render_tuple(elements: &[TsElement], depth: usize) -> String {
    let comments: Vec<_> = elements.iter().map(|e| to_comment(&e.doc)).collect();
    let multi_line = comments.iter().any(Option::is_some);
    let inner_depth = if multi_line { depth + 1 } else { depth };

    let rendered = elements.iter().map(|element| match element.kind {
        ElementKind::Required => {
            let text = render_type(&element.ty, inner_depth);
            if text.starts_with('\n') {
                format!("({text})")
            } else {
                text
            }
        }
        ElementKind::Optional => format!("{}?", wrap_if_compound(&element.ty, inner_depth)),
        ElementKind::Rest => format!("...{}[]", wrap_if_compound(&element.ty, inner_depth)),
    });

    if !multi_line {
        return format!("[{}]", rendered.collect::<Vec<_>>().join(", "));
    }

    let pad = INDENT.repeat(depth + 1);
    let mut out = String::from("[");
    for (comment, element) in comments.iter().zip(rendered) {
        out.push('\n');
        if let Some(comment) = comment {
            out.push_str(&comment.render(&pad));
        }
        out.push_str(&format!("{pad}{element},"));
    }
    out.push('\n');
    out.push_str(&INDENT.repeat(depth));
    out.push(']');
    out
}

fn wrap_if_compound(ty: &TsType, depth: usize) -> String {
    match ty {
        TsType::Union(_) | TsType::Intersection(_) => format!("({})", render_type(ty, depth)),
        _ => render_type(ty, depth),
    }
}

/// Separate a rendered type from the `=` or `:` before it.
fn spaced(rendered: String) -> String {
    if rendered.starts_with('\n') {
        rendered
    } else {
        format!(" {rendered}")
    }
}

fn render_members(members: &[TsMember], depth: usize) -> String {
    if members.is_empty() {
        return "{}".to_string();
    }

    let pad = INDENT.repeat(depth + 1);
    let mut out = String::from("{\n");
    for member in members {
        match member {
            TsMember::Property(property) => {
                if let Some(comment) = to_comment(&property.doc) {
                    out.push_str(&comment.render(&pad));
                }
                let optional = if property.optional { "?" } else { "" };
                out.push_str(&format!(
                    "{pad}{}{optional}:{};\n",
                    render_property_name(&property.name),
                    spaced(render_type(&property.ty, depth + 1))
                ));
            }
            TsMember::Index(index) => {
                if let Some(comment) = to_comment(&index.doc) {
                    out.push_str(&comment.render(&pad));
                }
                out.push_str(&format!(
                    "{pad}[{}: string]:{};\n",
                    index.key,
                    spaced(render_type(&index.ty, depth + 1))
                ));
            }
        }
    }
    out.push_str(&INDENT.repeat(depth));
    out.push('}');
    out
}

fn render_property_name(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        quote(name)
    }
}

fn render_literal(literal: &Literal) -> String {
    match literal {
        Literal::String(s) => quote(s),
        Literal::Number(n) => n.to_string(),
        Literal::Boolean(b) => b.to_string(),
    }
}

fn quote(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}
