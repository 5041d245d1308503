//! Recursive-descent parser for top-level type declarations.

use std::ops::Range;

use core_types::{Annotations, Literal};

use crate::annotations::from_comment;
use crate::syntax::{
    DeclBody, ElementKind, Keyword, TsDecl, TsElement, TsIndex, TsMember, TsProperty, TsType,
};
use crate::{Error, Result};

use super::lexer::{Lexeme, Token, unquote};
use super::unsupported;

/// Top-level statements that start with a keyword we recognize but do not support.
const UNSUPPORTED_STATEMENTS: &[&str] = &[
    "abstract",
    "async",
    "class",
    "const",
    "default",
    "enum",
    "function",
    "import",
    "let",
    "module",
    "namespace",
    "var",
];

/// Type keywords outside the core-types algebra.
pub(super) const UNSUPPORTED_TYPES: &[&str] = &[
    "bigint", "never", "object", "symbol", "undefined", "void",
];

/// Type operators that have no core-types counterpart.
pub(super) const UNSUPPORTED_OPERATORS: &[&str] = &[
    "asserts", "infer", "keyof", "new", "readonly", "typeof", "unique",
];

pub(super) struct Parser<'src> {
    input: &'src str,
    tokens: Vec<Lexeme<'src>>,
    pos: usize,
}

impl<'src> Parser<'src> {
    pub(super) fn new(input: &'src str, tokens: Vec<Lexeme<'src>>) -> Self {
        Self {
            input,
            tokens,
            pos: 0,
        }
    }

    fn peek(&self) -> Option<Token<'src>> {
        self.peek_nth(0)
    }

    fn peek_nth(&self, n: usize) -> Option<Token<'src>> {
        self.tokens.get(self.pos + n).map(|l| l.token)
    }

    fn advance(&mut self) -> Option<Token<'src>> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn current_span(&self) -> Range<usize> {
        self.tokens
            .get(self.pos)
            .map(|l| l.span.clone())
            .unwrap_or(self.input.len()..self.input.len())
    }

    fn current_doc(&self) -> Option<&'src str> {
        self.tokens.get(self.pos).and_then(|l| l.doc)
    }

    fn error(&self, construct: impl Into<String>) -> Error {
        unsupported(self.input, construct, self.current_span())
    }

    fn error_at(&self, construct: impl Into<String>, span: Range<usize>) -> Error {
        unsupported(self.input, construct, span)
    }

    fn unexpected(&self, expected: &str) -> Error {
        match self.peek() {
            Some(t) => self.error(format!("expected {expected}, got {}", t.describe())),
            None => self.error(format!("expected {expected}, got end of input")),
        }
    }

    fn eat(&mut self, expected: Token<'src>) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        if self.peek_is_keyword(keyword) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn peek_is_keyword(&self, keyword: &str) -> bool {
        matches!(self.peek(), Some(Token::Ident(name)) if name == keyword)
    }

    fn expect(&mut self, expected: Token<'src>) -> Result<()> {
        if self.eat(expected) {
            Ok(())
        } else {
            Err(self.unexpected(&expected.describe()))
        }
    }

    fn expect_ident(&mut self, what: &str) -> Result<(&'src str, Range<usize>)> {
        let span = self.current_span();
        match self.peek() {
            Some(Token::Ident(name)) => {
                self.pos += 1;
                Ok((name, span))
            }
            _ => Err(self.unexpected(what)),
        }
    }

    /// Parse every top-level declaration.
    pub(super) fn parse_module(mut self) -> Result<Vec<TsDecl>> {
        let mut decls = Vec::new();
        while self.peek().is_some() {
            if self.eat(Token::Semicolon) {
                continue;
            }
            decls.push(self.parse_declaration()?);
        }
        Ok(decls)
    }

    fn parse_declaration(&mut self) -> Result<TsDecl> {
        let doc = from_comment(self.current_doc());
        let exported = self.eat_keyword("export");
        let declared = self.eat_keyword("declare");

        let keyword_span = self.current_span();
        let (name, span, body) = match self.peek() {
            Some(Token::Ident("interface")) => {
                self.advance();
                let (name, span) = self.expect_ident("an interface name")?;
                self.reject_type_parameters()?;
                if self.peek_is_keyword("extends") {
                    return Err(self.error("interface inheritance (`extends`)"));
                }
                (name, span, DeclBody::Interface(self.parse_members()?))
            }
            Some(Token::Ident("type")) => {
                self.advance();
                let (name, span) = self.expect_ident("a type name")?;
                self.reject_type_parameters()?;
                self.expect(Token::Eq)?;
                (name, span, DeclBody::Alias(self.parse_type()?))
            }
            Some(Token::Ident("module")) if declared => {
                return Err(self.error_at("`declare module` block", keyword_span));
            }
            Some(Token::Ident(keyword)) if UNSUPPORTED_STATEMENTS.contains(&keyword) => {
                return Err(self.error_at(format!("`{keyword}` statement"), keyword_span));
            }
            _ => return Err(self.unexpected("`interface` or `type` declaration")),
        };
        self.eat(Token::Semicolon);

        Ok(TsDecl {
            name: name.to_string(),
            exported,
            doc,
            body,
            span,
        })
    }

    fn reject_type_parameters(&self) -> Result<()> {
        if self.peek() == Some(Token::LAngle) {
            return Err(self.error("generic type parameters"));
        }
        Ok(())
    }

    /// `type = ["|"] inter ("|" inter)*`
    fn parse_type(&mut self) -> Result<TsType> {
        self.parse_operands(Token::Pipe, Self::parse_intersection, TsType::Union)
    }

    /// `inter = ["&"] postfix ("&" postfix)*`
    fn parse_intersection(&mut self) -> Result<TsType> {
        self.parse_operands(Token::Amp, Self::parse_postfix, TsType::Intersection)
    }

    /// Operands separated by `op`, with an optional leading `op`.
    ///
    /// A doc comment before an `op`, or right after it, documents the operand that
    /// follows. Without a leading `op` a comment before the first operand belongs to
    /// the enclosing position.
    fn parse_operands(
        &mut self,
        op: Token<'src>,
        operand: fn(&mut Self) -> Result<TsType>,
        wrap: fn(Vec<TsType>) -> TsType,
    ) -> Result<TsType> {
        let mut members = Vec::new();
        loop {
            let doc = self.current_doc();
            let separated = self.eat(op);
            if !separated && !members.is_empty() {
                break;
            }
            let doc = if separated {
                doc.or(self.current_doc())
            } else {
                None
            };
            members.push(operand(self)?.documented(from_comment(doc)));
        }

        Ok(if members.len() == 1 {
            members.remove(0).undocumented()
        } else {
            wrap(members)
        })
    }

    /// `postfix = primary ("[" "]")*`
    fn parse_postfix(&mut self) -> Result<TsType> {
        let mut ty = self.parse_primary()?;
        while self.peek() == Some(Token::LBracket) {
            if self.peek_nth(1) != Some(Token::RBracket) {
                return Err(self.error("indexed access type"));
            }
            self.pos += 2;
            ty = TsType::Array(Box::new(ty));
        }
        Ok(ty)
    }

    fn parse_primary(&mut self) -> Result<TsType> {
        let span = self.current_span();
        match self.peek() {
            Some(Token::Ident(name)) => {
                self.advance();
                self.parse_named(name, span)
            }
            Some(Token::String(raw)) => {
                self.advance();
                let value = unquote(raw)
                    .ok_or_else(|| self.error_at(format!("invalid string literal {raw}"), span))?;
                Ok(TsType::Literal(Literal::String(value)))
            }
            Some(Token::Number(raw)) => {
                self.advance();
                let number: serde_json::Number = serde_json::from_str(raw)
                    .map_err(|_| self.error_at(format!("invalid number literal `{raw}`"), span))?;
                Ok(TsType::Literal(Literal::Number(number)))
            }
            Some(Token::LParen) => {
                self.advance();
                let ty = self.parse_type()?;
                self.expect(Token::RParen)?;
                Ok(ty)
            }
            Some(Token::LBrace) => Ok(TsType::Object(self.parse_members()?)),
            Some(Token::LBracket) => Ok(TsType::Tuple(self.parse_tuple()?)),
            _ => Err(self.unexpected("a type")),
        }
    }

    fn parse_named(&mut self, name: &'src str, span: Range<usize>) -> Result<TsType> {
        if let Some(keyword) = Keyword::from_name(name) {
            return Ok(TsType::Keyword(keyword));
        }
        match name {
            "true" => return Ok(TsType::Literal(Literal::Boolean(true))),
            "false" => return Ok(TsType::Literal(Literal::Boolean(false))),
            _ => {}
        }
        if UNSUPPORTED_TYPES.contains(&name) {
            return Err(self.error_at(format!("`{name}` type"), span));
        }
        if UNSUPPORTED_OPERATORS.contains(&name) {
            return Err(self.error_at(format!("`{name}` type operator"), span));
        }

        if self.peek() != Some(Token::LAngle) {
            return Ok(TsType::Ref(name.to_string()));
        }
        if name != "Array" {
            return Err(self.error_at(format!("generic type reference `{name}<...>`"), span));
        }
        self.advance();
        let element = self.parse_type()?;
        self.expect(Token::RAngle)?;
        Ok(TsType::Array(Box::new(element)))
    }

    /// `"{" member* "}"`, members separated by `;`, `,` or nothing.
    fn parse_members(&mut self) -> Result<Vec<TsMember>> {
        self.expect(Token::LBrace)?;
        let mut members = Vec::new();
        let mut has_index = false;

        while !self.eat(Token::RBrace) {
            let doc = from_comment(self.current_doc());
            let member = if self.peek() == Some(Token::LBracket) {
                if has_index {
                    return Err(self.error("multiple index signatures"));
                }
                has_index = true;
                TsMember::Index(self.parse_index(doc)?)
            } else {
                TsMember::Property(self.parse_property(doc)?)
            };
            members.push(member);

            if !self.eat(Token::Semicolon) {
                self.eat(Token::Comma);
            }
        }

        Ok(members)
    }

    /// `(IDENT | STRING | NUMBER) ["?"] ":" type`
    fn parse_property(&mut self, doc: Annotations) -> Result<TsProperty> {
        let span = self.current_span();
        let name = match self.peek() {
            Some(Token::Ident(name) | Token::Number(name)) => name.to_string(),
            Some(Token::String(raw)) => unquote(raw)
                .ok_or_else(|| self.error(format!("invalid property name {raw}")))?,
            _ => return Err(self.unexpected("a property or `}`")),
        };
        self.advance();

        let optional = self.eat(Token::Question);
        if self.peek() == Some(Token::LParen) {
            return Err(self.error_at("method signature", span));
        }
        self.expect(Token::Colon)?;
        let ty = self.parse_type()?;
        Ok(TsProperty {
            name,
            optional,
            ty,
            doc,
        })
    }

    /// `"[" IDENT ":" "string" "]" ":" type`
    fn parse_index(&mut self, doc: Annotations) -> Result<TsIndex> {
        self.expect(Token::LBracket)?;
        let (key, _) = self.expect_ident("an index parameter name")?;
        if self.peek_is_keyword("in") {
            return Err(self.error("mapped type"));
        }
        self.expect(Token::Colon)?;
        let key_span = self.current_span();
        let (key_type, _) = self.expect_ident("an index key type")?;
        if key_type != "string" {
            return Err(self.error_at(format!("index signature with `{key_type}` keys"), key_span));
        }
        self.expect(Token::RBracket)?;
        self.expect(Token::Colon)?;
        let ty = self.parse_type()?;
        Ok(TsIndex {
            key: key.to_string(),
            ty,
            doc,
        })
    }

    /// `"[" [elem ("," elem)* [","]] "]"`
    ///
    /// Required elements come first, then optional ones, then at most one rest
    /// element at the end.
    fn parse_tuple(&mut self) -> Result<Vec<TsElement>> {
        self.expect(Token::LBracket)?;
        let mut elements: Vec<TsElement> = Vec::new();

        while !self.eat(Token::RBracket) {
            let span = self.current_span();
            if elements.last().is_some_and(|e| e.kind == ElementKind::Rest) {
                return Err(self.error_at("tuple element after a rest element", span));
            }
            let doc = from_comment(self.current_doc());

            let element = if self.eat(Token::Ellipsis) {
                match self.parse_postfix()? {
                    TsType::Array(item) => TsElement::new(ElementKind::Rest, *item),
                    _ => return Err(self.error_at("rest element that is not an array type", span)),
                }
            } else {
                let ty = self.parse_type()?;
                if self.eat(Token::Question) {
                    TsElement::new(ElementKind::Optional, ty)
                } else {
                    if elements.iter().any(|e| e.kind == ElementKind::Optional) {
                        return Err(
                            self.error_at("required tuple element after an optional one", span)
                        );
                    }
                    TsElement::new(ElementKind::Required, ty)
                }
            };
            elements.push(element.with_doc(doc));

            if self.peek() != Some(Token::RBracket) {
                self.expect(Token::Comma)?;
            }
        }

        Ok(elements)
    }
}
