//! Tokens for the supported TypeScript declaration subset.
//!
//! Whitespace, line comments and plain block comments are skipped. Doc comments
//! (`/** ... */`) are not tokens of their own: each one is attached to the token
//! that follows it.

use std::ops::Range;

use logos::{Filter, Lexer, Logos};

use crate::Result;

use super::unsupported;

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\n\r\f\u{feff}]+")]
#[logos(skip(r"//[^\n]*", allow_greedy = true))]
pub enum Token<'src> {
    #[regex(r"/\*([^*]|\*+[^*/])*\*+/", doc_comment)]
    DocComment(&'src str),

    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("<")]
    LAngle,

    #[token(">")]
    RAngle,

    #[token(":")]
    Colon,

    #[token(";")]
    Semicolon,

    #[token(",")]
    Comma,

    #[token("?")]
    Question,

    #[token("|")]
    Pipe,

    #[token("&")]
    Amp,

    #[token("=")]
    Eq,

    #[token("...")]
    Ellipsis,

    #[regex(r#""([^"\\\n]|\\.)*""#, |lex| lex.slice())]
    #[regex(r"'([^'\\\n]|\\.)*'", |lex| lex.slice())]
    String(&'src str),

    #[regex(r"-?[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?", |lex| lex.slice())]
    Number(&'src str),

    /// Identifiers and keywords alike. Keywords are told apart by the parser.
    #[regex(r"[A-Za-z_$][A-Za-z0-9_$]*", |lex| lex.slice())]
    Ident(&'src str),
}

/// Keep `/** ... */`, drop every other block comment.
fn doc_comment<'src>(lex: &mut Lexer<'src, Token<'src>>) -> Filter<&'src str> {
    let text = lex.slice();
    if text.starts_with("/**") && text != "/**/" {
        Filter::Emit(text)
    } else {
        Filter::Skip
    }
}

impl Token<'_> {
    /// Human-readable token description for error messages.
    pub fn describe(&self) -> String {
        match self {
            Token::DocComment(_) => "doc comment".to_string(),
            Token::LBrace => "`{`".to_string(),
            Token::RBrace => "`}`".to_string(),
            Token::LBracket => "`[`".to_string(),
            Token::RBracket => "`]`".to_string(),
            Token::LParen => "`(`".to_string(),
            Token::RParen => "`)`".to_string(),
            Token::LAngle => "`<`".to_string(),
            Token::RAngle => "`>`".to_string(),
            Token::Colon => "`:`".to_string(),
            Token::Semicolon => "`;`".to_string(),
            Token::Comma => "`,`".to_string(),
            Token::Question => "`?`".to_string(),
            Token::Pipe => "`|`".to_string(),
            Token::Amp => "`&`".to_string(),
            Token::Eq => "`=`".to_string(),
            Token::Ellipsis => "`...`".to_string(),
            Token::String(s) | Token::Number(s) | Token::Ident(s) => format!("`{s}`"),
        }
    }
}

/// A token with its source range and the doc comment right before it.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexeme<'src> {
    pub token: Token<'src>,
    pub span: Range<usize>,
    pub doc: Option<&'src str>,
}

/// Tokenize `input`. Fails on the first character no token matches.
pub fn lex(input: &str) -> Result<Vec<Lexeme<'_>>> {
    let mut lexemes = Vec::new();
    let mut doc = None;

    for (result, span) in Token::lexer(input).spanned() {
        match result {
            Ok(Token::DocComment(text)) => doc = Some(text),
            Ok(token) => lexemes.push(Lexeme {
                token,
                span,
                doc: doc.take(),
            }),
            Err(()) => {
                return Err(unsupported(
                    input,
                    format!("unexpected character {:?}", &input[span.clone()]),
                    span,
                ));
            }
        }
    }

    Ok(lexemes)
}

/// Decode a single- or double-quoted string literal.
pub fn unquote(literal: &str) -> Option<String> {
    if literal.starts_with('"') {
        return serde_json::from_str(literal).ok();
    }

    let inner = literal.strip_prefix('\'')?.strip_suffix('\'')?;
    let mut json = String::with_capacity(inner.len() + 2);
    json.push('"');
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('\'') => json.push('\''),
                Some(escaped) => {
                    json.push('\\');
                    json.push(escaped);
                }
                None => return None,
            },
            '"' => json.push_str("\\\""),
            c => json.push(c),
        }
    }
    json.push('"');
    serde_json::from_str(&json).ok()
}
