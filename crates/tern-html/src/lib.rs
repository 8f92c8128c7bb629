//! HTML tokenizer and tree builder for the Tern browser core.
//!
//! # Scope
//!
//! This crate implements:
//! - **HTML Tokenizer** - a four-state scanner (text, tag, entity, comment)
//!   producing text and tag tokens, decoding a fixed entity set
//! - **Tree Builder** - a stack of open elements with implicit `html`, `head`
//!   and `body` synthesis, so that any input yields a well-formed tree
//! - **Text extraction** - the plain text of a document with tags removed
//!
//! # Not Implemented
//!
//! - Scripting and CSS
//! - Tag-specific insertion modes (tables, forms, formatting elements)
//! - Numeric character references

/// Tree construction from tokens.
pub mod parser;
/// HTML tokenizer for converting input into tokens.
pub mod tokenizer;

pub use parser::{TreeBuilder, format_tree, print_tree};
pub use tokenizer::{Attribute, HTMLTokenizer, Token};

use tern_dom::DomTree;

/// Tokenize `html` into a flat token stream.
#[must_use]
pub fn tokenize(html: &str) -> Vec<Token> {
    let mut tokenizer = HTMLTokenizer::new(html.to_string());
    tokenizer.run();
    tokenizer.into_tokens()
}

/// Tokenize and build a tree in one step.
#[must_use]
pub fn parse_document(html: &str) -> DomTree {
    TreeBuilder::build(&tokenize(html))
}

/// The text of a token stream with every tag removed, in source order.
///
/// Entities are already decoded by the tokenizer; whitespace is kept as is.
#[must_use]
pub fn extract_text(tokens: &[Token]) -> String {
    tokens
        .iter()
        .filter_map(|token| match token {
            Token::Text { data } => Some(data.as_str()),
            Token::Tag { .. } => None,
        })
        .collect()
}
