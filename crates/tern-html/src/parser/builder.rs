use tern_common::warning::warn_once;
use tern_dom::{AttributesMap, DomTree, ElementData, NodeId, NodeType};

use crate::tokenizer::{Attribute, Token};

/// Void elements: appended as leaves and never pushed onto the stack.
pub const SELF_CLOSING_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Builds a [`DomTree`] from a token stream.
///
/// Keeps a stack of elements that have been opened but not yet closed. An
/// element is attached to its parent when it is popped, so the parent is
/// always the element directly beneath it on the stack.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    /// Elements opened but not yet closed, outermost first.
    pub(super) unfinished: Vec<NodeId>,

    /// Node arena. The first element allocated becomes the root.
    pub(super) tree: DomTree,
}

impl TreeBuilder {
    /// Create an empty builder.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            unfinished: Vec::new(),
            tree: DomTree::new(),
        }
    }

    /// Build a tree from a borrowed token stream.
    ///
    /// Never fails: any token stream, however unbalanced, produces a tree
    /// rooted at an `html` element.
    #[must_use]
    pub fn build(tokens: &[Token]) -> DomTree {
        let mut builder = Self::new();
        for token in tokens {
            builder.process_token(token);
        }
        builder.finish()
    }

    /// Apply a single token to the tree under construction.
    pub fn process_token(&mut self, token: &Token) {
        match token {
            Token::Text { data } => self.add_text(data),
            Token::Tag { name, attributes } => self.add_tag(name, attributes),
        }
    }

    /// Names of the open elements, outermost first.
    #[must_use]
    pub fn open_tags(&self) -> Vec<&str> {
        self.unfinished
            .iter()
            .filter_map(|&id| self.tree.tag_name(id))
            .collect()
    }

    fn add_text(&mut self, text: &str) {
        if text.trim().is_empty() {
            return;
        }
        self.implicit_tags(None);

        let node = self.tree.alloc(NodeType::Text(text.to_string()));
        if let Some(&parent) = self.unfinished.last() {
            self.tree.append_child(parent, node);
        }
    }

    fn add_tag(&mut self, name: &str, attributes: &[Attribute]) {
        if name.starts_with('!') {
            return;
        }
        self.implicit_tags(Some(name));
        self.insert_tag(name, attributes);
    }

    /// Apply a tag to the stack without reconciliation.
    pub(super) fn insert_tag(&mut self, name: &str, attributes: &[Attribute]) {
        if name.starts_with('/') {
            if self.unfinished.len() == 1 {
                warn_once("HTML", &format!("ignoring stray <{name}> at top level"));
                return;
            }
            self.close_current();
        } else if SELF_CLOSING_TAGS.contains(&name) {
            let node = self.create_element(name, attributes);
            if let Some(&parent) = self.unfinished.last() {
                self.tree.append_child(parent, node);
            }
        } else {
            let node = self.create_element(name, attributes);
            self.unfinished.push(node);
        }
    }

    /// Pop the current element and attach it to the one beneath it.
    fn close_current(&mut self) {
        if self.unfinished.len() < 2 {
            return;
        }
        if let Some(node) = self.unfinished.pop()
            && let Some(&parent) = self.unfinished.last()
        {
            self.tree.append_child(parent, node);
        }
    }

    fn create_element(&mut self, tag_name: &str, attributes: &[Attribute]) -> NodeId {
        self.tree.alloc(NodeType::Element(ElementData {
            tag_name: tag_name.to_string(),
            attrs: attributes_to_map(attributes),
        }))
    }

    /// Close everything still open and return the tree.
    ///
    /// If no element was ever opened, reconciliation runs once with no pending
    /// tag so the result still has an `html` root.
    #[must_use]
    pub fn finish(mut self) -> DomTree {
        if self.unfinished.is_empty() {
            self.implicit_tags(None);
        }
        while self.unfinished.len() > 1 {
            self.close_current();
        }
        debug_assert_eq!(self.unfinished.first(), Some(&NodeId::ROOT));
        self.tree
    }
}

/// Convert token attributes to the map stored on elements.
///
/// A repeated attribute keeps its last value.
fn attributes_to_map(attributes: &[Attribute]) -> AttributesMap {
    attributes
        .iter()
        .map(|attr| (attr.name.clone(), attr.value.clone()))
        .collect()
}
