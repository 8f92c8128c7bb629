//! Implicit-tag reconciliation.
//!
//! Before every structural change the builder compares the open-element
//! stack with the incoming tag and synthesizes whatever `html`, `head` or
//! `body` structure the markup omitted. This runs as a loop over the explicit
//! stack until no rule applies, so hostile input cannot drive it into deep
//! recursion.

use super::builder::TreeBuilder;

/// Elements that belong in `head`. Seeing one of these while only `html` is
/// open opens `head` rather than `body`.
pub const HEAD_TAGS: &[&str] = &[
    "base", "basefont", "bgsound", "noscript", "link", "meta", "title", "style", "script",
];

fn is_head_tag(tag: Option<&str>) -> bool {
    tag.is_some_and(|t| HEAD_TAGS.contains(&t))
}

impl TreeBuilder {
    /// Synthesize missing structure ahead of `tag` (`None` for text).
    ///
    /// Each step moves the stack strictly forward through
    /// `[] -> [html] -> [html, head|body]` or pops `head`, so the loop always
    /// reaches a state where no rule matches.
    pub(super) fn implicit_tags(&mut self, tag: Option<&str>) {
        while let Some(missing) = self.next_implicit_tag(tag) {
            tracing::trace!(missing, incoming = ?tag, "synthesizing implicit tag");
            self.insert_tag(missing, &[]);
        }
    }

    /// The single tag to synthesize next, or `None` when the stack already
    /// fits `tag`.
    fn next_implicit_tag(&self, tag: Option<&str>) -> Option<&'static str> {
        if self.unfinished.len() > 2 {
            return None;
        }
        match self.open_tags().as_slice() {
            [] if tag != Some("html") => Some("html"),
            ["html"] if !matches!(tag, Some("head" | "body" | "/html")) => {
                if is_head_tag(tag) {
                    Some("head")
                } else {
                    Some("body")
                }
            }
            ["html", "head"] if tag != Some("/head") && !is_head_tag(tag) => Some("/head"),
            _ => None,
        }
    }
}
