//! Helper functions for the HTML tokenizer.
//!
//! This module contains utility functions used throughout the tokenizer:
//! - State transitions
//! - Input/character handling and lookahead
//! - Token emission, including splitting a tag body into name and attributes

use tern_common::warning::warn_once;

use super::core::{HTMLTokenizer, TokenizerState};
use super::token::{Attribute, Token};

// =============================================================================
// State Transition Helpers
// =============================================================================

impl HTMLTokenizer {
    /// Transitions to a new state. The next character will be consumed on the
    /// next iteration of the main loop.
    pub(super) const fn switch_to(&mut self, new_state: TokenizerState) {
        self.state = new_state;
    }
}

// =============================================================================
// Input/Character Helpers
// =============================================================================

impl HTMLTokenizer {
    /// Returns the character at the current position and advances the position.
    /// Returns None if we've reached the end of input.
    pub(super) fn consume(&mut self) -> Option<char> {
        let c = self.input[self.current_pos..].chars().next()?;
        self.current_pos += c.len_utf8();
        Some(c)
    }

    /// Check if the not-yet-consumed input starts with `target`.
    #[must_use]
    pub fn next_few_characters_are(&self, target: &str) -> bool {
        self.input[self.current_pos..].starts_with(target)
    }

    /// Consume the given string from the input.
    /// Caller must have already verified the characters are present.
    pub(super) const fn consume_string(&mut self, target: &str) {
        self.current_pos += target.len();
    }
}

// =============================================================================
// Token Emission Helpers
// =============================================================================

impl HTMLTokenizer {
    /// Emit the pending text as a `Text` token, if there is any.
    pub(super) fn flush_text(&mut self) {
        if !self.text_buffer.is_empty() {
            let data = std::mem::take(&mut self.text_buffer);
            self.token_stream.push(Token::Text { data });
        }
    }

    /// Build a tag token from the raw text between `<` and `>` and emit it.
    ///
    /// Declarations (`<!DOCTYPE html>`, `<![CDATA[`) and empty tags are
    /// dropped.
    pub(super) fn emit_tag(&mut self, body: &str) {
        if body.starts_with('!') {
            warn_once("HTML", &format!("ignoring declaration <{body}>"));
            return;
        }
        match parse_tag_body(body) {
            Some(token) => self.token_stream.push(token),
            None => tracing::debug!(body, "dropping empty tag"),
        }
    }

    pub(super) fn warn_unknown_entity(&self) {
        warn_once("HTML", &format!("unknown entity '&{};'", self.entity_buffer));
    }
}

/// Split a tag body on whitespace into a lower-cased name and attributes.
///
/// Each attribute splits on its first `=` into a lower-cased key and a raw
/// value; a bare word becomes a key with an empty value. A trailing `/` on a
/// start tag (`<br/>`, `<img src=a />`) is treated as self-closing syntax and
/// removed before splitting.
///
/// Returns `None` when the body holds no name at all.
#[must_use]
pub fn parse_tag_body(body: &str) -> Option<Token> {
    let mut body = body.trim();
    if body.len() > 1 && !body.starts_with('/') {
        body = body.strip_suffix('/').unwrap_or(body);
    }

    let mut parts = body.split_whitespace();
    let name = parts.next()?.to_ascii_lowercase();
    let attributes = parts
        .map(|part| match part.split_once('=') {
            Some((key, value)) => Attribute::new(key.to_ascii_lowercase(), value.to_string()),
            None => Attribute::new(part.to_ascii_lowercase(), String::new()),
        })
        .collect();

    Some(Token::Tag { name, attributes })
}
