use strum_macros::Display;

use super::entities::lookup_entity;
use super::token::Token;

/// The tokenizer state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TokenizerState {
    /// Ordinary character data. Characters accumulate into the pending text.
    InText,
    /// Between `<` and `>`. Characters accumulate into the tag buffer.
    InTag,
    /// Between `&` and `;`. Characters accumulate into the entity name.
    InEntity,
    /// Inside `<!-- ... -->`. Characters are discarded.
    InComment,
}

/// Character-driven tokenizer.
///
/// Consumes the input once, front to back, and collects tokens into an
/// internal stream retrieved with [`HTMLTokenizer::into_tokens`].
pub struct HTMLTokenizer {
    pub(super) state: TokenizerState,
    pub(super) input: String,
    pub(super) current_pos: usize,
    /// Text seen since the last emitted token.
    pub(super) text_buffer: String,
    /// Raw contents of the tag being scanned, without `<` and `>`.
    pub(super) tag_buffer: String,
    /// Name of the entity being scanned, without `&` and `;`.
    pub(super) entity_buffer: String,
    pub(super) token_stream: Vec<Token>,
}

impl HTMLTokenizer {
    /// Create a tokenizer over `input`. The initial state is [`TokenizerState::InText`].
    #[must_use]
    pub const fn new(input: String) -> Self {
        Self {
            state: TokenizerState::InText,
            input,
            current_pos: 0,
            text_buffer: String::new(),
            tag_buffer: String::new(),
            entity_buffer: String::new(),
            token_stream: Vec::new(),
        }
    }

    /// The tokens emitted so far.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.token_stream
    }

    /// Consume the tokenizer and return the token stream.
    #[must_use]
    pub fn into_tokens(self) -> Vec<Token> {
        self.token_stream
    }

    /// The current state.
    #[must_use]
    pub const fn state(&self) -> TokenizerState {
        self.state
    }

    fn handle_text_state(&mut self, c: char) {
        match c {
            '<' => {
                self.flush_text();
                if self.next_few_characters_are("!--") {
                    self.consume_string("!--");
                    self.switch_to(TokenizerState::InComment);
                } else {
                    self.tag_buffer.clear();
                    self.switch_to(TokenizerState::InTag);
                }
            }
            '&' => {
                self.entity_buffer.clear();
                self.switch_to(TokenizerState::InEntity);
            }
            _ => self.text_buffer.push(c),
        }
    }

    fn handle_tag_state(&mut self, c: char) {
        if c == '>' {
            let body = std::mem::take(&mut self.tag_buffer);
            self.emit_tag(&body);
            self.switch_to(TokenizerState::InText);
        } else {
            self.tag_buffer.push(c);
        }
    }

    fn handle_entity_state(&mut self, c: char) {
        if c == ';' {
            match lookup_entity(&self.entity_buffer) {
                Some(replacement) => self.text_buffer.push_str(replacement),
                None => self.warn_unknown_entity(),
            }
            self.entity_buffer.clear();
            self.switch_to(TokenizerState::InText);
        } else {
            self.entity_buffer.push(c);
        }
    }

    fn handle_comment_state(&mut self, c: char) {
        if c == '-' && self.next_few_characters_are("->") {
            self.consume_string("->");
            self.switch_to(TokenizerState::InText);
        }
    }

    /// Handle end of input.
    ///
    /// Pending text is emitted as a final token. An entity that never saw
    /// its `;` is kept literally. An unterminated tag or comment is dropped.
    fn handle_eof(&mut self) {
        match self.state {
            TokenizerState::InText => {}
            TokenizerState::InEntity => {
                let name = std::mem::take(&mut self.entity_buffer);
                self.text_buffer.push('&');
                self.text_buffer.push_str(&name);
            }
            TokenizerState::InTag => {
                tracing::debug!(tag = %self.tag_buffer, "dropping unterminated tag at end of input");
                self.tag_buffer.clear();
            }
            TokenizerState::InComment => {
                tracing::debug!("input ended inside a comment");
            }
        }
        self.flush_text();
        self.switch_to(TokenizerState::InText);
    }

    /// Run the tokenizer to the end of input.
    pub fn run(&mut self) {
        while let Some(c) = self.consume() {
            match self.state {
                TokenizerState::InText => self.handle_text_state(c),
                TokenizerState::InTag => self.handle_tag_state(c),
                TokenizerState::InEntity => self.handle_entity_state(c),
                TokenizerState::InComment => self.handle_comment_state(c),
            }
        }
        self.handle_eof();
    }
}
