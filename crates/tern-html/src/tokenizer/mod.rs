//! HTML tokenizer module.
//!
//! A single-pass, four-state scanner that turns markup into a flat stream of
//! text and tag tokens. It never fails: unterminated constructs are flushed or
//! dropped at end of input.

/// Helper methods for tokenizer input handling and token emission.
pub mod helpers;
/// Fixed character entity table.
pub mod entities;
/// Token types produced by the tokenizer.
pub mod token;
/// HTML tokenizer state machine implementation.
pub mod core;

pub use self::core::{HTMLTokenizer, TokenizerState};
pub use token::{Attribute, Token};
