//! Tree construction.
//!
//! Turns the flat token stream into a node tree, synthesizing the `html`,
//! `head` and `body` elements that the markup left out.

/// Stack-based tree builder.
pub mod builder;
/// Implicit-tag reconciliation.
mod implicit;
/// Human-readable tree dumps.
mod print;

pub use builder::{SELF_CLOSING_TAGS, TreeBuilder};
pub use implicit::HEAD_TAGS;
pub use print::{format_tree, print_tree};
