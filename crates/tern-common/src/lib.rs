//! Common utilities for the Tern browser core.
//!
//! This crate provides shared infrastructure used by the fetch and parse
//! components:
//! - **Warning System** - deduplicated warnings for recoverable oddities
//! - **URL helpers** - redirect `Location` resolution

pub mod url;
pub mod warning;
