//! High-level browser API for the Tern browser core.
//!
//! # Scope
//!
//! This crate provides:
//! - **Document Loading** - fetch a resource and parse it when it is HTML
//! - **Session Cache** - one [`Browser`] owns one response cache for its
//!   lifetime
//!
//! # Not Implemented
//!
//! - Styling, layout and painting
//! - Scripting
//! - Subresource loading (images, stylesheets, scripts)

pub use tern_dom as dom;
pub use tern_html as html;
pub use tern_net as net;

use tern_common::warning::clear_warnings;
use tern_dom::DomTree;
use tern_html::{Token, TreeBuilder, tokenize};
use tern_net::{FetchConfig, FetchError, Fetcher, Locator};
use thiserror::Error;

/// Content type prefix that selects HTML parsing.
pub const HTML_CONTENT_TYPE: &str = "text/html";

/// What a loaded resource turned into.
#[derive(Debug, Clone)]
pub enum PageContent {
    /// HTML content, parsed into a tree.
    Document(DomTree),
    /// Any other content, kept as decoded text.
    Text(String),
}

/// A fetched and, for HTML, parsed resource.
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    /// Identifier after redirects, for display.
    pub final_identifier: String,

    /// Content type the content was interpreted with.
    pub content_type: String,

    /// Decoded source text.
    pub source: String,

    /// HTML tokens (for debugging). Empty for non-HTML content.
    pub tokens: Vec<Token>,

    /// Parsed tree or raw text.
    pub content: PageContent,

    /// True if the source came from the response cache.
    pub served_from_cache: bool,

    /// `max-age` of the response, or `-1.0` when there was none.
    pub max_age: f64,
}

impl LoadedDocument {
    /// Build a document from already fetched text.
    ///
    /// Content whose type starts with `text/html` is tokenized and parsed;
    /// anything else is kept as text.
    #[must_use]
    pub fn from_source(
        final_identifier: impl Into<String>,
        content_type: impl Into<String>,
        source: String,
    ) -> Self {
        let content_type = content_type.into();
        let (tokens, content) = if content_type.starts_with(HTML_CONTENT_TYPE) {
            let tokens = tokenize(&source);
            let tree = TreeBuilder::build(&tokens);
            (tokens, PageContent::Document(tree))
        } else {
            (Vec::new(), PageContent::Text(source.clone()))
        };

        Self {
            final_identifier: final_identifier.into(),
            content_type,
            source,
            tokens,
            content,
            served_from_cache: false,
            max_age: -1.0,
        }
    }

    /// The parsed tree, if the content was HTML.
    #[must_use]
    pub const fn dom(&self) -> Option<&DomTree> {
        match &self.content {
            PageContent::Document(tree) => Some(tree),
            PageContent::Text(_) => None,
        }
    }

    /// True if the content was parsed as HTML.
    #[must_use]
    pub const fn is_html(&self) -> bool {
        matches!(self.content, PageContent::Document(_))
    }
}

/// Error type for document loading.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The resource could not be fetched.
    #[error("failed to load {identifier}")]
    Fetch {
        /// Identifier as given to [`Browser::load`].
        identifier: String,
        /// Why the fetch failed.
        #[source]
        source: FetchError,
    },
}

/// Loads documents and keeps the response cache between loads.
#[derive(Debug, Default)]
pub struct Browser {
    fetcher: Fetcher,
}

impl Browser {
    /// Create a browser with an empty cache.
    #[must_use]
    pub fn new(config: FetchConfig) -> Self {
        Self {
            fetcher: Fetcher::new(config),
        }
    }

    /// The fetcher and its cache.
    #[must_use]
    pub const fn fetcher(&self) -> &Fetcher {
        &self.fetcher
    }

    /// Load a document from a resource identifier.
    ///
    /// This is the main entry point. It handles:
    /// - Identifier parsing (`http`, `https`, `file`, `data`, `view-source:`)
    /// - Fetching, with caching and redirects for network resources
    /// - Tokenizing and tree building when the content type is HTML
    ///
    /// Malformed identifiers and unreachable servers are not errors; they
    /// load as empty or sentinel content.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Fetch`] for the hard failures described on
    /// [`Fetcher::fetch`].
    pub fn load(&mut self, identifier: &str) -> Result<LoadedDocument, LoadError> {
        clear_warnings();

        let locator = Locator::parse(identifier);
        let response = self
            .fetcher
            .fetch(&locator)
            .map_err(|source| LoadError::Fetch {
                identifier: identifier.to_string(),
                source,
            })?;
        tracing::info!(
            identifier,
            final_identifier = %response.final_identifier,
            content_type = %response.content_type,
            cached = response.served_from_cache,
            "loaded"
        );

        let mut document = LoadedDocument::from_source(
            response.final_identifier,
            response.content_type,
            response.content,
        );
        document.served_from_cache = response.served_from_cache;
        document.max_age = response.max_age;
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_content_is_parsed() {
        let doc = LoadedDocument::from_source("x", "text/html; charset=utf-8", "<p>hi</p>".into());
        let tree = doc.dom().expect("parsed");
        assert_eq!(tree.tag_name(tree.root()), Some("html"));
        assert!(!doc.tokens.is_empty());
    }

    #[test]
    fn test_other_content_is_text() {
        let doc = LoadedDocument::from_source("x", "text/plain", "<p>hi</p>".into());
        assert!(!doc.is_html());
        assert!(doc.tokens.is_empty());
        assert!(matches!(&doc.content, PageContent::Text(text) if text == "<p>hi</p>"));
    }
}
