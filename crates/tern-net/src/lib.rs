//! Resource fetching for the Tern browser core.
//!
//! # Scope
//!
//! This crate provides:
//! - **Locators** - parsing `http`, `https`, `file` and `data` identifiers,
//!   with an optional `view-source:` prefix
//! - **Fetching** - a minimal HTTP/1.1 client over plain TCP or TLS that
//!   follows redirects up to a fixed depth
//! - **Body decoding** - chunked transfer framing and gzip decompression
//! - **Response caching** - an in-memory, `Cache-Control: max-age` driven
//!   cache owned by the fetcher
//!
//! # Not Implemented
//!
//! - Keep-alive, pipelining and proxies
//! - Timeouts on connect and read
//! - Content codings other than gzip

pub mod cache;
pub mod config;
pub mod decoder;
pub mod error;
pub mod fetcher;
pub mod locator;
pub mod request;
pub mod response;
pub mod transport;

pub use cache::{CacheEntry, CachePolicy, ResponseCache};
pub use config::FetchConfig;
pub use error::FetchError;
pub use fetcher::{FetchResponse, Fetcher, INVALID_URL_CONTENT};
pub use locator::{Address, Locator, MalformedIdentifier, Scheme};
pub use response::{Headers, HttpResponse, ResponseHead};
