//! Fetch orchestration.
//!
//! [`Fetcher::fetch`] turns a [`Locator`] into text. Network fetches consult
//! the cache, open a fresh connection, send one request, follow redirects
//! and populate the cache. Local and inline sources bypass the cache.

use std::fs;
use std::io::BufReader;
use std::time::SystemTime;

use tern_common::url;

use crate::cache::{CacheEntry, CachePolicy, ResponseCache};
use crate::config::FetchConfig;
use crate::error::FetchError;
use crate::locator::{Address, Locator, Scheme, VIEW_SOURCE_PREFIX};
use crate::request;
use crate::response::{HttpResponse, ResponseHead};
use crate::transport;

/// Content returned when the server cannot be reached.
pub const INVALID_URL_CONTENT: &str = "Invalid URL";

/// The outcome of a fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchResponse {
    /// Decoded text of the resource.
    pub content: String,
    /// True if the content came from the response cache.
    pub served_from_cache: bool,
    /// `max-age` from the response, or `-1.0` when there was none.
    pub max_age: f64,
    /// Content type to interpret `content` with.
    pub content_type: String,
    /// Identifier of the resource that produced the content, after any
    /// redirects.
    pub final_identifier: String,
}

impl FetchResponse {
    fn uncached(content: String, locator: &Locator) -> Self {
        Self {
            content,
            served_from_cache: false,
            max_age: -1.0,
            content_type: locator.content_type().to_string(),
            final_identifier: locator.identifier().to_string(),
        }
    }
}

/// Fetches resources and owns the response cache they populate.
#[derive(Debug, Default)]
pub struct Fetcher {
    cache: ResponseCache,
    config: FetchConfig,
}

impl Fetcher {
    /// Create a fetcher with an empty cache.
    #[must_use]
    pub fn new(config: FetchConfig) -> Self {
        Self::with_cache(config, ResponseCache::new())
    }

    /// Create a fetcher around an existing cache.
    #[must_use]
    pub const fn with_cache(config: FetchConfig, cache: ResponseCache) -> Self {
        Self { cache, config }
    }

    /// The response cache.
    #[must_use]
    pub const fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    /// Mutable access to the response cache.
    pub const fn cache_mut(&mut self) -> &mut ResponseCache {
        &mut self.cache
    }

    /// Fetch the content a locator points at.
    ///
    /// A malformed locator yields empty content and an unreachable server
    /// yields [`INVALID_URL_CONTENT`]; neither is an error.
    ///
    /// # Errors
    ///
    /// - [`FetchError::File`] if a local file cannot be read
    /// - [`FetchError::Tls`] if TLS negotiation fails
    /// - [`FetchError::TooManyRedirects`] when the redirect chain reaches
    ///   [`FetchConfig::max_redirects`]
    /// - [`FetchError::MissingHeader`], [`FetchError::MalformedResponse`],
    ///   [`FetchError::InvalidChunkSize`] or [`FetchError::Decompress`] for
    ///   a response this client cannot interpret
    /// - [`FetchError::Io`] if the connection fails mid-exchange
    pub fn fetch(&mut self, locator: &Locator) -> Result<FetchResponse, FetchError> {
        match locator.address() {
            Address::Blank(_) => Ok(FetchResponse::uncached(String::new(), locator)),
            Address::Inline { data } => Ok(FetchResponse::uncached(data.clone(), locator)),
            Address::File { path } => {
                let bytes = fs::read(path).map_err(|source| FetchError::File {
                    path: path.clone(),
                    source,
                })?;
                let content = String::from_utf8_lossy(&bytes).into_owned();
                Ok(FetchResponse::uncached(content, locator))
            }
            Address::Network {
                scheme,
                host,
                port,
                path,
            } => self.fetch_network(locator, *scheme, host, *port, path),
        }
    }

    fn fetch_network(
        &mut self,
        locator: &Locator,
        scheme: Scheme,
        host: &str,
        port: u16,
        path: &str,
    ) -> Result<FetchResponse, FetchError> {
        let identifier = locator.identifier();

        if let Some(entry) = self.cache.lookup(identifier, SystemTime::now()) {
            tracing::debug!(identifier, max_age = entry.max_age, "served from cache");
            let content_type = if locator.is_view_source() {
                locator.content_type()
            } else {
                &entry.content_type
            };
            return Ok(FetchResponse {
                content: entry.body.clone(),
                served_from_cache: true,
                max_age: entry.max_age,
                content_type: content_type.to_string(),
                final_identifier: identifier.to_string(),
            });
        }

        tracing::debug!(identifier, "cache miss");

        let connection = match transport::connect(scheme, host, port) {
            Ok(connection) => connection,
            Err(error) if error.is_transport_failure() => {
                tracing::warn!(identifier, %error, "server unreachable");
                return Ok(FetchResponse::uncached(
                    INVALID_URL_CONTENT.to_string(),
                    locator,
                ));
            }
            Err(error) => return Err(error),
        };
        let mut reader = BufReader::new(connection);

        tracing::debug!(host, path, "sending request");
        request::send_request(reader.get_mut(), host, path, &self.config.user_agent)?;
        let head = ResponseHead::read_from(&mut reader)?;
        tracing::debug!(identifier, status = head.status, reason = %head.reason, "response");

        if head.is_redirect() {
            let location = head
                .headers
                .get("location")
                .ok_or(FetchError::MissingHeader("location"))?;
            let depth = locator.redirect_depth().saturating_add(1);
            if depth >= self.config.max_redirects {
                return Err(FetchError::TooManyRedirects {
                    identifier: identifier.to_string(),
                    depth,
                });
            }

            let default_port = scheme.default_port().unwrap_or(port);
            let authority = url::authority(host, port, default_port);
            let mut target = url::resolve_location(location, scheme.as_ref(), &authority);
            if locator.is_view_source() {
                target.insert_str(0, VIEW_SOURCE_PREFIX);
            }
            drop(reader);

            tracing::debug!(from = identifier, to = %target, depth, "following redirect");
            return self.fetch(&Locator::with_redirect_depth(&target, depth));
        }

        let content_type = head
            .headers
            .get("content-type")
            .ok_or(FetchError::MissingHeader("content-type"))?
            .to_string();
        let policy = CachePolicy::from_cache_control(head.headers.get("cache-control"));

        let response = HttpResponse::read_body(head, &mut reader)?;
        drop(reader);
        let content = response.text()?;

        if policy.permits(response.status) {
            tracing::debug!(identifier, max_age = policy.max_age, "caching response");
            self.cache.store(
                identifier,
                CacheEntry {
                    timestamp: SystemTime::now(),
                    max_age: policy.max_age,
                    body: content.clone(),
                    content_type: content_type.clone(),
                },
            );
        }

        let content_type = if locator.is_view_source() {
            locator.content_type().to_string()
        } else {
            content_type
        };

        Ok(FetchResponse {
            content,
            served_from_cache: false,
            max_age: policy.max_age,
            content_type,
            final_identifier: identifier.to_string(),
        })
    }
}
