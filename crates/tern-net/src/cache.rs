//! In-memory response cache.
//!
//! Entries live for the lifetime of the owning [`Fetcher`](crate::Fetcher)
//! and are never evicted, only overwritten by a later fetch of the same
//! identifier. The cache is a plain owned value: a design that shares one
//! cache between threads must wrap it in a mutex covering the whole
//! lookup-fetch-store sequence.

use std::collections::HashMap;
use std::time::SystemTime;

/// A stored response body with its freshness metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    /// When the response was received.
    pub timestamp: SystemTime,
    /// Freshness lifetime in seconds. Negative means no limit.
    pub max_age: f64,
    /// Decoded response body.
    pub body: String,
    /// `Content-Type` of the original response.
    pub content_type: String,
}

impl CacheEntry {
    /// True if the entry may still be served at `now`.
    ///
    /// A clock that went backwards counts as zero elapsed time.
    #[must_use]
    pub fn is_fresh_at(&self, now: SystemTime) -> bool {
        if self.max_age < 0.0 {
            return true;
        }
        let age = now.duration_since(self.timestamp).unwrap_or_default();
        age.as_secs_f64() < self.max_age
    }
}

/// Identifier-keyed store of earlier responses.
#[derive(Debug, Clone, Default)]
pub struct ResponseCache {
    entries: HashMap<String, CacheEntry>,
}

impl ResponseCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The entry for `identifier` if one exists and is fresh at `now`.
    #[must_use]
    pub fn lookup(&self, identifier: &str, now: SystemTime) -> Option<&CacheEntry> {
        self.entries
            .get(identifier)
            .filter(|entry| entry.is_fresh_at(now))
    }

    /// The entry for `identifier` regardless of freshness.
    #[must_use]
    pub fn get(&self, identifier: &str) -> Option<&CacheEntry> {
        self.entries.get(identifier)
    }

    /// Insert or overwrite the entry for `identifier`.
    pub fn store(&mut self, identifier: impl Into<String>, entry: CacheEntry) {
        let _ = self.entries.insert(identifier.into(), entry);
    }

    /// Number of stored entries, fresh or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing has been stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Directive `max-age`.
const MAX_AGE: &str = "max-age";
/// Directive `no-store`.
const NO_STORE: &str = "no-store";

/// Cacheability of a response as decided by its `Cache-Control` header.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CachePolicy {
    /// Whether the header allows storing the response.
    pub cacheable: bool,
    /// `max-age` in seconds, or `-1.0` when absent.
    pub max_age: f64,
}

impl CachePolicy {
    /// Interpret a `Cache-Control` header value.
    ///
    /// Only `max-age=N` and `no-store` are understood. Any other directive,
    /// including an unparsable `max-age`, makes the response uncacheable
    /// even when a valid `max-age` is also present. A `max-age` below one
    /// second is not worth storing. A missing header means uncacheable.
    #[must_use]
    pub fn from_cache_control(header: Option<&str>) -> Self {
        let mut cacheable = true;
        let mut max_age = -1.0;

        if let Some(header) = header {
            for directive in header.split(',').map(str::trim) {
                if directive == NO_STORE {
                    cacheable = false;
                    continue;
                }
                match directive.split_once('=') {
                    Some((name, value)) if name.trim() == MAX_AGE => {
                        match value.trim().parse::<f64>() {
                            Ok(seconds) => max_age = seconds,
                            Err(_) => cacheable = false,
                        }
                    }
                    _ => cacheable = false,
                }
            }
        }

        if max_age < 1.0 {
            cacheable = false;
        }

        Self { cacheable, max_age }
    }

    /// Whether a response with `status` may be stored under this policy.
    #[must_use]
    pub const fn permits(&self, status: u16) -> bool {
        self.cacheable && matches!(status, 200 | 404)
    }
}
