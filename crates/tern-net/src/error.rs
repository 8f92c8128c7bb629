//! Fetch failures.
//!
//! Only hard failures live here. A malformed identifier or an unreachable
//! host is not an error: the fetcher degrades those to empty or sentinel
//! content.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by [`Fetcher::fetch`](crate::Fetcher::fetch).
#[derive(Debug, Error)]
pub enum FetchError {
    /// A local file could not be opened or read.
    #[error("failed to read {}", path.display())]
    File {
        /// The path from the locator.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The TCP connection could not be established (refused, unreachable,
    /// name resolution failure). The fetcher turns this into sentinel content.
    #[error("could not connect to {host}:{port}")]
    Connect {
        /// Host from the locator.
        host: String,
        /// Port from the locator.
        port: u16,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// TLS could not be set up or negotiated.
    #[error("TLS negotiation with {host} failed")]
    Tls {
        /// Host from the locator.
        host: String,
        /// Underlying TLS error.
        #[source]
        source: native_tls::Error,
    },

    /// Reading or writing the connection failed after it was established.
    #[error("I/O error while talking to the server")]
    Io(#[from] io::Error),

    /// The status line, a header line or a length field did not parse.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// A header the client relies on was absent.
    #[error("response is missing the `{0}` header")]
    MissingHeader(&'static str),

    /// A chunk-size line was not a hexadecimal number.
    #[error("invalid chunk size line {0:?}")]
    InvalidChunkSize(String),

    /// The body claimed to be gzip but did not decompress.
    #[error("gzip decoding failed")]
    Decompress(#[source] io::Error),

    /// The redirect chain reached the configured depth limit.
    #[error("too many redirects while fetching {identifier} (depth {depth})")]
    TooManyRedirects {
        /// Identifier of the response that asked for one redirect too many.
        identifier: String,
        /// Depth the next request would have had.
        depth: u8,
    },
}

impl FetchError {
    /// Returns true for failures to reach the server at all.
    #[must_use]
    pub const fn is_transport_failure(&self) -> bool {
        matches!(self, Self::Connect { .. })
    }
}
