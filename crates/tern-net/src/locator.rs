//! Resource identifiers.
//!
//! Grammar accepted by [`Locator::parse`]:
//!
//! ```text
//! ["view-source:"] ( scheme "://" authority path | "data:" type "," payload | path )
//! ```
//!
//! Parsing never fails. An identifier that breaks the grammar produces a
//! blank locator whose fetch yields empty content.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use strum_macros::{AsRefStr, Display, EnumString};
use thiserror::Error;

/// Identifier a malformed locator collapses to.
pub const BLANK: &str = "about:blank";

/// Prefix that forces the content to be shown as plain text.
pub const VIEW_SOURCE_PREFIX: &str = "view-source:";

/// Content type assumed until a response says otherwise.
pub const DEFAULT_CONTENT_TYPE: &str = "text/html";

/// Content type for sources that must not be parsed as HTML.
pub const PLAIN_TEXT_CONTENT_TYPE: &str = "text/plain;charset=utf8";

/// Content type of a `data:` identifier with an empty type.
pub const DEFAULT_DATA_CONTENT_TYPE: &str = "text/plain;charset=US-ASCII";

/// Supported addressing schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Scheme {
    /// Plain HTTP/1.1 over TCP.
    Http,
    /// HTTP/1.1 over TLS.
    Https,
    /// A path on the local filesystem.
    File,
    /// Content carried inline in the identifier.
    Data,
}

impl Scheme {
    /// The port used when the identifier names none.
    #[must_use]
    pub const fn default_port(self) -> Option<u16> {
        match self {
            Self::Http => Some(80),
            Self::Https => Some(443),
            Self::File | Self::Data => None,
        }
    }
}

/// Why an identifier could not be turned into a usable locator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedIdentifier {
    /// The scheme is not one of `http`, `https`, `file` (with `://`) or
    /// `data` (with `:`).
    #[error("unsupported scheme {0:?}")]
    UnsupportedScheme(String),
    /// A `data:` identifier without the `,` separating type from payload.
    #[error("data identifier has no ',' separator")]
    MissingComma,
    /// The port after `host:` is not a number in `0..=65535`.
    #[error("invalid port {0:?}")]
    InvalidPort(String),
}

/// Where the content of a locator comes from.
///
/// Exactly one kind of address is populated per locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Address {
    /// An `http` or `https` origin and request path.
    Network {
        /// `Scheme::Http` or `Scheme::Https`.
        scheme: Scheme,
        /// Host name or address literal.
        host: String,
        /// Explicit port, or the scheme default.
        port: u16,
        /// Request target, always starting with `/`.
        path: String,
    },
    /// A local file.
    File {
        /// Path exactly as written in the identifier.
        path: PathBuf,
    },
    /// The payload of a `data:` identifier.
    Inline {
        /// Payload after the first `,`, verbatim.
        data: String,
    },
    /// A malformed identifier. Fetching it yields empty content.
    Blank(MalformedIdentifier),
}

/// A parsed resource identifier.
///
/// Immutable once built. Redirects produce a new locator with a greater
/// [`redirect_depth`](Locator::redirect_depth).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    identifier: String,
    address: Address,
    content_type: String,
    view_source: bool,
    redirect_depth: u8,
}

impl Locator {
    /// Parse an identifier typed by the user.
    #[must_use]
    pub fn parse(identifier: &str) -> Self {
        Self::with_redirect_depth(identifier, 0)
    }

    /// Parse an identifier reached by following `depth` redirects.
    #[must_use]
    pub fn with_redirect_depth(identifier: &str, depth: u8) -> Self {
        let (view_source, rest) = match identifier.strip_prefix(VIEW_SOURCE_PREFIX) {
            Some(rest) => (true, rest),
            None => (false, identifier),
        };

        let (address, content_type) = match parse_address(rest) {
            Ok(parsed) => parsed,
            Err(reason) => {
                tracing::debug!(identifier, %reason, "malformed identifier");
                return Self {
                    identifier: BLANK.to_string(),
                    address: Address::Blank(reason),
                    content_type: DEFAULT_CONTENT_TYPE.to_string(),
                    view_source,
                    redirect_depth: depth,
                };
            }
        };

        let content_type = if view_source {
            PLAIN_TEXT_CONTENT_TYPE.to_string()
        } else {
            content_type
        };

        Self {
            identifier: identifier.to_string(),
            address,
            content_type,
            view_source,
            redirect_depth: depth,
        }
    }

    /// The identifier used as the cache key: the input string, or
    /// [`BLANK`] for a malformed one.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Where the content comes from.
    #[must_use]
    pub const fn address(&self) -> &Address {
        &self.address
    }

    /// The scheme, or `None` for a malformed identifier.
    #[must_use]
    pub const fn scheme(&self) -> Option<Scheme> {
        match &self.address {
            Address::Network { scheme, .. } => Some(*scheme),
            Address::File { .. } => Some(Scheme::File),
            Address::Inline { .. } => Some(Scheme::Data),
            Address::Blank(_) => None,
        }
    }

    /// Content type known before fetching.
    ///
    /// `text/plain` for `view-source:` identifiers and for files whose
    /// extension is not `html`, the declared type for `data:` identifiers,
    /// `text/html` otherwise.
    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// True if the identifier carried the `view-source:` prefix.
    #[must_use]
    pub const fn is_view_source(&self) -> bool {
        self.view_source
    }

    /// How many redirects were followed to reach this locator.
    #[must_use]
    pub const fn redirect_depth(&self) -> u8 {
        self.redirect_depth
    }

    /// True if the identifier did not parse.
    #[must_use]
    pub const fn is_malformed(&self) -> bool {
        matches!(self.address, Address::Blank(_))
    }

    /// The host for network locators.
    #[must_use]
    pub fn host(&self) -> Option<&str> {
        match &self.address {
            Address::Network { host, .. } => Some(host),
            _ => None,
        }
    }

    /// The port for network locators.
    #[must_use]
    pub const fn port(&self) -> Option<u16> {
        match &self.address {
            Address::Network { port, .. } => Some(*port),
            _ => None,
        }
    }

    /// The request path for network locators.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        match &self.address {
            Address::Network { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// Split off the scheme and parse the scheme-specific remainder.
///
/// A `data:` prefix is recognised before looking for `://`, so payloads may
/// contain anything.
fn parse_address(rest: &str) -> Result<(Address, String), MalformedIdentifier> {
    if let Some(remainder) = rest
        .strip_prefix(Scheme::Data.as_ref())
        .and_then(|r| r.strip_prefix(':'))
    {
        parse_data(remainder)
    } else if let Some((scheme, remainder)) = rest.split_once("://") {
        match Scheme::from_str(scheme) {
            Ok(scheme @ (Scheme::Http | Scheme::Https)) => parse_network(scheme, remainder),
            Ok(Scheme::File) => Ok(parse_file(remainder)),
            Ok(Scheme::Data) | Err(_) => {
                Err(MalformedIdentifier::UnsupportedScheme(scheme.to_string()))
            }
        }
    } else if let Some((scheme, _)) = rest.split_once(':') {
        Err(MalformedIdentifier::UnsupportedScheme(scheme.to_string()))
    } else {
        Ok(parse_file(rest))
    }
}

fn parse_file(path: &str) -> (Address, String) {
    let content_type = match file_extension(path) {
        Some(ext) if ext != "html" => PLAIN_TEXT_CONTENT_TYPE,
        _ => DEFAULT_CONTENT_TYPE,
    };
    (
        Address::File {
            path: PathBuf::from(path),
        },
        content_type.to_string(),
    )
}

/// Text after the last dot of the file name. A dotfile such as `.bashrc`
/// counts its whole name after the dot as the extension.
fn file_extension(path: &str) -> Option<&str> {
    let path = Path::new(path);
    path.extension().and_then(OsStr::to_str).or_else(|| {
        path.file_name()
            .and_then(OsStr::to_str)
            .and_then(|name| name.strip_prefix('.'))
            .filter(|ext| !ext.is_empty())
    })
}

fn parse_data(remainder: &str) -> Result<(Address, String), MalformedIdentifier> {
    let (content_type, data) = remainder
        .split_once(',')
        .ok_or(MalformedIdentifier::MissingComma)?;
    let content_type = if content_type.is_empty() {
        DEFAULT_DATA_CONTENT_TYPE
    } else {
        content_type
    };
    Ok((
        Address::Inline {
            data: data.to_string(),
        },
        content_type.to_string(),
    ))
}

fn parse_network(scheme: Scheme, remainder: &str) -> Result<(Address, String), MalformedIdentifier> {
    let (authority, path) = match remainder.split_once('/') {
        Some((authority, path)) => (authority, format!("/{path}")),
        None => (remainder, "/".to_string()),
    };

    let (host, port) = match authority.split_once(':') {
        Some((host, port)) => {
            let port = port
                .parse::<u16>()
                .map_err(|_| MalformedIdentifier::InvalidPort(port.to_string()))?;
            (host, port)
        }
        None => (authority, scheme.default_port().unwrap_or(80)),
    };

    Ok((
        Address::Network {
            scheme,
            host: host.to_string(),
            port,
            path,
        },
        DEFAULT_CONTENT_TYPE.to_string(),
    ))
}
