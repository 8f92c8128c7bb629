//! Response head parsing.
//!
//! [RFC 9112 § 4 Status Line](https://www.rfc-editor.org/rfc/rfc9112#name-status-line)
//! [RFC 9112 § 5 Field Syntax](https://www.rfc-editor.org/rfc/rfc9112#name-field-syntax)

use std::io::BufRead;

use crate::decoder;
use crate::error::FetchError;

/// Response header fields.
///
/// Names are stored case-folded. When a name repeats, lookups return the
/// first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    /// Create an empty header map.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a field. The name is case-folded and the value trimmed.
    pub fn append(&mut self, name: &str, value: &str) {
        self.entries
            .push((name.trim().to_ascii_lowercase(), value.trim().to_string()));
    }

    /// The first value for `name`, compared case-insensitively.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// True if the comma-separated list in `name` contains `token`
    /// (case-insensitive).
    #[must_use]
    pub fn has_token(&self, name: &str, token: &str) -> bool {
        self.get(name).is_some_and(|value| {
            value
                .split(',')
                .any(|item| item.trim().eq_ignore_ascii_case(token))
        })
    }

    /// Number of fields, counting repeats.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if there are no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Status line and headers of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseHead {
    /// Protocol version, e.g. `HTTP/1.1`.
    pub version: String,
    /// Three-digit status code.
    pub status: u16,
    /// Reason phrase, possibly empty.
    pub reason: String,
    /// Header fields.
    pub headers: Headers,
}

impl ResponseHead {
    /// Read the status line and header lines, up to and including the empty
    /// line that ends the head.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::MalformedResponse`] if the status line or a
    /// header line does not parse, and [`FetchError::Io`] if reading fails.
    pub fn read_from<R: BufRead>(reader: &mut R) -> Result<Self, FetchError> {
        let status_line = decoder::read_line(reader)?
            .ok_or_else(|| FetchError::MalformedResponse("empty response".to_string()))?;
        let (version, status, reason) = parse_status_line(&status_line)?;

        let mut headers = Headers::new();
        while let Some(line) = decoder::read_line(reader)? {
            if line.is_empty() {
                break;
            }
            let (name, value) = line.split_once(':').ok_or_else(|| {
                FetchError::MalformedResponse(format!("header line without ':': {line:?}"))
            })?;
            headers.append(name, value);
        }

        Ok(Self {
            version,
            status,
            reason,
            headers,
        })
    }

    /// True for any status in `300..400`.
    #[must_use]
    pub const fn is_redirect(&self) -> bool {
        matches!(self.status, 300..400)
    }
}

fn parse_status_line(line: &str) -> Result<(String, u16, String), FetchError> {
    let mut parts = line.splitn(3, ' ');
    let version = parts.next().unwrap_or_default();
    let status = parts
        .next()
        .and_then(|s| s.parse::<u16>().ok())
        .ok_or_else(|| FetchError::MalformedResponse(format!("bad status line {line:?}")))?;
    let reason = parts.next().unwrap_or_default();
    Ok((version.to_string(), status, reason.to_string()))
}

/// A complete response with its framed, still-encoded body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Status code.
    pub status: u16,
    /// Header fields.
    pub headers: Headers,
    /// Body bytes after removing chunked framing, before content decoding.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Read the body that follows `head` and assemble the response.
    ///
    /// # Errors
    ///
    /// Returns an error if the body framing is invalid or the connection
    /// fails; see [`decoder::read_body`].
    pub fn read_body<R: BufRead>(head: ResponseHead, reader: &mut R) -> Result<Self, FetchError> {
        let body = decoder::read_body(reader, &head.headers)?;
        Ok(Self {
            status: head.status,
            headers: head.headers,
            body,
        })
    }

    /// Decompress and decode the body as text.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Decompress`] if a gzip body is corrupt.
    pub fn text(&self) -> Result<String, FetchError> {
        decoder::decode_content(&self.body, &self.headers)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_read_head() {
        let raw = "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nX-Two:  a b \r\n\r\nbody";
        let mut reader = Cursor::new(raw.as_bytes());
        let head = ResponseHead::read_from(&mut reader).expect("head");
        assert_eq!(head.version, "HTTP/1.1");
        assert_eq!(head.status, 200);
        assert_eq!(head.reason, "OK");
        assert_eq!(head.headers.get("content-type"), Some("text/html"));
        assert_eq!(head.headers.get("X-TWO"), Some("a b"));
        assert!(!head.is_redirect());
    }

    #[test]
    fn test_reason_phrase_with_spaces() {
        let mut reader = Cursor::new(&b"HTTP/1.1 404 Not Found\r\n\r\n"[..]);
        let head = ResponseHead::read_from(&mut reader).expect("head");
        assert_eq!(head.status, 404);
        assert_eq!(head.reason, "Not Found");
    }

    #[test]
    fn test_first_duplicate_header_wins() {
        let mut reader = Cursor::new(&b"HTTP/1.1 200 OK\r\nA: 1\r\na: 2\r\n\r\n"[..]);
        let head = ResponseHead::read_from(&mut reader).expect("head");
        assert_eq!(head.headers.get("a"), Some("1"));
        assert_eq!(head.headers.len(), 2);
    }

    #[test]
    fn test_redirect_range() {
        for (status, redirect) in [(299, false), (300, true), (302, true), (399, true), (400, false)] {
            let raw = format!("HTTP/1.1 {status} X\r\n\r\n");
            let head = ResponseHead::read_from(&mut Cursor::new(raw.into_bytes())).expect("head");
            assert_eq!(head.is_redirect(), redirect, "status {status}");
        }
    }

    #[test]
    fn test_malformed_status_line() {
        let mut reader = Cursor::new(&b"garbage\r\n\r\n"[..]);
        assert!(matches!(
            ResponseHead::read_from(&mut reader),
            Err(FetchError::MalformedResponse(_))
        ));
        let mut empty = Cursor::new(&b""[..]);
        assert!(ResponseHead::read_from(&mut empty).is_err());
    }

    #[test]
    fn test_header_without_colon() {
        let mut reader = Cursor::new(&b"HTTP/1.1 200 OK\r\nbroken\r\n\r\n"[..]);
        assert!(matches!(
            ResponseHead::read_from(&mut reader),
            Err(FetchError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_has_token() {
        let mut headers = Headers::new();
        headers.append("Transfer-Encoding", "gzip, Chunked");
        assert!(headers.has_token("transfer-encoding", "chunked"));
        assert!(headers.has_token("transfer-encoding", "gzip"));
        assert!(!headers.has_token("transfer-encoding", "deflate"));
        assert!(!headers.has_token("content-encoding", "gzip"));
    }
}
