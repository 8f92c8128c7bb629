//! Body framing and content decoding.
//!
//! [RFC 9112 § 6.3 Message Body Length](https://www.rfc-editor.org/rfc/rfc9112#name-message-body-length)
//! [RFC 9112 § 7.1 Chunked Transfer Coding](https://www.rfc-editor.org/rfc/rfc9112#name-chunked-transfer-coding)

use std::io::{self, BufRead, Read};

use flate2::read::GzDecoder;
use tern_common::warning::warn_once;

use crate::error::FetchError;
use crate::response::Headers;

/// Read one line, without its trailing CR LF. `None` at end of stream.
///
/// # Errors
///
/// Returns [`FetchError::Io`] if reading fails.
pub fn read_line<R: BufRead>(reader: &mut R) -> Result<Option<String>, FetchError> {
    let mut raw = Vec::new();
    if reader.read_until(b'\n', &mut raw)? == 0 {
        return Ok(None);
    }
    while matches!(raw.last(), Some(b'\n' | b'\r')) {
        let _ = raw.pop();
    }
    Ok(Some(String::from_utf8_lossy(&raw).into_owned()))
}

/// Read the body that follows a response head, removing any chunked
/// framing.
///
/// # Errors
///
/// Returns [`FetchError::MissingHeader`] when the body is neither chunked
/// nor has a `Content-Length`, [`FetchError::MalformedResponse`] for a
/// non-numeric length, [`FetchError::InvalidChunkSize`] for bad chunk
/// framing, and [`FetchError::Io`] if the stream ends early.
pub fn read_body<R: BufRead>(reader: &mut R, headers: &Headers) -> Result<Vec<u8>, FetchError> {
    if headers.has_token("transfer-encoding", "chunked") {
        return dechunk(reader);
    }

    let length = headers
        .get("content-length")
        .ok_or(FetchError::MissingHeader("content-length"))?;
    let length: u64 = length
        .parse()
        .map_err(|_| FetchError::MalformedResponse(format!("bad content-length {length:?}")))?;

    let mut body = Vec::new();
    read_exactly(reader, length, &mut body)?;
    Ok(body)
}

/// Append exactly `length` bytes from `reader` to `buf`.
fn read_exactly<R: Read>(reader: &mut R, length: u64, buf: &mut Vec<u8>) -> Result<(), FetchError> {
    let read = reader.by_ref().take(length).read_to_end(buf)?;
    if u64::try_from(read).ok() == Some(length) {
        Ok(())
    } else {
        Err(FetchError::Io(io::ErrorKind::UnexpectedEof.into()))
    }
}

/// Reassemble a chunked body.
///
/// Each chunk is a hexadecimal size line (extensions after `;` ignored),
/// that many bytes, then CR LF. A size of zero ends the body; trailer
/// fields after it are not read.
///
/// # Errors
///
/// Returns [`FetchError::InvalidChunkSize`] for a size line that is not
/// hexadecimal and [`FetchError::Io`] if the stream ends inside a chunk.
pub fn dechunk<R: BufRead>(reader: &mut R) -> Result<Vec<u8>, FetchError> {
    let mut body = Vec::new();
    loop {
        let line = read_line(reader)?
            .ok_or_else(|| FetchError::InvalidChunkSize("<end of stream>".to_string()))?;
        let size_field = line.split(';').next().unwrap_or_default().trim();
        let size = u64::from_str_radix(size_field, 16)
            .map_err(|_| FetchError::InvalidChunkSize(line.clone()))?;
        if size == 0 {
            break;
        }

        read_exactly(reader, size, &mut body)?;

        let mut crlf = [0; 2];
        reader.read_exact(&mut crlf)?;
    }
    Ok(body)
}

/// True if either transfer or content coding lists gzip.
#[must_use]
pub fn is_compressed(headers: &Headers) -> bool {
    headers.has_token("transfer-encoding", "gzip") || headers.has_token("content-encoding", "gzip")
}

/// Decompress a gzip stream.
///
/// # Errors
///
/// Returns [`FetchError::Decompress`] if the data is not valid gzip.
pub fn gunzip(data: &[u8]) -> Result<Vec<u8>, FetchError> {
    let mut decoded = Vec::new();
    let _ = GzDecoder::new(data)
        .read_to_end(&mut decoded)
        .map_err(FetchError::Decompress)?;
    Ok(decoded)
}

/// Turn a framed body into text: gunzip when the headers say so, then
/// decode as UTF-8 with invalid sequences replaced.
///
/// # Errors
///
/// Returns [`FetchError::Decompress`] if a gzip body is corrupt.
pub fn decode_content(body: &[u8], headers: &Headers) -> Result<String, FetchError> {
    let unsupported = headers
        .get("content-encoding")
        .filter(|coding| !["gzip", "identity"].iter().any(|known| coding.eq_ignore_ascii_case(known)));
    if let Some(coding) = unsupported {
        warn_once(
            "Decoder",
            &format!("unsupported content-encoding {coding:?}, passing through"),
        );
    }

    if is_compressed(headers) {
        let decoded = gunzip(body)?;
        Ok(String::from_utf8_lossy(&decoded).into_owned())
    } else {
        Ok(String::from_utf8_lossy(body).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Write};

    use flate2::Compression;
    use flate2::write::GzEncoder;

    use super::*;

    fn headers(pairs: &[(&str, &str)]) -> Headers {
        let mut headers = Headers::new();
        for (name, value) in pairs {
            headers.append(name, value);
        }
        headers
    }

    fn gzip(data: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).expect("compress");
        encoder.finish().expect("finish")
    }

    #[test]
    fn test_dechunk() {
        let mut reader = Cursor::new(&b"4\r\nWiki\r\n0\r\n\r\n"[..]);
        assert_eq!(dechunk(&mut reader).expect("dechunk"), b"Wiki");
    }

    #[test]
    fn test_dechunk_multiple_with_extension() {
        let mut reader = Cursor::new(&b"4;name=x\r\nWiki\r\nA\r\npedia is g\r\n0\r\n\r\n"[..]);
        assert_eq!(dechunk(&mut reader).expect("dechunk"), b"Wikipedia is g");
    }

    #[test]
    fn test_dechunk_bad_size() {
        let mut reader = Cursor::new(&b"zz\r\nWiki\r\n0\r\n\r\n"[..]);
        assert!(matches!(
            dechunk(&mut reader),
            Err(FetchError::InvalidChunkSize(_))
        ));
    }

    #[test]
    fn test_dechunk_truncated() {
        let mut reader = Cursor::new(&b"10\r\nshort"[..]);
        assert!(matches!(dechunk(&mut reader), Err(FetchError::Io(_))));
    }

    #[test]
    fn test_read_body_content_length() {
        let mut reader = Cursor::new(&b"hello world"[..]);
        let body = read_body(&mut reader, &headers(&[("Content-Length", "5")])).expect("body");
        assert_eq!(body, b"hello");
    }

    #[test]
    fn test_read_body_without_length() {
        let mut reader = Cursor::new(&b"hello"[..]);
        assert!(matches!(
            read_body(&mut reader, &Headers::new()),
            Err(FetchError::MissingHeader("content-length"))
        ));
    }

    #[test]
    fn test_read_body_bad_length() {
        let mut reader = Cursor::new(&b"hello"[..]);
        assert!(matches!(
            read_body(&mut reader, &headers(&[("Content-Length", "five")])),
            Err(FetchError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_gzip_via_either_header() {
        let packed = gzip(b"<p>hi</p>");
        for name in ["Content-Encoding", "Transfer-Encoding"] {
            let text = decode_content(&packed, &headers(&[(name, "gzip")])).expect("decode");
            assert_eq!(text, "<p>hi</p>");
        }
    }

    #[test]
    fn test_corrupt_gzip() {
        let result = decode_content(b"not gzip", &headers(&[("Content-Encoding", "gzip")]));
        assert!(matches!(result, Err(FetchError::Decompress(_))));
    }

    #[test]
    fn test_lossy_utf8() {
        let text = decode_content(b"a\xffb", &Headers::new()).expect("decode");
        assert_eq!(text, "a\u{FFFD}b");
    }

    #[test]
    fn test_read_line_strips_crlf() {
        let mut reader = Cursor::new(&b"one\r\ntwo\nthree"[..]);
        assert_eq!(read_line(&mut reader).expect("line").as_deref(), Some("one"));
        assert_eq!(read_line(&mut reader).expect("line").as_deref(), Some("two"));
        assert_eq!(read_line(&mut reader).expect("line").as_deref(), Some("three"));
        assert_eq!(read_line(&mut reader).expect("line"), None);
    }
}
