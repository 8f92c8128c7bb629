//! Request emission.

use std::io::Write;

/// Build the request head for `GET path` on `host`.
///
/// Every line ends in CRLF and the head ends with an empty line. The client
/// always asks the server to close the connection and offers gzip.
#[must_use]
pub fn format_request(host: &str, path: &str, user_agent: &str) -> String {
    format!(
        "GET {path} HTTP/1.1\r\n\
         Host: {host}\r\n\
         User-Agent: {user_agent}\r\n\
         Connection: close\r\n\
         Accept-Encoding: gzip\r\n\
         \r\n"
    )
}

/// Write the request head for `GET path` to `stream` and flush it.
///
/// # Errors
///
/// Returns any I/O error from writing to the stream.
pub fn send_request<W: Write>(
    stream: &mut W,
    host: &str,
    path: &str,
    user_agent: &str,
) -> std::io::Result<()> {
    stream.write_all(format_request(host, path, user_agent).as_bytes())?;
    stream.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_format() {
        assert_eq!(
            format_request("example.org", "/index.html", "tern/test"),
            "GET /index.html HTTP/1.1\r\nHost: example.org\r\nUser-Agent: tern/test\r\n\
             Connection: close\r\nAccept-Encoding: gzip\r\n\r\n"
        );
    }

    #[test]
    fn test_send_request_writes_all_bytes() {
        let mut sink = Vec::new();
        send_request(&mut sink, "h", "/", "ua").expect("write to vec");
        assert_eq!(sink, format_request("h", "/", "ua").into_bytes());
    }
}
