//! Redirect target resolution.
//!
//! [RFC 9110 § 10.2.2 Location](https://www.rfc-editor.org/rfc/rfc9110#field.location)

/// Resolve the value of a `Location` header against the request that
/// produced it.
///
/// # Algorithm
///
/// STEP 1: If `location` begins with `/` it is an absolute path on the same
/// origin: prefix it with `scheme://authority`.
///
/// STEP 2: Anything else is returned unchanged. Absolute URLs need no work;
/// relative references such as `next.html` are passed through as-is and will
/// be parsed as a local file path by the locator.
///
/// `authority` is the host, followed by `:port` when the request used a
/// non-default port.
#[must_use]
pub fn resolve_location(location: &str, scheme: &str, authority: &str) -> String {
    // STEP 1: Absolute path - join with origin
    if location.starts_with('/') {
        return format!("{scheme}://{authority}{location}");
    }

    // STEP 2: Absolute URL or unresolved relative reference.
    //
    // TODO(url-resolution): resolve dot-segment relative references against
    // the request path instead of passing them through.
    location.to_string()
}

/// Format the authority component for a request: `host` or `host:port` when
/// `port` differs from the scheme default.
#[must_use]
pub fn authority(host: &str, port: u16, default_port: u16) -> String {
    if port == default_port {
        host.to_string()
    } else {
        format!("{host}:{port}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_path_joins_origin() {
        assert_eq!(
            resolve_location("/next", "https", "example.org"),
            "https://example.org/next"
        );
    }

    #[test]
    fn test_absolute_url_unchanged() {
        assert_eq!(
            resolve_location("http://other.test/a", "https", "example.org"),
            "http://other.test/a"
        );
    }

    #[test]
    fn test_relative_reference_passed_through() {
        assert_eq!(resolve_location("page.html", "http", "example.org"), "page.html");
    }

    #[test]
    fn test_authority_includes_non_default_port() {
        assert_eq!(authority("localhost", 8080, 80), "localhost:8080");
        assert_eq!(authority("localhost", 80, 80), "localhost");
    }
}
