use url::Url;

/// Extracts the domain from a URL
///
/// Retrieves the host portion of a URL and converts it to lowercase.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use context_lint::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Returns the host plus an explicit port, if any
///
/// This is the form reported as a site audit's `domain`.
pub fn netloc(url: &Url) -> String {
    let host = extract_domain(url).unwrap_or_default();
    match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host,
    }
}

/// Returns `scheme://host[:port]` for a URL
pub fn origin_of(url: &Url) -> String {
    format!("{}://{}", url.scheme(), netloc(url))
}

/// Returns true if both URLs share scheme, host and port
pub fn same_origin(a: &Url, b: &Url) -> bool {
    a.scheme() == b.scheme()
        && extract_domain(a) == extract_domain(b)
        && a.port_or_known_default() == b.port_or_known_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_simple_domain() {
        let url = Url::parse("https://example.com/").unwrap();
        assert_eq!(extract_domain(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_extract_mixed_case() {
        let url = Url::parse("https://Example.COM/").unwrap();
        assert_eq!(extract_domain(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_netloc_keeps_port() {
        let url = Url::parse("http://127.0.0.1:8080/page").unwrap();
        assert_eq!(netloc(&url), "127.0.0.1:8080");

        let url = Url::parse("https://example.com/page").unwrap();
        assert_eq!(netloc(&url), "example.com");
    }

    #[test]
    fn test_origin_of() {
        let url = Url::parse("https://example.com/a/b?c=d").unwrap();
        assert_eq!(origin_of(&url), "https://example.com");
    }

    #[test]
    fn test_same_origin() {
        let a = Url::parse("https://example.com/a").unwrap();
        let b = Url::parse("https://EXAMPLE.com:443/b").unwrap();
        let c = Url::parse("http://example.com/a").unwrap();
        let d = Url::parse("https://blog.example.com/a").unwrap();

        assert!(same_origin(&a, &b));
        assert!(!same_origin(&a, &c));
        assert!(!same_origin(&a, &d));
    }
}
