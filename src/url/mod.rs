//! URL handling module for Context-Lint
//!
//! This module provides URL normalization, origin comparison, path-depth
//! calculation and page-resource filtering used by discovery and aggregation.

mod domain;
mod normalize;

use crate::UrlError;
use url::Url;

// Re-export main functions
pub use domain::{extract_domain, netloc, origin_of, same_origin};
pub use normalize::normalize_url;

/// File extensions that never point at an HTML page
const NON_PAGE_EXTENSIONS: &[&str] = &[
    "pdf", "jpg", "jpeg", "png", "gif", "svg", "webp", "ico", "bmp", "css", "js", "mjs", "json",
    "xml", "rss", "atom", "txt", "csv", "zip", "gz", "tar", "rar", "7z", "dmg", "exe", "msi",
    "mp3", "mp4", "m4a", "wav", "ogg", "webm", "mov", "avi", "woff", "woff2", "ttf", "otf", "eot",
    "doc", "docx", "xls", "xlsx", "ppt", "pptx", "apk",
];

/// Parses a URL supplied by a caller and checks that it can be audited
///
/// Only absolute HTTP(S) URLs with a host are accepted.
///
/// # Examples
///
/// ```
/// use context_lint::url::parse_audit_url;
///
/// assert!(parse_audit_url("https://example.com/docs").is_ok());
/// assert!(parse_audit_url("ftp://example.com/").is_err());
/// assert!(parse_audit_url("not a url").is_err());
/// ```
pub fn parse_audit_url(input: &str) -> Result<Url, UrlError> {
    let url = Url::parse(input.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingDomain);
    }

    Ok(url)
}

/// Returns the number of path segments in a URL
///
/// The homepage has depth 0, `/docs` depth 1, `/docs/start` depth 2.
/// Leading and trailing slashes are ignored.
pub fn path_depth(url: &str) -> usize {
    let path = match Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => return 0,
    };

    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        0
    } else {
        trimmed.split('/').count()
    }
}

/// Returns true if the URL plausibly points at an HTML page
///
/// URLs whose last path segment carries a known non-HTML extension
/// (images, archives, feeds, scripts, documents) are rejected.
pub fn is_page_resource(url: &Url) -> bool {
    let last_segment = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or("");

    match last_segment.rsplit_once('.') {
        Some((_, ext)) => !NON_PAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_audit_url_accepts_http_and_https() {
        assert!(parse_audit_url("http://example.com").is_ok());
        assert!(parse_audit_url("https://example.com/page").is_ok());
    }

    #[test]
    fn test_parse_audit_url_trims_whitespace() {
        let url = parse_audit_url("  https://example.com/  ").unwrap();
        assert_eq!(url.as_str(), "https://example.com/");
    }

    #[test]
    fn test_parse_audit_url_rejects_other_schemes() {
        let err = parse_audit_url("mailto:someone@example.com").unwrap_err();
        assert!(matches!(err, UrlError::InvalidScheme(_)));
    }

    #[test]
    fn test_parse_audit_url_rejects_garbage() {
        let err = parse_audit_url("definitely not a url").unwrap_err();
        assert!(matches!(err, UrlError::Parse(_)));
    }

    #[test]
    fn test_path_depth() {
        assert_eq!(path_depth("https://example.com"), 0);
        assert_eq!(path_depth("https://example.com/"), 0);
        assert_eq!(path_depth("https://example.com/docs"), 1);
        assert_eq!(path_depth("https://example.com/docs/"), 1);
        assert_eq!(path_depth("https://example.com/docs/start"), 2);
        assert_eq!(path_depth("https://example.com/a/b/c/d"), 4);
    }

    #[test]
    fn test_path_depth_ignores_query() {
        assert_eq!(path_depth("https://example.com/docs?page=2"), 1);
    }

    #[test]
    fn test_is_page_resource() {
        let page = Url::parse("https://example.com/docs/intro").unwrap();
        let html = Url::parse("https://example.com/index.html").unwrap();
        let pdf = Url::parse("https://example.com/files/report.PDF").unwrap();
        let image = Url::parse("https://example.com/logo.png").unwrap();
        let root = Url::parse("https://example.com/").unwrap();

        assert!(is_page_resource(&page));
        assert!(is_page_resource(&html));
        assert!(is_page_resource(&root));
        assert!(!is_page_resource(&pdf));
        assert!(!is_page_resource(&image));
    }
}
