use crate::UrlError;
use url::Url;

/// Query parameters that identify a campaign rather than a page
const TRACKING_PARAMS: &[&str] = &["fbclid", "gclid", "msclkid", "mc_eid", "_ga"];

/// Normalizes a URL so discovered pages can be deduplicated
///
/// Two links that lead to the same document must normalize to the same
/// string. Scheme and `www.` are preserved because they change the origin.
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject non-HTTP(S) schemes and missing hosts
/// 2. Lowercase the host
/// 3. Collapse empty and dot segments, drop the trailing slash (except root)
/// 4. Remove the fragment
/// 5. Remove tracking query parameters, sort the rest, drop an empty query
///
/// # Examples
///
/// ```
/// use context_lint::url::normalize_url;
///
/// let url = normalize_url("https://EXAMPLE.COM/docs/#intro").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/docs");
/// ```
pub fn normalize_url(url_str: &str) -> Result<Url, UrlError> {
    let mut url = Url::parse(url_str).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    let host = url
        .host_str()
        .map(|h| h.to_lowercase())
        .ok_or(UrlError::MissingDomain)?;
    url.set_host(Some(&host))
        .map_err(|e| UrlError::Parse(e.to_string()))?;

    let path = normalize_path(url.path());
    url.set_path(&path);

    url.set_fragment(None);

    if url.query().is_some() {
        let params = filter_and_sort_query_params(&url);
        if params.is_empty() {
            url.set_query(None);
        } else {
            url.query_pairs_mut().clear().extend_pairs(params);
        }
    }

    Ok(url)
}

fn normalize_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => continue,
            ".." => {
                segments.pop();
            }
            _ => segments.push(segment),
        }
    }

    format!("/{}", segments.join("/"))
}

fn filter_and_sort_query_params(url: &Url) -> Vec<(String, String)> {
    let mut params: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| !is_tracking_param(key))
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    params.sort();
    params
}

fn is_tracking_param(key: &str) -> bool {
    key.starts_with("utm_") || TRACKING_PARAMS.contains(&key)
}
