//! Origin Guard
//!
//! Coarse same-site access check based on the browser-supplied `Origin`
//! and `Referer` headers. This is not authentication: the headers are
//! client-controlled and merely distinguish the site's own pages from
//! cross-site or direct calls.

use std::collections::HashSet;

/// Normalize a header value or configured origin to `scheme://host`.
///
/// - host is lowercased, path/query/fragment are stripped
/// - a bare host gets the `https` scheme
/// - an unparseable value normalizes to the empty string
pub fn normalize_origin(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let (scheme, rest) = match trimmed.split_once("://") {
        Some((scheme, rest)) => (scheme.to_ascii_lowercase(), rest),
        None => ("https".to_string(), trimmed),
    };

    if scheme != "http" && scheme != "https" {
        return String::new();
    }

    // Authority ends at the first path/query/fragment delimiter
    let authority = rest
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();

    if authority.is_empty() || authority.contains('@') || authority.contains(char::is_whitespace) {
        return String::new();
    }

    format!("{}://{}", scheme, authority)
}

/// Immutable-after-boot set of trusted site origins.
///
/// Built once from configuration; read-only afterwards, so it needs no lock.
#[derive(Debug, Clone)]
pub struct TrustedOriginSet {
    origins: HashSet<String>,
}

impl TrustedOriginSet {
    /// Build the set from configured origin strings. Values are normalized
    /// and duplicates collapse; unparseable entries are dropped.
    pub fn new<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let origins: HashSet<String> = origins
            .into_iter()
            .map(|origin| normalize_origin(origin.as_ref()))
            .filter(|origin| !origin.is_empty())
            .collect();
        Self { origins }
    }

    /// Parse a comma-separated configuration value (same format as the
    /// frontend-origins CORS list).
    pub fn from_comma_list(list: &str) -> Self {
        Self::new(list.split(','))
    }

    pub fn len(&self) -> usize {
        self.origins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.origins.is_empty()
    }

    /// Iterate the normalized origins (used to feed the CORS layer).
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.origins.iter().map(String::as_str)
    }

    /// Decide whether a request with the given headers is same-site.
    ///
    /// The `Origin` header wins when present; `Referer` is the fallback.
    /// A request carrying neither header is treated as a non-browser/direct
    /// call and rejected.
    pub fn is_allowed(&self, origin: Option<&str>, referer: Option<&str>) -> bool {
        if let Some(origin) = origin {
            let normalized = normalize_origin(origin);
            if !normalized.is_empty() {
                return self.origins.contains(&normalized);
            }
        }

        if let Some(referer) = referer {
            let normalized = normalize_origin(referer);
            if !normalized.is_empty() {
                return self.origins.contains(&normalized);
            }
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site_origins() -> TrustedOriginSet {
        TrustedOriginSet::from_comma_list(
            "https://welcometodeviltown.com, https://www.welcometodeviltown.com",
        )
    }

    #[test]
    fn test_normalize_origin() {
        assert_eq!(
            normalize_origin("https://Welcometodeviltown.COM"),
            "https://welcometodeviltown.com"
        );
        assert_eq!(
            normalize_origin("https://www.welcometodeviltown.com/page?x=1"),
            "https://www.welcometodeviltown.com"
        );
        assert_eq!(
            normalize_origin("welcometodeviltown.com"),
            "https://welcometodeviltown.com"
        );
        assert_eq!(
            normalize_origin("http://localhost:8999"),
            "http://localhost:8999"
        );
        assert_eq!(normalize_origin(""), "");
        assert_eq!(normalize_origin("ftp://example.com"), "");
        assert_eq!(normalize_origin("https://"), "");
    }

    #[test]
    fn test_allowed_origin() {
        let set = site_origins();
        assert!(set.is_allowed(Some("https://welcometodeviltown.com"), None));
    }

    #[test]
    fn test_rejected_origin() {
        let set = site_origins();
        assert!(!set.is_allowed(Some("https://evil.example"), None));
    }

    #[test]
    fn test_referer_fallback() {
        let set = site_origins();
        assert!(set.is_allowed(None, Some("https://www.welcometodeviltown.com/page")));
    }

    #[test]
    fn test_neither_header_rejected() {
        let set = site_origins();
        assert!(!set.is_allowed(None, None));
    }

    #[test]
    fn test_origin_takes_precedence_over_referer() {
        let set = site_origins();
        // A disallowed Origin is not rescued by an allowed Referer
        assert!(!set.is_allowed(
            Some("https://evil.example"),
            Some("https://welcometodeviltown.com/page"),
        ));
    }

    #[test]
    fn test_duplicates_collapse() {
        let set = TrustedOriginSet::from_comma_list(
            "https://welcometodeviltown.com,https://WELCOMETODEVILTOWN.com,,bogus://x",
        );
        assert_eq!(set.len(), 1);
    }
}
