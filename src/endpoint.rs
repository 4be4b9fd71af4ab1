//! Endpoint classification.
//!
//! Classifies an inbound request URL into one of the five static-asset
//! endpoints the interceptor knows how to merge.

use regex_lite::Regex;

/// The overlay-enabled endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Navigation bundles (the recursive merge).
    Navigation,
    /// Flat search-index entries.
    SearchIndex,
    /// Nested category/group/tile catalog.
    ServiceTiles,
    /// Keyed module registry.
    Modules,
    /// Flat widget-registry entries.
    WidgetRegistry,
}

/// URL patterns, matched anywhere in the URL. The service segment is not
/// pinned; any single path segment is accepted.
const PATTERNS: &[(Endpoint, &str)] = &[
    (
        Endpoint::Navigation,
        r"/api/[^/]+/v1/static/bundles-generated\.json",
    ),
    (
        Endpoint::SearchIndex,
        r"/api/[^/]+/v1/static/search-index-generated\.json",
    ),
    (
        Endpoint::ServiceTiles,
        r"/api/[^/]+/v1/static/service-tiles-generated\.json",
    ),
    (
        Endpoint::Modules,
        r"/api/[^/]+/v1/static/fed-modules-generated\.json",
    ),
    (
        Endpoint::WidgetRegistry,
        r"/api/[^/]+/v1/static/widget-registry-generated\.json",
    ),
];

impl Endpoint {
    /// Classify a request URL, or `None` when no endpoint matches.
    pub fn classify(url: &str) -> Option<Endpoint> {
        PATTERNS
            .iter()
            .find(|(_, pattern)| Regex::new(pattern).unwrap().is_match(url))
            .map(|(endpoint, _)| *endpoint)
    }

    /// Stable name for logs and CLI output.
    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::Navigation => "navigation",
            Endpoint::SearchIndex => "search-index",
            Endpoint::ServiceTiles => "service-tiles",
            Endpoint::Modules => "modules",
            Endpoint::WidgetRegistry => "widget-registry",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_all_endpoints() {
        let cases = [
            (
                "https://console.example.com/api/chrome-service/v1/static/bundles-generated.json",
                Endpoint::Navigation,
            ),
            (
                "/api/chrome-service/v1/static/search-index-generated.json",
                Endpoint::SearchIndex,
            ),
            (
                "/api/chrome-service/v1/static/service-tiles-generated.json",
                Endpoint::ServiceTiles,
            ),
            (
                "/api/chrome-service/v1/static/fed-modules-generated.json",
                Endpoint::Modules,
            ),
            (
                "/api/chrome-service/v1/static/widget-registry-generated.json",
                Endpoint::WidgetRegistry,
            ),
        ];
        for (url, expected) in cases {
            assert_eq!(Endpoint::classify(url), Some(expected), "{}", url);
        }
    }

    #[test]
    fn test_classify_any_service_segment() {
        assert_eq!(
            Endpoint::classify("/api/other-service/v1/static/bundles-generated.json"),
            Some(Endpoint::Navigation)
        );
    }

    #[test]
    fn test_classify_with_query_string() {
        assert_eq!(
            Endpoint::classify("/api/chrome-service/v1/static/bundles-generated.json?ts=1"),
            Some(Endpoint::Navigation)
        );
    }

    #[test]
    fn test_classify_rejects_near_misses() {
        assert_eq!(
            Endpoint::classify("/api/chrome-service/v2/static/bundles-generated.json"),
            None
        );
        assert_eq!(
            Endpoint::classify("/api/chrome-service/v1/static/bundles.json"),
            None
        );
        assert_eq!(
            Endpoint::classify("/api/v1/static/bundles-generated.json"),
            None
        );
        assert_eq!(Endpoint::classify("/totally/unrelated"), None);
    }
}
