use std::collections::BTreeMap;

use thiserror::Error;
use url::Url;

/// Base used to resolve the relative URLs the router hands us.
const RESOLVE_BASE: &str = "http://localhost/";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NavigationParseError {
    #[error("invalid navigation url {raw:?}: {reason}")]
    InvalidUrl { raw: String, reason: String },
}

/// One navigation attempt, as supplied by the router.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NavigationContext {
    pub target_path: String,
    pub origin_path: String,
    pub query: BTreeMap<String, String>,
}

impl NavigationContext {
    #[must_use]
    pub fn new(target_path: impl Into<String>, origin_path: impl Into<String>) -> Self {
        Self {
            target_path: target_path.into(),
            origin_path: origin_path.into(),
            query: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Build a context from router URLs such as `/quiz/question?sessionId=abc`.
    ///
    /// Query parameters are taken from the target; the origin contributes
    /// only its path. When a key repeats, the first occurrence wins.
    ///
    /// # Errors
    ///
    /// Returns `NavigationParseError::InvalidUrl` if either URL cannot be parsed.
    pub fn from_urls(target: &str, origin: &str) -> Result<Self, NavigationParseError> {
        let target_url = resolve(target)?;
        let origin_url = resolve(origin)?;

        let mut query = BTreeMap::new();
        for (key, value) in target_url.query_pairs() {
            query
                .entry(key.into_owned())
                .or_insert_with(|| value.into_owned());
        }

        Ok(Self {
            target_path: target_url.path().to_owned(),
            origin_path: origin_url.path().to_owned(),
            query,
        })
    }

    /// Whether the target carries `key` at all, regardless of its value.
    #[must_use]
    pub fn has_query(&self, key: &str) -> bool {
        self.query.contains_key(key)
    }
}

fn resolve(raw: &str) -> Result<Url, NavigationParseError> {
    let base = Url::parse(RESOLVE_BASE).map_err(|e| invalid(RESOLVE_BASE, &e))?;
    base.join(raw).map_err(|e| invalid(raw, &e))
}

fn invalid(raw: &str, err: &url::ParseError) -> NavigationParseError {
    NavigationParseError::InvalidUrl {
        raw: raw.to_owned(),
        reason: err.to_string(),
    }
}

/// Normalize a route path for comparison: trailing slashes are dropped and an
/// empty path becomes `/`.
#[must_use]
pub fn normalize_path(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_target_query() {
        let ctx = NavigationContext::from_urls("/quiz/question?sessionId=AROMA_1&x=2", "/")
            .unwrap();
        assert_eq!(ctx.target_path, "/quiz/question");
        assert_eq!(ctx.origin_path, "/");
        assert_eq!(ctx.query.get("sessionId").map(String::as_str), Some("AROMA_1"));
        assert!(ctx.has_query("x"));
    }

    #[test]
    fn empty_query_value_still_counts_as_present() {
        let ctx = NavigationContext::from_urls("/quiz/question?sessionId", "/about").unwrap();
        assert!(ctx.has_query("sessionId"));
        assert_eq!(ctx.query.get("sessionId").map(String::as_str), Some(""));
    }

    #[test]
    fn origin_query_is_ignored() {
        let ctx = NavigationContext::from_urls("/quiz", "/quiz/history?page=2").unwrap();
        assert_eq!(ctx.origin_path, "/quiz/history");
        assert!(ctx.query.is_empty());
    }

    #[test]
    fn repeated_key_keeps_first_value() {
        let ctx = NavigationContext::from_urls("/q?sessionId=a&sessionId=b", "/").unwrap();
        assert_eq!(ctx.query.get("sessionId").map(String::as_str), Some("a"));
    }

    #[test]
    fn rejects_unparsable_url() {
        let err = NavigationContext::from_urls("http://[::1", "/").unwrap_err();
        assert!(matches!(err, NavigationParseError::InvalidUrl { .. }));
    }

    #[test]
    fn normalizes_trailing_slashes() {
        assert_eq!(normalize_path("/quiz/"), "/quiz");
        assert_eq!(normalize_path("/quiz"), "/quiz");
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path(""), "/");
    }
}
