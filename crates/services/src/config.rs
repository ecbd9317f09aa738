use std::env;
use std::fmt;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Where the quiz service lives and how to authenticate against it.
#[derive(Clone, PartialEq, Eq)]
pub struct QuizApiConfig {
    pub base_url: String,
    pub token: Option<String>,
}

impl QuizApiConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
        }
    }

    /// Attach a bearer token. Blank tokens are ignored.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.token = if token.trim().is_empty() {
            None
        } else {
            Some(token)
        };
        self
    }

    /// Read `QUIZ_API_BASE_URL` and `QUIZ_API_TOKEN`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = lookup("QUIZ_API_BASE_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.into());
        let config = Self::new(base_url);
        match lookup("QUIZ_API_TOKEN") {
            Some(token) => config.with_token(token),
            None => config,
        }
    }

    /// Absolute URL for a service path such as `/quiz/sessions/`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl Default for QuizApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl fmt::Debug for QuizApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizApiConfig")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = QuizApiConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config, QuizApiConfig::default());
        assert!(config.token.is_none());
    }

    #[test]
    fn reads_base_url_and_token() {
        let config = QuizApiConfig::from_lookup(lookup_from(&[
            ("QUIZ_API_BASE_URL", "https://quiz.example.com/api/"),
            ("QUIZ_API_TOKEN", "secret"),
        ]));
        assert_eq!(config.base_url, "https://quiz.example.com/api/");
        assert_eq!(config.token.as_deref(), Some("secret"));
    }

    #[test]
    fn blank_values_fall_back() {
        let config = QuizApiConfig::from_lookup(lookup_from(&[
            ("QUIZ_API_BASE_URL", "  "),
            ("QUIZ_API_TOKEN", " "),
        ]));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.token.is_none());
    }

    #[test]
    fn endpoint_joins_with_single_slash() {
        let config = QuizApiConfig::new("https://quiz.example.com/api/");
        assert_eq!(
            config.endpoint("/quiz/sessions/"),
            "https://quiz.example.com/api/quiz/sessions/"
        );
        assert_eq!(
            config.endpoint("quiz/all-questions/"),
            "https://quiz.example.com/api/quiz/all-questions/"
        );
    }

    #[test]
    fn debug_redacts_token() {
        let config = QuizApiConfig::default().with_token("secret");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
