//! API client configuration.
//!
//! The base URL comes from `QUESTIONNAIRE_API_URL` at build time, then from
//! the page's own origin, then from [`DEFAULT_BASE_URL`].

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL without a trailing slash.
    pub base_url: String,
    pub timeout: Duration,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self { base_url: base_url.trim_end_matches('/').to_owned(), timeout: DEFAULT_TIMEOUT }
    }

    /// Resolve configuration from the build environment and the current page.
    pub fn from_env() -> Self {
        Self::new(resolve_base_url(option_env!("QUESTIONNAIRE_API_URL"), page_origin()))
    }

    /// Join `path` (which starts with `/`) onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Pick the first non-blank candidate, falling back to [`DEFAULT_BASE_URL`].
pub fn resolve_base_url(configured: Option<&str>, origin: Option<String>) -> String {
    configured
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .or_else(|| origin.filter(|s| !s.trim().is_empty() && s != "null"))
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned())
}

fn page_origin() -> Option<String> {
    #[cfg(feature = "hydrate")]
    {
        web_sys::window()?.location().origin().ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}
