//! Searcher configuration

use serde::{Deserialize, Serialize};

/// Default result page endpoint
pub const DEFAULT_SEARCH_URL: &str = "https://www.google.com/search";

/// Sites the query is restricted to
pub const DEFAULT_SITE_FILTER: &str =
    "site:learn.microsoft.com OR site:stackoverflow.com OR site:reddit.com";

/// Default cap on a results page
pub const DEFAULT_MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Configuration for the forum searcher
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Search endpoint; the query is sent as the `q` parameter
    pub endpoint: String,

    /// Clause appended to every query
    pub site_filter: String,

    /// Number of links returned when the caller has no preference
    pub max_results: usize,

    /// User agent for search requests
    pub user_agent: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Largest results page accepted, in bytes
    pub max_body_bytes: usize,

    /// CSS selector for one result container
    pub container_selector: String,

    /// CSS selector for the link inside a container (first match wins)
    pub link_selector: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_SEARCH_URL.to_string(),
            site_filter: DEFAULT_SITE_FILTER.to_string(),
            max_results: 3,
            user_agent: "Mozilla/5.0".to_string(),
            timeout_secs: 10,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            container_selector: "div.tF2Cxc".to_string(),
            link_selector: "a[href]".to_string(),
        }
    }
}

impl SearchConfig {
    /// Use a different search endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the default number of links
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Set the largest results page accepted
    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }

    /// Set the result container selector
    pub fn with_container_selector(mut self, selector: impl Into<String>) -> Self {
        self.container_selector = selector.into();
        self
    }

    /// Query actually sent: the issue text plus the site restriction
    pub fn augment_query(&self, query: &str) -> String {
        if self.site_filter.is_empty() {
            query.to_string()
        } else {
            format!("{} {}", query, self.site_filter)
        }
    }
}
