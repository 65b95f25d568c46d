//! Search result types

use serde::{Deserialize, Serialize};

/// Links scraped from one results page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOutcome {
    /// Result hrefs in page order
    pub links: Vec<String>,

    /// Result containers present on the page, before the limit was applied
    pub containers_found: usize,
}

impl SearchOutcome {
    /// Create an outcome from scraped links
    pub fn new(links: Vec<String>, containers_found: usize) -> Self {
        Self {
            links,
            containers_found,
        }
    }

    /// The page had no recognisable result markup
    pub fn is_degraded(&self) -> bool {
        self.containers_found == 0
    }

    /// Consume the outcome, keeping only the links
    pub fn into_links(self) -> Vec<String> {
        self.links
    }
}
