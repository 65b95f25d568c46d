//! # ADF Search
//!
//! Finds a handful of reference links for a (sanitized) support issue by
//! scraping a web search results page.
//!
//! The query is restricted to a small allow-list of knowledge-sharing sites,
//! sent as a single GET, and the first anchor of each result container is
//! collected, up to a limit.
//!
//! ## Example
//!
//! ```rust,ignore
//! use adf_search::{ForumSearcher, LinkSearch, SearchConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let searcher = ForumSearcher::new(SearchConfig::default())?;
//!     let outcome = searcher.search("copy activity timeout", 3).await?;
//!     for link in &outcome.links {
//!         println!("{}", link);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Fragility
//!
//! Result pages are unversioned third-party markup. When the markup changes
//! the container selector stops matching and searches quietly return no
//! links; [`SearchOutcome::is_degraded`] lets the caller notice. Transport
//! failures are reported as [`SearchError`] and never conflated with an empty
//! page.

pub mod config;
pub mod error;
pub mod forum;
pub mod result;

pub use config::SearchConfig;
pub use error::{Result, SearchError};
pub use forum::ForumSearcher;
pub use result::SearchOutcome;

/// Source of reference links for an issue
#[async_trait::async_trait]
pub trait LinkSearch: Send + Sync {
    /// Search for `query` and return at most `limit` links in page order
    async fn search(&self, query: &str, limit: usize) -> Result<SearchOutcome>;
}
