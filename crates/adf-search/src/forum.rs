//! Search results page scraping

use crate::{config::SearchConfig, error::Result, LinkSearch, SearchError, SearchOutcome};
use reqwest::{Client, Response};
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::{debug, info};

/// Scrapes result links for an issue from a web search results page
pub struct ForumSearcher {
    config: SearchConfig,
    client: Client,
}

impl ForumSearcher {
    /// Create a new searcher with the given configuration
    pub fn new(config: SearchConfig) -> Result<Self> {
        // Fail at startup rather than on the first search
        parse_selector(&config.container_selector)?;
        parse_selector(&config.link_selector)?;
        url::Url::parse(&config.endpoint)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| SearchError::Client(e.to_string()))?;

        Ok(Self { config, client })
    }

    /// Configuration this searcher was built with
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Search with the configured default limit
    pub async fn search_default(&self, query: &str) -> Result<SearchOutcome> {
        self.search(query, self.config.max_results).await
    }

    fn request_url(&self, query: &str) -> Result<url::Url> {
        let augmented = self.config.augment_query(query);
        Ok(url::Url::parse_with_params(
            &self.config.endpoint,
            &[("q", augmented.as_str())],
        )?)
    }
}

#[async_trait::async_trait]
impl LinkSearch for ForumSearcher {
    async fn search(&self, query: &str, limit: usize) -> Result<SearchOutcome> {
        let url = self.request_url(query)?;
        let timeout = self.config.timeout_secs;

        info!(endpoint = %self.config.endpoint, query_len = query.len(), "Searching forums");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SearchError::from_reqwest(e, timeout))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Http {
                status: status.as_u16(),
                message: status.to_string(),
            });
        }

        let body = read_body(response, self.config.max_body_bytes, timeout).await?;

        let outcome = parse_result_links(
            &body,
            &self.config.container_selector,
            &self.config.link_selector,
            limit,
        )?;

        debug!(
            containers = outcome.containers_found,
            links = outcome.links.len(),
            "Parsed search results"
        );

        Ok(outcome)
    }
}

/// Read the page in chunks, giving up once it passes `limit` bytes
async fn read_body(mut response: Response, limit: usize, timeout: u64) -> Result<String> {
    if response.content_length().is_some_and(|len| len > limit as u64) {
        return Err(SearchError::BodyTooLarge { limit });
    }

    let mut body = Vec::new();
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| SearchError::from_reqwest(e, timeout))?
    {
        if body.len() + chunk.len() > limit {
            return Err(SearchError::BodyTooLarge { limit });
        }
        body.extend_from_slice(&chunk);
    }

    Ok(String::from_utf8_lossy(&body).into_owned())
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| SearchError::InvalidSelector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

/// Extract the first link of each of the first `limit` result containers.
///
/// A container without a matching link is skipped, so fewer than `limit`
/// links may come back even when the page has more containers.
pub fn parse_result_links(
    html: &str,
    container_selector: &str,
    link_selector: &str,
    limit: usize,
) -> Result<SearchOutcome> {
    let containers = parse_selector(container_selector)?;
    let link = parse_selector(link_selector)?;
    let document = Html::parse_document(html);

    let matched: Vec<_> = document.select(&containers).collect();
    let links = matched
        .iter()
        .take(limit)
        .filter_map(|container| {
            container
                .select(&link)
                .next()
                .and_then(|anchor| anchor.value().attr("href"))
                .map(|href| href.to_string())
        })
        .collect();

    Ok(SearchOutcome::new(links, matched.len()))
}
