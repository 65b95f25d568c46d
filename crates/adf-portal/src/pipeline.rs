//! The per-submission pipeline: redact, search, explain.

use crate::config::{ConfigError, PortalConfig};
use crate::retry::{with_retry, RetryPolicy};
use adf_guard::Redactor;
use adf_search::{ForumSearcher, LinkSearch, SearchError};
use adf_solver::{
    AzureOpenAiClient, FailureKind, GeneratorConfig, SolutionGenerator, SolveError,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// What the user sees after a submission
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Outcome {
    /// Empty input; nothing ran
    Ignored,
    /// Explanation plus the references it was built from
    Solved(Solution),
    /// No explanation could be produced
    Failed(FailureNotice),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Solution {
    pub explanation: String,
    pub references: Vec<String>,
}

/// User-facing failure. Details stay in the operator log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FailureNotice {
    /// Completion service unreachable, overloaded or misconfigured
    ServiceUnavailable,
    /// The model answered but produced nothing usable
    GenerationFailed,
}

impl FailureNotice {
    pub fn message(&self) -> &'static str {
        match self {
            FailureNotice::ServiceUnavailable => {
                "The support assistant is temporarily unavailable. Please try again later."
            }
            FailureNotice::GenerationFailed => "Could not generate a solution, please retry.",
        }
    }
}

/// Redactor, searcher and generator wired together.
///
/// Built once at startup and shared across requests; holds no per-request
/// state.
pub struct Pipeline {
    redactor: Redactor,
    searcher: Arc<dyn LinkSearch>,
    generator: SolutionGenerator,
    max_links: usize,
    retry: RetryPolicy,
}

impl Pipeline {
    pub fn new(
        redactor: Redactor,
        searcher: Arc<dyn LinkSearch>,
        generator: SolutionGenerator,
        max_links: usize,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            redactor,
            searcher,
            generator,
            max_links,
            retry,
        }
    }

    /// Build the production pipeline: scraping searcher and Azure OpenAI client
    pub fn from_config(config: &PortalConfig) -> Result<Self, ConfigError> {
        let searcher = ForumSearcher::new(config.search.clone())?;
        let client = AzureOpenAiClient::new(config.azure.clone())?;

        info!(
            search_endpoint = %config.search.endpoint,
            deployment = %config.azure.deployment,
            api_version = %config.azure.api_version,
            max_attempts = config.retry.max_attempts(),
            "Pipeline configured"
        );

        Ok(Self::new(
            Redactor::default(),
            Arc::new(searcher),
            SolutionGenerator::new(Arc::new(client), GeneratorConfig::default()),
            config.search.max_results,
            config.retry.clone(),
        ))
    }

    /// Run one submission end to end
    pub async fn submit(&self, issue: &str) -> Outcome {
        if issue.trim().is_empty() {
            debug!("Ignoring empty submission");
            return Outcome::Ignored;
        }

        let sanitized = self.redactor.sanitize(issue);
        info!(
            input_len = issue.len(),
            redactions = sanitized.redaction_count(),
            "Processing submission"
        );
        let text = sanitized.into_text();

        let references = self.find_links(&text).await;

        match self.explain(&text, &references).await {
            Ok(explanation) => Outcome::Solved(Solution {
                explanation,
                references,
            }),
            Err(notice) => Outcome::Failed(notice),
        }
    }

    /// Search never fails a submission; any problem degrades to no links.
    async fn find_links(&self, text: &str) -> Vec<String> {
        let result = with_retry(&self.retry, "search", SearchError::is_retryable, || {
            self.searcher.search(text, self.max_links)
        })
        .await;

        match result {
            Ok(outcome) if outcome.is_degraded() => {
                warn!("Search page had no recognisable results, continuing without references");
                outcome.into_links()
            }
            Ok(outcome) => outcome.into_links(),
            Err(e) => {
                warn!(error = %e, "Search failed, continuing without references");
                vec![]
            }
        }
    }

    async fn explain(&self, text: &str, links: &[String]) -> Result<String, FailureNotice> {
        with_retry(&self.retry, "completion", SolveError::is_retryable, || {
            self.generator.generate(text, links)
        })
        .await
        .map_err(|e| match e.kind() {
            FailureKind::Configuration => {
                error!(error = %e, "Completion service rejected configuration; check endpoint, key and deployment");
                FailureNotice::ServiceUnavailable
            }
            FailureKind::Transient => {
                warn!(error = %e, "Completion service unavailable after retries");
                FailureNotice::ServiceUnavailable
            }
            FailureKind::Model => {
                warn!(error = %e, "Model produced no usable answer");
                FailureNotice::GenerationFailed
            }
        })
    }
}
