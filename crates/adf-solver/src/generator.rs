//! Solution generation

use crate::config::GeneratorConfig;
use crate::error::{Result, SolveError};
use crate::prompt::build_prompt;
use crate::types::{ChatMessage, ChatRequest};
use crate::ChatCompletion;
use std::sync::Arc;

/// Produces an explanation and suggested fix for a sanitized issue
#[derive(Clone)]
pub struct SolutionGenerator {
    client: Arc<dyn ChatCompletion>,
    config: GeneratorConfig,
}

impl SolutionGenerator {
    pub fn new(client: Arc<dyn ChatCompletion>, config: GeneratorConfig) -> Self {
        Self { client, config }
    }

    /// The request that [`generate`](Self::generate) would send
    pub fn build_request(&self, issue: &str, links: &[String]) -> ChatRequest {
        ChatRequest::new(self.config.temperature)
            .message(ChatMessage::system(self.config.system_prompt.clone()))
            .message(ChatMessage::user(build_prompt(issue, links)))
    }

    /// Ask the model for an explanation; the text comes back trimmed
    pub async fn generate(&self, issue: &str, links: &[String]) -> Result<String> {
        let request = self.build_request(issue, links);
        let content = self.client.complete(&request).await?;
        let explanation = content.trim();
        if explanation.is_empty() {
            return Err(SolveError::EmptyCompletion);
        }
        Ok(explanation.to_string())
    }
}
