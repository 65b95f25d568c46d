//! Azure OpenAI chat completion client

use crate::config::AzureOpenAiConfig;
use crate::error::{Result, SolveError};
use crate::types::{ChatRequest, ChatResponseRaw};
use crate::ChatCompletion;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Chat completion client for one Azure OpenAI deployment.
///
/// Built once at startup; cloning shares the underlying connection pool.
#[derive(Clone)]
pub struct AzureOpenAiClient {
    http_client: Client,
    url: url::Url,
    api_key: String,
    deployment: String,
    timeout_secs: u64,
}

impl AzureOpenAiClient {
    /// Create a client from explicit configuration
    pub fn new(config: AzureOpenAiConfig) -> Result<Self> {
        let url = completions_url(&config)?;

        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SolveError::Config(e.to_string()))?;

        Ok(Self {
            http_client,
            url,
            api_key: config.api_key,
            deployment: config.deployment,
            timeout_secs: config.timeout_secs,
        })
    }

    /// Full chat completions URL, including the api-version parameter
    pub fn url(&self) -> &url::Url {
        &self.url
    }
}

fn completions_url(config: &AzureOpenAiConfig) -> Result<url::Url> {
    let base = config.endpoint.trim_end_matches('/');
    let mut url = url::Url::parse(&format!(
        "{}/openai/deployments/{}/chat/completions",
        base, config.deployment
    ))
    .map_err(|e| SolveError::Config(format!("invalid endpoint '{}': {}", config.endpoint, e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(SolveError::Config(format!(
            "endpoint must be http(s): {}",
            config.endpoint
        )));
    }

    url.query_pairs_mut()
        .append_pair("api-version", &config.api_version);
    Ok(url)
}

#[async_trait::async_trait]
impl ChatCompletion for AzureOpenAiClient {
    async fn complete(&self, request: &ChatRequest) -> Result<String> {
        let start = Instant::now();

        info!(deployment = %self.deployment, "Requesting chat completion");

        let response = self
            .http_client
            .post(self.url.clone())
            .header("api-key", &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                let err = SolveError::from_reqwest(e, self.timeout_secs);
                warn!(error = %err, "Chat completion request failed");
                err
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "Chat completion API error");
            return Err(SolveError::from_status(status.as_u16(), error_text));
        }

        // transport failures mid-body keep their own classification
        let body = response
            .bytes()
            .await
            .map_err(|e| SolveError::from_reqwest(e, self.timeout_secs))?;
        let raw: ChatResponseRaw = serde_json::from_slice(&body)
            .map_err(|e| SolveError::MalformedResponse(e.to_string()))?;

        let content = raw
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| SolveError::MalformedResponse("no choices in response".into()))?
            .message
            .content
            .ok_or(SolveError::EmptyCompletion)?;

        debug!(
            deployment = %self.deployment,
            duration_ms = start.elapsed().as_millis() as u64,
            response_len = content.len(),
            "Chat completion received"
        );

        Ok(content)
    }
}
