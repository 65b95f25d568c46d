//! Solver configuration

use crate::prompt::SYSTEM_PROMPT;
use serde::{Deserialize, Serialize};

/// Deployment used when none is configured
pub const DEFAULT_DEPLOYMENT: &str = "gpt-4o-mini";

/// Azure OpenAI REST API version used when none is configured
pub const DEFAULT_API_VERSION: &str = "2024-02-15-preview";

/// Connection settings for an Azure OpenAI deployment
#[derive(Clone)]
pub struct AzureOpenAiConfig {
    /// Resource endpoint, e.g. `https://my-resource.openai.azure.com`
    pub endpoint: String,
    pub api_key: String,
    pub deployment: String,
    pub api_version: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl AzureOpenAiConfig {
    /// Create a config with default deployment, API version and timeout
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            deployment: DEFAULT_DEPLOYMENT.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout_secs: 30,
        }
    }

    pub fn with_deployment(mut self, deployment: impl Into<String>) -> Self {
        self.deployment = deployment.into();
        self
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

impl std::fmt::Debug for AzureOpenAiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzureOpenAiConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"***")
            .field("deployment", &self.deployment)
            .field("api_version", &self.api_version)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Prompting parameters for the solution generator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Sampling temperature
    pub temperature: f32,
    /// System instruction sent ahead of the prompt
    pub system_prompt: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            temperature: 0.4,
            system_prompt: SYSTEM_PROMPT.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_hides_api_key() {
        let config = AzureOpenAiConfig::new("https://x.openai.azure.com", "super-secret");
        let printed = format!("{:?}", config);
        assert!(!printed.contains("super-secret"));
        assert!(printed.contains("gpt-4o-mini"));
    }
}
