//! Portal configuration, read once from the process environment at startup.

use crate::retry::RetryPolicy;
use adf_search::SearchConfig;
use adf_solver::AzureOpenAiConfig;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

pub const ENV_ENDPOINT: &str = "AZURE_OPENAI_ENDPOINT";
pub const ENV_API_KEY: &str = "AZURE_OPENAI_KEY";
pub const ENV_DEPLOYMENT: &str = "AZURE_OPENAI_DEPLOYMENT";
pub const ENV_API_VERSION: &str = "AZURE_OPENAI_API_VERSION";
pub const ENV_SEARCH_URL: &str = "ADF_SEARCH_URL";
pub const ENV_SEARCH_RESULTS: &str = "ADF_SEARCH_RESULTS";
pub const ENV_SEARCH_TIMEOUT: &str = "ADF_SEARCH_TIMEOUT_SECS";
pub const ENV_COMPLETION_TIMEOUT: &str = "ADF_COMPLETION_TIMEOUT_SECS";
pub const ENV_MAX_ATTEMPTS: &str = "ADF_MAX_ATTEMPTS";

/// Startup configuration failures. These are operator problems and stop the
/// process before it serves anything.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value '{value}' for {var}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("search configuration: {0}")]
    Search(#[from] adf_search::SearchError),

    #[error("completion configuration: {0}")]
    Completion(#[from] adf_solver::SolveError),
}

/// Everything the pipeline needs, fixed for the life of the process
#[derive(Debug, Clone)]
pub struct PortalConfig {
    pub azure: AzureOpenAiConfig,
    pub search: SearchConfig,
    pub retry: RetryPolicy,
}

impl PortalConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from any key lookup; blank values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let endpoint = get(ENV_ENDPOINT).ok_or(ConfigError::Missing(ENV_ENDPOINT))?;
        let api_key = get(ENV_API_KEY).ok_or(ConfigError::Missing(ENV_API_KEY))?;

        let mut azure = AzureOpenAiConfig::new(endpoint, api_key);
        if let Some(deployment) = get(ENV_DEPLOYMENT) {
            azure = azure.with_deployment(deployment);
        }
        if let Some(version) = get(ENV_API_VERSION) {
            azure = azure.with_api_version(version);
        }
        if let Some(timeout) = parse_var::<u64>(ENV_COMPLETION_TIMEOUT, get(ENV_COMPLETION_TIMEOUT))? {
            azure = azure.with_timeout(timeout);
        }

        let mut search = SearchConfig::default();
        if let Some(url) = get(ENV_SEARCH_URL) {
            search = search.with_endpoint(url);
        }
        if let Some(results) = parse_var::<usize>(ENV_SEARCH_RESULTS, get(ENV_SEARCH_RESULTS))? {
            search = search.with_max_results(results);
        }
        if let Some(timeout) = parse_var::<u64>(ENV_SEARCH_TIMEOUT, get(ENV_SEARCH_TIMEOUT))? {
            search = search.with_timeout(timeout);
        }

        let retry = match parse_var::<usize>(ENV_MAX_ATTEMPTS, get(ENV_MAX_ATTEMPTS))? {
            Some(0) | Some(1) => RetryPolicy::None,
            Some(attempts) => {
                RetryPolicy::exponential(attempts, Duration::from_millis(500), Duration::from_secs(5), 2.0)
            }
            None => RetryPolicy::default(),
        };

        Ok(Self {
            azure,
            search,
            retry,
        })
    }
}

fn parse_var<T>(var: &'static str, value: Option<String>) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::Invalid {
                var,
                value,
                reason: e.to_string(),
            }),
    }
}

/// Load `.env` into the process environment if one exists
pub fn load_dotenv() {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            warn!(error = %e, "Ignoring unreadable .env file");
        }
    }
}
