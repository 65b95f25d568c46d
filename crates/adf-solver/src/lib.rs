//! # ADF Solver
//!
//! Asks a hosted chat-completion model to explain a support issue and
//! suggest a fix, given the sanitized issue text and any reference links the
//! searcher found.
//!
//! ```rust,ignore
//! use adf_solver::{AzureOpenAiClient, AzureOpenAiConfig, GeneratorConfig, SolutionGenerator};
//! use std::sync::Arc;
//!
//! let client = AzureOpenAiClient::new(AzureOpenAiConfig::new(endpoint, api_key))?;
//! let generator = SolutionGenerator::new(Arc::new(client), GeneratorConfig::default());
//! let explanation = generator.generate(&sanitized, &links).await?;
//! ```
//!
//! The client is built once at startup and shared; nothing here holds
//! per-request state.

pub mod azure;
pub mod config;
pub mod error;
pub mod generator;
pub mod prompt;
pub mod types;

pub use azure::AzureOpenAiClient;
pub use config::{AzureOpenAiConfig, GeneratorConfig};
pub use error::{FailureKind, Result, SolveError};
pub use generator::SolutionGenerator;
pub use prompt::{build_prompt, SYSTEM_PROMPT};
pub use types::{ChatMessage, ChatRequest, Role};

/// A chat-completion backend
#[async_trait::async_trait]
pub trait ChatCompletion: Send + Sync {
    /// Request a single completion and return its text content as sent
    async fn complete(&self, request: &ChatRequest) -> Result<String>;
}
